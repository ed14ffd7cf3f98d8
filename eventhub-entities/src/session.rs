use crate::{id::Id, user::Role};

/// The verified identity of the caller of a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Id,
    pub email: String,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Owners and admins may modify a resource.
    pub fn may_modify(&self, owner_id: &Id) -> bool {
        self.is_admin() || &self.user_id == owner_id
    }
}
