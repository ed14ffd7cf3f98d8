use crate::entities::id::Id;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("The email address is already registered")]
    EmailTaken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("The identity does not exist")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, IdentityError>;

/// Credential management of an identity provider.
///
/// The provider only knows about email addresses and passwords,
/// profiles are kept in the [`UserRepo`](crate::repositories::UserRepo).
pub trait IdentityGateway {
    /// Creates a new identity and returns its uid.
    fn sign_up(&self, email: &str, password: &str) -> Result<Id>;
    /// Verifies the credentials and returns the uid of the identity.
    fn sign_in(&self, email: &str, password: &str) -> Result<Id>;
    fn update_password(&self, uid: &Id, password: &str) -> Result<()>;
    fn delete(&self, uid: &Id) -> Result<()>;
}
