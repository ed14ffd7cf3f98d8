use strum::{AsRefStr, Display, EnumString};

use crate::id::Id;

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id            : Id,
    pub email         : String,
    pub name          : String,
    pub role          : Role,
    pub bio           : Option<String>,
    pub interests     : Vec<String>,
    pub profile_image : Option<String>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Keeps interests sorted and free of blank or duplicate entries.
pub fn normalize_interests<I, S>(interests: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut interests: Vec<_> = interests
        .into_iter()
        .map(|s| s.as_ref().trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect();
    interests.sort_unstable();
    interests.dedup();
    interests
}
