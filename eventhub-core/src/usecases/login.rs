use super::prelude::*;
use crate::gateways::identity::{IdentityError, IdentityGateway};

#[derive(Debug, Clone)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Verifies the credentials and loads the profile of the user.
pub fn login<R, I>(repo: &R, identity: &I, credentials: &Credentials) -> Result<User>
where
    R: UserRepo,
    I: IdentityGateway + ?Sized,
{
    let email = credentials.email.trim().to_lowercase();
    if email.is_empty() || credentials.password.is_empty() {
        return Err(Error::InvalidCredentials);
    }
    let uid = identity
        .sign_in(&email, credentials.password)
        .map_err(|err| match err {
            IdentityError::NotFound | IdentityError::InvalidCredentials => {
                log::debug!("Login of {} failed", email);
                Error::InvalidCredentials
            }
            err => err.into(),
        })?;
    repo.try_get_user(uid.as_str())?.ok_or_else(|| {
        log::warn!("Identity {} of {} has no profile", uid, email);
        Error::ProfileNotFound
    })
}
