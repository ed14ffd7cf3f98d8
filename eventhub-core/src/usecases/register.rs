use super::prelude::*;
use crate::{gateways::identity::IdentityGateway, util::validate};

#[rustfmt::skip]
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email    : String,
    pub password : String,
    pub name     : String,
    pub role     : Role,
}

#[derive(Debug, Clone)]
pub struct ValidNewUser(NewUser);

pub fn validate_new_user(new_user: NewUser) -> Result<ValidNewUser> {
    let NewUser {
        email,
        password,
        name,
        role,
    } = new_user;
    let email = email.trim().to_lowercase();
    if !validate::is_valid_email(&email) {
        return Err(Error::InvalidEmail);
    }
    if !validate::is_valid_password(&password) {
        return Err(Error::InvalidPassword);
    }
    let name = name.trim().to_owned();
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    Ok(ValidNewUser(NewUser {
        email,
        password,
        name,
        role,
    }))
}

/// Creates the identity and then the profile of a new user.
///
/// If the profile cannot be stored the identity is deleted again.
pub fn register_user<R, I>(repo: &R, identity: &I, new_user: ValidNewUser) -> Result<User>
where
    R: UserRepo,
    I: IdentityGateway + ?Sized,
{
    let NewUser {
        email,
        password,
        name,
        role,
    } = new_user.0;
    if repo.try_get_user_by_email(&email)?.is_some() {
        return Err(Error::EmailTaken);
    }
    let uid = identity.sign_up(&email, &password)?;
    let user = User {
        id: uid,
        email,
        name,
        role,
        bio: None,
        interests: vec![],
        profile_image: None,
    };
    if let Err(err) = repo.create_user(&user) {
        if let Err(err) = identity.delete(&user.id) {
            log::warn!(
                "Failed to delete identity {} after aborted registration: {}",
                user.id,
                err
            );
        }
        return Err(match err {
            RepoError::AlreadyExists => Error::EmailTaken,
            err => Error::Repo(err),
        });
    }
    log::info!("Registered new user {} ({})", user.email, user.id);
    Ok(user)
}
