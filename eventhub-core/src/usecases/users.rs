use super::prelude::*;
use crate::{gateways::identity::IdentityGateway, util::validate};

#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name          : Option<String>,
    pub bio           : Option<String>,
    pub interests     : Option<Vec<String>>,
    pub profile_image : Option<String>,
    pub role          : Option<Role>,
}

fn profile_not_found(err: RepoError) -> Error {
    match err {
        RepoError::NotFound => Error::ProfileNotFound,
        _ => Error::Repo(err),
    }
}

fn authorize_self_or_admin(session: &Session, user_id: &str) -> Result<()> {
    if session.is_admin() || session.user_id == *user_id {
        Ok(())
    } else {
        Err(Error::Forbidden)
    }
}

pub fn get_user<R: UserRepo>(repo: &R, session: &Session, user_id: &str) -> Result<User> {
    authorize_self_or_admin(session, user_id)?;
    repo.get_user(user_id).map_err(profile_not_found)
}

pub fn current_user<R: UserRepo>(repo: &R, session: &Session) -> Result<User> {
    repo.get_user(session.user_id.as_str())
        .map_err(profile_not_found)
}

pub fn list_users<R: UserRepo>(repo: &R, session: &Session) -> Result<Vec<User>> {
    if !session.is_admin() {
        return Err(Error::Forbidden);
    }
    let mut users = repo.all_users()?;
    users.sort_by(|a, b| a.email.cmp(&b.email));
    Ok(users)
}

pub fn update_user<R: UserRepo>(
    repo: &R,
    session: &Session,
    user_id: &str,
    patch: UserPatch,
) -> Result<User> {
    authorize_self_or_admin(session, user_id)?;
    let mut user = repo.get_user(user_id).map_err(profile_not_found)?;
    let UserPatch {
        name,
        bio,
        interests,
        profile_image,
        role,
    } = patch;
    if let Some(role) = role {
        if role != user.role && !session.is_admin() {
            return Err(Error::RoleChangeForbidden);
        }
        user.role = role;
    }
    if let Some(name) = name {
        let name = name.trim().to_owned();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        user.name = name;
    }
    if let Some(bio) = bio {
        user.bio = Some(bio).filter(|b| !b.trim().is_empty());
    }
    if let Some(interests) = interests {
        user.interests = normalize_interests(interests);
    }
    if let Some(profile_image) = profile_image {
        user.profile_image = Some(profile_image).filter(|i| !i.trim().is_empty());
    }
    repo.update_user(&user)?;
    Ok(user)
}

pub fn change_password<I: IdentityGateway + ?Sized>(
    identity: &I,
    session: &Session,
    user_id: &str,
    password: &str,
) -> Result<()> {
    authorize_self_or_admin(session, user_id)?;
    if !validate::is_valid_password(password) {
        return Err(Error::InvalidPassword);
    }
    identity.update_password(&Id::from(user_id), password)?;
    Ok(())
}

/// Removes the profile of a user.
///
/// The identity must be deleted after the profile has been removed.
pub fn delete_user<R: UserRepo>(repo: &R, session: &Session, user_id: &str) -> Result<User> {
    authorize_self_or_admin(session, user_id)?;
    let user = repo.get_user(user_id).map_err(profile_not_found)?;
    repo.delete_user(user_id).map_err(profile_not_found)?;
    Ok(user)
}
