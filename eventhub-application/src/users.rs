use super::*;

pub fn register_user(
    connections: &sqlite::Connections,
    identity: &dyn IdentityGateway,
    new_user: usecases::NewUser,
) -> Result<User> {
    let new_user = usecases::validate_new_user(new_user)?;
    let user = connections.exclusive()?.transaction(|conn| {
        usecases::register_user(conn, identity, new_user).map_err(|err| {
            warn!("Failed to register new user: {}", err);
            err
        })
    })?;
    info!("Registered new user {} ({})", user.email, user.id);
    Ok(user)
}

pub fn login(
    connections: &sqlite::Connections,
    identity: &dyn IdentityGateway,
    credentials: &usecases::Credentials,
) -> Result<User> {
    Ok(usecases::login(&connections.shared()?, identity, credentials)?)
}

/// Updates the profile and, if requested, the password of a user.
///
/// The password is only changed after the profile has been stored.
pub fn update_user(
    connections: &sqlite::Connections,
    identity: &dyn IdentityGateway,
    session: &Session,
    user_id: &str,
    patch: usecases::UserPatch,
    password: Option<&str>,
) -> Result<User> {
    let user = connections
        .exclusive()?
        .transaction(|conn| usecases::update_user(conn, session, user_id, patch))?;
    if let Some(password) = password {
        usecases::change_password(identity, session, user_id, password)?;
        info!("Changed password of user {}", user_id);
    }
    Ok(user)
}

/// Deletes the profile and then the identity of a user.
///
/// A failure to delete the identity is only logged, the profile is gone
/// either way and the identity can no longer be used to log in.
pub fn delete_user(
    connections: &sqlite::Connections,
    identity: &dyn IdentityGateway,
    session: &Session,
    user_id: &str,
) -> Result<User> {
    let user = connections
        .exclusive()?
        .transaction(|conn| usecases::delete_user(conn, session, user_id))?;
    if let Err(err) = identity.delete(&user.id) {
        warn!("Failed to delete identity of user {}: {}", user.id, err);
    }
    info!("Deleted user {} ({})", user.email, user.id);
    Ok(user)
}
