use super::*;
use eventhub_boundary::{NewUser, UpdateUser, User};
use eventhub_core::entities::user::Role;

#[get("/users")]
pub fn get_users(db: sqlite::Connections, account: Account) -> Result<Vec<User>> {
    let users = usecases::list_users(&db.shared()?, account.session())?;
    ok(users.into_iter().map(Into::into).collect())
}

/// Admins may create users with any role.
#[post("/users", format = "application/json", data = "<new_user>")]
pub fn post_user(
    db: sqlite::Connections,
    account: Account,
    identity: &State<Identity>,
    new_user: JsonResult<NewUser>,
) -> Result<User> {
    if !account.session().is_admin() {
        return Err(usecases::Error::Forbidden.into());
    }
    let NewUser {
        email,
        password,
        name,
        role,
    } = new_user?.into_inner();
    let new_user = usecases::NewUser {
        email,
        password,
        name,
        role: role.map(Role::from).unwrap_or_default(),
    };
    let user = flows::register_user(&db, &**identity.inner(), new_user)?;
    ok(user.into())
}

#[get("/users/<id>")]
pub fn get_user(db: sqlite::Connections, account: Account, id: &str) -> Result<User> {
    let user = usecases::get_user(&db.shared()?, account.session(), id)?;
    ok(user.into())
}

#[put("/users/<id>", format = "application/json", data = "<update>")]
pub fn put_user(
    db: sqlite::Connections,
    account: Account,
    identity: &State<Identity>,
    id: &str,
    update: JsonResult<UpdateUser>,
) -> Result<User> {
    let UpdateUser {
        name,
        bio,
        interests,
        profile_image,
        role,
        password,
    } = update?.into_inner();
    let patch = usecases::UserPatch {
        name,
        bio,
        interests,
        profile_image,
        role: role.map(Into::into),
    };
    let user = flows::update_user(
        &db,
        &**identity.inner(),
        account.session(),
        id,
        patch,
        password.as_deref(),
    )?;
    ok(user.into())
}

#[delete("/users/<id>")]
pub fn delete_user(
    db: sqlite::Connections,
    account: Account,
    identity: &State<Identity>,
    id: &str,
) -> MessageResult {
    flows::delete_user(&db, &**identity.inner(), account.session(), id)?;
    done("User deleted")
}
