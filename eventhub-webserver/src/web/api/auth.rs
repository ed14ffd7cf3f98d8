use super::*;
use eventhub_boundary::{Credentials, RegisterUser, Session, User};
use eventhub_core::entities::user::Role;

fn session(jwt_state: &jwt::JwtState, user: eventhub_core::entities::user::User) -> Result<Session> {
    let token = jwt_state.generate_token(&user)?;
    ok(Session {
        token,
        user: user.into(),
    })
}

#[post("/auth/register", format = "application/json", data = "<new_user>")]
pub fn post_register(
    db: sqlite::Connections,
    identity: &State<Identity>,
    jwt_state: &State<jwt::JwtState>,
    new_user: JsonResult<RegisterUser>,
) -> Result<Session> {
    let RegisterUser {
        email,
        password,
        name,
    } = new_user?.into_inner();
    let new_user = usecases::NewUser {
        email,
        password,
        name,
        role: Role::User,
    };
    let user = flows::register_user(&db, &**identity.inner(), new_user)?;
    session(jwt_state, user)
}

#[post("/auth/login", format = "application/json", data = "<login>")]
pub fn post_login(
    db: sqlite::Connections,
    identity: &State<Identity>,
    jwt_state: &State<jwt::JwtState>,
    login: JsonResult<Credentials>,
) -> Result<Session> {
    let login = login?.into_inner();
    let credentials = usecases::Credentials {
        email: &login.email,
        password: &login.password,
    };
    let user = flows::login(&db, &**identity.inner(), &credentials).map_err(|err| {
        debug!("Login with email '{}' failed: {}", login.email, err);
        err
    })?;
    info!("User {} logged in", user.id);
    session(jwt_state, user)
}

#[post("/auth/logout")]
pub fn post_logout(auth: Auth, jwt_state: &State<jwt::JwtState>) -> MessageResult {
    for bearer in auth.bearer_tokens() {
        jwt_state.blacklist_token(bearer.to_owned());
    }
    done("Logged out")
}

#[get("/auth/me")]
pub fn get_me(db: sqlite::Connections, account: Account) -> Result<User> {
    let user = usecases::current_user(&db.shared()?, account.session())?;
    ok(user.into())
}
