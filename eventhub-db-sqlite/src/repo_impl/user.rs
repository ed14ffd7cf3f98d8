use std::collections::HashMap;

use super::*;
use eventhub_core::entities::user::{Role, User};

impl UserRepo for DbReadOnly<'_> {
    fn create_user(&self, _user: &User) -> Result<()> {
        Err(read_only_access())
    }
    fn update_user(&self, _user: &User) -> Result<()> {
        Err(read_only_access())
    }
    fn delete_user(&self, _id: &str) -> Result<()> {
        Err(read_only_access())
    }

    fn get_user(&self, id: &str) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_user(&self, id: &str) -> Result<Option<User>> {
        try_get_user(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        try_get_user_by_email(&mut self.conn.borrow_mut(), email)
    }
    fn all_users(&self) -> Result<Vec<User>> {
        all_users(&mut self.conn.borrow_mut())
    }
}

impl UserRepo for DbConnection<'_> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }
    fn delete_user(&self, id: &str) -> Result<()> {
        delete_user(&mut self.conn.borrow_mut(), id)
    }

    fn get_user(&self, id: &str) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_user(&self, id: &str) -> Result<Option<User>> {
        try_get_user(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        try_get_user_by_email(&mut self.conn.borrow_mut(), email)
    }
    fn all_users(&self) -> Result<Vec<User>> {
        all_users(&mut self.conn.borrow_mut())
    }
}

fn new_user(u: &User) -> models::NewUser<'_> {
    models::NewUser {
        id: u.id.as_str(),
        email: &u.email,
        name: &u.name,
        role: u.role.as_ref(),
        bio: u.bio.as_deref(),
        profile_image: u.profile_image.as_deref(),
    }
}

fn load_role(role: &str) -> Result<Role> {
    role.parse()
        .map_err(|_| anyhow!("Invalid user role: {role}").into())
}

fn into_user(entity: models::UserEntity, interests: Vec<String>) -> Result<User> {
    let models::UserEntity {
        id,
        email,
        name,
        role,
        bio,
        profile_image,
    } = entity;
    Ok(User {
        id: id.into(),
        email,
        name,
        role: load_role(&role)?,
        bio,
        interests,
        profile_image,
    })
}

fn insert_interests(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    let rows: Vec<_> = u
        .interests
        .iter()
        .map(|interest| models::UserInterest {
            user_id: u.id.as_str(),
            interest,
        })
        .collect();
    if rows.is_empty() {
        return Ok(());
    }
    diesel::insert_into(schema::user_interests::table)
        .values(&rows)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn create_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    diesel::insert_into(schema::users::table)
        .values(&new_user(u))
        .execute(conn)
        .map_err(from_diesel_err)?;
    insert_interests(conn, u)
}

fn update_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    use schema::{user_interests::dsl as interest_dsl, users::dsl};
    let count = diesel::update(dsl::users.filter(dsl::id.eq(u.id.as_str())))
        .set(&new_user(u))
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_affected(count)?;
    diesel::delete(interest_dsl::user_interests.filter(interest_dsl::user_id.eq(u.id.as_str())))
        .execute(conn)
        .map_err(from_diesel_err)?;
    insert_interests(conn, u)
}

fn delete_user(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::users::dsl;
    let count = diesel::delete(dsl::users.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_affected(count)
}

fn load_interests(conn: &mut SqliteConnection, user_id: &str) -> Result<Vec<String>> {
    use schema::user_interests::dsl;
    dsl::user_interests
        .select(dsl::interest)
        .filter(dsl::user_id.eq(user_id))
        .order_by(dsl::interest)
        .load::<String>(conn)
        .map_err(from_diesel_err)
}

fn load_user(conn: &mut SqliteConnection, entity: models::UserEntity) -> Result<User> {
    let interests = load_interests(conn, &entity.id)?;
    into_user(entity, interests)
}

fn get_user(conn: &mut SqliteConnection, id: &str) -> Result<User> {
    try_get_user(conn, id)?.ok_or(repo::Error::NotFound)
}

fn try_get_user(conn: &mut SqliteConnection, id: &str) -> Result<Option<User>> {
    use schema::users::dsl;
    dsl::users
        .filter(dsl::id.eq(id))
        .first::<models::UserEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(|entity| load_user(conn, entity))
        .transpose()
}

fn try_get_user_by_email(conn: &mut SqliteConnection, email: &str) -> Result<Option<User>> {
    use schema::users::dsl;
    dsl::users
        .filter(dsl::email.eq(email))
        .first::<models::UserEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(|entity| load_user(conn, entity))
        .transpose()
}

fn all_users(conn: &mut SqliteConnection) -> Result<Vec<User>> {
    use schema::{user_interests::dsl as interest_dsl, users::dsl};
    let entities = dsl::users
        .order_by(dsl::email)
        .load::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?;
    let mut interests: HashMap<String, Vec<String>> = HashMap::new();
    for (user_id, interest) in interest_dsl::user_interests
        .select((interest_dsl::user_id, interest_dsl::interest))
        .order_by((interest_dsl::user_id, interest_dsl::interest))
        .load::<(String, String)>(conn)
        .map_err(from_diesel_err)?
    {
        interests.entry(user_id).or_default().push(interest);
    }
    entities
        .into_iter()
        .map(|entity| {
            let user_interests = interests.remove(&entity.id).unwrap_or_default();
            into_user(entity, user_interests)
        })
        .collect()
}
