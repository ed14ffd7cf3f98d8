use super::*;
use eventhub_core::entities::tag::Tag;

impl From<models::Tag> for Tag {
    fn from(from: models::Tag) -> Self {
        let models::Tag { id, name } = from;
        Self {
            id: id.into(),
            name,
        }
    }
}

impl From<&Tag> for models::Tag {
    fn from(from: &Tag) -> Self {
        Self {
            id: from.id.to_string(),
            name: from.name.clone(),
        }
    }
}

impl TagRepo for DbReadOnly<'_> {
    fn create_tag(&self, _tag: &Tag) -> Result<()> {
        Err(read_only_access())
    }
    fn update_tag(&self, _tag: &Tag) -> Result<()> {
        Err(read_only_access())
    }
    fn delete_tag(&self, _id: &str) -> Result<()> {
        Err(read_only_access())
    }

    fn get_tag(&self, id: &str) -> Result<Tag> {
        get_tag(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_tag(&self, id: &str) -> Result<Option<Tag>> {
        try_get_tag(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
        try_get_tag_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn all_tags(&self) -> Result<Vec<Tag>> {
        all_tags(&mut self.conn.borrow_mut())
    }
}

impl TagRepo for DbConnection<'_> {
    fn create_tag(&self, tag: &Tag) -> Result<()> {
        create_tag(&mut self.conn.borrow_mut(), tag)
    }
    fn update_tag(&self, tag: &Tag) -> Result<()> {
        update_tag(&mut self.conn.borrow_mut(), tag)
    }
    fn delete_tag(&self, id: &str) -> Result<()> {
        delete_tag(&mut self.conn.borrow_mut(), id)
    }

    fn get_tag(&self, id: &str) -> Result<Tag> {
        get_tag(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_tag(&self, id: &str) -> Result<Option<Tag>> {
        try_get_tag(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
        try_get_tag_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn all_tags(&self) -> Result<Vec<Tag>> {
        all_tags(&mut self.conn.borrow_mut())
    }
}

fn create_tag(conn: &mut SqliteConnection, tag: &Tag) -> Result<()> {
    diesel::insert_into(schema::tags::table)
        .values(&models::Tag::from(tag))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_tag(conn: &mut SqliteConnection, tag: &Tag) -> Result<()> {
    use schema::tags::dsl;
    let count = diesel::update(dsl::tags.filter(dsl::id.eq(tag.id.as_str())))
        .set(&models::Tag::from(tag))
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_affected(count)
}

fn delete_tag(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::tags::dsl;
    let count = diesel::delete(dsl::tags.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_affected(count)
}

fn get_tag(conn: &mut SqliteConnection, id: &str) -> Result<Tag> {
    try_get_tag(conn, id)?.ok_or(repo::Error::NotFound)
}

fn try_get_tag(conn: &mut SqliteConnection, id: &str) -> Result<Option<Tag>> {
    use schema::tags::dsl;
    Ok(dsl::tags
        .filter(dsl::id.eq(id))
        .first::<models::Tag>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(Into::into))
}

fn try_get_tag_by_name(conn: &mut SqliteConnection, name: &str) -> Result<Option<Tag>> {
    use schema::tags::dsl;
    Ok(dsl::tags
        .filter(dsl::name.eq(name))
        .first::<models::Tag>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(Into::into))
}

fn all_tags(conn: &mut SqliteConnection) -> Result<Vec<Tag>> {
    use schema::tags::dsl;
    Ok(dsl::tags
        .order_by(dsl::name)
        .load::<models::Tag>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(Tag::from)
        .collect())
}
