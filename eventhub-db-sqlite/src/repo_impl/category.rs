use std::collections::HashMap;

use super::*;
use eventhub_core::entities::category::Category;

impl CategoryRepo for DbReadOnly<'_> {
    fn create_category(&self, _category: &Category) -> Result<()> {
        Err(read_only_access())
    }
    fn update_category(&self, _category: &Category) -> Result<()> {
        Err(read_only_access())
    }
    fn delete_category(&self, _id: &str) -> Result<()> {
        Err(read_only_access())
    }

    fn get_category(&self, id: &str) -> Result<Category> {
        get_category(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_category(&self, id: &str) -> Result<Option<Category>> {
        try_get_category(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        try_get_category_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn all_categories(&self) -> Result<Vec<Category>> {
        all_categories(&mut self.conn.borrow_mut())
    }
}

impl CategoryRepo for DbConnection<'_> {
    fn create_category(&self, category: &Category) -> Result<()> {
        create_category(&mut self.conn.borrow_mut(), category)
    }
    fn update_category(&self, category: &Category) -> Result<()> {
        update_category(&mut self.conn.borrow_mut(), category)
    }
    fn delete_category(&self, id: &str) -> Result<()> {
        delete_category(&mut self.conn.borrow_mut(), id)
    }

    fn get_category(&self, id: &str) -> Result<Category> {
        get_category(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_category(&self, id: &str) -> Result<Option<Category>> {
        try_get_category(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        try_get_category_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn all_categories(&self) -> Result<Vec<Category>> {
        all_categories(&mut self.conn.borrow_mut())
    }
}

fn new_category(c: &Category) -> models::NewCategory<'_> {
    models::NewCategory {
        id: c.id.as_str(),
        name: &c.name,
        image: c.image.as_deref(),
    }
}

fn insert_category_tags(conn: &mut SqliteConnection, c: &Category) -> Result<()> {
    let rows = c
        .tags
        .iter()
        .enumerate()
        .map(|(index, tag_id)| {
            Ok(models::CategoryTag {
                category_id: c.id.to_string(),
                tag_id: tag_id.to_string(),
                position: position(index)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    if rows.is_empty() {
        return Ok(());
    }
    diesel::insert_into(schema::category_tags::table)
        .values(&rows)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn create_category(conn: &mut SqliteConnection, c: &Category) -> Result<()> {
    diesel::insert_into(schema::categories::table)
        .values(&new_category(c))
        .execute(conn)
        .map_err(from_diesel_err)?;
    insert_category_tags(conn, c)
}

fn update_category(conn: &mut SqliteConnection, c: &Category) -> Result<()> {
    use schema::{categories::dsl, category_tags::dsl as tag_dsl};
    let count = diesel::update(dsl::categories.filter(dsl::id.eq(c.id.as_str())))
        .set(&new_category(c))
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_affected(count)?;
    diesel::delete(tag_dsl::category_tags.filter(tag_dsl::category_id.eq(c.id.as_str())))
        .execute(conn)
        .map_err(from_diesel_err)?;
    insert_category_tags(conn, c)
}

fn delete_category(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::categories::dsl;
    let count = diesel::delete(dsl::categories.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_affected(count)
}

fn get_category(conn: &mut SqliteConnection, id: &str) -> Result<Category> {
    try_get_category(conn, id)?.ok_or(repo::Error::NotFound)
}

fn load_category(conn: &mut SqliteConnection, entity: models::CategoryEntity) -> Result<Category> {
    use schema::category_tags::dsl;
    let tags = dsl::category_tags
        .select(dsl::tag_id)
        .filter(dsl::category_id.eq(&entity.id))
        .order_by(dsl::position)
        .load::<String>(conn)
        .map_err(from_diesel_err)?;
    let models::CategoryEntity { id, name, image } = entity;
    Ok(Category {
        id: id.into(),
        name,
        image,
        tags: tags.into_iter().map(Id::from).collect(),
    })
}

fn try_get_category(conn: &mut SqliteConnection, id: &str) -> Result<Option<Category>> {
    use schema::categories::dsl;
    dsl::categories
        .filter(dsl::id.eq(id))
        .first::<models::CategoryEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(|entity| load_category(conn, entity))
        .transpose()
}

fn try_get_category_by_name(conn: &mut SqliteConnection, name: &str) -> Result<Option<Category>> {
    use schema::categories::dsl;
    dsl::categories
        .filter(dsl::name.eq(name))
        .first::<models::CategoryEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(|entity| load_category(conn, entity))
        .transpose()
}

fn all_categories(conn: &mut SqliteConnection) -> Result<Vec<Category>> {
    use schema::{categories::dsl, category_tags::dsl as tag_dsl};
    let entities = dsl::categories
        .order_by(dsl::name)
        .load::<models::CategoryEntity>(conn)
        .map_err(from_diesel_err)?;
    let mut tags: HashMap<String, Vec<Id>> = HashMap::new();
    for models::CategoryTag {
        category_id,
        tag_id,
        ..
    } in tag_dsl::category_tags
        .order_by((tag_dsl::category_id, tag_dsl::position))
        .load::<models::CategoryTag>(conn)
        .map_err(from_diesel_err)?
    {
        tags.entry(category_id).or_default().push(tag_id.into());
    }
    Ok(entities
        .into_iter()
        .map(|models::CategoryEntity { id, name, image }| {
            let tags = tags.remove(&id).unwrap_or_default();
            Category {
                id: id.into(),
                name,
                image,
                tags,
            }
        })
        .collect())
}
