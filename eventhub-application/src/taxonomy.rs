use super::*;

pub fn create_tag(connections: &sqlite::Connections, name: &str) -> Result<Tag> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::create_tag(conn, name))?)
}

pub fn update_tag(connections: &sqlite::Connections, id: &str, name: &str) -> Result<Tag> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::update_tag(conn, id, name))?)
}

/// Categories that still refer to the tag keep a dangling id.
pub fn delete_tag(connections: &sqlite::Connections, id: &str) -> Result<()> {
    connections
        .exclusive()?
        .transaction(|conn| usecases::delete_tag(conn, id))?;
    info!("Deleted tag {}", id);
    Ok(())
}

pub fn create_zone(connections: &sqlite::Connections, name: &str) -> Result<LocationZone> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::create_zone(conn, name))?)
}

pub fn update_zone(connections: &sqlite::Connections, id: &str, name: &str) -> Result<LocationZone> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::update_zone(conn, id, name))?)
}

pub fn delete_zone(connections: &sqlite::Connections, id: &str) -> Result<()> {
    connections
        .exclusive()?
        .transaction(|conn| usecases::delete_zone(conn, id))?;
    info!("Deleted location zone {}", id);
    Ok(())
}

pub fn create_category(
    connections: &sqlite::Connections,
    new_category: usecases::NewCategory,
) -> Result<Category> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::create_category(conn, new_category))?)
}

pub fn update_category(
    connections: &sqlite::Connections,
    id: &str,
    patch: usecases::CategoryPatch,
) -> Result<Category> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::update_category(conn, id, patch))?)
}

pub fn delete_category(connections: &sqlite::Connections, id: &str) -> Result<()> {
    connections
        .exclusive()?
        .transaction(|conn| usecases::delete_category(conn, id))?;
    info!("Deleted category {}", id);
    Ok(())
}
