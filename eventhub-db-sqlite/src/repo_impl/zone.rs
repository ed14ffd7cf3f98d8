use super::*;
use eventhub_core::entities::zone::LocationZone;

impl From<models::LocationZone> for LocationZone {
    fn from(from: models::LocationZone) -> Self {
        let models::LocationZone { id, name } = from;
        Self {
            id: id.into(),
            name,
        }
    }
}

impl From<&LocationZone> for models::LocationZone {
    fn from(from: &LocationZone) -> Self {
        Self {
            id: from.id.to_string(),
            name: from.name.clone(),
        }
    }
}

impl ZoneRepo for DbReadOnly<'_> {
    fn create_zone(&self, _zone: &LocationZone) -> Result<()> {
        Err(read_only_access())
    }
    fn update_zone(&self, _zone: &LocationZone) -> Result<()> {
        Err(read_only_access())
    }
    fn delete_zone(&self, _id: &str) -> Result<()> {
        Err(read_only_access())
    }

    fn get_zone(&self, id: &str) -> Result<LocationZone> {
        get_zone(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_zone(&self, id: &str) -> Result<Option<LocationZone>> {
        try_get_zone(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_zone_by_name(&self, name: &str) -> Result<Option<LocationZone>> {
        try_get_zone_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn all_zones(&self) -> Result<Vec<LocationZone>> {
        all_zones(&mut self.conn.borrow_mut())
    }
}

impl ZoneRepo for DbConnection<'_> {
    fn create_zone(&self, zone: &LocationZone) -> Result<()> {
        create_zone(&mut self.conn.borrow_mut(), zone)
    }
    fn update_zone(&self, zone: &LocationZone) -> Result<()> {
        update_zone(&mut self.conn.borrow_mut(), zone)
    }
    fn delete_zone(&self, id: &str) -> Result<()> {
        delete_zone(&mut self.conn.borrow_mut(), id)
    }

    fn get_zone(&self, id: &str) -> Result<LocationZone> {
        get_zone(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_zone(&self, id: &str) -> Result<Option<LocationZone>> {
        try_get_zone(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_zone_by_name(&self, name: &str) -> Result<Option<LocationZone>> {
        try_get_zone_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn all_zones(&self) -> Result<Vec<LocationZone>> {
        all_zones(&mut self.conn.borrow_mut())
    }
}

fn create_zone(conn: &mut SqliteConnection, zone: &LocationZone) -> Result<()> {
    diesel::insert_into(schema::location_zones::table)
        .values(&models::LocationZone::from(zone))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_zone(conn: &mut SqliteConnection, zone: &LocationZone) -> Result<()> {
    use schema::location_zones::dsl;
    let count = diesel::update(dsl::location_zones.filter(dsl::id.eq(zone.id.as_str())))
        .set(&models::LocationZone::from(zone))
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_affected(count)
}

fn delete_zone(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::location_zones::dsl;
    let count = diesel::delete(dsl::location_zones.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_affected(count)
}

fn get_zone(conn: &mut SqliteConnection, id: &str) -> Result<LocationZone> {
    try_get_zone(conn, id)?.ok_or(repo::Error::NotFound)
}

fn try_get_zone(conn: &mut SqliteConnection, id: &str) -> Result<Option<LocationZone>> {
    use schema::location_zones::dsl;
    Ok(dsl::location_zones
        .filter(dsl::id.eq(id))
        .first::<models::LocationZone>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(Into::into))
}

fn try_get_zone_by_name(conn: &mut SqliteConnection, name: &str) -> Result<Option<LocationZone>> {
    use schema::location_zones::dsl;
    Ok(dsl::location_zones
        .filter(dsl::name.eq(name))
        .first::<models::LocationZone>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(Into::into))
}

fn all_zones(conn: &mut SqliteConnection) -> Result<Vec<LocationZone>> {
    use schema::location_zones::dsl;
    Ok(dsl::location_zones
        .order_by(dsl::name)
        .load::<models::LocationZone>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(LocationZone::from)
        .collect())
}
