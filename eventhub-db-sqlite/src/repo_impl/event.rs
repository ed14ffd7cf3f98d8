use std::collections::HashMap;

use super::*;
use eventhub_core::entities::{
    event::{Event, Location, Participant},
    review::Review,
    time::{format_date, format_time, parse_date, parse_time},
};

impl EventRepo for DbReadOnly<'_> {
    fn create_event(&self, _event: &Event) -> Result<()> {
        Err(read_only_access())
    }
    fn update_event(&self, _event: &Event) -> Result<()> {
        Err(read_only_access())
    }
    fn delete_event(&self, _id: &str) -> Result<()> {
        Err(read_only_access())
    }

    fn get_event(&self, id: &str) -> Result<Event> {
        get_event(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_event(&self, id: &str) -> Result<Option<Event>> {
        try_get_event(&mut self.conn.borrow_mut(), id)
    }
    fn all_events(&self) -> Result<Vec<Event>> {
        load_events(&mut self.conn.borrow_mut(), None)
    }
    fn events_created_by(&self, user_id: &str) -> Result<Vec<Event>> {
        load_events(&mut self.conn.borrow_mut(), Some(user_id))
    }
}

impl EventRepo for DbConnection<'_> {
    fn create_event(&self, event: &Event) -> Result<()> {
        create_event(&mut self.conn.borrow_mut(), event)
    }
    fn update_event(&self, event: &Event) -> Result<()> {
        update_event(&mut self.conn.borrow_mut(), event)
    }
    fn delete_event(&self, id: &str) -> Result<()> {
        delete_event(&mut self.conn.borrow_mut(), id)
    }

    fn get_event(&self, id: &str) -> Result<Event> {
        get_event(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_event(&self, id: &str) -> Result<Option<Event>> {
        try_get_event(&mut self.conn.borrow_mut(), id)
    }
    fn all_events(&self) -> Result<Vec<Event>> {
        load_events(&mut self.conn.borrow_mut(), None)
    }
    fn events_created_by(&self, user_id: &str) -> Result<Vec<Event>> {
        load_events(&mut self.conn.borrow_mut(), Some(user_id))
    }
}

fn new_event(e: &Event) -> models::NewEvent<'_> {
    let Event {
        id,
        name,
        description,
        date,
        time,
        cost,
        image,
        location,
        created_by,
        created_at,
        updated_at,
        ..
    } = e;
    models::NewEvent {
        id: id.as_str(),
        name,
        description: description.as_deref(),
        date: format_date(*date),
        time: format_time(*time),
        cost: *cost,
        image: image.as_deref(),
        location_exact: location.exact.as_deref(),
        location_zone: location.zone.as_str(),
        latitude: location.latitude,
        longitude: location.longitude,
        created_by: created_by.as_str(),
        created_at: created_at.as_millis(),
        updated_at: updated_at.as_millis(),
    }
}

/// Rows of the embedded collections of an event.
#[derive(Default)]
struct EmbeddedRows {
    categories: Vec<models::EventCategory>,
    reviews: Vec<models::EventReview>,
    participants: Vec<models::EventParticipant>,
}

fn embedded_rows(e: &Event) -> Result<EmbeddedRows> {
    let event_id = e.id.to_string();
    let mut rows = EmbeddedRows::default();
    for (index, category_id) in e.categories.iter().enumerate() {
        rows.categories.push(models::EventCategory {
            event_id: event_id.clone(),
            category_id: category_id.to_string(),
            position: position(index)?,
        });
    }
    for (index, review) in e.reviews.iter().enumerate() {
        rows.reviews.push(models::EventReview {
            event_id: event_id.clone(),
            review_id: review.id.to_string(),
            position: position(index)?,
            user_id: review.user_id.to_string(),
            user_name: review.user_name.clone(),
            profile_picture: review.profile_picture.clone(),
            grade: i32::from(u8::from(review.grade)),
            review_text: review.review_text.clone(),
            timestamp: review.timestamp.as_millis(),
        });
    }
    for (index, participant) in e.participants.iter().enumerate() {
        rows.participants.push(models::EventParticipant {
            event_id: event_id.clone(),
            user_id: participant.user_id.to_string(),
            position: position(index)?,
            user_name: participant.user_name.clone(),
            user_email: participant.user_email.clone(),
            joined_at: participant.joined_at.as_millis(),
        });
    }
    Ok(rows)
}

fn insert_embedded_rows(conn: &mut SqliteConnection, e: &Event) -> Result<()> {
    let EmbeddedRows {
        categories,
        reviews,
        participants,
    } = embedded_rows(e)?;
    if !categories.is_empty() {
        diesel::insert_into(schema::event_categories::table)
            .values(&categories)
            .execute(conn)
            .map_err(from_diesel_err)?;
    }
    if !reviews.is_empty() {
        diesel::insert_into(schema::event_reviews::table)
            .values(&reviews)
            .execute(conn)
            .map_err(from_diesel_err)?;
    }
    if !participants.is_empty() {
        diesel::insert_into(schema::event_participants::table)
            .values(&participants)
            .execute(conn)
            .map_err(from_diesel_err)?;
    }
    Ok(())
}

fn delete_embedded_rows(conn: &mut SqliteConnection, event_id: &str) -> Result<()> {
    use schema::{event_categories as c, event_participants as p, event_reviews as r};
    diesel::delete(c::table.filter(c::event_id.eq(event_id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    diesel::delete(r::table.filter(r::event_id.eq(event_id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    diesel::delete(p::table.filter(p::event_id.eq(event_id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn create_event(conn: &mut SqliteConnection, e: &Event) -> Result<()> {
    diesel::insert_into(schema::events::table)
        .values(&new_event(e))
        .execute(conn)
        .map_err(from_diesel_err)?;
    insert_embedded_rows(conn, e)
}

fn update_event(conn: &mut SqliteConnection, e: &Event) -> Result<()> {
    use schema::events::dsl;
    let count = diesel::update(dsl::events.filter(dsl::id.eq(e.id.as_str())))
        .set(&new_event(e))
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_affected(count)?;
    delete_embedded_rows(conn, e.id.as_str())?;
    insert_embedded_rows(conn, e)
}

fn delete_event(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::events::dsl;
    delete_embedded_rows(conn, id)?;
    let count = diesel::delete(dsl::events.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_affected(count)
}

fn get_event(conn: &mut SqliteConnection, id: &str) -> Result<Event> {
    try_get_event(conn, id)?.ok_or(repo::Error::NotFound)
}

fn try_get_event(conn: &mut SqliteConnection, id: &str) -> Result<Option<Event>> {
    use schema::events::dsl;
    let Some(entity) = dsl::events
        .filter(dsl::id.eq(id))
        .first::<models::EventEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
    else {
        return Ok(None);
    };
    let mut embedded = load_embedded(conn, Some(id))?;
    into_event(entity, &mut embedded).map(Some)
}

fn load_events(conn: &mut SqliteConnection, created_by: Option<&str>) -> Result<Vec<Event>> {
    use schema::events::dsl;
    let mut query = dsl::events.into_boxed();
    if let Some(user_id) = created_by {
        query = query.filter(dsl::created_by.eq(user_id));
    }
    let entities = query
        .order_by(dsl::created_at)
        .load::<models::EventEntity>(conn)
        .map_err(from_diesel_err)?;
    let mut embedded = load_embedded(conn, None)?;
    entities
        .into_iter()
        .map(|entity| into_event(entity, &mut embedded))
        .collect()
}

/// Embedded collections grouped by event id.
#[derive(Default)]
struct Embedded {
    categories: HashMap<String, Vec<Id>>,
    reviews: HashMap<String, Vec<Review>>,
    participants: HashMap<String, Vec<Participant>>,
}

fn load_embedded(conn: &mut SqliteConnection, event_id: Option<&str>) -> Result<Embedded> {
    use schema::{event_categories as c, event_participants as p, event_reviews as r};
    let mut embedded = Embedded::default();

    let mut query = c::table.into_boxed();
    if let Some(id) = event_id {
        query = query.filter(c::event_id.eq(id));
    }
    for row in query
        .order_by((c::event_id, c::position))
        .load::<models::EventCategory>(conn)
        .map_err(from_diesel_err)?
    {
        embedded
            .categories
            .entry(row.event_id)
            .or_default()
            .push(row.category_id.into());
    }

    let mut query = r::table.into_boxed();
    if let Some(id) = event_id {
        query = query.filter(r::event_id.eq(id));
    }
    for row in query
        .order_by((r::event_id, r::position))
        .load::<models::EventReview>(conn)
        .map_err(from_diesel_err)?
    {
        let review = Review {
            id: row.review_id.into(),
            user_id: row.user_id.into(),
            user_name: row.user_name,
            profile_picture: row.profile_picture,
            event_id: row.event_id.clone().into(),
            grade: load_grade(row.grade)?,
            review_text: row.review_text,
            timestamp: Timestamp::from_millis(row.timestamp),
        };
        embedded
            .reviews
            .entry(row.event_id)
            .or_default()
            .push(review);
    }

    let mut query = p::table.into_boxed();
    if let Some(id) = event_id {
        query = query.filter(p::event_id.eq(id));
    }
    for row in query
        .order_by((p::event_id, p::position))
        .load::<models::EventParticipant>(conn)
        .map_err(from_diesel_err)?
    {
        let participant = Participant {
            user_id: row.user_id.into(),
            user_name: row.user_name,
            user_email: row.user_email,
            joined_at: Timestamp::from_millis(row.joined_at),
        };
        embedded
            .participants
            .entry(row.event_id)
            .or_default()
            .push(participant);
    }
    Ok(embedded)
}

pub(super) fn load_grade(grade: i32) -> Result<eventhub_core::entities::review::Grade> {
    u8::try_from(grade)
        .map(Into::into)
        .map_err(|_| anyhow!("Invalid grade: {grade}").into())
}

fn into_event(entity: models::EventEntity, embedded: &mut Embedded) -> Result<Event> {
    let models::EventEntity {
        id,
        name,
        description,
        date,
        time,
        cost,
        image,
        location_exact,
        location_zone,
        latitude,
        longitude,
        created_by,
        created_at,
        updated_at,
    } = entity;
    let date = parse_date(&date).map_err(|err| anyhow!("Invalid date '{date}': {err}"))?;
    let time = parse_time(&time).map_err(|err| anyhow!("Invalid time '{time}': {err}"))?;
    Ok(Event {
        categories: embedded.categories.remove(&id).unwrap_or_default(),
        reviews: embedded.reviews.remove(&id).unwrap_or_default(),
        participants: embedded.participants.remove(&id).unwrap_or_default(),
        id: id.into(),
        name,
        description,
        date,
        time,
        cost,
        image,
        location: Location {
            exact: location_exact,
            zone: location_zone.into(),
            latitude,
            longitude,
        },
        created_by: created_by.into(),
        created_at: Timestamp::from_millis(created_at),
        updated_at: Timestamp::from_millis(updated_at),
    })
}
