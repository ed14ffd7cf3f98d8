use super::{prelude::*, resolve_all, resolve_category, resolve_zone};
use crate::{
    entities::time::{parse_date, parse_time},
    util::validate,
};

#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub name        : String,
    pub description : Option<String>,
    pub date        : Option<String>,
    pub time        : Option<String>,
    pub cost        : Option<f64>,
    pub image       : Option<String>,
    pub location    : Option<NewLocation>,
    pub categories  : Vec<EntityRef>,
}

#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct NewLocation {
    pub exact     : Option<String>,
    pub zone      : Option<EntityRef>,
    pub latitude  : Option<f64>,
    pub longitude : Option<f64>,
}

/// Changes of an event, absent fields are left untouched.
#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub name        : Option<String>,
    pub description : Option<String>,
    pub date        : Option<String>,
    pub time        : Option<String>,
    pub cost        : Option<f64>,
    /// An empty string removes the image.
    pub image       : Option<String>,
    pub location    : Option<NewLocation>,
    pub categories  : Option<Vec<EntityRef>>,
}

/// A validated event that is ready to be stored.
#[derive(Debug, Clone)]
pub struct Storable(Event);

impl Storable {
    pub fn event(&self) -> &Event {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct StorableUpdate {
    pub event: Storable,
    /// The image that has been replaced or removed by the update.
    pub replaced_image: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

fn validate_event(event: &Event) -> Result<()> {
    if event.name.trim().is_empty() {
        return Err(Error::EmptyName);
    }
    if !event.location.zone.is_valid() {
        return Err(Error::MissingZone);
    }
    if !validate::is_valid_cost(event.cost) {
        return Err(Error::InvalidCost);
    }
    let Location {
        latitude,
        longitude,
        ..
    } = &event.location;
    if latitude.map(|lat| !validate::is_valid_latitude(lat)).unwrap_or(false)
        || longitude.map(|lng| !validate::is_valid_longitude(lng)).unwrap_or(false)
    {
        return Err(Error::InvalidPosition);
    }
    Ok(())
}

pub fn prepare_new_event<R>(repo: &R, owner_id: &Id, e: NewEvent) -> Result<Storable>
where
    R: CategoryRepo + ZoneRepo,
{
    let NewEvent {
        name,
        description,
        date,
        time,
        cost,
        image,
        location,
        categories,
    } = e;
    let date = date
        .filter(|d| !d.trim().is_empty())
        .ok_or(Error::MissingDate)
        .and_then(|d| parse_date(&d).map_err(|_| Error::InvalidDate))?;
    let time = time
        .filter(|t| !t.trim().is_empty())
        .ok_or(Error::MissingTime)
        .and_then(|t| parse_time(&t).map_err(|_| Error::InvalidTime))?;
    let NewLocation {
        exact,
        zone,
        latitude,
        longitude,
    } = location.unwrap_or_default();
    let zone = zone
        .filter(|z| !z.is_blank())
        .ok_or(Error::MissingZone)?;
    let name = name.trim().to_owned();
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    let zone = resolve_zone(repo, &zone)?;
    let categories = resolve_all(&categories, |c| resolve_category(repo, c))?;
    let now = Timestamp::now();
    let event = Event {
        id: Id::new(),
        name,
        description: non_empty(description),
        date,
        time,
        cost: cost.unwrap_or(0.0),
        image: non_empty(image),
        location: Location {
            exact: non_empty(exact),
            zone,
            latitude,
            longitude,
        },
        categories,
        reviews: vec![],
        participants: vec![],
        created_by: owner_id.clone(),
        created_at: now,
        updated_at: now,
    };
    validate_event(&event)?;
    Ok(Storable(event))
}

pub fn store_created_event<R: EventRepo>(repo: &R, s: Storable) -> Result<Event> {
    let Storable(event) = s;
    log::debug!("Storing newly created event {} ({})", event.name, event.id);
    repo.create_event(&event)?;
    Ok(event)
}

pub fn prepare_event_update<R>(
    repo: &R,
    session: &Session,
    id: &str,
    patch: EventPatch,
) -> Result<StorableUpdate>
where
    R: EventRepo + CategoryRepo + ZoneRepo,
{
    let old_event = super::get_event(repo, id)?;
    super::authorize_modification(session, &old_event.created_by)?;
    let EventPatch {
        name,
        description,
        date,
        time,
        cost,
        image,
        location,
        categories,
    } = patch;
    let mut event = old_event.clone();
    if let Some(name) = name {
        event.name = name.trim().to_owned();
    }
    if let Some(description) = description {
        event.description = non_empty(Some(description));
    }
    if let Some(date) = date {
        event.date = parse_date(&date).map_err(|_| Error::InvalidDate)?;
    }
    if let Some(time) = time {
        event.time = parse_time(&time).map_err(|_| Error::InvalidTime)?;
    }
    if let Some(cost) = cost {
        event.cost = cost;
    }
    if let Some(image) = image {
        event.image = non_empty(Some(image));
    }
    if let Some(location) = location {
        merge_location(repo, &mut event.location, location)?;
    }
    if let Some(categories) = categories {
        event.categories = resolve_all(&categories, |c| resolve_category(repo, c))?;
    }
    event.updated_at = Timestamp::now();
    validate_event(&event)?;
    let replaced_image = old_event.image.filter(|old| event.image.as_ref() != Some(old));
    Ok(StorableUpdate {
        event: Storable(event),
        replaced_image,
    })
}

// Only the given fields replace the existing ones.
fn merge_location<R: ZoneRepo>(
    repo: &R,
    location: &mut Location,
    patch: NewLocation,
) -> Result<()> {
    let NewLocation {
        exact,
        zone,
        latitude,
        longitude,
    } = patch;
    if let Some(exact) = exact {
        location.exact = non_empty(Some(exact));
    }
    if let Some(zone) = zone {
        if zone.is_blank() {
            return Err(Error::MissingZone);
        }
        location.zone = resolve_zone(repo, &zone)?;
    }
    if let Some(latitude) = latitude {
        location.latitude = Some(latitude);
    }
    if let Some(longitude) = longitude {
        location.longitude = Some(longitude);
    }
    Ok(())
}

pub fn store_updated_event<R: EventRepo>(repo: &R, s: Storable) -> Result<Event> {
    let Storable(event) = s;
    log::debug!("Storing updated event {} ({})", event.name, event.id);
    repo.update_event(&event)?;
    Ok(event)
}

pub fn add_event_category<R>(
    repo: &R,
    session: &Session,
    event_id: &str,
    category: &EntityRef,
) -> Result<Event>
where
    R: EventRepo + CategoryRepo,
{
    let mut event = super::get_event(repo, event_id)?;
    super::authorize_modification(session, &event.created_by)?;
    let category_id = resolve_category(repo, category)?;
    if !event.has_category(&category_id) {
        event.categories.push(category_id);
        event.updated_at = Timestamp::now();
        repo.update_event(&event)?;
    }
    Ok(event)
}

pub fn remove_event_category<R: EventRepo>(
    repo: &R,
    session: &Session,
    event_id: &str,
    category_id: &str,
) -> Result<Event> {
    let mut event = super::get_event(repo, event_id)?;
    super::authorize_modification(session, &event.created_by)?;
    let count = event.categories.len();
    event.categories.retain(|id| id.as_str() != category_id);
    if event.categories.len() == count {
        return Err(Error::NotFound("The category of the event"));
    }
    event.updated_at = Timestamp::now();
    repo.update_event(&event)?;
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::{
        super::tests::{session, MockDb},
        *,
    };
    use crate::entities::builders::*;
    use time::macros::{date, time};

    fn new_event() -> NewEvent {
        NewEvent {
            name: "Open Air".into(),
            date: Some("2030-07-01".into()),
            time: Some("20:00".into()),
            location: Some(NewLocation {
                exact: Some("Main Square 1".into()),
                zone: Some(EntityRef::ByName("Center".into())),
                latitude: Some(48.0),
                longitude: Some(11.0),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn create_event_with_zone_by_name() {
        let db = MockDb::default();
        let s = prepare_new_event(&db, &"alice".into(), new_event()).unwrap();
        let event = store_created_event(&db, s).unwrap();
        assert_eq!(event.date, date!(2030 - 07 - 01));
        assert_eq!(event.time, time!(20:00));
        assert_eq!(event.cost, 0.0);
        assert_eq!(event.created_by.as_str(), "alice");
        assert!(event.reviews.is_empty());
        assert!(event.participants.is_empty());
        let zones = db.zones.borrow();
        assert_eq!(zones.len(), 1);
        assert_eq!(event.location.zone, zones[0].id);
        assert_eq!(db.events.borrow().len(), 1);
    }

    #[test]
    fn create_event_requires_mandatory_fields() {
        let db = MockDb::default();
        let owner = Id::from("alice");

        let mut e = new_event();
        e.date = None;
        assert!(matches!(
            prepare_new_event(&db, &owner, e),
            Err(Error::MissingDate)
        ));

        let mut e = new_event();
        e.time = Some(" ".into());
        assert!(matches!(
            prepare_new_event(&db, &owner, e),
            Err(Error::MissingTime)
        ));

        let mut e = new_event();
        e.location = None;
        assert!(matches!(
            prepare_new_event(&db, &owner, e),
            Err(Error::MissingZone)
        ));

        let mut e = new_event();
        e.name = "  ".into();
        assert!(matches!(
            prepare_new_event(&db, &owner, e),
            Err(Error::EmptyName)
        ));

        let mut e = new_event();
        e.date = Some("tomorrow".into());
        assert!(matches!(
            prepare_new_event(&db, &owner, e),
            Err(Error::InvalidDate)
        ));

        let mut e = new_event();
        e.cost = Some(-1.0);
        assert!(matches!(
            prepare_new_event(&db, &owner, e),
            Err(Error::InvalidCost)
        ));
        assert!(db.events.borrow().is_empty());
    }

    #[test]
    fn create_event_resolves_categories() {
        let db = MockDb::default();
        let mut e = new_event();
        e.categories = vec![
            EntityRef::ByName("Music".into()),
            EntityRef::ByName("Music".into()),
            EntityRef::ByName("Outdoor".into()),
        ];
        let s = prepare_new_event(&db, &"alice".into(), e).unwrap();
        assert_eq!(s.event().categories.len(), 2);
        assert_eq!(db.categories.borrow().len(), 2);
    }

    #[test]
    fn update_merges_location_shallowly() {
        let db = MockDb::default();
        let event = Event::build()
            .id("e1")
            .created_by("alice")
            .zone("old")
            .exact("Main Square 1")
            .coordinates(48.0, 11.0)
            .finish();
        let db = db.with_event(event);
        let patch = EventPatch {
            location: Some(NewLocation {
                zone: Some(EntityRef::ByName("North".into())),
                ..Default::default()
            }),
            ..Default::default()
        };
        let update =
            prepare_event_update(&db, &session("alice", Role::User), "e1", patch).unwrap();
        let event = store_updated_event(&db, update.event).unwrap();
        assert_ne!(event.location.zone.as_str(), "old");
        assert_eq!(event.location.exact.as_deref(), Some("Main Square 1"));
        assert_eq!(event.location.latitude, Some(48.0));
        assert_eq!(event.location.longitude, Some(11.0));
        assert!(update.replaced_image.is_none());
    }

    #[test]
    fn update_reports_replaced_image() {
        let db = MockDb::default().with_event(
            Event::build()
                .id("e1")
                .created_by("alice")
                .image("/api/image/events/old.png")
                .finish(),
        );
        let alice = session("alice", Role::User);

        let patch = EventPatch {
            image: Some("/api/image/events/old.png".into()),
            ..Default::default()
        };
        let update = prepare_event_update(&db, &alice, "e1", patch).unwrap();
        assert!(update.replaced_image.is_none());

        let patch = EventPatch {
            image: Some("/api/image/events/new.png".into()),
            ..Default::default()
        };
        let update = prepare_event_update(&db, &alice, "e1", patch).unwrap();
        assert_eq!(
            update.replaced_image.as_deref(),
            Some("/api/image/events/old.png")
        );
        assert_eq!(
            update.event.event().image.as_deref(),
            Some("/api/image/events/new.png")
        );
    }

    #[test]
    fn update_requires_owner_or_admin() {
        let db = MockDb::default().with_event(Event::build().id("e1").created_by("alice").finish());
        let patch = EventPatch {
            name: Some("Renamed".into()),
            ..Default::default()
        };
        assert!(matches!(
            prepare_event_update(&db, &session("bob", Role::User), "e1", patch.clone()),
            Err(Error::Forbidden)
        ));
        let update =
            prepare_event_update(&db, &session("root", Role::Admin), "e1", patch).unwrap();
        assert_eq!(update.event.event().name, "Renamed");
    }

    #[test]
    fn update_keeps_mandatory_fields() {
        let db = MockDb::default().with_event(Event::build().id("e1").created_by("alice").finish());
        let alice = session("alice", Role::User);
        let patch = EventPatch {
            name: Some("".into()),
            ..Default::default()
        };
        assert!(matches!(
            prepare_event_update(&db, &alice, "e1", patch),
            Err(Error::EmptyName)
        ));
        let patch = EventPatch {
            location: Some(NewLocation {
                zone: Some(EntityRef::ByName("".into())),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches!(
            prepare_event_update(&db, &alice, "e1", patch),
            Err(Error::MissingZone)
        ));
    }

    #[test]
    fn update_missing_event() {
        let db = MockDb::default();
        assert!(matches!(
            prepare_event_update(
                &db,
                &session("alice", Role::User),
                "nope",
                EventPatch::default()
            ),
            Err(Error::EventNotFound)
        ));
    }

    #[test]
    fn add_and_remove_event_categories() {
        let db = MockDb::default().with_event(Event::build().id("e1").created_by("alice").finish());
        let alice = session("alice", Role::User);
        let event =
            add_event_category(&db, &alice, "e1", &EntityRef::ByName("Food".into())).unwrap();
        assert_eq!(event.categories.len(), 1);
        let event =
            add_event_category(&db, &alice, "e1", &EntityRef::ByName("Food".into())).unwrap();
        assert_eq!(event.categories.len(), 1);
        let category_id = event.categories[0].clone();
        let event = remove_event_category(&db, &alice, "e1", category_id.as_str()).unwrap();
        assert!(event.categories.is_empty());
        assert!(remove_event_category(&db, &alice, "e1", category_id.as_str()).is_err());
    }
}
