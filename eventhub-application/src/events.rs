use super::*;

pub fn create_event(
    connections: &sqlite::Connections,
    session: &Session,
    new_event: usecases::NewEvent,
) -> Result<Event> {
    let event = connections.exclusive()?.transaction(|conn| {
        let storable = usecases::prepare_new_event(conn, &session.user_id, new_event)?;
        usecases::store_created_event(conn, storable).map_err(|err| {
            warn!("Failed to store new event: {}", err);
            err
        })
    })?;
    info!("Created event {} ({})", event.name, event.id);
    Ok(event)
}

pub fn update_event(
    connections: &sqlite::Connections,
    images: &dyn ImageGateway,
    session: &Session,
    id: &str,
    patch: usecases::EventPatch,
) -> Result<Event> {
    let (event, replaced_image) = connections.exclusive()?.transaction(|conn| {
        let usecases::StorableUpdate {
            event,
            replaced_image,
        } = usecases::prepare_event_update(conn, session, id, patch)?;
        let event = usecases::store_updated_event(conn, event).map_err(|err| {
            warn!("Failed to store updated event: {}", err);
            err
        })?;
        Ok::<_, usecases::Error>((event, replaced_image))
    })?;
    // The new image reference has been committed and
    // the old image is no longer referenced.
    if let Some(url) = replaced_image {
        usecases::delete_local_image_best_effort(images, &url);
    }
    Ok(event)
}

pub fn delete_event(
    connections: &sqlite::Connections,
    images: &dyn ImageGateway,
    session: &Session,
    id: &str,
) -> Result<Event> {
    let event = connections
        .exclusive()?
        .transaction(|conn| usecases::delete_event(conn, session, id))?;
    if let Some(url) = &event.image {
        usecases::delete_local_image_best_effort(images, url);
    }
    Ok(event)
}

pub fn add_event_category(
    connections: &sqlite::Connections,
    session: &Session,
    event_id: &str,
    category: &EntityRef,
) -> Result<Event> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::add_event_category(conn, session, event_id, category))?)
}

pub fn remove_event_category(
    connections: &sqlite::Connections,
    session: &Session,
    event_id: &str,
    category_id: &str,
) -> Result<Event> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::remove_event_category(conn, session, event_id, category_id)
    })?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    fn new_event(name: &str) -> usecases::NewEvent {
        usecases::NewEvent {
            name: name.into(),
            description: None,
            date: Some("2030-05-01".into()),
            time: Some("19:30".into()),
            cost: None,
            image: Some("/api/image/events/old.png".into()),
            location: Some(usecases::NewLocation {
                exact: Some("Main Street 1".into()),
                zone: Some(EntityRef::ByName("Center".into())),
                latitude: Some(48.1),
                longitude: Some(11.5),
            }),
            categories: vec![EntityRef::ByName("Music".into())],
        }
    }

    #[test]
    fn create_event_with_new_zone_and_category() {
        let fixture = BackendFixture::new();
        let alice = fixture.create_user("alice@example.com", Role::User);
        let event = flows::create_event(&fixture.db_connections, &alice, new_event("Jazz")).unwrap();
        assert_eq!(event.cost, 0.0);
        assert_eq!(event.created_by, alice.user_id);
        let db = fixture.db_connections.shared().unwrap();
        let zone = db.get_zone(event.location.zone.as_str()).unwrap();
        assert_eq!(zone.name, "Center");
        assert_eq!(db.all_categories().unwrap().len(), 1);
    }

    #[test]
    fn replaced_image_is_deleted_after_update() {
        let fixture = BackendFixture::new();
        let alice = fixture.create_user("alice@example.com", Role::User);
        fixture.images.add("events", "old.png");
        let event = flows::create_event(&fixture.db_connections, &alice, new_event("Jazz")).unwrap();
        let patch = usecases::EventPatch {
            image: Some("/api/image/events/new.png".into()),
            location: Some(usecases::NewLocation {
                zone: Some(EntityRef::ByName("North".into())),
                ..Default::default()
            }),
            ..Default::default()
        };
        let updated = flows::update_event(
            &fixture.db_connections,
            &fixture.images,
            &alice,
            event.id.as_str(),
            patch,
        )
        .unwrap();
        assert_eq!(updated.location.exact.as_deref(), Some("Main Street 1"));
        assert_eq!(updated.location.latitude, Some(48.1));
        assert_ne!(updated.location.zone, event.location.zone);
        assert!(!fixture.images.contains("events", "old.png"));
    }

    #[test]
    fn failed_update_keeps_the_image() {
        let fixture = BackendFixture::new();
        let alice = fixture.create_user("alice@example.com", Role::User);
        let bob = fixture.create_user("bob@example.com", Role::User);
        fixture.images.add("events", "old.png");
        let event = flows::create_event(&fixture.db_connections, &alice, new_event("Jazz")).unwrap();
        let patch = usecases::EventPatch {
            image: Some("".into()),
            ..Default::default()
        };
        let err = flows::update_event(
            &fixture.db_connections,
            &fixture.images,
            &bob,
            event.id.as_str(),
            patch,
        )
        .unwrap_err();
        assert!(matches!(
            err.as_parameter_error(),
            Some(usecases::Error::Forbidden)
        ));
        assert!(fixture.images.contains("events", "old.png"));
    }

    #[test]
    fn delete_event_removes_image_but_keeps_bookings() {
        let fixture = BackendFixture::new();
        let alice = fixture.create_user("alice@example.com", Role::User);
        let bob = fixture.create_user("bob@example.com", Role::User);
        fixture.images.add("events", "old.png");
        let event = flows::create_event(&fixture.db_connections, &alice, new_event("Jazz")).unwrap();
        flows::book_event(&fixture.db_connections, &bob, event.id.as_str()).unwrap();
        flows::delete_event(
            &fixture.db_connections,
            &fixture.images,
            &alice,
            event.id.as_str(),
        )
        .unwrap();
        assert!(!fixture.images.contains("events", "old.png"));
        let db = fixture.db_connections.shared().unwrap();
        assert!(db.try_get_event(event.id.as_str()).unwrap().is_none());
        assert_eq!(db.load_bookings_of_event(event.id.as_str()).unwrap().len(), 1);
    }

    #[test]
    fn add_and_remove_event_categories() {
        let fixture = BackendFixture::new();
        let alice = fixture.create_user("alice@example.com", Role::User);
        let event = flows::create_event(&fixture.db_connections, &alice, new_event("Jazz")).unwrap();
        let event = flows::add_event_category(
            &fixture.db_connections,
            &alice,
            event.id.as_str(),
            &EntityRef::ByName("Outdoor".into()),
        )
        .unwrap();
        assert_eq!(event.categories.len(), 2);
        let removed = event.categories[0].clone();
        let event = flows::remove_event_category(
            &fixture.db_connections,
            &alice,
            event.id.as_str(),
            removed.as_str(),
        )
        .unwrap();
        assert_eq!(event.categories.len(), 1);
        assert!(!event.has_category(&removed));
    }
}
