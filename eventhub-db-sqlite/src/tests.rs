use std::{sync::Arc, thread};

use eventhub_core::{
    entities::{builders::*, *},
    repositories::{self as repo, *},
    usecases::{self, Error},
};

use super::*;

fn connections() -> Connections {
    let connections = Connections::init(":memory:", 1).unwrap();
    run_embedded_database_migrations(connections.exclusive().unwrap()).unwrap();
    connections
}

fn user(id: &str) -> user::User {
    user::User::build()
        .id(id)
        .email(&format!("{id}@example.com"))
        .name(id)
        .finish()
}

#[test]
fn create_and_load_user_with_interests() {
    let db = connections();
    let mut alice = user("alice");
    alice.interests = vec!["art".into(), "jazz".into()];
    alice.bio = Some("Hello".into());
    db.exclusive()
        .unwrap()
        .transaction(|conn| conn.create_user(&alice).map_err(Error::from))
        .unwrap();
    let shared = db.shared().unwrap();
    assert_eq!(shared.get_user("alice").unwrap(), alice);
    assert_eq!(
        shared.try_get_user_by_email("alice@example.com").unwrap(),
        Some(alice)
    );
    assert!(matches!(shared.get_user("bob"), Err(repo::Error::NotFound)));
}

#[test]
fn duplicate_email_is_rejected() {
    let db = connections();
    let alice = user("alice");
    let mut other = user("other");
    other.email = alice.email.clone();
    let res = db.exclusive().unwrap().transaction(|conn| {
        conn.create_user(&alice)?;
        conn.create_user(&other).map_err(Error::from)
    });
    assert!(matches!(
        res,
        Err(Error::Repo(repo::Error::AlreadyExists))
    ));
    // Rolled back as a whole
    assert!(db.shared().unwrap().all_users().unwrap().is_empty());
}

#[test]
fn read_only_connections_reject_writes() {
    let db = connections();
    assert!(db.shared().unwrap().create_user(&user("alice")).is_err());
}

#[test]
fn event_roundtrip_with_embedded_collections() {
    let db = connections();
    let mut event = event::Event::build()
        .id("e1")
        .name("Jazz Night")
        .image("/api/image/events/a.png")
        .zone("center")
        .exact("Main Street 1")
        .coordinates(48.1, 11.5)
        .categories(&["music", "outdoor"])
        .created_by("alice")
        .finish();
    event.participants.push(event::Participant {
        user_id: "bob".into(),
        user_name: "Bob".into(),
        user_email: "bob@example.com".into(),
        joined_at: time::Timestamp::from_millis(1_000),
    });
    event.reviews.push(review::Review {
        id: "r1".into(),
        user_id: "bob".into(),
        user_name: "Bob".into(),
        profile_picture: None,
        event_id: "e1".into(),
        grade: 4.into(),
        review_text: "Great".into(),
        timestamp: time::Timestamp::from_millis(2_000),
    });
    db.exclusive()
        .unwrap()
        .transaction(|conn| conn.create_event(&event).map_err(Error::from))
        .unwrap();
    assert_eq!(db.shared().unwrap().get_event("e1").unwrap(), event);

    event.categories = vec!["outdoor".into()];
    event.participants.clear();
    event.location.exact = None;
    db.exclusive()
        .unwrap()
        .transaction(|conn| conn.update_event(&event).map_err(Error::from))
        .unwrap();
    let shared = db.shared().unwrap();
    assert_eq!(shared.get_event("e1").unwrap(), event);
    assert_eq!(shared.events_created_by("alice").unwrap().len(), 1);
    assert!(shared.events_created_by("bob").unwrap().is_empty());
    drop(shared);

    db.exclusive()
        .unwrap()
        .transaction(|conn| conn.delete_event("e1").map_err(Error::from))
        .unwrap();
    let shared = db.shared().unwrap();
    assert!(shared.try_get_event("e1").unwrap().is_none());
    assert!(shared.all_events().unwrap().is_empty());
}

#[test]
fn names_of_tags_are_unique() {
    let db = connections();
    let res = db.exclusive().unwrap().transaction(|conn| {
        conn.create_tag(&tag::Tag {
            id: "t1".into(),
            name: "jazz".into(),
        })?;
        conn.create_tag(&tag::Tag {
            id: "t2".into(),
            name: "jazz".into(),
        })
        .map_err(Error::from)
    });
    assert!(matches!(res, Err(Error::Repo(repo::Error::AlreadyExists))));
}

#[test]
fn category_keeps_tag_order() {
    let db = connections();
    let mut category = category::Category {
        id: "c1".into(),
        name: "Music".into(),
        image: None,
        tags: vec!["b".into(), "a".into(), "c".into()],
    };
    db.exclusive()
        .unwrap()
        .transaction(|conn| conn.create_category(&category).map_err(Error::from))
        .unwrap();
    assert_eq!(db.shared().unwrap().get_category("c1").unwrap(), category);
    category.tags.remove(1);
    category.image = Some("https://img.example.com/m.png".into());
    db.exclusive()
        .unwrap()
        .transaction(|conn| conn.update_category(&category).map_err(Error::from))
        .unwrap();
    let shared = db.shared().unwrap();
    assert_eq!(
        shared.try_get_category_by_name("Music").unwrap(),
        Some(category.clone())
    );
    assert_eq!(shared.all_categories().unwrap(), vec![category]);
}

#[test]
fn resolve_zone_by_name_inside_transaction() {
    let db = connections();
    let first = db
        .exclusive()
        .unwrap()
        .transaction(|conn| {
            usecases::resolve_zone(conn, &entity_ref::EntityRef::ByName("Center".into()))
        })
        .unwrap();
    let second = db
        .exclusive()
        .unwrap()
        .transaction(|conn| {
            usecases::resolve_zone(conn, &entity_ref::EntityRef::ByName(" Center ".into()))
        })
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(db.shared().unwrap().all_zones().unwrap().len(), 1);
}

#[test]
fn concurrent_bookings_of_the_same_event_succeed_once() {
    let db = Arc::new(connections());
    db.exclusive()
        .unwrap()
        .transaction(|conn| {
            conn.create_user(&user("bob"))?;
            conn.create_event(&event::Event::build().id("e1").finish())
                .map_err(Error::from)
        })
        .unwrap();
    let session = session::Session {
        user_id: "bob".into(),
        email: "bob@example.com".into(),
        role: user::Role::User,
    };
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let db = Arc::clone(&db);
            let session = session.clone();
            thread::spawn(move || {
                db.exclusive()
                    .unwrap()
                    .transaction(|conn| usecases::book_event(conn, &session, "e1"))
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|err| matches!(err, Error::AlreadyBooked)));
    let shared = db.shared().unwrap();
    assert_eq!(shared.load_bookings_of_event("e1").unwrap().len(), 1);
    assert_eq!(shared.get_event("e1").unwrap().participants.len(), 1);
}
