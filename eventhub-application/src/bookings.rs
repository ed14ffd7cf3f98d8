use super::*;

/// Books the event and registers the caller as participant.
///
/// Concurrent bookings of the same user are serialized by the
/// exclusive connection, at most one of them succeeds.
pub fn book_event(
    connections: &sqlite::Connections,
    session: &Session,
    event_id: &str,
) -> Result<Booking> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::book_event(conn, session, event_id).map_err(|err| {
            debug!("Booking of event {} failed: {}", event_id, err);
            err
        })
    })?)
}

pub fn cancel_booking(
    connections: &sqlite::Connections,
    session: &Session,
    booking_id: &str,
) -> Result<Booking> {
    let booking = connections
        .exclusive()?
        .transaction(|conn| usecases::cancel_booking(conn, session, booking_id))?;
    info!(
        "User {} cancelled the booking of event {}",
        booking.user_id, booking.event_id
    );
    Ok(booking)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn double_booking_is_rejected() {
        let fixture = BackendFixture::new();
        let alice = fixture.create_user("alice@example.com", Role::User);
        let bob = fixture.create_user("bob@example.com", Role::User);
        let event_id = fixture.create_event(&alice, "Jazz");

        let booking = flows::book_event(&fixture.db_connections, &bob, &event_id).unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
        let err = flows::book_event(&fixture.db_connections, &bob, &event_id).unwrap_err();
        assert!(matches!(
            err.as_parameter_error(),
            Some(usecases::Error::AlreadyBooked)
        ));

        let db = fixture.db_connections.shared().unwrap();
        let event = db.get_event(&event_id).unwrap();
        assert_eq!(event.participants.len(), 1);
        assert_eq!(event.participants[0].user_email, "bob@example.com");
        assert_eq!(db.load_bookings_of_user(bob.user_id.as_str()).unwrap().len(), 1);
    }

    #[test]
    fn booking_unknown_event() {
        let fixture = BackendFixture::new();
        let bob = fixture.create_user("bob@example.com", Role::User);
        let err = flows::book_event(&fixture.db_connections, &bob, "missing").unwrap_err();
        assert!(matches!(
            err.as_parameter_error(),
            Some(usecases::Error::EventNotFound)
        ));
    }

    #[test]
    fn cancel_and_rebook() {
        let fixture = BackendFixture::new();
        let alice = fixture.create_user("alice@example.com", Role::User);
        let bob = fixture.create_user("bob@example.com", Role::User);
        let event_id = fixture.create_event(&alice, "Jazz");
        let booking = flows::book_event(&fixture.db_connections, &bob, &event_id).unwrap();

        let err = flows::cancel_booking(&fixture.db_connections, &alice, booking.id.as_str())
            .unwrap_err();
        assert!(matches!(
            err.as_parameter_error(),
            Some(usecases::Error::Forbidden)
        ));

        flows::cancel_booking(&fixture.db_connections, &bob, booking.id.as_str()).unwrap();
        {
            let db = fixture.db_connections.shared().unwrap();
            assert!(db.get_event(&event_id).unwrap().participants.is_empty());
        }
        flows::book_event(&fixture.db_connections, &bob, &event_id).unwrap();
    }
}
