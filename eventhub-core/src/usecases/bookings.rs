use super::{add_participant, enrich_event, prelude::*, remove_participant, EventView};

/// Books an event for the caller and registers the caller as participant.
///
/// Both writes have to be executed within a single transaction.
pub fn book_event<R>(repo: &R, session: &Session, event_id: &str) -> Result<Booking>
where
    R: EventRepo + BookingRepo + UserRepo,
{
    let event = repo.try_get_event(event_id)?.ok_or(Error::EventNotFound)?;
    let user_id = &session.user_id;
    if repo
        .try_get_booking_of_user_for_event(user_id.as_str(), event_id)?
        .filter(Booking::is_confirmed)
        .is_some()
    {
        return Err(Error::AlreadyBooked);
    }
    let user = repo
        .try_get_user(user_id.as_str())?
        .ok_or(Error::ProfileNotFound)?;
    let booking = Booking {
        id: Id::new(),
        event_id: event.id.clone(),
        user_id: user_id.clone(),
        status: BookingStatus::Confirmed,
        booking_date: Timestamp::now(),
    };
    repo.create_booking(&booking).map_err(|err| match err {
        RepoError::AlreadyExists => Error::AlreadyBooked,
        err => Error::Repo(err),
    })?;
    let participant = Participant {
        user_id: user.id,
        user_name: user.name,
        user_email: user.email,
        joined_at: booking.booking_date,
    };
    add_participant(repo, event_id, participant)?;
    log::debug!("User {} booked event {}", booking.user_id, booking.event_id);
    Ok(booking)
}

/// Deletes the booking of the caller and removes the caller from the participants.
pub fn cancel_booking<R>(repo: &R, session: &Session, booking_id: &str) -> Result<Booking>
where
    R: EventRepo + BookingRepo,
{
    let booking = repo.get_booking(booking_id).map_err(|err| match err {
        RepoError::NotFound => Error::BookingNotFound,
        err => Error::Repo(err),
    })?;
    if booking.user_id != session.user_id {
        return Err(Error::Forbidden);
    }
    repo.delete_booking(booking_id)?;
    match remove_participant(repo, booking.event_id.as_str(), &booking.user_id) {
        Ok(true) => {}
        Ok(false) => log::warn!(
            "User {} was not a participant of the booked event {}",
            booking.user_id,
            booking.event_id
        ),
        Err(Error::EventNotFound) => {
            log::info!(
                "Cancelled booking {} of the deleted event {}",
                booking.id,
                booking.event_id
            );
        }
        Err(err) => return Err(err),
    }
    Ok(booking)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookedEvent {
    pub booking: Booking,
    /// `None` if the event has been deleted in the meantime.
    pub event: Option<EventView>,
}

pub fn booked_events<R>(repo: &R, session: &Session) -> Result<Vec<BookedEvent>>
where
    R: EventRepo + BookingRepo + CategoryRepo + ZoneRepo,
{
    let mut bookings = repo.load_bookings_of_user(session.user_id.as_str())?;
    bookings.sort_by(|a, b| b.booking_date.cmp(&a.booking_date));
    let mut booked = Vec::with_capacity(bookings.len());
    for booking in bookings {
        let event = repo
            .try_get_event(booking.event_id.as_str())?
            .map(|e| enrich_event(repo, e))
            .transpose()?;
        booked.push(BookedEvent { booking, event });
    }
    Ok(booked)
}
