use super::*;
use eventhub_boundary::{BookedEvent, Booking, NewBooking, Participant};

#[post("/bookings/add", format = "application/json", data = "<booking>")]
pub fn post_booking(
    db: sqlite::Connections,
    account: Account,
    booking: JsonResult<NewBooking>,
) -> Result<Booking> {
    let NewBooking { event_id } = booking?.into_inner();
    let booking = flows::book_event(&db, account.session(), &event_id)?;
    Ok(Json(
        ApiResponse::ok(Booking::from(booking)).with_message("Event booked"),
    ))
}

#[get("/bookings/my-events")]
pub fn get_my_events(db: sqlite::Connections, account: Account) -> Result<Vec<BookedEvent>> {
    let booked = usecases::booked_events(&db.shared()?, account.session())?;
    ok(booked
        .into_iter()
        .map(|usecases::BookedEvent { booking, event }| BookedEvent {
            booking: booking.into(),
            event: event.map(events::event_json),
        })
        .collect())
}

#[get("/bookings/event/<event_id>/participants")]
pub fn get_participants(
    db: sqlite::Connections,
    _account: Account,
    event_id: &str,
) -> Result<Vec<Participant>> {
    let participants = usecases::list_participants(&db.shared()?, event_id)?;
    ok(participants.into_iter().map(Into::into).collect())
}

#[delete("/bookings/<booking_id>")]
pub fn delete_booking(
    db: sqlite::Connections,
    account: Account,
    booking_id: &str,
) -> MessageResult {
    flows::cancel_booking(&db, account.session(), booking_id)?;
    done("Booking cancelled")
}
