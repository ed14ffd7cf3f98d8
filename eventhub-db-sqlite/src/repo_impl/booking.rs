use super::*;
use eventhub_core::entities::booking::{Booking, BookingStatus};

impl From<&Booking> for models::Booking {
    fn from(from: &Booking) -> Self {
        Self {
            id: from.id.to_string(),
            event_id: from.event_id.to_string(),
            user_id: from.user_id.to_string(),
            status: from.status.to_string(),
            booking_date: from.booking_date.as_millis(),
        }
    }
}

fn into_booking(from: models::Booking) -> Result<Booking> {
    let models::Booking {
        id,
        event_id,
        user_id,
        status,
        booking_date,
    } = from;
    let status = status
        .parse::<BookingStatus>()
        .map_err(|_| anyhow!("Invalid booking status: {status}"))?;
    Ok(Booking {
        id: id.into(),
        event_id: event_id.into(),
        user_id: user_id.into(),
        status,
        booking_date: Timestamp::from_millis(booking_date),
    })
}

impl BookingRepo for DbReadOnly<'_> {
    fn create_booking(&self, _booking: &Booking) -> Result<()> {
        Err(read_only_access())
    }
    fn delete_booking(&self, _id: &str) -> Result<()> {
        Err(read_only_access())
    }

    fn get_booking(&self, id: &str) -> Result<Booking> {
        get_booking(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_booking_of_user_for_event(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> Result<Option<Booking>> {
        try_get_booking_of_user_for_event(&mut self.conn.borrow_mut(), user_id, event_id)
    }
    fn load_bookings_of_user(&self, user_id: &str) -> Result<Vec<Booking>> {
        load_bookings_of_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn load_bookings_of_event(&self, event_id: &str) -> Result<Vec<Booking>> {
        load_bookings_of_event(&mut self.conn.borrow_mut(), event_id)
    }
}

impl BookingRepo for DbConnection<'_> {
    fn create_booking(&self, booking: &Booking) -> Result<()> {
        create_booking(&mut self.conn.borrow_mut(), booking)
    }
    fn delete_booking(&self, id: &str) -> Result<()> {
        delete_booking(&mut self.conn.borrow_mut(), id)
    }

    fn get_booking(&self, id: &str) -> Result<Booking> {
        get_booking(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_booking_of_user_for_event(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> Result<Option<Booking>> {
        try_get_booking_of_user_for_event(&mut self.conn.borrow_mut(), user_id, event_id)
    }
    fn load_bookings_of_user(&self, user_id: &str) -> Result<Vec<Booking>> {
        load_bookings_of_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn load_bookings_of_event(&self, event_id: &str) -> Result<Vec<Booking>> {
        load_bookings_of_event(&mut self.conn.borrow_mut(), event_id)
    }
}

fn create_booking(conn: &mut SqliteConnection, booking: &Booking) -> Result<()> {
    diesel::insert_into(schema::bookings::table)
        .values(&models::Booking::from(booking))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn delete_booking(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::bookings::dsl;
    let count = diesel::delete(dsl::bookings.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_affected(count)
}

fn get_booking(conn: &mut SqliteConnection, id: &str) -> Result<Booking> {
    use schema::bookings::dsl;
    let booking = dsl::bookings
        .filter(dsl::id.eq(id))
        .first::<models::Booking>(conn)
        .map_err(from_diesel_err)?;
    into_booking(booking)
}

fn try_get_booking_of_user_for_event(
    conn: &mut SqliteConnection,
    user_id: &str,
    event_id: &str,
) -> Result<Option<Booking>> {
    use schema::bookings::dsl;
    dsl::bookings
        .filter(dsl::user_id.eq(user_id))
        .filter(dsl::event_id.eq(event_id))
        .first::<models::Booking>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(into_booking)
        .transpose()
}

fn load_bookings_of_user(conn: &mut SqliteConnection, user_id: &str) -> Result<Vec<Booking>> {
    use schema::bookings::dsl;
    dsl::bookings
        .filter(dsl::user_id.eq(user_id))
        .order_by(dsl::booking_date)
        .load::<models::Booking>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(into_booking)
        .collect()
}

fn load_bookings_of_event(conn: &mut SqliteConnection, event_id: &str) -> Result<Vec<Booking>> {
    use schema::bookings::dsl;
    dsl::bookings
        .filter(dsl::event_id.eq(event_id))
        .order_by(dsl::booking_date)
        .load::<models::Booking>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(into_booking)
        .collect()
}
