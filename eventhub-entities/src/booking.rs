use strum::{AsRefStr, Display, EnumString};

use crate::{id::Id, time::Timestamp};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id           : Id,
    pub event_id     : Id,
    pub user_id      : Id,
    pub status       : BookingStatus,
    pub booking_date : Timestamp,
}

// Cancelling a booking deletes it, so there is no cancelled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Confirmed,
}

impl Booking {
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }
}
