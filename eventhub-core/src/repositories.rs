// Low-level database access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id and never modified or loaded by another
// repository.

use crate::entities::{
    booking::Booking, category::Category, event::Event, review::Review, tag::Tag, user::User,
    zone::LocationZone,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

pub trait UserRepo {
    fn create_user(&self, user: &User) -> Result<()>;
    fn update_user(&self, user: &User) -> Result<()>;
    fn delete_user(&self, id: &str) -> Result<()>;

    fn get_user(&self, id: &str) -> Result<User>;
    fn try_get_user(&self, id: &str) -> Result<Option<User>>;
    fn try_get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    fn all_users(&self) -> Result<Vec<User>>;
}

// Reviews and participants are stored together with the
// event and written as a whole on every update.
pub trait EventRepo {
    fn create_event(&self, event: &Event) -> Result<()>;
    fn update_event(&self, event: &Event) -> Result<()>;
    fn delete_event(&self, id: &str) -> Result<()>;

    fn get_event(&self, id: &str) -> Result<Event>;
    fn try_get_event(&self, id: &str) -> Result<Option<Event>>;
    fn all_events(&self) -> Result<Vec<Event>>;
    fn events_created_by(&self, user_id: &str) -> Result<Vec<Event>>;
}

pub trait CategoryRepo {
    fn create_category(&self, category: &Category) -> Result<()>;
    fn update_category(&self, category: &Category) -> Result<()>;
    fn delete_category(&self, id: &str) -> Result<()>;

    fn get_category(&self, id: &str) -> Result<Category>;
    fn try_get_category(&self, id: &str) -> Result<Option<Category>>;
    fn try_get_category_by_name(&self, name: &str) -> Result<Option<Category>>;
    fn all_categories(&self) -> Result<Vec<Category>>;
}

pub trait TagRepo {
    fn create_tag(&self, tag: &Tag) -> Result<()>;
    fn update_tag(&self, tag: &Tag) -> Result<()>;
    fn delete_tag(&self, id: &str) -> Result<()>;

    fn get_tag(&self, id: &str) -> Result<Tag>;
    fn try_get_tag(&self, id: &str) -> Result<Option<Tag>>;
    fn try_get_tag_by_name(&self, name: &str) -> Result<Option<Tag>>;
    fn all_tags(&self) -> Result<Vec<Tag>>;
}

pub trait ZoneRepo {
    fn create_zone(&self, zone: &LocationZone) -> Result<()>;
    fn update_zone(&self, zone: &LocationZone) -> Result<()>;
    fn delete_zone(&self, id: &str) -> Result<()>;

    fn get_zone(&self, id: &str) -> Result<LocationZone>;
    fn try_get_zone(&self, id: &str) -> Result<Option<LocationZone>>;
    fn try_get_zone_by_name(&self, name: &str) -> Result<Option<LocationZone>>;
    fn all_zones(&self) -> Result<Vec<LocationZone>>;
}

// At most one review per (user, event) is enforced by the
// storage layer and reported as `AlreadyExists`.
pub trait ReviewRepo {
    fn create_review(&self, review: &Review) -> Result<()>;
    fn update_review(&self, review: &Review) -> Result<()>;
    fn delete_review(&self, id: &str) -> Result<()>;

    fn get_review(&self, id: &str) -> Result<Review>;
    fn try_get_review_of_user_for_event(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> Result<Option<Review>>;
    fn load_reviews_of_event(&self, event_id: &str) -> Result<Vec<Review>>;
    fn load_reviews_of_user(&self, user_id: &str) -> Result<Vec<Review>>;
}

// At most one booking per (user, event) is enforced by the
// storage layer and reported as `AlreadyExists`.
pub trait BookingRepo {
    fn create_booking(&self, booking: &Booking) -> Result<()>;
    fn delete_booking(&self, id: &str) -> Result<()>;

    fn get_booking(&self, id: &str) -> Result<Booking>;
    fn try_get_booking_of_user_for_event(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> Result<Option<Booking>>;
    fn load_bookings_of_user(&self, user_id: &str) -> Result<Vec<Booking>>;
    fn load_bookings_of_event(&self, event_id: &str) -> Result<Vec<Booking>>;
}
