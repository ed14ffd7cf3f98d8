#[macro_use]
extern crate log;

mod bookings;
mod events;
mod reviews;
mod taxonomy;
mod users;

pub mod prelude {
    pub use super::{bookings::*, events::*, reviews::*, taxonomy::*, users::*};
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use eventhub_core::{
    entities::{
        booking::*, category::*, entity_ref::*, event::*, review::*, session::Session,
        tag::*, user::*, zone::*,
    },
    gateways::{identity::IdentityGateway, image::ImageGateway},
    usecases,
};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use eventhub_db_sqlite::Connections;
}
