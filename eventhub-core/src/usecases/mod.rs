mod bookings;
mod categories;
mod delete_event;
mod enrich;
mod error;
mod images;
mod login;
mod participants;
mod query_events;
mod register;
mod resolve_entity;
mod reviews;
mod store_event;
mod tags;
mod users;
mod zones;

#[cfg(test)]
pub mod tests;

type Result<T> = std::result::Result<T, Error>;

pub use self::{
    bookings::*,
    categories::*,
    delete_event::*,
    enrich::*,
    error::{Error, ErrorKind},
    images::*,
    login::*,
    participants::*,
    query_events::*,
    register::*,
    resolve_entity::*,
    reviews::*,
    store_event::*,
    tags::*,
    users::*,
    zones::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{
        entities::{
            booking::*, category::*, entity_ref::*, event::*, id::Id, review::*,
            session::Session, tag::*, time::Timestamp, user::*, zone::*,
        },
        repositories::{Error as RepoError, *},
    };
}
use self::prelude::*;

pub fn get_event<R: EventRepo>(repo: &R, id: &str) -> Result<Event> {
    repo.try_get_event(id)?.ok_or(Error::EventNotFound)
}

/// Maps a missing event to [`Error::EventNotFound`].
fn event_not_found(err: RepoError) -> Error {
    match err {
        RepoError::NotFound => Error::EventNotFound,
        _ => Error::Repo(err),
    }
}

pub(crate) fn authorize_modification(session: &Session, owner_id: &Id) -> Result<()> {
    if session.may_modify(owner_id) {
        Ok(())
    } else {
        Err(Error::Forbidden)
    }
}
