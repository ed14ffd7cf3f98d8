// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use anyhow::anyhow;
use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};

use eventhub_core::{
    entities::{id::Id, time::Timestamp},
    repositories::{self as repo, *},
};

use super::*;

mod booking;
mod category;
mod event;
mod review;
mod tag;
mod user;
mod zone;

type Result<T> = std::result::Result<T, repo::Error>;

pub(crate) fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            repo::Error::AlreadyExists
        }
        _ => repo::Error::Other(err.into()),
    }
}

fn read_only_access() -> repo::Error {
    log::error!("Write access through a read-only database connection");
    repo::Error::Other(anyhow!("The database connection is read-only"))
}

/// Fails with `NotFound` if no row has been affected.
fn expect_affected(count: usize) -> Result<()> {
    if count == 0 {
        Err(repo::Error::NotFound)
    } else {
        Ok(())
    }
}

fn position(index: usize) -> Result<i32> {
    i32::try_from(index).map_err(|err| repo::Error::Other(err.into()))
}
