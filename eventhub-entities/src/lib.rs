#![deny(missing_debug_implementations)]

//! # eventhub-entities
//!
//! Reusable, agnostic domain entities for eventhub.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod booking;
pub mod category;
pub mod entity_ref;
pub mod event;
pub mod id;
pub mod review;
pub mod session;
pub mod tag;
pub mod time;
pub mod user;
pub mod zone;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
