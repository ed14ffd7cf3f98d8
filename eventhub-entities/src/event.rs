use time::{Date, Time};

use crate::{id::Id, review::Review, time::Timestamp};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id           : Id,
    pub name         : String,
    pub description  : Option<String>,
    pub date         : Date,
    pub time         : Time,
    pub cost         : f64,
    pub image        : Option<String>,
    pub location     : Location,
    pub categories   : Vec<Id>,
    pub reviews      : Vec<Review>,
    pub participants : Vec<Participant>,
    pub created_by   : Id,
    pub created_at   : Timestamp,
    pub updated_at   : Timestamp,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Location {
    pub exact     : Option<String>,
    pub zone      : Id,
    pub latitude  : Option<f64>,
    pub longitude : Option<f64>,
}

/// Embedded record of a user taking part in an event.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub user_id    : Id,
    pub user_name  : String,
    pub user_email : String,
    pub joined_at  : Timestamp,
}

impl Event {
    pub fn is_owned_by(&self, user_id: &Id) -> bool {
        &self.created_by == user_id
    }

    pub fn is_free(&self) -> bool {
        self.cost == 0.0
    }

    pub fn has_participant(&self, user_id: &Id) -> bool {
        self.participants.iter().any(|p| &p.user_id == user_id)
    }

    pub fn has_category(&self, category_id: &Id) -> bool {
        self.categories.iter().any(|id| id == category_id)
    }

    pub fn is_locally_hosted_image(&self, public_prefix: &str) -> bool {
        self.image
            .as_deref()
            .map(|url| is_local_image_url(url, public_prefix))
            .unwrap_or(false)
    }
}

pub fn is_local_image_url(url: &str, public_prefix: &str) -> bool {
    let prefix = public_prefix.trim_end_matches('/');
    !prefix.is_empty()
        && url
            .strip_prefix(prefix)
            .map(|rest| rest.starts_with('/') && rest.len() > 1)
            .unwrap_or(false)
}
