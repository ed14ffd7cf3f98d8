use crate::{id::Id, time::Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Grade(u8);

impl Grade {
    pub const fn min() -> Self {
        Self(1)
    }

    pub const fn max() -> Self {
        Self(5)
    }

    pub fn is_valid(self) -> bool {
        self >= Self::min() && self <= Self::max()
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for Grade {
    fn from(from: u8) -> Self {
        Self(from)
    }
}

impl From<Grade> for u8 {
    fn from(from: Grade) -> Self {
        from.0
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id              : Id,
    pub user_id         : Id,
    pub user_name       : String,
    pub profile_picture : Option<String>,
    pub event_id        : Id,
    pub grade           : Grade,
    pub review_text     : String,
    pub timestamp       : Timestamp,
}
