use std::fmt;

use crate::id::Id;

/// Reference to a tag, category or zone that might not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    ById(Id),
    ByName(String),
}

impl EntityRef {
    pub fn as_str(&self) -> &str {
        match self {
            Self::ById(id) => id.as_str(),
            Self::ByName(name) => name.as_str(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

impl From<Id> for EntityRef {
    fn from(from: Id) -> Self {
        Self::ById(from)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ById(id) => write!(f, "#{id}"),
            Self::ByName(name) => write!(f, "'{name}'"),
        }
    }
}

/// The kinds of entities that are created on first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Tag,
    Category,
    Zone,
}
