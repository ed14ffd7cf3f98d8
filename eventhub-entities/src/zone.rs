use crate::id::Id;

/// A named geographic area used to group event locations.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LocationZone {
    pub id: Id,
    pub name: String,
}
