use crate::id::Id;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tag {
    pub id: Id,
    pub name: String,
}
