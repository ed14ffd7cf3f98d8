use crate::id::Id;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub image: Option<String>,
    pub tags: Vec<Id>,
}

impl Category {
    pub fn has_tag(&self, tag_id: &Id) -> bool {
        self.tags.iter().any(|id| id == tag_id)
    }
}
