use super::prelude::*;
use crate::util::trim_name;

type RepoResult<T> = std::result::Result<T, RepoError>;

/// Resolves a reference to the id of an existing or newly created entity.
///
/// An id that does not match any entity is treated as the name of a new
/// entity. Names are unique per kind, so if a concurrent request created
/// the same name first the id of that entity is returned.
pub fn resolve_entity<R>(repo: &R, kind: EntityKind, entity_ref: &EntityRef) -> Result<Id>
where
    R: TagRepo + CategoryRepo + ZoneRepo,
{
    match kind {
        EntityKind::Tag => resolve_tag(repo, entity_ref),
        EntityKind::Category => resolve_category(repo, entity_ref),
        EntityKind::Zone => resolve_zone(repo, entity_ref),
    }
}

pub fn resolve_tag<R: TagRepo>(repo: &R, entity_ref: &EntityRef) -> Result<Id> {
    get_or_create(
        entity_ref,
        |id| Ok(repo.try_get_tag(id)?.map(|t| t.id)),
        |name| Ok(repo.try_get_tag_by_name(name)?.map(|t| t.id)),
        |name| {
            let tag = Tag {
                id: Id::new(),
                name: name.to_owned(),
            };
            repo.create_tag(&tag)?;
            log::debug!("Created tag '{}' ({})", tag.name, tag.id);
            Ok(tag.id)
        },
    )
}

pub fn resolve_category<R: CategoryRepo>(repo: &R, entity_ref: &EntityRef) -> Result<Id> {
    get_or_create(
        entity_ref,
        |id| Ok(repo.try_get_category(id)?.map(|c| c.id)),
        |name| Ok(repo.try_get_category_by_name(name)?.map(|c| c.id)),
        |name| {
            let category = Category {
                id: Id::new(),
                name: name.to_owned(),
                image: None,
                tags: vec![],
            };
            repo.create_category(&category)?;
            log::debug!("Created category '{}' ({})", category.name, category.id);
            Ok(category.id)
        },
    )
}

pub fn resolve_zone<R: ZoneRepo>(repo: &R, entity_ref: &EntityRef) -> Result<Id> {
    get_or_create(
        entity_ref,
        |id| Ok(repo.try_get_zone(id)?.map(|z| z.id)),
        |name| Ok(repo.try_get_zone_by_name(name)?.map(|z| z.id)),
        |name| {
            let zone = LocationZone {
                id: Id::new(),
                name: name.to_owned(),
            };
            repo.create_zone(&zone)?;
            log::debug!("Created location zone '{}' ({})", zone.name, zone.id);
            Ok(zone.id)
        },
    )
}

/// Resolves all references, dropping duplicates while preserving the order.
pub fn resolve_all<F>(entity_refs: &[EntityRef], mut resolve: F) -> Result<Vec<Id>>
where
    F: FnMut(&EntityRef) -> Result<Id>,
{
    let mut ids: Vec<Id> = Vec::with_capacity(entity_refs.len());
    for entity_ref in entity_refs {
        let id = resolve(entity_ref)?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

fn get_or_create<ById, ByName, Create>(
    entity_ref: &EntityRef,
    by_id: ById,
    by_name: ByName,
    create: Create,
) -> Result<Id>
where
    ById: Fn(&str) -> RepoResult<Option<Id>>,
    ByName: Fn(&str) -> RepoResult<Option<Id>>,
    Create: Fn(&str) -> RepoResult<Id>,
{
    let name = match entity_ref {
        EntityRef::ById(id) => {
            if let Some(id) = by_id(id.as_str())? {
                return Ok(id);
            }
            id.as_str()
        }
        EntityRef::ByName(name) => name.as_str(),
    };
    let name = trim_name(name);
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    if let Some(id) = by_name(&name)? {
        return Ok(id);
    }
    match create(&name) {
        Ok(id) => Ok(id),
        Err(RepoError::AlreadyExists) => {
            log::debug!("'{name}' has been created concurrently");
            by_name(&name)?.ok_or(Error::Repo(RepoError::AlreadyExists))
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};

    #[test]
    fn resolve_existing_tag_by_name_is_idempotent() {
        let db = MockDb::default();
        let first = resolve_tag(&db, &EntityRef::ByName("jazz".into())).unwrap();
        let second = resolve_tag(&db, &EntityRef::ByName("jazz".into())).unwrap();
        assert_eq!(first, second);
        assert_eq!(db.tags.borrow().len(), 1);
    }

    #[test]
    fn resolve_unknown_name_creates_exactly_one_entity() {
        let db = MockDb::default();
        let id = resolve_zone(&db, &EntityRef::ByName("Center".into())).unwrap();
        let zones = db.zones.borrow();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].id, id);
        assert_eq!(zones[0].name, "Center");
    }

    #[test]
    fn resolve_by_existing_id() {
        let db = MockDb::default();
        db.categories.borrow_mut().push(Category {
            id: "c1".into(),
            name: "Music".into(),
            image: None,
            tags: vec![],
        });
        let id = resolve_category(&db, &EntityRef::ById("c1".into())).unwrap();
        assert_eq!(id.as_str(), "c1");
        assert_eq!(db.categories.borrow().len(), 1);
    }

    #[test]
    fn resolve_unknown_id_falls_back_to_name() {
        let db = MockDb::default();
        db.tags.borrow_mut().push(Tag {
            id: "t1".into(),
            name: "outdoor".into(),
        });
        let id = resolve_tag(&db, &EntityRef::ById("outdoor".into())).unwrap();
        assert_eq!(id.as_str(), "t1");
        let id = resolve_tag(&db, &EntityRef::ById("indoor".into())).unwrap();
        assert_ne!(id.as_str(), "indoor");
        assert_eq!(db.tags.borrow().len(), 2);
    }

    #[test]
    fn resolve_unknown_name_stores_it_as_given() {
        let db = MockDb::default();
        let id = resolve_zone(&db, &EntityRef::ByName("Old  Town".into())).unwrap();
        assert_eq!(db.get_zone(id.as_str()).unwrap().name, "Old  Town");
    }

    #[test]
    fn resolve_matches_names_exactly() {
        let db = MockDb::default();
        let double = resolve_zone(&db, &EntityRef::ByName("Old  Town".into())).unwrap();
        let single = resolve_zone(&db, &EntityRef::ByName("Old Town".into())).unwrap();
        assert_ne!(double, single);
        assert_eq!(db.zones.borrow().len(), 2);
        let trimmed = resolve_zone(&db, &EntityRef::ByName(" Old Town ".into())).unwrap();
        assert_eq!(trimmed, single);
    }

    #[test]
    fn resolve_blank_name_fails() {
        let db = MockDb::default();
        assert!(matches!(
            resolve_tag(&db, &EntityRef::ByName("  ".into())),
            Err(Error::EmptyName)
        ));
    }

    #[test]
    fn resolve_each_kind() {
        let db = MockDb::default();
        let r = EntityRef::ByName("same".into());
        resolve_entity(&db, EntityKind::Tag, &r).unwrap();
        resolve_entity(&db, EntityKind::Category, &r).unwrap();
        resolve_entity(&db, EntityKind::Zone, &r).unwrap();
        assert_eq!(db.tags.borrow().len(), 1);
        assert_eq!(db.categories.borrow().len(), 1);
        assert_eq!(db.zones.borrow().len(), 1);
    }

    #[test]
    fn resolve_all_removes_duplicates() {
        let db = MockDb::default();
        let refs = vec![
            EntityRef::ByName("a".into()),
            EntityRef::ByName("b".into()),
            EntityRef::ByName("a".into()),
        ];
        let ids = resolve_all(&refs, |r| resolve_tag(&db, r)).unwrap();
        assert_eq!(ids.len(), 2);
    }
}
