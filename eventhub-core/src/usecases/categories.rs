use super::{prelude::*, resolve_all, resolve_tag};
use crate::util::trim_name;

#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    pub name  : String,
    pub image : Option<String>,
    pub tags  : Vec<EntityRef>,
}

#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name  : Option<String>,
    /// An empty string removes the image.
    pub image : Option<String>,
    pub tags  : Option<Vec<EntityRef>>,
}

fn category_not_found(err: RepoError) -> Error {
    match err {
        RepoError::NotFound => Error::NotFound("The category"),
        _ => Error::Repo(err),
    }
}

fn conflict(err: RepoError) -> Error {
    match err {
        RepoError::AlreadyExists => Error::AlreadyExists("A category with this name"),
        _ => Error::Repo(err),
    }
}

fn check_unique_name<R: CategoryRepo>(repo: &R, name: &str, own_id: Option<&Id>) -> Result<()> {
    let taken = repo
        .try_get_category_by_name(name)?
        .filter(|other| Some(&other.id) != own_id)
        .is_some();
    if taken {
        return Err(Error::AlreadyExists("A category with this name"));
    }
    Ok(())
}

pub fn get_category<R: CategoryRepo>(repo: &R, id: &str) -> Result<Category> {
    repo.get_category(id).map_err(category_not_found)
}

pub fn create_category<R>(repo: &R, new_category: NewCategory) -> Result<Category>
where
    R: CategoryRepo + TagRepo,
{
    let NewCategory { name, image, tags } = new_category;
    let name = trim_name(&name);
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    check_unique_name(repo, &name, None)?;
    let tags = resolve_all(&tags, |r| resolve_tag(repo, r))?;
    let category = Category {
        id: Id::new(),
        name,
        image: image.filter(|i| !i.trim().is_empty()),
        tags,
    };
    repo.create_category(&category).map_err(conflict)?;
    Ok(category)
}

pub fn update_category<R>(repo: &R, id: &str, patch: CategoryPatch) -> Result<Category>
where
    R: CategoryRepo + TagRepo,
{
    let mut category = get_category(repo, id)?;
    let CategoryPatch { name, image, tags } = patch;
    if let Some(name) = name {
        let name = trim_name(&name);
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        check_unique_name(repo, &name, Some(&category.id))?;
        category.name = name;
    }
    if let Some(image) = image {
        category.image = Some(image).filter(|i| !i.trim().is_empty());
    }
    if let Some(tags) = tags {
        category.tags = resolve_all(&tags, |r| resolve_tag(repo, r))?;
    }
    repo.update_category(&category).map_err(conflict)?;
    Ok(category)
}

/// Events that still refer to the category keep the dangling id.
pub fn delete_category<R: CategoryRepo>(repo: &R, id: &str) -> Result<()> {
    repo.delete_category(id).map_err(category_not_found)
}
