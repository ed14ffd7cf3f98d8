use super::prelude::*;
use crate::util::trim_name;

fn tag_not_found(err: RepoError) -> Error {
    match err {
        RepoError::NotFound => Error::NotFound("The tag"),
        _ => Error::Repo(err),
    }
}

fn conflict(err: RepoError) -> Error {
    match err {
        RepoError::AlreadyExists => Error::AlreadyExists("A tag with this name"),
        _ => Error::Repo(err),
    }
}

pub fn get_tag<R: TagRepo>(repo: &R, id: &str) -> Result<Tag> {
    repo.get_tag(id).map_err(tag_not_found)
}

pub fn create_tag<R: TagRepo>(repo: &R, name: &str) -> Result<Tag> {
    let name = trim_name(name);
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    if repo.try_get_tag_by_name(&name)?.is_some() {
        return Err(Error::AlreadyExists("A tag with this name"));
    }
    let tag = Tag { id: Id::new(), name };
    repo.create_tag(&tag).map_err(conflict)?;
    Ok(tag)
}

pub fn update_tag<R: TagRepo>(repo: &R, id: &str, name: &str) -> Result<Tag> {
    let mut tag = get_tag(repo, id)?;
    let name = trim_name(name);
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    if repo
        .try_get_tag_by_name(&name)?
        .filter(|other| other.id != tag.id)
        .is_some()
    {
        return Err(Error::AlreadyExists("A tag with this name"));
    }
    tag.name = name;
    repo.update_tag(&tag).map_err(conflict)?;
    Ok(tag)
}

/// Categories that still refer to the tag keep the dangling id.
pub fn delete_tag<R: TagRepo>(repo: &R, id: &str) -> Result<()> {
    repo.delete_tag(id).map_err(tag_not_found)
}
