use super::prelude::*;
use crate::util::trim_name;

fn zone_not_found(err: RepoError) -> Error {
    match err {
        RepoError::NotFound => Error::NotFound("The location zone"),
        _ => Error::Repo(err),
    }
}

fn conflict(err: RepoError) -> Error {
    match err {
        RepoError::AlreadyExists => Error::AlreadyExists("A location zone with this name"),
        _ => Error::Repo(err),
    }
}

pub fn get_zone<R: ZoneRepo>(repo: &R, id: &str) -> Result<LocationZone> {
    repo.get_zone(id).map_err(zone_not_found)
}

pub fn create_zone<R: ZoneRepo>(repo: &R, name: &str) -> Result<LocationZone> {
    let name = trim_name(name);
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    if repo.try_get_zone_by_name(&name)?.is_some() {
        return Err(Error::AlreadyExists("A location zone with this name"));
    }
    let zone = LocationZone { id: Id::new(), name };
    repo.create_zone(&zone).map_err(conflict)?;
    Ok(zone)
}

pub fn update_zone<R: ZoneRepo>(repo: &R, id: &str, name: &str) -> Result<LocationZone> {
    let mut zone = get_zone(repo, id)?;
    let name = trim_name(name);
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    if repo
        .try_get_zone_by_name(&name)?
        .filter(|other| other.id != zone.id)
        .is_some()
    {
        return Err(Error::AlreadyExists("A location zone with this name"));
    }
    zone.name = name;
    repo.update_zone(&zone).map_err(conflict)?;
    Ok(zone)
}

pub fn delete_zone<R: ZoneRepo>(repo: &R, id: &str) -> Result<()> {
    repo.delete_zone(id).map_err(zone_not_found)
}
