use super::prelude::*;

/// Deletes the event and returns it for cleaning up its image.
///
/// Standalone reviews and bookings that refer to the event are kept.
pub fn delete_event<R: EventRepo>(repo: &R, session: &Session, id: &str) -> Result<Event> {
    let event = super::get_event(repo, id)?;
    super::authorize_modification(session, &event.created_by)?;
    repo.delete_event(id).map_err(super::event_not_found)?;
    log::info!("Deleted event {} ({})", event.name, event.id);
    Ok(event)
}
