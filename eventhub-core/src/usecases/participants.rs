use super::prelude::*;

/// Appends the participant unless the user is already registered.
///
/// Must run inside the same transaction that re-reads the event.
pub fn add_participant<R: EventRepo>(
    repo: &R,
    event_id: &str,
    participant: Participant,
) -> Result<Event> {
    let mut event = repo.get_event(event_id).map_err(super::event_not_found)?;
    if event.has_participant(&participant.user_id) {
        return Err(Error::AlreadyRegistered);
    }
    event.participants.push(participant);
    repo.update_event(&event)?;
    Ok(event)
}

/// Returns `false` if the user did not participate.
pub fn remove_participant<R: EventRepo>(repo: &R, event_id: &str, user_id: &Id) -> Result<bool> {
    let mut event = repo.get_event(event_id).map_err(super::event_not_found)?;
    let count = event.participants.len();
    event.participants.retain(|p| &p.user_id != user_id);
    if event.participants.len() == count {
        return Ok(false);
    }
    repo.update_event(&event)?;
    Ok(true)
}

pub fn list_participants<R: EventRepo>(repo: &R, event_id: &str) -> Result<Vec<Participant>> {
    Ok(super::get_event(repo, event_id)?.participants)
}
