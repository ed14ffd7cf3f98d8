use super::*;

pub fn create_review(
    connections: &sqlite::Connections,
    session: &Session,
    event_id: &str,
    new_review: usecases::NewReview,
) -> Result<Review> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::create_review(conn, session, event_id, new_review))?)
}

pub fn update_review(
    connections: &sqlite::Connections,
    session: &Session,
    review_id: &str,
    patch: usecases::ReviewPatch,
) -> Result<Review> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::update_review(conn, session, review_id, patch))?)
}

pub fn delete_review(
    connections: &sqlite::Connections,
    session: &Session,
    review_id: &str,
) -> Result<Review> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::delete_review(conn, session, review_id))?)
}
