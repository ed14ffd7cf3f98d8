use super::prelude::*;

#[derive(Debug, Clone)]
pub struct NewReview {
    pub grade: u8,
    pub review_text: String,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewPatch {
    pub grade: Option<u8>,
    pub review_text: Option<String>,
}

fn valid_grade(grade: u8) -> Result<Grade> {
    let grade = Grade::from(grade);
    if !grade.is_valid() {
        return Err(Error::InvalidGrade);
    }
    Ok(grade)
}

fn review_not_found(err: RepoError) -> Error {
    match err {
        RepoError::NotFound => Error::ReviewNotFound,
        _ => Error::Repo(err),
    }
}

// The embedded copies on the event mirror the standalone reviews.

fn add_review(event: &mut Event, review: &Review) {
    event.reviews.retain(|r| r.id != review.id);
    event.reviews.push(review.clone());
}

fn replace_review(event: &mut Event, review: &Review) -> bool {
    match event.reviews.iter_mut().find(|r| r.id == review.id) {
        Some(embedded) => {
            *embedded = review.clone();
            true
        }
        None => false,
    }
}

fn remove_review(event: &mut Event, review_id: &Id) -> bool {
    let count = event.reviews.len();
    event.reviews.retain(|r| &r.id != review_id);
    event.reviews.len() != count
}

/// Creates a review and its embedded copy.
///
/// Both writes have to be executed within a single transaction.
pub fn create_review<R>(
    repo: &R,
    session: &Session,
    event_id: &str,
    new_review: NewReview,
) -> Result<Review>
where
    R: EventRepo + ReviewRepo + UserRepo,
{
    let NewReview { grade, review_text } = new_review;
    let grade = valid_grade(grade)?;
    let mut event = super::get_event(repo, event_id)?;
    let user_id = session.user_id.as_str();
    if repo
        .try_get_review_of_user_for_event(user_id, event_id)?
        .is_some()
    {
        return Err(Error::AlreadyReviewed);
    }
    let user = repo.try_get_user(user_id)?.ok_or(Error::ProfileNotFound)?;
    let review = Review {
        id: Id::new(),
        user_id: user.id,
        user_name: user.name,
        profile_picture: user.profile_image,
        event_id: event.id.clone(),
        grade,
        review_text: review_text.trim().to_owned(),
        timestamp: Timestamp::now(),
    };
    repo.create_review(&review).map_err(|err| match err {
        RepoError::AlreadyExists => Error::AlreadyReviewed,
        err => Error::Repo(err),
    })?;
    add_review(&mut event, &review);
    repo.update_event(&event)?;
    Ok(review)
}

pub fn update_review<R>(
    repo: &R,
    session: &Session,
    review_id: &str,
    patch: ReviewPatch,
) -> Result<Review>
where
    R: EventRepo + ReviewRepo,
{
    let mut review = repo.get_review(review_id).map_err(review_not_found)?;
    super::authorize_modification(session, &review.user_id)?;
    let ReviewPatch { grade, review_text } = patch;
    if let Some(grade) = grade {
        review.grade = valid_grade(grade)?;
    }
    if let Some(review_text) = review_text {
        review.review_text = review_text.trim().to_owned();
    }
    review.timestamp = Timestamp::now();
    repo.update_review(&review)?;
    match repo.try_get_event(review.event_id.as_str())? {
        Some(mut event) => {
            if !replace_review(&mut event, &review) {
                log::warn!("Restoring missing copy of review {} on event {}", review.id, event.id);
                add_review(&mut event, &review);
            }
            repo.update_event(&event)?;
        }
        None => log::info!("Updated review {} of a deleted event", review.id),
    }
    Ok(review)
}

pub fn delete_review<R>(repo: &R, session: &Session, review_id: &str) -> Result<Review>
where
    R: EventRepo + ReviewRepo,
{
    let review = repo.get_review(review_id).map_err(review_not_found)?;
    super::authorize_modification(session, &review.user_id)?;
    repo.delete_review(review_id)?;
    if let Some(mut event) = repo.try_get_event(review.event_id.as_str())? {
        if remove_review(&mut event, &review.id) {
            repo.update_event(&event)?;
        }
    }
    Ok(review)
}

pub fn get_review<R: ReviewRepo>(repo: &R, review_id: &str) -> Result<Review> {
    repo.get_review(review_id).map_err(review_not_found)
}

/// Reads the embedded copies of the event.
pub fn reviews_of_event<R: EventRepo>(repo: &R, event_id: &str) -> Result<Vec<Review>> {
    Ok(super::get_event(repo, event_id)?.reviews)
}

#[cfg(test)]
mod tests {
    use super::{
        super::tests::{session, MockDb},
        *,
    };
    use crate::entities::builders::*;

    fn setup() -> MockDb {
        MockDb::default()
            .with_user("alice", "Alice")
            .with_user("bob", "Bob")
            .with_event(Event::build().id("e1").finish())
    }

    fn great() -> NewReview {
        NewReview {
            grade: 5,
            review_text: "Great!".into(),
        }
    }

    #[test]
    fn create_review_with_embedded_copy() {
        let db = setup();
        let review = create_review(&db, &session("alice", Role::User), "e1", great()).unwrap();
        assert_eq!(review.user_name, "Alice");
        assert_eq!(review.grade.value(), 5);
        assert_eq!(db.reviews.borrow().len(), 1);
        assert_eq!(reviews_of_event(&db, "e1").unwrap(), vec![review]);
    }

    #[test]
    fn second_review_of_same_user_is_a_conflict() {
        let db = setup();
        let alice = session("alice", Role::User);
        let original = create_review(&db, &alice, "e1", great()).unwrap();
        let second = NewReview {
            grade: 1,
            review_text: "Changed my mind".into(),
        };
        assert!(matches!(
            create_review(&db, &alice, "e1", second),
            Err(Error::AlreadyReviewed)
        ));
        assert_eq!(get_review(&db, original.id.as_str()).unwrap(), original);
        assert_eq!(reviews_of_event(&db, "e1").unwrap(), vec![original]);
    }

    #[test]
    fn invalid_grades_are_rejected() {
        let db = setup();
        let review = NewReview {
            grade: 0,
            review_text: "".into(),
        };
        assert!(matches!(
            create_review(&db, &session("alice", Role::User), "e1", review),
            Err(Error::InvalidGrade)
        ));
    }

    #[test]
    fn review_missing_event() {
        let db = setup();
        assert!(matches!(
            create_review(&db, &session("alice", Role::User), "e2", great()),
            Err(Error::EventNotFound)
        ));
    }

    #[test]
    fn update_review_keeps_copies_in_sync() {
        let db = setup();
        let alice = session("alice", Role::User);
        let review = create_review(&db, &alice, "e1", great()).unwrap();
        let patch = ReviewPatch {
            grade: Some(3),
            review_text: Some("Okay".into()),
        };
        assert!(matches!(
            update_review(&db, &session("bob", Role::User), review.id.as_str(), patch.clone()),
            Err(Error::Forbidden)
        ));
        let updated = update_review(&db, &alice, review.id.as_str(), patch).unwrap();
        assert_eq!(updated.grade.value(), 3);
        assert_eq!(reviews_of_event(&db, "e1").unwrap(), vec![updated.clone()]);
        assert_eq!(get_review(&db, review.id.as_str()).unwrap(), updated);
    }

    #[test]
    fn delete_review_removes_both_copies() {
        let db = setup();
        let alice = session("alice", Role::User);
        let review = create_review(&db, &alice, "e1", great()).unwrap();
        create_review(&db, &session("bob", Role::User), "e1", great()).unwrap();
        delete_review(&db, &session("root", Role::Admin), review.id.as_str()).unwrap();
        assert_eq!(db.reviews.borrow().len(), 1);
        let embedded = reviews_of_event(&db, "e1").unwrap();
        assert_eq!(embedded.len(), 1);
        assert_eq!(embedded[0].user_id.as_str(), "bob");
        assert!(matches!(
            delete_review(&db, &alice, review.id.as_str()),
            Err(Error::ReviewNotFound)
        ));
    }
}
