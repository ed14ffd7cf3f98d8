use super::{event::load_grade, *};
use eventhub_core::entities::review::Review;

impl From<&Review> for models::Review {
    fn from(from: &Review) -> Self {
        let Review {
            id,
            user_id,
            user_name,
            profile_picture,
            event_id,
            grade,
            review_text,
            timestamp,
        } = from;
        Self {
            id: id.to_string(),
            user_id: user_id.to_string(),
            user_name: user_name.clone(),
            profile_picture: profile_picture.clone(),
            event_id: event_id.to_string(),
            grade: i32::from(grade.value()),
            review_text: review_text.clone(),
            timestamp: timestamp.as_millis(),
        }
    }
}

fn into_review(from: models::Review) -> Result<Review> {
    let models::Review {
        id,
        user_id,
        user_name,
        profile_picture,
        event_id,
        grade,
        review_text,
        timestamp,
    } = from;
    Ok(Review {
        id: id.into(),
        user_id: user_id.into(),
        user_name,
        profile_picture,
        event_id: event_id.into(),
        grade: load_grade(grade)?,
        review_text,
        timestamp: Timestamp::from_millis(timestamp),
    })
}

impl ReviewRepo for DbReadOnly<'_> {
    fn create_review(&self, _review: &Review) -> Result<()> {
        Err(read_only_access())
    }
    fn update_review(&self, _review: &Review) -> Result<()> {
        Err(read_only_access())
    }
    fn delete_review(&self, _id: &str) -> Result<()> {
        Err(read_only_access())
    }

    fn get_review(&self, id: &str) -> Result<Review> {
        get_review(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_review_of_user_for_event(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> Result<Option<Review>> {
        try_get_review_of_user_for_event(&mut self.conn.borrow_mut(), user_id, event_id)
    }
    fn load_reviews_of_event(&self, event_id: &str) -> Result<Vec<Review>> {
        load_reviews_of_event(&mut self.conn.borrow_mut(), event_id)
    }
    fn load_reviews_of_user(&self, user_id: &str) -> Result<Vec<Review>> {
        load_reviews_of_user(&mut self.conn.borrow_mut(), user_id)
    }
}

impl ReviewRepo for DbConnection<'_> {
    fn create_review(&self, review: &Review) -> Result<()> {
        create_review(&mut self.conn.borrow_mut(), review)
    }
    fn update_review(&self, review: &Review) -> Result<()> {
        update_review(&mut self.conn.borrow_mut(), review)
    }
    fn delete_review(&self, id: &str) -> Result<()> {
        delete_review(&mut self.conn.borrow_mut(), id)
    }

    fn get_review(&self, id: &str) -> Result<Review> {
        get_review(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_review_of_user_for_event(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> Result<Option<Review>> {
        try_get_review_of_user_for_event(&mut self.conn.borrow_mut(), user_id, event_id)
    }
    fn load_reviews_of_event(&self, event_id: &str) -> Result<Vec<Review>> {
        load_reviews_of_event(&mut self.conn.borrow_mut(), event_id)
    }
    fn load_reviews_of_user(&self, user_id: &str) -> Result<Vec<Review>> {
        load_reviews_of_user(&mut self.conn.borrow_mut(), user_id)
    }
}

fn create_review(conn: &mut SqliteConnection, review: &Review) -> Result<()> {
    diesel::insert_into(schema::reviews::table)
        .values(&models::Review::from(review))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_review(conn: &mut SqliteConnection, review: &Review) -> Result<()> {
    use schema::reviews::dsl;
    let count = diesel::update(dsl::reviews.filter(dsl::id.eq(review.id.as_str())))
        .set(&models::Review::from(review))
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_affected(count)
}

fn delete_review(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::reviews::dsl;
    let count = diesel::delete(dsl::reviews.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_affected(count)
}

fn get_review(conn: &mut SqliteConnection, id: &str) -> Result<Review> {
    use schema::reviews::dsl;
    let review = dsl::reviews
        .filter(dsl::id.eq(id))
        .first::<models::Review>(conn)
        .map_err(from_diesel_err)?;
    into_review(review)
}

fn try_get_review_of_user_for_event(
    conn: &mut SqliteConnection,
    user_id: &str,
    event_id: &str,
) -> Result<Option<Review>> {
    use schema::reviews::dsl;
    dsl::reviews
        .filter(dsl::user_id.eq(user_id))
        .filter(dsl::event_id.eq(event_id))
        .first::<models::Review>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(into_review)
        .transpose()
}

fn load_reviews_of_event(conn: &mut SqliteConnection, event_id: &str) -> Result<Vec<Review>> {
    use schema::reviews::dsl;
    dsl::reviews
        .filter(dsl::event_id.eq(event_id))
        .order_by(dsl::timestamp)
        .load::<models::Review>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(into_review)
        .collect()
}

fn load_reviews_of_user(conn: &mut SqliteConnection, user_id: &str) -> Result<Vec<Review>> {
    use schema::reviews::dsl;
    dsl::reviews
        .filter(dsl::user_id.eq(user_id))
        .order_by(dsl::timestamp)
        .load::<models::Review>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(into_review)
        .collect()
}
