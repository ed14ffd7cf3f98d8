#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use super::schema::*;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct NewUser<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub name: &'a str,
    pub role: &'a str,
    pub bio: Option<&'a str>,
    pub profile_image: Option<&'a str>,
}

#[derive(Queryable)]
pub struct UserEntity {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = user_interests)]
pub struct UserInterest<'a> {
    pub user_id: &'a str,
    pub interest: &'a str,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = events)]
#[diesel(treat_none_as_null = true)]
pub struct NewEvent<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub date: String,
    pub time: String,
    pub cost: f64,
    pub image: Option<&'a str>,
    pub location_exact: Option<&'a str>,
    pub location_zone: &'a str,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_by: &'a str,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Queryable)]
pub struct EventEntity {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub date: String,
    pub time: String,
    pub cost: f64,
    pub image: Option<String>,
    pub location_exact: Option<String>,
    pub location_zone: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_by: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Insertable, Queryable)]
#[diesel(table_name = event_categories)]
pub struct EventCategory {
    pub event_id: String,
    pub category_id: String,
    pub position: i32,
}

#[derive(Insertable, Queryable)]
#[diesel(table_name = event_reviews)]
pub struct EventReview {
    pub event_id: String,
    pub review_id: String,
    pub position: i32,
    pub user_id: String,
    pub user_name: String,
    pub profile_picture: Option<String>,
    pub grade: i32,
    pub review_text: String,
    pub timestamp: i64,
}

#[derive(Insertable, Queryable)]
#[diesel(table_name = event_participants)]
pub struct EventParticipant {
    pub event_id: String,
    pub user_id: String,
    pub position: i32,
    pub user_name: String,
    pub user_email: String,
    pub joined_at: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = categories)]
#[diesel(treat_none_as_null = true)]
pub struct NewCategory<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub image: Option<&'a str>,
}

#[derive(Queryable)]
pub struct CategoryEntity {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Insertable, Queryable)]
#[diesel(table_name = category_tags)]
pub struct CategoryTag {
    pub category_id: String,
    pub tag_id: String,
    pub position: i32,
}

#[derive(Insertable, AsChangeset, Queryable)]
#[diesel(table_name = tags)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

#[derive(Insertable, AsChangeset, Queryable)]
#[diesel(table_name = location_zones)]
pub struct LocationZone {
    pub id: String,
    pub name: String,
}

#[derive(Insertable, AsChangeset, Queryable)]
#[diesel(table_name = reviews)]
#[diesel(treat_none_as_null = true)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub profile_picture: Option<String>,
    pub event_id: String,
    pub grade: i32,
    pub review_text: String,
    pub timestamp: i64,
}

#[derive(Insertable, Queryable)]
#[diesel(table_name = bookings)]
pub struct Booking {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub status: String,
    pub booking_date: i64,
}
