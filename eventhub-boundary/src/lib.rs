use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

/// The envelope of every response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn error(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error: Some(error.into()),
        }
    }
}

/// Reference to an existing or a new tag, category or zone.
///
/// Serialized as `{"id": "..."}` or `{"name": "..."}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntityRef {
    Id(String),
    Name(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id            : String,
    pub email         : String,
    pub name          : String,
    pub role          : UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio           : Option<String>,
    pub interests     : Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image : Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Creation of a user by an admin.
#[derive(Deserialize, Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<UserRole>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[rustfmt::skip]
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUser {
    pub name          : Option<String>,
    pub bio           : Option<String>,
    pub interests     : Option<Vec<String>>,
    pub profile_image : Option<String>,
    pub role          : Option<UserRole>,
    pub password      : Option<String>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact     : Option<String>,
    pub zone      : String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude  : Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude : Option<f64>,
}

#[rustfmt::skip]
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct NewLocation {
    pub exact     : Option<String>,
    pub zone      : Option<EntityRef>,
    pub latitude  : Option<f64>,
    pub longitude : Option<f64>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub user_id    : String,
    pub user_name  : String,
    pub user_email : String,
    pub joined_at  : i64,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id              : String,
    pub user_id         : String,
    pub user_name       : String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture : Option<String>,
    pub event_id        : String,
    pub grade           : u8,
    pub review_text     : String,
    pub timestamp       : i64,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub grade: u8,
    #[serde(default)]
    pub review_text: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateReview {
    pub grade: Option<u8>,
    pub review_text: Option<String>,
}

/// An event with the details of its categories and its zone.
#[rustfmt::skip]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id               : String,
    pub name             : String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description      : Option<String>,
    /// `YYYY-MM-DD`
    pub date             : String,
    /// `HH:MM`
    pub time             : String,
    pub cost             : f64,
    pub image            : Option<String>,
    pub location         : Location,
    pub categories       : Vec<String>,
    pub reviews          : Vec<Review>,
    pub participants     : Vec<Participant>,
    pub created_by       : String,
    pub created_at       : i64,
    pub updated_at       : i64,
    pub category_details : Vec<Category>,
    pub zone_details     : Option<LocationZone>,
}

#[rustfmt::skip]
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct NewEvent {
    pub name        : String,
    pub description : Option<String>,
    pub date        : Option<String>,
    pub time        : Option<String>,
    pub cost        : Option<f64>,
    pub image       : Option<String>,
    pub location    : Option<NewLocation>,
    pub categories  : Vec<EntityRef>,
}

/// Absent fields are left untouched, the location is merged field by field.
#[rustfmt::skip]
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct UpdateEvent {
    pub name        : Option<String>,
    pub description : Option<String>,
    pub date        : Option<String>,
    pub time        : Option<String>,
    pub cost        : Option<f64>,
    pub image       : Option<String>,
    pub location    : Option<NewLocation>,
    pub categories  : Option<Vec<EntityRef>>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id             : String,
    pub category_name  : String,
    pub category_image : Option<String>,
    pub tags           : Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithTags {
    #[serde(flatten)]
    pub category: Category,
    pub tag_details: Vec<Tag>,
}

#[rustfmt::skip]
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NewCategory {
    pub category_name  : String,
    pub category_image : Option<String>,
    pub tags           : Vec<EntityRef>,
}

#[rustfmt::skip]
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCategory {
    pub category_name  : Option<String>,
    pub category_image : Option<String>,
    pub tags           : Option<Vec<EntityRef>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LocationZone {
    pub id: String,
    pub name: String,
}

/// Payload for creating or renaming a tag or a zone.
#[derive(Deserialize, Debug, Clone)]
pub struct Name {
    pub name: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub event_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id           : String,
    pub event_id     : String,
    pub user_id      : String,
    pub status       : BookingStatus,
    pub booking_date : i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BookedEvent {
    #[serde(flatten)]
    pub booking: Booking,
    /// `None` if the event has been deleted.
    pub event: Option<Event>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url       : String,
    pub folder    : String,
    pub file_name : String,
    pub size      : u64,
}
