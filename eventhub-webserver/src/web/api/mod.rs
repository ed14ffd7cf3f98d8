use std::{fmt::Display, result};

use eventhub_boundary::ApiResponse;
use rocket::{
    self, catch, catchers, delete, get,
    http::Status,
    post, put,
    response::{self, Responder},
    routes,
    serde::json::{Error as JsonError, Json},
    Catcher, Request, Route, State,
};

use super::{guards::*, jwt, sqlite, Cfg};
use eventhub_application::prelude as flows;
use eventhub_core::{
    entities::{entity_ref::EntityRef, id::Id},
    usecases::{self, ErrorKind},
};

mod auth;
mod bookings;
mod error;
mod events;
mod images;
mod taxonomy;
mod users;

pub use self::error::Error as ApiError;


type Result<T> = result::Result<Json<ApiResponse<T>>, ApiError>;
type JsonResult<'a, T> = result::Result<Json<T>, JsonError<'a>>;
type MessageResult = result::Result<Json<ApiResponse<()>>, ApiError>;

fn ok<T>(data: T) -> Result<T> {
    Ok(Json(ApiResponse::ok(data)))
}

fn done(message: &str) -> MessageResult {
    Ok(Json(ApiResponse::message(message)))
}

fn entity_refs(refs: Vec<eventhub_boundary::EntityRef>) -> Vec<EntityRef> {
    refs.into_iter().map(Into::into).collect()
}

pub fn routes() -> Vec<Route> {
    routes![
        // ---   auth   --- //
        auth::post_register,
        auth::post_login,
        auth::post_logout,
        auth::get_me,
        // ---   users   --- //
        users::get_users,
        users::post_user,
        users::get_user,
        users::put_user,
        users::delete_user,
        // ---   events   --- //
        events::get_events,
        events::get_events_created_by_me,
        events::get_event,
        events::post_event,
        events::put_event,
        events::delete_event,
        events::get_event_categories,
        events::post_event_category,
        events::delete_event_category,
        events::get_event_reviews,
        events::post_event_review,
        events::put_event_review,
        events::delete_event_review,
        // ---   categories, tags and zones   --- //
        taxonomy::get_categories,
        taxonomy::get_category,
        taxonomy::post_category,
        taxonomy::put_category,
        taxonomy::delete_category,
        taxonomy::get_tags,
        taxonomy::get_tag,
        taxonomy::post_tag,
        taxonomy::put_tag,
        taxonomy::delete_tag,
        taxonomy::get_zones,
        taxonomy::get_zone,
        taxonomy::post_zone,
        taxonomy::put_zone,
        taxonomy::delete_zone,
        // ---   bookings   --- //
        bookings::post_booking,
        bookings::get_my_events,
        bookings::get_participants,
        bookings::delete_booking,
        // ---   images   --- //
        images::get_image,
        images::get_images,
        images::get_images_in_folder,
        images::post_image,
        images::post_image_into_folder,
        images::delete_image,
    ]
}

pub fn catchers() -> Vec<Catcher> {
    catchers![default_catcher]
}

/// Renders framework errors like handler errors.
#[catch(default)]
fn default_catcher(status: Status, req: &Request) -> (Status, Json<ApiResponse<()>>) {
    // Rejected payloads and oversized uploads are plain validation errors
    let status = match status.code {
        413 | 422 => Status::BadRequest,
        _ => status,
    };
    let kind = error::kind_of_status(status);
    debug!("Caught {} for {} {}", status, req.method(), req.uri());
    let message = status.reason().unwrap_or("Unknown error");
    (status, Json(ApiResponse::error(kind.as_str(), message)))
}

fn json_error_response<'r, 'o: 'r, E: Display>(
    req: &'r rocket::Request<'_>,
    kind: ErrorKind,
    err: &E,
    status: Status,
) -> response::Result<'o> {
    let body = ApiResponse::error(kind.as_str(), err.to_string());
    Json(body).respond_to(req).map(|mut res| {
        res.set_status(status);
        res
    })
}
