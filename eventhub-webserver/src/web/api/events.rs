use super::*;
use eventhub_boundary::{
    Category, Event, NewEvent, NewLocation, NewReview, Review, UpdateEvent, UpdateReview,
};
use eventhub_core::{
    entities::time::parse_date,
    util::sort::{EventSortKey, SortOrder},
};
use rocket::FromForm;

pub(super) fn event_json(view: usecases::EventView) -> Event {
    let usecases::EventView {
        event,
        category_details,
        zone_details,
    } = view;
    Event::from_entities(event, category_details, zone_details)
}

fn new_location(location: NewLocation) -> usecases::NewLocation {
    let NewLocation {
        exact,
        zone,
        latitude,
        longitude,
    } = location;
    usecases::NewLocation {
        exact,
        zone: zone.map(Into::into),
        latitude,
        longitude,
    }
}

/// Query parameters are parsed by hand to report invalid values.
#[derive(FromForm, Debug, Default)]
pub struct EventFilter {
    category: Option<String>,
    zone: Option<String>,
    tag: Option<String>,
    date: Option<String>,
    #[field(name = "minCost")]
    min_cost: Option<String>,
    #[field(name = "maxCost")]
    max_cost: Option<String>,
    #[field(name = "sortBy")]
    sort_by: Option<String>,
    #[field(name = "sortOrder")]
    sort_order: Option<String>,
    limit: Option<String>,
}

fn cost(value: Option<String>) -> result::Result<Option<f64>, usecases::Error> {
    value
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|c| c.is_finite() && *c >= 0.0)
                .ok_or(usecases::Error::InvalidCost)
        })
        .transpose()
}

impl TryFrom<EventFilter> for usecases::EventQuery {
    type Error = usecases::Error;

    fn try_from(filter: EventFilter) -> result::Result<Self, Self::Error> {
        let EventFilter {
            category,
            zone,
            tag,
            date,
            min_cost,
            max_cost,
            sort_by,
            sort_order,
            limit,
        } = filter;
        let date = date
            .map(|d| parse_date(&d).map_err(|_| usecases::Error::InvalidDate))
            .transpose()?;
        let sort_by = sort_by
            .map(|s| {
                s.parse::<EventSortKey>()
                    .map_err(|()| usecases::Error::InvalidSortKey)
            })
            .transpose()?
            .unwrap_or_default();
        let sort_order = sort_order
            .map(|s| {
                s.parse::<SortOrder>()
                    .map_err(|()| usecases::Error::InvalidSortOrder)
            })
            .transpose()?
            .unwrap_or_default();
        let limit = limit
            .map(|l| {
                l.trim()
                    .parse::<usize>()
                    .map_err(|_| usecases::Error::InvalidLimit)
            })
            .transpose()?;
        Ok(Self {
            category: category.map(Id::from),
            zone: zone.map(Id::from),
            tag: tag.map(Id::from),
            date,
            min_cost: cost(min_cost)?,
            max_cost: cost(max_cost)?,
            sort_by,
            sort_order,
            limit,
        })
    }
}

#[get("/events?<filter..>")]
pub fn get_events(db: sqlite::Connections, filter: EventFilter) -> Result<Vec<Event>> {
    let query = usecases::EventQuery::try_from(filter)?;
    let db = db.shared()?;
    let events = usecases::query_events(&db, query)?;
    let views = usecases::enrich_events(&db, events)?;
    ok(views.into_iter().map(event_json).collect())
}

#[get("/events/created-by/me")]
pub fn get_events_created_by_me(db: sqlite::Connections, account: Account) -> Result<Vec<Event>> {
    let db = db.shared()?;
    let events = usecases::events_created_by(&db, account.session())?;
    let views = usecases::enrich_events(&db, events)?;
    ok(views.into_iter().map(event_json).collect())
}

#[get("/events/<id>")]
pub fn get_event(db: sqlite::Connections, id: &str) -> Result<Event> {
    let db = db.shared()?;
    let event = usecases::get_event(&db, id)?;
    ok(event_json(usecases::enrich_event(&db, event)?))
}

#[post("/events", format = "application/json", data = "<new_event>")]
pub fn post_event(
    db: sqlite::Connections,
    account: Account,
    new_event: JsonResult<NewEvent>,
) -> Result<Event> {
    let NewEvent {
        name,
        description,
        date,
        time,
        cost,
        image,
        location,
        categories,
    } = new_event?.into_inner();
    let new_event = usecases::NewEvent {
        name,
        description,
        date,
        time,
        cost,
        image,
        location: location.map(new_location),
        categories: entity_refs(categories),
    };
    let event = flows::create_event(&db, account.session(), new_event)?;
    let view = usecases::enrich_event(&db.shared()?, event)?;
    Ok(Json(
        ApiResponse::ok(event_json(view)).with_message("Event created"),
    ))
}

#[put("/events/<id>", format = "application/json", data = "<update>")]
pub fn put_event(
    db: sqlite::Connections,
    account: Account,
    images: &State<Images>,
    id: &str,
    update: JsonResult<UpdateEvent>,
) -> Result<Event> {
    let UpdateEvent {
        name,
        description,
        date,
        time,
        cost,
        image,
        location,
        categories,
    } = update?.into_inner();
    let patch = usecases::EventPatch {
        name,
        description,
        date,
        time,
        cost,
        image,
        location: location.map(new_location),
        categories: categories.map(entity_refs),
    };
    let event = flows::update_event(&db, &**images.inner(), account.session(), id, patch)?;
    let view = usecases::enrich_event(&db.shared()?, event)?;
    ok(event_json(view))
}

#[delete("/events/<id>")]
pub fn delete_event(
    db: sqlite::Connections,
    account: Account,
    images: &State<Images>,
    id: &str,
) -> MessageResult {
    flows::delete_event(&db, &**images.inner(), account.session(), id)?;
    done("Event deleted")
}

#[get("/events/<id>/categories")]
pub fn get_event_categories(db: sqlite::Connections, id: &str) -> Result<Vec<Category>> {
    let db = db.shared()?;
    let event = usecases::get_event(&db, id)?;
    let view = usecases::enrich_event(&db, event)?;
    ok(view.category_details.into_iter().map(Into::into).collect())
}

#[post("/events/<id>/categories", format = "application/json", data = "<category>")]
pub fn post_event_category(
    db: sqlite::Connections,
    account: Account,
    id: &str,
    category: JsonResult<eventhub_boundary::EntityRef>,
) -> Result<Event> {
    let category = EntityRef::from(category?.into_inner());
    let event = flows::add_event_category(&db, account.session(), id, &category)?;
    let view = usecases::enrich_event(&db.shared()?, event)?;
    ok(event_json(view))
}

#[delete("/events/<id>/categories/<category_id>")]
pub fn delete_event_category(
    db: sqlite::Connections,
    account: Account,
    id: &str,
    category_id: &str,
) -> Result<Event> {
    let event = flows::remove_event_category(&db, account.session(), id, category_id)?;
    let view = usecases::enrich_event(&db.shared()?, event)?;
    ok(event_json(view))
}

#[get("/events/<id>/reviews")]
pub fn get_event_reviews(db: sqlite::Connections, id: &str) -> Result<Vec<Review>> {
    let reviews = usecases::reviews_of_event(&db.shared()?, id)?;
    ok(reviews.into_iter().map(Into::into).collect())
}

#[post("/events/<id>/reviews", format = "application/json", data = "<review>")]
pub fn post_event_review(
    db: sqlite::Connections,
    account: Account,
    id: &str,
    review: JsonResult<NewReview>,
) -> Result<Review> {
    let NewReview { grade, review_text } = review?.into_inner();
    let new_review = usecases::NewReview { grade, review_text };
    let review = flows::create_review(&db, account.session(), id, new_review)?;
    ok(review.into())
}

// Reviews are addressed by their own id, the event id
// only has to match.
fn review_of_event(
    db: &sqlite::Connections,
    event_id: &str,
    review_id: &str,
) -> result::Result<(), ApiError> {
    let review = usecases::get_review(&db.shared()?, review_id)?;
    if review.event_id != *event_id {
        return Err(usecases::Error::ReviewNotFound.into());
    }
    Ok(())
}

#[put(
    "/events/<id>/reviews/<review_id>",
    format = "application/json",
    data = "<update>"
)]
pub fn put_event_review(
    db: sqlite::Connections,
    account: Account,
    id: &str,
    review_id: &str,
    update: JsonResult<UpdateReview>,
) -> Result<Review> {
    let UpdateReview { grade, review_text } = update?.into_inner();
    review_of_event(&db, id, review_id)?;
    let patch = usecases::ReviewPatch { grade, review_text };
    let review = flows::update_review(&db, account.session(), review_id, patch)?;
    ok(review.into())
}

#[delete("/events/<id>/reviews/<review_id>")]
pub fn delete_event_review(
    db: sqlite::Connections,
    account: Account,
    id: &str,
    review_id: &str,
) -> MessageResult {
    review_of_event(&db, id, review_id)?;
    flows::delete_review(&db, account.session(), review_id)?;
    done("Review deleted")
}
