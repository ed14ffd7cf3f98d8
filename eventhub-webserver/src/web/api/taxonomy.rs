use super::*;
use eventhub_core::repositories::{CategoryRepo, TagRepo, ZoneRepo};
use eventhub_boundary::{
    Category, CategoryWithTags, LocationZone, Name, NewCategory, Tag, UpdateCategory,
};

fn category_json(view: usecases::CategoryView) -> CategoryWithTags {
    let usecases::CategoryView {
        category,
        tag_details,
    } = view;
    CategoryWithTags {
        category: Category::from(category),
        tag_details: tag_details.into_iter().map(Into::into).collect(),
    }
}

// ---   categories   --- //

#[get("/categories")]
pub fn get_categories(db: sqlite::Connections) -> Result<Vec<CategoryWithTags>> {
    let db = db.shared()?;
    let mut categories = db.all_categories()?;
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    let views = usecases::enrich_categories(&db, categories)?;
    ok(views.into_iter().map(category_json).collect())
}

#[get("/categories/<id>")]
pub fn get_category(db: sqlite::Connections, id: &str) -> Result<CategoryWithTags> {
    let db = db.shared()?;
    let category = usecases::get_category(&db, id)?;
    ok(category_json(usecases::enrich_category(&db, category)?))
}

#[post("/categories", format = "application/json", data = "<new_category>")]
pub fn post_category(
    db: sqlite::Connections,
    _account: Account,
    new_category: JsonResult<NewCategory>,
) -> Result<CategoryWithTags> {
    let NewCategory {
        category_name,
        category_image,
        tags,
    } = new_category?.into_inner();
    let new_category = usecases::NewCategory {
        name: category_name,
        image: category_image,
        tags: entity_refs(tags),
    };
    let category = flows::create_category(&db, new_category)?;
    ok(category_json(usecases::enrich_category(
        &db.shared()?,
        category,
    )?))
}

#[put("/categories/<id>", format = "application/json", data = "<update>")]
pub fn put_category(
    db: sqlite::Connections,
    _account: Account,
    id: &str,
    update: JsonResult<UpdateCategory>,
) -> Result<CategoryWithTags> {
    let UpdateCategory {
        category_name,
        category_image,
        tags,
    } = update?.into_inner();
    let patch = usecases::CategoryPatch {
        name: category_name,
        image: category_image,
        tags: tags.map(entity_refs),
    };
    let category = flows::update_category(&db, id, patch)?;
    ok(category_json(usecases::enrich_category(
        &db.shared()?,
        category,
    )?))
}

#[delete("/categories/<id>")]
pub fn delete_category(db: sqlite::Connections, _account: Account, id: &str) -> MessageResult {
    flows::delete_category(&db, id)?;
    done("Category deleted")
}

// ---   tags   --- //

#[get("/tags")]
pub fn get_tags(db: sqlite::Connections) -> Result<Vec<Tag>> {
    let mut tags = db.shared()?.all_tags()?;
    tags.sort_by(|a, b| a.name.cmp(&b.name));
    ok(tags.into_iter().map(Into::into).collect())
}

#[get("/tags/<id>")]
pub fn get_tag(db: sqlite::Connections, id: &str) -> Result<Tag> {
    ok(usecases::get_tag(&db.shared()?, id)?.into())
}

#[post("/tags", format = "application/json", data = "<tag>")]
pub fn post_tag(db: sqlite::Connections, _account: Account, tag: JsonResult<Name>) -> Result<Tag> {
    let Name { name } = tag?.into_inner();
    ok(flows::create_tag(&db, &name)?.into())
}

#[put("/tags/<id>", format = "application/json", data = "<tag>")]
pub fn put_tag(
    db: sqlite::Connections,
    _account: Account,
    id: &str,
    tag: JsonResult<Name>,
) -> Result<Tag> {
    let Name { name } = tag?.into_inner();
    ok(flows::update_tag(&db, id, &name)?.into())
}

#[delete("/tags/<id>")]
pub fn delete_tag(db: sqlite::Connections, _account: Account, id: &str) -> MessageResult {
    flows::delete_tag(&db, id)?;
    done("Tag deleted")
}

// ---   location zones   --- //

#[get("/location-zones")]
pub fn get_zones(db: sqlite::Connections) -> Result<Vec<LocationZone>> {
    let mut zones = db.shared()?.all_zones()?;
    zones.sort_by(|a, b| a.name.cmp(&b.name));
    ok(zones.into_iter().map(Into::into).collect())
}

#[get("/location-zones/<id>")]
pub fn get_zone(db: sqlite::Connections, id: &str) -> Result<LocationZone> {
    ok(usecases::get_zone(&db.shared()?, id)?.into())
}

#[post("/location-zones", format = "application/json", data = "<zone>")]
pub fn post_zone(
    db: sqlite::Connections,
    _account: Account,
    zone: JsonResult<Name>,
) -> Result<LocationZone> {
    let Name { name } = zone?.into_inner();
    ok(flows::create_zone(&db, &name)?.into())
}

#[put("/location-zones/<id>", format = "application/json", data = "<zone>")]
pub fn put_zone(
    db: sqlite::Connections,
    _account: Account,
    id: &str,
    zone: JsonResult<Name>,
) -> Result<LocationZone> {
    let Name { name } = zone?.into_inner();
    ok(flows::update_zone(&db, id, &name)?.into())
}

#[delete("/location-zones/<id>")]
pub fn delete_zone(db: sqlite::Connections, _account: Account, id: &str) -> MessageResult {
    flows::delete_zone(&db, id)?;
    done("Location zone deleted")
}
