use std::collections::HashMap;

use super::prelude::*;

/// An event together with the details of the entities it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct EventView {
    pub event: Event,
    pub category_details: Vec<Category>,
    pub zone_details: Option<LocationZone>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub category: Category,
    pub tag_details: Vec<Tag>,
}

// Dangling references are skipped instead of failing the request.
pub fn enrich_event<R>(repo: &R, event: Event) -> Result<EventView>
where
    R: CategoryRepo + ZoneRepo,
{
    let mut lookup = Lookup::new(repo);
    lookup.event_view(event)
}

pub fn enrich_events<R>(repo: &R, events: Vec<Event>) -> Result<Vec<EventView>>
where
    R: CategoryRepo + ZoneRepo,
{
    // Categories and zones are shared by many events of a list
    let mut lookup = Lookup::new(repo);
    events.into_iter().map(|e| lookup.event_view(e)).collect()
}

pub fn enrich_category<R: TagRepo>(repo: &R, category: Category) -> Result<CategoryView> {
    let mut tag_details = Vec::with_capacity(category.tags.len());
    for id in &category.tags {
        match repo.try_get_tag(id.as_str())? {
            Some(tag) => tag_details.push(tag),
            None => log::debug!("Skipping dangling tag {} of category {}", id, category.id),
        }
    }
    Ok(CategoryView {
        category,
        tag_details,
    })
}

pub fn enrich_categories<R: TagRepo>(
    repo: &R,
    categories: Vec<Category>,
) -> Result<Vec<CategoryView>> {
    categories
        .into_iter()
        .map(|c| enrich_category(repo, c))
        .collect()
}

struct Lookup<'r, R> {
    repo: &'r R,
    categories: HashMap<Id, Option<Category>>,
    zones: HashMap<Id, Option<LocationZone>>,
}

impl<'r, R> Lookup<'r, R>
where
    R: CategoryRepo + ZoneRepo,
{
    fn new(repo: &'r R) -> Self {
        Self {
            repo,
            categories: HashMap::new(),
            zones: HashMap::new(),
        }
    }

    fn category(&mut self, id: &Id) -> Result<Option<Category>> {
        if let Some(cached) = self.categories.get(id) {
            return Ok(cached.clone());
        }
        let category = self.repo.try_get_category(id.as_str())?;
        self.categories.insert(id.clone(), category.clone());
        Ok(category)
    }

    fn zone(&mut self, id: &Id) -> Result<Option<LocationZone>> {
        if let Some(cached) = self.zones.get(id) {
            return Ok(cached.clone());
        }
        let zone = self.repo.try_get_zone(id.as_str())?;
        self.zones.insert(id.clone(), zone.clone());
        Ok(zone)
    }

    fn event_view(&mut self, event: Event) -> Result<EventView> {
        let mut category_details = Vec::with_capacity(event.categories.len());
        for id in &event.categories {
            match self.category(id)? {
                Some(category) => category_details.push(category),
                None => log::debug!("Skipping dangling category {} of event {}", id, event.id),
            }
        }
        let zone_details = self.zone(&event.location.zone)?;
        if zone_details.is_none() {
            log::debug!(
                "Location zone {} of event {} does not exist",
                event.location.zone,
                event.id
            );
        }
        Ok(EventView {
            event,
            category_details,
            zone_details,
        })
    }
}
