use std::collections::HashSet;

use time::Date;

use super::prelude::*;
use crate::util::sort::{sort_events, EventSortKey, SortOrder};

pub const MAX_RESULT_LIMIT: usize = 2000;

#[rustfmt::skip]
#[derive(Clone, Debug, Default)]
pub struct EventQuery {
    pub category   : Option<Id>,
    pub zone       : Option<Id>,
    pub tag        : Option<Id>,
    pub date       : Option<Date>,
    pub min_cost   : Option<f64>,
    pub max_cost   : Option<f64>,
    pub sort_by    : EventSortKey,
    pub sort_order : SortOrder,
    pub limit      : Option<usize>,
}

pub fn validate_and_adjust_query_limit(limit: usize) -> Result<usize> {
    if limit > MAX_RESULT_LIMIT {
        log::info!(
            "Requested limit {} exceeds maximum limit {} for event search results",
            limit,
            MAX_RESULT_LIMIT
        );
        Ok(MAX_RESULT_LIMIT)
    } else if limit == 0 {
        log::warn!("Invalid search limit: {}", limit);
        Err(Error::InvalidLimit)
    } else {
        Ok(limit)
    }
}

/// Filters and sorts all events in memory.
pub fn query_events<R>(repo: &R, query: EventQuery) -> Result<Vec<Event>>
where
    R: EventRepo + CategoryRepo,
{
    let EventQuery {
        category,
        zone,
        tag,
        date,
        min_cost,
        max_cost,
        sort_by,
        sort_order,
        limit,
    } = query;
    if let (Some(min), Some(max)) = (min_cost, max_cost) {
        if min > max {
            return Err(Error::InvalidCost);
        }
    }
    let limit = limit
        .map(validate_and_adjust_query_limit)
        .transpose()?
        .unwrap_or(MAX_RESULT_LIMIT);
    let tagged_categories: Option<HashSet<Id>> = match tag {
        Some(tag) => Some(
            repo.all_categories()?
                .into_iter()
                .filter(|c| c.has_tag(&tag))
                .map(|c| c.id)
                .collect(),
        ),
        None => None,
    };
    let mut events: Vec<_> = repo
        .all_events()?
        .into_iter()
        .filter(|e| category.as_ref().map(|c| e.has_category(c)).unwrap_or(true))
        .filter(|e| zone.as_ref().map(|z| &e.location.zone == z).unwrap_or(true))
        .filter(|e| date.map(|d| e.date == d).unwrap_or(true))
        .filter(|e| min_cost.map(|min| e.cost >= min).unwrap_or(true))
        .filter(|e| max_cost.map(|max| e.cost <= max).unwrap_or(true))
        .filter(|e| {
            tagged_categories
                .as_ref()
                .map(|ids| e.categories.iter().any(|c| ids.contains(c)))
                .unwrap_or(true)
        })
        .collect();
    sort_events(&mut events, sort_by, sort_order);
    events.truncate(limit);
    Ok(events)
}

pub fn events_created_by<R: EventRepo>(repo: &R, session: &Session) -> Result<Vec<Event>> {
    let mut events = repo.events_created_by(session.user_id.as_str())?;
    sort_events(&mut events, EventSortKey::Date, SortOrder::Ascending);
    Ok(events)
}
