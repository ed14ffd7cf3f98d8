use std::cmp::Ordering;

use crate::entities::event::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventSortKey {
    #[default]
    Date,
    Cost,
    Name,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl std::str::FromStr for EventSortKey {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "cost" => Ok(Self::Cost),
            "name" => Ok(Self::Name),
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            _ => Err(()),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(()),
        }
    }
}

fn compare(a: &Event, b: &Event, key: EventSortKey) -> Ordering {
    match key {
        EventSortKey::Date => (a.date, a.time).cmp(&(b.date, b.time)),
        EventSortKey::Cost => a.cost.total_cmp(&b.cost),
        EventSortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        EventSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

/// Stable sort, ties keep their previous order.
pub fn sort_events(events: &mut [Event], key: EventSortKey, order: SortOrder) {
    events.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}
