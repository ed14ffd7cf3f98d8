use super::*;
use eventhub_entities as e;

impl From<e::entity_ref::EntityRef> for EntityRef {
    fn from(from: e::entity_ref::EntityRef) -> Self {
        match from {
            e::entity_ref::EntityRef::ById(id) => Self::Id(id.into()),
            e::entity_ref::EntityRef::ByName(name) => Self::Name(name),
        }
    }
}

impl From<EntityRef> for e::entity_ref::EntityRef {
    fn from(from: EntityRef) -> Self {
        match from {
            EntityRef::Id(id) => Self::ById(id.into()),
            EntityRef::Name(name) => Self::ByName(name),
        }
    }
}

impl From<e::user::Role> for UserRole {
    fn from(from: e::user::Role) -> Self {
        use e::user::Role as E;
        match from {
            E::User => Self::User,
            E::Admin => Self::Admin,
        }
    }
}

impl From<UserRole> for e::user::Role {
    fn from(from: UserRole) -> Self {
        match from {
            UserRole::User => Self::User,
            UserRole::Admin => Self::Admin,
        }
    }
}

impl From<e::user::User> for User {
    fn from(from: e::user::User) -> Self {
        let e::user::User {
            id,
            email,
            name,
            role,
            bio,
            interests,
            profile_image,
        } = from;
        Self {
            id: id.into(),
            email,
            name,
            role: role.into(),
            bio,
            interests,
            profile_image,
        }
    }
}

impl From<e::event::Location> for Location {
    fn from(from: e::event::Location) -> Self {
        let e::event::Location {
            exact,
            zone,
            latitude,
            longitude,
        } = from;
        Self {
            exact,
            zone: zone.into(),
            latitude,
            longitude,
        }
    }
}

impl From<e::event::Participant> for Participant {
    fn from(from: e::event::Participant) -> Self {
        Self {
            user_id: from.user_id.into(),
            user_name: from.user_name,
            user_email: from.user_email,
            joined_at: from.joined_at.into(),
        }
    }
}

impl From<e::review::Review> for Review {
    fn from(from: e::review::Review) -> Self {
        let e::review::Review {
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
            id: id.into(),
            user_id: user_id.into(),
            user_name,
            profile_picture,
            event_id: event_id.into(),
            grade: grade.into(),
            review_text,
            timestamp: timestamp.into(),
        }
    }
}

impl Event {
    /// Combines an event with the details of the entities it refers to.
    pub fn from_entities(
        event: e::event::Event,
        category_details: Vec<e::category::Category>,
        zone_details: Option<e::zone::LocationZone>,
    ) -> Self {
        let e::event::Event {
            id,
            name,
            description,
            date,
            time,
            cost,
            image,
            location,
            categories,
            reviews,
            participants,
            created_by,
            created_at,
            updated_at,
        } = event;
        Self {
            id: id.into(),
            name,
            description,
            date: e::time::format_date(date),
            time: e::time::format_time(time),
            cost,
            image,
            location: location.into(),
            categories: categories.into_iter().map(Into::into).collect(),
            reviews: reviews.into_iter().map(Into::into).collect(),
            participants: participants.into_iter().map(Into::into).collect(),
            created_by: created_by.into(),
            created_at: created_at.into(),
            updated_at: updated_at.into(),
            category_details: category_details.into_iter().map(Into::into).collect(),
            zone_details: zone_details.map(Into::into),
        }
    }
}

impl From<e::category::Category> for Category {
    fn from(from: e::category::Category) -> Self {
        let e::category::Category {
            id,
            name,
            image,
            tags,
        } = from;
        Self {
            id: id.into(),
            category_name: name,
            category_image: image,
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<e::tag::Tag> for Tag {
    fn from(from: e::tag::Tag) -> Self {
        Self {
            id: from.id.into(),
            name: from.name,
        }
    }
}

impl From<e::zone::LocationZone> for LocationZone {
    fn from(from: e::zone::LocationZone) -> Self {
        Self {
            id: from.id.into(),
            name: from.name,
        }
    }
}

impl From<e::booking::BookingStatus> for BookingStatus {
    fn from(from: e::booking::BookingStatus) -> Self {
        match from {
            e::booking::BookingStatus::Confirmed => Self::Confirmed,
        }
    }
}

impl From<e::booking::Booking> for Booking {
    fn from(from: e::booking::Booking) -> Self {
        let e::booking::Booking {
            id,
            event_id,
            user_id,
            status,
            booking_date,
        } = from;
        Self {
            id: id.into(),
            event_id: event_id.into(),
            user_id: user_id.into(),
            status: status.into(),
            booking_date: booking_date.into(),
        }
    }
}
