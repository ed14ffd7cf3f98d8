pub use super::{
    category::*, event::*, id::*, review::*, tag::*, time::Timestamp, user::*, zone::*,
};
use time::macros::{date, time};

pub use self::event_builder::*;

pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

impl Builder for Event {
    type Build = EventBuild;
    fn build() -> EventBuild {
        EventBuild::new()
    }
}

impl Builder for User {
    type Build = UserBuild;
    fn build() -> UserBuild {
        UserBuild::new()
    }
}

mod event_builder {
    use super::*;

    #[derive(Debug)]
    pub struct EventBuild {
        event: Event,
    }

    impl EventBuild {
        pub(super) fn new() -> Self {
            let now = Timestamp::now();
            Self {
                event: Event {
                    id: Id::new(),
                    name: "Event".into(),
                    description: None,
                    date: date!(2030 - 01 - 01),
                    time: time!(18:00),
                    cost: 0.0,
                    image: None,
                    location: Location {
                        exact: None,
                        zone: "zone".into(),
                        latitude: None,
                        longitude: None,
                    },
                    categories: vec![],
                    reviews: vec![],
                    participants: vec![],
                    created_by: "owner".into(),
                    created_at: now,
                    updated_at: now,
                },
            }
        }

        pub fn id(mut self, id: &str) -> Self {
            self.event.id = id.into();
            self
        }

        pub fn name(mut self, name: &str) -> Self {
            self.event.name = name.into();
            self
        }

        pub fn date(mut self, date: time::Date) -> Self {
            self.event.date = date;
            self
        }

        pub fn cost(mut self, cost: f64) -> Self {
            self.event.cost = cost;
            self
        }

        pub fn image(mut self, image: &str) -> Self {
            self.event.image = Some(image.into());
            self
        }

        pub fn zone(mut self, zone: &str) -> Self {
            self.event.location.zone = zone.into();
            self
        }

        pub fn exact(mut self, exact: &str) -> Self {
            self.event.location.exact = Some(exact.into());
            self
        }

        pub fn coordinates(mut self, lat: f64, lng: f64) -> Self {
            self.event.location.latitude = Some(lat);
            self.event.location.longitude = Some(lng);
            self
        }

        pub fn categories(mut self, ids: &[&str]) -> Self {
            self.event.categories = ids.iter().map(|id| Id::from(*id)).collect();
            self
        }

        pub fn created_by(mut self, user_id: &str) -> Self {
            self.event.created_by = user_id.into();
            self
        }

        pub fn finish(self) -> Event {
            self.event
        }
    }

    #[derive(Debug)]
    pub struct UserBuild {
        user: User,
    }

    impl UserBuild {
        pub(super) fn new() -> Self {
            Self {
                user: User {
                    id: Id::new(),
                    email: "user@example.com".into(),
                    name: "User".into(),
                    role: Role::User,
                    bio: None,
                    interests: vec![],
                    profile_image: None,
                },
            }
        }

        pub fn id(mut self, id: &str) -> Self {
            self.user.id = id.into();
            self
        }

        pub fn email(mut self, email: &str) -> Self {
            self.user.email = email.into();
            self
        }

        pub fn name(mut self, name: &str) -> Self {
            self.user.name = name.into();
            self
        }

        pub fn role(mut self, role: Role) -> Self {
            self.user.role = role;
            self
        }

        pub fn finish(self) -> User {
            self.user
        }
    }
}
