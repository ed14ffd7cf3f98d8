use std::cell::RefCell;

use super::prelude::*;
use crate::gateways::identity::{IdentityError, IdentityGateway, Result as IdentityResult};

type RepoResult<T> = std::result::Result<T, RepoError>;

trait Key {
    fn key(&self) -> &str;
}

impl Key for User {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for Event {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for Category {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for Tag {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for LocationZone {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for Review {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for Booking {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

/// In-memory repositories with the same uniqueness rules as the database.
#[derive(Default)]
pub struct MockDb {
    pub users: RefCell<Vec<User>>,
    pub events: RefCell<Vec<Event>>,
    pub categories: RefCell<Vec<Category>>,
    pub tags: RefCell<Vec<Tag>>,
    pub zones: RefCell<Vec<LocationZone>>,
    pub reviews: RefCell<Vec<Review>>,
    pub bookings: RefCell<Vec<Booking>>,
}

fn get<T: Clone + Key>(objects: &[T], id: &str) -> RepoResult<T> {
    try_get(objects, id).ok_or(RepoError::NotFound)
}

fn try_get<T: Clone + Key>(objects: &[T], id: &str) -> Option<T> {
    objects.iter().find(|x| x.key() == id).cloned()
}

fn create<T: Clone + Key>(objects: &mut Vec<T>, e: T) -> RepoResult<()> {
    if objects.iter().any(|x| x.key() == e.key()) {
        return Err(RepoError::AlreadyExists);
    }
    objects.push(e);
    Ok(())
}

fn update<T: Clone + Key>(objects: &mut [T], e: &T) -> RepoResult<()> {
    let x = objects
        .iter_mut()
        .find(|x| x.key() == e.key())
        .ok_or(RepoError::NotFound)?;
    *x = e.clone();
    Ok(())
}

fn delete<T: Clone + Key>(objects: &mut Vec<T>, id: &str) -> RepoResult<()> {
    let len = objects.len();
    objects.retain(|x| x.key() != id);
    if objects.len() == len {
        return Err(RepoError::NotFound);
    }
    Ok(())
}

impl UserRepo for MockDb {
    fn create_user(&self, user: &User) -> RepoResult<()> {
        if self.users.borrow().iter().any(|u| u.email == user.email) {
            return Err(RepoError::AlreadyExists);
        }
        create(&mut self.users.borrow_mut(), user.clone())
    }
    fn update_user(&self, user: &User) -> RepoResult<()> {
        update(&mut self.users.borrow_mut(), user)
    }
    fn delete_user(&self, id: &str) -> RepoResult<()> {
        delete(&mut self.users.borrow_mut(), id)
    }
    fn get_user(&self, id: &str) -> RepoResult<User> {
        get(&self.users.borrow(), id)
    }
    fn try_get_user(&self, id: &str) -> RepoResult<Option<User>> {
        Ok(try_get(&self.users.borrow(), id))
    }
    fn try_get_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .borrow()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
    fn all_users(&self) -> RepoResult<Vec<User>> {
        Ok(self.users.borrow().clone())
    }
}

impl EventRepo for MockDb {
    fn create_event(&self, event: &Event) -> RepoResult<()> {
        create(&mut self.events.borrow_mut(), event.clone())
    }
    fn update_event(&self, event: &Event) -> RepoResult<()> {
        update(&mut self.events.borrow_mut(), event)
    }
    fn delete_event(&self, id: &str) -> RepoResult<()> {
        delete(&mut self.events.borrow_mut(), id)
    }
    fn get_event(&self, id: &str) -> RepoResult<Event> {
        get(&self.events.borrow(), id)
    }
    fn try_get_event(&self, id: &str) -> RepoResult<Option<Event>> {
        Ok(try_get(&self.events.borrow(), id))
    }
    fn all_events(&self) -> RepoResult<Vec<Event>> {
        Ok(self.events.borrow().clone())
    }
    fn events_created_by(&self, user_id: &str) -> RepoResult<Vec<Event>> {
        Ok(self
            .events
            .borrow()
            .iter()
            .filter(|e| e.created_by == *user_id)
            .cloned()
            .collect())
    }
}

impl CategoryRepo for MockDb {
    fn create_category(&self, category: &Category) -> RepoResult<()> {
        if self
            .categories
            .borrow()
            .iter()
            .any(|c| c.name == category.name)
        {
            return Err(RepoError::AlreadyExists);
        }
        create(&mut self.categories.borrow_mut(), category.clone())
    }
    fn update_category(&self, category: &Category) -> RepoResult<()> {
        update(&mut self.categories.borrow_mut(), category)
    }
    fn delete_category(&self, id: &str) -> RepoResult<()> {
        delete(&mut self.categories.borrow_mut(), id)
    }
    fn get_category(&self, id: &str) -> RepoResult<Category> {
        get(&self.categories.borrow(), id)
    }
    fn try_get_category(&self, id: &str) -> RepoResult<Option<Category>> {
        Ok(try_get(&self.categories.borrow(), id))
    }
    fn try_get_category_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        Ok(self
            .categories
            .borrow()
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }
    fn all_categories(&self) -> RepoResult<Vec<Category>> {
        Ok(self.categories.borrow().clone())
    }
}

impl TagRepo for MockDb {
    fn create_tag(&self, tag: &Tag) -> RepoResult<()> {
        if self.tags.borrow().iter().any(|t| t.name == tag.name) {
            return Err(RepoError::AlreadyExists);
        }
        create(&mut self.tags.borrow_mut(), tag.clone())
    }
    fn update_tag(&self, tag: &Tag) -> RepoResult<()> {
        update(&mut self.tags.borrow_mut(), tag)
    }
    fn delete_tag(&self, id: &str) -> RepoResult<()> {
        delete(&mut self.tags.borrow_mut(), id)
    }
    fn get_tag(&self, id: &str) -> RepoResult<Tag> {
        get(&self.tags.borrow(), id)
    }
    fn try_get_tag(&self, id: &str) -> RepoResult<Option<Tag>> {
        Ok(try_get(&self.tags.borrow(), id))
    }
    fn try_get_tag_by_name(&self, name: &str) -> RepoResult<Option<Tag>> {
        Ok(self.tags.borrow().iter().find(|t| t.name == name).cloned())
    }
    fn all_tags(&self) -> RepoResult<Vec<Tag>> {
        Ok(self.tags.borrow().clone())
    }
}

impl ZoneRepo for MockDb {
    fn create_zone(&self, zone: &LocationZone) -> RepoResult<()> {
        if self.zones.borrow().iter().any(|z| z.name == zone.name) {
            return Err(RepoError::AlreadyExists);
        }
        create(&mut self.zones.borrow_mut(), zone.clone())
    }
    fn update_zone(&self, zone: &LocationZone) -> RepoResult<()> {
        update(&mut self.zones.borrow_mut(), zone)
    }
    fn delete_zone(&self, id: &str) -> RepoResult<()> {
        delete(&mut self.zones.borrow_mut(), id)
    }
    fn get_zone(&self, id: &str) -> RepoResult<LocationZone> {
        get(&self.zones.borrow(), id)
    }
    fn try_get_zone(&self, id: &str) -> RepoResult<Option<LocationZone>> {
        Ok(try_get(&self.zones.borrow(), id))
    }
    fn try_get_zone_by_name(&self, name: &str) -> RepoResult<Option<LocationZone>> {
        Ok(self.zones.borrow().iter().find(|z| z.name == name).cloned())
    }
    fn all_zones(&self) -> RepoResult<Vec<LocationZone>> {
        Ok(self.zones.borrow().clone())
    }
}

impl ReviewRepo for MockDb {
    fn create_review(&self, review: &Review) -> RepoResult<()> {
        if self
            .reviews
            .borrow()
            .iter()
            .any(|r| r.user_id == review.user_id && r.event_id == review.event_id)
        {
            return Err(RepoError::AlreadyExists);
        }
        create(&mut self.reviews.borrow_mut(), review.clone())
    }
    fn update_review(&self, review: &Review) -> RepoResult<()> {
        update(&mut self.reviews.borrow_mut(), review)
    }
    fn delete_review(&self, id: &str) -> RepoResult<()> {
        delete(&mut self.reviews.borrow_mut(), id)
    }
    fn get_review(&self, id: &str) -> RepoResult<Review> {
        get(&self.reviews.borrow(), id)
    }
    fn try_get_review_of_user_for_event(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> RepoResult<Option<Review>> {
        Ok(self
            .reviews
            .borrow()
            .iter()
            .find(|r| r.user_id == *user_id && r.event_id == *event_id)
            .cloned())
    }
    fn load_reviews_of_event(&self, event_id: &str) -> RepoResult<Vec<Review>> {
        Ok(self
            .reviews
            .borrow()
            .iter()
            .filter(|r| r.event_id == *event_id)
            .cloned()
            .collect())
    }
    fn load_reviews_of_user(&self, user_id: &str) -> RepoResult<Vec<Review>> {
        Ok(self
            .reviews
            .borrow()
            .iter()
            .filter(|r| r.user_id == *user_id)
            .cloned()
            .collect())
    }
}

impl BookingRepo for MockDb {
    fn create_booking(&self, booking: &Booking) -> RepoResult<()> {
        if self
            .bookings
            .borrow()
            .iter()
            .any(|b| b.user_id == booking.user_id && b.event_id == booking.event_id)
        {
            return Err(RepoError::AlreadyExists);
        }
        create(&mut self.bookings.borrow_mut(), booking.clone())
    }
    fn delete_booking(&self, id: &str) -> RepoResult<()> {
        delete(&mut self.bookings.borrow_mut(), id)
    }
    fn get_booking(&self, id: &str) -> RepoResult<Booking> {
        get(&self.bookings.borrow(), id)
    }
    fn try_get_booking_of_user_for_event(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> RepoResult<Option<Booking>> {
        Ok(self
            .bookings
            .borrow()
            .iter()
            .find(|b| b.user_id == *user_id && b.event_id == *event_id)
            .cloned())
    }
    fn load_bookings_of_user(&self, user_id: &str) -> RepoResult<Vec<Booking>> {
        Ok(self
            .bookings
            .borrow()
            .iter()
            .filter(|b| b.user_id == *user_id)
            .cloned()
            .collect())
    }
    fn load_bookings_of_event(&self, event_id: &str) -> RepoResult<Vec<Booking>> {
        Ok(self
            .bookings
            .borrow()
            .iter()
            .filter(|b| b.event_id == *event_id)
            .cloned()
            .collect())
    }
}

pub fn session(user_id: &str, role: Role) -> Session {
    Session {
        user_id: user_id.into(),
        email: format!("{user_id}@example.com"),
        role,
    }
}

impl MockDb {
    pub fn with_user(self, id: &str, name: &str) -> Self {
        self.users.borrow_mut().push(User {
            id: id.into(),
            email: format!("{id}@example.com"),
            name: name.into(),
            role: Role::User,
            bio: None,
            interests: vec![],
            profile_image: None,
        });
        self
    }

    pub fn with_event(self, event: Event) -> Self {
        self.events.borrow_mut().push(event);
        self
    }
}

/// Identities as `(uid, email, password)`.
#[derive(Default)]
pub struct MockIdentity {
    pub identities: RefCell<Vec<(Id, String, String)>>,
}

impl IdentityGateway for MockIdentity {
    fn sign_up(&self, email: &str, password: &str) -> IdentityResult<Id> {
        let mut identities = self.identities.borrow_mut();
        if identities.iter().any(|(_, e, _)| e == email) {
            return Err(IdentityError::EmailTaken);
        }
        let uid = Id::new();
        identities.push((uid.clone(), email.into(), password.into()));
        Ok(uid)
    }
    fn sign_in(&self, email: &str, password: &str) -> IdentityResult<Id> {
        self.identities
            .borrow()
            .iter()
            .find(|(_, e, p)| e == email && p == password)
            .map(|(uid, _, _)| uid.clone())
            .ok_or(IdentityError::InvalidCredentials)
    }
    fn update_password(&self, uid: &Id, password: &str) -> IdentityResult<()> {
        let mut identities = self.identities.borrow_mut();
        let identity = identities
            .iter_mut()
            .find(|(id, _, _)| id == uid)
            .ok_or(IdentityError::NotFound)?;
        identity.2 = password.into();
        Ok(())
    }
    fn delete(&self, uid: &Id) -> IdentityResult<()> {
        let mut identities = self.identities.borrow_mut();
        let len = identities.len();
        identities.retain(|(id, _, _)| id != uid);
        if identities.len() == len {
            return Err(IdentityError::NotFound);
        }
        Ok(())
    }
}
