use std::ops::Deref;

use eventhub_core::{
    entities::session::Session,
    gateways::{identity::IdentityGateway, image::ImageGateway},
};
use rocket::{
    http::Status,
    outcome::try_outcome,
    request::{FromRequest, Outcome, Request},
    State,
};

use crate::web::jwt;

// The admin frontend hands the token over in the URL.
const TOKEN_QUERY_PARAM: &str = "token";

fn get_bearer_token(auth_header_val: &str) -> Option<&str> {
    match auth_header_val.split_once(' ') {
        Some(("Bearer", token)) if !token.trim().is_empty() => Some(token.trim()),
        _ => None,
    }
}

/// The tokens a request carries, verified or not.
#[derive(Debug)]
pub struct Auth {
    bearer_tokens: Vec<String>,
}

impl Auth {
    pub fn bearer_tokens(&self) -> &[String] {
        &self.bearer_tokens
    }

    fn bearer_tokens_from_request(request: &Request) -> Vec<String> {
        let mut tokens: Vec<String> = request
            .headers()
            .get("Authorization")
            .filter_map(get_bearer_token)
            .map(ToOwned::to_owned)
            .collect();
        if let Some(Ok(token)) = request.query_value::<String>(TOKEN_QUERY_PARAM) {
            tokens.push(token);
        }
        tokens
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Auth {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(Self {
            bearer_tokens: Self::bearer_tokens_from_request(request),
        })
    }
}

/// The verified session of the caller.
///
/// Requests without a valid token are rejected with 401.
#[derive(Debug)]
pub struct Account(Session);

impl Account {
    pub fn session(&self) -> &Session {
        &self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Account {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth = try_outcome!(Auth::from_request(request).await);
        let jwt_state = try_outcome!(request.guard::<&State<jwt::JwtState>>().await);
        let session = auth
            .bearer_tokens()
            .iter()
            .find_map(|token| match jwt_state.validate_token(token) {
                Ok(session) => Some(session),
                Err(err) => {
                    debug!("Rejected session token: {err}");
                    None
                }
            });
        match session {
            Some(session) => Outcome::Success(Account(session)),
            None => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}

pub struct Identity(pub Box<dyn IdentityGateway + Send + Sync>);

impl Deref for Identity {
    type Target = dyn IdentityGateway + Send + Sync;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

pub struct Images(pub Box<dyn ImageGateway + Send + Sync>);

impl Deref for Images {
    type Target = dyn ImageGateway + Send + Sync;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bearer_tokens() {
        assert_eq!(get_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(get_bearer_token("Bearer "), None);
        assert_eq!(get_bearer_token("Basic abc"), None);
        assert_eq!(get_bearer_token("abc"), None);
    }
}
