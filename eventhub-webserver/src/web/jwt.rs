use std::{collections::HashSet, time::Duration};

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use eventhub_core::entities::{session::Session, user::User};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// The uid of the identity
    sub: String,
    email: String,
    role: String,
    /// Expiry time as Unix timestamp
    exp: u64,
}

struct Key {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Key {
    fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    fn random() -> Self {
        let secret = STANDARD.encode(rand::random::<[u8; 32]>());
        Self::new(&secret)
    }
}

/// Issues and verifies session tokens.
///
/// A token carries the uid, the email and the role of the user at the time
/// of login and stays valid until it expires or is blacklisted on logout.
pub struct JwtState {
    key: Key,
    time_valid: Duration,
    blacklist: Mutex<HashSet<String>>,
}

impl JwtState {
    /// Without a secret all tokens become invalid on restart.
    pub fn new(secret: Option<&str>, time_valid: Duration) -> Self {
        let key = match secret {
            Some(secret) => Key::new(secret),
            None => {
                info!("No session secret configured, using a random key");
                Key::random()
            }
        };
        Self {
            key,
            time_valid,
            blacklist: Mutex::new(HashSet::new()),
        }
    }

    pub fn generate_token(&self, user: &User) -> Result<String> {
        let now = u64::try_from(OffsetDateTime::now_utc().unix_timestamp())?;
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.to_string(),
            exp: now + self.time_valid.as_secs(),
        };
        Ok(encode(&Header::default(), &claims, &self.key.encoding_key)?)
    }

    pub fn validate_token(&self, token: &str) -> Result<Session> {
        if self.is_on_blacklist(token) {
            return Err(anyhow!("Token is no longer valid"));
        }
        let Claims {
            sub, email, role, ..
        } = self.decode(token)?;
        let role = role
            .parse()
            .map_err(|_| anyhow!("Invalid role '{role}' in token"))?;
        Ok(Session {
            user_id: sub.into(),
            email,
            role,
        })
    }

    pub fn blacklist_token(&self, token: String) {
        self.remove_invalid_tokens(); // do housekeeping
        self.lock().insert(token);
    }

    fn decode(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.key.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }

    fn is_on_blacklist(&self, token: &str) -> bool {
        self.lock().contains(token)
    }

    // Expired tokens are rejected anyway
    fn remove_invalid_tokens(&self) {
        let mut blacklist = self.lock();
        blacklist.retain(|token| self.decode(token).is_ok());
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.blacklist.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventhub_core::entities::{builders::*, user::Role};

    fn alice() -> User {
        User::build()
            .id("alice")
            .email("alice@example.com")
            .role(Role::Admin)
            .finish()
    }

    fn jwt_state() -> JwtState {
        JwtState::new(None, Duration::from_secs(24 * 60 * 60))
    }

    #[test]
    fn validation_works() {
        let jwt_state = jwt_state();
        let token = jwt_state.generate_token(&alice()).unwrap();
        let session = jwt_state.validate_token(&token).unwrap();
        assert_eq!(session.user_id.as_str(), "alice");
        assert_eq!(session.email, "alice@example.com");
        assert_eq!(session.role, Role::Admin);
        jwt_state.blacklist_token(token.clone());
        assert!(jwt_state.validate_token(&token).is_err())
    }

    #[test]
    fn tokens_of_other_keys_are_rejected() {
        let token = jwt_state().generate_token(&alice()).unwrap();
        assert!(jwt_state().validate_token(&token).is_err());
        let a = JwtState::new(Some("secret"), Duration::from_secs(60));
        let b = JwtState::new(Some("secret"), Duration::from_secs(60));
        let token = a.generate_token(&alice()).unwrap();
        assert!(b.validate_token(&token).is_ok());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let jwt_state = JwtState::new(Some("secret"), Duration::ZERO);
        let claims = Claims {
            sub: "alice".into(),
            email: "alice@example.com".into(),
            role: "user".into(),
            exp: 1,
        };
        let token = encode(&Header::default(), &claims, &jwt_state.key.encoding_key).unwrap();
        assert!(jwt_state.validate_token(&token).is_err());
    }

    #[test]
    fn invalid_tokens_are_removed() {
        let jwt_state = jwt_state();
        let token = jwt_state.generate_token(&alice()).unwrap();
        let invalid_token = "dubidubidu".to_string();
        jwt_state.blacklist_token(token.clone());
        jwt_state.blacklist_token(invalid_token.clone());
        assert!(jwt_state.is_on_blacklist(&token));
        assert!(jwt_state.is_on_blacklist(&invalid_token));
        jwt_state.remove_invalid_tokens();
        assert!(jwt_state.is_on_blacklist(&token));
        assert!(!jwt_state.is_on_blacklist(&invalid_token));
    }
}
