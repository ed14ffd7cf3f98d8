use std::{io, path::Path};

use eventhub_core::{
    entities::id::Id,
    gateways::identity::{IdentityError, IdentityGateway, Result},
};
use jfs::Store;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Credentials stored as one JSON document per identity.
pub struct LocalIdentityProvider {
    json_store: Store,
    // Serializes sign up, so that an email address
    // can only be registered once.
    write_lock: Mutex<()>,
}

#[derive(Debug, Deserialize, Serialize)]
struct JsonIdentity {
    email: String,
    password_hash: String,
}

impl LocalIdentityProvider {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self {
            json_store,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        self.json_store.path()
    }

    fn find_by_email(&self, email: &str) -> Result<Option<(Id, JsonIdentity)>> {
        let identities = self
            .json_store
            .all::<JsonIdentity>()
            .map_err(|err| IdentityError::Other(err.into()))?;
        Ok(identities
            .into_iter()
            .find(|(_, identity)| identity.email == email)
            .map(|(uid, identity)| (Id::from(uid), identity)))
    }

    fn load(&self, uid: &Id) -> Result<JsonIdentity> {
        self.json_store.get(uid.as_str()).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                IdentityError::NotFound
            } else {
                IdentityError::Other(err.into())
            }
        })
    }

    fn save(&self, uid: &Id, identity: &JsonIdentity) -> Result<()> {
        self.json_store
            .save_with_id(identity, uid.as_str())
            .map_err(|err| IdentityError::Other(err.into()))?;
        Ok(())
    }
}

fn hash_password(password: &str) -> Result<String> {
    pwhash::bcrypt::hash(password).map_err(|err| IdentityError::Other(err.into()))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl IdentityGateway for LocalIdentityProvider {
    fn sign_up(&self, email: &str, password: &str) -> Result<Id> {
        let email = normalize_email(email);
        let password_hash = hash_password(password)?;
        let _guard = self.write_lock.lock();
        if self.find_by_email(&email)?.is_some() {
            return Err(IdentityError::EmailTaken);
        }
        let uid = Id::new();
        self.save(
            &uid,
            &JsonIdentity {
                email,
                password_hash,
            },
        )?;
        log::debug!("Created identity {uid}");
        Ok(uid)
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<Id> {
        let email = normalize_email(email);
        let (uid, identity) = self
            .find_by_email(&email)?
            .ok_or(IdentityError::InvalidCredentials)?;
        if !pwhash::bcrypt::verify(password, &identity.password_hash) {
            return Err(IdentityError::InvalidCredentials);
        }
        Ok(uid)
    }

    fn update_password(&self, uid: &Id, password: &str) -> Result<()> {
        let password_hash = hash_password(password)?;
        let _guard = self.write_lock.lock();
        let mut identity = self.load(uid)?;
        identity.password_hash = password_hash;
        self.save(uid, &identity)
    }

    fn delete(&self, uid: &Id) -> Result<()> {
        let _guard = self.write_lock.lock();
        self.load(uid)?;
        self.json_store
            .delete(uid.as_str())
            .map_err(|err| IdentityError::Other(err.into()))?;
        log::debug!("Deleted identity {uid}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> (tempfile::TempDir, LocalIdentityProvider) {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalIdentityProvider::try_new(dir.path()).unwrap();
        (dir, provider)
    }

    #[test]
    fn sign_up_and_sign_in() {
        let (_dir, provider) = provider();
        let uid = provider.sign_up("Alice@example.com", "secret").unwrap();
        assert_eq!(provider.sign_in("alice@example.com", "secret").unwrap(), uid);
        assert!(matches!(
            provider.sign_in("alice@example.com", "wrong"),
            Err(IdentityError::InvalidCredentials)
        ));
        assert!(matches!(
            provider.sign_in("bob@example.com", "secret"),
            Err(IdentityError::InvalidCredentials)
        ));
    }

    #[test]
    fn passwords_are_not_stored_in_plain_text() {
        let (_dir, provider) = provider();
        let uid = provider.sign_up("alice@example.com", "secret").unwrap();
        let stored = provider.load(&uid).unwrap();
        assert_ne!(stored.password_hash, "secret");
    }

    #[test]
    fn email_can_only_be_registered_once() {
        let (_dir, provider) = provider();
        provider.sign_up("alice@example.com", "secret").unwrap();
        assert!(matches!(
            provider.sign_up(" alice@example.com", "other-secret"),
            Err(IdentityError::EmailTaken)
        ));
    }

    #[test]
    fn update_password_and_delete() {
        let (_dir, provider) = provider();
        let uid = provider.sign_up("alice@example.com", "secret").unwrap();
        provider.update_password(&uid, "new-secret").unwrap();
        assert!(provider.sign_in("alice@example.com", "secret").is_err());
        assert_eq!(
            provider.sign_in("alice@example.com", "new-secret").unwrap(),
            uid
        );
        provider.delete(&uid).unwrap();
        assert!(matches!(provider.delete(&uid), Err(IdentityError::NotFound)));
        assert!(provider.sign_in("alice@example.com", "new-secret").is_err());
    }
}
