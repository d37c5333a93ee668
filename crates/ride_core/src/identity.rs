//! User identity persisted across reloads in an opaque key-value store.
//!
//! This mirrors the login flow of the mock app: the phone number is taken at
//! face value (the OTP screen is client-side theatre, by explicit non-goal)
//! and a fabricated user record is serialized under a fixed key.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const USER_KEY: &str = "rapido_user";
pub const PERMISSIONS_KEY: &str = "rapido_permissions";

/// Opaque string key-value storage, the only persistence this crate touches.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub phone_number: String,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("stored user record is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Login/permission state backed by a [`KeyValueStore`].
#[derive(Debug)]
pub struct IdentitySession<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> IdentitySession<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The persisted user, if any.
    pub fn load(&self) -> Result<Option<UserRecord>, IdentityError> {
        match self.store.get(USER_KEY) {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.get(USER_KEY).is_some()
    }

    /// Creates and persists a user record for the given phone number.
    pub fn login<R: Rng>(
        &mut self,
        phone_number: &str,
        rng: &mut R,
    ) -> Result<UserRecord, IdentityError> {
        let suffix: String = rng
            .sample_iter(rand::distributions::Alphanumeric)
            .take(9)
            .map(|b| (b as char).to_ascii_lowercase())
            .collect();
        let user = UserRecord {
            id: format!("user_{suffix}"),
            phone_number: phone_number.to_string(),
            name: "User".to_string(),
        };
        self.store.set(USER_KEY, serde_json::to_string(&user)?);
        Ok(user)
    }

    pub fn logout(&mut self) {
        self.store.remove(USER_KEY);
    }

    pub fn grant_permissions(&mut self) {
        self.store.set(PERMISSIONS_KEY, "true".to_string());
    }

    pub fn has_permissions(&self) -> bool {
        self.store.get(PERMISSIONS_KEY).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session() -> IdentitySession<InMemoryStore> {
        IdentitySession::new(InMemoryStore::default())
    }

    #[test]
    fn login_persists_a_loadable_record() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(!session.is_authenticated());

        let user = session.login("9876543210", &mut rng).expect("login");
        assert!(user.id.starts_with("user_"));
        assert_eq!(user.id.len(), "user_".len() + 9);

        let loaded = session.load().expect("load").expect("record present");
        assert_eq!(loaded, user);
        assert!(session.is_authenticated());
    }

    #[test]
    fn logout_removes_the_record_but_keeps_permissions() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(1);
        session.login("9876543210", &mut rng).expect("login");
        session.grant_permissions();

        session.logout();

        assert!(!session.is_authenticated());
        assert!(session.load().expect("load").is_none());
        assert!(session.has_permissions());
    }

    #[test]
    fn corrupt_record_surfaces_as_an_error() {
        let mut store = InMemoryStore::default();
        store.set(USER_KEY, "not json".to_string());
        let session = IdentitySession::new(store);
        assert!(matches!(session.load(), Err(IdentityError::Corrupt(_))));
    }
}
