//! Read-only access to the logged-in user

use crate::core::error::SessionError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/// Session key holding the JSON-encoded user
pub const USER_KEY: &str = "user";

/// Key-value session storage, written by the login flow
pub trait SessionStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
}

/// Kind of account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

/// The user stored in the session by the login flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub email: String,
    #[serde(default)]
    pub status: String,
}

impl CurrentUser {
    pub fn new(user_type: UserType, email: impl Into<String>) -> Result<Self, SessionError> {
        let user = Self {
            user_type,
            email: email.into(),
            status: "connected".to_string(),
        };
        user.validate()?;
        Ok(user)
    }

    /// Read and validate the user stored under [`USER_KEY`]
    pub fn from_store(store: &dyn SessionStore) -> Result<Self, SessionError> {
        let raw = store
            .get_item(USER_KEY)
            .ok_or_else(|| SessionError::MissingEntry {
                key: USER_KEY.to_string(),
            })?;

        let user: CurrentUser =
            serde_json::from_str(&raw).map_err(|e| SessionError::InvalidUser {
                message: e.to_string(),
            })?;
        user.validate()?;
        Ok(user)
    }

    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }

    fn validate(&self) -> Result<(), SessionError> {
        if is_valid_email(&self.email) {
            Ok(())
        } else {
            Err(SessionError::InvalidUser {
                message: format!("'{}' is not an email address", self.email),
            })
        }
    }
}

// Fixture accounts such as "a@a" have no TLD, so the domain part stays loose
fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+$").expect("valid regex"));
    regex.is_match(email)
}

/// In-memory session store for tests and development
#[cfg(feature = "in-memory")]
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    items: Arc<RwLock<HashMap<String, String>>>,
}

#[cfg(feature = "in-memory")]
impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, as the login flow would
    pub fn set_item(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut items) = self.items.write() {
            items.insert(key.into(), value.into());
        }
    }

    /// Convenience for seeding the `"user"` entry
    pub fn with_user(user: &CurrentUser) -> Self {
        let store = Self::new();
        if let Ok(raw) = serde_json::to_string(user) {
            store.set_item(USER_KEY, raw);
        }
        store
    }
}

#[cfg(feature = "in-memory")]
impl SessionStore for InMemorySessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().ok()?.get(key).cloned()
    }
}
