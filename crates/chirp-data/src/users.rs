//! Registration and login against the `users` collection.
//!
//! Passwords are stored and compared as plain text. This is a toy credential
//! store and offers no protection for the stored secrets.

use std::collections::BTreeMap;
use std::rc::Rc;

use chirp_core::error::{FeedError, Result};
use tracing::{debug, info};

use crate::store::{load_collection, update_collection, Storage, USERS};

type Credentials = BTreeMap<String, String>;

pub struct UserManager {
    storage: Rc<dyn Storage>,
}

impl UserManager {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Store a new username/password pair. Existing users are never
    /// overwritten.
    pub fn register(&self, username: &str, password: &str) -> Result<()> {
        update_collection(&*self.storage, USERS, |users: &mut Credentials| {
            if users.contains_key(username) {
                return Err(FeedError::DuplicateUser(username.to_string()));
            }
            users.insert(username.to_string(), password.to_string());
            Ok(())
        })?;

        info!(username, "user registered");
        Ok(())
    }

    /// Check credentials and return the authenticated username.
    pub fn login(&self, username: &str, password: &str) -> Result<String> {
        let users: Credentials = load_collection(&*self.storage, USERS)?;
        match users.get(username) {
            Some(stored) if stored == password => {
                debug!(username, "login succeeded");
                Ok(username.to_string())
            }
            _ => {
                debug!(username, "login rejected");
                Err(FeedError::Auth)
            }
        }
    }

    pub fn exists(&self, username: &str) -> Result<bool> {
        let users: Credentials = load_collection(&*self.storage, USERS)?;
        Ok(users.contains_key(username))
    }
}
