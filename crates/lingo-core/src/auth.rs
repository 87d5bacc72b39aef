//! Credential lookup. The session only asks a [`CredentialVerifier`], so a real
//! backend can replace the built-in table without touching the session loop.

use std::collections::BTreeMap;

use crate::config::Config;

pub trait CredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Plain-text username → password table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    users: BTreeMap<String, String>,
}

impl StaticCredentials {
    pub fn new(users: BTreeMap<String, String>) -> Self {
        Self { users }
    }

    /// Accounts from the config's `[users]` table, or the built-in ones when it is empty.
    pub fn from_config(config: &Config) -> Self {
        if config.users.is_empty() {
            Self::default()
        } else {
            Self::new(config.users.clone())
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new(BTreeMap::from([
            ("matt".to_string(), "matt".to_string()),
            ("user2".to_string(), "password2".to_string()),
        ]))
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.users.get(username).is_some_and(|p| p == password)
    }
}
