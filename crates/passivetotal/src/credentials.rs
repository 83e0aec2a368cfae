use crate::config::{PASSIVETOTAL_KEY, PASSIVETOTAL_USER};
use std::collections::HashMap;
use std::env;

/// Read access to the host's per-user settings store.
pub trait CredentialSource: Send + Sync {
    fn user_config(&self, user: &str, setting: &str) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub key: String,
}

impl Credential {
    /// Both halves must be present and non empty, otherwise the user has not configured the integration.
    pub fn resolve(source: &dyn CredentialSource, user: &str) -> Option<Self> {
        let username = source
            .user_config(user, PASSIVETOTAL_USER)
            .filter(|value| !value.is_empty())?;
        let key = source
            .user_config(user, PASSIVETOTAL_KEY)
            .filter(|value| !value.is_empty())?;

        Some(Self { username, key })
    }
}

// region:        --- Memory store

#[derive(Debug, Default)]
pub struct MemoryCredentials {
    settings: HashMap<(String, String), String>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, user: &str, setting: &str, value: &str) {
        self.settings
            .insert((user.to_string(), setting.to_string()), value.to_string());
    }

    pub fn with_passivetotal(mut self, user: &str, username: &str, key: &str) -> Self {
        self.set(user, PASSIVETOTAL_USER, username);
        self.set(user, PASSIVETOTAL_KEY, key);
        self
    }
}

impl CredentialSource for MemoryCredentials {
    fn user_config(&self, user: &str, setting: &str) -> Option<String> {
        self.settings
            .get(&(user.to_string(), setting.to_string()))
            .cloned()
    }
}

// endregion:     --- Memory store

// region:        --- Environment

pub const ENV_USER: &str = "PASSIVETOTAL_USER";
pub const ENV_KEY: &str = "PASSIVETOTAL_KEY";

/// Single operator setup used by the CLI: every user maps to the same environment variables.
#[derive(Debug, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn user_config(&self, _user: &str, setting: &str) -> Option<String> {
        match setting {
            PASSIVETOTAL_USER => env::var(ENV_USER).ok(),
            PASSIVETOTAL_KEY => env::var(ENV_KEY).ok(),
            _ => None,
        }
    }
}

// endregion:     --- Environment
