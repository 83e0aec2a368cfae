use serde::Serialize;

// region:        --- Constants

pub const DEFAULT_BASE_URL: &str = "https://api.passivetotal.org";

/// Verbosity above which 404s from the provider are logged instead of silently dropped.
pub const VERBOSE_DEBUG_LEVEL: u8 = 1;

// endregion:     --- Constants

// region:        --- Settings

#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub user_agent: String,
    pub debug: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: default_user_agent(),
            debug: 0,
        }
    }
}

impl Settings {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_debug(mut self, debug: u8) -> Self {
        self.debug = debug;
        self
    }

    pub fn is_verbose(&self) -> bool {
        self.debug > VERBOSE_DEBUG_LEVEL
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

// endregion:     --- Settings

// region:        --- User settings

/// A per-user setting the host must collect and store for an integration.
#[derive(Debug, Serialize)]
pub struct UserSetting {
    pub name: &'static str,
    pub help: &'static str,
    pub password: bool,
}

pub const PASSIVETOTAL_USER: &str = "PassiveTotalUser";
pub const PASSIVETOTAL_KEY: &str = "PassiveTotalKey";

pub static PASSIVETOTAL_USER_SETTINGS: &[UserSetting] = &[
    UserSetting {
        name: PASSIVETOTAL_USER,
        help: "Your Passive Total api user",
        password: false,
    },
    UserSetting {
        name: PASSIVETOTAL_KEY,
        help: "Your Passive Total api key",
        password: true,
    },
];

// endregion:     --- User settings
