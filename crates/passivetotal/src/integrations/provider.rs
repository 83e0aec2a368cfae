use super::{Module, CACHE_TIMEOUT, CONFIG_NAME, ICON};
use crate::config::{UserSetting, PASSIVETOTAL_USER_SETTINGS};
use std::time::Duration;

// region:        --- Module info

/// Provider entry: owns the user settings shared by every PassiveTotal capability.
pub struct PassiveTotal {}

impl PassiveTotal {
    pub fn new() -> Self {
        Self {}
    }

    pub fn icon(&self) -> &'static str {
        ICON
    }

    /// The provider entry itself never produces results to count.
    pub fn no_stats(&self) -> bool {
        true
    }

    pub fn cache_timeout(&self) -> Duration {
        CACHE_TIMEOUT
    }

    pub fn user_settings(&self) -> &'static [UserSetting] {
        PASSIVETOTAL_USER_SETTINGS
    }
}

impl Module for PassiveTotal {
    fn name(&self) -> &'static str {
        CONFIG_NAME
    }

    fn description(&self) -> &'static str {
        "PassiveTotal api credentials"
    }
}

// endregion:     --- Module info
