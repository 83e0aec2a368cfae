//! PassiveTotal enrichment integrations: WHOIS, subdomains and passive DNS
//! lookups keyed by domain or IP, normalized for an aggregating host.

pub mod card;
pub mod config;
pub mod credentials;
mod error;
pub mod integrations;
pub mod lookup;
pub mod model;
pub mod utils;

pub use error::{Error, Result};
