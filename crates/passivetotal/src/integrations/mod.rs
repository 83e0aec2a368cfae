pub mod passive_dns;
pub mod provider;
pub mod subdomains;
pub mod whois;

use self::passive_dns::PassiveDns;
use self::provider::PassiveTotal;
use self::subdomains::Subdomains;
use self::whois::Whois;
use crate::card::Card;
use crate::config::Settings;
use crate::credentials::{Credential, CredentialSource};
use crate::model::{Itype, Outcome};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument, trace, warn};

// region:        --- Constants

/// Every capability reads its credentials from the provider entry.
pub const CONFIG_NAME: &str = "PassiveTotal";
pub const ICON: &str = "public/passiveTotalIcon.png";
pub const CACHE_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

// endregion:     --- Constants

// region:        --- Traits

pub trait Module {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
}

/// Everything an integration borrows from the host for one call.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub http_client: &'a Client,
    pub credentials: &'a dyn CredentialSource,
    pub settings: &'a Settings,
}

#[async_trait]
pub trait Integration: Module + Send + Sync {
    fn itypes(&self) -> &'static [Itype];

    fn card(&self) -> &'static Card;

    fn config_name(&self) -> &'static str {
        CONFIG_NAME
    }

    fn icon(&self) -> &'static str {
        ICON
    }

    /// How long the host may serve a cached result.
    fn cache_timeout(&self) -> Duration {
        CACHE_TIMEOUT
    }

    fn accepts(&self, itype: Itype) -> bool {
        self.itypes().contains(&itype)
    }

    /// One authenticated call to the provider, shaped into an outcome.
    async fn request(
        &self,
        ctx: &Context<'_>,
        credential: &Credential,
        itype: Itype,
        query: &str,
    ) -> Result<Outcome>;

    /// Host entry point. Never fails: errors end up logged and reported as `Failed`.
    async fn fetch(&self, ctx: &Context<'_>, user: &str, itype: Itype, query: &str) -> Outcome {
        if !self.accepts(itype) {
            return Outcome::NotApplicable;
        }

        let Some(credential) = Credential::resolve(ctx.credentials, user) else {
            return Outcome::NotApplicable;
        };

        match self.request(ctx, &credential, itype, query).await {
            Ok(outcome) => outcome,
            Err(err) if err.is_not_found() => {
                if ctx.settings.is_verbose() {
                    warn!(integration = self.name(), query, "Not found: {}", err);
                }
                Outcome::Empty
            }
            Err(err) => {
                error!(integration = self.name(), query, "Fetch failed: {}", err);
                Outcome::Failed
            }
        }
    }
}

// endregion:     --- Traits

// region:        --- Registry

pub fn provider() -> PassiveTotal {
    PassiveTotal::new()
}

pub fn all() -> Vec<Box<dyn Integration>> {
    vec![
        Box::new(Whois::new()),
        Box::new(Subdomains::new()),
        Box::new(PassiveDns::new()),
    ]
}

pub fn for_itype(itype: Itype) -> Vec<Box<dyn Integration>> {
    all()
        .into_iter()
        .filter(|integration| integration.accepts(itype))
        .collect()
}

/// What the host registers for one integration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    pub name: &'static str,
    pub config_name: &'static str,
    pub icon: &'static str,
    pub itypes: &'static [Itype],
    pub cache_timeout: u64,
    pub card: &'static Card,
}

pub fn descriptor(integration: &dyn Integration) -> Descriptor {
    Descriptor {
        name: integration.name(),
        config_name: integration.config_name(),
        icon: integration.icon(),
        itypes: integration.itypes(),
        cache_timeout: integration.cache_timeout().as_millis() as u64,
        card: integration.card(),
    }
}

pub fn display_all() {
    let provider = provider();
    println!("\nProvider");
    println!("- {:25}{}", provider.name(), provider.description());
    for setting in provider.user_settings() {
        let masked = if setting.password { " (masked)" } else { "" };
        println!("  {:24}{}{}", setting.name, setting.help, masked);
    }

    println!("\nIntegrations");
    for integration in all() {
        let itypes: Vec<&str> = integration.itypes().iter().map(Itype::as_str).collect();
        println!(
            "- {:25}{:15}{}",
            integration.name(),
            itypes.join(","),
            integration.description()
        );
    }
}

// endregion:     --- Registry

// region:        --- HTTP requests

#[instrument(name = "HTTP_request", level = "debug", skip_all, fields(url = url))]
pub async fn http_request(
    ctx: &Context<'_>,
    credential: &Credential,
    url: &str,
    params: &[(&str, &str)],
) -> Result<Value> {
    debug!("Sending request");
    let res = match ctx
        .http_client
        .get(url)
        .query(params)
        .basic_auth(&credential.username, Some(&credential.key))
        .header(USER_AGENT, &ctx.settings.user_agent)
        .send()
        .await
    {
        Ok(res) => res,
        Err(err) => {
            debug!("Reason: {}", err);
            return Err(Error::Reqwest(err));
        }
    };

    debug!("Receive with status: {}", res.status());
    if !res.status().is_success() {
        return Err(Error::HttpStatus(res.status()));
    }

    let json: Value = res.json().await?;
    trace!("JSON response: {:?}", json);
    Ok(json)
}

// endregion:     --- HTTP requests
