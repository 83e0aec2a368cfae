use super::{http_request, Context, Integration, Module};
use crate::card::{Card, Field};
use crate::credentials::Credential;
use crate::model::{Itype, Outcome};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

const WHOIS_PATH: &str = "/v2/whois";

pub static WHOIS_CARD: Card = Card {
    title: "PassiveTotal Whois for %{query}",
    fields: &[
        Field::scalar("registrar"),
        Field::scalar("organization"),
        Field::scalar("registered"),
        Field::scalar("expiresAt"),
        Field::scalar("lastLoadedAt"),
        Field::joined("nameServers", ", "),
        Field::json("registrant"),
        Field::scalar("whoisServer"),
        Field::scalar("name"),
        Field::scalar("telephone"),
        Field::scalar("domainStatus"),
        Field::scalar("contactEmail"),
        Field::scalar("registryUpdatedAt"),
    ],
};

// region:        --- Module info

pub struct Whois {}

impl Whois {
    pub fn new() -> Self {
        Self {}
    }

    /// A WHOIS answer is a single record.
    pub fn normalize(&self, payload: Value) -> Result<Outcome> {
        if !payload.is_object() {
            return Err(Error::MalformedResponse {
                integration: self.name(),
                field: "whois",
            });
        }

        Ok(Outcome::success(payload, 1))
    }
}

impl Module for Whois {
    fn name(&self) -> &'static str {
        "PT Whois"
    }

    fn description(&self) -> &'static str {
        "Current WHOIS record of a domain"
    }
}

// endregion:     --- Module info

#[async_trait]
impl Integration for Whois {
    fn itypes(&self) -> &'static [Itype] {
        &[Itype::Domain]
    }

    fn card(&self) -> &'static Card {
        &WHOIS_CARD
    }

    #[instrument(name = "fetch", level = "debug", fields(integration = self.name(), query = query), skip_all)]
    async fn request(
        &self,
        ctx: &Context<'_>,
        credential: &Credential,
        _itype: Itype,
        query: &str,
    ) -> Result<Outcome> {
        let url = ctx.settings.endpoint(WHOIS_PATH);
        let payload = http_request(ctx, credential, &url, &[("query", query), ("history", "false")]).await?;

        self.normalize(payload)
    }
}
