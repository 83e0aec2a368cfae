use super::{http_request, Context, Integration, Module};
use crate::card::{Card, Field};
use crate::credentials::Credential;
use crate::model::{Itype, Outcome};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

const SUBDOMAINS_PATH: &str = "/v2/enrichment/subdomains";

pub static SUBDOMAINS_CARD: Card = Card {
    title: "PassiveTotal Subdomains for %{query}",
    fields: &[Field::array("subdomains", Some("subdomains"))],
};

// region:        --- Module info

pub struct Subdomains {}

impl Subdomains {
    pub fn new() -> Self {
        Self {}
    }

    pub fn normalize(&self, payload: Value) -> Result<Outcome> {
        let found = payload
            .get("subdomains")
            .and_then(Value::as_array)
            .map(Vec::len)
            .ok_or(Error::MalformedResponse {
                integration: self.name(),
                field: "subdomains",
            })?;

        debug!("{} collected", found);
        if found == 0 {
            return Ok(Outcome::Empty);
        }

        Ok(Outcome::success(payload, found as u64))
    }
}

impl Module for Subdomains {
    fn name(&self) -> &'static str {
        "PT Subdomains"
    }

    fn description(&self) -> &'static str {
        "Subdomains of a domain known to PassiveTotal"
    }
}

// endregion:     --- Module info

#[async_trait]
impl Integration for Subdomains {
    fn itypes(&self) -> &'static [Itype] {
        &[Itype::Domain]
    }

    fn card(&self) -> &'static Card {
        &SUBDOMAINS_CARD
    }

    #[instrument(name = "fetch", level = "debug", fields(integration = self.name(), query = query), skip_all)]
    async fn request(
        &self,
        ctx: &Context<'_>,
        credential: &Credential,
        _itype: Itype,
        query: &str,
    ) -> Result<Outcome> {
        let url = ctx.settings.endpoint(SUBDOMAINS_PATH);
        let payload = http_request(ctx, credential, &url, &[("query", query)]).await?;

        self.normalize(payload)
    }
}
