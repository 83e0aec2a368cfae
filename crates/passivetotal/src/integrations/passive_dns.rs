use super::{http_request, Context, Integration, Module};
use crate::card::{Card, Column, Field};
use crate::credentials::Credential;
use crate::model::{Itype, Outcome};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

const PASSIVE_DNS_PATH: &str = "/v2/dns/passive";

static RESULT_COLUMNS: &[Column] = &[
    Column::new("DNS Type", "recordType"),
    Column::new("Type", "resolveType"),
    Column::pivot("Value", "resolve"),
    Column::new("First Seen", "firstSeen"),
    Column::new("Last Seen", "lastSeen"),
];

pub static PASSIVE_DNS_CARD: Card = Card {
    title: "PassiveTotal Domain Passive DNS for %{query}",
    fields: &[
        Field::scalar("firstSeen"),
        Field::scalar("lastSeen"),
        Field::scalar("totalRecords"),
        Field::table("results", "results", RESULT_COLUMNS),
    ],
};

// region:        --- Module info

pub struct PassiveDns {}

impl PassiveDns {
    pub fn new() -> Self {
        Self {}
    }

    /// Count comes from the provider's declared total, not from the page of results.
    /// No results means no data, whatever the declared total says.
    pub fn normalize(&self, payload: Value) -> Result<Outcome> {
        let has_results = payload
            .get("results")
            .and_then(Value::as_array)
            .map(|results| !results.is_empty())
            .ok_or(Error::MalformedResponse {
                integration: self.name(),
                field: "results",
            })?;

        if !has_results {
            return Ok(Outcome::Empty);
        }

        let total = payload
            .get("totalRecords")
            .and_then(parse_total)
            .ok_or(Error::MalformedResponse {
                integration: self.name(),
                field: "totalRecords",
            })?;

        debug!("{} records declared", total);
        if total == 0 {
            return Ok(Outcome::Empty);
        }

        Ok(Outcome::success(payload, total))
    }
}

/// The provider sends `totalRecords` as a number, sometimes as a numeric string.
fn parse_total(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

impl Module for PassiveDns {
    fn name(&self) -> &'static str {
        "PT DNS"
    }

    fn description(&self) -> &'static str {
        "Passive DNS resolutions of a domain or IP"
    }
}

// endregion:     --- Module info

#[async_trait]
impl Integration for PassiveDns {
    fn itypes(&self) -> &'static [Itype] {
        &[Itype::Ip, Itype::Domain]
    }

    fn card(&self) -> &'static Card {
        &PASSIVE_DNS_CARD
    }

    #[instrument(name = "fetch", level = "debug", fields(integration = self.name(), itype = %itype, query = query), skip_all)]
    async fn request(
        &self,
        ctx: &Context<'_>,
        credential: &Credential,
        itype: Itype,
        query: &str,
    ) -> Result<Outcome> {
        let url = ctx.settings.endpoint(PASSIVE_DNS_PATH);
        let payload = http_request(ctx, credential, &url, &[("query", query)]).await?;

        self.normalize(payload)
    }
}
