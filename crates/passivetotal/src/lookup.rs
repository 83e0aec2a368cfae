use crate::integrations::{self, Context, Module};
use crate::model::{Itype, Report};
use futures::{stream, StreamExt};
use tracing::{info, instrument};

// region:        --- Constants

const INTEGRATIONS_CONCURRENCY: usize = 4;

// endregion:     --- Constants

/// Run every integration accepting `itype` for one query, results in registry order.
#[instrument(name = "lookup", level = "info", skip_all, fields(itype = %itype, query = query))]
pub async fn lookup(ctx: &Context<'_>, user: &str, itype: Itype, query: &str) -> Vec<Report> {
    let reports: Vec<Report> = stream::iter(integrations::for_itype(itype).into_iter())
        .map(|integration| async move {
            let outcome = integration.fetch(ctx, user, itype, query).await;
            Report {
                integration: integration.name(),
                card: integration.card(),
                outcome,
            }
        })
        .buffered(INTEGRATIONS_CONCURRENCY)
        .collect()
        .await;

    let found = reports
        .iter()
        .filter(|report| report.outcome.count().is_some())
        .count();
    info!("{}/{} integrations returned data", found, reports.len());

    reports
}
