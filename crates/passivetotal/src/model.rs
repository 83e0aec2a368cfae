use crate::card::{lookup, Card, FieldKind};
use crate::{Error, Result};
use lazy_regex::regex_is_match;
use serde::Serialize;
use serde_json::{to_string_pretty, Value};
use std::fmt::Write as FmtWrite;
use std::fs::{self, File};
use std::io::Write;
use std::net::IpAddr;
use std::path::Path;
use std::str::FromStr;

// region:        --- Models

/// Kind of indicator a lookup is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Itype {
    Domain,
    Ip,
}

impl Itype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Itype::Domain => "domain",
            Itype::Ip => "ip",
        }
    }

    /// Classify a raw query, `None` when it is neither an IP literal nor a domain name.
    pub fn detect(query: &str) -> Option<Self> {
        if query.parse::<IpAddr>().is_ok() {
            return Some(Itype::Ip);
        }
        if regex_is_match!(r"^(?i)([a-z0-9_]([a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z][a-z0-9-]{0,61}[a-z0-9]\.?$", query) {
            return Some(Itype::Domain);
        }
        None
    }

    /// Checks the query against its type, detecting the type when none is given.
    /// A query that is neither a domain nor an IP is rejected either way.
    pub fn resolve(explicit: Option<Itype>, query: &str) -> Result<Self> {
        let detected = Itype::detect(query).ok_or_else(|| {
            Error::CliUsage(format!("Cannot tell if {:?} is a domain or an IP", query))
        })?;

        match explicit {
            Some(itype) if itype != detected => Err(Error::CliUsage(format!(
                "{:?} is not a valid {}",
                query, itype
            ))),
            _ => Ok(detected),
        }
    }
}

impl FromStr for Itype {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "domain" => Ok(Itype::Domain),
            "ip" => Ok(Itype::Ip),
            other => Err(Error::CliUsage(format!("Unknown indicator type: {}", other))),
        }
    }
}

impl std::fmt::Display for Itype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an integration hands back to the host for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success { payload: Value, count: u64 },
    Empty,
    NotApplicable,
    Failed,
}

impl Outcome {
    /// Attach the derived `_count` to the payload.
    pub fn success(mut payload: Value, count: u64) -> Self {
        if let Value::Object(map) = &mut payload {
            map.insert("_count".to_string(), Value::from(count));
        }
        Outcome::Success { payload, count }
    }

    pub fn count(&self) -> Option<u64> {
        match self {
            Outcome::Success { count, .. } => Some(*count),
            _ => None,
        }
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            Outcome::Success { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

/// One integration result, as exported by the CLI.
#[derive(Debug, Serialize)]
pub struct Report {
    pub integration: &'static str,
    #[serde(skip)]
    pub card: &'static Card,
    pub outcome: Outcome,
}

// endregion:     --- Models

// region:        --- Exporting utils

pub fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        Ok(false)
    } else {
        fs::create_dir_all(dir)?;
        Ok(true)
    }
}

pub fn export_to_json(reports: &[Report], path: &Path) -> Result<()> {
    let json = to_string_pretty(reports)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

pub fn export_to_markdown(reports: &[Report], query: &str, path: &Path) -> Result<()> {
    let md_content = render_markdown(reports, query)?;
    let mut file = File::create(path)?;
    file.write_all(md_content.as_bytes())?;
    Ok(())
}

pub fn render_markdown(reports: &[Report], query: &str) -> Result<String> {
    let mut md = String::new();
    writeln!(&mut md, "# PassiveTotal enrichment for `{}`", query)?;

    for report in reports {
        writeln!(&mut md)?;
        writeln!(&mut md, "## {}", report.card.title_for(query))?;
        writeln!(&mut md)?;

        let payload = match &report.outcome {
            Outcome::Success { payload, .. } => payload,
            Outcome::Empty | Outcome::Failed => {
                writeln!(&mut md, "No data available")?;
                continue;
            }
            Outcome::NotApplicable => {
                writeln!(&mut md, "Integration not configured")?;
                continue;
            }
        };

        for field in report.card.fields {
            let Some(value) = lookup(payload, field.source()) else {
                continue;
            };

            match &field.kind {
                FieldKind::Scalar => writeln!(&mut md, "- **{}**: {}", field.label, plain(value))?,
                FieldKind::Array { join } => {
                    let items: Vec<String> = value
                        .as_array()
                        .map(|items| items.iter().map(plain).collect())
                        .unwrap_or_default();
                    match join {
                        Some(sep) => writeln!(&mut md, "- **{}**: {}", field.label, items.join(*sep))?,
                        None => {
                            writeln!(&mut md, "- **{}**:", field.label)?;
                            for item in items {
                                writeln!(&mut md, "  - {}", item)?;
                            }
                        }
                    }
                }
                FieldKind::Json => {
                    writeln!(&mut md, "- **{}**:", field.label)?;
                    writeln!(&mut md)?;
                    writeln!(&mut md, "```json")?;
                    writeln!(&mut md, "{}", to_string_pretty(value)?)?;
                    writeln!(&mut md, "```")?;
                    writeln!(&mut md)?;
                }
                FieldKind::Table { fields } => {
                    let rows = value.as_array().map(Vec::as_slice).unwrap_or_default();
                    writeln!(&mut md)?;
                    let header: Vec<&str> = fields.iter().map(|column| column.label).collect();
                    writeln!(&mut md, "| {} |", header.join(" | "))?;
                    writeln!(&mut md, "|{}", "---|".repeat(fields.len()))?;
                    for row in rows {
                        let cells: Vec<String> = fields
                            .iter()
                            .map(|column| {
                                let cell = lookup(row, column.field).map(plain).unwrap_or_default();
                                if column.pivot {
                                    format!("`{}`", cell)
                                } else {
                                    cell
                                }
                            })
                            .collect();
                        writeln!(&mut md, "| {} |", cells.join(" | "))?;
                    }
                    writeln!(&mut md)?;
                }
            }
        }
    }

    Ok(md)
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

// endregion:     --- Exporting utils
