//! Display schema handed to the host so it knows how to render a result.
//!
//! Cards are `static` data: built at compile time, shared by every query.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct Card {
    /// `%{query}` is substituted by the renderer.
    pub title: &'static str,
    pub fields: &'static [Field],
}

#[derive(Debug, Serialize)]
pub struct Field {
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    #[serde(flatten)]
    pub kind: FieldKind,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    #[serde(rename = "string")]
    Scalar,
    Array {
        #[serde(skip_serializing_if = "Option::is_none")]
        join: Option<&'static str>,
    },
    Table {
        fields: &'static [Column],
    },
    Json,
}

#[derive(Debug, Serialize)]
pub struct Column {
    pub label: &'static str,
    pub field: &'static str,
    #[serde(skip_serializing_if = "is_false")]
    pub pivot: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

// region:        --- Constructors

impl Field {
    pub const fn scalar(label: &'static str) -> Self {
        Self {
            label,
            field: None,
            kind: FieldKind::Scalar,
        }
    }

    pub const fn array(label: &'static str, field: Option<&'static str>) -> Self {
        Self {
            label,
            field,
            kind: FieldKind::Array { join: None },
        }
    }

    pub const fn joined(label: &'static str, join: &'static str) -> Self {
        Self {
            label,
            field: None,
            kind: FieldKind::Array { join: Some(join) },
        }
    }

    pub const fn json(label: &'static str) -> Self {
        Self {
            label,
            field: None,
            kind: FieldKind::Json,
        }
    }

    pub const fn table(label: &'static str, field: &'static str, fields: &'static [Column]) -> Self {
        Self {
            label,
            field: Some(field),
            kind: FieldKind::Table { fields },
        }
    }

    /// Path of the value in the payload, the label when no explicit field is set.
    pub fn source(&self) -> &'static str {
        self.field.unwrap_or(self.label)
    }
}

impl Column {
    pub const fn new(label: &'static str, field: &'static str) -> Self {
        Self {
            label,
            field,
            pivot: false,
        }
    }

    pub const fn pivot(label: &'static str, field: &'static str) -> Self {
        Self {
            label,
            field,
            pivot: true,
        }
    }
}

// endregion:     --- Constructors

// region:        --- Value lookup

/// Follow a dotted path into a JSON payload.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, segment| current.get(segment))
        .filter(|found| !found.is_null())
}

impl Card {
    pub fn title_for(&self, query: &str) -> String {
        self.title.replace("%{query}", query)
    }
}

// endregion:     --- Value lookup
