//! Book resource record.

use serde::{Deserialize, Serialize};

/// A book record as exchanged with the `/Books` endpoints.
///
/// Wire field names are camelCase; text fields may be returned as null by
/// the API and are therefore optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Caller-supplied identifier, expected to be unique per create.
    pub id: i64,
    /// Display title.
    pub title: Option<String>,
    /// Long-form description.
    pub description: Option<String>,
    /// Page count; the API documents no sign constraint, negative values
    /// are used as an invalid-case probe.
    pub page_count: i64,
    /// Short excerpt.
    pub excerpt: Option<String>,
    /// ISO-8601 publication datetime.
    pub publish_date: String,
}
