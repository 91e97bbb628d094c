//! Author resource record.

use serde::{Deserialize, Serialize};

/// An author record as exchanged with the `/Authors` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Caller-supplied identifier, expected to be unique per create.
    pub id: i64,
    /// Weak reference to a book id. Only the type is validated; referential
    /// integrity is the API's responsibility.
    pub id_book: i64,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
}
