//! Test-data generation for Book and Author scenarios.
//!
//! Every generator is pure construction and never fails. Valid families
//! return typed records; invalid and missing-field families return raw
//! [`serde_json::Value`] payloads, since deliberately mistyped data cannot
//! inhabit the typed structs.

use chrono::{Duration, SecondsFormat, Utc};
use rand::Rng;
use serde_json::{json, Value};

use crate::models::{Author, Book};

const LOREM_PARAGRAPH: &str =
    "Lorem lorem lorem. Lorem lorem lorem. Lorem lorem lorem.\n";

const LOREM_EXCERPT: &str = "Lorem lorem lorem. Lorem lorem lorem. Lorem lorem lorem.\n\
     Lorem lorem lorem. Lorem lorem lorem. Lorem lorem lorem.\n\
     Lorem lorem lorem. Lorem lorem lorem. Lorem lorem lorem.\n";

const SECONDS_PER_YEAR: i64 = 365 * 24 * 60 * 60;

/// Integer uniformly selected in `[min, max]`.
///
/// The bounded range reduces, but does not eliminate, id collisions with
/// pre-existing data when scenarios run side by side.
#[must_use]
pub fn random_id(min: i64, max: i64) -> i64 {
    rand::thread_rng().gen_range(min..=max)
}

/// An id value guaranteed absent from the seeded dataset; 404-path probes.
#[must_use]
pub const fn non_existing_id() -> i64 {
    99_999
}

/// An ISO-8601 timestamp within the last 365 days.
fn recent_publish_date() -> String {
    let offset = rand::thread_rng().gen_range(0..SECONDS_PER_YEAR);
    (Utc::now() - Duration::seconds(offset)).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Fixed literal book known to exist in the seeded dataset.
///
/// Used when a test asserts an exact expected value, and as the
/// duplicate-create probe (posting it again must conflict).
#[must_use]
pub fn deterministic_book() -> Book {
    Book {
        id: 99,
        title: Some("Book 99".into()),
        description: Some(LOREM_PARAGRAPH.into()),
        page_count: 9900,
        excerpt: Some(LOREM_EXCERPT.into()),
        publish_date: "2025-07-11T11:15:45.5121184+00:00".into(),
    }
}

/// Fixed literal author known to exist in the seeded dataset.
#[must_use]
pub fn deterministic_author() -> Author {
    Author {
        id: 1,
        id_book: 1,
        first_name: Some("First Name 1".into()),
        last_name: Some("Last Name 1".into()),
    }
}

/// Valid book parameterized by a generated id.
///
/// Text fields embed the id so distinct runs produce distinguishable
/// records; the page count is derived as `id * 100`.
#[must_use]
pub fn randomized_book(id: i64) -> Book {
    Book {
        id,
        title: Some(format!("Book {id}")),
        description: Some(LOREM_PARAGRAPH.into()),
        page_count: id * 100,
        excerpt: Some(LOREM_EXCERPT.into()),
        publish_date: recent_publish_date(),
    }
}

/// Valid author parameterized by a generated id; `idBook` references the
/// same id so the weak link stays within the scenario's own records.
#[must_use]
pub fn randomized_author(id: i64) -> Author {
    Author {
        id,
        id_book: id,
        first_name: Some(format!("First Name {id}")),
        last_name: Some(format!("Last Name {id}")),
    }
}

/// Replacement payload for update scenarios against book `id`.
#[must_use]
pub fn updated_book(id: i64) -> Book {
    Book {
        id,
        title: Some("Updated Title".into()),
        description: Some("Updated description".into()),
        page_count: 321,
        excerpt: Some("Updated excerpt".into()),
        publish_date: "2025-09-01T00:00:00".into(),
    }
}

/// Replacement payload for update scenarios against author `id`.
#[must_use]
pub fn updated_author(id: i64) -> Author {
    Author {
        id,
        id_book: 100,
        first_name: Some("Updated".into()),
        last_name: Some("Author".into()),
    }
}

/// Book payload with a wrong-typed id, empty title, negative page count,
/// and an unparseable publish date; must be rejected with 400.
#[must_use]
pub fn invalid_book() -> Value {
    json!({
        "id": "invalid_id",
        "title": "",
        "description": "Invalid book with empty title and invalid ID.",
        "pageCount": -50,
        "excerpt": "This should fail due to negative page count.\n",
        "publishDate": "not-a-date",
    })
}

/// Author payload with wrong-typed ids and an empty first name; must be
/// rejected with 400.
#[must_use]
pub fn invalid_author() -> Value {
    json!({
        "id": "abc",
        "idBook": "invalid",
        "firstName": "",
        "lastName": "Invalid",
    })
}

/// Book payload omitting the description, excerpt, and publish date.
#[must_use]
pub fn missing_fields_book() -> Value {
    json!({
        "id": 1000,
        "title": "Incomplete Book",
    })
}

/// Author payload omitting both name fields.
#[must_use]
pub fn missing_fields_author() -> Value {
    json!({
        "id": 1000,
        "idBook": 1000,
    })
}

/// Boundary-valid book: zero id, empty strings, zero page count. Unlike
/// the invalid fixtures, the API is expected to ACCEPT this record.
#[must_use]
pub fn edge_case_book() -> Book {
    Book {
        id: 0,
        title: Some("Zero ID Book".into()),
        description: Some(String::new()),
        page_count: 0,
        excerpt: Some(String::new()),
        publish_date: "2025-01-01T00:00:00+00:00".into(),
    }
}

/// Boundary-valid author: zero ids and an empty last name.
#[must_use]
pub fn edge_case_author() -> Author {
    Author {
        id: 0,
        id_book: 0,
        first_name: Some("Anonymous".into()),
        last_name: Some(String::new()),
    }
}
