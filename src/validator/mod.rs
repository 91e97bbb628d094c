//! Structural validation of Book and Author response payloads.
//!
//! Single-entity validation is stateless and exposed as free functions;
//! collection validation lives on [`ResponseValidator`], which carries the
//! expected size of the seeded book catalog. All checks fail fast: the
//! first violation aborts the pass, is logged once at the point of
//! detection, and propagates to the caller.

pub mod schema;

use serde_json::Value;
use tracing::{debug, error};

use self::schema::{EntitySchema, FieldKind, FieldRule};
use crate::client::ApiResponse;
use crate::{AppError, Result};

const BOOK_SCHEMA: EntitySchema = EntitySchema {
    entity: "book",
    fields: &[
        FieldRule {
            name: "id",
            kind: FieldKind::Int,
        },
        FieldRule {
            name: "title",
            kind: FieldKind::NullableText,
        },
        FieldRule {
            name: "description",
            kind: FieldKind::NullableText,
        },
        FieldRule {
            name: "pageCount",
            kind: FieldKind::Int,
        },
        FieldRule {
            name: "excerpt",
            kind: FieldKind::NullableText,
        },
        FieldRule {
            name: "publishDate",
            kind: FieldKind::DateTime,
        },
    ],
};

const AUTHOR_SCHEMA: EntitySchema = EntitySchema {
    entity: "author",
    fields: &[
        FieldRule {
            name: "id",
            kind: FieldKind::Int,
        },
        FieldRule {
            name: "idBook",
            kind: FieldKind::Int,
        },
        FieldRule {
            name: "firstName",
            kind: FieldKind::NullableText,
        },
        FieldRule {
            name: "lastName",
            kind: FieldKind::NullableText,
        },
    ],
};

/// Validate a single decoded book payload.
///
/// # Errors
///
/// Returns `AppError::Validation` naming the first missing or mistyped
/// field, after logging it at error level.
pub fn validate_book(book: &Value) -> Result<()> {
    validate_entity(&BOOK_SCHEMA, book)
}

/// Validate a single decoded author payload.
///
/// # Errors
///
/// Returns `AppError::Validation` naming the first missing or mistyped
/// field, after logging it at error level.
pub fn validate_author(author: &Value) -> Result<()> {
    validate_entity(&AUTHOR_SCHEMA, author)
}

fn validate_entity(schema: &EntitySchema, value: &Value) -> Result<()> {
    if let Some(id) = value.get("id").and_then(Value::as_i64) {
        debug!(entity = schema.entity, id, "validating entity");
    }
    if let Err(err) = schema.check(value) {
        error!("{err}");
        return Err(err);
    }
    Ok(())
}

/// Collection-level validator carrying the expected seeded catalog size.
///
/// Constructed from suite configuration and injected into the scenario
/// driver; there are no process-global validator instances.
#[derive(Debug, Clone, Copy)]
pub struct ResponseValidator {
    expected_book_count: usize,
}

impl ResponseValidator {
    /// Create a validator expecting `expected_book_count` books in the
    /// seeded catalog.
    #[must_use]
    pub const fn new(expected_book_count: usize) -> Self {
        Self {
            expected_book_count,
        }
    }

    /// Validate a full book-list response: 200 status, array-shaped data,
    /// exact seeded catalog size, and every element structurally valid.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for the first collection-level or
    /// element-level violation; later elements are not inspected.
    pub fn validate_book_list(&self, response: &ApiResponse) -> Result<()> {
        debug!("validating book catalog response");
        let items = collection_items(&BOOK_SCHEMA, response)?;
        if items.len() != self.expected_book_count {
            return Err(fail_list(format!(
                "book catalog must contain {} entries, got {}",
                self.expected_book_count,
                items.len()
            )));
        }
        for item in items {
            validate_entity(&BOOK_SCHEMA, item)?;
        }
        Ok(())
    }

    /// Validate a full author-list response: 200 status, array-shaped
    /// data, and every element structurally valid.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for the first collection-level or
    /// element-level violation.
    #[allow(clippy::unused_self)] // Kept as a method so callers inject one validator for both entities.
    pub fn validate_author_list(&self, response: &ApiResponse) -> Result<()> {
        debug!("validating author catalog response");
        let items = collection_items(&AUTHOR_SCHEMA, response)?;
        for item in items {
            validate_entity(&AUTHOR_SCHEMA, item)?;
        }
        Ok(())
    }
}

fn collection_items<'a>(schema: &EntitySchema, response: &'a ApiResponse) -> Result<&'a [Value]> {
    if response.status != 200 {
        return Err(fail_list(format!(
            "{} list response status must be 200, got {}",
            schema.entity, response.status
        )));
    }
    response.data.as_array().map(Vec::as_slice).ok_or_else(|| {
        fail_list(format!(
            "{} list response data must be an array",
            schema.entity
        ))
    })
}

fn fail_list(message: String) -> AppError {
    error!("{message}");
    AppError::Validation(message)
}
