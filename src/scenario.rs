//! Scenario orchestration over the transport client and validators.
//!
//! A [`ScenarioContext`] owns its client and validator (constructor-
//! injected, no process-global collaborators) and composes one logical
//! test scenario at a time: construct a fixture, invoke operations in
//! strict program order, validate success responses or assert an expected
//! failure status, and emit a diagnostic line with the response body.

use serde_json::{json, Value};
use tracing::debug;

use crate::client::{ApiClient, ApiResponse};
use crate::fixtures;
use crate::models::{Author, Book};
use crate::validator::{self, ResponseValidator};
use crate::{AppError, Result};

/// Injected collaborators for one scenario run.
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    client: ApiClient,
    validator: ResponseValidator,
}

impl ScenarioContext {
    /// Build a context from an already-configured client and validator.
    #[must_use]
    pub const fn new(client: ApiClient, validator: ResponseValidator) -> Self {
        Self { client, validator }
    }

    /// Direct access to the transport client for single-operation probes.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Fetch the book catalog and validate it as a whole, including the
    /// seeded-size invariant.
    ///
    /// # Errors
    ///
    /// Propagates transport failures and the first validation violation.
    pub async fn verify_book_catalog(&self) -> Result<()> {
        let response = self.client.list_books().await?;
        self.validator.validate_book_list(&response)?;
        debug!(body = %response.data, "book catalog response");
        Ok(())
    }

    /// Fetch all authors and validate every element.
    ///
    /// # Errors
    ///
    /// Propagates transport failures and the first validation violation.
    pub async fn verify_author_catalog(&self) -> Result<()> {
        let response = self.client.list_authors().await?;
        self.validator.validate_author_list(&response)?;
        debug!(body = %response.data, "author catalog response");
        Ok(())
    }

    /// Fetch the authors linked to `book_id` and validate every element.
    ///
    /// # Errors
    ///
    /// Propagates transport failures and the first validation violation.
    pub async fn verify_authors_for_book(&self, book_id: i64) -> Result<()> {
        let response = self.client.get_authors_by_book_id(book_id).await?;
        self.validator.validate_author_list(&response)?;
        debug!(body = %response.data, "authors-by-book response");
        Ok(())
    }

    /// Read the book stored under `id`, validate its shape, and require it
    /// to deep-include every field of `expected` except the server-drifting
    /// `publishDate`.
    ///
    /// # Errors
    ///
    /// Propagates transport failures, validation violations, and field
    /// mismatches.
    pub async fn verify_book(&self, id: i64, expected: &Book) -> Result<()> {
        let response = self.client.get_book_by_id(id).await?;
        validator::validate_book(&response.data)?;
        deep_includes(&response.data, &book_subset(expected))?;
        debug!(body = %response.data, "book response");
        Ok(())
    }

    /// Read the author stored under `id`, validate its shape, and require
    /// it to deep-include every field of `expected`.
    ///
    /// # Errors
    ///
    /// Propagates transport failures, validation violations, and field
    /// mismatches.
    pub async fn verify_author(&self, id: i64, expected: &Author) -> Result<()> {
        let response = self.client.get_author_by_id(id).await?;
        validator::validate_author(&response.data)?;
        deep_includes(&response.data, &author_subset(expected))?;
        debug!(body = %response.data, "author response");
        Ok(())
    }

    /// Create `book` and read it back by the fixture's id, verifying the
    /// create echo and the stored record.
    ///
    /// # Errors
    ///
    /// Propagates transport failures, validation violations, and field
    /// mismatches from either step.
    pub async fn book_round_trip(&self, book: &Book) -> Result<()> {
        let created = self.client.create_book(book).await?;
        debug!(body = %created.data, "create book response");
        deep_includes(&created.data, &book_subset(book))?;
        self.verify_book(book.id, book).await
    }

    /// Create `author` and read it back by the fixture's id.
    ///
    /// # Errors
    ///
    /// Propagates transport failures, validation violations, and field
    /// mismatches from either step.
    pub async fn author_round_trip(&self, author: &Author) -> Result<()> {
        let created = self.client.create_author(author).await?;
        debug!(body = %created.data, "create author response");
        deep_includes(&created.data, &author_subset(author))?;
        self.verify_author(author.id, author).await
    }

    /// Full create → update → delete flow chained on the fixture's id.
    ///
    /// The update echo must match the replacement payload; the delete must
    /// succeed.
    ///
    /// # Errors
    ///
    /// Propagates the first failing step.
    pub async fn book_crud_flow(&self, book: &Book) -> Result<()> {
        let created = self.client.create_book(book).await?;
        debug!(body = %created.data, "create book response");

        let replacement = fixtures::updated_book(book.id);
        let updated = self.client.update_book(book.id, &replacement).await?;
        deep_includes(&updated.data, &book_subset(&replacement))?;
        debug!(body = %updated.data, "update book response");

        let deleted = self.client.delete_book(book.id).await?;
        debug!(status = deleted.status, "delete book response");
        Ok(())
    }

    /// Create a boundary-valid book and require the API to accept it,
    /// distinguishing edge-case fixtures from invalid-data fixtures.
    ///
    /// # Errors
    ///
    /// Propagates transport failures and echo mismatches.
    pub async fn expect_book_accepted(&self, book: &Book) -> Result<()> {
        let response = self.client.create_book(book).await?;
        deep_includes(&response.data, &book_subset(book))?;
        debug!(body = %response.data, "boundary create response");
        Ok(())
    }

    /// Create a boundary-valid author and require the API to accept it.
    ///
    /// # Errors
    ///
    /// Propagates transport failures and echo mismatches.
    pub async fn expect_author_accepted(&self, author: &Author) -> Result<()> {
        let response = self.client.create_author(author).await?;
        deep_includes(&response.data, &author_subset(author))?;
        debug!(body = %response.data, "boundary create response");
        Ok(())
    }

    /// Full create → update → delete flow chained on the fixture's id.
    ///
    /// # Errors
    ///
    /// Propagates the first failing step.
    pub async fn author_crud_flow(&self, author: &Author) -> Result<()> {
        let created = self.client.create_author(author).await?;
        debug!(body = %created.data, "create author response");

        let replacement = fixtures::updated_author(author.id);
        let updated = self.client.update_author(author.id, &replacement).await?;
        deep_includes(&updated.data, &author_subset(&replacement))?;
        debug!(body = %updated.data, "update author response");

        let deleted = self.client.delete_author(author.id).await?;
        debug!(status = deleted.status, "delete author response");
        Ok(())
    }
}

/// Assert that an operation failed with exactly `expected` status.
///
/// An `Ok` outcome becomes [`AppError::UnexpectedSuccess`]; a transport
/// failure with the matching status is the passing result and its body is
/// logged for diagnosis. Any other error propagates unchanged.
///
/// # Errors
///
/// Returns `AppError::UnexpectedSuccess` when the operation succeeded, or
/// the original error when its status does not match.
pub fn expect_status(result: Result<ApiResponse>, expected: u16) -> Result<()> {
    match result {
        Ok(response) => Err(AppError::UnexpectedSuccess(format!(
            "expected status {expected}, got success {} with body {}",
            response.status, response.data
        ))),
        Err(AppError::Transport { status, body }) if status == expected => {
            debug!(status, body = %body, "expected failure response");
            Ok(())
        }
        Err(err) => Err(err),
    }
}

/// Require `actual` to carry every field of the `expected` subset with an
/// equal value.
///
/// # Errors
///
/// Returns `AppError::Validation` naming the first mismatched field.
pub fn deep_includes(actual: &Value, expected: &Value) -> Result<()> {
    let Some(fields) = expected.as_object() else {
        return Err(AppError::Validation(
            "expected subset must be a JSON object".into(),
        ));
    };
    for (name, want) in fields {
        let got = actual.get(name).unwrap_or(&Value::Null);
        if got != want {
            return Err(AppError::Validation(format!(
                "field `{name}` mismatch: expected {want}, got {got}"
            )));
        }
    }
    Ok(())
}

/// Comparable fields of a book fixture; `publishDate` is excluded because
/// the API normalizes it on write.
fn book_subset(book: &Book) -> Value {
    json!({
        "id": book.id,
        "title": book.title,
        "description": book.description,
        "pageCount": book.page_count,
        "excerpt": book.excerpt,
    })
}

fn author_subset(author: &Author) -> Value {
    json!({
        "id": author.id,
        "idBook": author.id_book,
        "firstName": author.first_name,
        "lastName": author.last_name,
    })
}
