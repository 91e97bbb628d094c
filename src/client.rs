//! Thin HTTP transport wrapper around the API under test.
//!
//! One method per entity/verb; every call returns the decoded status and
//! JSON body, mapping non-2xx responses to [`AppError::Transport`] and
//! network-layer failures (including timeouts) to [`AppError::Http`].
//! Failures are never retried here.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::SuiteConfig;
use crate::{AppError, Result};

/// Decoded API response: HTTP status plus JSON body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded JSON body; `Null` when the body was empty.
    pub data: Value,
}

/// HTTP client for the Books/Authors API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from suite configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Http` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &SuiteConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    // ── Author endpoints ────────────────────────────────

    /// Fetch all authors.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Transport` on a non-2xx response, `AppError::Http`
    /// on a network-layer failure.
    pub async fn list_authors(&self) -> Result<ApiResponse> {
        self.send(self.http.get(self.url("/Authors"))).await
    }

    /// Fetch one author by id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Transport` on a non-2xx response (404 for an
    /// unknown id), `AppError::Http` on a network-layer failure.
    pub async fn get_author_by_id(&self, id: i64) -> Result<ApiResponse> {
        self.send(self.http.get(self.url(&format!("/Authors/{id}"))))
            .await
    }

    /// Fetch the authors linked to a book id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Transport` on a non-2xx response, `AppError::Http`
    /// on a network-layer failure.
    pub async fn get_authors_by_book_id(&self, book_id: i64) -> Result<ApiResponse> {
        self.send(
            self.http
                .get(self.url(&format!("/Authors/authors/books/{book_id}"))),
        )
        .await
    }

    /// Create an author from a typed record or raw JSON payload.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Transport` on a non-2xx response (400 for
    /// invalid or incomplete payloads, 500 for a duplicate id),
    /// `AppError::Http` on a network-layer failure.
    pub async fn create_author<T: Serialize>(&self, author: &T) -> Result<ApiResponse> {
        self.send(self.http.post(self.url("/Authors")).json(author))
            .await
    }

    /// Replace the author stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Transport` on a non-2xx response (404 for an
    /// unknown id), `AppError::Http` on a network-layer failure.
    pub async fn update_author<T: Serialize>(&self, id: i64, author: &T) -> Result<ApiResponse> {
        self.send(
            self.http
                .put(self.url(&format!("/Authors/{id}")))
                .json(author),
        )
        .await
    }

    /// Delete the author stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Transport` on a non-2xx response, `AppError::Http`
    /// on a network-layer failure.
    pub async fn delete_author(&self, id: i64) -> Result<ApiResponse> {
        self.send(self.http.delete(self.url(&format!("/Authors/{id}"))))
            .await
    }

    /// Delete an author addressing the route with a raw path segment.
    ///
    /// Probes paths a typed id cannot express: an empty segment (405) or a
    /// non-numeric segment (400).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Transport` on a non-2xx response, `AppError::Http`
    /// on a network-layer failure.
    pub async fn delete_author_raw(&self, id: &str) -> Result<ApiResponse> {
        self.send(self.http.delete(self.url(&format!("/Authors/{id}"))))
            .await
    }

    // ── Book endpoints ──────────────────────────────────

    /// Fetch the full book catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Transport` on a non-2xx response, `AppError::Http`
    /// on a network-layer failure.
    pub async fn list_books(&self) -> Result<ApiResponse> {
        self.send(self.http.get(self.url("/Books"))).await
    }

    /// Fetch one book by id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Transport` on a non-2xx response (404 for an
    /// unknown id), `AppError::Http` on a network-layer failure.
    pub async fn get_book_by_id(&self, id: i64) -> Result<ApiResponse> {
        self.send(self.http.get(self.url(&format!("/Books/{id}"))))
            .await
    }

    /// Fetch one book by id with a per-call timeout overriding the
    /// client-wide default. A timeout surfaces as `AppError::Http` and is
    /// treated like any other failure.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Transport` on a non-2xx response, `AppError::Http`
    /// on a network-layer failure or timeout.
    pub async fn get_book_by_id_within(&self, id: i64, timeout: Duration) -> Result<ApiResponse> {
        self.send(
            self.http
                .get(self.url(&format!("/Books/{id}")))
                .timeout(timeout),
        )
        .await
    }

    /// Create a book from a typed record or raw JSON payload.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Transport` on a non-2xx response (400 for
    /// invalid or incomplete payloads, 500 for a duplicate id),
    /// `AppError::Http` on a network-layer failure.
    pub async fn create_book<T: Serialize>(&self, book: &T) -> Result<ApiResponse> {
        self.send(self.http.post(self.url("/Books")).json(book))
            .await
    }

    /// Replace the book stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Transport` on a non-2xx response (404 for an
    /// unknown id), `AppError::Http` on a network-layer failure.
    pub async fn update_book<T: Serialize>(&self, id: i64, book: &T) -> Result<ApiResponse> {
        self.send(self.http.put(self.url(&format!("/Books/{id}"))).json(book))
            .await
    }

    /// Delete the book stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Transport` on a non-2xx response, `AppError::Http`
    /// on a network-layer failure.
    pub async fn delete_book(&self, id: i64) -> Result<ApiResponse> {
        self.send(self.http.delete(self.url(&format!("/Books/{id}"))))
            .await
    }

    /// Delete a book addressing the route with a raw path segment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Transport` on a non-2xx response, `AppError::Http`
    /// on a network-layer failure.
    pub async fn delete_book_raw(&self, id: &str) -> Result<ApiResponse> {
        self.send(self.http.delete(self.url(&format!("/Books/{id}"))))
            .await
    }

    // ── Plumbing ────────────────────────────────────────

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let data = if text.is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(_) => Value::String(text),
            }
        };

        debug!(status, "api call completed");

        if (200..300).contains(&status) {
            Ok(ApiResponse { status, data })
        } else {
            Err(AppError::Transport { status, body: data })
        }
    }
}
