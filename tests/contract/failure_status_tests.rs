//! Expected-failure contract scenarios: every non-200 path the API
//! documents, asserted through `expect_status`.

use bookapi_contract::fixtures;
use bookapi_contract::scenario::expect_status;
use bookapi_contract::AppError;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::test_helpers::{context, payload, problem_details};

#[tokio::test]
async fn unknown_book_id_is_not_found() {
    let missing = fixtures::non_existing_id();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/Books/{missing}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(problem_details(404, "Not Found")))
        .mount(&server)
        .await;

    let ctx = context(&server, 200);
    expect_status(ctx.client().get_book_by_id(missing).await, 404).expect("404 expected");
}

#[tokio::test]
async fn updating_a_missing_author_is_not_found() {
    let missing = fixtures::non_existing_id();
    let valid = fixtures::deterministic_author();

    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/Authors/{missing}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(problem_details(404, "Not Found")))
        .mount(&server)
        .await;

    let ctx = context(&server, 200);
    expect_status(ctx.client().update_author(missing, &valid).await, 404).expect("404 expected");
}

#[tokio::test]
async fn invalid_book_data_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Books"))
        .and(body_json(fixtures::invalid_book()))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(problem_details(400, "One or more validation errors occurred.")),
        )
        .mount(&server)
        .await;

    let ctx = context(&server, 200);
    expect_status(
        ctx.client().create_book(&fixtures::invalid_book()).await,
        400,
    )
    .expect("400 expected");
}

#[tokio::test]
async fn missing_required_fields_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Authors"))
        .and(body_json(fixtures::missing_fields_author()))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(problem_details(400, "One or more validation errors occurred.")),
        )
        .mount(&server)
        .await;

    let ctx = context(&server, 200);
    expect_status(
        ctx.client()
            .create_author(&fixtures::missing_fields_author())
            .await,
        400,
    )
    .expect("400 expected");
}

#[tokio::test]
async fn empty_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Books"))
        .and(body_json(json!({})))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(problem_details(400, "One or more validation errors occurred.")),
        )
        .mount(&server)
        .await;

    let ctx = context(&server, 200);
    expect_status(ctx.client().create_book(&json!({})).await, 400).expect("400 expected");
}

/// Duplicate-id create conflicts server-side; create is not idempotent.
#[tokio::test]
async fn duplicate_book_create_conflicts() {
    let book = fixtures::deterministic_book();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Books"))
        .and(body_json(payload(&book)))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(problem_details(500, "Duplicate key")),
        )
        .mount(&server)
        .await;

    let ctx = context(&server, 200);
    expect_status(ctx.client().create_book(&book).await, 500).expect("500 expected");
}

/// Deleting with an empty id segment is method-not-allowed, not a 400/404.
#[tokio::test]
async fn deleting_with_an_empty_id_is_not_allowed() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/Authors/"))
        .respond_with(ResponseTemplate::new(405).set_body_json(problem_details(405, "Method Not Allowed")))
        .mount(&server)
        .await;

    let ctx = context(&server, 200);
    expect_status(ctx.client().delete_author_raw("").await, 405).expect("405 expected");
}

#[tokio::test]
async fn deleting_with_a_malformed_id_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/Books/abc"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(problem_details(400, "One or more validation errors occurred.")),
        )
        .mount(&server)
        .await;

    let ctx = context(&server, 200);
    expect_status(ctx.client().delete_book_raw("abc").await, 400).expect("400 expected");
}

/// An operation expected to fail that succeeds instead surfaces as
/// `UnexpectedSuccess`, not a silent pass.
#[tokio::test]
async fn unexpected_success_is_surfaced() {
    let book = fixtures::deterministic_book();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/Books/{}", book.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload(&book)))
        .mount(&server)
        .await;

    let ctx = context(&server, 200);
    let err = expect_status(ctx.client().get_book_by_id(book.id).await, 404)
        .expect_err("success must not satisfy an expected failure");
    assert!(matches!(err, AppError::UnexpectedSuccess(_)), "got: {err}");
}

/// A failure with the wrong status propagates the original transport
/// error instead of matching.
#[tokio::test]
async fn mismatched_failure_status_propagates() {
    let missing = fixtures::non_existing_id();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/Books/{missing}")))
        .respond_with(ResponseTemplate::new(400).set_body_json(problem_details(400, "Bad Request")))
        .mount(&server)
        .await;

    let ctx = context(&server, 200);
    let err = expect_status(ctx.client().get_book_by_id(missing).await, 404)
        .expect_err("wrong status must propagate");
    assert_eq!(err.status(), Some(400));
}
