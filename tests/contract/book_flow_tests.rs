//! Book CRUD contract scenarios against the mock API.

use std::time::Duration;

use assert_json_diff::{assert_json_eq, assert_json_include};
use bookapi_contract::fixtures;
use bookapi_contract::AppError;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::test_helpers::{context, payload};

/// Round-trip property: creating a book and reading it back by the
/// fixture's id yields a response deep-including every field.
#[tokio::test]
async fn created_book_reads_back_with_every_field() {
    let book = fixtures::randomized_book(fixtures::random_id(100, 200));
    let body = payload(&book);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Books"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/Books/{}", book.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let ctx = context(&server, 200);
    ctx.book_round_trip(&book).await.expect("round trip");
}

/// Concrete derivation contract: id N yields title "Book N" and
/// pageCount N*100 on the stored record.
#[tokio::test]
async fn randomized_book_fields_derive_from_the_generated_id() {
    let id = fixtures::random_id(100, 200);
    let book = fixtures::randomized_book(id);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/Books/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload(&book)))
        .mount(&server)
        .await;

    let ctx = context(&server, 200);
    let response = ctx.client().get_book_by_id(id).await.expect("get book");
    assert_json_include!(
        actual: response.data,
        expected: json!({
            "id": id,
            "title": format!("Book {id}"),
            "pageCount": id * 100,
        })
    );
}

#[tokio::test]
async fn crud_flow_chains_create_update_delete_on_one_id() {
    let book = fixtures::randomized_book(fixtures::random_id(100, 200));
    let replacement = fixtures::updated_book(book.id);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload(&book)))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/Books/{}", book.id)))
        .and(body_json(payload(&replacement)))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload(&replacement)))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/Books/{}", book.id)))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let ctx = context(&server, 200);
    ctx.book_crud_flow(&book).await.expect("crud flow");
}

/// Update is idempotent: repeating the same payload yields the same
/// stored state.
#[tokio::test]
async fn repeated_update_yields_identical_state() {
    let book = fixtures::randomized_book(fixtures::random_id(100, 200));
    let replacement = fixtures::updated_book(book.id);

    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/Books/{}", book.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload(&replacement)))
        .mount(&server)
        .await;

    let ctx = context(&server, 200);
    let first = ctx
        .client()
        .update_book(book.id, &replacement)
        .await
        .expect("first update");
    let second = ctx
        .client()
        .update_book(book.id, &replacement)
        .await
        .expect("second update");
    assert_json_eq!(first.data, second.data);
}

/// Boundary-valid data (zero id, empty strings, zero count) is accepted.
#[tokio::test]
async fn edge_case_book_is_accepted() {
    let book = fixtures::edge_case_book();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Books"))
        .and(body_json(payload(&book)))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload(&book)))
        .mount(&server)
        .await;

    let ctx = context(&server, 200);
    ctx.expect_book_accepted(&book).await.expect("edge case accepted");
}

/// A per-call timeout is treated like any other failure, with no retry.
#[tokio::test]
async fn slow_response_times_out_as_a_transport_failure() {
    let book = fixtures::deterministic_book();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/Books/{}", book.id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(payload(&book))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server, 200);
    let err = ctx
        .client()
        .get_book_by_id_within(book.id, Duration::from_millis(50))
        .await
        .expect_err("timeout");
    assert!(matches!(err, AppError::Http(_)), "got: {err}");
}
