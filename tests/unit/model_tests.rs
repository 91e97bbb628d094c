//! Serde round-trip and wire-name tests for the domain records.

use bookapi_contract::models::{Author, Book};
use serde_json::json;

#[test]
fn book_round_trip() {
    let book = Book {
        id: 12,
        title: Some("Book 12".into()),
        description: Some("desc".into()),
        page_count: 1200,
        excerpt: Some("excerpt".into()),
        publish_date: "2024-05-01T00:00:00Z".into(),
    };

    let raw = serde_json::to_string(&book).expect("serialize book");
    let back: Book = serde_json::from_str(&raw).expect("deserialize book");
    assert_eq!(book, back);
}

/// Wire field names are camelCase, matching the API contract.
#[test]
fn book_serializes_with_camel_case_names() {
    let book = Book {
        id: 1,
        title: None,
        description: None,
        page_count: 10,
        excerpt: None,
        publish_date: "2024-05-01T00:00:00Z".into(),
    };

    let value = serde_json::to_value(&book).expect("serialize book");
    assert!(value.get("pageCount").is_some());
    assert!(value.get("publishDate").is_some());
    assert!(value.get("page_count").is_none());
}

#[test]
fn book_null_text_fields_deserialize_to_none() {
    let raw = json!({
        "id": 3,
        "title": null,
        "description": null,
        "pageCount": 0,
        "excerpt": null,
        "publishDate": "2024-05-01T00:00:00Z",
    });

    let book: Book = serde_json::from_value(raw).expect("deserialize book");
    assert!(book.title.is_none());
    assert!(book.description.is_none());
    assert!(book.excerpt.is_none());
}

#[test]
fn author_round_trip() {
    let author = Author {
        id: 9,
        id_book: 12,
        first_name: Some("First".into()),
        last_name: None,
    };

    let raw = serde_json::to_string(&author).expect("serialize author");
    let back: Author = serde_json::from_str(&raw).expect("deserialize author");
    assert_eq!(author, back);
}

#[test]
fn author_serializes_with_camel_case_names() {
    let author = Author {
        id: 9,
        id_book: 12,
        first_name: None,
        last_name: None,
    };

    let value = serde_json::to_value(&author).expect("serialize author");
    assert!(value.get("idBook").is_some());
    assert!(value.get("firstName").is_some());
    assert!(value.get("id_book").is_none());
}
