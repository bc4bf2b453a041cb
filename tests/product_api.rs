//! HTTP contract of the product resource against a real (in-memory) store.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{create_product, send, test_app};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn product_lifecycle() {
    let app = test_app(true).await;

    let id = create_product(&app, "Widget").await;
    assert!(Uuid::parse_str(&id).is_ok());

    let (status, json) = send(&app, Method::GET, &format!("/product/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], 200);
    assert_eq!(json["result"]["id"], id);
    assert_eq!(json["result"]["name"], "Widget");

    let (status, json) = send(&app, Method::PUT, &format!("/product/{id}"), Some(r#"{"name":"Widget2"}"#)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(json, serde_json::Value::Null);

    let (status, json) = send(&app, Method::GET, &format!("/product/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"]["name"], "Widget2");

    let (status, _) = send(&app, Method::DELETE, &format!("/product/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = send(&app, Method::GET, &format!("/product/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn missing_schema_differs_from_empty_table() {
    let (status, json) = send(&test_app(false).await, Method::GET, "/product", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "store_error");

    let (status, json) = send(&test_app(true).await, Method::GET, "/product", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "status": 200, "result": [] }));
}

#[tokio::test]
async fn list_renders_camel_case_rows() {
    let app = test_app(true).await;
    create_product(&app, "Widget").await;
    create_product(&app, "Gadget").await;

    let (status, json) = send(&app, Method::GET, "/product", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = json["result"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let mut names: Vec<&str> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Gadget", "Widget"]);
    for row in rows {
        assert!(row["createdAt"].is_string());
        assert!(row["updatedAt"].is_string());
        assert!(row.get("created_at").is_none());
    }

    let (status, _) = send(&app, Method::GET, "/product/", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn options_is_accepted_without_content() {
    let app = test_app(false).await;
    let (status, _) = send(&app, Method::OPTIONS, "/product", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let id = Uuid::new_v4();
    let (status, _) = send(&app, Method::OPTIONS, &format!("/product/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/product")
        .header(header::ORIGIN, "http://example.test")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(preflight).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("PUT"));
}

#[tokio::test]
async fn post_validation() {
    let app = test_app(true).await;
    for body in [r#"{"name":""}"#, r#"{}"#, "not json", "[]", r#"{"name":"x","id":"123"}"#] {
        let (status, json) = send(&app, Method::POST, "/product", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(json["error"]["code"], "validation_error");
    }
    let (_, json) = send(&app, Method::GET, "/product", None).await;
    assert_eq!(json["result"], json!([]));
}

#[tokio::test]
async fn post_without_schema_fails_internally() {
    let app = test_app(false).await;
    let (status, _) = send(&app, Method::POST, "/product", Some(r#"{"name":"Widget"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn post_with_duplicate_id_fails_internally() {
    let app = test_app(true).await;
    let id = Uuid::new_v4();
    let body = format!(r#"{{"id":"{id}","name":"Widget"}}"#);
    let (status, json) = send(&app, Method::POST, "/product", Some(&body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"]["id"], id.to_string());
    let (status, _) = send(&app, Method::POST, "/product", Some(&body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn get_one_outcomes() {
    let migrated = test_app(true).await;
    let (status, _) = send(&migrated, Method::GET, "/product/123", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&migrated, Method::GET, &format!("/product/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let bare = test_app(false).await;
    let (status, _) = send(&bare, Method::GET, &format!("/product/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    // format is checked before the store, so a missing schema is never seen
    let (status, _) = send(&bare, Method::GET, "/product/123", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_outcomes() {
    let app = test_app(true).await;
    let id = create_product(&app, "Widget").await;
    let body = Some(r#"{"name":"Widget2"}"#);

    let (status, _) = send(&app, Method::PUT, "/product/123", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::PUT, "/product/", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::PUT, &format!("/product/{id}"), Some(r#"{"name":""}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::PUT, &format!("/product/{}", Uuid::new_v4()), body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // nothing above changed the stored row
    let (_, json) = send(&app, Method::GET, &format!("/product/{id}"), None).await;
    assert_eq!(json["result"]["name"], "Widget");

    let bare = test_app(false).await;
    let (status, _) = send(&bare, Method::PUT, &format!("/product/{}", Uuid::new_v4()), body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn put_keeps_creation_time() {
    let app = test_app(true).await;
    let id = create_product(&app, "Widget").await;
    let (_, before) = send(&app, Method::GET, &format!("/product/{id}"), None).await;

    send(&app, Method::PUT, &format!("/product/{id}"), Some(r#"{"name":"Widget2","createdAt":"2000-01-01T00:00:00Z"}"#)).await;

    let (_, after) = send(&app, Method::GET, &format!("/product/{id}"), None).await;
    assert_eq!(after["result"]["createdAt"], before["result"]["createdAt"]);
    assert!(after["result"]["updatedAt"].as_str() >= before["result"]["updatedAt"].as_str());
}

#[tokio::test]
async fn delete_outcomes() {
    let app = test_app(true).await;
    let (status, _) = send(&app, Method::DELETE, "/product/", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::DELETE, "/product/123", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::DELETE, &format!("/product/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let bare = test_app(false).await;
    let (status, _) = send(&bare, Method::DELETE, &format!("/product/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn delete_is_not_status_idempotent() {
    let app = test_app(true).await;
    let id = create_product(&app, "Widget").await;
    let (first, _) = send(&app, Method::DELETE, &format!("/product/{id}"), None).await;
    let (second, _) = send(&app, Method::DELETE, &format!("/product/{id}"), None).await;
    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn undecodable_id_is_rejected_not_listed() {
    let app = test_app(true).await;
    create_product(&app, "Widget").await;

    let (status, json) = send(&app, Method::GET, "/product/%FF", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(json.get("result").is_none());

    for method in [Method::PUT, Method::DELETE] {
        let (status, json) = send(&app, method.clone(), "/product/%FF", Some(r#"{"name":"x"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
        let message = json["error"]["message"].as_str().unwrap();
        assert!(message.contains("invalid id"), "{method}: {message}");
    }
}

#[tokio::test]
async fn post_accepts_trailing_slash() {
    let app = test_app(true).await;
    let (status, json) = send(&app, Method::POST, "/product/", Some(r#"{"name":"Widget"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let id = json["result"]["id"].as_str().unwrap();
    let (status, _) = send(&app, Method::GET, &format!("/product/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn oversized_body_keeps_the_envelope() {
    let app = test_app(true).await;
    let body = format!(r#"{{"name":"{}"}}"#, "x".repeat(2 * 1024 * 1024));
    let (status, json) = send(&app, Method::POST, "/product", Some(&body)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["status"], 413);
    assert_eq!(json["error"]["code"], "payload_too_large");

    let (_, json) = send(&app, Method::GET, "/product", None).await;
    assert_eq!(json["result"], json!([]));
}

#[tokio::test]
async fn common_routes() {
    let app = test_app(false).await;
    let (status, json) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "status": 200, "result": "Service OK" }));

    let (status, json) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["store"], "ok");

    let (status, json) = send(&app, Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "crud-service");
}
