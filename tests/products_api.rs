//! End-to-end tests of the products endpoints over an in-memory database.

use reqwest::StatusCode;
use products_api::http::response::MessageBody;
use products_api::products::model::{Product, ProductList, ProductMessage};
use serde_json::{json, Value};

mod common;

use common::TestService;

async fn create(service: &TestService, body: Value) -> reqwest::Response {
    service
        .client
        .post(service.url("/products"))
        .json(&body)
        .send()
        .await
        .expect("service unreachable")
}

async fn create_ok(service: &TestService, name: &str, price: f64, stock: i64) -> Product {
    let res = create(
        service,
        json!({ "productname": name, "price": price, "stock": stock }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    res.json::<ProductMessage>().await.unwrap().product
}

async fn list(service: &TestService) -> Vec<Product> {
    let res = service.client.get(service.url("/products")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json::<ProductList>().await.unwrap().products
}

#[tokio::test]
async fn test_create_widget() {
    let service = common::start_service().await;

    let res = create(
        &service,
        json!({ "productname": "Widget", "price": 9.99, "stock": 5 }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: ProductMessage = res.json().await.unwrap();
    assert_eq!(body.message, "Product created successfully.");
    assert_eq!(body.product.productname, "Widget");
    assert_eq!(body.product.price, 9.99);
    assert_eq!(body.product.stock, 5);
    assert!(body.product.id > 0);
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let service = common::start_service().await;
    let created = create_ok(&service, "Gadget", 12.5, 40).await;

    let res = service
        .client
        .get(service.url(&format!("/products/{}", created.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let fetched: Product = res.json().await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_response_uses_json_field_names() {
    let service = common::start_service().await;
    create_ok(&service, "Widget", 1.0, 1).await;

    let body: Value = service
        .client
        .get(service.url("/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let product = &body["products"][0];
    assert!(product.get("id").is_some());
    assert_eq!(product["productname"], "Widget");
    assert_eq!(product["price"], 1.0);
    assert_eq!(product["stock"], 1);
    assert!(product.get("PRODUCTNAME").is_none());
}

#[tokio::test]
async fn test_list_returns_products_in_insertion_order() {
    let service = common::start_service().await;
    assert!(list(&service).await.is_empty());

    let a = create_ok(&service, "A", 1.0, 1).await;
    let b = create_ok(&service, "B", 2.0, 2).await;

    assert_eq!(list(&service).await, vec![a, b]);
}

#[tokio::test]
async fn test_assigned_ids_are_never_reused() {
    let service = common::start_service().await;
    let first = create_ok(&service, "A", 1.0, 1).await;

    let res = service
        .client
        .delete(service.url(&format!("/products/{}", first.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let second = create_ok(&service, "B", 1.0, 1).await;
    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_get_missing_product_is_404() {
    let service = common::start_service().await;

    let res = service
        .client
        .get(service.url("/products/999999"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: MessageBody = res.json().await.unwrap();
    assert_eq!(body.message, "Product not found");
}

#[tokio::test]
async fn test_invalid_payloads_are_rejected_without_writing() {
    let service = common::start_service().await;
    let existing = create_ok(&service, "Widget", 9.99, 5).await;

    let cases = [
        (json!({ "price": 1, "stock": 1 }), "\"productname\" is required"),
        (json!({ "productname": "x", "stock": 1 }), "\"price\" is required"),
        (json!({ "productname": "x", "price": 1 }), "\"stock\" is required"),
        (json!({ "productname": 5, "price": 1, "stock": 1 }), "\"productname\" must be a string"),
        (json!({ "productname": "x", "price": "cheap", "stock": 1 }), "\"price\" must be a number"),
        (json!({ "productname": "x", "price": 1, "stock": [] }), "\"stock\" must be a number"),
    ];

    for (payload, message) in cases {
        let res = create(&service, payload.clone()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "create {payload}");
        let detail: Value = res.json().await.unwrap();
        assert_eq!(detail["message"], message);

        let res = service
            .client
            .put(service.url(&format!("/products/{}", existing.id)))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "update {payload}");
    }

    assert_eq!(list(&service).await, vec![existing]);
}

#[tokio::test]
async fn test_malformed_json_body_is_400() {
    let service = common::start_service().await;

    let res = service
        .client
        .post(service.url("/products"))
        .header("content-type", "application/json")
        .body("{\"productname\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let detail: Value = res.json().await.unwrap();
    assert_eq!(detail["type"], "object.base");
    assert!(list(&service).await.is_empty());
}

#[tokio::test]
async fn test_update_replaces_fields_and_keeps_id() {
    let service = common::start_service().await;
    let created = create_ok(&service, "Widget", 9.99, 5).await;

    let res = service
        .client
        .put(service.url(&format!("/products/{}", created.id)))
        .json(&json!({ "productname": "Widget Pro", "price": 19.5, "stock": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: ProductMessage = res.json().await.unwrap();
    assert_eq!(body.message, "Product updated successfully.");
    assert_eq!(
        body.product,
        Product {
            id: created.id,
            productname: "Widget Pro".into(),
            price: 19.5,
            stock: 2,
        }
    );
    assert_eq!(list(&service).await, vec![body.product]);
}

#[tokio::test]
async fn test_missing_ids_are_404_without_mutation() {
    let service = common::start_service().await;
    let existing = create_ok(&service, "Widget", 9.99, 5).await;

    let res = service
        .client
        .put(service.url("/products/424242"))
        .json(&json!({ "productname": "Ghost", "price": 1, "stock": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = service
        .client
        .delete(service.url("/products/424242"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    assert_eq!(list(&service).await, vec![existing]);
}

#[tokio::test]
async fn test_delete_returns_snapshot_and_second_delete_is_404() {
    let service = common::start_service().await;
    let created = create_ok(&service, "Widget", 9.99, 5).await;
    let url = service.url(&format!("/products/{}", created.id));

    let res = service.client.delete(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: ProductMessage = res.json().await.unwrap();
    assert_eq!(body.message, "Product deleted successfully.");
    assert_eq!(body.product, created);

    let res = service.client.delete(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = service.client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_integer_id_is_400() {
    let service = common::start_service().await;
    let url = service.url("/products/abc");

    let responses = [
        service.client.get(&url).send().await.unwrap(),
        service
            .client
            .put(&url)
            .json(&json!({ "productname": "x", "price": 1, "stock": 1 }))
            .send()
            .await
            .unwrap(),
        service.client.delete(&url).send().await.unwrap(),
    ];

    for res in responses {
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: MessageBody = res.json().await.unwrap();
        assert_eq!(body.message, "Invalid product id");
    }
}

#[tokio::test]
async fn test_price_is_stored_with_two_decimals() {
    let service = common::start_service().await;
    let created = create_ok(&service, "Rounded", 2.345678, 1).await;
    assert_eq!(created.price, 2.35);
}

#[tokio::test]
async fn test_price_overflow_is_500_without_details() {
    let service = common::start_service().await;

    let res = create(
        &service,
        json!({ "productname": "Yacht", "price": 1e12, "stock": 1 }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Server error" }));
    assert!(list(&service).await.is_empty());
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let service = common::start_service().await;

    let res = service.client.get(service.url("/products")).send().await.unwrap();
    assert!(res.headers().get("x-request-id").is_some());

    let res = service
        .client
        .get(service.url("/products"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me");
}

#[tokio::test]
async fn test_oversized_body_is_413() {
    let service = common::start_service().await;
    let name = "x".repeat(128 * 1024);

    let res = service
        .client
        .post(service.url("/products"))
        .header("content-type", "application/json")
        .body(format!(r#"{{"productname":"{name}","price":1,"stock":1}}"#))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(list(&service).await.is_empty());
}
