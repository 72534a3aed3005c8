//! Handler tests for the catalog domain
//!
//! These tests drive the HTTP handlers end to end against the in-memory
//! repository: request deserialization, status codes, response bodies,
//! and the price-change event flow.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_ai::CatalogAi;
use domain_catalog::*;
use domain_events::{InMemoryEventBus, IntegrationEventService};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::json;
use test_utils::TempPics;
use tower::ServiceExt; // For oneshot()

struct TestApp {
    app: Router,
    bus: Arc<InMemoryEventBus>,
    // Held so the pics dir outlives the requests
    _pics: TempPics,
}

fn test_app(test_name: &str) -> TestApp {
    let repo = InMemoryCatalogRepository::new();
    let bus = Arc::new(InMemoryEventBus::new());
    let events = IntegrationEventService::new(repo.event_log(), bus.clone());
    let pics = TempPics::new(test_name).expect("temp pics dir");
    let service = CatalogService::new(
        repo,
        CatalogAi::disabled(),
        events,
        PictureStore::new(pics.path()),
    );

    TestApp {
        app: handlers::router(service),
        bus,
        _pics: pics,
    }
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn item_json(name: &str, price: &str) -> serde_json::Value {
    json!({
        "name": name,
        "description": format!("{} description", name),
        "price": price,
        "catalog_type_id": 1,
        "catalog_brand_id": 1,
        "available_stock": 10,
        "restock_threshold": 2,
        "max_stock_threshold": 100
    })
}

async fn create_item(app: &Router, body: serde_json::Value) -> CatalogItem {
    let request = Request::builder()
        .method("POST")
        .uri("/items")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Body) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    (parts.status, body)
}

#[tokio::test]
async fn test_create_item_handler_returns_201() {
    let t = test_app("create_201");

    let item = create_item(&t.app, item_json("Alpine Fork", "12.50")).await;
    assert_eq!(item.name, "Alpine Fork");
    assert_eq!(item.price, Decimal::new(1250, 2));
    assert!(item.id > 0);
}

#[tokio::test]
async fn test_create_item_handler_validates_input() {
    let t = test_app("create_validate");

    let request = Request::builder()
        .method("POST")
        .uri("/items")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&item_json("", "12.50")).unwrap(),
        ))
        .unwrap();

    let response = t.app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_item_handler_returns_200() {
    let t = test_app("get_200");
    let created = create_item(&t.app, item_json("Alpine Fork", "12.50")).await;

    let (status, body) = get(&t.app, &format!("/items/{}", created.id)).await;
    assert_eq!(status, StatusCode::OK);

    let item: CatalogItem = json_body(body).await;
    assert_eq!(item.id, created.id);
    assert_eq!(item.name, "Alpine Fork");
}

#[tokio::test]
async fn test_get_item_handler_returns_404_for_missing() {
    let t = test_app("get_404");
    let (status, _) = get(&t.app, "/items/12345").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_item_handler_rejects_non_positive_ids() {
    let t = test_app("get_bad_id");

    for id in ["0", "-5"] {
        let (status, _) = get(&t.app, &format!("/items/{}", id)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "id {} should be rejected", id);
    }
}

#[tokio::test]
async fn test_list_items_pagination_slices() {
    let t = test_app("pagination");
    for i in 0..23 {
        create_item(&t.app, item_json(&format!("Item {:02}", i), "9.95")).await;
    }

    let mut seen = Vec::new();
    for (page_index, expected_len) in [(0, 10), (1, 10), (2, 3)] {
        let (status, body) = get(
            &t.app,
            &format!("/items?page_index={}&page_size=10", page_index),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let page: PaginatedItems = json_body(body).await;
        assert_eq!(page.count, 23);
        assert_eq!(page.page_index, page_index);
        assert_eq!(page.data.len(), expected_len);
        seen.extend(page.data.into_iter().map(|item| item.id));
    }

    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 23, "pages must not overlap or skip items");
}

#[tokio::test]
async fn test_list_items_with_filters() {
    let t = test_app("filters");
    create_item(&t.app, item_json("Alpine Fork", "12.50")).await;
    create_item(&t.app, item_json("Alpine Saddle", "20.00")).await;
    let mut other_brand = item_json("Alpine Stem", "8.00");
    other_brand["catalog_brand_id"] = json!(2);
    create_item(&t.app, other_brand).await;
    create_item(&t.app, item_json("Trail Helmet", "35.00")).await;

    let (status, body) = get(&t.app, "/items?name=alpine&brand_id=1").await;
    assert_eq!(status, StatusCode::OK);

    let page: PaginatedItems = json_body(body).await;
    assert_eq!(page.count, 2);
    assert!(page.data.iter().all(|i| i.name.starts_with("Alpine")));
}

#[tokio::test]
async fn test_get_items_by_ids() {
    let t = test_app("by_ids");
    let a = create_item(&t.app, item_json("Alpine Fork", "12.50")).await;
    let b = create_item(&t.app, item_json("Trail Helmet", "35.00")).await;

    let (status, body) = get(&t.app, &format!("/items/by?ids={},{},999", a.id, b.id)).await;
    assert_eq!(status, StatusCode::OK);

    let items: Vec<CatalogItem> = json_body(body).await;
    assert_eq!(items.len(), 2);

    let (status, _) = get(&t.app, "/items/by?ids=1,two,3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_items_by_name_prefix() {
    let t = test_app("by_name");
    create_item(&t.app, item_json("Alpine Fork", "12.50")).await;
    create_item(&t.app, item_json("Trail Helmet", "35.00")).await;

    let (status, body) = get(&t.app, "/items/by/Alpine").await;
    assert_eq!(status, StatusCode::OK);

    let page: PaginatedItems = json_body(body).await;
    assert_eq!(page.count, 1);
    assert_eq!(page.data[0].name, "Alpine Fork");
}

#[tokio::test]
async fn test_semantic_relevance_falls_back_to_name_search() {
    let t = test_app("semantic_fallback");
    create_item(&t.app, item_json("Alpine Fork", "12.50")).await;
    create_item(&t.app, item_json("Trail Helmet", "35.00")).await;

    let (status, body) = get(&t.app, "/items/withsemanticrelevance/Alpine").await;
    assert_eq!(status, StatusCode::OK);

    let semantic: PaginatedItems = json_body(body).await;
    let (_, body) = get(&t.app, "/items/by/Alpine").await;
    let by_name: PaginatedItems = json_body(body).await;

    assert_eq!(semantic.data, by_name.data);
}

#[tokio::test]
async fn test_get_items_by_type_and_brand() {
    let t = test_app("type_brand");
    create_item(&t.app, item_json("Alpine Fork", "12.50")).await;
    let mut other = item_json("Trail Helmet", "35.00");
    other["catalog_type_id"] = json!(2);
    create_item(&t.app, other).await;

    let (status, body) = get(&t.app, "/items/type/2/brand/1").await;
    assert_eq!(status, StatusCode::OK);
    let page: PaginatedItems = json_body(body).await;
    assert_eq!(page.count, 1);
    assert_eq!(page.data[0].name, "Trail Helmet");

    let (status, body) = get(&t.app, "/items/type/all/brand/1").await;
    assert_eq!(status, StatusCode::OK);
    let page: PaginatedItems = json_body(body).await;
    assert_eq!(page.count, 2);
}

#[tokio::test]
async fn test_get_item_picture_serves_mime_type() {
    let t = test_app("picture");
    t._pics.add("fork.png", b"png-bytes").unwrap();

    let mut with_pic = item_json("Alpine Fork", "12.50");
    with_pic["picture_file_name"] = json!("fork.png");
    let item = create_item(&t.app, with_pic).await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/items/{}/pic", item.id))
        .body(Body::empty())
        .unwrap();
    let response = t.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/png"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"png-bytes");
}

#[tokio::test]
async fn test_get_item_picture_404_when_item_has_none() {
    let t = test_app("picture_404");
    let item = create_item(&t.app, item_json("Alpine Fork", "12.50")).await;

    let (status, _) = get(&t.app, &format!("/items/{}/pic", item.id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_item_price_change_publishes_event() {
    let t = test_app("price_event");
    let item = create_item(&t.app, item_json("Alpine Fork", "9.95")).await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/items/{}", item.id))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&item_json("Alpine Fork", "12.50")).unwrap(),
        ))
        .unwrap();

    let response = t.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: CatalogItem = json_body(response.into_body()).await;
    assert_eq!(updated.price, Decimal::new(1250, 2));

    let published = t.bus.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0, "ProductPriceChangedIntegrationEvent");
    assert_eq!(published[0].1["product_id"], item.id);
}

#[tokio::test]
async fn test_update_item_same_price_publishes_nothing() {
    let t = test_app("no_price_event");
    let item = create_item(&t.app, item_json("Alpine Fork", "9.95")).await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/items/{}", item.id))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&item_json("Alpine Fork Mk2", "9.95")).unwrap(),
        ))
        .unwrap();

    let response = t.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(t.bus.published().is_empty());
}

#[tokio::test]
async fn test_update_missing_item_returns_404() {
    let t = test_app("update_404");

    let request = Request::builder()
        .method("PUT")
        .uri("/items/999")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&item_json("Ghost", "1.00")).unwrap(),
        ))
        .unwrap();

    let response = t.app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_item_handler_returns_204_then_404() {
    let t = test_app("delete");
    let item = create_item(&t.app, item_json("Alpine Fork", "12.50")).await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/items/{}", item.id))
        .body(Body::empty())
        .unwrap();
    let response = t.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/items/{}", item.id))
        .body(Body::empty())
        .unwrap();
    let response = t.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_brands_and_types() {
    let repo = InMemoryCatalogRepository::new();
    repo.set_lookups(
        vec![CatalogBrand {
            id: 1,
            brand: "Ridgeback".to_string(),
        }],
        vec![CatalogType {
            id: 1,
            type_name: "Mountain Bike".to_string(),
        }],
    )
    .await;

    let bus = Arc::new(InMemoryEventBus::new());
    let events = IntegrationEventService::new(repo.event_log(), bus);
    let pics = TempPics::new("brands_types").expect("temp pics dir");
    let service = CatalogService::new(
        repo,
        CatalogAi::disabled(),
        events,
        PictureStore::new(pics.path()),
    );
    let app = handlers::router(service);

    let (status, body) = get(&app, "/catalogbrands").await;
    assert_eq!(status, StatusCode::OK);
    let brands: Vec<CatalogBrand> = json_body(body).await;
    assert_eq!(brands.len(), 1);
    assert_eq!(brands[0].brand, "Ridgeback");

    let (status, body) = get(&app, "/catalogtypes").await;
    assert_eq!(status, StatusCode::OK);
    let types: Vec<CatalogType> = json_body(body).await;
    assert_eq!(types[0].type_name, "Mountain Bike");
}
