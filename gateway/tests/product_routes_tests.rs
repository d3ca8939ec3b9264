// tests/product_routes_tests.rs
#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::*;
use serde_json::{json, Value};
use trade_core::{Collection, DocumentStore, Filter};

#[actix_web::test]
async fn test_root_reports_liveness() {
  let fx = fixture().await;
  let app = test_app!(fx.state);
  let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = test::read_body(resp).await;
  assert_eq!(body, "Server is running");
}

#[actix_web::test]
async fn test_health_pings_the_store() {
  let fx = fixture().await;
  let app = test_app!(fx.state);
  let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({"status": "ok", "store": "memory"}));
}

#[actix_web::test]
async fn test_missing_product_is_a_sentinel_not_a_404() {
  let fx = fixture().await;
  let app = test_app!(fx.state);
  let req = test::TestRequest::get().uri(&format!("/products/{}", MISSING_ID)).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["found"], json!(false));
  assert_eq!(body["message"], "Product not found");
}

#[actix_web::test]
async fn test_existing_product_is_returned() {
  let fx = fixture().await;
  let app = test_app!(fx.state);
  let id = fx.product_ids[1].to_hex();
  let req = test::TestRequest::get().uri(&format!("/products/{}", id)).to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["_id"], json!(id));
  assert_eq!(body["productName"], "Saffron");
}

#[actix_web::test]
async fn test_malformed_identifiers_are_rejected_everywhere() {
  let fx = fixture().await;
  let app = test_app!(fx.state);
  let too_short = "64b7f0c2e4b0";
  let not_hex = "zzzzzzzzzzzzzzzzzzzzzzzz";

  for bad in [too_short, not_hex] {
    let requests = vec![
      test::TestRequest::get().uri(&format!("/products/{}", bad)).to_request(),
      test::TestRequest::put()
        .uri(&format!("/my-export/{}", bad))
        .set_json(json!({"price": 1}))
        .to_request(),
      test::TestRequest::delete().uri(&format!("/my-export/{}", bad)).to_request(),
      test::TestRequest::post()
        .uri(&format!("/imports/{}", bad))
        .set_json(json!({"userQuantity": 1}))
        .to_request(),
      test::TestRequest::delete().uri(&format!("/my-imports/{}", bad)).to_request(),
    ];
    for req in requests {
      let path = req.path().to_string();
      let resp = test::call_service(&app, req).await;
      assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", path);
      let body: Value = test::read_body_json(resp).await;
      assert!(body["error"].as_str().unwrap().contains("identifier"), "{}: {}", path, body);
    }
  }
  assert_eq!(fx.store.len(Collection::Imports), 0);
}

#[actix_web::test]
async fn test_listing_filters_sorts_and_paginates() {
  let fx = fixture().await;
  let app = test_app!(fx.state);

  let all: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::get().uri("/products?category=all&limit=50").to_request(),
  )
  .await;
  let none: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::get().uri("/products?limit=50").to_request(),
  )
  .await;
  assert_eq!(all, none);
  assert_eq!(all["total"], json!(5));
  assert_eq!(names(&all["products"])[0], "Matcha");

  let low: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::get().uri("/products?sort=price-low").to_request(),
  )
  .await;
  let prices: Vec<f64> = low["products"]
    .as_array()
    .unwrap()
    .iter()
    .map(|p| p["price"].as_f64().unwrap())
    .collect();
  assert_eq!(prices, vec![4.0, 12.0, 18.0, 30.0, 80.0]);

  let page: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::get().uri("/products?limit=2&page=3").to_request(),
  )
  .await;
  assert_eq!(page["products"].as_array().unwrap().len(), 1);
  assert_eq!(page["totalPages"], json!(3));
  assert_eq!(page["currentPage"], json!(3));

  let filtered: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::get()
      .uri("/products?category=Spices&rating=4&search=SAF")
      .to_request(),
  )
  .await;
  assert_eq!(names(&filtered["products"]), vec!["Saffron"]);
}

#[actix_web::test]
async fn test_latest_top_rated_and_search() {
  let fx = fixture().await;
  let app = test_app!(fx.state);

  let latest: Value =
    test::call_and_read_body_json(&app, test::TestRequest::get().uri("/latest-products").to_request()).await;
  assert_eq!(
    names(&latest),
    vec!["Matcha", "Arabica Beans", "Cumin", "Saffron", "Green Tea"]
  );

  let top: Value =
    test::call_and_read_body_json(&app, test::TestRequest::get().uri("/top-rated-products").to_request()).await;
  assert_eq!(names(&top)[0], "Saffron");
  assert_eq!(names(&top)[4], "Cumin");

  let found: Value =
    test::call_and_read_body_json(&app, test::TestRequest::get().uri("/search?search=tea").to_request()).await;
  assert_eq!(names(&found), vec!["Green Tea"]);

  let everything: Value =
    test::call_and_read_body_json(&app, test::TestRequest::get().uri("/search").to_request()).await;
  assert_eq!(everything.as_array().unwrap().len(), 5);
}

#[actix_web::test]
async fn test_create_update_and_delete_an_export() {
  let fx = fixture().await;
  let app = test_app!(fx.state);

  let created: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::post()
      .uri("/products")
      .set_json(json!({
        "_id": "not-used",
        "productName": "Cardamom",
        "category": "Spices",
        "price": 15,
        "availableQuantity": 12,
        "exportBy": "carol@trade.io",
        "origin": "Kerala"
      }))
      .to_request(),
  )
  .await;
  assert_eq!(created["acknowledged"], json!(true));
  let id = created["insertedId"].as_str().unwrap().to_string();
  assert_eq!(id.len(), 24);

  let mine: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::get().uri("/my-export?email=carol@trade.io").to_request(),
  )
  .await;
  assert_eq!(names(&mine), vec!["Cardamom"]);
  assert_eq!(mine[0]["origin"], "Kerala");

  let updated: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::put()
      .uri(&format!("/my-export/{}", id))
      .set_json(json!({"price": 17.5, "_id": MISSING_ID}))
      .to_request(),
  )
  .await;
  assert_eq!(updated, json!({"acknowledged": true, "matchedCount": 1, "modifiedCount": 1}));

  let stored = fx
    .store
    .find_one(Collection::Products, &Filter::eq("_id", id.clone()))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(stored["price"], json!(17.5));
  assert_eq!(stored["productName"], "Cardamom");

  let deleted: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::delete().uri(&format!("/my-export/{}", id)).to_request(),
  )
  .await;
  assert_eq!(deleted, json!({"acknowledged": true, "deletedCount": 1}));

  let again: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::delete().uri(&format!("/my-export/{}", id)).to_request(),
  )
  .await;
  assert_eq!(again["deletedCount"], json!(0));
}

#[actix_web::test]
async fn test_non_object_and_malformed_bodies_are_bad_requests() {
  let fx = fixture().await;
  let app = test_app!(fx.state);

  let resp = test::call_service(
    &app,
    test::TestRequest::post().uri("/products").set_json(json!([1, 2, 3])).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/products")
      .insert_header(("content-type", "application/json"))
      .set_payload("{not json")
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
  assert_eq!(fx.store.len(Collection::Products), 5);
}
