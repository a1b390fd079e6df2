//! End-to-end tests for the tag endpoints: ownership isolation, ordering,
//! and validation.

#[path = "support/http.rs"]
mod http_support;

use actix_web::http::{StatusCode, header};
use actix_web::test;
use http_support::{app, app_state, bearer, get_json, post_created, read_json, register};
use serde_json::{Value, json};

fn names_of(value: &Value) -> Vec<&str> {
    value
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|item| item.get("name").and_then(Value::as_str))
        .collect()
}

#[actix_web::test]
async fn listing_requires_authentication() {
    let state = app_state();
    let app = test::init_service(app(&state)).await;

    let request = test::TestRequest::get().uri("/recipe/tags").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let value = read_json(response).await;
    assert_eq!(
        value.get("code").and_then(Value::as_str),
        Some("unauthorized")
    );
}

#[actix_web::test]
async fn listing_only_returns_the_callers_tags_name_descending() {
    let state = app_state();
    let app = test::init_service(app(&state)).await;
    register(&app, "cook@example.com", "testPassword").await;
    register(&app, "other@example.com", "testPassword").await;
    let cook = bearer(&app, "cook@example.com", "testPassword").await;
    let other = bearer(&app, "other@example.com", "testPassword").await;

    for name in ["Breakfast", "Vegan", "Dessert"] {
        post_created(&app, "/recipe/tags", &cook, json!({ "name": name })).await;
    }
    post_created(&app, "/recipe/tags", &other, json!({ "name": "Stolen" })).await;

    let value = get_json(&app, "/recipe/tags", &cook).await;
    assert_eq!(names_of(&value), vec!["Vegan", "Dessert", "Breakfast"]);

    let value = get_json(&app, "/recipe/tags", &other).await;
    assert_eq!(names_of(&value), vec!["Stolen"]);
}

#[actix_web::test]
async fn creating_a_tag_with_a_blank_name_fails() {
    let state = app_state();
    let app = test::init_service(app(&state)).await;
    register(&app, "cook@example.com", "testPassword").await;
    let authorization = bearer(&app, "cook@example.com", "testPassword").await;

    let request = test::TestRequest::post()
        .uri("/recipe/tags")
        .insert_header((header::AUTHORIZATION, authorization.clone()))
        .set_json(json!({ "name": "" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let value = get_json(&app, "/recipe/tags", &authorization).await;
    assert!(value.as_array().expect("array").is_empty());
}
