//! Shared HTTP helpers for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! common application assembly and request plumbing live here and are pulled
//! in per suite with a `#[path]` module declaration.

use actix_http::Request;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use larder::Correlation;
use larder::inbound::http::health::HealthState;
use larder::server::{AppState, build_state, configure};

/// Assemble fresh application state over an empty in-memory store.
pub fn app_state() -> AppState {
    build_state()
}

/// Build an application exposing the production route table over the state.
pub fn app(
    state: &AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(state.http.clone())
        .app_data(web::Data::new(HealthState::new()))
        .wrap(Correlation)
        .configure(configure)
}

/// Deserialize a response body as JSON.
pub async fn read_json(response: ServiceResponse) -> Value {
    let body = test::read_body(response).await;
    serde_json::from_slice(&body).expect("response JSON")
}

/// Register an account through `POST /user/create`.
pub async fn register(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
    password: &str,
) {
    let request = test::TestRequest::post()
        .uri("/user/create")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED, "registration failed");
}

/// Exchange credentials for an `Authorization` header value through
/// `POST /user/token`.
pub async fn bearer(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> String {
    let request = test::TestRequest::post()
        .uri("/user/token")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK, "token issuance failed");
    let value = read_json(response).await;
    let token = value
        .get("token")
        .and_then(Value::as_str)
        .expect("token present");
    format!("Bearer {token}")
}

/// Perform an authenticated GET and return the parsed JSON body.
pub async fn get_json(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    uri: &str,
    bearer: &str,
) -> Value {
    let request = test::TestRequest::get()
        .uri(uri)
        .insert_header((header::AUTHORIZATION, bearer.to_owned()))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK, "GET {uri} failed");
    read_json(response).await
}

/// Create a catalog entity through an authenticated POST, returning its id.
pub async fn post_created(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    uri: &str,
    bearer: &str,
    body: Value,
) -> String {
    let request = test::TestRequest::post()
        .uri(uri)
        .insert_header((header::AUTHORIZATION, bearer.to_owned()))
        .set_json(body)
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri} failed");
    let value = read_json(response).await;
    value
        .get("id")
        .and_then(Value::as_str)
        .expect("created id")
        .to_owned()
}
