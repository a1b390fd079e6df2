//! Operator account-management handlers.
//!
//! ```text
//! GET /admin/accounts
//! GET /admin/accounts/{id}
//! POST /admin/accounts {"email":"op@example.com","password":"testPassword","is_staff":true}
//! PATCH /admin/accounts/{id} {"is_active":false}
//! ```
//!
//! Every handler requires a bearer token whose account carries the staff
//! flag; regular accounts receive 403. Responses never include password
//! material.

use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{AdminAccountUpdate, AdminCreateAccountRequest};
use crate::domain::{Account, AccountId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_display_name, parse_email, parse_uuid,
};
use zeroize::Zeroizing;

/// Request body for `POST /admin/accounts`.
///
/// Flags default to an active, unprivileged account when absent.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AdminAccountBody {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

/// Request body for `PATCH /admin/accounts/{id}`; absent fields are left
/// untouched.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AdminAccountPatchBody {
    pub name: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

/// Wire representation of an account on the admin surface.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AdminAccountResponse {
    pub id: Uuid,
    pub email: String,
    /// Display name, or the empty string when none has been set.
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub joined_at: DateTime<Utc>,
}

impl From<&Account> for AdminAccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: *account.id().as_uuid(),
            email: account.email().to_string(),
            name: account
                .display_name()
                .map(ToString::to_string)
                .unwrap_or_default(),
            is_active: account.is_active(),
            is_staff: account.is_staff(),
            is_superuser: account.is_superuser(),
            joined_at: account.joined_at(),
        }
    }
}

fn parse_account_id(raw: String) -> Result<AccountId, Error> {
    parse_uuid(raw, FieldName::new("id")).map(AccountId::from_uuid)
}

fn parse_create_body(body: AdminAccountBody) -> Result<AdminCreateAccountRequest, Error> {
    let email = body
        .email
        .ok_or_else(|| missing_field_error(FieldName::new("email")))?;
    let password = body
        .password
        .ok_or_else(|| missing_field_error(FieldName::new("password")))?;
    let display_name = body
        .name
        .map(|name| parse_display_name(name, FieldName::new("name")))
        .transpose()?;
    Ok(AdminCreateAccountRequest {
        email: parse_email(email, FieldName::new("email"))?,
        display_name,
        password: Zeroizing::new(password),
        is_active: body.is_active.unwrap_or(true),
        is_staff: body.is_staff.unwrap_or(false),
        is_superuser: body.is_superuser.unwrap_or(false),
    })
}

/// List every account, ordered by join time then id.
#[utoipa::path(
    get,
    path = "/admin/accounts",
    responses(
        (status = 200, description = "All accounts", body = [AdminAccountResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Staff access required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListAccounts"
)]
pub async fn list_accounts(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<Vec<AdminAccountResponse>>> {
    caller.require_staff()?;
    let accounts = state.accounts_query.list_accounts().await?;
    Ok(web::Json(
        accounts.iter().map(AdminAccountResponse::from).collect(),
    ))
}

/// Fetch a single account by id.
#[utoipa::path(
    get,
    path = "/admin/accounts/{id}",
    params(("id" = String, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Account", body = AdminAccountResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Staff access required", body = ErrorSchema),
        (status = 404, description = "Account not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminAccountDetail"
)]
pub async fn account_detail(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<AdminAccountResponse>> {
    caller.require_staff()?;
    let account_id = parse_account_id(path.into_inner())?;
    let account = state.accounts_query.get_account(account_id).await?;
    Ok(web::Json(AdminAccountResponse::from(&account)))
}

/// Create an account with caller-chosen flags.
#[utoipa::path(
    post,
    path = "/admin/accounts",
    request_body = AdminAccountBody,
    responses(
        (status = 201, description = "Account created", body = AdminAccountResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Staff access required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminCreateAccount"
)]
pub async fn create_account(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<AdminAccountBody>,
) -> ApiResult<HttpResponse> {
    caller.require_staff()?;
    let request = parse_create_body(payload.into_inner())?;
    let account = state.accounts.admin_create(request).await?;
    Ok(HttpResponse::Created().json(AdminAccountResponse::from(&account)))
}

/// Partially update any account, including its flags.
#[utoipa::path(
    patch,
    path = "/admin/accounts/{id}",
    params(("id" = String, Path, description = "Account identifier")),
    request_body = AdminAccountPatchBody,
    responses(
        (status = 200, description = "Updated account", body = AdminAccountResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Staff access required", body = ErrorSchema),
        (status = 404, description = "Account not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminPatchAccount"
)]
pub async fn patch_account(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: web::Json<AdminAccountPatchBody>,
) -> ApiResult<web::Json<AdminAccountResponse>> {
    caller.require_staff()?;
    let account_id = parse_account_id(path.into_inner())?;
    let body = payload.into_inner();
    let update = AdminAccountUpdate {
        display_name: body
            .name
            .map(|name| parse_display_name(name, FieldName::new("name")))
            .transpose()?,
        password: body.password.map(Zeroizing::new),
        is_active: body.is_active,
        is_staff: body.is_staff,
        is_superuser: body.is_superuser,
    };
    let account = state.accounts.admin_update(account_id, update).await?;
    Ok(web::Json(AdminAccountResponse::from(&account)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{
        bearer_for, memory_state, register_account, register_staff_account, test_app,
    };
    use actix_web::http::StatusCode;
    use actix_web::http::header;
    use actix_web::test as actix_test;
    use serde_json::Value;

    async fn read_json(response: actix_web::dev::ServiceResponse) -> Value {
        let body = actix_test::read_body(response).await;
        serde_json::from_slice(&body).expect("response JSON")
    }

    #[actix_web::test]
    async fn listing_requires_a_token() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let request = actix_test::TestRequest::get()
            .uri("/admin/accounts")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn listing_rejects_regular_accounts() {
        let state = memory_state();
        register_account(&state, "cook@example.com", "testPassword").await;
        let bearer = bearer_for(&state, "cook@example.com", "testPassword").await;
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::get()
            .uri("/admin/accounts")
            .insert_header((header::AUTHORIZATION, bearer))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let value = read_json(response).await;
        assert_eq!(value.get("code").and_then(Value::as_str), Some("forbidden"));
    }

    #[actix_web::test]
    async fn staff_list_every_account_in_join_order() {
        let state = memory_state();
        register_staff_account(&state, "op@example.com", "testPassword").await;
        register_account(&state, "cook@example.com", "testPassword").await;
        let bearer = bearer_for(&state, "op@example.com", "testPassword").await;
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::get()
            .uri("/admin/accounts")
            .insert_header((header::AUTHORIZATION, bearer))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let value = read_json(response).await;
        let emails: Vec<&str> = value
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|account| account.get("email").and_then(Value::as_str))
            .collect();
        assert_eq!(emails, vec!["op@example.com", "cook@example.com"]);
        for account in value.as_array().expect("array") {
            assert!(account.get("password").is_none());
            assert!(account.get("password_hash").is_none());
        }
    }

    #[actix_web::test]
    async fn create_accepts_flags_and_rejects_duplicates() {
        let state = memory_state();
        register_staff_account(&state, "op@example.com", "testPassword").await;
        let bearer = bearer_for(&state, "op@example.com", "testPassword").await;
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/admin/accounts")
            .insert_header((header::AUTHORIZATION, bearer.clone()))
            .set_json(&AdminAccountBody {
                email: Some("second@example.com".into()),
                password: Some("testPassword".into()),
                name: Some("Second Operator".into()),
                is_active: Some(true),
                is_staff: Some(true),
                is_superuser: None,
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let value = read_json(response).await;
        assert_eq!(value.get("is_staff").and_then(Value::as_bool), Some(true));
        assert_eq!(
            value.get("is_superuser").and_then(Value::as_bool),
            Some(false)
        );

        let request = actix_test::TestRequest::post()
            .uri("/admin/accounts")
            .insert_header((header::AUTHORIZATION, bearer))
            .set_json(&AdminAccountBody {
                email: Some("second@EXAMPLE.com".into()),
                password: Some("otherPassword".into()),
                name: None,
                is_active: None,
                is_staff: None,
                is_superuser: None,
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn detail_of_an_unknown_account_is_not_found() {
        let state = memory_state();
        register_staff_account(&state, "op@example.com", "testPassword").await;
        let bearer = bearer_for(&state, "op@example.com", "testPassword").await;
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::get()
            .uri(&format!("/admin/accounts/{}", Uuid::new_v4()))
            .insert_header((header::AUTHORIZATION, bearer))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn deactivating_an_account_revokes_its_token() {
        let state = memory_state();
        register_staff_account(&state, "op@example.com", "testPassword").await;
        let cook = register_account(&state, "cook@example.com", "testPassword").await;
        let op_bearer = bearer_for(&state, "op@example.com", "testPassword").await;
        let cook_bearer = bearer_for(&state, "cook@example.com", "testPassword").await;
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::patch()
            .uri(&format!("/admin/accounts/{}", cook.id()))
            .insert_header((header::AUTHORIZATION, op_bearer))
            .set_json(&AdminAccountPatchBody {
                is_active: Some(false),
                ..AdminAccountPatchBody::default()
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let value = read_json(response).await;
        assert_eq!(value.get("is_active").and_then(Value::as_bool), Some(false));

        // The deactivated account's token must no longer resolve.
        let request = actix_test::TestRequest::get()
            .uri("/user/me")
            .insert_header((header::AUTHORIZATION, cook_bearer))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
