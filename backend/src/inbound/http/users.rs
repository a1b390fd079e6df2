//! Account API handlers.
//!
//! ```text
//! POST /user/create {"email":"cook@example.com","password":"testPassword"}
//! POST /user/token {"email":"cook@example.com","password":"testPassword"}
//! GET /user/me
//! PATCH /user/me {"name":"New Name"}
//! ```

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::ports::{ProfileUpdate, RegisterAccountRequest};
use crate::domain::{Account, Credentials, CredentialsValidationError, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_display_name, parse_email,
};

/// Request body for `POST /user/create`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterAccountBody {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Request body for `POST /user/token`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TokenRequestBody {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response body for `POST /user/token`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Request body for `PATCH /user/me`; absent fields are left untouched.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ProfilePatchBody {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Public profile representation; password material is never serialized.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub email: String,
    /// Display name, or the empty string when none has been set.
    pub name: String,
}

impl From<&Account> for ProfileResponse {
    fn from(account: &Account) -> Self {
        Self {
            email: account.email().to_string(),
            name: account
                .display_name()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }
}

fn parse_register_body(body: RegisterAccountBody) -> Result<RegisterAccountRequest, Error> {
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
    Ok(RegisterAccountRequest {
        email: parse_email(email, FieldName::new("email"))?,
        display_name,
        password: Zeroizing::new(password),
    })
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        CredentialsValidationError::MalformedEmail(inner) => {
            Error::invalid_request(inner.to_string())
                .with_details(json!({ "field": "email", "code": "invalid_email" }))
        }
        CredentialsValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/user/create",
    request_body = RegisterAccountBody,
    responses(
        (status = 201, description = "Account created", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "register",
    security([])
)]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterAccountBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_register_body(payload.into_inner())?;
    let account = state.accounts.register(request).await?;
    Ok(HttpResponse::Created().json(ProfileResponse::from(&account)))
}

/// Exchange credentials for a bearer token.
///
/// Re-issuing replaces any previously issued token for the account.
#[utoipa::path(
    post,
    path = "/user/token",
    request_body = TokenRequestBody,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid credentials or request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "issueToken",
    security([])
)]
pub async fn issue_token(
    state: web::Data<HttpState>,
    payload: web::Json<TokenRequestBody>,
) -> ApiResult<web::Json<TokenResponse>> {
    let body = payload.into_inner();
    let email = body
        .email
        .ok_or_else(|| missing_field_error(FieldName::new("email")))?;
    let password = body
        .password
        .ok_or_else(|| missing_field_error(FieldName::new("password")))?;
    let credentials =
        Credentials::try_from_parts(&email, &password).map_err(map_credentials_error)?;
    let token = state.auth.issue_token(&credentials).await?;
    Ok(web::Json(TokenResponse {
        token: token.reveal().to_owned(),
    }))
}

/// Fetch the authenticated account's profile.
#[utoipa::path(
    get,
    path = "/user/me",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 405, description = "Method not allowed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "profile"
)]
pub async fn profile(caller: Caller) -> ApiResult<web::Json<ProfileResponse>> {
    Ok(web::Json(ProfileResponse::from(caller.account())))
}

/// Partially update the authenticated account's profile.
#[utoipa::path(
    patch,
    path = "/user/me",
    request_body = ProfilePatchBody,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 405, description = "Method not allowed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "updateProfile"
)]
pub async fn update_profile(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<ProfilePatchBody>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let body = payload.into_inner();
    let update = ProfileUpdate {
        display_name: body
            .name
            .map(|name| parse_display_name(name, FieldName::new("name")))
            .transpose()?,
        password: body.password.map(Zeroizing::new),
    };
    let account = state.accounts.update_profile(caller.id(), update).await?;
    Ok(web::Json(ProfileResponse::from(&account)))
}
