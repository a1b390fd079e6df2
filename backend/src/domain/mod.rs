//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities and the services that
//! implement the driving ports over them. Keep types immutable where
//! practical and document invariants and serialisation contracts (serde) in
//! each type's Rustdoc.
//!
//! Public surface:
//! - Account types (`account`) — identity keyed by normalised email.
//! - Auth types (`auth`) — credentials and opaque bearer tokens.
//! - Catalog types (`catalog`) — tags, ingredients, and recipes.
//! - Error / ErrorCode (`error`) — API error response payload.
//! - Services (`*_service`) — driving-port implementations over repositories.

pub mod account;
pub mod account_service;
pub mod auth;
pub mod catalog;
pub mod catalog_service;
pub mod error;
pub mod password;
pub mod ports;
pub mod request_id;
pub mod token_auth_service;

pub use self::account::{
    Account, AccountId, AccountValidationError, DISPLAY_NAME_MAX, DisplayName, EmailAddress,
};
pub use self::account_service::AccountService;
pub use self::auth::{AuthToken, Credentials, CredentialsValidationError, TokenDigest, TokenValue};
pub use self::catalog::{
    CATALOG_NAME_MAX, CatalogName, CatalogValidationError, Ingredient, Price, Recipe,
    RecipeChanges, RecipeDetail, RecipeDraft, Tag,
};
pub use self::catalog_service::CatalogService;
pub use self::error::{Error, ErrorCode};
pub use self::password::{PASSWORD_MIN_CHARS, PasswordError, PasswordHash};
pub use self::request_id::{REQUEST_ID_HEADER, RequestId};
pub use self::token_auth_service::TokenAuthService;
