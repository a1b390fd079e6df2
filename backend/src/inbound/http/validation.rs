//! Shared validation helpers for inbound HTTP adapters.

use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    AccountValidationError, CatalogName, CatalogValidationError, DisplayName, EmailAddress, Error,
    Price,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidEmail,
    InvalidName,
    InvalidPrice,
    InvalidTime,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::InvalidName => "invalid_name",
            ErrorCode::InvalidPrice => "invalid_price",
            ErrorCode::InvalidTime => "invalid_time",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }

    fn with_index(self, code: ErrorCode, index: usize, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "index": index,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn invalid_uuid_index_error(field: FieldName, index: usize, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must contain valid UUIDs")).with_index(
        ErrorCode::InvalidUuid,
        index,
        value,
    )
}

pub(crate) fn parse_uuid(value: String, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(&value).map_err(|_| invalid_uuid_error(field, &value))
}

pub(crate) fn parse_uuid_list(values: Vec<String>, field: FieldName) -> Result<Vec<Uuid>, Error> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            Uuid::parse_str(&value).map_err(|_| invalid_uuid_index_error(field, index, &value))
        })
        .collect()
}

fn account_field_error(field: FieldName, err: &AccountValidationError) -> Error {
    let field = field.as_str();
    match err {
        AccountValidationError::EmptyEmail
        | AccountValidationError::MissingAtSymbol
        | AccountValidationError::EmptyLocalPart
        | AccountValidationError::EmptyDomain => {
            ValidationError::new(field, err.to_string()).with_code(ErrorCode::InvalidEmail)
        }
        AccountValidationError::EmptyDisplayName => {
            ValidationError::new(field, format!("{field} must not be empty"))
                .with_code(ErrorCode::InvalidName)
        }
        AccountValidationError::DisplayNameTooLong { max } => {
            ValidationError::new(field, format!("{field} must be at most {max} characters"))
                .with_code(ErrorCode::InvalidName)
        }
    }
}

pub(crate) fn parse_email(value: String, field: FieldName) -> Result<EmailAddress, Error> {
    EmailAddress::parse(value).map_err(|err| account_field_error(field, &err))
}

pub(crate) fn parse_display_name(value: String, field: FieldName) -> Result<DisplayName, Error> {
    DisplayName::new(value).map_err(|err| account_field_error(field, &err))
}

fn catalog_field_error(field: FieldName, err: &CatalogValidationError) -> Error {
    let field = field.as_str();
    match err {
        CatalogValidationError::EmptyName => {
            ValidationError::new(field, format!("{field} must not be empty"))
                .with_code(ErrorCode::InvalidName)
        }
        CatalogValidationError::NameTooLong { max } => {
            ValidationError::new(field, format!("{field} must be at most {max} characters"))
                .with_code(ErrorCode::InvalidName)
        }
        CatalogValidationError::NegativePrice => {
            ValidationError::new(field, format!("{field} must not be negative"))
                .with_code(ErrorCode::InvalidPrice)
        }
    }
}

pub(crate) fn parse_catalog_name(value: String, field: FieldName) -> Result<CatalogName, Error> {
    CatalogName::new(value).map_err(|err| catalog_field_error(field, &err))
}

pub(crate) fn parse_price(value: Decimal, field: FieldName) -> Result<Price, Error> {
    Price::new(value).map_err(|err| catalog_field_error(field, &err))
}

pub(crate) fn parse_time_minutes(value: i64, field: FieldName) -> Result<u32, Error> {
    u32::try_from(value).map_err(|_| {
        let field_str = field.as_str();
        ValidationError::new(
            field_str,
            format!("{field_str} must be a non-negative integer"),
        )
        .with_value(ErrorCode::InvalidTime, value.to_string())
    })
}
