//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    CredentialsValidationError, Error, Operand, OperandError, PageRequest, PageRequestError,
    UserId,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidOperand,
    InvalidId,
    InvalidPage,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidOperand => "invalid_operand",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidPage => "invalid_page",
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

fn field_error(field: FieldName, message: String, code: &str, value: Option<String>) -> Error {
    let details = match value {
        Some(value) => json!({ "field": field.as_str(), "code": code, "value": value }),
        None => json!({ "field": field.as_str(), "code": code }),
    };
    Error::invalid_request(message).with_details(details)
}

/// Operand as it arrives on the wire: a decimal string or a JSON number.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OperandInput {
    Text(String),
    Number(serde_json::Number),
}

impl OperandInput {
    fn raw(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => number.to_string(),
        }
    }
}

impl From<&str> for OperandInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

pub(crate) fn parse_operand(input: &OperandInput, field: FieldName) -> Result<Operand, Error> {
    let raw = input.raw();
    Operand::from_str(&raw).map_err(|err: OperandError| {
        field_error(
            field,
            format!("{}: {err}", field.as_str()),
            ErrorCode::InvalidOperand.as_str(),
            Some(raw),
        )
    })
}

pub(crate) fn parse_user_id(raw: i64, field: FieldName) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| {
        field_error(
            field,
            format!("{}: {err}", field.as_str()),
            ErrorCode::InvalidId.as_str(),
            Some(raw.to_string()),
        )
    })
}

pub(crate) fn parse_page(offset: Option<i64>, limit: Option<i64>) -> Result<PageRequest, Error> {
    let defaults = PageRequest::default();
    PageRequest::new(
        offset.unwrap_or(defaults.offset()),
        limit.unwrap_or(defaults.limit()),
    )
    .map_err(|err| {
        let field = match err {
            PageRequestError::NegativeOffset => FieldName::new("offset"),
            PageRequestError::LimitOutOfRange => FieldName::new("limit"),
        };
        field_error(field, err.to_string(), ErrorCode::InvalidPage.as_str(), None)
    })
}

pub(crate) fn credentials_error(err: CredentialsValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}
