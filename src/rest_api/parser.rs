//! # Request Parser
//!
//! Turns loosely-typed query strings and JSON bodies into typed requests.
//! Unknown body keys are dropped, including `id` and `createdAt`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::booking::validation;
use crate::booking::{BookingPatch, NewBooking, ValidationResult};

use super::errors::{ApiError, ApiResult};

/// Maximum number of records that can be returned
pub const MAX_LIMIT: usize = 1000;

/// Default limit if not specified
pub const DEFAULT_LIMIT: usize = 100;

/// Default page if not specified
pub const DEFAULT_PAGE: usize = 1;

/// Raw `?page=&limit=` values, kept as strings until `Pagination::parse`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub event: Option<String>,
}

/// Parsed pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Non-numeric values fall back to the default; both are floored at 1
    /// and `limit` is capped at `MAX_LIMIT`.
    pub fn parse(params: &ListParams) -> Self {
        let page = parse_positive(params.page.as_deref(), DEFAULT_PAGE);
        let limit = parse_positive(params.limit.as_deref(), DEFAULT_LIMIT).min(MAX_LIMIT);
        Self { page, limit }
    }

    pub fn skip(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn parse_positive(value: Option<&str>, default: usize) -> usize {
    match value.map(|v| v.trim().parse::<i64>()) {
        Some(Ok(n)) => usize::try_from(n.max(1)).unwrap_or(usize::MAX),
        _ => default,
    }
}

/// Required, non-empty query parameter
pub fn require_param<'a>(name: &'static str, value: Option<&'a str>) -> ApiResult<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::MissingParam(name)),
    }
}

/// `POST /api/bookings` body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub event: Option<String>,
    pub ticket_type: Option<String>,
}

impl CreateBookingRequest {
    pub fn into_new_booking(self) -> ValidationResult<NewBooking> {
        validation::new_booking(
            self.name.as_deref(),
            self.email.as_deref(),
            self.event.as_deref(),
            self.ticket_type.as_deref(),
        )
    }
}

/// `PUT /api/bookings/:id` body.
///
/// Outer `None`: key absent. `Some(None)`: key present with `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub event: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub ticket_type: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl UpdateBookingRequest {
    pub fn into_patch(self) -> ValidationResult<BookingPatch> {
        fn raw(v: &Option<Option<String>>) -> Option<Option<&str>> {
            v.as_ref().map(Option::as_deref)
        }

        validation::booking_patch(
            raw(&self.name),
            raw(&self.email),
            raw(&self.event),
            raw(&self.ticket_type),
        )
    }
}

/// Parse a JSON object body. An empty body reads as `{}`.
///
/// Anything other than an object is rejected before it reaches the request
/// struct, so arrays can never fill fields by position.
pub fn parse_body<T>(bytes: &[u8]) -> ApiResult<T>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let object: Map<String, Value> =
        serde_json::from_slice(bytes).map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    serde_json::from_value(Value::Object(object)).map_err(|e| ApiError::InvalidBody(e.to_string()))
}
