//! # Booking Validation Rules
//!
//! Pure field rules. Raw request values go in, normalized values (trimmed,
//! email lowercased) come out, or a `ValidationError` naming what was wrong.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use super::model::{Booking, BookingPatch, NewBooking, DEFAULT_TICKET_TYPE};

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One of the required fields is absent on create
    #[error("name, email and event are required")]
    MissingRequired,

    /// An update tried to blank a required field
    #[error("name, email and event cannot be empty")]
    EmptyRequired,

    /// A single required field is empty on a full record
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} is not a valid email")]
    InvalidEmail(String),
}

/// `local@domain.tld`: no whitespace, exactly one `@`, a `.` after it
fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Fails if the value is missing or blank; returns it trimmed
pub fn require_non_empty(field: &'static str, value: Option<&str>) -> ValidationResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::Required(field)),
    }
}

/// Check an (already normalized) email against the address pattern
pub fn valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Trim and lowercase, then check the pattern
pub fn normalize_email(value: &str) -> ValidationResult<String> {
    let email = value.trim().to_lowercase();
    if valid_email(&email) {
        Ok(email)
    } else {
        Err(ValidationError::InvalidEmail(email))
    }
}

/// Trimmed ticket type, falling back to the default when absent or blank
pub fn normalize_ticket_type(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => DEFAULT_TICKET_TYPE.to_string(),
    }
}

/// Build a normalized insert from raw create fields
pub fn new_booking(
    name: Option<&str>,
    email: Option<&str>,
    event: Option<&str>,
    ticket_type: Option<&str>,
) -> ValidationResult<NewBooking> {
    let required = (
        require_non_empty("name", name),
        require_non_empty("email", email),
        require_non_empty("event", event),
    );
    let (Ok(name), Ok(email), Ok(event)) = required else {
        return Err(ValidationError::MissingRequired);
    };

    Ok(NewBooking {
        name,
        email: normalize_email(&email)?,
        event,
        ticket_type: normalize_ticket_type(ticket_type),
    })
}

/// Normalize one required field of a partial update.
///
/// Outer `None` is an absent key; `Some(None)` is an explicit null.
fn patch_required(value: Option<Option<&str>>) -> ValidationResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) => require_non_empty("field", v)
            .map(Some)
            .map_err(|_| ValidationError::EmptyRequired),
    }
}

/// Trimmed ticket type for an update. No default is substituted; an
/// explicit null clears the value.
fn patch_ticket_type(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// Build a normalized patch from raw update fields
pub fn booking_patch(
    name: Option<Option<&str>>,
    email: Option<Option<&str>>,
    event: Option<Option<&str>>,
    ticket_type: Option<Option<&str>>,
) -> ValidationResult<BookingPatch> {
    let name = patch_required(name)?;
    let email = patch_required(email)?;
    let event = patch_required(event)?;

    let email = match email {
        Some(e) => Some(normalize_email(&e)?),
        None => None,
    };

    Ok(BookingPatch {
        name,
        email,
        event,
        ticket_type: ticket_type.map(patch_ticket_type),
    })
}

/// Full-record check applied by the store before anything is persisted
pub fn validate_booking(booking: &Booking) -> ValidationResult<()> {
    require_non_empty("name", Some(&booking.name))?;
    require_non_empty("email", Some(&booking.email))?;
    require_non_empty("event", Some(&booking.event))?;
    if !valid_email(&booking.email) {
        return Err(ValidationError::InvalidEmail(booking.email.clone()));
    }
    Ok(())
}
