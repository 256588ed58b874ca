//! Booking record types
//!
//! `NewBooking` and `BookingPatch` only exist in normalized form: they are
//! produced by the validation rules from raw request bodies, so the store can
//! trust their contents.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ticket type assigned when the client does not supply one
pub const DEFAULT_TICKET_TYPE: &str = "general";

/// Store-generated booking identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Returned when a string is not a syntactically valid booking id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedId(pub String);

impl fmt::Display for MalformedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed booking id: {}", self.0)
    }
}

impl std::error::Error for MalformedId {}

impl FromStr for BookingId {
    type Err = MalformedId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| MalformedId(s.to_string()))
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// A persisted booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub name: String,
    pub email: String,
    pub event: String,
    pub ticket_type: String,
    pub created_at: DateTime<Utc>,
}

/// Normalized input for an insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    pub event: String,
    pub ticket_type: String,
}

impl NewBooking {
    /// Materialize the record, assigning id and creation time
    pub fn into_booking(self, id: BookingId, created_at: DateTime<Utc>) -> Booking {
        Booking {
            id,
            name: self.name,
            email: self.email,
            event: self.event,
            ticket_type: self.ticket_type,
            created_at,
        }
    }
}

/// Normalized partial update.
///
/// `None` leaves the field untouched. `id` and `created_at` are not
/// representable here, so they can never be overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub event: Option<String>,
    pub ticket_type: Option<String>,
}

impl BookingPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.event.is_none()
            && self.ticket_type.is_none()
    }

    /// Overwrite the fields present in the patch
    pub fn apply_to(self, booking: &mut Booking) {
        if let Some(name) = self.name {
            booking.name = name;
        }
        if let Some(email) = self.email {
            booking.email = email;
        }
        if let Some(event) = self.event {
            booking.event = event;
        }
        if let Some(ticket_type) = self.ticket_type {
            booking.ticket_type = ticket_type;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Booking {
        NewBooking {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            event: "Synergia".to_string(),
            ticket_type: DEFAULT_TICKET_TYPE.to_string(),
        }
        .into_booking(BookingId::generate(), Utc::now())
    }

    #[test]
    fn test_id_parse() {
        let id = BookingId::generate();
        let parsed: BookingId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);

        assert!("not-an-id".parse::<BookingId>().is_err());
        assert!("507f1f77bcf86cd799439011".parse::<BookingId>().is_err());
        assert!("".parse::<BookingId>().is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let booking = sample();
        let json = serde_json::to_value(&booking).unwrap();

        assert_eq!(json["ticketType"], "general");
        assert_eq!(json["id"], booking.id.to_string());
        assert!(json["createdAt"].is_string());
        assert!(json.get("ticket_type").is_none());
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut booking = sample();
        let before = booking.clone();

        BookingPatch {
            ticket_type: Some("vip".to_string()),
            ..Default::default()
        }
        .apply_to(&mut booking);

        assert_eq!(booking.ticket_type, "vip");
        assert_eq!(booking.name, before.name);
        assert_eq!(booking.email, before.email);
        assert_eq!(booking.event, before.event);
        assert_eq!(booking.created_at, before.created_at);
    }

    #[test]
    fn test_empty_patch() {
        assert!(BookingPatch::default().is_empty());

        let mut booking = sample();
        let before = booking.clone();
        BookingPatch::default().apply_to(&mut booking);
        assert_eq!(booking, before);
    }
}
