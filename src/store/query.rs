//! Query description for `find_many`
//!
//! Search-by-email and filter-by-event are the same query with a different
//! field, so both go through one `TextMatch` predicate.

use crate::booking::Booking;

/// String field a `TextMatch` can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Email,
    Event,
}

impl TextField {
    fn value<'a>(&self, booking: &'a Booking) -> &'a str {
        match self {
            TextField::Email => &booking.email,
            TextField::Event => &booking.event,
        }
    }
}

/// Case-insensitive substring match on a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch {
    pub field: TextField,
    needle: String,
}

impl TextMatch {
    pub fn new(field: TextField, needle: &str) -> Self {
        Self {
            field,
            needle: needle.to_lowercase(),
        }
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        self.field
            .value(booking)
            .to_lowercase()
            .contains(&self.needle)
    }
}

/// Parameters for a `find_many` call.
///
/// Results are always ordered by `created_at` descending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingQuery {
    pub filter: Option<TextMatch>,
    pub skip: usize,
    /// `None` returns everything after `skip`
    pub limit: Option<usize>,
}

impl BookingQuery {
    /// Every booking, newest first
    pub fn all() -> Self {
        Self::default()
    }

    /// One page of the full collection
    pub fn page(skip: usize, limit: usize) -> Self {
        Self {
            filter: None,
            skip,
            limit: Some(limit),
        }
    }

    /// All bookings whose `field` contains `needle`, ignoring case
    pub fn matching(field: TextField, needle: &str) -> Self {
        Self {
            filter: Some(TextMatch::new(field, needle)),
            ..Self::default()
        }
    }

    pub fn accepts(&self, booking: &Booking) -> bool {
        self.filter.as_ref().map_or(true, |f| f.matches(booking))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{BookingId, NewBooking};
    use chrono::Utc;

    fn booking(email: &str, event: &str) -> Booking {
        NewBooking {
            name: "N".to_string(),
            email: email.to_string(),
            event: event.to_string(),
            ticket_type: "general".to_string(),
        }
        .into_booking(BookingId::generate(), Utc::now())
    }

    #[test]
    fn test_text_match_ignores_case() {
        let b = booking("john@example.com", "Synergia 2025");

        assert!(TextMatch::new(TextField::Email, "JOHN").matches(&b));
        assert!(TextMatch::new(TextField::Email, "example.c").matches(&b));
        assert!(!TextMatch::new(TextField::Email, "jane").matches(&b));

        assert!(TextMatch::new(TextField::Event, "synergia").matches(&b));
        assert!(!TextMatch::new(TextField::Event, "john").matches(&b));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let b = booking("a.b@example.com", "C++ Meetup");

        assert!(TextMatch::new(TextField::Event, "c++").matches(&b));
        assert!(!TextMatch::new(TextField::Email, "a*b").matches(&b));
    }

    #[test]
    fn test_unfiltered_query_accepts_everything() {
        let b = booking("x@y.zz", "E");
        assert!(BookingQuery::all().accepts(&b));
        assert!(BookingQuery::page(0, 10).accepts(&b));
    }
}
