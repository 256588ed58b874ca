//! # Booking Domain
//!
//! The booking record, its identifier, and the field rules every persisted
//! booking must satisfy.

pub mod model;
pub mod validation;

pub use model::{Booking, BookingId, BookingPatch, MalformedId, NewBooking, DEFAULT_TICKET_TYPE};
pub use validation::{ValidationError, ValidationResult};
