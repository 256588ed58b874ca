//! # Bookings REST API Module
//!
//! HTTP endpoints for booking CRUD, search and filter under
//! `/api/bookings`, answering with the shared JSON envelope.

pub mod errors;
pub mod handler;
pub mod parser;
pub mod response;
pub mod server;

pub use errors::{ApiError, ApiResult, SERVER_ERROR_MESSAGE};
pub use handler::BookingHandler;
pub use parser::{Pagination, DEFAULT_LIMIT, MAX_LIMIT};
pub use response::Envelope;
pub use server::booking_routes;
