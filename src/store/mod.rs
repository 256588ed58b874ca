//! # Booking Record Store
//!
//! The persistence seam for bookings. Handlers only ever see the
//! `BookingStore` trait; which implementation backs it is decided once at
//! startup.
//!
//! - `MemoryStore`: process-local, lost on exit
//! - `FileStore`: same collection, persisted as a JSON document file
//!
//! Both share the query and mutation logic in `collection`.

mod collection;
mod errors;
mod file;
mod memory;
mod query;

pub use collection::Collection;
pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use query::{BookingQuery, TextField, TextMatch};

use crate::booking::{Booking, BookingId, BookingPatch, NewBooking};

/// Record store operations consumed by the request handlers.
///
/// Ids are already parsed, so a malformed id never reaches the store.
/// Every call is atomic with respect to other calls on the same store.
pub trait BookingStore: Send + Sync {
    /// Insert a new booking, assigning id and creation time
    fn insert(&self, booking: NewBooking) -> StoreResult<Booking>;

    /// Point lookup
    fn find_by_id(&self, id: &BookingId) -> StoreResult<Booking>;

    /// Filtered, sorted (createdAt descending), paginated query
    fn find_many(&self, query: &BookingQuery) -> StoreResult<Vec<Booking>>;

    /// Apply a partial update and return the post-update record
    fn update_partial(&self, id: &BookingId, patch: BookingPatch) -> StoreResult<Booking>;

    /// Remove a booking, returning what was removed
    fn delete_by_id(&self, id: &BookingId) -> StoreResult<Booking>;
}
