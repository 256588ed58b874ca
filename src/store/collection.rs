//! In-memory booking collection
//!
//! Bookings are kept in insertion order. Queries walk the collection newest
//! insert first and then stable-sort by `created_at` descending, so bookings
//! sharing a timestamp come back most recent insert first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::validation::validate_booking;
use crate::booking::{Booking, BookingId, BookingPatch, NewBooking};

use super::errors::{StoreError, StoreResult};
use super::query::BookingQuery;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    bookings: Vec<Booking>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    fn position(&self, id: &BookingId) -> StoreResult<usize> {
        self.bookings
            .iter()
            .position(|b| &b.id == id)
            .ok_or(StoreError::NotFound)
    }

    /// Validate and append a new booking
    pub fn insert(&mut self, booking: NewBooking, now: DateTime<Utc>) -> StoreResult<Booking> {
        let booking = booking.into_booking(BookingId::generate(), now);
        validate_booking(&booking)?;
        self.bookings.push(booking.clone());
        Ok(booking)
    }

    pub fn get(&self, id: &BookingId) -> StoreResult<Booking> {
        let idx = self.position(id)?;
        Ok(self.bookings[idx].clone())
    }

    pub fn query(&self, query: &BookingQuery) -> Vec<Booking> {
        let mut matched: Vec<&Booking> = self
            .bookings
            .iter()
            .rev()
            .filter(|b| query.accepts(b))
            .collect();

        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        matched
            .into_iter()
            .skip(query.skip)
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// Apply a patch; the merged record must still pass validation
    pub fn update(&mut self, id: &BookingId, patch: BookingPatch) -> StoreResult<Booking> {
        let idx = self.position(id)?;

        let mut updated = self.bookings[idx].clone();
        patch.apply_to(&mut updated);
        validate_booking(&updated)?;

        self.bookings[idx] = updated.clone();
        Ok(updated)
    }

    pub fn remove(&mut self, id: &BookingId) -> StoreResult<Booking> {
        let idx = self.position(id)?;
        Ok(self.bookings.remove(idx))
    }
}
