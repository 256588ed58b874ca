//! # Booking Request Handlers
//!
//! One method per operation. Each takes an already-parsed request, performs
//! at most one store call, and returns the status plus envelope to send.
//! Validation and id parsing happen before the store is touched.

use std::sync::Arc;

use axum::http::StatusCode;
use tracing::info;

use crate::booking::{Booking, BookingId};
use crate::store::{BookingQuery, BookingStore, TextField};

use super::errors::ApiResult;
use super::parser::{
    require_param, CreateBookingRequest, FilterParams, ListParams, Pagination, SearchParams,
    UpdateBookingRequest,
};
use super::response::Envelope;

/// Status plus envelope for a successful call
pub type Reply<T> = (StatusCode, Envelope<T>);

#[derive(Clone)]
pub struct BookingHandler {
    store: Arc<dyn BookingStore>,
}

impl BookingHandler {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// `GET /`: one page, newest first
    pub fn list(&self, params: &ListParams) -> ApiResult<Reply<Vec<Booking>>> {
        let page = Pagination::parse(params);
        let bookings = self
            .store
            .find_many(&BookingQuery::page(page.skip(), page.limit))?;
        Ok((StatusCode::OK, Envelope::list(bookings)))
    }

    /// `POST /`
    pub fn create(&self, request: CreateBookingRequest) -> ApiResult<Reply<Booking>> {
        let new_booking = request.into_new_booking()?;
        let booking = self.store.insert(new_booking)?;

        info!(id = %booking.id, event = %booking.event, "booking created");
        Ok((StatusCode::CREATED, Envelope::data(booking)))
    }

    /// `GET /:id`
    pub fn get(&self, id: &str) -> ApiResult<Reply<Booking>> {
        let id: BookingId = id.parse()?;
        let booking = self.store.find_by_id(&id)?;
        Ok((StatusCode::OK, Envelope::data(booking)))
    }

    /// `PUT /:id`: partial update, absent fields untouched
    pub fn update(&self, id: &str, request: UpdateBookingRequest) -> ApiResult<Reply<Booking>> {
        let id: BookingId = id.parse()?;
        let patch = request.into_patch()?;
        let booking = self.store.update_partial(&id, patch)?;

        info!(id = %booking.id, "booking updated");
        Ok((StatusCode::OK, Envelope::data(booking)))
    }

    /// `DELETE /:id`
    pub fn delete(&self, id: &str) -> ApiResult<Reply<()>> {
        let id: BookingId = id.parse()?;
        self.store.delete_by_id(&id)?;

        info!(id = %id, "booking deleted");
        Ok((StatusCode::OK, Envelope::message("Booking deleted")))
    }

    /// `GET /search?email=`
    pub fn search_by_email(&self, params: &SearchParams) -> ApiResult<Reply<Vec<Booking>>> {
        let needle = require_param("email", params.email.as_deref())?;
        self.matching(TextField::Email, needle)
    }

    /// `GET /filter?event=`
    pub fn filter_by_event(&self, params: &FilterParams) -> ApiResult<Reply<Vec<Booking>>> {
        let needle = require_param("event", params.event.as_deref())?;
        self.matching(TextField::Event, needle)
    }

    fn matching(&self, field: TextField, needle: &str) -> ApiResult<Reply<Vec<Booking>>> {
        let bookings = self
            .store
            .find_many(&BookingQuery::matching(field, needle))?;
        Ok((StatusCode::OK, Envelope::list(bookings)))
    }
}
