//! # Booking Routes
//!
//! Axum glue: extracts path, query and body, hands them to
//! `BookingHandler`, and serializes the reply.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::booking::Booking;
use crate::store::BookingStore;

use super::errors::{ApiError, ApiResult};
use super::handler::{BookingHandler, Reply};
use super::parser::{
    parse_body, CreateBookingRequest, FilterParams, ListParams, SearchParams,
    UpdateBookingRequest,
};
use super::response::Envelope;

/// Shared state type
type HandlerState = Arc<BookingHandler>;

type JsonReply<T> = ApiResult<(StatusCode, Json<Envelope<T>>)>;

/// Build the `/api/bookings` router around a store
pub fn booking_routes(store: Arc<dyn BookingStore>) -> Router {
    let state = Arc::new(BookingHandler::new(store));

    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route("/search", get(search_handler))
        .route("/filter", get(filter_handler))
        .route(
            "/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .with_state(state)
}

fn json<T: serde::Serialize>(reply: ApiResult<Reply<T>>) -> JsonReply<T> {
    reply.map(|(status, envelope)| (status, Json(envelope)))
}

/// Unwrap a query extraction, keeping the error inside our envelope
fn query<T: DeserializeOwned>(query: Result<Query<T>, QueryRejection>) -> ApiResult<T> {
    query.map(|Query(q)| q).map_err(|e| {
        debug!(error = %e.body_text(), "query string rejected");
        ApiError::InvalidQuery
    })
}

/// A path segment axum cannot decode is a malformed id too
fn path_id(path: Result<Path<String>, PathRejection>) -> ApiResult<String> {
    path.map(|Path(id)| id).map_err(|e| {
        debug!(error = %e.body_text(), "path id rejected");
        ApiError::MalformedId
    })
}

async fn list_handler(
    State(handler): State<HandlerState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> JsonReply<Vec<Booking>> {
    let params = query(params)?;
    json(handler.list(&params))
}

async fn create_handler(State(handler): State<HandlerState>, body: Bytes) -> JsonReply<Booking> {
    let request: CreateBookingRequest = parse_body(&body)?;
    json(handler.create(request))
}

async fn search_handler(
    State(handler): State<HandlerState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> JsonReply<Vec<Booking>> {
    let params = query(params)?;
    json(handler.search_by_email(&params))
}

async fn filter_handler(
    State(handler): State<HandlerState>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> JsonReply<Vec<Booking>> {
    let params = query(params)?;
    json(handler.filter_by_event(&params))
}

async fn get_handler(
    State(handler): State<HandlerState>,
    id: Result<Path<String>, PathRejection>,
) -> JsonReply<Booking> {
    let id = path_id(id)?;
    json(handler.get(&id))
}

async fn update_handler(
    State(handler): State<HandlerState>,
    id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> JsonReply<Booking> {
    let id = path_id(id)?;
    let request: UpdateBookingRequest = parse_body(&body)?;
    json(handler.update(&id, request))
}

async fn delete_handler(
    State(handler): State<HandlerState>,
    id: Result<Path<String>, PathRejection>,
) -> JsonReply<()> {
    let id = path_id(id)?;
    json(handler.delete(&id))
}
