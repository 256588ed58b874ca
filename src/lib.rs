//! synergia-bookings - event booking records over HTTP
//!
//! Layers, leaves first:
//! - `booking`: record types and field rules
//! - `store`: the record store seam and its memory/file implementations
//! - `rest_api`: request handlers, routes and the response envelope
//! - `http_server`: server config, top-level router and middleware
//! - `cli`: the `serve` command

pub mod booking;
pub mod cli;
pub mod http_server;
pub mod logging;
pub mod rest_api;
pub mod store;
