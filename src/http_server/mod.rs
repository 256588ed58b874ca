//! # Bookings HTTP Server Module
//!
//! Combines the bookings API with the server-level routes and middleware.
//!
//! # Endpoints
//!
//! - `/` - Service banner
//! - `/health` - Health check
//! - `/api/bookings/*` - Booking CRUD, search and filter

pub mod config;
pub mod server;

pub use config::{ConfigError, ConfigResult, ServerConfig};
pub use server::{build_router, HttpServer};
