//! # Parkplan
//!
//! Theme-park vacation planning core.
//!
//! This crate models a household's multi-day theme-park trip: the trip
//! aggregate with its date window and lifecycle, the party of travelers, the
//! three reservation ledgers (hotel, dining, lightning lane), the daily
//! itinerary, and the derived cost estimates over all of it. A REST API via
//! Axum exposes the planning core to web clients.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Identifier newtypes and the public type surface
//! - [`models`]: Domain entities and their invariants
//! - [`db`]: Repository pattern, storage backends, and the service layer
//! - [`services`]: Pure domain services (pricing, wait-time degradation)
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Invariants
//!
//! - A trip always has at least one party member, and its `party_size`
//!   always equals the stored member count.
//! - Every reservation date falls inside its trip's date window.
//! - Reservation statuses only move along the legal state machine edges;
//!   terminal states never transition.
//! - Derived values (trip length, hotel totals, cost summaries) are
//!   recomputed on read, never stored stale.

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
