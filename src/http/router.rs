//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS, compression, tracing) and
//! creates the axum router ready for serving.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Trip CRUD
        .route("/trips", post(handlers::create_trip))
        .route("/trips", get(handlers::list_trips))
        .route("/trips/{trip_id}", get(handlers::get_trip))
        .route("/trips/{trip_id}", put(handlers::update_trip))
        .route("/trips/{trip_id}", delete(handlers::delete_trip))
        .route("/trips/{trip_id}/step", put(handlers::update_step))
        .route("/trips/{trip_id}/status", put(handlers::update_trip_status))
        // Party members
        .route("/trips/{trip_id}/members", get(handlers::list_members))
        .route("/trips/{trip_id}/members", post(handlers::add_member))
        .route("/members/{member_id}", patch(handlers::update_member))
        .route("/members/{member_id}", delete(handlers::remove_member))
        // Reservations
        .route(
            "/trips/{trip_id}/hotel-reservations",
            post(handlers::create_hotel_reservation),
        )
        .route(
            "/trips/{trip_id}/hotel-reservations",
            get(handlers::list_hotel_reservations),
        )
        .route(
            "/trips/{trip_id}/dining-reservations",
            post(handlers::create_dining_reservation),
        )
        .route(
            "/trips/{trip_id}/dining-reservations",
            get(handlers::list_dining_reservations),
        )
        .route(
            "/trips/{trip_id}/lightning-lane-reservations",
            post(handlers::create_lightning_lane_reservation),
        )
        .route(
            "/trips/{trip_id}/lightning-lane-reservations",
            get(handlers::list_lightning_lane_reservations),
        )
        .route(
            "/reservations/{kind}/{reservation_id}/cancel",
            post(handlers::cancel_reservation),
        )
        .route(
            "/reservations/{kind}/{reservation_id}/status",
            post(handlers::update_reservation_status),
        )
        // Daily itinerary
        .route("/trips/{trip_id}/events", get(handlers::list_events))
        .route("/trips/{trip_id}/events", post(handlers::add_event))
        .route(
            "/trips/{trip_id}/events/{date}",
            get(handlers::events_for_date),
        )
        .route("/events/{event_id}", patch(handlers::update_event))
        .route("/events/{event_id}", delete(handlers::remove_event))
        // Cost summary
        .route("/trips/{trip_id}/cost-summary", get(handlers::cost_summary))
        // Reference catalog
        .route("/parks", get(handlers::list_parks))
        .route(
            "/parks/{park_id}/attractions",
            get(handlers::list_attractions),
        )
        .route("/restaurants", get(handlers::list_restaurants))
        .route("/hotels", get(handlers::list_hotels))
        .route(
            "/hotels/{hotel_id}/room-types",
            get(handlers::list_room_types),
        )
        // Wait times
        .route(
            "/parks/{park_id}/wait-times",
            get(handlers::park_wait_times),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
