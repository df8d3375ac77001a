//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for planning rules.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::dto::{
    CreateHotelReservationRequest, CreateTripRequest, DailyEventDto, DiningReservationDto,
    HealthResponse, HotelReservationDto, LightningLaneReservationDto, MemberAddedResponse,
    PartyMemberDto, ReservationStatusRequest, ReservationStatusResponse, TripBundleResponse,
    TripDto, TripListResponse, TripsQuery, UpdateStepRequest, UpdateTripRequest,
    UpdateTripStatusRequest, WaitTimesResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{
    Attraction, DailyEventId, DiningReservationId, EventPatch, Hotel, HotelId,
    HotelReservationId, LightningLaneReservationId, MemberPatch, NewDailyEvent,
    NewDiningReservation, NewHotelReservation, NewLightningLaneReservation, NewPartyMember,
    NewTrip, Park, ParkId, PartyMemberId, Restaurant, ReservationRef, ReservationStatus,
    RoomType, TripId, UserId,
};
use crate::db::repository::CatalogRepository;
use crate::db::services as db_services;
use crate::services::pricing::CostSummary;
use crate::services::wait_times;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn reservation_ref(kind: &str, id: Uuid) -> Result<ReservationRef, AppError> {
    match kind {
        "hotel" => Ok(ReservationRef::Hotel(HotelReservationId::from_uuid(id))),
        "dining" => Ok(ReservationRef::Dining(DiningReservationId::from_uuid(id))),
        "lightning-lane" => Ok(ReservationRef::LightningLane(
            LightningLaneReservationId::from_uuid(id),
        )),
        other => Err(AppError::BadRequest(format!(
            "Unknown reservation kind: {}",
            other
        ))),
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Verifies the service is running and the store is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(()) => "connected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Trip CRUD
// =============================================================================

/// POST /v1/trips
pub async fn create_trip(
    State(state): State<AppState>,
    Json(request): Json<CreateTripRequest>,
) -> Result<(StatusCode, Json<TripDto>), AppError> {
    let new_trip = NewTrip {
        user_id: UserId::new(request.user_id),
        name: request.name,
        start_date: request.start_date,
        end_date: request.end_date,
    };
    let trip =
        db_services::create_trip(state.repository.as_ref(), new_trip, request.party_members)
            .await?;
    Ok((StatusCode::CREATED, Json(trip.into())))
}

/// GET /v1/trips?user_id={user_id}
pub async fn list_trips(
    State(state): State<AppState>,
    Query(query): Query<TripsQuery>,
) -> HandlerResult<TripListResponse> {
    let user_id = UserId::new(query.user_id);
    let trips = db_services::list_trips_for_user(state.repository.as_ref(), &user_id).await?;
    let trips: Vec<TripDto> = trips.into_iter().map(Into::into).collect();
    let total = trips.len();
    Ok(Json(TripListResponse { trips, total }))
}

/// GET /v1/trips/{trip_id}
pub async fn get_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
) -> HandlerResult<TripBundleResponse> {
    let bundle = db_services::get_trip(state.repository.as_ref(), trip_id).await?;
    Ok(Json(bundle.into()))
}

/// PUT /v1/trips/{trip_id}
pub async fn update_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
    Json(request): Json<UpdateTripRequest>,
) -> HandlerResult<TripDto> {
    let trip = db_services::update_trip_dates(
        state.repository.as_ref(),
        trip_id,
        request.name,
        request.start_date,
        request.end_date,
    )
    .await?;
    Ok(Json(trip.into()))
}

/// PUT /v1/trips/{trip_id}/step
pub async fn update_step(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
    Json(request): Json<UpdateStepRequest>,
) -> HandlerResult<TripDto> {
    let trip =
        db_services::set_current_step(state.repository.as_ref(), trip_id, request.current_step)
            .await?;
    Ok(Json(trip.into()))
}

/// PUT /v1/trips/{trip_id}/status
pub async fn update_trip_status(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
    Json(request): Json<UpdateTripStatusRequest>,
) -> HandlerResult<TripDto> {
    let trip =
        db_services::set_trip_status(state.repository.as_ref(), trip_id, request.status).await?;
    Ok(Json(trip.into()))
}

/// DELETE /v1/trips/{trip_id}
pub async fn delete_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
) -> Result<StatusCode, AppError> {
    db_services::delete_trip(state.repository.as_ref(), trip_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Party Members
// =============================================================================

/// GET /v1/trips/{trip_id}/members
pub async fn list_members(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
) -> HandlerResult<Vec<PartyMemberDto>> {
    let members = db_services::list_members(state.repository.as_ref(), trip_id).await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

/// POST /v1/trips/{trip_id}/members
pub async fn add_member(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
    Json(request): Json<NewPartyMember>,
) -> Result<(StatusCode, Json<MemberAddedResponse>), AppError> {
    let (member, trip) =
        db_services::add_member(state.repository.as_ref(), trip_id, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(MemberAddedResponse {
            member: member.into(),
            trip: trip.into(),
        }),
    ))
}

/// PATCH /v1/members/{member_id}
pub async fn update_member(
    State(state): State<AppState>,
    Path(member_id): Path<PartyMemberId>,
    Json(patch): Json<MemberPatch>,
) -> HandlerResult<PartyMemberDto> {
    let member = db_services::update_member(state.repository.as_ref(), member_id, patch).await?;
    Ok(Json(member.into()))
}

/// DELETE /v1/members/{member_id}
///
/// Returns the trip with its recomputed party size.
pub async fn remove_member(
    State(state): State<AppState>,
    Path(member_id): Path<PartyMemberId>,
) -> HandlerResult<TripDto> {
    let trip = db_services::remove_member(state.repository.as_ref(), member_id).await?;
    Ok(Json(trip.into()))
}

// =============================================================================
// Reservations
// =============================================================================

/// POST /v1/trips/{trip_id}/hotel-reservations
pub async fn create_hotel_reservation(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
    Json(request): Json<CreateHotelReservationRequest>,
) -> Result<(StatusCode, Json<HotelReservationDto>), AppError> {
    let input = NewHotelReservation {
        hotel_id: request.hotel_id,
        room_type_id: request.room_type_id,
        check_in: request.check_in,
        check_out: request.check_out,
        guests: request.guests,
        price_per_night_cents: request.price_per_night_cents,
        confirmed: request.confirmed,
        confirmation_code: request.confirmation_code,
        notes: request.notes,
    };
    let reservation =
        db_services::create_hotel_reservation(state.repository.as_ref(), trip_id, input).await?;
    Ok((StatusCode::CREATED, Json(reservation.into())))
}

/// GET /v1/trips/{trip_id}/hotel-reservations
pub async fn list_hotel_reservations(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
) -> HandlerResult<Vec<HotelReservationDto>> {
    let reservations =
        db_services::list_hotel_reservations(state.repository.as_ref(), trip_id).await?;
    Ok(Json(reservations.into_iter().map(Into::into).collect()))
}

/// POST /v1/trips/{trip_id}/dining-reservations
pub async fn create_dining_reservation(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
    Json(request): Json<NewDiningReservation>,
) -> Result<(StatusCode, Json<DiningReservationDto>), AppError> {
    let reservation =
        db_services::create_dining_reservation(state.repository.as_ref(), trip_id, request)
            .await?;
    Ok((StatusCode::CREATED, Json(reservation.into())))
}

/// GET /v1/trips/{trip_id}/dining-reservations
pub async fn list_dining_reservations(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
) -> HandlerResult<Vec<DiningReservationDto>> {
    let reservations =
        db_services::list_dining_reservations(state.repository.as_ref(), trip_id).await?;
    Ok(Json(reservations.into_iter().map(Into::into).collect()))
}

/// POST /v1/trips/{trip_id}/lightning-lane-reservations
pub async fn create_lightning_lane_reservation(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
    Json(request): Json<NewLightningLaneReservation>,
) -> Result<(StatusCode, Json<LightningLaneReservationDto>), AppError> {
    let reservation =
        db_services::create_lightning_lane_reservation(state.repository.as_ref(), trip_id, request)
            .await?;
    Ok((StatusCode::CREATED, Json(reservation.into())))
}

/// GET /v1/trips/{trip_id}/lightning-lane-reservations
pub async fn list_lightning_lane_reservations(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
) -> HandlerResult<Vec<LightningLaneReservationDto>> {
    let reservations =
        db_services::list_lightning_lane_reservations(state.repository.as_ref(), trip_id).await?;
    Ok(Json(reservations.into_iter().map(Into::into).collect()))
}

/// POST /v1/reservations/{kind}/{reservation_id}/cancel
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Path((kind, reservation_id)): Path<(String, Uuid)>,
) -> HandlerResult<ReservationStatusResponse> {
    let reservation = reservation_ref(&kind, reservation_id)?;
    let status = db_services::cancel_reservation(state.repository.as_ref(), reservation).await?;
    Ok(Json(ReservationStatusResponse { status }))
}

/// POST /v1/reservations/{kind}/{reservation_id}/status
///
/// Moves a reservation through its state machine; illegal transitions are
/// conflicts.
pub async fn update_reservation_status(
    State(state): State<AppState>,
    Path((kind, reservation_id)): Path<(String, Uuid)>,
    Json(request): Json<ReservationStatusRequest>,
) -> HandlerResult<ReservationStatusResponse> {
    let reservation = reservation_ref(&kind, reservation_id)?;
    let repo = state.repository.as_ref();
    let status = match request.status {
        ReservationStatus::Confirmed => {
            db_services::confirm_reservation(repo, reservation).await?
        }
        ReservationStatus::Cancelled => db_services::cancel_reservation(repo, reservation).await?,
        ReservationStatus::Used => db_services::mark_reservation_used(repo, reservation).await?,
        ReservationStatus::Expired => {
            db_services::mark_reservation_expired(repo, reservation).await?
        }
        ReservationStatus::Pending => {
            return Err(AppError::BadRequest(
                "A reservation cannot be moved back to pending".to_string(),
            ));
        }
    };
    Ok(Json(ReservationStatusResponse { status }))
}

// =============================================================================
// Daily Itinerary
// =============================================================================

/// GET /v1/trips/{trip_id}/events
pub async fn list_events(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
) -> HandlerResult<Vec<DailyEventDto>> {
    let events = db_services::list_events(state.repository.as_ref(), trip_id).await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// GET /v1/trips/{trip_id}/events/{date}
pub async fn events_for_date(
    State(state): State<AppState>,
    Path((trip_id, date)): Path<(TripId, chrono::NaiveDate)>,
) -> HandlerResult<Vec<DailyEventDto>> {
    let events = db_services::events_for_date(state.repository.as_ref(), trip_id, date).await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// POST /v1/trips/{trip_id}/events
pub async fn add_event(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
    Json(request): Json<NewDailyEvent>,
) -> Result<(StatusCode, Json<DailyEventDto>), AppError> {
    let event = db_services::add_event(state.repository.as_ref(), trip_id, request).await?;
    Ok((StatusCode::CREATED, Json(event.into())))
}

/// PATCH /v1/events/{event_id}
pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<DailyEventId>,
    Json(patch): Json<EventPatch>,
) -> HandlerResult<DailyEventDto> {
    let event = db_services::update_event(state.repository.as_ref(), event_id, patch).await?;
    Ok(Json(event.into()))
}

/// DELETE /v1/events/{event_id}
pub async fn remove_event(
    State(state): State<AppState>,
    Path(event_id): Path<DailyEventId>,
) -> Result<StatusCode, AppError> {
    db_services::remove_event(state.repository.as_ref(), event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Cost Summary
// =============================================================================

/// GET /v1/trips/{trip_id}/cost-summary
pub async fn cost_summary(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
) -> HandlerResult<CostSummary> {
    let summary = db_services::cost_summary(state.repository.as_ref(), trip_id).await?;
    Ok(Json(summary))
}

// =============================================================================
// Reference Catalog
// =============================================================================

/// GET /v1/parks
pub async fn list_parks(State(state): State<AppState>) -> HandlerResult<Vec<Park>> {
    Ok(Json(state.repository.list_parks().await?))
}

/// GET /v1/parks/{park_id}/attractions
pub async fn list_attractions(
    State(state): State<AppState>,
    Path(park_id): Path<ParkId>,
) -> HandlerResult<Vec<Attraction>> {
    Ok(Json(state.repository.list_attractions(park_id).await?))
}

/// GET /v1/restaurants
pub async fn list_restaurants(State(state): State<AppState>) -> HandlerResult<Vec<Restaurant>> {
    Ok(Json(state.repository.list_restaurants().await?))
}

/// GET /v1/hotels
pub async fn list_hotels(State(state): State<AppState>) -> HandlerResult<Vec<Hotel>> {
    Ok(Json(state.repository.list_hotels().await?))
}

/// GET /v1/hotels/{hotel_id}/room-types
pub async fn list_room_types(
    State(state): State<AppState>,
    Path(hotel_id): Path<HotelId>,
) -> HandlerResult<Vec<RoomType>> {
    Ok(Json(state.repository.list_room_types(hotel_id).await?))
}

// =============================================================================
// Wait Times
// =============================================================================

/// GET /v1/parks/{park_id}/wait-times
///
/// Never fails on feed outage: unknown entries are returned instead.
pub async fn park_wait_times(
    State(state): State<AppState>,
    Path(park_id): Path<ParkId>,
) -> HandlerResult<WaitTimesResponse> {
    let attractions = state.repository.list_attractions(park_id).await?;
    let ids: Vec<_> = attractions.iter().map(|a| a.id).collect();
    let entries =
        wait_times::fetch_wait_times_or_unknown(state.wait_times.as_ref(), park_id, &ids).await;
    Ok(Json(WaitTimesResponse {
        park_id: park_id.to_string(),
        entries,
    }))
}
