//! Request and response types for the REST API.
//!
//! Derived values (trip length, hotel nights, reservation totals) are
//! computed here on every conversion so responses can never carry a stale
//! figure.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    DailyEvent, DiningReservation, DiningReservationId, DietaryRestriction, EventCategory,
    HotelId, HotelReservation, HotelReservationId, LightningLaneKind, LightningLaneReservation,
    LightningLaneReservationId, NewPartyMember, PartyMember, RestaurantId, ReservationStatus,
    RoomTypeId, TicketType, TimeOfDay, Trip, TripBundle, TripStatus,
};
use crate::models::trip::NavigationStep;
use crate::services::wait_times::WaitTimeEntry;

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Request to create a trip with its initial party.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTripRequest {
    pub user_id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub party_members: Vec<NewPartyMember>,
}

/// Trip representation with derived fields.
#[derive(Debug, Serialize, Deserialize)]
pub struct TripDto {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub party_size: u32,
    pub status: TripStatus,
    pub current_step: NavigationStep,
    pub length_days: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Trip> for TripDto {
    fn from(trip: Trip) -> Self {
        let length_days = trip.length_days();
        Self {
            id: trip.id.to_string(),
            user_id: trip.user_id.to_string(),
            name: trip.name,
            start_date: trip.start_date,
            end_date: trip.end_date,
            party_size: trip.party_size,
            status: trip.status,
            current_step: trip.current_step,
            length_days,
            created_at: trip.created_at,
        }
    }
}

/// Trip list response.
#[derive(Debug, Serialize, Deserialize)]
pub struct TripListResponse {
    pub trips: Vec<TripDto>,
    pub total: usize,
}

/// Query parameters for listing trips.
#[derive(Debug, Deserialize)]
pub struct TripsQuery {
    pub user_id: String,
}

/// Request to rename a trip or move its date window.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTripRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Request to persist the current navigation step.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateStepRequest {
    pub current_step: NavigationStep,
}

/// Request to set the trip lifecycle status.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTripStatusRequest {
    pub status: TripStatus,
}

/// Party member representation.
#[derive(Debug, Serialize, Deserialize)]
pub struct PartyMemberDto {
    pub id: String,
    pub trip_id: String,
    pub name: String,
    pub age: i32,
    pub ticket_type: TicketType,
    pub dietary_restriction: DietaryRestriction,
    pub das_eligible: bool,
    pub sort_order: u32,
}

impl From<PartyMember> for PartyMemberDto {
    fn from(member: PartyMember) -> Self {
        Self {
            id: member.id.to_string(),
            trip_id: member.trip_id.to_string(),
            name: member.name,
            age: member.age,
            ticket_type: member.ticket_type,
            dietary_restriction: member.dietary_restriction,
            das_eligible: member.das_eligible,
            sort_order: member.sort_order,
        }
    }
}

/// Member added response: the member plus the trip with its new size.
#[derive(Debug, Serialize, Deserialize)]
pub struct MemberAddedResponse {
    pub member: PartyMemberDto,
    pub trip: TripDto,
}

/// Request to book a hotel stay.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateHotelReservationRequest {
    pub hotel_id: HotelId,
    pub room_type_id: RoomTypeId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    #[serde(default)]
    pub price_per_night_cents: Option<i64>,
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default)]
    pub confirmation_code: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Hotel reservation representation with derived nights and total.
#[derive(Debug, Serialize, Deserialize)]
pub struct HotelReservationDto {
    pub id: HotelReservationId,
    pub trip_id: String,
    pub hotel_id: HotelId,
    pub room_type_id: RoomTypeId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub guests: u32,
    pub price_per_night_cents: i64,
    pub total_cents: i64,
    pub status: ReservationStatus,
    pub confirmation_code: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<HotelReservation> for HotelReservationDto {
    fn from(r: HotelReservation) -> Self {
        let nights = r.nights();
        let total_cents = r.total_cents();
        Self {
            id: r.id,
            trip_id: r.trip_id.to_string(),
            hotel_id: r.hotel_id,
            room_type_id: r.room_type_id,
            check_in: r.check_in,
            check_out: r.check_out,
            nights,
            guests: r.guests,
            price_per_night_cents: r.price_per_night_cents,
            total_cents,
            status: r.status,
            confirmation_code: r.confirmation_code,
            notes: r.notes,
            created_at: r.created_at,
        }
    }
}

/// Dining reservation representation.
#[derive(Debug, Serialize, Deserialize)]
pub struct DiningReservationDto {
    pub id: DiningReservationId,
    pub trip_id: String,
    pub restaurant_id: RestaurantId,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub party_size: u32,
    pub status: ReservationStatus,
    pub confirmation_code: String,
    pub special_requests: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DiningReservation> for DiningReservationDto {
    fn from(r: DiningReservation) -> Self {
        Self {
            id: r.id,
            trip_id: r.trip_id.to_string(),
            restaurant_id: r.restaurant_id,
            date: r.date,
            time: r.time,
            party_size: r.party_size,
            status: r.status,
            confirmation_code: r.confirmation_code,
            special_requests: r.special_requests,
            notes: r.notes,
            created_at: r.created_at,
        }
    }
}

/// Lightning lane reservation representation with derived total.
#[derive(Debug, Serialize, Deserialize)]
pub struct LightningLaneReservationDto {
    pub id: LightningLaneReservationId,
    pub trip_id: String,
    pub attraction_id: crate::api::AttractionId,
    pub date: NaiveDate,
    pub return_start: TimeOfDay,
    pub return_end: TimeOfDay,
    pub party_size: u32,
    pub kind: LightningLaneKind,
    pub cost_per_person_cents: Option<i64>,
    pub total_cents: Option<i64>,
    pub status: ReservationStatus,
    pub confirmation_code: String,
    pub booked_at: DateTime<Utc>,
}

impl From<LightningLaneReservation> for LightningLaneReservationDto {
    fn from(r: LightningLaneReservation) -> Self {
        let total_cents = r.total_cents();
        Self {
            id: r.id,
            trip_id: r.trip_id.to_string(),
            attraction_id: r.attraction_id,
            date: r.date,
            return_start: r.return_start,
            return_end: r.return_end,
            party_size: r.party_size,
            kind: r.kind,
            cost_per_person_cents: r.cost_per_person_cents,
            total_cents,
            status: r.status,
            confirmation_code: r.confirmation_code,
            booked_at: r.booked_at,
        }
    }
}

/// Request to move a reservation through its state machine.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReservationStatusRequest {
    pub status: ReservationStatus,
}

/// Response after a reservation status change.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReservationStatusResponse {
    pub status: ReservationStatus,
}

/// Daily event representation.
#[derive(Debug, Serialize, Deserialize)]
pub struct DailyEventDto {
    pub id: String,
    pub trip_id: String,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub title: String,
    pub category: EventCategory,
    pub location: Option<String>,
    pub description: Option<String>,
    pub party_size: Option<u32>,
    pub confirmation_number: Option<String>,
    pub notes: Option<String>,
}

impl From<DailyEvent> for DailyEventDto {
    fn from(e: DailyEvent) -> Self {
        Self {
            id: e.id.to_string(),
            trip_id: e.trip_id.to_string(),
            date: e.date,
            time: e.time,
            title: e.title,
            category: e.category,
            location: e.location,
            description: e.description,
            party_size: e.party_size,
            confirmation_number: e.confirmation_number,
            notes: e.notes,
        }
    }
}

/// Full trip response: the trip and everything it owns.
#[derive(Debug, Serialize, Deserialize)]
pub struct TripBundleResponse {
    pub trip: TripDto,
    pub members: Vec<PartyMemberDto>,
    pub hotel_reservations: Vec<HotelReservationDto>,
    pub dining_reservations: Vec<DiningReservationDto>,
    pub lightning_lane_reservations: Vec<LightningLaneReservationDto>,
    pub events: Vec<DailyEventDto>,
}

impl From<TripBundle> for TripBundleResponse {
    fn from(bundle: TripBundle) -> Self {
        Self {
            trip: bundle.trip.into(),
            members: bundle.members.into_iter().map(Into::into).collect(),
            hotel_reservations: bundle
                .hotel_reservations
                .into_iter()
                .map(Into::into)
                .collect(),
            dining_reservations: bundle
                .dining_reservations
                .into_iter()
                .map(Into::into)
                .collect(),
            lightning_lane_reservations: bundle
                .lightning_lane_reservations
                .into_iter()
                .map(Into::into)
                .collect(),
            events: bundle.events.into_iter().map(Into::into).collect(),
        }
    }
}

/// Wait times for one park.
#[derive(Debug, Serialize, Deserialize)]
pub struct WaitTimesResponse {
    pub park_id: String,
    pub entries: Vec<WaitTimeEntry>,
}
