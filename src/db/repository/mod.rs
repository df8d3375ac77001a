//! Storage contracts for the planning core.
//!
//! Each aggregate gets its own trait; `FullRepository` bundles them for
//! callers that need the whole store behind one object. Implementations must
//! keep `Trip::party_size` equal to the stored member count across every
//! party mutation, preserve the documented list orderings, and make each
//! method atomic with respect to concurrent callers.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::{
    Attraction, AttractionId, DailyEvent, DailyEventId, DiningReservation, DiningReservationId,
    EventPatch, Hotel, HotelId, HotelReservation, HotelReservationId, LightningLaneReservation,
    LightningLaneReservationId, MemberPatch, NewDailyEvent, NewPartyMember, NewTrip, Park,
    ParkId, PartyMember, PartyMemberId, Restaurant, RestaurantId, ReservationRef,
    ReservationStatus, RoomType, RoomTypeId, Trip, TripBundle, TripId, TripStatus, UserId,
};
use crate::models::trip::NavigationStep;

/// Trip aggregate storage.
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Insert a trip together with its initial party, atomically. The stored
    /// trip's `party_size` equals `members.len()`.
    async fn create_trip(
        &self,
        new_trip: NewTrip,
        members: Vec<NewPartyMember>,
    ) -> RepositoryResult<Trip>;

    /// Fetch a trip with every owned entity.
    async fn get_trip(&self, trip_id: TripId) -> RepositoryResult<TripBundle>;

    /// Fetch the bare trip record.
    async fn get_trip_record(&self, trip_id: TripId) -> RepositoryResult<Trip>;

    /// All trips owned by a user, most recently created first.
    async fn list_trips_for_user(&self, user_id: &UserId) -> RepositoryResult<Vec<Trip>>;

    /// Replace the trip's name and date window.
    async fn update_trip(
        &self,
        trip_id: TripId,
        name: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepositoryResult<Trip>;

    /// Persist the navigation step the user last had open.
    async fn set_current_step(
        &self,
        trip_id: TripId,
        step: NavigationStep,
    ) -> RepositoryResult<Trip>;

    /// Set the trip lifecycle status.
    async fn set_trip_status(&self, trip_id: TripId, status: TripStatus)
        -> RepositoryResult<Trip>;

    /// Delete a trip and cascade to every owned entity. Deleting a trip that
    /// does not exist is a no-op, not an error.
    async fn delete_trip(&self, trip_id: TripId) -> RepositoryResult<()>;

    /// Liveness probe for the backing store.
    async fn health_check(&self) -> RepositoryResult<()>;
}

/// Party member storage. Every mutation recomputes the owning trip's
/// `party_size` in the same atomic step and returns the updated trip.
#[async_trait]
pub trait PartyRepository: Send + Sync {
    /// Add a traveler; returns the member and the trip with its new size.
    async fn insert_member(
        &self,
        trip_id: TripId,
        member: NewPartyMember,
    ) -> RepositoryResult<(PartyMember, Trip)>;

    /// Apply a field-level patch to a traveler.
    async fn update_member(
        &self,
        member_id: PartyMemberId,
        patch: MemberPatch,
    ) -> RepositoryResult<PartyMember>;

    /// Remove a traveler. Fails with a conflict when the traveler is the
    /// trip's last remaining member.
    async fn remove_member(&self, member_id: PartyMemberId) -> RepositoryResult<Trip>;

    /// Members of a trip in stable display order.
    async fn list_members(&self, trip_id: TripId) -> RepositoryResult<Vec<PartyMember>>;
}

/// Reservation ledger storage. Lists are ordered by date ascending, then by
/// creation order within a date.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn insert_hotel_reservation(
        &self,
        reservation: HotelReservation,
    ) -> RepositoryResult<HotelReservation>;

    async fn insert_dining_reservation(
        &self,
        reservation: DiningReservation,
    ) -> RepositoryResult<DiningReservation>;

    async fn insert_lightning_lane_reservation(
        &self,
        reservation: LightningLaneReservation,
    ) -> RepositoryResult<LightningLaneReservation>;

    async fn get_hotel_reservation(
        &self,
        id: HotelReservationId,
    ) -> RepositoryResult<HotelReservation>;

    async fn get_dining_reservation(
        &self,
        id: DiningReservationId,
    ) -> RepositoryResult<DiningReservation>;

    async fn get_lightning_lane_reservation(
        &self,
        id: LightningLaneReservationId,
    ) -> RepositoryResult<LightningLaneReservation>;

    async fn list_hotel_reservations(
        &self,
        trip_id: TripId,
    ) -> RepositoryResult<Vec<HotelReservation>>;

    async fn list_dining_reservations(
        &self,
        trip_id: TripId,
    ) -> RepositoryResult<Vec<DiningReservation>>;

    async fn list_lightning_lane_reservations(
        &self,
        trip_id: TripId,
    ) -> RepositoryResult<Vec<LightningLaneReservation>>;

    /// Overwrite a reservation's status. The legality of the transition is
    /// checked by the service layer before calling this.
    async fn set_reservation_status(
        &self,
        reservation: ReservationRef,
        status: ReservationStatus,
    ) -> RepositoryResult<()>;
}

/// Daily itinerary storage. `events_for_date` returns entries ordered by
/// time of day, then by insertion order for equal times.
#[async_trait]
pub trait ItineraryRepository: Send + Sync {
    async fn insert_event(
        &self,
        trip_id: TripId,
        event: NewDailyEvent,
    ) -> RepositoryResult<DailyEvent>;

    async fn get_event(&self, event_id: DailyEventId) -> RepositoryResult<DailyEvent>;

    async fn update_event(
        &self,
        event_id: DailyEventId,
        patch: EventPatch,
    ) -> RepositoryResult<DailyEvent>;

    async fn remove_event(&self, event_id: DailyEventId) -> RepositoryResult<()>;

    async fn list_events(&self, trip_id: TripId) -> RepositoryResult<Vec<DailyEvent>>;

    async fn events_for_date(
        &self,
        trip_id: TripId,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<DailyEvent>>;
}

/// Read-only reference catalog.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_parks(&self) -> RepositoryResult<Vec<Park>>;

    async fn get_park(&self, park_id: ParkId) -> RepositoryResult<Park>;

    async fn list_attractions(&self, park_id: ParkId) -> RepositoryResult<Vec<Attraction>>;

    async fn get_attraction(&self, attraction_id: AttractionId) -> RepositoryResult<Attraction>;

    async fn list_restaurants(&self) -> RepositoryResult<Vec<Restaurant>>;

    async fn get_restaurant(&self, restaurant_id: RestaurantId) -> RepositoryResult<Restaurant>;

    async fn list_hotels(&self) -> RepositoryResult<Vec<Hotel>>;

    async fn get_hotel(&self, hotel_id: HotelId) -> RepositoryResult<Hotel>;

    async fn list_room_types(&self, hotel_id: HotelId) -> RepositoryResult<Vec<RoomType>>;

    async fn get_room_type(&self, room_type_id: RoomTypeId) -> RepositoryResult<RoomType>;
}

/// The whole store behind one trait object.
pub trait FullRepository:
    TripRepository + PartyRepository + ReservationRepository + ItineraryRepository + CatalogRepository
{
}

impl<T> FullRepository for T where
    T: TripRepository
        + PartyRepository
        + ReservationRepository
        + ItineraryRepository
        + CatalogRepository
{
}
