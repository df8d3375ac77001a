//! Service layer: validation and business rules in front of the repository.
//!
//! Free functions over `&dyn FullRepository` so any backend can sit behind
//! them. Every write validates its inputs first; nothing is persisted when
//! validation fails.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::api::{
    DailyEvent, DailyEventId, DiningReservation, DiningReservationId, EventPatch,
    HotelReservation, HotelReservationId, LightningLaneKind, LightningLaneReservation,
    LightningLaneReservationId, MemberPatch, NewDailyEvent, NewDiningReservation,
    NewHotelReservation, NewLightningLaneReservation, NewPartyMember, NewTrip, PartyMember,
    PartyMemberId, ReservationRef, ReservationStatus, Trip, TripBundle, TripId, TripStatus,
    UserId,
};
use crate::db::repository::{
    CatalogRepository, ErrorContext, FullRepository, ItineraryRepository, PartyRepository,
    RepositoryError, RepositoryResult, ReservationRepository, TripRepository,
};
use crate::models::reservation::generate_confirmation_code;
use crate::models::trip::NavigationStep;
use crate::services::pricing::{self, CostSummary};

/// Create a trip with its initial party. A trip always has at least one
/// traveler.
pub async fn create_trip(
    repo: &dyn FullRepository,
    new_trip: NewTrip,
    members: Vec<NewPartyMember>,
) -> RepositoryResult<Trip> {
    Trip::validate(&new_trip.name, new_trip.start_date, new_trip.end_date).map_err(|e| {
        RepositoryError::validation_with_context(e, ErrorContext::new("create_trip"))
    })?;
    if members.is_empty() {
        return Err(RepositoryError::validation_with_context(
            "A trip requires at least one party member",
            ErrorContext::new("create_trip").with_entity("trip"),
        ));
    }
    for member in &members {
        PartyMember::validate(&member.name, member.age).map_err(|e| {
            RepositoryError::validation_with_context(e, ErrorContext::new("create_trip"))
        })?;
    }

    let trip = repo.create_trip(new_trip, members).await?;
    info!(trip_id = %trip.id, party_size = trip.party_size, "created trip");
    Ok(trip)
}

/// Fetch a trip with all of its owned entities.
pub async fn get_trip(repo: &dyn FullRepository, trip_id: TripId) -> RepositoryResult<TripBundle> {
    repo.get_trip(trip_id).await
}

/// All trips owned by a user, most recently created first.
pub async fn list_trips_for_user(
    repo: &dyn FullRepository,
    user_id: &UserId,
) -> RepositoryResult<Vec<Trip>> {
    repo.list_trips_for_user(user_id).await
}

/// Rename a trip and move its date window.
///
/// Shrinking the window out from under live reservations or planned events
/// is rejected; the conflict message lists the dates that would be orphaned.
pub async fn update_trip_dates(
    repo: &dyn FullRepository,
    trip_id: TripId,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> RepositoryResult<Trip> {
    Trip::validate(&name, start_date, end_date).map_err(|e| {
        RepositoryError::validation_with_context(e, ErrorContext::new("update_trip_dates"))
    })?;

    let bundle = repo.get_trip(trip_id).await?;
    let mut orphaned: Vec<NaiveDate> = Vec::new();
    for r in bundle.hotel_reservations.iter().filter(|r| r.status.is_live()) {
        if r.check_in < start_date || r.check_out > end_date {
            orphaned.push(r.check_in);
        }
    }
    for r in bundle.dining_reservations.iter().filter(|r| r.status.is_live()) {
        if r.date < start_date || r.date > end_date {
            orphaned.push(r.date);
        }
    }
    for r in bundle
        .lightning_lane_reservations
        .iter()
        .filter(|r| r.status.is_live())
    {
        if r.date < start_date || r.date > end_date {
            orphaned.push(r.date);
        }
    }
    for e in &bundle.events {
        if e.date < start_date || e.date > end_date {
            orphaned.push(e.date);
        }
    }
    if !orphaned.is_empty() {
        orphaned.sort();
        orphaned.dedup();
        let dates: Vec<String> = orphaned.iter().map(|d| d.to_string()).collect();
        return Err(RepositoryError::conflict_with_context(
            format!(
                "New date window excludes existing plans on: {}",
                dates.join(", ")
            ),
            ErrorContext::new("update_trip_dates")
                .with_entity("trip")
                .with_entity_id(trip_id),
        ));
    }

    repo.update_trip(trip_id, name, start_date, end_date).await
}

/// Persist the navigation step the user last had open.
pub async fn set_current_step(
    repo: &dyn FullRepository,
    trip_id: TripId,
    step: NavigationStep,
) -> RepositoryResult<Trip> {
    repo.set_current_step(trip_id, step).await
}

/// Set the trip lifecycle status.
pub async fn set_trip_status(
    repo: &dyn FullRepository,
    trip_id: TripId,
    status: TripStatus,
) -> RepositoryResult<Trip> {
    repo.set_trip_status(trip_id, status).await
}

/// Delete a trip and everything it owns. Idempotent.
pub async fn delete_trip(repo: &dyn FullRepository, trip_id: TripId) -> RepositoryResult<()> {
    repo.delete_trip(trip_id).await?;
    info!(trip_id = %trip_id, "deleted trip");
    Ok(())
}

/// Add a traveler to a trip. Returns the member and the trip with its
/// updated party size.
pub async fn add_member(
    repo: &dyn FullRepository,
    trip_id: TripId,
    member: NewPartyMember,
) -> RepositoryResult<(PartyMember, Trip)> {
    PartyMember::validate(&member.name, member.age)
        .map_err(|e| RepositoryError::validation_with_context(e, ErrorContext::new("add_member")))?;
    repo.insert_member(trip_id, member).await
}

/// Apply a field-level patch to a traveler.
pub async fn update_member(
    repo: &dyn FullRepository,
    member_id: PartyMemberId,
    patch: MemberPatch,
) -> RepositoryResult<PartyMember> {
    if let Some(ref name) = patch.name {
        if name.trim().is_empty() {
            return Err(RepositoryError::validation_with_context(
                "Party member name must not be empty",
                ErrorContext::new("update_member"),
            ));
        }
    }
    if let Some(age) = patch.age {
        PartyMember::validate_age(age).map_err(|e| {
            RepositoryError::validation_with_context(e, ErrorContext::new("update_member"))
        })?;
    }
    repo.update_member(member_id, patch).await
}

/// Remove a traveler. A trip never drops to zero members.
pub async fn remove_member(
    repo: &dyn FullRepository,
    member_id: PartyMemberId,
) -> RepositoryResult<Trip> {
    repo.remove_member(member_id).await
}

/// Members of a trip in display order.
pub async fn list_members(
    repo: &dyn FullRepository,
    trip_id: TripId,
) -> RepositoryResult<Vec<PartyMember>> {
    repo.list_members(trip_id).await
}

fn require_in_window(
    trip: &Trip,
    date: NaiveDate,
    operation: &str,
) -> RepositoryResult<()> {
    if !trip.contains_date(date) {
        return Err(RepositoryError::validation_with_context(
            format!(
                "Date {} is outside the trip window ({} to {})",
                date, trip.start_date, trip.end_date
            ),
            ErrorContext::new(operation)
                .with_entity("trip")
                .with_entity_id(trip.id),
        ));
    }
    Ok(())
}

/// Book a hotel stay on a trip.
pub async fn create_hotel_reservation(
    repo: &dyn FullRepository,
    trip_id: TripId,
    input: NewHotelReservation,
) -> RepositoryResult<HotelReservation> {
    let trip = repo.get_trip_record(trip_id).await?;

    if input.check_in >= input.check_out {
        return Err(RepositoryError::validation_with_context(
            format!(
                "Check-in {} must be before check-out {}",
                input.check_in, input.check_out
            ),
            ErrorContext::new("create_hotel_reservation"),
        ));
    }
    if input.check_in < trip.start_date || input.check_out > trip.end_date {
        return Err(RepositoryError::validation_with_context(
            format!(
                "Stay {} to {} falls outside the trip window ({} to {})",
                input.check_in, input.check_out, trip.start_date, trip.end_date
            ),
            ErrorContext::new("create_hotel_reservation")
                .with_entity("hotel_reservation"),
        ));
    }
    if input.guests == 0 {
        return Err(RepositoryError::validation_with_context(
            "A hotel reservation needs at least one guest",
            ErrorContext::new("create_hotel_reservation"),
        ));
    }

    let room_type = repo.get_room_type(input.room_type_id).await?;
    if room_type.hotel_id != input.hotel_id {
        return Err(RepositoryError::validation_with_context(
            format!(
                "Room type {} does not belong to hotel {}",
                input.room_type_id, input.hotel_id
            ),
            ErrorContext::new("create_hotel_reservation"),
        ));
    }
    if input.guests > room_type.max_occupancy {
        return Err(RepositoryError::validation_with_context(
            format!(
                "{} guests exceeds the room's max occupancy of {}",
                input.guests, room_type.max_occupancy
            ),
            ErrorContext::new("create_hotel_reservation"),
        ));
    }

    let reservation = HotelReservation {
        id: HotelReservationId::new(),
        trip_id,
        hotel_id: input.hotel_id,
        room_type_id: input.room_type_id,
        check_in: input.check_in,
        check_out: input.check_out,
        guests: input.guests,
        price_per_night_cents: input
            .price_per_night_cents
            .unwrap_or(room_type.price_per_night_cents),
        status: if input.confirmed {
            ReservationStatus::Confirmed
        } else {
            ReservationStatus::Pending
        },
        confirmation_code: input
            .confirmation_code
            .unwrap_or_else(generate_confirmation_code),
        notes: input.notes,
        created_at: chrono::Utc::now(),
    };
    debug!(trip_id = %trip_id, reservation_id = %reservation.id, "booking hotel stay");
    repo.insert_hotel_reservation(reservation).await
}

/// Book a dining slot on a trip. Party size defaults to the trip's and may
/// never exceed it.
pub async fn create_dining_reservation(
    repo: &dyn FullRepository,
    trip_id: TripId,
    input: NewDiningReservation,
) -> RepositoryResult<DiningReservation> {
    let trip = repo.get_trip_record(trip_id).await?;
    require_in_window(&trip, input.date, "create_dining_reservation")?;

    // Confirms the restaurant exists in the catalog.
    repo.get_restaurant(input.restaurant_id).await?;

    let party_size = input.party_size.unwrap_or(trip.party_size);
    if party_size == 0 {
        return Err(RepositoryError::validation_with_context(
            "A dining reservation needs at least one diner",
            ErrorContext::new("create_dining_reservation"),
        ));
    }
    if party_size > trip.party_size {
        return Err(RepositoryError::validation_with_context(
            format!(
                "Party size {} exceeds the trip's party of {}",
                party_size, trip.party_size
            ),
            ErrorContext::new("create_dining_reservation"),
        ));
    }

    let reservation = DiningReservation {
        id: DiningReservationId::new(),
        trip_id,
        restaurant_id: input.restaurant_id,
        date: input.date,
        time: input.time,
        party_size,
        status: if input.confirmed {
            ReservationStatus::Confirmed
        } else {
            ReservationStatus::Pending
        },
        confirmation_code: input
            .confirmation_code
            .unwrap_or_else(generate_confirmation_code),
        special_requests: input.special_requests,
        notes: input.notes,
        created_at: chrono::Utc::now(),
    };
    repo.insert_dining_reservation(reservation).await
}

/// Book a lightning lane return window.
pub async fn create_lightning_lane_reservation(
    repo: &dyn FullRepository,
    trip_id: TripId,
    input: NewLightningLaneReservation,
) -> RepositoryResult<LightningLaneReservation> {
    let trip = repo.get_trip_record(trip_id).await?;
    require_in_window(&trip, input.date, "create_lightning_lane_reservation")?;

    if input.return_start >= input.return_end {
        return Err(RepositoryError::validation_with_context(
            format!(
                "Return window start {} must be before end {}",
                input.return_start, input.return_end
            ),
            ErrorContext::new("create_lightning_lane_reservation"),
        ));
    }

    let attraction = repo.get_attraction(input.attraction_id).await?;
    match attraction.lightning_lane {
        Some(offered) if offered == input.kind => {}
        _ => {
            return Err(RepositoryError::validation_with_context(
                format!(
                    "Attraction {} does not offer a {:?} lightning lane",
                    attraction.name, input.kind
                ),
                ErrorContext::new("create_lightning_lane_reservation"),
            ));
        }
    }

    let party_size = input.party_size.unwrap_or(trip.party_size);
    if party_size == 0 || party_size > trip.party_size {
        return Err(RepositoryError::validation_with_context(
            format!(
                "Party size {} must be between 1 and the trip's party of {}",
                party_size, trip.party_size
            ),
            ErrorContext::new("create_lightning_lane_reservation"),
        ));
    }

    // Individual lanes carry a per-person cost; Genie+ never does.
    let cost_per_person_cents = match input.kind {
        LightningLaneKind::Individual => Some(
            input
                .cost_per_person_cents
                .or(attraction.lightning_lane_price_cents)
                .ok_or_else(|| {
                    RepositoryError::validation_with_context(
                        "Individual lightning lane requires a per-person cost",
                        ErrorContext::new("create_lightning_lane_reservation"),
                    )
                })?,
        ),
        LightningLaneKind::GeniePlus => None,
    };

    let reservation = LightningLaneReservation {
        id: LightningLaneReservationId::new(),
        trip_id,
        attraction_id: input.attraction_id,
        date: input.date,
        return_start: input.return_start,
        return_end: input.return_end,
        party_size,
        kind: input.kind,
        cost_per_person_cents,
        status: if input.confirmed {
            ReservationStatus::Confirmed
        } else {
            ReservationStatus::Pending
        },
        confirmation_code: input
            .confirmation_code
            .unwrap_or_else(generate_confirmation_code),
        booked_at: chrono::Utc::now(),
    };
    repo.insert_lightning_lane_reservation(reservation).await
}

/// Hotel stays on a trip, earliest check-in first.
pub async fn list_hotel_reservations(
    repo: &dyn FullRepository,
    trip_id: TripId,
) -> RepositoryResult<Vec<HotelReservation>> {
    repo.list_hotel_reservations(trip_id).await
}

/// Dining slots on a trip, earliest date first.
pub async fn list_dining_reservations(
    repo: &dyn FullRepository,
    trip_id: TripId,
) -> RepositoryResult<Vec<DiningReservation>> {
    repo.list_dining_reservations(trip_id).await
}

/// Lightning lane windows on a trip, earliest date first.
pub async fn list_lightning_lane_reservations(
    repo: &dyn FullRepository,
    trip_id: TripId,
) -> RepositoryResult<Vec<LightningLaneReservation>> {
    repo.list_lightning_lane_reservations(trip_id).await
}

async fn current_status(
    repo: &dyn FullRepository,
    reservation: ReservationRef,
) -> RepositoryResult<ReservationStatus> {
    Ok(match reservation {
        ReservationRef::Hotel(id) => repo.get_hotel_reservation(id).await?.status,
        ReservationRef::Dining(id) => repo.get_dining_reservation(id).await?.status,
        ReservationRef::LightningLane(id) => {
            repo.get_lightning_lane_reservation(id).await?.status
        }
    })
}

async fn transition_reservation(
    repo: &dyn FullRepository,
    reservation: ReservationRef,
    next: ReservationStatus,
    operation: &str,
) -> RepositoryResult<ReservationStatus> {
    let status = current_status(repo, reservation).await?;
    let next = status.transition(next).map_err(|e| {
        RepositoryError::conflict_with_context(
            e,
            ErrorContext::new(operation).with_entity("reservation"),
        )
    })?;
    repo.set_reservation_status(reservation, next).await?;
    Ok(next)
}

/// Cancel a reservation. Only pending or confirmed reservations can be
/// cancelled; a second cancel is a conflict, not a no-op.
pub async fn cancel_reservation(
    repo: &dyn FullRepository,
    reservation: ReservationRef,
) -> RepositoryResult<ReservationStatus> {
    transition_reservation(
        repo,
        reservation,
        ReservationStatus::Cancelled,
        "cancel_reservation",
    )
    .await
}

/// Confirm a pending reservation.
pub async fn confirm_reservation(
    repo: &dyn FullRepository,
    reservation: ReservationRef,
) -> RepositoryResult<ReservationStatus> {
    transition_reservation(
        repo,
        reservation,
        ReservationStatus::Confirmed,
        "confirm_reservation",
    )
    .await
}

/// Mark a confirmed reservation as used.
pub async fn mark_reservation_used(
    repo: &dyn FullRepository,
    reservation: ReservationRef,
) -> RepositoryResult<ReservationStatus> {
    transition_reservation(
        repo,
        reservation,
        ReservationStatus::Used,
        "mark_reservation_used",
    )
    .await
}

/// Mark a confirmed reservation as expired.
pub async fn mark_reservation_expired(
    repo: &dyn FullRepository,
    reservation: ReservationRef,
) -> RepositoryResult<ReservationStatus> {
    transition_reservation(
        repo,
        reservation,
        ReservationStatus::Expired,
        "mark_reservation_expired",
    )
    .await
}

/// Add a plan entry to a trip day.
pub async fn add_event(
    repo: &dyn FullRepository,
    trip_id: TripId,
    event: NewDailyEvent,
) -> RepositoryResult<DailyEvent> {
    DailyEvent::validate(&event.title)
        .map_err(|e| RepositoryError::validation_with_context(e, ErrorContext::new("add_event")))?;
    let trip = repo.get_trip_record(trip_id).await?;
    require_in_window(&trip, event.date, "add_event")?;
    repo.insert_event(trip_id, event).await
}

/// Apply a field-level patch to a plan entry. The patch is checked against
/// the trip window before anything is written, so a rejected patch leaves
/// the stored event untouched.
pub async fn update_event(
    repo: &dyn FullRepository,
    event_id: DailyEventId,
    patch: EventPatch,
) -> RepositoryResult<DailyEvent> {
    if let Some(ref title) = patch.title {
        DailyEvent::validate(title).map_err(|e| {
            RepositoryError::validation_with_context(e, ErrorContext::new("update_event"))
        })?;
    }
    let existing = repo.get_event(event_id).await?;
    let effective_date = patch.date.unwrap_or(existing.date);
    let trip = repo.get_trip_record(existing.trip_id).await?;
    if !trip.contains_date(effective_date) {
        return Err(RepositoryError::validation_with_context(
            format!(
                "Event date {} is outside the trip window ({} to {})",
                effective_date, trip.start_date, trip.end_date
            ),
            ErrorContext::new("update_event")
                .with_entity("daily_event")
                .with_entity_id(event_id),
        ));
    }
    repo.update_event(event_id, patch).await
}

/// Remove a plan entry.
pub async fn remove_event(
    repo: &dyn FullRepository,
    event_id: DailyEventId,
) -> RepositoryResult<()> {
    repo.remove_event(event_id).await
}

/// Every plan entry for a trip, ordered by date and time.
pub async fn list_events(
    repo: &dyn FullRepository,
    trip_id: TripId,
) -> RepositoryResult<Vec<DailyEvent>> {
    repo.list_events(trip_id).await
}

/// One day's plan, ordered by time of day. An empty day is an empty list.
pub async fn events_for_date(
    repo: &dyn FullRepository,
    trip_id: TripId,
    date: NaiveDate,
) -> RepositoryResult<Vec<DailyEvent>> {
    repo.events_for_date(trip_id, date).await
}

/// Estimated cost breakdown for a trip.
pub async fn cost_summary(
    repo: &dyn FullRepository,
    trip_id: TripId,
) -> RepositoryResult<CostSummary> {
    let bundle = repo.get_trip(trip_id).await?;
    Ok(pricing::cost_summary(&bundle))
}

/// Liveness probe for the backing store.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<()> {
    repo.health_check().await
}
