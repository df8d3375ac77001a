//! In-memory repository backed by a single `RwLock`.
//!
//! Every trait method takes the lock once and releases it before returning,
//! so each operation is atomic with respect to concurrent callers. Collections
//! keyed by trip preserve insertion order, which gives the creation-order
//! component of the documented list orderings for free.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;

use crate::api::{
    Attraction, AttractionId, AttractionType, DailyEvent, DailyEventId, DiningReservation,
    DiningReservationId, EventPatch, Hotel, HotelId, HotelReservation, HotelReservationId,
    HotelTier, LightningLaneKind, LightningLaneReservation, LightningLaneReservationId,
    MemberPatch, NewDailyEvent, NewPartyMember, NewTrip, Park, ParkCode, ParkId, PartyMember,
    PartyMemberId, Restaurant, RestaurantId, RestaurantType, RestaurantVenue, ReservationRef,
    ReservationStatus, RoomType, RoomTypeId, Trip, TripBundle, TripId, TripStatus, UserId,
};
use crate::db::repository::{
    CatalogRepository, ErrorContext, ItineraryRepository, PartyRepository, RepositoryError,
    RepositoryResult, ReservationRepository, TripRepository,
};
use crate::models::time::TimeOfDay;
use crate::models::trip::NavigationStep;

#[derive(Default)]
struct Store {
    trips: HashMap<TripId, Trip>,
    members: HashMap<TripId, Vec<PartyMember>>,
    hotel_reservations: HashMap<TripId, Vec<HotelReservation>>,
    dining_reservations: HashMap<TripId, Vec<DiningReservation>>,
    lightning_lane_reservations: HashMap<TripId, Vec<LightningLaneReservation>>,
    events: HashMap<TripId, Vec<DailyEvent>>,
    parks: Vec<Park>,
    attractions: Vec<Attraction>,
    restaurants: Vec<Restaurant>,
    hotels: Vec<Hotel>,
    room_types: Vec<RoomType>,
}

/// In-memory store for development and tests.
pub struct LocalRepository {
    store: RwLock<Store>,
}

impl LocalRepository {
    /// Create an empty repository with the seeded reference catalog.
    pub fn new() -> Self {
        let repo = Self {
            store: RwLock::new(Store::default()),
        };
        repo.seed_catalog();
        repo
    }

    fn seed_catalog(&self) {
        let mut store = self.store.write();

        let parks = [
            (ParkCode::MagicKingdom, "Magic Kingdom", "🏰", "9:00 AM", "10:00 PM"),
            (ParkCode::Epcot, "EPCOT", "🌐", "9:00 AM", "9:00 PM"),
            (
                ParkCode::HollywoodStudios,
                "Hollywood Studios",
                "🎬",
                "8:30 AM",
                "9:00 PM",
            ),
            (
                ParkCode::AnimalKingdom,
                "Animal Kingdom",
                "🦁",
                "8:00 AM",
                "8:00 PM",
            ),
        ];
        for (code, name, icon, open, close) in parks {
            store.parks.push(Park {
                id: ParkId::new(),
                code,
                name: name.to_string(),
                icon: icon.to_string(),
                description: None,
                opening_time: open.parse().ok(),
                closing_time: close.parse().ok(),
                early_entry_time: None,
            });
        }

        let magic_kingdom = store.parks[0].id;
        let hollywood = store.parks[2].id;
        store.attractions.push(Attraction {
            id: AttractionId::new(),
            park_id: magic_kingdom,
            name: "Seven Dwarfs Mine Train".to_string(),
            kind: AttractionType::Family,
            height_requirement: Some("38in".to_string()),
            description: None,
            lightning_lane: Some(LightningLaneKind::Individual),
            lightning_lane_price_cents: Some(1_200),
            average_wait_minutes: 75,
            tips: vec!["Ride at rope drop or after the evening show".to_string()],
        });
        store.attractions.push(Attraction {
            id: AttractionId::new(),
            park_id: magic_kingdom,
            name: "Space Mountain".to_string(),
            kind: AttractionType::Thrill,
            height_requirement: Some("44in".to_string()),
            description: None,
            lightning_lane: Some(LightningLaneKind::GeniePlus),
            lightning_lane_price_cents: None,
            average_wait_minutes: 45,
            tips: Vec::new(),
        });
        store.attractions.push(Attraction {
            id: AttractionId::new(),
            park_id: hollywood,
            name: "Rise of the Resistance".to_string(),
            kind: AttractionType::Thrill,
            height_requirement: Some("40in".to_string()),
            description: None,
            lightning_lane: Some(LightningLaneKind::Individual),
            lightning_lane_price_cents: Some(2_500),
            average_wait_minutes: 120,
            tips: vec!["Book the return window at 7:00 AM".to_string()],
        });

        let hotel_tiers = [
            ("Pop Century Resort", HotelTier::Value, 0, false),
            ("Polynesian Village Resort", HotelTier::Deluxe, 0, true),
        ];
        for (name, tier, parking, early) in hotel_tiers {
            store.hotels.push(Hotel {
                id: HotelId::new(),
                name: name.to_string(),
                tier,
                check_in_time: TimeOfDay::from_hm(15, 0).unwrap_or_default(),
                check_out_time: TimeOfDay::from_hm(11, 0).unwrap_or_default(),
                parking_cost_cents: parking,
                early_magic_hours: early,
                rating: None,
            });
        }
        let value_hotel = store.hotels[0].id;
        let deluxe_hotel = store.hotels[1].id;
        store.room_types.push(RoomType {
            id: RoomTypeId::new(),
            hotel_id: value_hotel,
            name: "Standard Room".to_string(),
            max_occupancy: 4,
            price_per_night_cents: 18_500,
        });
        store.room_types.push(RoomType {
            id: RoomTypeId::new(),
            hotel_id: deluxe_hotel,
            name: "Theme Park View".to_string(),
            max_occupancy: 5,
            price_per_night_cents: 72_000,
        });

        store.restaurants.push(Restaurant {
            id: RestaurantId::new(),
            name: "Be Our Guest Restaurant".to_string(),
            venue: RestaurantVenue::Park(magic_kingdom),
            kind: RestaurantType::TableService,
            cuisine: Some("French".to_string()),
            price_range: Some("$$$".to_string()),
            rating: Some(4.3),
        });
        store.restaurants.push(Restaurant {
            id: RestaurantId::new(),
            name: "'Ohana".to_string(),
            venue: RestaurantVenue::Hotel(deluxe_hotel),
            kind: RestaurantType::CharacterDining,
            cuisine: Some("Polynesian".to_string()),
            price_range: Some("$$$".to_string()),
            rating: Some(4.5),
        });
    }

    fn trip_not_found(trip_id: TripId, operation: &str) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Trip {} not found", trip_id),
            ErrorContext::new(operation)
                .with_entity("trip")
                .with_entity_id(trip_id),
        )
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TripRepository for LocalRepository {
    async fn create_trip(
        &self,
        new_trip: NewTrip,
        members: Vec<NewPartyMember>,
    ) -> RepositoryResult<Trip> {
        let mut store = self.store.write();
        let trip_id = TripId::new();
        let trip = Trip {
            id: trip_id,
            user_id: new_trip.user_id,
            name: new_trip.name,
            start_date: new_trip.start_date,
            end_date: new_trip.end_date,
            party_size: members.len() as u32,
            status: TripStatus::Planning,
            current_step: NavigationStep::Overview,
            created_at: Utc::now(),
        };
        let members: Vec<PartyMember> = members
            .into_iter()
            .enumerate()
            .map(|(i, m)| PartyMember {
                id: PartyMemberId::new(),
                trip_id,
                name: m.name,
                age: m.age,
                ticket_type: m.ticket_type,
                dietary_restriction: m.dietary_restriction,
                das_eligible: m.das_eligible,
                sort_order: i as u32,
            })
            .collect();
        store.trips.insert(trip_id, trip.clone());
        store.members.insert(trip_id, members);
        store.hotel_reservations.insert(trip_id, Vec::new());
        store.dining_reservations.insert(trip_id, Vec::new());
        store.lightning_lane_reservations.insert(trip_id, Vec::new());
        store.events.insert(trip_id, Vec::new());
        Ok(trip)
    }

    async fn get_trip(&self, trip_id: TripId) -> RepositoryResult<TripBundle> {
        let store = self.store.read();
        let trip = store
            .trips
            .get(&trip_id)
            .cloned()
            .ok_or_else(|| Self::trip_not_found(trip_id, "get_trip"))?;

        let members = store.members.get(&trip_id).cloned().unwrap_or_default();

        let mut hotels = store
            .hotel_reservations
            .get(&trip_id)
            .cloned()
            .unwrap_or_default();
        hotels.sort_by_key(|r| r.check_in);

        let mut dining = store
            .dining_reservations
            .get(&trip_id)
            .cloned()
            .unwrap_or_default();
        dining.sort_by_key(|r| r.date);

        let mut lightning = store
            .lightning_lane_reservations
            .get(&trip_id)
            .cloned()
            .unwrap_or_default();
        lightning.sort_by_key(|r| r.date);

        let mut events = store.events.get(&trip_id).cloned().unwrap_or_default();
        events.sort_by_key(|e| (e.date, e.sort_key()));

        Ok(TripBundle {
            trip,
            members,
            hotel_reservations: hotels,
            dining_reservations: dining,
            lightning_lane_reservations: lightning,
            events,
        })
    }

    async fn get_trip_record(&self, trip_id: TripId) -> RepositoryResult<Trip> {
        self.store
            .read()
            .trips
            .get(&trip_id)
            .cloned()
            .ok_or_else(|| Self::trip_not_found(trip_id, "get_trip_record"))
    }

    async fn list_trips_for_user(&self, user_id: &UserId) -> RepositoryResult<Vec<Trip>> {
        let store = self.store.read();
        let mut trips: Vec<Trip> = store
            .trips
            .values()
            .filter(|t| &t.user_id == user_id)
            .cloned()
            .collect();
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(trips)
    }

    async fn update_trip(
        &self,
        trip_id: TripId,
        name: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepositoryResult<Trip> {
        let mut store = self.store.write();
        let trip = store
            .trips
            .get_mut(&trip_id)
            .ok_or_else(|| Self::trip_not_found(trip_id, "update_trip"))?;
        trip.name = name;
        trip.start_date = start_date;
        trip.end_date = end_date;
        Ok(trip.clone())
    }

    async fn set_current_step(
        &self,
        trip_id: TripId,
        step: NavigationStep,
    ) -> RepositoryResult<Trip> {
        let mut store = self.store.write();
        let trip = store
            .trips
            .get_mut(&trip_id)
            .ok_or_else(|| Self::trip_not_found(trip_id, "set_current_step"))?;
        trip.current_step = step;
        Ok(trip.clone())
    }

    async fn set_trip_status(
        &self,
        trip_id: TripId,
        status: TripStatus,
    ) -> RepositoryResult<Trip> {
        let mut store = self.store.write();
        let trip = store
            .trips
            .get_mut(&trip_id)
            .ok_or_else(|| Self::trip_not_found(trip_id, "set_trip_status"))?;
        trip.status = status;
        Ok(trip.clone())
    }

    async fn delete_trip(&self, trip_id: TripId) -> RepositoryResult<()> {
        let mut store = self.store.write();
        store.trips.remove(&trip_id);
        store.members.remove(&trip_id);
        store.hotel_reservations.remove(&trip_id);
        store.dining_reservations.remove(&trip_id);
        store.lightning_lane_reservations.remove(&trip_id);
        store.events.remove(&trip_id);
        Ok(())
    }

    async fn health_check(&self) -> RepositoryResult<()> {
        // Taking the lock proves the store is reachable and not poisoned.
        let _ = self.store.read().trips.len();
        Ok(())
    }
}

#[async_trait]
impl PartyRepository for LocalRepository {
    async fn insert_member(
        &self,
        trip_id: TripId,
        member: NewPartyMember,
    ) -> RepositoryResult<(PartyMember, Trip)> {
        let mut store = self.store.write();
        if !store.trips.contains_key(&trip_id) {
            return Err(Self::trip_not_found(trip_id, "insert_member"));
        }
        let members = store.members.entry(trip_id).or_default();
        let sort_order = members.len() as u32;
        let stored = PartyMember {
            id: PartyMemberId::new(),
            trip_id,
            name: member.name,
            age: member.age,
            ticket_type: member.ticket_type,
            dietary_restriction: member.dietary_restriction,
            das_eligible: member.das_eligible,
            sort_order,
        };
        members.push(stored.clone());
        let size = members.len() as u32;
        let trip = store
            .trips
            .get_mut(&trip_id)
            .ok_or_else(|| Self::trip_not_found(trip_id, "insert_member"))?;
        trip.party_size = size;
        Ok((stored, trip.clone()))
    }

    async fn update_member(
        &self,
        member_id: PartyMemberId,
        patch: MemberPatch,
    ) -> RepositoryResult<PartyMember> {
        let mut store = self.store.write();
        for members in store.members.values_mut() {
            if let Some(member) = members.iter_mut().find(|m| m.id == member_id) {
                if let Some(name) = patch.name {
                    member.name = name;
                }
                if let Some(age) = patch.age {
                    member.age = age;
                }
                if let Some(ticket_type) = patch.ticket_type {
                    member.ticket_type = ticket_type;
                }
                if let Some(dietary) = patch.dietary_restriction {
                    member.dietary_restriction = dietary;
                }
                if let Some(das) = patch.das_eligible {
                    member.das_eligible = das;
                }
                return Ok(member.clone());
            }
        }
        Err(RepositoryError::not_found_with_context(
            format!("Party member {} not found", member_id),
            ErrorContext::new("update_member")
                .with_entity("party_member")
                .with_entity_id(member_id),
        ))
    }

    async fn remove_member(&self, member_id: PartyMemberId) -> RepositoryResult<Trip> {
        let mut store = self.store.write();
        let mut owning_trip = None;
        for (trip_id, members) in store.members.iter() {
            if members.iter().any(|m| m.id == member_id) {
                owning_trip = Some((*trip_id, members.len()));
                break;
            }
        }
        let (trip_id, count) = owning_trip.ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Party member {} not found", member_id),
                ErrorContext::new("remove_member")
                    .with_entity("party_member")
                    .with_entity_id(member_id),
            )
        })?;
        if count <= 1 {
            return Err(RepositoryError::conflict_with_context(
                "Cannot remove the last member of a party",
                ErrorContext::new("remove_member")
                    .with_entity("party_member")
                    .with_entity_id(member_id),
            ));
        }
        let members = store.members.entry(trip_id).or_default();
        members.retain(|m| m.id != member_id);
        let size = members.len() as u32;
        let trip = store
            .trips
            .get_mut(&trip_id)
            .ok_or_else(|| Self::trip_not_found(trip_id, "remove_member"))?;
        trip.party_size = size;
        Ok(trip.clone())
    }

    async fn list_members(&self, trip_id: TripId) -> RepositoryResult<Vec<PartyMember>> {
        let store = self.store.read();
        if !store.trips.contains_key(&trip_id) {
            return Err(Self::trip_not_found(trip_id, "list_members"));
        }
        Ok(store.members.get(&trip_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl ReservationRepository for LocalRepository {
    async fn insert_hotel_reservation(
        &self,
        reservation: HotelReservation,
    ) -> RepositoryResult<HotelReservation> {
        let mut store = self.store.write();
        if !store.trips.contains_key(&reservation.trip_id) {
            return Err(Self::trip_not_found(
                reservation.trip_id,
                "insert_hotel_reservation",
            ));
        }
        store
            .hotel_reservations
            .entry(reservation.trip_id)
            .or_default()
            .push(reservation.clone());
        Ok(reservation)
    }

    async fn insert_dining_reservation(
        &self,
        reservation: DiningReservation,
    ) -> RepositoryResult<DiningReservation> {
        let mut store = self.store.write();
        if !store.trips.contains_key(&reservation.trip_id) {
            return Err(Self::trip_not_found(
                reservation.trip_id,
                "insert_dining_reservation",
            ));
        }
        store
            .dining_reservations
            .entry(reservation.trip_id)
            .or_default()
            .push(reservation.clone());
        Ok(reservation)
    }

    async fn insert_lightning_lane_reservation(
        &self,
        reservation: LightningLaneReservation,
    ) -> RepositoryResult<LightningLaneReservation> {
        let mut store = self.store.write();
        if !store.trips.contains_key(&reservation.trip_id) {
            return Err(Self::trip_not_found(
                reservation.trip_id,
                "insert_lightning_lane_reservation",
            ));
        }
        store
            .lightning_lane_reservations
            .entry(reservation.trip_id)
            .or_default()
            .push(reservation.clone());
        Ok(reservation)
    }

    async fn get_hotel_reservation(
        &self,
        id: HotelReservationId,
    ) -> RepositoryResult<HotelReservation> {
        let store = self.store.read();
        store
            .hotel_reservations
            .values()
            .flatten()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Hotel reservation {} not found", id),
                    ErrorContext::new("get_hotel_reservation")
                        .with_entity("hotel_reservation")
                        .with_entity_id(id),
                )
            })
    }

    async fn get_dining_reservation(
        &self,
        id: DiningReservationId,
    ) -> RepositoryResult<DiningReservation> {
        let store = self.store.read();
        store
            .dining_reservations
            .values()
            .flatten()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Dining reservation {} not found", id),
                    ErrorContext::new("get_dining_reservation")
                        .with_entity("dining_reservation")
                        .with_entity_id(id),
                )
            })
    }

    async fn get_lightning_lane_reservation(
        &self,
        id: LightningLaneReservationId,
    ) -> RepositoryResult<LightningLaneReservation> {
        let store = self.store.read();
        store
            .lightning_lane_reservations
            .values()
            .flatten()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Lightning lane reservation {} not found", id),
                    ErrorContext::new("get_lightning_lane_reservation")
                        .with_entity("lightning_lane_reservation")
                        .with_entity_id(id),
                )
            })
    }

    async fn list_hotel_reservations(
        &self,
        trip_id: TripId,
    ) -> RepositoryResult<Vec<HotelReservation>> {
        let store = self.store.read();
        if !store.trips.contains_key(&trip_id) {
            return Err(Self::trip_not_found(trip_id, "list_hotel_reservations"));
        }
        let mut list = store
            .hotel_reservations
            .get(&trip_id)
            .cloned()
            .unwrap_or_default();
        list.sort_by_key(|r| r.check_in);
        Ok(list)
    }

    async fn list_dining_reservations(
        &self,
        trip_id: TripId,
    ) -> RepositoryResult<Vec<DiningReservation>> {
        let store = self.store.read();
        if !store.trips.contains_key(&trip_id) {
            return Err(Self::trip_not_found(trip_id, "list_dining_reservations"));
        }
        let mut list = store
            .dining_reservations
            .get(&trip_id)
            .cloned()
            .unwrap_or_default();
        list.sort_by_key(|r| r.date);
        Ok(list)
    }

    async fn list_lightning_lane_reservations(
        &self,
        trip_id: TripId,
    ) -> RepositoryResult<Vec<LightningLaneReservation>> {
        let store = self.store.read();
        if !store.trips.contains_key(&trip_id) {
            return Err(Self::trip_not_found(
                trip_id,
                "list_lightning_lane_reservations",
            ));
        }
        let mut list = store
            .lightning_lane_reservations
            .get(&trip_id)
            .cloned()
            .unwrap_or_default();
        list.sort_by_key(|r| r.date);
        Ok(list)
    }

    async fn set_reservation_status(
        &self,
        reservation: ReservationRef,
        status: ReservationStatus,
    ) -> RepositoryResult<()> {
        let mut store = self.store.write();
        let found = match reservation {
            ReservationRef::Hotel(id) => store
                .hotel_reservations
                .values_mut()
                .flatten()
                .find(|r| r.id == id)
                .map(|r| r.status = status)
                .is_some(),
            ReservationRef::Dining(id) => store
                .dining_reservations
                .values_mut()
                .flatten()
                .find(|r| r.id == id)
                .map(|r| r.status = status)
                .is_some(),
            ReservationRef::LightningLane(id) => store
                .lightning_lane_reservations
                .values_mut()
                .flatten()
                .find(|r| r.id == id)
                .map(|r| r.status = status)
                .is_some(),
        };
        if found {
            Ok(())
        } else {
            Err(RepositoryError::not_found_with_context(
                "Reservation not found",
                ErrorContext::new("set_reservation_status").with_entity("reservation"),
            ))
        }
    }
}

#[async_trait]
impl ItineraryRepository for LocalRepository {
    async fn insert_event(
        &self,
        trip_id: TripId,
        event: NewDailyEvent,
    ) -> RepositoryResult<DailyEvent> {
        let mut store = self.store.write();
        if !store.trips.contains_key(&trip_id) {
            return Err(Self::trip_not_found(trip_id, "insert_event"));
        }
        let events = store.events.entry(trip_id).or_default();
        let sort_order = events.len() as u32;
        let stored = DailyEvent {
            id: DailyEventId::new(),
            trip_id,
            date: event.date,
            time: event.time,
            title: event.title,
            category: event.category,
            location: event.location,
            description: event.description,
            party_size: event.party_size,
            confirmation_number: event.confirmation_number,
            notes: event.notes,
            sort_order,
        };
        events.push(stored.clone());
        Ok(stored)
    }

    async fn get_event(&self, event_id: DailyEventId) -> RepositoryResult<DailyEvent> {
        let store = self.store.read();
        for events in store.events.values() {
            if let Some(event) = events.iter().find(|e| e.id == event_id) {
                return Ok(event.clone());
            }
        }
        Err(RepositoryError::not_found_with_context(
            format!("Event {} not found", event_id),
            ErrorContext::new("get_event")
                .with_entity("daily_event")
                .with_entity_id(event_id),
        ))
    }

    async fn update_event(
        &self,
        event_id: DailyEventId,
        patch: EventPatch,
    ) -> RepositoryResult<DailyEvent> {
        let mut store = self.store.write();
        for events in store.events.values_mut() {
            if let Some(event) = events.iter_mut().find(|e| e.id == event_id) {
                if let Some(date) = patch.date {
                    event.date = date;
                }
                if let Some(time) = patch.time {
                    event.time = time;
                }
                if let Some(title) = patch.title {
                    event.title = title;
                }
                if let Some(category) = patch.category {
                    event.category = category;
                }
                if let Some(location) = patch.location {
                    event.location = Some(location);
                }
                if let Some(description) = patch.description {
                    event.description = Some(description);
                }
                if let Some(party_size) = patch.party_size {
                    event.party_size = Some(party_size);
                }
                if let Some(confirmation) = patch.confirmation_number {
                    event.confirmation_number = Some(confirmation);
                }
                if let Some(notes) = patch.notes {
                    event.notes = Some(notes);
                }
                return Ok(event.clone());
            }
        }
        Err(RepositoryError::not_found_with_context(
            format!("Event {} not found", event_id),
            ErrorContext::new("update_event")
                .with_entity("daily_event")
                .with_entity_id(event_id),
        ))
    }

    async fn remove_event(&self, event_id: DailyEventId) -> RepositoryResult<()> {
        let mut store = self.store.write();
        for events in store.events.values_mut() {
            let before = events.len();
            events.retain(|e| e.id != event_id);
            if events.len() < before {
                return Ok(());
            }
        }
        Err(RepositoryError::not_found_with_context(
            format!("Event {} not found", event_id),
            ErrorContext::new("remove_event")
                .with_entity("daily_event")
                .with_entity_id(event_id),
        ))
    }

    async fn list_events(&self, trip_id: TripId) -> RepositoryResult<Vec<DailyEvent>> {
        let store = self.store.read();
        if !store.trips.contains_key(&trip_id) {
            return Err(Self::trip_not_found(trip_id, "list_events"));
        }
        let mut events = store.events.get(&trip_id).cloned().unwrap_or_default();
        events.sort_by_key(|e| (e.date, e.sort_key()));
        Ok(events)
    }

    async fn events_for_date(
        &self,
        trip_id: TripId,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<DailyEvent>> {
        let store = self.store.read();
        if !store.trips.contains_key(&trip_id) {
            return Err(Self::trip_not_found(trip_id, "events_for_date"));
        }
        let mut events: Vec<DailyEvent> = store
            .events
            .get(&trip_id)
            .map(|all| all.iter().filter(|e| e.date == date).cloned().collect())
            .unwrap_or_default();
        events.sort_by_key(|e| e.sort_key());
        Ok(events)
    }
}

#[async_trait]
impl CatalogRepository for LocalRepository {
    async fn list_parks(&self) -> RepositoryResult<Vec<Park>> {
        Ok(self.store.read().parks.clone())
    }

    async fn get_park(&self, park_id: ParkId) -> RepositoryResult<Park> {
        self.store
            .read()
            .parks
            .iter()
            .find(|p| p.id == park_id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Park {} not found", park_id),
                    ErrorContext::new("get_park")
                        .with_entity("park")
                        .with_entity_id(park_id),
                )
            })
    }

    async fn list_attractions(&self, park_id: ParkId) -> RepositoryResult<Vec<Attraction>> {
        Ok(self
            .store
            .read()
            .attractions
            .iter()
            .filter(|a| a.park_id == park_id)
            .cloned()
            .collect())
    }

    async fn get_attraction(&self, attraction_id: AttractionId) -> RepositoryResult<Attraction> {
        self.store
            .read()
            .attractions
            .iter()
            .find(|a| a.id == attraction_id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Attraction {} not found", attraction_id),
                    ErrorContext::new("get_attraction")
                        .with_entity("attraction")
                        .with_entity_id(attraction_id),
                )
            })
    }

    async fn list_restaurants(&self) -> RepositoryResult<Vec<Restaurant>> {
        Ok(self.store.read().restaurants.clone())
    }

    async fn get_restaurant(&self, restaurant_id: RestaurantId) -> RepositoryResult<Restaurant> {
        self.store
            .read()
            .restaurants
            .iter()
            .find(|r| r.id == restaurant_id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Restaurant {} not found", restaurant_id),
                    ErrorContext::new("get_restaurant")
                        .with_entity("restaurant")
                        .with_entity_id(restaurant_id),
                )
            })
    }

    async fn list_hotels(&self) -> RepositoryResult<Vec<Hotel>> {
        Ok(self.store.read().hotels.clone())
    }

    async fn get_hotel(&self, hotel_id: HotelId) -> RepositoryResult<Hotel> {
        self.store
            .read()
            .hotels
            .iter()
            .find(|h| h.id == hotel_id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Hotel {} not found", hotel_id),
                    ErrorContext::new("get_hotel")
                        .with_entity("hotel")
                        .with_entity_id(hotel_id),
                )
            })
    }

    async fn list_room_types(&self, hotel_id: HotelId) -> RepositoryResult<Vec<RoomType>> {
        Ok(self
            .store
            .read()
            .room_types
            .iter()
            .filter(|r| r.hotel_id == hotel_id)
            .cloned()
            .collect())
    }

    async fn get_room_type(&self, room_type_id: RoomTypeId) -> RepositoryResult<RoomType> {
        self.store
            .read()
            .room_types
            .iter()
            .find(|r| r.id == room_type_id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Room type {} not found", room_type_id),
                    ErrorContext::new("get_room_type")
                        .with_entity("room_type")
                        .with_entity_id(room_type_id),
                )
            })
    }
}
