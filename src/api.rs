//! Public API surface for the planning core.
//!
//! This file consolidates the identifier newtypes and re-exports the domain
//! types used by the repository layer and the HTTP API. All types derive
//! Serialize/Deserialize for JSON serialization.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Define a uuid-backed identifier newtype with the standard accessors.
macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn new() -> Self {
                $name(Uuid::new_v4())
            }

            pub fn from_uuid(value: Uuid) -> Self {
                $name(value)
            }

            pub fn value(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok($name(Uuid::parse_str(s)?))
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// Trip identifier (root aggregate key).
    TripId
);
entity_id!(
    /// Party member identifier.
    PartyMemberId
);
entity_id!(
    /// Hotel reservation identifier.
    HotelReservationId
);
entity_id!(
    /// Dining reservation identifier.
    DiningReservationId
);
entity_id!(
    /// Lightning lane reservation identifier.
    LightningLaneReservationId
);
entity_id!(
    /// Daily itinerary event identifier.
    DailyEventId
);
entity_id!(
    /// Park identifier (reference catalog).
    ParkId
);
entity_id!(
    /// Attraction identifier (reference catalog).
    AttractionId
);
entity_id!(
    /// Restaurant identifier (reference catalog).
    RestaurantId
);
entity_id!(
    /// Hotel identifier (reference catalog).
    HotelId
);
entity_id!(
    /// Room type identifier (reference catalog).
    RoomTypeId
);

/// Owner of one or more trips. Opaque to the planning core; the hosting
/// auth layer supplies it at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        UserId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub use crate::models::catalog::{
    Attraction, AttractionType, Hotel, HotelTier, Park, ParkCode, Restaurant, RestaurantType,
    RestaurantVenue, RoomType,
};
pub use crate::models::itinerary::{DailyEvent, EventCategory, EventPatch, NewDailyEvent};
pub use crate::models::party::{
    DietaryRestriction, MemberPatch, NewPartyMember, PartyMember, TicketType,
};
pub use crate::models::reservation::{
    DiningReservation, HotelReservation, LightningLaneKind, LightningLaneReservation,
    NewDiningReservation, NewHotelReservation, NewLightningLaneReservation, ReservationRef,
    ReservationStatus,
};
pub use crate::models::time::TimeOfDay;
pub use crate::models::trip::{NavigationStep, NewTrip, Trip, TripBundle, TripStatus};

#[cfg(test)]
mod tests {
    use super::{TripId, UserId};
    use std::collections::HashSet;

    #[test]
    fn test_trip_id_unique() {
        let a = TripId::new();
        let b = TripId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_trip_id_roundtrip() {
        let id = TripId::new();
        let parsed: TripId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_trip_id_hash() {
        let id = TripId::new();
        let mut set = HashSet::new();
        set.insert(id);
        set.insert(id);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_user_id_display() {
        let user = UserId::new("user-1");
        assert_eq!(user.to_string(), "user-1");
        assert_eq!(user.value(), "user-1");
    }
}
