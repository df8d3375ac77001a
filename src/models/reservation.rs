//! Reservation ledger types: hotel stays, dining slots, and lightning lane
//! return windows, plus the status state machine they all share.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    AttractionId, DiningReservationId, HotelId, HotelReservationId, LightningLaneReservationId,
    RestaurantId, RoomTypeId, TripId,
};
use crate::models::time::TimeOfDay;

/// Shared reservation lifecycle.
///
/// Legal transitions: `Pending -> Confirmed -> Used`,
/// `Pending | Confirmed -> Cancelled`, `Confirmed -> Expired`.
/// `Used`, `Cancelled`, and `Expired` are terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Expired,
    Used,
}

impl ReservationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Used | Self::Cancelled | Self::Expired)
    }

    /// Whether the reservation still counts toward plans and costs.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::Used)
    }

    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Used)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::Expired)
        )
    }

    /// Apply a transition, reporting the violated edge on failure.
    pub fn transition(self, next: ReservationStatus) -> Result<ReservationStatus, String> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(format!(
                "Illegal reservation status transition {:?} -> {:?}",
                self, next
            ))
        }
    }
}

impl Default for ReservationStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
            Self::Used => "used",
        };
        write!(f, "{}", s)
    }
}

/// Line-skipping mechanism: Genie+ is a flat daily multi-attraction pass,
/// Individual is paid per attraction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightningLaneKind {
    GeniePlus,
    Individual,
}

/// Reference to any reservation variant on a trip, for operations that share
/// the status state machine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationRef {
    Hotel(HotelReservationId),
    Dining(DiningReservationId),
    LightningLane(LightningLaneReservationId),
}

/// Generate a fresh confirmation code. Uniqueness comes from the underlying
/// uuid; callers may supply their own code instead.
pub fn generate_confirmation_code() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    uuid[..12].to_ascii_uppercase()
}

/// A booked hotel stay. `nights` and the total are derived from the dates
/// and nightly rate on every read, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelReservation {
    pub id: HotelReservationId,
    pub trip_id: TripId,
    pub hotel_id: HotelId,
    pub room_type_id: RoomTypeId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub price_per_night_cents: i64,
    pub status: ReservationStatus,
    pub confirmation_code: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl HotelReservation {
    /// Night count: check-out minus check-in in days.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Total stay cost in cents, recomputed from the current dates and rate.
    pub fn total_cents(&self) -> i64 {
        self.nights() * self.price_per_night_cents
    }
}

/// Input for booking a hotel stay. The nightly rate defaults to the room
/// type's catalog price when not supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHotelReservation {
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

/// A table reservation at a restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningReservation {
    pub id: DiningReservationId,
    pub trip_id: TripId,
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

/// Input for booking a dining slot. Party size defaults to the trip's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDiningReservation {
    pub restaurant_id: RestaurantId,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    #[serde(default)]
    pub party_size: Option<u32>,
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default)]
    pub confirmation_code: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A lightning lane return window for one attraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightningLaneReservation {
    pub id: LightningLaneReservationId,
    pub trip_id: TripId,
    pub attraction_id: AttractionId,
    pub date: NaiveDate,
    pub return_start: TimeOfDay,
    pub return_end: TimeOfDay,
    pub party_size: u32,
    pub kind: LightningLaneKind,
    /// Per-person cost; present exactly when `kind` is `Individual`.
    pub cost_per_person_cents: Option<i64>,
    pub status: ReservationStatus,
    pub confirmation_code: String,
    pub booked_at: DateTime<Utc>,
}

impl LightningLaneReservation {
    /// Total cost for Individual reservations; Genie+ has no per-attraction
    /// cost (its flat daily fee is a separate summary line item).
    pub fn total_cents(&self) -> Option<i64> {
        match self.kind {
            LightningLaneKind::Individual => self
                .cost_per_person_cents
                .map(|cpp| cpp * i64::from(self.party_size)),
            LightningLaneKind::GeniePlus => None,
        }
    }
}

/// Input for booking a lightning lane return window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLightningLaneReservation {
    pub attraction_id: AttractionId,
    pub date: NaiveDate,
    pub return_start: TimeOfDay,
    pub return_end: TimeOfDay,
    #[serde(default)]
    pub party_size: Option<u32>,
    pub kind: LightningLaneKind,
    #[serde(default)]
    pub cost_per_person_cents: Option<i64>,
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default)]
    pub confirmation_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        use ReservationStatus::*;
        assert_eq!(Pending.transition(Confirmed).unwrap(), Confirmed);
        assert_eq!(Confirmed.transition(Used).unwrap(), Used);
        assert_eq!(Pending.transition(Cancelled).unwrap(), Cancelled);
        assert_eq!(Confirmed.transition(Cancelled).unwrap(), Cancelled);
        assert_eq!(Confirmed.transition(Expired).unwrap(), Expired);
    }

    #[test]
    fn test_illegal_transitions() {
        use ReservationStatus::*;
        assert!(Pending.transition(Used).is_err());
        assert!(Pending.transition(Expired).is_err());
        assert!(Cancelled.transition(Confirmed).is_err());
        assert!(Used.transition(Cancelled).is_err());
        assert!(Expired.transition(Confirmed).is_err());
        assert!(Cancelled.transition(Cancelled).is_err());
    }

    #[test]
    fn test_terminal_states() {
        use ReservationStatus::*;
        assert!(Used.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(Expired.is_terminal());
        assert!(!Pending.is_terminal());
        assert!(!Confirmed.is_terminal());
    }

    #[test]
    fn test_hotel_total_recomputes_from_dates() {
        let mut reservation = HotelReservation {
            id: HotelReservationId::new(),
            trip_id: TripId::new(),
            hotel_id: HotelId::new(),
            room_type_id: RoomTypeId::new(),
            check_in: NaiveDate::from_ymd_opt(2025, 7, 16).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 7, 30).unwrap(),
            guests: 4,
            price_per_night_cents: 32_000,
            status: ReservationStatus::Confirmed,
            confirmation_code: "ABCD1234".to_string(),
            notes: None,
            created_at: Utc::now(),
        };
        assert_eq!(reservation.nights(), 14);
        assert_eq!(reservation.total_cents(), 448_000);

        reservation.check_out = NaiveDate::from_ymd_opt(2025, 7, 20).unwrap();
        assert_eq!(reservation.nights(), 4);
        assert_eq!(reservation.total_cents(), 128_000);
    }

    #[test]
    fn test_lightning_lane_totals() {
        let mut reservation = LightningLaneReservation {
            id: LightningLaneReservationId::new(),
            trip_id: TripId::new(),
            attraction_id: AttractionId::new(),
            date: NaiveDate::from_ymd_opt(2025, 7, 18).unwrap(),
            return_start: "11:30 AM".parse().unwrap(),
            return_end: "12:30 PM".parse().unwrap(),
            party_size: 4,
            kind: LightningLaneKind::Individual,
            cost_per_person_cents: Some(1_500),
            status: ReservationStatus::Pending,
            confirmation_code: "LL0001".to_string(),
            booked_at: Utc::now(),
        };
        assert_eq!(reservation.total_cents(), Some(6_000));

        reservation.kind = LightningLaneKind::GeniePlus;
        assert_eq!(reservation.total_cents(), None);
    }

    #[test]
    fn test_confirmation_codes_unique() {
        let a = generate_confirmation_code();
        let b = generate_confirmation_code();
        assert_eq!(a.len(), 12);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }
}
