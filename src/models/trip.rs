//! Trip root aggregate: dates, lifecycle status, and navigation state.
//!
//! The trip owns every other planning entity. `party_size` is kept
//! denormalized for display but is recomputed by the storage layer on every
//! party mutation, so it always equals the member count.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::api::{TripId, UserId};
use crate::models::itinerary::DailyEvent;
use crate::models::party::PartyMember;
use crate::models::reservation::{
    DiningReservation, HotelReservation, LightningLaneReservation,
};

/// Trip lifecycle status.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Planning,
    Active,
    Completed,
    Cancelled,
}

impl FromStr for TripStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planning" => Ok(Self::Planning),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown trip status: {}", s)),
        }
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// Planner screen the user last had open, persisted so a session can resume
/// where it left off.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationStep {
    Overview,
    Party,
    Parks,
    Dining,
    Hotels,
    Lightning,
    Summary,
    Settings,
}

impl FromStr for NavigationStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overview" => Ok(Self::Overview),
            "party" => Ok(Self::Party),
            "parks" => Ok(Self::Parks),
            "dining" => Ok(Self::Dining),
            "hotels" => Ok(Self::Hotels),
            "lightning" => Ok(Self::Lightning),
            "summary" => Ok(Self::Summary),
            "settings" => Ok(Self::Settings),
            _ => Err(format!("Unknown navigation step: {}", s)),
        }
    }
}

impl std::fmt::Display for NavigationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Overview => "overview",
            Self::Party => "party",
            Self::Parks => "parks",
            Self::Dining => "dining",
            Self::Hotels => "hotels",
            Self::Lightning => "lightning",
            Self::Summary => "summary",
            Self::Settings => "settings",
        };
        write!(f, "{}", s)
    }
}

/// Root planning aggregate for one vacation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    pub user_id: UserId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Denormalized member count; always equals the stored party size.
    pub party_size: u32,
    pub status: TripStatus,
    pub current_step: NavigationStep,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    /// Validate a name/date-range combination for creation or update.
    pub fn validate(name: &str, start_date: NaiveDate, end_date: NaiveDate) -> Result<(), String> {
        if name.trim().is_empty() {
            return Err("Trip name must not be empty".to_string());
        }
        if start_date > end_date {
            return Err(format!(
                "Trip start date {} is after end date {}",
                start_date, end_date
            ));
        }
        Ok(())
    }

    /// Trip length in days (end minus start). A same-day trip has length 0.
    pub fn length_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Days until the trip starts, negative once it has started.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.start_date - today).num_days()
    }

    /// Whether a calendar date falls inside the trip window (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Input for creating a trip. Party members are supplied separately because
/// a trip is never created without at least one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTrip {
    pub user_id: UserId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A trip with all of its owned entities, as returned by
/// `TripRepository::get_trip`. Reservation lists are ordered by date then
/// creation order; events by date then time of day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripBundle {
    pub trip: Trip,
    pub members: Vec<PartyMember>,
    pub hotel_reservations: Vec<HotelReservation>,
    pub dining_reservations: Vec<DiningReservation>,
    pub lightning_lane_reservations: Vec<LightningLaneReservation>,
    pub events: Vec<DailyEvent>,
}
