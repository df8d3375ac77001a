//! Daily itinerary events: date-anchored plan entries that may or may not
//! reference a formal reservation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{DailyEventId, TripId};
use crate::models::time::TimeOfDay;

/// What kind of plan entry this is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Park,
    Dining,
    LightningLane,
    Show,
    Hotel,
    Travel,
    Break,
}

/// One entry on a day's plan, ordered within the date by time of day and
/// then by `sort_order` for stable placement of equal times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyEvent {
    pub id: DailyEventId,
    pub trip_id: TripId,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub title: String,
    pub category: EventCategory,
    pub location: Option<String>,
    pub description: Option<String>,
    pub party_size: Option<u32>,
    pub confirmation_number: Option<String>,
    pub notes: Option<String>,
    pub sort_order: u32,
}

impl DailyEvent {
    /// Ordering key within a date.
    pub fn sort_key(&self) -> (TimeOfDay, u32) {
        (self.time, self.sort_order)
    }

    pub fn validate(title: &str) -> Result<(), String> {
        if title.trim().is_empty() {
            return Err("Event title must not be empty".to_string());
        }
        Ok(())
    }
}

/// Input for adding a plan entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDailyEvent {
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub title: String,
    pub category: EventCategory,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub party_size: Option<u32>,
    #[serde(default)]
    pub confirmation_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Field-level patch for editing an event. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<TimeOfDay>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<EventCategory>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub party_size: Option<u32>,
    #[serde(default)]
    pub confirmation_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
