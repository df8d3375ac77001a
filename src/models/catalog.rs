//! Reference catalog: externally supplied, read-only descriptive data about
//! parks, attractions, restaurants, and hotels. The planning core looks these
//! up by id and never writes them.

use serde::{Deserialize, Serialize};

use crate::api::{AttractionId, HotelId, ParkId, RestaurantId, RoomTypeId};
use crate::models::reservation::LightningLaneKind;
use crate::models::time::TimeOfDay;

/// Well-known park code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParkCode {
    MagicKingdom,
    Epcot,
    HollywoodStudios,
    AnimalKingdom,
}

/// A theme park.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Park {
    pub id: ParkId,
    pub code: ParkCode,
    pub name: String,
    pub icon: String,
    pub description: Option<String>,
    pub opening_time: Option<TimeOfDay>,
    pub closing_time: Option<TimeOfDay>,
    pub early_entry_time: Option<TimeOfDay>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttractionType {
    Thrill,
    Family,
    Show,
    Character,
}

/// A ride, show, or character meet inside a park.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attraction {
    pub id: AttractionId,
    pub park_id: ParkId,
    pub name: String,
    pub kind: AttractionType,
    pub height_requirement: Option<String>,
    pub description: Option<String>,
    /// Lightning lane mechanism offered, if any.
    pub lightning_lane: Option<LightningLaneKind>,
    /// Per-person price in cents when `lightning_lane` is `Individual`.
    pub lightning_lane_price_cents: Option<i64>,
    pub average_wait_minutes: u32,
    pub tips: Vec<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestaurantType {
    TableService,
    QuickService,
    CharacterDining,
    Lounge,
}

/// Where a restaurant lives: inside a park or inside a hotel, exactly one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestaurantVenue {
    Park(ParkId),
    Hotel(HotelId),
}

/// A dining location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub venue: RestaurantVenue,
    pub kind: RestaurantType,
    pub cuisine: Option<String>,
    pub price_range: Option<String>,
    pub rating: Option<f32>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotelTier {
    Value,
    Moderate,
    Deluxe,
    DeluxeVilla,
    Other,
}

/// A resort hotel. Room inventory hangs off `RoomType` records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    pub tier: HotelTier,
    pub check_in_time: TimeOfDay,
    pub check_out_time: TimeOfDay,
    pub parking_cost_cents: i64,
    pub early_magic_hours: bool,
    pub rating: Option<f32>,
}

/// A bookable room category within a hotel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomType {
    pub id: RoomTypeId,
    pub hotel_id: HotelId,
    pub name: String,
    pub max_occupancy: u32,
    pub price_per_night_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restaurant_venue_is_exclusive() {
        let park_venue = RestaurantVenue::Park(ParkId::new());
        let hotel_venue = RestaurantVenue::Hotel(HotelId::new());
        // The sum type makes "both" and "neither" unrepresentable; this just
        // pins the serialized shape.
        let json = serde_json::to_string(&park_venue).unwrap();
        assert!(json.starts_with("{\"park\":"));
        let json = serde_json::to_string(&hotel_venue).unwrap();
        assert!(json.starts_with("{\"hotel\":"));
    }

    #[test]
    fn test_park_code_serde() {
        let json = serde_json::to_string(&ParkCode::MagicKingdom).unwrap();
        assert_eq!(json, "\"magic_kingdom\"");
    }
}
