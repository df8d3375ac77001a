//! Party member registry: the travelers on a trip.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::api::{PartyMemberId, TripId};

/// Park admission ticket type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketType {
    Base,
    ParkHopper,
    ParkHopperPlus,
    AnnualPass,
    FloridaResident,
    Military,
}

impl FromStr for TicketType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "base" | "base_ticket" => Ok(Self::Base),
            "park_hopper" => Ok(Self::ParkHopper),
            "park_hopper_plus" => Ok(Self::ParkHopperPlus),
            "annual_pass" => Ok(Self::AnnualPass),
            "florida_resident" => Ok(Self::FloridaResident),
            "military" => Ok(Self::Military),
            _ => Err(format!("Unknown ticket type: {}", s)),
        }
    }
}

/// Dietary restriction tag used when filtering dining options.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryRestriction {
    None,
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    NutAllergy,
    ShellfishAllergy,
    Other,
}

impl Default for DietaryRestriction {
    fn default() -> Self {
        Self::None
    }
}

/// An individual traveler associated with a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyMember {
    pub id: PartyMemberId,
    pub trip_id: TripId,
    pub name: String,
    pub age: i32,
    pub ticket_type: TicketType,
    pub dietary_restriction: DietaryRestriction,
    /// Disability Access Service eligibility.
    pub das_eligible: bool,
    /// Stable display position within the party.
    pub sort_order: u32,
}

impl PartyMember {
    /// Validate the required member fields.
    pub fn validate(name: &str, age: i32) -> Result<(), String> {
        if name.trim().is_empty() {
            return Err("Party member name must not be empty".to_string());
        }
        Self::validate_age(age)
    }

    pub fn validate_age(age: i32) -> Result<(), String> {
        if !(0..=120).contains(&age) {
            return Err(format!("Party member age {} is out of range (0-120)", age));
        }
        Ok(())
    }
}

/// Input for adding a traveler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPartyMember {
    pub name: String,
    pub age: i32,
    #[serde(default = "default_ticket_type")]
    pub ticket_type: TicketType,
    #[serde(default)]
    pub dietary_restriction: DietaryRestriction,
    #[serde(default)]
    pub das_eligible: bool,
}

fn default_ticket_type() -> TicketType {
    TicketType::Base
}

/// Field-level patch for editing a traveler. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub ticket_type: Option<TicketType>,
    #[serde(default)]
    pub dietary_restriction: Option<DietaryRestriction>,
    #[serde(default)]
    pub das_eligible: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        assert!(PartyMember::validate("Maya", 8).is_ok());
        assert!(PartyMember::validate("Grandpa", 120).is_ok());
        assert!(PartyMember::validate("Newborn", 0).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        assert!(PartyMember::validate("", 30).is_err());
        assert!(PartyMember::validate("   ", 30).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_age() {
        assert!(PartyMember::validate("Vampire", 121).is_err());
        assert!(PartyMember::validate("Unborn", -1).is_err());
    }

    #[test]
    fn test_ticket_type_parse() {
        assert_eq!(
            "park_hopper_plus".parse::<TicketType>().unwrap(),
            TicketType::ParkHopperPlus
        );
        assert_eq!("base_ticket".parse::<TicketType>().unwrap(), TicketType::Base);
        assert!("premier".parse::<TicketType>().is_err());
    }

    #[test]
    fn test_new_member_defaults() {
        let json = r#"{"name": "Eli", "age": 10}"#;
        let member: NewPartyMember = serde_json::from_str(json).unwrap();
        assert_eq!(member.ticket_type, TicketType::Base);
        assert_eq!(member.dietary_restriction, DietaryRestriction::None);
        assert!(!member.das_eligible);
    }
}
