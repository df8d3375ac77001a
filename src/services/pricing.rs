//! Cost estimation: pure functions over the trip aggregate.
//!
//! All money is integer cents. Estimates are recomputed from the live
//! aggregate on every call and never cached, so they cannot go stale
//! relative to the underlying reservations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::{LightningLaneKind, TicketType, TripBundle};

/// Base per-day ticket price for guests aged 10 and up, in cents.
pub const ADULT_TICKET_CENTS_PER_DAY: i64 = 10_900;
/// Base per-day ticket price for guests under 10, in cents.
pub const CHILD_TICKET_CENTS_PER_DAY: i64 = 10_400;
/// Park Hopper per-day surcharge, in cents.
pub const PARK_HOPPER_SURCHARGE_CENTS_PER_DAY: i64 = 6_500;
/// Park Hopper Plus per-day surcharge, in cents.
pub const PARK_HOPPER_PLUS_SURCHARGE_CENTS_PER_DAY: i64 = 8_000;
/// Annual pass flat price, independent of trip length, in cents.
pub const ANNUAL_PASS_CENTS: i64 = 139_900;
/// Florida resident discount, as a percentage of the base price.
pub const FLORIDA_RESIDENT_PERCENT: i64 = 85;
/// Military discount, as a percentage of the base price.
pub const MILITARY_PERCENT: i64 = 80;
/// Genie+ flat fee per person per day, in cents.
pub const GENIE_PLUS_CENTS_PER_PERSON_PER_DAY: i64 = 2_500;
/// Flat allowance for meals, souvenirs, and incidentals, in cents.
pub const MISCELLANEOUS_ALLOWANCE_CENTS: i64 = 200_000;

/// Estimated park ticket cost for one traveler, in cents.
///
/// Deterministic in (age, ticket type, days). The age bracket splits at 10;
/// hopper surcharges are flat per day; the annual pass ignores trip length;
/// resident and military discounts scale the base price.
pub fn estimate_ticket_cost_cents(age: i32, ticket_type: TicketType, days: i64) -> i64 {
    let days = days.max(0);
    let per_day = if age >= 10 {
        ADULT_TICKET_CENTS_PER_DAY
    } else {
        CHILD_TICKET_CENTS_PER_DAY
    };
    let base = per_day * days;

    match ticket_type {
        TicketType::Base => base,
        TicketType::ParkHopper => base + PARK_HOPPER_SURCHARGE_CENTS_PER_DAY * days,
        TicketType::ParkHopperPlus => base + PARK_HOPPER_PLUS_SURCHARGE_CENTS_PER_DAY * days,
        TicketType::AnnualPass => ANNUAL_PASS_CENTS,
        TicketType::FloridaResident => base * FLORIDA_RESIDENT_PERCENT / 100,
        TicketType::Military => base * MILITARY_PERCENT / 100,
    }
}

/// Estimated cost breakdown for a trip, in cents.
///
/// Genie+ and Individual lightning lanes are separate line items because
/// they are priced differently: Genie+ is a flat daily per-person fee,
/// Individual is paid per attraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSummary {
    pub tickets_cents: i64,
    pub hotel_cents: i64,
    pub lightning_lane_individual_cents: i64,
    pub genie_plus_cents: i64,
    pub miscellaneous_cents: i64,
    pub total_cents: i64,
}

/// Compute the estimated cost breakdown from the live aggregate.
///
/// Cancelled and expired reservations contribute nothing. Genie+ is charged
/// once per calendar date that has a live Genie+ reservation, sized by the
/// largest party booked that day.
pub fn cost_summary(bundle: &TripBundle) -> CostSummary {
    let days = bundle.trip.length_days();

    let tickets_cents: i64 = bundle
        .members
        .iter()
        .map(|m| estimate_ticket_cost_cents(m.age, m.ticket_type, days))
        .sum();

    let hotel_cents: i64 = bundle
        .hotel_reservations
        .iter()
        .filter(|r| r.status.is_live())
        .map(|r| r.total_cents())
        .sum();

    let lightning_lane_individual_cents: i64 = bundle
        .lightning_lane_reservations
        .iter()
        .filter(|r| r.status.is_live() && r.kind == LightningLaneKind::Individual)
        .filter_map(|r| r.total_cents())
        .sum();

    let mut genie_days: BTreeMap<chrono::NaiveDate, u32> = BTreeMap::new();
    for r in bundle
        .lightning_lane_reservations
        .iter()
        .filter(|r| r.status.is_live() && r.kind == LightningLaneKind::GeniePlus)
    {
        let entry = genie_days.entry(r.date).or_insert(0);
        *entry = (*entry).max(r.party_size);
    }
    let genie_plus_cents: i64 = genie_days
        .values()
        .map(|&party| GENIE_PLUS_CENTS_PER_PERSON_PER_DAY * i64::from(party))
        .sum();

    let miscellaneous_cents = MISCELLANEOUS_ALLOWANCE_CENTS;

    CostSummary {
        tickets_cents,
        hotel_cents,
        lightning_lane_individual_cents,
        genie_plus_cents,
        miscellaneous_cents,
        total_cents: tickets_cents
            + hotel_cents
            + lightning_lane_individual_cents
            + genie_plus_cents
            + miscellaneous_cents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_brackets() {
        assert_eq!(
            estimate_ticket_cost_cents(10, TicketType::Base, 14),
            14 * ADULT_TICKET_CENTS_PER_DAY
        );
        assert_eq!(
            estimate_ticket_cost_cents(9, TicketType::Base, 14),
            14 * CHILD_TICKET_CENTS_PER_DAY
        );
    }

    #[test]
    fn test_hopper_surcharges() {
        let base = 7 * ADULT_TICKET_CENTS_PER_DAY;
        assert_eq!(
            estimate_ticket_cost_cents(30, TicketType::ParkHopper, 7),
            base + 7 * PARK_HOPPER_SURCHARGE_CENTS_PER_DAY
        );
        assert_eq!(
            estimate_ticket_cost_cents(30, TicketType::ParkHopperPlus, 7),
            base + 7 * PARK_HOPPER_PLUS_SURCHARGE_CENTS_PER_DAY
        );
    }

    #[test]
    fn test_annual_pass_ignores_length() {
        assert_eq!(
            estimate_ticket_cost_cents(30, TicketType::AnnualPass, 1),
            ANNUAL_PASS_CENTS
        );
        assert_eq!(
            estimate_ticket_cost_cents(30, TicketType::AnnualPass, 30),
            ANNUAL_PASS_CENTS
        );
    }

    #[test]
    fn test_discount_multipliers() {
        let base = 10 * ADULT_TICKET_CENTS_PER_DAY;
        assert_eq!(
            estimate_ticket_cost_cents(30, TicketType::FloridaResident, 10),
            base * 85 / 100
        );
        assert_eq!(
            estimate_ticket_cost_cents(30, TicketType::Military, 10),
            base * 80 / 100
        );
    }

    #[test]
    fn test_deterministic() {
        let a = estimate_ticket_cost_cents(42, TicketType::ParkHopper, 14);
        let b = estimate_ticket_cost_cents(42, TicketType::ParkHopper, 14);
        assert_eq!(a, b);
    }

    #[test]
    fn test_negative_days_clamped() {
        assert_eq!(estimate_ticket_cost_cents(30, TicketType::Base, -3), 0);
    }
}
