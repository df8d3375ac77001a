//! Domain model for the vacation planning core.

pub mod catalog;
pub mod itinerary;
pub mod party;
pub mod reservation;
pub mod time;
pub mod trip;
