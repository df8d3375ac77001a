//! Domain services that operate on planning data without touching storage.

pub mod pricing;
pub mod wait_times;
