//! Storage layer: repository contracts, implementations, and the service
//! functions that enforce planning rules in front of them.
//!
//! # Architecture
//!
//! - [`repository`] defines the per-aggregate storage traits and the error
//!   taxonomy every backend shares.
//! - [`repositories`] holds concrete backends; the in-memory
//!   `LocalRepository` ships behind the `local-repo` feature.
//! - [`services`] wraps the traits with validation so callers never persist
//!   an invalid write.
//! - [`factory`] and [`repo_config`] choose and configure a backend at
//!   startup.
//!
//! A process-wide repository can be installed once with [`init_repository`]
//! and shared via [`get_repository`].

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::PlannerConfig;
#[cfg(feature = "local-repo")]
pub use repositories::LocalRepository;
pub use repository::{
    CatalogRepository, ErrorContext, FullRepository, ItineraryRepository, PartyRepository,
    RepositoryError, RepositoryResult, ReservationRepository, TripRepository,
};

use std::sync::{Arc, OnceLock};

static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

/// Install the process-wide repository. Returns an error when one is
/// already installed.
pub fn init_repository(repo: Arc<dyn FullRepository>) -> RepositoryResult<()> {
    REPOSITORY
        .set(repo)
        .map_err(|_| RepositoryError::configuration("Repository already initialized"))
}

/// The process-wide repository, if one has been installed.
pub fn get_repository() -> RepositoryResult<Arc<dyn FullRepository>> {
    REPOSITORY
        .get()
        .cloned()
        .ok_or_else(|| RepositoryError::configuration("Repository not initialized"))
}
