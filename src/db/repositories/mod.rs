//! Concrete repository implementations.

#[cfg(not(feature = "local-repo"))]
compile_error!("no repository backend selected; enable the `local-repo` feature");

#[cfg(feature = "local-repo")]
pub mod local;

#[cfg(feature = "local-repo")]
pub use local::LocalRepository;
