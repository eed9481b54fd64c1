//! service-core: Shared infrastructure for the essay feedback service.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
