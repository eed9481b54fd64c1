//! HTTP handlers for the essay service.

pub mod essay;
pub mod health;

pub use essay::{check_essay, handle_essay_panic, NO_ESSAY_TEXT, PROCESSING_FAILED};
pub use health::{health_check, metrics_endpoint, readiness_check};
