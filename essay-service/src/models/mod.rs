//! Domain models for the essay service.

pub mod essay;

pub use essay::{EssaySubmission, FeedbackResponse};
