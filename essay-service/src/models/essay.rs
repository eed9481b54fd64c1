//! Request and response bodies for the essay endpoint.

use serde::{Deserialize, Serialize};

/// Incoming essay. Only `essay` is read; other keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct EssaySubmission {
    /// Essay text. May be empty; must be a JSON string.
    pub essay: String,
}

/// Successful response carrying the generated feedback unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}
