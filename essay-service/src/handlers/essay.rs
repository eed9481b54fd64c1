use crate::models::{EssaySubmission, FeedbackResponse};
use crate::services::{build_essay_prompt, metrics};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;
use std::any::Any;
use std::time::Instant;

/// Public message for any unusable request body.
pub const NO_ESSAY_TEXT: &str = "No essay text provided";

/// Public message for any failure after the body was accepted.
pub const PROCESSING_FAILED: &str = "Failed to process the essay";

/// `POST /api/check-essay`
///
/// Any body rejection (bad content type, malformed JSON, missing or non-string
/// `essay`) is a 400. Any generation failure is a 500 with a fixed message; the
/// cause is only logged.
pub async fn check_essay(
    State(state): State<AppState>,
    payload: Result<Json<EssaySubmission>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(rejection) => {
            tracing::warn!(
                status = %rejection.status(),
                reason = %rejection.body_text(),
                "Rejected essay submission"
            );
            metrics::record_essay_request(400);
            return Err(AppError::BadRequest(NO_ESSAY_TEXT.to_string()));
        }
    };

    let prompt = build_essay_prompt(&submission.essay);

    let provider = state.text_provider.as_ref();
    let start = Instant::now();
    let result = provider.generate(&prompt).await;
    metrics::record_provider_latency(
        provider.name(),
        provider.model(),
        start.elapsed().as_secs_f64(),
    );

    match result {
        Ok(generation) => {
            metrics::record_tokens(
                provider.model(),
                generation.input_tokens,
                generation.output_tokens,
            );
            metrics::record_essay_request(200);

            tracing::info!(
                essay_len = submission.essay.len(),
                feedback_len = generation.text.len(),
                input_tokens = generation.input_tokens,
                output_tokens = generation.output_tokens,
                "Essay feedback generated"
            );

            Ok(Json(FeedbackResponse {
                feedback: generation.text,
            }))
        }
        Err(e) => {
            metrics::record_provider_error(provider.name(), e.kind());
            metrics::record_essay_request(500);

            tracing::error!(
                provider = provider.name(),
                model = %provider.model(),
                error_type = e.kind(),
                error = %e,
                "Failed to generate essay feedback"
            );

            Err(AppError::ProcessingError(PROCESSING_FAILED.to_string()))
        }
    }
}

/// Panic handler for the essay route; keeps the public error shape.
pub fn handle_essay_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };

    tracing::error!(panic = %detail, "Essay handler panicked");
    metrics::record_essay_request(500);

    AppError::ProcessingError(PROCESSING_FAILED.to_string()).into_response()
}
