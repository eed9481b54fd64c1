//! Mock provider implementation for testing.

use super::{Generation, ProviderError, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

enum Behavior {
    Reply(String),
    Fail(fn() -> ProviderError),
}

/// Mock text provider for testing.
///
/// Replies with fixed text or fails with a fixed error, and remembers the
/// last prompt it was given.
pub struct MockTextProvider {
    behavior: Behavior,
    last_prompt: Mutex<Option<String>>,
}

impl MockTextProvider {
    /// Provider that always returns `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Reply(text.into()),
            last_prompt: Mutex::new(None),
        }
    }

    /// Provider that always fails with the error built by `error`.
    pub fn failing(error: fn() -> ProviderError) -> Self {
        Self {
            behavior: Behavior::Fail(error),
            last_prompt: Mutex::new(None),
        }
    }

    /// The most recent prompt passed to `generate`.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, prompt: &str) -> Result<Generation, ProviderError> {
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }

        match &self.behavior {
            Behavior::Reply(text) => Ok(Generation {
                text: text.clone(),
                input_tokens: prompt.len() as i32 / 4,
                output_tokens: text.len() as i32 / 4,
            }),
            Behavior::Fail(error) => Err(error()),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.behavior {
            Behavior::Reply(_) => Ok(()),
            Behavior::Fail(error) => Err(error()),
        }
    }
}
