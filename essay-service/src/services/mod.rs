pub mod metrics;
pub mod prompt;
pub mod providers;

pub use prompt::build_essay_prompt;
pub use providers::{Generation, ProviderError, TextProvider};
