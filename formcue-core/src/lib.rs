pub mod config;
pub mod error;
pub mod extract;
pub mod generator;
pub mod llm;
pub mod prompt;
pub mod runtime;

pub use config::{OllamaConfig, OpenAiConfig, Sampling};
pub use error::{KeyPointsError, Result};
pub use extract::extract_key_points;
pub use generator::KeyPointGenerator;
pub use llm::{CompletionProvider, LlmInterface};
pub use prompt::{ExerciseContext, SYSTEM_PROMPT, build_prompt};

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
#[cfg(feature = "uniffi")]
pub mod uniffi_interface;
