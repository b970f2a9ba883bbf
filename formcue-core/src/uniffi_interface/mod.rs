pub mod errors;
pub mod logging;
pub mod objects;

pub use errors::FormcueError;
pub use objects::{ExerciseInput, KeyPointService};

#[uniffi::export]
pub fn extract_key_points(text: String) -> Vec<String> {
    crate::extract::extract_key_points(&text)
}

#[uniffi::export]
pub fn build_prompt(input: ExerciseInput) -> String {
    crate::prompt::build_prompt(&input.into())
}
