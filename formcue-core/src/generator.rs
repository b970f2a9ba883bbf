use futures::future::join_all;
use log::{debug, info, warn};

use crate::error::{KeyPointsError, Result};
use crate::extract::extract_key_points;
use crate::llm::CompletionProvider;
use crate::prompt::{ExerciseContext, SYSTEM_PROMPT, build_prompt};

/// Prompt, call, extract. Holds no state besides its provider.
pub struct KeyPointGenerator<P> {
    provider: P,
}

impl<P: CompletionProvider> KeyPointGenerator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Ask the provider for technique tips and return the 0-5 usable lines.
    ///
    /// Provider failures are returned as-is; nothing is retried.
    pub async fn generate_key_points(&self, ctx: &ExerciseContext) -> Result<Vec<String>> {
        if ctx.name.trim().is_empty() {
            return Err(KeyPointsError::InvalidContext(
                "exercise name must not be empty".into(),
            ));
        }
        let prompt = build_prompt(ctx);
        debug!(
            "generate_key_points exercise='{}' prompt_len={}",
            ctx.name,
            prompt.len()
        );
        let raw = self
            .provider
            .complete(SYSTEM_PROMPT, &prompt)
            .await
            .inspect_err(|e| warn!("key point generation for '{}' failed: {}", ctx.name, e))?;
        let points = extract_key_points(&raw);
        info!(
            "generate_key_points exercise='{}' returned {} points",
            ctx.name,
            points.len()
        );
        Ok(points)
    }

    /// Run one independent generation per exercise concurrently.
    ///
    /// Results line up with `contexts`; a failure only affects its own slot.
    pub async fn generate_many(&self, contexts: &[ExerciseContext]) -> Vec<Result<Vec<String>>> {
        debug!("generate_many called exercises={}", contexts.len());
        join_all(contexts.iter().map(|ctx| self.generate_key_points(ctx))).await
    }
}
