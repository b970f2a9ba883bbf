use std::sync::Arc;

use log::debug;

use crate::config::{OllamaConfig, OpenAiConfig};
use crate::generator::KeyPointGenerator;
use crate::llm::LlmInterface;
use crate::prompt::ExerciseContext;
use crate::runtime;
use crate::uniffi_interface::errors::FormcueError;

#[derive(Debug, Clone, uniffi::Record)]
pub struct ExerciseInput {
    pub name: String,
    pub category: Option<String>,
    pub muscles: Vec<String>,
    pub equipment: Vec<String>,
    pub exercise_type: Option<String>,
}

impl From<ExerciseInput> for ExerciseContext {
    fn from(input: ExerciseInput) -> Self {
        ExerciseContext {
            name: input.name,
            category: input.category,
            muscles: Some(input.muscles).filter(|m| !m.is_empty()),
            equipment: Some(input.equipment).filter(|e| !e.is_empty()),
            exercise_type: input.exercise_type,
        }
    }
}

#[derive(uniffi::Object)]
pub struct KeyPointService {
    generator: Arc<KeyPointGenerator<LlmInterface>>,
}

#[uniffi::export]
impl KeyPointService {
    #[uniffi::constructor]
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Result<Arc<Self>, FormcueError> {
        let mut config = OpenAiConfig::new(api_key);
        if let Some(model) = model {
            config = config.with_model(model);
        }
        if let Some(base_url) = base_url {
            config = config.with_base_url(base_url);
        }
        debug!("KeyPointService::new config={:?}", config);
        let llm = LlmInterface::new_openai(config)?;
        Ok(Arc::new(Self {
            generator: Arc::new(KeyPointGenerator::new(llm)),
        }))
    }

    #[uniffi::constructor]
    pub fn new_ollama(
        model: Option<String>,
        host: Option<String>,
    ) -> Result<Arc<Self>, FormcueError> {
        let mut config = OllamaConfig::default();
        if let Some(model) = model {
            config = config.with_model(model);
        }
        if let Some(host) = host {
            config.host = host;
        }
        let llm = LlmInterface::new_ollama(config)?;
        Ok(Arc::new(Self {
            generator: Arc::new(KeyPointGenerator::new(llm)),
        }))
    }

    pub fn backend(&self) -> String {
        self.generator.provider().describe()
    }

    pub async fn generate_key_points(
        &self,
        input: ExerciseInput,
    ) -> Result<Vec<String>, FormcueError> {
        let generator = self.generator.clone();
        let ctx = ExerciseContext::from(input);
        // Foreign executors have no tokio reactor, so the request runs on ours.
        let handle = runtime::global_runtime()?
            .spawn(async move { generator.generate_key_points(&ctx).await });
        let points = handle.await.map_err(FormcueError::with_display)??;
        Ok(points)
    }
}
