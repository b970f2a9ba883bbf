use log::debug;
use serde::{Deserialize, Serialize};

pub const SYSTEM_PROMPT: &str = "You are an expert fitness trainer and physiotherapist. \
                                 You give short, precise cues about exercise technique that help people \
                                 move safely and effectively.";

/// What the caller knows about the exercise the key points are for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseContext {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub muscles: Option<Vec<String>>,
    #[serde(default)]
    pub equipment: Option<Vec<String>>,
    #[serde(default)]
    pub exercise_type: Option<String>,
}

impl ExerciseContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn muscles<I, S>(mut self, muscles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.muscles = Some(muscles.into_iter().map(Into::into).collect());
        self
    }

    pub fn equipment<I, S>(mut self, equipment: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.equipment = Some(equipment.into_iter().map(Into::into).collect());
        self
    }

    pub fn exercise_type(mut self, exercise_type: impl Into<String>) -> Self {
        self.exercise_type = Some(exercise_type.into());
        self
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn joined(list: &Option<Vec<String>>) -> Option<String> {
    let items: Vec<&str> = list
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items.join(", "))
    }
}

/// Render the user prompt asking for four technique tips.
pub fn build_prompt(ctx: &ExerciseContext) -> String {
    let mut details = Vec::new();
    if let Some(category) = present(&ctx.category) {
        details.push(format!("Category: {}", category));
    }
    if let Some(muscles) = joined(&ctx.muscles) {
        details.push(format!("Target muscles: {}", muscles));
    }
    if let Some(equipment) = joined(&ctx.equipment) {
        details.push(format!("Equipment: {}", equipment));
    }
    if let Some(exercise_type) = present(&ctx.exercise_type) {
        details.push(format!("Exercise type: {}", exercise_type));
    }
    debug!(
        "build_prompt exercise='{}' detail_lines={}",
        ctx.name.trim(),
        details.len()
    );

    let details_block = if details.is_empty() {
        String::new()
    } else {
        format!("{}\n", details.join("\n"))
    };

    format!(
        "Give exactly 4 key technical points for performing the exercise \"{}\".\n\
         {}\n\
         Rules:\n\
         - Exactly 4 points, one per line\n\
         - At most 12 words per point\n\
         - Focus on execution technique only\n\
         - No introduction, conclusion or extra commentary\n\n\
         Answer as a numbered list:\n\
         1. ...\n\
         2. ...\n\
         3. ...\n\
         4. ...",
        ctx.name.trim(),
        details_block
    )
}
