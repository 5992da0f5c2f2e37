use std::fs;

use chrono::{Local, NaiveDate};
use tracing::warn;

use crate::config::settings::PromptSettings;
use crate::error::ConfigError;

pub const DATE_PLACEHOLDER: &str = "{date}";

/// Holds the configured prompt template and renders it for a given day.
/// Only formats text; the prompt wording itself is configuration.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: String,
}

impl PromptBuilder {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn from_settings(settings: &PromptSettings) -> Result<Self, ConfigError> {
        let inline = settings
            .text
            .as_deref()
            .filter(|text| !text.trim().is_empty());

        match (inline, &settings.file) {
            (Some(text), Some(path)) => {
                warn!(
                    file = %path.display(),
                    "both inline prompt and prompt file configured, using inline prompt"
                );
                Ok(Self::new(text))
            }
            (Some(text), None) => Ok(Self::new(text)),
            (None, Some(path)) => {
                let template = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                if template.trim().is_empty() {
                    return Err(ConfigError::Missing("prompt.file contents"));
                }
                Ok(Self::new(template))
            }
            (None, None) => Err(ConfigError::Missing("prompt.text or prompt.file")),
        }
    }

    pub fn build(&self) -> String {
        self.build_for(Local::now().date_naive())
    }

    pub fn build_for(&self, date: NaiveDate) -> String {
        // e.g. "Thursday, October 15, 2026"
        let formatted = date.format("%A, %B %d, %Y").to_string();
        self.template.replace(DATE_PLACEHOLDER, &formatted)
    }
}
