use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::brief::TruncationLimits;

pub const DEFAULT_MODEL: &str = "models/gemini-3-pro-preview";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TELEGRAM_BASE_URL: &str = "https://api.telegram.org";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub gemini: GeminiSettings,
    pub telegram: TelegramSettings,
    pub prompt: PromptSettings,
    pub truncation: TruncationLimits,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.into(),
            timeout_secs: 120,
        }
    }
}

impl fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub chat_id: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            base_url: DEFAULT_TELEGRAM_BASE_URL.into(),
            timeout_secs: 30,
        }
    }
}

impl fmt::Debug for TelegramSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramSettings")
            .field("bot_token", &redact(&self.bot_token))
            .field("chat_id", &self.chat_id)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Where the prompt comes from. Inline text wins over a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptSettings {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
}

/// Values taken from the command line or environment. `None` leaves the
/// file/default value in place.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub gemini_base_url: Option<String>,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub telegram_base_url: Option<String>,
    pub prompt: Option<String>,
    pub prompt_file: Option<PathBuf>,
}

impl Settings {
    pub fn apply(&mut self, overrides: SettingsOverrides) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        set(&mut self.gemini.api_key, overrides.gemini_api_key);
        set(&mut self.gemini.model, overrides.gemini_model);
        set(&mut self.gemini.base_url, overrides.gemini_base_url);
        set(&mut self.telegram.bot_token, overrides.telegram_bot_token);
        set(&mut self.telegram.chat_id, overrides.telegram_chat_id);
        set(&mut self.telegram.base_url, overrides.telegram_base_url);

        if overrides.prompt.is_some() {
            self.prompt.text = overrides.prompt;
        }
        if overrides.prompt_file.is_some() {
            self.prompt.file = overrides.prompt_file;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("gemini.api_key"));
        }
        if self.gemini.model.trim().is_empty() {
            return Err(ConfigError::Missing("gemini.model"));
        }
        if self.telegram.bot_token.trim().is_empty() {
            return Err(ConfigError::Missing("telegram.bot_token"));
        }
        if self.telegram.chat_id.trim().is_empty() {
            return Err(ConfigError::Missing("telegram.chat_id"));
        }
        let has_text = self
            .prompt
            .text
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        if !has_text && self.prompt.file.is_none() {
            return Err(ConfigError::Missing("prompt.text or prompt.file"));
        }
        if self.gemini.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("gemini.timeout_secs"));
        }
        if self.telegram.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("telegram.timeout_secs"));
        }
        if self.truncation.keep_len > self.truncation.trigger_len {
            return Err(ConfigError::InvalidLimits {
                keep_len: self.truncation.keep_len,
                trigger_len: self.truncation.trigger_len,
            });
        }
        Ok(())
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}
