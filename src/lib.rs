//! Daily economics brief: ask Gemini for a short brief and forward it to
//! a Telegram chat. One generate-and-notify pass per invocation.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;

pub use config::settings::{Settings, SettingsOverrides};
pub use engine::engine::{Engine, RunReport};
pub use engine::llm_client::GeminiClient;
pub use engine::notifier::TelegramNotifier;
pub use engine::prompt_builder::PromptBuilder;
pub use engine::protocol::{BriefSource, Notify};
pub use model::brief::{Brief, TruncationLimits};
pub use model::message::OutgoingMessage;
