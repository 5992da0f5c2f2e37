pub mod engine;
pub mod protocol;

pub mod prompt_builder;
pub mod llm_client;
pub mod notifier;
