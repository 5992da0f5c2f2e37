use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use econ_brief::config::settings_io::load_settings;
use econ_brief::{Engine, GeminiClient, PromptBuilder, SettingsOverrides, TelegramNotifier};

#[derive(Parser)]
#[command(
    name = "econ-brief",
    about = "Generate a daily economics brief with Gemini and post it to Telegram",
    version
)]
struct Cli {
    /// Settings file (default: <config dir>/econ-brief/settings.json)
    #[arg(long, env = "ECON_BRIEF_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Model identifier, with or without the `models/` prefix
    #[arg(long, env = "GEMINI_MODEL")]
    gemini_model: Option<String>,

    #[arg(long, env = "GEMINI_BASE_URL")]
    gemini_base_url: Option<String>,

    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    telegram_bot_token: Option<String>,

    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    telegram_chat_id: Option<String>,

    #[arg(long, env = "TELEGRAM_BASE_URL")]
    telegram_base_url: Option<String>,

    /// Prompt text; `{date}` is replaced with today's date
    #[arg(long, env = "ECON_BRIEF_PROMPT")]
    prompt: Option<String>,

    /// File holding the prompt text
    #[arg(long, env = "ECON_BRIEF_PROMPT_FILE")]
    prompt_file: Option<PathBuf>,

    /// Generate the brief and print it instead of sending it
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            gemini_api_key: self.gemini_api_key.clone(),
            gemini_model: self.gemini_model.clone(),
            gemini_base_url: self.gemini_base_url.clone(),
            telegram_bot_token: self.telegram_bot_token.clone(),
            telegram_chat_id: self.telegram_chat_id.clone(),
            telegram_base_url: self.telegram_base_url.clone(),
            prompt: self.prompt.clone(),
            prompt_file: self.prompt_file.clone(),
        }
    }
}

/// `RUST_LOG` wins when set and parseable; otherwise the CLI verbosity.
fn log_filter(rust_log: Option<&str>, default_level: tracing::Level) -> EnvFilter {
    rust_log
        .filter(|spec| !spec.trim().is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| {
            EnvFilter::default().add_directive(LevelFilter::from_level(default_level).into())
        })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            std::env::var("RUST_LOG").ok().as_deref(),
            default_level,
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut settings = load_settings(cli.config.as_deref()).context("loading settings")?;
    settings.apply(cli.overrides());
    settings.validate().context("invalid configuration")?;

    let prompt = PromptBuilder::from_settings(&settings.prompt).context("loading prompt")?;
    let generator = GeminiClient::new(&settings.gemini, prompt)?;
    let notifier = TelegramNotifier::new(&settings.telegram)?;
    let engine = Engine::new(generator, notifier, settings.truncation.clone());

    if cli.dry_run {
        let message = engine.compose();
        info!(chars = message.text().chars().count(), "dry run, not sending");
        println!("{}", message.text());
        return Ok(());
    }

    // Run failures are reported in the log and the chat, never the exit code.
    let report = engine.run();
    if !report.delivered {
        warn!("brief was not delivered");
    }

    Ok(())
}
