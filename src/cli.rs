use std::path::PathBuf;

mod config;
mod input;
mod normalize;
mod schema;
mod terminal;
mod validate;

use clap::ArgAction;
use config::ConfigCommand;
use news_records::{Article, Config, Issue, Keying, MediaSource, Record, ValidationReport};
use normalize::Normalize;
use schema::Schema;
use serde_json::{Map, Value};
use validate::Validate;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the configuration file
    #[arg(short, long, default_value = "records.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = Config::load_or_default(&self.config)?;
        terminal::set_color_enabled(config.color);

        self.command.run(&self.config, &config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Validate records and report every violation
    Validate(Validate),

    /// Validate records and re-emit them in a chosen key convention
    Normalize(Normalize),

    /// Print the document store validator for a record type
    Schema(Schema),

    /// Show or initialize configuration
    Config(ConfigCommand),
}

impl Command {
    fn run(self, config_path: &std::path::Path, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Validate(command) => command.run(config)?,
            Self::Normalize(command) => command.run(config)?,
            Self::Schema(command) => command.run(config)?,
            Self::Config(command) => command.run(config_path, config)?,
        }
        Ok(())
    }
}

/// The type of record to operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RecordKind {
    /// A synthesized multi-perspective story
    Issue,
    /// A single sourced news item
    Article,
    /// A publisher profile
    MediaSource,
}

impl RecordKind {
    /// Validates a raw record and re-emits it keyed by the given convention.
    pub fn normalize(
        self,
        raw: &Value,
        keying: Keying,
    ) -> Result<Map<String, Value>, ValidationReport> {
        match self {
            Self::Issue => Issue::validate_value(raw).map(|r| r.to_record(keying)),
            Self::Article => Article::validate_value(raw).map(|r| r.to_record(keying)),
            Self::MediaSource => MediaSource::validate_value(raw).map(|r| r.to_record(keying)),
        }
    }

    /// The field table for this record type.
    pub fn schema(self) -> &'static news_records::schema::Schema {
        match self {
            Self::Issue => Issue::schema(),
            Self::Article => Article::schema(),
            Self::MediaSource => MediaSource::schema(),
        }
    }
}

/// Key convention for emitted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum KeyingArg {
    /// Wire aliases (`_id`, `createdAt`, ...)
    Alias,
    /// Internal field names (`id`, `created_at`, ...)
    Internal,
}

impl From<KeyingArg> for Keying {
    fn from(arg: KeyingArg) -> Self {
        match arg {
            KeyingArg::Alias => Self::Alias,
            KeyingArg::Internal => Self::Internal,
        }
    }
}

/// Renders JSON according to the configured style.
fn to_json_string(value: &impl serde::Serialize, config: &Config) -> serde_json::Result<String> {
    if config.pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
