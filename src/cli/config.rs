use std::path::Path;

use anyhow::bail;
use clap::Parser;
use news_records::Config;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Show or initialize configuration")]
pub struct ConfigCommand {
    /// Write the default configuration to the config path
    #[arg(long)]
    init: bool,

    /// Overwrite an existing config file when initializing
    #[arg(long, requires = "init")]
    force: bool,
}

impl ConfigCommand {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, path: &Path, config: &Config) -> anyhow::Result<()> {
        if self.init {
            if path.exists() && !self.force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save(path)?;
            println!("{} {}", "Wrote".success(), path.display());
            return Ok(());
        }

        let source = if path.exists() {
            path.display().to_string()
        } else {
            "defaults".to_string()
        };
        println!("{}", format!("# effective configuration ({source})").dim());
        print!("{}", toml::to_string_pretty(config)?);
        Ok(())
    }
}
