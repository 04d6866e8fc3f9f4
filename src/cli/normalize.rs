use std::path::PathBuf;

use clap::Parser;
use news_records::Config;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde_json::Value;
use tracing::instrument;

use super::{KeyingArg, RecordKind, input, terminal::Colorize, to_json_string};

#[derive(Debug, Parser)]
#[command(about = "Validate records and re-emit them in a chosen key convention")]
pub struct Normalize {
    /// The type of record to normalize
    kind: RecordKind,

    /// Files (.json, .jsonl, .yaml) or directories containing records
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Key convention for emitted records [default: from config]
    #[arg(long, value_name = "KEYING")]
    keying: Option<KeyingArg>,
}

impl Normalize {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let keying = self.keying.map_or(config.keying, Into::into);
        let records = input::load(&self.paths)?;

        let results: Vec<_> = records
            .par_iter()
            .map(|record| (record, self.kind.normalize(&record.value, keying)))
            .collect();

        let mut normalized = Vec::with_capacity(results.len());
        let mut failed = false;
        for (record, result) in results {
            match result {
                Ok(map) => normalized.push(Value::Object(map)),
                Err(report) => {
                    failed = true;
                    eprintln!("{} {}: {report}", "✗".failure(), record.origin);
                }
            }
        }

        println!("{}", to_json_string(&normalized, config)?);

        if failed {
            std::process::exit(2);
        }

        Ok(())
    }
}
