use std::path::PathBuf;

use clap::Parser;
use news_records::{Config, Keying, ValidationReport};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use tracing::instrument;

use super::{
    RecordKind,
    input::{self, RawRecord},
    terminal::Colorize,
    to_json_string,
};

#[derive(Debug, Parser)]
#[command(about = "Validate records and report every violation")]
pub struct Validate {
    /// The type of record to validate
    kind: RecordKind,

    /// Files (.json, .jsonl, .yaml) or directories containing records
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,

    /// Only report invalid records
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
    Summary,
}

#[derive(Debug, Serialize)]
struct Outcome<'a> {
    origin: &'a str,
    valid: bool,
    report: Option<ValidationReport>,
}

impl Validate {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let records = input::load(&self.paths)?;
        let outcomes = check(self.kind, &records);

        match self.output {
            OutputFormat::Pretty => self.output_pretty(&outcomes),
            OutputFormat::Json => println!("{}", to_json_string(&outcomes, config)?),
            OutputFormat::Summary => {}
        }
        output_summary(&outcomes);

        // Exit with appropriate code
        if outcomes.iter().any(|outcome| !outcome.valid) {
            std::process::exit(2);
        }

        Ok(())
    }

    fn output_pretty(&self, outcomes: &[Outcome]) {
        for outcome in outcomes {
            match &outcome.report {
                None if self.quiet => {}
                None => println!("{} {}", "✓".success(), outcome.origin),
                Some(report) => {
                    println!("{} {}", "✗".failure(), outcome.origin);
                    for violation in report.iter() {
                        let path = if violation.path.is_empty() {
                            "(record)"
                        } else {
                            violation.path.as_str()
                        };
                        println!(
                            "    {} {}",
                            path.warning(),
                            violation.violation.to_string().dim()
                        );
                    }
                }
            }
        }
    }
}

fn output_summary(outcomes: &[Outcome]) {
    let invalid = outcomes.iter().filter(|outcome| !outcome.valid).count();
    let valid = outcomes.len() - invalid;

    let summary = format!("{valid} valid, {invalid} invalid");
    if invalid == 0 {
        eprintln!("{}", summary.success());
    } else {
        eprintln!("{}", summary.failure());
    }
}

/// Validates every record in parallel, preserving input order.
fn check(kind: RecordKind, records: &[RawRecord]) -> Vec<Outcome<'_>> {
    records
        .par_iter()
        .map(|record| {
            let report = kind.normalize(&record.value, Keying::Alias).err();
            Outcome {
                origin: &record.origin,
                valid: report.is_none(),
                report,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use news_records::Violation;
    use serde_json::json;

    use super::*;

    fn record(origin: &str, value: serde_json::Value) -> RawRecord {
        RawRecord {
            origin: origin.to_string(),
            value,
        }
    }

    #[test]
    fn check_reports_each_record_in_order() {
        let records = vec![
            record("ok", json!({"_id": "m1", "name": "Outlet", "perspective": "left"})),
            record("bad", json!({"_id": "m2", "name": "Outlet", "perspective": "far_left"})),
            record("array", json!([])),
        ];

        let outcomes = check(RecordKind::MediaSource, &records);

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].valid);
        assert_eq!(outcomes[1].origin, "bad");
        assert!(matches!(
            outcomes[1].report.as_ref().and_then(|r| r.get("perspective")),
            Some(Violation::EnumMembership { .. })
        ));
        assert!(!outcomes[2].valid);
    }

    #[test]
    fn outcomes_serialize_for_json_output() {
        let records = vec![record(
            "ok",
            json!({"_id": "a1", "title": "T", "content": "C", "url": "u"}),
        )];
        let outcomes = check(RecordKind::Article, &records);

        let json = serde_json::to_value(&outcomes).unwrap();
        assert_eq!(json, json!([{"origin": "ok", "valid": true, "report": null}]));
    }
}
