//! Loading raw records from files and directories.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use serde_json::Value;
use walkdir::WalkDir;

/// An unvalidated record and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// The file (and position within it) the record was read from.
    pub origin: String,
    /// The record as parsed.
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    /// A single JSON object, or an array of them.
    Json,
    /// One JSON object per line.
    JsonLines,
    /// A single YAML mapping, or a sequence of them.
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(OsStr::to_str)? {
            "json" => Some(Self::Json),
            "jsonl" | "ndjson" => Some(Self::JsonLines),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Loads every record from the given files and directories.
///
/// Directories are searched recursively for supported files, which are read
/// in file name order. Unsupported files inside a directory are skipped; an
/// unsupported file named explicitly is an error.
pub fn load(paths: &[PathBuf]) -> anyhow::Result<Vec<RawRecord>> {
    let mut records = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry?;
                let path = entry.path();
                if let Some(format) =
                    Format::from_path(path).filter(|_| entry.file_type().is_file())
                {
                    records.extend(load_file(path, format)?);
                } else {
                    tracing::trace!(path = %path.display(), "skipping unsupported file");
                }
            }
        } else {
            let Some(format) = Format::from_path(path) else {
                bail!(
                    "unsupported file type: {} (expected .json, .jsonl or .yaml)",
                    path.display()
                );
            };
            records.extend(load_file(path, format)?);
        }
    }

    tracing::info!(count = records.len(), "loaded records");
    Ok(records)
}

fn load_file(path: &Path, format: Format) -> anyhow::Result<Vec<RawRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let origin = path.display().to_string();

    match format {
        Format::Json => {
            let value: Value = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse {origin} as JSON"))?;
            Ok(split_document(&origin, value))
        }
        Format::Yaml => {
            let value: Value = serde_yaml::from_str(&content)
                .with_context(|| format!("failed to parse {origin} as YAML"))?;
            Ok(split_document(&origin, value))
        }
        Format::JsonLines => content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                let origin = format!("{origin}:{}", index + 1);
                serde_json::from_str::<Value>(line)
                    .with_context(|| format!("failed to parse {origin} as JSON"))
                    .map(|value| RawRecord { origin, value })
            })
            .collect(),
    }
}

/// Treats a top-level array as a list of records, and anything else as one.
fn split_document(origin: &str, value: Value) -> Vec<RawRecord> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, value)| RawRecord {
                origin: format!("{origin}[{index}]"),
                value,
            })
            .collect(),
        value => vec![RawRecord {
            origin: origin.to_string(),
            value,
        }],
    }
}
