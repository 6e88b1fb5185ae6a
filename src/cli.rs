//! Minimal CLI: check JSON/NDJSON documents against a validator descriptor
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use shapecheck::{Failure, Validator, check, render_clue};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// check JSON documents against a declarative shape
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,

    /// more logging on stderr (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// check every input document and report the first failure of each
    Check(CheckCmd),
    /// parse a validator descriptor and print its canonical form
    Describe(DescribeCmd),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct CheckCmd {
    #[command(flatten)]
    input_settings: InputSettings,

    /// validator descriptor (.json, .yaml or .yml)
    #[arg(long)]
    validator: PathBuf,

    /// accept keys the descriptor does not declare
    #[arg(long, default_value_t = false)]
    loose: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(clap::Parser, Debug)]
struct DescribeCmd {
    /// validator descriptor (.json, .yaml or .yml)
    validator: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

/// One checked document.
#[derive(Debug, Serialize)]
struct Report {
    source: String,
    index: usize,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<Failure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    clue: Option<String>,
}

#[derive(Debug)]
struct Document {
    source: String,
    index: usize,
    value: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_documents(&self) -> Result<Vec<Document>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let mut out = Vec::new();
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file ({source_path_str})"))?;
            let mut index = 0;
            for json_value in self.parse_source(&source, &source_path_str)? {
                for value in self.select(json_value, &source_path_str)? {
                    out.push(Document { source: source_path_str.clone(), index, value });
                    index += 1;
                }
            }
        }
        tracing::info!(documents = out.len(), "loaded input documents");
        Ok(out)
    }

    fn parse_source(&self, source: &str, source_path_str: &str) -> Result<Vec<Value>> {
        if !self.ndjson {
            let json_value = serde_json::from_str::<Value>(source)
                .with_context(|| format!("failed to parse JSON source file ({source_path_str})"))?;
            return Ok(vec![json_value]);
        }
        source.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str::<Value>(line).with_context(|| {
                    format!("failed to parse NDJSON line {} ({source_path_str})", n + 1)
                })
            })
            .collect()
    }

    /// Apply `--json-pointer` then `--jq-expr`.
    fn select(&self, json_value: Value, source_path_str: &str) -> Result<Vec<Value>> {
        let json_value = match self.json_pointer.as_deref() {
            None => json_value,
            Some(pointer) => match json_value.pointer(pointer) {
                Some(node) => node.clone(),
                None => bail!("JSON pointer {pointer} matched nothing ({source_path_str})"),
            },
        };
        match self.jq_expr.as_ref() {
            None => Ok(vec![json_value]),
            Some(jq_expr) => crate::jq_exec::run_jaq(jq_expr, &json_value).with_context(|| {
                format!("failed to apply jq expression to source file ({source_path_str})")
            }),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    /// Returns whether every document passed.
    pub fn run(&self) -> Result<bool> {
        match &self.cmd {
            Command::Check(target) => {
                let mut validator = load_validator(&target.validator)?;
                if target.loose {
                    validator = validator.into_loose();
                }
                let documents = target.input_settings.load_documents()?;

                // validators are Send + Sync; order is kept by collect
                let reports = documents
                    .par_iter()
                    .map(|doc| check_document(doc, &validator))
                    .collect::<Vec<_>>();

                let failed = reports.iter().filter(|r| !r.ok).count();
                tracing::info!(checked = reports.len(), failed, "check finished");
                match target.format {
                    Format::Json => {
                        for report in &reports {
                            println!("{}", serde_json::to_string(report)?);
                        }
                    }
                    Format::Text => print_text(&reports),
                }
                Ok(failed == 0)
            }
            Command::Describe(target) => {
                let validator = load_validator(&target.validator)?;
                let descriptor = validator.to_descriptor()
                    .context("validator has no descriptor form")?;
                println!("{}", serde_json::to_string_pretty(&descriptor)?);
                Ok(true)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn load_validator(path: &Path) -> Result<Validator> {
    let path_str = path.to_string_lossy();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read validator file ({path_str})"))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let validator = if is_yaml {
        Validator::from_yaml_str(&source)
    } else {
        Validator::from_json_str(&source)
    };
    validator.with_context(|| format!("invalid validator file ({path_str})"))
}

fn check_document(doc: &Document, validator: &Validator) -> Report {
    match check(&doc.value, validator) {
        Ok(()) => Report { source: doc.source.clone(), index: doc.index, ok: true, failure: None, clue: None },
        Err(failure) => {
            let clue = render_clue(failure.locate(&doc.value), &failure);
            tracing::debug!(source = %doc.source, index = doc.index, kind = failure.tag(), "document failed");
            Report {
                source: doc.source.clone(),
                index: doc.index,
                ok: false,
                failure: Some(failure),
                clue: Some(clue),
            }
        }
    }
}

fn print_text(reports: &[Report]) {
    for report in reports {
        let label = if report.index == 0 {
            report.source.clone()
        } else {
            format!("{}#{}", report.source, report.index)
        };
        match (&report.failure, &report.clue) {
            (Some(failure), Some(clue)) => {
                println!(
                    "{} {label}: {clue} {}",
                    "❌".red(),
                    format!("(at {})", failure.path_string()).dimmed()
                );
            }
            _ => println!("{} {label}", "✅".green()),
        }
    }
    let failed = reports.iter().filter(|r| !r.ok).count();
    let summary = format!("{} checked, {failed} failed", reports.len());
    if failed == 0 {
        eprintln!("{}", summary.green().bold());
    } else {
        eprintln!("{}", summary.red().bold());
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
