//! Replays `fixtures/*.json` through the public API.
//!
//! Each fixture names a validator descriptor, values it must accept, and values
//! it must reject with a given failure type (and optionally path). A fixture
//! with `"invalid": true` expects the descriptor itself to be rejected.
use std::path::Path;
use anyhow::{Context, Result, bail};
use colored::Colorize;
use serde::Deserialize;
use serde_json::Value;
use shapecheck::{Error, Validator, check};

#[derive(Debug, Deserialize)]
struct Fixture {
    name: String,
    validator: Value,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    accept: Vec<Value>,
    #[serde(default)]
    reject: Vec<Rejection>,
}

#[derive(Debug, Deserialize)]
struct Rejection {
    value: Value,
    #[serde(rename = "type")]
    tag: String,
    path: Option<String>,
}

fn run_fixture(fixture: &Fixture) -> Vec<String> {
    let mut problems = Vec::new();
    let validator = match (Validator::from_descriptor(&fixture.validator), fixture.invalid) {
        (Err(Error::InvalidUse { .. }), true) => return problems,
        (Ok(_), true) => return vec!["descriptor was accepted but should be invalid use".to_string()],
        (Err(error), false) => return vec![format!("descriptor rejected: {error}")],
        (Ok(v), false) => v,
        (Err(error), true) => return vec![format!("expected invalid use, got: {error}")],
    };
    for value in &fixture.accept {
        if let Err(failure) = check(value, &validator) {
            problems.push(format!("{value} should pass, failed with {failure}"));
        }
    }
    for rejection in &fixture.reject {
        match check(&rejection.value, &validator) {
            Ok(()) => problems.push(format!("{} should fail with {}", rejection.value, rejection.tag)),
            Err(failure) => {
                if failure.tag() != rejection.tag {
                    problems.push(format!("{} failed with {}, expected {}", rejection.value, failure.tag(), rejection.tag));
                }
                if let Some(path) = &rejection.path {
                    if &failure.path_string() != path {
                        problems.push(format!("{} failed at {}, expected {path}", rejection.value, failure.path_string()));
                    }
                }
            }
        }
    }
    problems
}

fn load_fixture(path: &Path) -> Result<Fixture> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture {}", path.display()))?;
    shapecheck::path_de::from_str_with_path::<Fixture>(&source)
        .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))
}

fn main() -> Result<()> {
    let pattern = format!("{}/fixtures/*.json", env!("CARGO_MANIFEST_DIR"));
    let mut failed = 0;
    let mut total = 0;
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        let fixture = load_fixture(&path)?;
        total += 1;
        let problems = run_fixture(&fixture);
        if problems.is_empty() {
            eprintln!("{} {}", "✅".green(), fixture.name);
        } else {
            failed += 1;
            eprintln!("{} {}", "❌".red(), fixture.name);
            for problem in problems {
                eprintln!("    {problem}");
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {total} fixtures failed");
    }
    eprintln!("{}", format!("{total} fixtures passed").green().bold());
    Ok(())
}
