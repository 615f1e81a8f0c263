use std::env;
use std::fs;
use std::process::ExitCode;

use anyhow::{bail, Context};
use tracing::{info, warn, Level};

use offer_scout::diff;
use offer_scout::parsers;

fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let args: Vec<String> = env::args().collect();
    let [source, body_path, uri] = match args.get(1..4) {
        Some([a, b, c]) => [a, b, c],
        _ => {
            eprintln!("Usage: offer-scout <source> <body-file> <uri> [expected-json]");
            return Ok(ExitCode::from(2));
        }
    };
    let expected_path = args.get(4);

    let Some(parser) = parsers::by_source(source)? else {
        bail!("no parser registered for source \"{source}\"");
    };

    let body = fs::read_to_string(body_path)
        .with_context(|| format!("failed to read body from {body_path}"))?;

    info!("🏠 Parsing {} offer from {}", parser.source(), body_path);
    let record = parser.parse(&body, uri)?;
    println!("{}", serde_json::to_string_pretty(&record)?);

    // With a golden file, verify the parsed record against it and fail on
    // any difference.
    if let Some(expected_path) = expected_path {
        let expected: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(expected_path)
                .with_context(|| format!("failed to read expected record from {expected_path}"))?,
        )
        .context("expected record is not valid JSON")?;

        let result = diff::compare(&serde_json::to_value(&record)?, &expected);
        for path in &result.missing {
            warn!("missing field in actual record: {path}");
        }
        for mismatch in &result.mismatches {
            warn!(
                "{} = \"{}\". Should be: \"{}\"",
                mismatch.path,
                diff::render(&mismatch.actual),
                diff::render(&mismatch.expected)
            );
        }
        if !result.is_empty() {
            warn!("❌ Actual record is different than expected");
            return Ok(ExitCode::FAILURE);
        }
        info!("✅ Actual record equals expected record");
    }

    Ok(ExitCode::SUCCESS)
}
