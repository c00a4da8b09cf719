//! Loading the fund universe.
//!
//! The universe is read once per process and treated as read-only afterwards.
//! Delimited-text files use the header `scheme_name,risk_bucket,returns_5yr,sharpe,standard_deviation`.

use crate::domain::fund::Fund;
use crate::engine::score::ScoredUniverse;
use anyhow::Context;
use std::io::Read;
use std::path::Path;

pub fn read_funds_csv<R: Read>(reader: R) -> anyhow::Result<Vec<Fund>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut out = Vec::new();
    for (i, row) in rdr.deserialize::<Fund>().enumerate() {
        // Header is line 1.
        let fund = row.with_context(|| format!("invalid fund row at line {}", i + 2))?;
        out.push(fund);
    }
    Ok(out)
}

pub fn read_funds_json(text: &str) -> anyhow::Result<Vec<Fund>> {
    serde_json::from_str::<Vec<Fund>>(text).context("fund universe is not a valid JSON array")
}

/// Loads and scores the universe at `path`. `.json` files are parsed as a JSON
/// array; anything else as delimited text.
pub fn load_scored_universe(path: &Path) -> anyhow::Result<ScoredUniverse> {
    let t0 = std::time::Instant::now();

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let funds = if is_json {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fund universe {}", path.display()))?;
        read_funds_json(&text)?
    } else {
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open fund universe {}", path.display()))?;
        read_funds_csv(file)?
    };

    let funds_len = funds.len();
    let universe = ScoredUniverse::build(funds)
        .with_context(|| format!("failed to score fund universe {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        funds_len,
        elapsed_ms = t0.elapsed().as_millis(),
        "loaded fund universe"
    );
    Ok(universe)
}
