use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::Context;
use mediadash_core::AppConfig;
use mediadash_pipeline::{generate_demo, DemoOptions};

/// Write a synthetic dataset to `out`, or stdout when `out` is `None`.
///
/// Unset `rows`/`seed` fall back to the configured demo defaults.
///
/// # Errors
///
/// Returns an error if the output file cannot be created or written.
pub(crate) fn run_demo(
    config: &AppConfig,
    rows: Option<usize>,
    seed: Option<u64>,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let options = DemoOptions {
        rows: rows.unwrap_or(config.demo_rows),
        seed: seed.or(config.demo_seed),
        ..DemoOptions::default()
    };
    let table = generate_demo(&options);

    match out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            table
                .write_csv(file)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), rows = table.len(), "demo dataset written");
        }
        None => table
            .write_csv(io::stdout().lock())
            .context("failed to write demo dataset to stdout")?,
    }

    Ok(())
}
