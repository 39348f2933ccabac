// src/main.rs

use anyhow::Result;
use lds_ingest::{
    classify_and_emit, drain,
    layout::RowLayout,
    sink::WriterSink,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const DATASET: &str = "heathrow";

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    // stdout carries the emissions, so logs go to stderr
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) classify the station file ────────────────────────────────
    let path = PathBuf::from("data").join(format!("{}.csv", DATASET));
    info!(path = %path.display(), "reading station file");
    let rows = classify_and_emit(&path, RowLayout::lds())?;

    // ─── 3) print header values ──────────────────────────────────────
    let mut sink = WriterSink::stdout();
    let emitted = drain(rows, &mut sink)?;
    info!(emitted, "done");
    Ok(())
}
