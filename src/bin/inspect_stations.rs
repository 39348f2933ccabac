// src/bin/inspect_stations.rs
//
// Summarise the header block of every station file under `data/`.

use anyhow::{Context, Result};
use glob::glob;
use lds_ingest::{read_station_header, schema::LocationName};
use serde_json::json;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let pattern = "data/*.csv";
    let paths: Vec<PathBuf> = glob(pattern)
        .with_context(|| format!("Failed to read glob pattern '{}'", pattern))?
        .filter_map(|entry| entry.ok())
        .collect();
    if paths.is_empty() {
        return Err(anyhow::anyhow!("No station files found under '{}'", pattern));
    }
    info!(files = paths.len(), "inspecting station files");

    let mut failed = 0;
    for path in &paths {
        let header = match read_station_header(path) {
            Ok(h) => h,
            Err(e) => {
                error!(path = %path.display(), "failed to read header: {:#}", e);
                failed += 1;
                continue;
            }
        };

        let location = header
            .name
            .as_deref()
            .and_then(|n| n.parse::<LocationName>().ok());
        if location.is_none() {
            warn!(path = %path.display(), name = ?header.name, "unrecognised station name");
        }

        let summary = json!({
            "file": path.display().to_string(),
            "station": header.name,
            "overseas": location.map(|l| l.is_overseas()),
            "grid_reference": header.grid_reference,
            "altitude_m": header.altitude_metres(),
            "latitude_deg": header.latitude_degrees(),
            "columns": header.column_names.as_ref().map(|c| c.len()),
        });
        println!("{}", summary);
    }

    info!(ok = paths.len() - failed, failed, "done");
    Ok(())
}
