// src/bin/generate_sample.rs
//
// Writes a synthetic station file in the fixed layout to
// `data/sample_heathrow.csv`. The bundled `data/heathrow.csv` is left alone.

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate};
use lds_ingest::schema::{Beaufort, LocalData};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Minimal deterministic PRNG (splitmix64)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + unit * (hi - lo)
    }

    fn below(&mut self, n: u32) -> u32 {
        (self.next_u64() % n as u64) as u32
    }
}

fn sample_row(date: NaiveDate, rng: &mut SimpleRng) -> Vec<String> {
    let season = ((date.ordinal() as f64 - 15.0) / 365.0 * std::f64::consts::TAU).cos();
    let temp = 11.0 - 6.0 * season + rng.range(-3.0, 3.0);
    let rain = match rng.below(4) {
        0 => "tr".to_string(),
        1 => format!("{:.1}", rng.range(0.2, 18.0)),
        _ => "0".to_string(),
    };
    let wind_kn = rng.below(20);
    let bft = Beaufort::from_knots(wind_kn)
        .map(|b| format!("{:?}", b))
        .unwrap_or_else(|| "n/a".to_string());
    let wind_dir = rng.below(16);
    let gust_dir = (wind_dir + rng.below(3)) % 16;

    vec![
        date.year().to_string(),
        date.month().to_string(),
        date.day().to_string(),
        format!("{:.1}", temp),
        rain,
        format!("{:.1}", rng.range(0.0, 15.0)),
        wind_kn.to_string(),
        bft,
        (wind_kn + 5 + rng.below(15)).to_string(),
        (70 + rng.below(31)).to_string(),
        rng.below(9).to_string(),
        (500 + rng.below(4000)).to_string(),
        (990 + rng.below(40)).to_string(),
        (wind_dir * 45 / 2).to_string(),
        COMPASS[wind_dir as usize].to_string(),
        (gust_dir * 45 / 2).to_string(),
        COMPASS[gust_dir as usize].to_string(),
    ]
}

/// Header block followed by the column row and `days` daily rows from `start`.
fn write_sample(path: &Path, start: NaiveDate, days: i64, seed: u64) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);

    // header block: name, NGR, altitude, latitude, blank separator
    for line in ["Heathrow", "TQ 077 767", "25m", "51.479N", ""] {
        writeln!(out, "{}", line)?;
    }

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    wtr.write_record(LocalData::COLUMNS)?;

    let mut rng = SimpleRng::new(seed);
    for offset in 0..days {
        let date = start + Duration::days(offset);
        wtr.write_record(sample_row(date, &mut rng))?;
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let out_dir = Path::new("data");
    fs::create_dir_all(out_dir).context("creating data directory")?;
    let path = out_dir.join("sample_heathrow.csv");

    let start = NaiveDate::from_ymd_opt(1987, 5, 1).context("invalid start date")?;
    let days = 184;
    write_sample(&path, start, days, 42)?;

    info!(path = %path.display(), rows = days, "sample written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lds_ingest::classify::{CsvLineDecoder, RowDecoder};
    use lds_ingest::schema::LocationName;
    use lds_ingest::{classify_and_emit, Emission, RowLayout};
    use tempfile::tempdir;

    #[test]
    fn sample_header_classifies_as_station_header() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("sample.csv");
        let start = NaiveDate::from_ymd_opt(1987, 5, 1).context("start")?;
        write_sample(&path, start, 10, 42)?;

        let emitted: Vec<Emission> = classify_and_emit(&path, RowLayout::lds())?
            .map(|r| r.map(|row| row.emission))
            .filter(|e| !matches!(e, Ok(Emission::Skipped)))
            .collect::<Result<_>>()?;
        let columns = LocalData::COLUMNS.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            emitted,
            vec![
                Emission::Value("Heathrow".into()),
                Emission::Value("TQ 077 767".into()),
                Emission::Value("25m".into()),
                Emission::Value("51.479N".into()),
                Emission::Row(columns),
            ]
        );
        Ok(())
    }

    #[test]
    fn every_sample_row_parses_as_local_data() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("sample.csv");
        let start = NaiveDate::from_ymd_opt(1987, 5, 1).context("start")?;
        write_sample(&path, start, 184, 42)?;

        let text = fs::read_to_string(&path)?;
        let mut parsed = Vec::new();
        for line in text.lines().skip(6) {
            let row = CsvLineDecoder.decode(line)?;
            parsed.push(LocalData::from_row(LocationName::Heathrow, &row)?);
        }
        assert_eq!(parsed.len(), 184);
        assert_eq!(parsed[0].date, start);
        assert_eq!(parsed[183].date, start + Duration::days(183));
        Ok(())
    }

    #[test]
    fn same_seed_gives_same_rows() {
        let date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let a = sample_row(date, &mut SimpleRng::new(7));
        let b = sample_row(date, &mut SimpleRng::new(7));
        assert_eq!(a, b);
        assert_eq!(a.len(), LocalData::COLUMNS.len());
    }
}
