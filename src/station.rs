// src/station.rs

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

use crate::classify::{classify_and_emit, ClassifiedRow, Emission};
use crate::layout::{HeaderField, RowLayout};

static ALTITUDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(-?\d+(?:\.\d+)?)\s*m(?:etres|eters)?\b").unwrap());
static LATITUDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*°?\s*([NS])\b").unwrap());

/// The positional header block of a station file.
///
/// Every field is optional; a truncated file just leaves the later ones unset.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StationHeader {
    pub name: Option<String>,
    pub grid_reference: Option<String>,
    pub altitude: Option<String>,
    pub latitude: Option<String>,
    pub column_names: Option<Vec<String>>,
}

impl StationHeader {
    /// Fold classifier output into a header, reading no further than the
    /// layout's last mapped row.
    pub fn from_emissions<I>(rows: I, layout: &RowLayout) -> Result<Self>
    where
        I: IntoIterator<Item = Result<ClassifiedRow>>,
    {
        let mut header = StationHeader::default();
        let last = match layout.last_index() {
            Some(i) => i,
            None => return Ok(header),
        };

        for row in rows {
            let row = row?;
            match (layout.field_at(row.index), row.emission) {
                (Some(HeaderField::Name), Emission::Value(v)) => header.name = Some(v),
                (Some(HeaderField::GridReference), Emission::Value(v)) => {
                    header.grid_reference = Some(v)
                }
                (Some(HeaderField::Altitude), Emission::Value(v)) => header.altitude = Some(v),
                (Some(HeaderField::Latitude), Emission::Value(v)) => header.latitude = Some(v),
                (Some(HeaderField::ColumnNames), Emission::Row(cols)) => {
                    header.column_names = Some(cols)
                }
                (Some(field), other) => {
                    warn!(index = row.index, %field, ?other, "unexpected emission for header field")
                }
                (None, _) => {}
            }
            if row.index >= last {
                break;
            }
        }
        Ok(header)
    }

    /// Altitude in metres, e.g. `"25m"`, `"Altitude: 25 metres"`.
    pub fn altitude_metres(&self) -> Option<f64> {
        let raw = self.altitude.as_deref()?;
        let caps = ALTITUDE_RE.captures(raw)?;
        caps[1].parse().ok()
    }

    /// Signed latitude in degrees, south negative, e.g. `"51.48N"`.
    pub fn latitude_degrees(&self) -> Option<f64> {
        let raw = self.latitude.as_deref()?;
        let caps = LATITUDE_RE.captures(raw)?;
        let deg: f64 = caps[1].parse().ok()?;
        if deg > 90.0 {
            return None;
        }
        match caps[2].to_ascii_uppercase().as_str() {
            "S" => Some(-deg),
            _ => Some(deg),
        }
    }

    /// Case-insensitive position of a data column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names
            .as_ref()?
            .iter()
            .position(|c| c.trim().eq_ignore_ascii_case(name.trim()))
    }
}

/// Read the header block of a station file with the default layout.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_station_header<P: AsRef<Path>>(path: P) -> Result<StationHeader> {
    let layout = RowLayout::lds();
    let rows = classify_and_emit(path, layout.clone())?;
    let header = StationHeader::from_emissions(rows, &layout)?;
    debug!(name = ?header.name, "header read");
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_rows;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn header_from(content: &str) -> Result<StationHeader> {
        let layout = RowLayout::lds();
        let rows = classify_rows(Cursor::new(content.to_string()), layout.clone());
        StationHeader::from_emissions(rows, &layout)
    }

    #[test]
    fn reads_heathrow_header() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(b"Heathrow\nTQ0377\n25m\n51.48N\n\nYear,Month,Day,Temp\n1987,5,1,18.2\n")?;

        let header = read_station_header(tmp.path())?;
        assert_eq!(header.name.as_deref(), Some("Heathrow"));
        assert_eq!(header.grid_reference.as_deref(), Some("TQ0377"));
        assert_eq!(header.altitude_metres(), Some(25.0));
        assert_eq!(header.latitude_degrees(), Some(51.48));
        assert_eq!(header.column_index("temp"), Some(3));
        assert_eq!(header.column_index("Wind"), None);
        Ok(())
    }

    #[test]
    fn reads_bundled_sample() -> Result<()> {
        let header = read_station_header("data/heathrow.csv")?;
        assert_eq!(header.name.as_deref(), Some("Heathrow"));
        assert_eq!(header.altitude_metres(), Some(25.0));
        assert_eq!(header.latitude_degrees(), Some(51.479));
        assert_eq!(header.column_index("MaxGustDirCardinal"), Some(16));
        Ok(())
    }

    #[test]
    fn stops_after_last_header_row() -> Result<()> {
        // row 6 is not valid UTF-8 and would fail if it were read
        let mut content = b"Hurn\nSZ 114 978\n10m\n50.78N\n\nDate\n".to_vec();
        content.extend_from_slice(b"\xff\xfe\n");
        let layout = RowLayout::lds();
        let header =
            StationHeader::from_emissions(classify_rows(Cursor::new(content), layout.clone()), &layout)?;
        assert_eq!(header.column_names, Some(vec!["Date".to_string()]));
        Ok(())
    }

    #[test]
    fn short_file_leaves_fields_unset() -> Result<()> {
        let header = header_from("Perth\n")?;
        assert_eq!(header.name.as_deref(), Some("Perth"));
        assert!(header.latitude.is_none());
        assert!(header.column_names.is_none());
        assert_eq!(header.latitude_degrees(), None);
        Ok(())
    }

    #[test]
    fn parses_altitude_and_latitude_variants() {
        let mut h = StationHeader {
            altitude: Some("Altitude: 87 metres".into()),
            latitude: Some("Lat 31.93° S".into()),
            ..Default::default()
        };
        assert_eq!(h.altitude_metres(), Some(87.0));
        assert_eq!(h.latitude_degrees(), Some(-31.93));

        h.altitude = Some("unknown".into());
        h.latitude = Some("95N".into());
        assert_eq!(h.altitude_metres(), None);
        assert_eq!(h.latitude_degrees(), None);
    }
}
