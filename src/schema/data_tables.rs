// src/schema/data_tables.rs

use chrono::NaiveDate;
use serde::Serialize;
use std::str::FromStr;

use super::static_tables::{Beaufort, Cardinal3, LocationName};
use super::{is_missing, ParseError};
use crate::units::{DayHours, Oktas, UDegree360, UPercent100, Uf32, UnitError};

/// Positional reader over one data row.
struct Cells<'a> {
    row: &'a [String],
}

impl<'a> Cells<'a> {
    fn new(row: &'a [String], columns: &[&str]) -> Result<Self, ParseError> {
        if row.len() < columns.len() {
            return Err(ParseError::WrongFieldCount {
                found: row.len(),
                expected: columns.len(),
            });
        }
        Ok(Self { row })
    }

    fn raw(&self, i: usize) -> Option<&'a str> {
        let cell = self.row[i].trim();
        (!is_missing(cell)).then_some(cell)
    }

    fn date(&self) -> Result<NaiveDate, ParseError> {
        let year: i32 = self.required(0, "DataYear")?;
        let month: u32 = self.required(1, "DataMonth")?;
        let day: u32 = self.required(2, "DataDay")?;
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(ParseError::InvalidDate { year, month, day })
    }

    fn required<T: FromStr>(&self, i: usize, column: &'static str) -> Result<T, ParseError> {
        self.number(i, column)?.ok_or(ParseError::Missing { column })
    }

    fn number<T: FromStr>(&self, i: usize, column: &'static str) -> Result<Option<T>, ParseError> {
        self.raw(i)
            .map(|v| {
                v.parse().map_err(|_| ParseError::InvalidNumber {
                    column,
                    value: v.to_string(),
                })
            })
            .transpose()
    }

    /// Whole-number columns sometimes carry a trailing `.0`.
    fn whole(&self, i: usize, column: &'static str) -> Result<Option<u32>, ParseError> {
        let Some(v) = self.raw(i) else {
            return Ok(None);
        };
        if let Ok(n) = v.parse::<u32>() {
            return Ok(Some(n));
        }
        match v.parse::<f64>() {
            Ok(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => Ok(Some(f as u32)),
            _ => Err(ParseError::InvalidNumber {
                column,
                value: v.to_string(),
            }),
        }
    }

    /// Rainfall, where `tr` records a trace amount.
    fn rainfall(&self, i: usize, column: &'static str) -> Result<Option<Uf32>, ParseError> {
        let value = match self.raw(i) {
            Some(v) if v.eq_ignore_ascii_case("tr") => Some(0.0_f32),
            _ => self.number::<f32>(i, column)?,
        };
        value.map(|v| checked(column, Uf32::try_from(v))).transpose()
    }

    fn bounded<U>(&self, i: usize, column: &'static str) -> Result<Option<U>, ParseError>
    where
        U: TryFrom<u32, Error = UnitError>,
    {
        self.whole(i, column)?
            .map(|v| checked(column, U::try_from(v)))
            .transpose()
    }

    fn label<T>(&self, i: usize, column: &'static str) -> Result<Option<T>, ParseError>
    where
        T: FromStr<Err = ParseError>,
    {
        self.raw(i)
            .map(|v| {
                v.parse().map_err(|e| ParseError::InvalidLabel {
                    column,
                    source: Box::new(e),
                })
            })
            .transpose()
    }
}

fn checked<T>(column: &'static str, r: Result<T, UnitError>) -> Result<T, ParseError> {
    r.map_err(|source| ParseError::OutOfRange { column, source })
}

/// One day of observations at a UK station.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LocalData {
    pub location: LocationName,
    pub date: NaiveDate,
    pub mean_air_temp_c: Option<f32>,
    pub total_rainfall_mm: Option<Uf32>,
    pub total_sunshine_hrs: Option<DayHours>,
    pub mean_windspeed_kn: Option<u32>,
    pub mean_windspeed_bft: Option<Beaufort>,
    pub max_gust_kn: Option<u32>,
    pub max_humidity_percent: Option<UPercent100>,
    pub mean_cloud_oktas: Option<Oktas>,
    pub mean_visibility_dm: Option<u32>,
    pub mean_pressure_hpa: Option<u32>,
    pub mean_wind_dir_deg: Option<UDegree360>,
    pub mean_wind_dir_cardinal: Option<Cardinal3>,
    pub max_gust_dir_deg: Option<UDegree360>,
    pub max_gust_dir_cardinal: Option<Cardinal3>,
}

impl LocalData {
    pub const COLUMNS: [&'static str; 17] = [
        "DataYear",
        "DataMonth",
        "DataDay",
        "MeanAirTempC",
        "TotalRainfallMm",
        "TotalSunshineHrs",
        "MeanWindspeedKn",
        "MeanWindspeedBft",
        "MaxGustKn",
        "MaxHumidityPercent",
        "MeanCloudOktas",
        "MeanVisibilityDm",
        "MeanPressureHpa",
        "MeanWindDirDeg",
        "MeanWindDirCardinal",
        "MaxGustDirDeg",
        "MaxGustDirCardinal",
    ];

    /// Parse a data row laid out in [`Self::COLUMNS`] order.
    pub fn from_row(location: LocationName, row: &[String]) -> Result<Self, ParseError> {
        let c = Cells::new(row, &Self::COLUMNS)?;
        let col = |i: usize| Self::COLUMNS[i];
        Ok(Self {
            location,
            date: c.date()?,
            mean_air_temp_c: c.number(3, col(3))?,
            total_rainfall_mm: c.rainfall(4, col(4))?,
            total_sunshine_hrs: c
                .number::<f32>(5, col(5))?
                .map(|v| checked(col(5), DayHours::try_from(v)))
                .transpose()?,
            mean_windspeed_kn: c.whole(6, col(6))?,
            mean_windspeed_bft: c.label(7, col(7))?,
            max_gust_kn: c.whole(8, col(8))?,
            max_humidity_percent: c.bounded(9, col(9))?,
            mean_cloud_oktas: c.bounded(10, col(10))?,
            mean_visibility_dm: c.whole(11, col(11))?,
            mean_pressure_hpa: c.whole(12, col(12))?,
            mean_wind_dir_deg: c.bounded(13, col(13))?,
            mean_wind_dir_cardinal: c.label(14, col(14))?,
            max_gust_dir_deg: c.bounded(15, col(15))?,
            max_gust_dir_cardinal: c.label(16, col(16))?,
        })
    }

    pub fn key(&self) -> (LocationName, NaiveDate) {
        (self.location, self.date)
    }
}

/// One day of observations at an overseas station, which reports fewer
/// quantities.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverseasData {
    pub location: LocationName,
    pub date: NaiveDate,
    pub mean_air_temp_c: Option<f32>,
    pub total_rainfall_mm: Option<Uf32>,
    pub mean_pressure_hpa: Option<u32>,
    pub mean_windspeed_kn: Option<u32>,
    pub mean_windspeed_bft: Option<Beaufort>,
}

impl OverseasData {
    pub const COLUMNS: [&'static str; 8] = [
        "DataYear",
        "DataMonth",
        "DataDay",
        "MeanAirTempC",
        "TotalRainfallMm",
        "MeanPressureHpa",
        "MeanWindspeedKn",
        "MeanWindspeedBft",
    ];

    pub fn from_row(location: LocationName, row: &[String]) -> Result<Self, ParseError> {
        let c = Cells::new(row, &Self::COLUMNS)?;
        let col = |i: usize| Self::COLUMNS[i];
        Ok(Self {
            location,
            date: c.date()?,
            mean_air_temp_c: c.number(3, col(3))?,
            total_rainfall_mm: c.rainfall(4, col(4))?,
            mean_pressure_hpa: c.whole(5, col(5))?,
            mean_windspeed_kn: c.whole(6, col(6))?,
            mean_windspeed_bft: c.label(7, col(7))?,
        })
    }

    pub fn key(&self) -> (LocationName, NaiveDate) {
        (self.location, self.date)
    }
}
