// src/schema/static_tables.rs
//! Lookup tables referenced by the daily records: location names, Beaufort
//! units and cardinal directions.

use serde::Serialize;
use std::{fmt, str::FromStr};

use super::ParseError;

/// Stations present in the data set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum LocationName {
    Beijing,
    Camborne,
    Heathrow,
    Hurn,
    Jacksonville,
    Leeming,
    Leuchars,
    Perth,
}

impl LocationName {
    pub const ALL: [LocationName; 8] = [
        LocationName::Beijing,
        LocationName::Camborne,
        LocationName::Heathrow,
        LocationName::Hurn,
        LocationName::Jacksonville,
        LocationName::Leeming,
        LocationName::Leuchars,
        LocationName::Perth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationName::Beijing => "Beijing",
            LocationName::Camborne => "Camborne",
            LocationName::Heathrow => "Heathrow",
            LocationName::Hurn => "Hurn",
            LocationName::Jacksonville => "Jacksonville",
            LocationName::Leeming => "Leeming",
            LocationName::Leuchars => "Leuchars",
            LocationName::Perth => "Perth",
        }
    }

    /// Overseas stations report the reduced column set.
    pub fn is_overseas(&self) -> bool {
        matches!(
            self,
            LocationName::Beijing | LocationName::Jacksonville | LocationName::Perth
        )
    }
}

impl fmt::Display for LocationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        LocationName::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownLocation(s.to_string()))
    }
}

/// A row of the LocationNames table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LocationRow {
    pub id: u32,
    pub name: LocationName,
}

/// The breeze categories of the Beaufort scale; the data only contains
/// these, never gales or storms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Beaufort {
    Calm,
    Light,
    Gentle,
    Moderate,
    Fresh,
    Strong,
}

impl Beaufort {
    /// Category for a mean wind speed in knots; `None` above a strong breeze.
    pub fn from_knots(knots: u32) -> Option<Self> {
        match knots {
            0 => Some(Beaufort::Calm),
            1..=6 => Some(Beaufort::Light),
            7..=10 => Some(Beaufort::Gentle),
            11..=16 => Some(Beaufort::Moderate),
            17..=21 => Some(Beaufort::Fresh),
            22..=27 => Some(Beaufort::Strong),
            _ => None,
        }
    }

    /// Lowest Beaufort force number in the category.
    pub fn force(&self) -> u8 {
        match self {
            Beaufort::Calm => 0,
            Beaufort::Light => 1,
            Beaufort::Gentle => 3,
            Beaufort::Moderate => 4,
            Beaufort::Fresh => 5,
            Beaufort::Strong => 6,
        }
    }
}

impl FromStr for Beaufort {
    type Err = ParseError;

    /// Accepts the bare label or the full phrase, e.g. `"Light"` or
    /// `"light breeze"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let first = s.split_whitespace().next().unwrap_or("").to_ascii_lowercase();
        match first.as_str() {
            "calm" => Ok(Beaufort::Calm),
            "light" => Ok(Beaufort::Light),
            "gentle" => Ok(Beaufort::Gentle),
            "moderate" => Ok(Beaufort::Moderate),
            "fresh" => Ok(Beaufort::Fresh),
            "strong" => Ok(Beaufort::Strong),
            _ => Err(ParseError::UnknownBeaufort(s.trim().to_string())),
        }
    }
}

/// A row of the BeaufortUnits table; `unit` is `None` for "n/a".
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BeaufortUnit {
    pub id: u32,
    pub unit: Option<Beaufort>,
}

impl BeaufortUnit {
    pub fn parse(id: u32, label: &str) -> Result<Self, ParseError> {
        let unit = match super::is_missing(label) {
            true => None,
            false => Some(label.parse()?),
        };
        Ok(Self { id, unit })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    N,
    S,
    E,
    W,
}

impl Direction {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Direction::N),
            'S' => Some(Direction::S),
            'E' => Some(Direction::E),
            'W' => Some(Direction::W),
            _ => None,
        }
    }

    fn as_char(&self) -> char {
        match self {
            Direction::N => 'N',
            Direction::S => 'S',
            Direction::E => 'E',
            Direction::W => 'W',
        }
    }
}

/// One to three compass letters, e.g. `N`, `SW`, `ESE`.
///
/// Logically invalid combinations such as `NS` or `EEE` are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Cardinal3(pub Direction, pub Option<Direction>, pub Option<Direction>);

impl FromStr for Cardinal3 {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ParseError::InvalidCardinal(trimmed.to_string());
        let dirs = trimmed
            .chars()
            .map(Direction::from_char)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;
        match dirs.as_slice() {
            [a] => Ok(Cardinal3(*a, None, None)),
            [a, b] => Ok(Cardinal3(*a, Some(*b), None)),
            [a, b, c] => Ok(Cardinal3(*a, Some(*b), Some(*c))),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Cardinal3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_char())?;
        for d in [self.1, self.2].into_iter().flatten() {
            write!(f, "{}", d.as_char())?;
        }
        Ok(())
    }
}

/// A row of the CardinalDirections table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardinalDirection {
    pub id: u32,
    pub direction: Cardinal3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_names_parse_case_insensitively() {
        assert_eq!("heathrow".parse::<LocationName>(), Ok(LocationName::Heathrow));
        assert_eq!(" PERTH ".parse::<LocationName>(), Ok(LocationName::Perth));
        assert!(LocationName::Perth.is_overseas());
        assert!(!LocationName::Leuchars.is_overseas());
        assert_eq!(
            "Gatwick".parse::<LocationName>(),
            Err(ParseError::UnknownLocation("Gatwick".into()))
        );
    }

    #[test]
    fn beaufort_labels_and_knots() {
        assert_eq!("Light".parse::<Beaufort>(), Ok(Beaufort::Light));
        assert_eq!("moderate breeze".parse::<Beaufort>(), Ok(Beaufort::Moderate));
        assert!("gale".parse::<Beaufort>().is_err());

        assert_eq!(Beaufort::from_knots(0), Some(Beaufort::Calm));
        assert_eq!(Beaufort::from_knots(12), Some(Beaufort::Moderate));
        assert_eq!(Beaufort::from_knots(40), None);
        assert_eq!(Beaufort::Gentle.force(), 3);
    }

    #[test]
    fn beaufort_unit_na_is_none() -> anyhow::Result<()> {
        assert_eq!(BeaufortUnit::parse(1, "n/a")?.unit, None);
        assert_eq!(BeaufortUnit::parse(2, "Fresh")?.unit, Some(Beaufort::Fresh));
        Ok(())
    }

    #[test]
    fn cardinal_directions() -> anyhow::Result<()> {
        let d: Cardinal3 = "ESE".parse()?;
        assert_eq!(d, Cardinal3(Direction::E, Some(Direction::S), Some(Direction::E)));
        assert_eq!(d.to_string(), "ESE");
        assert_eq!("n".parse::<Cardinal3>()?.to_string(), "N");
        assert_eq!("sw".parse::<Cardinal3>()?, Cardinal3(Direction::S, Some(Direction::W), None));

        assert!("".parse::<Cardinal3>().is_err());
        assert!("NNNE".parse::<Cardinal3>().is_err());
        assert!("NX".parse::<Cardinal3>().is_err());
        Ok(())
    }
}
