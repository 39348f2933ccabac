// src/units.rs
//! Range-checked wrappers for the measured quantities in a station file.
//! Each is built with `TryFrom` and unwrapped with `From`; the inner value
//! is private so it can't be changed after the check.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum UnitError {
    #[error("{0} is negative")]
    Negative(f32),
    #[error("{0} is not between 0 and 24 hours")]
    HoursNotInDay(f32),
    #[error("{0} is not a whole percentage (0-100)")]
    PercentageOutOfRange(u32),
    #[error("{0} is not an okta (0-8)")]
    NotAnOkta(u32),
    #[error("{0} is not a whole degree value (0-360)")]
    NotADegree(u32),
}

macro_rules! bounded {
    ($(#[$meta:meta])* $name:ident, $inner:ty, $range:expr, $err:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
        #[serde(transparent)]
        pub struct $name {
            value: $inner,
        }

        impl TryFrom<$inner> for $name {
            type Error = UnitError;

            fn try_from(value: $inner) -> Result<Self, Self::Error> {
                if ($range).contains(&value) {
                    Ok(Self { value })
                } else {
                    Err(UnitError::$err(value))
                }
            }
        }

        impl From<$name> for $inner {
            fn from(v: $name) -> Self {
                v.value
            }
        }
    };
}

bounded!(
    /// A finite float known to be `>= 0`; NaN and infinity are rejected.
    Uf32,
    f32,
    0_f32..=f32::MAX,
    Negative
);
bounded!(
    /// Hours within a single day, e.g. total sunshine.
    DayHours,
    f32,
    0_f32..=24_f32,
    HoursNotInDay
);
bounded!(UPercent100, u32, 0_u32..=100_u32, PercentageOutOfRange);
bounded!(
    /// Cloud cover in eighths of the sky.
    Oktas,
    u32,
    0_u32..=8_u32,
    NotAnOkta
);
bounded!(UDegree360, u32, 0_u32..=360_u32, NotADegree);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_values_in_range() {
        assert_eq!(f32::from(Uf32::try_from(29.5678_f32).unwrap()), 29.5678);
        assert_eq!(f32::from(DayHours::try_from(24.0_f32).unwrap()), 24.0);
        assert_eq!(u32::from(UPercent100::try_from(100_u32).unwrap()), 100);
        assert_eq!(u32::from(Oktas::try_from(0_u32).unwrap()), 0);
        assert_eq!(u32::from(UDegree360::try_from(360_u32).unwrap()), 360);
    }

    #[test]
    fn rejects_values_out_of_range() {
        assert_eq!(Uf32::try_from(-394.34_f32), Err(UnitError::Negative(-394.34)));
        assert!(Uf32::try_from(f32::NAN).is_err());
        assert!(Uf32::try_from(f32::INFINITY).is_err());
        assert_eq!(
            DayHours::try_from(24.5_f32),
            Err(UnitError::HoursNotInDay(24.5))
        );
        assert_eq!(
            UPercent100::try_from(101_u32),
            Err(UnitError::PercentageOutOfRange(101))
        );
        assert_eq!(Oktas::try_from(9_u32), Err(UnitError::NotAnOkta(9)));
        assert_eq!(UDegree360::try_from(361_u32), Err(UnitError::NotADegree(361)));
    }

    #[test]
    fn error_messages() {
        assert_eq!(UnitError::NotAnOkta(9).to_string(), "9 is not an okta (0-8)");
    }
}
