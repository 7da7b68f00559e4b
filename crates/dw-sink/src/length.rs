//! Absolute physical lengths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Length in English Metric Units (EMU), the base unit of office documents.
///
/// - 914,400 EMU = 1 inch
/// - 360,000 EMU = 1 centimeter
/// - 36,000 EMU = 1 millimeter
/// - 12,700 EMU = 1 point
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Length(i64);

impl Length {
    /// EMUs per inch.
    pub const EMUS_PER_INCH: i64 = 914_400;
    /// EMUs per centimeter.
    pub const EMUS_PER_CM: i64 = 360_000;
    /// EMUs per millimeter.
    pub const EMUS_PER_MM: i64 = 36_000;
    /// EMUs per point.
    pub const EMUS_PER_PT: i64 = 12_700;
    /// EMUs per CSS pixel (96 dpi).
    pub const EMUS_PER_PX: i64 = 9_525;

    /// Create a length from an EMU value.
    #[must_use]
    pub const fn new(emu: i64) -> Self {
        Self(emu)
    }

    /// Raw EMU value.
    #[must_use]
    pub const fn emu(self) -> i64 {
        self.0
    }

    /// Create a length from inches.
    #[must_use]
    pub fn from_inches(inches: f64) -> Self {
        Self::scaled(inches, Self::EMUS_PER_INCH)
    }

    /// Create a length from centimeters.
    #[must_use]
    pub fn from_cm(cm: f64) -> Self {
        Self::scaled(cm, Self::EMUS_PER_CM)
    }

    /// Create a length from millimeters.
    #[must_use]
    pub fn from_mm(mm: f64) -> Self {
        Self::scaled(mm, Self::EMUS_PER_MM)
    }

    /// Create a length from points.
    #[must_use]
    pub fn from_pt(pt: f64) -> Self {
        Self::scaled(pt, Self::EMUS_PER_PT)
    }

    /// Create a length from CSS pixels.
    #[must_use]
    pub fn from_px(px: f64) -> Self {
        Self::scaled(px, Self::EMUS_PER_PX)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn scaled(value: f64, per_unit: i64) -> Self {
        Self((value * per_unit as f64).round() as i64)
    }

    /// Value in inches.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn inches(self) -> f64 {
        self.0 as f64 / Self::EMUS_PER_INCH as f64
    }

    /// Value in centimeters.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cm(self) -> f64 {
        self.0 as f64 / Self::EMUS_PER_CM as f64
    }

    /// Split into `count` equal parts (integer division, as column widths do).
    #[must_use]
    pub fn divide(self, count: usize) -> Self {
        let count = i64::try_from(count.max(1)).unwrap_or(i64::MAX);
        Self(self.0 / count)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}emu", self.0)
    }
}

/// Error parsing a `<number><unit>` length string.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid length {value:?}: expected <number><unit> with unit in, cm, mm, pt or px")]
pub struct ParseLengthError {
    value: String,
}

impl FromStr for Length {
    type Err = ParseLengthError;

    /// Parse `"2in"`, `"3.5cm"`, `"12pt"`, `"40mm"` or `"300px"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLengthError {
            value: s.to_owned(),
        };
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(err)?;
        let (number, unit) = trimmed.split_at(split);
        let number: f64 = number.trim().parse().map_err(|_| err())?;
        if !number.is_finite() {
            return Err(err());
        }
        match unit.to_ascii_lowercase().as_str() {
            "in" => Ok(Self::from_inches(number)),
            "cm" => Ok(Self::from_cm(number)),
            "mm" => Ok(Self::from_mm(number)),
            "pt" => Ok(Self::from_pt(number)),
            "px" => Ok(Self::from_px(number)),
            _ => Err(err()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversions() {
        assert_eq!(Length::from_inches(1.0).emu(), 914_400);
        assert_eq!(Length::from_cm(2.5).emu(), 900_000);
        assert_eq!(Length::from_pt(1.0).emu(), 12_700);
        assert_eq!(Length::from_px(96.0), Length::from_inches(1.0));
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("2in".parse::<Length>().unwrap(), Length::from_inches(2.0));
        assert_eq!("3.5cm".parse::<Length>().unwrap(), Length::from_cm(3.5));
        assert_eq!(" 40 mm ".parse::<Length>().unwrap(), Length::from_mm(40.0));
        assert_eq!("12PT".parse::<Length>().unwrap(), Length::from_pt(12.0));
    }

    #[test]
    fn test_parse_rejects_relative_and_bare() {
        assert!("50%".parse::<Length>().is_err());
        assert!("120".parse::<Length>().is_err());
        assert!("3em".parse::<Length>().is_err());
        assert!("in".parse::<Length>().is_err());
    }

    #[test]
    fn test_divide() {
        assert_eq!(Length::new(10).divide(3), Length::new(3));
        assert_eq!(Length::new(10).divide(0), Length::new(10));
    }
}
