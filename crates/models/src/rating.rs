use std::fmt;

use serde::{Serialize, Serializer};

use crate::errors::ModelError;

/// Testimonial rating on a half-point scale from 0.5 to 5.
///
/// Stored as a count of half points so equality is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const MIN_HALVES: u8 = 1;
    pub const MAX_HALVES: u8 = 10;

    pub fn from_halves(halves: u8) -> Result<Self, ModelError> {
        if (Self::MIN_HALVES..=Self::MAX_HALVES).contains(&halves) {
            Ok(Self(halves))
        } else {
            Err(ModelError::InvalidRating(format!("{} half points", halves)))
        }
    }

    /// Every selectable rating, ascending: 0.5, 1, 1.5, ... 5.
    pub fn choices() -> impl Iterator<Item = Rating> {
        (Self::MIN_HALVES..=Self::MAX_HALVES).map(Rating)
    }

    pub fn halves(self) -> u8 { self.0 }

    pub fn value(self) -> f64 { f64::from(self.0) / 2.0 }
}

impl TryFrom<f64> for Rating {
    type Error = ModelError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let doubled = value * 2.0;
        if !doubled.is_finite() || doubled.fract() != 0.0 || doubled < 0.0 || doubled > 255.0 {
            return Err(ModelError::InvalidRating(value.to_string()));
        }
        Self::from_halves(doubled as u8)
    }
}

impl std::str::FromStr for Rating {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.trim().parse().map_err(|_| ModelError::InvalidRating(s.to_string()))?;
        Self::try_from(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 2 == 0 {
            serializer.serialize_u8(self.0 / 2)
        } else {
            serializer.serialize_f64(self.value())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_cover_half_point_scale() {
        let labels: Vec<String> = Rating::choices().map(|r| r.to_string()).collect();
        assert_eq!(labels, ["0.5", "1", "1.5", "2", "2.5", "3", "3.5", "4", "4.5", "5"]);
    }

    #[test]
    fn rejects_off_scale_values() {
        assert!(Rating::try_from(0.0).is_err());
        assert!(Rating::try_from(5.5).is_err());
        assert!(Rating::try_from(3.25).is_err());
        assert!(Rating::try_from(-1.0).is_err());
        assert!(Rating::try_from(f64::NAN).is_err());
        assert_eq!(Rating::try_from(4.5).unwrap().halves(), 9);
    }

    #[test]
    fn parses_select_values() {
        assert_eq!("2.5".parse::<Rating>().unwrap().value(), 2.5);
        assert!("".parse::<Rating>().is_err());
    }

    #[test]
    fn serializes_as_json_number() {
        assert_eq!(serde_json::to_string(&Rating::try_from(4.0).unwrap()).unwrap(), "4");
        assert_eq!(serde_json::to_string(&Rating::try_from(3.5).unwrap()).unwrap(), "3.5");
    }
}
