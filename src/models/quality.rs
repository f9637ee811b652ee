//! Recall-quality rating submitted at each review (0 = blackout, 5 = perfect).
use crate::error::SchedulerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_QUALITY: u8 = 0;
pub const MAX_QUALITY: u8 = 5;
/// Lowest rating that counts as a successful recall.
pub const PASSING_QUALITY: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Result<Self, SchedulerError> {
        if value > MAX_QUALITY {
            return Err(SchedulerError::InvalidQuality(format!(
                "{value} is outside {MIN_QUALITY}..={MAX_QUALITY}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_pass(self) -> bool {
        self.0 >= PASSING_QUALITY
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

impl TryFrom<i64> for Quality {
    type Error = SchedulerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| {
                SchedulerError::InvalidQuality(format!(
                    "{value} is outside {MIN_QUALITY}..={MAX_QUALITY}"
                ))
            })
            .and_then(Quality::new)
    }
}

impl TryFrom<f64> for Quality {
    type Error = SchedulerError;

    /// Fractional ratings are rejected rather than truncated.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(SchedulerError::InvalidQuality(format!(
                "{value} is not an integer rating"
            )));
        }
        if value < MIN_QUALITY as f64 || value > MAX_QUALITY as f64 {
            return Err(SchedulerError::InvalidQuality(format!(
                "{value} is outside {MIN_QUALITY}..={MAX_QUALITY}"
            )));
        }
        Ok(Self(value as u8))
    }
}

impl FromStr for Quality {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return Quality::try_from(value);
        }
        match trimmed.parse::<f64>() {
            Ok(value) => Quality::try_from(value),
            Err(_) => Err(SchedulerError::InvalidQuality(format!(
                "'{trimmed}' is not a number"
            ))),
        }
    }
}

/// Anything a caller may hand to the scheduler as a rating.
///
/// Validation happens here, at the boundary, so the scheduler only ever sees
/// a well-formed [`Quality`].
pub trait IntoQuality {
    fn into_quality(self) -> Result<Quality, SchedulerError>;
}

impl IntoQuality for Quality {
    fn into_quality(self) -> Result<Quality, SchedulerError> {
        Ok(self)
    }
}

impl IntoQuality for u8 {
    fn into_quality(self) -> Result<Quality, SchedulerError> {
        Quality::new(self)
    }
}

impl IntoQuality for i32 {
    fn into_quality(self) -> Result<Quality, SchedulerError> {
        Quality::try_from(i64::from(self))
    }
}

impl IntoQuality for i64 {
    fn into_quality(self) -> Result<Quality, SchedulerError> {
        Quality::try_from(self)
    }
}

impl IntoQuality for f64 {
    fn into_quality(self) -> Result<Quality, SchedulerError> {
        Quality::try_from(self)
    }
}

impl IntoQuality for &str {
    fn into_quality(self) -> Result<Quality, SchedulerError> {
        self.parse()
    }
}
