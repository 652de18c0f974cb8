use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// How long a pair of flipped cards stays face up before the match is checked, in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FlipDuration(u32);

impl FlipDuration {
    pub const MIN: Self = Self(350);
    pub const MAX: Self = Self(3000);
    pub const FALLBACK: Self = Self::MIN;

    pub fn from_millis(millis: f64) -> Result<Self> {
        if millis.is_finite() && (Self::MIN.0 as f64..=Self::MAX.0 as f64).contains(&millis) {
            Ok(Self(millis as u32))
        } else {
            Err(GameError::InvalidFlipDuration)
        }
    }

    /// Parses and validates a user supplied duration, any failure yields the fallback and the error to report.
    pub fn or_fallback(raw: &str) -> (Self, Option<GameError>) {
        match raw.parse() {
            Ok(duration) => (duration, None),
            Err(err) => {
                log::warn!("rejected flip duration {:?}, using {}", raw, Self::FALLBACK);
                (Self::FALLBACK, Some(err))
            }
        }
    }

    pub const fn as_millis(self) -> u32 {
        self.0
    }
}

impl Default for FlipDuration {
    fn default() -> Self {
        Self(500)
    }
}

impl FromStr for FlipDuration {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let millis: f64 = s
            .trim()
            .parse()
            .map_err(|_| GameError::InvalidFlipDuration)?;
        Self::from_millis(millis)
    }
}

impl fmt::Display for FlipDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_short_is_replaced_by_fallback() {
        let (duration, err) = FlipDuration::or_fallback("100");
        assert_eq!(duration.as_millis(), 350);
        assert_eq!(err, Some(GameError::InvalidFlipDuration));
    }

    #[test]
    fn in_range_is_kept() {
        let (duration, err) = FlipDuration::or_fallback("1000");
        assert_eq!(duration.as_millis(), 1000);
        assert_eq!(err, None);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(FlipDuration::from_millis(350.0), Ok(FlipDuration::MIN));
        assert_eq!(FlipDuration::from_millis(3000.0), Ok(FlipDuration::MAX));
        assert!(FlipDuration::from_millis(3000.5).is_err());
        assert!(FlipDuration::from_millis(349.9).is_err());
    }

    #[test]
    fn non_numeric_is_rejected() {
        assert_eq!(
            "soon".parse::<FlipDuration>(),
            Err(GameError::InvalidFlipDuration)
        );
        assert_eq!(FlipDuration::from_millis(f64::NAN), Err(GameError::InvalidFlipDuration));
        assert_eq!(FlipDuration::or_fallback("").0, FlipDuration::FALLBACK);
    }
}
