use std::fmt::Display;
use std::ops::{Div, Mul};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Simulation time in whole seconds. All grids, lifetimes and event times use this unit.
#[derive(
    Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct TimeS(pub u64);

impl Display for TimeS {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TimeS {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let secs = s.parse::<u64>()?;
        Ok(Self(secs))
    }
}

impl From<u64> for TimeS {
    fn from(f: u64) -> Self {
        Self(f)
    }
}

impl TimeS {
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    pub fn as_minutes(&self) -> f64 {
        self.0 as f64 / SECONDS_PER_MINUTE
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Mul<u64> for TimeS {
    type Output = Self;

    fn mul(self, rhs: u64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Div for TimeS {
    type Output = u64;

    fn div(self, rhs: Self) -> Self::Output {
        self.0 / rhs.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_follow_seconds() {
        assert_eq!(TimeS::from(90u64).as_minutes(), 1.5);
        assert_eq!(TimeS::from(600u64) / TimeS::from(60u64), 10);
        assert_eq!(TimeS::from(60u64) * 3, TimeS::from(180u64));
    }

    #[test]
    fn parse_from_text() {
        assert_eq!("3600".parse::<TimeS>(), Ok(TimeS(3600)));
        assert!("-1".parse::<TimeS>().is_err());
    }
}
