use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::catalog;

/// Balls in a T20 innings (20 overs × 6 balls).
pub const BALLS_PER_INNINGS: i32 = 120;
pub const BALLS_PER_OVER: i32 = 6;
pub const MAX_OVERS: i32 = 20;
pub const MAX_WICKETS: i32 = 10;

/// Rejected raw input. Same-team selection is not here: that is
/// reported by [`super::validator::classify`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("unknown team: {0}")]
    UnknownTeam(String),
    #[error("unknown city: {0}")]
    UnknownCity(String),
    #[error("target must be at least 1 (got {0})")]
    InvalidTarget(i64),
    #[error("score must be a non-negative run count (got {0})")]
    NegativeScore(i64),
    #[error("wickets lost must be between 0 and 10 (got {0})")]
    InvalidWickets(i64),
    #[error("overs must be between 0.0 and 20.0 (got {0})")]
    OversOutOfRange(f64),
    #[error("invalid overs value {0}: balls within an over must be .0 to .5")]
    InvalidBalls(f64),
    #[error("overs must be a number like 12.3 (got {0:?})")]
    MalformedOvers(String),
}

/// Overs completed, held as whole balls bowled.
///
/// Cricket writes overs as `overs.balls`, so `12.3` is 12 overs and
/// 3 balls (75 balls), not 12.3 decimal overs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Overs {
    balls: u32,
}

impl Overs {
    pub fn from_balls(balls: u32) -> Self {
        Overs { balls }
    }

    /// Parse the `overs.balls` notation used on scorecards.
    pub fn from_notation(value: f64) -> Result<Self, InputError> {
        if !value.is_finite() || value < 0.0 || value > MAX_OVERS as f64 {
            return Err(InputError::OversOutOfRange(value));
        }
        let tenths = (value * 10.0).round();
        if (tenths - value * 10.0).abs() > 1e-6 {
            return Err(InputError::InvalidBalls(value));
        }
        let tenths = tenths as u32;
        let (whole, part) = (tenths / 10, tenths % 10);
        if part >= BALLS_PER_OVER as u32 {
            return Err(InputError::InvalidBalls(value));
        }
        let balls = whole * BALLS_PER_OVER as u32 + part;
        if balls > BALLS_PER_INNINGS as u32 {
            return Err(InputError::OversOutOfRange(value));
        }
        Ok(Overs { balls })
    }

    pub fn balls(&self) -> u32 {
        self.balls
    }

    pub fn whole_overs(&self) -> u32 {
        self.balls / BALLS_PER_OVER as u32
    }

    pub fn balls_in_over(&self) -> u32 {
        self.balls % BALLS_PER_OVER as u32
    }

    /// Overs as a real number for rate arithmetic (75 balls → 12.5).
    pub fn as_decimal(&self) -> f64 {
        self.balls as f64 / BALLS_PER_OVER as f64
    }

    /// Back to scorecard notation (75 balls → 12.3).
    pub fn as_notation(&self) -> f64 {
        self.whole_overs() as f64 + self.balls_in_over() as f64 / 10.0
    }
}

impl fmt::Display for Overs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.whole_overs(), self.balls_in_over())
    }
}

impl FromStr for Overs {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| InputError::MalformedOvers(s.to_string()))?;
        Overs::from_notation(value)
    }
}

impl TryFrom<f64> for Overs {
    type Error = InputError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Overs::from_notation(value)
    }
}

impl From<Overs> for f64 {
    fn from(overs: Overs) -> f64 {
        overs.as_notation()
    }
}

/// Raw match state as entered by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchInput {
    pub batting_team: String,
    pub bowling_team: String,
    pub city: String,
    pub target: i64,
    pub score: i64,
    /// Wickets lost so far
    pub wickets: i64,
    /// Overs completed in `overs.balls` notation
    pub overs: f64,
}

impl MatchInput {
    /// Range-check the raw fields and build a snapshot.
    pub fn into_snapshot(self) -> Result<MatchSnapshot, InputError> {
        let batting_team = catalog::canonical_team(&self.batting_team)
            .ok_or_else(|| InputError::UnknownTeam(self.batting_team.clone()))?;
        let bowling_team = catalog::canonical_team(&self.bowling_team)
            .ok_or_else(|| InputError::UnknownTeam(self.bowling_team.clone()))?;
        let city = catalog::canonical_city(&self.city)
            .ok_or_else(|| InputError::UnknownCity(self.city.clone()))?;

        if self.target < 1 || self.target > i32::MAX as i64 {
            return Err(InputError::InvalidTarget(self.target));
        }
        if self.score < 0 || self.score > i32::MAX as i64 {
            return Err(InputError::NegativeScore(self.score));
        }
        if !(0..=MAX_WICKETS as i64).contains(&self.wickets) {
            return Err(InputError::InvalidWickets(self.wickets));
        }
        let overs = Overs::from_notation(self.overs)?;

        Ok(MatchSnapshot {
            batting_team: batting_team.to_string(),
            bowling_team: bowling_team.to_string(),
            city: city.to_string(),
            target: self.target as i32,
            score: self.score as i32,
            wickets_lost: self.wickets as i32,
            overs,
        })
    }
}

/// Validated state of one chase at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub batting_team: String,
    pub bowling_team: String,
    pub city: String,
    pub target: i32,
    pub score: i32,
    pub wickets_lost: i32,
    pub overs: Overs,
}

impl MatchSnapshot {
    pub fn runs_left(&self) -> i32 {
        self.target - self.score
    }

    /// Negative when more than 120 balls were recorded; left unclamped.
    pub fn balls_left(&self) -> i32 {
        BALLS_PER_INNINGS - self.overs.balls() as i32
    }

    pub fn wickets_left(&self) -> i32 {
        MAX_WICKETS - self.wickets_lost
    }
}
