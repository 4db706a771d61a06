//! Chase arithmetic derived from a snapshot.
//!
//! Everything here is pure and total: zero denominators yield a rate of
//! `0.0`, which is also what a scorecard shows before the first ball.

use serde::Serialize;

use super::models::{MatchSnapshot, BALLS_PER_OVER};

/// Powerplay covers the first 6 overs.
const POWERPLAY_BALLS: u32 = 36;
/// Death overs start at over 15.
const DEATH_OVERS_BALLS: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub runs_left: i32,
    pub balls_left: i32,
    pub wickets_left: i32,
    pub current_run_rate: f64,
    pub required_run_rate: f64,
}

impl DerivedMetrics {
    pub fn compute(snapshot: &MatchSnapshot) -> Self {
        let runs_left = snapshot.runs_left();
        let balls_left = snapshot.balls_left();
        let balls_bowled = snapshot.overs.balls();

        let current_run_rate = if balls_bowled > 0 {
            snapshot.score as f64 / snapshot.overs.as_decimal()
        } else {
            0.0
        };
        let required_run_rate = if balls_left > 0 {
            runs_left as f64 * BALLS_PER_OVER as f64 / balls_left as f64
        } else {
            0.0
        };

        DerivedMetrics {
            runs_left,
            balls_left,
            wickets_left: snapshot.wickets_left(),
            current_run_rate,
            required_run_rate,
        }
    }

    /// Remaining overs as `(overs, balls)`; zero once the innings is spent.
    pub fn overs_remaining(&self) -> (i32, i32) {
        let balls = self.balls_left.max(0);
        (balls / BALLS_PER_OVER, balls % BALLS_PER_OVER)
    }
}

/// Display band for the asking rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunRateTier {
    Low,
    Medium,
    High,
}

impl RunRateTier {
    pub fn from_required_rate(rrr: f64) -> Self {
        if rrr > 12.0 {
            RunRateTier::High
        } else if rrr > 8.0 {
            RunRateTier::Medium
        } else {
            RunRateTier::Low
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RunRateTier::Low => "green",
            RunRateTier::Medium => "orange",
            RunRateTier::High => "red",
        }
    }
}

/// Display band for wickets in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WicketsTier {
    Comfortable,
    Moderate,
    Critical,
}

impl WicketsTier {
    pub fn from_wickets_left(wickets_left: i32) -> Self {
        if wickets_left > 5 {
            WicketsTier::Comfortable
        } else if wickets_left > 3 {
            WicketsTier::Moderate
        } else {
            WicketsTier::Critical
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            WicketsTier::Comfortable => "green",
            WicketsTier::Moderate => "orange",
            WicketsTier::Critical => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pressure {
    Low,
    Medium,
    High,
}

impl Pressure {
    pub fn from_required_rate(rrr: f64) -> Self {
        if rrr > 10.0 {
            Pressure::High
        } else if rrr > 7.0 {
            Pressure::Medium
        } else {
            Pressure::Low
        }
    }
}

/// Extra talking points shown alongside a live prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchInsights {
    pub pressure: Pressure,
    pub powerplay_active: bool,
    pub death_overs: bool,
    /// Runs needed per 100 balls
    pub required_strike_rate: f64,
    pub ahead_of_rate: bool,
}

impl MatchInsights {
    pub fn compute(snapshot: &MatchSnapshot, metrics: &DerivedMetrics) -> Self {
        let balls_bowled = snapshot.overs.balls();
        MatchInsights {
            pressure: Pressure::from_required_rate(metrics.required_run_rate),
            powerplay_active: balls_bowled < POWERPLAY_BALLS,
            death_overs: balls_bowled >= DEATH_OVERS_BALLS,
            required_strike_rate: metrics.required_run_rate * 100.0 / BALLS_PER_OVER as f64,
            ahead_of_rate: metrics.current_run_rate > metrics.required_run_rate,
        }
    }
}
