use serde::Serialize;
use thiserror::Error;

use super::models::MatchSnapshot;

/// The selection cannot be predicted at all. Recoverable by the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please select different teams: {0} cannot bat and bowl")]
    SameTeams(String),
}

/// Where the chase stands before any prediction is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Tied,
    BattingTeamWins,
    BowlingTeamWins,
    Live,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Live)
    }

    /// Informational line for a decided match; `None` while live.
    pub fn message(&self, snapshot: &MatchSnapshot) -> Option<String> {
        match self {
            Outcome::Tied => Some("Match tied! Both teams have the same score.".to_string()),
            Outcome::BowlingTeamWins => Some(format!(
                "{} wins! Batting side fell short.",
                snapshot.bowling_team
            )),
            Outcome::BattingTeamWins => {
                Some(format!("{} has already won!", snapshot.batting_team))
            }
            Outcome::Live => None,
        }
    }
}

/// Decide whether the chase is still live.
///
/// The tie and bowling-win checks must run before `runs_left <= 0`,
/// otherwise 180/180 after 20 overs would read as a batting win.
/// A snapshot past 120 balls has negative `balls_left` and is not
/// corrected here.
pub fn classify(snapshot: &MatchSnapshot) -> Result<Outcome, ValidationError> {
    if snapshot.batting_team == snapshot.bowling_team {
        return Err(ValidationError::SameTeams(snapshot.batting_team.clone()));
    }

    let runs_left = snapshot.runs_left();
    let balls_left = snapshot.balls_left();

    let outcome = if runs_left == 0 && balls_left == 0 {
        Outcome::Tied
    } else if runs_left > 0 && balls_left == 0 {
        Outcome::BowlingTeamWins
    } else if runs_left <= 0 {
        Outcome::BattingTeamWins
    } else {
        Outcome::Live
    };
    Ok(outcome)
}
