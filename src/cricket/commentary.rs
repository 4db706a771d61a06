use serde::Serialize;

/// Qualitative read of the batting side's win probability.
///
/// Bands are open at the bottom: a probability sitting exactly on a
/// threshold belongs to the band below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentaryTier {
    Dominant,
    Favored,
    Even,
    Underdog,
    Longshot,
}

impl CommentaryTier {
    pub fn from_win_probability(win: f64) -> Self {
        if win > 0.75 {
            CommentaryTier::Dominant
        } else if win > 0.60 {
            CommentaryTier::Favored
        } else if win > 0.40 {
            CommentaryTier::Even
        } else if win > 0.25 {
            CommentaryTier::Underdog
        } else {
            CommentaryTier::Longshot
        }
    }

    pub fn message(&self, batting_team: &str, bowling_team: &str) -> String {
        match self {
            CommentaryTier::Dominant => format!(
                "Excellent position for {}! They are heavy favorites to win this match.",
                batting_team
            ),
            CommentaryTier::Favored => format!(
                "{} are in a strong position with a good chance of winning.",
                batting_team
            ),
            CommentaryTier::Even => {
                "Match is evenly poised! Both teams have a realistic chance of winning.".to_string()
            }
            CommentaryTier::Underdog => format!(
                "{} have the upper hand but {} can still pull this off.",
                bowling_team, batting_team
            ),
            CommentaryTier::Longshot => format!(
                "Very tough situation for {}! They need something special to win from here.",
                batting_team
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_thresholds_fall_into_lower_band() {
        assert_eq!(CommentaryTier::from_win_probability(0.75), CommentaryTier::Favored);
        assert_eq!(CommentaryTier::from_win_probability(0.60), CommentaryTier::Even);
        assert_eq!(CommentaryTier::from_win_probability(0.40), CommentaryTier::Underdog);
        assert_eq!(CommentaryTier::from_win_probability(0.25), CommentaryTier::Longshot);
    }

    #[test]
    fn bands_cover_the_unit_interval() {
        assert_eq!(CommentaryTier::from_win_probability(1.0), CommentaryTier::Dominant);
        assert_eq!(CommentaryTier::from_win_probability(0.7501), CommentaryTier::Dominant);
        assert_eq!(CommentaryTier::from_win_probability(0.61), CommentaryTier::Favored);
        assert_eq!(CommentaryTier::from_win_probability(0.5), CommentaryTier::Even);
        assert_eq!(CommentaryTier::from_win_probability(0.3), CommentaryTier::Underdog);
        assert_eq!(CommentaryTier::from_win_probability(0.0), CommentaryTier::Longshot);
    }

    #[test]
    fn messages_name_the_right_side() {
        let msg = CommentaryTier::Underdog.message("Mumbai Indians", "Delhi Capitals");
        assert_eq!(
            msg,
            "Delhi Capitals have the upper hand but Mumbai Indians can still pull this off."
        );
        assert!(CommentaryTier::Dominant
            .message("Mumbai Indians", "Delhi Capitals")
            .starts_with("Excellent position for Mumbai Indians!"));
    }
}
