use serde::Serialize;
use tracing::debug;

use super::commentary::CommentaryTier;
use super::metrics::{DerivedMetrics, MatchInsights, RunRateTier, WicketsTier};
use super::models::MatchSnapshot;
use super::oracle::{self, FeatureRecord, PredictionResult, WinProbabilityModel};
use super::validator::{classify, Outcome, ValidationError};

/// Everything shown for a chase that is still undecided.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveReport {
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
    #[serde(flatten)]
    pub probabilities: PredictionResult,
    /// Remaining overs in `overs.balls` form, e.g. "7.3"
    pub overs_remaining: String,
    pub commentary_tier: CommentaryTier,
    pub commentary: String,
    pub run_rate_tier: RunRateTier,
    pub wickets_tier: WicketsTier,
    pub insights: MatchInsights,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// Decided before the model is consulted.
    Terminal(Outcome),
    Live(Box<LiveReport>),
}

/// Classify the snapshot and, if the chase is live, score it with `model`.
pub fn predict(
    snapshot: &MatchSnapshot,
    model: &dyn WinProbabilityModel,
) -> Result<Prediction, ValidationError> {
    let outcome = classify(snapshot)?;
    if outcome.is_terminal() {
        debug!(
            "{} v {}: {:?}, model not consulted",
            snapshot.batting_team, snapshot.bowling_team, outcome
        );
        return Ok(Prediction::Terminal(outcome));
    }

    let metrics = DerivedMetrics::compute(snapshot);
    let features = FeatureRecord::new(snapshot, &metrics);
    let probabilities = oracle::query(model, &features);

    let commentary_tier = CommentaryTier::from_win_probability(probabilities.win_probability);
    let (overs_left, balls_extra) = metrics.overs_remaining();

    debug!(
        "{} need {} off {} ({}): win {:.3}",
        snapshot.batting_team,
        metrics.runs_left,
        metrics.balls_left,
        model.name(),
        probabilities.win_probability
    );

    Ok(Prediction::Live(Box::new(LiveReport {
        metrics,
        probabilities,
        overs_remaining: format!("{}.{}", overs_left, balls_extra),
        commentary_tier,
        commentary: commentary_tier.message(&snapshot.batting_team, &snapshot.bowling_team),
        run_rate_tier: RunRateTier::from_required_rate(metrics.required_run_rate),
        wickets_tier: WicketsTier::from_wickets_left(metrics.wickets_left),
        insights: MatchInsights::compute(snapshot, &metrics),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cricket::models::Overs;
    use approx::assert_relative_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Stub model that records every call.
    struct Recording {
        answer: [f64; 2],
        calls: AtomicUsize,
        last: Mutex<Option<FeatureRecord>>,
    }

    impl Recording {
        fn new(win: f64) -> Self {
            Recording {
                answer: [1.0 - win, win],
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl WinProbabilityModel for Recording {
        fn predict_proba(&self, features: &FeatureRecord) -> [f64; 2] {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(features.clone());
            self.answer
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn snapshot(target: i32, score: i32, wickets_lost: i32, overs: f64) -> MatchSnapshot {
        MatchSnapshot {
            batting_team: "Sunrisers Hyderabad".into(),
            bowling_team: "Royal Challengers Bangalore".into(),
            city: "Hyderabad".into(),
            target,
            score,
            wickets_lost,
            overs: Overs::from_notation(overs).unwrap(),
        }
    }

    fn live(p: Prediction) -> LiveReport {
        match p {
            Prediction::Live(report) => *report,
            other => panic!("expected live prediction, got {:?}", other),
        }
    }

    #[test]
    fn live_chase_builds_full_report() {
        let model = Recording::new(0.62);
        let report = live(predict(&snapshot(180, 120, 3, 12.0), &model).unwrap());

        assert_eq!(model.calls(), 1);
        assert_eq!(report.metrics.runs_left, 60);
        assert_eq!(report.metrics.balls_left, 48);
        assert_eq!(report.metrics.wickets_left, 7);
        assert_relative_eq!(report.metrics.current_run_rate, 10.0, epsilon = 1e-9);
        assert_relative_eq!(report.metrics.required_run_rate, 7.5, epsilon = 1e-9);
        assert_relative_eq!(report.probabilities.win_probability, 0.62, epsilon = 1e-12);
        assert_relative_eq!(report.probabilities.loss_probability, 0.38, epsilon = 1e-12);
        assert_eq!(report.commentary_tier, CommentaryTier::Favored);
        assert_eq!(
            report.commentary,
            "Sunrisers Hyderabad are in a strong position with a good chance of winning."
        );
        assert_eq!(report.run_rate_tier, RunRateTier::Low);
        assert_eq!(report.wickets_tier, WicketsTier::Comfortable);
        assert_eq!(report.overs_remaining, "8.0");
        assert!(report.insights.ahead_of_rate);
    }

    #[test]
    fn model_receives_contract_features() {
        let model = Recording::new(0.5);
        predict(&snapshot(180, 120, 3, 12.0), &model).unwrap();
        let sent = model.last.lock().unwrap().clone().unwrap();
        assert_eq!(sent.batting_team, "Sunrisers Hyderabad");
        assert_eq!(sent.bowling_team, "Royal Challengers Bangalore");
        assert_eq!(sent.city, "Hyderabad");
        assert_eq!(sent.numeric(), [60.0, 48.0, 7.0, 180.0, 10.0, 7.5]);
    }

    #[test]
    fn same_teams_never_reach_the_model() {
        let model = Recording::new(0.5);
        let mut snap = snapshot(180, 120, 3, 12.0);
        snap.bowling_team = snap.batting_team.clone();
        assert!(matches!(predict(&snap, &model), Err(ValidationError::SameTeams(_))));
        assert_eq!(model.calls(), 0);
    }

    #[test]
    fn decided_matches_skip_the_model() {
        let model = Recording::new(0.5);
        let cases = [
            (snapshot(180, 180, 4, 20.0), Outcome::Tied),
            (snapshot(150, 155, 4, 18.0), Outcome::BattingTeamWins),
            (snapshot(150, 100, 8, 20.0), Outcome::BowlingTeamWins),
        ];
        for (snap, expected) in cases {
            assert_eq!(predict(&snap, &model).unwrap(), Prediction::Terminal(expected));
        }
        assert_eq!(model.calls(), 0);
    }

    #[test]
    fn commentary_follows_model_output() {
        for (win, tier) in [
            (0.9, CommentaryTier::Dominant),
            (0.75, CommentaryTier::Favored),
            (0.6, CommentaryTier::Even),
            (0.4, CommentaryTier::Underdog),
            (0.1, CommentaryTier::Longshot),
        ] {
            let model = Recording::new(win);
            let report = live(predict(&snapshot(180, 120, 3, 12.0), &model).unwrap());
            assert_eq!(report.commentary_tier, tier, "win {}", win);
        }
    }

    #[test]
    fn report_serialises_flat() {
        let model = Recording::new(0.8);
        let report = live(predict(&snapshot(200, 100, 7, 15.3), &model).unwrap());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["runs_left"], 100);
        assert_eq!(json["balls_left"], 27);
        assert_eq!(json["overs_remaining"], "4.3");
        assert_eq!(json["commentary_tier"], "dominant");
        assert_eq!(json["run_rate_tier"], "high");
        assert_eq!(json["wickets_tier"], "critical");
        assert_eq!(json["insights"]["pressure"], "high");
        assert_eq!(json["insights"]["death_overs"], true);
    }
}
