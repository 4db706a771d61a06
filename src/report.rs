//! Presentation of a prediction for the CLI and the HTTP API.

use serde::Serialize;
use std::fmt::Write;

use crate::cricket::predictor::LiveReport;
use crate::cricket::validator::Outcome;
use crate::cricket::{MatchSnapshot, Prediction};

/// JSON body returned for a prediction request.
#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    pub status: Outcome,
    pub batting_team: String,
    pub bowling_team: String,
    pub city: String,
    pub target: i32,
    pub score: i32,
    pub wickets: i32,
    pub overs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub report: Option<LiveReport>,
}

impl PredictResponse {
    pub fn new(snapshot: &MatchSnapshot, prediction: Prediction) -> Self {
        let (status, report) = match prediction {
            Prediction::Terminal(outcome) => (outcome, None),
            Prediction::Live(report) => (Outcome::Live, Some(*report)),
        };
        PredictResponse {
            status,
            batting_team: snapshot.batting_team.clone(),
            bowling_team: snapshot.bowling_team.clone(),
            city: snapshot.city.clone(),
            target: snapshot.target,
            score: snapshot.score,
            wickets: snapshot.wickets_lost,
            overs: snapshot.overs.to_string(),
            message: status.message(snapshot),
            report,
        }
    }
}

/// Plain-text rendering for the terminal.
pub fn render_text(resp: &PredictResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} vs {} at {}", resp.batting_team, resp.bowling_team, resp.city);
    let _ = writeln!(
        out,
        "Target {} | Score {}/{} | Overs {}/20",
        resp.target, resp.score, resp.wickets, resp.overs
    );

    if let Some(message) = &resp.message {
        let _ = writeln!(out, "{}", message);
        return out;
    }
    let Some(r) = &resp.report else {
        return out;
    };

    let _ = writeln!(
        out,
        "Need {} runs off {} balls ({} overs) with {} wickets in hand",
        r.metrics.runs_left, r.metrics.balls_left, r.overs_remaining, r.metrics.wickets_left
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<30} {:>6.2} %",
        format!("{} chance", resp.batting_team),
        r.probabilities.win_probability * 100.0
    );
    let _ = writeln!(
        out,
        "{:<30} {:>6.2} %",
        format!("{} chance", resp.bowling_team),
        r.probabilities.loss_probability * 100.0
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Required run rate  {:>6.2}  [{}]",
        r.metrics.required_run_rate,
        r.run_rate_tier.color()
    );
    let _ = writeln!(out, "Current run rate   {:>6.2}", r.metrics.current_run_rate);
    let _ = writeln!(
        out,
        "Wickets in hand    {:>6}  [{}]",
        r.metrics.wickets_left,
        r.wickets_tier.color()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", r.commentary);
    let _ = writeln!(out);
    let i = &r.insights;
    let _ = writeln!(out, "Pressure situation: {:?}", i.pressure);
    let _ = writeln!(
        out,
        "Batting powerplay:  {}",
        if i.powerplay_active { "Active" } else { "Completed" }
    );
    let _ = writeln!(out, "Death overs:        {}", if i.death_overs { "Yes" } else { "No" });
    let _ = writeln!(out, "Required strike rate: {:.1}", i.required_strike_rate);
    let _ = writeln!(
        out,
        "{}",
        if i.ahead_of_rate {
            "Batting team is ahead of the required rate!"
        } else {
            "Batting team needs to accelerate!"
        }
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cricket::models::Overs;
    use crate::cricket::oracle::{FeatureRecord, WinProbabilityModel};
    use crate::cricket::predict;

    struct Even;

    impl WinProbabilityModel for Even {
        fn predict_proba(&self, _: &FeatureRecord) -> [f64; 2] {
            [0.45, 0.55]
        }

        fn name(&self) -> &str {
            "even"
        }
    }

    fn snapshot(target: i32, score: i32, overs: f64) -> MatchSnapshot {
        MatchSnapshot {
            batting_team: "Delhi Capitals".into(),
            bowling_team: "Kolkata Knight Riders".into(),
            city: "Delhi".into(),
            target,
            score,
            wickets_lost: 5,
            overs: Overs::from_notation(overs).unwrap(),
        }
    }

    #[test]
    fn terminal_response_has_message_and_no_metrics() {
        let snap = snapshot(180, 180, 20.0);
        let resp = PredictResponse::new(&snap, predict(&snap, &Even).unwrap());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "tied");
        assert_eq!(json["message"], "Match tied! Both teams have the same score.");
        assert!(json.get("runs_left").is_none());
        assert!(render_text(&resp).contains("Match tied!"));
    }

    #[test]
    fn live_response_is_flat() {
        let snap = snapshot(180, 120, 12.0);
        let resp = PredictResponse::new(&snap, predict(&snap, &Even).unwrap());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "live");
        assert_eq!(json["overs"], "12.0");
        assert_eq!(json["runs_left"], 60);
        assert_eq!(json["win_probability"], 0.55);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn text_report_lists_both_chances() {
        let snap = snapshot(180, 120, 12.0);
        let text = render_text(&PredictResponse::new(&snap, predict(&snap, &Even).unwrap()));
        assert!(text.contains("Delhi Capitals chance"));
        assert!(text.contains("55.00 %"));
        assert!(text.contains("45.00 %"));
        assert!(text.contains("Need 60 runs off 48 balls (8.0 overs)"));
        assert!(text.contains("Match is evenly poised!"));
    }
}
