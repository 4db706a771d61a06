use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cricket::MatchInput;

/// IPL chase win-probability predictor
#[derive(Parser, Debug, Clone)]
#[command(name = "ipl-win-predictor", version, about)]
pub struct Config {
    /// Path to the trained model artifact (JSON)
    #[arg(long, env = "MODEL_PATH", default_value = "models/win_model.json")]
    pub model_path: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the predictor page and JSON API
    Serve {
        /// Listen address
        #[arg(long, env = "DASHBOARD_ADDR", default_value = "127.0.0.1:8501")]
        addr: String,
    },
    /// Predict a single match state and print the result
    Predict(PredictArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// Team currently batting (chasing)
    #[arg(long)]
    pub batting_team: String,

    /// Team currently bowling
    #[arg(long)]
    pub bowling_team: String,

    /// Host city
    #[arg(long)]
    pub city: String,

    /// Target score
    #[arg(long, default_value = "180")]
    pub target: i64,

    /// Current score
    #[arg(long, default_value = "120")]
    pub score: i64,

    /// Wickets lost
    #[arg(long, default_value = "3")]
    pub wickets: i64,

    /// Overs completed, e.g. 12.3 for 12 overs and 3 balls
    #[arg(long, default_value = "12.0")]
    pub overs: f64,

    /// Print the result as JSON
    #[arg(long, default_value = "false")]
    pub json: bool,
}

impl PredictArgs {
    pub fn to_input(&self) -> MatchInput {
        MatchInput {
            batting_team: self.batting_team.clone(),
            bowling_team: self.bowling_team.clone(),
            city: self.city.clone(),
            target: self.target,
            score: self.score,
            wickets: self.wickets,
            overs: self.overs,
        }
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Command::Serve { addr } = &self.command {
            if addr.parse::<SocketAddr>().is_err() {
                anyhow::bail!("invalid listen address {:?}", addr);
            }
        }
        if self.model_path.as_os_str().is_empty() {
            anyhow::bail!("model_path must not be empty");
        }
        Ok(())
    }
}
