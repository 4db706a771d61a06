use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

mod config;
mod cricket;
mod dashboard;
mod report;

use config::{Command, Config, PredictArgs};
use cricket::{predict, LogisticModel, WinProbabilityModel};
use dashboard::AppState;
use report::PredictResponse;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    // The model is loaded once and shared read-only; no request is served without it.
    let model = LogisticModel::load(&config.model_path).with_context(|| {
        format!(
            "failed to load win-probability model from {}",
            config.model_path.display()
        )
    })?;
    info!(
        "Model loaded: {} ({})",
        model.name(),
        config.model_path.display()
    );
    let model: Arc<dyn WinProbabilityModel> = Arc::new(model);

    match config.command {
        Command::Serve { addr } => serve(model, &addr).await,
        Command::Predict(args) => run_once(model.as_ref(), &args),
    }
}

async fn serve(model: Arc<dyn WinProbabilityModel>, addr: &str) -> Result<()> {
    let app = dashboard::router(AppState { model });
    let addr: SocketAddr = addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Predictor listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_once(model: &dyn WinProbabilityModel, args: &PredictArgs) -> Result<()> {
    let snapshot = args.to_input().into_snapshot()?;
    let prediction = match predict(&snapshot, model) {
        Ok(p) => p,
        Err(e) => {
            warn!("{}", e);
            return Err(e.into());
        }
    };

    let resp = PredictResponse::new(&snapshot, prediction);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&resp)?);
    } else {
        print!("{}", report::render_text(&resp));
    }
    Ok(())
}
