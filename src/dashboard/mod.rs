use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::cricket::catalog::{self, Catalog};
use crate::cricket::{predict, MatchInput, WinProbabilityModel};
use crate::report::PredictResponse;

#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup, shared read-only by every request.
    pub model: Arc<dyn WinProbabilityModel>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn unprocessable(msg: String) -> ApiError {
    warn!("Rejected prediction request: {}", msg);
    (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorBody { error: msg }))
}

/// Build the Axum router for the predictor page and its API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/catalog", get(catalog_handler))
        .route("/api/predict", post(predict_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Serve the form page, tagging it with the loaded model's name.
async fn index_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let html = INDEX_HTML.replace(
        r#"<body>"#,
        &format!(r#"<body data-model="{}">"#, html_escape(state.model.name())),
    );
    Html(html)
}

/// GET /api/catalog
async fn catalog_handler() -> Json<Catalog> {
    Json(catalog::catalog())
}

/// POST /api/predict
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<MatchInput>,
) -> Result<Json<PredictResponse>, ApiError> {
    let snapshot = input
        .into_snapshot()
        .map_err(|e| unprocessable(e.to_string()))?;
    let prediction =
        predict(&snapshot, state.model.as_ref()).map_err(|e| unprocessable(e.to_string()))?;
    Ok(Json(PredictResponse::new(&snapshot, prediction)))
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Embedded single-file form (HTML + CSS + JS)
const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>IPL Win Predictor</title>
<style>
  :root {
    --bg: #0f1117;
    --card: #1a1d27;
    --border: #2a2d3a;
    --accent: #1f77b4;
    --green: #00c896;
    --orange: #ff9800;
    --red: #ff4f6a;
    --text: #e0e0e0;
    --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; display: grid; grid-template-columns: 320px 1fr; min-height: 100vh; }
  aside { background: var(--card); border-right: 1px solid var(--border); padding: 1.5rem; display: grid; gap: .8rem; align-content: start; }
  aside h2 { font-size: 1.1rem; }
  label { display: grid; gap: .3rem; font-size: .8rem; color: var(--muted); text-transform: uppercase; letter-spacing: .05em; }
  select, input { background: var(--bg); color: var(--text); border: 1px solid var(--border); border-radius: 6px; padding: .5rem; font-size: .95rem; }
  button { background: var(--accent); color: #fff; border: none; border-radius: 6px; padding: .7rem; font-weight: 700; cursor: pointer; }
  main { padding: 2rem; display: grid; gap: 1.2rem; align-content: start; }
  h1 { text-align: center; color: var(--accent); }
  .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 1rem; }
  .card { background: var(--card); border: 1px solid var(--border); border-radius: 10px; padding: 1rem; }
  .card .label { color: var(--muted); font-size: .8rem; text-transform: uppercase; margin-bottom: .4rem; }
  .card .value { font-size: 1.6rem; font-weight: 700; }
  .green { color: var(--green); } .orange { color: var(--orange); } .red { color: var(--red); }
  .banner { padding: 1rem; border-radius: 10px; background: var(--card); border-left: 4px solid var(--accent); }
  .banner.error { border-left-color: var(--red); }
  ul { list-style: none; display: grid; gap: .3rem; }
</style>
</head>
<body>
<aside>
  <h2>Match Setup</h2>
  <label>Batting team <select id="batting_team"></select></label>
  <label>Bowling team <select id="bowling_team"></select></label>
  <label>Host city <select id="city"></select></label>
  <label>Target score <input id="target" type="number" min="1" value="180"></label>
  <label>Current score <input id="score" type="number" min="0" value="120"></label>
  <label>Wickets lost <input id="wickets" type="number" min="0" max="10" value="3"></label>
  <label>Overs completed <input id="overs" type="number" min="0" max="20" step="0.1" value="12.0"></label>
  <button id="predict">Predict Win Probability</button>
</aside>
<main>
  <h1>IPL Win Predictor</h1>
  <div id="result"></div>
</main>
<script>
const $ = id => document.getElementById(id);

async function loadCatalog() {
  const r = await fetch('/api/catalog');
  const c = await r.json();
  const teams = c.teams.map(t => `<option>${t.name}</option>`).join('');
  $('batting_team').innerHTML = teams;
  $('bowling_team').innerHTML = teams;
  $('bowling_team').selectedIndex = 1;
  $('city').innerHTML = c.cities.map(n => `<option>${n}</option>`).join('');
}

const card = (label, value, cls = '') =>
  `<div class="card"><div class="label">${label}</div><div class="value ${cls}">${value}</div></div>`;

const TIER_CLASS = { low: 'green', medium: 'orange', high: 'red', comfortable: 'green', moderate: 'orange', critical: 'red' };

function render(d) {
  if (d.status !== 'live') {
    $('result').innerHTML = `<div class="banner">${d.message}</div>`;
    return;
  }
  const i = d.insights;
  $('result').innerHTML = `
    <div class="grid">
      ${card(d.batting_team + ' chance', (d.win_probability * 100).toFixed(2) + ' %')}
      ${card(d.bowling_team + ' chance', (d.loss_probability * 100).toFixed(2) + ' %')}
    </div>
    <div class="grid">
      ${card('Required run rate', d.required_run_rate.toFixed(2), TIER_CLASS[d.run_rate_tier])}
      ${card('Current run rate', d.current_run_rate.toFixed(2))}
      ${card('Overs remaining', d.overs_remaining)}
      ${card('Wickets in hand', d.wickets_left, TIER_CLASS[d.wickets_tier])}
    </div>
    <div class="banner">${d.commentary}</div>
    <div class="card"><ul>
      <li>Pressure situation: ${i.pressure}</li>
      <li>Batting powerplay: ${i.powerplay_active ? 'Active' : 'Completed'}</li>
      <li>Death overs: ${i.death_overs ? 'Yes' : 'No'}</li>
      <li>Required strike rate: ${i.required_strike_rate.toFixed(1)}</li>
      <li>${i.ahead_of_rate ? 'Batting team is ahead of the required rate!' : 'Batting team needs to accelerate!'}</li>
    </ul></div>`;
}

async function predict() {
  const body = {
    batting_team: $('batting_team').value,
    bowling_team: $('bowling_team').value,
    city: $('city').value,
    target: parseInt($('target').value, 10),
    score: parseInt($('score').value, 10),
    wickets: parseInt($('wickets').value, 10),
    overs: parseFloat($('overs').value),
  };
  const r = await fetch('/api/predict', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(body),
  });
  const d = await r.json().catch(() => ({ error: r.statusText }));
  if (!r.ok) {
    $('result').innerHTML = `<div class="banner error">${d.error}</div>`;
    return;
  }
  render(d);
}

$('predict').addEventListener('click', predict);
loadCatalog();
</script>
</body>
</html>"#;
