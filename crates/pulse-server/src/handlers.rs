//! REST endpoint handlers for the dashboard server.
//!
//! All handlers read from the process-wide cache via the shared
//! [`AppState`]; none of them touch the store directly.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Dashboard page shell |
//! | `GET` | `/api/current-data` | Current cache document as JSON |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::{Html, IntoResponse};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- dashboard page shell
// ---------------------------------------------------------------------------

/// Serve the dashboard entry page.
///
/// A static shell showing current cache metrics and the API surface;
/// chart rendering belongs to the frontend assets, not this server.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let document = state.current().await;

    let symbols = document
        .price_history
        .keys()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let price_points: usize = document.price_history.values().map(Vec::len).sum();
    let mood_points: usize = document.moods.values().map(Vec::len).sum();
    let correlation_points = document.correlations.len();
    let latest = if document.latest_analysis.is_empty() {
        "(no analysis posted yet)"
    } else {
        document.latest_analysis.as_str()
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Pulse Dashboard</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        li::before {{ content: "GET "; color: #7ee787; font-weight: bold; }}
        blockquote {{
            background: #161b22;
            border-left: 3px solid #58a6ff;
            margin: 0;
            padding: 0.75rem 1rem;
        }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Pulse Dashboard</h1>
    <p class="subtitle">Layer-1 market monitor -- last 24 hours</p>

    <div>
        <div class="metric">
            <div class="label">Tracked</div>
            <div class="value">{symbols}</div>
        </div>
        <div class="metric">
            <div class="label">Price points</div>
            <div class="value">{price_points}</div>
        </div>
        <div class="metric">
            <div class="label">Mood points</div>
            <div class="value">{mood_points}</div>
        </div>
        <div class="metric">
            <div class="label">Correlations</div>
            <div class="value">{correlation_points}</div>
        </div>
    </div>

    <h2>Latest analysis</h2>
    <blockquote>{latest}</blockquote>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/api/current-data">/api/current-data</a> -- Current cache document (JSON)</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li style="list-style:none;"><code>ws://host:port/ws/updates</code> -- initial_data on connect, data_update every 30s</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/current-data -- cache snapshot
// ---------------------------------------------------------------------------

/// Return the current cache document verbatim.
///
/// No parameters, no side effects, status 200 always -- an empty cache
/// is indistinguishable from missing data by design.
pub async fn current_data(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let document = state.current().await;
    Ok(Json(serde_json::to_value(document.as_ref())?))
}
