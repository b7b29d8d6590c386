// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Scan HTTP API
 * Streams scan events to clients as server-sent events
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::engine::ScanEngine;
use crate::errors::ScannerError;
use crate::types::ScanMethod;

pub struct ScanApiState {
    pub engine: ScanEngine,
    pub version: String,
}

pub fn create_scan_router(state: Arc<ScanApiState>) -> Router {
    Router::new()
        .route("/api/scan", post(scan_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct ScanPayload {
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    method: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: String,
}

async fn scan_handler(
    State(state): State<Arc<ScanApiState>>,
    payload: Result<Json<ScanPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return ApiError::BadRequest(rejection.body_text()).into_response();
        }
    };

    let method = match payload.method.as_deref() {
        Some(raw) => match raw.parse::<ScanMethod>() {
            Ok(method) => method,
            Err(e) => return ApiError::from(e).into_response(),
        },
        None => ScanMethod::default(),
    };

    let request = match state.engine.prepare(payload.domain.as_deref(), method) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected scan request: {}", e);
            return ApiError::from(e).into_response();
        }
    };

    info!("API scan requested: {} ({})", request.domain, request.method);

    // Client disconnect drops the stream, which cancels the scan
    let events = state
        .engine
        .start(request)
        .map(|event| Event::default().json_data(event));

    Sse::new(events)
        .keep_alive(KeepAlive::default())
        .into_response()
}

async fn health_handler(State(state): State<Arc<ScanApiState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: state.version.clone(),
    })
}

#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    InternalError(String),
}

impl From<ScannerError> for ApiError {
    fn from(err: ScannerError) -> Self {
        if err.is_input_error() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::InternalError(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, message).into_response()
    }
}

/// Bind and serve the scan API until Ctrl-C
pub async fn serve(engine: ScanEngine, config: &ServerConfig) -> Result<()> {
    let state = Arc::new(ScanApiState {
        engine,
        version: env!("CARGO_PKG_VERSION").to_string(),
    });
    let app = create_scan_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("[SUCCESS] Scan API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .context("HTTP server error")?;

    Ok(())
}
