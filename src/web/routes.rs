//! Route handlers.

use super::error::AppError;
use super::render;
use super::state::AppState;
use crate::workflow;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Form/query parameters of the scan page.
#[derive(Debug, Default, Deserialize)]
pub struct ScanParams {
    #[serde(default)]
    pub hostname: String,
}

pub async fn index_get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScanParams>,
) -> Result<Html<String>, AppError> {
    scan_page(&state, params.hostname.trim()).await
}

/// The body value wins; a missing or unreadable body falls back to the
/// query string, and with neither the base page is served.
pub async fn index_post(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScanParams>,
    form: Result<Form<ScanParams>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let body = match form {
        Ok(Form(params)) => params.hostname,
        Err(rejection) => {
            debug!(%rejection, "no form body, using query string");
            String::new()
        }
    };
    let hostname = if body.trim().is_empty() {
        query.hostname
    } else {
        body
    };
    scan_page(&state, hostname.trim()).await
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Base page, plus the scan history when a hostname was submitted.
async fn scan_page(state: &AppState, hostname: &str) -> Result<Html<String>, AppError> {
    if hostname.is_empty() {
        return Ok(Html(render::render_page("", &[])?));
    }

    let history =
        workflow::scan_and_record(&state.scanner, &state.store, state.session, hostname)
            .await
            .map_err(|e| AppError::workflow(hostname, e))?;

    for scan in &history {
        debug!(
            hostname = %scan.hostname,
            address = %scan.address,
            timestamp = scan.timestamp,
            ports = scan.port_lines().count(),
            "history entry"
        );
    }

    Ok(Html(render::render_page(hostname, &history)?))
}
