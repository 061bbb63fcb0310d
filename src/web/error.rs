//! Mapping request failures onto HTTP responses.

use super::render;
use crate::error::{RenderError, ScanError, WorkflowError};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// A failure confined to one request.
///
/// The response still carries the base page, followed by the error
/// message, so the user can retry from the same form.
#[derive(Debug)]
pub enum AppError {
    Workflow {
        hostname: String,
        source: WorkflowError,
    },
    Render(RenderError),
}

impl AppError {
    pub fn workflow(hostname: impl Into<String>, source: WorkflowError) -> Self {
        Self::Workflow {
            hostname: hostname.into(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Workflow { source, .. } => match source {
                WorkflowError::Scan(ScanError::EmptyTarget) => StatusCode::BAD_REQUEST,
                WorkflowError::Scan(ScanError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
                WorkflowError::Scan(_) => StatusCode::BAD_GATEWAY,
                WorkflowError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        Self::Render(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Workflow { hostname, source } => {
                // Store details stay in the log; the page gets a generic line.
                let message = match &source {
                    WorkflowError::Store(err) => {
                        tracing::error!(hostname = %hostname, error = %err, "scan history unavailable");
                        "scan history is unavailable".to_string()
                    }
                    WorkflowError::Scan(err) => {
                        tracing::warn!(hostname = %hostname, error = %err, "scan failed");
                        err.to_string()
                    }
                };
                match render::render_error_page(&hostname, &message) {
                    Ok(page) => (status, Html(page)).into_response(),
                    Err(err) => {
                        tracing::error!(error = %err, "failed to render error page");
                        (status, message).into_response()
                    }
                }
            }
            Self::Render(err) => {
                tracing::error!(error = %err, "page rendering failed");
                (status, err.to_string()).into_response()
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Workflow { hostname, source } => write!(f, "scan of {hostname}: {source}"),
            Self::Render(err) => write!(f, "{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use std::time::Duration;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                WorkflowError::Scan(ScanError::Timeout(Duration::from_secs(60))),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                WorkflowError::Scan(ScanError::ScanFailure("no ports".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                WorkflowError::Scan(ScanError::Invocation("missing".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                WorkflowError::Scan(ScanError::EmptyTarget),
                StatusCode::BAD_REQUEST,
            ),
            (
                WorkflowError::Store(StoreError::Directory("ro".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (source, expected) in cases {
            assert_eq!(AppError::workflow("example.com", source).status(), expected);
        }
    }

    #[tokio::test]
    async fn test_store_error_detail_stays_out_of_page() {
        let source = WorkflowError::Store(StoreError::Directory(
            "/var/lib/scanweb: permission denied".into(),
        ));
        let resp = AppError::workflow("example.com", source).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("scan history is unavailable"));
        assert!(!page.contains("permission denied"));
        assert!(!page.contains("/var/lib/scanweb"));
    }

    #[test]
    fn test_render_error_is_500() {
        let err = AppError::from(RenderError(std::fmt::Error));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
