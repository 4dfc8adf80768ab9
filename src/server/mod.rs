use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::model::diagnostics::Diagnostic;
use crate::model::thresholds::ThresholdProfile;
use crate::pipeline::score_upload;
use crate::report::html::{PageView, render_page};
use crate::scorer::Scorer;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

pub type ScorerFactory = Arc<dyn Fn() -> Box<dyn Scorer + Send> + Send + Sync>;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone)]
pub struct AppState {
    pub scorer: ScorerFactory,
    pub thresholds: ThresholdProfile,
}

impl AppState {
    pub fn new(scorer: ScorerFactory, thresholds: ThresholdProfile) -> Self {
        Self { scorer, thresholds }
    }
}

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/score", get(serve_index).post(score_catalogue))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

pub async fn serve(
    bind: SocketAddr,
    state: AppState,
    max_upload_bytes: usize,
) -> Result<(), ServeError> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("catalogue-qc listening on http://{}", listener.local_addr()?);
    axum::serve(listener, build_router(state, max_upload_bytes)).await?;
    Ok(())
}

type PageResult = Result<Html<String>, (StatusCode, Html<String>)>;

async fn serve_index() -> Html<String> {
    Html(upload_page(&[]))
}

async fn health() -> &'static str {
    "ok"
}

async fn score_catalogue(State(state): State<AppState>, mut multipart: Multipart) -> PageResult {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        if name.as_deref() == Some("file") {
            upload = Some(field.bytes().await.map_err(multipart_error)?);
        }
    }
    let Some(bytes) = upload else {
        warn!("upload without a 'file' field");
        return Err(page_error(StatusCode::BAD_REQUEST, "No CSV file was uploaded."));
    };
    info!("received upload of {} bytes", bytes.len());

    let job_state = state.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let mut scorer = (job_state.scorer)();
        score_upload(&bytes, scorer.as_mut(), &job_state.thresholds)
    })
    .await
    .map_err(|e| {
        error!("scoring task failed: {e}");
        page_error(StatusCode::INTERNAL_SERVER_ERROR, "Scoring task failed.")
    })?
    .map_err(|e| {
        error!("report rendering failed: {e}");
        page_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Report rendering failed: {e}"),
        )
    })?;

    let page = render_page(&PageView {
        diagnostics: &outcome.diagnostics,
        upload_action: Some("/score"),
        report: outcome.report.as_ref().map(|r| &r.view),
    });
    Ok(Html(page))
}

fn upload_page(diagnostics: &[Diagnostic]) -> String {
    render_page(&PageView {
        diagnostics,
        upload_action: Some("/score"),
        report: None,
    })
}

fn page_error(status: StatusCode, message: &str) -> (StatusCode, Html<String>) {
    (
        status,
        Html(upload_page(&[Diagnostic::Error(message.to_string())])),
    )
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> (StatusCode, Html<String>) {
    warn!("malformed upload: {e}");
    page_error(e.status(), &format!("Malformed upload: {}", e.body_text()))
}

#[cfg(test)]
#[path = "../../tests/src_inline/server/mod.rs"]
mod tests;
