//! HTTP surface: a form page, a health check and the `/generate` endpoint.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{FromRequest, Request, State},
    http::{header, HeaderName, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use case_document::DocumentRenderer;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    types::VideoRequest,
    yt::{MetadataFetcher, TranscriptSource},
    CaseStudyPipeline, ContentGenerator, Error, Stage,
};

/// Reports whether the transcript was supplied, fetched or missing
pub const TRANSCRIPT_STATUS_HEADER: HeaderName = HeaderName::from_static("x-transcript-status");

const INDEX_PAGE: &str = include_str!("./templates/index.html");

pub fn router<M, T, G, R>(pipeline: CaseStudyPipeline<M, T, G, R>, request_timeout: Duration) -> Router
where
    M: MetadataFetcher + Send + Sync + 'static,
    T: TranscriptSource + Send + Sync + 'static,
    G: ContentGenerator + Send + Sync + 'static,
    R: DocumentRenderer + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/generate", post(generate::<M, T, G, R>))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(pipeline))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn generate<M, T, G, R>(
    State(pipeline): State<Arc<CaseStudyPipeline<M, T, G, R>>>,
    request: VideoRequest,
) -> Result<Response, Error>
where
    M: MetadataFetcher + Send + Sync + 'static,
    T: TranscriptSource + Send + Sync + 'static,
    G: ContentGenerator + Send + Sync + 'static,
    R: DocumentRenderer + Send + Sync + 'static,
{
    let document = pipeline.run(request).await?;

    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    tracing::info!(
        stage = %Stage::Responded,
        filename = %document.filename,
        bytes = document.pdf.len()
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (
                TRANSCRIPT_STATUS_HEADER,
                document.transcript_status.to_string(),
            ),
        ],
        document.pdf,
    )
        .into_response())
}

impl<S> FromRequest<S> for VideoRequest
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.trim_start().starts_with("application/json"));

        let request = if is_json {
            let Json(request) = Json::<VideoRequest>::from_request(req, state)
                .await
                .map_err(|e| Error::InvalidInput(e.body_text()))?;
            request
        } else {
            let Form(request) = Form::<VideoRequest>::from_request(req, state)
                .await
                .map_err(|e| Error::InvalidInput(e.body_text()))?;
            request
        };

        if request.url.trim().is_empty() {
            return Err(Error::InvalidInput("missing required field `url`".into()));
        }

        Ok(request)
    }
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::UpstreamFetch(_) | Error::Generation(_) => StatusCode::BAD_GATEWAY,
            Error::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, %status, "Request failed");
        } else {
            tracing::warn!(error = %self, %status, "Request rejected");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
