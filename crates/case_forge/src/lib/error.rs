/// Request level failures, one variant per pipeline step that can abort a
/// request. Transcript fetch failures never surface here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Failed to fetch video metadata: {0}")]
    UpstreamFetch(String),
    #[error("Failed to generate case study: {0}")]
    Generation(String),
    #[error("Failed to render PDF: {0}")]
    Render(String),
}

impl From<case_document::RenderError> for Error {
    fn from(value: case_document::RenderError) -> Self {
        Error::Render(value.to_string())
    }
}

impl From<crate::yt::InvalidVideoUrl> for Error {
    fn from(value: crate::yt::InvalidVideoUrl) -> Self {
        Error::InvalidInput(value.to_string())
    }
}
