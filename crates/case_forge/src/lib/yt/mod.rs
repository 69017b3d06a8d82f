pub mod oembed;
pub mod transcript;
mod video_url;

use std::{fmt::Display, future::Future};

use case_document::VideoMetadata;

pub use transcript::{resolve_transcript, ResolvedTranscript, TranscriptStatus};
pub use video_url::{InvalidVideoUrl, VideoUrl};

pub trait MetadataFetcher {
    const PROVIDER: &'static str;

    type Error: Display;

    fn fetch_metadata(
        &self,
        video: &VideoUrl,
    ) -> impl Future<Output = Result<VideoMetadata, Self::Error>> + Send;
}

pub trait TranscriptSource {
    const PROVIDER: &'static str;

    type Error: Display;

    /// Returns the plain transcript text, possibly empty when the video
    /// has no captions
    fn fetch_transcript(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Upstream responded with {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Malformed upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}
