use case_document::CaseStudyContent;
use serde::Deserialize;

use crate::yt::TranscriptStatus;

/// Body of a `/generate` call, accepted as JSON or as an urlencoded form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoRequest {
    #[serde(default)]
    pub url: String,
    /// Pasted transcript, bypasses the transcript lookup when non-blank
    #[serde(default)]
    pub transcript: Option<String>,
}

impl VideoRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            transcript: None,
        }
    }

    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = Some(transcript.into());
        self
    }
}

/// Output of one successful pipeline run
#[derive(Debug, Clone)]
pub struct CaseStudyDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
    pub content: CaseStudyContent,
    pub transcript_status: TranscriptStatus,
}
