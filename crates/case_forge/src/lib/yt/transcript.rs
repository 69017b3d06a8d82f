use std::fmt;

use itertools::Itertools;
use serde_json::Value;

use crate::{
    yt::{TranscriptSource, UpstreamError},
    Config,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptStatus {
    /// Provided by the caller, no fetch attempted
    Supplied,
    Fetched,
    /// Fetch failed or returned nothing; the pipeline continues without one
    Missing,
}

impl TranscriptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptStatus::Supplied => "supplied",
            TranscriptStatus::Fetched => "fetched",
            TranscriptStatus::Missing => "missing",
        }
    }
}

impl fmt::Display for TranscriptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTranscript {
    pub text: String,
    pub status: TranscriptStatus,
}

/// Picks the transcript for a request.
///
/// A non-blank `supplied` transcript is returned unchanged and `source` is
/// never called. Otherwise the source is asked once; a failure or an empty
/// result resolves to an empty transcript instead of an error.
#[tracing::instrument(skip(source, supplied), fields(provider = T::PROVIDER))]
pub async fn resolve_transcript<T: TranscriptSource>(
    source: &T,
    video_id: &str,
    supplied: Option<&str>,
) -> ResolvedTranscript {
    if let Some(text) = supplied.filter(|t| !t.trim().is_empty()) {
        tracing::debug!(chars = text.len(), "Using caller supplied transcript");
        return ResolvedTranscript {
            text: text.to_string(),
            status: TranscriptStatus::Supplied,
        };
    }

    match source.fetch_transcript(video_id).await {
        Ok(text) if !text.trim().is_empty() => ResolvedTranscript {
            text,
            status: TranscriptStatus::Fetched,
        },
        Ok(_) => {
            tracing::warn!("Transcript source returned no text, continuing without transcript");
            ResolvedTranscript {
                text: String::new(),
                status: TranscriptStatus::Missing,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch transcript, continuing without transcript");
            ResolvedTranscript {
                text: String::new(),
                status: TranscriptStatus::Missing,
            }
        }
    }
}

/// Caption client for YouTube's `timedtext` endpoint (`fmt=json3`)
#[derive(Debug, Clone)]
pub struct TimedTextClient {
    client: reqwest::Client,
    endpoint: String,
    language: String,
}

impl TimedTextClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: Config::DEFAULT_TRANSCRIPT_API_URL.into(),
            language: Config::DEFAULT_TRANSCRIPT_LANG.into(),
        }
    }

    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        Self::new(client)
            .with_endpoint(&config.transcript_api_url)
            .with_language(&config.transcript_lang)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl TranscriptSource for TimedTextClient {
    const PROVIDER: &'static str = "youtube-timedtext";

    type Error = UpstreamError;

    async fn fetch_transcript(&self, video_id: &str) -> Result<String, Self::Error> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("v", video_id),
                ("lang", self.language.as_str()),
                ("fmt", "json3"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, message });
        }

        // an empty body means the video has no captions in this language
        let body = resp.text().await?;
        if body.trim().is_empty() {
            return Ok(String::new());
        }

        let json = serde_json::from_str::<Value>(&body)?;
        Ok(parse_timed_text(&json))
    }
}

/// Concatenates `events[].segs[].utf8` and collapses the whitespace once.
/// Segments may split a word, so none are separated by spaces.
pub fn parse_timed_text(json: &Value) -> String {
    let Some(events) = json["events"].as_array() else {
        return String::new();
    };

    let raw: String = events
        .iter()
        .filter_map(|event| event["segs"].as_array())
        .flatten()
        .filter_map(|seg| seg["utf8"].as_str())
        .collect();

    raw.split_whitespace().join(" ")
}
