use std::{fmt::Display, future::Future};

use case_document::{CaseStudyContent, VideoMetadata};

/// Everything the model sees about one video
#[derive(Debug, Clone, Copy)]
pub struct GenerationInput<'a> {
    pub source_url: &'a str,
    pub metadata: &'a VideoMetadata,
    /// May be empty when no transcript could be resolved
    pub transcript: &'a str,
}

pub trait ContentGenerator {
    /// Transcript characters forwarded to the model, the rest is cut off
    const MAX_TRANSCRIPT_CHARS: usize = 60_000;

    type Error: Display;

    /// Produces the case study for a video.
    ///
    /// Errors are reserved for failed calls (auth, rate limit, network).
    /// A response that misses sections still yields content, with those
    /// fields left empty.
    fn generate(
        &self,
        input: GenerationInput<'_>,
    ) -> impl Future<Output = Result<CaseStudyContent, Self::Error>> + Send;
}
