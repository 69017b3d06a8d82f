pub mod builder;

use std::{fmt, sync::Arc};

use case_document::{CaseStudyContent, DocumentRenderer, VideoMetadata};

use crate::{
    types::{CaseStudyDocument, VideoRequest},
    yt::{resolve_transcript, MetadataFetcher, TranscriptSource, VideoUrl},
    ContentGenerator, Error, GenerationInput,
};

/// Steps a request moves through, in order. Any step may end in an error
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    MetadataFetched,
    TranscriptResolved,
    ContentGenerated,
    Rendered,
    Responded,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Stage::Received => "RECEIVED",
            Stage::MetadataFetched => "METADATA_FETCHED",
            Stage::TranscriptResolved => "TRANSCRIPT_RESOLVED",
            Stage::ContentGenerated => "CONTENT_GENERATED",
            Stage::Rendered => "RENDERED",
            Stage::Responded => "RESPONDED",
        };
        f.write_str(stage)
    }
}

// Turns a YouTube URL into a case study PDF, one request at a time
#[derive(Debug)]
pub struct CaseStudyPipeline<M, T, G, R>
where
    M: MetadataFetcher + Send + Sync + 'static,
    T: TranscriptSource + Send + Sync + 'static,
    G: ContentGenerator + Send + Sync + 'static,
    R: DocumentRenderer + Send + Sync + 'static,
{
    metadata_fetcher: M,
    transcript_source: T,
    generator: G,
    renderer: Arc<R>,
}

impl<M, T, G, R> CaseStudyPipeline<M, T, G, R>
where
    M: MetadataFetcher + Send + Sync + 'static,
    T: TranscriptSource + Send + Sync + 'static,
    G: ContentGenerator + Send + Sync + 'static,
    R: DocumentRenderer + Send + Sync + 'static,
{
    pub fn new(metadata_fetcher: M, transcript_source: T, generator: G, renderer: R) -> Self {
        CaseStudyPipeline {
            metadata_fetcher,
            transcript_source,
            generator,
            renderer: Arc::new(renderer),
        }
    }

    /// Resolves title, author and thumbnail for the video
    #[tracing::instrument(skip(self), fields(provider = M::PROVIDER))]
    async fn fetch_metadata(&self, video: &VideoUrl) -> Result<VideoMetadata, Error> {
        self.metadata_fetcher
            .fetch_metadata(video)
            .await
            .map_err(|e| Error::UpstreamFetch(e.to_string()))
    }

    #[tracing::instrument(skip_all)]
    async fn generate_content(
        &self,
        video: &VideoUrl,
        metadata: &VideoMetadata,
        transcript: &str,
    ) -> Result<CaseStudyContent, Error> {
        let input = GenerationInput {
            source_url: video.as_str(),
            metadata,
            transcript,
        };

        self.generator
            .generate(input)
            .await
            .map_err(|e| Error::Generation(e.to_string()))
    }

    /// Renders on the blocking pool, layout is CPU bound
    #[tracing::instrument(skip_all)]
    async fn render(&self, content: CaseStudyContent) -> Result<(CaseStudyContent, Vec<u8>), Error> {
        let renderer = Arc::clone(&self.renderer);

        let (content, result) = tokio::task::spawn_blocking(move || {
            let result = renderer.render(&content);
            (content, result)
        })
        .await
        .map_err(|e| Error::Render(format!("render task failed: {e}")))?;

        let pdf = result?;
        if pdf.is_empty() {
            return Err(Error::Render("renderer produced an empty document".into()));
        }

        Ok((content, pdf))
    }

    /// Runs every step for one request.
    ///
    /// The URL is validated before any upstream call. A missing transcript is
    /// not an error, every other failed step aborts the run and no PDF is
    /// produced.
    #[tracing::instrument(skip_all, fields(url = %request.url))]
    pub async fn run(&self, request: VideoRequest) -> Result<CaseStudyDocument, Error> {
        let video = VideoUrl::parse(&request.url)
            .inspect_err(|e| tracing::warn!(error = %e, "Rejected video URL"))?;
        tracing::info!(stage = %Stage::Received, video_id = video.video_id());

        let metadata = self.fetch_metadata(&video).await?;
        tracing::info!(stage = %Stage::MetadataFetched, title = %metadata.title);

        let transcript = resolve_transcript(
            &self.transcript_source,
            video.video_id(),
            request.transcript.as_deref(),
        )
        .await;
        tracing::info!(
            stage = %Stage::TranscriptResolved,
            status = %transcript.status,
            chars = transcript.text.len()
        );

        let content = self
            .generate_content(&video, &metadata, &transcript.text)
            .await?;
        tracing::info!(
            stage = %Stage::ContentGenerated,
            agency = %content.agency,
            campaign = %content.campaign
        );

        let (content, pdf) = self.render(content).await?;
        tracing::info!(stage = %Stage::Rendered, bytes = pdf.len());

        Ok(CaseStudyDocument {
            filename: content.filename(),
            pdf,
            content,
            transcript_status: transcript.status,
        })
    }
}
