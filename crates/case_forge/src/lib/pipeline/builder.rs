use case_document::DocumentRenderer;

use crate::{
    yt::{MetadataFetcher, TranscriptSource},
    CaseStudyPipeline, ContentGenerator,
};

pub struct CaseStudyPipelineBuilder<M = (), T = (), G = (), R = ()> {
    metadata_fetcher: M,
    transcript_source: T,
    generator: G,
    renderer: R,
}

impl CaseStudyPipelineBuilder {
    pub fn new() -> Self {
        Self {
            metadata_fetcher: (),
            transcript_source: (),
            generator: (),
            renderer: (),
        }
    }
}

impl Default for CaseStudyPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<M, T, G, R> CaseStudyPipelineBuilder<M, T, G, R> {
    pub fn metadata_fetcher<M2: MetadataFetcher + Send + Sync + 'static>(
        self,
        metadata_fetcher: M2,
    ) -> CaseStudyPipelineBuilder<M2, T, G, R> {
        CaseStudyPipelineBuilder {
            metadata_fetcher,
            transcript_source: self.transcript_source,
            generator: self.generator,
            renderer: self.renderer,
        }
    }

    pub fn transcript_source<T2: TranscriptSource + Send + Sync + 'static>(
        self,
        transcript_source: T2,
    ) -> CaseStudyPipelineBuilder<M, T2, G, R> {
        CaseStudyPipelineBuilder {
            metadata_fetcher: self.metadata_fetcher,
            transcript_source,
            generator: self.generator,
            renderer: self.renderer,
        }
    }

    pub fn generator<G2: ContentGenerator + Send + Sync + 'static>(
        self,
        generator: G2,
    ) -> CaseStudyPipelineBuilder<M, T, G2, R> {
        CaseStudyPipelineBuilder {
            metadata_fetcher: self.metadata_fetcher,
            transcript_source: self.transcript_source,
            generator,
            renderer: self.renderer,
        }
    }

    pub fn renderer<R2: DocumentRenderer + Send + Sync + 'static>(
        self,
        renderer: R2,
    ) -> CaseStudyPipelineBuilder<M, T, G, R2> {
        CaseStudyPipelineBuilder {
            metadata_fetcher: self.metadata_fetcher,
            transcript_source: self.transcript_source,
            generator: self.generator,
            renderer,
        }
    }
}

impl<M, T, G, R> CaseStudyPipelineBuilder<M, T, G, R>
where
    M: MetadataFetcher + Send + Sync + 'static,
    T: TranscriptSource + Send + Sync + 'static,
    G: ContentGenerator + Send + Sync + 'static,
    R: DocumentRenderer + Send + Sync + 'static,
{
    pub fn build(self) -> CaseStudyPipeline<M, T, G, R> {
        CaseStudyPipeline::new(
            self.metadata_fetcher,
            self.transcript_source,
            self.generator,
            self.renderer,
        )
    }
}
