pub mod content_generator;
pub mod metadata_fetcher;
pub mod renderer;
pub mod transcript_source;
