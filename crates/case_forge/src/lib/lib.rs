mod config;
mod error;
mod llm;
pub mod parser;
mod pipeline;
pub mod server;
pub mod tracing;
pub mod types;
pub mod yt;

pub use config::Config;
pub use error::Error;
pub use llm::openai;
pub use llm::generator::{ContentGenerator, GenerationInput};
pub use pipeline::{builder::CaseStudyPipelineBuilder, CaseStudyPipeline, Stage};
