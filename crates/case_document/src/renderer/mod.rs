pub mod html;
pub mod pdf;

use crate::CaseStudyContent;

pub trait DocumentRenderer {
    /// Renders the case study into a complete PDF byte stream
    fn render(&self, content: &CaseStudyContent) -> Result<Vec<u8>, RenderError>;
}

impl<T: DocumentRenderer + ?Sized> DocumentRenderer for std::sync::Arc<T> {
    fn render(&self, content: &CaseStudyContent) -> Result<Vec<u8>, RenderError> {
        (**self).render(content)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to lay out HTML: {0}")]
    Layout(String),
    #[error("PDF writer produced no output")]
    EmptyOutput,
}
