use case_document::{CaseStudyContent, DocumentRenderer, RenderError};
use std::sync::{Arc, Mutex};

pub const FAKE_PDF: &[u8] = b"%PDF-1.7\n% mock document\n%%EOF\n";

#[derive(Clone)]
pub struct MockRenderer {
    pub calls: Arc<Mutex<Vec<CaseStudyContent>>>,
    pub fail_with: Option<String>,
}

impl Default for MockRenderer {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }
}

impl MockRenderer {
    pub fn failing(msg: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl DocumentRenderer for MockRenderer {
    fn render(&self, content: &CaseStudyContent) -> Result<Vec<u8>, RenderError> {
        self.calls.lock().unwrap().push(content.clone());
        if let Some(ref msg) = self.fail_with {
            return Err(RenderError::Layout(msg.clone()));
        }
        Ok(FAKE_PDF.to_vec())
    }
}
