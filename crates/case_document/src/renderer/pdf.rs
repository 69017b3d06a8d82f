use std::collections::BTreeMap;

use chrono::Utc;
use printpdf::{GeneratePdfOptions, PdfDocument, PdfSaveOptions};

use crate::{render_html, CaseStudyContent, DocumentRenderer, RenderError};

/// Lays out the case study HTML with `printpdf` and serializes it in memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfRenderer;

impl DocumentRenderer for PdfRenderer {
    #[tracing::instrument(skip_all, fields(headline = %content.headline()))]
    fn render(&self, content: &CaseStudyContent) -> Result<Vec<u8>, RenderError> {
        let html = render_html(content, Utc::now());
        let mut warnings = Vec::new();

        // no embedded images or custom fonts, the built-in sans face is used
        let document = PdfDocument::from_html(
            &html,
            &BTreeMap::new(),
            &BTreeMap::new(),
            &GeneratePdfOptions::default(),
            &mut warnings,
        )
        .map_err(RenderError::Layout)
        .inspect_err(|e| tracing::error!(error = %e, "Failed to lay out case study HTML"))?;

        let bytes = document.save(&PdfSaveOptions::default(), &mut warnings);

        if !warnings.is_empty() {
            tracing::debug!(count = warnings.len(), "PDF generation produced warnings");
        }

        if bytes.is_empty() {
            return Err(RenderError::EmptyOutput);
        }

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NarrativeSection, SectionKind, VideoMetadata};

    #[test]
    fn test_renders_pdf_bytes() {
        let content = CaseStudyContent {
            source_url: "https://youtube.com/watch?v=abc123".into(),
            video: VideoMetadata {
                title: "Demo Ad".into(),
                author: "Acme".into(),
                ..Default::default()
            },
            agency: "Acme Creative".into(),
            sections: vec![NarrativeSection {
                kind: SectionKind::Brief,
                body: "A short brief <with> markup & symbols.".into(),
            }],
            ..Default::default()
        };

        let bytes = PdfRenderer.render(&content).expect("render should succeed");
        assert!(bytes.starts_with(b"%PDF-"), "output is not a PDF");
    }

    #[test]
    fn test_renders_empty_case_study() {
        let bytes = PdfRenderer
            .render(&CaseStudyContent::default())
            .expect("empty content should still render");
        assert!(bytes.starts_with(b"%PDF-"), "output is not a PDF");
    }

    #[test]
    fn test_renders_every_credit_and_section() {
        let content = CaseStudyContent {
            source_url: "https://youtube.com/watch?v=abc123&t=4".into(),
            agency: "Saatchi & Saatchi".into(),
            product: "Widget".into(),
            campaign: "Launch".into(),
            director: "Jane Doe".into(),
            production_company: "Mock Films".into(),
            year: "2024".into(),
            sections: SectionKind::ALL
                .into_iter()
                .map(|kind| NarrativeSection {
                    kind,
                    body: "First paragraph.\n\nSecond paragraph.".into(),
                })
                .collect(),
            ..Default::default()
        };

        let bytes = PdfRenderer.render(&content).expect("render should succeed");
        assert!(bytes.starts_with(b"%PDF-"), "output is not a PDF");
    }
}
