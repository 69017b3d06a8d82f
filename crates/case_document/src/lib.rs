//! # Case Document
//!
//! Domain types shared by the case study service together with the
//! rendering layer that turns a generated case study into a PDF.
//!
//! Rendering goes through the [`DocumentRenderer`] trait so callers can swap
//! the `printpdf` backed [`PdfRenderer`] for a fake in tests.

mod domain;
mod renderer;

pub use domain::{
    sanitize_filename_component, CaseStudyContent, NarrativeSection, SectionKind, VideoMetadata,
};
pub use renderer::html::render_html;
pub use renderer::pdf::PdfRenderer;
pub use renderer::{DocumentRenderer, RenderError};
