use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

const MAX_FILENAME_STEM_LEN: usize = 100;
const FALLBACK_FILENAME_STEM: &str = "case_study";

/// Video details resolved through oEmbed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub author: String,
    pub thumbnail_url: String,
    pub author_url: Option<String>,
    pub provider_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    Brief,
    Idea,
    Execution,
    Results,
}

impl SectionKind {
    /// Document order of the narrative sections
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Brief,
        SectionKind::Idea,
        SectionKind::Execution,
        SectionKind::Results,
    ];

    pub fn heading(&self) -> &'static str {
        match self {
            SectionKind::Brief => "The Brief",
            SectionKind::Idea => "The Idea",
            SectionKind::Execution => "The Execution",
            SectionKind::Results => "The Results",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeSection {
    pub kind: SectionKind,
    pub body: String,
}

/// Structured case study produced once per request.
///
/// Every field is best-effort: a value the model did not provide is left as
/// an empty string rather than treated as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudyContent {
    pub source_url: String,
    pub video: VideoMetadata,
    pub agency: String,
    pub product: String,
    pub campaign: String,
    pub director: String,
    pub production_company: String,
    pub year: String,
    pub sections: Vec<NarrativeSection>,
}

impl CaseStudyContent {
    pub fn section(&self, kind: SectionKind) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.body.as_str())
    }

    /// Title used at the top of the rendered document
    pub fn headline(&self) -> &str {
        [&self.campaign, &self.video.title]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("Case Study")
    }

    /// Derives the download filename from agency, product and campaign,
    /// falling back to the video title and then to a fixed stem.
    ///
    /// The result only contains ASCII letters, digits, `-`, `_` and the
    /// `.pdf` extension.
    pub fn filename(&self) -> String {
        let stem = [&self.agency, &self.product, &self.campaign]
            .into_iter()
            .map(|field| sanitize_filename_component(field))
            .filter(|part| !part.is_empty())
            .join("_");

        let mut stem = match stem {
            s if !s.is_empty() => s,
            _ => sanitize_filename_component(&self.video.title),
        };
        if stem.is_empty() {
            stem = FALLBACK_FILENAME_STEM.to_string();
        }

        // ascii only at this point, byte truncation is safe
        stem.truncate(MAX_FILENAME_STEM_LEN);
        let stem = stem.trim_end_matches(['_', '-']);

        format!("{stem}.pdf")
    }
}

/// Replaces every character outside `[A-Za-z0-9_-]` with `_`, collapses
/// repeated underscores and trims separators from both ends.
pub fn sanitize_filename_component(raw: &str) -> String {
    let mut sanitized = String::with_capacity(raw.len());

    for c in raw.chars() {
        let c = if c.is_ascii_alphanumeric() || matches!(c, '-' | '_') {
            c
        } else {
            '_'
        };
        if c == '_' && sanitized.ends_with('_') {
            continue;
        }
        sanitized.push(c);
    }

    sanitized.trim_matches(['_', '-']).to_string()
}
