//! # Case study parser
//!
//! Best-effort extraction of case study fields from a model response.
//!
//! The prompt asks for bracketed markers (`[AGENCY]`, `[IDEA]`, ...) each on
//! its own line. Anything between one known marker and the next becomes that
//! field. Missing markers leave their field empty; parsing never fails.
//! Responses that ignored the markers and answered with a JSON object are
//! accepted as a fallback.

use std::sync::LazyLock;

use case_document::{CaseStudyContent, NarrativeSection, SectionKind};
use itertools::Itertools;
use regex::Regex;
use serde::Deserialize;

/// `[MARKER]` on its own line, optionally wrapped in markdown heading or
/// emphasis characters, optionally followed by an inline value
static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t#>*_]*\[[ \t]*([A-Za-z][A-Za-z _]*?)[ \t]*\][ \t*_:]*(.*)$").unwrap()
});

static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*```[a-zA-Z]*\s*(.*?)\s*```\s*$").unwrap());

const PLACEHOLDERS: &[&str] = &["n/a", "na", "none", "unknown", "not specified", "-", "tbd"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Agency,
    Product,
    Campaign,
    Director,
    ProductionCompany,
    Year,
    Section(SectionKind),
}

impl Marker {
    fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_uppercase().replace(' ', "_");
        let marker = match normalized.as_str() {
            "AGENCY" => Marker::Agency,
            "PRODUCT" | "BRAND" | "CLIENT" => Marker::Product,
            "CAMPAIGN" => Marker::Campaign,
            "DIRECTOR" => Marker::Director,
            "PRODUCTION_COMPANY" => Marker::ProductionCompany,
            "YEAR" => Marker::Year,
            "BRIEF" | "CHALLENGE" => Marker::Section(SectionKind::Brief),
            "IDEA" => Marker::Section(SectionKind::Idea),
            "EXECUTION" => Marker::Section(SectionKind::Execution),
            "RESULTS" => Marker::Section(SectionKind::Results),
            _ => return None,
        };
        Some(marker)
    }
}

/// Parses a model response into case study fields.
///
/// `source_url` and `video` are left at their defaults, the caller fills them.
pub fn parse_case_study(raw: &str) -> CaseStudyContent {
    let markers = MARKER_RE
        .captures_iter(raw)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let marker = Marker::from_label(cap.get(1)?.as_str())?;
            let inline = cap.get(2).map(|m| m.as_str()).unwrap_or_default();
            Some((marker, whole.start(), whole.end(), inline))
        })
        .collect::<Vec<_>>();

    if markers.is_empty() {
        return parse_json_fallback(raw).unwrap_or_default();
    }

    let mut content = CaseStudyContent::default();
    let mut sections: Vec<NarrativeSection> = Vec::new();

    for (idx, (marker, _, end, inline)) in markers.iter().enumerate() {
        let block_end = markers.get(idx + 1).map(|m| m.1).unwrap_or(raw.len());
        let block = &raw[*end..block_end];
        let value = format!("{inline}\n{block}");

        let field = match marker {
            Marker::Agency => &mut content.agency,
            Marker::Product => &mut content.product,
            Marker::Campaign => &mut content.campaign,
            Marker::Director => &mut content.director,
            Marker::ProductionCompany => &mut content.production_company,
            Marker::Year => &mut content.year,
            Marker::Section(kind) => {
                let body = clean_block(&value);
                if !body.is_empty() && !sections.iter().any(|s| s.kind == *kind) {
                    sections.push(NarrativeSection { kind: *kind, body });
                }
                continue;
            }
        };

        // first non-empty occurrence wins
        if field.is_empty() {
            *field = clean_credit(&value);
        }
    }

    sections.sort_by_key(|s| SectionKind::ALL.iter().position(|k| *k == s.kind));
    content.sections = sections;
    content
}

/// Collapses a credit value onto one line and drops placeholder answers
fn clean_credit(value: &str) -> String {
    let line = value
        .split_whitespace()
        .join(" ")
        .trim_matches(|c: char| c == '*' || c == '"' || c.is_whitespace())
        .to_string();

    if PLACEHOLDERS.contains(&line.to_ascii_lowercase().trim_end_matches('.')) {
        return String::new();
    }
    line
}

/// Trims a narrative block while keeping its paragraph breaks
fn clean_block(value: &str) -> String {
    value
        .lines()
        .map(str::trim_end)
        .join("\n")
        .trim()
        .to_string()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LooseCaseStudy {
    agency: String,
    #[serde(alias = "brand", alias = "client")]
    product: String,
    campaign: String,
    director: String,
    production_company: String,
    #[serde(deserialize_with = "string_or_number")]
    year: String,
    #[serde(alias = "challenge")]
    brief: String,
    idea: String,
    execution: String,
    results: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn parse_json_fallback(raw: &str) -> Option<CaseStudyContent> {
    let unfenced = CODE_FENCE_RE
        .captures(raw)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
        .unwrap_or(raw)
        .trim();

    if !unfenced.starts_with('{') {
        return None;
    }

    let loose = serde_json::from_str::<LooseCaseStudy>(unfenced)
        .inspect_err(|e| tracing::debug!(error = %e, "Response is neither marked up nor JSON"))
        .ok()?;

    let sections = [
        (SectionKind::Brief, loose.brief),
        (SectionKind::Idea, loose.idea),
        (SectionKind::Execution, loose.execution),
        (SectionKind::Results, loose.results),
    ]
    .into_iter()
    .map(|(kind, body)| NarrativeSection {
        kind,
        body: clean_block(&body),
    })
    .filter(|s| !s.body.is_empty())
    .collect();

    Some(CaseStudyContent {
        agency: clean_credit(&loose.agency),
        product: clean_credit(&loose.product),
        campaign: clean_credit(&loose.campaign),
        director: clean_credit(&loose.director),
        production_company: clean_credit(&loose.production_company),
        year: clean_credit(&loose.year),
        sections,
        ..Default::default()
    })
}
