//! HTML view of a case study, fed to the PDF layout engine.

use chrono::{DateTime, Utc};
use html_escape::encode_safe;

use crate::{CaseStudyContent, SectionKind};

const CASE_STUDY_TEMPLATE: &str = include_str!("./templates/case_study.html");

/// Fills the case study template.
///
/// Every value taken from the video or the model output is escaped before it
/// is substituted, so stray markup in a transcript or title cannot break the
/// document structure.
pub fn render_html(content: &CaseStudyContent, generated_at: DateTime<Utc>) -> String {
    let values = [
        ("headline", escape(content.headline())),
        ("video_title", escape(&content.video.title)),
        ("video_author", escape(&content.video.author)),
        ("credits", credits_html(content)),
        ("sections", sections_html(content)),
        ("source_url", escape(&content.source_url)),
        (
            "generated_at",
            generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        ),
    ];

    fill_template(CASE_STUDY_TEMPLATE, &values)
}

fn credits_html(content: &CaseStudyContent) -> String {
    let credits = [
        ("Agency", &content.agency),
        ("Product", &content.product),
        ("Campaign", &content.campaign),
        ("Director", &content.director),
        ("Production Company", &content.production_company),
        ("Year", &content.year),
    ];

    let mut html = String::new();
    for (label, value) in credits {
        let value = value.trim();
        let value = if value.is_empty() { "-" } else { value };
        html.push_str(&format!(
            "<p class=\"credit\">{label}: {}</p>\n",
            escape(value)
        ));
    }
    html
}

fn sections_html(content: &CaseStudyContent) -> String {
    let mut html = String::new();

    for kind in SectionKind::ALL {
        let Some(body) = content.section(kind).filter(|b| !b.trim().is_empty()) else {
            continue;
        };

        html.push_str(&format!("<h2>{}</h2>\n", kind.heading()));
        for paragraph in paragraphs(body) {
            html.push_str(&format!("<p>{}</p>\n", escape(&paragraph)));
        }
    }
    html
}

/// HTML-escapes a value. The PDF layout engine prints `&amp;` verbatim, so
/// ampersands are spelled out first.
fn escape(value: &str) -> String {
    let value = value.replace(" & ", " and ").replace('&', "+");
    encode_safe(&value).into_owned()
}

/// Splits text on blank lines, joining the lines of each paragraph
fn paragraphs(body: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in body.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    paragraphs
}

/// Single pass `{{key}}` substitution. Substituted values are never scanned
/// again, unknown keys are left in place.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };

        let key = after_open[..end].trim();
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after_open[end + 2..];
    }
    out.push_str(rest);

    out
}
