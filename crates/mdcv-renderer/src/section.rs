//! Per-section rendering rules.
//!
//! Each recognized section kind has one rule set that turns the
//! section's block tree into presentation-ready markup. The rules are
//! additive: a block that matches no rule serializes with its default
//! markup rather than failing the render.

use std::fmt::Write;
use std::sync::LazyLock;

use mdcv_core::{Section, SectionKind};
use regex::Regex;

use crate::block::{Block, Inline, parse_blocks, plain_text};
use crate::html::{InlineOptions, escape_html, write_block_default, write_inlines};

/// Paragraphs that act as subsection headers within a job entry.
const JOB_SUBSECTION_HEADERS: [&str; 3] = ["Key achievements:", "Achievements:", "Notable clients:"];

/// Matches a job period: a month/year range ending in a month/year or
/// "Present", or a bare year / year range. Em dash, en dash and hyphen
/// are all accepted.
static JOB_PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    let month = r"(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*";
    Regex::new(&format!(
        r"^(?:{month} \d{{4}}|\d{{4}})(?:\s*[—–-]\s*(?:{month} \d{{4}}|\d{{4}}|Present))?$"
    ))
    .expect("job period pattern is valid")
});

/// Render a section to a self-contained HTML block.
///
/// Applies the rule set for the section's kind and wraps the result in
/// a titled container. Sections with unrecognized names render to an
/// empty string (they are dropped, not reported).
#[must_use]
pub fn render_section(section: &Section) -> String {
    let Some(kind) = SectionKind::from_name(&section.name) else {
        return String::new();
    };

    let blocks = parse_blocks(&section.body);
    let mut out = String::with_capacity(section.body.len() * 2);
    write!(
        out,
        r#"<section class="section"><h2 class="section-title">{}</h2>"#,
        escape_html(&section.name)
    )
    .unwrap();

    match kind {
        SectionKind::Skills => write_skills(&blocks, &mut out),
        SectionKind::Details => write_details(&blocks, &mut out),
        SectionKind::Links => write_links(&blocks, &mut out),
        SectionKind::Profile => write_profile(&blocks, &mut out),
        SectionKind::EmploymentHistory => write_employment_history(&blocks, &mut out),
        SectionKind::References => write_references(&blocks, &mut out),
    }

    out.push_str("</section>");
    out
}

/// Skills: the bullet list becomes a grid of `<div>` items. The items
/// are presentational blocks, not a semantic list.
fn write_skills(blocks: &[Block], out: &mut String) {
    let options = InlineOptions::default();
    for block in blocks {
        match block {
            Block::List { items } => {
                out.push_str(r#"<div class="skills-list">"#);
                for item in items {
                    out.push_str(r#"<div class="skill-item">"#);
                    write_inlines(item, options, out);
                    out.push_str("</div>");
                }
                out.push_str("</div>");
            }
            other => write_block_default(other, options, out),
        }
    }
}

/// Details: each `**Label** value` paragraph becomes a labeled
/// key/value row with the label and value in separate elements.
fn write_details(blocks: &[Block], out: &mut String) {
    let options = InlineOptions::default();
    for block in blocks {
        match block {
            Block::Paragraph(inlines) => {
                out.push_str(r#"<p class="details-item">"#);
                match inlines.split_first() {
                    Some((Inline::Strong(label), value)) => {
                        out.push_str(r#"<strong class="details-label">"#);
                        write_inlines(label, options, out);
                        out.push_str("</strong>");
                        out.push_str(r#"<span class="details-value">"#);
                        write_value_trimmed(value, options, out);
                        out.push_str("</span>");
                    }
                    _ => write_inlines(inlines, options, out),
                }
                out.push_str("</p>");
            }
            other => write_block_default(other, options, out),
        }
    }
}

/// Serialize a details value with the leading separator space removed.
fn write_value_trimmed(inlines: &[Inline], options: InlineOptions<'_>, out: &mut String) {
    match inlines.split_first() {
        Some((Inline::Text(text), rest)) => {
            let mut trimmed = vec![Inline::Text(text.trim_start().to_owned())];
            trimmed.extend_from_slice(rest);
            write_inlines(&trimmed, options, out);
        }
        _ => write_inlines(inlines, options, out),
    }
}

/// Links: each paragraph becomes a row and every anchor is tagged as a
/// portfolio link.
fn write_links(blocks: &[Block], out: &mut String) {
    let options = InlineOptions {
        link_class: Some("portfolio-link"),
        contact_spans: false,
    };
    for block in blocks {
        match block {
            Block::Paragraph(inlines) => {
                out.push_str(r#"<p class="links-item">"#);
                write_inlines(inlines, options, out);
                out.push_str("</p>");
            }
            other => write_block_default(other, options, out),
        }
    }
}

/// Profile: paragraphs get typography classes.
fn write_profile(blocks: &[Block], out: &mut String) {
    let options = InlineOptions::default();
    for block in blocks {
        match block {
            Block::Paragraph(inlines) => {
                out.push_str(r#"<p class="profile-text">"#);
                write_inlines(inlines, options, out);
                out.push_str("</p>");
            }
            other => write_block_default(other, options, out),
        }
    }
}

/// Employment History: each heading is a job title opening a job-entry
/// card. The paragraph immediately after a title that matches the date
/// pattern becomes the period badge; the fixed subsection phrases
/// become headers; everything else is description text. Lists are
/// achievements. The card closes at the next title or the end of the
/// section.
fn write_employment_history(blocks: &[Block], out: &mut String) {
    let options = InlineOptions::default();
    let mut entry_open = false;
    let mut after_title = false;

    for block in blocks {
        match block {
            Block::Heading { content, .. } => {
                if entry_open {
                    out.push_str("</div>");
                }
                out.push_str(r#"<div class="job-entry"><h3 class="job-title">"#);
                write_inlines(content, options, out);
                out.push_str("</h3>");
                entry_open = true;
                after_title = true;
            }
            Block::Paragraph(inlines) => {
                let text = plain_text(inlines);
                let text = text.trim();
                if after_title && JOB_PERIOD.is_match(text) {
                    out.push_str(r#"<span class="job-period">"#);
                    write_inlines(inlines, options, out);
                    out.push_str("</span>");
                } else if JOB_SUBSECTION_HEADERS.contains(&text) {
                    out.push_str(r#"<h4 class="achievements-header">"#);
                    write_inlines(inlines, options, out);
                    out.push_str("</h4>");
                } else {
                    out.push_str(r#"<p class="job-description">"#);
                    write_inlines(inlines, options, out);
                    out.push_str("</p>");
                }
                after_title = false;
            }
            Block::List { items } => {
                out.push_str(r#"<ul class="achievements-list">"#);
                for item in items {
                    out.push_str("<li>");
                    write_inlines(item, options, out);
                    out.push_str("</li>");
                }
                out.push_str("</ul>");
                after_title = false;
            }
        }
    }

    if entry_open {
        out.push_str("</div>");
    }
}

/// References: each heading opens a reference card. The following
/// paragraph carries the reference's title/position, with contact
/// links (`mailto:`/`tel:`) tagged as contact spans and line breaks
/// separating position text from the links.
fn write_references(blocks: &[Block], out: &mut String) {
    let options = InlineOptions {
        link_class: None,
        contact_spans: true,
    };
    let mut entry_open = false;

    for block in blocks {
        match block {
            Block::Heading { content, .. } => {
                if entry_open {
                    out.push_str("</div>");
                }
                out.push_str(r#"<div class="reference-entry"><h3 class="reference-name">"#);
                write_inlines(content, options, out);
                out.push_str("</h3>");
                entry_open = true;
            }
            Block::Paragraph(inlines) => {
                out.push_str(r#"<p class="reference-title">"#);
                write_inlines(inlines, options, out);
                out.push_str("</p>");
            }
            other => write_block_default(other, options, out),
        }
    }

    if entry_open {
        out.push_str("</div>");
    }
}
