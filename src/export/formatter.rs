//! Annotation export formatter
//!
//! Generates the downloadable markdown rendering of a document's
//! highlights and notes. Pure string building: the inputs are never
//! mutated, section and annotation order is preserved as given, and
//! the output is fully determined by the inputs plus the timestamp.

use chrono::{DateTime, Utc};

use super::types::{ExportOptions, Highlight, Note, Section};
use crate::colors;

/// Fixed attribution footer
const ATTRIBUTION: &str = "Exportiert aus Digitales Skript";

/// Suffix appended to the color label of a review-flagged highlight
const REVIEW_SUFFIX: &str = "[Wiederholung]";

/// Generate the export for the current point in time.
pub fn export_markdown(
    title: &str,
    sections: &[Section],
    highlights: &[Highlight],
    notes: &[Note],
    options: ExportOptions,
) -> String {
    generate(title, sections, highlights, notes, options, Utc::now())
}

/// Generate the export with an explicit generation timestamp.
///
/// The timestamp is the only non-deterministic input, so it is a
/// parameter here; identical arguments produce identical output.
pub fn generate(
    title: &str,
    sections: &[Section],
    highlights: &[Highlight],
    notes: &[Note],
    options: ExportOptions,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", title));
    out.push_str(&format!(
        "*Erstellt am {} Uhr*\n\n",
        generated_at.format("%d.%m.%Y, %H:%M")
    ));
    out.push_str("---\n\n");

    // Review-only mode keeps flagged highlights. Notes carry no review
    // flag, so that mode exports no notes at all (documented policy).
    let highlights: Vec<&Highlight> = if options.review_only {
        highlights.iter().filter(|h| h.review_flag).collect()
    } else {
        highlights.iter().collect()
    };
    let notes: Vec<&Note> = if options.review_only {
        Vec::new()
    } else {
        notes.iter().collect()
    };

    let summary = summary_line(&highlights, &notes, options);
    if !summary.is_empty() {
        out.push_str(&format!("**Inhalt:** {}\n\n", summary));
    }

    for section in sections {
        let section_highlights: Vec<&&Highlight> = if options.include_highlights {
            highlights
                .iter()
                .filter(|h| h.section_id == section.id)
                .collect()
        } else {
            Vec::new()
        };
        let section_notes: Vec<&&Note> = if options.include_notes {
            notes.iter().filter(|n| n.section_id == section.id).collect()
        } else {
            Vec::new()
        };

        // Sections contributing nothing under the active toggles are
        // skipped entirely, heading included.
        if section_highlights.is_empty() && section_notes.is_empty() {
            continue;
        }

        out.push_str(&format!("## {}\n", section.title));
        if let Some(pages) = page_label(section) {
            out.push_str(&format!("*{}*\n", pages));
        }
        out.push('\n');

        if !section_highlights.is_empty() {
            out.push_str("### Markierungen\n\n");
            for highlight in &section_highlights {
                let mut label = colors::label_for(&highlight.color).to_string();
                if highlight.review_flag {
                    label.push(' ');
                    label.push_str(REVIEW_SUFFIX);
                }
                out.push_str(&format!("> **{}**\n", label));
                out.push_str(&format!("> \"{}\"\n", highlight.text));
                if let Some(comment) = &highlight.comment {
                    out.push_str(&format!("> Kommentar: {}\n", comment));
                }
                out.push('\n');
            }
        }

        if !section_notes.is_empty() {
            out.push_str("### Notizen\n\n");
            for note in &section_notes {
                out.push_str(&format!("**{}**\n", note.created_at.format("%d.%m.%Y")));
                if let Some(reference) = &note.reference {
                    out.push_str(&format!("> \"{}\"\n", reference));
                }
                out.push('\n');
                out.push_str(&note.content);
                out.push_str("\n\n---\n\n");
            }
        }
    }

    out.push_str("---\n\n");
    out.push_str(&format!("*{}*\n", ATTRIBUTION));

    out
}

/// Summary of the enabled categories with counts.
///
/// The review sub-stat is omitted while review-only filtering is
/// active (the main count already is the review count) and when no
/// highlight is flagged. The note count is omitted in review-only
/// mode along with the notes themselves.
fn summary_line(highlights: &[&Highlight], notes: &[&Note], options: ExportOptions) -> String {
    let mut parts = Vec::new();

    if options.include_highlights {
        let mut part = count_label(highlights.len(), "Markierung", "Markierungen");
        if !options.review_only {
            let review_count = highlights.iter().filter(|h| h.review_flag).count();
            if review_count > 0 {
                part.push_str(&format!(" (davon {} zur Wiederholung)", review_count));
            }
        }
        parts.push(part);
    }

    if options.include_notes && !options.review_only {
        parts.push(count_label(notes.len(), "Notiz", "Notizen"));
    }

    parts.join(", ")
}

fn count_label(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("1 {}", singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Page annotation for a section heading.
///
/// A single page when start and end coincide or the end is absent, a
/// range otherwise; nothing without a start page.
fn page_label(section: &Section) -> Option<String> {
    let start = section.page_start?;
    match section.page_end {
        Some(end) if end != start => Some(format!("Seite {} - {}", start, end)),
        _ => Some(format!("Seite {}", start)),
    }
}
