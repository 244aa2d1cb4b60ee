//! Export pipeline input types
//!
//! Snapshot rows as the hosted backend returns them. The export
//! pipeline treats these as immutable inputs and only ever filters and
//! projects them; creation, editing and deletion happen in the backend.
//!
//! Aliases accept the camelCase field names the web client writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A titled, page-ranged subdivision of a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: Uuid,
    pub title: String,
    #[serde(alias = "pageStart", skip_serializing_if = "Option::is_none")]
    pub page_start: Option<i32>,
    #[serde(alias = "pageEnd", skip_serializing_if = "Option::is_none")]
    pub page_end: Option<i32>,
}

/// A stored text selection with color and optional comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlight {
    pub id: Uuid,
    #[serde(alias = "sectionId")]
    pub section_id: Uuid,
    /// The selected text span
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub color: String,
    /// Marked for later revisiting
    #[serde(alias = "reviewFlag", alias = "markedForReview", default)]
    pub review_flag: bool,
}

/// A free-text entry, optionally anchored to a text selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    #[serde(alias = "sectionId")]
    pub section_id: Uuid,
    /// The anchored text span, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub content: String,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Toggles for one export run
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ExportOptions {
    /// Include highlight blocks
    #[serde(rename = "highlights", default = "default_true")]
    pub include_highlights: bool,
    /// Include note blocks
    #[serde(rename = "notes", default = "default_true")]
    pub include_notes: bool,
    /// Restrict to review-flagged highlights. Notes carry no review
    /// flag, so this mode drops them entirely.
    #[serde(default)]
    pub review_only: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_highlights: true,
            include_notes: true,
            review_only: false,
        }
    }
}

impl Section {
    /// Create a section without page numbers
    pub fn new(title: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            page_start: None,
            page_end: None,
        }
    }

    /// Set the page range
    pub fn with_pages(mut self, start: i32, end: Option<i32>) -> Self {
        self.page_start = Some(start);
        self.page_end = end;
        self
    }
}

impl Highlight {
    /// Create a plain yellow highlight in a section
    pub fn new(section_id: Uuid, text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            section_id,
            text: text.to_string(),
            comment: None,
            color: "yellow".to_string(),
            review_flag: false,
        }
    }

    /// Set the color
    pub fn with_color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    /// Attach a comment
    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    /// Mark for review
    pub fn flagged_for_review(mut self) -> Self {
        self.review_flag = true;
        self
    }
}

impl Note {
    /// Create a note in a section
    pub fn new(section_id: Uuid, content: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            section_id,
            reference: None,
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Anchor the note to a text span
    pub fn with_reference(mut self, reference: &str) -> Self {
        self.reference = Some(reference.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_builders() {
        let section = Section::new("Grenzwerte");
        let highlight = Highlight::new(section.id, "Jede konvergente Folge ist beschränkt.")
            .with_color("blue")
            .with_comment("wichtig")
            .flagged_for_review();

        assert_eq!(highlight.section_id, section.id);
        assert_eq!(highlight.color, "blue");
        assert_eq!(highlight.comment.as_deref(), Some("wichtig"));
        assert!(highlight.review_flag);
    }

    #[test]
    fn test_camel_case_aliases_accepted() {
        let json = r#"{
            "id": "9a0e1f6e-7b3c-4f62-9f2d-0d1c2b3a4958",
            "sectionId": "55f0b1f2-68be-4be2-9f5a-1c36a8f3d6b1",
            "text": "markierter Text",
            "color": "green",
            "reviewFlag": true
        }"#;

        let highlight: Highlight = serde_json::from_str(json).unwrap();
        assert_eq!(highlight.color, "green");
        assert!(highlight.review_flag);
        assert!(highlight.comment.is_none());
    }

    #[test]
    fn test_export_options_defaults() {
        let options = ExportOptions::default();
        assert!(options.include_highlights);
        assert!(options.include_notes);
        assert!(!options.review_only);

        // Empty query string keeps the defaults
        let parsed: ExportOptions = serde_json::from_str("{}").unwrap();
        assert!(parsed.include_highlights);
        assert!(parsed.include_notes);
        assert!(!parsed.review_only);
    }

    #[test]
    fn test_export_options_toggles_are_independent() {
        let parsed: ExportOptions =
            serde_json::from_str(r#"{"highlights": false, "review_only": true}"#).unwrap();
        assert!(!parsed.include_highlights);
        assert!(parsed.include_notes);
        assert!(parsed.review_only);
    }
}
