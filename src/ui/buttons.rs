//! Reader control views
//!
//! The bookmark and edit affordances as pure view values: state comes
//! in through the constructor, interaction goes out through the
//! caller-supplied callback. The structs own no state of their own,
//! so two values built from the same props behave identically.

use html_escape::encode_double_quoted_attribute;

/// Interaction event handed to a control on activation
#[derive(Debug, Default)]
pub struct InteractionEvent {
    propagation_stopped: bool,
}

impl InteractionEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the event from reaching enclosing handlers
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Visibility mode for the edit affordance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Visible only while the enclosing row is hovered
    #[default]
    HoverOnly,
    /// Always visible
    Always,
}

/// Bookmark toggle, fully controlled by the caller
pub struct BookmarkButton<'a> {
    is_bookmarked: bool,
    /// Title of the bookmarked section, for the accessible label
    section_title: &'a str,
    on_toggle: &'a dyn Fn(),
}

impl<'a> BookmarkButton<'a> {
    pub fn new(is_bookmarked: bool, section_title: &'a str, on_toggle: &'a dyn Fn()) -> Self {
        Self {
            is_bookmarked,
            section_title,
            on_toggle,
        }
    }

    /// Activate the control: stop propagation, then delegate.
    pub fn press(&self, event: &mut InteractionEvent) {
        event.stop_propagation();
        (self.on_toggle)();
    }

    /// Style tokens for the current state. The pop animation runs on
    /// the bookmarked state only.
    pub fn class_list(&self) -> String {
        if self.is_bookmarked {
            "bookmark-button bookmarked animate-pop".to_string()
        } else {
            "bookmark-button".to_string()
        }
    }

    /// HTML fragment for the control
    pub fn render(&self) -> String {
        let action = if self.is_bookmarked {
            "Lesezeichen entfernen"
        } else {
            "Lesezeichen setzen"
        };
        let label = format!("{}: {}", action, self.section_title);

        format!(
            "<button type=\"button\" class=\"{}\" aria-pressed=\"{}\" aria-label=\"{}\"><span class=\"icon-bookmark\"></span></button>",
            self.class_list(),
            self.is_bookmarked,
            encode_double_quoted_attribute(&label),
        )
    }
}

/// Edit action, fully controlled by the caller
pub struct EditButton<'a> {
    visibility: Visibility,
    disabled: bool,
    on_edit: &'a dyn Fn(),
}

impl<'a> EditButton<'a> {
    pub fn new(visibility: Visibility, disabled: bool, on_edit: &'a dyn Fn()) -> Self {
        Self {
            visibility,
            disabled,
            on_edit,
        }
    }

    /// Activate the control: stop propagation, then delegate unless
    /// disabled.
    pub fn press(&self, event: &mut InteractionEvent) {
        event.stop_propagation();
        if self.disabled {
            return;
        }
        (self.on_edit)();
    }

    /// Style tokens for the current visibility and disabled state
    pub fn class_list(&self) -> String {
        let mut classes = vec!["edit-button"];
        if self.visibility == Visibility::HoverOnly {
            classes.push("opacity-0");
            classes.push("group-hover:opacity-100");
        }
        if self.disabled {
            classes.push("cursor-not-allowed");
        }
        classes.join(" ")
    }

    /// HTML fragment for the control
    pub fn render(&self) -> String {
        format!(
            "<button type=\"button\" class=\"{}\"{} aria-label=\"Bearbeiten\"><span class=\"icon-edit\"></span></button>",
            self.class_list(),
            if self.disabled { " disabled" } else { "" },
        )
    }
}
