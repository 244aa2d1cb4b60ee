//! Highlight color registry
//!
//! Static palette shared by the reader controls and the export
//! formatter. Lookups never fail: unknown color values fall back to
//! the default (yellow) style.

use serde::Serialize;

/// Descriptor for one highlight color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorDescriptor {
    /// Stored color value
    pub value: &'static str,
    /// German display label
    pub label: &'static str,
    /// Background style token
    pub background_class: &'static str,
    /// Border style token
    pub border_class: &'static str,
}

/// The palette, in display order
pub const PALETTE: &[ColorDescriptor] = &[
    ColorDescriptor {
        value: "yellow",
        label: "Gelb",
        background_class: "bg-yellow-200",
        border_class: "border-yellow-400",
    },
    ColorDescriptor {
        value: "green",
        label: "Grün",
        background_class: "bg-green-200",
        border_class: "border-green-400",
    },
    ColorDescriptor {
        value: "blue",
        label: "Blau",
        background_class: "bg-blue-200",
        border_class: "border-blue-400",
    },
    ColorDescriptor {
        value: "pink",
        label: "Rosa",
        background_class: "bg-pink-200",
        border_class: "border-pink-400",
    },
    ColorDescriptor {
        value: "orange",
        label: "Orange",
        background_class: "bg-orange-200",
        border_class: "border-orange-400",
    },
    ColorDescriptor {
        value: "purple",
        label: "Lila",
        background_class: "bg-purple-200",
        border_class: "border-purple-400",
    },
];

/// Style tokens for color values not present in the palette
const DEFAULT_CLASSES: &str = "bg-yellow-200 border-yellow-400";

/// Look up the descriptor for a stored color value
pub fn lookup(value: &str) -> Option<&'static ColorDescriptor> {
    PALETTE.iter().find(|c| c.value == value)
}

/// Combined style tokens for a color value.
///
/// Total over all inputs: unknown values get the default style.
pub fn classes_for(value: &str) -> String {
    match lookup(value) {
        Some(c) => format!("{} {}", c.background_class, c.border_class),
        None => DEFAULT_CLASSES.to_string(),
    }
}

/// German display label for a color value, falling back to the raw value
pub fn label_for(value: &str) -> &str {
    lookup(value).map(|c| c.label).unwrap_or(value)
}
