//! # Card Templates
//!
//! The fixed catalog of card styles a classified can be rendered with.
//!
//! | Id | Name | Background | Border | Border width |
//! |----|------|------------|--------|--------------|
//! | 1 | Classic | `#FFFFFF` | `#000000` | 2 |
//! | 2 | Sunrise | `#FFF8E1` | `#E65100` | 3 |
//! | 3 | Ocean | `#E3F2FD` | `#0D47A1` | 3 |
//! | 4 | Festive | `#FCE4EC` | `#880E4F` | 4 |
//!
//! ## Usage
//!
//! ```
//! use adcard::template;
//!
//! let classic = template::by_id(1).unwrap();
//! assert_eq!(classic.name, "Classic");
//! assert!(template::by_id(9).is_none());
//! ```

use serde::Serialize;

use crate::render::Color;

/// A card style: background fill plus a stroked border.
///
/// The border is painted with three times `border_width` as its stroke
/// weight, see [`crate::render::layout`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Template {
    /// Catalog identifier (1..=4)
    pub id: u8,

    /// Display name
    pub name: &'static str,

    /// Card fill color
    pub background: Color,

    /// Border stroke color
    pub border: Color,

    /// Nominal border width in pixels
    pub border_width: f32,

    /// Thumbnail shown in the template picker. Not used when rendering.
    pub preview_path: &'static str,
}

impl Template {
    pub const CLASSIC: Self = Self {
        id: 1,
        name: "Classic",
        background: Color::rgb(0xFF, 0xFF, 0xFF),
        border: Color::rgb(0x00, 0x00, 0x00),
        border_width: 2.0,
        preview_path: "templates/template-1.png",
    };

    pub const SUNRISE: Self = Self {
        id: 2,
        name: "Sunrise",
        background: Color::rgb(0xFF, 0xF8, 0xE1),
        border: Color::rgb(0xE6, 0x51, 0x00),
        border_width: 3.0,
        preview_path: "templates/template-2.png",
    };

    pub const OCEAN: Self = Self {
        id: 3,
        name: "Ocean",
        background: Color::rgb(0xE3, 0xF2, 0xFD),
        border: Color::rgb(0x0D, 0x47, 0xA1),
        border_width: 3.0,
        preview_path: "templates/template-3.png",
    };

    pub const FESTIVE: Self = Self {
        id: 4,
        name: "Festive",
        background: Color::rgb(0xFC, 0xE4, 0xEC),
        border: Color::rgb(0x88, 0x0E, 0x4F),
        border_width: 4.0,
        preview_path: "templates/template-4.png",
    };
}

/// All templates, in catalog order.
pub const TEMPLATES: [Template; 4] = [
    Template::CLASSIC,
    Template::SUNRISE,
    Template::OCEAN,
    Template::FESTIVE,
];

/// Look up a template by its catalog id.
pub fn by_id(id: u8) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}
