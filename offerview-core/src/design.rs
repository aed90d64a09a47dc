//! Design-config resolution.
//!
//! A [`DesignConfig`] may leave any field unset. [`resolve_design_config`]
//! fills each field independently once, so layouts and renderers never
//! carry their own fallbacks.

use crate::types::{non_empty, DesignConfig};
use serde::Serialize;

// ========== Default Palette ==========

/// Title text when no title color is set
pub const DEFAULT_TITLE_COLOR: &str = "#ffffff";
/// Slot text when no slot font color is set
pub const DEFAULT_SLOT_FONT_COLOR: &str = "#ffffff";
/// Call-to-action button color
pub const DEFAULT_CTA_COLOR: &str = "#22c55e";
/// Translucent fill of the glass slot treatment
pub const GLASS_FILL: &str = "rgba(255, 255, 255, 0.1)";
/// Border of the glass slot treatment
pub const GLASS_BORDER: &str = "rgba(255, 255, 255, 0.2)";
/// Backdrop blur radius of the glass slot treatment, in pixels
pub const GLASS_BACKDROP_BLUR: f32 = 10.0;

/// Font selection after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "family", rename_all = "snake_case")]
pub enum FontChoice {
    /// Use whatever font the surrounding context provides
    Inherit,
    Named(String),
}

impl FontChoice {
    fn from_option(font: &Option<String>) -> Self {
        match non_empty(font) {
            Some(family) => FontChoice::Named(family),
            None => FontChoice::Inherit,
        }
    }
}

/// Background, border and backdrop treatment of a slot card.
///
/// The variants are complete bundles: an explicit background color turns
/// off the border and backdrop blur together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotStyle {
    /// Explicit background color, no border, no backdrop blur
    Solid { background: String },
    /// Translucent fill with a light border and backdrop blur
    Glass {
        fill: String,
        border: String,
        backdrop_blur: f32,
    },
}

impl SlotStyle {
    pub fn glass() -> Self {
        SlotStyle::Glass {
            fill: GLASS_FILL.to_string(),
            border: GLASS_BORDER.to_string(),
            backdrop_blur: GLASS_BACKDROP_BLUR,
        }
    }

    pub fn is_glass(&self) -> bool {
        matches!(self, SlotStyle::Glass { .. })
    }

    /// Fill color of the card, whichever bundle is active.
    pub fn background(&self) -> &str {
        match self {
            SlotStyle::Solid { background } => background,
            SlotStyle::Glass { fill, .. } => fill,
        }
    }

    pub fn border(&self) -> Option<&str> {
        match self {
            SlotStyle::Solid { .. } => None,
            SlotStyle::Glass { border, .. } => Some(border),
        }
    }
}

/// Fully populated design, the output of [`resolve_design_config`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedDesign {
    pub image_url: Option<String>,
    pub title_font: FontChoice,
    pub title_color: String,
    pub slot_font: FontChoice,
    pub slot_font_color: String,
    pub slot_style: SlotStyle,
    pub cta_color: String,
}

impl Default for ResolvedDesign {
    fn default() -> Self {
        resolve_design_config(&DesignConfig::default())
    }
}

/// Apply built-in defaults to every unset field of `partial`.
pub fn resolve_design_config(partial: &DesignConfig) -> ResolvedDesign {
    let slot_style = match non_empty(&partial.slot_background_color) {
        Some(background) => SlotStyle::Solid { background },
        None => SlotStyle::glass(),
    };

    ResolvedDesign {
        image_url: non_empty(&partial.image_url),
        title_font: FontChoice::from_option(&partial.title_font),
        title_color: non_empty(&partial.title_color)
            .unwrap_or_else(|| DEFAULT_TITLE_COLOR.to_string()),
        slot_font: FontChoice::from_option(&partial.slot_font),
        slot_font_color: non_empty(&partial.slot_font_color)
            .unwrap_or_else(|| DEFAULT_SLOT_FONT_COLOR.to_string()),
        slot_style,
        cta_color: non_empty(&partial.cta_color).unwrap_or_else(|| DEFAULT_CTA_COLOR.to_string()),
    }
}
