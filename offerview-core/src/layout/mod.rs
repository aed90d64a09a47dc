//! Layout strategies
//!
//! A strategy turns an offer's slots and the current focus index into one
//! [`SlotPlacement`] per visible slot. Strategies are pure; the focus index
//! is owned by [`PreviewRenderer`](crate::preview::PreviewRenderer).
//!
//! ## Built-in Strategies
//!
//! | Mode | Strategy | Uses focus |
//! |------|----------|------------|
//! | `vertical` | [`Vertical`] | no |
//! | `horizontal` | [`Horizontal`] | no |
//! | `single_focus` | [`CarouselSingleFocus`] | yes, every slot placed by an [`OffsetTransform`] |
//! | `tri_focus` | [`CarouselTriFocus`] | yes, only a three-slot window is placed |
//!
//! ## Custom Rules
//!
//! The single-focus carousel accepts any [`OffsetTransform`]:
//!
//! ```rust
//! use offerview_core::layout::{CarouselSingleFocus, OffsetTransform, Transform};
//!
//! struct Fan;
//!
//! impl OffsetTransform for Fan {
//!     fn transform(&self, offset: usize, _count: usize) -> Transform {
//!         Transform {
//!             translate_x: offset as f32 * 40.0,
//!             translate_y: offset as f32 * 10.0,
//!             scale: 0.9,
//!             blur: 0.0,
//!             opacity: 0.8,
//!             z_index: -(offset as i32),
//!         }
//!     }
//! }
//!
//! let strategy = CarouselSingleFocus::with_rule(Box::new(Fan));
//! ```

mod carousel;
mod linear;

pub use carousel::{
    CarouselSingleFocus, CarouselTriFocus, OffsetTransform, StaggerRule, Transform,
    NEIGHBOR_BLUR, NEIGHBOR_OPACITY, NEIGHBOR_SCALE, TRI_FOCUS_SHIFT,
};
pub use linear::{Horizontal, Vertical, HORIZONTAL_SPACING, VERTICAL_SPACING};

use crate::design::ResolvedDesign;
use crate::error::{Error, Result};
use crate::types::Slot;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Computed visual transform for one slot.
///
/// Translations are in abstract layout units relative to the center of the
/// preview; renderers scale them to their own coordinate space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotPlacement {
    /// Position of the slot in [`Offer::slots`](crate::types::Offer::slots)
    pub slot_index: usize,
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
    /// Blur radius; 0.0 means none
    pub blur: f32,
    pub opacity: f32,
    /// Higher values draw above lower ones
    pub z_index: i32,
    pub interactive: bool,
}

impl SlotPlacement {
    /// A fully visible, interactive placement at the given translation.
    pub fn flat(slot_index: usize, translate_x: f32, translate_y: f32) -> Self {
        Self {
            slot_index,
            translate_x,
            translate_y,
            scale: 1.0,
            blur: 0.0,
            opacity: 1.0,
            z_index: 0,
            interactive: true,
        }
    }

    pub fn is_blurred(&self) -> bool {
        self.blur > 0.0
    }
}

/// A presentation mode for an offer preview.
pub trait LayoutStrategy: Send + Sync {
    /// Short identifier, e.g. "tri_focus".
    fn name(&self) -> &str;

    /// Place the slots. The returned sequence preserves slot order and may
    /// omit slots that are not shown.
    fn layout(
        &self,
        slots: &[Slot],
        active_index: usize,
        design: &ResolvedDesign,
    ) -> Vec<SlotPlacement>;

    /// Whether the layout depends on the focus index.
    fn is_carousel(&self) -> bool {
        false
    }

    /// Whether tapping the focused slot's call-to-action also moves focus.
    fn advances_on_cta_tap(&self) -> bool {
        false
    }
}

/// Selects one of the built-in strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    Vertical,
    Horizontal,
    SingleFocus,
    #[default]
    TriFocus,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 4] = [
        LayoutMode::Vertical,
        LayoutMode::Horizontal,
        LayoutMode::SingleFocus,
        LayoutMode::TriFocus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Vertical => "vertical",
            LayoutMode::Horizontal => "horizontal",
            LayoutMode::SingleFocus => "single_focus",
            LayoutMode::TriFocus => "tri_focus",
        }
    }

    /// Human-readable label for footers and headers.
    pub fn display_name(&self) -> &'static str {
        match self {
            LayoutMode::Vertical => "Vertical",
            LayoutMode::Horizontal => "Horizontal",
            LayoutMode::SingleFocus => "Carousel",
            LayoutMode::TriFocus => "Tri-Focus Carousel",
        }
    }

    /// The next mode in [`LayoutMode::ALL`], wrapping around.
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn is_carousel(&self) -> bool {
        matches!(self, LayoutMode::SingleFocus | LayoutMode::TriFocus)
    }

    /// Build the strategy for this mode with its default settings.
    pub fn strategy(&self) -> Box<dyn LayoutStrategy> {
        match self {
            LayoutMode::Vertical => Box::new(Vertical),
            LayoutMode::Horizontal => Box::new(Horizontal),
            LayoutMode::SingleFocus => Box::new(CarouselSingleFocus::default()),
            LayoutMode::TriFocus => Box::new(CarouselTriFocus),
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "vertical" => Ok(LayoutMode::Vertical),
            "horizontal" => Ok(LayoutMode::Horizontal),
            "single_focus" | "carousel" => Ok(LayoutMode::SingleFocus),
            "tri_focus" | "tri" => Ok(LayoutMode::TriFocus),
            _ => Err(Error::InvalidLayoutMode(s.to_string())),
        }
    }
}
