//! Carousel layouts driven by the focus index.

use super::{LayoutStrategy, SlotPlacement};
use crate::cyclic::{relative_offset, OffsetClass};
use crate::design::ResolvedDesign;
use crate::types::Slot;

/// Scale of the two unfocused slots in the tri-focus window
pub const NEIGHBOR_SCALE: f32 = 0.85;
/// Opacity of the two unfocused slots in the tri-focus window
pub const NEIGHBOR_OPACITY: f32 = 0.6;
/// Blur radius of the two unfocused slots in the tri-focus window
pub const NEIGHBOR_BLUR: f32 = 2.0;
/// Vertical shift of the tri-focus neighbors away from the center
pub const TRI_FOCUS_SHIFT: f32 = 110.0;

/// Visual transform for a non-focused carousel slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
    pub blur: f32,
    pub opacity: f32,
    pub z_index: i32,
}

/// Positions a single-focus carousel slot from its offset to the focus.
pub trait OffsetTransform: Send + Sync {
    /// `offset` is in `[1, count)`; the focused slot never reaches the rule.
    fn transform(&self, offset: usize, count: usize) -> Transform;
}

/// Default single-focus rule: spread slots on both sides of the focus.
///
/// Offsets up to `count / 2` go right, the rest wrap around to the left.
/// Each step away from the focus shrinks, fades and blurs the slot a little
/// more and draws it further back.
#[derive(Debug, Clone, Copy)]
pub struct StaggerRule {
    pub spacing: f32,
    pub scale_step: f32,
    pub opacity_step: f32,
    pub blur_step: f32,
}

impl Default for StaggerRule {
    fn default() -> Self {
        Self {
            spacing: 140.0,
            scale_step: 0.15,
            opacity_step: 0.3,
            blur_step: 1.5,
        }
    }
}

impl OffsetTransform for StaggerRule {
    fn transform(&self, offset: usize, count: usize) -> Transform {
        let goes_right = offset <= count / 2;
        let distance = if goes_right { offset } else { count - offset };
        let steps = distance as f32;
        let direction = if goes_right { 1.0 } else { -1.0 };

        Transform {
            translate_x: direction * steps * self.spacing,
            translate_y: 0.0,
            scale: (1.0 - self.scale_step * steps).max(0.3),
            blur: self.blur_step * steps,
            opacity: (1.0 - self.opacity_step * steps).max(0.1),
            z_index: -(distance as i32),
        }
    }
}

/// Horizontal carousel with one centered, interactive slot.
pub struct CarouselSingleFocus {
    rule: Box<dyn OffsetTransform>,
}

impl CarouselSingleFocus {
    pub fn with_rule(rule: Box<dyn OffsetTransform>) -> Self {
        Self { rule }
    }
}

impl Default for CarouselSingleFocus {
    fn default() -> Self {
        Self::with_rule(Box::new(StaggerRule::default()))
    }
}

impl LayoutStrategy for CarouselSingleFocus {
    fn name(&self) -> &str {
        "single_focus"
    }

    fn layout(
        &self,
        slots: &[Slot],
        active_index: usize,
        _design: &ResolvedDesign,
    ) -> Vec<SlotPlacement> {
        let count = slots.len();

        (0..count)
            .map(|index| {
                let offset = relative_offset(index, active_index, count);
                if offset == 0 {
                    return SlotPlacement {
                        z_index: 1,
                        ..SlotPlacement::flat(index, 0.0, 0.0)
                    };
                }

                let t = self.rule.transform(offset, count);
                SlotPlacement {
                    slot_index: index,
                    translate_x: t.translate_x,
                    translate_y: t.translate_y,
                    scale: t.scale,
                    blur: t.blur,
                    opacity: t.opacity,
                    z_index: t.z_index.min(0),
                    interactive: false,
                }
            })
            .collect()
    }

    fn is_carousel(&self) -> bool {
        true
    }
}

/// Vertical three-slot window: the focus in the middle, the next slot
/// below it and the slot two ahead above it. Every other slot is left out
/// of the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct CarouselTriFocus;

impl CarouselTriFocus {
    fn place(index: usize, class: OffsetClass) -> Option<SlotPlacement> {
        let neighbor = |translate_y: f32, z_index: i32| SlotPlacement {
            slot_index: index,
            translate_x: 0.0,
            translate_y,
            scale: NEIGHBOR_SCALE,
            blur: NEIGHBOR_BLUR,
            opacity: NEIGHBOR_OPACITY,
            z_index,
            interactive: false,
        };

        match class {
            OffsetClass::Focused => Some(SlotPlacement {
                z_index: 3,
                ..SlotPlacement::flat(index, 0.0, 0.0)
            }),
            OffsetClass::Next => Some(neighbor(TRI_FOCUS_SHIFT, 2)),
            OffsetClass::Previous => Some(neighbor(-TRI_FOCUS_SHIFT, 1)),
            OffsetClass::Hidden => None,
        }
    }
}

impl LayoutStrategy for CarouselTriFocus {
    fn name(&self) -> &str {
        "tri_focus"
    }

    fn layout(
        &self,
        slots: &[Slot],
        active_index: usize,
        _design: &ResolvedDesign,
    ) -> Vec<SlotPlacement> {
        let count = slots.len();

        (0..count)
            .filter_map(|index| {
                let offset = relative_offset(index, active_index, count);
                Self::place(index, OffsetClass::classify(offset))
            })
            .collect()
    }

    fn is_carousel(&self) -> bool {
        true
    }

    fn advances_on_cta_tap(&self) -> bool {
        true
    }
}
