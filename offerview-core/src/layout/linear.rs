//! Stack and row layouts: every slot visible, no focus.

use super::{LayoutStrategy, SlotPlacement};
use crate::design::ResolvedDesign;
use crate::types::Slot;

/// Distance between slot origins in the vertical stack
pub const VERTICAL_SPACING: f32 = 120.0;
/// Distance between slot origins in the horizontal row
pub const HORIZONTAL_SPACING: f32 = 160.0;

/// Single column, top to bottom in slot order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vertical;

impl LayoutStrategy for Vertical {
    fn name(&self) -> &str {
        "vertical"
    }

    fn layout(
        &self,
        slots: &[Slot],
        _active_index: usize,
        _design: &ResolvedDesign,
    ) -> Vec<SlotPlacement> {
        (0..slots.len())
            .map(|i| SlotPlacement::flat(i, 0.0, i as f32 * VERTICAL_SPACING))
            .collect()
    }
}

/// Single row, left to right in slot order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Horizontal;

impl LayoutStrategy for Horizontal {
    fn name(&self) -> &str {
        "horizontal"
    }

    fn layout(
        &self,
        slots: &[Slot],
        _active_index: usize,
        _design: &ResolvedDesign,
    ) -> Vec<SlotPlacement> {
        (0..slots.len())
            .map(|i| SlotPlacement::flat(i, i as f32 * HORIZONTAL_SPACING, 0.0))
            .collect()
    }
}
