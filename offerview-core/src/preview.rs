//! Offer preview rendering.
//!
//! [`PreviewRenderer`] ties everything together: it owns the offer, the
//! resolved design, the active layout strategy and the carousel focus.
//! [`PreviewRenderer::render`] is side-effect free; only the navigation
//! methods change the focus.
//!
//! ```rust
//! use offerview_core::layout::LayoutMode;
//! use offerview_core::preview::{Direction, PreviewRenderer};
//! use offerview_core::{Currency, Offer, Slot};
//!
//! let offer = Offer::new(
//!     "Starter Pack",
//!     vec![
//!         Slot::new(100, Currency::Cash, true),
//!         Slot::new(250, Currency::GoldBars, true),
//!         Slot::new(5, Currency::Diamond, false),
//!     ],
//! );
//!
//! let mut preview = PreviewRenderer::new(offer, LayoutMode::TriFocus);
//! preview.advance(Direction::Right);
//!
//! let tree = preview.render();
//! assert_eq!(tree.focused().map(|s| s.placement.slot_index), Some(1));
//! ```

use crate::cyclic::{step, wrap_index};
use crate::design::{resolve_design_config, FontChoice, ResolvedDesign, SlotStyle};
use crate::format::{format_slot, FormattedSlot};
use crate::layout::{LayoutMode, LayoutStrategy, SlotPlacement};
use crate::types::{DesignConfig, Offer};
use serde::Serialize;

/// Navigation direction for carousel focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// The carousel focus. Starts at 0, changes only through navigation and is
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusState {
    active_index: usize,
}

impl FocusState {
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    fn advance(&mut self, delta: isize, count: usize) {
        if count == 0 {
            return;
        }
        self.active_index = step(self.active_index, delta, count);
    }

    fn clamp_to(&mut self, count: usize) {
        self.active_index = wrap_index(self.active_index, count);
    }
}

/// Title block of a rendered preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleBlock {
    pub text: String,
    pub font: FontChoice,
    pub color: String,
    pub background_image: Option<String>,
}

/// One slot of a rendered preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSlot {
    pub placement: SlotPlacement,
    pub content: FormattedSlot,
    pub style: SlotStyle,
    pub font: FontChoice,
    pub font_color: String,
    pub cta_color: String,
    pub is_focused: bool,
}

/// Everything a renderer needs to draw one preview frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualTree {
    pub mode: String,
    pub title: TitleBlock,
    /// Slots in slot order
    pub slots: Vec<RenderedSlot>,
    pub active_index: usize,
    pub slot_count: usize,
}

impl VisualTree {
    /// The focused slot, if the layout has one.
    pub fn focused(&self) -> Option<&RenderedSlot> {
        self.slots.iter().find(|s| s.is_focused)
    }

    /// Slots ordered back to front, for painters that draw in z order.
    pub fn paint_order(&self) -> Vec<&RenderedSlot> {
        let mut ordered: Vec<&RenderedSlot> = self.slots.iter().collect();
        ordered.sort_by_key(|s| s.placement.z_index);
        ordered
    }
}

/// Owns the preview state and produces [`VisualTree`]s.
pub struct PreviewRenderer {
    offer: Offer,
    base_design: DesignConfig,
    design: ResolvedDesign,
    strategy: Box<dyn LayoutStrategy>,
    mode: Option<LayoutMode>,
    focus: FocusState,
}

impl PreviewRenderer {
    /// Create a renderer using one of the built-in modes.
    pub fn new(offer: Offer, mode: LayoutMode) -> Self {
        let mut renderer = Self::with_strategy(offer, mode.strategy());
        renderer.mode = Some(mode);
        renderer
    }

    /// Create a renderer with a custom strategy.
    pub fn with_strategy(offer: Offer, strategy: Box<dyn LayoutStrategy>) -> Self {
        let design = resolve_design_config(&offer.design);
        Self {
            offer,
            base_design: DesignConfig::default(),
            design,
            strategy,
            mode: None,
            focus: FocusState::default(),
        }
    }

    /// Design values used for any field the offer leaves unset.
    pub fn with_base_design(mut self, base: DesignConfig) -> Self {
        self.base_design = base;
        self.design = resolve_design_config(&self.offer.design.merged_over(&self.base_design));
        self
    }

    pub fn offer(&self) -> &Offer {
        &self.offer
    }

    pub fn design(&self) -> &ResolvedDesign {
        &self.design
    }

    /// The built-in mode, or `None` for a custom strategy.
    pub fn mode(&self) -> Option<LayoutMode> {
        self.mode
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    pub fn focus(&self) -> FocusState {
        self.focus
    }

    pub fn active_index(&self) -> usize {
        self.focus.active_index()
    }

    pub fn slot_count(&self) -> usize {
        self.offer.slots.len()
    }

    /// Replace the offer, e.g. after the catalog reloads. The focus is kept
    /// but wrapped into range if the slot list shrank.
    pub fn set_offer(&mut self, offer: Offer) {
        self.design = resolve_design_config(&offer.design.merged_over(&self.base_design));
        self.offer = offer;
        let before = self.focus.active_index();
        self.focus.clamp_to(self.offer.slots.len());
        if before != self.focus.active_index() {
            tracing::debug!(
                before,
                after = self.focus.active_index(),
                "Wrapped focus into new slot range"
            );
        }
    }

    /// Switch to another built-in mode, keeping the focus.
    pub fn set_mode(&mut self, mode: LayoutMode) {
        self.strategy = mode.strategy();
        self.mode = Some(mode);
    }

    /// Move the focus one slot left or right, wrapping around.
    /// Does nothing when the offer has no slots.
    pub fn advance(&mut self, direction: Direction) {
        self.focus.advance(direction.delta(), self.slot_count());
        tracing::trace!(
            active_index = self.focus.active_index(),
            ?direction,
            "Focus moved"
        );
    }

    /// Handle a tap on the focused slot's call-to-action.
    ///
    /// In layouts where the CTA doubles as a "next" control (the tri-focus
    /// carousel) the focus advances by one. Returns whether it moved.
    pub fn advance_on_cta_tap(&mut self) -> bool {
        if !self.strategy.advances_on_cta_tap() || self.slot_count() < 2 {
            return false;
        }
        self.advance(Direction::Right);
        true
    }

    /// Placements for the current state.
    pub fn placements(&self) -> Vec<SlotPlacement> {
        self.strategy.layout(
            &self.offer.slots,
            self.focus.active_index(),
            &self.design,
        )
    }

    /// Build the visual tree for the current state.
    pub fn render(&self) -> VisualTree {
        let carousel = self.strategy.is_carousel();
        let active = self.focus.active_index();

        let slots = self
            .placements()
            .into_iter()
            .filter_map(|placement| {
                let slot = self.offer.slots.get(placement.slot_index)?;
                Some(RenderedSlot {
                    content: format_slot(slot),
                    style: self.design.slot_style.clone(),
                    font: self.design.slot_font.clone(),
                    font_color: self.design.slot_font_color.clone(),
                    cta_color: self.design.cta_color.clone(),
                    is_focused: carousel && placement.slot_index == active,
                    placement,
                })
            })
            .collect();

        VisualTree {
            mode: self.strategy.name().to_string(),
            title: TitleBlock {
                text: self.offer.title.clone(),
                font: self.design.title_font.clone(),
                color: self.design.title_color.clone(),
                background_image: self.design.image_url.clone(),
            },
            slots,
            active_index: active,
            slot_count: self.slot_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Currency, Slot};

    fn offer(n: usize) -> Offer {
        Offer::new(
            "Mega Sale",
            (0..n)
                .map(|i| Slot::new(10 * (i as i64 + 1), Currency::Cash, i % 2 == 0))
                .collect(),
        )
    }

    #[test]
    fn test_focus_starts_at_zero() {
        let preview = PreviewRenderer::new(offer(4), LayoutMode::TriFocus);
        assert_eq!(preview.active_index(), 0);
        assert_eq!(preview.focus(), FocusState::default());
    }

    #[test]
    fn test_advance_wraps_both_ways() {
        let mut preview = PreviewRenderer::new(offer(3), LayoutMode::SingleFocus);
        preview.advance(Direction::Left);
        assert_eq!(preview.active_index(), 2);
        preview.advance(Direction::Right);
        preview.advance(Direction::Right);
        assert_eq!(preview.active_index(), 1);
    }

    #[test]
    fn test_advance_round_trip() {
        for count in 2..6 {
            for start in 0..count {
                let mut preview = PreviewRenderer::new(offer(count), LayoutMode::TriFocus);
                for _ in 0..start {
                    preview.advance(Direction::Right);
                }
                assert_eq!(preview.active_index(), start);
                preview.advance(Direction::Right);
                preview.advance(Direction::Left);
                assert_eq!(preview.active_index(), start);
            }
        }
    }

    #[test]
    fn test_advance_on_single_and_empty_offer() {
        let mut single = PreviewRenderer::new(offer(1), LayoutMode::TriFocus);
        single.advance(Direction::Right);
        single.advance(Direction::Left);
        assert!(!single.advance_on_cta_tap());
        assert_eq!(single.active_index(), 0);

        let mut empty = PreviewRenderer::new(offer(0), LayoutMode::TriFocus);
        empty.advance(Direction::Right);
        assert_eq!(empty.active_index(), 0);
        assert!(empty.render().slots.is_empty());
    }

    #[test]
    fn test_cta_tap_only_advances_tri_focus() {
        let mut tri = PreviewRenderer::new(offer(4), LayoutMode::TriFocus);
        assert!(tri.advance_on_cta_tap());
        assert_eq!(tri.active_index(), 1);

        let mut single = PreviewRenderer::new(offer(4), LayoutMode::SingleFocus);
        assert!(!single.advance_on_cta_tap());
        assert_eq!(single.active_index(), 0);

        let mut vertical = PreviewRenderer::new(offer(4), LayoutMode::Vertical);
        assert!(!vertical.advance_on_cta_tap());
    }

    #[test]
    fn test_render_marks_focused_slot() {
        let mut preview = PreviewRenderer::new(offer(5), LayoutMode::TriFocus);
        preview.advance(Direction::Right);
        let tree = preview.render();

        assert_eq!(tree.slots.len(), 3);
        assert_eq!(tree.mode, "tri_focus");
        let focused = tree.focused().unwrap();
        assert_eq!(focused.placement.slot_index, 1);
        assert_eq!(focused.content.amount_text, "20");
        assert_eq!(focused.content.cta_text, "Free!");
        assert_eq!(tree.paint_order().last().unwrap().placement.slot_index, 1);
    }

    #[test]
    fn test_linear_render_has_no_focus() {
        let tree = PreviewRenderer::new(offer(3), LayoutMode::Vertical).render();
        assert_eq!(tree.slots.len(), 3);
        assert!(tree.focused().is_none());
    }

    #[test]
    fn test_render_is_side_effect_free() {
        let preview = PreviewRenderer::new(offer(4), LayoutMode::SingleFocus);
        assert_eq!(preview.render(), preview.render());
        assert_eq!(preview.active_index(), 0);
    }

    #[test]
    fn test_set_offer_wraps_focus() {
        let mut preview = PreviewRenderer::new(offer(5), LayoutMode::TriFocus);
        for _ in 0..4 {
            preview.advance(Direction::Right);
        }
        assert_eq!(preview.active_index(), 4);

        preview.set_offer(offer(3));
        assert_eq!(preview.active_index(), 1);

        preview.set_offer(offer(0));
        assert_eq!(preview.active_index(), 0);
        assert!(preview.render().slots.is_empty());
    }

    #[test]
    fn test_set_mode_keeps_focus() {
        let mut preview = PreviewRenderer::new(offer(4), LayoutMode::TriFocus);
        preview.advance(Direction::Right);
        preview.set_mode(LayoutMode::SingleFocus);
        assert_eq!(preview.mode(), Some(LayoutMode::SingleFocus));
        assert_eq!(preview.active_index(), 1);
        assert_eq!(preview.render().slots.len(), 4);
    }

    #[test]
    fn test_slot_style_follows_background_color() {
        let glass = PreviewRenderer::new(offer(2), LayoutMode::Vertical).render();
        assert!(glass.slots.iter().all(|s| s.style.is_glass()));

        let solid_offer = offer(2).with_design(DesignConfig {
            slot_background_color: Some("#334155".to_string()),
            ..Default::default()
        });
        let solid = PreviewRenderer::new(solid_offer, LayoutMode::Vertical).render();
        assert!(solid
            .slots
            .iter()
            .all(|s| s.style == SlotStyle::Solid { background: "#334155".to_string() }));
    }

    #[test]
    fn test_base_design_fills_gaps() {
        let base = DesignConfig {
            title_color: Some("#facc15".to_string()),
            slot_background_color: Some("#0f172a".to_string()),
            ..Default::default()
        };
        let own = DesignConfig {
            title_color: Some("#ef4444".to_string()),
            ..Default::default()
        };

        let preview = PreviewRenderer::new(offer(1).with_design(own), LayoutMode::Vertical)
            .with_base_design(base);
        let tree = preview.render();
        assert_eq!(tree.title.color, "#ef4444");
        assert!(!tree.slots[0].style.is_glass());
    }
}
