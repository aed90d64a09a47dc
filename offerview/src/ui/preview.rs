use offerview_core::design::{FontChoice, SlotStyle};
use offerview_core::preview::RenderedSlot;
use ratatui::widgets::Padding;

use super::*;

/// Card size at scale 1.0, in cells
const CARD_WIDTH: f32 = 24.0;
const CARD_HEIGHT: f32 = 5.0;
/// Layout units per terminal column
const X_UNITS_PER_CELL: f32 = 6.0;
/// Layout units per terminal row
const Y_UNITS_PER_CELL: f32 = 20.0;

pub(super) fn render_preview(frame: &mut Frame, app: &App, area: Rect) {
    let tree = app.preview.render();

    let title_color = css_color_or(&tree.title.color, FALLBACK_TEXT);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_PREVIEW))
        .title(Line::from(Span::styled(
            format!(" {} ", tree.title.text),
            Style::default().fg(title_color).bold(),
        )))
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Design info
        Constraint::Min(3),    // Slot canvas
    ])
    .split(inner);

    render_design_info(frame, &tree.title.font, tree.title.background_image.as_deref(), chunks[0]);

    if tree.slots.is_empty() {
        let empty = Paragraph::new(Span::styled("No slots", Style::default().fg(DIM)))
            .alignment(Alignment::Center);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let canvas = chunks[1];
    let (shift_x, shift_y) = if tree.focused().is_some() {
        // Carousels keep the focus centered.
        (0.0, 0.0)
    } else {
        group_center(&tree.slots)
    };

    for slot in tree.paint_order() {
        let p = &slot.placement;
        let width = (CARD_WIDTH * p.scale).round().max(8.0);
        let height = (CARD_HEIGHT * p.scale).round().max(3.0);
        let cx = canvas.x as f32 + canvas.width as f32 / 2.0 + (p.translate_x - shift_x) / X_UNITS_PER_CELL;
        let cy = canvas.y as f32 + canvas.height as f32 / 2.0 + (p.translate_y - shift_y) / Y_UNITS_PER_CELL;

        let Some(rect) = clip_rect(canvas, cx - width / 2.0, cy - height / 2.0, width, height) else {
            continue;
        };

        frame.render_widget(Clear, rect);
        frame.render_widget(slot_card(slot), rect);
    }
}

/// One-line summary of the title font and background image.
fn render_design_info(frame: &mut Frame, font: &FontChoice, image: Option<&str>, area: Rect) {
    let mut spans = Vec::new();
    if let FontChoice::Named(family) = font {
        spans.push(Span::styled("font ", Style::default().fg(DIM)));
        spans.push(Span::raw(family.clone()));
        spans.push(Span::raw("  "));
    }
    if let Some(url) = image {
        spans.push(Span::styled("background ", Style::default().fg(DIM)));
        spans.push(Span::raw(url.to_string()));
    }

    let info = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(info, area);
}

/// Midpoint of the placements' bounding box, in layout units.
fn group_center(slots: &[RenderedSlot]) -> (f32, f32) {
    let xs = slots.iter().map(|s| s.placement.translate_x);
    let ys = slots.iter().map(|s| s.placement.translate_y);
    let (min_x, max_x) = xs.fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let (min_y, max_y) = ys.fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0)
}

/// Intersect a card at fractional cell coordinates with the canvas.
fn clip_rect(canvas: Rect, x: f32, y: f32, width: f32, height: f32) -> Option<Rect> {
    let left = (x.round() as i32).max(canvas.x as i32);
    let top = (y.round() as i32).max(canvas.y as i32);
    let right = ((x + width).round() as i32).min(canvas.right() as i32);
    let bottom = ((y + height).round() as i32).min(canvas.bottom() as i32);

    if right <= left || bottom <= top {
        return None;
    }

    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

/// Build the card widget for one slot.
fn slot_card(slot: &RenderedSlot) -> Paragraph<'static> {
    let text_color = css_color_or(&slot.font_color, FALLBACK_TEXT);
    let cta_color = css_color_or(&slot.cta_color, ACCENT);
    let focused = slot.is_focused;

    let block = match &slot.style {
        SlotStyle::Solid { background } => Block::default()
            .padding(Padding::vertical(1))
            .style(Style::default().bg(css_color_or(background, Color::Reset))),
        SlotStyle::Glass { border, .. } => Block::bordered()
            .border_type(if focused {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(Style::default().fg(css_color_or(border, GLASS_BORDER))),
    };

    let cta_style = if slot.placement.interactive {
        Style::default().fg(Color::Black).bg(cta_color).bold()
    } else {
        Style::default().fg(cta_color)
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("{} {}", slot.content.glyph, slot.content.amount_text),
            Style::default().fg(text_color).bold(),
        )),
        Line::from(Span::styled(format!(" {} ", slot.content.cta_text), cta_style)),
    ];

    let mut style = Style::default();
    if slot.placement.opacity < 1.0 || slot.placement.is_blurred() {
        style = style.add_modifier(Modifier::DIM);
    }

    Paragraph::new(lines)
        .block(block)
        .style(style)
        .alignment(Alignment::Center)
}
