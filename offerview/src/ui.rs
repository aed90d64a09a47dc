//! UI rendering for the TUI.

mod preview;

use offerview_core::cyclic::wrap_index;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, StatusKind};
use crate::color::css_color_or;

// ========== Color Palette ==========

/// Accent for the header and the focused position dot
const ACCENT: Color = Color::Rgb(0, 200, 200);
/// Key names in the footer
const KEY_COLOR: Color = Color::Rgb(255, 215, 0);
/// Secondary text
const DIM: Color = Color::Rgb(128, 128, 128);
/// Error messages
const ERROR_COLOR: Color = Color::Rgb(240, 90, 90);
/// Fallback when a design color can't be shown in the terminal
const FALLBACK_TEXT: Color = Color::Rgb(250, 250, 250);
/// Glass slot border as drawn in the terminal
const GLASS_BORDER: Color = Color::Rgb(180, 190, 200);
/// Border of the preview frame
const BORDER_PREVIEW: Color = Color::Rgb(100, 180, 100);

/// Render the application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Layout: header, preview, footer
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Preview
        Constraint::Length(1), // Footer
    ])
    .split(area);

    render_header(frame, app, chunks[0]);
    preview::render_preview(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

/// Render the header with offer position and layout mode.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let position = if app.offer_count() == 0 {
        "no offers".to_string()
    } else {
        format!("offer {}/{}", app.selected + 1, app.offer_count())
    };

    let mut header_spans = vec![
        Span::styled(" offerview ", Style::default().fg(ACCENT).bold()),
        Span::styled("│ ", Style::default().fg(DIM)),
        Span::raw(position),
        Span::styled(" │ ", Style::default().fg(DIM)),
        Span::styled(app.mode.display_name(), Style::default().fg(KEY_COLOR)),
        Span::styled(" │ ", Style::default().fg(DIM)),
        Span::styled(
            app.catalog_path().display().to_string(),
            Style::default().fg(DIM),
        ),
    ];
    if app.unsaved {
        header_spans.push(Span::styled(" │ ", Style::default().fg(DIM)));
        header_spans.push(Span::styled("modified", Style::default().fg(KEY_COLOR)));
    }

    let header = Paragraph::new(Line::from(header_spans))
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(header, area);
}

/// Render the footer: key hints, focus dots, and the status message.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => ACCENT,
            StatusKind::Error => ERROR_COLOR,
        };
        let footer = Paragraph::new(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(color),
        ));
        frame.render_widget(footer, area);
        return;
    }

    let mut footer_spans = vec![
        Span::styled(" q", Style::default().fg(KEY_COLOR)),
        Span::styled(" quit  ", Style::default().fg(DIM)),
        Span::styled("←/→", Style::default().fg(KEY_COLOR)),
        Span::styled(" focus  ", Style::default().fg(DIM)),
        Span::styled("⏎", Style::default().fg(KEY_COLOR)),
        Span::styled(" tap  ", Style::default().fg(DIM)),
        Span::styled("Tab", Style::default().fg(KEY_COLOR)),
        Span::styled(" mode  ", Style::default().fg(DIM)),
        Span::styled("j/k", Style::default().fg(KEY_COLOR)),
        Span::styled(" offers  ", Style::default().fg(DIM)),
        Span::styled("p/a/x", Style::default().fg(KEY_COLOR)),
        Span::styled(" edit  ", Style::default().fg(DIM)),
        Span::styled("s", Style::default().fg(KEY_COLOR)),
        Span::styled(" save  ", Style::default().fg(DIM)),
        Span::styled("r", Style::default().fg(KEY_COLOR)),
        Span::styled(" reload ", Style::default().fg(DIM)),
    ];

    if app.mode.is_carousel() {
        footer_spans.push(Span::styled("│ ", Style::default().fg(DIM)));
        footer_spans.extend(position_dots(
            app.preview.active_index(),
            app.preview.slot_count(),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(footer_spans)), area);
}

/// Carousel position dots (●○○○).
fn position_dots(active: usize, count: usize) -> Vec<Span<'static>> {
    let active = wrap_index(active, count);
    (0..count)
        .map(|i| {
            if i == active {
                Span::styled("●", Style::default().fg(ACCENT))
            } else {
                Span::styled("○", Style::default().fg(DIM))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use offerview_core::{Catalog, ConfigurationRecord, Currency, DesignConfig, LayoutMode, Slot};
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app(mode: LayoutMode, slots: usize) -> App {
        let catalog = Catalog::from_records(vec![ConfigurationRecord {
            config_name: "Lucky Spin".to_string(),
            slots: (0..slots)
                .map(|i| Slot::new(10 * (i as i64 + 1), Currency::GoldBars, i == 0))
                .collect(),
            ..Default::default()
        }]);
        App::new(
            &catalog,
            PathBuf::from("offers.json"),
            mode,
            DesignConfig::default(),
        )
    }

    #[test]
    fn test_position_dots() {
        let dots = position_dots(1, 3);
        let text: String = dots.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "○●○");
        assert!(position_dots(0, 0).is_empty());
    }

    #[test]
    fn test_renders_title_and_focused_cta() {
        let text = screen(&app(LayoutMode::TriFocus, 4));
        assert!(text.contains("Lucky Spin"));
        assert!(text.contains("10 Only!"));
        assert!(text.contains("Tri-Focus Carousel"));
    }

    #[test]
    fn test_renders_empty_offer() {
        let text = screen(&app(LayoutMode::Vertical, 0));
        assert!(text.contains("No slots"));
    }

    #[test]
    fn test_header_marks_unsaved_edits() {
        let mut app = app(LayoutMode::Vertical, 2);
        assert!(!screen(&app).contains("modified"));

        app.handle_key(crossterm::event::KeyEvent::from(
            crossterm::event::KeyCode::Char('p'),
        ));
        assert!(screen(&app).contains("modified"));
    }
}
