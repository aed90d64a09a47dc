//! Application state for the TUI.

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent};
use offerview_core::cyclic::step;
use offerview_core::format::format_slot;
use offerview_core::{
    Catalog, ConfigurationRecord, Currency, DesignConfig, Direction, LayoutMode, Offer,
    PreviewRenderer, Slot,
};

/// Severity of a footer status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// A one-line message shown in the footer until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Main application state.
pub struct App {
    /// Catalog file, re-read on reload and written on save
    catalog_path: PathBuf,
    /// Design defaults from the config file
    base_design: DesignConfig,
    /// Mode for records whose `offer_type` names none
    default_mode: LayoutMode,
    /// Mode chosen on the command line or with Tab; wins over the record's
    mode_override: Option<LayoutMode>,
    /// Records from the last load, including unsaved slot edits
    records: Vec<ConfigurationRecord>,
    /// Index of the offer being previewed
    pub selected: usize,
    /// Current layout mode
    pub mode: LayoutMode,
    /// Preview of the selected offer
    pub preview: PreviewRenderer,
    /// Footer message
    pub status: Option<StatusMessage>,
    /// Slot edits not yet written to the catalog file
    pub unsaved: bool,
    /// Whether the app should exit
    pub should_quit: bool,
}

impl App {
    /// Create a new App from an already loaded catalog.
    pub fn new(
        catalog: &Catalog,
        catalog_path: PathBuf,
        default_mode: LayoutMode,
        base_design: DesignConfig,
    ) -> Self {
        let records = catalog.records().to_vec();
        let mode = records
            .first()
            .and_then(ConfigurationRecord::layout_mode)
            .unwrap_or(default_mode);
        let preview = Self::mount(records.first(), mode, &base_design);

        Self {
            catalog_path,
            base_design,
            default_mode,
            mode_override: None,
            records,
            selected: 0,
            mode,
            preview,
            status: None,
            unsaved: false,
            should_quit: false,
        }
    }

    /// Use `mode` for every offer instead of the per-record mode.
    pub fn with_mode_override(mut self, mode: Option<LayoutMode>) -> Self {
        self.mode_override = mode;
        self.mode = self.mode_for(self.selected);
        self.preview.set_mode(self.mode);
        self
    }

    /// A fresh preview for `record`, with focus at the first slot.
    fn mount(
        record: Option<&ConfigurationRecord>,
        mode: LayoutMode,
        base_design: &DesignConfig,
    ) -> PreviewRenderer {
        let offer = record.map(ConfigurationRecord::to_offer).unwrap_or_default();
        PreviewRenderer::new(offer, mode).with_base_design(base_design.clone())
    }

    /// Explicit choice, then the record's own mode, then the configured default.
    fn mode_for(&self, index: usize) -> LayoutMode {
        self.mode_override
            .or_else(|| self.records.get(index).and_then(ConfigurationRecord::layout_mode))
            .unwrap_or(self.default_mode)
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    pub fn offer_count(&self) -> usize {
        self.records.len()
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status = None;

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.preview.advance(Direction::Left);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.preview.advance(Direction::Right);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.tap_cta();
            }
            KeyCode::Tab => {
                self.cycle_mode();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_offer(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_offer(-1);
            }
            KeyCode::Char('r') => {
                self.reload_catalog();
            }
            KeyCode::Char('p') => {
                self.toggle_paid();
            }
            KeyCode::Char('a') => {
                self.add_slot();
            }
            KeyCode::Char('x') => {
                self.remove_slot();
            }
            KeyCode::Char('s') => {
                self.save_catalog();
            }
            _ => {}
        }
    }

    /// Tap the call-to-action of the focused (or first) slot.
    fn tap_cta(&mut self) {
        let active = self.preview.active_index();
        let label = self
            .preview
            .offer()
            .slots
            .get(active)
            .map(|slot| format_slot(slot).cta_text);

        if self.preview.advance_on_cta_tap() {
            return;
        }

        if let Some(label) = label {
            self.status = Some(StatusMessage::info(format!("Tapped \"{}\"", label)));
        }
    }

    /// Switch to the next layout mode, keeping the focus. The choice sticks
    /// when other offers are selected.
    fn cycle_mode(&mut self) {
        self.mode = self.mode.next();
        self.mode_override = Some(self.mode);
        self.preview.set_mode(self.mode);
        tracing::debug!(mode = %self.mode, "Layout mode changed");
    }

    /// Move the offer selection and mount a fresh preview.
    fn select_offer(&mut self, delta: isize) {
        let count = self.records.len();
        if count < 2 {
            return;
        }
        self.selected = step(self.selected, delta, count);
        self.mode = self.mode_for(self.selected);
        self.preview = Self::mount(self.records.get(self.selected), self.mode, &self.base_design);
    }

    /// Flip the paid flag of the focused slot.
    fn toggle_paid(&mut self) {
        let active = self.preview.active_index();
        let Some(slot) = self.preview.offer().slots.get(active) else {
            return;
        };

        let slot = Slot {
            paid: !slot.paid,
            ..slot.clone()
        };
        let label = if slot.paid { "paid" } else { "free" };
        let offer = self.preview.offer().with_slot(active, slot);
        self.apply_edit(offer, format!("Slot {} is now {}", active + 1, label));
    }

    /// Append a copy of the focused slot, or a blank one to an empty offer.
    fn add_slot(&mut self) {
        let slot = self
            .preview
            .offer()
            .slots
            .get(self.preview.active_index())
            .cloned()
            .unwrap_or_else(|| Slot::new(0, Currency::default(), false));

        let offer = self.preview.offer().with_slot_added(slot);
        let message = format!("Added slot {}", offer.slot_count());
        self.apply_edit(offer, message);
    }

    /// Remove the focused slot.
    fn remove_slot(&mut self) {
        let active = self.preview.active_index();
        if active >= self.preview.slot_count() {
            return;
        }

        let offer = self.preview.offer().with_slot_removed(active);
        self.apply_edit(offer, format!("Removed slot {}", active + 1));
    }

    /// Store an edited offer in the selected record and re-render it.
    fn apply_edit(&mut self, offer: Offer, message: String) {
        let Some(record) = self.records.get_mut(self.selected) else {
            return;
        };

        record.slots = offer.slots.clone();
        self.preview.set_offer(offer);
        self.unsaved = true;
        self.status = Some(StatusMessage::info(message));
    }

    /// Write the records, edits included, to the catalog file.
    ///
    /// On failure the edits stay in memory and the error is shown in the footer.
    pub fn save_catalog(&mut self) {
        let catalog = Catalog::from_records(self.records.clone());
        match catalog.save_to(&self.catalog_path) {
            Ok(()) => {
                self.unsaved = false;
                self.status = Some(StatusMessage::info(format!(
                    "Saved {} offer(s)",
                    catalog.len()
                )));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Catalog save failed");
                self.status = Some(StatusMessage::error(format!("Save failed: {}", e)));
            }
        }
    }

    /// Re-read the catalog file.
    ///
    /// On failure the previous offers and focus stay on screen and the
    /// error is shown in the footer. A successful reload drops unsaved edits.
    pub fn reload_catalog(&mut self) {
        match Catalog::load(&self.catalog_path) {
            Ok(catalog) => {
                self.apply_catalog(&catalog);
                self.status = Some(StatusMessage::info(format!(
                    "Reloaded {} offer(s)",
                    self.records.len()
                )));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Catalog reload failed");
                self.status = Some(StatusMessage::error(format!("Reload failed: {}", e)));
            }
        }
    }

    /// Replace the records, keeping the selection and focus where possible.
    fn apply_catalog(&mut self, catalog: &Catalog) {
        self.records = catalog.records().to_vec();
        self.unsaved = false;

        if self.records.is_empty() {
            self.selected = 0;
            self.preview.set_offer(Offer::default());
            return;
        }

        if self.selected >= self.records.len() {
            self.selected = self.records.len() - 1;
        }
        self.mode = self.mode_for(self.selected);
        self.preview.set_offer(self.records[self.selected].to_offer());
        self.preview.set_mode(self.mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn record(name: &str, slots: usize) -> ConfigurationRecord {
        ConfigurationRecord {
            config_name: name.to_string(),
            slots: (0..slots)
                .map(|i| Slot::new(100 * (i as i64 + 1), Currency::Cash, true))
                .collect(),
            ..Default::default()
        }
    }

    fn app(mode: LayoutMode) -> App {
        let catalog = Catalog::from_records(vec![record("First", 4), record("Second", 2)]);
        App::new(
            &catalog,
            PathBuf::from("/nonexistent/offers.json"),
            mode,
            DesignConfig::default(),
        )
    }

    #[test]
    fn test_arrow_keys_move_focus() {
        let mut app = app(LayoutMode::TriFocus);
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.preview.active_index(), 2);

        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(app.preview.active_index(), 3);
    }

    #[test]
    fn test_enter_advances_tri_focus() {
        let mut app = app(LayoutMode::TriFocus);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.preview.active_index(), 1);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_enter_in_vertical_reports_tap() {
        let mut app = app(LayoutMode::Vertical);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.preview.active_index(), 0);
        assert_eq!(
            app.status,
            Some(StatusMessage::info("Tapped \"100 Only!\""))
        );
    }

    #[test]
    fn test_tab_cycles_mode_and_keeps_focus() {
        let mut app = app(LayoutMode::SingleFocus);
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.mode, LayoutMode::TriFocus);
        assert_eq!(app.preview.mode(), Some(LayoutMode::TriFocus));
        assert_eq!(app.preview.active_index(), 1);
    }

    #[test]
    fn test_selecting_offer_remounts_preview() {
        let mut app = app(LayoutMode::TriFocus);
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char('j')));

        assert_eq!(app.selected, 1);
        assert_eq!(app.preview.offer().title, "Second");
        assert_eq!(app.preview.active_index(), 0);

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected, 0);
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_failed_reload_keeps_last_good_state() {
        let mut app = app(LayoutMode::TriFocus);
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char('r')));

        assert_eq!(app.offer_count(), 2);
        assert_eq!(app.preview.active_index(), 1);
        assert!(matches!(
            app.status,
            Some(StatusMessage {
                kind: StatusKind::Error,
                ..
            })
        ));
    }

    #[test]
    fn test_successful_reload_wraps_focus() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("offers.json");

        let catalog = Catalog::from_records(vec![record("First", 4)]);
        catalog.save_to(&path).unwrap();

        let mut app = App::new(&catalog, path.clone(), LayoutMode::TriFocus, DesignConfig::default());
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Right));
        }
        assert_eq!(app.preview.active_index(), 3);

        Catalog::from_records(vec![record("First", 2)])
            .save_to(&path)
            .unwrap();
        app.handle_key(key(KeyCode::Char('r')));

        assert_eq!(app.preview.slot_count(), 2);
        assert_eq!(app.preview.active_index(), 1);
        assert_eq!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Info));
    }

    #[test]
    fn test_empty_catalog() {
        let mut app = App::new(
            &Catalog::default(),
            PathBuf::from("offers.json"),
            LayoutMode::TriFocus,
            DesignConfig::default(),
        );
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.preview.active_index(), 0);
        assert!(app.preview.render().slots.is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut by_q = app(LayoutMode::Vertical);
        by_q.handle_key(key(KeyCode::Char('q')));
        assert!(by_q.should_quit);

        let mut by_esc = app(LayoutMode::Horizontal);
        by_esc.handle_key(key(KeyCode::Esc));
        assert!(by_esc.should_quit);
    }

    #[test]
    fn test_record_offer_type_selects_mode() {
        let catalog = Catalog::from_records(vec![
            ConfigurationRecord {
                offer_type: "vertical".to_string(),
                ..record("Listed", 3)
            },
            record("Plain", 3),
        ]);
        let mut app = App::new(
            &catalog,
            PathBuf::from("offers.json"),
            LayoutMode::TriFocus,
            DesignConfig::default(),
        );
        assert_eq!(app.mode, LayoutMode::Vertical);

        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.mode, LayoutMode::TriFocus);

        let app = app.with_mode_override(Some(LayoutMode::Horizontal));
        assert_eq!(app.mode, LayoutMode::Horizontal);
        assert_eq!(app.preview.mode(), Some(LayoutMode::Horizontal));
    }

    #[test]
    fn test_tab_choice_sticks_across_offers() {
        let mut app = app(LayoutMode::Vertical);
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.mode, LayoutMode::Horizontal);
        assert_eq!(app.preview.mode(), Some(LayoutMode::Horizontal));
    }

    #[test]
    fn test_slot_edits_leave_previous_render_intact() {
        let mut app = app(LayoutMode::TriFocus);
        app.handle_key(key(KeyCode::Right));
        let before = app.preview.render();

        app.handle_key(key(KeyCode::Char('p')));
        assert!(!app.preview.offer().slots[1].paid);
        assert_eq!(before.focused().unwrap().content.cta_text, "200 Only!");
        assert_eq!(app.preview.render().focused().unwrap().content.cta_text, "Free!");
        assert!(app.unsaved);

        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.preview.slot_count(), 5);
        assert!(!app.preview.offer().slots[4].paid);

        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.preview.slot_count(), 4);
        assert_eq!(app.records[0].slots.len(), 4);
        assert_eq!(app.preview.offer().slots[1].value.to_string(), "300");
    }

    #[test]
    fn test_edits_on_empty_offer() {
        let mut app = App::new(
            &Catalog::from_records(vec![record("Blank", 0)]),
            PathBuf::from("offers.json"),
            LayoutMode::Vertical,
            DesignConfig::default(),
        );
        app.handle_key(key(KeyCode::Char('p')));
        app.handle_key(key(KeyCode::Char('x')));
        assert!(!app.unsaved);

        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.preview.slot_count(), 1);
        assert_eq!(format_slot(&app.preview.offer().slots[0]).cta_text, "Free!");
    }

    #[test]
    fn test_save_writes_edits() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("offers.json");
        let catalog = Catalog::from_records(vec![record("First", 3)]);

        let mut app = App::new(&catalog, path.clone(), LayoutMode::TriFocus, DesignConfig::default());
        app.handle_key(key(KeyCode::Char('x')));
        app.handle_key(key(KeyCode::Char('s')));

        assert!(!app.unsaved);
        assert_eq!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Info));
        let saved = Catalog::load(&path).unwrap();
        assert_eq!(saved.records()[0].slots.len(), 2);
    }

    #[test]
    fn test_failed_save_keeps_edits() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let catalog = Catalog::from_records(vec![record("First", 3)]);
        let mut app = App::new(
            &catalog,
            blocker.join("offers.json"),
            LayoutMode::TriFocus,
            DesignConfig::default(),
        );
        app.handle_key(key(KeyCode::Char('x')));
        app.handle_key(key(KeyCode::Char('s')));

        assert!(app.unsaved);
        assert_eq!(app.preview.slot_count(), 2);
        assert_eq!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Error));
    }
}
