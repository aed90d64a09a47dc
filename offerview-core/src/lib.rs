//! # offerview-core
//!
//! Core library for offerview - a preview engine for in-game offers.
//!
//! This library provides:
//! - Domain types for offers, slots and design overrides
//! - Slot formatting and cyclic focus arithmetic
//! - Layout strategies (vertical, horizontal, two carousel variants)
//! - A preview renderer that owns carousel focus and builds visual trees
//! - Catalog file loading, configuration and logging
//!
//! ## Architecture
//!
//! ```text
//! Offer + DesignConfig
//!        │
//!        ▼
//! LayoutStrategy::layout(slots, focus)  ──uses──▶ cyclic::relative_offset
//!        │
//!        ▼
//! Vec<SlotPlacement>
//!        │
//!        ▼
//! PreviewRenderer::render()  ──uses──▶ format_slot, resolve_design_config
//!        │
//!        ▼
//! VisualTree
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use offerview_core::{Catalog, Config, LayoutMode, PreviewRenderer};
//!
//! let config = Config::load().expect("failed to load config");
//! let catalog = Catalog::load(&config.resolve_catalog_path(None)).expect("failed to load catalog");
//!
//! for offer in catalog.offers() {
//!     let preview = PreviewRenderer::new(offer, LayoutMode::TriFocus);
//!     println!("{:?}", preview.render());
//! }
//! ```

// Re-export commonly used items at the crate root
pub use catalog::Catalog;
pub use config::Config;
pub use error::{Error, Result};
pub use layout::{LayoutMode, LayoutStrategy, SlotPlacement};
pub use preview::{Direction, PreviewRenderer, VisualTree};
pub use types::*;

// Public modules
pub mod catalog;
pub mod config;
pub mod cyclic;
pub mod design;
pub mod error;
pub mod format;
pub mod layout;
pub mod logging;
pub mod preview;
pub mod types;
