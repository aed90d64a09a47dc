//! Slot formatting shared by every layout.
//!
//! [`format_slot`] is pure and total: any slot, however malformed, produces
//! display text.

use crate::types::{Currency, Slot};
use serde::{Serialize, Serializer};
use std::fmt;

/// Currency glyph shown next to a slot amount. Serializes as the emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Cash,
    GoldBars,
    Diamond,
}

impl Glyph {
    /// Select the glyph for a currency. Anything that is not cash or gold
    /// bars, including unknown currencies, shows a diamond.
    pub fn for_currency(currency: &Currency) -> Self {
        match currency {
            Currency::Cash => Glyph::Cash,
            Currency::GoldBars => Glyph::GoldBars,
            _ => Glyph::Diamond,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Glyph::Cash => "💵",
            Glyph::GoldBars => "🪙",
            Glyph::Diamond => "💎",
        }
    }
}

impl Serialize for Glyph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display strings for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedSlot {
    /// `"{value}"` or `"{value} + {bonus}"`
    pub amount_text: String,
    pub glyph: Glyph,
    /// `"{value} Only!"` for paid slots, `"Free!"` otherwise
    pub cta_text: String,
}

/// Format a slot's amount, glyph and call-to-action label.
pub fn format_slot(slot: &Slot) -> FormattedSlot {
    let amount_text = match slot.visible_bonus() {
        Some(bonus) => format!("{} + {}", slot.value, bonus),
        None => slot.value.to_string(),
    };

    let cta_text = if slot.paid {
        format!("{} Only!", slot.value)
    } else {
        "Free!".to_string()
    };

    FormattedSlot {
        amount_text,
        glyph: Glyph::for_currency(&slot.currency),
        cta_text,
    }
}
