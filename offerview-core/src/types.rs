//! Core domain types for offerview
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Offer** | A promotional purchase/reward screen with an ordered set of slots |
//! | **Slot** | One reward unit within an offer (value, optional bonus, currency, paid flag) |
//! | **Design config** | Optional style overrides (fonts, colors, background) for one preview |
//! | **Configuration record** | The shape the configuration API stores and returns |
//!
//! Slot order is meaningful: a slot's position in [`Offer::slots`] is its
//! identity for indexing and focus.

use crate::layout::LayoutMode;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================
// Slot values
// ============================================

/// A reward amount as entered in the configuration builder.
///
/// Values are rendered exactly as given; nothing is coerced or validated.
/// Any JSON value is accepted: `null` is the empty value and booleans,
/// arrays or objects are kept as their JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "serde_json::Value")]
pub enum SlotValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl SlotValue {
    /// True for values that should not be shown as a bonus (`""`, `0`).
    pub fn is_empty_equivalent(&self) -> bool {
        match self {
            SlotValue::Integer(n) => *n == 0,
            SlotValue::Float(f) => *f == 0.0,
            SlotValue::Text(s) => s.is_empty(),
        }
    }
}

impl Default for SlotValue {
    fn default() -> Self {
        SlotValue::Text(String::new())
    }
}

impl fmt::Display for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotValue::Integer(n) => write!(f, "{}", n),
            SlotValue::Float(n) => write!(f, "{}", n),
            SlotValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<serde_json::Value> for SlotValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => SlotValue::default(),
            Value::String(s) => SlotValue::Text(s),
            Value::Number(n) => match n.as_i64() {
                Some(i) => SlotValue::Integer(i),
                None => SlotValue::Float(n.as_f64().unwrap_or_default()),
            },
            other => SlotValue::Text(other.to_string()),
        }
    }
}

impl From<i64> for SlotValue {
    fn from(n: i64) -> Self {
        SlotValue::Integer(n)
    }
}

impl From<i32> for SlotValue {
    fn from(n: i32) -> Self {
        SlotValue::Integer(n.into())
    }
}

impl From<&str> for SlotValue {
    fn from(s: &str) -> Self {
        SlotValue::Text(s.to_string())
    }
}

// ============================================
// Currency
// ============================================

/// Reward currency of a slot.
///
/// Unknown names are kept in [`Currency::Other`] instead of failing to
/// parse; a missing or `null` currency is a [`Currency::Diamond`]. Values
/// that are not strings are kept as their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "String")]
pub enum Currency {
    Cash,
    GoldBars,
    #[default]
    Diamond,
    Other(String),
}

impl Currency {
    pub fn as_str(&self) -> &str {
        match self {
            Currency::Cash => "Cash",
            Currency::GoldBars => "GoldBars",
            Currency::Diamond => "Diamond",
            Currency::Other(name) => name,
        }
    }

    /// Parse a currency name; spacing, underscores and case are ignored.
    pub fn parse(name: &str) -> Self {
        let normalized: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "cash" => Currency::Cash,
            "goldbars" | "goldbar" => Currency::GoldBars,
            "diamond" | "diamonds" => Currency::Diamond,
            _ => Currency::Other(name.to_string()),
        }
    }
}

impl From<serde_json::Value> for Currency {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Currency::default(),
            serde_json::Value::String(name) => Currency::parse(&name),
            other => Currency::Other(other.to_string()),
        }
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.as_str().to_string()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================
// Slot
// ============================================

/// One reward unit within an offer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Slot {
    /// Reward amount
    #[serde(default)]
    pub value: SlotValue,
    /// Optional additional reward, shown only when non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<SlotValue>,
    /// Currency, selects the glyph
    #[serde(default)]
    pub currency: Currency,
    /// Paid slots show "{value} Only!", free ones show "Free!"
    #[serde(default)]
    pub paid: bool,
}

impl Slot {
    pub fn new(value: impl Into<SlotValue>, currency: Currency, paid: bool) -> Self {
        Self {
            value: value.into(),
            bonus: None,
            currency,
            paid,
        }
    }

    pub fn with_bonus(mut self, bonus: impl Into<SlotValue>) -> Self {
        self.bonus = Some(bonus.into());
        self
    }

    /// Returns the bonus if it should be displayed.
    pub fn visible_bonus(&self) -> Option<&SlotValue> {
        self.bonus.as_ref().filter(|b| !b.is_empty_equivalent())
    }
}

// ============================================
// Design config
// ============================================

/// Style overrides for a preview. Every field is optional and falls back
/// independently; see [`crate::design::resolve_design_config`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignConfig {
    #[serde(default, alias = "image_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, alias = "title_font", skip_serializing_if = "Option::is_none")]
    pub title_font: Option<String>,
    #[serde(default, alias = "title_color", skip_serializing_if = "Option::is_none")]
    pub title_color: Option<String>,
    #[serde(default, alias = "slot_font", skip_serializing_if = "Option::is_none")]
    pub slot_font: Option<String>,
    #[serde(
        default,
        alias = "slot_font_color",
        skip_serializing_if = "Option::is_none"
    )]
    pub slot_font_color: Option<String>,
    #[serde(
        default,
        alias = "slot_background_color",
        skip_serializing_if = "Option::is_none"
    )]
    pub slot_background_color: Option<String>,
    #[serde(default, alias = "cta_color", skip_serializing_if = "Option::is_none")]
    pub cta_color: Option<String>,
}

impl DesignConfig {
    /// Field-by-field merge: fields set on `self` win, unset ones come from `base`.
    ///
    /// Empty strings count as unset, matching how the builder form clears a field.
    pub fn merged_over(&self, base: &DesignConfig) -> DesignConfig {
        fn pick(own: &Option<String>, base: &Option<String>) -> Option<String> {
            non_empty(own).or_else(|| non_empty(base))
        }

        DesignConfig {
            image_url: pick(&self.image_url, &base.image_url),
            title_font: pick(&self.title_font, &base.title_font),
            title_color: pick(&self.title_color, &base.title_color),
            slot_font: pick(&self.slot_font, &base.slot_font),
            slot_font_color: pick(&self.slot_font_color, &base.slot_font_color),
            slot_background_color: pick(&self.slot_background_color, &base.slot_background_color),
            cta_color: pick(&self.cta_color, &base.cta_color),
        }
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// ============================================
// Offer
// ============================================

/// A promotional offer: title, ordered slots, optional design overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Offer {
    pub title: String,
    #[serde(default)]
    pub slots: Vec<Slot>,
    #[serde(default, alias = "designConfig")]
    pub design: DesignConfig,
}

impl Offer {
    pub fn new(title: impl Into<String>, slots: Vec<Slot>) -> Self {
        Self {
            title: title.into(),
            slots,
            design: DesignConfig::default(),
        }
    }

    pub fn with_design(mut self, design: DesignConfig) -> Self {
        self.design = design;
        self
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns a copy with the slot at `index` replaced. Out-of-range
    /// indices return an unchanged copy.
    pub fn with_slot(&self, index: usize, slot: Slot) -> Offer {
        let mut next = self.clone();
        if let Some(existing) = next.slots.get_mut(index) {
            *existing = slot;
        }
        next
    }

    /// Returns a copy with `slot` appended.
    pub fn with_slot_added(&self, slot: Slot) -> Offer {
        let mut next = self.clone();
        next.slots.push(slot);
        next
    }

    /// Returns a copy without the slot at `index`.
    pub fn with_slot_removed(&self, index: usize) -> Offer {
        let mut next = self.clone();
        if index < next.slots.len() {
            next.slots.remove(index);
        }
        next
    }
}

// ============================================
// Configuration records
// ============================================

/// A configuration as exchanged with the configuration API:
/// `{config_name, event_type, offer_type, slots}` plus an optional id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigurationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub config_name: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub offer_type: String,
    #[serde(default)]
    pub slots: Vec<Slot>,
    #[serde(
        default,
        alias = "designConfig",
        skip_serializing_if = "Option::is_none"
    )]
    pub design: Option<DesignConfig>,
}

impl ConfigurationRecord {
    /// Build the offer previewed for this record. The title is the config name.
    pub fn to_offer(&self) -> Offer {
        Offer {
            title: self.config_name.clone(),
            slots: self.slots.clone(),
            design: self.design.clone().unwrap_or_default(),
        }
    }

    /// The layout mode named by `offer_type`, if it names one.
    pub fn layout_mode(&self) -> Option<LayoutMode> {
        self.offer_type.parse().ok()
    }
}
