//! # Domain Types
//!
//! Core domain types used throughout Azul Quotes.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Quote       │   │      Item       │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  Simple(..)     │   │  id (UUID)      │       │
//! │  │  quote_number   │   │  Bundle(..)     │   │  kind           │       │
//! │  │  items          │   │                 │   │  sub_items      │       │
//! │  │  total (derived)│   │  SubItem leaves │   │  (template only)│       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Currency     │   │   QuoteDraft    │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Ars | Usd      │   │  pre-save state │                             │
//! │  │  (closed enum)  │   │  no number yet  │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Record Boundary
//! Persisted item records are flat JSON objects discriminated by the boolean
//! `isPackage` (the historical document shape). In memory an item is a proper
//! sum type - a Simple line can never carry sub-items. The translation lives
//! in one place (`ItemRecord`) and also applies the schema defaults:
//! display flags absent in old documents become `true`, transient editor ids
//! are dropped, and malformed numeric values coerce to `0`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::LABOR_WITH_MATERIALS;

// =============================================================================
// Currency
// =============================================================================

/// The two currencies a quote can be denominated in.
///
/// Closed enum: conversion can never introduce a third value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    /// Argentine peso.
    #[serde(rename = "ARS")]
    Ars,
    /// US dollar.
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    /// Canonical uppercase code, as persisted.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Currency::Ars => "ARS",
            Currency::Usd => "USD",
        }
    }

    /// Parses a persisted currency code.
    pub fn parse(code: &str) -> Option<Currency> {
        match code {
            "ARS" => Some(Currency::Ars),
            "USD" => Some(Currency::Usd),
            _ => None,
        }
    }
}

/// New quotes start in pesos.
impl Default for Currency {
    fn default() -> Self {
        Currency::Ars
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Lenient Numeric Values
// =============================================================================

/// Coerces a raw JSON value to a finite f64, defaulting to 0.
///
/// Historical documents hold values typed by whatever the editor sent:
/// numbers, numeric strings, empty strings, occasionally garbage. The policy
/// is fail-soft: anything that does not parse as a finite number is 0, and
/// negative values pass through unclamped.
fn coerce_raw(raw: &serde_json::Value) -> f64 {
    match raw {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Deserializer for lenient `value` fields.
fn lenient_value<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_raw(&raw))
}

/// Deserializer for lenient optional `value` fields.
fn lenient_opt_value<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(Some(coerce_raw(&raw)))
}

// =============================================================================
// SubItem
// =============================================================================

/// A priced leaf entry owned by a bundle item.
///
/// Sub-items have no identity outside their parent bundle; they are stored
/// inline in the quote document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubItem {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Lenient numeric: malformed input is 0, negatives pass through.
    #[serde(default, deserialize_with = "lenient_value")]
    pub value: f64,
}

impl SubItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>, value: f64) -> Self {
        SubItem {
            name: name.into(),
            description: description.into(),
            value,
        }
    }
}

// =============================================================================
// Item - tagged union over the two line variants
// =============================================================================

/// A single-priced service line.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleItem {
    /// Service label (e.g. "Hidráulica").
    pub service: String,
    /// Free-text description / observations.
    pub description: String,
    /// Labor-type label shown on the printed document.
    pub labor_type: String,
    /// Line value. Lenient numeric on input.
    pub value: f64,
    /// Whether the price is rendered. Cosmetic only: a hidden price
    /// still counts toward the total.
    pub show_price: bool,
}

/// A bundle of sub-items priced by their sum.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleItem {
    pub service: String,
    pub labor_type: String,
    /// Ordered sub-items. Expected non-empty, not enforced.
    pub sub_items: Vec<SubItem>,
    /// Whether per-sub-item prices are rendered. Cosmetic only.
    pub show_sub_item_prices: bool,
}

/// A line item within a quote: either a Simple line or a Bundle of SubItems.
///
/// The persisted form is the flat `isPackage`-discriminated record - see
/// `ItemRecord` for the translation and the schema defaults applied on
/// the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ItemRecord", into = "ItemRecord")]
pub enum Item {
    Simple(SimpleItem),
    Bundle(BundleItem),
}

impl Item {
    /// Builds a simple line with default display settings.
    pub fn simple(
        service: impl Into<String>,
        description: impl Into<String>,
        value: f64,
    ) -> Item {
        Item::Simple(SimpleItem {
            service: service.into(),
            description: description.into(),
            labor_type: LABOR_WITH_MATERIALS.to_string(),
            value,
            show_price: true,
        })
    }

    /// Builds a bundle line with default display settings.
    pub fn bundle(service: impl Into<String>, sub_items: Vec<SubItem>) -> Item {
        Item::Bundle(BundleItem {
            service: service.into(),
            labor_type: LABOR_WITH_MATERIALS.to_string(),
            sub_items,
            show_sub_item_prices: true,
        })
    }

    /// Prefills a simple line from a catalog template.
    ///
    /// Fields are copied; no reference to the product is retained, so later
    /// catalog edits never rewrite history.
    pub fn simple_from_template(product: &Product) -> Item {
        Item::Simple(SimpleItem {
            service: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            labor_type: LABOR_WITH_MATERIALS.to_string(),
            value: crate::validation::coerce_value(product.value),
            show_price: true,
        })
    }

    /// Prefills a bundle line from a catalog template with the sub-items the
    /// operator selected (usually all of them).
    pub fn bundle_from_template(product: &Product, selection: Vec<SubItem>) -> Item {
        Item::Bundle(BundleItem {
            service: product.name.clone(),
            labor_type: LABOR_WITH_MATERIALS.to_string(),
            sub_items: selection,
            show_sub_item_prices: true,
        })
    }

    /// True for bundle lines.
    #[inline]
    pub fn is_package(&self) -> bool {
        matches!(self, Item::Bundle(_))
    }

    /// The service label, whichever variant this is.
    pub fn service(&self) -> &str {
        match self {
            Item::Simple(item) => &item.service,
            Item::Bundle(item) => &item.service,
        }
    }
}

// =============================================================================
// ItemRecord - the persisted shape
// =============================================================================

fn default_labor_type() -> String {
    LABOR_WITH_MATERIALS.to_string()
}

/// The flat, `isPackage`-discriminated record items are persisted as.
///
/// Unknown keys (in particular transient editor `id`s) are dropped on
/// deserialization; display flags absent in old documents default to `true`
/// here, once, rather than at every consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemRecord {
    #[serde(default)]
    is_package: bool,

    #[serde(default)]
    service: String,

    #[serde(default)]
    description: String,

    #[serde(default = "default_labor_type")]
    labor_type: String,

    #[serde(
        default,
        deserialize_with = "lenient_opt_value",
        skip_serializing_if = "Option::is_none"
    )]
    value: Option<f64>,

    #[serde(default)]
    sub_items: Vec<SubItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    show_price: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    show_sub_item_prices: Option<bool>,
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        if record.is_package {
            Item::Bundle(BundleItem {
                service: record.service,
                labor_type: record.labor_type,
                sub_items: record.sub_items,
                show_sub_item_prices: record.show_sub_item_prices.unwrap_or(true),
            })
        } else {
            Item::Simple(SimpleItem {
                service: record.service,
                description: record.description,
                labor_type: record.labor_type,
                value: record.value.unwrap_or(0.0),
                show_price: record.show_price.unwrap_or(true),
            })
        }
    }
}

impl From<Item> for ItemRecord {
    fn from(item: Item) -> Self {
        match item {
            Item::Simple(simple) => ItemRecord {
                is_package: false,
                service: simple.service,
                description: simple.description,
                labor_type: simple.labor_type,
                value: Some(simple.value),
                sub_items: Vec::new(),
                show_price: Some(simple.show_price),
                show_sub_item_prices: None,
            },
            Item::Bundle(bundle) => ItemRecord {
                is_package: true,
                service: bundle.service,
                description: String::new(),
                labor_type: bundle.labor_type,
                value: None,
                sub_items: bundle.sub_items,
                show_price: None,
                show_sub_item_prices: Some(bundle.show_sub_item_prices),
            },
        }
    }
}

// =============================================================================
// Quote
// =============================================================================

/// The persisted priced document for a client.
///
/// `total` is derived - the save path always recomputes it from `items`,
/// so the two can never drift. `quote_number` and `created_at` are assigned
/// once at first save and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Unique identifier (UUID v4), assigned by the store at first save.
    pub id: String,

    /// Account that owns this quote. Numbering is scoped per owner.
    pub owner_id: String,

    /// Positive, unique, gapless-from-1 per owner. Assigned once.
    pub quote_number: i64,

    /// Required, non-empty.
    pub client_name: String,

    #[serde(default)]
    pub client_address: Option<String>,

    #[serde(default)]
    pub client_contact: Option<String>,

    /// Ordered line items. Order is display-relevant and preserved.
    #[serde(default)]
    pub items: Vec<Item>,

    #[serde(default)]
    pub currency: Currency,

    /// Derived sum of item subtotals, regardless of display flags.
    #[serde(default)]
    pub total: f64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Quote {
    /// The zero-padded document number shown on listings and printouts
    /// (e.g. `00042`).
    pub fn formatted_number(&self) -> String {
        format!("{:05}", self.quote_number)
    }
}

// =============================================================================
// QuoteDraft
// =============================================================================

/// The in-memory editing state of a quote, before or between saves.
///
/// A draft carries no `total`, no `quote_number` and no timestamps - those
/// are engine-owned and assigned at save time. `id == None` means the draft
/// has never been persisted (create path).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraft {
    #[serde(default)]
    pub id: Option<String>,

    pub owner_id: String,

    pub client_name: String,

    #[serde(default)]
    pub client_address: Option<String>,

    #[serde(default)]
    pub client_contact: Option<String>,

    #[serde(default)]
    pub items: Vec<Item>,

    #[serde(default)]
    pub currency: Currency,
}

impl QuoteDraft {
    /// True when this draft has never been saved (no id yet).
    #[inline]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

// =============================================================================
// Product - catalog template
// =============================================================================

/// Whether a catalog entry prefills a simple line or a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Simple,
    Bundle,
}

impl ProductKind {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Simple => "simple",
            ProductKind::Bundle => "bundle",
        }
    }

    pub fn parse(kind: &str) -> Option<ProductKind> {
        match kind {
            "simple" => Some(ProductKind::Simple),
            "bundle" => Some(ProductKind::Bundle),
            _ => None,
        }
    }
}

/// A reusable service/package template from the catalog.
///
/// Templates only ever prefill new items - the quote keeps its own copy of
/// every field and no reference back to the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    pub owner_id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: ProductKind,

    /// Simple templates only. Lenient numeric on input.
    #[serde(default, deserialize_with = "lenient_value")]
    pub value: f64,

    #[serde(default)]
    pub description: Option<String>,

    /// Bundle templates only.
    #[serde(default)]
    pub sub_items: Vec<SubItem>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
