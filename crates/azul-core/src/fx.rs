//! # Currency Conversion
//!
//! Bulk ARS/USD conversion over a quote's item tree.
//!
//! ## Conversion Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Currency Conversion                                 │
//! │                                                                         │
//! │  rate = ARS per 1 USD (externally supplied, must be positive)          │
//! │                                                                         │
//! │  ARS ──► USD    every leaf value ÷ rate                                │
//! │  USD ──► ARS    every leaf value × rate                                │
//! │  X   ──► X      no-op, the input snapshot is returned unchanged        │
//! │                                                                         │
//! │  `total` is NOT converted directly: it is recomputed from the          │
//! │  converted leaves so it can never drift from them.                     │
//! │                                                                         │
//! │  Repeated conversion is lossy: ARS→USD→ARS with the same rate only     │
//! │  reproduces the original within floating tolerance.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The converter performs no I/O and has no fallback. Obtaining a rate (and
//! substituting the fixed fallback when the lookup fails) is the caller's
//! job - see the `azul-rates` crate.

use crate::error::CoreError;
use crate::pricing;
use crate::types::{Currency, Item, Quote};

/// Converts every numeric leaf of a quote to the target currency and returns
/// the converted snapshot.
///
/// Returns the input unchanged when the quote is already denominated in
/// `target`. Fails only on an unusable rate (zero, negative, non-finite).
pub fn convert_quote(quote: &Quote, target: Currency, rate: f64) -> Result<Quote, CoreError> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(CoreError::InvalidRate { rate });
    }

    if quote.currency == target {
        return Ok(quote.clone());
    }

    let mut converted = quote.clone();
    for item in &mut converted.items {
        convert_item(item, quote.currency, rate);
    }

    converted.total = pricing::quote_total(&converted.items);
    converted.currency = target;
    Ok(converted)
}

/// Converts one item's leaves in place. `from` is the quote's current
/// denomination; the direction decides divide vs multiply.
fn convert_item(item: &mut Item, from: Currency, rate: f64) {
    match item {
        Item::Simple(simple) => {
            simple.value = convert_value(simple.value, from, rate);
        }
        Item::Bundle(bundle) => {
            for sub in &mut bundle.sub_items {
                sub.value = convert_value(sub.value, from, rate);
            }
        }
    }
}

#[inline]
fn convert_value(value: f64, from: Currency, rate: f64) -> f64 {
    match from {
        Currency::Ars => value / rate,
        Currency::Usd => value * rate,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{QuoteDraft, SubItem};
    use chrono::Utc;

    fn quote_in(currency: Currency, items: Vec<Item>) -> Quote {
        let now = Utc::now();
        Quote {
            id: "q1".to_string(),
            owner_id: "owner".to_string(),
            quote_number: 1,
            client_name: "Cliente".to_string(),
            client_address: None,
            client_contact: None,
            total: pricing::quote_total(&items),
            items,
            currency,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_ars_to_usd_divides_every_leaf() {
        let quote = quote_in(
            Currency::Ars,
            vec![
                Item::simple("Servicio", "", 100.0),
                Item::bundle(
                    "Paquete",
                    vec![SubItem::new("A", "", 30.0), SubItem::new("B", "", 20.0)],
                ),
            ],
        );

        let converted = convert_quote(&quote, Currency::Usd, 1000.0).unwrap();
        assert_eq!(converted.currency, Currency::Usd);

        match &converted.items[0] {
            Item::Simple(simple) => assert!((simple.value - 0.1).abs() < 1e-9),
            Item::Bundle(_) => panic!("expected a simple item"),
        }
        match &converted.items[1] {
            Item::Bundle(bundle) => {
                assert!((bundle.sub_items[0].value - 0.03).abs() < 1e-9);
                assert!((bundle.sub_items[1].value - 0.02).abs() < 1e-9);
            }
            Item::Simple(_) => panic!("expected a bundle item"),
        }

        // Total recomputed from converted leaves, not converted directly.
        assert!((converted.total - 0.15).abs() < 1e-9);

        // The input snapshot is untouched.
        assert_eq!(quote.currency, Currency::Ars);
        assert_eq!(quote.total, 150.0);
    }

    #[test]
    fn test_usd_to_ars_multiplies() {
        let quote = quote_in(Currency::Usd, vec![Item::simple("Servicio", "", 2.5)]);
        let converted = convert_quote(&quote, Currency::Ars, 1000.0).unwrap();
        assert!((converted.total - 2500.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_currency_is_a_no_op() {
        let quote = quote_in(Currency::Ars, vec![Item::simple("Servicio", "", 100.0)]);
        let converted = convert_quote(&quote, Currency::Ars, 1000.0).unwrap();
        assert_eq!(converted, quote);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let rate = 987.65;
        let quote = quote_in(
            Currency::Ars,
            vec![
                Item::simple("Servicio", "", 12345.67),
                Item::bundle(
                    "Paquete",
                    vec![
                        SubItem::new("A", "", 0.03),
                        SubItem::new("B", "", 99999.99),
                    ],
                ),
            ],
        );

        let there = convert_quote(&quote, Currency::Usd, rate).unwrap();
        let back = convert_quote(&there, Currency::Ars, rate).unwrap();

        for (orig, round) in quote.items.iter().zip(back.items.iter()) {
            let a = pricing::item_subtotal(orig);
            let b = pricing::item_subtotal(round);
            let tolerance = a.abs().max(1.0) * 1e-9;
            assert!((a - b).abs() < tolerance, "{a} vs {b}");
        }
        let tolerance = quote.total.abs().max(1.0) * 1e-9;
        assert!((quote.total - back.total).abs() < tolerance);
    }

    #[test]
    fn test_unusable_rates_are_rejected() {
        let quote = quote_in(Currency::Ars, vec![Item::simple("Servicio", "", 100.0)]);
        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = convert_quote(&quote, Currency::Usd, rate);
            assert!(matches!(result, Err(CoreError::InvalidRate { .. })));
        }
    }

    #[test]
    fn test_draft_items_convert_through_quote() {
        // Conversion operates on persisted snapshots; a draft being edited
        // converts by rebuilding its items the same way the editor does.
        let draft = QuoteDraft {
            id: None,
            owner_id: "owner".to_string(),
            client_name: "Cliente".to_string(),
            client_address: None,
            client_contact: None,
            items: vec![Item::simple("Servicio", "", 1000.0)],
            currency: Currency::Ars,
        };
        let quote = quote_in(draft.currency, draft.items.clone());
        let converted = convert_quote(&quote, Currency::Usd, 1000.0).unwrap();
        assert!((converted.total - 1.0).abs() < 1e-9);
    }
}
