//! # Pricing Aggregation
//!
//! Pure subtotal/total computation over a quote's item tree.
//!
//! ## Aggregation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Pricing Aggregation                               │
//! │                                                                         │
//! │  Quote                                                                  │
//! │  ├── Simple  "Hidráulica"   value: 100 ──────────► subtotal = 100      │
//! │  └── Bundle  "Puesta a punto"                                           │
//! │      ├── SubItem "Filtro"   value: 30  ──┐                              │
//! │      └── SubItem "Bomba"    value: 20  ──┴──────► subtotal = 50        │
//! │                                                                         │
//! │                                     total = 100 + 50 = 150             │
//! │                                                                         │
//! │  Display flags (showPrice / showSubItemPrices) are NOT consulted:      │
//! │  a line whose price is hidden on the printout still bills.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values reaching this module have already been coerced at the schema
//! boundary (see [`crate::types`]), so aggregation itself never fails.

use crate::types::Item;

/// Computes the subtotal of a single line item.
///
/// - Simple line: its own value.
/// - Bundle line: the sum of its sub-item values.
///
/// ## Example
/// ```rust
/// use azul_core::types::{Item, SubItem};
/// use azul_core::pricing::item_subtotal;
///
/// let line = Item::bundle("Paquete", vec![
///     SubItem::new("A", "", 30.0),
///     SubItem::new("B", "", 20.0),
/// ]);
/// assert_eq!(item_subtotal(&line), 50.0);
/// ```
pub fn item_subtotal(item: &Item) -> f64 {
    match item {
        Item::Simple(simple) => simple.value,
        Item::Bundle(bundle) => bundle.sub_items.iter().map(|sub| sub.value).sum(),
    }
}

/// Computes the total of a quote: the sum of every item subtotal.
///
/// Display flags never exclude an item. This is intended business behavior
/// (a "price hidden" line still bills), not an oversight.
pub fn quote_total(items: &[Item]) -> f64 {
    items.iter().map(item_subtotal).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BundleItem, Item, SimpleItem, SubItem};
    use crate::LABOR_WITH_MATERIALS;

    fn simple(value: f64, show_price: bool) -> Item {
        Item::Simple(SimpleItem {
            service: "Servicio".to_string(),
            description: String::new(),
            labor_type: LABOR_WITH_MATERIALS.to_string(),
            value,
            show_price,
        })
    }

    fn bundle(values: &[f64], show_sub_item_prices: bool) -> Item {
        Item::Bundle(BundleItem {
            service: "Paquete".to_string(),
            labor_type: LABOR_WITH_MATERIALS.to_string(),
            sub_items: values
                .iter()
                .map(|v| SubItem::new("sub", "", *v))
                .collect(),
            show_sub_item_prices,
        })
    }

    #[test]
    fn test_simple_subtotal_is_its_value() {
        assert_eq!(item_subtotal(&simple(100.0, true)), 100.0);
        assert_eq!(item_subtotal(&simple(-25.0, true)), -25.0);
    }

    #[test]
    fn test_bundle_subtotal_sums_sub_items() {
        assert_eq!(item_subtotal(&bundle(&[30.0, 20.0], true)), 50.0);
        assert_eq!(item_subtotal(&bundle(&[], true)), 0.0);
    }

    #[test]
    fn test_quote_total_scenario() {
        // One simple line (100) + one bundle ([30, 20]) = 150.
        let items = vec![simple(100.0, true), bundle(&[30.0, 20.0], true)];
        assert_eq!(quote_total(&items), 150.0);
    }

    #[test]
    fn test_display_flags_never_reduce_total() {
        let shown = vec![simple(100.0, true), bundle(&[30.0, 20.0], true)];
        let hidden = vec![simple(100.0, false), bundle(&[30.0, 20.0], false)];
        assert_eq!(quote_total(&shown), quote_total(&hidden));
    }

    #[test]
    fn test_malformed_value_contributes_zero() {
        // "abc" coerces to 0 at the schema boundary; the aggregate just sums.
        let json = r#"[
            {"service": "A", "isPackage": false, "value": "abc"},
            {"service": "B", "isPackage": false, "value": 40}
        ]"#;
        let items: Vec<Item> = serde_json::from_str(json).unwrap();
        assert_eq!(quote_total(&items), 40.0);
    }

    /// Property: for any generated item tree, the total equals the sum of
    /// independently computed leaf values, no matter how display flags are
    /// set. Uses a small deterministic LCG so the tree shapes vary without
    /// pulling in a randomness dependency.
    #[test]
    fn test_total_matches_leaf_sum_over_generated_trees() {
        let mut state: u64 = 0x00c0_ffee;
        let mut next = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as u32
        };

        for _ in 0..200 {
            let item_count = (next() % 6) as usize;
            let mut items = Vec::with_capacity(item_count);
            let mut leaf_sum = 0.0f64;

            for _ in 0..item_count {
                let value = |raw: u32| (raw % 20_000) as f64 / 100.0 - 50.0;
                if next() % 2 == 0 {
                    let v = value(next());
                    leaf_sum += v;
                    items.push(simple(v, next() % 2 == 0));
                } else {
                    let sub_count = (next() % 5) as usize;
                    let subs: Vec<f64> = (0..sub_count).map(|_| value(next())).collect();
                    leaf_sum += subs.iter().sum::<f64>();
                    items.push(bundle(&subs, next() % 2 == 0));
                }
            }

            let total = quote_total(&items);
            assert!(
                (total - leaf_sum).abs() < 1e-9,
                "total {total} diverged from leaf sum {leaf_sum}"
            );
        }
    }
}
