//! Return-order pricing calculations.
//!
//! Totals are always derived from the current line items and never stored.

use crate::cart::{LineItem, LineItemKey};
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Complete pricing breakdown for a return order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderPricing {
    /// Sum of rate * quantity.
    pub subtotal: Money,
    /// Sum of each line's unrounded GST, rounded once to the minor unit.
    pub tax_total: Money,
    /// Subtotal plus GST.
    pub total: Money,
    /// Per-line breakdown, in the order the items were given.
    #[serde(skip)]
    pub lines: Vec<LineItemPricing>,
}

impl OrderPricing {
    /// Calculate pricing for a list of line items.
    ///
    /// Each line's GST rate applies to that line only; there is no blended
    /// rate. Line taxes are rounded for display, the order's tax is rounded
    /// once after summing. Returns an error if arithmetic overflow occurs.
    pub fn calculate(items: &[LineItem], currency: Currency) -> Result<Self, CommerceError> {
        let lines = items
            .iter()
            .map(|item| LineItemPricing::calculate(item, currency))
            .collect::<Result<Vec<_>, _>>()?;

        let subtotal =
            Money::try_sum(lines.iter().map(|l| &l.subtotal), currency).ok_or(CommerceError::Overflow)?;
        let raw_tax: f64 = lines
            .iter()
            .zip(items)
            .map(|(line, item)| line.subtotal.amount_minor as f64 * item.gst_rate / 100.0)
            .sum();
        if !raw_tax.is_finite() || raw_tax.round().abs() >= i64::MAX as f64 {
            return Err(CommerceError::Overflow);
        }
        let tax_total = Money::new(raw_tax.round() as i64, currency);
        let total = subtotal.try_add(&tax_total).ok_or(CommerceError::Overflow)?;

        Ok(Self {
            subtotal,
            tax_total,
            total,
            lines,
        })
    }

    /// Pricing of an empty order.
    pub fn zero(currency: Currency) -> Self {
        Self {
            subtotal: Money::zero(currency),
            tax_total: Money::zero(currency),
            total: Money::zero(currency),
            lines: Vec::new(),
        }
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemPricing {
    /// Line identity.
    pub key: LineItemKey,
    /// Rate * quantity.
    pub subtotal: Money,
    /// GST on this line, rounded to the minor unit.
    pub tax: Money,
    /// Subtotal plus GST.
    pub total: Money,
}

impl LineItemPricing {
    fn calculate(item: &LineItem, currency: Currency) -> Result<Self, CommerceError> {
        if item.per_item_rate.currency != currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: item.per_item_rate.currency.code().to_string(),
            });
        }
        let subtotal = item.subtotal()?;
        let tax = subtotal.percentage(item.gst_rate);
        let total = subtotal.try_add(&tax).ok_or(CommerceError::Overflow)?;
        Ok(Self {
            key: item.key(),
            subtotal,
            tax,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryType;
    use crate::ids::ProductId;

    fn item(id: &str, rate_minor: i64, quantity: i64, gst: f64) -> LineItem {
        LineItem {
            product_id: ProductId::new(id),
            product_name: id.to_string(),
            per_item_rate: Money::new(rate_minor, Currency::INR),
            quantity,
            gst_rate: gst,
            entry_type: EntryType::Return,
        }
    }

    #[test]
    fn test_pricing_example() {
        let items = vec![item("a", 10000, 2, 5.0), item("b", 5000, 1, 0.0)];
        let pricing = OrderPricing::calculate(&items, Currency::INR).unwrap();

        assert_eq!(pricing.subtotal.amount_minor, 25000);
        assert_eq!(pricing.tax_total.amount_minor, 1000);
        assert_eq!(pricing.total.amount_minor, 26000);
        assert_eq!(pricing.lines.len(), 2);
        assert_eq!(pricing.lines[0].tax.amount_minor, 1000);
    }

    #[test]
    fn test_empty_pricing_is_zero() {
        let pricing = OrderPricing::calculate(&[], Currency::INR).unwrap();
        assert_eq!(pricing, OrderPricing::zero(Currency::INR));
        assert!(pricing.total.is_zero());
    }

    #[test]
    fn test_per_line_gst_rates() {
        let items = vec![item("a", 1000, 1, 12.0), item("b", 1000, 1, 18.0)];
        let pricing = OrderPricing::calculate(&items, Currency::INR).unwrap();
        assert_eq!(pricing.tax_total.amount_minor, 300);
        assert_eq!(pricing.total.amount_minor, 2300);
    }

    #[test]
    fn test_tax_total_rounded_once() {
        // Each line carries half a paisa of GST.
        let items = vec![
            item("a", 1, 1, 50.0),
            item("b", 1, 1, 50.0),
            item("c", 1, 1, 50.0),
        ];
        let pricing = OrderPricing::calculate(&items, Currency::INR).unwrap();
        assert!(pricing.lines.iter().all(|l| l.tax.amount_minor == 1));
        assert_eq!(pricing.tax_total.amount_minor, 2);
        assert_eq!(pricing.total.amount_minor, 5);
    }

    #[test]
    fn test_overflow_is_reported() {
        let items = vec![item("a", i64::MAX, 2, 0.0)];
        assert_eq!(
            OrderPricing::calculate(&items, Currency::INR),
            Err(CommerceError::Overflow)
        );
    }

    #[test]
    fn test_currency_mismatch() {
        let mut foreign = item("a", 1000, 1, 0.0);
        foreign.per_item_rate = Money::new(1000, Currency::USD);
        assert!(matches!(
            OrderPricing::calculate(&[foreign], Currency::INR),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }
}
