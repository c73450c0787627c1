//! Totals reconciliation: explicit upstream figures first, derived second.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use receiptkit_core::Money;

use crate::model::{PaymentLine, ReceiptItem, ReceiptTotals};
use crate::resolve::Fields;
use crate::rules::{Field, candidates, row};
use crate::source::OrderSource;

lazy_static! {
    /// An amount following the word "change", e.g. `Change given: ৳100`.
    static ref CHANGE_IN_NOTES: Regex =
        Regex::new(r"(?i)\bchange\b[^0-9]*?([0-9][0-9,]*(?:\.[0-9]+)?)")
            .expect("change pattern compiles");
}

/// Change amount mentioned in free-text notes, if any.
pub fn change_from_notes(notes: &str) -> Option<Money> {
    CHANGE_IN_NOTES
        .captures(notes)
        .and_then(|caps| caps.get(1))
        .map(|m| Money::parse_lossy(m.as_str()))
}

/// Upstream payment entries with a non-zero amount.
pub fn collect_payments(order: &Fields<'_>, source: OrderSource) -> Vec<PaymentLine> {
    let Some(entries) = order.array(candidates(source, Field::Payments)) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let payment = Fields::new(entry);
            let amount = payment.money(row::PAYMENT_AMOUNT)?;
            if amount.is_zero() {
                return None;
            }
            Some(PaymentLine {
                method: payment.string(row::PAYMENT_METHOD),
                amount,
            })
        })
        .collect()
}

/// Build the final totals block.
///
/// Per field: explicit value (positive where noted) → derived value → 0.
/// Explicit and derived values alike are clamped at zero.
pub fn reconcile(
    order: &Fields<'_>,
    source: OrderSource,
    items: &[ReceiptItem],
    payments: &[PaymentLine],
    notes: Option<&str>,
) -> ReceiptTotals {
    let explicit = |field: Field| {
        order
            .money(candidates(source, field))
            .map(Money::clamp_non_negative)
    };
    let explicit_positive = |field: Field| explicit(field).filter(|m| m.is_positive());

    let subtotal = explicit_positive(Field::Subtotal)
        .unwrap_or_else(|| items.iter().map(|i| i.line_total).sum::<Money>().clamp_non_negative());
    let discount = explicit_positive(Field::Discount)
        .unwrap_or_else(|| items.iter().map(|i| i.discount).sum::<Money>().clamp_non_negative());
    let tax = explicit(Field::Tax).unwrap_or(Money::ZERO);
    let shipping = explicit(Field::Shipping).unwrap_or(Money::ZERO);

    let total = explicit_positive(Field::Total).unwrap_or_else(|| {
        let derived = (subtotal - discount + tax + shipping).clamp_non_negative();
        debug!(%derived, "total derived from components");
        derived
    });

    let paid = explicit(Field::Paid)
        .unwrap_or_else(|| payments.iter().map(|p| p.amount).sum::<Money>().clamp_non_negative());
    let due = explicit(Field::Due).unwrap_or_else(|| (total - paid).clamp_non_negative());

    // Upstream systems record change in different places; the largest wins.
    let change = [
        explicit(Field::Change).unwrap_or(Money::ZERO),
        notes.and_then(change_from_notes).unwrap_or(Money::ZERO),
        (paid - total).clamp_non_negative(),
    ]
    .into_iter()
    .max()
    .unwrap_or(Money::ZERO);

    ReceiptTotals {
        subtotal,
        discount,
        tax,
        shipping,
        total,
        paid,
        due,
        change,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemKind;
    use serde_json::json;

    fn item(line_total: i64, discount: i64) -> ReceiptItem {
        ReceiptItem {
            kind: ItemKind::Product,
            name: "Line".into(),
            variant: None,
            qty: 1.0,
            unit_price: Money::from_minor(line_total),
            line_total: Money::from_minor(line_total),
            discount: Money::from_minor(discount),
            barcodes: None,
        }
    }

    fn totals_for(raw: serde_json::Value, items: &[ReceiptItem]) -> ReceiptTotals {
        let order = Fields::new(&raw);
        let source = OrderSource::detect(&raw);
        let payments = collect_payments(&order, source);
        let notes = order.string(candidates(source, Field::Notes));
        reconcile(&order, source, items, &payments, notes.as_deref())
    }

    #[test]
    fn derives_everything_from_items_when_nothing_is_explicit() {
        let totals = totals_for(json!({}), &[item(50_000, 0), item(30_000, 5_000)]);
        assert_eq!(totals.subtotal, Money::from_minor(80_000));
        assert_eq!(totals.discount, Money::from_minor(5_000));
        assert_eq!(totals.total, Money::from_minor(75_000));
        assert_eq!(totals.paid, Money::ZERO);
        assert_eq!(totals.due, Money::from_minor(75_000));
        assert_eq!(totals.change, Money::ZERO);
    }

    #[test]
    fn explicit_total_is_authoritative() {
        let raw = json!({"subtotal": 1000, "discount": 100, "tax": 50, "shipping_charge": 60, "total_amount": 999});
        let totals = totals_for(raw, &[]);
        assert_eq!(totals.total, Money::from_minor(99_900));
    }

    #[test]
    fn derived_total_includes_tax_and_shipping() {
        let raw = json!({"subtotal": "1,000", "discount": "100", "vat": "50", "delivery_charge": "60"});
        let totals = totals_for(raw, &[]);
        assert_eq!(totals.total, Money::from_minor(101_000));
    }

    #[test]
    fn zero_explicit_subtotal_falls_back_to_items() {
        let raw = json!({"subtotal": 0, "grand_total": "0"});
        let totals = totals_for(raw, &[item(12_345, 0)]);
        assert_eq!(totals.subtotal, Money::from_minor(12_345));
        assert_eq!(totals.total, Money::from_minor(12_345));
    }

    #[test]
    fn paid_falls_back_to_payments() {
        let raw = json!({
            "total": 500,
            "payments": [
                {"method": "cash", "amount": "300"},
                {"payment_method": "bKash", "amount": 150},
                {"method": "card", "amount": 0}
            ]
        });
        let order = Fields::new(&raw);
        let payments = collect_payments(&order, OrderSource::detect(&raw));
        assert_eq!(payments.len(), 2);
        assert_eq!(payments[1].method.as_deref(), Some("bKash"));

        let totals = totals_for(raw, &[]);
        assert_eq!(totals.paid, Money::from_minor(45_000));
        assert_eq!(totals.due, Money::from_minor(5_000));
    }

    #[test]
    fn explicit_paid_and_due_win() {
        let raw = json!({"total": 500, "paid": 0, "due_amount": 123, "payments": [{"amount": 500}]});
        let totals = totals_for(raw, &[]);
        assert_eq!(totals.paid, Money::ZERO);
        assert_eq!(totals.due, Money::from_minor(12_300));
    }

    #[test]
    fn change_is_the_largest_candidate() {
        let raw = json!({"paid": 1000, "total": 850, "notes": "Change given: ৳100"});
        let totals = totals_for(raw, &[]);
        assert_eq!(totals.change, Money::from_minor(15_000));

        let raw = json!({"paid": 1000, "total": 850, "change_amount": 200});
        assert_eq!(totals_for(raw, &[]).change, Money::from_minor(20_000));

        let raw = json!({"paid": 850, "total": 850, "note": "customer change: 1,250.50 returned"});
        assert_eq!(totals_for(raw, &[]).change, Money::from_minor(125_050));
    }

    #[test]
    fn negative_explicit_figures_are_clamped() {
        let raw = json!({"total": 500, "tax": -10, "shipping": "-20", "paid": -5, "due": "-5", "change": -1});
        let totals = totals_for(raw, &[]);
        assert_eq!(totals.tax, Money::ZERO);
        assert_eq!(totals.shipping, Money::ZERO);
        assert_eq!(totals.paid, Money::ZERO);
        assert_eq!(totals.due, Money::ZERO);
        assert_eq!(totals.change, Money::ZERO);
    }

    #[test]
    fn notes_pattern_needs_the_word_change() {
        assert_eq!(change_from_notes("Change given: ৳100"), Some(Money::from_minor(10_000)));
        assert_eq!(change_from_notes("CHANGE 20"), Some(Money::from_minor(2_000)));
        assert_eq!(
            change_from_notes("Change returned to customer in cash: 100"),
            Some(Money::from_minor(10_000))
        );
        assert_eq!(change_from_notes("exchange 20"), None);
        assert_eq!(change_from_notes("changed size to 42"), None);
        assert_eq!(change_from_notes("no numbers here"), None);
    }
}
