//! Line-item extraction: classify, resolve, and split raw rows.

use serde_json::Value;
use tracing::debug;

use receiptkit_core::Money;

use crate::model::{ItemKind, ReceiptItem};
use crate::resolve::{Fields, coerce_string, is_truthy};
use crate::rules::row;

/// Row collections, walked in order: generic, product, then service lines.
/// Within each family the first present key is used.
const COLLECTIONS: &[&[&str]] = &[
    &["items", "order_items", "lines", "line_items", "cart"],
    &["products", "product_lines", "order_products"],
    &["services", "service_lines", "order_services"],
];

/// A normalized row plus the identity hints needed for de-duplication.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftRow {
    pub item: ReceiptItem,
    pub stable_id: Option<String>,
    pub batch: Option<String>,
    pub sku: Option<String>,
}

/// Every usable row from every collection, already split into units.
pub fn collect_rows(order: &Fields<'_>) -> Vec<DraftRow> {
    let mut rows = Vec::new();
    for &keys in COLLECTIONS {
        let Some(entries) = order.array(keys) else {
            continue;
        };
        for (index, entry) in entries.iter().enumerate() {
            match normalize_row(entry) {
                Some(draft) => rows.extend(split_units(draft)),
                None => debug!(index, collection = keys[0], "dropped empty line row"),
            }
        }
    }
    rows
}

/// Service by row markers only; the collection a row came from does not count.
fn classify(row: &Fields<'_>) -> ItemKind {
    let typed_service = row
        .string(row::TYPE)
        .is_some_and(|t| t.eq_ignore_ascii_case("service"));
    let flagged = row.first(row::SERVICE_FLAG).is_some_and(is_truthy);

    if typed_service || flagged || row.string(row::SERVICE_ID).is_some() {
        ItemKind::Service
    } else {
        ItemKind::Product
    }
}

fn resolve_variant(row: &Fields<'_>, kind: ItemKind) -> Option<String> {
    match kind {
        ItemKind::Service => row.string(row::SERVICE_CATEGORY),
        ItemKind::Product => row.string(row::PRODUCT_VARIANT).or_else(|| {
            let parts: Vec<String> = [row.string(row::SIZE), row.string(row::COLOR)]
                .into_iter()
                .flatten()
                .collect();
            (!parts.is_empty()).then(|| parts.join(" / "))
        }),
    }
}

/// Array, or a single code wrapped into one; trimmed, distinct, in order.
fn resolve_barcodes(row: &Fields<'_>) -> Vec<String> {
    let raw: Vec<String> = match row.first(row::BARCODES) {
        Some(Value::Array(list)) => list.iter().map(coerce_string).collect(),
        Some(single) => vec![coerce_string(single)],
        None => Vec::new(),
    };

    let mut codes: Vec<String> = Vec::with_capacity(raw.len());
    for code in raw {
        if !code.is_empty() && !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

/// Resolve one raw row. `None` when it carries nothing printable.
pub fn normalize_row(entry: &Value) -> Option<DraftRow> {
    if !entry.is_object() {
        return None;
    }
    let row = Fields::new(entry);
    let kind = classify(&row);

    let names = match kind {
        ItemKind::Product => row::PRODUCT_NAME,
        ItemKind::Service => row::SERVICE_NAME,
    };
    let name = row.string(names).unwrap_or_default();

    let unit_price = row.money(row::UNIT_PRICE).unwrap_or(Money::ZERO);
    let discount = row.money(row::DISCOUNT).unwrap_or(Money::ZERO);
    let explicit_total = row.money(row::LINE_TOTAL).filter(|m| m.is_positive());

    let raw_qty = row.number(row::QTY).unwrap_or(0.0);
    let mut qty = if raw_qty > 0.0 { raw_qty } else { 0.0 };
    // An amount-only row (typical for services) is one unit.
    if qty == 0.0 && (explicit_total.is_some() || unit_price.is_positive()) {
        qty = 1.0;
    }

    let line_total = explicit_total
        .unwrap_or_else(|| (unit_price.times(qty) - discount).clamp_non_negative());

    if name.is_empty() && qty == 0.0 && line_total.is_zero() {
        return None;
    }

    let barcodes = resolve_barcodes(&row);
    let item = ReceiptItem {
        kind,
        name: if name.is_empty() {
            kind.default_name().to_string()
        } else {
            name
        },
        variant: resolve_variant(&row, kind),
        qty,
        unit_price,
        line_total,
        discount,
        barcodes: (!barcodes.is_empty()).then_some(barcodes),
    };

    Some(DraftRow {
        item,
        stable_id: row.string(row::STABLE_ID),
        batch: row.string(row::BATCH),
        sku: row.string(row::SKU),
    })
}

/// Explode an aggregated row into unit rows, one per barcode.
///
/// Only when `round(qty) > 1` and the distinct barcode count equals it.
/// The last unit takes the rounding remainder so the unit totals (and unit
/// discounts) sum to the original amounts exactly.
pub fn split_units(draft: DraftRow) -> Vec<DraftRow> {
    let units = draft.item.qty.round();
    let codes = draft.item.barcodes.as_deref().unwrap_or_default();
    if units <= 1.0 || codes.len() as f64 != units {
        return vec![draft];
    }

    let n = codes.len();
    let totals = draft.item.line_total.split_evenly(n);
    let discounts = draft.item.discount.split_evenly(n);
    debug!(name = %draft.item.name, units = n, "splitting line into barcode units");

    codes
        .iter()
        .zip(totals)
        .zip(discounts)
        .map(|((code, line_total), discount)| DraftRow {
            item: ReceiptItem {
                qty: 1.0,
                line_total,
                discount,
                barcodes: Some(vec![code.clone()]),
                ..draft.item.clone()
            },
            stable_id: draft.stable_id.clone(),
            batch: draft.batch.clone(),
            sku: draft.sku.clone(),
        })
        .collect()
}
