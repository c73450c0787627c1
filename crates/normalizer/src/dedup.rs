//! Duplicate-line suppression across source collections.

use std::collections::HashSet;

use tracing::debug;

use receiptkit_core::Money;

use crate::items::DraftRow;
use crate::model::{ItemKind, ReceiptItem};

/// What makes two rows "the same line" before barcodes/batch/sku are compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum LineIdentity {
    Stable(String),
    Content {
        name: String,
        variant: Option<String>,
        /// Bit pattern of a non-negative, non-NaN quantity.
        qty_bits: u64,
        unit_price: Money,
        line_total: Money,
    },
}

/// Composite identity of one printable row.
///
/// The barcode set is always part of the key: two units of one SKU may share
/// a row id but never a barcode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    kind: ItemKind,
    identity: LineIdentity,
    barcodes: Vec<String>,
    batch: Option<String>,
    sku: Option<String>,
}

impl DedupKey {
    pub fn of(row: &DraftRow) -> Self {
        let item = &row.item;
        let identity = match &row.stable_id {
            Some(id) => LineIdentity::Stable(id.clone()),
            None => LineIdentity::Content {
                name: item.name.clone(),
                variant: item.variant.clone(),
                qty_bits: item.qty.to_bits(),
                unit_price: item.unit_price,
                line_total: item.line_total,
            },
        };

        let mut barcodes = item.barcodes.clone().unwrap_or_default();
        barcodes.sort();

        Self {
            kind: item.kind,
            identity,
            barcodes,
            batch: row.batch.clone(),
            sku: row.sku.clone(),
        }
    }
}

/// Keep the first row for every key, preserving order.
pub fn dedup(rows: Vec<DraftRow>) -> Vec<ReceiptItem> {
    let mut seen: HashSet<DedupKey> = HashSet::with_capacity(rows.len());
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        if seen.insert(DedupKey::of(&row)) {
            out.push(row.item);
        } else {
            debug!(name = %row.item.name, "suppressed duplicate line");
        }
    }
    out
}
