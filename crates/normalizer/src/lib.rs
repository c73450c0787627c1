//! `receiptkit-normalizer`: reduce heterogeneous order JSON to one receipt.
//!
//! Upstream orders arrive from a social-commerce UI, a point-of-sale counter,
//! and a backend API, each with its own key names and nesting. [`canonicalize`]
//! turns any of them into a [`ReceiptOrder`] ready for printing or PDF export.
//!
//! ```text
//! raw JSON → OrderSource::detect
//!          → header (aliases, dates, address lines)
//!          → items  (classify, resolve, split by barcode)
//!          → dedup  (composite identity key)
//!          → totals (explicit first, derived second)
//! ```
//!
//! The pipeline is pure: no IO, no shared state, and it never fails. Missing or
//! malformed fields degrade to empty strings and zero amounts.

pub mod address;
pub mod datetime;
pub mod dedup;
pub mod header;
pub mod items;
pub mod model;
pub mod resolve;
pub mod rules;
pub mod source;
pub mod totals;

use chrono::{Local, NaiveDateTime};
use serde_json::Value;
use tracing::{Span, debug, field, instrument};

use receiptkit_core::ReceiptResult;

pub use model::{ItemKind, PaymentLine, ReceiptItem, ReceiptOrder, ReceiptTotals};
pub use receiptkit_core::{Money, ReceiptError};
pub use source::OrderSource;

use crate::resolve::Fields;
use crate::rules::{Field, candidates};

/// Normalize one raw order, using the local clock when it carries no date.
pub fn canonicalize(raw: &Value) -> ReceiptOrder {
    canonicalize_at(raw, Local::now().naive_local())
}

/// Normalize one raw order with an explicit "now" for the missing-date case.
#[instrument(skip_all, fields(source = field::Empty, items = field::Empty))]
pub fn canonicalize_at(raw: &Value, now: NaiveDateTime) -> ReceiptOrder {
    let order = Fields::new(raw);
    let source = OrderSource::detect(raw);
    Span::current().record("source", source.as_str());

    let header = header::resolve(&order, source, now);

    let rows = items::collect_rows(&order);
    let row_count = rows.len();
    let items = dedup::dedup(rows);
    Span::current().record("items", items.len());
    debug!(rows = row_count, kept = items.len(), "line items normalized");

    let payments = totals::collect_payments(&order, source);
    let notes = order.string(candidates(source, Field::Notes));
    let totals = totals::reconcile(&order, source, &items, &payments, notes.as_deref());

    ReceiptOrder {
        id: header.id,
        order_no: header.order_no,
        date_time: header.date_time,
        store_name: header.store_name,
        sales_by: header.sales_by,
        customer_name: header.customer_name,
        customer_phone: header.customer_phone,
        customer_address_lines: header.customer_address_lines,
        items,
        payments,
        totals,
        notes,
        source,
    }
}

/// Parse JSON text and normalize it. Only malformed JSON is an error.
pub fn canonicalize_str(text: &str) -> ReceiptResult<ReceiptOrder> {
    let raw: Value = serde_json::from_str(text)?;
    Ok(canonicalize(&raw))
}

/// [`canonicalize_str`] with an explicit clock.
pub fn canonicalize_str_at(text: &str, now: NaiveDateTime) -> ReceiptResult<ReceiptOrder> {
    let raw: Value = serde_json::from_str(text)?;
    Ok(canonicalize_at(&raw, now))
}
