//! Canonical, print-ready receipt model.

use serde::{Deserialize, Serialize};

use receiptkit_core::{Money, ValueObject};

use crate::source::OrderSource;

/// Whether a line sells goods or a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Product,
    Service,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Product => "product",
            ItemKind::Service => "service",
        }
    }

    /// Name printed when the upstream row had none.
    pub fn default_name(self) -> &'static str {
        match self {
            ItemKind::Product => "Item",
            ItemKind::Service => "Service",
        }
    }
}

/// One printable line.
///
/// `line_total` is authoritative for summation; `qty * unit_price` is advisory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub kind: ItemKind,
    pub name: String,
    /// Size/color for products, category for services.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub qty: f64,
    pub unit_price: Money,
    pub line_total: Money,
    #[serde(default)]
    pub discount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcodes: Option<Vec<String>>,
}

impl ValueObject for ReceiptItem {}

/// One upstream payment entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub amount: Money,
}

impl ValueObject for PaymentLine {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptTotals {
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub shipping: Money,
    pub total: Money,
    pub paid: Money,
    pub due: Money,
    pub change: Money,
}

impl ValueObject for ReceiptTotals {}

impl ReceiptTotals {
    /// Nothing left to collect.
    pub fn is_settled(&self) -> bool {
        !self.due.is_positive()
    }
}

/// Aggregate root of one normalization call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptOrder {
    pub id: String,
    pub order_no: String,
    pub date_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_address_lines: Vec<String>,
    #[serde(default)]
    pub items: Vec<ReceiptItem>,
    #[serde(default)]
    pub payments: Vec<PaymentLine>,
    pub totals: ReceiptTotals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub source: OrderSource,
}

impl ValueObject for ReceiptOrder {}

impl ReceiptOrder {
    pub fn products(&self) -> impl Iterator<Item = &ReceiptItem> {
        self.items.iter().filter(|i| i.kind == ItemKind::Product)
    }

    pub fn services(&self) -> impl Iterator<Item = &ReceiptItem> {
        self.items.iter().filter(|i| i.kind == ItemKind::Service)
    }

    /// Sum of printed line totals.
    pub fn items_total(&self) -> Money {
        self.items.iter().map(|i| i.line_total).sum()
    }
}
