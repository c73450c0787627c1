//! Upstream order shapes (closed set).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resolve::Fields;

const SOCIAL_MARKERS: &[&str] = &[
    "delivery_address",
    "deliveryAddress",
    "platform",
    "social_order_id",
    "page_name",
];

const POINT_OF_SALE_MARKERS: &[&str] = &[
    "invoice_no",
    "sale_date",
    "products",
    "payments",
    "pos_session_id",
];

/// Which upstream subsystem produced the raw order.
///
/// Detection only changes alias *preference*; every source still falls back
/// to the shared alias table, so a misdetected order still resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSource {
    /// Social-commerce UI order (page/inbox orders with a delivery address).
    Social,
    /// Point-of-sale counter order.
    PointOfSale,
    /// Backend API order.
    Backend,
}

impl OrderSource {
    pub fn detect(raw: &Value) -> Self {
        let root = Fields::new(raw);
        if root.has_any(SOCIAL_MARKERS) {
            OrderSource::Social
        } else if root.has_any(POINT_OF_SALE_MARKERS) {
            OrderSource::PointOfSale
        } else {
            OrderSource::Backend
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderSource::Social => "social",
            OrderSource::PointOfSale => "point_of_sale",
            OrderSource::Backend => "backend",
        }
    }
}

impl core::fmt::Display for OrderSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
