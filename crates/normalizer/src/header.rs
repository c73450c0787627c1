//! Order header: identity, timestamp, store, staff and customer.

use chrono::NaiveDateTime;

use crate::address;
use crate::datetime::coerce_date;
use crate::resolve::Fields;
use crate::rules::{Field, candidates};
use crate::source::OrderSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub id: String,
    pub order_no: String,
    pub date_time: String,
    pub store_name: Option<String>,
    pub sales_by: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address_lines: Vec<String>,
}

pub fn resolve(order: &Fields<'_>, source: OrderSource, now: NaiveDateTime) -> Header {
    let text = |field: Field| order.string(candidates(source, field));

    let id = text(Field::OrderId).unwrap_or_default();
    let order_no = text(Field::OrderNo).unwrap_or_else(|| id.clone());
    let date_time = coerce_date(order.scalar(candidates(source, Field::DateTime)), now);

    Header {
        id,
        order_no,
        date_time,
        store_name: text(Field::StoreName),
        sales_by: text(Field::SalesBy),
        customer_name: text(Field::CustomerName),
        customer_phone: text(Field::CustomerPhone),
        customer_address_lines: address::assemble(order),
    }
}
