//! Customer address lines from delivery, shipping and flat address sources.

use serde_json::Value;

use crate::resolve::{Fields, coerce_string};

/// Field names used by one structured address object.
#[derive(Debug, Clone, Copy)]
struct AddressSchema {
    keys: &'static [&'static str],
    street: &'static [&'static str],
    area: &'static [&'static str],
    zone: &'static [&'static str],
    city: &'static [&'static str],
    district: &'static [&'static str],
    division: &'static [&'static str],
    postal: &'static [&'static str],
}

const DELIVERY: AddressSchema = AddressSchema {
    keys: &["delivery_address", "deliveryAddress"],
    street: &["address", "street", "address_line"],
    area: &["area"],
    zone: &["zone"],
    city: &["city"],
    district: &["district"],
    division: &["division"],
    postal: &["postal_code", "postcode"],
};

const SHIPPING: AddressSchema = AddressSchema {
    keys: &["shipping_address", "shippingAddress"],
    street: &["address_line1", "address_line", "street", "address", "line1"],
    area: &["area", "locality"],
    zone: &["zone"],
    city: &["city"],
    district: &["district", "state"],
    division: &["division", "region"],
    postal: &["postal_code", "zip", "zip_code"],
};

const FLAT_KEYS: &[&str] = &["customer_address", "customerAddress", "customer.address"];

fn join_present(parts: &[Option<String>], sep: &str) -> Option<String> {
    let present: Vec<&str> = parts.iter().flatten().map(String::as_str).collect();
    if present.is_empty() {
        None
    } else {
        Some(present.join(sep))
    }
}

impl AddressSchema {
    fn lines(&self, order: &Fields<'_>) -> Vec<String> {
        let addr = match order.first(self.keys) {
            Some(node @ Value::Object(_)) => Fields::new(node),
            Some(other) => return vec![coerce_string(other)],
            None => return Vec::new(),
        };

        [
            addr.string(self.street),
            join_present(&[addr.string(self.area), addr.string(self.zone)], ", "),
            join_present(&[addr.string(self.city), addr.string(self.district)], ", "),
            join_present(&[addr.string(self.division), addr.string(self.postal)], " - "),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Ordered, de-duplicated address lines: delivery, then shipping, then flat.
///
/// Lines compare exactly after trimming (case-sensitive); the first wins.
pub fn assemble(order: &Fields<'_>) -> Vec<String> {
    let flat = order.string(FLAT_KEYS).into_iter().collect::<Vec<_>>();
    let candidates = DELIVERY
        .lines(order)
        .into_iter()
        .chain(SHIPPING.lines(order))
        .chain(flat);

    let mut out: Vec<String> = Vec::new();
    for line in candidates {
        let line = line.trim().to_string();
        if !line.is_empty() && !out.contains(&line) {
            out.push(line);
        }
    }
    out
}
