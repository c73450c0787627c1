//! Alias tables: which upstream keys feed each canonical field.
//!
//! Resolution is first-match-wins over `preferred(source) ++ SHARED_RULES`.
//! Adding a new upstream alias is a table edit, not a code change.

use crate::source::OrderSource;

/// Canonical order-level fields resolved from aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    OrderId,
    OrderNo,
    DateTime,
    StoreName,
    SalesBy,
    CustomerName,
    CustomerPhone,
    Notes,
    Subtotal,
    Discount,
    Tax,
    Shipping,
    Total,
    Paid,
    Due,
    Change,
    Payments,
}

/// One row of an alias table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub field: Field,
    pub paths: &'static [&'static str],
}

const fn rule(field: Field, paths: &'static [&'static str]) -> Rule {
    Rule { field, paths }
}

pub static SHARED_RULES: &[Rule] = &[
    rule(Field::OrderId, &["id", "_id", "order_id", "orderId", "uuid"]),
    rule(
        Field::OrderNo,
        &[
            "order_no",
            "orderNo",
            "order_number",
            "orderNumber",
            "invoice_no",
            "invoice_number",
            "receipt_no",
        ],
    ),
    rule(
        Field::DateTime,
        &[
            "created_at",
            "createdAt",
            "order_date",
            "orderDate",
            "sale_date",
            "date",
            "timestamp",
        ],
    ),
    rule(
        Field::StoreName,
        &["store_name", "storeName", "store.name", "shop.name", "branch.name", "outlet_name"],
    ),
    rule(
        Field::SalesBy,
        &[
            "sales_by",
            "salesBy",
            "salesBy.name",
            "sales_by.name",
            "salesman",
            "sales_person",
            "salesperson.name",
            "sold_by",
            "created_by.name",
            "cashier",
        ],
    ),
    rule(
        Field::CustomerName,
        &[
            "customer.name",
            "customer_name",
            "customerName",
            "customer.full_name",
            "delivery_address.name",
            "shipping_address.name",
        ],
    ),
    rule(
        Field::CustomerPhone,
        &[
            "customer.phone",
            "customer_phone",
            "customerPhone",
            "customer.mobile",
            "phone",
            "mobile",
            "delivery_address.phone",
            "shipping_address.phone",
        ],
    ),
    rule(Field::Notes, &["notes", "note", "remarks", "comment"]),
    rule(
        Field::Subtotal,
        &["subtotal", "sub_total", "subTotal", "totals.subtotal", "summary.subtotal"],
    ),
    rule(
        Field::Discount,
        &["discount", "discount_amount", "discountAmount", "total_discount", "totals.discount"],
    ),
    rule(
        Field::Tax,
        &["tax", "tax_amount", "taxAmount", "vat", "vat_amount", "totals.tax"],
    ),
    rule(
        Field::Shipping,
        &[
            "shipping",
            "shipping_charge",
            "shippingCharge",
            "delivery_charge",
            "deliveryCharge",
            "shipping_cost",
            "totals.shipping",
        ],
    ),
    rule(
        Field::Total,
        &[
            "total_amount",
            "totalAmount",
            "grand_total",
            "grandTotal",
            "total",
            "payable_amount",
            "net_total",
            "totals.total",
        ],
    ),
    rule(
        Field::Paid,
        &["paid_amount", "paidAmount", "paid", "amount_paid", "totals.paid"],
    ),
    rule(
        Field::Due,
        &["due_amount", "dueAmount", "due", "outstanding", "balance_due", "totals.due"],
    ),
    rule(
        Field::Change,
        &["change_amount", "changeAmount", "change", "return_amount", "totals.change"],
    ),
    rule(Field::Payments, &["payments", "payment_history", "transactions"]),
];

static SOCIAL_RULES: &[Rule] = &[
    rule(Field::OrderId, &["social_order_id"]),
    rule(Field::CustomerName, &["delivery_address.name"]),
    rule(Field::CustomerPhone, &["delivery_address.phone"]),
];

static POINT_OF_SALE_RULES: &[Rule] = &[
    rule(Field::OrderNo, &["invoice_no"]),
    rule(Field::DateTime, &["sale_date"]),
    rule(Field::SalesBy, &["salesman"]),
];

static BACKEND_RULES: &[Rule] = &[
    rule(Field::OrderNo, &["orderNumber"]),
    rule(Field::DateTime, &["createdAt"]),
];

fn preferred(source: OrderSource) -> &'static [Rule] {
    match source {
        OrderSource::Social => SOCIAL_RULES,
        OrderSource::PointOfSale => POINT_OF_SALE_RULES,
        OrderSource::Backend => BACKEND_RULES,
    }
}

/// Ordered candidate paths for `field` when reading an order from `source`.
pub fn candidates(source: OrderSource, field: Field) -> impl Iterator<Item = &'static str> {
    preferred(source)
        .iter()
        .chain(SHARED_RULES.iter())
        .filter(move |r| r.field == field)
        .flat_map(|r| r.paths.iter().copied())
}

/// Line-row aliases. Rows have no source-specific preference.
pub mod row {
    pub const PRODUCT_NAME: &[&str] = &[
        "name",
        "product_name",
        "productName",
        "product.name",
        "title",
        "item_name",
    ];
    pub const SERVICE_NAME: &[&str] = &["service_name", "serviceName", "service.name", "name", "title"];
    pub const PRODUCT_VARIANT: &[&str] = &["variant", "variant_name"];
    pub const SIZE: &[&str] = &["size", "product.size"];
    pub const COLOR: &[&str] = &["color", "colour", "product.color"];
    pub const SERVICE_CATEGORY: &[&str] = &[
        "category",
        "category_name",
        "service.category",
        "service_category",
    ];

    pub const QTY: &[&str] = &["qty", "quantity", "count", "units"];
    pub const UNIT_PRICE: &[&str] = &[
        "unit_price",
        "unitPrice",
        "price",
        "rate",
        "selling_price",
        "sale_price",
        "product.price",
        "service.price",
    ];
    pub const DISCOUNT: &[&str] = &["discount", "discount_amount", "discountAmount", "line_discount"];
    pub const LINE_TOTAL: &[&str] = &[
        "line_total",
        "lineTotal",
        "total",
        "total_price",
        "totalPrice",
        "amount",
        "subtotal",
    ];

    pub const BARCODES: &[&str] = &[
        "barcodes",
        "barcode_list",
        "scanned_barcodes",
        "barcode",
        "sku_barcode",
    ];

    pub const STABLE_ID: &[&str] = &[
        "line_id",
        "lineId",
        "row_id",
        "order_item_id",
        "orderItemId",
        "item_id",
        "id",
    ];
    pub const BATCH: &[&str] = &["batch_id", "batch_no", "batch", "lot_no"];
    pub const SKU: &[&str] = &["sku", "product_sku", "product.sku", "sku_code"];

    pub const SERVICE_ID: &[&str] = &["service_id", "serviceId", "service.id"];
    pub const SERVICE_FLAG: &[&str] = &["is_service", "isService"];
    pub const TYPE: &[&str] = &["type", "item_type", "itemType", "kind"];

    pub const PAYMENT_AMOUNT: &[&str] = &["amount", "paid_amount", "value"];
    pub const PAYMENT_METHOD: &[&str] = &["method", "payment_method", "type", "gateway"];
}
