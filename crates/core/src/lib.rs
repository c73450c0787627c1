//! `receiptkit-core`: shared value types for receipt normalization.
//!
//! This crate contains **pure** primitives (no IO, no parsing of whole orders).

pub mod error;
pub mod money;
pub mod value_object;

pub use error::{ReceiptError, ReceiptResult};
pub use money::{Money, parse_decimal_prefix};
pub use value_object::ValueObject;
