//! Value-equality marker for the receipt model.

/// Types compared by their fields rather than by identity.
///
/// Everything the normalizer produces is a value object: created fresh for one
/// call, immutable afterwards, compared by its attribute values.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct PaymentLine {
///     method: Option<String>,
///     amount: Money,
/// }
///
/// impl ValueObject for PaymentLine {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
