//! Tolerant field lookup over untyped order JSON.
//!
//! Every accessor walks an ordered list of candidate paths and returns the
//! first one that is present, coerced to the requested type. Nothing here
//! fails: wrong-typed values degrade to empty/zero.

use serde_json::Value;

use receiptkit_core::{Money, parse_decimal_prefix};

/// Follow a dotted path (`customer.name`) through nested objects.
pub fn lookup<'a>(node: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(node, |current, key| current.as_object()?.get(key))
}

/// A number, or a string with something other than whitespace in it.
fn is_scalar_present(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => !s.trim().is_empty(),
        _ => false,
    }
}

/// Strings trimmed, numbers in decimal form, everything else empty.
pub fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or_default();
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{}", f as i64)
                } else {
                    f.to_string()
                }
            }
        }
        _ => String::new(),
    }
}

/// Numbers as-is; strings cleaned of currency symbols and separators.
pub fn coerce_money(value: &Value) -> Money {
    match value {
        Value::Number(n) => n
            .as_f64()
            .and_then(Money::from_major)
            .unwrap_or(Money::ZERO),
        Value::String(s) => Money::parse_lossy(s),
        _ => Money::ZERO,
    }
}

/// Plain numeric coercion (quantities), same cleaning rule as money.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(0.0),
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-'))
                .collect();
            parse_decimal_prefix(&cleaned).unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "y"
        ),
        _ => false,
    }
}

/// Read-only view over one JSON node (an order root or a line row).
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    node: &'a Value,
}

impl<'a> Fields<'a> {
    pub fn new(node: &'a Value) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &'a Value {
        self.node
    }

    /// First candidate that exists and is not `null` or a blank string.
    pub fn first<I>(&self, paths: I) -> Option<&'a Value>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        paths.into_iter().find_map(|path| {
            lookup(self.node, path.as_ref()).filter(|v| match v {
                Value::Null => false,
                Value::String(s) => !s.trim().is_empty(),
                _ => true,
            })
        })
    }

    /// First candidate whose string coercion is non-empty.
    ///
    /// An object sitting under `salesBy` is skipped so `salesBy.name` can win.
    pub fn string<I>(&self, paths: I) -> Option<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        paths.into_iter().find_map(|path| {
            lookup(self.node, path.as_ref())
                .map(coerce_string)
                .filter(|s| !s.is_empty())
        })
    }

    /// First scalar candidate, money-coerced.
    pub fn money<I>(&self, paths: I) -> Option<Money>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.scalar(paths).map(coerce_money)
    }

    /// First scalar candidate, number-coerced.
    pub fn number<I>(&self, paths: I) -> Option<f64>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.scalar(paths).map(coerce_number)
    }

    /// First scalar candidate, untouched (dates need the raw form).
    pub fn scalar<I>(&self, paths: I) -> Option<&'a Value>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        paths
            .into_iter()
            .find_map(|path| lookup(self.node, path.as_ref()).filter(|v| is_scalar_present(v)))
    }

    /// First candidate holding a JSON array.
    pub fn array<I>(&self, paths: I) -> Option<&'a [Value]>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        paths
            .into_iter()
            .find_map(|path| lookup(self.node, path.as_ref()).and_then(Value::as_array))
            .map(Vec::as_slice)
    }

    pub fn has_any<I>(&self, paths: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.first(paths).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_follows_nested_paths() {
        let order = json!({"customer": {"name": "Rahim"}, "customerName": "Other"});
        assert_eq!(lookup(&order, "customer.name"), Some(&json!("Rahim")));
        assert_eq!(lookup(&order, "customer.phone"), None);
        assert_eq!(lookup(&order, "customerName.first"), None);
    }

    #[test]
    fn money_coercion_matches_upstream_formats() {
        assert_eq!(coerce_money(&json!("৳1,250.50")), Money::from_minor(125_050));
        assert_eq!(coerce_money(&json!("1250.50")), Money::from_minor(125_050));
        assert_eq!(coerce_money(&json!(1250.5)), Money::from_minor(125_050));
        assert_eq!(coerce_money(&json!("abc")), Money::ZERO);
        assert_eq!(coerce_money(&json!(true)), Money::ZERO);
        assert_eq!(coerce_money(&json!({"amount": 5})), Money::ZERO);
    }

    #[test]
    fn string_coercion_renders_numbers() {
        assert_eq!(coerce_string(&json!(42)), "42");
        assert_eq!(coerce_string(&json!(12.0)), "12");
        assert_eq!(coerce_string(&json!(12.5)), "12.5");
        assert_eq!(coerce_string(&json!("  padded ")), "padded");
        assert_eq!(coerce_string(&json!(["a"])), "");
        assert_eq!(coerce_string(&Value::Null), "");
    }

    #[test]
    fn string_skips_values_that_coerce_to_empty() {
        let order = json!({"salesBy": {"name": "Karim"}, "sales_by": "  "});
        let fields = Fields::new(&order);
        assert_eq!(
            fields.string(["sales_by", "salesBy", "salesBy.name"]),
            Some("Karim".to_string())
        );
    }

    #[test]
    fn money_ignores_non_scalar_candidates() {
        let order = json!({"total": {"grand": 1}, "totals": {"total": "900"}});
        let fields = Fields::new(&order);
        assert_eq!(
            fields.money(["total", "totals.total"]),
            Some(Money::from_minor(90_000))
        );
        assert_eq!(fields.money(["missing"]), None);
    }

    #[test]
    fn explicit_zero_is_still_present() {
        let order = json!({"paid": 0, "paid_amount": 100});
        let fields = Fields::new(&order);
        assert_eq!(fields.money(["paid", "paid_amount"]), Some(Money::ZERO));
    }

    #[test]
    fn number_coercion_tolerates_text() {
        assert_eq!(coerce_number(&json!("3 pcs")), 3.0);
        assert_eq!(coerce_number(&json!(2.5)), 2.5);
        assert_eq!(coerce_number(&json!("none")), 0.0);
    }

    #[test]
    fn truthiness_accepts_common_flags() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("Yes")));
        assert!(!is_truthy(&json!("no")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&Value::Null));
    }

    #[test]
    fn array_returns_first_array_candidate() {
        let order = json!({"items": "not-a-list", "lines": [1, 2]});
        let fields = Fields::new(&order);
        assert_eq!(fields.array(["items", "lines"]).map(<[Value]>::len), Some(2));
    }
}
