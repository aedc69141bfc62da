use serde_json::Value;

/// Best-effort coercions for loosely typed record fields.
pub trait ValueExtensions {
    /// Text form of a scalar; null, arrays and objects become empty.
    fn to_text(&self) -> String;

    /// Numeric form of a number or numeric string; anything else is `None`.
    fn to_number(&self) -> Option<f64>;

    /// Elements of an array as text; non-arrays yield nothing.
    fn to_text_vec(&self) -> Vec<String>;
}

impl ValueExtensions for Value {
    fn to_text(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
        }
    }

    fn to_number(&self) -> Option<f64> {
        let number = match self {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        number.filter(|x| x.is_finite())
    }

    fn to_text_vec(&self) -> Vec<String> {
        match self {
            Value::Array(items) => items.iter().map(|x| x.to_text()).collect(),
            _ => Vec::new(),
        }
    }
}
