//! Typed cell values and coercion.

use std::fmt;

use annot_common::{any_to_f64, any_to_i64, any_to_string, format_numeric, parse_f64, parse_i64};
use annot_model::ValueType;
use polars::prelude::{AnyValue, DataType};

/// A non-null cell as seen by the checks.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Read a cell as stored, without conversion. `None` for null.
    pub fn from_any(value: AnyValue<'_>) -> Option<Self> {
        match value {
            AnyValue::Null => None,
            AnyValue::Float32(_) | AnyValue::Float64(_) => any_to_f64(value).map(Value::Float),
            AnyValue::Int8(_)
            | AnyValue::Int16(_)
            | AnyValue::Int32(_)
            | AnyValue::Int64(_)
            | AnyValue::UInt8(_)
            | AnyValue::UInt16(_)
            | AnyValue::UInt32(_)
            | AnyValue::UInt64(_) => any_to_i64(value).map(Value::Integer),
            other => Some(Value::Text(any_to_string(other))),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(_) => None,
        }
    }

    /// Text used by string checks and for reporting.
    pub fn render(&self) -> String {
        match self {
            Value::Integer(v) => v.to_string(),
            Value::Float(v) => format_numeric(*v),
            Value::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Convert a non-null cell to `value_type`.
///
/// Integers accept integral floats and integer-like text (`"3"`, `"3.0"`);
/// floats accept any number or numeric text; strings accept anything.
/// `None` means the cell cannot be converted.
pub fn coerce(value: AnyValue<'_>, value_type: ValueType) -> Option<Value> {
    match value_type {
        ValueType::String => Some(Value::Text(any_to_string(value))),
        ValueType::Float => match Value::from_any(value)? {
            Value::Text(text) => parse_f64(&text).map(Value::Float),
            number => number.as_f64().map(Value::Float),
        },
        ValueType::Integer => match Value::from_any(value)? {
            Value::Integer(v) => Some(Value::Integer(v)),
            Value::Float(v) => integral(v).map(Value::Integer),
            Value::Text(text) => parse_i64(&text)
                .or_else(|| parse_f64(&text).and_then(integral))
                .map(Value::Integer),
        },
    }
}

fn integral(v: f64) -> Option<i64> {
    // Outside this window the cast saturates.
    let in_range = v >= i64::MIN as f64 && v < i64::MAX as f64;
    (v.is_finite() && v.fract() == 0.0 && in_range).then_some(v as i64)
}

/// Whether a column's dtype stores `value_type` without conversion.
///
/// Integer columns are accepted for floats, and an all-null column for any type.
pub fn dtype_matches(dtype: &DataType, value_type: ValueType) -> bool {
    if matches!(dtype, DataType::Null) {
        return true;
    }
    match value_type {
        ValueType::Integer => dtype.is_integer(),
        ValueType::Float => dtype.is_float() || dtype.is_integer(),
        ValueType::String => matches!(dtype, DataType::String),
    }
}

/// Dtype name in the vocabulary used by check identifiers.
pub fn dtype_label(dtype: &DataType) -> String {
    match dtype {
        DataType::Int8 => "int8".to_string(),
        DataType::Int16 => "int16".to_string(),
        DataType::Int32 => "int32".to_string(),
        DataType::Int64 => "int64".to_string(),
        DataType::UInt8 => "uint8".to_string(),
        DataType::UInt16 => "uint16".to_string(),
        DataType::UInt32 => "uint32".to_string(),
        DataType::UInt64 => "uint64".to_string(),
        DataType::Float32 => "float32".to_string(),
        DataType::Float64 => "float64".to_string(),
        DataType::String => "str".to_string(),
        DataType::Boolean => "bool".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_coercion() {
        assert_eq!(coerce(AnyValue::String("3"), ValueType::Integer), Some(Value::Integer(3)));
        assert_eq!(coerce(AnyValue::String(" 3.0 "), ValueType::Integer), Some(Value::Integer(3)));
        assert_eq!(coerce(AnyValue::Float64(7.0), ValueType::Integer), Some(Value::Integer(7)));
        assert_eq!(coerce(AnyValue::Float64(7.5), ValueType::Integer), None);
        assert_eq!(coerce(AnyValue::String("first"), ValueType::Integer), None);
        assert_eq!(coerce(AnyValue::Boolean(true), ValueType::Integer), None);
        assert_eq!(coerce(AnyValue::Float64(1e30), ValueType::Integer), None);
    }

    #[test]
    fn float_coercion() {
        assert_eq!(coerce(AnyValue::Int32(4), ValueType::Float), Some(Value::Float(4.0)));
        assert_eq!(coerce(AnyValue::String("181.07"), ValueType::Float), Some(Value::Float(181.07)));
        assert_eq!(coerce(AnyValue::String("mz"), ValueType::Float), None);
    }

    #[test]
    fn string_coercion_renders() {
        assert_eq!(coerce(AnyValue::Float64(2.50), ValueType::String), Some(Value::Text("2.5".into())));
        assert_eq!(coerce(AnyValue::Int64(12), ValueType::String), Some(Value::Text("12".into())));
    }

    #[test]
    fn dtype_acceptance() {
        assert!(dtype_matches(&DataType::Int32, ValueType::Float));
        assert!(!dtype_matches(&DataType::Float64, ValueType::Integer));
        assert!(dtype_matches(&DataType::Null, ValueType::String));
        assert!(!dtype_matches(&DataType::Int64, ValueType::String));
        assert_eq!(dtype_label(&DataType::Float64), "float64");
    }
}
