//! Bridge between [`Value`] and `serde_json::Value`.

use crate::value::Object;
use crate::{PackError, Result, Value};

impl Value {
    /// Converts a JSON value.
    ///
    /// Integers that don't fit `i64` fail with [`PackError::OutOfRange`]
    /// rather than being widened to a float.
    pub fn from_json(json: &serde_json::Value) -> Result<Value> {
        Ok(match json {
            serde_json::Value::Null => Value::Unit,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if n.is_u64() {
                    return Err(PackError::OutOfRange(n.to_string()));
                } else {
                    match n.as_f64() {
                        Some(f) => Value::Float(f),
                        None => return Err(PackError::UnsupportedType(format!("number {n}"))),
                    }
                }
            }
            serde_json::Value::String(s) => Value::Text(s.clone()),
            serde_json::Value::Array(items) => Value::List(
                items
                    .iter()
                    .map(Value::from_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
            serde_json::Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), Value::from_json(v)?)))
                    .collect::<Result<Object>>()?,
            ),
        })
    }

    /// Converts to JSON. Bytes become arrays of numbers; non-finite floats
    /// become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Unit => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => {
                serde_json::Value::Array(b.iter().map(|&byte| byte.into()).collect())
            }
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Object(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = PackError;

    fn try_from(json: &serde_json::Value) -> Result<Self> {
        Value::from_json(json)
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        value.to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_to_value_matrix() {
        let cases = vec![
            (json!(null), Value::Unit),
            (json!(true), Value::Bool(true)),
            (json!(-5), Value::Int(-5)),
            (json!(0.5), Value::Float(0.5)),
            (json!("hi"), Value::from("hi")),
            (json!([1, "x"]), Value::list([Value::Int(1), Value::from("x")])),
            (json!({"a": null}), Value::object([("a", Value::Unit)])),
        ];
        for (json, expected) in cases {
            assert_eq!(Value::from_json(&json).unwrap(), expected, "{json}");
        }
    }

    #[test]
    fn u64_beyond_i64_is_out_of_range() {
        let json = json!(u64::MAX);
        assert_eq!(
            Value::from_json(&json).unwrap_err(),
            PackError::OutOfRange(u64::MAX.to_string())
        );
    }

    #[test]
    fn object_order_survives() {
        let json = json!({"z": 1, "a": 2});
        let value = Value::from_json(&json).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a"]);
        let back = value.to_json().to_string();
        assert_eq!(back, r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn bytes_and_nan_to_json() {
        assert_eq!(Value::bytes(vec![1, 255]).to_json(), json!([1, 255]));
        assert_eq!(Value::Float(f64::NAN).to_json(), json!(null));
    }
}
