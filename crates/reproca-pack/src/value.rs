//! [`Value`], the in-memory form of an encoded document.

use indexmap::IndexMap;

use crate::constants::*;

/// Object entries in insertion order.
///
/// Insertion order is the order entries are written on the wire; equality
/// ignores it.
pub type Object = IndexMap<String, Value>;

/// A tagged value with one variant per wire shape.
///
/// `Bool` maps onto two tags (`0x02` true, `0x03` false); every other variant
/// has exactly one.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Object(Object),
}

impl Value {
    /// Builds an object from `(key, value)` pairs, keeping their order.
    ///
    /// A repeated key keeps its first position and takes the last value.
    pub fn object<K, V, I>(entries: I) -> Value
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds a list from anything convertible into values.
    pub fn list<V, I>(items: I) -> Value
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Wraps raw octets. `Vec<u8>` has no `From` impl so that it is never
    /// confused with a list of integers.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Value {
        Value::Bytes(data.into())
    }

    /// The tag byte this value is written with.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Unit => Tag::Unit,
            Value::Bool(true) => Tag::True,
            Value::Bool(false) => Tag::False,
            Value::Int(_) => Tag::Int,
            Value::Float(_) => Tag::Float,
            Value::Text(_) => Tag::Text,
            Value::Bytes(_) => Tag::Bytes,
            Value::List(_) => Tag::List,
            Value::Object(_) => Tag::Object,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    /// Exact number of bytes [`crate::Encoder`] writes for this value.
    ///
    /// Object keys are counted as full slots, so two keys that collide after
    /// truncation are both counted.
    pub fn encoded_len(&self) -> usize {
        match self {
            Value::Unit | Value::Bool(_) => TAG_LEN,
            Value::Int(_) | Value::Float(_) => TAG_LEN + SCALAR_LEN,
            Value::Text(s) => TAG_LEN + s.len() + 1,
            Value::Bytes(b) => TAG_LEN + SIZE_FIELD_LEN + b.len(),
            Value::List(_) | Value::Object(_) => CONTAINER_HEADER_LEN + self.body_len(),
        }
    }

    /// Byte length of a container's body; zero for scalars.
    pub fn body_len(&self) -> usize {
        match self {
            Value::List(items) => items.iter().map(Value::encoded_len).sum(),
            Value::Object(entries) => entries
                .values()
                .map(|v| KEY_SLOT_LEN + v.encoded_len())
                .sum(),
            _ => 0,
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Value::Unit)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Floats as-is; integers widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up an object entry by its exact (already decoded) key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|entries| entries.get(key))
    }

    /// Looks up a list item.
    pub fn index(&self, i: usize) -> Option<&Value> {
        self.as_list().and_then(|items| items.get(i))
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Object> for Value {
    fn from(entries: Object) -> Self {
        Value::Object(entries)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Unit, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_keeps_insertion_order() {
        let v = Value::object([("ID", Value::Int(0)), ("NAME", "aspizu".into())]);
        let keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["ID", "NAME"]);
    }

    #[test]
    fn object_equality_ignores_order() {
        let a = Value::object([("a", 1i64), ("b", 2i64)]);
        let b = Value::object([("b", 2i64), ("a", 1i64)]);
        assert_eq!(a, b);
    }

    #[test]
    fn encoded_len_of_scalars() {
        assert_eq!(Value::Unit.encoded_len(), 1);
        assert_eq!(Value::Bool(false).encoded_len(), 1);
        assert_eq!(Value::Int(7).encoded_len(), 9);
        assert_eq!(Value::Float(7.5).encoded_len(), 9);
        assert_eq!(Value::from("").encoded_len(), 2);
        assert_eq!(Value::bytes(vec![1, 2, 3]).encoded_len(), 12);
    }

    #[test]
    fn encoded_len_of_containers() {
        let list = Value::list([1i64, 2, 3]);
        assert_eq!(list.body_len(), 27);
        assert_eq!(list.encoded_len(), 36);

        let obj = Value::object([("ID", Value::Int(0))]);
        assert_eq!(obj.body_len(), 4 + 9);
    }

    #[test]
    fn option_none_is_unit() {
        assert_eq!(Value::from(None::<i64>), Value::Unit);
        assert_eq!(Value::from(Some(3i64)), Value::Int(3));
    }

    #[test]
    fn tag_of_bools() {
        assert_eq!(Value::Bool(true).tag(), Tag::True);
        assert_eq!(Value::Bool(false).tag(), Tag::False);
    }

    #[test]
    fn accessors() {
        let v = Value::object([("xs", Value::list([10i64, 20]))]);
        assert_eq!(v.get("xs").and_then(|xs| xs.index(1)), Some(&Value::Int(20)));
        assert_eq!(v.get("nope"), None);
        assert_eq!(Value::Int(2).as_f64(), Some(2.0));
        assert_eq!(Value::Unit.as_str(), None);
    }
}
