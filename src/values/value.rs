//! Dynamic values supplied to templates

use super::object::ObjectValue;
use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Named values, in registration order.
pub type Values = IndexMap<String, Value>;

/// A value that can be inserted into a template or traversed by a tag path.
///
/// `Map` and `List` are key/value containers; `Object` is an opaque host
/// object exposing accessors and properties (see [`ObjectValue`]). Everything
/// else is a scalar.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Values),
    Object(Arc<dyn ObjectValue>),
}

impl Value {
    pub fn object(object: impl ObjectValue + 'static) -> Self {
        Value::Object(Arc::new(object))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Object(object) => object.type_name(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Value::Object(object) => write!(f, "Object({})", object.type_name()),
        }
    }
}

/// Objects compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => serialize_entries(serializer, map.iter()),
            Value::Object(object) => {
                let properties = object.properties();
                serialize_entries(serializer, properties.iter())
            }
        }
    }
}

fn serialize_entries<'a, S, I>(serializer: S, entries: I) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    I: ExactSizeIterator<Item = (&'a String, &'a Value)>,
{
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (key, value) in entries {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

// Convenience conversions for common types
impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<Values> for Value {
    fn from(map: Values) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Builds a [`Value::Map`] from `key => value` pairs.
#[macro_export]
macro_rules! map {
    () => {
        $crate::values::Value::Map($crate::values::Values::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut values = $crate::values::Values::new();
        $(values.insert(::std::string::String::from($key), $crate::values::Value::from($value));)+
        $crate::values::Value::Map(values)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::DynamicObject;

    #[test]
    fn converts_json() {
        let json = serde_json::json!({"a": [1, 2.5, true, null], "b": {"c": "d"}});
        let value = Value::from(json);

        assert_eq!(
            value,
            crate::map! {
                "a" => Value::List(vec![
                    Value::Int(1),
                    Value::Float(2.5),
                    Value::Bool(true),
                    Value::Null,
                ]),
                "b" => crate::map! { "c" => "d" },
            }
        );
    }

    #[test]
    fn serializes_in_insertion_order() {
        let value = crate::map! { "z" => 1, "a" => vec!["x", "y"] };
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"z":1,"a":["x","y"]}"#
        );
    }

    #[test]
    fn objects_serialize_their_properties() {
        let value = DynamicObject::new("Point")
            .with_property("x", 1)
            .with_property("y", 2)
            .into_value();
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"x":1,"y":2}"#);
    }

    #[test]
    fn objects_compare_by_identity() {
        let object = DynamicObject::new("Thing").into_value();
        let same = object.clone();
        let other = DynamicObject::new("Thing").into_value();

        assert_eq!(object, same);
        assert_ne!(object, other);
        assert_eq!(object.type_name(), "Thing");
    }
}
