//! Object-like containers
//!
//! Host types opt in to path traversal by implementing [`ObjectValue`]. When a
//! tag path reaches an object, the key `name` is looked up first as the
//! zero-argument accessor `getName`, then as the property `name`.

use super::value::{Value, Values};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by an accessor while producing its value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AccessorError {
    message: String,
}

impl AccessorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub trait ObjectValue: Send + Sync {
    /// Name used in diagnostics.
    fn type_name(&self) -> &str;

    /// Invokes the accessor `name` with no arguments. `None` when the object
    /// has no such accessor.
    fn call_accessor(&self, name: &str) -> Option<Result<Value, AccessorError>>;

    /// Reads the property `name`. `None` when the object has no such property.
    fn property(&self, name: &str) -> Option<Value>;

    /// Public properties, used when the object is serialized inside a composite.
    fn properties(&self) -> Values {
        Values::new()
    }

    /// String form of the object when inserted directly into a template.
    fn to_display(&self) -> Option<String> {
        None
    }
}

/// Accessor name for `key`: `name` → `getName`.
pub fn accessor_name(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
        None => "get".to_string(),
    }
}

type Accessor = Arc<dyn Fn() -> Result<Value, AccessorError> + Send + Sync>;

/// An [`ObjectValue`] assembled at runtime from properties and accessor
/// closures.
#[derive(Clone)]
pub struct DynamicObject {
    type_name: String,
    properties: Values,
    accessors: HashMap<String, Accessor>,
    display: Option<String>,
}

impl DynamicObject {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: Values::new(),
            accessors: HashMap::new(),
            display: None,
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Registers an accessor under its full name, e.g. `getName`.
    pub fn with_accessor<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn() -> Result<Value, AccessorError> + Send + Sync + 'static,
    {
        self.accessors.insert(name.into(), Arc::new(accessor));
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn into_value(self) -> Value {
        Value::object(self)
    }
}

impl fmt::Debug for DynamicObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut accessors: Vec<&String> = self.accessors.keys().collect();
        accessors.sort();
        f.debug_struct("DynamicObject")
            .field("type_name", &self.type_name)
            .field("properties", &self.properties)
            .field("accessors", &accessors)
            .finish()
    }
}

impl ObjectValue for DynamicObject {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn call_accessor(&self, name: &str) -> Option<Result<Value, AccessorError>> {
        self.accessors.get(name).map(|accessor| accessor())
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }

    fn properties(&self) -> Values {
        self.properties.clone()
    }

    fn to_display(&self) -> Option<String> {
        self.display.clone()
    }
}
