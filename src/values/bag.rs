//! Value stores and nested path resolution
//!
//! A path such as `["user", "address", "city"]` is resolved one segment at a
//! time against the current container:
//!
//! - `Map`: the key must exist exactly
//! - `List`: the key must be a valid index
//! - `Object`: accessor `getCity`, else property `city`
//! - anything else: the path cannot continue
//!
//! The value reached after the last segment is returned as is, even when it is
//! itself a container.

use super::error::{ValueError, ValueErrorKind};
use super::object::{accessor_name, ObjectValue};
use super::value::{Value, Values};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A collection of named values which tag paths are resolved against.
pub trait ValueStore: fmt::Debug + Send + Sync {
    /// Adds values, replacing existing values with the same key.
    fn add(&mut self, values: Values);

    /// Resolves `path`, failing with [`ValueError`] when it cannot.
    fn get(&self, path: &[String]) -> Result<Value, ValueError>;

    /// Whether `path` resolves. Only [`ValueErrorKind::Inaccessible`] failures
    /// count as absent; other failures are returned.
    fn has(&self, path: &[String]) -> Result<bool, ValueError> {
        match self.get(path) {
            Ok(_) => Ok(true),
            Err(error) if error.kind() == ValueErrorKind::Inaccessible => Ok(false),
            Err(error) => Err(error),
        }
    }

    /// Clones the store, including every value added so far.
    fn clone_box(&self) -> Box<dyn ValueStore>;
}

impl Clone for Box<dyn ValueStore> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Splits a dotted path (`"a.b.c"`) into segments.
pub fn path(dotted: &str) -> Vec<String> {
    dotted.split('.').map(str::to_string).collect()
}

/// Resolves `keys` against `container`.
pub fn resolve(container: &Value, keys: &[String]) -> Result<Value, ValueError> {
    if keys.is_empty() {
        return Err(ValueError::EmptyPath);
    }
    if container.is_null() {
        return Err(ValueError::inaccessible("Container is null.", ""));
    }

    descend(container, keys, String::new())
}

/// Walks `keys` starting at `start`. `traversed` is the dotted path already
/// consumed and grows by one segment per step.
fn descend(start: &Value, keys: &[String], mut traversed: String) -> Result<Value, ValueError> {
    let mut current = Cow::Borrowed(start);

    for key in keys {
        if !traversed.is_empty() {
            traversed.push('.');
        }
        traversed.push_str(key);

        current = match current {
            Cow::Borrowed(value) => member(value, key, &traversed)?,
            Cow::Owned(value) => Cow::Owned(member(&value, key, &traversed)?.into_owned()),
        };
    }

    Ok(current.into_owned())
}

/// One traversal step. Container children are borrowed; object members are
/// produced by the object and therefore owned.
fn member<'a>(current: &'a Value, key: &str, path: &str) -> Result<Cow<'a, Value>, ValueError> {
    match current {
        Value::Map(map) => map
            .get(key)
            .map(Cow::Borrowed)
            .ok_or_else(|| ValueError::inaccessible("Undefined key.", path)),
        Value::List(items) => key
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index))
            .map(Cow::Borrowed)
            .ok_or_else(|| ValueError::inaccessible("Undefined key.", path)),
        Value::Object(object) => object_member(object.as_ref(), key, path).map(Cow::Owned),
        scalar => Err(ValueError::inaccessible(
            format!("Cannot access properties on {}.", scalar.type_name()),
            path,
        )),
    }
}

fn object_member(object: &dyn ObjectValue, key: &str, path: &str) -> Result<Value, ValueError> {
    if let Some(result) = object.call_accessor(&accessor_name(key)) {
        return result.map_err(|error| ValueError::Accessor {
            message: error.message().to_string(),
            path: path.to_string(),
        });
    }

    object
        .property(key)
        .ok_or_else(|| ValueError::inaccessible("Cannot access property.", path))
}

/// Plain map of named values.
#[derive(Debug, Clone, Default)]
pub struct ValueBag {
    values: Values,
}

impl ValueBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: Values) -> Self {
        Self { values }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn values(&self) -> &Values {
        &self.values
    }
}

impl ValueStore for ValueBag {
    fn add(&mut self, values: Values) {
        self.values.extend(values);
    }

    fn get(&self, path: &[String]) -> Result<Value, ValueError> {
        let Some((key, rest)) = path.split_first() else {
            return Err(ValueError::EmptyPath);
        };
        match self.values.get(key) {
            Some(value) => descend(value, rest, key.clone()),
            None => Err(ValueError::inaccessible("Undefined key.", key.as_str())),
        }
    }

    fn clone_box(&self) -> Box<dyn ValueStore> {
        Box::new(self.clone())
    }
}

/// Store which falls back to a bound object for keys it does not hold.
///
/// Explicitly added values always win at the top-level key; any other path is
/// resolved in full against the object.
#[derive(Clone)]
pub struct ObjectValueBag {
    values: ValueBag,
    object: Arc<dyn ObjectValue>,
}

impl ObjectValueBag {
    pub fn new(object: Arc<dyn ObjectValue>) -> Self {
        Self {
            values: ValueBag::new(),
            object,
        }
    }

    pub fn object(&self) -> &Arc<dyn ObjectValue> {
        &self.object
    }
}

impl fmt::Debug for ObjectValueBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectValueBag")
            .field("values", &self.values)
            .field("object", &self.object.type_name())
            .finish()
    }
}

impl ValueStore for ObjectValueBag {
    fn add(&mut self, values: Values) {
        self.values.add(values);
    }

    fn get(&self, path: &[String]) -> Result<Value, ValueError> {
        let Some(key) = path.first() else {
            return Err(ValueError::EmptyPath);
        };
        if self.values.contains_key(key) {
            return self.values.get(path);
        }
        resolve(&Value::Object(Arc::clone(&self.object)), path)
    }

    fn clone_box(&self) -> Box<dyn ValueStore> {
        Box::new(self.clone())
    }
}
