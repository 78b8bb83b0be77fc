//! Named value transformations applied by tags (`{name|upper}`)

use super::error::RenderError;
use crate::values::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A unary transformation of a resolved value.
///
/// Modifiers must not erase a value: returning [`Value::Null`] fails the
/// render.
pub trait Modifier: Send + Sync {
    fn apply(&self, value: Value) -> Value;
}

impl<F> Modifier for F
where
    F: Fn(Value) -> Value + Send + Sync,
{
    fn apply(&self, value: Value) -> Value {
        self(value)
    }
}

/// Modifiers by identifier. Registering an identifier again replaces it.
#[derive(Clone, Default)]
pub struct ModifierRegistry {
    modifiers: HashMap<String, Arc<dyn Modifier>>,
}

impl ModifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `lower`, `upper`, `trim` and `capitalize`.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add("lower", map_string(|s| s.to_lowercase()));
        registry.add("upper", map_string(|s| s.to_uppercase()));
        registry.add("trim", map_string(|s| s.trim().to_string()));
        registry.add("capitalize", map_string(capitalize));
        registry
    }

    pub fn add(&mut self, name: impl Into<String>, modifier: impl Modifier + 'static) {
        self.modifiers.insert(name.into(), Arc::new(modifier));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Modifier>> {
        self.modifiers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modifiers.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modifiers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Applies `names` to `value` in order.
    pub fn apply<S: AsRef<str>>(
        &self,
        mut value: Value,
        names: &[S],
    ) -> Result<Value, RenderError> {
        for name in names {
            let name = name.as_ref();
            let modifier = self
                .get(name)
                .ok_or_else(|| RenderError::UndefinedModifier(name.to_string()))?;

            value = modifier.apply(value);
            tracing::trace!(modifier = name, result = ?value, "applied modifier");

            if value.is_null() {
                return Err(RenderError::EmptyModifierResult(name.to_string()));
            }
        }
        Ok(value)
    }
}

impl fmt::Debug for ModifierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModifierRegistry")
            .field("modifiers", &self.names())
            .finish()
    }
}

/// Lifts a string transformation into a modifier. Non-string values pass
/// through unchanged.
fn map_string<F>(transform: F) -> impl Modifier
where
    F: Fn(&str) -> String + Send + Sync,
{
    move |value: Value| match value {
        Value::String(s) => Value::String(transform(&s)),
        other => other,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_in_declared_order() {
        let mut registry = ModifierRegistry::new();
        registry.add("exclaim", |v: Value| {
            Value::from(format!("{}!", v.as_str().unwrap_or_default()))
        });
        registry.add("wrap", |v: Value| {
            Value::from(format!("[{}]", v.as_str().unwrap_or_default()))
        });

        let value = registry
            .apply(Value::from("hi"), &["exclaim", "wrap"])
            .unwrap();
        assert_eq!(value, Value::from("[hi!]"));

        let value = registry
            .apply(Value::from("hi"), &["wrap", "exclaim"])
            .unwrap();
        assert_eq!(value, Value::from("[hi]!"));
    }

    #[test]
    fn later_registration_wins() {
        let mut registry = ModifierRegistry::standard();
        registry.add("upper", |_: Value| Value::from("replaced"));
        assert_eq!(
            registry.apply(Value::from("x"), &["upper"]).unwrap(),
            Value::from("replaced")
        );
    }

    #[test]
    fn undefined_modifier() {
        let registry = ModifierRegistry::new();
        assert_eq!(
            registry.apply(Value::from("x"), &["missing"]).unwrap_err(),
            RenderError::UndefinedModifier("missing".into())
        );
    }

    #[test]
    fn null_results_are_rejected() {
        let mut registry = ModifierRegistry::new();
        registry.add("erase", |_: Value| Value::Null);
        assert_eq!(
            registry.apply(Value::from("x"), &["erase"]).unwrap_err(),
            RenderError::EmptyModifierResult("erase".into())
        );
    }

    #[test]
    fn standard_modifiers() {
        let registry = ModifierRegistry::standard();
        let apply = |value: &str, name: &str| registry.apply(Value::from(value), &[name]).unwrap();

        assert_eq!(apply("WORLD", "lower"), Value::from("world"));
        assert_eq!(apply("world", "upper"), Value::from("WORLD"));
        assert_eq!(apply("  padded ", "trim"), Value::from("padded"));
        assert_eq!(apply("élan vital", "capitalize"), Value::from("Élan vital"));
        assert_eq!(
            registry.apply(Value::Int(3), &["upper"]).unwrap(),
            Value::Int(3)
        );
        assert_eq!(registry.names(), vec!["capitalize", "lower", "trim", "upper"]);
    }
}
