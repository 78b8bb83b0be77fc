//! Final stringification of tag values

use crate::values::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Cannot format value of type {type_name} as a string.")]
    Unformattable { type_name: String },

    #[error("Cannot serialize value: {0}")]
    Serialization(String),
}

/// Converts a value into the string inserted in place of a tag.
pub trait ParamFormatter: Send + Sync {
    fn format(&self, value: &Value) -> Result<String, FormatError>;
}

impl<F> ParamFormatter for F
where
    F: Fn(&Value) -> Result<String, FormatError> + Send + Sync,
{
    fn format(&self, value: &Value) -> Result<String, FormatError> {
        self(value)
    }
}

/// Default formatting:
///
/// - booleans become `true` / `false`
/// - lists and maps become JSON
/// - objects use their display form, and fail without one
/// - null becomes the empty string
/// - everything else uses its natural string conversion
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleParamFormatter;

impl ParamFormatter for SimpleParamFormatter {
    fn format(&self, value: &Value) -> Result<String, FormatError> {
        match value {
            Value::Null => Ok(String::new()),
            Value::Bool(b) => Ok(if *b { "true" } else { "false" }.to_string()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Float(x) => Ok(x.to_string()),
            Value::String(s) => Ok(s.clone()),
            Value::List(_) | Value::Map(_) => serde_json::to_string(value)
                .map_err(|error| FormatError::Serialization(error.to_string())),
            Value::Object(object) => {
                object
                    .to_display()
                    .ok_or_else(|| FormatError::Unformattable {
                        type_name: object.type_name().to_string(),
                    })
            }
        }
    }
}
