//! Values and value stores
//!
//! Templates are rendered against a [`ValueStore`]. A store maps top-level
//! keys to [`Value`]s, which may be scalars, key/value containers, or host
//! objects implementing [`ObjectValue`]. Tag paths traverse them one segment
//! at a time (see [`bag`] for the rules).

pub mod bag;
pub mod error;
pub mod object;
pub mod value;

pub use bag::{path, resolve, ObjectValueBag, ValueBag, ValueStore};
pub use error::{ValueError, ValueErrorKind};
pub use object::{accessor_name, AccessorError, DynamicObject, ObjectValue};
pub use value::{Value, Values};
