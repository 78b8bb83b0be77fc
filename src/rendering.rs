//! Template rendering
//!
//! A [`Renderer`] holds the values, modifiers and formatter used to turn a
//! parsed [`Ast`](crate::parsing::Ast) into its final string.

pub mod error;
pub mod formatting;
pub mod modifiers;
pub mod renderer;

pub use error::{RenderError, RenderErrorKind};
pub use formatting::{FormatError, ParamFormatter, SimpleParamFormatter};
pub use modifiers::{Modifier, ModifierRegistry};
pub use renderer::{ParamProcessor, RenderResult, Renderer};
