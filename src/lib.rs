//! # tokenised-strings
//!
//! Parses strings containing tags such as `{user.name|upper}` and renders
//! them against a set of values.
//!
//! ```rust
//! use tokenised_strings::parsing::Parser;
//! use tokenised_strings::rendering::Renderer;
//! use tokenised_strings::values::Values;
//! use tokenised_strings::map;
//!
//! let ast = Parser::new().parse("Hello {user.name|upper}!")?;
//!
//! let mut renderer = Renderer::with_standard_modifiers();
//! renderer.add_value("user", map! { "name" => "ada" });
//! assert_eq!(renderer.render(&ast, Values::new(), None)?, "Hello ADA!");
//! # Ok::<(), tokenised_strings::Error>(())
//! ```
//!
//! - [`parsing`]: cursor, tokens, parser and syntax tree
//! - [`values`]: values, host objects and the stores tags resolve against
//! - [`rendering`]: modifiers, formatting and the renderer
//! - [`builder`]: `{{ tag }}` facade with URL and HTML encoding
//! - [`config`]: layered TOML configuration
//! - [`testing`]: fluent assertions over parsed trees

pub mod builder;
pub mod config;
pub mod error;
pub mod parsing;
pub mod rendering;
pub mod testing;
pub mod values;

pub use builder::{Encoding, TokenizedStringBuilder};
pub use error::{Error, Result};
pub use parsing::{Ast, Parser};
pub use rendering::Renderer;
pub use values::{Value, Values};
