//! Template parsing
//!
//! Turns a raw template string into an [`Ast`] of [`Node`]s:
//!
//! ```text
//! "Hello {user.name|upper}!"  →  [Text("Hello "), Tag([user, name], [upper]), Text("!")]
//! ```
//!
//! - [`cursor`]: character-based scanning over the input
//! - [`tokens`]: the five configurable delimiter roles
//! - [`parser`]: the scanner driving the cursor
//! - [`ast`] / [`nodes`]: the resulting tree

pub mod ast;
pub mod cursor;
pub mod error;
pub mod nodes;
pub mod parser;
pub mod tokens;

pub use ast::Ast;
pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};
pub use nodes::{Node, TagNode, TextNode};
pub use parser::{ParseResult, Parser};
pub use tokens::{TokenRole, TokenSet};
