//! Crate-level error for operations spanning several stages

use crate::parsing::ParseError;
use crate::rendering::RenderError;
use crate::values::ValueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("Invalid whitespace pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Config(#[from] ::config::ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
