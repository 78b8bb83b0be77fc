//! Render failures
//!
//! Every failure aborts the whole render; no partial output is produced.

use super::formatting::FormatError;
use crate::values::ValueError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderErrorKind {
    UnresolvedValue,
    UndefinedModifier,
    EmptyModifierResult,
    Format,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("Undefined modifier \"{0}\".")]
    UndefinedModifier(String),

    #[error("Empty value returned from modifier \"{0}\".")]
    EmptyModifierResult(String),

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl RenderError {
    pub fn kind(&self) -> RenderErrorKind {
        match self {
            RenderError::Value(_) => RenderErrorKind::UnresolvedValue,
            RenderError::UndefinedModifier(_) => RenderErrorKind::UndefinedModifier,
            RenderError::EmptyModifierResult(_) => RenderErrorKind::EmptyModifierResult,
            RenderError::Format(_) => RenderErrorKind::Format,
        }
    }
}
