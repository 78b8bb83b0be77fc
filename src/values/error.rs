//! Value resolution failures

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueErrorKind {
    /// The path does not lead to a value: a missing key, a null container, or
    /// a scalar with path segments remaining.
    Inaccessible,
    /// No path segments were given.
    EmptyPath,
    /// An object accessor failed while producing its value.
    Accessor,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("{reason} (at path \"{path}\")")]
    Inaccessible { reason: String, path: String },

    #[error("Value paths cannot be empty.")]
    EmptyPath,

    #[error("Accessor failed: {message} (at path \"{path}\")")]
    Accessor { message: String, path: String },
}

impl ValueError {
    pub fn inaccessible(reason: impl Into<String>, path: impl Into<String>) -> Self {
        ValueError::Inaccessible {
            reason: reason.into(),
            path: path.into(),
        }
    }

    pub fn kind(&self) -> ValueErrorKind {
        match self {
            ValueError::Inaccessible { .. } => ValueErrorKind::Inaccessible,
            ValueError::EmptyPath => ValueErrorKind::EmptyPath,
            ValueError::Accessor { .. } => ValueErrorKind::Accessor,
        }
    }

    /// Dotted path traversed up to the failure.
    pub fn path(&self) -> Option<&str> {
        match self {
            ValueError::Inaccessible { path, .. } | ValueError::Accessor { path, .. } => {
                Some(path)
            }
            ValueError::EmptyPath => None,
        }
    }
}
