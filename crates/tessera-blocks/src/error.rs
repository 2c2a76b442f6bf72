//! Compiler errors.

use tessera_model::{ConfigError, UnknownTemplate};

/// Errors that can occur while compiling or previewing a block.
///
/// Compilation is pure, so none of these are worth retrying with the same input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Invalid config at {path}: {reason}")]
    InvalidConfig { path: String, reason: String },
}

impl CompileError {
    /// Offending config path, for `InvalidConfig`.
    pub fn path(&self) -> Option<&str> {
        match self {
            CompileError::InvalidConfig { path, .. } => Some(path),
            CompileError::UnknownTemplate(_) => None,
        }
    }
}

impl From<ConfigError> for CompileError {
    fn from(e: ConfigError) -> Self {
        CompileError::InvalidConfig {
            path: e.path,
            reason: e.reason,
        }
    }
}

impl From<UnknownTemplate> for CompileError {
    fn from(e: UnknownTemplate) -> Self {
        CompileError::UnknownTemplate(e.0)
    }
}
