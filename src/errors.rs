//! Error types for typebind
//!
//! Error codes:
//! - TYPE_UNSUPPORTED_LITERAL
//! - TYPE_UNSUPPORTED_VALIDATOR
//! - TYPE_UNDEFINED_ALIAS
//! - TYPE_NAME_COLLISION
//! - TYPE_USAGE_ERROR
//! - TYPE_INVALID_CONFIG
//!
//! All errors are fatal to the operation that raised them. None are retried.

use thiserror::Error;

/// Result type for alias and normalization operations
pub type AliasResult<T> = Result<T, AliasError>;

/// Errors raised while normalizing, binding or invoking type expressions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    #[error("Unsupported type literal: {shape}")]
    UnsupportedLiteral { shape: String },

    #[error("'{name}' is not a validator")]
    UnsupportedValidatorObject { name: String },

    #[error("Type alias '{0}' is not defined")]
    UndefinedAlias(String),

    #[error("Type alias '{0}' is already defined")]
    NameCollision(String),

    #[error("Invalid type function usage: {0}")]
    UsageError(String),

    #[error("Invalid namespace configuration: {0}")]
    InvalidConfig(String),
}

impl AliasError {
    pub fn unsupported_literal(shape: impl Into<String>) -> Self {
        AliasError::UnsupportedLiteral {
            shape: shape.into(),
        }
    }

    pub fn unsupported_validator(name: impl Into<String>) -> Self {
        AliasError::UnsupportedValidatorObject { name: name.into() }
    }

    pub fn usage(detail: impl Into<String>) -> Self {
        AliasError::UsageError(detail.into())
    }

    pub fn invalid_config(detail: impl Into<String>) -> Self {
        AliasError::InvalidConfig(detail.into())
    }

    /// Returns the string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            AliasError::UnsupportedLiteral { .. } => "TYPE_UNSUPPORTED_LITERAL",
            AliasError::UnsupportedValidatorObject { .. } => "TYPE_UNSUPPORTED_VALIDATOR",
            AliasError::UndefinedAlias(_) => "TYPE_UNDEFINED_ALIAS",
            AliasError::NameCollision(_) => "TYPE_NAME_COLLISION",
            AliasError::UsageError(_) => "TYPE_USAGE_ERROR",
            AliasError::InvalidConfig(_) => "TYPE_INVALID_CONFIG",
        }
    }

    /// Returns whether the error was raised by a declaration (bind, literal
    /// binding or forward declaration) rather than by resolving or invoking
    /// an alias.
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            AliasError::NameCollision(_) | AliasError::UnsupportedValidatorObject { .. }
        )
    }
}
