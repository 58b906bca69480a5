//! Error types for mapper compilation.
//!
//! All errors here are compile-time errors: they surface synchronously from
//! the compiler and no partial pipeline is usable afterwards. Per-record
//! filtering is total and never fails: absent source keys propagate as
//! nulls, not errors.

use thiserror::Error;

/// A mapper failed validation at compile time.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A stage name collides with the reserved snapshot key.
    #[error("stage name '{0}' collides with the reserved 'all' snapshot key")]
    ReservedStageName(String),

    /// The same stage name was declared more than once.
    #[error("duplicate stage name '{0}'")]
    DuplicateStage(String),

    /// The mapper definition text is not a valid JSON object.
    #[error("invalid mapper definition: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A stage definition has a malformed or unrecognized field.
    #[error("stage '{stage}': {message}")]
    InvalidStage { stage: String, message: String },
}
