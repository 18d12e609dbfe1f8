use thiserror::Error;

use crate::types::Kind;

#[derive(Debug, Error)]
pub enum FlagfigError {
    #[error("Field '{ident}' has no name and none can be derived from its identifier")]
    MissingName { ident: String },

    #[error("Invalid default for '{field}': {source}")]
    InvalidDefault { field: String, source: CoerceError },

    #[error("Invalid value for environment variable {key}={value:?}: {source}")]
    InvalidEnv {
        key: String,
        value: String,
        source: CoerceError,
    },

    #[error("Flag redefined: {name}")]
    DuplicateFlag { name: String },

    #[error("Invalid flag name {name:?}")]
    InvalidFlagName { name: String },

    #[error("Cannot assign a {found} value to a {expected} field")]
    KindMismatch { expected: Kind, found: Kind },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("Failed to read parsed flag: {0}")]
    Matches(#[from] clap::parser::MatchesError),
}

/// Failure to turn text into a value of a given [`Kind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    #[error("invalid syntax for {kind}: {text:?}")]
    Syntax { kind: Kind, text: String },

    #[error("value out of range for {kind}: {text:?}")]
    Range { kind: Kind, text: String },

    #[error("invalid duration {text:?}: {reason}")]
    Duration { text: String, reason: &'static str },

    #[error("{kind} fields cannot be set from text")]
    NotBindable { kind: Kind },
}
