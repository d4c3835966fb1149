//! Error types for header extraction and policy loading.
//!
//! [`HeaderError`] covers every way a lockfile header can be rejected. The
//! phrases in its messages ("not supported", "not allowed", "equal sign",
//! "multiple", "source") are matched downstream and must stay stable.

use thiserror::Error;

/// Reasons a lockfile header is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// The header does not have the shape pip-compile writes.
    #[error("invalid lockfile header: {0}")]
    HeaderFormat(String),

    /// Option name is not in the allow-list.
    #[error("option {0} is not supported")]
    UnknownOption(String),

    /// Option is known but would break future header extraction.
    #[error("option {0} is not allowed")]
    DisallowedOption(String),

    /// Value-taking option used without the `--name=value` form.
    #[error("option {0} must be passed with an equal sign, e.g. {0}=value")]
    MalformedOption(String),

    /// Same option name seen more than once.
    #[error("option {0} must not be passed multiple times")]
    DuplicateOption(String),

    /// No positional arguments left after removing options.
    #[error("no source files detected in command, pass at least one package file explicitly")]
    MissingSource,

    /// `--output-file` disagrees with the file the header was read from.
    #[error("output file {declared} in header does not match lockfile {actual}")]
    OutputFileMismatch {
        /// Value of `--output-file` in the header.
        declared: String,
        /// File name supplied by the caller.
        actual: String,
    },
}

/// Errors raised while loading or saving a [`HeaderPolicy`](crate::HeaderPolicy).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Policy parsed but holds unusable values.
    #[error("invalid policy: {0}")]
    Invalid(String),
}

/// Convenience alias for results with [`HeaderError`].
pub type Result<T> = std::result::Result<T, HeaderError>;
