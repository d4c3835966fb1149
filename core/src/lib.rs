//! Parsing and validation of pip-compile lockfile headers.
//!
//! pip-compile records the exact command that produced a lockfile in a
//! comment block at the top of the file. This crate recovers that command
//! without executing anything, so the lockfile can be regenerated the same
//! way later:
//!
//! - [`locate_command_line`]: finds the command block in the header.
//! - [`tokenize`]: splits the command into [`Token`]s.
//! - [`validate_tokens`]: checks every option against the allow-list in
//!   [`ALLOWED_OPTIONS`] and collects source files.
//! - [`extract_header_command`]: runs all of the above and returns a
//!   [`PipCompileArgs`].
//!
//! Every failure is a [`HeaderError`]; extraction never partially succeeds.
//!
//! # Example
//!
//! ```
//! use pip_header_core::*;
//!
//! let header = "\
//! ##
//! ## This file is autogenerated by pip-compile with Python 3.11
//! ## by the following command:
//! ##
//! ##    pip-compile --extra=color requirements.in reqs/testing.in
//! ##
//! ";
//!
//! let args = extract_header_command(header, "requirements.txt").unwrap();
//! assert_eq!(args.source_files, vec!["requirements.in", "reqs/testing.in"]);
//!
//! let bad = header.replace("--extra=color", "--extra color");
//! let err = extract_header_command(&bad, "requirements.txt").unwrap_err();
//! assert!(matches!(err, HeaderError::MalformedOption(_)));
//! ```

mod config;
mod error;
mod header;
mod options;
mod tokens;
mod types;
mod validate;

pub use config::{HeaderPolicy, OutputFileCheck};
pub use error::{ConfigError, HeaderError, Result};
pub use header::{CommandLine, locate_command_line};
pub use options::{
    ALLOWED_OPTIONS, DISALLOWED_OPTIONS, OptionKind, OptionSpec, allowed_option_names,
    find_option, is_allowed_option, is_disallowed_option,
};
pub use tokens::{Token, tokenize};
pub use types::{PIP_COMPILE_COMMAND, PipCompileArgs};
pub use validate::{extract_header_command, extract_header_command_with_policy, validate_tokens};
