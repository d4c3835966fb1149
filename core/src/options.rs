//! The pip-compile option allow-list.
//!
//! Only options listed here may appear in a lockfile header. The list is
//! static data: lookups are exact matches on the option name, i.e. the part
//! of a token before any `=`.
//!
//! # Examples
//!
//! ```
//! use pip_header_core::{OptionKind, find_option, is_disallowed_option};
//!
//! assert_eq!(find_option("--resolver").unwrap().kind, OptionKind::Value);
//! assert_eq!(find_option("-v").unwrap().kind, OptionKind::Flag);
//! assert!(find_option("--foo").is_none());
//! assert!(is_disallowed_option("--no-header"));
//! ```

use serde::Serialize;

/// Whether an option carries a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Boolean switch. An `=value` suffix is tolerated and ignored.
    Flag,
    /// Requires a value in `--name=value` form.
    Value,
}

/// A recognized option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionSpec {
    /// Option name including its leading dashes.
    pub name: &'static str,
    /// Flag or value-taking.
    pub kind: OptionKind,
}

impl OptionSpec {
    const fn flag(name: &'static str) -> Self {
        Self {
            name,
            kind: OptionKind::Flag,
        }
    }

    const fn value(name: &'static str) -> Self {
        Self {
            name,
            kind: OptionKind::Value,
        }
    }

    /// Returns `true` for options that need `=value`.
    pub fn takes_value(&self) -> bool {
        self.kind == OptionKind::Value
    }
}

/// Options accepted in a header, in display order.
pub const ALLOWED_OPTIONS: &[OptionSpec] = &[
    OptionSpec::flag("-v"),
    OptionSpec::flag("--verbose"),
    OptionSpec::flag("--allow-unsafe"),
    OptionSpec::flag("--generate-hashes"),
    OptionSpec::flag("--reuse-hashes"),
    OptionSpec::flag("--no-reuse-hashes"),
    OptionSpec::flag("--all-extras"),
    OptionSpec::flag("--strip-extras"),
    OptionSpec::flag("--no-strip-extras"),
    OptionSpec::flag("--emit-index-url"),
    OptionSpec::flag("--no-emit-index-url"),
    OptionSpec::flag("--emit-trusted-host"),
    OptionSpec::flag("--no-emit-trusted-host"),
    OptionSpec::value("--resolver"),
    OptionSpec::value("--output-file"),
    OptionSpec::value("--extra"),
    OptionSpec::value("--index-url"),
    OptionSpec::value("--extra-index-url"),
];

/// Options that are always rejected.
///
/// `--no-header` suppresses the very header this crate reads, so a lockfile
/// regenerated with it could never be updated again.
pub const DISALLOWED_OPTIONS: &[&str] = &["--no-header"];

/// Looks up an allowed option by exact name.
pub fn find_option(name: &str) -> Option<&'static OptionSpec> {
    ALLOWED_OPTIONS.iter().find(|spec| spec.name == name)
}

/// Returns `true` if `name` is in the allow-list.
pub fn is_allowed_option(name: &str) -> bool {
    find_option(name).is_some()
}

/// Returns `true` if `name` must never appear in a header.
pub fn is_disallowed_option(name: &str) -> bool {
    DISALLOWED_OPTIONS.contains(&name)
}

/// Iterates allowed option names in registry order.
pub fn allowed_option_names() -> impl Iterator<Item = &'static str> {
    ALLOWED_OPTIONS.iter().map(|spec| spec.name)
}
