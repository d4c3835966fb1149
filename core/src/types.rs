//! Structured result of a header extraction.

use serde::{Deserialize, Serialize};

/// Default pip-compile invocation name.
pub const PIP_COMPILE_COMMAND: &str = "pip-compile";

/// Arguments recovered from a validated lockfile header.
///
/// Only produced by a successful extraction, so `source_files` is never
/// empty and every recorded option was in the allow-list.
///
/// # Examples
///
/// ```
/// use pip_header_core::extract_header_command;
///
/// let header = "\
/// ##
/// ## This file is autogenerated by pip-compile with Python 3.11
/// ## by the following command:
/// ##
/// ##    pip-compile --generate-hashes --extra=dev reqs.in
/// ##
/// ";
/// let args = extract_header_command(header, "reqs.txt").unwrap();
/// assert_eq!(args.source_files, vec!["reqs.in"]);
/// assert_eq!(args.extras, vec!["dev"]);
/// assert!(args.generate_hashes);
/// assert_eq!(args.to_command_line(), "pip-compile --generate-hashes --extra=dev reqs.in");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipCompileArgs {
    /// Invocation token, e.g. `pip-compile`.
    pub command: String,
    /// `true` when `command` is not one of the configured compile commands.
    pub is_custom_command: bool,
    /// Invocation token followed by every argument, in header order.
    pub argv: Vec<String>,
    /// Positional arguments, in header order.
    pub source_files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_index_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,
    #[serde(default)]
    pub all_extras: bool,
    #[serde(default)]
    pub generate_hashes: bool,
    #[serde(default)]
    pub allow_unsafe: bool,
    #[serde(default)]
    pub verbose: bool,
    /// `Some(true)` for `--strip-extras`, `Some(false)` for `--no-strip-extras`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_extras: Option<bool>,
    /// `Some(true)` for `--emit-index-url`, `Some(false)` for `--no-emit-index-url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emit_index_url: Option<bool>,
    /// `Some(true)` for `--emit-trusted-host`, `Some(false)` for `--no-emit-trusted-host`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emit_trusted_host: Option<bool>,
    /// `Some(true)` for `--reuse-hashes`, `Some(false)` for `--no-reuse-hashes`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reuse_hashes: Option<bool>,
}

impl PipCompileArgs {
    /// Rebuilds the command line that produced the lockfile.
    ///
    /// Header tokens never contain whitespace, so joining `argv` with single
    /// spaces reproduces the original command.
    pub fn to_command_line(&self) -> String {
        self.argv.join(" ")
    }

    /// Checks the declared `--output-file` against the lockfile at `path`.
    ///
    /// Returns `true` when no output file was declared. `path` may carry
    /// more leading directories than the header, e.g. an absolute path to a
    /// lockfile whose header names it relative to the project root; it
    /// matches when its trailing components equal the declared path. Leading
    /// `./` and backslash separators are ignored on both sides.
    ///
    /// # Examples
    ///
    /// ```
    /// use pip_header_core::PipCompileArgs;
    ///
    /// let args = PipCompileArgs {
    ///     output_file: Some("./reqs/prod.txt".into()),
    ///     ..Default::default()
    /// };
    /// assert!(args.matches_output_file("reqs/prod.txt"));
    /// assert!(args.matches_output_file("/home/dev/project/reqs/prod.txt"));
    /// assert!(!args.matches_output_file("prod.txt"));
    /// assert!(!args.matches_output_file("/home/dev/project/other-reqs/prod.txt"));
    /// ```
    pub fn matches_output_file(&self, path: &str) -> bool {
        let Some(declared) = &self.output_file else {
            return true;
        };
        let declared = normalize_path(declared);
        let actual = normalize_path(path);
        if actual == declared {
            return true;
        }
        !declared.starts_with('/')
            && actual
                .strip_suffix(declared.as_str())
                .is_some_and(|prefix| prefix.ends_with('/'))
    }
}

fn normalize_path(path: &str) -> String {
    let mut normalized = path.replace('\\', "/");
    while let Some(rest) = normalized.strip_prefix("./") {
        normalized = rest.to_string();
    }
    normalized
}
