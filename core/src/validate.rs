//! Header command validation.
//!
//! Walks the tokens of a header command line, rejects anything outside the
//! allow-list, and collects source files and recognized option values into a
//! [`PipCompileArgs`]. The first problem found aborts extraction; there is no
//! partial result.
//!
//! # Examples
//!
//! ```
//! use pip_header_core::*;
//!
//! let header = "\
//! ##
//! ## This file is autogenerated by pip-compile with Python 3.11
//! ## by the following command:
//! ##
//! ##    pip-compile --no-header reqs.in
//! ##
//! ";
//! let err = extract_header_command(header, "reqs.txt").unwrap_err();
//! assert!(matches!(err, HeaderError::DisallowedOption(_)));
//! assert!(err.to_string().contains("not allowed"));
//! ```

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::{HeaderPolicy, OutputFileCheck};
use crate::error::{HeaderError, Result};
use crate::header::locate_command_line;
use crate::options::{find_option, is_disallowed_option};
use crate::tokens::{Token, tokenize};
use crate::types::PipCompileArgs;

/// Extracts and validates the command from a lockfile header using the
/// default [`HeaderPolicy`].
///
/// `output_file_name` is the lockfile the header was read from. It is
/// compared with any `--output-file` option according to the policy.
///
/// # Errors
///
/// Returns the first [`HeaderError`] encountered.
pub fn extract_header_command(header: &str, output_file_name: &str) -> Result<PipCompileArgs> {
    extract_header_command_with_policy(header, output_file_name, &HeaderPolicy::default())
}

/// Extracts and validates the command from a lockfile header.
///
/// # Errors
///
/// Returns the first [`HeaderError`] encountered.
pub fn extract_header_command_with_policy(
    header: &str,
    output_file_name: &str,
    policy: &HeaderPolicy,
) -> Result<PipCompileArgs> {
    let line = locate_command_line(header)?;
    let tokens = tokenize(&line.arguments);

    let mut args = validate_tokens(&tokens)?;
    args.is_custom_command = !policy.is_compile_command(&line.command);
    args.argv = std::iter::once(line.command.clone())
        .chain(line.arguments.split_whitespace().map(String::from))
        .collect();
    args.command = line.command;

    check_output_file(&args, output_file_name, policy.output_file_check)?;

    debug!(
        command = %args.command,
        custom = args.is_custom_command,
        sources = args.source_files.len(),
        "extracted header command"
    );
    Ok(args)
}

/// Validates classified tokens and records them.
///
/// `command`, `argv` and `is_custom_command` are left empty in the returned
/// value; the caller fills them in from the header.
///
/// # Errors
///
/// Option tokens are checked in order, and each one is checked for being
/// disallowed, then unknown, then malformed, then duplicated. A missing
/// source file is reported only after every option passed.
pub fn validate_tokens(tokens: &[Token<'_>]) -> Result<PipCompileArgs> {
    let mut args = PipCompileArgs::default();
    let mut seen: HashSet<&str> = HashSet::new();

    for token in tokens {
        let (name, value) = match *token {
            Token::Positional(path) => {
                args.source_files.push(path.to_string());
                continue;
            }
            Token::Option { name, value } => (name, value),
        };

        if is_disallowed_option(name) {
            return Err(HeaderError::DisallowedOption(name.to_string()));
        }
        let Some(spec) = find_option(name) else {
            return Err(HeaderError::UnknownOption(name.to_string()));
        };
        if spec.takes_value() && value.is_none() {
            return Err(HeaderError::MalformedOption(name.to_string()));
        }
        if !seen.insert(name) {
            return Err(HeaderError::DuplicateOption(name.to_string()));
        }

        record_option(&mut args, name, value);
    }

    if args.source_files.is_empty() {
        return Err(HeaderError::MissingSource);
    }
    Ok(args)
}

fn record_option(args: &mut PipCompileArgs, name: &str, value: Option<&str>) {
    let owned = || value.unwrap_or_default().to_string();
    match name {
        "-v" | "--verbose" => args.verbose = true,
        "--allow-unsafe" => args.allow_unsafe = true,
        "--generate-hashes" => args.generate_hashes = true,
        "--all-extras" => args.all_extras = true,
        "--strip-extras" => args.strip_extras = Some(true),
        "--no-strip-extras" => args.strip_extras = Some(false),
        "--emit-index-url" => args.emit_index_url = Some(true),
        "--no-emit-index-url" => args.emit_index_url = Some(false),
        "--emit-trusted-host" => args.emit_trusted_host = Some(true),
        "--no-emit-trusted-host" => args.emit_trusted_host = Some(false),
        "--reuse-hashes" => args.reuse_hashes = Some(true),
        "--no-reuse-hashes" => args.reuse_hashes = Some(false),
        "--resolver" => args.resolver = Some(owned()),
        "--output-file" => args.output_file = Some(owned()),
        "--index-url" => args.index_url = Some(owned()),
        "--extra-index-url" => args.extra_index_urls.push(owned()),
        "--extra" => args.extras.push(owned()),
        _ => debug!(option = name, "accepted option without a recorded field"),
    }
}

fn check_output_file(args: &PipCompileArgs, file_name: &str, mode: OutputFileCheck) -> Result<()> {
    if mode == OutputFileCheck::Off || args.matches_output_file(file_name) {
        return Ok(());
    }
    let declared = args.output_file.clone().unwrap_or_default();
    if mode == OutputFileCheck::Strict {
        return Err(HeaderError::OutputFileMismatch {
            declared,
            actual: file_name.to_string(),
        });
    }
    warn!(
        declared = %declared,
        actual = file_name,
        "header output file does not match lockfile"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(command: &str) -> String {
        format!(
            "#\n# This file is autogenerated by pip-compile with Python 3.11\n# by the following command:\n#\n#    {command}\n#\n"
        )
    }

    #[test]
    fn test_records_option_values() {
        let args = extract_header_command(
            &header(
                "pip-compile --resolver=backtracking --index-url=https://a/simple \
                 --extra-index-url=https://b/simple --extra=dev --allow-unsafe \
                 --no-emit-index-url --strip-extras reqs.in",
            ),
            "reqs.txt",
        )
        .unwrap();
        assert_eq!(args.resolver.as_deref(), Some("backtracking"));
        assert_eq!(args.index_url.as_deref(), Some("https://a/simple"));
        assert_eq!(args.extra_index_urls, vec!["https://b/simple"]);
        assert_eq!(args.extras, vec!["dev"]);
        assert!(args.allow_unsafe);
        assert_eq!(args.emit_index_url, Some(false));
        assert_eq!(args.strip_extras, Some(true));
        assert!(!args.is_custom_command);
    }

    #[test]
    fn test_records_tri_state_flags() {
        let args = extract_header_command(
            &header("pip-compile --emit-trusted-host --no-reuse-hashes reqs.in"),
            "reqs.txt",
        )
        .unwrap();
        assert_eq!(args.emit_trusted_host, Some(true));
        assert_eq!(args.reuse_hashes, Some(false));

        let args = extract_header_command(
            &header("pip-compile --no-emit-trusted-host --reuse-hashes reqs.in"),
            "reqs.txt",
        )
        .unwrap();
        assert_eq!(args.emit_trusted_host, Some(false));
        assert_eq!(args.reuse_hashes, Some(true));
        assert_eq!(args.strip_extras, None);
    }

    #[test]
    fn test_flag_value_is_ignored() {
        let args =
            extract_header_command(&header("pip-compile -v=dd reqs.in"), "reqs.txt").unwrap();
        assert!(args.verbose);
        assert_eq!(args.source_files, vec!["reqs.in"]);
    }

    #[test]
    fn test_disallowed_checked_before_other_errors() {
        let err = validate_tokens(&tokenize("--no-header=x --no-header")).unwrap_err();
        assert_eq!(err, HeaderError::DisallowedOption("--no-header".into()));
    }

    #[test]
    fn test_first_failing_token_wins() {
        let err = validate_tokens(&tokenize("--foo --resolver reqs.in")).unwrap_err();
        assert_eq!(err, HeaderError::UnknownOption("--foo".into()));

        let err = validate_tokens(&tokenize("--resolver --foo reqs.in")).unwrap_err();
        assert_eq!(err, HeaderError::MalformedOption("--resolver".into()));
    }

    #[test]
    fn test_option_errors_precede_missing_source() {
        let err = validate_tokens(&tokenize("--foo")).unwrap_err();
        assert_eq!(err, HeaderError::UnknownOption("--foo".into()));
    }

    #[test]
    fn test_custom_command_is_flagged() {
        let args = extract_header_command(&header("./compile.sh --extra=dev reqs.in"), "reqs.txt")
            .unwrap();
        assert!(args.is_custom_command);
        assert_eq!(args.command, "./compile.sh");
        assert_eq!(args.argv[0], "./compile.sh");
    }

    #[test]
    fn test_policy_compile_commands() {
        let policy = HeaderPolicy {
            compile_commands: vec!["./compile.sh".into()],
            ..Default::default()
        };
        let args = extract_header_command_with_policy(
            &header("./compile.sh reqs.in"),
            "reqs.txt",
            &policy,
        )
        .unwrap();
        assert!(!args.is_custom_command);
    }

    #[test]
    fn test_output_file_mismatch_is_not_fatal_by_default() {
        let args = extract_header_command(
            &header("pip-compile --output-file=dev.txt reqs.in"),
            "prod.txt",
        )
        .unwrap();
        assert_eq!(args.output_file.as_deref(), Some("dev.txt"));
    }

    #[test]
    fn test_output_file_mismatch_strict() {
        let policy = HeaderPolicy {
            output_file_check: OutputFileCheck::Strict,
            ..Default::default()
        };
        let text = header("pip-compile --output-file=dev.txt reqs.in");
        let err = extract_header_command_with_policy(&text, "prod.txt", &policy).unwrap_err();
        assert_eq!(
            err,
            HeaderError::OutputFileMismatch {
                declared: "dev.txt".into(),
                actual: "prod.txt".into(),
            }
        );
        assert!(extract_header_command_with_policy(&text, "./dev.txt", &policy).is_ok());
        assert!(extract_header_command_with_policy(&text, "/srv/project/dev.txt", &policy).is_ok());
    }

    #[test]
    fn test_argv_round_trips_command_line() {
        let command = "pip-compile --generate-hashes --output-file=reqs.txt reqs.in base.in";
        let args = extract_header_command(&header(command), "reqs.txt").unwrap();
        assert_eq!(args.to_command_line(), command);
    }
}
