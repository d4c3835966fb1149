//! Locating the command line inside a lockfile header.
//!
//! pip-compile opens every lockfile with a comment block of this shape:
//!
//! ```text
//! #
//! # This file is autogenerated by pip-compile with Python 3.11
//! # by the following command:
//! #
//! #    pip-compile --output-file=requirements.txt requirements.in
//! #
//! ```
//!
//! The indented lines between the two bare `#` lines hold the command. Long
//! commands may be wrapped over several lines, optionally ending in `\`.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{HeaderError, Result};

static PATTERNS: LazyLock<HeaderPatterns> = LazyLock::new(HeaderPatterns::new);

struct HeaderPatterns {
    intro: Regex,
    marker: Regex,
    blank: Regex,
    command: Regex,
}

impl HeaderPatterns {
    fn new() -> Self {
        Self {
            intro: Regex::new(r"^#\s*This file is autogenerated by \S+")
                .expect("static regex must compile"),
            marker: Regex::new(r"^#\s*by the following command:\s*$")
                .expect("static regex must compile"),
            blank: Regex::new(r"^#\s*$").expect("static regex must compile"),
            command: Regex::new(r"^#\s+(?P<body>\S.*?)\s*$")
                .expect("static regex must compile"),
        }
    }
}

/// The command recovered from a header, split into invocation and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Leading invocation token, usually `pip-compile`.
    pub command: String,
    /// Everything after the invocation token, whitespace-normalized.
    pub arguments: String,
}

/// Finds the command block in `header` and joins it into one command line.
///
/// # Errors
///
/// Returns [`HeaderError::HeaderFormat`] when any structural piece of the
/// header is missing or out of place.
///
/// # Examples
///
/// ```
/// use pip_header_core::locate_command_line;
///
/// let header = "\
/// ##
/// ## This file is autogenerated by pip-compile with Python 3.11
/// ## by the following command:
/// ##
/// ##    pip-compile --extra=dev reqs.in
/// ##
/// ";
/// let line = locate_command_line(header).unwrap();
/// assert_eq!(line.command, "pip-compile");
/// assert_eq!(line.arguments, "--extra=dev reqs.in");
/// ```
pub fn locate_command_line(header: &str) -> Result<CommandLine> {
    let patterns = &*PATTERNS;
    let mut lines = header.lines().skip_while(|line| !patterns.intro.is_match(line));

    if lines.next().is_none() {
        return Err(format_error("missing autogenerated notice"));
    }
    match lines.next() {
        Some(line) if patterns.marker.is_match(line) => {}
        _ => return Err(format_error("missing 'by the following command:' line")),
    }
    match lines.next() {
        Some(line) if patterns.blank.is_match(line) => {}
        _ => return Err(format_error("expected blank comment line before command")),
    }

    let mut pieces: Vec<&str> = Vec::new();
    let mut terminated = false;
    for line in lines {
        if patterns.blank.is_match(line) {
            terminated = true;
            break;
        }
        let Some(caps) = patterns.command.captures(line) else {
            return Err(format_error(&format!("unexpected line in command block: {line}")));
        };
        let body = caps.name("body").map_or("", |m| m.as_str());
        let body = body.strip_suffix('\\').unwrap_or(body).trim_end();
        if !body.is_empty() {
            pieces.push(body);
        }
    }

    if !terminated {
        return Err(format_error("command block is not terminated by a blank comment line"));
    }
    if pieces.is_empty() {
        return Err(format_error("command block is empty"));
    }

    let joined = pieces.join(" ");
    let mut words = joined.split_whitespace();
    let command = words.next().unwrap_or_default().to_string();
    let arguments = words.collect::<Vec<_>>().join(" ");
    debug!(command = %command, arguments = %arguments, "located header command line");

    Ok(CommandLine { command, arguments })
}

fn format_error(reason: &str) -> HeaderError {
    HeaderError::HeaderFormat(reason.to_string())
}
