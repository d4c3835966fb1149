//! Splitting a header command line into classified tokens.
//!
//! Tokenizing is plain whitespace splitting. Quoting, escapes and variable
//! expansion are deliberately not interpreted: a fragment such as
//! `--$(curl this)` simply becomes the option token `--$(curl` followed by
//! the positional `this)`, and validation rejects it.

/// One argument from a header command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Dash-prefixed argument, split on the first `=`.
    Option {
        /// Name including the leading dashes.
        name: &'a str,
        /// Text after the first `=`, if any.
        value: Option<&'a str>,
    },
    /// Any other argument. Always a source file.
    Positional(&'a str),
}

impl<'a> Token<'a> {
    /// Classifies a single raw argument.
    pub fn classify(raw: &'a str) -> Self {
        if !raw.starts_with('-') {
            return Token::Positional(raw);
        }
        match raw.split_once('=') {
            Some((name, value)) => Token::Option {
                name,
                value: Some(value),
            },
            None => Token::Option {
                name: raw,
                value: None,
            },
        }
    }

    /// Returns the raw text this token was parsed from, without the value.
    pub fn name(&self) -> &'a str {
        match self {
            Token::Option { name, .. } => name,
            Token::Positional(text) => text,
        }
    }
}

/// Splits `arguments` on whitespace and classifies each piece, keeping order.
///
/// # Examples
///
/// ```
/// use pip_header_core::{Token, tokenize};
///
/// let tokens = tokenize("--extra=dev reqs.in");
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Option { name: "--extra", value: Some("dev") },
///         Token::Positional("reqs.in"),
///     ]
/// );
/// ```
pub fn tokenize(arguments: &str) -> Vec<Token<'_>> {
    arguments.split_whitespace().map(Token::classify).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_short_and_long_options() {
        assert_eq!(
            Token::classify("-v"),
            Token::Option {
                name: "-v",
                value: None
            }
        );
        assert_eq!(
            Token::classify("--resolver=backtracking"),
            Token::Option {
                name: "--resolver",
                value: Some("backtracking")
            }
        );
    }

    #[test]
    fn test_value_split_on_first_equal_sign() {
        assert_eq!(
            Token::classify("--index-url=https://host/simple?a=b"),
            Token::Option {
                name: "--index-url",
                value: Some("https://host/simple?a=b")
            }
        );
    }

    #[test]
    fn test_empty_value_is_kept() {
        assert_eq!(
            Token::classify("--extra="),
            Token::Option {
                name: "--extra",
                value: Some("")
            }
        );
    }

    #[test]
    fn test_paths_are_positional() {
        for raw in ["reqs.in", "./lib/setup.py", "reqs/testing.in", "a=b.in"] {
            assert_eq!(Token::classify(raw), Token::Positional(raw));
        }
    }

    #[test]
    fn test_shell_fragments_are_not_interpreted() {
        let tokens = tokenize("--$(curl this) reqs.in");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].name(), "--$(curl");
        assert_eq!(tokens[1], Token::Positional("this)"));
    }

    #[test]
    fn test_order_is_preserved() {
        let names: Vec<_> = tokenize("b.in  --extra=x\ta.in")
            .iter()
            .map(Token::name)
            .collect();
        assert_eq!(names, vec!["b.in", "--extra", "a.in"]);
    }
}
