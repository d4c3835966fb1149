//! Extraction policy.
//!
//! Controls the parts of extraction that differ between deployments. The
//! allow-list itself is fixed and not configurable.
//!
//! # Example YAML
//!
//! ```yaml
//! compile_commands:
//!   - pip-compile
//!   - ./scripts/compile.sh
//! output_file_check: strict
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::PIP_COMPILE_COMMAND;

/// How `--output-file` is compared with the lockfile being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFileCheck {
    /// No comparison.
    Off,
    /// Log a warning on mismatch (the default).
    #[default]
    Warn,
    /// Fail with [`OutputFileMismatch`](crate::HeaderError::OutputFileMismatch).
    Strict,
}

/// Policy applied by
/// [`extract_header_command_with_policy`](crate::extract_header_command_with_policy).
///
/// # Examples
///
/// ```
/// use pip_header_core::{HeaderPolicy, OutputFileCheck};
///
/// let policy = HeaderPolicy::default();
/// assert!(policy.is_compile_command("pip-compile"));
/// assert!(!policy.is_compile_command("make"));
/// assert_eq!(policy.output_file_check, OutputFileCheck::Warn);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderPolicy {
    /// Invocation names treated as stock pip-compile.
    #[serde(default = "default_compile_commands")]
    pub compile_commands: Vec<String>,
    /// Output-file cross-check mode.
    #[serde(default)]
    pub output_file_check: OutputFileCheck,
}

fn default_compile_commands() -> Vec<String> {
    vec![PIP_COMPILE_COMMAND.to_string()]
}

impl Default for HeaderPolicy {
    fn default() -> Self {
        Self {
            compile_commands: default_compile_commands(),
            output_file_check: OutputFileCheck::default(),
        }
    }
}

impl HeaderPolicy {
    /// Loads a policy from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if parsing fails, or [`ConfigError::Invalid`]
    /// if the policy lists no compile commands.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let policy: Self = serde_yaml::from_reader(reader)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Saves the policy as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be written, or
    /// [`ConfigError::Yaml`] if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Returns `true` if `command` is one of the configured compile commands.
    pub fn is_compile_command(&self, command: &str) -> bool {
        self.compile_commands.iter().any(|c| c == command)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.compile_commands.iter().all(|c| c.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "compile_commands must name at least one command".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_complete() {
        let yaml = r#"
compile_commands:
  - pip-compile
  - uv
output_file_check: strict
"#;
        let policy: HeaderPolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy.compile_commands, vec!["pip-compile", "uv"]);
        assert_eq!(policy.output_file_check, OutputFileCheck::Strict);
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let policy: HeaderPolicy = serde_yaml::from_str("{}").unwrap();
        assert_eq!(policy, HeaderPolicy::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.yml");
        let policy = HeaderPolicy {
            compile_commands: vec!["pip-compile".into(), "./compile.sh".into()],
            output_file_check: OutputFileCheck::Off,
        };
        policy.save(&path).unwrap();
        assert_eq!(HeaderPolicy::load(&path).unwrap(), policy);
    }

    #[test]
    fn test_load_rejects_empty_command_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.yml");
        std::fs::write(&path, "compile_commands: []\n").unwrap();
        let err = HeaderPolicy::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = HeaderPolicy::load("/nonexistent/policy.yml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
