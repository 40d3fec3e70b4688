use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Indentation settings, as read from a `.cindent.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndentConfig {
    pub indent_size: usize,
    /// Extra indentation of a continuation line without a hook; twice `indent_size` if unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_indent_size: Option<usize>,
    pub tab_size: usize,
    /// Only affects how [`IndentConfig::indentation`] renders a column.
    pub insert_spaces: bool,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            indent_size: 4,
            continuation_indent_size: None,
            tab_size: 8,
            insert_spaces: true,
        }
    }
}

impl IndentConfig {
    pub fn continuation_indent(&self) -> usize {
        self.continuation_indent_size
            .unwrap_or(2 * self.indent_size)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indent_size == 0 {
            return Err(ConfigError::Validation(
                "indent_size must be at least 1".to_string(),
            ));
        }
        if self.tab_size == 0 {
            return Err(ConfigError::Validation(
                "tab_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Leading whitespace reaching `column`.
    pub fn indentation(&self, column: usize) -> String {
        if self.insert_spaces || self.tab_size == 0 {
            return " ".repeat(column);
        }
        let tabs = column / self.tab_size;
        let spaces = column % self.tab_size;
        let mut out = "\t".repeat(tabs);
        out.push_str(&" ".repeat(spaces));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = IndentConfig::default();
        assert_eq!(config.indent_size, 4);
        assert_eq!(config.tab_size, 8);
        assert_eq!(config.continuation_indent(), 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn explicit_continuation_indent_wins() {
        let text = "indent_size = 2\ncontinuation_indent_size = 3\n";
        let config = IndentConfig::from_toml_str(text).expect("valid config");
        assert_eq!(config.continuation_indent(), 3);
        assert_eq!(config.tab_size, 8);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = IndentConfig::from_toml_str("tab_size = 4").expect("valid config");
        assert_eq!(config.indent_size, 4);
        assert_eq!(config.continuation_indent(), 8);
    }

    #[test]
    fn rejects_unknown_keys_and_zero_sizes() {
        assert!(matches!(
            IndentConfig::from_toml_str("indent = 2"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            IndentConfig::from_toml_str("indent_size = 0"),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            IndentConfig::from_toml_str("tab_size = 0"),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn load_reads_a_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".cindent.toml");
        std::fs::write(&path, "indent_size = 3\ninsert_spaces = false\n").expect("write");
        let config = IndentConfig::load(&path).expect("load");
        assert_eq!(config.indent_size, 3);
        assert!(!config.insert_spaces);

        let missing = IndentConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }

    #[test]
    fn indentation_renders_spaces_or_tabs() {
        let mut config = IndentConfig::default();
        assert_eq!(config.indentation(6), "      ");
        config.insert_spaces = false;
        assert_eq!(config.indentation(19), "\t\t   ");
        assert_eq!(config.indentation(0), "");
    }

    #[test]
    fn serializes_back_to_toml() {
        let text = toml::to_string(&IndentConfig::default()).expect("serialize");
        assert!(text.contains("indent_size = 4"));
        assert!(!text.contains("continuation_indent_size"));
        let reparsed = IndentConfig::from_toml_str(&text).expect("reparse");
        assert_eq!(reparsed, IndentConfig::default());
    }
}
