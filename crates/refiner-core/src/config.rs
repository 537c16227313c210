use crate::blank::BlankDetector;
use crate::error::{RefinerError, Result};
use crate::fence::FenceSyntax;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a refine run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinerConfig {
    /// Fence token that opens and closes diagram blocks
    pub fence: String,

    /// Language tag expected right after the opening fence
    pub language: String,

    /// Edge token whose last occurrence anchors the closing fence
    pub arrow: String,

    /// Extension (without the dot) of the files to process
    pub extension: String,

    /// Rewrite `\(`, `\)`, `\$` and the spacing around `$`
    pub math_delimiters: bool,

    /// Leave placeholder documents untouched
    pub skip_blank: bool,

    /// Ignore case when matching placeholder headings against file names
    pub fold_case: bool,
}

impl Default for RefinerConfig {
    fn default() -> Self {
        let syntax = FenceSyntax::default();
        Self {
            fence: syntax.fence,
            language: syntax.language,
            arrow: syntax.arrow,
            extension: "md".to_string(),
            math_delimiters: true,
            skip_blank: true,
            fold_case: false,
        }
    }
}

impl RefinerConfig {
    /// Parse a TOML document; missing keys fall back to defaults
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| RefinerError::read(path, e))?;
        Self::from_toml_str(&raw)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("fence", &self.fence),
            ("language", &self.language),
            ("arrow", &self.arrow),
            ("extension", &self.extension),
        ] {
            if value.trim().is_empty() {
                return Err(RefinerError::invalid_config(format!(
                    "{name} must not be empty"
                )));
            }
        }

        if self.extension.contains(['/', '\\']) {
            return Err(RefinerError::invalid_config(format!(
                "extension '{}' must not contain a path separator",
                self.extension
            )));
        }

        Ok(())
    }

    pub fn syntax(&self) -> FenceSyntax {
        FenceSyntax {
            fence: self.fence.clone(),
            language: self.language.clone(),
            arrow: self.arrow.clone(),
        }
    }

    pub fn blank_detector(&self) -> BlankDetector {
        BlankDetector::new(self.fold_case)
    }

    /// File-name suffix selected by this config, e.g. `.md`
    pub(crate) fn suffix(&self) -> String {
        format!(".{}", self.extension.trim_start_matches('.'))
    }
}
