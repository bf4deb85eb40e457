//! Default values consumed by option normalization.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

// =========================================================================
// DEFAULT VALUE FUNCTIONS
// =========================================================================

default_fn!(default_output_to, String, "-".to_string());
default_fn!(default_output_type, String, "err".to_string());
default_fn!(default_config_file_name, String, ".cruiser.json".to_string());
default_fn!(
    default_rules_file_candidates,
    Vec<PathBuf>,
    vec![
        PathBuf::from(".cruiser.json"),
        PathBuf::from(".cruiser.yaml"),
        PathBuf::from(".cruiser.yml"),
    ]
);
default_fn!(
    default_baseline_file_name,
    PathBuf,
    PathBuf::from(".cruiser-known-violations.json")
);
default_fn!(default_webpack_config, String, "./webpack.config.js".to_string());
default_fn!(default_typescript_config, String, "./tsconfig.json".to_string());
default_fn!(default_babel_config, String, "./.babelrc".to_string());

// =========================================================================
// DEFAULTS
// =========================================================================

/// Constants the normalizers fall back on when an option carries no file name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Defaults {
    /// Where reports go when `outputTo` is not given (default: "-", stdout)
    #[serde(default = "default_output_to")]
    pub output_to: String,
    /// Report type when `outputType` is not given (default: "err")
    #[serde(default = "default_output_type")]
    pub output_type: String,
    /// Name reported when no rules file candidate exists
    #[serde(default = "default_config_file_name")]
    pub config_file_name: String,
    /// Rules files searched, in order, when validation is requested without a file name
    #[serde(default = "default_rules_file_candidates")]
    pub rules_file_candidates: Vec<PathBuf>,
    #[serde(default = "default_baseline_file_name")]
    pub baseline_file_name: PathBuf,
    #[serde(default = "default_webpack_config")]
    pub webpack_config: String,
    #[serde(default = "default_typescript_config")]
    pub typescript_config: String,
    #[serde(default = "default_babel_config")]
    pub babel_config: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output_to: default_output_to(),
            output_type: default_output_type(),
            config_file_name: default_config_file_name(),
            rules_file_candidates: default_rules_file_candidates(),
            baseline_file_name: default_baseline_file_name(),
            webpack_config: default_webpack_config(),
            typescript_config: default_typescript_config(),
            babel_config: default_babel_config(),
        }
    }
}

impl Defaults {
    /// Load defaults from a YAML file; keys that are missing keep their
    /// built-in values.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|reason| Error::DefaultsParse {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Replace the rules file search list.
    pub fn with_rules_file_candidates<I, P>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.rules_file_candidates = candidates.into_iter().map(Into::into).collect();
        self
    }
}
