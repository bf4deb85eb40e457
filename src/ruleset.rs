//! Rule set types and loaders.
//!
//! The rules themselves are opaque here; only the `options` section is typed,
//! because option normalization writes wrapper config file names into it.
//! Loading never judges the contents: an `options` section (or wrapper entry)
//! that isn't an object is kept as written, untyped.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A parsed rule set file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RuleSet {
    #[serde(default, skip_serializing_if = "RuleSetOptions::is_empty")]
    pub options: RuleSetOptions,
    /// Everything besides `options` (forbidden, allowed, required...).
    #[serde(flatten)]
    pub rules: Map<String, Value>,
}

/// The `options` section of a rule set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct RuleSetOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webpack_config: Option<WrapperConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts_config: Option<WrapperConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub babel_config: Option<WrapperConfig>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl RuleSet {
    /// `options` for writing. An `options` value that isn't an object is
    /// dropped, as setting a nested path replaces it.
    pub fn options_mut(&mut self) -> &mut RuleSetOptions {
        if let Some(stray) = self.rules.remove(OPTIONS_KEY) {
            tracing::debug!(replaced = %stray, "replacing non-object rule set options");
        }
        &mut self.options
    }
}

impl From<Map<String, Value>> for RuleSet {
    fn from(mut rules: Map<String, Value>) -> Self {
        let options = match rules.remove(OPTIONS_KEY) {
            Some(Value::Object(options)) => RuleSetOptions::from(options),
            Some(stray) => {
                rules.insert(OPTIONS_KEY.to_string(), stray);
                RuleSetOptions::default()
            }
            None => RuleSetOptions::default(),
        };
        Self { options, rules }
    }
}

const OPTIONS_KEY: &str = "options";
const FILE_NAME_KEY: &str = "fileName";

impl RuleSetOptions {
    pub fn is_empty(&self) -> bool {
        self.webpack_config.is_none()
            && self.ts_config.is_none()
            && self.babel_config.is_none()
            && self.other.is_empty()
    }
}

impl From<Map<String, Value>> for RuleSetOptions {
    fn from(mut other: Map<String, Value>) -> Self {
        let webpack_config = take_wrapper(&mut other, "webpackConfig");
        let ts_config = take_wrapper(&mut other, "tsConfig");
        let babel_config = take_wrapper(&mut other, "babelConfig");
        Self {
            webpack_config,
            ts_config,
            babel_config,
            other,
        }
    }
}

/// Only objects become a typed entry; anything else stays in `options`.
fn take_wrapper(options: &mut Map<String, Value>, key: &str) -> Option<WrapperConfig> {
    match options.remove(key) {
        Some(Value::Object(config)) => Some(WrapperConfig::from(config)),
        Some(stray) => {
            options.insert(key.to_string(), stray);
            None
        }
        None => None,
    }
}

/// Reference to a bundler or compiler config file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct WrapperConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Kind-specific settings (env, arguments...) kept as written.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WrapperConfig {
    /// A non-string `fileName` as written, kept in `extra`.
    pub fn stray_file_name(&self) -> Option<&Value> {
        self.extra.get(FILE_NAME_KEY)
    }

    pub fn set_file_name(&mut self, file_name: impl Into<String>) {
        self.extra.remove(FILE_NAME_KEY);
        self.file_name = Some(file_name.into());
    }
}

impl From<Map<String, Value>> for WrapperConfig {
    fn from(mut extra: Map<String, Value>) -> Self {
        let file_name = match extra.remove(FILE_NAME_KEY) {
            Some(Value::String(file_name)) => Some(file_name),
            Some(stray) => {
                extra.insert(FILE_NAME_KEY.to_string(), stray);
                None
            }
            None => None,
        };
        Self { file_name, extra }
    }
}

/// Loads and parses a rule set from a resolved path.
pub trait RuleSetLoader {
    fn load(&self, path: &Path) -> Result<RuleSet>;
}

/// Reads rule sets from disk. `.yaml`/`.yml` files are parsed as YAML,
/// everything else as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRuleSetLoader;

impl RuleSetLoader for FileRuleSetLoader {
    fn load(&self, path: &Path) -> Result<RuleSet> {
        let content = fs::read_to_string(path).map_err(|source| Error::RuleSetRead {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "parsing rule set");
        parse_rule_set(path, &content)
    }
}

pub fn parse_rule_set(path: &Path, content: &str) -> Result<RuleSet> {
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );

    let parsed: std::result::Result<RuleSet, String> = if is_yaml {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(content).map_err(|e| e.to_string())
    };

    parsed.map_err(|reason| Error::RuleSetParse {
        path: path.to_path_buf(),
        reason,
    })
}

/// In-memory loader keyed by path, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRuleSetLoader {
    rule_sets: HashMap<PathBuf, RuleSet>,
}

impl InMemoryRuleSetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule_set(mut self, path: impl Into<PathBuf>, rule_set: RuleSet) -> Self {
        self.rule_sets.insert(path.into(), rule_set);
        self
    }
}

impl RuleSetLoader for InMemoryRuleSetLoader {
    fn load(&self, path: &Path) -> Result<RuleSet> {
        self.rule_sets
            .get(path)
            .cloned()
            .ok_or_else(|| Error::RuleSetRead {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such rule set"),
            })
    }
}
