//! Starter rule set creation (`cruiser init`).

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;

use crate::error::{Error, Result};
use crate::options::{Defaults, OptionValue};
use crate::ruleset::{parse_rule_set, RuleSet};

/// The file name an `--init`/`--validate` style option refers to: its own
/// value when it has one, the configured `configFileName` otherwise.
pub fn determine_rules_file_name(value: Option<&OptionValue>, defaults: &Defaults) -> PathBuf {
    let default_name = defaults.config_file_name.as_str();
    PathBuf::from(value.map_or(default_name, |value| value.text_or(default_name)))
}

/// A small rule set that forbids circular dependencies and orphans.
pub fn starter_rule_set() -> RuleSet {
    let rules = json!({
        "forbidden": [
            {
                "name": "no-circular",
                "severity": "warn",
                "comment": "This dependency is part of a circular relationship.",
                "from": {},
                "to": { "circular": true }
            },
            {
                "name": "no-orphans",
                "severity": "info",
                "comment": "This module is not used by any other module.",
                "from": { "orphan": true },
                "to": {}
            }
        ],
        "options": {
            "doNotFollow": { "path": "node_modules" }
        }
    });

    serde_json::from_value(rules).unwrap_or_default()
}

/// Write the starter rule set to `path`, as YAML when the extension says so.
/// Existing files are only replaced with `force`.
pub fn write_starter_rule_set(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists (use --force to overwrite)", path.display()),
        )));
    }

    let rule_set = starter_rule_set();
    let content = if is_yaml(path) {
        serde_yaml::to_string(&rule_set).map_err(|e| Error::RuleSetParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
    } else {
        let mut json = serde_json::to_string_pretty(&rule_set).map_err(|e| Error::RuleSetParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        json.push('\n');
        json
    };

    // Whatever we write has to load again
    parse_rule_set(path, &content)?;

    fs::write(path, content)?;
    tracing::info!(path = %path.display(), "wrote starter rule set");
    Ok(())
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}
