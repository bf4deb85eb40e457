//! Normalization of command line options into cruise options.
//!
//! The raw input is whatever the argument parser produced: a loose map of
//! option names to values. Normalization keeps the recognized options, seeds
//! defaults, resolves the files the options point at and reshapes shorthand
//! options into the nested form the cruise engine reads.
//!
//! Order of the stages matters and is fixed:
//! 1. eject unknown options
//! 2. seed `outputTo`/`outputType` defaults, split `moduleSystems`
//! 3. `config` alias for `validate`
//! 4. validation (rules file + rule set)
//! 5. progress
//! 6. known violations
//! 7. wrapper configs: webpack, typescript, babel

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::probe::{FileProbe, FsProbe};
use crate::ruleset::{FileRuleSetLoader, RuleSet, RuleSetLoader};

pub mod defaults;
pub mod progress;
pub mod validation;
pub mod wrapper;

pub use defaults::*;
pub use progress::*;
pub use validation::*;
pub use wrapper::*;

/// Raw options as handed over by an argument parser.
pub type RawOptions = Map<String, Value>;

/// Option names that mean something to the cruise engine. Anything else in
/// the raw input is dropped.
pub const KNOWN_CLI_OPTIONS: &[&str] = &[
    "babelConfig",
    "baseDir",
    "collapse",
    "config",
    "doNotFollow",
    "exclude",
    "focus",
    "help",
    "ignoreKnown",
    "includeOnly",
    "info",
    "init",
    "maxDepth",
    "metrics",
    "moduleSystems",
    "outputTo",
    "outputType",
    "prefix",
    "preserveSymlinks",
    "progress",
    "tsPreCompilationDeps",
    "tsConfig",
    "validate",
    "version",
    "webpackConfig",
];

/// Keys the bag holds in typed fields. They never show up in `passthrough`,
/// whatever the recognized option names are.
const TYPED_OPTION_KEYS: &[&str] = &[
    "outputTo",
    "outputType",
    "moduleSystems",
    "config",
    "validate",
    "rulesFile",
    "ruleSet",
    "progress",
    "ignoreKnown",
    "knownViolationsFile",
    "webpackConfig",
    "tsConfig",
    "babelConfig",
];

/// Value of an option that is either a bare flag or carries a file name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Text(String),
    Other(Value),
}

impl OptionValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The option's own file name when it has one, `default` otherwise.
    pub fn text_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.as_text().unwrap_or(default)
    }

    /// `false`, `""`, `0` and `null` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            OptionValue::Flag(flag) => *flag,
            OptionValue::Text(text) => !text.is_empty(),
            OptionValue::Other(value) => is_truthy_value(value),
        }
    }
}

pub(crate) fn is_truthy_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(flag) => OptionValue::Flag(flag),
            Value::String(text) => OptionValue::Text(text),
            other => OptionValue::Other(other),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(flag: bool) -> Self {
        OptionValue::Flag(flag)
    }
}

impl From<&str> for OptionValue {
    fn from(text: &str) -> Self {
        OptionValue::Text(text.to_string())
    }
}

/// Normalized options, ready for the cruise engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsBag {
    /// A string unless the caller passed something else, which is kept.
    pub output_to: Value,
    pub output_type: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_systems: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<OptionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate: Option<OptionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_set: Option<RuleSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<OptionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_known: Option<OptionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_violations_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webpack_config: Option<OptionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts_config: Option<OptionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub babel_config: Option<OptionValue>,
    /// Recognized options no normalizer touches, carried as given.
    #[serde(flatten)]
    pub passthrough: BTreeMap<String, Value>,
}

impl OptionsBag {
    /// Build a bag from already-filtered options, with `outputTo` and
    /// `outputType` seeded from `defaults` unless given.
    pub fn from_known(mut known: RawOptions, defaults: &Defaults) -> Result<Self> {
        let output_to = known
            .remove("outputTo")
            .unwrap_or_else(|| Value::from(defaults.output_to.as_str()));
        let output_type = known
            .remove("outputType")
            .unwrap_or_else(|| Value::from(defaults.output_type.as_str()));
        let module_systems = known
            .remove("moduleSystems")
            .map(parse_module_systems)
            .transpose()?;

        let mut take = |key: &str| known.remove(key).map(OptionValue::from);
        let config = take("config");
        let validate = take("validate");
        let progress = take("progress");
        let ignore_known = take("ignoreKnown");
        let webpack_config = take("webpackConfig");
        let ts_config = take("tsConfig");
        let babel_config = take("babelConfig");

        // Only reachable with custom option names
        known.retain(|key, _| {
            let typed = TYPED_OPTION_KEYS.contains(&key.as_str());
            if typed {
                tracing::debug!(key = %key, "dropping option that shadows a normalized field");
            }
            !typed
        });

        Ok(Self {
            output_to,
            output_type,
            module_systems,
            config,
            validate,
            rules_file: None,
            rule_set: None,
            progress,
            ignore_known,
            known_violations_file: None,
            webpack_config,
            ts_config,
            babel_config,
            passthrough: known.into_iter().collect(),
        })
    }

    /// Whether validation against a rule set was resolved as enabled.
    pub fn is_validating(&self) -> bool {
        self.validate
            .as_ref()
            .is_some_and(|value| *value == OptionValue::Flag(true))
    }

    /// `config` is an alias of `validate`. When both are given `config` wins.
    pub fn with_config_alias(mut self) -> Self {
        if let Some(config) = &self.config {
            if self.validate.is_some() {
                tracing::debug!("'config' overrides an explicit 'validate' value");
            }
            self.validate = Some(config.clone());
        }
        self
    }

    pub fn with_validation(mut self, outcome: ValidationOutcome) -> Self {
        match outcome {
            ValidationOutcome::Disabled => {
                self.validate = Some(OptionValue::Flag(false));
            }
            ValidationOutcome::Enabled {
                rules_file,
                rule_set,
            } => {
                self.rules_file = Some(rules_file);
                self.rule_set = Some(rule_set);
                self.validate = Some(OptionValue::Flag(true));
            }
        }
        self
    }

    /// Merge a normalized progress value; `None` leaves the bag as it was.
    pub fn with_progress(mut self, progress: Option<OptionValue>) -> Self {
        if progress.is_some() {
            self.progress = progress;
        }
        self
    }

    pub fn with_known_violations(mut self, known_violations_file: Option<PathBuf>) -> Self {
        if known_violations_file.is_some() {
            self.known_violations_file = known_violations_file;
        }
        self
    }
}

/// `"amd, cjs,es6"` -> `["amd", "cjs", "es6"]`. A list of strings is taken
/// as already split.
fn parse_module_systems(value: Value) -> Result<Vec<String>> {
    let invalid = || Error::InvalidOption {
        key: "moduleSystems".to_string(),
        expected: "a comma separated string or a list of strings",
    };

    match value {
        Value::String(list) => Ok(list.split(',').map(|s| s.trim().to_string()).collect()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(invalid()),
            })
            .collect(),
        _ => Err(invalid()),
    }
}

/// Keep only the options named in `known_options`.
pub fn eject_unknown_options<S: AsRef<str>>(raw: &RawOptions, known_options: &[S]) -> RawOptions {
    raw.iter()
        .filter(|(key, _)| known_options.iter().any(|known| known.as_ref() == key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Runs the normalization pipeline with a fixed set of collaborators.
#[derive(Debug, Clone)]
pub struct OptionNormalizer<P = FsProbe, L = FileRuleSetLoader> {
    known_options: Vec<String>,
    defaults: Defaults,
    probe: P,
    loader: L,
}

impl Default for OptionNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionNormalizer {
    /// Normalizer over the real filesystem with built-in defaults.
    pub fn new() -> Self {
        Self {
            known_options: KNOWN_CLI_OPTIONS.iter().map(|s| s.to_string()).collect(),
            defaults: Defaults::default(),
            probe: FsProbe,
            loader: FileRuleSetLoader,
        }
    }
}

impl<P: FileProbe, L: RuleSetLoader> OptionNormalizer<P, L> {
    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_known_options<I, S>(mut self, known_options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_options = known_options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_probe<Q: FileProbe>(self, probe: Q) -> OptionNormalizer<Q, L> {
        OptionNormalizer {
            known_options: self.known_options,
            defaults: self.defaults,
            probe,
            loader: self.loader,
        }
    }

    pub fn with_loader<M: RuleSetLoader>(self, loader: M) -> OptionNormalizer<P, M> {
        OptionNormalizer {
            known_options: self.known_options,
            defaults: self.defaults,
            probe: self.probe,
            loader,
        }
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn config_file_resolver(&self) -> ConfigFileResolver<'_, P, L> {
        ConfigFileResolver::new(
            &self.probe,
            &self.loader,
            &self.defaults.rules_file_candidates,
            &self.defaults.config_file_name,
        )
    }

    pub fn known_violations_resolver(&self) -> KnownViolationsResolver<'_, P> {
        KnownViolationsResolver::new(&self.probe, &self.defaults.baseline_file_name)
    }

    /// Turn raw options into normalized cruise options.
    pub fn normalize(&self, raw: &RawOptions) -> Result<OptionsBag> {
        let known = eject_unknown_options(raw, self.known_options.as_slice());
        tracing::debug!(
            given = raw.len(),
            kept = known.len(),
            "ejected unknown options"
        );

        let bag = OptionsBag::from_known(known, &self.defaults)?.with_config_alias();

        let validation = self.config_file_resolver().resolve_validation(&bag)?;
        let bag = bag.with_validation(validation);

        let progress = normalize_progress(&bag);
        let bag = bag.with_progress(progress);

        let known_violations = self.known_violations_resolver().resolve_known_violations(&bag)?;
        let bag = bag.with_known_violations(known_violations);

        Ok(WRAPPER_KINDS
            .iter()
            .fold(bag, |bag, kind| kind.normalize(bag, &self.defaults)))
    }
}

/// Normalize `raw` against the filesystem with built-in defaults.
pub fn normalize_options(raw: &RawOptions) -> Result<OptionsBag> {
    OptionNormalizer::new().normalize(raw)
}
