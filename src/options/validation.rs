//! Resolution of the rules file and the known-violations baseline.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result, BASELINE_FILE_HINT, RULES_FILE_HINT};
use crate::probe::FileProbe;
use crate::ruleset::{RuleSet, RuleSetLoader};

use super::{OptionValue, OptionsBag};

/// What the `validate` option resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// No `validate` option was given.
    Disabled,
    Enabled {
        rules_file: PathBuf,
        rule_set: RuleSet,
    },
}

/// Finds the rules file named by (or implied by) the `validate` option and
/// loads it.
pub struct ConfigFileResolver<'a, P, L> {
    probe: &'a P,
    loader: &'a L,
    candidates: &'a [PathBuf],
    default_name: &'a str,
}

impl<'a, P: FileProbe, L: RuleSetLoader> ConfigFileResolver<'a, P, L> {
    /// `candidates` is searched in order when `validate` is a bare flag;
    /// `default_name` is what a failed search reports.
    pub fn new(probe: &'a P, loader: &'a L, candidates: &'a [PathBuf], default_name: &'a str) -> Self {
        Self {
            probe,
            loader,
            candidates,
            default_name,
        }
    }

    pub fn resolve_validation(&self, bag: &OptionsBag) -> Result<ValidationOutcome> {
        let Some(validate) = &bag.validate else {
            return Ok(ValidationOutcome::Disabled);
        };

        let rules_file = self.resolve_rules_file(validate)?;
        let rule_set = self.loader.load(&loadable_path(&rules_file))?;
        tracing::debug!(rules_file = %rules_file.display(), "loaded rule set");

        Ok(ValidationOutcome::Enabled {
            rules_file,
            rule_set,
        })
    }

    /// An explicit file name must exist; a bare flag takes the first
    /// candidate that does.
    pub fn resolve_rules_file(&self, validate: &OptionValue) -> Result<PathBuf> {
        match validate.as_text() {
            Some(file_name) => {
                let path = PathBuf::from(file_name);
                if self.probe.is_readable(&path) {
                    Ok(path)
                } else {
                    Err(Error::file_not_found(path, RULES_FILE_HINT))
                }
            }
            None => {
                tracing::debug!(candidates = ?self.candidates, "searching for a rules file");
                self.probe
                    .first_readable(self.candidates)
                    .cloned()
                    .ok_or_else(|| Error::file_not_found(self.default_name, RULES_FILE_HINT))
            }
        }
    }
}

/// Relative rules files are loaded from the working directory explicitly.
fn loadable_path(rules_file: &Path) -> PathBuf {
    if rules_file.is_absolute() || rules_file.starts_with(".") {
        rules_file.to_path_buf()
    } else {
        Path::new(".").join(rules_file)
    }
}

/// Finds the baseline of known violations named by the `ignoreKnown` option.
pub struct KnownViolationsResolver<'a, P> {
    probe: &'a P,
    default_file: &'a Path,
}

impl<'a, P: FileProbe> KnownViolationsResolver<'a, P> {
    pub fn new(probe: &'a P, default_file: &'a Path) -> Self {
        Self {
            probe,
            default_file,
        }
    }

    /// `None` when `ignoreKnown` was not given.
    pub fn resolve_known_violations(&self, bag: &OptionsBag) -> Result<Option<PathBuf>> {
        let Some(ignore_known) = &bag.ignore_known else {
            return Ok(None);
        };

        let file_name = ignore_known
            .as_text()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.default_file.to_path_buf());

        if !self.probe.is_readable(&file_name) {
            return Err(Error::file_not_found(file_name, BASELINE_FILE_HINT));
        }

        tracing::debug!(file = %file_name.display(), "using known violations baseline");
        Ok(Some(file_name))
    }
}
