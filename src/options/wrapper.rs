//! Wrapper configs: the webpack, TypeScript and Babel configs the resolver
//! needs to read. On the command line they are shorthand options
//! (`--webpack-config`, `--ts-config`, `--babel-config`); the cruise engine
//! reads them from `ruleSet.options.<kind>.fileName`.

use std::fmt;

use crate::ruleset::{RuleSetOptions, WrapperConfig};

use super::{is_truthy_value, Defaults, OptionValue, OptionsBag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapperKind {
    Webpack,
    TypeScript,
    Babel,
}

/// Normalization order.
pub const WRAPPER_KINDS: [WrapperKind; 3] =
    [WrapperKind::Webpack, WrapperKind::TypeScript, WrapperKind::Babel];

impl WrapperKind {
    /// Option name on the command line, and key under `ruleSet.options`.
    pub fn shorthand_key(self) -> &'static str {
        match self {
            WrapperKind::Webpack => "webpackConfig",
            WrapperKind::TypeScript => "tsConfig",
            WrapperKind::Babel => "babelConfig",
        }
    }

    pub fn default_file_name(self, defaults: &Defaults) -> &str {
        match self {
            WrapperKind::Webpack => &defaults.webpack_config,
            WrapperKind::TypeScript => &defaults.typescript_config,
            WrapperKind::Babel => &defaults.babel_config,
        }
    }

    fn shorthand(self, bag: &mut OptionsBag) -> &mut Option<OptionValue> {
        match self {
            WrapperKind::Webpack => &mut bag.webpack_config,
            WrapperKind::TypeScript => &mut bag.ts_config,
            WrapperKind::Babel => &mut bag.babel_config,
        }
    }

    pub fn entry(self, options: &RuleSetOptions) -> Option<&WrapperConfig> {
        match self {
            WrapperKind::Webpack => options.webpack_config.as_ref(),
            WrapperKind::TypeScript => options.ts_config.as_ref(),
            WrapperKind::Babel => options.babel_config.as_ref(),
        }
    }

    fn entry_mut(self, options: &mut RuleSetOptions) -> &mut Option<WrapperConfig> {
        match self {
            WrapperKind::Webpack => &mut options.webpack_config,
            WrapperKind::TypeScript => &mut options.ts_config,
            WrapperKind::Babel => &mut options.babel_config,
        }
    }

    /// Move the shorthand option into `ruleSet.options.<kind>.fileName`, then
    /// give a nested entry without a usable file name the default one.
    ///
    /// Running it twice is the same as running it once.
    pub fn normalize(self, mut bag: OptionsBag, defaults: &Defaults) -> OptionsBag {
        let key = self.shorthand_key();
        let default_file_name = self.default_file_name(defaults);

        if let Some(shorthand) = self.shorthand(&mut bag).take() {
            let file_name = shorthand.text_or(default_file_name).to_string();
            tracing::debug!(kind = %self, file_name = %file_name, "nesting wrapper config");

            let options = bag.rule_set.get_or_insert_with(Default::default).options_mut();
            options.other.remove(key);
            self.entry_mut(options)
                .get_or_insert_with(WrapperConfig::default)
                .set_file_name(file_name);
        }

        if let Some(rule_set) = bag.rule_set.as_mut() {
            self.fill_default(&mut rule_set.options, default_file_name);
        }

        bag
    }

    fn fill_default(self, options: &mut RuleSetOptions, default_file_name: &str) {
        let key = self.shorthand_key();

        // A truthy entry that isn't an object gets replaced by one
        if options.other.get(key).is_some_and(is_truthy_value) {
            options.other.remove(key);
            *self.entry_mut(options) = Some(WrapperConfig::default());
        }

        if let Some(entry) = self.entry_mut(options).as_mut() {
            let has_file_name = entry.file_name.as_deref().is_some_and(|name| !name.is_empty())
                || entry.stray_file_name().is_some_and(is_truthy_value);
            if !has_file_name {
                tracing::debug!(kind = %self, file_name = %default_file_name, "defaulting wrapper config");
                entry.set_file_name(default_file_name);
            }
        }
    }
}

impl fmt::Display for WrapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WrapperKind::Webpack => write!(f, "webpack"),
            WrapperKind::TypeScript => write!(f, "typescript"),
            WrapperKind::Babel => write!(f, "babel"),
        }
    }
}
