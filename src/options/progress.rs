//! Normalization of the `progress` option.

use super::{OptionValue, OptionsBag};

/// Progress type used when `--progress` is given without a value.
pub const DEFAULT_PROGRESS_TYPE: &str = "cli-feedback";

/// `true` becomes [`DEFAULT_PROGRESS_TYPE`], other truthy values pass through.
/// Absent or falsy progress gives `None`.
pub fn normalize_progress(bag: &OptionsBag) -> Option<OptionValue> {
    let progress = match bag.progress.as_ref()? {
        OptionValue::Flag(true) => OptionValue::Text(DEFAULT_PROGRESS_TYPE.to_string()),
        other => other.clone(),
    };

    progress.is_truthy().then_some(progress)
}
