//! Decomposition of module specifiers into module, protocol and media type.
//!
//! A specifier is whatever string the graph walker found in an import or
//! require: `lodash`, `node:fs`, `data:application/json,{}` and so on. Only a
//! handful of protocols are recognized; anything else is left intact so the
//! resolver downstream sees exactly what the source contained.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Protocols that are split off the module name, including their colon.
pub const KNOWN_PROTOCOLS: &[&str] = &["node:", "file:", "data:"];

const DATA_PROTOCOL: &str = "data:";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleAttributes {
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl ModuleAttributes {
    fn bare(module: &str) -> Self {
        Self {
            module: module.to_string(),
            ..Default::default()
        }
    }
}

fn scheme_pattern() -> &'static Regex {
    static SCHEME: OnceLock<Regex> = OnceLock::new();
    SCHEME.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*:").expect("scheme pattern is valid"))
}

/// Split a specifier into its attributes. Never fails: malformed input comes
/// back as a bare module.
pub fn decompose(specifier: &str) -> ModuleAttributes {
    let Some(scheme) = scheme_pattern().find(specifier) else {
        return ModuleAttributes::bare(specifier);
    };

    let protocol = scheme.as_str();
    let remainder = &specifier[scheme.end()..];

    // A protocol with nothing after it is not a module reference
    if !KNOWN_PROTOCOLS.contains(&protocol) || remainder.is_empty() {
        return ModuleAttributes::bare(specifier);
    }

    let (mime_type, module) = if protocol == DATA_PROTOCOL {
        split_media_type(remainder)
    } else {
        (None, remainder)
    };

    ModuleAttributes {
        module: module.to_string(),
        protocol: Some(protocol.to_string()),
        mime_type: mime_type.map(str::to_string),
    }
}

/// `application/json,payload` -> (Some("application/json"), "payload").
/// Both sides must be non-empty, otherwise the whole remainder is the payload.
fn split_media_type(remainder: &str) -> (Option<&str>, &str) {
    match remainder.split_once(',') {
        Some((mime_type, payload)) if !mime_type.is_empty() && !payload.is_empty() => {
            (Some(mime_type), payload)
        }
        _ => (None, remainder),
    }
}
