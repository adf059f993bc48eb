use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    /// Missing key, wrong value type, or a value outside its closed set or range.
    #[error("schema error: {0}")]
    Schema(String),
    /// Lookup of a key the settings schema does not declare.
    #[error("unknown setting key: {0}")]
    UnknownKey(String),
    /// Packed multi-value string that does not split into the expected parts.
    #[error("setting '{key}': cannot parse '{value}': {reason}")]
    Format {
        key: String,
        value: String,
        reason: String,
    },
    /// Typed lookup on a declared key of another kind.
    #[error("setting '{key}' is not a {expected}")]
    WrongKind { key: String, expected: &'static str },
    /// Definition file with an extension we cannot parse.
    #[error("unsupported settings format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// IO error reading a definition file.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SettingsError {
    pub(crate) fn format(key: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::Format {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn wrong_kind(key: &str, expected: &'static str) -> Self {
        Self::WrongKind {
            key: key.to_string(),
            expected,
        }
    }
}

pub type Result<T> = std::result::Result<T, SettingsError>;
