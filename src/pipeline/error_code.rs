//! Stable machine-readable codes for pipeline spec diagnostics.

use serde::Serialize;

/// Category of a spec diagnostic. Serialized as `snake_case` so consumers can
/// match on it without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The `v` field names a spec version this build does not understand.
    UnsupportedVersion,
    /// A numeric or textual setting is outside its allowed range.
    InvalidValue,
    /// Two settings contradict each other.
    InvalidCombo,
    /// A field the schema does not define.
    UnknownField,
    /// Catch-all for custom rules.
    ValidationFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion => "unsupported_version",
            Self::InvalidValue => "invalid_value",
            Self::InvalidCombo => "invalid_combo",
            Self::UnknownField => "unknown_field",
            Self::ValidationFailed => "validation_failed",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
