//! A single spec problem: code, JSON-pointer path, message, optional hint.

use serde::Serialize;

use super::error_code::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSpecError {
    pub code: ErrorCode,
    /// JSON pointer to the offending field (e.g. `/graph/window_size`)
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl PipelineSpecError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl std::fmt::Display for PipelineSpecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "[{}] {}: {}", self.code, path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_hint() {
        let err = PipelineSpecError::new(ErrorCode::InvalidValue, "/graph/window_size", "must be at least 1")
            .with_hint("Use the default of 4");
        assert_eq!(
            err.to_string(),
            "[invalid_value] /graph/window_size: must be at least 1 (hint: Use the default of 4)"
        );
    }

    #[test]
    fn test_display_root_path() {
        let err = PipelineSpecError::new(ErrorCode::UnknownField, "", "unrecognized field");
        assert_eq!(err.to_string(), "[unknown_field] /: unrecognized field");
    }
}
