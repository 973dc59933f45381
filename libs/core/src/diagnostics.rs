//! Typed decode failures and the collected diagnostic list.
//!
//! The decoder and renderer never log: anything noteworthy is either a typed
//! [`DecodeError`] for the node it occurred on, or a [`Diagnostic`] appended
//! to the list returned to the caller.

use serde::Serialize;
use thiserror::Error;

/// Hard failure for a single node. Whether it aborts the whole decode or just
/// drops the node depends on the configured unknown policy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected a JSON object at {path}")]
    MalformedNode { path: String },
    #[error("missing 'type' discriminator at {path}")]
    MissingTypeDiscriminator { path: String },
    #[error("unknown variant '{tag}' at {path}")]
    UnknownVariant { tag: String, path: String },
    #[error("missing required field '{field}' at {path}")]
    MissingRequiredField { field: String, path: String },
    #[error("recursion limit {limit} exceeded at {path}")]
    RecursionLimit { limit: usize, path: String },
}

impl DecodeError {
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::MalformedNode { .. } => codes::MALFORMED_NODE,
            DecodeError::MissingTypeDiscriminator { .. } => codes::MISSING_TYPE,
            DecodeError::UnknownVariant { .. } => codes::UNKNOWN_VARIANT,
            DecodeError::MissingRequiredField { .. } => codes::MISSING_REQUIRED_FIELD,
            DecodeError::RecursionLimit { .. } => codes::RECURSION_LIMIT,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            DecodeError::MalformedNode { path }
            | DecodeError::MissingTypeDiscriminator { path }
            | DecodeError::UnknownVariant { path, .. }
            | DecodeError::MissingRequiredField { path, .. }
            | DecodeError::RecursionLimit { path, .. } => path,
        }
    }
}

pub mod codes {
    pub const MALFORMED_NODE: &str = "malformed-node";
    pub const MISSING_TYPE: &str = "missing-type-discriminator";
    pub const UNKNOWN_VARIANT: &str = "unknown-variant";
    pub const MISSING_REQUIRED_FIELD: &str = "missing-required-field";
    pub const RECURSION_LIMIT: &str = "recursion-limit";
    pub const INVALID_FIELD_VALUE: &str = "invalid-field-value";
    pub const ROOT_TYPE_MISMATCH: &str = "root-type-mismatch";
    pub const DUPLICATE_ID: &str = "duplicate-id";
    pub const UNSUPPORTED_CARD_VERSION: &str = "unsupported-card-version";
    pub const REQUIRED_INPUT_WITHOUT_LABEL: &str = "required-input-without-label";
    pub const REQUIREMENT_UNMET: &str = "requirement-unmet";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// One recoverable finding, located by a slash-separated node path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: &'static str,
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(code: &'static str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn error(code: &'static str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<&DecodeError> for Diagnostic {
    fn from(error: &DecodeError) -> Self {
        Diagnostic::error(error.code(), error.path().to_string(), error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropped_node_errors_become_error_diagnostics() {
        let error = DecodeError::UnknownVariant {
            tag: "Bogus".into(),
            path: "/body/1".into(),
        };
        let diagnostic = Diagnostic::from(&error);
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.code, codes::UNKNOWN_VARIANT);
        assert!(diagnostic.message.contains("Bogus"));
    }
}
