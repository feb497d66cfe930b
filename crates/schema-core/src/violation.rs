//! Violations reported by the validator

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::path::FieldPath;

/// How serious a violation is.
///
/// Only errors make a document invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// What went wrong at a violation's path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViolationKind {
    MissingRequiredField,
    TypeMismatch { expected: String, found: String },
    InvalidEnumValue { allowed: Vec<Value> },
    PatternMismatch { pattern: String },
    UnknownField,
    DeprecatedField,
    /// A deprecated field set together with the field replacing it
    ConflictingFields { with: String },
}

impl ViolationKind {
    pub fn name(&self) -> &'static str {
        match self {
            ViolationKind::MissingRequiredField => "missingRequiredField",
            ViolationKind::TypeMismatch { .. } => "typeMismatch",
            ViolationKind::InvalidEnumValue { .. } => "invalidEnumValue",
            ViolationKind::PatternMismatch { .. } => "patternMismatch",
            ViolationKind::UnknownField => "unknownField",
            ViolationKind::DeprecatedField => "deprecatedField",
            ViolationKind::ConflictingFields { .. } => "conflictingFields",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            ViolationKind::UnknownField | ViolationKind::DeprecatedField => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// A single mismatch between a document and a schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub path: FieldPath,
    pub message: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
    pub severity: Severity,
}

impl Violation {
    /// New violation with the kind's default severity.
    pub fn new(path: FieldPath, kind: ViolationKind, message: impl Into<String>) -> Self {
        let severity = kind.default_severity();
        Self {
            path,
            message: message.into(),
            kind,
            severity,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// The same violation addressed below `base`.
    pub fn rebase(mut self, base: &FieldPath) -> Self {
        self.path = self.path.rebase(base);
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "<root>: {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}
