//! Catalog construction errors.
//!
//! Decisions never fail: they fall back to deny. Only building a catalog
//! from configuration can go wrong, and it goes wrong loudly at startup.

use crate::role::Role;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read policy file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse policy YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unsupported policy version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("role '{role}' has no permissions; every role needs a non-empty entry")]
    EmptyPermissionSet { role: Role },

    #[error("role '{role}' is missing from the '{table}' table")]
    MissingRole { role: Role, table: &'static str },

    #[error("message edit window must be positive, got {window_ms}ms")]
    InvalidEditWindow { window_ms: i64 },

    #[error("clock skew must not be negative, got {skew_ms}ms")]
    InvalidClockSkew { skew_ms: i64 },
}

impl CatalogError {
    /// Short machine-readable kind for CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::Parse(_) => "parse",
            Self::UnsupportedVersion { .. } => "version",
            Self::EmptyPermissionSet { .. } | Self::MissingRole { .. } => "incomplete_table",
            Self::InvalidEditWindow { .. } | Self::InvalidClockSkew { .. } => "invalid_value",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_role_and_table() {
        let err = CatalogError::MissingRole {
            role: Role::Consultant,
            table: "upload_limits_bytes",
        };
        let msg = err.to_string();
        assert!(msg.contains("consultant"), "got: {msg}");
        assert!(msg.contains("upload_limits_bytes"), "got: {msg}");
        assert_eq!(err.kind(), "incomplete_table");
    }

    #[test]
    fn parse_error_converts_from_serde_yaml() {
        let yaml_err = serde_yaml::from_str::<u32>("not: [a number").unwrap_err();
        let err = CatalogError::from(yaml_err);
        assert_eq!(err.kind(), "parse");
    }
}
