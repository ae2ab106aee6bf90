//! Policy file (YAML) that can replace the built-in role tables.
//!
//! ```yaml
//! version: 1
//! message_edit_window_ms: 600000
//! roles:
//!   lead: [start_direct_chat, send_messages]
//!   # ... every role must be listed once the section is present
//! chat_matrix:
//!   lead: [consultant]
//! upload_limits_bytes:
//!   lead: 10485760
//! ```
//!
//! Sections that are absent keep the built-in table. A section that is
//! present must cover every role; see [`crate::PolicyCatalog::from_config`].

use crate::errors::CatalogError;
use crate::permission::Permission;
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const SUPPORTED_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_edit_window_ms: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_skew_ms: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<BTreeMap<Role, Vec<Permission>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_matrix: Option<BTreeMap<Role, Vec<Role>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_limits_bytes: Option<BTreeMap<Role, u64>>,
}

fn default_version() -> u32 {
    SUPPORTED_VERSION
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            message_edit_window_ms: None,
            clock_skew_ms: None,
            roles: None,
            chat_matrix: None,
            upload_limits_bytes: None,
        }
    }
}

impl PolicyConfig {
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let config: PolicyConfig = serde_yaml::from_str(yaml)?;
        if config.version != SUPPORTED_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                found: config.version,
                supported: SUPPORTED_VERSION,
            });
        }
        Ok(config)
    }

    /// True when the file changes nothing.
    pub fn is_builtin(&self) -> bool {
        self.message_edit_window_ms.is_none()
            && self.clock_skew_ms.is_none()
            && self.roles.is_none()
            && self.chat_matrix.is_none()
            && self.upload_limits_bytes.is_none()
    }
}
