//! Upload type and size policy.
//!
//! Content types are checked in two layers: the base `UPLOAD_FILES`
//! permission, then a class-specific permission for images, videos and
//! allow-listed documents. Content types outside those classes pass once the
//! base check holds.

use crate::catalog::PolicyCatalog;
use crate::decision::reason_codes;
use crate::model::{Actor, UploadCandidate};
use crate::permission::Permission;
use serde::Serialize;

/// Document types gated by `UPLOAD_DOCUMENTS`.
pub const DOCUMENT_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/plain",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentClass {
    Image,
    Video,
    Document,
    Unclassified,
}

impl ContentClass {
    /// `None` for an empty content type.
    pub fn classify(content_type: &str) -> Option<Self> {
        let essence = normalize_content_type(content_type)?;
        Some(if essence.starts_with("image/") {
            Self::Image
        } else if essence.starts_with("video/") {
            Self::Video
        } else if DOCUMENT_CONTENT_TYPES.contains(&essence.as_str()) {
            Self::Document
        } else {
            Self::Unclassified
        })
    }

    /// Class-specific permission, if any.
    pub fn required_permission(&self) -> Option<Permission> {
        match self {
            Self::Image => Some(Permission::UploadImages),
            Self::Video => Some(Permission::UploadVideos),
            Self::Document => Some(Permission::UploadDocuments),
            Self::Unclassified => None,
        }
    }
}

/// Lower-cased type/subtype with parameters (`; charset=...`) removed.
pub fn normalize_content_type(raw: &str) -> Option<String> {
    let essence = raw.split(';').next().unwrap_or_default().trim();
    if essence.is_empty() {
        None
    } else {
        Some(essence.to_ascii_lowercase())
    }
}

pub fn can_upload(
    catalog: &PolicyCatalog,
    actor: Option<&Actor>,
    content_type: Option<&str>,
) -> bool {
    reason_codes::is_allow(type_check(catalog, actor, content_type).0)
}

/// Per-role size limit in bytes; 0 when the actor or role is unknown.
pub fn max_size_bytes(catalog: &PolicyCatalog, actor: Option<&Actor>) -> u64 {
    actor
        .and_then(|a| a.role)
        .map_or(0, |role| catalog.upload_limit_bytes(role))
}

/// Combined type and size decision for one upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadVerdict {
    pub allowed: bool,
    pub reason_code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_class: Option<ContentClass>,
    pub max_size_bytes: u64,
}

pub fn evaluate_upload(
    catalog: &PolicyCatalog,
    actor: Option<&Actor>,
    candidate: &UploadCandidate,
) -> UploadVerdict {
    let (mut reason_code, content_class) =
        type_check(catalog, actor, Some(candidate.content_type.as_str()));
    let max_size_bytes = max_size_bytes(catalog, actor);

    if reason_codes::is_allow(reason_code) && candidate.size_bytes > max_size_bytes {
        reason_code = reason_codes::U_TOO_LARGE;
    }

    UploadVerdict {
        allowed: reason_codes::is_allow(reason_code),
        reason_code,
        content_class,
        max_size_bytes,
    }
}

fn type_check(
    catalog: &PolicyCatalog,
    actor: Option<&Actor>,
    content_type: Option<&str>,
) -> (&'static str, Option<ContentClass>) {
    let Some(actor) = actor.filter(|a| a.role.is_some()) else {
        return (reason_codes::U_NO_ACTOR, None);
    };
    let Some(class) = content_type.and_then(ContentClass::classify) else {
        return (reason_codes::U_NO_CONTENT_TYPE, None);
    };
    if !catalog.has_permission(Some(actor), Permission::UploadFiles) {
        return (reason_codes::U_UPLOAD_NOT_PERMITTED, Some(class));
    }
    match class.required_permission() {
        Some(required) if !catalog.has_permission(Some(actor), required) => {
            let code = match class {
                ContentClass::Image => reason_codes::U_IMAGE_NOT_PERMITTED,
                ContentClass::Video => reason_codes::U_VIDEO_NOT_PERMITTED,
                _ => reason_codes::U_DOCUMENT_NOT_PERMITTED,
            };
            (code, Some(class))
        }
        Some(_) => (reason_codes::OK, Some(class)),
        // TODO: gate archives and executables behind their own permission once product signs off
        None => (reason_codes::OK_UNCLASSIFIED, Some(class)),
    }
}
