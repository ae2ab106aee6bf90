//! Machine-readable reason codes attached to explained decisions.

/// Reason codes for upload and conversation-creation outcomes.
pub mod reason_codes {
    // Allowed
    pub const OK: &str = "OK";
    /// Allowed through the unclassified content-type fallback.
    pub const OK_UNCLASSIFIED: &str = "OK_UNCLASSIFIED";
    /// Conversation allowed through the single-target lead fallback.
    pub const OK_LEAD_FALLBACK: &str = "OK_LEAD_FALLBACK";

    // Upload denials (U_*)
    pub const U_NO_ACTOR: &str = "U_NO_ACTOR";
    pub const U_NO_CONTENT_TYPE: &str = "U_NO_CONTENT_TYPE";
    pub const U_UPLOAD_NOT_PERMITTED: &str = "U_UPLOAD_NOT_PERMITTED";
    pub const U_IMAGE_NOT_PERMITTED: &str = "U_IMAGE_NOT_PERMITTED";
    pub const U_VIDEO_NOT_PERMITTED: &str = "U_VIDEO_NOT_PERMITTED";
    pub const U_DOCUMENT_NOT_PERMITTED: &str = "U_DOCUMENT_NOT_PERMITTED";
    pub const U_TOO_LARGE: &str = "U_TOO_LARGE";

    // Conversation creation denials (C_*)
    pub const C_NO_ACTOR: &str = "C_NO_ACTOR";
    pub const C_NO_TARGETS: &str = "C_NO_TARGETS";
    pub const C_NOT_PERMITTED: &str = "C_NOT_PERMITTED";
    pub const C_TARGET_NOT_ELIGIBLE: &str = "C_TARGET_NOT_ELIGIBLE";

    pub fn is_allow(code: &str) -> bool {
        code.starts_with("OK")
    }
}
