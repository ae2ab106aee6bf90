//! Built-in role tables.
//!
//! Every table is an exhaustive `match` on [`Role`], so adding a role fails
//! to compile until each table has a row for it.

use crate::permission::Permission::{self, *};
use crate::role::Role;
use std::collections::BTreeSet;

pub const DEFAULT_EDIT_WINDOW_MS: i64 = 15 * 60 * 1000;
pub const DEFAULT_CLOCK_SKEW_MS: i64 = 30 * 1000;

const MIB: u64 = 1024 * 1024;

const LEAD: &[Permission] = &[
    StartDirectChat,
    SendMessages,
    EditOwnMessages,
    DeleteOwnMessages,
    UploadFiles,
    UploadImages,
    UploadDocuments,
    ManageOwnSettings,
];

const RECEPTIONIST_EXTRA: &[Permission] =
    &[StartGroupChat, CreateConversations, ArchiveConversations];

const CONSULTANT_EXTRA: &[Permission] = &[UploadVideos, PinMessages, ManageParticipants];

const MANAGER_EXTRA: &[Permission] = &[
    DeleteAnyMessages,
    DeleteConversations,
    ExportConversations,
    MonitorOfficeConversations,
    ManageUsers,
    ViewOfficeAnalytics,
    ExportAnalytics,
];

pub fn role_permissions(role: Role) -> BTreeSet<Permission> {
    let layers: &[&[Permission]] = match role {
        Role::Lead => &[LEAD],
        Role::Receptionist => &[LEAD, RECEPTIONIST_EXTRA],
        Role::Consultant => &[LEAD, RECEPTIONIST_EXTRA, CONSULTANT_EXTRA],
        Role::Manager => &[LEAD, RECEPTIONIST_EXTRA, CONSULTANT_EXTRA, MANAGER_EXTRA],
        Role::SuperAdmin => &[&Permission::ALL],
    };
    layers.iter().flat_map(|layer| layer.iter().copied()).collect()
}

/// Roles each role may start a conversation with. Rows are directional.
pub fn chat_targets(role: Role) -> BTreeSet<Role> {
    let targets: &[Role] = match role {
        Role::Lead => &[Role::Receptionist, Role::Consultant],
        Role::Receptionist => &[Role::Receptionist, Role::Consultant, Role::Manager],
        Role::Consultant => &[
            Role::Lead,
            Role::Receptionist,
            Role::Consultant,
            Role::Manager,
        ],
        Role::Manager => &[
            Role::Lead,
            Role::Receptionist,
            Role::Consultant,
            Role::Manager,
            Role::SuperAdmin,
        ],
        Role::SuperAdmin => &Role::ALL,
    };
    targets.iter().copied().collect()
}

pub fn upload_limit_bytes(role: Role) -> u64 {
    match role {
        Role::Lead => 10 * MIB,
        Role::Receptionist => 25 * MIB,
        Role::Consultant => 50 * MIB,
        Role::Manager => 100 * MIB,
        Role::SuperAdmin => 200 * MIB,
    }
}
