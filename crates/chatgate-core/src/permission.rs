//! Capability identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Concern a permission belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionGroup {
    ChatInitiation,
    ConversationManagement,
    MessageManagement,
    FileUpload,
    Monitoring,
    Analytics,
    Settings,
}

/// Atomic capability identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    // Chat initiation
    StartDirectChat,
    StartGroupChat,
    ChatAcrossOffices,

    // Conversation management
    CreateConversations,
    ArchiveConversations,
    DeleteConversations,
    ExportConversations,
    ManageParticipants,

    // Message management
    SendMessages,
    EditOwnMessages,
    DeleteOwnMessages,
    DeleteAnyMessages,
    PinMessages,

    // File upload
    UploadFiles,
    UploadImages,
    UploadVideos,
    UploadDocuments,

    // Monitoring / admin
    MonitorOfficeConversations,
    MonitorAllConversations,
    ManageUsers,
    ManageOffices,

    // Analytics
    ViewOfficeAnalytics,
    ViewGlobalAnalytics,
    ExportAnalytics,

    // Settings
    ManageOwnSettings,
    ManageSystemSettings,
}

impl Permission {
    pub const ALL: [Permission; 26] = [
        Permission::StartDirectChat,
        Permission::StartGroupChat,
        Permission::ChatAcrossOffices,
        Permission::CreateConversations,
        Permission::ArchiveConversations,
        Permission::DeleteConversations,
        Permission::ExportConversations,
        Permission::ManageParticipants,
        Permission::SendMessages,
        Permission::EditOwnMessages,
        Permission::DeleteOwnMessages,
        Permission::DeleteAnyMessages,
        Permission::PinMessages,
        Permission::UploadFiles,
        Permission::UploadImages,
        Permission::UploadVideos,
        Permission::UploadDocuments,
        Permission::MonitorOfficeConversations,
        Permission::MonitorAllConversations,
        Permission::ManageUsers,
        Permission::ManageOffices,
        Permission::ViewOfficeAnalytics,
        Permission::ViewGlobalAnalytics,
        Permission::ExportAnalytics,
        Permission::ManageOwnSettings,
        Permission::ManageSystemSettings,
    ];

    pub fn group(&self) -> PermissionGroup {
        use Permission::*;
        match self {
            StartDirectChat | StartGroupChat | ChatAcrossOffices => PermissionGroup::ChatInitiation,
            CreateConversations | ArchiveConversations | DeleteConversations
            | ExportConversations | ManageParticipants => PermissionGroup::ConversationManagement,
            SendMessages | EditOwnMessages | DeleteOwnMessages | DeleteAnyMessages
            | PinMessages => PermissionGroup::MessageManagement,
            UploadFiles | UploadImages | UploadVideos | UploadDocuments => {
                PermissionGroup::FileUpload
            }
            MonitorOfficeConversations | MonitorAllConversations | ManageUsers
            | ManageOffices => PermissionGroup::Monitoring,
            ViewOfficeAnalytics | ViewGlobalAnalytics | ExportAnalytics => {
                PermissionGroup::Analytics
            }
            ManageOwnSettings | ManageSystemSettings => PermissionGroup::Settings,
        }
    }

    pub fn as_str(&self) -> &'static str {
        use Permission::*;
        match self {
            StartDirectChat => "start_direct_chat",
            StartGroupChat => "start_group_chat",
            ChatAcrossOffices => "chat_across_offices",
            CreateConversations => "create_conversations",
            ArchiveConversations => "archive_conversations",
            DeleteConversations => "delete_conversations",
            ExportConversations => "export_conversations",
            ManageParticipants => "manage_participants",
            SendMessages => "send_messages",
            EditOwnMessages => "edit_own_messages",
            DeleteOwnMessages => "delete_own_messages",
            DeleteAnyMessages => "delete_any_messages",
            PinMessages => "pin_messages",
            UploadFiles => "upload_files",
            UploadImages => "upload_images",
            UploadVideos => "upload_videos",
            UploadDocuments => "upload_documents",
            MonitorOfficeConversations => "monitor_office_conversations",
            MonitorAllConversations => "monitor_all_conversations",
            ManageUsers => "manage_users",
            ManageOffices => "manage_offices",
            ViewOfficeAnalytics => "view_office_analytics",
            ViewGlobalAnalytics => "view_global_analytics",
            ExportAnalytics => "export_analytics",
            ManageOwnSettings => "manage_own_settings",
            ManageSystemSettings => "manage_system_settings",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
