//! Caller-supplied snapshots: actors, messages, conversations, uploads.
//!
//! The engine never stores or re-fetches these records. Fields that the
//! upstream directory may leave empty or malformed are modelled as `Option`
//! so that every decision can fail closed instead of erroring.

use crate::role::Role;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Someone asking for a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    /// `None` when the directory role is missing or not a known role.
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<Role>,
    /// Owning office (tenant). Ignored for the top role.
    #[serde(default, alias = "officeId")]
    pub office_id: Option<String>,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role: Some(role),
            office_id: None,
        }
    }

    /// Build an actor from raw directory fields. Unknown role names yield
    /// an actor without a role, which every check denies.
    pub fn from_directory(
        id: impl Into<String>,
        role_name: &str,
        office_id: Option<String>,
    ) -> Self {
        let id = id.into();
        let role = match role_name.parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => {
                tracing::debug!(actor_id = %id, error = %e, "directory role not recognized");
                None
            }
        };
        Self {
            id,
            role,
            office_id,
        }
    }

    pub fn with_office(mut self, office_id: impl Into<String>) -> Self {
        self.office_id = Some(office_id.into());
        self
    }

    /// Empty ids never match a sender or participant.
    pub(crate) fn identity(&self) -> Option<&str> {
        if self.id.is_empty() {
            None
        } else {
            Some(self.id.as_str())
        }
    }

    pub(crate) fn office(&self) -> Option<&str> {
        self.office_id.as_deref().filter(|o| !o.is_empty())
    }
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|name| name.parse::<Role>().ok()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Text,
    Image,
    Video,
    Document,
    Other,
}

impl MessageKind {
    /// Message kind implied by an attachment's content type.
    pub fn from_content_type(content_type: &str) -> Self {
        match crate::resource::ContentClass::classify(content_type) {
            Some(crate::resource::ContentClass::Image) => Self::Image,
            Some(crate::resource::ContentClass::Video) => Self::Video,
            Some(crate::resource::ContentClass::Document) => Self::Document,
            Some(crate::resource::ContentClass::Unclassified) | None => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(alias = "senderId")]
    pub sender_id: String,
    /// `None` when the upstream timestamp was missing or unparseable.
    #[serde(default, alias = "createdAt", deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub kind: MessageKind,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        sender_id: impl Into<String>,
        created_at: DateTime<Utc>,
        kind: MessageKind,
    ) -> Self {
        Self {
            id: id.into(),
            sender_id: sender_id.into(),
            created_at: Some(created_at),
            kind,
        }
    }

    pub fn text(
        id: impl Into<String>,
        sender_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::new(id, sender_id, created_at, MessageKind::Text)
    }

    /// Replace the timestamp with one parsed from a raw string.
    pub fn with_raw_created_at(mut self, raw: &str) -> Self {
        self.created_at = parse_timestamp(raw);
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    FractionalMillis(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawTimestamp::deserialize(deserializer)?;
    Ok(match raw {
        RawTimestamp::Millis(ms) => Utc.timestamp_millis_opt(ms).single(),
        RawTimestamp::FractionalMillis(ms) if ms.is_finite() => {
            Utc.timestamp_millis_opt(ms as i64).single()
        }
        RawTimestamp::FractionalMillis(_) => None,
        RawTimestamp::Text(s) => parse_timestamp(&s),
        RawTimestamp::Other(_) => None,
    })
}

/// Parses RFC 3339, or a naive `YYYY-MM-DD[T ]HH:MM:SS[.fff]` read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    /// The single owning office.
    #[serde(alias = "officeId")]
    pub office_id: String,
    #[serde(default)]
    pub participants: BTreeSet<String>,
    #[serde(default)]
    pub archived: bool,
}

impl Conversation {
    pub fn new(id: impl Into<String>, office_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            office_id: office_id.into(),
            participants: BTreeSet::new(),
            archived: false,
        }
    }

    pub fn with_participants<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants
            .extend(participants.into_iter().map(Into::into));
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    pub fn has_participant(&self, actor: &Actor) -> bool {
        actor
            .identity()
            .is_some_and(|id| self.participants.contains(id))
    }
}

/// A file the actor wants to upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCandidate {
    #[serde(alias = "declared_content_type", alias = "declaredContentType")]
    pub content_type: String,
    #[serde(alias = "sizeBytes")]
    pub size_bytes: u64,
}

impl UploadCandidate {
    pub fn new(content_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            content_type: content_type.into(),
            size_bytes,
        }
    }
}
