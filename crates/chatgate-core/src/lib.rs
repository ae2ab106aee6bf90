//! Authorization engine for office-scoped, multi-tenant messaging.
//!
//! Answers questions of the form "may this actor do X to Y?" for chat
//! initiation, office scoping, message edits and deletes, uploads and
//! per-conversation rights. Every decision is a pure function of its inputs
//! and an immutable [`PolicyCatalog`], so one engine can be shared across
//! threads without locking.
//!
//! # Quick Start
//!
//! ```
//! use chatgate_core::{Actor, Conversation, PolicyEngine, Role};
//!
//! let engine = PolicyEngine::builtin();
//! let manager = Actor::new("mgr-1", Role::Manager).with_office("O1");
//! let convo = Conversation::new("c1", "O1").with_participants(["lead-1", "cons-1"]);
//!
//! let decision = engine.conversation_permissions(&manager, &convo);
//! assert!(decision.can_view);
//! assert!(!decision.can_send_messages);
//! ```
//!
//! # Failing closed
//!
//! Missing actors, unknown roles, absent timestamps and empty office ids all
//! resolve to the most restrictive answer. Nothing in this crate panics on
//! malformed input.

pub mod api;
pub mod catalog;
pub mod config;
pub mod conversation;
pub mod decision;
pub mod eligibility;
pub mod engine;
pub mod errors;
pub mod model;
pub mod mutability;
pub mod permission;
pub mod resource;
pub mod role;
pub mod scope;
pub mod targets;
pub mod visibility;

pub use catalog::PolicyCatalog;
pub use config::PolicyConfig;
pub use conversation::PermissionDecision;
pub use decision::reason_codes;
pub use engine::PolicyEngine;
pub use errors::CatalogError;
pub use model::{Actor, Conversation, Message, MessageKind, UploadCandidate};
pub use mutability::{MessagePermissions, MutabilityOptions};
pub use permission::{Permission, PermissionGroup};
pub use resource::{ContentClass, UploadVerdict};
pub use role::Role;
pub use targets::CreationVerdict;
