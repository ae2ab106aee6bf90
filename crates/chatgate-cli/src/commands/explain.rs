//! CLI command: chatgate explain
//!
//! Evaluate a single decision request against a policy and show the result.
//!
//! Usage:
//!   chatgate explain --request request.json [--policy policy.yaml] [--now 2024-05-01T12:00:00Z]
//!
//! The request names the acting user and exactly one question:
//!
//! ```json
//! { "actor": { "id": "u1", "role": "consultant", "office_id": "O1" },
//!   "message": { "id": "m1", "sender_id": "u1", "created_at": "2024-05-01T11:50:00Z" } }
//! ```
//!
//! Question fields: `message`, `conversation`, `upload`, `targets`,
//! `chat_with`, `office_id`.

use super::{load_engine, report_catalog_error};
use crate::args::{ExplainArgs, OutputFormat};
use crate::exit_codes;
use anyhow::{bail, Context, Result};
use chatgate_core::{
    Actor, Conversation, Message, MutabilityOptions, PolicyEngine, UploadCandidate,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExplainRequest {
    #[serde(default)]
    actor: Option<Actor>,
    #[serde(default)]
    message: Option<Message>,
    #[serde(default, alias = "message_edit_window_ms")]
    time_limit_ms: Option<i64>,
    #[serde(default)]
    conversation: Option<Conversation>,
    #[serde(default)]
    upload: Option<UploadCandidate>,
    #[serde(default)]
    targets: Option<Vec<Actor>>,
    #[serde(default)]
    chat_with: Option<Actor>,
    #[serde(default, alias = "officeId")]
    office_id: Option<String>,
}

enum Question<'r> {
    Message(&'r Message),
    Conversation(&'r Conversation),
    Upload(&'r UploadCandidate),
    Targets(&'r [Actor]),
    ChatWith(&'r Actor),
    Office(&'r str),
}

impl ExplainRequest {
    fn question(&self) -> Result<Question<'_>> {
        let mut found = Vec::new();
        if let Some(m) = &self.message {
            found.push(Question::Message(m));
        }
        if let Some(c) = &self.conversation {
            found.push(Question::Conversation(c));
        }
        if let Some(u) = &self.upload {
            found.push(Question::Upload(u));
        }
        if let Some(t) = &self.targets {
            found.push(Question::Targets(t));
        }
        if let Some(a) = &self.chat_with {
            found.push(Question::ChatWith(a));
        }
        if let Some(o) = &self.office_id {
            found.push(Question::Office(o));
        }
        match found.len() {
            1 => Ok(found.remove(0)),
            0 => bail!("request has no question (message, conversation, upload, targets, chat_with, office_id)"),
            n => bail!("request asks {n} questions; exactly one is allowed"),
        }
    }
}

#[derive(Debug, Serialize)]
struct Explanation {
    question: &'static str,
    actor_id: Option<String>,
    allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason_code: Option<&'static str>,
    decision: Value,
}

pub fn run(args: ExplainArgs) -> Result<i32> {
    let engine = match load_engine(args.policy.as_deref()) {
        Ok(engine) => engine,
        Err(e) => return Ok(report_catalog_error(args.policy.as_deref(), &e)),
    };

    let content = std::fs::read_to_string(&args.request)
        .with_context(|| format!("Failed to read request: {}", args.request.display()))?;
    let request: ExplainRequest = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse request: {}", args.request.display()))?;
    let now = parse_now(args.now.as_deref())?;

    let explanation = evaluate(&engine, &request, now)?;
    tracing::debug!(
        question = explanation.question,
        allowed = explanation.allowed,
        "explained request"
    );

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&explanation)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&explanation)?),
        OutputFormat::Text => println!("{}", render_text(&explanation)),
    }

    Ok(if explanation.allowed {
        exit_codes::SUCCESS
    } else {
        exit_codes::DENIED
    })
}

fn parse_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => Ok(DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("--now is not an RFC 3339 timestamp: {raw}"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn evaluate(
    engine: &PolicyEngine,
    request: &ExplainRequest,
    now: DateTime<Utc>,
) -> Result<Explanation> {
    let actor = request.actor.as_ref();
    let explained = |question, allowed, reason_code, decision| Explanation {
        question,
        actor_id: actor.map(|a| a.id.clone()),
        allowed,
        reason_code,
        decision,
    };

    Ok(match request.question()? {
        Question::Message(message) => {
            let options = request.time_limit_ms.map(MutabilityOptions::with_time_limit_ms);
            let perms = engine.message_permissions(actor, message, options.as_ref(), now);
            explained(
                "message",
                perms.can_edit || perms.can_delete,
                None,
                serde_json::to_value(perms)?,
            )
        }
        Question::Conversation(conversation) => {
            let decision = engine.conversation_permissions(actor, conversation);
            explained(
                "conversation",
                decision.can_view,
                None,
                serde_json::to_value(decision)?,
            )
        }
        Question::Upload(candidate) => {
            let verdict = engine.evaluate_upload(actor, candidate);
            explained(
                "upload",
                verdict.allowed,
                Some(verdict.reason_code),
                serde_json::to_value(&verdict)?,
            )
        }
        Question::Targets(targets) => {
            let verdict = engine.evaluate_creation(actor, targets);
            explained(
                "create_conversation",
                verdict.allowed,
                Some(verdict.reason_code),
                serde_json::to_value(&verdict)?,
            )
        }
        Question::ChatWith(other) => {
            let allowed = engine.can_chat_with(actor, other);
            explained(
                "chat_with",
                allowed,
                None,
                serde_json::json!({ "to": other.id, "can_initiate": allowed }),
            )
        }
        Question::Office(office_id) => {
            let allowed = engine.can_access_office(actor, office_id);
            explained(
                "office",
                allowed,
                None,
                serde_json::json!({ "office_id": office_id, "can_access": allowed }),
            )
        }
    })
}

fn render_text(explanation: &Explanation) -> String {
    let verdict = if explanation.allowed { "ALLOW" } else { "DENY" };
    let mut lines = vec![format!(
        "{verdict} {} (actor: {})",
        explanation.question,
        explanation.actor_id.as_deref().unwrap_or("<none>")
    )];
    if let Some(code) = explanation.reason_code {
        lines.push(format!("  reason: {code}"));
    }
    if let Value::Object(fields) = &explanation.decision {
        for (name, value) in fields {
            lines.push(format!("  {name}: {value}"));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> ExplainRequest {
        serde_json::from_str(json).unwrap()
    }

    fn now() -> DateTime<Utc> {
        parse_now(Some("2024-05-01T12:00:00Z")).unwrap()
    }

    #[test]
    fn message_question_uses_now() {
        let req = request(
            r#"{"actor": {"id": "u1", "role": "consultant"},
                "message": {"id": "m1", "sender_id": "u1", "created_at": "2024-05-01T11:50:00Z"}}"#,
        );
        let out = evaluate(&PolicyEngine::builtin(), &req, now()).unwrap();
        assert_eq!(out.question, "message");
        assert!(out.allowed);
        assert_eq!(out.decision["can_edit"], true);
    }

    #[test]
    fn upload_question_carries_reason_code() {
        let req = request(
            r#"{"actor": {"id": "u1", "role": "lead"},
                "upload": {"content_type": "video/mp4", "size_bytes": 10}}"#,
        );
        let out = evaluate(&PolicyEngine::builtin(), &req, now()).unwrap();
        assert!(!out.allowed);
        assert_eq!(out.reason_code, Some("U_VIDEO_NOT_PERMITTED"));
    }

    #[test]
    fn exactly_one_question_is_required() {
        let none = request(r#"{"actor": {"id": "u1", "role": "lead"}}"#);
        assert!(evaluate(&PolicyEngine::builtin(), &none, now()).is_err());

        let two = request(
            r#"{"actor": {"id": "u1", "role": "lead"}, "office_id": "O1",
                "chat_with": {"id": "u2", "role": "consultant"}}"#,
        );
        let err = evaluate(&PolicyEngine::builtin(), &two, now()).unwrap_err();
        assert!(err.to_string().contains("2 questions"));
    }

    #[test]
    fn missing_actor_denies() {
        let req = request(r#"{"office_id": "O1"}"#);
        let out = evaluate(&PolicyEngine::builtin(), &req, now()).unwrap();
        assert!(!out.allowed);
        assert!(render_text(&out).starts_with("DENY office (actor: <none>)"));
    }

    #[test]
    fn bad_now_is_rejected() {
        assert!(parse_now(Some("noon")).is_err());
    }
}
