//! Types for wrangled tickets and their comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The lifecycle status of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// The ticket is open and awaiting work.
    Open,
    /// The ticket is on hold.
    Hold,
    /// The ticket is pending a customer response.
    Pending,
    /// The ticket has been solved.
    Solved,
    /// The ticket is closed and immutable.
    Closed,
}

/// A single comment bound to a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct Comment {
    /// The comment id.
    pub id: u64,

    /// When the comment was created.
    pub created_at: DateTime<Utc>,

    /// The comment text, stripped of markup.
    pub body: String,
}

/// A reshaped ticket with its bound comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct Ticket {
    /// The ticket id.
    pub id: u64,

    /// When the ticket was created.
    pub created_at: DateTime<Utc>,

    /// When the ticket was last updated.
    pub last_updated: DateTime<Utc>,

    /// The ticket's lifecycle status.
    pub status: TicketStatus,

    /// The ticket subject line.
    pub subject: String,

    /// Tags applied to the ticket.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// The resolution outcome, taken from the payload's custom fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,

    /// The ticket kind, taken from the payload's custom fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Comments bound to this ticket.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

/// A custom-field entry in the raw ticket payload.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawField {
    #[allow(dead_code)]
    pub(crate) id: u64,
    pub(crate) value: Option<String>,
}

/// The raw ticket shape as exported from the ticketing API.
///
/// The kind and outcome of a ticket live at fixed positions in the payload's
/// custom-fields array rather than as named fields.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawTicket {
    pub(crate) id: u64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) last_updated: DateTime<Utc>,
    pub(crate) status: TicketStatus,
    pub(crate) subject: String,
    #[serde(default)]
    pub(crate) tags: Vec<String>,
    #[serde(default)]
    pub(crate) fields: Vec<RawField>,
}

/// Position of the ticket kind in the custom-fields array.
const FIELD_KIND: usize = 0;
/// Position of the resolution outcome in the custom-fields array.
const FIELD_OUTCOME: usize = 2;

impl From<RawTicket> for Ticket {
    fn from(raw: RawTicket) -> Self {
        let field_value = |index: usize| {
            raw.fields
                .get(index)
                .and_then(|field| field.value.clone())
        };
        Self {
            id: raw.id,
            created_at: raw.created_at,
            last_updated: raw.last_updated,
            status: raw.status,
            subject: raw.subject.clone(),
            tags: raw.tags.clone(),
            outcome: field_value(FIELD_OUTCOME),
            kind: field_value(FIELD_KIND),
            comments: Vec::new(),
        }
    }
}

/// The raw comment shape as exported from the ticketing API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawComment {
    pub(crate) id: u64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) plain_body: String,
}

impl From<RawComment> for Comment {
    fn from(raw: RawComment) -> Self {
        Self {
            id: raw.id,
            created_at: raw.created_at,
            body: raw.plain_body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reshape_pulls_kind_and_outcome_from_fields() {
        let json = r#"{
            "id": 42,
            "created_at": "2024-03-01T09:30:00Z",
            "last_updated": "2024-03-02T10:00:00Z",
            "status": "solved",
            "subject": "Cannot log in",
            "tags": ["auth"],
            "fields": [
                {"id": 1, "value": "incident"},
                {"id": 2, "value": null},
                {"id": 3, "value": "resolved"}
            ]
        }"#;

        let raw: RawTicket = serde_json::from_str(json).expect("Failed to parse raw ticket");
        let ticket = Ticket::from(raw);

        assert_eq!(ticket.id, 42);
        assert_eq!(ticket.status, TicketStatus::Solved);
        assert_eq!(ticket.kind.as_deref(), Some("incident"));
        assert_eq!(ticket.outcome.as_deref(), Some("resolved"));
        assert!(ticket.comments.is_empty());
    }

    #[test]
    fn test_reshape_with_short_fields_array() {
        let json = r#"{
            "id": 7,
            "created_at": "2024-03-01T09:30:00Z",
            "last_updated": "2024-03-01T09:30:00Z",
            "status": "open",
            "subject": "Printer on fire"
        }"#;

        let raw: RawTicket = serde_json::from_str(json).expect("Failed to parse raw ticket");
        let ticket = Ticket::from(raw);

        assert_eq!(ticket.kind, None);
        assert_eq!(ticket.outcome, None);
        assert!(ticket.tags.is_empty());
    }

    #[test]
    fn test_comment_body_comes_from_plain_body() {
        let json = r#"{
            "id": 99,
            "created_at": "2024-03-01T12:00:00Z",
            "plain_body": "Restarting the router fixed it."
        }"#;

        let raw: RawComment = serde_json::from_str(json).expect("Failed to parse raw comment");
        let comment = Comment::from(raw);

        assert_eq!(comment.id, 99);
        assert_eq!(comment.body, "Restarting the router fixed it.");
    }
}
