//! Shared wire types for rolo-core.
//!
//! These mirror the backend's REST contract. Every derived field (relationship
//! stage, temperature score, extracted meeting facts, the action playbook) is
//! computed server-side and only observed here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─────────────────────────────────────────────────────────────────────────────
// Auth Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Contact Types
// ─────────────────────────────────────────────────────────────────────────────

/// Projection of a contact for list views, derived server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactListItem {
    pub id: i64,
    pub name: Option<String>,
    pub current_company: Option<String>,
    pub current_position: Option<String>,
    pub last_meeting_date: Option<DateTime<Utc>>,
    pub relationship_stage: Option<String>,
    pub temperature_score: Option<f64>,
}

/// Full relationship record, owned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    // Basic identity
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub gender: Option<String>,
    pub age_group: Option<String>,
    pub hometown: Option<String>,
    pub city: Option<String>,
    // Contact channels
    pub phone: Option<String>,
    pub email: Option<String>,
    pub wechat: Option<String>,
    pub linkedin: Option<String>,
    // Education and career
    pub education_school: Option<String>,
    pub education_major: Option<String>,
    pub education_degree: Option<String>,
    pub career_summary: Option<String>,
    pub preferred_contact_method: Option<String>,
    pub preferred_contact_time: Option<String>,
    pub communication_style: Option<String>,
    // Current status
    pub current_company: Option<String>,
    pub current_position: Option<String>,
    pub current_industry: Option<String>,
    pub current_location: Option<String>,
    pub startup_status: Option<String>,
    // Goals, resources, and sentiments
    pub focus_topics: Option<Vec<String>>,
    pub current_projects: Option<Vec<String>>,
    pub short_term_goals: Option<Vec<String>>,
    pub long_term_goals: Option<Vec<String>>,
    pub resource_needs: Option<Vec<String>>,
    pub resource_offers: Option<Vec<String>>,
    pub excitement_points: Option<Vec<String>>,
    pub anxiety_points: Option<Vec<String>>,
    pub sensitive_points: Option<Vec<String>>,
    // Relationship health, computed server-side
    pub last_meeting_date: Option<DateTime<Utc>>,
    pub last_verified_at: Option<DateTime<Utc>>,
    pub relationship_stage: Option<String>,
    pub temperature_score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Meeting Types
// ─────────────────────────────────────────────────────────────────────────────

/// Processing state of a meeting's extraction pipeline.
///
/// A meeting is created from raw text; the backend fills in the structured
/// fields asynchronously and flips the status when done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Processing,
    Completed,
    Failed,
}

/// A single extracted fact with an optional category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyFact {
    pub fact: String,
    pub category: Option<String>,
}

/// A commitment made by either side, with an optional deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commitment {
    pub commitment: String,
    pub deadline: Option<String>,
}

/// Projection of a meeting for timeline and list views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingSummary {
    pub id: i64,
    pub meeting_date: DateTime<Utc>,
    pub location: Option<String>,
    pub scenario: Option<String>,
    pub topics: Option<Vec<String>>,
    pub sentiment: Option<String>,
    pub status: MeetingStatus,
}

/// One dated interaction tied to exactly one contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: i64,
    pub contact_id: i64,
    pub meeting_date: DateTime<Utc>,
    pub location: Option<String>,
    pub scenario: Option<String>,
    pub raw_text: String,
    pub topics: Option<Vec<String>>,
    pub key_facts: Option<Vec<KeyFact>>,
    pub sentiment: Option<String>,
    pub my_commitments: Option<Vec<Commitment>>,
    pub their_commitments: Option<Vec<Commitment>>,
    pub open_loops: Option<Vec<String>>,
    pub next_conversation_hooks: Option<Vec<String>>,
    pub status: MeetingStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Action Playbook Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftCare {
    pub preferences: Option<Vec<String>>,
    pub taboos: Option<Vec<String>>,
    pub gift_occasions: Option<Vec<String>>,
    pub gift_recommendations: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationHooks {
    pub top_topics: Option<Vec<String>>,
    pub open_loops: Option<Vec<String>>,
    pub conversation_questions: Option<Vec<String>>,
    pub conversation_avoid: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaborationMap {
    pub how_i_can_help_them: Option<Vec<String>>,
    pub how_they_can_help_me: Option<Vec<String>>,
    pub exchange_boundaries: Option<Vec<String>>,
    pub contact_rhythm: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipHealth {
    pub relationship_stage: Option<String>,
    pub temperature_score: Option<f64>,
    pub recent_risks: Option<Vec<String>>,
    pub next_action: Option<serde_json::Value>,
}

/// Backend-computed relationship-management hints. Deserialized but never
/// interpreted by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPlaybook {
    pub id: i64,
    pub contact_id: i64,
    pub gift_care: Option<GiftCare>,
    pub conversation_hooks: Option<ConversationHooks>,
    pub collaboration_map: Option<CollaborationMap>,
    pub relationship_health: Option<RelationshipHealth>,
    pub evidence_refs: Option<serde_json::Value>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A contact bundled with its ordered meetings and optional playbook.
///
/// Fetched and replaced as one unit; the store never merges this field by
/// field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactWithTimeline {
    pub contact: Contact,
    pub meetings: Vec<MeetingSummary>,
    pub action_playbook: Option<ActionPlaybook>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Input Types (for creating and updating entities)
// ─────────────────────────────────────────────────────────────────────────────

/// Input for creating a contact. All fields optional; the backend fills in
/// everything else over time from meeting extractions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wechat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_position: Option<String>,
}

/// Partial update for a contact. Only present fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hometown: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wechat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_degree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_contact_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_contact_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communication_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_topics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_projects: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_term_goals: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_term_goals: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_needs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_offers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excitement_points: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anxiety_points: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive_points: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_score: Option<f64>,
}

/// Input for creating a meeting from raw conversation text.
///
/// `contact_name` lets the backend resolve or create the contact when the
/// caller does not know an id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewMeeting {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    pub raw_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
}
