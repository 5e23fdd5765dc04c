//! Core types for the lead management app.
//!
//! This crate defines the wire-format data structures exchanged with the
//! REST backend, plus the pure view logic (aggregation, filtering, tag
//! toggling, role capabilities) shared by the frontend pages.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a lead.
///
/// Serialized as the plain variant name ("New", "Contacted", ...), which is
/// what the backend stores and the filter bar matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Lost,
    Won,
}

impl LeadStatus {
    /// All statuses, in dashboard display order.
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Lost,
        LeadStatus::Won,
    ];

    /// Wire/display name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::Lost => "Lost",
            LeadStatus::Won => "Won",
        }
    }

    /// Parse a wire/display name back into a status.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

/// User role, gating which actions the UI renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    SubAdmin,
    SupportAgent,
}

/// A privileged action a role may or may not perform.
///
/// The single place the client asks "may this user do X"; the backend
/// enforces the same checks authoritatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Delete a lead from the list view.
    DeleteLead,
    /// Create, edit, delete users and inspect their activity logs.
    ManageUsers,
    /// Assign a lead to a support agent.
    AssignLead,
}

impl Role {
    /// Whether this role is allowed to perform `capability`.
    pub fn can(self, capability: Capability) -> bool {
        match capability {
            Capability::DeleteLead | Capability::ManageUsers | Capability::AssignLead => {
                matches!(self, Role::SuperAdmin | Role::SubAdmin)
            }
        }
    }

    /// Display label, e.g. "SUPER ADMIN".
    pub fn label(self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER ADMIN",
            Role::SubAdmin => "SUB ADMIN",
            Role::SupportAgent => "SUPPORT AGENT",
        }
    }
}

/// A note embedded in a lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A user-defined label attachable to many leads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// A tag reference on a lead.
///
/// The list endpoint populates tag relations into full objects while the
/// detail endpoint returns bare id strings, so both shapes must deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagRef {
    Id(String),
    Populated(Tag),
}

impl TagRef {
    /// The referenced tag id, regardless of population.
    pub fn id(&self) -> &str {
        match self {
            TagRef::Id(id) => id,
            TagRef::Populated(tag) => &tag.id,
        }
    }

    /// The tag name, if the reference was populated.
    pub fn name(&self) -> Option<&str> {
        match self {
            TagRef::Id(_) => None,
            TagRef::Populated(tag) => Some(&tag.name),
        }
    }
}

/// Minimal user projection populated into a lead's `assignedTo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// An assigned-user reference on a lead, populated or bare (see [`TagRef`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssigneeRef {
    Id(String),
    Populated(Assignee),
}

impl AssigneeRef {
    pub fn id(&self) -> &str {
        match self {
            AssigneeRef::Id(id) => id,
            AssigneeRef::Populated(user) => &user.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            AssigneeRef::Id(_) => None,
            AssigneeRef::Populated(user) => Some(&user.name),
        }
    }
}

/// A sales/contact record tracked through a status lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub source: String,
    pub status: LeadStatus,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub assigned_to: Option<AssigneeRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Ids of every tag attached to this lead.
    pub fn tag_ids(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.id().to_string()).collect()
    }

    /// Names of the populated tags, for table display.
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().filter_map(TagRef::name).collect()
    }

    /// Name of the assigned user, when populated.
    pub fn assignee_name(&self) -> Option<&str> {
        self.assigned_to.as_ref().and_then(AssigneeRef::name)
    }
}

/// An application user. The password is write-only and never sent back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// One entry of a user's activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

/// Body for `POST /api/leads` and `PUT /api/leads/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub source: String,
    pub status: LeadStatus,
    pub tags: Vec<String>,
    pub assigned_to: Option<String>,
}

/// Body for `POST /api/leads/:id/notes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotePayload {
    pub content: String,
}

/// Body for `POST /api/tags`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagPayload {
    pub name: String,
}

/// Body for `POST`/`DELETE /api/leads/:id/tags`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagTogglePayload {
    pub tag_id: String,
}

/// Body for `POST /api/auth/register` and `PUT /api/users/:id`.
///
/// `password` is required on create; `None` on edit means "leave unchanged"
/// and is omitted from the serialized body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
}

/// Body for `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Successful login response: bearer token plus the user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Error body returned by the backend on failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Count leads per status in a single pass.
///
/// Returns `(status, count)` pairs in [`LeadStatus::ALL`] order, omitting
/// statuses with no leads.
pub fn status_counts(leads: &[Lead]) -> Vec<(LeadStatus, usize)> {
    let mut counts = [0usize; LeadStatus::ALL.len()];
    for lead in leads {
        counts[lead.status as usize] += 1;
    }
    LeadStatus::ALL
        .into_iter()
        .zip(counts)
        .filter(|&(_, count)| count > 0)
        .collect()
}

/// The five most recently updated leads, most recent first.
///
/// Ties keep the original collection order (stable sort). Collections with
/// fewer than five leads are returned whole.
pub fn recent_activity(leads: &[Lead]) -> Vec<Lead> {
    let mut sorted = leads.to_vec();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sorted.truncate(5);
    sorted
}

/// Client-side filter state for the lead list.
///
/// Empty strings mean "filter inactive"; active predicates combine as a
/// conjunction. Date bounds are inclusive on the lead's creation date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadFilters {
    pub status: String,
    pub tag: String,
    pub search: String,
    pub start_date: String,
    pub end_date: String,
}

impl LeadFilters {
    /// Whether `lead` satisfies every active predicate.
    pub fn matches(&self, lead: &Lead) -> bool {
        if !self.status.is_empty() && lead.status.as_str() != self.status {
            return false;
        }

        if !self.tag.is_empty() && !lead.tags.iter().any(|t| t.id() == self.tag) {
            return false;
        }

        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let phone_hit = lead
                .phone
                .as_deref()
                .map_or(false, |p| p.to_lowercase().contains(&needle));
            if !lead.name.to_lowercase().contains(&needle)
                && !lead.email.to_lowercase().contains(&needle)
                && !phone_hit
            {
                return false;
            }
        }

        // Unparseable (including empty) dates deactivate the bound.
        if let Ok(start) = NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d") {
            if lead.created_at.date_naive() < start {
                return false;
            }
        }
        if let Ok(end) = NaiveDate::parse_from_str(&self.end_date, "%Y-%m-%d") {
            if lead.created_at.date_naive() > end {
                return false;
            }
        }

        true
    }
}

/// Toggle `tag_id` in a lead's tag-id set.
///
/// Returns `true` if the tag was added, `false` if removed. Applying the
/// toggle twice restores the original set.
pub fn toggle_tag(tag_ids: &mut Vec<String>, tag_id: &str) -> bool {
    if let Some(pos) = tag_ids.iter().position(|t| t == tag_id) {
        tag_ids.remove(pos);
        false
    } else {
        tag_ids.push(tag_id.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn lead(id: &str, status: LeadStatus, created: i64, updated: i64) -> Lead {
        Lead {
            id: id.to_string(),
            name: format!("Lead {id}"),
            email: format!("{id}@example.com"),
            phone: None,
            source: "web".to_string(),
            status,
            tags: Vec::new(),
            notes: Vec::new(),
            assigned_to: None,
            created_at: ts(created),
            updated_at: ts(updated),
        }
    }

    #[test]
    fn test_status_counts_sum_to_total() {
        let leads = vec![
            lead("a", LeadStatus::New, 0, 0),
            lead("b", LeadStatus::New, 0, 0),
            lead("c", LeadStatus::Qualified, 0, 0),
            lead("d", LeadStatus::Won, 0, 0),
            lead("e", LeadStatus::Lost, 0, 0),
        ];

        let counts = status_counts(&leads);
        let total: usize = counts.iter().map(|&(_, n)| n).sum();

        assert_eq!(total, leads.len());
    }

    #[test]
    fn test_status_counts_two_lead_scenario() {
        let leads = vec![
            lead("a", LeadStatus::New, 0, 100),
            lead("b", LeadStatus::Won, 0, 200),
        ];

        let counts = status_counts(&leads);

        assert_eq!(
            counts,
            vec![(LeadStatus::New, 1), (LeadStatus::Won, 1)]
        );
    }

    #[test]
    fn test_status_counts_omits_empty_statuses() {
        let leads = vec![lead("a", LeadStatus::Contacted, 0, 0)];

        let counts = status_counts(&leads);

        assert_eq!(counts, vec![(LeadStatus::Contacted, 1)]);
    }

    #[test]
    fn test_recent_activity_orders_by_updated_descending() {
        let leads = vec![
            lead("a", LeadStatus::New, 0, 100),
            lead("b", LeadStatus::Won, 0, 200),
        ];

        let recent = recent_activity(&leads);

        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, "b");
        assert_eq!(recent[1].id, "a");
    }

    #[test]
    fn test_recent_activity_takes_five_with_stable_ties() {
        let mut leads: Vec<Lead> = (0..4)
            .map(|i| lead(&format!("tie{i}"), LeadStatus::New, 0, 50))
            .collect();
        leads.push(lead("newest", LeadStatus::Won, 0, 900));
        leads.push(lead("tie4", LeadStatus::New, 0, 50));

        let recent = recent_activity(&leads);

        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].id, "newest");
        // Equal timestamps keep their original collection order.
        assert_eq!(recent[1].id, "tie0");
        assert_eq!(recent[2].id, "tie1");
        assert_eq!(recent[3].id, "tie2");
        assert_eq!(recent[4].id, "tie3");
    }

    #[test]
    fn test_filters_status_only_scenario() {
        let statuses = [
            LeadStatus::New,
            LeadStatus::Qualified,
            LeadStatus::Contacted,
            LeadStatus::Qualified,
            LeadStatus::Won,
            LeadStatus::Lost,
            LeadStatus::Qualified,
            LeadStatus::New,
            LeadStatus::Won,
            LeadStatus::Contacted,
        ];
        let leads: Vec<Lead> = statuses
            .iter()
            .enumerate()
            .map(|(i, &s)| lead(&format!("l{i}"), s, 0, 0))
            .collect();

        let filters = LeadFilters {
            status: "Qualified".to_string(),
            ..LeadFilters::default()
        };
        let matched: Vec<&Lead> = leads.iter().filter(|l| filters.matches(l)).collect();

        assert_eq!(matched.len(), 3);
        assert!(matched.iter().all(|l| l.status == LeadStatus::Qualified));
    }

    #[test]
    fn test_filters_are_a_conjunction() {
        let mut a = lead("a", LeadStatus::New, 0, 0);
        a.tags = vec![TagRef::Id("t1".to_string())];
        let mut b = lead("b", LeadStatus::New, 0, 0);
        b.tags = vec![TagRef::Id("t2".to_string())];
        let c = lead("c", LeadStatus::Won, 0, 0);

        let filters = LeadFilters {
            status: "New".to_string(),
            tag: "t1".to_string(),
            ..LeadFilters::default()
        };
        let leads = vec![a, b, c];
        let matched: Vec<&Lead> = leads.iter().filter(|l| filters.matches(l)).collect();

        // Only the lead satisfying BOTH predicates survives.
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "a");
    }

    #[test]
    fn test_filter_search_is_case_insensitive_over_fields() {
        let mut target = lead("a", LeadStatus::New, 0, 0);
        target.name = "Ada Lovelace".to_string();
        target.email = "ada@analytical.example".to_string();
        target.phone = Some("555-0100".to_string());
        let other = lead("b", LeadStatus::New, 0, 0);

        let leads = vec![target, other];
        for needle in ["ADA", "analytical", "555-01"] {
            let filters = LeadFilters {
                search: needle.to_string(),
                ..LeadFilters::default()
            };
            let matched: Vec<&Lead> = leads.iter().filter(|l| filters.matches(l)).collect();
            assert_eq!(matched.len(), 1, "needle {needle:?}");
            assert_eq!(matched[0].id, "a");
        }
    }

    #[test]
    fn test_filter_date_bounds_are_inclusive() {
        // 2021-01-01, 2021-01-02, 2021-01-03
        let leads = vec![
            lead("a", LeadStatus::New, 1_609_459_200, 0),
            lead("b", LeadStatus::New, 1_609_545_600, 0),
            lead("c", LeadStatus::New, 1_609_632_000, 0),
        ];

        let filters = LeadFilters {
            start_date: "2021-01-01".to_string(),
            end_date: "2021-01-02".to_string(),
            ..LeadFilters::default()
        };
        let matched: Vec<&Lead> = leads.iter().filter(|l| filters.matches(l)).collect();

        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].id, "a");
        assert_eq!(matched[1].id, "b");
    }

    #[test]
    fn test_filter_output_is_subset_of_input() {
        let leads = vec![
            lead("a", LeadStatus::New, 0, 0),
            lead("b", LeadStatus::Won, 0, 0),
        ];
        let filters = LeadFilters {
            search: "example".to_string(),
            ..LeadFilters::default()
        };

        let matched: Vec<&Lead> = leads.iter().filter(|l| filters.matches(l)).collect();

        assert!(matched.iter().all(|m| leads.iter().any(|l| l.id == m.id)));
    }

    #[test]
    fn test_toggle_tag_adds_absent_and_removes_present() {
        let mut tags = vec!["t1".to_string()];

        assert!(toggle_tag(&mut tags, "t2"));
        assert_eq!(tags, vec!["t1".to_string(), "t2".to_string()]);

        assert!(!toggle_tag(&mut tags, "t1"));
        assert_eq!(tags, vec!["t2".to_string()]);
    }

    #[test]
    fn test_toggle_tag_twice_restores_set() {
        let original = vec!["t1".to_string(), "t2".to_string()];
        let mut tags = original.clone();

        toggle_tag(&mut tags, "t3");
        toggle_tag(&mut tags, "t3");

        assert_eq!(tags, original);
    }

    #[test]
    fn test_role_capabilities() {
        for cap in [
            Capability::DeleteLead,
            Capability::ManageUsers,
            Capability::AssignLead,
        ] {
            assert!(Role::SuperAdmin.can(cap));
            assert!(Role::SubAdmin.can(cap));
            assert!(!Role::SupportAgent.can(cap));
        }
    }

    #[test]
    fn test_role_wire_format() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"super_admin\"");

        let parsed: Role = serde_json::from_str("\"support_agent\"").unwrap();
        assert_eq!(parsed, Role::SupportAgent);
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&LeadStatus::Qualified).unwrap();
        assert_eq!(json, "\"Qualified\"");
        assert_eq!(LeadStatus::parse("Won"), Some(LeadStatus::Won));
        assert_eq!(LeadStatus::parse("bogus"), None);
    }

    #[test]
    fn test_lead_deserializes_populated_relations() {
        let json = r#"{
            "_id": "l1",
            "name": "Acme",
            "email": "info@acme.example",
            "phone": "555-0199",
            "source": "referral",
            "status": "Contacted",
            "tags": [{"_id": "t1", "name": "hot"}],
            "notes": [{"content": "called", "createdAt": "2021-01-01T00:00:00Z"}],
            "assignedTo": {"_id": "u1", "name": "Agent Smith"},
            "createdAt": "2021-01-01T00:00:00Z",
            "updatedAt": "2021-01-02T00:00:00Z"
        }"#;

        let parsed: Lead = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.tag_ids(), vec!["t1".to_string()]);
        assert_eq!(parsed.tag_names(), vec!["hot"]);
        assert_eq!(parsed.assignee_name(), Some("Agent Smith"));
    }

    #[test]
    fn test_lead_deserializes_bare_relations() {
        let json = r#"{
            "_id": "l1",
            "name": "Acme",
            "email": "info@acme.example",
            "status": "New",
            "tags": ["t1", "t2"],
            "assignedTo": "u1",
            "createdAt": "2021-01-01T00:00:00Z",
            "updatedAt": "2021-01-02T00:00:00Z"
        }"#;

        let parsed: Lead = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.tag_ids(), vec!["t1".to_string(), "t2".to_string()]);
        assert!(parsed.tag_names().is_empty());
        assert_eq!(
            parsed.assigned_to.as_ref().map(|a| a.id()),
            Some("u1")
        );
    }

    #[test]
    fn test_user_payload_omits_blank_password() {
        let payload = UserPayload {
            name: "A".to_string(),
            email: "a@example.com".to_string(),
            password: None,
            role: Role::SupportAgent,
        };

        let json = serde_json::to_string(&payload).unwrap();

        assert!(!json.contains("password"));
    }

    #[test]
    fn test_lead_payload_wire_field_names() {
        let payload = LeadPayload {
            name: "Acme".to_string(),
            email: "info@acme.example".to_string(),
            phone: None,
            source: "web".to_string(),
            status: LeadStatus::New,
            tags: vec!["t1".to_string()],
            assigned_to: Some("u1".to_string()),
        };

        let json = serde_json::to_string(&payload).unwrap();

        assert!(json.contains("\"assignedTo\":\"u1\""));
        assert!(json.contains("\"status\":\"New\""));
    }
}
