//! Prospect record, its staged draft and the validated insert payload.

use serde::{Deserialize, Serialize};

use super::{LeadSource, ProspectStatus};
use crate::domain::foundation::wire::{empty_as_none, null_as_empty};
use crate::domain::foundation::{ProspectId, Role, ValidationError};

/// A sales lead as held by the record store.
///
/// Prospects are never patched: they are created once and later deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prospect {
    pub id: ProspectId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contact: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub source: Option<LeadSource>,
    #[serde(default)]
    pub status: ProspectStatus,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contact_person: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub position: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub assigned_to: Option<Role>,
}

/// Staged input for a prospect that has not been persisted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProspectDraft {
    pub name: String,
    pub contact: String,
    pub company: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub source: Option<LeadSource>,
    pub status: ProspectStatus,
    pub description: String,
    pub location: String,
    pub contact_person: String,
    pub email: String,
    pub position: String,
    pub phone: String,
}

impl ProspectDraft {
    /// Starts a draft with the given name and defaults elsewhere.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Insert payload for a prospect: a validated draft stamped with its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProspect {
    pub name: String,
    pub contact: String,
    pub company: String,
    pub source: Option<LeadSource>,
    pub status: ProspectStatus,
    pub description: String,
    pub location: String,
    pub contact_person: String,
    pub email: String,
    pub position: String,
    pub phone: String,
    pub assigned_to: Role,
}

impl NewProspect {
    /// Validates a draft and stamps `assigned_to` with the acting role.
    ///
    /// # Errors
    ///
    /// `EmptyField("name")` when the name is blank.
    pub fn from_draft(draft: &ProspectDraft, assigned_to: Role) -> Result<Self, ValidationError> {
        if draft.name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        Ok(Self {
            name: draft.name.clone(),
            contact: draft.contact.clone(),
            company: draft.company.clone(),
            source: draft.source,
            status: draft.status,
            description: draft.description.clone(),
            location: draft.location.clone(),
            contact_person: draft.contact_person.clone(),
            email: draft.email.clone(),
            position: draft.position.clone(),
            phone: draft.phone.clone(),
            assigned_to,
        })
    }

    /// The stored record once the store has assigned an identifier.
    pub fn into_prospect(self, id: ProspectId) -> Prospect {
        Prospect {
            id,
            name: self.name,
            contact: self.contact,
            company: self.company,
            source: self.source,
            status: self.status,
            description: self.description,
            location: self.location,
            contact_person: self.contact_person,
            email: self.email,
            position: self.position,
            phone: self.phone,
            assigned_to: Some(self.assigned_to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::RecordKey;
    use serde_json::json;

    #[test]
    fn default_draft_is_new_with_no_source() {
        let draft = ProspectDraft::default();
        assert_eq!(draft.status, ProspectStatus::New);
        assert_eq!(draft.source, None);
        assert!(draft.name.is_empty());
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = NewProspect::from_draft(&ProspectDraft::named("   "), Role::Marketing).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("name"));
    }

    #[test]
    fn from_draft_stamps_owner_and_keeps_fields() {
        let draft = ProspectDraft {
            name: "Acme".to_string(),
            company: "Acme Corp".to_string(),
            source: Some(LeadSource::Referral),
            status: ProspectStatus::Hot,
            email: "buyer@acme.test".to_string(),
            ..ProspectDraft::default()
        };

        let new = NewProspect::from_draft(&draft, Role::Marketing).unwrap();
        assert_eq!(new.assigned_to, Role::Marketing);
        assert_eq!(new.company, "Acme Corp");
        assert_eq!(new.status, ProspectStatus::Hot);

        let id = ProspectId::new();
        let prospect = new.into_prospect(id);
        assert_eq!(prospect.id, id);
        assert_eq!(prospect.assigned_to, Some(Role::Marketing));
        assert_eq!(prospect.email, "buyer@acme.test");
    }

    #[test]
    fn insert_payload_uses_store_wire_values() {
        let draft = ProspectDraft {
            name: "Acme".to_string(),
            source: Some(LeadSource::Referral),
            ..ProspectDraft::default()
        };
        let payload = serde_json::to_value(NewProspect::from_draft(&draft, Role::Marketing).unwrap()).unwrap();
        assert_eq!(payload["status"], json!("baru"));
        assert_eq!(payload["source"], json!("Referensi"));
        assert_eq!(payload["assigned_to"], json!("marketing"));
        assert!(payload.get("id").is_none());
    }

    #[test]
    fn decodes_store_row_with_empty_and_null_columns() {
        let id = ProspectId::new();
        let row = json!({
            "id": id.to_string(),
            "name": "Acme",
            "contact": null,
            "company": "Acme Corp",
            "source": "",
            "status": "pending",
            "assigned_to": "marketing",
            "created_at": "2024-05-01T10:00:00Z"
        });

        let prospect: Prospect = serde_json::from_value(row).unwrap();
        assert_eq!(prospect.id, id);
        assert_eq!(prospect.contact, "");
        assert_eq!(prospect.source, None);
        assert_eq!(prospect.status, ProspectStatus::Pending);
        assert_eq!(prospect.assigned_to, Some(Role::Marketing));
    }

    #[test]
    fn decodes_row_from_an_integer_identity_table() {
        let row = json!({"id": 1, "name": "Acme", "status": "hot"});

        let prospect: Prospect = serde_json::from_value(row).unwrap();
        assert_eq!(prospect.id.key(), RecordKey::Int(1));
        assert_eq!(prospect.id.to_string(), "1");
    }

    #[test]
    fn draft_accepts_partial_json_body() {
        let draft: ProspectDraft =
            serde_json::from_value(json!({"name": "Acme", "source": "Instagram"})).unwrap();
        assert_eq!(draft.name, "Acme");
        assert_eq!(draft.source, Some(LeadSource::Social));
        assert_eq!(draft.status, ProspectStatus::New);
    }
}
