use crate::leads::query::{count_by_status, filter, LeadQuery, StatusCounts};
use crate::models::{Lead, LeadStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// Editable fields of a lead, as entered in the add/edit dialog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub status: LeadStatus,
    pub source: String,
    pub notes: String,
}

impl Default for LeadDraft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            status: LeadStatus::New,
            source: String::new(),
            notes: String::new(),
        }
    }
}

impl LeadDraft {
    /// Prefill the edit dialog from an existing lead
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            first_name: lead.first_name.clone(),
            last_name: lead.last_name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone().unwrap_or_default(),
            status: lead.status,
            source: lead.source.clone(),
            notes: lead.notes.clone().unwrap_or_default(),
        }
    }

    fn optional(value: &str) -> Option<String> {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn apply(&self, lead: &mut Lead) {
        lead.first_name = self.first_name.trim().to_string();
        lead.last_name = self.last_name.trim().to_string();
        lead.email = self.email.trim().to_string();
        lead.phone = Self::optional(&self.phone);
        lead.status = self.status;
        lead.source = self.source.trim().to_string();
        lead.notes = Self::optional(&self.notes);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadError {
    #[error("Email is required")]
    MissingEmail,
}

/// Figures shown on the dashboard cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_leads: usize,
    pub new_leads: usize,
    pub qualified_leads: usize,
    pub total_listings: usize,
}

/// Ordered in-memory lead collection
#[derive(Debug, Clone, Default)]
pub struct LeadBook {
    leads: Vec<Lead>,
}

impl LeadBook {
    pub fn new(leads: Vec<Lead>) -> Self {
        Self { leads }
    }

    /// Book seeded with the sample pipeline
    pub fn sample() -> Self {
        Self::new(sample_leads())
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn get(&self, id: &str) -> Option<&Lead> {
        self.leads.iter().find(|l| l.id == id)
    }

    /// Insert a new lead at the front
    pub fn add(&mut self, draft: &LeadDraft, user_id: &str) -> Result<&Lead, LeadError> {
        if draft.email.trim().is_empty() {
            return Err(LeadError::MissingEmail);
        }

        let now = Utc::now();
        let mut lead = Lead {
            id: Uuid::new_v4().to_string(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: None,
            status: draft.status,
            source: String::new(),
            notes: None,
            created_at: now,
            updated_at: now,
            user_id: user_id.to_string(),
        };
        draft.apply(&mut lead);

        info!("Lead added: {} ({})", lead.full_name(), lead.id);
        self.leads.insert(0, lead);
        Ok(&self.leads[0])
    }

    /// Replace the editable fields of a lead. `Ok(None)` when the id is unknown.
    pub fn edit(&mut self, id: &str, draft: &LeadDraft) -> Result<Option<&Lead>, LeadError> {
        if draft.email.trim().is_empty() {
            return Err(LeadError::MissingEmail);
        }

        let Some(lead) = self.leads.iter_mut().find(|l| l.id == id) else {
            debug!("Edit skipped, no lead with id {}", id);
            return Ok(None);
        };

        draft.apply(lead);
        lead.updated_at = Utc::now();
        info!("Lead updated: {}", lead.id);
        Ok(Some(&*lead))
    }

    /// Remove a lead, returning it when it existed
    pub fn delete(&mut self, id: &str) -> Option<Lead> {
        let pos = self.leads.iter().position(|l| l.id == id)?;
        let lead = self.leads.remove(pos);
        info!("Lead deleted: {} ({})", lead.full_name(), lead.id);
        Some(lead)
    }

    pub fn filter(&self, query: &LeadQuery) -> Vec<&Lead> {
        filter(&self.leads, query)
    }

    pub fn status_counts(&self) -> StatusCounts {
        count_by_status(&self.leads)
    }

    pub fn dashboard_stats(&self, listing_count: usize) -> DashboardStats {
        let counts = self.status_counts();
        DashboardStats {
            total_leads: counts.total,
            new_leads: counts.get(LeadStatus::New),
            qualified_leads: counts.get(LeadStatus::Qualified),
            total_listings: listing_count,
        }
    }
}

fn at(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[allow(clippy::too_many_arguments)]
fn sample_lead(
    id: &str,
    name: (&str, &str),
    email: &str,
    phone: Option<&str>,
    status: LeadStatus,
    source: &str,
    notes: &str,
    created: &str,
    updated: &str,
) -> Lead {
    Lead {
        id: id.to_string(),
        first_name: name.0.to_string(),
        last_name: name.1.to_string(),
        email: email.to_string(),
        phone: phone.map(String::from),
        status,
        source: source.to_string(),
        notes: Some(notes.to_string()),
        created_at: at(created),
        updated_at: at(updated),
        user_id: "user1".to_string(),
    }
}

/// Sample pipeline used until a backend is wired in
pub fn sample_leads() -> Vec<Lead> {
    vec![
        sample_lead(
            "1",
            ("Sarah", "Johnson"),
            "sarah.j@email.com",
            Some("(416) 555-0123"),
            LeadStatus::Qualified,
            "Website",
            "Looking for a 3-bedroom condo in downtown Toronto. Pre-approved for $800k.",
            "2024-02-10T10:00:00Z",
            "2024-02-11T14:30:00Z",
        ),
        sample_lead(
            "2",
            ("Michael", "Chen"),
            "mchen@email.com",
            Some("(647) 555-0987"),
            LeadStatus::New,
            "Referral",
            "Interested in investment properties in Hamilton area.",
            "2024-02-12T09:15:00Z",
            "2024-02-12T09:15:00Z",
        ),
        sample_lead(
            "3",
            ("Emma", "Wilson"),
            "emma.w@email.com",
            Some("(647) 555-0456"),
            LeadStatus::Proposal,
            "Zillow",
            "Viewed 5 properties. Interested in the Oakville listing.",
            "2024-02-08T16:45:00Z",
            "2024-02-11T11:20:00Z",
        ),
        sample_lead(
            "4",
            ("David", "Thompson"),
            "d.thompson@email.com",
            None,
            LeadStatus::Negotiation,
            "Facebook",
            "First-time homebuyer. Budget: $650k. Needs guidance through process.",
            "2024-02-05T13:30:00Z",
            "2024-02-10T09:00:00Z",
        ),
        sample_lead(
            "5",
            ("Jennifer", "Martinez"),
            "j.martinez@email.com",
            Some("(905) 555-0234"),
            LeadStatus::Closed,
            "Open House",
            "Successfully closed on property in Mississauga.",
            "2024-01-15T10:00:00Z",
            "2024-02-01T16:00:00Z",
        ),
    ]
}
