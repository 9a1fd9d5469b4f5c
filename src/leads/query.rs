use crate::models::{Lead, LeadStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Status criterion of a lead query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(LeadStatus),
}

impl FromStr for StatusFilter {
    type Err = crate::models::UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = crate::models::UnknownStatus;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::All => "all".to_string(),
            StatusFilter::Only(status) => status.as_str().to_string(),
        }
    }
}

/// Source criterion of a lead query. Sources are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceFilter {
    #[default]
    All,
    Only(String),
}

impl From<&str> for SourceFilter {
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("all") {
            SourceFilter::All
        } else {
            SourceFilter::Only(s.to_string())
        }
    }
}

impl From<String> for SourceFilter {
    fn from(s: String) -> Self {
        SourceFilter::from(s.as_str())
    }
}

impl From<SourceFilter> for String {
    fn from(filter: SourceFilter) -> Self {
        match filter {
            SourceFilter::All => "all".to_string(),
            SourceFilter::Only(source) => source,
        }
    }
}

/// Search box plus the two dropdown filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadQuery {
    pub search_text: String,
    pub status: StatusFilter,
    pub source: SourceFilter,
}

impl LeadQuery {
    /// True when the lead satisfies all three criteria
    pub fn matches(&self, lead: &Lead) -> bool {
        self.matches_search(lead) && self.matches_status(lead) && self.matches_source(lead)
    }

    fn matches_search(&self, lead: &Lead) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        [&lead.first_name, &lead.last_name, &lead.email]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_status(&self, lead: &Lead) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => lead.status == status,
        }
    }

    fn matches_source(&self, lead: &Lead) -> bool {
        match &self.source {
            SourceFilter::All => true,
            SourceFilter::Only(source) => lead.source == *source,
        }
    }
}

/// Matching leads, in input order
pub fn filter<'a>(leads: &'a [Lead], query: &LeadQuery) -> Vec<&'a Lead> {
    leads.iter().filter(|lead| query.matches(lead)).collect()
}

/// Per-status tally. Statuses with no leads are absent from `by_status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub by_status: BTreeMap<LeadStatus, usize>,
}

impl StatusCounts {
    pub fn get(&self, status: LeadStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

pub fn count_by_status(leads: &[Lead]) -> StatusCounts {
    let mut by_status = BTreeMap::new();
    for lead in leads {
        *by_status.entry(lead.status).or_insert(0) += 1;
    }
    StatusCounts {
        total: leads.len(),
        by_status,
    }
}
