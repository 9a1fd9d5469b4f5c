use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Property categories offered by the listing form
pub const PROPERTY_TYPES: [&str; 8] = [
    "Single Family Home",
    "Condo/Apartment",
    "Townhouse",
    "Duplex",
    "Triplex",
    "Multi-Family",
    "Commercial",
    "Vacant Land",
];

/// Feature chips offered by the listing form
pub const COMMON_FEATURES: [&str; 15] = [
    "Hardwood Floors",
    "Stainless Steel Appliances",
    "Granite Countertops",
    "Walk-in Closet",
    "Fireplace",
    "Finished Basement",
    "Central Air Conditioning",
    "Heated Garage",
    "Swimming Pool",
    "Deck/Patio",
    "Smart Home Features",
    "Energy Efficient",
    "Updated Kitchen",
    "Ensuite Bathroom",
    "Home Office",
];

/// Conventional lead sources. Lead sources are free text, this is only the usual set.
pub const LEAD_SOURCES: [&str; 7] = [
    "Website",
    "Referral",
    "Zillow",
    "Facebook",
    "Open House",
    "Cold Call",
    "Other",
];

/// Stage of a lead in the sales pipeline
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Proposal,
    Negotiation,
    Closed,
    Lost,
}

impl LeadStatus {
    /// Every status, in pipeline order
    pub const ALL: [LeadStatus; 7] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Proposal,
        LeadStatus::Negotiation,
        LeadStatus::Closed,
        LeadStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Proposal => "proposal",
            LeadStatus::Negotiation => "negotiation",
            LeadStatus::Closed => "closed",
            LeadStatus::Lost => "lost",
        }
    }

    /// Human readable label shown on badges
    pub fn label(&self) -> &'static str {
        match self {
            LeadStatus::New => "New Lead",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::Proposal => "Proposal Sent",
            LeadStatus::Negotiation => "In Negotiation",
            LeadStatus::Closed => "Closed Won",
            LeadStatus::Lost => "Closed Lost",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lead status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for LeadStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Prospective client tracked through the pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: LeadStatus,
    pub source: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
}

impl Lead {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Structured input to the listing composer
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAttributes {
    pub property_type: String,
    pub bedrooms: u32,
    /// Half increments allowed
    pub bathrooms: f64,
    pub sqft: u64,
    pub location: String,
    pub features: Vec<String>,
}

/// One composed description kept in the session history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedListing {
    pub id: String,
    #[serde(flatten)]
    pub attributes: PropertyAttributes,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Profile of the signed-in agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
    pub brokerage: Option<String>,
    pub license_number: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Qualified".parse::<LeadStatus>(), Ok(LeadStatus::Qualified));
        assert_eq!(" lost ".parse::<LeadStatus>(), Ok(LeadStatus::Lost));
        assert!("archived".parse::<LeadStatus>().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&LeadStatus::Negotiation).unwrap();
        assert_eq!(json, "\"negotiation\"");
        assert_eq!(LeadStatus::Proposal.label(), "Proposal Sent");
    }

    #[test]
    fn generated_listing_flattens_attributes() {
        let listing = GeneratedListing {
            id: "abc".to_string(),
            attributes: PropertyAttributes {
                property_type: "Townhouse".to_string(),
                bedrooms: 3,
                bathrooms: 2.5,
                sqft: 1800,
                location: "Leslieville".to_string(),
                features: vec!["Fireplace".to_string()],
            },
            description: "text".to_string(),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["propertyType"], "Townhouse");
        assert_eq!(value["bathrooms"], 2.5);
        assert_eq!(value["features"][0], "Fireplace");
    }
}
