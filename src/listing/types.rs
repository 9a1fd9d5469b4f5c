use crate::models::PropertyAttributes;
use serde::{Deserialize, Serialize};

/// Form input for a generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRequest {
    pub property_type: String,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub sqft: u64,
    pub location: String,
    /// Features picked from the common set
    pub selected_features: Vec<String>,
    /// Free text, comma separated
    pub custom_features: String,
}

impl Default for ListingRequest {
    fn default() -> Self {
        Self {
            property_type: String::new(),
            bedrooms: 3,
            bathrooms: 2.0,
            sqft: 2000,
            location: String::new(),
            selected_features: Vec::new(),
            custom_features: String::new(),
        }
    }
}

impl ListingRequest {
    /// Refill a form from a history entry
    pub fn from_attributes(attrs: &PropertyAttributes) -> Self {
        Self {
            property_type: attrs.property_type.clone(),
            bedrooms: attrs.bedrooms,
            bathrooms: attrs.bathrooms,
            sqft: attrs.sqft,
            location: attrs.location.clone(),
            selected_features: attrs.features.clone(),
            custom_features: String::new(),
        }
    }

    /// Add or remove a feature from the selection
    pub fn toggle_feature(&mut self, feature: &str) {
        if let Some(pos) = self.selected_features.iter().position(|f| f == feature) {
            self.selected_features.remove(pos);
        } else {
            self.selected_features.push(feature.to_string());
        }
    }

    /// Check required fields and merge the feature lists
    pub fn validate(&self) -> Result<PropertyAttributes, ListingError> {
        if self.property_type.trim().is_empty() {
            return Err(ListingError::MissingPropertyType);
        }
        if self.location.trim().is_empty() {
            return Err(ListingError::MissingLocation);
        }

        let mut features = self.selected_features.clone();
        features.extend(
            self.custom_features
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(String::from),
        );

        Ok(PropertyAttributes {
            property_type: self.property_type.clone(),
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            sqft: self.sqft,
            location: self.location.clone(),
            features,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingError {
    #[error("Please select a property type")]
    MissingPropertyType,
    #[error("Please enter a location")]
    MissingLocation,
}
