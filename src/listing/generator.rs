use crate::listing::composer::compose_with;
use crate::listing::types::{ListingError, ListingRequest};
use crate::models::GeneratedListing;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Listing generator holding the session history, newest first
pub struct ListingGenerator {
    delay: Duration,
    rng: StdRng,
    history: Vec<GeneratedListing>,
    current: Option<String>,
    last_request: Option<ListingRequest>,
}

impl ListingGenerator {
    /// Create a generator that pauses `delay` before each composition
    pub fn new(delay: Duration) -> Self {
        Self::with_rng(delay, StdRng::from_entropy())
    }

    /// Create a generator with a caller supplied random source
    pub fn with_rng(delay: Duration, rng: StdRng) -> Self {
        Self {
            delay,
            rng,
            history: Vec::new(),
            current: None,
            last_request: None,
        }
    }

    /// Validate the request, compose a description and record it
    pub async fn generate(&mut self, request: ListingRequest) -> Result<&GeneratedListing, ListingError> {
        let attributes = request.validate()?;

        info!(
            "Generating listing for {} in {}",
            attributes.property_type, attributes.location
        );

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let description = compose_with(&attributes, &mut self.rng);
        let listing = GeneratedListing {
            id: Uuid::new_v4().to_string(),
            attributes,
            description,
            created_at: Utc::now(),
        };

        debug!("Listing {} composed ({} chars)", listing.id, listing.description.len());

        self.current = Some(listing.id.clone());
        self.last_request = Some(request);
        self.history.insert(0, listing);

        Ok(&self.history[0])
    }

    /// Run the most recent request again. `None` when nothing was generated yet.
    pub async fn regenerate(&mut self) -> Option<Result<&GeneratedListing, ListingError>> {
        let request = self.last_request.clone()?;
        Some(self.generate(request).await)
    }

    pub fn history(&self) -> &[GeneratedListing] {
        &self.history
    }

    /// Listing currently shown in the preview
    pub fn current(&self) -> Option<&GeneratedListing> {
        let id = self.current.as_deref()?;
        self.history.iter().find(|l| l.id == id)
    }

    /// Select a history entry and return a form prefilled with its attributes
    pub fn load(&mut self, id: &str) -> Option<ListingRequest> {
        let listing = self.history.iter().find(|l| l.id == id)?;
        let request = ListingRequest::from_attributes(&listing.attributes);
        self.current = Some(listing.id.clone());
        Some(request)
    }
}
