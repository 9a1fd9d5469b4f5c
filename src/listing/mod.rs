pub mod composer;
pub mod generator;
pub mod types;

pub use composer::{compose, compose_with, feature_clause, Template};
pub use generator::ListingGenerator;
pub use types::{ListingError, ListingRequest};
