pub mod book;
pub mod query;

pub use book::{sample_leads, DashboardStats, LeadBook, LeadDraft, LeadError};
pub use query::{count_by_status, filter, LeadQuery, SourceFilter, StatusCounts, StatusFilter};
