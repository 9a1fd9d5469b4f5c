//! Real-estate agent desk: lead pipeline, listing descriptions and agent sign-in.

pub mod auth;
pub mod config;
pub mod format;
pub mod leads;
pub mod listing;
pub mod models;
pub mod settings;
