use crate::auth::error::AuthError;
use crate::models::UserProfile;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Details collected by the sign-up form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Common trait for identity providers.
/// A provider verifies credentials and owns the remote session.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials and open a session
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Register an account and open a session when the provider allows it
    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Profile of the active session, `None` when nobody is signed in
    async fn current_user(&self) -> Result<Option<UserProfile>, AuthError>;

    /// Get the name of the provider
    fn provider_name(&self) -> &'static str;
}
