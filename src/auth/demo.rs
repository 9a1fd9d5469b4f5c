use crate::auth::error::AuthError;
use crate::auth::traits::{IdentityProvider, SignUpRequest};
use crate::models::UserProfile;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::info;
use uuid::Uuid;

pub const DEMO_EMAIL: &str = "demo@realtyos.com";
pub const DEMO_PASSWORD: &str = "demo123";

/// Profile of the built-in demo account
pub fn demo_user() -> UserProfile {
    UserProfile {
        id: "demo-user-123".to_string(),
        email: DEMO_EMAIL.to_string(),
        first_name: "Demo".to_string(),
        last_name: "User".to_string(),
        avatar_url: None,
        brokerage: Some("Demo Realty".to_string()),
        license_number: Some("12345".to_string()),
        phone: Some("(416) 555-0123".to_string()),
        created_at: Utc::now(),
    }
}

pub fn is_demo_credentials(email: &str, password: &str) -> bool {
    email == DEMO_EMAIL && password == DEMO_PASSWORD
}

struct Account {
    password: String,
    profile: UserProfile,
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, Account>,
    signed_in: Option<String>,
}

/// In-process provider used when no hosted backend is configured.
/// Starts with the demo account; sign-ups live for the lifetime of the process.
pub struct DemoProvider {
    state: Mutex<State>,
}

impl DemoProvider {
    pub fn new() -> Self {
        let demo = demo_user();
        let mut state = State::default();
        state.accounts.insert(
            demo.email.clone(),
            Account {
                password: DEMO_PASSWORD.to_string(),
                profile: demo,
            },
        );
        Self {
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for DemoProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let mut state = self.lock();
        let valid = state
            .accounts
            .get(email)
            .map_or(false, |account| account.password == password);
        if !valid {
            return Err(AuthError::authentication("Invalid login credentials"));
        }
        state.signed_in = Some(email.to_string());
        Ok(())
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), AuthError> {
        let mut state = self.lock();
        if state.accounts.contains_key(&request.email) {
            return Err(AuthError::authentication("User already registered"));
        }

        let profile = UserProfile {
            id: Uuid::new_v4().to_string(),
            email: request.email.clone(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            avatar_url: None,
            brokerage: None,
            license_number: None,
            phone: None,
            created_at: Utc::now(),
        };
        info!("Registered local account {}", profile.email);

        state.accounts.insert(
            request.email.clone(),
            Account {
                password: request.password.clone(),
                profile,
            },
        );
        state.signed_in = Some(request.email.clone());
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.lock().signed_in = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<UserProfile>, AuthError> {
        let state = self.lock();
        Ok(state
            .signed_in
            .as_ref()
            .and_then(|email| state.accounts.get(email))
            .map(|account| account.profile.clone()))
    }

    fn provider_name(&self) -> &'static str {
        "Demo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_account_signs_in_and_out() {
        let provider = DemoProvider::new();
        assert!(provider.current_user().await.unwrap().is_none());

        provider.sign_in(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        let user = provider.current_user().await.unwrap().unwrap();
        assert_eq!(user.id, "demo-user-123");

        provider.sign_out().await.unwrap();
        assert!(provider.current_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn wrong_password_is_rejected_verbatim() {
        let provider = DemoProvider::new();
        let err = provider.sign_in(DEMO_EMAIL, "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[tokio::test]
    async fn sign_up_opens_a_session_once() {
        let provider = DemoProvider::new();
        let request = SignUpRequest {
            email: "alex@brokerage.ca".to_string(),
            password: "secret".to_string(),
            first_name: "Alex".to_string(),
            last_name: "Roy".to_string(),
        };

        provider.sign_up(&request).await.unwrap();
        let user = provider.current_user().await.unwrap().unwrap();
        assert_eq!(user.first_name, "Alex");

        let err = provider.sign_up(&request).await.unwrap_err();
        assert_eq!(err.to_string(), "User already registered");
    }
}
