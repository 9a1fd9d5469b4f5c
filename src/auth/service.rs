use crate::auth::demo::{demo_user, is_demo_credentials};
use crate::auth::error::AuthError;
use crate::auth::session::SessionStore;
use crate::auth::traits::{IdentityProvider, SignUpRequest};
use crate::models::UserProfile;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Tracks the signed-in agent and keeps the session cache in step with it.
///
/// The demo account is accepted locally whatever provider is configured. While a
/// demo session is active, refreshes from the provider leave it untouched.
pub struct AuthService {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn SessionStore>,
    user: watch::Sender<Option<UserProfile>>,
    demo_session: AtomicBool,
}

impl AuthService {
    pub fn new(provider: Arc<dyn IdentityProvider>, store: Arc<dyn SessionStore>) -> Self {
        let (user, _) = watch::channel(None);
        Self {
            provider,
            store,
            user,
            demo_session: AtomicBool::new(false),
        }
    }

    /// Restore the cached profile, then ask the provider for a live session
    pub async fn init(&self) -> Option<UserProfile> {
        match self.store.get() {
            Ok(Some(cached)) => {
                debug!("Restored cached session for {}", cached.email);
                self.demo_session.store(cached.id == demo_user().id, Ordering::SeqCst);
                self.user.send_replace(Some(cached));
            }
            Ok(None) => {}
            Err(e) => warn!("Could not read session cache: {}", e),
        }

        match self.provider.current_user().await {
            Ok(Some(user)) => {
                self.demo_session.store(false, Ordering::SeqCst);
                self.remember(user);
            }
            Ok(None) => {}
            Err(e) => info!("{} provider unavailable, using local session: {}", self.provider.provider_name(), e),
        }

        self.current_user()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        if is_demo_credentials(email, password) {
            info!("Signed in with the demo account");
            let user = demo_user();
            self.demo_session.store(true, Ordering::SeqCst);
            self.remember(user.clone());
            return Ok(user);
        }

        self.provider.sign_in(email, password).await?;
        self.demo_session.store(false, Ordering::SeqCst);
        self.refresh_user().await;
        // A failed refresh leaves whatever was restored before, possibly another account
        let user = self
            .current_user()
            .filter(|user| user.email.eq_ignore_ascii_case(email))
            .ok_or(AuthError::NoSession)?;
        info!("Signed in as {}", user.email);
        Ok(user)
    }

    /// Register and sign in. `NoSession` when the provider holds the account for confirmation.
    pub async fn signup(&self, request: &SignUpRequest) -> Result<UserProfile, AuthError> {
        self.provider.sign_up(request).await?;
        self.demo_session.store(false, Ordering::SeqCst);
        self.refresh_user().await;
        self.current_user().ok_or(AuthError::NoSession)
    }

    /// Drop the local session first; a provider failure is only logged
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.store.clear()?;
        self.demo_session.store(false, Ordering::SeqCst);
        self.user.send_replace(None);

        if let Err(e) = self.provider.sign_out().await {
            warn!("Logout error: {}", e);
        }
        info!("Signed out");
        Ok(())
    }

    /// Pull the profile from the provider. Errors keep the local session.
    pub async fn refresh_user(&self) -> Option<UserProfile> {
        if self.demo_session.load(Ordering::SeqCst) {
            return self.current_user();
        }

        match self.provider.current_user().await {
            Ok(Some(user)) => self.remember(user),
            Ok(None) => {
                self.user.send_replace(None);
            }
            Err(e) => warn!("Error fetching user: {}", e),
        }
        self.current_user()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.user.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.borrow().is_some()
    }

    /// Receiver notified on every sign-in, refresh and sign-out
    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.user.subscribe()
    }

    fn remember(&self, user: UserProfile) {
        if let Err(e) = self.store.set(&user) {
            warn!("Could not cache session: {}", e);
        }
        self.user.send_replace(Some(user));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::demo::{DemoProvider, DEMO_EMAIL, DEMO_PASSWORD};
    use crate::auth::session::MemorySessionStore;
    use async_trait::async_trait;
    use chrono::Utc;

    fn profile(id: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            email: format!("{id}@brokerage.ca"),
            first_name: "Jo".to_string(),
            last_name: "Park".to_string(),
            avatar_url: None,
            brokerage: None,
            license_number: None,
            phone: None,
            created_at: Utc::now(),
        }
    }

    /// Provider that is always unreachable
    struct OfflineProvider;

    #[async_trait]
    impl IdentityProvider for OfflineProvider {
        async fn sign_in(&self, _: &str, _: &str) -> Result<(), AuthError> {
            Err(AuthError::authentication("Failed to fetch"))
        }
        async fn sign_up(&self, _: &SignUpRequest) -> Result<(), AuthError> {
            Err(AuthError::authentication("Failed to fetch"))
        }
        async fn sign_out(&self) -> Result<(), AuthError> {
            Err(AuthError::authentication("Failed to fetch"))
        }
        async fn current_user(&self) -> Result<Option<UserProfile>, AuthError> {
            Err(AuthError::authentication("Failed to fetch"))
        }
        fn provider_name(&self) -> &'static str {
            "Offline"
        }
    }

    /// Accepts any credentials but can never report the profile
    struct FlakyProfileProvider;

    #[async_trait]
    impl IdentityProvider for FlakyProfileProvider {
        async fn sign_in(&self, _: &str, _: &str) -> Result<(), AuthError> {
            Ok(())
        }
        async fn sign_up(&self, _: &SignUpRequest) -> Result<(), AuthError> {
            Ok(())
        }
        async fn sign_out(&self) -> Result<(), AuthError> {
            Ok(())
        }
        async fn current_user(&self) -> Result<Option<UserProfile>, AuthError> {
            Err(AuthError::authentication("Failed to fetch"))
        }
        fn provider_name(&self) -> &'static str {
            "Flaky"
        }
    }

    fn service(provider: Arc<dyn IdentityProvider>) -> (AuthService, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        (AuthService::new(provider, store.clone()), store)
    }

    #[tokio::test]
    async fn demo_login_caches_profile() {
        let (auth, store) = service(Arc::new(OfflineProvider));
        let user = auth.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

        assert_eq!(user.id, "demo-user-123");
        assert!(auth.is_authenticated());
        assert_eq!(store.get().unwrap().map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn failed_login_surfaces_message_and_keeps_state() {
        let (auth, store) = service(Arc::new(DemoProvider::new()));
        let err = auth.login(DEMO_EMAIL, "wrong").await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid login credentials");
        assert!(!auth.is_authenticated());
        assert!(store.get().unwrap().is_none());
    }

    #[tokio::test]
    async fn provider_login_refreshes_profile() {
        let provider = Arc::new(DemoProvider::new());
        let (auth, store) = service(provider.clone());
        let request = SignUpRequest {
            email: "jo@brokerage.ca".to_string(),
            password: "pw".to_string(),
            first_name: "Jo".to_string(),
            last_name: "Park".to_string(),
        };

        let user = auth.signup(&request).await.unwrap();
        assert_eq!(user.email, "jo@brokerage.ca");

        auth.logout().await.unwrap();
        assert!(store.get().unwrap().is_none());

        let again = auth.login("jo@brokerage.ca", "pw").await.unwrap();
        assert_eq!(again.id, user.id);
        assert_eq!(store.get().unwrap().map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn init_restores_cache_when_provider_is_down() {
        let (auth, store) = service(Arc::new(OfflineProvider));
        store.set(&profile("cached")).unwrap();

        let user = auth.init().await.unwrap();
        assert_eq!(user.id, "cached");
    }

    #[tokio::test]
    async fn refresh_error_keeps_local_session() {
        let (auth, store) = service(Arc::new(OfflineProvider));
        store.set(&profile("cached")).unwrap();
        auth.init().await;

        assert_eq!(auth.refresh_user().await.map(|u| u.id), Some("cached".to_string()));
    }

    #[tokio::test]
    async fn refresh_does_not_end_demo_session() {
        let (auth, _) = service(Arc::new(DemoProvider::new()));
        auth.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        assert!(auth.refresh_user().await.is_some());
    }

    #[tokio::test]
    async fn logout_clears_even_when_provider_fails() {
        let (auth, store) = service(Arc::new(OfflineProvider));
        auth.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

        auth.logout().await.unwrap();
        assert!(!auth.is_authenticated());
        assert!(store.get().unwrap().is_none());
    }

    #[tokio::test]
    async fn subscribers_see_every_change() {
        let (auth, _) = service(Arc::new(OfflineProvider));
        let mut rx = auth.subscribe();

        auth.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().map(|u| u.id.clone()), Some("demo-user-123".to_string()));

        auth.logout().await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }

    #[tokio::test]
    async fn live_provider_user_replaces_cached_demo_session() {
        let provider = Arc::new(DemoProvider::new());
        let request = SignUpRequest {
            email: "jo@brokerage.ca".to_string(),
            password: "pw".to_string(),
            first_name: "Jo".to_string(),
            last_name: "Park".to_string(),
        };
        provider.sign_up(&request).await.unwrap();

        let (auth, store) = service(provider.clone());
        store.set(&demo_user()).unwrap();

        let user = auth.init().await.unwrap();
        assert_eq!(user.email, "jo@brokerage.ca");

        // Refreshes reach the provider again once the demo session is gone
        provider.sign_out().await.unwrap();
        assert!(auth.refresh_user().await.is_none());
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn login_rejects_stale_profile_after_failed_refresh() {
        let (auth, store) = service(Arc::new(FlakyProfileProvider));
        store.set(&profile("cached")).unwrap();
        auth.init().await;

        let err = auth.login("someone.else@brokerage.ca", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::NoSession));
    }

    #[tokio::test]
    async fn login_accepts_matching_profile_after_failed_refresh() {
        let (auth, store) = service(Arc::new(FlakyProfileProvider));
        store.set(&profile("cached")).unwrap();
        auth.init().await;

        let user = auth.login("Cached@brokerage.ca", "pw").await.unwrap();
        assert_eq!(user.id, "cached");
    }
}
