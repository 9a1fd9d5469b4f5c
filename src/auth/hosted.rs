use crate::auth::error::AuthError;
use crate::auth::traits::{IdentityProvider, SignUpRequest};
use crate::models::UserProfile;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Identity provider backed by a hosted GoTrue-style auth REST API
pub struct HostedProvider {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: RwLock<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: Option<String>,
    user: Option<RemoteUser>,
}

#[derive(Debug, Deserialize)]
struct RemoteUser {
    id: String,
    email: Option<String>,
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    user_metadata: RemoteMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct RemoteMetadata {
    first_name: Option<String>,
    last_name: Option<String>,
    avatar_url: Option<String>,
    brokerage: Option<String>,
    license_number: Option<String>,
    phone: Option<String>,
}

impl From<RemoteUser> for UserProfile {
    fn from(user: RemoteUser) -> Self {
        let meta = user.user_metadata;
        UserProfile {
            id: user.id,
            email: user.email.unwrap_or_default(),
            first_name: meta.first_name.unwrap_or_default(),
            last_name: meta.last_name.unwrap_or_default(),
            avatar_url: meta.avatar_url,
            brokerage: meta.brokerage,
            license_number: meta.license_number,
            phone: meta.phone,
            created_at: user.created_at.unwrap_or_else(Utc::now),
        }
    }
}

impl HostedProvider {
    /// Create a provider for the project at `base_url`, authenticated with its public API key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, AuthError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            access_token: RwLock::new(None),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn request(&self, builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        let builder = builder.header("apikey", self.api_key.as_str());
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Turn a failed response into an error carrying the provider's own message
    async fn failure(response: Response) -> AuthError {
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        let message = ["error_description", "msg", "message", "error"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .map(String::from)
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        warn!("Identity provider returned {}: {}", status, message);
        AuthError::Authentication(message)
    }

    async fn store_session(&self, response: Response) -> Result<(), AuthError> {
        let session: SessionResponse = response.json().await?;
        if let Some(user) = &session.user {
            debug!("Provider session opened for user {}", user.id);
        }
        *self.access_token.write().await = session.access_token;
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for HostedProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        info!("Signing in {} with hosted provider", email);

        let response = self
            .request(self.client.post(self.endpoint("token")), None)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        self.store_session(response).await
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), AuthError> {
        info!("Registering {} with hosted provider", request.email);

        let response = self
            .request(self.client.post(self.endpoint("signup")), None)
            .json(&json!({
                "email": request.email,
                "password": request.password,
                "data": {
                    "first_name": request.first_name,
                    "last_name": request.last_name,
                },
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        self.store_session(response).await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(token) = self.access_token.write().await.take() else {
            return Ok(());
        };

        let response = self
            .request(self.client.post(self.endpoint("logout")), Some(&token))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<UserProfile>, AuthError> {
        let Some(token) = self.access_token.read().await.clone() else {
            return Ok(None);
        };

        let response = self
            .request(self.client.get(self.endpoint("user")), Some(&token))
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!("Provider session expired");
            *self.access_token.write().await = None;
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        let user: RemoteUser = response.json().await?;
        Ok(Some(user.into()))
    }

    fn provider_name(&self) -> &'static str {
        "Hosted"
    }
}
