//! REST client for the hosted auth provider.
//!
//! Speaks the GoTrue-style interface: password grant, signup, logout, and a
//! token-backed user lookup. Provider failure messages are surfaced verbatim
//! so the login form can show exactly what the provider said.

use async_trait::async_trait;
use reqwest::Response;
use serde::{Deserialize, Serialize};

use edvise_core::config::BackendConfig;
use edvise_core::{Error, Result};

const SERVICE: &str = "auth provider";

/// The authenticated user's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Provider-assigned user id.
    pub id: String,
    /// Login email.
    pub email: String,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for subsequent calls.
    pub access_token: String,
    /// The session's user.
    pub user: AuthUser,
}

/// Auth operations the session gate is written against.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Exchange email + password for a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Register a new account. Does not sign the user in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<()>;

    /// Invalidate the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<()>;

    /// Look up the user behind `access_token`; fails when the token is no
    /// longer good.
    async fn fetch_user(&self, access_token: &str) -> Result<AuthUser>;
}

/// Client for the auth endpoints of the hosted backend.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

impl AuthClient {
    /// Create a client from backend settings.
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{endpoint}", self.base_url)
    }

    /// Map a non-2xx response to a remote error carrying the provider's own
    /// message verbatim.
    async fn failure_from(response: Response) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                for key in ["error_description", "msg", "message"] {
                    if let Some(text) = v.get(key).and_then(|m| m.as_str()) {
                        return Some(text.to_string());
                    }
                }
                None
            })
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body
                }
            });
        Error::remote(SERVICE, message)
    }
}

#[async_trait]
impl SessionProvider for AuthClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let response = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&Credentials { email, password })
            .send()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Sign-in transport failure"))?;
        if !response.status().is_success() {
            let err = Self::failure_from(response).await;
            tracing::warn!(error = %err, email, "Sign-in rejected");
            return Err(err);
        }
        let session: Session = response.json().await?;
        tracing::info!(email = %session.user.email, "Signed in");
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<()> {
        let response = self
            .http
            .post(self.auth_url("signup"))
            .header("apikey", &self.api_key)
            .json(&Credentials { email, password })
            .send()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Sign-up transport failure"))?;
        if !response.status().is_success() {
            let err = Self::failure_from(response).await;
            tracing::warn!(error = %err, email, "Sign-up rejected");
            return Err(err);
        }
        tracing::info!(email, "Account created");
        Ok(())
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let response = self
            .http
            .post(self.auth_url("logout"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Sign-out transport failure"))?;
        if !response.status().is_success() {
            return Err(Self::failure_from(response).await);
        }
        tracing::info!("Signed out");
        Ok(())
    }

    async fn fetch_user(&self, access_token: &str) -> Result<AuthUser> {
        let response = self
            .http
            .get(self.auth_url("user"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::failure_from(response).await);
        }
        Ok(response.json().await?)
    }
}
