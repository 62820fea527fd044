use crate::round_robin::RoundRobin;
use async_trait::async_trait;
use log::{debug, warn};
use models::user::{AuthenticatedUser, UserRole};
use reqwest::{Client, StatusCode, header::AUTHORIZATION};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Path on the user service that resolves a credential to a user
pub const AUTHORIZE_HOST_PATH: &str = "/api/users/authorize/host";

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Credentials rejected: {0}")]
    Unauthorized(String),

    #[error("User service unavailable: {0}")]
    Unavailable(String),

    #[error("Identity client misconfigured: {0}")]
    Config(String),
}

/// Resolves caller credentials through the external user service
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the user behind `token`, whatever their role.
    ///
    /// Callers decide what a non-host role means for them.
    async fn authorize_host(&self, token: &str) -> Result<AuthenticatedUser, IdentityError>;
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: i32,
    role: UserRole,
}

/// [`IdentityProvider`] backed by the user service's HTTP API
pub struct HttpIdentityClient {
    http: Client,
    upstreams: RoundRobin<String>,
}

impl HttpIdentityClient {
    pub fn new(base_urls: Vec<String>, timeout: Duration) -> Result<Self, IdentityError> {
        let base_urls = base_urls
            .into_iter()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .collect();

        let upstreams = RoundRobin::new(base_urls)
            .ok_or_else(|| IdentityError::Config("no user service URL configured".to_string()))?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IdentityError::Config(e.to_string()))?;

        Ok(Self { http, upstreams })
    }

    pub fn upstreams(&self) -> &[String] {
        self.upstreams.items()
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityClient {
    async fn authorize_host(&self, token: &str) -> Result<AuthenticatedUser, IdentityError> {
        let url = format!("{}{AUTHORIZE_HOST_PATH}", self.upstreams.next());
        debug!("Authorizing caller against {url}");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, token)
            .send()
            .await
            .map_err(|e| {
                warn!("User service request to {url} failed: {e}");
                IdentityError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(IdentityError::Unauthorized(format!(
                    "user service answered {status}"
                )));
            }
            s if s.is_server_error() => {
                return Err(IdentityError::Unavailable(format!(
                    "user service answered {status}"
                )));
            }
            s if !s.is_success() => {
                return Err(IdentityError::Unauthorized(format!(
                    "user service answered {status}"
                )));
            }
            _ => {}
        }

        let user: UserResponse = response.json().await.map_err(|e| {
            IdentityError::Unavailable(format!("malformed user service response: {e}"))
        })?;

        Ok(AuthenticatedUser {
            id: user.id,
            role: user.role,
        })
    }
}
