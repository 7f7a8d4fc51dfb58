// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Home Assistant REST client.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use crate::error::TransportError;

// ============================================================================
// HomeAssistantConfig
// ============================================================================

/// Connection parameters of a Home Assistant instance.
///
/// # Examples
///
/// ```
/// use smartify_tv::homeassistant::HomeAssistantConfig;
/// use std::time::Duration;
///
/// let config = HomeAssistantConfig::new("http://homeassistant.local:8123/", "long-lived-token")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "http://homeassistant.local:8123");
/// assert_eq!(config.timeout(), Duration::from_secs(5));
/// ```
#[derive(Clone)]
pub struct HomeAssistantConfig {
    base_url: String,
    token: String,
    timeout: Duration,
}

impl HomeAssistantConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the instance at `base_url`, authenticated
    /// with a long-lived access token.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates a client from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidAddress` if the base URL is not an
    /// `http` or `https` URL, and `TransportError::Http` if the HTTP client
    /// cannot be created.
    pub fn into_client(self) -> Result<HomeAssistantClient, TransportError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(TransportError::InvalidAddress(self.base_url));
        }

        let client = Client::builder().timeout(self.timeout).build()?;

        Ok(HomeAssistantClient {
            base_url: self.base_url,
            token: self.token,
            client,
        })
    }
}

impl fmt::Debug for HomeAssistantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HomeAssistantConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// EntityState
// ============================================================================

/// State of one entity as returned by `GET /api/states/<entity_id>`.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct EntityState {
    /// Entity id.
    pub entity_id: String,
    /// Raw state string.
    pub state: String,
    /// Entity attributes.
    #[serde(default)]
    pub attributes: serde_json::Map<String, Value>,
}

impl EntityState {
    /// Returns `true` if the state is `unknown` or `unavailable`.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self.state.as_str(), "unknown" | "unavailable")
    }
}

// ============================================================================
// HomeAssistantClient
// ============================================================================

/// Client for the Home Assistant REST API.
///
/// # Examples
///
/// ```no_run
/// use smartify_tv::homeassistant::HomeAssistantConfig;
///
/// # async fn example() -> Result<(), smartify_tv::error::TransportError> {
/// let client = HomeAssistantConfig::new("http://homeassistant.local:8123", "token").into_client()?;
///
/// if let Some(state) = client.entity_state("sensor.tv_plug_power").await? {
///     println!("{} W", state.state);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HomeAssistantClient {
    base_url: String,
    token: String,
    client: Client,
}

impl HomeAssistantClient {
    /// Returns the base URL of the instance.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn state_url(&self, entity_id: &str) -> String {
        format!(
            "{}/api/states/{}",
            self.base_url,
            urlencoding::encode(entity_id)
        )
    }

    fn service_url(&self, domain: &str, service: &str) -> String {
        format!(
            "{}/api/services/{}/{}",
            self.base_url,
            urlencoding::encode(domain),
            urlencoding::encode(service)
        )
    }

    /// Fetches the state of an entity.
    ///
    /// Returns `Ok(None)` if the entity does not exist.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request fails, the token is rejected
    /// or the response cannot be decoded.
    pub async fn entity_state(&self, entity_id: &str) -> Result<Option<EntityState>, TransportError> {
        let url = self.state_url(entity_id);

        tracing::trace!(url = %url, "Fetching entity state");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let state = Self::check(response).await?.json::<EntityState>().await?;
        Ok(Some(state))
    }

    /// Calls a service.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request fails or is rejected.
    pub async fn call_service(
        &self,
        domain: &str,
        service: &str,
        data: &Value,
    ) -> Result<(), TransportError> {
        let url = self.service_url(domain, service);

        tracing::debug!(url = %url, data = %data, "Calling service");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(data)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn check(response: Response) -> Result<Response, TransportError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(TransportError::AuthenticationFailed);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

impl fmt::Debug for HomeAssistantClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HomeAssistantClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
