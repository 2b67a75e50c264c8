use crate::config::Config;
use crate::errors::AppError;
use crate::models::{Profile, ProfileEnvelope};
use reqwest::header::{ACCEPT, USER_AGENT};

/// Client for the Hack The Box public profile API.
///
/// The provider rejects requests that lack a JSON `accept` header or a
/// browser-like `user-agent`, so both are sent on every call.
#[derive(Clone)]
pub struct HtbClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl HtbClient {
    /// Creates a new `HtbClient` with the configured deadline applied to
    /// every request.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTB client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.provider_base_url.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    pub fn profile_url(&self, id: &str) -> String {
        format!("{}/api/v4/profile/{}", self.base_url, id)
    }

    /// Fetches the profile for an already validated numeric `id`.
    ///
    /// # Returns
    ///
    /// * `Ok(Profile)` - The provider returned a non-null profile.
    /// * `Err(AppError::Upstream)` - The provider returned a non-success status.
    /// * `Err(AppError::ProfileNotFound)` - The body had a null or missing `profile`.
    /// * `Err(AppError::Parse)` - The body was not the expected JSON.
    pub async fn fetch_profile(&self, id: &str) -> Result<Profile, AppError> {
        let url = self.profile_url(id);
        tracing::info!("Fetching HTB profile {}: {}", id, url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("HTB API returned {} for profile {}", status, id);
            return Err(AppError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let envelope: ProfileEnvelope = serde_json::from_slice(&body)?;

        match envelope.into_profile()? {
            Some(profile) => {
                tracing::info!("✓ Profile {} fetched", id);
                Ok(profile)
            }
            None => Err(AppError::ProfileNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HtbClient::new(&Config::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_profile_url() {
        let config = Config {
            provider_base_url: "http://127.0.0.1:9999".to_string(),
            ..Config::default()
        };
        let client = HtbClient::new(&config).unwrap();
        assert_eq!(
            client.profile_url("123"),
            "http://127.0.0.1:9999/api/v4/profile/123"
        );
    }
}
