//! Billing service configuration
//!
//! Centralized configuration for the billing API endpoint, the session
//! token, and the application URLs the payment provider returns the browser
//! to after checkout and portal flows. Configuration is loaded from
//! environment variables with defaults suitable for local development.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the billing API and return URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Billing API endpoint configuration.
    pub api: ServiceEndpoint,

    /// Base URL of the application shell, used to build return URLs.
    pub app_base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BillingConfig {
    /// Returns default configuration suitable for local development.
    fn default() -> Self {
        Self {
            api: ServiceEndpoint {
                base_url: "http://localhost:3000".to_string(),
                api_key: None,
            },
            app_base_url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl BillingConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `EMTCHAT_API_URL`: billing API base URL (default: http://localhost:3000)
    /// - `EMTCHAT_API_KEY`: session bearer token for the billing API
    /// - `EMTCHAT_APP_URL`: application base URL for return redirects
    ///   (default: the API URL)
    /// - `SERVICE_TIMEOUT_SECS`: request timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        let default = Self::default();
        let base_url = std::env::var("EMTCHAT_API_URL").unwrap_or(default.api.base_url);

        Self {
            app_base_url: std::env::var("EMTCHAT_APP_URL").unwrap_or_else(|_| base_url.clone()),
            api: ServiceEndpoint {
                base_url,
                api_key: std::env::var("EMTCHAT_API_KEY").ok(),
            },
            timeout_secs: std::env::var("SERVICE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.timeout_secs),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// URL the browser returns to after a successful checkout.
    pub fn checkout_success_url(&self) -> String {
        format!(
            "{}/subscription?checkout=success",
            self.app_base_url.trim_end_matches('/')
        )
    }

    /// URL the browser returns to after abandoning checkout.
    pub fn checkout_cancel_url(&self) -> String {
        format!(
            "{}/subscription?checkout=cancelled",
            self.app_base_url.trim_end_matches('/')
        )
    }

    /// URL the billing portal returns the browser to.
    pub fn portal_return_url(&self) -> String {
        format!("{}/subscription", self.app_base_url.trim_end_matches('/'))
    }
}

/// Configuration for a single service endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    /// Base URL for the service (e.g., "https://api.emtchat.app").
    pub base_url: String,

    /// Bearer token for authenticating as the current session.
    pub api_key: Option<String>,
}

impl ServiceEndpoint {
    /// Build a full URL by appending a path to the base URL.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Check if a session token is available.
    pub fn has_auth(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BillingConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.api.has_auth());
    }

    #[test]
    fn test_endpoint_url_join() {
        let endpoint = ServiceEndpoint {
            base_url: "https://api.emtchat.app".to_string(),
            api_key: None,
        };

        assert_eq!(
            endpoint.url("/api/v1/billing/status"),
            "https://api.emtchat.app/api/v1/billing/status"
        );
        assert_eq!(
            endpoint.url("api/v1/billing/status"),
            "https://api.emtchat.app/api/v1/billing/status"
        );
    }

    #[test]
    fn test_endpoint_url_trailing_slash() {
        let endpoint = ServiceEndpoint {
            base_url: "https://api.emtchat.app/".to_string(),
            api_key: None,
        };

        assert_eq!(
            endpoint.url("/api/v1/billing/status"),
            "https://api.emtchat.app/api/v1/billing/status"
        );
    }

    #[test]
    fn test_return_urls() {
        let config = BillingConfig {
            app_base_url: "https://emtchat.app/".to_string(),
            ..BillingConfig::default()
        };

        assert_eq!(
            config.checkout_success_url(),
            "https://emtchat.app/subscription?checkout=success"
        );
        assert_eq!(
            config.checkout_cancel_url(),
            "https://emtchat.app/subscription?checkout=cancelled"
        );
        assert_eq!(config.portal_return_url(), "https://emtchat.app/subscription");
    }
}
