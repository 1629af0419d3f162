//! Billing API client.
//!
//! HTTP client for the EMTChat billing endpoints: subscription status,
//! checkout and portal session creation, and cancel/resume. The payment
//! provider itself is never called directly; this client only requests
//! hosted-session URLs and reports status.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

use crate::config::ServiceEndpoint;
use crate::state::{BillingInterval, Subscription};
use crate::tiers::Tier;
use crate::usage::Usage;

/// Billing client errors.
#[derive(Debug, Error)]
pub enum BillingError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// Invalid response from the API.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Authentication failed.
    #[error("Authentication failed")]
    AuthenticationFailed,
}

/// Billing API client.
///
/// Thin wrapper over the five billing endpoints. All session-URL flows
/// return the URL only; redirecting the browser is the caller's concern.
#[derive(Clone)]
pub struct BillingClient {
    /// HTTP client instance.
    client: Client,

    /// Service endpoint configuration.
    endpoint: ServiceEndpoint,
}

impl BillingClient {
    /// Create a new billing client.
    pub fn new(endpoint: ServiceEndpoint, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, endpoint }
    }

    /// Fetch the current subscription status.
    ///
    /// Decoding is lenient: missing fields default, and an unrecognized
    /// tier string is preserved for the caller to fall back on.
    #[instrument(skip(self))]
    pub async fn subscription_status(&self) -> Result<StatusResponse, BillingError> {
        debug!("Fetching subscription status");

        let url = self.endpoint.url("/api/v1/billing/status");
        let request = self.with_auth(self.client.get(&url));

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Create a hosted checkout session for the given tier and interval.
    #[instrument(skip(self), fields(tier = %params.tier.as_str(), interval = %params.interval.as_str()))]
    pub async fn create_checkout(
        &self,
        params: CreateCheckoutParams,
    ) -> Result<SessionResponse, BillingError> {
        debug!("Creating checkout session");

        let url = self.endpoint.url("/api/v1/billing/checkout");
        let request = self.with_auth(self.client.post(&url).json(&params));

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Create a hosted billing-portal session.
    #[instrument(skip(self))]
    pub async fn create_portal(
        &self,
        params: CreatePortalParams,
    ) -> Result<SessionResponse, BillingError> {
        debug!("Creating billing portal session");

        let url = self.endpoint.url("/api/v1/billing/portal");
        let request = self.with_auth(self.client.post(&url).json(&params));

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Schedule cancellation of the active subscription at period end.
    #[instrument(skip(self))]
    pub async fn cancel_subscription(&self) -> Result<(), BillingError> {
        debug!("Cancelling subscription");

        let url = self.endpoint.url("/api/v1/billing/cancel");
        let request = self.with_auth(self.client.post(&url));

        let response = request.send().await?;
        self.check_status(response).await
    }

    /// Resume a subscription scheduled for cancellation.
    #[instrument(skip(self))]
    pub async fn resume_subscription(&self) -> Result<(), BillingError> {
        debug!("Resuming subscription");

        let url = self.endpoint.url("/api/v1/billing/resume");
        let request = self.with_auth(self.client.post(&url));

        let response = request.send().await?;
        self.check_status(response).await
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref api_key) = self.endpoint.api_key {
            request.header("Authorization", format!("Bearer {}", api_key))
        } else {
            request
        }
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T>(&self, response: reqwest::Response) -> Result<T, BillingError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            error!("Billing API authentication failed");
            return Err(BillingError::AuthenticationFailed);
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Billing API error ({}): {}", status.as_u16(), message);
            return Err(BillingError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| BillingError::InvalidResponse(e.to_string()))
    }

    /// Handle a response with no meaningful body.
    async fn check_status(&self, response: reqwest::Response) -> Result<(), BillingError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            error!("Billing API authentication failed");
            return Err(BillingError::AuthenticationFailed);
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Billing API error ({}): {}", status.as_u16(), message);
            return Err(BillingError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

/// Subscription status payload.
///
/// Every field is defaulted so a sparse or malformed body degrades to the
/// free tier with absent usage instead of failing decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Tier name as reported by the backend.
    #[serde(default)]
    pub tier: String,

    /// Subscription status ("free", "active", "trialing", ...).
    #[serde(default = "default_status")]
    pub status: String,

    /// Paid-plan metadata, absent for free accounts.
    #[serde(default)]
    pub subscription: Option<Subscription>,

    /// Usage snapshot, absent when the backend has none.
    #[serde(default)]
    pub usage: Option<Usage>,
}

fn default_status() -> String {
    "free".to_string()
}

/// Parameters for creating a checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutParams {
    /// Target tier to purchase.
    pub tier: Tier,

    /// Billing interval.
    pub interval: BillingInterval,

    /// URL the browser returns to after a successful checkout.
    pub success_url: String,

    /// URL the browser returns to after abandoning checkout.
    pub cancel_url: String,
}

/// Parameters for creating a billing-portal session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortalParams {
    /// URL the portal returns the browser to.
    pub return_url: String,
}

/// A hosted-session response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Hosted page URL to redirect the browser to.
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let endpoint = ServiceEndpoint {
            base_url: "http://localhost:3000".to_string(),
            api_key: Some("test-session".to_string()),
        };
        let client = BillingClient::new(endpoint, Duration::from_secs(30));
        assert!(client.endpoint.has_auth());
    }

    #[test]
    fn test_status_response_lenient_decode() {
        let status: StatusResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(status.tier, "");
        assert_eq!(status.status, "free");
        assert!(status.subscription.is_none());
        assert!(status.usage.is_none());
    }

    #[test]
    fn test_checkout_params_wire_shape() {
        let params = CreateCheckoutParams {
            tier: Tier::Pro,
            interval: BillingInterval::Yearly,
            success_url: "https://emtchat.app/subscription?checkout=success".to_string(),
            cancel_url: "https://emtchat.app/subscription?checkout=cancelled".to_string(),
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["tier"], "pro");
        assert_eq!(json["interval"], "yearly");
        assert!(json["successUrl"].as_str().unwrap().ends_with("checkout=success"));
        assert!(json["cancelUrl"].as_str().unwrap().ends_with("checkout=cancelled"));
    }
}
