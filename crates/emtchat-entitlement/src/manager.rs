//! Entitlement manager
//!
//! [`EntitlementManager`] owns the [`SubscriptionState`] aggregate for one
//! application session and orchestrates billing actions against the backend.
//! Checkout and portal flows end in a browser redirect, performed by an
//! injected [`Navigator`] so application shells (and tests) decide what a
//! redirect means on their platform.
//!
//! Every network-calling method converts failures into a human-readable
//! message stored in `state().error`; none of them return errors or panic.
//! Callers are expected to disable triggering UI while `state().is_loading`
//! is set.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::client::{BillingClient, CreateCheckoutParams, CreatePortalParams, StatusResponse};
use crate::config::BillingConfig;
use crate::state::{BillingInterval, SubscriptionState};
use crate::tiers::{Feature, Tier};
use crate::usage::UsageWarning;

/// Performs the platform-specific browser/webview redirect.
///
/// Checkout and portal flows terminate in a full navigation to a hosted
/// payment page; from the manager's perspective a successful `navigate` ends
/// the current page's execution.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Navigate the host browser/webview to `url`.
    async fn navigate(&self, url: &str);
}

/// Owns subscription state and billing actions for one session.
///
/// Construct one instance per session context; state is not shared across
/// instances and is not persisted. Reads are snapshots via
/// [`EntitlementManager::state`], so the manager can sit behind an `Arc` and
/// be used from concurrent UI tasks.
pub struct EntitlementManager {
    client: BillingClient,
    config: BillingConfig,
    navigator: Box<dyn Navigator>,
    state: Mutex<SubscriptionState>,
    /// Generation of the most recently initiated refresh. A refresh commits
    /// its result only while it is still the latest, so overlapping
    /// refreshes resolve last-initiated-wins rather than last-resolved-wins.
    refresh_generation: AtomicU64,
}

impl EntitlementManager {
    /// Create a manager in the initial free/loading state.
    ///
    /// No network call is made; use [`EntitlementManager::connect`] to also
    /// perform the initial refresh.
    pub fn new(config: BillingConfig, navigator: Box<dyn Navigator>) -> Self {
        let client = BillingClient::new(config.api.clone(), config.timeout());
        Self {
            client,
            config,
            navigator,
            state: Mutex::new(SubscriptionState::initial()),
            refresh_generation: AtomicU64::new(0),
        }
    }

    /// Create a manager and perform the initial status refresh.
    pub async fn connect(config: BillingConfig, navigator: Box<dyn Navigator>) -> Self {
        let manager = Self::new(config, navigator);
        manager.refresh_status().await;
        manager
    }

    /// Snapshot of the current subscription state.
    pub fn state(&self) -> SubscriptionState {
        self.state.lock().expect("state lock poisoned").clone()
    }

    /// Re-fetch subscription status from the backend.
    ///
    /// On success the whole state is replaced: tier (falling back to free if
    /// the reported tier is unrecognized), status, limits, plan metadata, and
    /// usage. On failure `error` is set and `is_loading` cleared while prior
    /// fields keep their last known values. A response arriving for a
    /// superseded refresh is discarded.
    #[instrument(skip(self))]
    pub async fn refresh_status(&self) {
        let generation = self.refresh_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.begin_loading();

        match self.client.subscription_status().await {
            Ok(status) => {
                if !self.is_latest_refresh(generation) {
                    debug!(generation, "Discarding stale status response");
                    return;
                }
                self.commit_status(status);
            }
            Err(e) => {
                if !self.is_latest_refresh(generation) {
                    debug!(generation, "Discarding stale status failure");
                    return;
                }
                self.fail(format!("Failed to load subscription status: {}", e));
            }
        }
    }

    /// Start a hosted checkout for `tier` billed at `interval`.
    ///
    /// On success the navigator is sent to the session URL and `is_loading`
    /// stays set; the page is expected to unload, so no further state update
    /// is observed. On failure `error` is set without any navigation.
    ///
    /// Same-tier requests are not rejected here; the pricing UI is
    /// responsible for not offering the current tier.
    #[instrument(skip(self), fields(tier = %tier.as_str(), interval = %interval.as_str()))]
    pub async fn create_checkout(&self, tier: Tier, interval: BillingInterval) {
        self.begin_loading();

        let params = CreateCheckoutParams {
            tier,
            interval,
            success_url: self.config.checkout_success_url(),
            cancel_url: self.config.checkout_cancel_url(),
        };

        match self.client.create_checkout(params).await {
            Ok(session) => {
                debug!("Redirecting to checkout");
                self.navigator.navigate(&session.url).await;
            }
            Err(e) => self.fail(format!("Failed to start checkout: {}", e)),
        }
    }

    /// Open the hosted billing portal.
    ///
    /// Redirect semantics match [`EntitlementManager::create_checkout`].
    #[instrument(skip(self))]
    pub async fn open_portal(&self) {
        self.begin_loading();

        let params = CreatePortalParams {
            return_url: self.config.portal_return_url(),
        };

        match self.client.create_portal(params).await {
            Ok(session) => {
                debug!("Redirecting to billing portal");
                self.navigator.navigate(&session.url).await;
            }
            Err(e) => self.fail(format!("Failed to open billing portal: {}", e)),
        }
    }

    /// Schedule cancellation at period end, then resynchronize.
    #[instrument(skip(self))]
    pub async fn cancel_subscription(&self) {
        self.begin_loading();

        match self.client.cancel_subscription().await {
            Ok(()) => self.refresh_status().await,
            Err(e) => self.fail(format!("Failed to cancel subscription: {}", e)),
        }
    }

    /// Undo a scheduled cancellation, then resynchronize.
    #[instrument(skip(self))]
    pub async fn resume_subscription(&self) {
        self.begin_loading();

        match self.client.resume_subscription().await {
            Ok(()) => self.refresh_status().await,
            Err(e) => self.fail(format!("Failed to resume subscription: {}", e)),
        }
    }

    /// Check whether the current tier enables `feature`.
    ///
    /// Pure lookup against the static tier table; no network access and no
    /// loading state.
    pub fn is_feature_enabled(&self, feature: Feature) -> bool {
        let tier = self.state.lock().expect("state lock poisoned").tier;
        tier.has_feature(feature)
    }

    /// Warning level derived from the current usage snapshot.
    ///
    /// [`UsageWarning::None`] whenever no snapshot is present.
    pub fn usage_warning_level(&self) -> UsageWarning {
        let state = self.state.lock().expect("state lock poisoned");
        state
            .usage
            .as_ref()
            .map(|usage| usage.warning_level())
            .unwrap_or(UsageWarning::None)
    }

    fn begin_loading(&self) {
        let mut state = self.state.lock().expect("state lock poisoned");
        state.is_loading = true;
        state.error = None;
    }

    fn is_latest_refresh(&self, generation: u64) -> bool {
        self.refresh_generation.load(Ordering::SeqCst) == generation
    }

    fn commit_status(&self, status: StatusResponse) {
        let tier = Tier::parse(&status.tier).unwrap_or_else(|| {
            warn!(tier = %status.tier, "Unrecognized tier, falling back to free");
            Tier::Free
        });

        let mut state = self.state.lock().expect("state lock poisoned");
        *state = SubscriptionState {
            tier,
            status: status.status,
            limits: tier.limits(),
            subscription: status.subscription,
            usage: status.usage,
            is_loading: false,
            error: None,
        };
    }

    fn fail(&self, message: String) {
        warn!("{}", message);
        let mut state = self.state.lock().expect("state lock poisoned");
        state.is_loading = false;
        state.error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopNavigator;

    #[async_trait]
    impl Navigator for NoopNavigator {
        async fn navigate(&self, _url: &str) {}
    }

    fn manager() -> EntitlementManager {
        EntitlementManager::new(BillingConfig::default(), Box::new(NoopNavigator))
    }

    #[test]
    fn test_starts_free_and_loading() {
        let manager = manager();
        let state = manager.state();
        assert_eq!(state.tier, Tier::Free);
        assert!(state.is_loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_feature_lookup_uses_current_tier() {
        let manager = manager();
        assert!(manager.is_feature_enabled(Feature::DocumentUpload));
        assert!(!manager.is_feature_enabled(Feature::ApiAccess));

        manager.commit_status(StatusResponse {
            tier: "pro".to_string(),
            status: "active".to_string(),
            subscription: None,
            usage: None,
        });
        assert!(manager.is_feature_enabled(Feature::ApiAccess));
    }

    #[test]
    fn test_warning_level_without_usage_is_none() {
        let manager = manager();
        assert_eq!(manager.usage_warning_level(), UsageWarning::None);
    }

    #[test]
    fn test_unrecognized_tier_falls_back_to_free() {
        let manager = manager();
        manager.commit_status(StatusResponse {
            tier: "platinum".to_string(),
            status: "active".to_string(),
            subscription: None,
            usage: None,
        });

        let state = manager.state();
        assert_eq!(state.tier, Tier::Free);
        assert_eq!(state.limits.display_name, "Free");
        assert!(!state.is_loading);
    }

    #[test]
    fn test_fail_preserves_prior_fields() {
        let manager = manager();
        manager.commit_status(StatusResponse {
            tier: "team".to_string(),
            status: "active".to_string(),
            subscription: None,
            usage: None,
        });

        manager.fail("Failed to load subscription status: boom".to_string());

        let state = manager.state();
        assert_eq!(state.tier, Tier::Team);
        assert_eq!(state.status, "active");
        assert!(!state.is_loading);
        assert!(state.error.as_deref().unwrap().contains("boom"));
    }
}
