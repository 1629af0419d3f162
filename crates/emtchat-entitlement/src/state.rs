//! Subscription state aggregate
//!
//! [`SubscriptionState`] is the single aggregate the entitlement manager
//! owns: current tier and limits, optional paid-plan metadata, the latest
//! usage snapshot, and the loading/error pair that tracks in-flight actions.
//! A fresh instance always starts from free/loading until the first
//! successful refresh.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tiers::{Tier, TierLimits};
use crate::usage::Usage;

/// Billing interval for a paid subscription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    /// Billed every month
    #[default]
    Monthly,
    /// Billed once a year
    Yearly,
}

impl BillingInterval {
    /// Get the wire representation of the interval.
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingInterval::Monthly => "monthly",
            BillingInterval::Yearly => "yearly",
        }
    }
}

/// Metadata about the active paid plan. Absent for free-tier accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Payment-provider subscription identifier
    pub id: String,

    /// End of the current billing period
    pub current_period_end: DateTime<Utc>,

    /// Whether cancellation is scheduled at period end
    #[serde(default)]
    pub cancel_at_period_end: bool,

    /// Billing interval of the plan
    #[serde(default)]
    pub interval: BillingInterval,
}

/// The aggregate held by the entitlement manager.
///
/// Replaced wholesale on every successful refresh. On failure `is_loading`
/// is cleared and `error` is set while the prior successful fields are
/// preserved, never reset to defaults.
#[derive(Debug, Clone)]
pub struct SubscriptionState {
    /// Current subscription tier
    pub tier: Tier,

    /// Raw status string from the backend ("free", "active", "trialing", ...)
    pub status: String,

    /// Entitlement limits for the current tier
    pub limits: &'static TierLimits,

    /// Paid-plan metadata, if any
    pub subscription: Option<Subscription>,

    /// Latest usage snapshot, if any
    pub usage: Option<Usage>,

    /// Whether an action is in flight
    pub is_loading: bool,

    /// Human-readable message from the last failed action
    pub error: Option<String>,
}

impl SubscriptionState {
    /// Initial state before the first network round trip: free tier, loading.
    pub fn initial() -> Self {
        Self {
            tier: Tier::Free,
            status: "free".to_string(),
            limits: Tier::Free.limits(),
            subscription: None,
            usage: None,
            is_loading: true,
            error: None,
        }
    }

    /// Whether the subscription is currently in good standing.
    pub fn is_active(&self) -> bool {
        self.status == "active" || self.status == "trialing"
    }
}

impl Default for SubscriptionState {
    fn default() -> Self {
        Self::initial()
    }
}
