//! # EMTChat Entitlement Management
//!
//! This crate provides subscription entitlement management for the EMTChat
//! platform, shared across the desktop, mobile, and web-view application
//! shells.
//!
//! ## Overview
//!
//! The emtchat-entitlement crate handles:
//! - **Tiers**: the static tier table mapping each plan to its limits,
//!   features, and pricing
//! - **Usage**: point-in-time usage snapshots and derived warning levels
//! - **State**: the `SubscriptionState` aggregate owned by one manager per
//!   session
//! - **Client**: the HTTP client for the billing REST endpoints
//! - **Manager**: action orchestration — refresh, checkout, portal,
//!   cancel/resume, feature gating
//!
//! ## Architecture
//!
//! ```text
//! EntitlementManager
//!   ├─ SubscriptionState (tier, limits, usage, loading/error)
//!   ├─ BillingClient ─→ billing REST API ─→ payment provider sessions
//!   └─ Navigator (injected; performs checkout/portal redirects)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use emtchat_entitlement::{
//!     BillingConfig, BillingInterval, EntitlementManager, Feature, Navigator, Tier,
//! };
//! use async_trait::async_trait;
//!
//! struct WebViewNavigator;
//!
//! #[async_trait]
//! impl Navigator for WebViewNavigator {
//!     async fn navigate(&self, url: &str) {
//!         // hand the URL to the host shell
//!         let _ = url;
//!     }
//! }
//!
//! async fn example() {
//!     let config = BillingConfig::from_env();
//!     let manager = EntitlementManager::connect(config, Box::new(WebViewNavigator)).await;
//!
//!     if manager.is_feature_enabled(Feature::ApiAccess) {
//!         // show the API tokens screen
//!     }
//!
//!     manager.create_checkout(Tier::Pro, BillingInterval::Yearly).await;
//! }
//! ```
//!
//! ## Failure semantics
//!
//! Every network-calling manager method catches failures and stores a
//! human-readable message in `state().error`; none throw past their own
//! boundary. No retries are built in — the caller decides whether to invoke
//! a method again.

pub mod client;
pub mod config;
pub mod manager;
pub mod state;
pub mod tiers;
pub mod usage;

// Re-export main types for convenience
pub use client::{
    BillingClient, BillingError, CreateCheckoutParams, CreatePortalParams, SessionResponse,
    StatusResponse,
};
pub use config::{BillingConfig, ServiceEndpoint};
pub use manager::{EntitlementManager, Navigator};
pub use state::{BillingInterval, Subscription, SubscriptionState};
pub use tiers::{Feature, Tier, TierFeatures, TierLimits, ALL_TIERS};
pub use usage::{Usage, UsageWarning};
