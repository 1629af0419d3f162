//! Subscription tiers and entitlement limits
//!
//! This module defines the subscription tiers available in EMTChat and the
//! entitlement limits associated with each tier. The table is static: exactly
//! one `TierLimits` record exists per tier and it is never mutated at runtime.

use serde::{Deserialize, Serialize};

/// Subscription tier for an EMTChat account.
///
/// Tiers determine feature access and usage limits. The declaration order is
/// the upgrade order, so `Tier` values compare with `<`/`>` and
/// [`Tier::next_upgrade`] walks the ladder for upgrade suggestions.
///
/// # Examples
///
/// ```
/// use emtchat_entitlement::Tier;
///
/// let tier = Tier::Pro;
/// let limits = tier.limits();
/// assert_eq!(limits.monthly_queries, Some(1_500));
/// assert!(Tier::Pro > Tier::Starter);
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Free tier for evaluation and light personal use
    #[default]
    Free,

    /// Starter tier for individual clinicians
    Starter,

    /// Pro tier for heavy individual use
    Pro,

    /// Team tier for group practices
    Team,

    /// Enterprise tier with custom pricing and limits
    Enterprise,
}

impl Tier {
    /// Get the entitlement limits for this tier.
    ///
    /// # Examples
    ///
    /// ```
    /// use emtchat_entitlement::Tier;
    ///
    /// let limits = Tier::Free.limits();
    /// assert_eq!(limits.monthly_queries, Some(25));
    /// assert!(Tier::Enterprise.limits().monthly_queries.is_none());
    /// ```
    pub fn limits(&self) -> &'static TierLimits {
        match self {
            Tier::Free => &FREE_LIMITS,
            Tier::Starter => &STARTER_LIMITS,
            Tier::Pro => &PRO_LIMITS,
            Tier::Team => &TEAM_LIMITS,
            Tier::Enterprise => &ENTERPRISE_LIMITS,
        }
    }

    /// Parse a tier from its string representation.
    ///
    /// Parsing is case-insensitive. Returns `None` for unrecognized values;
    /// callers deciding on a fallback (the status refresh falls back to
    /// [`Tier::Free`]) do so explicitly.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "free" => Some(Tier::Free),
            "starter" => Some(Tier::Starter),
            "pro" => Some(Tier::Pro),
            "team" => Some(Tier::Team),
            "enterprise" => Some(Tier::Enterprise),
            _ => None,
        }
    }

    /// Get the wire representation of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Starter => "starter",
            Tier::Pro => "pro",
            Tier::Team => "team",
            Tier::Enterprise => "enterprise",
        }
    }

    /// Get a human-readable display name for the tier.
    pub fn display_name(&self) -> &'static str {
        self.limits().display_name
    }

    /// The next tier up the upgrade ladder, if any.
    ///
    /// Used by upgrade CTAs to suggest the smallest meaningful step up.
    pub fn next_upgrade(&self) -> Option<Tier> {
        match self {
            Tier::Free => Some(Tier::Starter),
            Tier::Starter => Some(Tier::Pro),
            Tier::Pro => Some(Tier::Team),
            Tier::Team => Some(Tier::Enterprise),
            Tier::Enterprise => None,
        }
    }

    /// Check if this is a paid tier.
    pub fn is_paid(&self) -> bool {
        !matches!(self, Tier::Free)
    }

    /// Check if a feature is enabled on this tier.
    ///
    /// Tiers whose feature set is [`TierFeatures::All`] enable every feature.
    pub fn has_feature(&self, feature: Feature) -> bool {
        match self.limits().features {
            TierFeatures::All => true,
            TierFeatures::These(features) => features.contains(&feature),
        }
    }
}

/// Entitlement limits for a subscription tier.
///
/// Quota values of `None` indicate unlimited (or custom, for pricing).
#[derive(Debug, Clone, Serialize)]
pub struct TierLimits {
    /// Chat queries allowed per billing month (None = unlimited)
    pub monthly_queries: Option<u64>,

    /// Document storage quota in bytes (None = unlimited / custom)
    pub storage_bytes: Option<u64>,

    /// Maximum size of a single uploaded file, in bytes
    pub max_file_bytes: u64,

    /// Features enabled on this tier
    pub features: TierFeatures,

    /// Display name shown on pricing cards
    pub display_name: &'static str,

    /// One-line tier description
    pub description: &'static str,

    /// Monthly price in US cents (None = custom / contact sales)
    pub monthly_price_cents: Option<u32>,

    /// Yearly price in US cents (None = custom / contact sales)
    pub yearly_price_cents: Option<u32>,
}

/// The set of features enabled on a tier.
///
/// `All` replaces the original wire convention of a literal `"all"` flag with
/// a variant the compiler checks.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TierFeatures {
    /// Every feature, including ones added later.
    All,
    /// An explicit feature list.
    These(&'static [Feature]),
}

/// A gated product feature.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    /// Upload documents into chat
    DocumentUpload,

    /// Persistent chat history across sessions
    ChatHistory,

    /// Chat across several documents at once
    MultiDocumentChat,

    /// REST API access with personal tokens
    ApiAccess,

    /// Priority support queue
    PrioritySupport,

    /// Shared team workspaces
    TeamWorkspaces,

    /// Admin-managed chat personas
    PersonaManagement,

    /// Single sign-on
    Sso,

    /// Audit log export
    AuditLogs,
}

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

static FREE_LIMITS: TierLimits = TierLimits {
    monthly_queries: Some(25),
    storage_bytes: Some(100 * MIB),
    max_file_bytes: 10 * MIB,
    features: TierFeatures::These(&[Feature::DocumentUpload]),
    display_name: "Free",
    description: "Try EMTChat with a handful of documents",
    monthly_price_cents: Some(0),
    yearly_price_cents: Some(0),
};

static STARTER_LIMITS: TierLimits = TierLimits {
    monthly_queries: Some(300),
    storage_bytes: Some(2 * GIB),
    max_file_bytes: 25 * MIB,
    features: TierFeatures::These(&[Feature::DocumentUpload, Feature::ChatHistory]),
    display_name: "Starter",
    description: "For individual clinicians getting started",
    monthly_price_cents: Some(1_900),
    yearly_price_cents: Some(19_000),
};

static PRO_LIMITS: TierLimits = TierLimits {
    monthly_queries: Some(1_500),
    storage_bytes: Some(20 * GIB),
    max_file_bytes: 50 * MIB,
    features: TierFeatures::These(&[
        Feature::DocumentUpload,
        Feature::ChatHistory,
        Feature::MultiDocumentChat,
        Feature::ApiAccess,
        Feature::PrioritySupport,
    ]),
    display_name: "Pro",
    description: "Unrestricted document chat for power users",
    monthly_price_cents: Some(4_900),
    yearly_price_cents: Some(49_000),
};

static TEAM_LIMITS: TierLimits = TierLimits {
    monthly_queries: Some(10_000),
    storage_bytes: Some(100 * GIB),
    max_file_bytes: 100 * MIB,
    features: TierFeatures::These(&[
        Feature::DocumentUpload,
        Feature::ChatHistory,
        Feature::MultiDocumentChat,
        Feature::ApiAccess,
        Feature::PrioritySupport,
        Feature::TeamWorkspaces,
        Feature::PersonaManagement,
    ]),
    display_name: "Team",
    description: "Shared workspaces for group practices",
    monthly_price_cents: Some(14_900),
    yearly_price_cents: Some(149_000),
};

static ENTERPRISE_LIMITS: TierLimits = TierLimits {
    monthly_queries: None,
    storage_bytes: None,
    max_file_bytes: 250 * MIB,
    features: TierFeatures::All,
    display_name: "Enterprise",
    description: "Custom limits, SSO, and audit controls",
    monthly_price_cents: None,
    yearly_price_cents: None,
};

/// All tiers in upgrade order.
pub const ALL_TIERS: [Tier; 5] = [
    Tier::Free,
    Tier::Starter,
    Tier::Pro,
    Tier::Team,
    Tier::Enterprise,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_defined_for_every_tier() {
        for tier in ALL_TIERS {
            let limits = tier.limits();
            assert!(
                !limits.display_name.is_empty(),
                "{:?} has an empty display name",
                tier
            );
            assert!(limits.max_file_bytes > 0);
        }
    }

    #[test]
    fn test_tier_parsing() {
        assert_eq!(Tier::parse("free"), Some(Tier::Free));
        assert_eq!(Tier::parse("PRO"), Some(Tier::Pro));
        assert_eq!(Tier::parse("enterprise"), Some(Tier::Enterprise));
        assert_eq!(Tier::parse("platinum"), None);
        assert_eq!(Tier::parse(""), None);
    }

    #[test]
    fn test_tier_roundtrip() {
        for tier in ALL_TIERS {
            assert_eq!(Tier::parse(tier.as_str()), Some(tier));
        }
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::Starter > Tier::Free);
        assert!(Tier::Pro > Tier::Starter);
        assert!(Tier::Team > Tier::Pro);
        assert!(Tier::Enterprise > Tier::Team);
    }

    #[test]
    fn test_next_upgrade_walks_the_ladder() {
        assert_eq!(Tier::Free.next_upgrade(), Some(Tier::Starter));
        assert_eq!(Tier::Team.next_upgrade(), Some(Tier::Enterprise));
        assert_eq!(Tier::Enterprise.next_upgrade(), None);
    }

    #[test]
    fn test_enterprise_enables_everything() {
        for feature in [
            Feature::DocumentUpload,
            Feature::ChatHistory,
            Feature::MultiDocumentChat,
            Feature::ApiAccess,
            Feature::PrioritySupport,
            Feature::TeamWorkspaces,
            Feature::PersonaManagement,
            Feature::Sso,
            Feature::AuditLogs,
        ] {
            assert!(Tier::Enterprise.has_feature(feature));
        }
    }

    #[test]
    fn test_api_access_gated_at_pro() {
        assert!(!Tier::Starter.has_feature(Feature::ApiAccess));
        assert!(Tier::Pro.has_feature(Feature::ApiAccess));
    }

    #[test]
    fn test_enterprise_pricing_is_custom() {
        let limits = Tier::Enterprise.limits();
        assert!(limits.monthly_price_cents.is_none());
        assert!(limits.yearly_price_cents.is_none());
        assert!(limits.monthly_queries.is_none());
    }

    #[test]
    fn test_feature_wire_names() {
        let json = serde_json::to_string(&Feature::ApiAccess).unwrap();
        assert_eq!(json, "\"api-access\"");
    }
}
