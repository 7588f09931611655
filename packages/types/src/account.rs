use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two mocked ad platforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationPlatform {
    FacebookAds,
    GoogleAdsense,
}

impl IntegrationPlatform {
    /// Whether the platform is expected to carry ad spend at all.
    /// AdSense is a revenue-only platform in the mock data.
    pub fn carries_spend(&self) -> bool {
        matches!(self, Self::FacebookAds)
    }
}

/// A connected ad account. `platform` is immutable after creation; only
/// `last_pulled_at` is ever patched, by a pull.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationAccount {
    pub id: String,
    pub platform: IntegrationPlatform,
    pub account_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_pulled_at: Option<DateTime<Utc>>,
}
