use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserPlan {
    Free,
    Pro,
    Enterprise,
}

impl UserPlan {
    /// Pulls allowed per calendar day. `None` means unlimited.
    pub fn daily_pull_limit(&self) -> Option<u32> {
        match self {
            Self::Free => Some(20),
            Self::Pro => Some(100),
            Self::Enterprise => None,
        }
    }
}

/// One day's pull counter inside the rolling window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPull {
    pub date: String,
    pub count: u32,
}

/// The single demo user. `daily_pulls` holds at most one entry per date and
/// is pruned of entries older than 30 days on every increment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub plan: UserPlan,
    pub daily_pulls: Vec<DailyPull>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn pull_count_on(&self, date: &str) -> u32 {
        self.daily_pulls
            .iter()
            .find(|p| p.date == date)
            .map(|p| p.count)
            .unwrap_or(0)
    }
}
