//! Typed HTTP client for the EdgeRevenue API.
//!
//! Mirrors the dashboard's fetch wrapper: a per-attempt timeout, a bounded
//! number of attempts with linear backoff, retries on 5xx/timeout/connect
//! failures, and fail-fast on 4xx application errors. Retrying the pull
//! endpoint is safe only because the underlying insertion is idempotent;
//! there is no client-side dedup key.

use edge_revenue_types::{
    AdvancedReport, AggregatedReport, AnomalyReport, ApiEnvelope, IntegrationAccount,
    IntegrationPlatform, PricingTier, PullResult, RevenueSeries, User, UserPlan, Value,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Attempts per request, including the first.
const DEFAULT_RETRIES: u32 = 3;
/// Per-attempt timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Backoff grows linearly: `BACKOFF_STEP * attempt_number`.
const BACKOFF_STEP: Duration = Duration::from_millis(100);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("malformed response envelope: {0}")]
    Envelope(String),
}

enum Disposition {
    Retry(ClientError),
    Fail(ClientError),
}
use Disposition::{Fail, Retry};

#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    retries: u32,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, DEFAULT_RETRIES, DEFAULT_TIMEOUT)
    }

    pub fn with_options(
        base_url: impl Into<String>,
        retries: u32,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::Network(err.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            retries: retries.max(1),
        })
    }

    pub async fn list_integrations(&self) -> Result<Vec<IntegrationAccount>, ClientError> {
        self.request(Method::GET, "/api/integrations", None).await
    }

    pub async fn create_integration(
        &self,
        platform: IntegrationPlatform,
        account_name: &str,
    ) -> Result<IntegrationAccount, ClientError> {
        let body = serde_json::json!({
            "platform": platform,
            "accountName": account_name,
        });
        self.request(Method::POST, "/api/integrations", Some(body))
            .await
    }

    pub async fn pull(&self, account_id: &str) -> Result<PullResult, ClientError> {
        self.request(
            Method::POST,
            &format!("/api/integrations/{account_id}/pull"),
            None,
        )
        .await
    }

    pub async fn daily_report(
        &self,
        account_id: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Vec<RevenueSeries>, ClientError> {
        let mut path = format!("/api/reports/daily?accountId={account_id}");
        if let Some(start) = start {
            path.push_str(&format!("&start={start}"));
        }
        if let Some(end) = end {
            path.push_str(&format!("&end={end}"));
        }
        self.request(Method::GET, &path, None).await
    }

    pub async fn advanced_report(&self, account_id: &str) -> Result<AdvancedReport, ClientError> {
        self.request(
            Method::GET,
            &format!("/api/reports/advanced?accountId={account_id}"),
            None,
        )
        .await
    }

    pub async fn aggregated_report(
        &self,
        spend_accounts: &[&str],
        revenue_account: &str,
    ) -> Result<AggregatedReport, ClientError> {
        let path = format!(
            "/api/reports/advanced?spendAccounts={}&revenueAccount={revenue_account}",
            spend_accounts.join(",")
        );
        self.request(Method::GET, &path, None).await
    }

    pub async fn check_anomalies(&self, account_id: &str) -> Result<AnomalyReport, ClientError> {
        self.request(
            Method::POST,
            &format!("/api/alerts/check?accountId={account_id}"),
            None,
        )
        .await
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        self.request(Method::GET, "/api/users/me", None).await
    }

    pub async fn set_plan(&self, plan: UserPlan) -> Result<User, ClientError> {
        let body = serde_json::json!({ "plan": plan });
        self.request(Method::PUT, "/api/users/me/plan", Some(body))
            .await
    }

    pub async fn pricing(&self) -> Result<Vec<PricingTier>, ClientError> {
        self.request(Method::GET, "/api/pricing", None).await
    }

    /// Raw CSV text of the last-30-days export.
    pub async fn export_csv(&self, account_id: &str) -> Result<String, ClientError> {
        let url = format!("{}/api/export/csv?accountId={account_id}", self.base_url);
        let mut last_error = ClientError::Network("no attempts made".to_string());

        for attempt in 1..=self.retries {
            match self.http.get(&url).send().await {
                Ok(response) if response.status().is_success() => {
                    return response
                        .text()
                        .await
                        .map_err(|err| ClientError::Network(err.to_string()));
                }
                Ok(response) => match classify_status(&url, response).await {
                    Retry(err) => last_error = err,
                    Fail(err) => return Err(err),
                },
                Err(err) => match classify_transport(err) {
                    Retry(err) => last_error = err,
                    Fail(err) => return Err(err),
                },
            }
            if attempt < self.retries {
                backoff(attempt).await;
            }
        }
        Err(last_error)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut last_error = ClientError::Network("no attempts made".to_string());

        for attempt in 1..=self.retries {
            let mut builder = self.http.request(method.clone(), &url);
            if let Some(body) = &body {
                builder = builder.json(body);
            }

            match builder.send().await {
                Ok(response) if response.status().is_success() => {
                    let envelope: ApiEnvelope<T> = response
                        .json()
                        .await
                        .map_err(|err| ClientError::Envelope(err.to_string()))?;
                    return envelope.into_result().map_err(|message| {
                        ClientError::Envelope(message)
                    });
                }
                Ok(response) => match classify_status(&url, response).await {
                    Retry(err) => last_error = err,
                    Fail(err) => return Err(err),
                },
                Err(err) => match classify_transport(err) {
                    Retry(err) => last_error = err,
                    Fail(err) => return Err(err),
                },
            }
            if attempt < self.retries {
                backoff(attempt).await;
            }
        }
        Err(last_error)
    }
}

/// 5xx responses are retried; everything else fails fast with the
/// envelope's error message when one is present.
async fn classify_status(url: &str, response: reqwest::Response) -> Disposition {
    let status = response.status();
    let message = response
        .json::<ApiEnvelope<Value>>()
        .await
        .ok()
        .and_then(|envelope| envelope.error)
        .unwrap_or_else(|| format!("request failed with status {status}"));
    let error = ClientError::Api {
        status: status.as_u16(),
        message,
    };

    if status.is_server_error() {
        tracing::warn!(%url, %status, "server error, retrying");
        Retry(error)
    } else {
        tracing::warn!(%url, %status, "request failed");
        Fail(error)
    }
}

/// Timeouts, connection failures and other transport-level errors are all
/// retryable, matching the browser wrapper's behavior.
fn classify_transport(err: reqwest::Error) -> Disposition {
    if err.is_timeout() {
        Retry(ClientError::Timeout)
    } else {
        Retry(ClientError::Network(err.to_string()))
    }
}

async fn backoff(attempt: u32) {
    tokio::time::sleep(BACKOFF_STEP * attempt).await;
}
