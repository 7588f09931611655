//! Report aggregation engine. Pure functions over already-fetched
//! `RevenueSeries` rows; no side effects, and empty input always yields
//! zero-valued or empty results rather than an error.

mod anomaly;
mod breakdown;
mod cohort;
mod series;
mod summary;

pub use anomaly::{ANOMALY_THRESHOLD, detect_anomalies};
pub use breakdown::breakdown;
pub use cohort::{CohortPeriod, cohort, cohort_by_period};
pub use series::build_daily_series;
pub use summary::{Summary, summarize};
