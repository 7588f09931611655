use edge_revenue_types::{Anomaly, AnomalyKind, RevenueSeries};

/// Day-over-day relative change beyond which an anomaly is emitted.
pub const ANOMALY_THRESHOLD: f64 = 0.20;

/// Scans a chronologically sorted raw series (no gap-filling; only days
/// with actual data participate) and flags day-over-day revenue movements
/// beyond the threshold. Only revenue is checked.
///
/// Adjacent *present* rows are compared even when calendar days are
/// missing between them, so a change across a data gap is still reported
/// as "day-over-day" without flagging the gap itself.
pub fn detect_anomalies(rows: &[RevenueSeries]) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    for pair in rows.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        let change = if prev.revenue_cents == 0 {
            if curr.revenue_cents > 0 {
                f64::INFINITY
            } else {
                0.0
            }
        } else {
            (curr.revenue_cents - prev.revenue_cents) as f64 / prev.revenue_cents as f64
        };

        if change.abs() > ANOMALY_THRESHOLD {
            anomalies.push(Anomaly {
                date: curr.date.clone(),
                kind: if change > 0.0 {
                    AnomalyKind::Spike
                } else {
                    AnomalyKind::Drop
                },
                metric: "revenue".to_string(),
                change,
            });
        }
    }

    anomalies
}
