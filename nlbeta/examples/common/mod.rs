use chrono::{DateTime, TimeZone, Utc};
use nlbeta::BetaConnector;
use std::sync::Arc;

#[must_use]
pub fn get_connector() -> Arc<dyn BetaConnector> {
    println!("--- (Using Mock Connector with synthetic fixtures) ---");
    Arc::new(nlbeta_mock::MockConnector::new())
}

/// Five calendar years covered by the mock fixtures.
#[allow(dead_code)]
#[must_use]
pub fn five_years() -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc
        .with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
        .single()
        .expect("valid start date");
    let end = Utc
        .with_ymd_and_hms(2024, 12, 31, 23, 59, 59)
        .single()
        .expect("valid end date");
    (start, end)
}
