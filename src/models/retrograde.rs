use serde::{Deserialize, Serialize};

/// Query parameters for `GET /retrogrades`.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrogradesQuery {
    /// Date in `YYYY/MM/DD` format.
    pub date: String,
    /// Look-ahead window for upcoming retrogrades (days, default 90).
    pub days_ahead: Option<i32>,
}

/// A body that is retrograde on the queried date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrogradeStatus {
    pub body: String,
    /// Date the body stations direct, if within the search window.
    pub direct_station: Option<String>,
}

/// A retrograde period beginning within the look-ahead window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingRetrograde {
    pub body: String,
    pub starts: String,
    pub ends: String,
    pub days_until: i64,
}

/// Response body for `GET /retrogrades`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrogradesResponse {
    pub date: String,
    pub retrograde: Vec<RetrogradeStatus>,
    pub upcoming: Vec<UpcomingRetrograde>,
}
