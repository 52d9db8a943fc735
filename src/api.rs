/// API module for interacting with the service-management backend
///
/// This module provides a small blocking client for the REST endpoints the
/// report pipeline needs: the usage report itself, the component list, and
/// the dashboard summaries. All responses are JSON with camelCase fields;
/// decoding goes straight into the types in [`crate::types`].

use log::debug;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::FetchError;
use crate::types::{ComponentInfo, DashboardStats, DateRange, ReportPayload, ServiceRecordSummary, UpcomingService};

const USER_AGENT: &str = "envanter-rapor/0.3.1 (https://github.com/atolye-yazilim/envanter-rapor)";

/// Base URL used when neither the flag nor the environment provides one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Blocking client bound to one API base URL.
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url`. A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build();
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        ApiClient { agent, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the usage report for one component over a date range.
    ///
    /// # Arguments
    /// * `component_id` - The inventory component to report on
    /// * `range` - Inclusive range, sent as `startDate`/`endDate` ISO dates
    pub fn usage_report(&self, component_id: i64, range: &DateRange) -> Result<ReportPayload, FetchError> {
        let url = endpoint_url(
            &self.base_url,
            &format!("components/{}/usage-report", component_id),
            &[
                ("startDate", &range.start_date.to_string()),
                ("endDate", &range.end_date.to_string()),
            ],
        );
        self.get_json(&url)
    }

    /// Fetch all inventory components.
    pub fn components(&self) -> Result<Vec<ComponentInfo>, FetchError> {
        let url = endpoint_url(&self.base_url, "components", &[]);
        self.get_json(&url)
    }

    /// Fetch the workshop-wide dashboard counters.
    pub fn dashboard_stats(&self) -> Result<DashboardStats, FetchError> {
        let url = endpoint_url(&self.base_url, "dashboard/stats", &[]);
        self.get_json(&url)
    }

    /// Fetch the most recent service records, newest first.
    pub fn recent_service_records(&self, limit: usize) -> Result<Vec<ServiceRecordSummary>, FetchError> {
        let url = endpoint_url(&self.base_url, "service-records", &[("limit", &limit.to_string())]);
        self.get_json(&url)
    }

    /// Fetch scheduled future services, soonest first.
    pub fn upcoming_services(&self, limit: usize) -> Result<Vec<UpcomingService>, FetchError> {
        let url = endpoint_url(&self.base_url, "upcoming-services", &[("limit", &limit.to_string())]);
        self.get_json(&url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!("GET {}", url);
        let response = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::Status(status, _) => FetchError::Status { status, url: url.to_string() },
            ureq::Error::Transport(transport) => {
                FetchError::Transport { url: url.to_string(), source: Box::new(transport) }
            }
        })?;
        response
            .into_json()
            .map_err(|source| FetchError::Decode { url: url.to_string(), source })
    }
}

/// Build an endpoint URL with optional query parameters.
pub fn endpoint_url(base: &str, path: &str, parms: &[(&str, &str)]) -> String {
    let url = format!("{}/{}", base, path);

    if !parms.is_empty() {
        let parms: Vec<String> = parms.iter().map(|&(k, v)| format!("{}={}", k, v)).collect();
        let parms: String = parms.join("&");
        format!("{}?{}", url, parms)
    } else {
        url
    }
}

/// Read a report payload from a local JSON file instead of the API.
/// Lets reports be regenerated from a saved payload without a backend.
pub fn load_payload_file(path: &Path) -> Result<ReportPayload, FetchError> {
    debug!("reading payload file {:?}", path);
    let text = std::fs::read_to_string(path)
        .map_err(|source| FetchError::PayloadFile { path: PathBuf::from(path), source })?;
    serde_json::from_str(&text).map_err(|source| FetchError::PayloadParse { path: PathBuf::from(path), source })
}
