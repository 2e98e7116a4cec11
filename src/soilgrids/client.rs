//! Query client with fixed-interval retry on rate limiting.

use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::http::{HttpClient, HttpError};

use super::response::QueryResponse;

/// Error type for the remote soil-property service.
#[derive(Debug, Error)]
pub enum SoilGridsError {
    /// Transport-level failure.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Non-retryable HTTP status.
    #[error("soil-property service returned HTTP {status}")]
    Status { status: u16 },

    /// Response body did not match the expected JSON shape.
    #[error("malformed soil-property response: {0}")]
    Malformed(String),

    /// The response lacks one of the requested properties.
    #[error("response is missing property {0}")]
    MissingProperty(String),

    /// The service reported no mean value (point outside coverage).
    #[error("no mean value for property {property} at depth {depth}")]
    MissingData { property: String, depth: String },

    /// A depth label could not be parsed into a `min-max cm` band.
    #[error("unparseable depth label {0:?}")]
    BadDepthLabel(String),

    /// A property layer carries fewer depth bands than requested.
    #[error("property {property} has {got} depth bands, expected {expected}")]
    BandCountMismatch {
        property: String,
        got: usize,
        expected: usize,
    },
}

/// Configuration for the soil-property client.
///
/// All service constants are explicit here rather than baked into the
/// client, so alternative deployments and tests can swap them.
#[derive(Clone, Debug)]
pub struct SoilGridsConfig {
    /// Query endpoint
    pub base_url: String,
    /// Properties to request
    pub properties: Vec<String>,
    /// Depth-band labels to request, shallow to deep
    pub depths: Vec<String>,
    /// Wait between attempts when the service answers 429
    pub retry_wait: Duration,
    /// Mass conversion factor from organic carbon to organic matter
    pub carbon_to_organic_matter: f64,
    /// Air capacity assigned uniformly to every layer, cm³/cm³
    pub air_capacity: f64,
    /// Topsoil/subsoil boundary for pedotransfer, cm
    pub topsoil_boundary_cm: f64,
}

impl Default for SoilGridsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://rest.isric.org/soilgrids/v2.0/properties/query".to_string(),
            properties: ["bdod", "clay", "phh2o", "sand", "silt", "soc", "nitrogen"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            depths: ["0-5cm", "5-15cm", "15-30cm", "30-60cm", "60-100cm"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            retry_wait: Duration::from_secs(15),
            carbon_to_organic_matter: 0.58,
            air_capacity: 0.03,
            topsoil_boundary_cm: crate::pedotransfer::DEFAULT_TOPSOIL_BOUNDARY_CM,
        }
    }
}

/// Client for the soil-property query endpoint.
pub struct SoilGridsClient<C: HttpClient> {
    http: C,
    config: SoilGridsConfig,
}

impl<C: HttpClient> SoilGridsClient<C> {
    pub fn new(http: C, config: SoilGridsConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &SoilGridsConfig {
        &self.config
    }

    fn query_url(&self, lat: f64, lon: f64) -> String {
        let mut url = format!("{}?lon={}&lat={}", self.config.base_url, lon, lat);
        for property in &self.config.properties {
            url.push_str("&property=");
            url.push_str(property);
        }
        for depth in &self.config.depths {
            url.push_str("&depth=");
            url.push_str(depth);
        }
        url
    }

    /// Fetch property means for a point.
    ///
    /// Retries indefinitely on HTTP 429, sleeping
    /// [`SoilGridsConfig::retry_wait`] between attempts and logging
    /// each wait. Any other non-2xx status is surfaced as
    /// [`SoilGridsError::Status`].
    pub fn fetch(&self, lat: f64, lon: f64) -> Result<QueryResponse, SoilGridsError> {
        let url = self.query_url(lat, lon);
        debug!(%url, "querying soil-property service");
        loop {
            let response = self.http.get(&url)?;
            if response.status == 429 {
                warn!(
                    wait_secs = self.config.retry_wait.as_secs_f64(),
                    "soil-property service rate limit hit, retrying after wait"
                );
                thread::sleep(self.config.retry_wait);
                continue;
            }
            if !response.is_success() {
                return Err(SoilGridsError::Status {
                    status: response.status,
                });
            }
            return serde_json::from_slice(&response.body)
                .map_err(|e| SoilGridsError::Malformed(e.to_string()));
        }
    }
}
