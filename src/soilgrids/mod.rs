//! Remote soil-property client (SoilGrids REST service).
//!
//! Queries interpolated soil-property means for a point at five fixed
//! depth bands (0–5, 5–15, 15–30, 30–60, 60–100 cm) and turns them
//! into measured soil layers ready for pedotransfer estimation.
//!
//! # Request
//!
//! A single GET with repeated `property` and `depth` query
//! parameters:
//!
//! ```text
//! .../properties/query?lon=5.3&lat=52.01&property=bdod&property=clay&...&depth=0-5cm&...
//! ```
//!
//! The service rate-limits aggressively; HTTP 429 is retried after a
//! fixed wait, indefinitely. This favors eventual success over
//! responsiveness, which is acceptable for an offline batch
//! precompute. Any other non-2xx status is fatal.
//!
//! # Unit Normalization
//!
//! Raw means arrive in integer-scaled units; every value is divided
//! by the per-property `d_factor` the response carries before use.
//! After normalization: texture fractions in percent, bulk density in
//! g/cm³, organic carbon and nitrogen in g/kg, pH in pH units.
//!
//! # Example
//!
//! ```ignore
//! use pedon_rs::http::ReqwestClient;
//! use pedon_rs::soilgrids::{SoilGridsClient, SoilGridsConfig};
//!
//! let client = SoilGridsClient::new(ReqwestClient::new()?, SoilGridsConfig::default());
//! let response = client.fetch(52.01, 5.3)?;
//! let bands = extract_bands(&response, &client.config().depths)?;
//! ```

mod client;
mod provider;
mod response;

pub use client::{SoilGridsClient, SoilGridsConfig, SoilGridsError};
pub use provider::{BandMeasurement, extend_bands, extract_bands, layers_from_bands};
pub use response::{
    DepthValues, PropertyLayer, QueryResponse, ResponseProperties, UnitMeasure, ValueStats,
};
