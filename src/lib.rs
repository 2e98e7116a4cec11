//! # pedon-rs
//!
//! Derives a depth-discretized soil-hydraulic parameter profile for a
//! single geographic point, for consumption by an external agronomic
//! simulation engine.
//!
//! This crate provides the building blocks of that pipeline:
//! - Piecewise-linear table interpolation ("Afgen" tables)
//! - Van Genuchten retention and conductivity curves, discretized at
//!   a fixed pF sample sequence
//! - Wösten (1999) pedotransfer estimation of hydraulic parameters
//!   from texture, bulk density, and organic matter
//! - A remote soil-property client (SoilGrids) with rate-limit retry
//! - A vector soil-map front end (point-in-polygon classification
//!   plus reference-table resolution to measured parameters)
//! - Profile assembly with depth extension and the soil-input
//!   document the simulation engine reads

pub mod http;
pub mod interp;
pub mod pedotransfer;
pub mod pipeline;
pub mod profile;
pub mod retention;
pub mod soilgrids;
pub mod soilmap;

// Re-export main types for convenience
pub use http::{HttpClient, HttpError, HttpResponse, ReqwestClient};
pub use interp::{AfgenError, afgen, validate_table};
pub use pedotransfer::{
    DEFAULT_TOPSOIL_BOUNDARY_CM, THETA_R, WostenInput, estimate_parameters, is_topsoil,
};
pub use pipeline::{PipelineError, SoilGridsPipeline, SoilMapPipeline};
pub use profile::{
    DepthExtension, DepthInterval, LayerProperties, ProfileDocumentConfig, ProfileError,
    SoilLayer, SoilProfile, SoilProfileDocument, TabulatedLayer, TextureMeasurement,
    assemble_profile, tabulate_layers,
};
pub use retention::{
    PF_SAMPLE_POINTS, RetentionError, VanGenuchtenParameters, water_potential_from_pf,
};
pub use soilgrids::{SoilGridsClient, SoilGridsConfig, SoilGridsError};
pub use soilmap::{
    ReferenceTableError, ReferenceTables, SoilMap, SoilMapError, SoilMapSource, ensure_soil_map,
};
