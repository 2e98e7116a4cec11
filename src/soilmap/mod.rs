//! Soil-map front end: resolve a point to literal measured layers.
//!
//! This module provides:
//! - **Archive fetch**: one-time download and two-stage extraction of
//!   the vector soil map into a local cache
//! - **Projection**: RD New ↔ WGS84 polynomial transformation
//! - **Lookup**: point-in-polygon resolution of a WGS84 point to a
//!   soil-classification code
//! - **Reference tables**: code → reference profile → per-layer
//!   measured Van Genuchten parameters
//!
//! # Resolution Chain
//!
//! ```text
//! (lat, lon) ──polygon──▶ BODEMCODE ──code table──▶ iProfile
//!            ──profile table──▶ (depth, soil unit)*  per layer
//!            ──block partition──▶ "B7" / "O3"
//!            ──parameter table──▶ {alpha, n, lambda, θr, θs, Ks}
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pedon_rs::http::ReqwestClient;
//! use pedon_rs::soilmap::{ReferenceTables, SoilMap, SoilMapSource, ensure_soil_map};
//!
//! let http = ReqwestClient::new()?;
//! let source = SoilMapSource::bofek2020("cache/bofek2020");
//! let shapefile = ensure_soil_map(&http, &source)?;
//! let map = SoilMap::load(&shapefile)?;
//! let tables = ReferenceTables::load(
//!     "data/BodemCode.csv",
//!     "data/AllProfiles_368.csv",
//!     "data/StaringReeksPARS_2018.csv",
//! )?;
//! let code = map.lookup(52.01, 5.3)?;
//! let layers = tables.layers_for_code(code)?;
//! ```

mod archive;
mod lookup;
mod projection;
mod tables;

pub use archive::{ArchiveError, SoilMapSource, ensure_soil_map};
pub use lookup::{SoilMap, SoilMapError};
pub use projection::RdNewProjection;
pub use tables::{ReferenceTables, ReferenceTableError, staring_block_name};
