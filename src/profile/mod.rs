//! Layered soil-profile model and assembly.
//!
//! This module provides:
//! - **Layer model**: depth intervals, texture, chemistry, and
//!   hydraulic parameters per layer
//! - **Curve tabulation**: attaching discretized retention and
//!   conductivity tables to each layer
//! - **Profile assembly**: contiguity validation, depth extension to
//!   the required rooting depth, subsoil fallback block
//! - **Output document**: the nested structure handed to the external
//!   crop-simulation engine, with its exact field names
//!
//! # Profile Invariants
//!
//! Layers are ordered top to bottom, contiguous and non-overlapping
//! (`layer[i].z_max == layer[i+1].z_min`), and the first layer starts
//! at the surface (`z_min == 0`). `total_depth` is the sum of layer
//! thicknesses and equals the document's `RDMSOL`.
//!
//! # Example
//!
//! ```ignore
//! use pedon_rs::profile::{DepthExtension, ProfileDocumentConfig, assemble_profile};
//!
//! let tabulated = tabulate_layers(layers)?;
//! let profile = assemble_profile(tabulated, 120.0, DepthExtension::StretchDeepest)?;
//! let yaml = profile.to_document(&ProfileDocumentConfig::default()).to_yaml()?;
//! ```

mod assembler;
mod document;
mod layer;

pub use assembler::{DepthExtension, ProfileError, SoilProfile, assemble_profile};
pub use document::{
    ProfileDocumentConfig, SoilLayerBlock, SoilProfileDescription, SoilProfileDocument,
};
pub use layer::{
    DepthInterval, LayerProperties, SoilLayer, TabulatedLayer, TextureMeasurement,
    tabulate_layers,
};
