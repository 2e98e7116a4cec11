//! Pedotransfer estimation of Van Genuchten parameters.
//!
//! When a layer carries only easily measured quantities — texture
//! fractions, bulk density, organic matter — its hydraulic parameters
//! must be estimated. This module implements the continuous
//! pedotransfer regressions of Wösten, Lilly, Nemes & Le Bas (1999),
//! fitted on the European HYPRES database, with a topsoil indicator
//! selecting between the topsoil and subsoil coefficient branches.
//!
//! All functions are pure and deterministic per layer; layers can be
//! estimated independently and in any order.
//!
//! # Units
//!
//! - clay, silt: percent of the mineral fraction
//! - organic matter: percent by mass
//! - bulk density: g/cm³
//! - resulting `alpha` in 1/cm, `k_sat` in cm/day

mod wosten;

pub use wosten::{
    DEFAULT_TOPSOIL_BOUNDARY_CM, THETA_R, WostenInput, alpha, estimate_parameters, is_topsoil,
    k_sat, lambda, n, theta_s,
};
