//! Van Genuchten water-retention and hydraulic-conductivity curves.
//!
//! # Mathematical Background
//!
//! Soil water tension is expressed on the pF scale, the base-10
//! logarithm of the absolute pressure head in cm of water:
//!
//! ```text
//! ψ = 10^pF
//! ```
//!
//! The Van Genuchten closed forms then give volumetric moisture
//! content and hydraulic conductivity as functions of tension:
//!
//! ```text
//! θ(ψ)   = θr + (θs - θr) / (1 + (αψ)^n)^(1 - 1/n)
//!
//! K(ψ)   = Ks · ((1 + (αψ)^n)^m - (αψ)^(n-1))² / (1 + (αψ)^n)^(m(λ+2))
//!          with m = 1 - 1/n
//! ```
//!
//! Conductivity is reported as log10(K), the form the consuming
//! simulation engine expects in its `CONDfromPF` tables.
//!
//! The curves are discretized at a fixed sequence of 14 pF sample
//! points ([`PF_SAMPLE_POINTS`]) shared by every layer; the sample
//! set and its ordering are a contract with the downstream engine and
//! must not be reordered or resampled.

mod van_genuchten;

pub use van_genuchten::{
    PF_SAMPLE_POINTS, RetentionError, VanGenuchtenParameters, format_table,
    water_potential_from_pf,
};
