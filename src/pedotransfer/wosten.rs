//! Wösten (1999) continuous pedotransfer regressions.

use crate::retention::{RetentionError, VanGenuchtenParameters};

/// Residual moisture content assumed for estimated layers.
///
/// The Wösten regressions do not predict θr; the HYPRES fit holds it
/// at a small constant.
pub const THETA_R: f64 = 0.01;

/// Depth of the topsoil/subsoil boundary in cm.
pub const DEFAULT_TOPSOIL_BOUNDARY_CM: f64 = 30.0;

/// Classify a layer as topsoil by the depth of its midpoint.
pub fn is_topsoil(z_min: f64, z_max: f64, boundary_cm: f64) -> bool {
    (z_min + z_max) / 2.0 < boundary_cm
}

/// Measured inputs to the regressions for one layer.
#[derive(Clone, Copy, Debug)]
pub struct WostenInput {
    /// Clay content, percent of the mineral fraction
    pub clay_pct: f64,
    /// Silt content, percent of the mineral fraction
    pub silt_pct: f64,
    /// Organic matter, percent by mass
    pub organic_matter_pct: f64,
    /// Dry bulk density, g/cm³
    pub bulk_density: f64,
    /// Topsoil indicator (see [`is_topsoil`])
    pub topsoil: bool,
}

fn indicator(topsoil: bool) -> f64 {
    if topsoil { 1.0 } else { 0.0 }
}

/// Saturated moisture content θs (cm³/cm³).
pub fn theta_s(clay: f64, silt: f64, om: f64, density: f64, topsoil: bool) -> f64 {
    let ts = indicator(topsoil);
    0.7919 + 0.001691 * clay - 0.29619 * density - 0.000001491 * silt * silt
        + 0.0000821 * om * om
        + 0.02427 / clay
        + 0.01113 / silt
        + 0.01472 * silt.ln()
        - 0.0000733 * om * clay
        - 0.000619 * density * clay
        - 0.001183 * density * om
        - 0.0001664 * ts * silt
}

/// Inverse air-entry pressure α (1/cm).
pub fn alpha(clay: f64, silt: f64, om: f64, density: f64, topsoil: bool) -> f64 {
    let ts = indicator(topsoil);
    let alpha_star = -14.96 + 0.03135 * clay + 0.0351 * silt + 0.646 * om + 15.29 * density
        - 0.192 * ts
        - 4.671 * density * density
        - 0.000781 * clay * clay
        - 0.00687 * om * om
        + 0.0449 / om
        + 0.0663 * silt.ln()
        + 0.1482 * om.ln()
        - 0.04546 * density * silt
        - 0.4852 * density * om
        + 0.00673 * ts * clay;
    alpha_star.exp()
}

/// Shape parameter n (dimensionless, > 1).
pub fn n(clay: f64, silt: f64, om: f64, density: f64, topsoil: bool) -> f64 {
    let ts = indicator(topsoil);
    let n_star = -25.23 - 0.02195 * clay + 0.0074 * silt - 0.1940 * om + 45.5 * density
        - 7.24 * density * density
        + 0.0003658 * clay * clay
        + 0.002885 * om * om
        - 12.81 / density
        - 0.1524 / silt
        - 0.01958 / om
        - 0.2876 * silt.ln()
        - 0.0709 * om.ln()
        - 44.6 * density.ln()
        - 0.02264 * density * clay
        + 0.0896 * density * om
        + 0.00718 * ts * clay;
    1.0 + n_star.exp()
}

/// Conductivity shape parameter λ (dimensionless, in (-10, 10)).
pub fn lambda(clay: f64, silt: f64, om: f64, density: f64, _topsoil: bool) -> f64 {
    let lambda_star = 0.0202 + 0.0006193 * clay * clay - 0.001136 * om * om - 0.2316 * om.ln()
        - 0.03544 * density * clay
        + 0.00283 * density * silt
        + 0.0488 * density * om;
    10.0 * (lambda_star.exp() - 1.0) / (lambda_star.exp() + 1.0)
}

/// Saturated hydraulic conductivity Ks (cm/day).
pub fn k_sat(clay: f64, silt: f64, om: f64, density: f64, topsoil: bool) -> f64 {
    let ts = indicator(topsoil);
    let ks_star = 7.755 + 0.0352 * silt + 0.93 * ts
        - 0.967 * density * density
        - 0.000484 * clay * clay
        - 0.000322 * silt * silt
        + 0.001 / silt
        - 0.0748 / om
        - 0.643 * silt.ln()
        - 0.01398 * density * clay
        - 0.1673 * density * om
        + 0.02986 * ts * clay
        - 0.03305 * ts * silt;
    ks_star.exp()
}

/// Estimate the full parameter set for one layer.
///
/// # Errors
/// [`RetentionError::InvalidParameter`] when the regression output
/// falls outside the Van Genuchten domain, which happens for inputs
/// far outside the HYPRES calibration range (e.g. zero silt or zero
/// organic matter, where the log terms blow up).
pub fn estimate_parameters(input: &WostenInput) -> Result<VanGenuchtenParameters, RetentionError> {
    let WostenInput {
        clay_pct: clay,
        silt_pct: silt,
        organic_matter_pct: om,
        bulk_density: density,
        topsoil,
    } = *input;
    VanGenuchtenParameters::new(
        alpha(clay, silt, om, density, topsoil),
        n(clay, silt, om, density, topsoil),
        lambda(clay, silt, om, density, topsoil),
        THETA_R,
        theta_s(clay, silt, om, density, topsoil),
        k_sat(clay, silt, om, density, topsoil),
    )
}
