//! Closed-form Van Genuchten evaluation and table generation.

use thiserror::Error;

/// The fixed pF sample points at which retention and conductivity
/// tables are generated.
///
/// Shared by every layer of a profile. The downstream engine indexes
/// tables by these values; reordering or resampling breaks that
/// contract.
pub const PF_SAMPLE_POINTS: [f64; 14] = [
    -1.0, 1.0, 1.3, 1.7, 2.0, 2.3, 2.4, 2.7, 3.0, 3.3, 3.7, 4.0, 4.2, 6.0,
];

/// Error type for retention-curve evaluation.
#[derive(Debug, Error, PartialEq)]
pub enum RetentionError {
    /// A curve parameter is outside the model's domain.
    #[error("invalid Van Genuchten parameter: {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// Evaluation produced a non-finite or non-positive result where
    /// a logarithm is required.
    #[error("conductivity is not positive and finite at pF {pf} (k_h = {k_h})")]
    NumericDomain { pf: f64, k_h: f64 },
}

/// Convert a pF value to water potential ψ in cm of water.
pub fn water_potential_from_pf(pf: f64) -> f64 {
    10f64.powf(pf)
}

/// Van Genuchten curve parameters for one soil layer.
///
/// Either measured directly (reference soil tables) or estimated from
/// texture via pedotransfer regression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VanGenuchtenParameters {
    /// Inverse air-entry pressure α (1/cm)
    pub alpha: f64,
    /// Shape parameter n (dimensionless, > 1)
    pub n: f64,
    /// Conductivity shape parameter λ (dimensionless)
    pub lambda: f64,
    /// Residual volumetric moisture content θr (cm³/cm³)
    pub theta_r: f64,
    /// Saturated volumetric moisture content θs (cm³/cm³)
    pub theta_s: f64,
    /// Saturated hydraulic conductivity Ks (cm/day)
    pub k_sat: f64,
}

impl VanGenuchtenParameters {
    /// Create a parameter set, checking the model's domain.
    ///
    /// # Errors
    /// [`RetentionError::InvalidParameter`] when `alpha <= 0`,
    /// `n <= 1`, `k_sat <= 0`, or the moisture limits are not ordered
    /// `0 <= theta_r < theta_s`.
    pub fn new(
        alpha: f64,
        n: f64,
        lambda: f64,
        theta_r: f64,
        theta_s: f64,
        k_sat: f64,
    ) -> Result<Self, RetentionError> {
        if !(alpha > 0.0) {
            return Err(RetentionError::InvalidParameter {
                name: "alpha",
                value: alpha,
            });
        }
        if !(n > 1.0) {
            return Err(RetentionError::InvalidParameter { name: "n", value: n });
        }
        if !(k_sat > 0.0) {
            return Err(RetentionError::InvalidParameter {
                name: "k_sat",
                value: k_sat,
            });
        }
        if !(theta_r >= 0.0 && theta_r < theta_s) {
            return Err(RetentionError::InvalidParameter {
                name: "theta_r",
                value: theta_r,
            });
        }
        Ok(Self {
            alpha,
            n,
            lambda,
            theta_r,
            theta_s,
            k_sat,
        })
    }

    /// Volumetric moisture content θ at the given pF.
    pub fn moisture_content(&self, pf: f64) -> f64 {
        let psi = water_potential_from_pf(pf);
        let exponent = 1.0 - 1.0 / self.n;
        self.theta_r
            + (self.theta_s - self.theta_r)
                / (1.0 + (self.alpha * psi).powf(self.n)).powf(exponent)
    }

    /// log10 of hydraulic conductivity at the given pF.
    ///
    /// # Errors
    /// [`RetentionError::NumericDomain`] when the computed
    /// conductivity is zero, negative, or non-finite. This is raised
    /// rather than clamped: a non-positive k_h means the parameter
    /// set is outside the model's validity and the resulting table
    /// would be garbage.
    pub fn log10_conductivity(&self, pf: f64) -> Result<f64, RetentionError> {
        let psi = water_potential_from_pf(pf);
        let m = 1.0 - 1.0 / self.n;
        let ah = self.alpha * psi;
        let h1 = (1.0 + ah.powf(self.n)).powf(m);
        let h2 = ah.powf(self.n - 1.0);
        let denom = (1.0 + ah.powf(self.n)).powf(m * (self.lambda + 2.0));
        let k_h = self.k_sat * (h1 - h2).powi(2) / denom;
        if !k_h.is_finite() || k_h <= 0.0 {
            return Err(RetentionError::NumericDomain { pf, k_h });
        }
        Ok(k_h.log10())
    }

    /// Flattened `(pF, θ)` retention table over [`PF_SAMPLE_POINTS`].
    pub fn retention_table(&self) -> Vec<f64> {
        let mut table = Vec::with_capacity(2 * PF_SAMPLE_POINTS.len());
        for &pf in PF_SAMPLE_POINTS.iter() {
            table.push(pf);
            table.push(self.moisture_content(pf));
        }
        table
    }

    /// Flattened `(pF, log10 K)` conductivity table over
    /// [`PF_SAMPLE_POINTS`].
    pub fn conductivity_table(&self) -> Result<Vec<f64>, RetentionError> {
        let mut table = Vec::with_capacity(2 * PF_SAMPLE_POINTS.len());
        for &pf in PF_SAMPLE_POINTS.iter() {
            table.push(pf);
            table.push(self.log10_conductivity(pf)?);
        }
        Ok(table)
    }
}

/// Format a flattened `(x, y)` table as a compact bracketed string.
///
/// Used when embedding tables in human-readable output.
pub fn format_table(table: &[f64]) -> String {
    let mut s = String::from("[");
    for pair in table.chunks_exact(2) {
        s.push_str(&format!("{:4.1}, {:7.4}, ", pair[0], pair[1]));
    }
    s.push(']');
    s.replace("  ", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_params() -> VanGenuchtenParameters {
        VanGenuchtenParameters::new(0.01, 1.5, -1.0, 0.01, 0.45, 50.0).unwrap()
    }

    #[test]
    fn test_moisture_near_saturation_at_lowest_pf() {
        let vg = reference_params();
        let theta = vg.moisture_content(-1.0);
        assert!(
            (theta - vg.theta_s).abs() < 1e-4,
            "expected ~theta_s at pF -1, got {theta}"
        );
    }

    #[test]
    fn test_moisture_matches_closed_form() {
        let vg = reference_params();
        let pf = 2.0;
        let psi = 10f64.powf(pf);
        let expected = 0.01 + (0.45 - 0.01) / (1.0 + (0.01 * psi).powf(1.5)).powf(1.0 - 1.0 / 1.5);
        assert!((vg.moisture_content(pf) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(VanGenuchtenParameters::new(-0.01, 1.5, -1.0, 0.01, 0.45, 50.0).is_err());
        assert!(VanGenuchtenParameters::new(0.01, 0.9, -1.0, 0.01, 0.45, 50.0).is_err());
        assert!(VanGenuchtenParameters::new(0.01, 1.5, -1.0, 0.50, 0.45, 50.0).is_err());
        assert!(VanGenuchtenParameters::new(0.01, 1.5, -1.0, 0.01, 0.45, 0.0).is_err());
    }

    #[test]
    fn test_tables_share_sample_points() {
        let vg = reference_params();
        let sm = vg.retention_table();
        let cond = vg.conductivity_table().unwrap();
        assert_eq!(sm.len(), 28);
        assert_eq!(cond.len(), 28);
        for (i, &pf) in PF_SAMPLE_POINTS.iter().enumerate() {
            assert_eq!(sm[2 * i], pf);
            assert_eq!(cond[2 * i], pf);
        }
    }

    #[test]
    fn test_format_table_shape() {
        let s = format_table(&[-1.0, 0.45, 6.0, 0.01]);
        assert!(s.starts_with('['));
        assert!(s.ends_with(']'));
        assert!(s.contains("-1.0"));
    }
}
