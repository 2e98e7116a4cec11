//! Integration tests for Van Genuchten curve tabulation.

use pedon_rs::{PF_SAMPLE_POINTS, VanGenuchtenParameters, afgen};

fn reference() -> VanGenuchtenParameters {
    VanGenuchtenParameters::new(0.01, 1.5, -1.0, 0.01, 0.45, 50.0).unwrap()
}

#[test]
fn test_retention_table_matches_closed_form() {
    let vg = reference();
    let table = vg.retention_table();
    for (i, &pf) in PF_SAMPLE_POINTS.iter().enumerate() {
        let psi = 10f64.powf(pf);
        let expected =
            0.01 + (0.45 - 0.01) / (1.0 + (0.01 * psi).powf(1.5)).powf(1.0 - 1.0 / 1.5);
        assert_eq!(table[2 * i], pf);
        assert!(
            (table[2 * i + 1] - expected).abs() < 1e-9,
            "retention mismatch at pF {pf}: {} vs {expected}",
            table[2 * i + 1]
        );
    }
}

#[test]
fn test_conductivity_table_matches_closed_form() {
    let vg = reference();
    let table = vg.conductivity_table().unwrap();
    let (alpha, n, lambda, k_sat) = (0.01, 1.5, -1.0, 50.0);
    let m = 1.0 - 1.0 / n;
    for (i, &pf) in PF_SAMPLE_POINTS.iter().enumerate() {
        let psi = 10f64.powf(pf);
        let ah: f64 = alpha * psi;
        let h1 = (1.0 + ah.powf(n)).powf(m);
        let h2 = ah.powf(n - 1.0);
        let k_h = k_sat * (h1 - h2).powi(2) / (1.0 + ah.powf(n)).powf(m * (lambda + 2.0));
        let expected = k_h.log10();
        assert_eq!(table[2 * i], pf);
        assert!(
            (table[2 * i + 1] - expected).abs() < 1e-9,
            "conductivity mismatch at pF {pf}: {} vs {expected}",
            table[2 * i + 1]
        );
    }
}

#[test]
fn test_moisture_saturates_at_wet_end_and_decreases() {
    let vg = reference();
    // At pF -1 the tension is a tenth of a cm of water; moisture is
    // within a rounding error of saturation.
    let wettest = vg.moisture_content(PF_SAMPLE_POINTS[0]);
    assert!((wettest - 0.45).abs() < 1e-4);

    let mut previous = f64::INFINITY;
    for &pf in PF_SAMPLE_POINTS.iter() {
        let theta = vg.moisture_content(pf);
        assert!(
            theta < previous,
            "moisture did not decrease at pF {pf}: {theta} >= {previous}"
        );
        assert!(theta >= vg.theta_r && theta <= vg.theta_s);
        previous = theta;
    }
}

#[test]
fn test_tabulated_curve_round_trips_through_afgen() {
    // The downstream engine evaluates the discretized table with
    // Afgen; at the sample points this must reproduce the closed
    // form exactly.
    let vg = reference();
    let table = vg.retention_table();
    for &pf in PF_SAMPLE_POINTS.iter() {
        let interpolated = afgen(pf, &table).unwrap();
        assert!((interpolated - vg.moisture_content(pf)).abs() < 1e-12);
    }
    // Between sample points Afgen is a chord of a convex-ish curve;
    // it still stays within the physical moisture bounds.
    let between = afgen(2.5, &table).unwrap();
    assert!(between > vg.theta_r && between < vg.theta_s);
}
