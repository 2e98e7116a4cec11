//! RD New (EPSG:28992) ↔ WGS84 transformation.
//!
//! The national soil map ships in the Dutch RD New projected CRS.
//! This implements the polynomial approximation of Schreutelkamp &
//! Strang van Hees (2001), accurate to well under a meter across the
//! Netherlands, which is far below the soil map's positional
//! accuracy.

/// RD New ↔ WGS84 polynomial transformation.
///
/// Both directions are expansions around the Amersfoort datum point.
#[derive(Clone, Copy, Debug, Default)]
pub struct RdNewProjection;

impl RdNewProjection {
    /// RD x of the Amersfoort datum point, meters
    const X0: f64 = 155_000.0;
    /// RD y of the Amersfoort datum point, meters
    const Y0: f64 = 463_000.0;
    /// Latitude of the datum point, degrees
    const LAT0: f64 = 52.155_174_40;
    /// Longitude of the datum point, degrees
    const LON0: f64 = 5.387_206_21;

    /// Convert RD New (x, y) in meters to WGS84 (lat, lon) in
    /// degrees.
    pub fn rd_to_geo(&self, x: f64, y: f64) -> (f64, f64) {
        let dx = (x - Self::X0) * 1e-5;
        let dy = (y - Self::Y0) * 1e-5;

        // Latitude correction in arcseconds.
        let dlat = 3235.65389 * dy - 32.58297 * dx * dx - 0.24750 * dy * dy
            - 0.84978 * dx * dx * dy
            - 0.06550 * dy * dy * dy
            - 0.01709 * dx * dx * dy * dy
            - 0.00738 * dx
            + 0.00530 * dx.powi(4)
            - 0.00039 * dx * dx * dy.powi(3)
            + 0.00033 * dx.powi(4) * dy
            - 0.00012 * dx * dy;

        // Longitude correction in arcseconds.
        let dlon = 5260.52916 * dx + 105.94684 * dx * dy + 2.45656 * dx * dy * dy
            - 0.81885 * dx.powi(3)
            + 0.05594 * dx * dy.powi(3)
            - 0.05607 * dx.powi(3) * dy
            + 0.01199 * dy
            - 0.00256 * dx.powi(3) * dy * dy
            + 0.00128 * dx * dy.powi(4)
            + 0.00022 * dx * dx
            - 0.00022 * dy * dy
            + 0.00026 * dx.powi(5);

        (Self::LAT0 + dlat / 3600.0, Self::LON0 + dlon / 3600.0)
    }

    /// Convert WGS84 (lat, lon) in degrees to RD New (x, y) in
    /// meters.
    pub fn geo_to_rd(&self, lat: f64, lon: f64) -> (f64, f64) {
        let dlat = 0.36 * (lat - Self::LAT0);
        let dlon = 0.36 * (lon - Self::LON0);

        let x = Self::X0 + 190_094.945 * dlon - 11_832.228 * dlat * dlon
            - 114.221 * dlat * dlat * dlon
            - 32.391 * dlon.powi(3)
            - 0.705 * dlat
            - 2.340 * dlat.powi(3) * dlon
            - 0.608 * dlat * dlon.powi(3)
            - 0.008 * dlon * dlon
            + 0.148 * dlat * dlat * dlon.powi(3);

        let y = Self::Y0 + 309_056.544 * dlat + 3638.893 * dlon * dlon
            + 73.077 * dlat * dlat
            - 157.984 * dlat * dlon * dlon
            + 59.788 * dlat.powi(3)
            + 0.433 * dlon
            - 6.439 * dlat * dlat * dlon * dlon
            - 0.032 * dlat * dlon
            + 0.092 * dlon.powi(4)
            - 0.054 * dlat * dlon.powi(4);

        (x, y)
    }
}
