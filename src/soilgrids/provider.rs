//! From raw property bands to measured soil layers.

use tracing::debug;

use crate::pedotransfer::{self, WostenInput};
use crate::profile::{DepthInterval, LayerProperties, SoilLayer, TextureMeasurement};
use crate::retention::RetentionError;

use super::client::{SoilGridsConfig, SoilGridsError};
use super::response::QueryResponse;

/// Normalized property means for one depth band.
///
/// Units after `d_factor` division: texture in percent of the mineral
/// fraction, bulk density in g/cm³, organic carbon and nitrogen in
/// g/kg.
#[derive(Clone, Debug)]
pub struct BandMeasurement {
    pub depth: DepthInterval,
    pub bulk_density: f64,
    pub clay_pct: f64,
    pub sand_pct: f64,
    pub silt_pct: f64,
    pub ph: f64,
    pub organic_carbon: f64,
    pub nitrogen: f64,
}

fn parse_depth_label(label: &str) -> Result<DepthInterval, SoilGridsError> {
    let bad = || SoilGridsError::BadDepthLabel(label.to_string());
    let stripped = label.strip_suffix("cm").ok_or_else(bad)?;
    let (min, max) = stripped.split_once('-').ok_or_else(bad)?;
    let z_min: f64 = min.parse().map_err(|_| bad())?;
    let z_max: f64 = max.parse().map_err(|_| bad())?;
    DepthInterval::new(z_min, z_max).map_err(|_| bad())
}

/// Extract normalized per-band measurements from a query response.
///
/// Bands are indexed in the order the depth labels were requested,
/// matching the service's response ordering. Every value is divided
/// by its property's `d_factor`.
///
/// # Errors
/// - [`SoilGridsError::MissingProperty`] when a required property is
///   absent from the response
/// - [`SoilGridsError::BandCountMismatch`] when a property carries a
///   different number of depth bands than requested
/// - [`SoilGridsError::MissingData`] when a mean is null (the point
///   lies outside the service's coverage)
pub fn extract_bands(
    response: &QueryResponse,
    config: &SoilGridsConfig,
) -> Result<Vec<BandMeasurement>, SoilGridsError> {
    let value = |name: &str, band: usize| -> Result<f64, SoilGridsError> {
        let layer = response
            .property(name)
            .ok_or_else(|| SoilGridsError::MissingProperty(name.to_string()))?;
        if layer.depths.len() != config.depths.len() {
            return Err(SoilGridsError::BandCountMismatch {
                property: name.to_string(),
                got: layer.depths.len(),
                expected: config.depths.len(),
            });
        }
        let mean = layer.depths[band]
            .values
            .mean
            .ok_or_else(|| SoilGridsError::MissingData {
                property: name.to_string(),
                depth: config.depths[band].clone(),
            })?;
        Ok(mean / layer.unit_measure.d_factor)
    };

    let mut bands = Vec::with_capacity(config.depths.len());
    for (k, label) in config.depths.iter().enumerate() {
        bands.push(BandMeasurement {
            depth: parse_depth_label(label)?,
            bulk_density: value("bdod", k)?,
            clay_pct: value("clay", k)?,
            sand_pct: value("sand", k)?,
            silt_pct: value("silt", k)?,
            ph: value("phh2o", k)?,
            organic_carbon: value("soc", k)?,
            nitrogen: value("nitrogen", k)?,
        });
    }
    Ok(bands)
}

/// Extend the band sequence to the required rooting depth.
///
/// When the deepest band stops short, one synthetic band is appended
/// spanning from there to `required_rooting_depth`, duplicating the
/// deepest band's property values. The soil is assumed hydraulically
/// uniform below the deepest measured band.
pub fn extend_bands(
    mut bands: Vec<BandMeasurement>,
    required_rooting_depth: f64,
) -> Vec<BandMeasurement> {
    if let Some(deepest) = bands.last() {
        if deepest.depth.z_max < required_rooting_depth {
            let mut synthetic = deepest.clone();
            synthetic.depth = DepthInterval {
                z_min: deepest.depth.z_max,
                z_max: required_rooting_depth,
            };
            debug!(
                z_min = synthetic.depth.z_min,
                z_max = synthetic.depth.z_max,
                "appending synthetic band to reach rooting depth"
            );
            bands.push(synthetic);
        }
    }
    bands
}

/// Turn measured bands into soil layers with estimated hydraulic
/// parameters.
///
/// Derived chemistry per band: organic matter percent from organic
/// carbon (g/kg → percent, times the carbon-to-organic-matter
/// factor), `FSOMI` as its mass fraction, C:N ratio from organic
/// carbon over nitrogen, and the configured uniform air capacity.
/// Van Genuchten parameters come from the Wösten regressions on
/// texture, bulk density, and organic matter.
pub fn layers_from_bands(
    bands: &[BandMeasurement],
    config: &SoilGridsConfig,
) -> Result<Vec<SoilLayer>, RetentionError> {
    bands
        .iter()
        .enumerate()
        .map(|(index, band)| {
            let om_pct = band.organic_carbon * 0.1 * config.carbon_to_organic_matter;
            let topsoil = pedotransfer::is_topsoil(
                band.depth.z_min,
                band.depth.z_max,
                config.topsoil_boundary_cm,
            );
            let van_genuchten = pedotransfer::estimate_parameters(&WostenInput {
                clay_pct: band.clay_pct,
                silt_pct: band.silt_pct,
                organic_matter_pct: om_pct,
                bulk_density: band.bulk_density,
                topsoil,
            })?;
            Ok(SoilLayer {
                index,
                depth: band.depth,
                texture: Some(TextureMeasurement {
                    clay_pct: band.clay_pct,
                    sand_pct: band.sand_pct,
                    silt_pct: band.silt_pct,
                }),
                properties: LayerProperties {
                    bulk_density: band.bulk_density,
                    organic_matter_fraction: om_pct * 0.01,
                    ph: band.ph,
                    cn_ratio_somi: band.organic_carbon / band.nitrogen,
                    air_capacity: config.air_capacity,
                },
                van_genuchten,
            })
        })
        .collect()
}
