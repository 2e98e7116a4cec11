//! Per-layer data model and curve tabulation.

use crate::retention::{RetentionError, VanGenuchtenParameters};

use super::assembler::ProfileError;

/// A depth interval in cm below the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthInterval {
    /// Upper boundary (shallower), cm
    pub z_min: f64,
    /// Lower boundary (deeper), cm
    pub z_max: f64,
}

impl DepthInterval {
    /// Create a depth interval.
    ///
    /// # Errors
    /// [`ProfileError::InvalidInterval`] unless `z_max > z_min`.
    pub fn new(z_min: f64, z_max: f64) -> Result<Self, ProfileError> {
        if !(z_max > z_min) {
            return Err(ProfileError::InvalidInterval { z_min, z_max });
        }
        Ok(Self { z_min, z_max })
    }

    /// Layer thickness in cm.
    pub fn thickness(&self) -> f64 {
        self.z_max - self.z_min
    }

    /// Depth of the interval midpoint in cm.
    pub fn midpoint(&self) -> f64 {
        (self.z_min + self.z_max) / 2.0
    }
}

/// Texture fractions of the mineral fraction, in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureMeasurement {
    pub clay_pct: f64,
    pub sand_pct: f64,
    pub silt_pct: f64,
}

/// Chemistry and bulk properties the output document carries per
/// layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerProperties {
    /// Dry bulk density, g/cm³ (`RHOD`)
    pub bulk_density: f64,
    /// Soil organic matter as a mass fraction (`FSOMI`)
    pub organic_matter_fraction: f64,
    /// pH in water (`Soil_pH`)
    pub ph: f64,
    /// C:N ratio of soil organic matter (`CNRatioSOMI`)
    pub cn_ratio_somi: f64,
    /// Air capacity, cm³/cm³ (`CRAIRC`)
    pub air_capacity: f64,
}

impl Default for LayerProperties {
    /// The literal values the reference-map pipeline emits for layers
    /// without measured chemistry.
    fn default() -> Self {
        Self {
            bulk_density: 1.0,
            organic_matter_fraction: 0.03,
            ph: 5.0,
            cn_ratio_somi: 20.0,
            air_capacity: 0.01,
        }
    }
}

/// One soil layer with hydraulic parameters attached.
#[derive(Clone, Debug)]
pub struct SoilLayer {
    /// 0-based position, top to bottom
    pub index: usize,
    pub depth: DepthInterval,
    /// Present on the remote-measurement path, absent when the layer
    /// came from a reference soil table.
    pub texture: Option<TextureMeasurement>,
    pub properties: LayerProperties,
    pub van_genuchten: VanGenuchtenParameters,
}

/// A soil layer with its discretized retention and conductivity
/// tables. Terminal per-layer artifact; never edited in place.
#[derive(Clone, Debug)]
pub struct TabulatedLayer {
    pub layer: SoilLayer,
    /// Flattened `(pF, θ)` pairs over the fixed sample points
    pub sm_from_pf: Vec<f64>,
    /// Flattened `(pF, log10 K)` pairs over the fixed sample points
    pub cond_from_pf: Vec<f64>,
}

impl TabulatedLayer {
    /// Evaluate both curves of a layer at the fixed pF sample points.
    pub fn from_layer(layer: SoilLayer) -> Result<Self, RetentionError> {
        let sm_from_pf = layer.van_genuchten.retention_table();
        let cond_from_pf = layer.van_genuchten.conductivity_table()?;
        Ok(Self {
            layer,
            sm_from_pf,
            cond_from_pf,
        })
    }
}

/// Tabulate curves for an ordered sequence of layers.
pub fn tabulate_layers(layers: Vec<SoilLayer>) -> Result<Vec<TabulatedLayer>, RetentionError> {
    layers.into_iter().map(TabulatedLayer::from_layer).collect()
}
