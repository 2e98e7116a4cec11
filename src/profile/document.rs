//! Output document for the external crop-simulation engine.
//!
//! Field names follow the engine's soil-input schema exactly
//! (`RDMSOL`, `SoilProfileDescription`, per-layer `SMfromPF` /
//! `CONDfromPF` tables). The document is built from an assembled
//! [`SoilProfile`](super::SoilProfile) and is the sole interface
//! between this crate and the engine.

use serde::Serialize;

use super::assembler::SoilProfile;
use super::layer::TabulatedLayer;

/// Profile-wide constants the document header carries.
#[derive(Clone, Copy, Debug)]
pub struct ProfileDocumentConfig {
    /// pF at field capacity
    pub pf_field_capacity: f64,
    /// pF at wilting point
    pub pf_wilting_point: f64,
    /// Surface conductivity, cm/day
    pub surface_conductivity: f64,
    /// Whether groundwater influence is modeled
    pub ground_water: bool,
}

impl Default for ProfileDocumentConfig {
    fn default() -> Self {
        Self {
            pf_field_capacity: 2.0,
            pf_wilting_point: 4.2,
            surface_conductivity: 70.0,
            ground_water: false,
        }
    }
}

/// Per-layer block of the output document.
#[derive(Clone, Debug, Serialize)]
pub struct SoilLayerBlock {
    #[serde(rename = "Thickness")]
    pub thickness: f64,
    #[serde(rename = "CNRatioSOMI")]
    pub cn_ratio_somi: f64,
    #[serde(rename = "CRAIRC")]
    pub crairc: f64,
    #[serde(rename = "FSOMI")]
    pub fsomi: f64,
    #[serde(rename = "RHOD")]
    pub rhod: f64,
    #[serde(rename = "Soil_pH")]
    pub soil_ph: f64,
    #[serde(rename = "SMfromPF")]
    pub sm_from_pf: Vec<f64>,
    #[serde(rename = "CONDfromPF")]
    pub cond_from_pf: Vec<f64>,
}

impl SoilLayerBlock {
    fn from_tabulated(tabulated: &TabulatedLayer) -> Self {
        let props = &tabulated.layer.properties;
        Self {
            thickness: tabulated.layer.depth.thickness(),
            cn_ratio_somi: props.cn_ratio_somi,
            crairc: props.air_capacity,
            fsomi: props.organic_matter_fraction,
            rhod: props.bulk_density,
            soil_ph: props.ph,
            sm_from_pf: tabulated.sm_from_pf.clone(),
            cond_from_pf: tabulated.cond_from_pf.clone(),
        }
    }
}

/// The `SoilProfileDescription` block.
#[derive(Clone, Debug, Serialize)]
pub struct SoilProfileDescription {
    #[serde(rename = "PFWiltingPoint")]
    pub pf_wilting_point: f64,
    #[serde(rename = "PFFieldCapacity")]
    pub pf_field_capacity: f64,
    #[serde(rename = "SurfaceConductivity")]
    pub surface_conductivity: f64,
    #[serde(rename = "GroundWater")]
    pub ground_water: bool,
    #[serde(rename = "SoilLayers")]
    pub soil_layers: Vec<SoilLayerBlock>,
    #[serde(rename = "SubSoilType")]
    pub sub_soil_type: SoilLayerBlock,
}

/// The complete soil-input document.
#[derive(Clone, Debug, Serialize)]
pub struct SoilProfileDocument {
    #[serde(rename = "RDMSOL")]
    pub rdmsol: f64,
    #[serde(rename = "SoilProfileDescription")]
    pub description: SoilProfileDescription,
}

impl SoilProfileDocument {
    /// Serialize to the YAML form the engine reads.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

impl SoilProfile {
    /// Build the output document for this profile.
    pub fn to_document(&self, config: &ProfileDocumentConfig) -> SoilProfileDocument {
        SoilProfileDocument {
            rdmsol: self.total_depth,
            description: SoilProfileDescription {
                pf_wilting_point: config.pf_wilting_point,
                pf_field_capacity: config.pf_field_capacity,
                surface_conductivity: config.surface_conductivity,
                ground_water: config.ground_water,
                soil_layers: self
                    .layers
                    .iter()
                    .map(SoilLayerBlock::from_tabulated)
                    .collect(),
                sub_soil_type: SoilLayerBlock::from_tabulated(&self.sub_soil),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{
        DepthExtension, DepthInterval, LayerProperties, SoilLayer, TabulatedLayer,
        assemble_profile,
    };
    use crate::retention::VanGenuchtenParameters;

    fn profile() -> SoilProfile {
        let vg = VanGenuchtenParameters::new(0.02, 1.4, 0.5, 0.01, 0.42, 25.0).unwrap();
        let layers = (0..2)
            .map(|i| {
                TabulatedLayer::from_layer(SoilLayer {
                    index: i,
                    depth: DepthInterval::new(i as f64 * 50.0, (i as f64 + 1.0) * 50.0).unwrap(),
                    texture: None,
                    properties: LayerProperties::default(),
                    van_genuchten: vg,
                })
                .unwrap()
            })
            .collect();
        assemble_profile(layers, 100.0, DepthExtension::StretchDeepest).unwrap()
    }

    #[test]
    fn test_rdmsol_matches_total_depth() {
        let doc = profile().to_document(&ProfileDocumentConfig::default());
        assert_eq!(doc.rdmsol, 100.0);
        let layer_sum: f64 = doc
            .description
            .soil_layers
            .iter()
            .map(|l| l.thickness)
            .sum();
        assert_eq!(layer_sum, doc.rdmsol);
    }

    #[test]
    fn test_yaml_uses_engine_field_names() {
        let yaml = profile()
            .to_document(&ProfileDocumentConfig::default())
            .to_yaml()
            .unwrap();
        for key in [
            "RDMSOL",
            "SoilProfileDescription",
            "PFWiltingPoint",
            "PFFieldCapacity",
            "SurfaceConductivity",
            "GroundWater",
            "SoilLayers",
            "SubSoilType",
            "SMfromPF",
            "CONDfromPF",
            "CNRatioSOMI",
            "CRAIRC",
            "FSOMI",
            "RHOD",
            "Soil_pH",
            "Thickness",
        ] {
            assert!(yaml.contains(key), "missing key {key} in:\n{yaml}");
        }
    }

    #[test]
    fn test_header_constants_not_swapped() {
        let doc = profile().to_document(&ProfileDocumentConfig::default());
        assert_eq!(doc.description.pf_field_capacity, 2.0);
        assert_eq!(doc.description.pf_wilting_point, 4.2);
    }
}
