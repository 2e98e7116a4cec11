//! Response model for the soil-property query endpoint.
//!
//! Mirrors the JSON shape `properties.layers[i].name`,
//! `.unit_measure.d_factor`, `.depths[k].label`,
//! `.depths[k].values.mean`. Unknown fields are ignored.

use serde::Deserialize;

/// Top-level query response.
#[derive(Clone, Debug, Deserialize)]
pub struct QueryResponse {
    pub properties: ResponseProperties,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ResponseProperties {
    pub layers: Vec<PropertyLayer>,
}

/// One property ("layer" in service terminology) with its values at
/// each depth band.
#[derive(Clone, Debug, Deserialize)]
pub struct PropertyLayer {
    pub name: String,
    pub unit_measure: UnitMeasure,
    pub depths: Vec<DepthValues>,
}

/// Unit metadata; `d_factor` is the divisor converting the raw
/// integer-scaled mean to conventional units.
#[derive(Clone, Debug, Deserialize)]
pub struct UnitMeasure {
    pub d_factor: f64,
}

/// Values for one property at one depth band.
#[derive(Clone, Debug, Deserialize)]
pub struct DepthValues {
    #[serde(default)]
    pub label: Option<String>,
    pub values: ValueStats,
}

/// Aggregate statistics; `mean` is null for points outside the
/// service's coverage.
#[derive(Clone, Debug, Deserialize)]
pub struct ValueStats {
    #[serde(default)]
    pub mean: Option<f64>,
}

impl QueryResponse {
    /// Find a property layer by name.
    pub fn property(&self, name: &str) -> Option<&PropertyLayer> {
        self.properties.layers.iter().find(|l| l.name == name)
    }
}
