//! End-to-end profile pipelines.
//!
//! Two front ends resolve soil physical data for a point and converge
//! on the same downstream stages:
//!
//! ```text
//! SoilGridsPipeline: fetch ─▶ extract ─▶ extend ─▶ pedotransfer ─▶ tabulate ─▶ assemble
//! SoilMapPipeline:   lookup ─▶ reference tables ─────────────────▶ tabulate ─▶ assemble
//! ```
//!
//! Each stage is an ordinary function, callable and testable on its
//! own; the pipeline types here only wire them together with their
//! configuration. Profile construction is all-or-nothing per point:
//! any stage error aborts with no partial output.

use thiserror::Error;
use tracing::info;

use crate::http::HttpClient;
use crate::profile::{
    DepthExtension, ProfileDocumentConfig, ProfileError, SoilProfile, SoilProfileDocument,
    assemble_profile, tabulate_layers,
};
use crate::retention::RetentionError;
use crate::soilgrids::{
    SoilGridsClient, SoilGridsConfig, SoilGridsError, extend_bands, extract_bands,
    layers_from_bands,
};
use crate::soilmap::{ReferenceTableError, ReferenceTables, SoilMap, SoilMapError};

/// Error type spanning every pipeline stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    SoilGrids(#[from] SoilGridsError),

    #[error(transparent)]
    SoilMap(#[from] SoilMapError),

    #[error(transparent)]
    ReferenceTable(#[from] ReferenceTableError),

    #[error(transparent)]
    Retention(#[from] RetentionError),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// Profile pipeline backed by the remote soil-property service.
pub struct SoilGridsPipeline<C: HttpClient> {
    client: SoilGridsClient<C>,
    extension: DepthExtension,
    document_config: ProfileDocumentConfig,
}

impl<C: HttpClient> SoilGridsPipeline<C> {
    /// Create a pipeline with the service defaults.
    ///
    /// Depth extension defaults to [`DepthExtension::AppendDuplicate`]:
    /// the remote bands stop at 100 cm, and a rooting depth below
    /// that gets one synthetic uniform band.
    pub fn new(http: C, config: SoilGridsConfig) -> Self {
        Self {
            client: SoilGridsClient::new(http, config),
            extension: DepthExtension::AppendDuplicate,
            document_config: ProfileDocumentConfig::default(),
        }
    }

    /// Override the depth-extension policy.
    pub fn with_depth_extension(mut self, extension: DepthExtension) -> Self {
        self.extension = extension;
        self
    }

    /// Override the document header constants.
    pub fn with_document_config(mut self, config: ProfileDocumentConfig) -> Self {
        self.document_config = config;
        self
    }

    /// Build the assembled profile for a point.
    pub fn build_profile(
        &self,
        lat: f64,
        lon: f64,
        required_rooting_depth: f64,
    ) -> Result<SoilProfile, PipelineError> {
        let response = self.client.fetch(lat, lon)?;
        let bands = extract_bands(&response, self.client.config())?;
        let bands = extend_bands(bands, required_rooting_depth);
        let layers = layers_from_bands(&bands, self.client.config())?;
        let tabulated = tabulate_layers(layers)?;
        let profile = assemble_profile(tabulated, required_rooting_depth, self.extension)?;
        info!(
            layers = profile.layers.len(),
            total_depth = profile.total_depth,
            "profile assembled from remote soil properties"
        );
        Ok(profile)
    }

    /// Build the output document for a point.
    pub fn build_document(
        &self,
        lat: f64,
        lon: f64,
        required_rooting_depth: f64,
    ) -> Result<SoilProfileDocument, PipelineError> {
        Ok(self
            .build_profile(lat, lon, required_rooting_depth)?
            .to_document(&self.document_config))
    }
}

/// Profile pipeline backed by the vector soil map and reference
/// tables.
pub struct SoilMapPipeline {
    map: SoilMap,
    tables: ReferenceTables,
    extension: DepthExtension,
    document_config: ProfileDocumentConfig,
}

impl SoilMapPipeline {
    /// Create a pipeline over a loaded map and tables.
    ///
    /// Depth extension defaults to [`DepthExtension::StretchDeepest`]:
    /// reference profiles end on a real horizon boundary, which is
    /// grown rather than duplicated.
    pub fn new(map: SoilMap, tables: ReferenceTables) -> Self {
        Self {
            map,
            tables,
            extension: DepthExtension::StretchDeepest,
            document_config: ProfileDocumentConfig::default(),
        }
    }

    /// Override the depth-extension policy.
    pub fn with_depth_extension(mut self, extension: DepthExtension) -> Self {
        self.extension = extension;
        self
    }

    /// Override the document header constants.
    pub fn with_document_config(mut self, config: ProfileDocumentConfig) -> Self {
        self.document_config = config;
        self
    }

    /// Build the assembled profile for a point.
    pub fn build_profile(
        &self,
        lat: f64,
        lon: f64,
        required_rooting_depth: f64,
    ) -> Result<SoilProfile, PipelineError> {
        let code = self.map.lookup(lat, lon)?;
        info!(code, "resolved soil-classification code");
        let layers = self.tables.layers_for_code(code)?;
        let tabulated = tabulate_layers(layers)?;
        let profile = assemble_profile(tabulated, required_rooting_depth, self.extension)?;
        info!(
            layers = profile.layers.len(),
            total_depth = profile.total_depth,
            "profile assembled from soil map"
        );
        Ok(profile)
    }

    /// Build the output document for a point.
    pub fn build_document(
        &self,
        lat: f64,
        lon: f64,
        required_rooting_depth: f64,
    ) -> Result<SoilProfileDocument, PipelineError> {
        Ok(self
            .build_profile(lat, lon, required_rooting_depth)?
            .to_document(&self.document_config))
    }
}
