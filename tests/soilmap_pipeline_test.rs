//! End-to-end test of the soil-map pipeline over in-memory polygons
//! and reference tables written to temporary files.

use std::io::Write;

use geo::{LineString, Polygon};
use pedon_rs::{
    PipelineError, ProfileDocumentConfig, ReferenceTables, SoilMap, SoilMapError,
    SoilMapPipeline,
};
use tempfile::NamedTempFile;

fn write_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

fn reference_tables() -> ReferenceTables {
    let codes = write_file("BodemCode,iProfile\n4010,12\n");
    let profiles = write_file(
        "iProfile,iZ1,iSoil1,iZ2,iSoil2,iZ3,iSoil3\n\
         12,30,2,60,9,90,21\n",
    );
    let parameters = write_file(
        "Name,WCr,WCs,Alpha,Lambda,Npar,Ksfit\n\
         B2,0.02,0.42,0.0276,-1.060,1.491,12.52\n\
         B9,0.00,0.43,0.0065,-2.161,1.325,2.36\n\
         O3,0.01,0.34,0.0211,0.274,2.075,10.87\n",
    );
    ReferenceTables::load(codes.path(), profiles.path(), parameters.path()).unwrap()
}

fn square(min_lon: f64, min_lat: f64, side: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![
            (min_lon, min_lat),
            (min_lon + side, min_lat),
            (min_lon + side, min_lat + side),
            (min_lon, min_lat + side),
            (min_lon, min_lat),
        ]),
        vec![],
    )
}

fn pipeline() -> SoilMapPipeline {
    let map = SoilMap::from_polygons(vec![(square(5.25, 51.95, 0.1), "4010".to_string())]);
    SoilMapPipeline::new(map, reference_tables())
}

#[test]
fn test_profile_resolved_from_map_point() {
    let doc = pipeline().build_document(52.01, 5.3, 120.0).unwrap();

    // Three declared layers; the deepest is stretched from 90 to
    // 120 cm rather than duplicated.
    assert_eq!(doc.description.soil_layers.len(), 3);
    assert_eq!(doc.rdmsol, 120.0);
    assert_eq!(doc.description.soil_layers[2].thickness, 60.0);

    // Reference-map layers carry the fixed literal chemistry.
    let top = &doc.description.soil_layers[0];
    assert_eq!(top.cn_ratio_somi, 20.0);
    assert_eq!(top.crairc, 0.01);
    assert_eq!(top.fsomi, 0.03);
    assert_eq!(top.rhod, 1.0);
    assert_eq!(top.soil_ph, 5.0);

    // Tables evaluated from the measured block parameters: block B2
    // saturates at WCs = 0.42.
    assert!((top.sm_from_pf[1] - 0.42).abs() < 1e-3);
}

#[test]
fn test_header_constants_from_config() {
    let doc = pipeline().build_document(52.01, 5.3, 120.0).unwrap();
    assert_eq!(doc.description.pf_field_capacity, 2.0);
    assert_eq!(doc.description.pf_wilting_point, 4.2);
    assert_eq!(doc.description.surface_conductivity, 70.0);
    assert!(!doc.description.ground_water);

    let custom = pipeline().with_document_config(ProfileDocumentConfig {
        surface_conductivity: 35.0,
        ..ProfileDocumentConfig::default()
    });
    let doc = custom.build_document(52.01, 5.3, 120.0).unwrap();
    assert_eq!(doc.description.surface_conductivity, 35.0);
}

#[test]
fn test_point_outside_map_yields_no_profile() {
    let result = pipeline().build_document(53.5, 6.8, 120.0);
    assert!(matches!(
        result,
        Err(PipelineError::SoilMap(SoilMapError::NoMatch { .. }))
    ));
}
