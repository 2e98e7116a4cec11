//! Integration tests for profile assembly and document output.

use pedon_rs::{
    DepthExtension, DepthInterval, LayerProperties, ProfileDocumentConfig, SoilLayer,
    TabulatedLayer, VanGenuchtenParameters, assemble_profile,
};

fn layers(boundaries: &[(f64, f64)]) -> Vec<TabulatedLayer> {
    let vg = VanGenuchtenParameters::new(0.0249, 1.507, -0.327, 0.01, 0.427, 22.3).unwrap();
    boundaries
        .iter()
        .enumerate()
        .map(|(index, &(z_min, z_max))| {
            TabulatedLayer::from_layer(SoilLayer {
                index,
                depth: DepthInterval::new(z_min, z_max).unwrap(),
                texture: None,
                properties: LayerProperties::default(),
                van_genuchten: vg,
            })
            .unwrap()
        })
        .collect()
}

#[test]
fn test_shallow_profile_extended_to_exact_rooting_depth() {
    let boundaries = [(0.0, 30.0), (30.0, 60.0), (60.0, 90.0)];
    for policy in [DepthExtension::StretchDeepest, DepthExtension::AppendDuplicate] {
        let profile = assemble_profile(layers(&boundaries), 120.0, policy).unwrap();
        assert_eq!(profile.total_depth, 120.0, "policy {policy:?}");
        assert!(profile.total_depth >= 120.0);
    }
}

#[test]
fn test_total_depth_is_sum_of_thicknesses() {
    let profile = assemble_profile(
        layers(&[(0.0, 25.0), (25.0, 70.0), (70.0, 130.0)]),
        120.0,
        DepthExtension::StretchDeepest,
    )
    .unwrap();
    let sum: f64 = profile.layers.iter().map(|l| l.layer.depth.thickness()).sum();
    assert_eq!(profile.total_depth, sum);

    let doc = profile.to_document(&ProfileDocumentConfig::default());
    let doc_sum: f64 = doc.description.soil_layers.iter().map(|l| l.thickness).sum();
    assert_eq!(doc.rdmsol, doc_sum);
}

#[test]
fn test_subsoil_block_mirrors_deepest_layer() {
    let profile = assemble_profile(
        layers(&[(0.0, 30.0), (30.0, 90.0)]),
        120.0,
        DepthExtension::AppendDuplicate,
    )
    .unwrap();
    let doc = profile.to_document(&ProfileDocumentConfig::default());
    let deepest = doc.description.soil_layers.last().unwrap();
    let subsoil = &doc.description.sub_soil_type;
    assert_eq!(subsoil.thickness, deepest.thickness);
    assert_eq!(subsoil.sm_from_pf, deepest.sm_from_pf);
    assert_eq!(subsoil.cond_from_pf, deepest.cond_from_pf);
}

#[test]
fn test_document_tables_follow_fixed_pf_order() {
    let profile = assemble_profile(
        layers(&[(0.0, 90.0)]),
        90.0,
        DepthExtension::StretchDeepest,
    )
    .unwrap();
    let doc = profile.to_document(&ProfileDocumentConfig::default());
    let sm = &doc.description.soil_layers[0].sm_from_pf;
    assert_eq!(sm.len(), 28);
    assert_eq!(sm[0], -1.0);
    assert_eq!(sm[26], 6.0);
    // pF entries strictly increase through the flattened pairs.
    for i in (2..sm.len()).step_by(2) {
        assert!(sm[i] > sm[i - 2]);
    }
}
