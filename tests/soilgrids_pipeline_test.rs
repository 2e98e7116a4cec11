//! End-to-end test of the remote soil-property pipeline against a
//! canned service response.

use std::cell::RefCell;
use std::time::Duration;

use pedon_rs::{
    HttpClient, HttpError, HttpResponse, PipelineError, SoilGridsConfig, SoilGridsError,
    SoilGridsPipeline,
};
use serde_json::{Value, json};

struct CannedClient {
    responses: RefCell<Vec<HttpResponse>>,
}

impl CannedClient {
    fn new(responses: Vec<HttpResponse>) -> Self {
        Self {
            responses: RefCell::new(responses),
        }
    }
}

impl HttpClient for CannedClient {
    fn get(&self, _url: &str) -> Result<HttpResponse, HttpError> {
        Ok(self.responses.borrow_mut().remove(0))
    }
}

const DEPTHS: [&str; 5] = ["0-5cm", "5-15cm", "15-30cm", "30-60cm", "60-100cm"];

fn property_layer(name: &str, d_factor: f64, raw_means: [f64; 5]) -> Value {
    json!({
        "name": name,
        "unit_measure": {"d_factor": d_factor},
        "depths": DEPTHS
            .iter()
            .zip(raw_means.iter())
            .map(|(label, mean)| json!({"label": label, "values": {"mean": mean}}))
            .collect::<Vec<_>>(),
    })
}

fn service_body() -> Vec<u8> {
    let body = json!({
        "type": "Feature",
        "properties": {
            "layers": [
                property_layer("bdod", 100.0, [138.0, 140.0, 142.0, 145.0, 147.0]),
                property_layer("clay", 10.0, [220.0, 225.0, 230.0, 240.0, 250.0]),
                property_layer("phh2o", 10.0, [62.0, 63.0, 64.0, 65.0, 66.0]),
                property_layer("sand", 10.0, [380.0, 375.0, 370.0, 360.0, 350.0]),
                property_layer("silt", 10.0, [400.0, 400.0, 400.0, 400.0, 400.0]),
                property_layer("soc", 10.0, [150.0, 120.0, 90.0, 60.0, 40.0]),
                property_layer("nitrogen", 100.0, [120.0, 110.0, 100.0, 90.0, 80.0]),
            ]
        }
    });
    serde_json::to_vec(&body).unwrap()
}

fn test_config() -> SoilGridsConfig {
    SoilGridsConfig {
        retry_wait: Duration::ZERO,
        ..SoilGridsConfig::default()
    }
}

#[test]
fn test_document_built_through_rate_limit() {
    let client = CannedClient::new(vec![
        HttpResponse {
            status: 429,
            body: vec![],
        },
        HttpResponse {
            status: 200,
            body: service_body(),
        },
    ]);
    let pipeline = SoilGridsPipeline::new(client, test_config());
    let doc = pipeline.build_document(52.01, 5.3, 120.0).unwrap();

    // Five measured bands plus the synthetic band to 120 cm.
    assert_eq!(doc.description.soil_layers.len(), 6);
    assert_eq!(doc.rdmsol, 120.0);

    // d_factor applied: bdod 138 cg/cm3 -> 1.38 g/cm3.
    let top = &doc.description.soil_layers[0];
    assert!((top.rhod - 1.38).abs() < 1e-12);
    assert!((top.soil_ph - 6.2).abs() < 1e-12);

    // Derived chemistry: 15 g/kg C -> 0.87% OM -> 0.0087 fraction,
    // C:N = 15 / 1.2.
    assert!((top.fsomi - 0.0087).abs() < 1e-12);
    assert!((top.cn_ratio_somi - 12.5).abs() < 1e-12);
    assert_eq!(top.crairc, 0.03);

    // The synthetic band spans 100..120 and copies the deepest
    // band's properties.
    let synthetic = &doc.description.soil_layers[5];
    let deepest = &doc.description.soil_layers[4];
    assert_eq!(synthetic.thickness, 20.0);
    assert_eq!(synthetic.rhod, deepest.rhod);
    assert_eq!(synthetic.sm_from_pf, deepest.sm_from_pf);

    // Retention tables carry the fixed 14-point sampling.
    assert_eq!(top.sm_from_pf.len(), 28);
    assert_eq!(top.cond_from_pf.len(), 28);

    let yaml = doc.to_yaml().unwrap();
    assert!(yaml.contains("RDMSOL: 120.0"));
    assert!(yaml.contains("SMfromPF"));
}

#[test]
fn test_null_mean_aborts_with_no_partial_output() {
    // A point outside the service's coverage returns null means.
    let mut body: Value = serde_json::from_slice(&service_body()).unwrap();
    body["properties"]["layers"][1]["depths"][2]["values"]["mean"] = Value::Null;

    let client = CannedClient::new(vec![HttpResponse {
        status: 200,
        body: serde_json::to_vec(&body).unwrap(),
    }]);
    let pipeline = SoilGridsPipeline::new(client, test_config());
    let result = pipeline.build_document(52.01, 5.3, 120.0);
    assert!(matches!(
        result,
        Err(PipelineError::SoilGrids(SoilGridsError::MissingData { .. }))
    ));
}

#[test]
fn test_server_error_is_fatal() {
    let client = CannedClient::new(vec![HttpResponse {
        status: 503,
        body: vec![],
    }]);
    let pipeline = SoilGridsPipeline::new(client, test_config());
    assert!(matches!(
        pipeline.build_document(52.01, 5.3, 120.0),
        Err(PipelineError::SoilGrids(SoilGridsError::Status { status: 503 }))
    ));
}
