//! Point-in-polygon soil-classification lookup.

use std::path::Path;

use geo::{Contains, Coord, LineString, Point, Polygon};
use shapefile::dbase::FieldValue;
use shapefile::{Reader, Shape};
use thiserror::Error;
use tracing::debug;

use super::projection::RdNewProjection;

/// Attribute carrying the soil-classification code in the vector map.
const CODE_FIELD: &str = "BODEMCODE";

/// Half-width in degrees of the candidate bounding box around a
/// query point. Narrow enough to keep the candidate set small, and
/// harmless when too narrow: containment is always decided by the
/// exact polygon test, so a clipped-out true polygon can only produce
/// a miss, never a wrong code.
const QUERY_BBOX_HALF_WIDTH: f64 = 0.001;

/// Error type for soil-map operations.
#[derive(Debug, Error)]
pub enum SoilMapError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Shapefile parsing error
    #[error("shapefile error: {0}")]
    Shapefile(String),

    /// A map feature lacks a usable classification-code attribute.
    #[error("map feature {feature} has no usable BODEMCODE attribute")]
    MissingCode { feature: usize },

    /// No polygon contains the query point.
    #[error("no soil-map polygon contains point ({lat}, {lon})")]
    NoMatch { lat: f64, lon: f64 },
}

impl From<shapefile::Error> for SoilMapError {
    fn from(e: shapefile::Error) -> Self {
        SoilMapError::Shapefile(e.to_string())
    }
}

struct MapFeature {
    code: String,
    polygon: Polygon<f64>,
    // Precomputed (min_lon, min_lat, max_lon, max_lat) of the
    // exterior ring, for the bbox prefilter.
    bbox: (f64, f64, f64, f64),
}

/// The vector soil map, held in memory as WGS84 polygons tagged with
/// their classification code.
pub struct SoilMap {
    features: Vec<MapFeature>,
}

impl SoilMap {
    /// Load the soil map from a shapefile in RD New coordinates,
    /// reprojecting every ring to WGS84.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SoilMapError> {
        let mut reader = Reader::from_path(path)?;
        let projection = RdNewProjection;
        let mut features = Vec::new();

        for (feature_index, result) in reader.iter_shapes_and_records().enumerate() {
            let (shape, record) = result?;
            let polygon = match shape {
                Shape::Polygon(polygon) => polygon,
                _ => continue,
            };
            let code = match record.get(CODE_FIELD) {
                Some(FieldValue::Character(Some(s))) => s.trim().to_string(),
                Some(FieldValue::Numeric(Some(n))) => {
                    if n.fract() == 0.0 {
                        format!("{}", *n as i64)
                    } else {
                        n.to_string()
                    }
                }
                _ => {
                    return Err(SoilMapError::MissingCode {
                        feature: feature_index,
                    });
                }
            };

            // A shapefile polygon is a set of rings; outer rings open
            // a new polygon, inner rings punch holes in the last one.
            let mut outers: Vec<(LineString<f64>, Vec<LineString<f64>>)> = Vec::new();
            for ring in polygon.rings() {
                let coords: Vec<Coord<f64>> = ring
                    .points()
                    .iter()
                    .map(|p| {
                        let (lat, lon) = projection.rd_to_geo(p.x, p.y);
                        Coord { x: lon, y: lat }
                    })
                    .collect();
                let line = LineString::from(coords);
                match ring {
                    shapefile::PolygonRing::Outer(_) => outers.push((line, Vec::new())),
                    shapefile::PolygonRing::Inner(_) => {
                        if let Some(last) = outers.last_mut() {
                            last.1.push(line);
                        }
                    }
                }
            }
            for (exterior, interiors) in outers {
                let bbox = ring_bbox(&exterior);
                features.push(MapFeature {
                    code: code.clone(),
                    polygon: Polygon::new(exterior, interiors),
                    bbox,
                });
            }
        }

        debug!(polygons = features.len(), "soil map loaded");
        Ok(Self { features })
    }

    /// Build a map directly from WGS84 polygons and their codes.
    pub fn from_polygons(polygons: Vec<(Polygon<f64>, String)>) -> Self {
        let features = polygons
            .into_iter()
            .map(|(polygon, code)| {
                let bbox = ring_bbox(polygon.exterior());
                MapFeature {
                    code,
                    polygon,
                    bbox,
                }
            })
            .collect();
        Self { features }
    }

    /// Number of polygons held.
    pub fn polygon_count(&self) -> usize {
        self.features.len()
    }

    /// Resolve a point to its soil-classification code.
    ///
    /// Candidates are prefiltered by a small bounding box around the
    /// point; containment is decided by the exact polygon test. The
    /// first containing polygon wins.
    ///
    /// # Errors
    /// [`SoilMapError::NoMatch`] when no polygon contains the point.
    pub fn lookup(&self, lat: f64, lon: f64) -> Result<&str, SoilMapError> {
        let min_lon = lon - QUERY_BBOX_HALF_WIDTH;
        let max_lon = lon + QUERY_BBOX_HALF_WIDTH;
        let min_lat = lat - QUERY_BBOX_HALF_WIDTH;
        let max_lat = lat + QUERY_BBOX_HALF_WIDTH;
        let point = Point::new(lon, lat);

        for feature in &self.features {
            let (f_min_lon, f_min_lat, f_max_lon, f_max_lat) = feature.bbox;
            let disjoint = f_max_lon < min_lon
                || f_min_lon > max_lon
                || f_max_lat < min_lat
                || f_min_lat > max_lat;
            if disjoint {
                continue;
            }
            if feature.polygon.contains(&point) {
                return Ok(&feature.code);
            }
        }
        Err(SoilMapError::NoMatch { lat, lon })
    }
}

fn ring_bbox(ring: &LineString<f64>) -> (f64, f64, f64, f64) {
    let mut min_lon = f64::INFINITY;
    let mut min_lat = f64::INFINITY;
    let mut max_lon = f64::NEG_INFINITY;
    let mut max_lat = f64::NEG_INFINITY;
    for coord in ring.coords() {
        min_lon = min_lon.min(coord.x);
        max_lon = max_lon.max(coord.x);
        min_lat = min_lat.min(coord.y);
        max_lat = max_lat.max(coord.y);
    }
    (min_lon, min_lat, max_lon, max_lat)
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_lookup_returns_containing_code() {
        let map = SoilMap::from_polygons(vec![
            (square(5.0, 52.0, 0.1), "1001".to_string()),
            (square(5.1, 52.0, 0.1), "1002".to_string()),
        ]);
        assert_eq!(map.lookup(52.05, 5.05).unwrap(), "1001");
        assert_eq!(map.lookup(52.05, 5.15).unwrap(), "1002");
    }

    #[test]
    fn test_miss_outside_all_polygons() {
        let map = SoilMap::from_polygons(vec![(square(5.0, 52.0, 0.1), "1001".to_string())]);
        assert!(matches!(
            map.lookup(53.0, 6.0),
            Err(SoilMapError::NoMatch { .. })
        ));
    }

    #[test]
    fn test_hole_is_not_contained() {
        let outer = LineString::from(vec![
            (5.0, 52.0),
            (5.3, 52.0),
            (5.3, 52.3),
            (5.0, 52.3),
            (5.0, 52.0),
        ]);
        let hole = LineString::from(vec![
            (5.1, 52.1),
            (5.2, 52.1),
            (5.2, 52.2),
            (5.1, 52.2),
            (5.1, 52.1),
        ]);
        let map = SoilMap::from_polygons(vec![
            (Polygon::new(outer, vec![hole]), "2001".to_string()),
            (square(5.1, 52.1, 0.1), "2002".to_string()),
        ]);
        // Inside the hole the enclosed polygon wins.
        assert_eq!(map.lookup(52.15, 5.15).unwrap(), "2002");
        // Outside the hole the enclosing polygon wins.
        assert_eq!(map.lookup(52.05, 5.05).unwrap(), "2001");
    }
}
