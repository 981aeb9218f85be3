use super::*;
use crate::globe::geo::Geometry;

#[test]
fn parses_natural_earth_shape() {
    let body = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "featurecla": "Land", "scalerank": 0 },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0, 0], [0, 5], [5, 5], [5, 0], [0, 0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[[10, 0], [10, 2], [12, 2], [10, 0]]], [[[20, 0], [20, 2], [22, 2], [20, 0]]]]
                }
            }
        ]
    }"#;
    let land = parse_land(body).unwrap();
    assert_eq!(land.features.len(), 2);
    assert!(matches!(land.features[0].geometry, Some(Geometry::Polygon { .. })));
    assert!(matches!(&land.features[1].geometry, Some(Geometry::MultiPolygon { coordinates }) if coordinates.len() == 2));
}

#[test]
fn malformed_body_is_a_decode_error() {
    assert!(matches!(parse_land("<html>not found</html>"), Err(GeoError::Decode(_))));
    assert!(matches!(parse_land(r#"{"features": 3}"#), Err(GeoError::Decode(_))));
}

#[test]
fn error_messages() {
    assert_eq!(GeoError::Status(404).to_string(), "unexpected status 404");
    assert_eq!(GeoError::Request("offline".into()).to_string(), "request failed: offline");
}
