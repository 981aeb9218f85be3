use super::*;
use crate::globe::geo::{Geometry, Ring};

fn polygon_feature(rings: Vec<Ring>) -> Feature {
    Feature { geometry: Some(Geometry::Polygon { coordinates: rings }) }
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Ring {
    vec![
        Position::new(x0, y0),
        Position::new(x0, y1),
        Position::new(x1, y1),
        Position::new(x1, y0),
        Position::new(x0, y0),
    ]
}

#[test]
fn default_spacing_step() {
    assert!((step_size(14.0) - 1.12).abs() < 1e-12);
}

#[test]
fn unit_square_grid_count() {
    // Columns and rows at 0, 0.25, 0.5 and 0.75; the far edges at 1.0 fall
    // on the boundary, which the ray cast treats as outside.
    let feature = polygon_feature(vec![rect(0.0, 0.0, 1.0, 1.0)]);
    assert_eq!(dots_in_feature(&feature, 0.25).len(), 16);
}

#[test]
fn every_dot_is_on_land() {
    let feature = polygon_feature(vec![rect(0.0, 0.0, 10.0, 10.0), rect(3.0, 3.0, 7.0, 7.0)]);
    let dots = dots_in_feature(&feature, 0.5);
    assert!(!dots.is_empty());
    for dot in &dots {
        assert!(feature.contains(*dot), "{dot:?}");
    }
    assert!(!dots.iter().any(|d| d.lng > 3.0 && d.lng < 7.0 && d.lat > 3.0 && d.lat < 7.0));
}

#[test]
fn holes_reduce_dot_count() {
    let solid = polygon_feature(vec![rect(0.0, 0.0, 10.0, 10.0)]);
    let holed = polygon_feature(vec![rect(0.0, 0.0, 10.0, 10.0), rect(2.1, 2.1, 7.9, 7.9)]);
    let removed = dots_in_feature(&solid, 1.0).len() - dots_in_feature(&holed, 1.0).len();
    // Grid columns 3..=7 and rows 3..=7 fall inside the hole.
    assert_eq!(removed, 25);
}

#[test]
fn multipolygon_members_each_get_dots() {
    let feature = Feature {
        geometry: Some(Geometry::MultiPolygon {
            coordinates: vec![vec![rect(0.0, 0.0, 4.0, 4.0)], vec![rect(20.0, 0.0, 24.0, 4.0)]],
        }),
    };
    let dots = dots_in_feature(&feature, 1.0);
    assert!(dots.iter().any(|d| d.lng < 5.0));
    assert!(dots.iter().any(|d| d.lng > 19.0));
    assert!(!dots.iter().any(|d| d.lng > 5.0 && d.lng < 19.0));
}

#[test]
fn empty_or_invalid_inputs_yield_no_dots() {
    assert!(dots_in_feature(&Feature { geometry: None }, 1.0).is_empty());
    assert!(dots_in_feature(&Feature { geometry: Some(Geometry::Other) }, 1.0).is_empty());
    let feature = polygon_feature(vec![rect(0.0, 0.0, 1.0, 1.0)]);
    assert!(dots_in_feature(&feature, 0.0).is_empty());
    assert!(dots_in_feature(&feature, f64::NAN).is_empty());
}

#[test]
fn land_dots_concatenates_features() {
    let land = FeatureCollection {
        features: vec![polygon_feature(vec![rect(0.0, 0.0, 5.0, 5.0)]), polygon_feature(vec![rect(10.0, 0.0, 15.0, 5.0)])],
    };
    let per_feature: usize = land.features.iter().map(|f| dots_in_feature(f, step_size(14.0)).len()).sum();
    assert_eq!(land_dots(&land, 14.0).len(), per_feature);
    assert!(per_feature > 0);
}
