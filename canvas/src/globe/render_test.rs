use super::*;
use crate::globe::geo::{Feature, Geometry};

fn flat() -> Orthographic {
    Orthographic::new([0.0, 0.0, 0.0], 100.0, (100.0, 100.0))
}

#[test]
fn graticule_shape() {
    let lines = graticule_lines();
    // 36 meridians plus 17 parallels from -80 to 80.
    assert_eq!(lines.len(), 36 + 17);

    let prime = lines.iter().find(|l| l[0].lng == 0.0 && l[0].lat == -90.0);
    assert_eq!(prime.map(Vec::len), Some(73));
    let minor = &lines[1];
    assert_eq!((minor[0].lng, minor[0].lat), (-170.0, -80.0));
    assert_eq!(minor.len(), 65);

    let equator = lines.iter().find(|l| l[0].lat == 0.0 && l[0].lng == -180.0);
    assert!(equator.is_some_and(|l| l.len() == 145 && l[144].lng == 180.0));
}

#[test]
fn path_breaks_at_hidden_points() {
    let line: Vec<Position> =
        [-60.0, -30.0, 0.0, 150.0, 170.0, 30.0, 60.0].iter().map(|&lng| Position::new(lng, 0.0)).collect();
    let runs = project_path(&line, &flat());
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].len(), 3);
    assert_eq!(runs[1].len(), 2);
}

#[test]
fn isolated_visible_points_are_dropped() {
    let line: Vec<Position> = [150.0, 10.0, 170.0].iter().map(|&lng| Position::new(lng, 0.0)).collect();
    assert!(project_path(&line, &flat()).is_empty());
}

#[test]
fn land_paths_cover_every_ring() {
    let square = |x: f64| {
        vec![
            Position::new(x, 0.0),
            Position::new(x, 10.0),
            Position::new(x + 10.0, 10.0),
            Position::new(x + 10.0, 0.0),
            Position::new(x, 0.0),
        ]
    };
    let land = FeatureCollection {
        features: vec![
            Feature { geometry: Some(Geometry::MultiPolygon { coordinates: vec![vec![square(0.0)], vec![square(20.0)]] }) },
            Feature { geometry: None },
            // Entirely on the far side.
            Feature { geometry: Some(Geometry::Polygon { coordinates: vec![square(160.0)] }) },
        ],
    };
    let paths = land_paths(&land, &flat());
    assert_eq!(paths.len(), 2);
    assert!(paths.iter().all(|p| p.len() == 5));
}

#[test]
fn dots_are_culled_to_surface_and_hemisphere() {
    let proj = Orthographic::new([0.0, 0.0, 0.0], 100.0, (50.0, 100.0));
    let dots = [
        Position::new(0.0, 0.0),
        // Projects to x < 0.
        Position::new(-60.0, 0.0),
        Position::new(120.0, 0.0),
        Position::new(20.0, 20.0),
    ];
    let visible = visible_dots(&dots, &proj, 200.0, 200.0);
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|&(x, y)| (0.0..=200.0).contains(&x) && (0.0..=200.0).contains(&y)));
}
