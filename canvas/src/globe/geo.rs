//! Minimal GeoJSON model for land polygons and ray-casting containment.
//!
//! Only `Polygon` and `MultiPolygon` geometries carry land; anything else in
//! the collection deserializes to [`Geometry::Other`] and contains nothing.
//! Containment is planar in longitude/latitude degrees.

#[cfg(test)]
#[path = "geo_test.rs"]
mod geo_test;

use serde::Deserialize;

/// A `[longitude, latitude]` pair in degrees. Extra coordinates (altitude) are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct Position {
    pub lng: f64,
    pub lat: f64,
}

impl Position {
    #[must_use]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl TryFrom<Vec<f64>> for Position {
    type Error = String;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        match value.as_slice() {
            [lng, lat, ..] => Ok(Self::new(*lng, *lat)),
            _ => Err(format!("position needs two coordinates, got {}", value.len())),
        }
    }
}

pub type Ring = Vec<Position>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// Exterior ring followed by hole rings.
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// Axis-aligned longitude/latitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Position,
    pub max: Position,
}

impl Bounds {
    fn around(p: Position) -> Self {
        Self { min: p, max: p }
    }

    fn include(&mut self, p: Position) {
        self.min.lng = self.min.lng.min(p.lng);
        self.min.lat = self.min.lat.min(p.lat);
        self.max.lng = self.max.lng.max(p.lng);
        self.max.lat = self.max.lat.max(p.lat);
    }
}

/// Even-odd ray cast: toggles on every edge a rightward ray from `point` crosses.
#[must_use]
pub fn point_in_ring(point: Position, ring: &[Position]) -> bool {
    let (x, y) = (point.lng, point.lat);
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for (i, pi) in ring.iter().enumerate() {
        let pj = ring[j];
        if (pi.lat > y) != (pj.lat > y) && x < (pj.lng - pi.lng) * (y - pi.lat) / (pj.lat - pi.lat) + pi.lng {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Inside the exterior ring and outside every hole.
#[must_use]
pub fn point_in_polygon(point: Position, rings: &[Ring]) -> bool {
    let Some((exterior, holes)) = rings.split_first() else {
        return false;
    };
    point_in_ring(point, exterior) && !holes.iter().any(|hole| point_in_ring(point, hole))
}

impl Geometry {
    #[must_use]
    pub fn contains(&self, point: Position) -> bool {
        match self {
            Self::Polygon { coordinates } => point_in_polygon(point, coordinates),
            Self::MultiPolygon { coordinates } => coordinates.iter().any(|polygon| point_in_polygon(point, polygon)),
            Self::Other => false,
        }
    }

    /// Every ring, exterior and holes, of every polygon.
    pub fn rings(&self) -> Box<dyn Iterator<Item = &Ring> + '_> {
        match self {
            Self::Polygon { coordinates } => Box::new(coordinates.iter()),
            Self::MultiPolygon { coordinates } => Box::new(coordinates.iter().flatten()),
            Self::Other => Box::new(std::iter::empty()),
        }
    }

    /// Bounding box over all ring positions, `None` for empty geometry.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let mut positions = self.rings().flatten().copied();
        let first = positions.next()?;
        let mut bounds = Bounds::around(first);
        for p in positions {
            bounds.include(p);
        }
        Some(bounds)
    }
}

impl Feature {
    #[must_use]
    pub fn contains(&self, point: Position) -> bool {
        self.geometry.as_ref().is_some_and(|g| g.contains(point))
    }
}
