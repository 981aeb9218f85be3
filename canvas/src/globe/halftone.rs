//! Halftone dot field: a regular lng/lat grid clipped to land.

#[cfg(test)]
#[path = "halftone_test.rs"]
mod halftone_test;

use super::geo::{Feature, FeatureCollection, Position};
use crate::consts::DOT_STEP_PER_SPACING;

/// Grid step in degrees for a visual dot spacing.
#[must_use]
pub fn step_size(dot_spacing: f64) -> f64 {
    dot_spacing * DOT_STEP_PER_SPACING
}

/// Grid points inside `feature`, scanning its bounding box column by column.
#[must_use]
pub fn dots_in_feature(feature: &Feature, step: f64) -> Vec<Position> {
    let Some(geometry) = &feature.geometry else {
        return Vec::new();
    };
    let Some(bounds) = geometry.bounds() else {
        return Vec::new();
    };
    if step.is_nan() || step <= 0.0 {
        return Vec::new();
    }

    let mut dots = Vec::new();
    let mut lng = bounds.min.lng;
    while lng <= bounds.max.lng {
        let mut lat = bounds.min.lat;
        while lat <= bounds.max.lat {
            let point = Position::new(lng, lat);
            if geometry.contains(point) {
                dots.push(point);
            }
            lat += step;
        }
        lng += step;
    }
    dots
}

/// Dots for every feature in the collection.
#[must_use]
pub fn land_dots(land: &FeatureCollection, dot_spacing: f64) -> Vec<Position> {
    let step = step_size(dot_spacing);
    land.features.iter().flat_map(|f| dots_in_feature(f, step)).collect()
}
