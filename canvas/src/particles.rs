//! Fixed-size particle buffers.
//!
//! Positions, colors, velocities and rest positions are index-aligned flat
//! `f32` arrays, three scalars per particle, laid out exactly as they are
//! uploaded to the GPU. The count is fixed at construction; buffers are only
//! ever exposed as slices, so their lengths cannot change afterwards.

#[cfg(test)]
#[path = "particles_test.rs"]
mod particles_test;

use glam::Vec3;

use crate::knot::sample_positions;

pub struct ParticleSet {
    count: usize,
    positions: Vec<f32>,
    colors: Vec<f32>,
    velocities: Vec<f32>,
    rest: Vec<f32>,
}

impl ParticleSet {
    /// Sample `count` particles from `vertices` with wraparound, coloring each with `color(i)`.
    #[must_use]
    pub fn sample(vertices: &[Vec3], count: usize, mut color: impl FnMut(usize) -> [f32; 3]) -> Self {
        let positions = sample_positions(vertices, count);
        let mut colors = vec![0.0; count * 3];
        for (i, slot) in colors.chunks_exact_mut(3).enumerate() {
            slot.copy_from_slice(&color(i));
        }
        Self {
            count,
            rest: positions.clone(),
            positions,
            colors,
            velocities: vec![0.0; count * 3],
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    #[must_use]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    #[must_use]
    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    #[must_use]
    pub fn rest(&self) -> &[f32] {
        &self.rest
    }

    /// Split mutable access for in-place integration: `(positions, velocities, rest)`.
    pub fn dynamics_mut(&mut self) -> (&mut [f32], &mut [f32], &[f32]) {
        (&mut self.positions, &mut self.velocities, &self.rest)
    }

    /// Whether every buffer holds exactly `count × 3` scalars.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let n = self.count * 3;
        self.positions.len() == n && self.colors.len() == n && self.velocities.len() == n && self.rest.len() == n
    }
}

/// Convert HSL (all components in `0..=1`) to RGB.
#[must_use]
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [hue_channel(p, q, h + 1.0 / 3.0), hue_channel(p, q, h), hue_channel(p, q, h - 1.0 / 3.0)]
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}
