//! Torus-knot vertex generation.
//!
//! Produces the vertex list of a tube swept along a (p, q) torus knot,
//! ordered ring by ring along the curve. The point engines treat this list
//! purely as a source of sample positions.

#[cfg(test)]
#[path = "knot_test.rs"]
mod knot_test;

use std::f32::consts::TAU;

use glam::Vec3;

/// Tube-around-a-knot parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusKnot {
    pub radius: f32,
    pub tube: f32,
    pub tubular_segments: usize,
    pub radial_segments: usize,
    pub p: u32,
    pub q: u32,
}

impl TorusKnot {
    /// A (2, 3) trefoil-wound knot.
    #[must_use]
    pub fn new(radius: f32, tube: f32, tubular_segments: usize, radial_segments: usize) -> Self {
        Self { radius, tube, tubular_segments, radial_segments, p: 2, q: 3 }
    }

    /// Number of vertices in the swept tube, including the seam duplicates.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        (self.tubular_segments + 1) * (self.radial_segments + 1)
    }

    /// Centerline position at curve parameter `u`.
    #[must_use]
    pub fn curve_point(&self, u: f32) -> Vec3 {
        let q_over_p = self.q as f32 / self.p as f32 * u;
        let cs = q_over_p.cos();
        Vec3::new(
            self.radius * (2.0 + cs) * 0.5 * u.cos(),
            self.radius * (2.0 + cs) * u.sin() * 0.5,
            self.radius * q_over_p.sin() * 0.5,
        )
    }

    /// All tube vertices, in curve order.
    #[must_use]
    pub fn vertices(&self) -> Vec<Vec3> {
        let mut out = Vec::with_capacity(self.vertex_count());
        let tubular = self.tubular_segments.max(1) as f32;
        let radial = self.radial_segments.max(1) as f32;

        for i in 0..=self.tubular_segments {
            let u = i as f32 / tubular * self.p as f32 * TAU;
            let p1 = self.curve_point(u);
            let p2 = self.curve_point(u + 0.01);

            // Frenet-like frame from the forward difference.
            let tangent = p2 - p1;
            let mut normal = p2 + p1;
            let binormal = tangent.cross(normal).normalize_or_zero();
            normal = binormal.cross(tangent).normalize_or_zero();

            for j in 0..=self.radial_segments {
                let v = j as f32 / radial * TAU;
                let cx = -self.tube * v.cos();
                let cy = self.tube * v.sin();
                out.push(p1 + normal * cx + binormal * cy);
            }
        }
        out
    }
}

/// Fill a flat `count × 3` buffer by walking `vertices` with wraparound.
#[must_use]
pub fn sample_positions(vertices: &[Vec3], count: usize) -> Vec<f32> {
    let mut out = vec![0.0; count * 3];
    if vertices.is_empty() {
        return out;
    }
    for (i, slot) in out.chunks_exact_mut(3).enumerate() {
        vertices[i % vertices.len()].write_to_slice(slot);
    }
    out
}
