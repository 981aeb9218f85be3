//! Orthographic projection with a three-axis rotation, clipped to the facing hemisphere.
//!
//! Rotation is `[λ, φ, γ]` in degrees, applied as a longitude shift followed by
//! a φ/γ tilt. Screen space has +y down.

#[cfg(test)]
#[path = "projection_test.rs"]
mod projection_test;

use std::f64::consts::PI;

use super::geo::Position;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orthographic {
    /// `[λ, φ, γ]` degrees.
    pub rotation: [f64; 3],
    /// Globe radius in CSS pixels.
    pub scale: f64,
    /// Screen position of the globe center.
    pub center: (f64, f64),
}

impl Orthographic {
    #[must_use]
    pub fn new(rotation: [f64; 3], scale: f64, center: (f64, f64)) -> Self {
        Self { rotation, scale, center }
    }

    /// Rotate a position into view space, returning `(λ', φ')` in radians.
    #[must_use]
    pub fn rotate(&self, p: Position) -> (f64, f64) {
        let [dl, dp, dg] = self.rotation.map(f64::to_radians);
        let lambda = wrap_pi(p.lng.to_radians() + dl);
        let phi = p.lat.to_radians();

        let (sin_dp, cos_dp) = dp.sin_cos();
        let (sin_dg, cos_dg) = dg.sin_cos();
        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * cos_dp + x * sin_dp;

        let out_lambda = (y * cos_dg - k * sin_dg).atan2(x * cos_dp - z * sin_dp);
        let out_phi = (k * cos_dg + y * sin_dg).clamp(-1.0, 1.0).asin();
        (out_lambda, out_phi)
    }

    /// Whether `p` lies on the hemisphere facing the viewer.
    #[must_use]
    pub fn is_visible(&self, p: Position) -> bool {
        let (lambda, phi) = self.rotate(p);
        lambda.cos() * phi.cos() > 0.0
    }

    /// Screen coordinates of `p`, or `None` when it is on the far side.
    #[must_use]
    pub fn project(&self, p: Position) -> Option<(f64, f64)> {
        let (lambda, phi) = self.rotate(p);
        if lambda.cos() * phi.cos() <= 0.0 {
            return None;
        }
        let x = phi.cos() * lambda.sin();
        let y = phi.sin();
        Some((self.center.0 + x * self.scale, self.center.1 - y * self.scale))
    }

    /// The geographic position currently at the center of the disc.
    #[must_use]
    pub fn view_center(&self) -> Position {
        Position::new(-self.rotation[0], -self.rotation[1])
    }
}

/// Great-circle angle between two positions in radians.
#[must_use]
pub fn geo_distance(a: Position, b: Position) -> f64 {
    let (phi1, phi2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_phi = phi2 - phi1;
    let d_lambda = (b.lng - a.lng).to_radians();
    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * h.sqrt().clamp(0.0, 1.0).asin()
}

fn wrap_pi(angle: f64) -> f64 {
    if angle > PI {
        angle - 2.0 * PI
    } else if angle < -PI {
        angle + 2.0 * PI
    } else {
        angle
    }
}
