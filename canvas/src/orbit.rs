#[cfg(test)]
#[path = "orbit_test.rs"]
mod orbit_test;

/// Drag-driven rotation about the X and Y axes.
///
/// Drag input moves the target; each frame the displayed angles cover a fixed
/// fraction of the remaining distance (exponential approach, no overshoot).
/// The idle spin is applied on top at read time and never feeds back into
/// the target.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitState {
    pub current_x: f32,
    pub current_y: f32,
    pub target_x: f32,
    pub target_y: f32,
}

impl OrbitState {
    /// Accumulate a drag of `dx × dy` pixels. Horizontal motion turns about Y.
    pub fn drag(&mut self, dx: f64, dy: f64, sensitivity: f32) {
        self.target_y += dx as f32 * sensitivity;
        self.target_x += dy as f32 * sensitivity;
    }

    /// Advance the displayed angles one frame toward the target.
    pub fn step(&mut self, damping: f32) {
        self.current_x += (self.target_x - self.current_x) * damping;
        self.current_y += (self.target_y - self.current_y) * damping;
    }

    /// Largest per-axis gap between displayed and target angles.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        (self.target_x - self.current_x)
            .abs()
            .max((self.target_y - self.current_y).abs())
    }

    /// Displayed `(x, y)` angles including the idle spin at `elapsed` seconds.
    #[must_use]
    pub fn angles(&self, elapsed: f32, idle_spin: f32) -> (f32, f32) {
        (self.current_x, elapsed * idle_spin + self.current_y)
    }
}
