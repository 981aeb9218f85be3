//! Wireframe shape palette: vertex and edge tables per shape.
//!
//! Shapes are built on the CPU and uploaded as uniform arrays; the fragment
//! program only knows how to draw "these vertices joined by these edges".
//! `Morphing` is the one shape whose table depends on time.

#[cfg(test)]
#[path = "shapes_test.rs"]
mod shapes_test;

use std::f32::consts::TAU;

use glam::Vec3;

use crate::consts::{MAX_SHAPE_EDGES, MAX_SHAPE_VERTICES, MORPH_RATE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    Cube,
    Tetrahedron,
    Octahedron,
    Icosahedron,
    Pyramid,
    Diamond,
    HexagonalPrism,
    Morphing,
}

/// Click order.
pub const SHAPE_PALETTE: [Shape; 8] = [
    Shape::Cube,
    Shape::Tetrahedron,
    Shape::Octahedron,
    Shape::Icosahedron,
    Shape::Pyramid,
    Shape::Diamond,
    Shape::HexagonalPrism,
    Shape::Morphing,
];

const CUBE_EDGES: &[(u8, u8)] = &[
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

const TETRAHEDRON_EDGES: &[(u8, u8)] = &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

const OCTAHEDRON_EDGES: &[(u8, u8)] = &[
    (2, 0), (2, 1), (2, 4), (2, 5),
    (3, 0), (3, 1), (3, 4), (3, 5),
    (0, 4), (4, 1), (1, 5), (5, 0),
];

const ICOSAHEDRON_EDGES: &[(u8, u8)] = &[
    (0, 1), (0, 5), (0, 7), (0, 10), (0, 11),
    (1, 5), (1, 7), (1, 8), (1, 9),
    (2, 3), (2, 4), (2, 6), (2, 10), (2, 11),
    (3, 4), (3, 6), (3, 8), (3, 9),
    (4, 5), (4, 9), (4, 11),
    (5, 9), (5, 11),
    (6, 7), (6, 8), (6, 10),
    (7, 8), (7, 10),
    (8, 9), (9, 11), (10, 11),
];

const PYRAMID_EDGES: &[(u8, u8)] = &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 4), (1, 4), (2, 4), (3, 4)];

const DIAMOND_EDGES: &[(u8, u8)] = &[
    (0, 1), (1, 2), (2, 3), (3, 0),
    (0, 4), (1, 4), (2, 4), (3, 4),
    (0, 5), (1, 5), (2, 5), (3, 5),
];

const PRISM_EDGES: &[(u8, u8)] = &[
    (0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0),
    (6, 7), (7, 8), (8, 9), (9, 10), (10, 11), (11, 6),
    (0, 6), (1, 7), (2, 8), (3, 9), (4, 10), (5, 11),
];

/// Cube edges kept while morphing; they fade out as the blend rises.
const MORPH_CUBE_EDGES: &[(u8, u8)] = &[(0, 1), (1, 2), (2, 3), (3, 0), (4, 5), (5, 6), (6, 7), (7, 4)];

/// Diagonals that fade in with the blend.
const MORPH_DIAGONALS: &[(u8, u8)] = &[(0, 6), (1, 7), (2, 4), (3, 5)];

impl Shape {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cube => "Cube",
            Self::Tetrahedron => "Tetrahedron",
            Self::Octahedron => "Octahedron",
            Self::Icosahedron => "Icosahedron",
            Self::Pyramid => "Pyramid",
            Self::Diamond => "Diamond",
            Self::HexagonalPrism => "Hexagonal Prism",
            Self::Morphing => "Morphing",
        }
    }

    /// Upper-cased name for the overlay caption.
    #[must_use]
    pub fn label(self) -> String {
        self.name().to_uppercase()
    }

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Palette entry at `index`, wrapping around.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        SHAPE_PALETTE[index % SHAPE_PALETTE.len()]
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Vertices and weighted edges at `time` seconds.
    #[must_use]
    pub fn frame(self, time: f32) -> ShapeFrame {
        match self {
            Self::Cube => ShapeFrame::solid(cube_vertices().to_vec(), CUBE_EDGES),
            Self::Tetrahedron => ShapeFrame::solid(tetrahedron_vertices().to_vec(), TETRAHEDRON_EDGES),
            Self::Octahedron => ShapeFrame::solid(octahedron_vertices().to_vec(), OCTAHEDRON_EDGES),
            Self::Icosahedron => ShapeFrame::solid(icosahedron_vertices().to_vec(), ICOSAHEDRON_EDGES),
            Self::Pyramid => ShapeFrame::solid(pyramid_vertices().to_vec(), PYRAMID_EDGES),
            Self::Diamond => ShapeFrame::solid(diamond_vertices().to_vec(), DIAMOND_EDGES),
            Self::HexagonalPrism => ShapeFrame::solid(prism_vertices(), PRISM_EDGES),
            Self::Morphing => morph_frame(morph_blend(time)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: u8,
    pub to: u8,
    pub opacity: f32,
}

/// One frame's worth of geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeFrame {
    pub vertices: Vec<Vec3>,
    pub edges: Vec<Edge>,
}

impl ShapeFrame {
    fn solid(vertices: Vec<Vec3>, edges: &[(u8, u8)]) -> Self {
        Self { vertices, edges: weighted(edges, 1.0) }
    }

    /// `vec3[MAX_SHAPE_VERTICES]` uniform data, zero-padded.
    #[must_use]
    pub fn vertex_uniforms(&self) -> [f32; MAX_SHAPE_VERTICES * 3] {
        let mut out = [0.0; MAX_SHAPE_VERTICES * 3];
        for (slot, v) in out.chunks_exact_mut(3).zip(&self.vertices) {
            slot.copy_from_slice(&v.to_array());
        }
        out
    }

    /// `vec3[MAX_SHAPE_EDGES]` uniform data as `(from, to, opacity)`, zero-padded.
    #[must_use]
    pub fn edge_uniforms(&self) -> [f32; MAX_SHAPE_EDGES * 3] {
        let mut out = [0.0; MAX_SHAPE_EDGES * 3];
        for (slot, e) in out.chunks_exact_mut(3).zip(&self.edges) {
            slot.copy_from_slice(&[f32::from(e.from), f32::from(e.to), e.opacity]);
        }
        out
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len().min(MAX_SHAPE_EDGES)
    }
}

fn weighted(edges: &[(u8, u8)], opacity: f32) -> Vec<Edge> {
    edges.iter().map(|&(from, to)| Edge { from, to, opacity }).collect()
}

/// Morph blend in `[0, 1]`: `sin(t · rate) · 0.5 + 0.5`.
#[must_use]
pub fn morph_blend(time: f32) -> f32 {
    (time * MORPH_RATE).sin() * 0.5 + 0.5
}

fn morph_frame(blend: f32) -> ShapeFrame {
    let cube = cube_vertices();
    let octa = octahedron_vertices();
    let vertices = cube
        .iter()
        .enumerate()
        .map(|(i, &c)| match octa.get(i) {
            Some(&o) => c.lerp(o * 1.5, blend),
            None => c * (1.0 - blend * 0.3),
        })
        .collect();

    let mut edges = weighted(MORPH_CUBE_EDGES, 1.0 - blend * 0.5);
    edges.extend(weighted(MORPH_DIAGONALS, blend));
    ShapeFrame { vertices, edges }
}

fn cube_vertices() -> [Vec3; 8] {
    let s = 0.7;
    [
        Vec3::new(-s, -s, -s),
        Vec3::new(s, -s, -s),
        Vec3::new(s, s, -s),
        Vec3::new(-s, s, -s),
        Vec3::new(-s, -s, s),
        Vec3::new(s, -s, s),
        Vec3::new(s, s, s),
        Vec3::new(-s, s, s),
    ]
}

fn tetrahedron_vertices() -> [Vec3; 4] {
    let a = 1.0 / 3.0_f32.sqrt();
    [Vec3::new(a, a, a), Vec3::new(a, -a, -a), Vec3::new(-a, a, -a), Vec3::new(-a, -a, a)]
}

fn octahedron_vertices() -> [Vec3; 6] {
    [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z]
}

fn icosahedron_vertices() -> [Vec3; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let s = 1.0 / (1.0 + t * t).sqrt();
    let ts = t * s;
    [
        Vec3::new(-s, ts, 0.0),
        Vec3::new(s, ts, 0.0),
        Vec3::new(-s, -ts, 0.0),
        Vec3::new(s, -ts, 0.0),
        Vec3::new(0.0, -s, ts),
        Vec3::new(0.0, s, ts),
        Vec3::new(0.0, -s, -ts),
        Vec3::new(0.0, s, -ts),
        Vec3::new(ts, 0.0, -s),
        Vec3::new(ts, 0.0, s),
        Vec3::new(-ts, 0.0, -s),
        Vec3::new(-ts, 0.0, s),
    ]
}

fn pyramid_vertices() -> [Vec3; 5] {
    let s = 0.7;
    [
        Vec3::new(-s, 0.0, -s),
        Vec3::new(s, 0.0, -s),
        Vec3::new(s, 0.0, s),
        Vec3::new(-s, 0.0, s),
        Vec3::Y,
    ]
}

fn diamond_vertices() -> [Vec3; 6] {
    let s = 0.6;
    [
        Vec3::new(-s, 0.0, -s),
        Vec3::new(s, 0.0, -s),
        Vec3::new(s, 0.0, s),
        Vec3::new(-s, 0.0, s),
        Vec3::Y,
        Vec3::NEG_Y,
    ]
}

fn prism_vertices() -> Vec<Vec3> {
    let step = TAU / 6.0;
    [-1.0, 1.0]
        .iter()
        .flat_map(|&y| (0..6).map(move |i| {
            let a = i as f32 * step;
            Vec3::new(a.cos(), y, a.sin())
        }))
        .collect()
}
