//! Cube-derived scene geometry
//!
//! The room, the controller marker and the racket are all boxes built from
//! the same 24-vertex cube (four vertices per face so each face gets a flat
//! normal). The renderer consumes the meshes; the simulation only needs the
//! racket's local bounds.

use glam::Vec3;

use crate::consts::{RACKET_SCALE, RACKET_Z_OFFSET};
use crate::sim::RacketBounds;

/// Unit cube positions, four per face: front, left, back, right, top, bottom
const CUBE_POSITIONS: [[f32; 3]; 24] = [
    [-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0],
    [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0],
    [1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0], [-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0],
];

/// Outward face normals in the same face order
const FACE_NORMALS: [[f32; 3]; 6] = [
    [0.0, 0.0, 1.0],
    [-1.0, 0.0, 0.0],
    [0.0, 0.0, -1.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
];

/// Two triangles per face
const CUBE_INDICES: [u32; 36] = [
    0, 2, 3, 0, 1, 2, // front
    4, 6, 7, 4, 5, 6, // left
    8, 10, 11, 8, 9, 10, // back
    12, 14, 15, 12, 13, 14, // right
    16, 18, 19, 16, 17, 18, // top
    20, 22, 23, 20, 21, 22, // bottom
];

/// Indexed triangle mesh handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Tightest axis-aligned box around the vertices
    pub fn bounds(&self) -> Option<RacketBounds> {
        RacketBounds::from_points(self.positions.iter().copied())
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// An axis-aligned box described by its center and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Cuboid {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    pub fn bounds(&self) -> RacketBounds {
        RacketBounds::new(self.center - self.half_extents, self.center + self.half_extents)
    }

    /// Mesh with normals facing out, or in for an enclosing box
    pub fn mesh(&self, inward: bool) -> Mesh {
        let positions = CUBE_POSITIONS
            .iter()
            .map(|p| self.center + Vec3::from(*p) * self.half_extents)
            .collect();
        let sign = if inward { -1.0 } else { 1.0 };
        let normals = FACE_NORMALS
            .iter()
            .flat_map(|n| std::iter::repeat_n(Vec3::from(*n) * sign, 4))
            .collect();
        Mesh {
            positions,
            normals,
            indices: CUBE_INDICES.to_vec(),
        }
    }
}

/// The racket blade in controller space: long along -Z, thin along X
pub fn racket_cuboid(controller_size: f32) -> Cuboid {
    Cuboid::new(
        Vec3::new(0.0, 0.0, RACKET_Z_OFFSET),
        RACKET_SCALE * controller_size,
    )
}

/// Racket mesh in controller space
pub fn racket(controller_size: f32) -> Mesh {
    racket_cuboid(controller_size).mesh(false)
}

/// Racket box in controller space, as used for contact tests
pub fn racket_bounds(controller_size: f32) -> RacketBounds {
    racket_cuboid(controller_size).bounds()
}

/// Small cube marking the hand controller
pub fn controller(controller_size: f32) -> Mesh {
    Cuboid::new(Vec3::ZERO, Vec3::splat(controller_size)).mesh(false)
}

/// The room the ball bounces around in, seen from inside
pub fn room(half_extent: f32) -> Mesh {
    Cuboid::new(Vec3::ZERO, Vec3::splat(half_extent)).mesh(true)
}
