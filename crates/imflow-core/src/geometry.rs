use glam::{Vec2, Vec3};

use crate::Vertex;

/// Corners of the clip-space unit square. UV `v` grows downwards, so the
/// image's first row lands at the top of the screen.
pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex::new(Vec3::new(-1.0, -1.0, 0.0), Vec2::new(0.0, 1.0)), // bottom left
    Vertex::new(Vec3::new(-1.0, 1.0, 0.0), Vec2::new(0.0, 0.0)),  // top left
    Vertex::new(Vec3::new(1.0, -1.0, 0.0), Vec2::new(1.0, 1.0)),  // bottom right
    Vertex::new(Vec3::new(1.0, 1.0, 0.0), Vec2::new(1.0, 0.0)),   // top right
];

/// Two triangles over [`QUAD_VERTICES`], triangle-list topology.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 1, 3];
