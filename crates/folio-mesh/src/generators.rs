//! Procedural mesh generators for tests and the command-line driver.
//!
//! Sheets are generated lying flat in the XZ plane (Y up), which is the
//! orientation the default corner pins look for.

use glam::Vec3;

use crate::mesh::TriangleMesh;

/// Generates a flat rectangular quad grid in the XZ plane.
///
/// The grid spans `[-width/2, width/2]` in X and `[-depth/2, depth/2]` in Z,
/// centered at the origin at Y=0. Vertex `(i, j)` has index `j * (cols + 1) + i`.
///
/// # Arguments
/// - `cols`: Number of quads along X (vertex count = cols + 1).
/// - `rows`: Number of quads along Z (vertex count = rows + 1).
/// - `width`: Total extent along X.
/// - `depth`: Total extent along Z.
///
/// # Example
/// ```
/// use folio_mesh::generators::quad_grid;
/// let mesh = quad_grid(2, 2, 1.0, 1.0);
/// assert_eq!(mesh.vertex_count(), 9);  // 3×3 vertices
/// assert_eq!(mesh.triangle_count(), 8); // 2×2 quads × 2 tris each
/// ```
pub fn quad_grid(cols: usize, rows: usize, width: f32, depth: f32) -> TriangleMesh {
    let verts_x = cols + 1;
    let verts_z = rows + 1;
    let mut mesh = TriangleMesh::with_capacity(verts_x * verts_z, cols * rows * 2);

    let half_w = width / 2.0;
    let half_d = depth / 2.0;

    for j in 0..verts_z {
        for i in 0..verts_x {
            let u = if cols == 0 { 0.0 } else { i as f32 / cols as f32 };
            let v = if rows == 0 { 0.0 } else { j as f32 / rows as f32 };
            mesh.push_vertex(Vec3::new(-half_w + u * width, 0.0, -half_d + v * depth));
        }
    }

    // Two triangles per quad, split along the top-right / bottom-left diagonal
    for j in 0..rows {
        for i in 0..cols {
            let top_left = (j * verts_x + i) as u32;
            let top_right = top_left + 1;
            let bot_left = top_left + verts_x as u32;
            let bot_right = bot_left + 1;

            mesh.indices.extend_from_slice(&[top_left, bot_left, top_right]);
            mesh.indices.extend_from_slice(&[top_right, bot_left, bot_right]);
        }
    }

    mesh
}
