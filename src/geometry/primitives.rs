use glam::DVec3;
use std::f64::consts::TAU;

use crate::types::Mesh;

/// Closed cylinder standing on the local origin along +Z.
///
/// Vertex layout: bottom and top ring vertices interleaved (`2i`, `2i + 1`),
/// then the bottom and top cap centers. Sides are quads, caps are triangle fans,
/// all wound to face outward.
pub fn make_cylinder(radius: f64, height: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::new();
    let mut ring_bottom = Vec::with_capacity(segments as usize);
    let mut ring_top = Vec::with_capacity(segments as usize);

    for i in 0..segments {
        let angle = TAU * i as f64 / segments as f64;
        let (sin, cos) = angle.sin_cos();
        ring_bottom.push(mesh.add_vertex(DVec3::new(radius * cos, radius * sin, 0.0)));
        ring_top.push(mesh.add_vertex(DVec3::new(radius * cos, radius * sin, height)));
    }

    let segments = segments as usize;
    for i in 0..segments {
        let next = (i + 1) % segments;
        mesh.add_quad(ring_bottom[i], ring_bottom[next], ring_top[next], ring_top[i]);
    }

    let center_bottom = mesh.add_vertex(DVec3::ZERO);
    let center_top = mesh.add_vertex(DVec3::new(0.0, 0.0, height));

    for i in 0..segments {
        let next = (i + 1) % segments;
        mesh.add_triangle(center_bottom, ring_bottom[next], ring_bottom[i]);
        mesh.add_triangle(center_top, ring_top[i], ring_top[next]);
    }

    mesh.compute_normals();
    mesh
}
