use std::collections::HashMap;
use std::f32::consts::PI;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;

use crate::types::Vertex;

static NEXT_GEOMETRY_ID: AtomicU64 = AtomicU64::new(1);

/// Indexed triangle mesh.
///
/// The id identifies the buffer contents for GPU upload caching; clones share it.
#[derive(Debug, Clone)]
pub struct MeshGeometry {
    id: u64,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl MeshGeometry {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            id: NEXT_GEOMETRY_ID.fetch_add(1, Ordering::Relaxed),
            vertices,
            indices,
        }
    }

    /// Builds a mesh from raw attributes, generating smooth normals when none are given
    pub fn from_parts(positions: Vec<[f32; 3]>, normals: Option<Vec<[f32; 3]>>, indices: Vec<u32>) -> Self {
        let normals = match normals {
            Some(normals) if normals.len() == positions.len() => normals,
            _ => compute_normals(&positions, &indices),
        };

        let vertices = positions
            .into_iter()
            .zip(normals)
            .map(|(position, normal)| Vertex { position, normal })
            .collect();

        Self::new(vertices, indices)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.vertices.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), v| {
                let p = Vec3::from_array(v.position);
                (min.min(p), max.max(p))
            },
        )
    }
}

/// Area-weighted smooth vertex normals
pub fn compute_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accumulated = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let p0 = Vec3::from_array(positions[a]);
        let p1 = Vec3::from_array(positions[b]);
        let p2 = Vec3::from_array(positions[c]);
        let face = (p1 - p0).cross(p2 - p0);
        accumulated[a] += face;
        accumulated[b] += face;
        accumulated[c] += face;
    }

    accumulated
        .into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            let n = if n == Vec3::ZERO { Vec3::Y } else { n };
            n.to_array()
        })
        .collect()
}

/// Axis-aligned box centered on the origin with flat face normals
pub fn box_mesh(size: Vec3) -> MeshGeometry {
    let h = size * 0.5;
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in faces {
        let base = vertices.len() as u32;
        let center = normal * h;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = center + u * h * su + v * h * sv;
            vertices.push(Vertex {
                position: p.to_array(),
                normal: normal.to_array(),
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshGeometry::new(vertices, indices)
}

/// Horizontal plane at y = 0 facing +Y
pub fn plane(width: f32, depth: f32) -> MeshGeometry {
    let (hw, hd) = (width * 0.5, depth * 0.5);
    let corners = [[-hw, 0.0, hd], [hw, 0.0, hd], [hw, 0.0, -hd], [-hw, 0.0, -hd]];
    let vertices = corners
        .iter()
        .map(|&position| Vertex {
            position,
            normal: [0.0, 1.0, 0.0],
        })
        .collect();

    MeshGeometry::new(vertices, vec![0, 1, 2, 0, 2, 3])
}

/// Geodesic sphere from a subdivided icosahedron
pub fn icosphere(radius: f32, subdivisions: u32) -> MeshGeometry {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let mut points: Vec<Vec3> = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
    .iter()
    .map(|p| Vec3::from_array(*p).normalize())
    .collect();

    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut midpoint = |a: u32, b: u32, points: &mut Vec<Vec3>| -> u32 {
            let key = (a.min(b), a.max(b));
            *midpoints.entry(key).or_insert_with(|| {
                let mid = ((points[a as usize] + points[b as usize]) * 0.5).normalize();
                points.push(mid);
                (points.len() - 1) as u32
            })
        };

        faces = faces
            .iter()
            .flat_map(|&[a, b, c]| {
                let ab = midpoint(a, b, &mut points);
                let bc = midpoint(b, c, &mut points);
                let ca = midpoint(c, a, &mut points);
                [[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]
            })
            .collect();
    }

    let vertices = points
        .iter()
        .map(|p| Vertex {
            position: (*p * radius).to_array(),
            normal: p.to_array(),
        })
        .collect();

    MeshGeometry::new(vertices, faces.into_iter().flatten().collect())
}

/// (p, q) torus knot tube
pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> MeshGeometry {
    let curve = |u: f32| -> Vec3 {
        let qu_over_p = q as f32 / p as f32 * u;
        let cs = qu_over_p.cos();
        Vec3::new(
            radius * (2.0 + cs) * 0.5 * u.cos(),
            radius * (2.0 + cs) * 0.5 * u.sin(),
            radius * qu_over_p.sin() * 0.5,
        )
    };

    let mut vertices = Vec::with_capacity(((tubular_segments + 1) * (radial_segments + 1)) as usize);

    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * p as f32 * PI * 2.0;
        let p1 = curve(u);
        let p2 = curve(u + 0.01);

        let tangent = p2 - p1;
        let bitangent = tangent.cross(p2 + p1).normalize();
        let normal = bitangent.cross(tangent).normalize();

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * PI * 2.0;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let position = p1 + normal * cx + bitangent * cy;
            vertices.push(Vertex {
                position: position.to_array(),
                normal: (position - p1).normalize_or_zero().to_array(),
            });
        }
    }

    let ring = radial_segments + 1;
    let mut indices = Vec::with_capacity((tubular_segments * radial_segments * 6) as usize);
    for j in 1..=tubular_segments {
        for i in 1..=radial_segments {
            let a = ring * (j - 1) + (i - 1);
            let b = ring * j + (i - 1);
            let c = ring * j + i;
            let d = ring * (j - 1) + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    MeshGeometry::new(vertices, indices)
}
