//! Primitive triangle geometry.
//!
//! Every generator reproduces the renderer's geometry for the same primitive
//! (vertex layout, winding and segment counts), so an exported mesh matches what
//! the viewer draws. All primitives are centered at the origin with Y up.

use std::f64::consts::{PI, TAU};

use glam::DVec3;
use shared::{Shape, Tessellation};

/// CPU-side triangle mesh: positions plus an optional index buffer.
///
/// Without indices every three consecutive positions form one triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    pub positions: Vec<DVec3>,
    pub indices: Option<Vec<u32>>,
}

/// One output triangle with its unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    pub normal: DVec3,
    pub vertices: [DVec3; 3],
}

impl TriMesh {
    pub fn indexed(positions: Vec<DVec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices: Some(indices),
        }
    }

    pub fn non_indexed(positions: Vec<DVec3>) -> Self {
        Self {
            positions,
            indices: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Index triples of every triangle (synthesized for non-indexed meshes).
    pub fn faces(&self) -> Vec<[u32; 3]> {
        match &self.indices {
            Some(indices) => indices
                .chunks_exact(3)
                .map(|c| [c[0], c[1], c[2]])
                .collect(),
            None => (0..(self.positions.len() / 3) as u32)
                .map(|t| [t * 3, t * 3 + 1, t * 3 + 2])
                .collect(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    /// Build the facet for a face; `None` for degenerate triangles
    /// (non-finite normal) and out-of-range indices.
    pub fn facet(&self, face: [u32; 3]) -> Option<Facet> {
        let a = *self.positions.get(face[0] as usize)?;
        let b = *self.positions.get(face[1] as usize)?;
        let c = *self.positions.get(face[2] as usize)?;

        let normal = (b - a).cross(c - a).normalize();
        if !normal.is_finite() {
            return None;
        }
        Some(Facet {
            normal,
            vertices: [a, b, c],
        })
    }

    /// All non-degenerate triangles with their normals.
    pub fn facets(&self) -> Vec<Facet> {
        self.faces()
            .into_iter()
            .filter_map(|face| self.facet(face))
            .collect()
    }

    /// Apply `f` to every position.
    pub fn map_positions(mut self, f: impl Fn(DVec3) -> DVec3) -> Self {
        for p in &mut self.positions {
            *p = f(*p);
        }
        self
    }

    /// Axis-aligned bounds, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(min, max), &p| (min.min(p), max.max(p))),
        )
    }
}

/// Build the geometry for a resolved shape.
pub fn build(shape: &Shape, tessellation: &Tessellation) -> TriMesh {
    match *shape {
        Shape::Box => unit_box(),
        Shape::Sphere { radius } => sphere(radius, tessellation.sphere_width, tessellation.sphere_height),
        Shape::Cylinder {
            radius_top,
            radius_bottom,
            height,
        } => cylinder(radius_top, radius_bottom, height, tessellation.radial),
        Shape::Cone { radius, height } => cone(radius, height, tessellation.radial),
        Shape::Torus { radius, tube } => torus(
            radius,
            tube,
            tessellation.torus_radial,
            tessellation.torus_tubular,
        ),
        Shape::Icosahedron { radius } => icosahedron(radius),
    }
}

/// 1×1×1 cube, 6 faces × 2 triangles.
pub fn unit_box() -> TriMesh {
    let h = 0.5;

    let faces: [[DVec3; 4]; 6] = [
        // Front (+Z)
        [DVec3::new(-h, -h, h), DVec3::new(h, -h, h), DVec3::new(h, h, h), DVec3::new(-h, h, h)],
        // Back (-Z)
        [DVec3::new(h, -h, -h), DVec3::new(-h, -h, -h), DVec3::new(-h, h, -h), DVec3::new(h, h, -h)],
        // Right (+X)
        [DVec3::new(h, -h, h), DVec3::new(h, -h, -h), DVec3::new(h, h, -h), DVec3::new(h, h, h)],
        // Left (-X)
        [DVec3::new(-h, -h, -h), DVec3::new(-h, -h, h), DVec3::new(-h, h, h), DVec3::new(-h, h, -h)],
        // Top (+Y)
        [DVec3::new(-h, h, h), DVec3::new(h, h, h), DVec3::new(h, h, -h), DVec3::new(-h, h, -h)],
        // Bottom (-Y)
        [DVec3::new(-h, -h, -h), DVec3::new(h, -h, -h), DVec3::new(h, -h, h), DVec3::new(-h, -h, h)],
    ];

    let mut positions = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for quad in &faces {
        let base = positions.len() as u32;
        positions.extend_from_slice(quad);
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    TriMesh::indexed(positions, indices)
}

/// UV sphere. Pole rows emit a single triangle per quad.
pub fn sphere(radius: f64, width_segments: u32, height_segments: u32) -> TriMesh {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let mut positions = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
    let mut indices = Vec::new();

    for iy in 0..=h {
        let v = iy as f64 / h as f64;
        for ix in 0..=w {
            let u = ix as f64 / w as f64;
            positions.push(DVec3::new(
                -radius * (u * TAU).cos() * (v * PI).sin(),
                radius * (v * PI).cos(),
                radius * (u * TAU).sin() * (v * PI).sin(),
            ));
        }
    }

    let row = w + 1;
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    TriMesh::indexed(positions, indices)
}

/// Closed cylinder along Y; a zero radius drops that cap.
pub fn cylinder(radius_top: f64, radius_bottom: f64, height: f64, radial_segments: u32) -> TriMesh {
    let segments = radial_segments.max(3);
    let half = height * 0.5;
    let mut positions = Vec::new();
    let mut indices = Vec::new();

    // Side
    let row = segments + 1;
    for y in 0..=1u32 {
        let v = y as f64;
        let radius = v * (radius_bottom - radius_top) + radius_top;
        for x in 0..=segments {
            let theta = x as f64 / segments as f64 * TAU;
            positions.push(DVec3::new(
                radius * theta.sin(),
                -v * height + half,
                radius * theta.cos(),
            ));
        }
    }
    for x in 0..segments {
        let a = x;
        let b = row + x;
        let c = row + x + 1;
        let d = x + 1;

        if radius_top > 0.0 {
            indices.extend_from_slice(&[a, b, d]);
        }
        if radius_bottom > 0.0 {
            indices.extend_from_slice(&[b, c, d]);
        }
    }

    if radius_top > 0.0 {
        add_cap(&mut positions, &mut indices, radius_top, half, segments, true);
    }
    if radius_bottom > 0.0 {
        add_cap(&mut positions, &mut indices, radius_bottom, -half, segments, false);
    }

    TriMesh::indexed(positions, indices)
}

/// Cone with its apex at +Y.
pub fn cone(radius: f64, height: f64, radial_segments: u32) -> TriMesh {
    cylinder(0.0, radius, height, radial_segments)
}

/// Torus lying in the XY plane around the Z axis.
pub fn torus(radius: f64, tube: f64, radial_segments: u32, tubular_segments: u32) -> TriMesh {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    let mut positions = Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);
    let mut indices = Vec::new();

    for j in 0..=radial {
        let v = j as f64 / radial as f64 * TAU;
        for i in 0..=tubular {
            let u = i as f64 / tubular as f64 * TAU;
            let ring = radius + tube * v.cos();
            positions.push(DVec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin()));
        }
    }

    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    TriMesh::indexed(positions, indices)
}

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// Regular icosahedron (no subdivision), non-indexed like the renderer's polyhedra.
pub fn icosahedron(radius: f64) -> TriMesh {
    let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let corners = [
        DVec3::new(-1.0, t, 0.0),
        DVec3::new(1.0, t, 0.0),
        DVec3::new(-1.0, -t, 0.0),
        DVec3::new(1.0, -t, 0.0),
        DVec3::new(0.0, -1.0, t),
        DVec3::new(0.0, 1.0, t),
        DVec3::new(0.0, -1.0, -t),
        DVec3::new(0.0, 1.0, -t),
        DVec3::new(t, 0.0, -1.0),
        DVec3::new(t, 0.0, 1.0),
        DVec3::new(-t, 0.0, -1.0),
        DVec3::new(-t, 0.0, 1.0),
    ]
    .map(|c| c.normalize() * radius);

    let mut positions = Vec::with_capacity(60);
    for [a, b, c] in ICOSAHEDRON_FACES {
        positions.extend_from_slice(&[corners[b], corners[c], corners[a]]);
    }

    TriMesh::non_indexed(positions)
}

// ── Helpers ──────────────────────────────────────────────────

fn add_cap(
    positions: &mut Vec<DVec3>,
    indices: &mut Vec<u32>,
    radius: f64,
    y: f64,
    segments: u32,
    top: bool,
) {
    let center_start = positions.len() as u32;
    for _ in 0..segments {
        positions.push(DVec3::new(0.0, y, 0.0));
    }

    let ring_start = positions.len() as u32;
    for x in 0..=segments {
        let theta = x as f64 / segments as f64 * TAU;
        positions.push(DVec3::new(radius * theta.sin(), y, radius * theta.cos()));
    }

    for x in 0..segments {
        let c = center_start + x;
        let i = ring_start + x;
        if top {
            indices.extend_from_slice(&[i, i + 1, c]);
        } else {
            indices.extend_from_slice(&[i + 1, i, c]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn centroid(mesh: &TriMesh) -> DVec3 {
        let sum: DVec3 = mesh.positions.iter().copied().sum();
        sum / mesh.positions.len() as f64
    }

    /// Every facet normal points away from the mesh center.
    fn assert_outward(mesh: &TriMesh) {
        let center = centroid(mesh);
        for facet in mesh.facets() {
            let mid = (facet.vertices[0] + facet.vertices[1] + facet.vertices[2]) / 3.0;
            assert!(
                facet.normal.dot(mid - center) > -EPS,
                "inward facet at {mid:?}"
            );
        }
    }

    #[test]
    fn test_unit_box_counts() {
        let mesh = unit_box();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.facets().len(), 12);
        assert_eq!(
            mesh.bounds(),
            Some((DVec3::splat(-0.5), DVec3::splat(0.5)))
        );
        assert_outward(&mesh);
    }

    #[test]
    fn test_sphere_skips_pole_triangles() {
        let mesh = sphere(1.0, 32, 16);
        // 2 triangles per quad, minus one per quad on each pole row
        assert_eq!(mesh.triangle_count(), 32 * 16 * 2 - 2 * 32);
        assert_eq!(mesh.facets().len(), mesh.triangle_count());
        assert_outward(&mesh);
    }

    #[test]
    fn test_sphere_radius() {
        let mesh = sphere(2.5, 16, 8);
        for p in &mesh.positions {
            assert!((p.length() - 2.5).abs() < EPS);
        }
    }

    #[test]
    fn test_cylinder_counts_and_height() {
        let mesh = cylinder(1.0, 1.0, 2.0, 32);
        // side + two caps
        assert_eq!(mesh.triangle_count(), 32 * 2 + 32 * 2);
        let (min, max) = mesh.bounds().unwrap();
        assert!((min.y + 1.0).abs() < EPS);
        assert!((max.y - 1.0).abs() < EPS);
        assert_outward(&mesh);
    }

    #[test]
    fn test_cone_has_no_degenerate_side() {
        let mesh = cone(1.0, 2.0, 32);
        assert_eq!(mesh.triangle_count(), 32 + 32);
        assert_eq!(mesh.facets().len(), mesh.triangle_count());
        let (_, max) = mesh.bounds().unwrap();
        assert!((max.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_torus_counts() {
        let mesh = torus(1.0, 0.4, 32, 24);
        assert_eq!(mesh.vertex_count(), 33 * 25);
        assert_eq!(mesh.triangle_count(), 32 * 24 * 2);
        let (min, max) = mesh.bounds().unwrap();
        assert!((max.x - 1.4).abs() < 1e-6);
        assert!((min.z + 0.4).abs() < 1e-6);
        assert!((max.z - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_icosahedron_non_indexed() {
        let mesh = icosahedron(2.0);
        assert!(!mesh.is_indexed());
        assert_eq!(mesh.triangle_count(), 20);
        assert_eq!(mesh.facets().len(), 20);
        for p in &mesh.positions {
            assert!((p.length() - 2.0).abs() < EPS);
        }
        assert_outward(&mesh);
    }

    #[test]
    fn test_degenerate_triangle_dropped() {
        let mesh = TriMesh::non_indexed(vec![
            DVec3::ZERO,
            DVec3::X,
            DVec3::Y,
            DVec3::ZERO,
            DVec3::X,
            DVec3::X * 2.0,
        ]);
        assert_eq!(mesh.triangle_count(), 2);
        let facets = mesh.facets();
        assert_eq!(facets.len(), 1);
        assert_eq!(facets[0].normal, DVec3::Z);
    }

    #[test]
    fn test_out_of_range_index_dropped() {
        let mesh = TriMesh::indexed(vec![DVec3::ZERO, DVec3::X, DVec3::Y], vec![0, 1, 2, 0, 1, 7]);
        assert_eq!(mesh.facets().len(), 1);
    }

    #[test]
    fn test_build_dispatch() {
        let tess = Tessellation::EXPORT;
        assert_eq!(build(&Shape::Box, &tess).triangle_count(), 12);
        assert_eq!(
            build(&Shape::Icosahedron { radius: 1.0 }, &tess).triangle_count(),
            20
        );
        assert_eq!(
            build(&Shape::Torus { radius: 1.0, tube: 0.4 }, &Tessellation::VIEWPORT).triangle_count(),
            32 * 100 * 2
        );
    }

    #[test]
    fn test_empty_bounds() {
        assert_eq!(TriMesh::default().bounds(), None);
    }
}
