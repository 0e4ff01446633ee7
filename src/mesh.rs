use glam::{Mat3, Mat4, Vec3};
use std::f32::consts::TAU;

use crate::math::AABB;
use crate::types::GpuVertex;

/// Primitive shape parameters, tessellated once into a `Mesh`
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Ring around the local Z axis, lying in the XY plane
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    /// Box centred on the origin
    Cuboid { width: f32, height: f32, depth: f32 },
    /// Flat rectangle in the XY plane facing +Z
    Plane {
        width: f32,
        height: f32,
        width_segments: u32,
        height_segments: u32,
    },
}

impl Shape {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Shape::Cuboid {
            width,
            height,
            depth,
        }
    }

    pub fn tessellate(&self) -> Mesh {
        match *self {
            Shape::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => Mesh::torus(radius, tube, radial_segments, tubular_segments),
            Shape::Cuboid {
                width,
                height,
                depth,
            } => Mesh::cuboid(Vec3::new(width, height, depth)),
            Shape::Plane {
                width,
                height,
                width_segments,
                height_segments,
            } => Mesh::plane(width, height, width_segments, height_segments),
        }
    }
}

/// Indexed triangle mesh in local space, counter-clockwise front faces
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        index
    }

    /// Quad a-b-c-d given counter-clockwise as seen from its front
    fn add_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3) {
        let n = (b - a).cross(d - a).normalize();
        let i0 = self.push_vertex(a, n);
        let i1 = self.push_vertex(b, n);
        let i2 = self.push_vertex(c, n);
        let i3 = self.push_vertex(d, n);

        self.indices.extend_from_slice(&[i0, i1, i2]);
        self.indices.extend_from_slice(&[i0, i2, i3]);
    }

    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let mut mesh = Mesh::new();

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            for i in 0..=tubular_segments {
                let u = i as f32 / tubular_segments as f32 * TAU;

                let position = Vec3::new(
                    (radius + tube * v.cos()) * u.cos(),
                    (radius + tube * v.cos()) * u.sin(),
                    tube * v.sin(),
                );
                let centre = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
                mesh.push_vertex(position, (position - centre).normalize());
            }
        }

        let row = tubular_segments + 1;
        for j in 1..=radial_segments {
            for i in 1..=tubular_segments {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;

                mesh.indices.extend_from_slice(&[a, b, d]);
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }

        mesh
    }

    pub fn cuboid(size: Vec3) -> Self {
        let mut mesh = Mesh::new();

        let dx = Vec3::new(size.x / 2.0, 0.0, 0.0);
        let dy = Vec3::new(0.0, size.y / 2.0, 0.0);
        let dz = Vec3::new(0.0, 0.0, size.z / 2.0);

        // Front
        mesh.add_quad(-dx - dy + dz, dx - dy + dz, dx + dy + dz, -dx + dy + dz);
        // Back
        mesh.add_quad(dx - dy - dz, -dx - dy - dz, -dx + dy - dz, dx + dy - dz);
        // Top
        mesh.add_quad(-dx + dy + dz, dx + dy + dz, dx + dy - dz, -dx + dy - dz);
        // Bottom
        mesh.add_quad(-dx - dy - dz, dx - dy - dz, dx - dy + dz, -dx - dy + dz);
        // Right
        mesh.add_quad(dx - dy + dz, dx - dy - dz, dx + dy - dz, dx + dy + dz);
        // Left
        mesh.add_quad(-dx - dy - dz, -dx - dy + dz, -dx + dy + dz, -dx + dy - dz);

        mesh
    }

    pub fn plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        let mut mesh = Mesh::new();

        let gx = width_segments.max(1);
        let gy = height_segments.max(1);
        let seg_w = width / gx as f32;
        let seg_h = height / gy as f32;

        for iy in 0..=gy {
            let y = iy as f32 * seg_h - height / 2.0;
            for ix in 0..=gx {
                let x = ix as f32 * seg_w - width / 2.0;
                mesh.push_vertex(Vec3::new(x, y, 0.0), Vec3::Z);
            }
        }

        let row = gx + 1;
        for iy in 0..gy {
            for ix in 0..gx {
                let a = ix + row * iy;
                let b = ix + 1 + row * iy;
                let c = ix + 1 + row * (iy + 1);
                let d = ix + row * (iy + 1);

                mesh.indices.extend_from_slice(&[a, b, c]);
                mesh.indices.extend_from_slice(&[a, c, d]);
            }
        }

        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> AABB {
        let mut bounds = AABB::empty();
        for p in &self.positions {
            bounds.grow(*p);
        }
        bounds
    }

    /// Append this mesh in world space to shared vertex/index buffers
    pub fn append_transformed(
        &self,
        world: Mat4,
        color: [f32; 3],
        double_sided: bool,
        vertices: &mut Vec<GpuVertex>,
        indices: &mut Vec<u32>,
    ) {
        let base = vertices.len() as u32;
        let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
        let double_sided = if double_sided { 1.0 } else { 0.0 };

        vertices.extend(self.positions.iter().zip(&self.normals).map(|(p, n)| GpuVertex {
            position: world.transform_point3(*p).to_array(),
            normal: (normal_matrix * *n).normalize_or_zero().to_array(),
            color,
            double_sided,
        }));
        indices.extend(self.indices.iter().map(|i| base + i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_counts() {
        let mesh = Mesh::cuboid(Vec3::new(40.0, 1.0, 1.0));
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_cuboid_bounds_match_size() {
        let mesh = Mesh::cuboid(Vec3::new(50.0, 2.0, 2.0));
        let bounds = mesh.bounds();
        assert_eq!(bounds.extent(), Vec3::new(50.0, 2.0, 2.0));
        assert_eq!(bounds.center(), Vec3::ZERO);
    }

    #[test]
    fn test_cuboid_normals_point_outward() {
        let mesh = Mesh::cuboid(Vec3::ONE);
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert!(p.dot(*n) > 0.0, "normal {:?} at {:?} points inward", n, p);
        }
    }

    #[test]
    fn test_torus_counts() {
        let mesh = Mesh::torus(20.0, 2.0, 16, 100);
        assert_eq!(mesh.vertex_count(), 17 * 101);
        assert_eq!(mesh.triangle_count(), 16 * 100 * 2);
    }

    #[test]
    fn test_torus_extent() {
        let bounds = Mesh::torus(20.0, 2.0, 16, 100).bounds();
        assert!((bounds.max.x - 22.0).abs() < 0.01);
        assert!((bounds.min.y + 22.0).abs() < 0.05);
        assert!((bounds.max.z - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_torus_faces_wind_outward() {
        let mesh = Mesh::torus(20.0, 2.0, 8, 24);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.positions[i as usize]);
            let face = (b - a).cross(c - a);
            if face.length_squared() < 1e-8 {
                continue;
            }
            let n = mesh.normals[tri[0] as usize];
            assert!(face.dot(n) > 0.0);
        }
    }

    #[test]
    fn test_plane_counts_and_bounds() {
        let mesh = Mesh::plane(1000.0, 1000.0, 32, 1);
        assert_eq!(mesh.vertex_count(), 33 * 2);
        assert_eq!(mesh.triangle_count(), 64);

        let bounds = mesh.bounds();
        assert_eq!(bounds.min, Vec3::new(-500.0, -500.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(500.0, 500.0, 0.0));
    }

    #[test]
    fn test_shape_tessellate_dispatch() {
        let mesh = Shape::cuboid(10.0, 2.0, 2.0).tessellate();
        assert_eq!(mesh, Mesh::cuboid(Vec3::new(10.0, 2.0, 2.0)));
    }

    #[test]
    fn test_append_transformed_offsets_indices() {
        let mesh = Mesh::cuboid(Vec3::ONE);
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        mesh.append_transformed(Mat4::IDENTITY, [1.0; 3], false, &mut vertices, &mut indices);
        mesh.append_transformed(
            Mat4::from_translation(Vec3::X * 5.0),
            [1.0; 3],
            true,
            &mut vertices,
            &mut indices,
        );

        assert_eq!(vertices.len(), 48);
        assert_eq!(indices.len(), 72);
        assert_eq!(indices[36], 24);
        assert_eq!(vertices[24].position[0], 4.5);
        assert_eq!(vertices[24].double_sided, 1.0);
    }
}
