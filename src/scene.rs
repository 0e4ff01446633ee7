use glam::{Mat4, Quat, Vec3};
use std::sync::Arc;

use crate::config::SceneConfig;
use crate::math::{hex_to_linear, AABB};
use crate::mesh::{Mesh, Shape};
use crate::scenes::{build_bicycle, build_floor, Bicycle};
use crate::types::{GpuPointLight, GpuVertex, LightsUniform, MAX_LIGHTS};

/// Which faces of a surface are shaded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Front,
    Double,
}

/// Lambert surface description
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Linear RGB
    pub color: [f32; 3],
    pub side: Side,
}

impl Material {
    pub fn lambert(hex: u32) -> Self {
        Self {
            color: hex_to_linear(hex),
            side: Side::Front,
        }
    }

    pub fn double_sided(mut self) -> Self {
        self.side = Side::Double;
        self
    }
}

/// Renderable part of a node: shape parameters, material and the tessellated mesh
#[derive(Clone, Debug, PartialEq)]
pub struct Visual {
    pub shape: Shape,
    pub material: Material,
    pub mesh: Arc<Mesh>,
}

impl Visual {
    pub fn new(shape: Shape, material: Material) -> Self {
        Self {
            shape,
            material,
            mesh: Arc::new(shape.tessellate()),
        }
    }
}

/// Element of the transform tree. Each node owns its children.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub name: String,
    pub translation: Vec3,
    /// Euler angles in radians, applied X then Y then Z
    pub rotation: Vec3,
    pub children: Vec<Node>,
    pub visual: Option<Visual>,
}

impl Node {
    /// Pure group node without a shape
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            children: Vec::new(),
            visual: None,
        }
    }

    pub fn with_visual(name: impl Into<String>, visual: Visual) -> Self {
        Self {
            visual: Some(visual),
            ..Self::new(name)
        }
    }

    pub fn at(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Attach a child and return its index
    pub fn add_child(&mut self, child: Node) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn local_matrix(&self) -> Mat4 {
        let r = self.rotation;
        let rotation = Quat::from_rotation_x(r.x) * Quat::from_rotation_y(r.y) * Quat::from_rotation_z(r.z);
        Mat4::from_rotation_translation(rotation, self.translation)
    }

    /// Depth-first walk handing each node its world matrix
    pub fn visit<'a, F>(&'a self, parent: Mat4, f: &mut F)
    where
        F: FnMut(&'a Node, Mat4),
    {
        let world = parent * self.local_matrix();
        f(self, world);
        for child in &self.children {
            child.visit(world, f);
        }
    }

    /// Number of nodes in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }

    pub fn world_bounds(&self, parent: Mat4) -> AABB {
        let mut bounds = AABB::empty();
        self.visit(parent, &mut |node, world| {
            if let Some(visual) = &node.visual {
                bounds = bounds.union(&visual.mesh.bounds().transformed(world));
            }
        });
        bounds
    }
}

/// Entity whose visual state changes every frame
pub trait Animated {
    /// Advance by a per-frame increment at the given time in seconds
    fn advance(&mut self, step: f32, time: f32);

    /// Root of the entity's node tree
    fn root(&self) -> &Node;

    fn name(&self) -> &str {
        self.root().name.as_str()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    /// Linear RGB
    pub color: [f32; 3],
    pub intensity: f32,
}

/// One shaped node with its resolved world matrix
#[derive(Clone, Copy, Debug)]
pub struct DrawItem<'a> {
    pub world: Mat4,
    pub visual: &'a Visual,
}

/// Everything that is drawn: the static floor, the animated bicycle and the lights
pub struct Scene {
    pub floor: Node,
    pub bicycle: Bicycle,
    pub lights: Vec<PointLight>,
    pub ambient: f32,
}

impl Scene {
    pub fn from_config(config: &SceneConfig) -> Self {
        let lights = config
            .lights
            .iter()
            .map(|light| PointLight {
                position: Vec3::from_array(light.position),
                color: hex_to_linear(light.color),
                intensity: light.intensity,
            })
            .collect();

        Self {
            floor: build_floor(&config.floor),
            bicycle: build_bicycle(&config.bike),
            lights,
            ambient: config.ambient,
        }
    }

    pub fn advance(&mut self, step: f32, time: f32) {
        self.bicycle.advance(step, time);
    }

    pub fn draw_items(&self) -> Vec<DrawItem<'_>> {
        let mut items = Vec::new();
        for root in [&self.floor, self.bicycle.root()] {
            root.visit(Mat4::IDENTITY, &mut |node, world| {
                if let Some(visual) = &node.visual {
                    items.push(DrawItem { world, visual });
                }
            });
        }
        items
    }

    /// Flatten every shaped node into world-space vertices and indices,
    /// replacing the previous contents of both buffers
    pub fn write_geometry(&self, vertices: &mut Vec<GpuVertex>, indices: &mut Vec<u32>) {
        vertices.clear();
        indices.clear();
        for item in self.draw_items() {
            let material = &item.visual.material;
            item.visual.mesh.append_transformed(
                item.world,
                material.color,
                material.side == Side::Double,
                vertices,
                indices,
            );
        }
    }

    pub fn node_count(&self) -> usize {
        self.floor.subtree_len() + self.bicycle.root().subtree_len()
    }

    pub fn triangle_count(&self) -> usize {
        self.draw_items()
            .iter()
            .map(|item| item.visual.mesh.triangle_count())
            .sum()
    }

    pub fn bounds(&self) -> AABB {
        self.floor
            .world_bounds(Mat4::IDENTITY)
            .union(&self.bicycle.root().world_bounds(Mat4::IDENTITY))
    }

    pub fn lights_uniform(&self) -> LightsUniform {
        if self.lights.len() > MAX_LIGHTS {
            log::warn!(
                "Scene has {} lights, only the first {} are shaded",
                self.lights.len(),
                MAX_LIGHTS
            );
        }

        let mut lights = [GpuPointLight::default(); MAX_LIGHTS];
        for (slot, light) in lights.iter_mut().zip(&self.lights) {
            *slot = GpuPointLight {
                position: light.position.to_array(),
                intensity: light.intensity,
                color: light.color,
                _pad: 0.0,
            };
        }

        LightsUniform {
            lights,
            count: self.lights.len().min(MAX_LIGHTS) as u32,
            ambient: self.ambient,
            _pad: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_group_node_has_no_visual() {
        let node = Node::new("group");
        assert!(node.visual.is_none());
        assert_eq!(node.subtree_len(), 1);
        assert_eq!(node.local_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_add_child_returns_index() {
        let mut parent = Node::new("parent");
        assert_eq!(parent.add_child(Node::new("a")), 0);
        assert_eq!(parent.add_child(Node::new("b")), 1);
        assert_eq!(parent.child(1).map(|n| n.name.as_str()), Some("b"));
        assert!(parent.child(2).is_none());
        assert_eq!(parent.subtree_len(), 3);
    }

    #[test]
    fn test_rotation_order_is_x_then_y_then_z() {
        let node = Node::new("n").rotated(Vec3::new(PI / 2.0, PI / 2.0, 0.0));
        let m = node.local_matrix();
        // Ry takes +X to -Z, then Rx takes -Z to +Y
        assert!(approx(m.transform_vector3(Vec3::X), Vec3::Y));
    }

    #[test]
    fn test_visit_composes_parent_transforms() {
        let mut parent = Node::new("parent").at(Vec3::new(0.0, 0.0, 10.0));
        parent.add_child(Node::new("child").at(Vec3::new(5.0, 0.0, 0.0)));

        let mut seen = Vec::new();
        parent.visit(Mat4::IDENTITY, &mut |node, world| {
            seen.push((node.name.clone(), world.transform_point3(Vec3::ZERO)));
        });

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, "parent");
        assert!(approx(seen[1].1, Vec3::new(5.0, 0.0, 10.0)));
    }

    #[test]
    fn test_material_sides() {
        let front = Material::lambert(0xCCCCCC);
        assert_eq!(front.side, Side::Front);
        assert_eq!(front.double_sided().side, Side::Double);
    }

    #[test]
    fn test_scene_from_default_config() {
        let scene = Scene::from_config(&SceneConfig::default());

        // floor + group + handlebars(2) + 2 wheels * 11 + frame
        assert_eq!(scene.node_count(), 1 + 1 + 2 + 22 + 1);
        assert_eq!(scene.draw_items().len(), 26);
        assert_eq!(scene.lights.len(), 2);

        let uniform = scene.lights_uniform();
        assert_eq!(uniform.count, 2);
        assert_eq!(uniform.lights[0].position, [50.0, 50.0, 550.0]);
        assert_eq!(uniform.lights[1].position, [0.0, 0.0, -550.0]);
    }

    #[test]
    fn test_write_geometry_marks_floor_double_sided() {
        let scene = Scene::from_config(&SceneConfig::default());
        let mut vertices = vec![GpuVertex {
            position: [0.0; 3],
            normal: [0.0; 3],
            color: [0.0; 3],
            double_sided: 0.0,
        }];
        let mut indices = vec![7];
        scene.write_geometry(&mut vertices, &mut indices);

        assert_eq!(indices.len(), scene.triangle_count() * 3);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));

        // Floor is drawn first: 33 x 2 grid vertices, all double-sided
        assert!(vertices[..66].iter().all(|v| v.double_sided == 1.0));
        assert!(vertices[66..].iter().all(|v| v.double_sided == 0.0));
    }

    #[test]
    fn test_scene_bounds_contain_floor() {
        let scene = Scene::from_config(&SceneConfig::default());
        let bounds = scene.bounds();
        assert!(bounds.min.x <= -500.0 && bounds.max.x >= 500.0);
        assert!(bounds.max.z > 40.0);
    }
}
