use crate::config::FloorConfig;
use crate::mesh::Shape;
use crate::scene::{Material, Node, Visual};

/// Large flat double-sided plane. Never mutated after creation.
pub fn build_floor(config: &FloorConfig) -> Node {
    let shape = Shape::Plane {
        width: config.width,
        height: config.height,
        width_segments: config.width_segments,
        height_segments: config.height_segments,
    };
    let material = Material::lambert(config.color).double_sided();

    Node::with_visual("floor", Visual::new(shape, material))
}
