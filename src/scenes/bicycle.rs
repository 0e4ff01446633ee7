use glam::Vec3;
use std::f32::consts::PI;

use crate::config::BikeConfig;
use crate::mesh::Shape;
use crate::scene::{Animated, Material, Node, Visual};

/// Peak steering angle of the front wheel and handlebars
pub const STEER_AMPLITUDE: f32 = PI / 5.0;

/// Steering angle at a given time in seconds. Absolute, not accumulated.
pub fn steering_angle(time: f32) -> f32 {
    time.sin() * STEER_AMPLITUDE
}

/// Ring with evenly spaced spokes, each spanning the full diameter
pub fn build_wheel(config: &BikeConfig) -> Node {
    let material = Material::lambert(config.color);
    let ring = Shape::Torus {
        radius: config.wheel_radius,
        tube: config.wheel_width,
        radial_segments: config.ring_radial_segments,
        tubular_segments: config.ring_tubular_segments,
    };
    let spoke = Visual::new(
        Shape::cuboid(
            config.wheel_radius * 2.0,
            config.spoke_thickness,
            config.spoke_thickness,
        ),
        material,
    );

    let mut wheel = Node::with_visual("wheel", Visual::new(ring, material));
    for i in 0..config.spoke_count {
        let angle = config.spoke_step() * i as f32;
        wheel.add_child(
            Node::with_visual(format!("spoke_{}", i), spoke.clone()).rotated(Vec3::new(0.0, 0.0, angle)),
        );
    }
    wheel
}

/// Stem rising from the wheel rim at `anchor_offset` along the bike axis,
/// with a crossbar perpendicular to it
pub fn build_handlebars(config: &BikeConfig, anchor_offset: f32) -> Node {
    let material = Material::lambert(config.color);
    let alpha = config.handlebars_angle;
    let length = config.handlebars_length();
    let reach = config.wheel_radius + length;

    let mut stem = Node::with_visual(
        "handlebars",
        Visual::new(Shape::cuboid(length, config.bar_thickness, config.bar_thickness), material),
    )
    .at(Vec3::new(
        alpha.cos() * reach + anchor_offset,
        alpha.sin() * reach,
        0.0,
    ))
    .rotated(Vec3::new(0.0, 0.0, alpha));

    let handles = Node::with_visual(
        "handles",
        Visual::new(
            Shape::cuboid(config.wheel_radius, config.bar_thickness, config.bar_thickness),
            material,
        ),
    )
    .at(Vec3::new(length / 2.0, 0.0, 0.0))
    .rotated(Vec3::new(0.0, PI / 2.0, 0.0));

    stem.add_child(handles);
    stem
}

/// Bicycle root node together with the handles needed to animate it
#[derive(Clone, Debug, PartialEq)]
pub struct Bicycle {
    root: Node,
    handlebars: usize,
    front_wheel: usize,
    rear_wheel: usize,
    frame: usize,
}

/// Two wheels, handlebars and a frame bar, stood upright on the floor
pub fn build_bicycle(config: &BikeConfig) -> Bicycle {
    let half = config.half_base();

    let mut root = Node::new("bicycle")
        .rotated(Vec3::new(PI / 2.0, PI / 2.0, 0.0))
        .at(Vec3::new(0.0, 0.0, config.lift()));

    let handlebars = root.add_child(build_handlebars(config, half));

    let mut front = build_wheel(config);
    front.name = "front_wheel".to_string();
    front.translation.x = half;
    let front_wheel = root.add_child(front);

    let mut rear = build_wheel(config);
    rear.name = "rear_wheel".to_string();
    rear.translation.x = -half;
    let rear_wheel = root.add_child(rear);

    let frame = root.add_child(Node::with_visual(
        "frame",
        Visual::new(
            Shape::cuboid(config.frame_length(), config.bar_thickness, config.bar_thickness),
            Material::lambert(config.color),
        ),
    ));

    Bicycle {
        root,
        handlebars,
        front_wheel,
        rear_wheel,
        frame,
    }
}

impl Bicycle {
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn handlebars(&self) -> &Node {
        &self.root.children[self.handlebars]
    }

    pub fn front_wheel(&self) -> &Node {
        &self.root.children[self.front_wheel]
    }

    pub fn rear_wheel(&self) -> &Node {
        &self.root.children[self.rear_wheel]
    }

    pub fn frame(&self) -> &Node {
        &self.root.children[self.frame]
    }

    /// Roll both wheels back by `alpha` and steer to the angle for `time`
    pub fn spin(&mut self, alpha: f32, time: f32) {
        let steer = steering_angle(time);

        let front = &mut self.root.children[self.front_wheel];
        front.rotation.z -= alpha;
        front.rotation.y = steer;

        self.root.children[self.handlebars].rotation.y = steer;
        self.root.children[self.rear_wheel].rotation.z -= alpha;
    }
}

impl Animated for Bicycle {
    fn advance(&mut self, step: f32, time: f32) {
        self.spin(step, time);
    }

    fn root(&self) -> &Node {
        &self.root
    }
}
