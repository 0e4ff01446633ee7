//! Scene configuration.
//!
//! Every value the builders and the bootstrapper need lives here; the
//! defaults reproduce the reference scene. A JSON file may override any
//! subset of fields.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::Path;

/// Dimensions of the procedural bicycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BikeConfig {
    /// Tube radius of the wheel ring
    pub wheel_width: f32,
    /// Distance between the two wheel centres
    pub wheelbase: f32,
    pub wheel_radius: f32,
    /// Sweep of the handlebar stem from the longitudinal axis.
    /// Only π/2 has ever been used; the general form is kept for reference.
    pub handlebars_angle: f32,
    /// Stem length as a fraction of the wheel radius
    pub handlebars_ratio: f32,
    pub spoke_count: u32,
    pub spoke_thickness: f32,
    pub bar_thickness: f32,
    pub ring_radial_segments: u32,
    pub ring_tubular_segments: u32,
    pub color: u32,
}

impl Default for BikeConfig {
    fn default() -> Self {
        Self {
            wheel_width: 2.0,
            wheelbase: 90.0,
            wheel_radius: 20.0,
            handlebars_angle: PI / 2.0,
            handlebars_ratio: 0.5,
            spoke_count: 10,
            spoke_thickness: 1.0,
            bar_thickness: 2.0,
            ring_radial_segments: 16,
            ring_tubular_segments: 100,
            color: 0xCCCCCC,
        }
    }
}

impl BikeConfig {
    pub fn handlebars_length(&self) -> f32 {
        self.handlebars_ratio * self.wheel_radius
    }

    /// Longitudinal offset of each wheel centre from the bike origin
    pub fn half_base(&self) -> f32 {
        self.wheelbase / 2.0
    }

    /// Frame bar length, closing the gap between the two rims
    pub fn frame_length(&self) -> f32 {
        self.wheelbase - 2.0 * self.wheel_radius
    }

    /// Height at which the wheels sit on the floor plane
    pub fn lift(&self) -> f32 {
        self.wheel_radius + self.wheel_width
    }

    /// Angle between neighbouring spokes
    pub fn spoke_step(&self) -> f32 {
        PI / self.spoke_count as f32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub color: u32,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            width_segments: 32,
            height_segments: 1,
            color: 0xCCCCCC,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub resizable: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            title: "Bicycle".to_string(),
            resizable: false,
        }
    }
}

impl ViewportConfig {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 10000.0,
            position: [0.0, 0.0, 550.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub color: u32,
    pub intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            color: 0xFFFFFF,
            intensity: 1.0,
        }
    }
}

/// Trackball sensitivity and behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub no_rotate: bool,
    pub no_zoom: bool,
    pub no_pan: bool,
    /// Consume all accumulated motion in a single update
    pub static_moving: bool,
    /// Fraction of remaining motion consumed per update when not static
    pub dynamic_damping_factor: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 1.2,
            pan_speed: 0.8,
            no_rotate: false,
            no_zoom: false,
            no_pan: false,
            static_moving: true,
            dynamic_damping_factor: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Wheel spin applied per frame, in radians
    pub spin_step: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            spin_step: PI / 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub viewport: ViewportConfig,
    pub camera: CameraConfig,
    pub lights: Vec<LightConfig>,
    pub ambient: f32,
    pub controls: ControlsConfig,
    pub bike: BikeConfig,
    pub floor: FloorConfig,
    pub animation: AnimationConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            camera: CameraConfig::default(),
            lights: vec![
                LightConfig {
                    position: [50.0, 50.0, 550.0],
                    ..LightConfig::default()
                },
                LightConfig {
                    position: [0.0, 0.0, -550.0],
                    ..LightConfig::default()
                },
            ],
            ambient: 0.0,
            controls: ControlsConfig::default(),
            bike: BikeConfig::default(),
            floor: FloorConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse scene config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the builders cannot turn into a well-formed scene
    pub fn validate(&self) -> Result<()> {
        let bike = &self.bike;
        ensure!(bike.wheel_radius > 0.0, "bike.wheel_radius must be positive");
        ensure!(bike.wheel_width > 0.0, "bike.wheel_width must be positive");
        ensure!(
            bike.wheelbase > 2.0 * bike.wheel_radius,
            "bike.wheelbase ({}) must exceed the wheel diameter ({})",
            bike.wheelbase,
            2.0 * bike.wheel_radius
        );
        ensure!(bike.handlebars_ratio > 0.0, "bike.handlebars_ratio must be positive");
        ensure!(bike.handlebars_angle.is_finite(), "bike.handlebars_angle must be finite");
        ensure!(bike.spoke_count >= 1, "bike.spoke_count must be at least 1");
        ensure!(bike.spoke_thickness > 0.0, "bike.spoke_thickness must be positive");
        ensure!(bike.bar_thickness > 0.0, "bike.bar_thickness must be positive");
        ensure!(
            bike.ring_radial_segments >= 1 && bike.ring_tubular_segments >= 1,
            "bike ring segment counts must be at least 1"
        );

        let floor = &self.floor;
        ensure!(
            floor.width > 0.0 && floor.height > 0.0,
            "floor width and height must be positive"
        );
        ensure!(
            floor.width_segments >= 1 && floor.height_segments >= 1,
            "floor segment counts must be at least 1"
        );

        ensure!(
            self.viewport.width >= 1 && self.viewport.height >= 1,
            "viewport must be at least 1x1"
        );

        let camera = &self.camera;
        ensure!(
            camera.fov_y_degrees > 0.0 && camera.fov_y_degrees < 180.0,
            "camera.fov_y_degrees must be in (0, 180)"
        );
        ensure!(
            camera.near > 0.0 && camera.far > camera.near,
            "camera needs 0 < near < far"
        );

        ensure!(
            self.animation.spin_step.is_finite(),
            "animation.spin_step must be finite"
        );
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene config: {:?}", path))?;
        Self::from_json_str(&json).with_context(|| format!("Invalid scene config: {:?}", path))
    }
}
