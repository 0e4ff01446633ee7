pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod controls;
pub mod core;
pub mod frame;
pub mod math;
pub mod mesh;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod types;

pub use scenes::{build_bicycle, build_floor, build_handlebars, build_wheel, Bicycle};
