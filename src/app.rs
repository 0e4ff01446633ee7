use serde::Serialize;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::camera::PerspectiveCamera;
use crate::config::SceneConfig;
use crate::controls::TrackballControls;
use crate::core::{Button, Controller, PointerInput};
use crate::frame::{FrameInfo, FrameIterator, StopHandle};
use crate::renderer::{FrameStats, Renderer};
use crate::scene::Scene;

const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Simulated frame spacing for headless runs
pub const HEADLESS_FRAME_STEP: f32 = 1.0 / 60.0;

/// Frame count used by headless runs when none is given
pub const HEADLESS_DEFAULT_FRAMES: u64 = 100;

/// One tick of the scene: spin the bicycle, then move the camera
pub fn step_frame(
    scene: &mut Scene,
    controls: &mut TrackballControls,
    camera: &mut PerspectiveCamera,
    input: &dyn Controller,
    frame: &FrameInfo,
    spin_step: f32,
) {
    scene.advance(spin_step, frame.time);
    controls.handle_input(input);
    controls.update(camera);
}

/// One-line startup summary: node, triangle and light counts plus world bounds
pub fn describe_scene(scene: &Scene) -> String {
    let bounds = scene.bounds();
    format!(
        "{} nodes, {} triangles, {} lights, bounds [{:.1}, {:.1}, {:.1}]..[{:.1}, {:.1}, {:.1}]",
        scene.node_count(),
        scene.triangle_count(),
        scene.lights.len(),
        bounds.min.x,
        bounds.min.y,
        bounds.min.z,
        bounds.max.x,
        bounds.max.y,
        bounds.max.z
    )
}

/// Final animation state of a headless run
#[derive(Debug, Clone, Serialize)]
pub struct HeadlessReport {
    pub frames: u64,
    pub time: f32,
    pub front_wheel_spin: f32,
    pub rear_wheel_spin: f32,
    pub steering: f32,
    pub handlebars_steering: f32,
    pub nodes: usize,
    pub triangles: usize,
    pub camera_position: [f32; 3],
}

/// Run the frame loop without a window at a fixed time step
pub fn run_headless(config: &SceneConfig, frames: u64) -> HeadlessReport {
    let mut scene = Scene::from_config(config);
    let mut camera = PerspectiveCamera::new(&config.camera, config.viewport.aspect());
    let mut controls = TrackballControls::new(&config.controls);
    let input = PointerInput::new(config.viewport.width, config.viewport.height);

    let mut last = None;
    for frame in FrameIterator::from_fixed_step(HEADLESS_FRAME_STEP).with_limit(frames) {
        step_frame(
            &mut scene,
            &mut controls,
            &mut camera,
            &input,
            &frame,
            config.animation.spin_step,
        );
        last = Some(frame);
    }

    let bike = &scene.bicycle;
    let report = HeadlessReport {
        frames: last.map_or(0, |f| f.number + 1),
        time: last.map_or(0.0, |f| f.time),
        front_wheel_spin: bike.front_wheel().rotation.z,
        rear_wheel_spin: bike.rear_wheel().rotation.z,
        steering: bike.front_wheel().rotation.y,
        handlebars_steering: bike.handlebars().rotation.y,
        nodes: scene.node_count(),
        triangles: scene.triangle_count(),
        camera_position: camera.position.to_array(),
    };
    log::info!("Headless run finished after {} frames", report.frames);
    report
}

/// Windowed application driven by the winit event loop
pub struct App {
    config: SceneConfig,
    show_ui: bool,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    scene: Scene,
    camera: PerspectiveCamera,
    controls: TrackballControls,
    input: PointerInput,
    frames: FrameIterator,
    stop: StopHandle,
    triangles: usize,
    frame_count: u32,
    fps: f32,
    fps_update_timer: f32,
}

impl App {
    pub fn new(config: SceneConfig, show_ui: bool, frame_limit: Option<u64>) -> Self {
        let scene = Scene::from_config(&config);
        let camera = PerspectiveCamera::new(&config.camera, config.viewport.aspect());
        let controls = TrackballControls::new(&config.controls);
        let input = PointerInput::new(config.viewport.width, config.viewport.height);

        let mut frames = FrameIterator::new();
        if let Some(limit) = frame_limit {
            frames = frames.with_limit(limit);
        }
        let stop = frames.stop_handle();
        let triangles = scene.triangle_count();

        Self {
            config,
            show_ui,
            window: None,
            renderer: None,
            scene,
            camera,
            controls,
            input,
            frames,
            stop,
            triangles,
            frame_count: 0,
            fps: 0.0,
            fps_update_timer: 0.0,
        }
    }

    /// Handle that ends the frame loop from outside the event loop
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.fps_update_timer;
            log::debug!("FPS: {:.1}", self.fps);
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(frame) = self.frames.next() else {
            log::info!("Frame source finished after {} frames", self.frames.frame_number());
            event_loop.exit();
            return;
        };

        self.update_fps(frame.delta);
        step_frame(
            &mut self.scene,
            &mut self.controls,
            &mut self.camera,
            &self.input,
            &frame,
            self.config.animation.spin_step,
        );

        let stats = FrameStats {
            fps: self.fps,
            frame: frame.number,
            triangles: self.triangles,
        };

        if let Some(renderer) = &mut self.renderer {
            match renderer.render(&self.scene, &self.camera, &stats) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of GPU memory, exiting");
                    self.stop.stop();
                    event_loop.exit();
                }
                Err(e) => log::warn!("Render error: {}", e),
            }
        }

        self.input.reset_deltas();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let viewport = &self.config.viewport;
        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(viewport.title.as_str())
                .with_inner_size(winit::dpi::LogicalSize::new(viewport.width, viewport.height))
                .with_resizable(viewport.resizable),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(Renderer::new(
            window.clone(),
            &self.config,
            self.show_ui,
        )) {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        let size = renderer.size();
        self.camera.set_aspect(size.width, size.height);
        self.input.set_surface_size(size.width, size.height);

        log::info!("Scene ready: {}", describe_scene(&self.scene));

        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let Some(renderer) = &mut self.renderer {
            if renderer.handle_event(&event) {
                return;
            }
        }

        self.input.process_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                self.stop.stop();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { .. } if self.input.is_down(Button::Escape) => {
                self.stop.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
                self.camera.set_aspect(size.width, size.height);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_zero_frames_leaves_scene_untouched() {
        let report = run_headless(&SceneConfig::default(), 0);
        assert_eq!(report.frames, 0);
        assert_eq!(report.front_wheel_spin, 0.0);
        assert_eq!(report.steering, 0.0);
        assert_eq!(report.camera_position, [0.0, 0.0, 550.0]);
    }

    #[test]
    fn test_first_frame_at_time_zero() {
        let report = run_headless(&SceneConfig::default(), 1);
        assert_eq!(report.frames, 1);
        assert_eq!(report.time, 0.0);
        assert_eq!(report.front_wheel_spin, -PI / 100.0);
        assert_eq!(report.rear_wheel_spin, -PI / 100.0);
        assert_eq!(report.steering, 0.0);
        assert_eq!(report.handlebars_steering, 0.0);
    }

    #[test]
    fn test_describe_scene_reports_bounds() {
        let scene = Scene::from_config(&SceneConfig::default());
        let summary = describe_scene(&scene);
        assert!(summary.starts_with("27 nodes, "));
        assert!(summary.contains("2 lights"));
        assert!(summary.contains("bounds [-500.0, -500.0, "));
    }

    #[test]
    fn test_app_stop_handle_is_shared() {
        let app = App::new(SceneConfig::default(), false, Some(3));
        let stop = app.stop_handle();
        stop.stop();
        assert!(app.stop_handle().is_stopped());
    }
}
