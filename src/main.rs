use anyhow::{Context, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use bicycle_scene::app::{run_headless, App, HEADLESS_DEFAULT_FRAMES};
use bicycle_scene::cli::Cli;
use bicycle_scene::config::SceneConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.no_ui { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };

    if cli.headless {
        let frames = cli.frames.unwrap_or(HEADLESS_DEFAULT_FRAMES);
        let report = run_headless(&config, frames);
        let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{}", json);
        return Ok(());
    }

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(config, !cli.no_ui, cli.frames);

    log::info!("Bicycle - Controls: left drag rotate, wheel/middle zoom, right drag pan, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
