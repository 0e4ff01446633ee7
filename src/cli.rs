// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "bicycle-scene")]
#[command(about = "Spinning procedural bicycle", long_about = None)]
pub struct Cli {
    /// Disable the FPS overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Exit after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// JSON file overriding scene defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Simulate without a window and print the final state as JSON
    #[arg(long, default_value = "false")]
    pub headless: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["bicycle-scene"]);
        assert!(!cli.no_ui);
        assert!(!cli.headless);
        assert_eq!(cli.frames, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::parse_from([
            "bicycle-scene",
            "--no-ui",
            "--headless",
            "--frames",
            "120",
            "--config",
            "scene.json",
        ]);
        assert!(cli.no_ui);
        assert!(cli.headless);
        assert_eq!(cli.frames, Some(120));
        assert_eq!(cli.config, Some(PathBuf::from("scene.json")));
    }
}
