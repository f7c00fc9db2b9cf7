use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use rtrace_renderer::{RenderConfig, DEFAULT_MAX_DEPTH};

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "rtrace")]
#[command(about = "Render an XML scene with a multi-threaded ray tracer")]
pub struct Args {
    /// Scene file to render
    pub scene: PathBuf,

    /// Output image (.ppm writes ASCII PPM, other extensions use their image format)
    #[arg(default_value = "rtrace_out.ppm")]
    pub output: PathBuf,

    /// Number of render threads (defaults to the available hardware parallelism)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Maximum mirror bounces, overriding the scene file
    #[arg(short = 'd', long)]
    pub max_depth: Option<u32>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Build the render configuration. The `--max-depth` flag wins over the
    /// scene's own cap, which wins over the default.
    pub fn render_config(&self, scene_max_depth: Option<u32>) -> RenderConfig {
        RenderConfig {
            max_depth: self
                .max_depth
                .or(scene_max_depth)
                .unwrap_or(DEFAULT_MAX_DEPTH),
            threads: self.threads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["rtrace", "scene.xml"]);
        assert_eq!(args.scene, PathBuf::from("scene.xml"));
        assert_eq!(args.output, PathBuf::from("rtrace_out.ppm"));
        assert_eq!(args.threads, None);
        assert_eq!(args.max_depth, None);
        assert_eq!(args.log_level, LogLevel::Info);
    }

    #[test]
    fn test_all_options() {
        let args = Args::parse_from([
            "rtrace",
            "scene.xml",
            "out.png",
            "--threads",
            "4",
            "--max-depth",
            "2",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!(args.threads, Some(4));
        assert_eq!(args.max_depth, Some(2));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_scene_is_required() {
        assert!(Args::try_parse_from(["rtrace"]).is_err());
    }

    #[test]
    fn test_max_depth_precedence() {
        let args = Args::parse_from(["rtrace", "scene.xml", "--max-depth", "1"]);
        assert_eq!(args.render_config(Some(9)).max_depth, 1);

        let args = Args::parse_from(["rtrace", "scene.xml", "-t", "3"]);
        let config = args.render_config(Some(9));
        assert_eq!(config.max_depth, 9);
        assert_eq!(config.threads, Some(3));
        assert_eq!(args.render_config(None).max_depth, DEFAULT_MAX_DEPTH);
    }
}
