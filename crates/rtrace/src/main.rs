//! rtrace command line renderer.
//!
//! Loads an XML scene, renders it and writes the image.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use rtrace_core::load_scene;
use rtrace_renderer::{render, save_image};

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let scene = load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;

    let unresolved = scene.unresolved_material_ids();
    if !unresolved.is_empty() {
        log::warn!(
            "{} material id(s) not defined, rendering with zero material: {}",
            unresolved.len(),
            unresolved.join(", ")
        );
    }

    let config = args.render_config(scene.max_recursion_depth);
    let image = render(&scene, &config).context("Failed to render scene")?;

    save_image(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
