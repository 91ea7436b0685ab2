//! Lux - command-line front end for the renderer
//!
//! Renders one of the built-in example scenes to a PPM or ASCII file.

mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use lux_renderer::{OutputFormat, RenderError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

/// Exit status when the output directory cannot be created.
const EXIT_OUTPUT_DIR: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "lux", version, about = "Offline CPU path tracer")]
struct Args {
    /// Scene to render (1-7)
    #[arg(value_parser = clap::value_parser!(u8).range(1..=scenes::SCENE_COUNT as i64))]
    scene: u8,

    /// Directory the image is written into
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// File name without extension
    #[arg(short, long, default_value = "render")]
    name: String,

    /// Write ASCII art instead of PPM
    #[arg(long)]
    ascii: bool,

    /// Image width in pixels
    #[arg(short, long)]
    width: Option<u32>,

    /// Samples per pixel
    #[arg(short, long)]
    samples: Option<u32>,

    /// Maximum bounces per path
    #[arg(short, long)]
    depth: Option<u32>,

    /// Worker threads
    #[arg(short, long)]
    threads: Option<usize>,

    /// Tile edge length in pixels
    #[arg(long)]
    chunk: Option<u32>,

    /// Seed for a reproducible image
    #[arg(long)]
    seed: Option<u64>,

    /// Frames in the turntable sequence (scene 7)
    #[arg(long, default_value_t = 36)]
    frames: u32,

    /// Directory holding image textures
    #[arg(long, default_value = "textures")]
    textures: PathBuf,
}

impl Args {
    fn format(&self) -> OutputFormat {
        if self.ascii {
            OutputFormat::Ascii
        } else {
            OutputFormat::Ppm
        }
    }

    /// Apply command-line overrides on top of the scene's own settings.
    fn configure(&self, camera: &mut lux_renderer::Camera) {
        if let Some(width) = self.width {
            camera.set_width(width);
        }
        if let Some(samples) = self.samples {
            camera.set_sample_count(samples);
        }
        if let Some(depth) = self.depth {
            camera.set_render_depth(depth);
        }
        if let Some(threads) = self.threads {
            camera.set_render_thread_count(threads);
        }
        if let Some(chunk) = self.chunk {
            camera.set_chunk_dimension(chunk);
        }
        camera.set_seed(self.seed);
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:#}", err);
            if is_output_dir_failure(&err) {
                ExitCode::from(EXIT_OUTPUT_DIR)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn is_output_dir_failure(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<RenderError>(),
            Some(RenderError::CreateDir { .. })
        )
    })
}

fn run(args: &Args) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let start = Instant::now();
    let scenes::Scene { world, mut camera } = scenes::build(args.scene, &args.textures, &mut rng)
        .with_context(|| format!("failed to build scene {}", args.scene))?;
    args.configure(&mut camera);
    log::info!(
        "Scene {} ready in {:.2?} ({}x{}, {} spp, depth {})",
        args.scene,
        start.elapsed(),
        camera.width(),
        camera.height(),
        camera.sample_count(),
        camera.render_depth()
    );

    if args.scene != 7 {
        camera
            .render_to_file(world.as_ref(), &args.output, &args.name, args.format())
            .context("render failed")?;
        return Ok(());
    }

    let frames = args.frames.max(1);
    let origin = camera.position();
    for frame in 0..frames {
        let angle = std::f32::consts::TAU * frame as f32 / frames as f32;
        camera.set_position(scenes::orbit_position(origin, camera.target(), angle));

        let name = format!("{}_{:03}", args.name, frame);
        camera
            .render_to_file(world.as_ref(), &args.output, &name, args.format())
            .with_context(|| format!("frame {} of {} failed", frame + 1, frames))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults_and_overrides() {
        let args = Args::try_parse_from(["lux", "4"]).unwrap();
        assert_eq!(args.scene, 4);
        assert_eq!(args.output, PathBuf::from("output"));
        assert_eq!(args.format(), OutputFormat::Ppm);
        assert_eq!(args.frames, 36);

        let args = Args::try_parse_from([
            "lux", "5", "--ascii", "-w", "40", "-s", "2", "-d", "3", "-t", "2", "--chunk", "8",
            "--seed", "11",
        ])
        .unwrap();
        assert_eq!(args.format(), OutputFormat::Ascii);

        let mut camera = scenes::build(5, &args.textures, &mut StdRng::seed_from_u64(0))
            .unwrap()
            .camera;
        args.configure(&mut camera);
        assert_eq!(camera.width(), 40);
        assert_eq!(camera.sample_count(), 2);
        assert_eq!(camera.render_depth(), 3);
        assert_eq!(camera.thread_count(), 2);
        assert_eq!(camera.chunk_dimension(), 8);
        assert_eq!(camera.seed(), Some(11));
    }

    #[test]
    fn test_scene_number_out_of_range() {
        assert!(Args::try_parse_from(["lux", "0"]).is_err());
        assert!(Args::try_parse_from(["lux", "8"]).is_err());
    }

    #[test]
    fn test_unwritable_output_exits_with_status_two() {
        let blocker = std::env::temp_dir().join(format!("lux-cli-blocker-{}", std::process::id()));
        std::fs::write(&blocker, b"file").unwrap();

        let mut args = Args::try_parse_from(["lux", "5", "-w", "8", "-s", "1", "-t", "1"]).unwrap();
        args.output = blocker.join("out");
        let err = run(&args).unwrap_err();
        assert!(is_output_dir_failure(&err));

        std::fs::remove_file(&blocker).ok();
    }
}
