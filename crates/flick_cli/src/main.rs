//! Flick CLI
//!
//! Validate and run animation scenes headlessly.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flick_animation::{AnimationScheduler, DisplayObject, Easing, Edge, ObjectSnapshot};
use flick_paint::PaintContext;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

#[derive(Parser)]
#[command(name = "flick")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Flick 2D animation toolkit CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene against a recording surface and print a per-frame trace
    Run {
        /// Scene file or directory containing scene.toml
        #[arg(default_value = ".")]
        scene: String,

        /// Override the number of frames to run
        #[arg(short, long)]
        frames: Option<u32>,

        /// Override the wall time per frame (milliseconds)
        #[arg(long)]
        frame_ms: Option<f32>,

        /// Print one JSON object per frame instead of a summary line
        #[arg(long)]
        json: bool,
    },

    /// Parse a scene and build its objects without running it
    Check {
        /// Scene file or directory containing scene.toml
        #[arg(default_value = ".")]
        scene: String,
    },

    /// Write a starter scene.toml
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        path: String,
    },

    /// List the named easing curves
    Easings,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Run {
            scene,
            frames,
            frame_ms,
            json,
        } => cmd_run(&scene, frames, frame_ms, json),

        Commands::Check { scene } => cmd_check(&scene),

        Commands::Init { path } => cmd_init(&path),

        Commands::Easings => cmd_easings(),
    }
}

/// One frame of the run trace
#[derive(Serialize)]
struct FrameTrace {
    frame: u32,
    draws: usize,
    objects: Vec<ObjectSnapshot>,
}

/// Per-object edge-hit counters, attached to motion-driven objects
#[derive(Default)]
struct HitCounters {
    bottom: Arc<AtomicU32>,
    left: Arc<AtomicU32>,
    right: Arc<AtomicU32>,
}

impl HitCounters {
    fn attach(&self, index: usize, object: &mut DisplayObject) {
        let Some(motion) = object.motion_mut() else {
            return;
        };
        for (edge, counter) in [
            (Edge::Bottom, &self.bottom),
            (Edge::Left, &self.left),
            (Edge::Right, &self.right),
        ] {
            let counter = counter.clone();
            motion.set_hit_callback(edge, move || {
                let hits = counter.fetch_add(1, Ordering::Relaxed) + 1;
                debug!(object = index, ?edge, hits, "edge hit");
            });
        }
    }

    fn total(&self) -> (u32, u32, u32) {
        (
            self.bottom.load(Ordering::Relaxed),
            self.left.load(Ordering::Relaxed),
            self.right.load(Ordering::Relaxed),
        )
    }
}

fn cmd_run(source: &str, frames: Option<u32>, frame_ms: Option<f32>, json: bool) -> Result<()> {
    let scene = config::load_scene(&PathBuf::from(source))?;
    let frames = frames.unwrap_or(scene.frames);
    let frame_ms = frame_ms.unwrap_or(scene.frame_ms);

    let hits = HitCounters::default();
    let mut scheduler = AnimationScheduler::new();
    let objects = scene
        .build_objects()
        .with_context(|| format!("Invalid object in {}", source))?;
    for (index, mut object) in objects.into_iter().enumerate() {
        hits.attach(index, &mut object);
        scheduler.add(object);
    }

    info!(
        "Running {} objects for {} frames at {}ms/frame on a {}x{} surface",
        scheduler.len(),
        frames,
        frame_ms,
        scene.surface.width,
        scene.surface.height
    );

    let mut surface = PaintContext::new(scene.surface.size());
    for frame in 0..frames {
        scheduler.frame(frame_ms, &mut surface);
        let draws = surface.take_commands().len();

        if json {
            let trace = FrameTrace {
                frame,
                draws,
                objects: scheduler.iter().map(|(_, o)| o.snapshot()).collect(),
            };
            println!("{}", serde_json::to_string(&trace)?);
        } else {
            let positions: Vec<String> = scheduler
                .iter()
                .map(|(_, o)| {
                    let p = o.position();
                    format!("({:.1}, {:.1})", p.x, p.y)
                })
                .collect();
            println!("frame {:>4}: {} draws {}", frame, draws, positions.join(" "));
        }
    }

    let (bottom, left, right) = hits.total();
    info!(
        "Done: {} frames, edge hits bottom={} left={} right={}",
        scheduler.frame_count(),
        bottom,
        left,
        right
    );

    Ok(())
}

fn cmd_check(source: &str) -> Result<()> {
    let scene = config::load_scene(&PathBuf::from(source))?;

    let table = scene.image_table();
    for (index, object) in scene.objects.iter().enumerate() {
        let built = object
            .build(|key| table.get(key).cloned())
            .with_context(|| format!("Object {} is invalid", index))?;
        info!("Object {}: {} ok", index, built.kind());
    }

    info!(
        "Scene ok: {} images, {} objects, {} frames",
        scene.images.len(),
        scene.objects.len(),
        scene.frames
    );
    Ok(())
}

fn cmd_init(path: &str) -> Result<()> {
    let dir = PathBuf::from(path);
    config::create_scene(&dir)?;

    info!("Scene created at {}", dir.join(config::SCENE_FILE).display());
    info!("Run `flick run {}` to play it", path);
    Ok(())
}

fn cmd_easings() -> Result<()> {
    println!("{:<22} {:>8} {:>8} {:>8}", "easing", "t=0.25", "t=0.5", "t=0.75");
    for easing in Easing::catalog() {
        let name = serde_json::to_value(easing)?;
        println!(
            "{:<22} {:>8.3} {:>8.3} {:>8.3}",
            name.as_str().unwrap_or("?"),
            easing.apply(0.25),
            easing.apply(0.5),
            easing.apply(0.75)
        );
    }
    Ok(())
}
