//! Headless world streamer
//!
//! Drives a `Session` along a scripted walk and logs what the chunk store
//! does each second. Rendering lives outside this crate.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use glam::Vec2;

use worldstream::world::loader::default_worker_count;
use worldstream::{
    DecorationKind, InputState, Session, WorldSettings, default_settings_path,
    load_settings_or_default, save_settings,
};

const FRAME_RATE: u64 = 60;

/// Procedural terrain streamer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// World seed (random when omitted and no settings file exists)
    #[arg(long)]
    seed: Option<u32>,

    /// Samples per chunk side
    #[arg(long)]
    chunk_size: Option<i32>,

    /// Generation radius in chunks around the player
    #[arg(long)]
    radius: Option<i32>,

    /// Resident chunk budget
    #[arg(long)]
    max_resident: Option<usize>,

    /// Frames to simulate at 60 Hz
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Settings file (defaults to the per-user config directory)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Generate chunks on background worker threads
    #[arg(long, default_value_t = false)]
    background: bool,

    /// Write the effective settings back to the settings file
    #[arg(long, default_value_t = false)]
    save_settings: bool,
}

/// Forward with a slow turn; switches to walking after two seconds and hops
/// every three seconds, sprinting in alternating ten-second stretches.
fn scripted_input(frame: u64) -> InputState {
    let seconds = frame / FRAME_RATE;
    InputState {
        forward: true,
        sprint: (seconds / 10) % 2 == 1,
        toggle_mode: frame == 2 * FRAME_RATE,
        jump: frame % (3 * FRAME_RATE) == 0,
        look_delta: Vec2::new(1.5, 0.0),
        ..Default::default()
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let path = args.settings.clone().or_else(default_settings_path);

    let from_file = path.as_ref().is_some_and(|p| p.exists());
    let mut settings = match &path {
        Some(p) => load_settings_or_default(p)
            .with_context(|| format!("failed to load settings from {}", p.display()))?,
        None => WorldSettings::default(),
    };

    if let Some(seed) = args.seed {
        settings.generation.seed = seed;
    } else if !from_file {
        settings.generation.seed = rand::random();
    }
    if let Some(chunk_size) = args.chunk_size {
        settings.generation.chunk_size = chunk_size;
    }
    if let Some(radius) = args.radius {
        settings.generation.generation_radius = radius;
    }
    if let Some(max_resident) = args.max_resident {
        settings.generation.max_resident = max_resident;
    }
    settings.validate().context("invalid settings")?;

    if args.save_settings {
        let p = path
            .as_ref()
            .context("no settings path given and no config directory available")?;
        save_settings(p, &settings)
            .with_context(|| format!("failed to save settings to {}", p.display()))?;
        tracing::info!(path = %p.display(), "settings saved");
    }

    tracing::info!(seed = settings.generation.seed, frames = args.frames, "Starting world streamer...");

    let mut session = Session::new(settings)?;
    if args.background {
        session = session.with_background_generation(default_worker_count())?;
    }

    let frame_dt = 1.0 / FRAME_RATE as f32;
    for frame in 0..args.frames {
        let report = session.step(&scripted_input(frame), frame_dt);
        if report.evicted > 0 {
            tracing::debug!(frame, evicted = report.evicted, "evicted chunks");
        }

        if (frame + 1) % FRAME_RATE == 0 {
            let stats = session.stats();
            let instances = session.instances();
            let trees = instances.len(DecorationKind::TreeA)
                + instances.len(DecorationKind::TreeB)
                + instances.len(DecorationKind::TreeC);
            let position = session.player().position;
            tracing::info!(
                second = (frame + 1) / FRAME_RATE,
                resident = stats.resident,
                generating = stats.generating,
                generated = stats.generated_total,
                evicted = stats.evicted_total,
                wells = instances.len(DecorationKind::Well),
                houses = instances.len(DecorationKind::House),
                trees,
                x = position.x,
                y = position.y,
                z = position.z,
                "streaming summary"
            );
        }
    }

    let stats = session.stats();
    tracing::info!(
        frames = session.frame(),
        generated = stats.generated_total,
        evicted = stats.evicted_total,
        "done"
    );
    Ok(())
}
