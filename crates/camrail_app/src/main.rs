// SPDX-License-Identifier: MIT OR Apache-2.0
//! `camrail` - headless camera path playback
//!
//! Loads a motion set and session settings, then drives the playback
//! controller from a fixed-rate frame loop:
//! - Motions and settings are RON documents
//! - Scripted actions stand in for keyboard input
//! - A report of the session is logged at the end
//!
//! Logging goes through `tracing`; set `RUST_LOG` to override the default
//! `camrail=debug` filter.

mod error;
mod session;
mod settings;

use camrail_engine::MotionSet;
use clap::Parser;
use error::AppError;
use session::{PlaybackSession, SessionReport};
use settings::SessionSettings;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Session settings file (RON)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Motion set file (RON), overriding the settings
    #[arg(long)]
    motions: Option<PathBuf>,

    /// Frames per second of the session loop
    #[arg(long)]
    fps: Option<u32>,

    /// Maximum session length in seconds
    #[arg(long)]
    seconds: Option<f32>,

    /// Name of the motion to play first
    #[arg(long)]
    motion: Option<String>,

    /// Write the effective settings to this file before running
    #[arg(long)]
    save_settings: Option<PathBuf>,
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("camrail=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    tracing::info!("Starting camrail v{}", env!("CARGO_PKG_VERSION"));

    match run(args) {
        Ok(report) => log_report(&report),
        Err(e) => {
            tracing::error!("Session failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<SessionReport, AppError> {
    let mut settings = match args.settings.as_deref() {
        Some(path) => SessionSettings::load(path)?,
        None => SessionSettings::default(),
    };
    if let Some(motions) = args.motions {
        settings.motions = motions;
    }
    if let Some(fps) = args.fps {
        settings.fps = fps;
    }
    if let Some(seconds) = args.seconds {
        settings.max_seconds = seconds;
    }

    if let Some(path) = args.save_settings.as_deref() {
        settings.save(path)?;
        tracing::info!("Saved session settings to {:?}", path);
    }

    let motions = MotionSet::load(&settings.motions)?;
    let mut session = PlaybackSession::new(&motions, &settings);
    if let Some(name) = args.motion.as_deref() {
        session.play_motion(name)?;
    }
    let controller = session.controller();
    tracing::info!(
        "Playing motion '{}' of {}, {} jump point(s)",
        controller
            .motion_name(controller.state().active_motion)
            .unwrap_or("<none>"),
        controller.motion_count(),
        controller.jump_point_count()
    );

    Ok(session.run())
}

fn log_report(report: &SessionReport) {
    tracing::info!(
        "Session ran {} frame(s), {} progress notification(s), finished: {}",
        report.frames,
        report.notifications,
        report.finished
    );
    if let Some((t, in_animation)) = report.last_progress {
        tracing::info!("Last progress {:.3} (animated: {})", t, in_animation);
    }
    tracing::info!(
        "Final pose: position {:?}, orientation {:?}, rendering from {} camera",
        report.final_pose.position,
        report.final_pose.orientation,
        report.active_camera.name()
    );
    tracing::info!(
        "Recorded {} curve sample(s) and {} marker(s)",
        report.dots,
        report.markers
    );
    for (i, keyframe) in report.captured.iter().enumerate() {
        tracing::info!(
            "Captured keyframe {}: pos {:?}, rot {:?}",
            i + 1,
            keyframe.position,
            keyframe.orientation
        );
    }
}
