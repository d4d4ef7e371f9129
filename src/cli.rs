use std::path::{Path, PathBuf};

use anyhow::{ensure, Result};
use clap::{Args, Parser, Subcommand};

use crate::images::list_images;

#[derive(Parser, Debug)]
#[command(
    name = "slidesync",
    version,
    about = "Distribute narration across slides and time them against an audio track"
)]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(long, global = true)]
    pub debug: bool,
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn config_path(&self) -> Option<&Path> {
        match &self.command {
            Command::Analyze(args) => args.config.as_deref(),
            Command::Plan(args) => args.config.as_deref(),
            Command::Timings(args) => args.config.as_deref(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report how a script would be distributed across slides.
    Analyze(AnalyzeArgs),
    /// Build the full slideshow plan: slide texts plus timings.
    Plan(PlanArgs),
    /// Compute slide timings for an audio track only.
    Timings(TimingsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Script file (plain text, or JSON with `texts`/`text`).
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,
    /// Number of slides available.
    #[arg(value_name = "SLIDES")]
    pub slides: usize,
    /// YAML or JSON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Slide count given directly or taken from an image directory.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SlideSource {
    /// Number of slides.
    #[arg(long)]
    pub slides: Option<usize>,
    /// Directory of slide images (jpg, jpeg, png, bmp, tiff).
    #[arg(long, value_name = "DIR")]
    pub images: Option<PathBuf>,
}

impl SlideSource {
    pub fn slide_count(&self) -> Result<usize> {
        let count = match (&self.slides, &self.images) {
            (Some(slides), _) => *slides,
            (None, Some(dir)) => list_images(dir)?.len(),
            (None, None) => anyhow::bail!("provide --slides or --images"),
        };
        ensure!(count > 0, "slide count must be at least 1");
        Ok(count)
    }
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Script file (plain text, or JSON with `texts`/`text`).
    #[arg(long)]
    pub script: PathBuf,
    /// Narration or music track.
    #[arg(long)]
    pub audio: PathBuf,
    #[command(flatten)]
    pub source: SlideSource,
    /// YAML or JSON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Write the plan and effective settings as JSON.
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,
    /// Write SRT subtitles.
    #[arg(long, value_name = "FILE")]
    pub srt: Option<PathBuf>,
    /// Write WebVTT subtitles.
    #[arg(long, value_name = "FILE")]
    pub vtt: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct TimingsArgs {
    /// Narration or music track.
    #[arg(long)]
    pub audio: PathBuf,
    /// Number of slides.
    #[arg(long)]
    pub slides: usize,
    /// YAML or JSON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}
