use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use slidesync::cli::{AnalyzeArgs, Cli, Command, PlanArgs, TimingsArgs};
use slidesync::script::{load_script, ScriptOptimizer};
use slidesync::subtitles::{write_srt, write_vtt};
use slidesync::sync::{slide_durations, validate_timings};
use slidesync::{build_plan, decode_audio, AppConfig, AudioSyncManager, AudioTrack};

const PREVIEW_CHARS: usize = 200;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(cli.config_path())
        .context("Failed to load configuration")?;
    init_logging(cli.debug, &config.logging.level);

    match &cli.command {
        Command::Analyze(args) => handle_analyze(args, &config),
        Command::Plan(args) => handle_plan(args, &config),
        Command::Timings(args) => handle_timings(args, &config),
    }
}

/// `RUST_LOG` wins, then `--debug`, then the configured level.
fn init_logging(debug: bool, configured: &str) {
    let fallback = if debug { "debug" } else { configured };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_analyze(args: &AnalyzeArgs, config: &AppConfig) -> Result<()> {
    let lines = load_script(&args.script)?;
    let optimizer = ScriptOptimizer::new(config.text.clone());
    let analysis = optimizer.analyze_distribution(&lines, args.slides)?;

    let rule = "=".repeat(60);
    println!("{rule}");
    println!("SCRIPT DISTRIBUTION ANALYSIS");
    println!("{rule}");
    println!("Script file: {}", args.script.display());
    println!("Available slides: {}", args.slides);
    println!();
    println!("ANALYSIS RESULTS:");
    println!("  Original lines: {}", analysis.original_lines);
    println!("  Cleaned lines: {}", analysis.cleaned_lines);
    println!("  Total characters: {}", analysis.total_characters);
    println!("  Average line length: {:.1} characters", analysis.avg_line_length);
    println!("  Lines per slide (avg): {:.1}", analysis.lines_per_slide);
    println!("  Recommended method: {}", analysis.recommended_method);
    println!();

    println!("DISTRIBUTION PREVIEW:");
    println!("{}", "-".repeat(40));
    if let Some(settings) = optimizer.optimize_distribution(&lines, args.slides)? {
        for (idx, text) in settings.texts.iter().enumerate() {
            println!();
            println!("Slide {} ({} chars):", idx + 1, text.chars().count());
            println!("  {}", preview(text));
        }
    }

    println!();
    println!("{rule}");
    println!("RECOMMENDATIONS:");
    for note in analysis.recommendations() {
        println!("  • {note}");
    }
    println!();
    println!("{rule}");
    Ok(())
}

fn handle_plan(args: &PlanArgs, config: &AppConfig) -> Result<()> {
    let slide_count = args.source.slide_count()?;
    let lines = load_script(&args.script)?;
    let audio = decode_audio(&args.audio)?;
    info!(
        audio = %args.audio.display(),
        duration = audio.duration(),
        slides = slide_count,
        "Planning slideshow"
    );

    let plan = build_plan(config, &lines, &audio, slide_count)?;

    println!(
        "Planned {} slides over {:.2}s using {}",
        plan.slide_count(),
        plan.audio_duration,
        plan.text.method
    );
    for slide in &plan.slides {
        println!(
            "  {:>3}  {:>8.2}s  {:>7.2}s  {}",
            slide.index + 1,
            slide.start,
            slide.duration,
            preview(&slide.text.replace('\n', " / "))
        );
    }

    if let Some(path) = &args.snapshot {
        plan.write_snapshot(path)?;
    }
    let cues = plan.subtitle_cues();
    if let Some(path) = &args.srt {
        write_srt(path, &cues)?;
    }
    if let Some(path) = &args.vtt {
        write_vtt(path, &cues)?;
    }
    Ok(())
}

fn handle_timings(args: &TimingsArgs, config: &AppConfig) -> Result<()> {
    let audio = decode_audio(&args.audio)?;
    let manager = AudioSyncManager::new(config.audio.sync.clone());
    let timings = manager.calculate_slide_timings(&audio, args.slides)?;
    let timings = validate_timings(&timings, audio.duration());
    let durations = slide_durations(&timings, audio.duration());

    println!("Audio duration: {:.2}s", audio.duration());
    if timings.len() < args.slides {
        println!(
            "Note: {} of {} slide starts kept after enforcing the minimum gap",
            timings.len(),
            args.slides
        );
    }
    for (idx, (start, duration)) in timings.iter().zip(&durations).enumerate() {
        println!("  {:>3}  {:>8.2}s  {:>7.2}s", idx + 1, start, duration);
    }
    Ok(())
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        format!("{}...", text.chars().take(PREVIEW_CHARS).collect::<String>())
    } else {
        text.to_string()
    }
}
