use std::fs;
use std::path::Path;

use anyhow::Result;
use assert_cmd::Command;
use hound::{SampleFormat, WavSpec, WavWriter};
use predicates::prelude::*;
use tempfile::tempdir;

const SCRIPT: &str = "Welcome to the walkthrough.\n\
Here is how the system works.\n\
These are the main benefits.\n\
Thank you for watching.\n";

fn write_tone(path: &Path, seconds: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: 8_000,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for index in 0..8_000 * seconds {
        let sample = if index % 2 == 0 { 8_000i16 } else { -8_000 };
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

fn slidesync() -> Command {
    Command::cargo_bin("slidesync").expect("binary is built")
}

#[test]
fn analyze_prints_statistics_and_recommendations() -> Result<()> {
    let temp = tempdir()?;
    let script = temp.path().join("script.txt");
    fs::write(&script, SCRIPT)?;

    slidesync()
        .arg("analyze")
        .arg(&script)
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleaned lines: 4"))
        .stdout(predicate::str::contains("Recommended method: even_distribution"))
        .stdout(predicate::str::contains("Slide 2"))
        .stdout(predicate::str::contains("RECOMMENDATIONS"));
    Ok(())
}

#[test]
fn plan_writes_subtitles_and_snapshot() -> Result<()> {
    let temp = tempdir()?;
    let script = temp.path().join("script.txt");
    let audio = temp.path().join("narration.wav");
    let srt = temp.path().join("out.srt");
    let vtt = temp.path().join("out.vtt");
    let snapshot = temp.path().join("plan.json");
    fs::write(&script, SCRIPT)?;
    write_tone(&audio, 8)?;

    slidesync()
        .args(["plan", "--slides", "4"])
        .arg("--script")
        .arg(&script)
        .arg("--audio")
        .arg(&audio)
        .arg("--srt")
        .arg(&srt)
        .arg("--vtt")
        .arg(&vtt)
        .arg("--snapshot")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Planned 4 slides"));

    let srt = fs::read_to_string(srt)?;
    assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:02,000\nWelcome to the walkthrough."));
    assert!(fs::read_to_string(vtt)?.starts_with("WEBVTT"));
    let plan: serde_json::Value = serde_json::from_str(&fs::read_to_string(snapshot)?)?;
    assert_eq!(plan["timings"].as_array().map(Vec::len), Some(4));
    Ok(())
}

#[test]
fn plan_counts_images_for_slide_total() -> Result<()> {
    let temp = tempdir()?;
    let script = temp.path().join("script.txt");
    let audio = temp.path().join("narration.wav");
    let images = temp.path().join("images");
    fs::create_dir(&images)?;
    for name in ["01.png", "02.JPG", "03.jpeg"] {
        fs::write(images.join(name), b"not really an image")?;
    }
    fs::write(&script, SCRIPT)?;
    write_tone(&audio, 6)?;

    slidesync()
        .arg("plan")
        .arg("--script")
        .arg(&script)
        .arg("--audio")
        .arg(&audio)
        .arg("--images")
        .arg(&images)
        .assert()
        .success()
        .stdout(predicate::str::contains("Planned 3 slides"));
    Ok(())
}

#[test]
fn plan_without_images_fails() -> Result<()> {
    let temp = tempdir()?;
    let script = temp.path().join("script.txt");
    let audio = temp.path().join("narration.wav");
    let images = temp.path().join("images");
    fs::create_dir(&images)?;
    fs::write(&script, SCRIPT)?;
    write_tone(&audio, 2)?;

    slidesync()
        .arg("plan")
        .arg("--script")
        .arg(&script)
        .arg("--audio")
        .arg(&audio)
        .arg("--images")
        .arg(&images)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No images found"));
    Ok(())
}

#[test]
fn timings_uses_manual_config() -> Result<()> {
    let temp = tempdir()?;
    let audio = temp.path().join("narration.wav");
    let config = temp.path().join("config.yaml");
    write_tone(&audio, 10)?;
    fs::write(
        &config,
        "audio:\n  sync:\n    enabled: true\n    mode: manual\n    timestamps: [0, 3, 7]\n",
    )?;

    slidesync()
        .args(["timings", "--slides", "3"])
        .arg("--audio")
        .arg(&audio)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Audio duration: 10.00s"))
        .stdout(predicate::str::contains("3.00s"))
        .stdout(predicate::str::contains("7.00s"));
    Ok(())
}

#[test]
fn missing_script_is_reported() {
    slidesync()
        .args(["analyze", "does-not-exist.txt", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read script file"));
}
