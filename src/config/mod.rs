//! Application configuration loaded from YAML or JSON.
//!
//! Every section has defaults, so a partial file (or no file at all) yields
//! a usable configuration.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub text: TextConfig,
    pub audio: AudioConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `path`; `.json` files are parsed as JSON,
    /// anything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration file {:?}", path))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&raw)
        } else {
            Self::from_yaml_str(&raw)
        }
        .with_context(|| format!("failed to parse configuration file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).context("invalid YAML configuration")
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid JSON configuration")
    }

    pub fn validate(&self) -> Result<()> {
        let text = &self.text;
        ensure!(text.font_size > 0, "text.font_size must be positive");
        ensure!(
            text.animation.duration >= 0.0,
            "text.animation.duration must be non-negative"
        );
        ensure!(
            text.optimization.max_chars_per_slide > 0,
            "text.optimization.max_chars_per_slide must be positive"
        );
        ensure!(
            text.optimization.max_chars_per_line > 0,
            "text.optimization.max_chars_per_line must be positive"
        );
        ensure!(
            text.sequential.line_delay >= 0.0,
            "text.sequential.line_delay must be non-negative"
        );
        if let Some(seconds) = text.sequential.line_duration.seconds() {
            ensure!(
                seconds > 0.0,
                "text.sequential.line_duration must be positive or \"auto\""
            );
        }

        let sync = &self.audio.sync;
        ensure!(
            sync.auto.min_slide_duration >= 0.0,
            "audio.sync.auto.min_slide_duration must be non-negative"
        );
        ensure!(
            sync.auto.min_slide_duration <= sync.auto.max_slide_duration,
            "audio.sync.auto.min_slide_duration ({}) exceeds max_slide_duration ({})",
            sync.auto.min_slide_duration,
            sync.auto.max_slide_duration
        );
        if let Some(timestamps) = &sync.timestamps {
            ensure!(
                timestamps.iter().all(|t| t.is_finite() && *t >= 0.0),
                "audio.sync.timestamps must be finite, non-negative seconds"
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub font_size: u32,
    pub color: String,
    pub stroke_color: String,
    pub stroke_width: u32,
    pub position: String,
    pub animation: AnimationConfig,
    pub sequential: SequentialConfig,
    pub optimization: OptimizationConfig,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_size: 80,
            color: "white".to_string(),
            stroke_color: "black".to_string(),
            stroke_width: 3,
            position: "center".to_string(),
            animation: AnimationConfig::default(),
            sequential: SequentialConfig::default(),
            optimization: OptimizationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            kind: "fade_in".to_string(),
            duration: 1.5,
        }
    }
}

/// Sequential reveal: a slide's lines appear one after another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequentialConfig {
    pub enabled: bool,
    /// Seconds between consecutive line reveals.
    pub line_delay: f64,
    pub line_duration: LineDuration,
    pub animation: String,
    pub animation_duration: f64,
    /// Keep earlier lines visible until the slide ends.
    pub stagger: bool,
}

impl Default for SequentialConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            line_delay: 1.5,
            line_duration: LineDuration::default(),
            animation: "fade_in".to_string(),
            animation_duration: 0.5,
            stagger: true,
        }
    }
}

/// Either a fixed number of seconds or a keyword (`"auto"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineDuration {
    Seconds(f64),
    Keyword(String),
}

impl LineDuration {
    /// Fixed duration, or `None` when the duration is derived automatically.
    pub fn seconds(&self) -> Option<f64> {
        match self {
            Self::Seconds(seconds) => Some(*seconds),
            Self::Keyword(_) => None,
        }
    }
}

impl Default for LineDuration {
    fn default() -> Self {
        Self::Keyword("auto".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationConfig {
    /// Character budget after which intelligent grouping closes a slide.
    pub max_chars_per_slide: usize,
    /// Width used when re-splitting slide text for sequential reveal.
    pub max_chars_per_line: usize,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            max_chars_per_slide: 500,
            max_chars_per_line: 80,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub enabled: bool,
    pub mode: SyncMode,
    pub timestamps: Option<Vec<f64>>,
    pub auto: AutoSyncConfig,
    pub beat_detection: BeatDetectionConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: SyncMode::Auto,
            timestamps: None,
            auto: AutoSyncConfig::default(),
            beat_detection: BeatDetectionConfig::default(),
        }
    }
}

/// Timing strategy. Unrecognised names are kept so the sync manager can
/// report them when it falls back to even distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SyncMode {
    Manual,
    Auto,
    BeatDetection,
    Other(String),
}

impl SyncMode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Manual => "manual",
            Self::Auto => "auto",
            Self::BeatDetection => "beat_detection",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for SyncMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "manual" => Self::Manual,
            "auto" => Self::Auto,
            "beat_detection" => Self::BeatDetection,
            _ => Self::Other(value),
        }
    }
}

impl From<SyncMode> for String {
    fn from(mode: SyncMode) -> Self {
        mode.as_str().to_string()
    }
}

impl Display for SyncMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoSyncConfig {
    /// Windows quieter than this level (dBFS) count as silence.
    pub silence_threshold: f64,
    pub min_slide_duration: f64,
    pub max_slide_duration: f64,
}

impl Default for AutoSyncConfig {
    fn default() -> Self {
        Self {
            silence_threshold: -40.0,
            min_slide_duration: 3.0,
            max_slide_duration: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeatDetectionConfig {
    pub slides_per_beat: usize,
}

impl Default for BeatDetectionConfig {
    fn default() -> Self {
        Self { slides_per_beat: 4 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
