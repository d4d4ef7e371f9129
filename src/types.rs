//! Core types for the slideshow planning pipeline

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::config::{SequentialConfig, TextConfig};

/// Mode tag carried by optimizer output: one text per slide.
pub const PER_IMAGE_MODE: &str = "per_image";

/// Strategy used to split cleaned script lines into slide texts.
///
/// Chosen once per run from corpus statistics and never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionMethod {
    IntelligentGrouping,
    SemanticGrouping,
    BalancedLength,
    EvenDistribution,
}

impl DistributionMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IntelligentGrouping => "intelligent_grouping",
            Self::SemanticGrouping => "semantic_grouping",
            Self::BalancedLength => "balanced_length",
            Self::EvenDistribution => "even_distribution",
        }
    }
}

impl Display for DistributionMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text overlay settings handed to the video-assembly stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSettings {
    pub mode: String,
    /// Exactly one entry per slide; entries may be empty.
    pub texts: Vec<String>,
    pub method: DistributionMethod,
    pub font_size: u32,
    pub color: String,
    pub stroke_color: String,
    pub stroke_width: u32,
    pub position: String,
    pub animation: String,
    pub animation_duration: f64,
    pub optimized: bool,
    pub sequential: SequentialConfig,
}

impl TextSettings {
    /// Wrap distributed texts with the styling passthrough from `text`.
    pub fn from_config(method: DistributionMethod, texts: Vec<String>, text: &TextConfig) -> Self {
        Self {
            mode: PER_IMAGE_MODE.to_string(),
            texts,
            method,
            font_size: text.font_size,
            color: text.color.clone(),
            stroke_color: text.stroke_color.clone(),
            stroke_width: text.stroke_width,
            position: text.position.clone(),
            animation: text.animation.kind.clone(),
            animation_duration: text.animation.duration,
            optimized: true,
            sequential: text.sequential.clone(),
        }
    }

    pub fn slide_count(&self) -> usize {
        self.texts.len()
    }
}
