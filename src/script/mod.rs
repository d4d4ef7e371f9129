//! Script distribution: turns raw narration lines into exactly one text per
//! slide.

mod analysis;
mod cleaning;
mod lines;
mod loader;
mod methods;
mod reconcile;


pub use analysis::DistributionAnalysis;
pub use cleaning::clean_script_lines;
pub use lines::split_text_into_lines;
pub use loader::{load_script, parse_json_script};
pub use methods::{choose_method, CorpusStats};

use tracing::{debug, info, warn};

use crate::config::TextConfig;
use crate::error::InputError;
use crate::types::{DistributionMethod, TextSettings};

const PREVIEW_SLIDES: usize = 3;
const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct ScriptOptimizer {
    config: TextConfig,
}

impl ScriptOptimizer {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TextConfig {
        &self.config
    }

    /// Distribute `lines` across `slide_count` slides.
    ///
    /// Returns `Ok(None)` when nothing survives cleaning. Otherwise the
    /// settings always carry exactly `slide_count` texts.
    pub fn optimize_distribution<S: AsRef<str>>(
        &self,
        lines: &[S],
        slide_count: usize,
    ) -> Result<Option<TextSettings>, InputError> {
        if slide_count == 0 {
            return Err(InputError::ZeroSlides);
        }
        if lines.is_empty() {
            warn!("No script lines provided");
            return Ok(None);
        }

        let cleaned = clean_script_lines(lines);
        if cleaned.is_empty() {
            warn!(raw_lines = lines.len(), "No valid script lines after cleaning");
            return Ok(None);
        }

        info!(
            lines = cleaned.len(),
            slides = slide_count,
            "Distributing script lines across slides"
        );
        let (method, mut texts) = self.distribute(&cleaned, slide_count);
        info!(method = %method, "Using distribution method");

        if self.config.sequential.enabled {
            texts = texts
                .iter()
                .map(|text| {
                    split_text_into_lines(text, self.config.optimization.max_chars_per_line)
                        .join("\n")
                })
                .collect();
            debug!("Re-split slide texts for sequential reveal");
        }

        info!(slides = texts.len(), "Script optimized");
        for (idx, text) in texts.iter().take(PREVIEW_SLIDES).enumerate() {
            info!(slide = idx + 1, preview = %preview(text), "Slide text");
        }

        Ok(Some(TextSettings::from_config(method, texts, &self.config)))
    }

    /// Statistics for a prospective distribution. Pure; repeated calls on
    /// the same input return identical results.
    pub fn analyze_distribution<S: AsRef<str>>(
        &self,
        lines: &[S],
        slide_count: usize,
    ) -> Result<DistributionAnalysis, InputError> {
        if slide_count == 0 {
            return Err(InputError::ZeroSlides);
        }
        let cleaned = clean_script_lines(lines);
        let stats = CorpusStats::from_lines(&cleaned, slide_count);
        Ok(DistributionAnalysis {
            original_lines: lines.len(),
            cleaned_lines: stats.line_count,
            available_slides: slide_count,
            lines_per_slide: stats.lines_per_slide(),
            total_characters: stats.total_chars,
            avg_line_length: stats.average_line_length(),
            recommended_method: choose_method(&stats),
        })
    }

    /// Pick a method for already-cleaned lines, run it, and reconcile the
    /// result to exactly `slide_count` groups. `slide_count` must be
    /// non-zero.
    pub(crate) fn distribute(
        &self,
        cleaned: &[String],
        slide_count: usize,
    ) -> (DistributionMethod, Vec<String>) {
        let stats = CorpusStats::from_lines(cleaned, slide_count);
        let method = choose_method(&stats);
        let groups = match method {
            DistributionMethod::IntelligentGrouping => methods::intelligent_grouping(
                cleaned,
                slide_count,
                self.config.optimization.max_chars_per_slide,
            ),
            DistributionMethod::SemanticGrouping => {
                methods::semantic_grouping(cleaned, slide_count)
            }
            DistributionMethod::BalancedLength => methods::balanced_length(cleaned, slide_count),
            DistributionMethod::EvenDistribution => {
                methods::even_distribution(cleaned, slide_count)
            }
        };
        debug!(raw_groups = groups.len(), "Reconciling slide groups");
        (method, reconcile::ensure_exact_count(groups, slide_count))
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
