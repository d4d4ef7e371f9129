use serde::Serialize;

use crate::types::DistributionMethod;

/// Read-only diagnostics describing how a script would be distributed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionAnalysis {
    pub original_lines: usize,
    pub cleaned_lines: usize,
    pub available_slides: usize,
    pub lines_per_slide: f64,
    pub total_characters: usize,
    pub avg_line_length: f64,
    pub recommended_method: DistributionMethod,
}

impl DistributionAnalysis {
    /// Human-readable advice about the content-to-slide ratio.
    pub fn recommendations(&self) -> Vec<&'static str> {
        let mut notes = Vec::new();

        if self.lines_per_slide > 15.0 {
            notes.push("Consider using more slides or shorter script lines");
            notes.push("Current ratio may result in crowded slides");
        } else if self.lines_per_slide < 2.0 {
            notes.push("Consider using fewer slides or adding more content");
            notes.push("Some slides may appear sparse");
        } else {
            notes.push("Good balance between content and slides");
        }

        if self.avg_line_length > 150.0 {
            notes.push("Consider breaking long lines into shorter ones");
            notes.push("Long lines may require smaller fonts");
        } else if self.avg_line_length < 30.0 {
            notes.push("Lines are quite short - good for readability");
        }

        notes.extend_from_slice(match self.recommended_method {
            DistributionMethod::IntelligentGrouping => &[
                "Script will use intelligent grouping based on content structure",
                "Natural breaks and topics will be detected",
            ],
            DistributionMethod::BalancedLength => &[
                "Script will use balanced length distribution",
                "Slides will have similar amounts of text",
            ],
            DistributionMethod::SemanticGrouping => &[
                "Script will group content by topics/themes",
                "Related content will appear together",
            ],
            DistributionMethod::EvenDistribution => &[
                "Script will use even distribution",
                "Equal number of lines per slide",
            ],
        });
        notes
    }
}
