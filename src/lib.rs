//! Slideshow planning: split narration into one text per slide and time
//! each slide against the audio track.

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod images;
pub mod plan;
pub mod script;
pub mod sequential;
pub mod subtitles;
pub mod sync;
pub mod types;

pub use audio::decoder::decode_audio;
pub use audio::{AudioBuffer, AudioTrack};
pub use config::AppConfig;
pub use error::{AnalysisError, InputError};
pub use plan::{build_plan, SlideshowPlan};
pub use script::ScriptOptimizer;
pub use sync::AudioSyncManager;
pub use types::{DistributionMethod, TextSettings};
