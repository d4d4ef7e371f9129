//! Audio handle consumed by the sync engine, plus decoding and analysis.

pub mod beats;
pub mod decoder;
pub mod silence;

use ndarray::{Array1, Array2, ArrayD, Axis, Ix1, Ix2};

use crate::error::AnalysisError;

/// Decoded audio as seen by the sync engine.
pub trait AudioTrack {
    /// Total duration in seconds.
    fn duration(&self) -> f64;

    fn sample_rate(&self) -> u32;

    /// Full sample buffer: 1-D for mono, frames x channels otherwise.
    fn sample_array(&self) -> Result<ArrayD<f32>, AnalysisError>;
}

/// In-memory PCM samples, one row per frame and one column per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub frames: Array2<f32>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(frames: Array2<f32>, sample_rate: u32) -> Self {
        Self {
            frames,
            sample_rate,
        }
    }

    /// Single-channel buffer from a flat sample slice.
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self::new(Array1::from(samples).insert_axis(Axis(1)), sample_rate)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.nrows()
    }

    pub fn channel_count(&self) -> usize {
        self.frames.ncols()
    }
}

impl AudioTrack for AudioBuffer {
    fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.sample_rate as f64
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn sample_array(&self) -> Result<ArrayD<f32>, AnalysisError> {
        Ok(self.frames.clone().into_dyn())
    }
}

/// Collapse a sample array to one channel by averaging across channels.
pub fn to_mono(samples: ArrayD<f32>) -> Result<Vec<f32>, AnalysisError> {
    let mono = match samples.ndim() {
        1 => samples
            .into_dimensionality::<Ix1>()
            .map_err(|_| AnalysisError::UnsupportedGeometry(1))?
            .to_vec(),
        2 => {
            let frames = samples
                .into_dimensionality::<Ix2>()
                .map_err(|_| AnalysisError::UnsupportedGeometry(2))?;
            match frames.ncols() {
                0 => return Err(AnalysisError::NoChannels),
                1 => frames.column(0).to_vec(),
                _ => frames
                    .mean_axis(Axis(1))
                    .ok_or(AnalysisError::EmptyBuffer)?
                    .to_vec(),
            }
        }
        dims => return Err(AnalysisError::UnsupportedGeometry(dims)),
    };

    if mono.is_empty() {
        return Err(AnalysisError::EmptyBuffer);
    }
    Ok(mono)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array3};

    #[test]
    fn duration_follows_frame_count() {
        let buffer = AudioBuffer::new(Array2::zeros((44_100, 2)), 22_050);
        assert_relative_eq!(buffer.duration(), 2.0);
        assert_eq!(buffer.channel_count(), 2);
    }

    #[test]
    fn averages_stereo_channels() {
        let stereo = array![[1.0_f32, 0.0], [0.5, 0.5], [-1.0, 1.0]].into_dyn();
        assert_eq!(to_mono(stereo).unwrap(), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn passes_mono_through() {
        let mono = array![0.1_f32, 0.2, 0.3].into_dyn();
        assert_eq!(to_mono(mono).unwrap(), vec![0.1, 0.2, 0.3]);

        let column = AudioBuffer::mono(vec![0.25, -0.25], 8_000);
        assert_eq!(to_mono(column.sample_array().unwrap()).unwrap(), vec![0.25, -0.25]);
    }

    #[test]
    fn rejects_unusable_geometry() {
        let cube = Array3::<f32>::zeros((2, 2, 2)).into_dyn();
        assert_eq!(to_mono(cube), Err(AnalysisError::UnsupportedGeometry(3)));

        let empty = Array2::<f32>::zeros((0, 2)).into_dyn();
        assert!(to_mono(empty).is_err());

        let no_channels = Array2::<f32>::zeros((4, 0)).into_dyn();
        assert_eq!(to_mono(no_channels), Err(AnalysisError::NoChannels));
    }
}
