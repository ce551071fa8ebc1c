use std::path::Path;

use crate::foundation::error::StoryboardResult;

/// Opens audio files for analysis. Decoding lives outside the engine.
pub trait AudioAnalyzer {
    type Stream: AudioStream;

    fn open(&mut self, path: &Path) -> StoryboardResult<Self::Stream>;
}

/// An open analysis handle over one audio file.
///
/// Handles hold external resources; [`AudioStream::close`] releases them and must be safe to
/// call more than once.
pub trait AudioStream {
    fn duration_secs(&self) -> f64;

    /// Sample rate in Hz.
    fn frequency(&self) -> f32;

    /// FFT magnitudes of the window at `time_secs`.
    fn fft(&mut self, time_secs: f64) -> StoryboardResult<Vec<f32>>;

    fn close(&mut self);
}
