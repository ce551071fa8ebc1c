use std::{
    collections::HashMap,
    io,
    path::{Component, Path, PathBuf},
};

use crate::{
    foundation::error::{StoryboardError, StoryboardResult},
    generator::audio::{AudioAnalyzer, AudioStream},
    storyboard::layer::{Storyboard, StoryboardLayer},
};

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Filesystem locations a generation pass works against.
pub struct ProjectPaths {
    pub project_path: PathBuf,
    /// Fallback texture root.
    pub project_asset_path: PathBuf,
    /// Primary texture root; must exist when queried.
    pub mapset_path: PathBuf,
    /// Default audio track for the audio queries.
    pub audio_path: PathBuf,
}

/// Authoring context handed to storyboard generators.
///
/// Owns the layers being generated plus the audio streams opened on their behalf. Streams are
/// released by [`GeneratorContext::dispose_resources`], which also runs on drop.
pub struct GeneratorContext<A: AudioAnalyzer> {
    paths: ProjectPaths,
    storyboard: Storyboard,
    dependencies: Vec<PathBuf>,
    log: String,
    analyzer: A,
    streams: HashMap<PathBuf, A::Stream>,
}

impl<A: AudioAnalyzer> GeneratorContext<A> {
    pub fn new(paths: ProjectPaths, analyzer: A) -> Self {
        Self {
            paths,
            storyboard: Storyboard::new(),
            dependencies: Vec::new(),
            log: String::new(),
            analyzer,
            streams: HashMap::new(),
        }
    }

    pub fn project_path(&self) -> &Path {
        &self.paths.project_path
    }

    pub fn project_asset_path(&self) -> &Path {
        &self.paths.project_asset_path
    }

    pub fn mapset_path(&self) -> StoryboardResult<&Path> {
        let path = &self.paths.mapset_path;
        if !path.is_dir() {
            return Err(StoryboardError::invalid_operation(format!(
                "the mapset folder at '{}' doesn't exist",
                path.display()
            )));
        }
        Ok(path)
    }

    pub fn get_layer(&mut self, identifier: &str) -> &mut StoryboardLayer {
        self.storyboard.get_layer(identifier)
    }

    pub fn storyboard(&self) -> &Storyboard {
        &self.storyboard
    }

    /// Close the audio streams and hand over the generated storyboard.
    pub fn into_storyboard(mut self) -> Storyboard {
        self.dispose_resources();
        std::mem::take(&mut self.storyboard)
    }

    /// Record a file the generated output depends on.
    pub fn add_dependency(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.dependencies.contains(&path) {
            self.dependencies.push(path);
        }
    }

    pub fn dependencies(&self) -> &[PathBuf] {
        &self.dependencies
    }

    pub fn append_log(&mut self, message: &str) {
        tracing::info!(target: "storyboard::generator", "{message}");
        self.log.push_str(message);
        self.log.push('\n');
    }

    pub fn log(&self) -> &str {
        &self.log
    }

    // Audio

    fn stream(&mut self, path: Option<&Path>) -> StoryboardResult<&mut A::Stream> {
        let path = path.unwrap_or(self.paths.audio_path.as_path());
        let key = normalize_path(path).map_err(|e| {
            StoryboardError::validation(format!("audio path '{}': {e}", path.display()))
        })?;
        if !self.streams.contains_key(&key) {
            tracing::debug!(path = %key.display(), "opening audio stream");
            let stream = self.analyzer.open(&key)?;
            self.streams.insert(key.clone(), stream);
        }
        self.streams
            .get_mut(&key)
            .ok_or_else(|| StoryboardError::evaluation("audio stream vanished from cache"))
    }

    /// Length of the default audio track in milliseconds.
    pub fn audio_duration(&mut self) -> StoryboardResult<f64> {
        Ok(self.stream(None)?.duration_secs() * 1000.0)
    }

    /// FFT magnitudes at `time_ms` of `path`, or of the default track.
    pub fn fft(&mut self, time_ms: f64, path: Option<&Path>) -> StoryboardResult<Vec<f32>> {
        self.stream(path)?.fft(time_ms * 0.001)
    }

    pub fn fft_frequency(&mut self, path: Option<&Path>) -> StoryboardResult<f32> {
        Ok(self.stream(path)?.frequency())
    }

    pub fn open_stream_count(&self) -> usize {
        self.streams.len()
    }

    /// Close every cached audio stream. The context stays usable; streams reopen on demand.
    pub fn dispose_resources(&mut self) {
        for (_, mut stream) in self.streams.drain() {
            stream.close();
        }
    }
}

/// Absolute form of `path` with `.` and `..` folded away lexically.
fn normalize_path(path: &Path) -> io::Result<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

impl<A: AudioAnalyzer> Drop for GeneratorContext<A> {
    fn drop(&mut self) {
        self.dispose_resources();
    }
}

impl<A: AudioAnalyzer> std::fmt::Debug for GeneratorContext<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorContext")
            .field("paths", &self.paths)
            .field("layers", &self.storyboard.layers().len())
            .field("dependencies", &self.dependencies)
            .field("open_streams", &self.streams.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generator/context.rs"]
mod tests;
