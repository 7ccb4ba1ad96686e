//! Configuration sources
//!
//! Where scene documents come from. The host decides the location; the
//! controller only asks for the current text.

use std::path::{Path, PathBuf};

use super::error::SceneError;

/// Source of scene configuration documents
pub trait ConfigSource {
    /// Human readable location, used in logs and errors
    fn location(&self) -> String;

    /// Fetch the current document text
    ///
    /// # Errors
    /// [`SceneError::FetchFailure`] when the source is unreachable.
    fn fetch(&mut self) -> Result<String, SceneError>;
}

/// Reads documents from the filesystem
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for a file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path read on every fetch
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&mut self) -> Result<String, SceneError> {
        log::debug!("Reading scene configuration from {}", self.path.display());
        std::fs::read_to_string(&self.path).map_err(|e| SceneError::FetchFailure {
            location: self.location(),
            reason: e.to_string(),
        })
    }
}

/// Holds a document in memory; can be swapped or made unreachable
#[derive(Debug, Clone)]
pub struct MemorySource {
    location: String,
    content: Result<String, String>,
    fetches: usize,
}

impl MemorySource {
    /// Create a source serving `text`
    pub fn new(location: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            content: Ok(text.into()),
            fetches: 0,
        }
    }

    /// Serve different text from now on
    pub fn replace(&mut self, text: impl Into<String>) {
        self.content = Ok(text.into());
    }

    /// Fail every fetch with `reason` until [`MemorySource::replace`] is called
    pub fn set_unreachable(&mut self, reason: impl Into<String>) {
        self.content = Err(reason.into());
    }

    /// Number of fetches served or failed
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }
}

impl ConfigSource for MemorySource {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn fetch(&mut self) -> Result<String, SceneError> {
        self.fetches += 1;
        self.content.clone().map_err(|reason| SceneError::FetchFailure {
            location: self.location.clone(),
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_swaps_and_fails() {
        let mut source = MemorySource::new("memory://scene", "{}");
        assert_eq!(source.fetch().unwrap(), "{}");

        source.set_unreachable("offline");
        assert!(matches!(source.fetch(), Err(SceneError::FetchFailure { ref reason, .. }) if reason == "offline"));

        source.replace("[]");
        assert_eq!(source.fetch().unwrap(), "[]");
        assert_eq!(source.fetch_count(), 3);
    }

    #[test]
    fn test_missing_file_is_fetch_failure() {
        let mut source = FileSource::new("definitely/not/here/sceneConfig.json");
        let error = source.fetch().unwrap_err();
        assert!(matches!(error, SceneError::FetchFailure { ref location, .. } if location.ends_with("sceneConfig.json")));
    }
}
