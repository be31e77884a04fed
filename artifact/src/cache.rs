use std::{
    fs,
    path::{Path, PathBuf},
};

use model::Predictor;

use crate::{
    codec::{decode, encode},
    error::Result,
};

/// On-disk persistence for the decoded artifact, so warm starts skip the
/// network entirely. One fixed path per process; presence of the path is
/// the cache-hit signal.
#[derive(Debug)]
pub struct ArtifactCache {
    path: PathBuf,
}

impl ArtifactCache {
    /// Creates a cache over the given local path.
    ///
    /// # Arguments
    /// * `path` - Where the serialized artifact lives between runs.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads and decodes the cached artifact.
    ///
    /// Decode failures surface as the corruption they are, never as a
    /// cache miss; the caller decides whether to fall back to a fetch.
    ///
    /// # Returns
    /// The cached predictor, behaviorally identical to one decoded from a
    /// fresh remote fetch.
    pub fn load(&self) -> Result<Predictor> {
        let bytes = fs::read(&self.path)?;
        decode(&bytes)
    }

    /// Serializes the predictor to disk atomically: the bytes land in a
    /// sibling temp file first and are renamed into place, so a concurrent
    /// reader never observes a partially written artifact.
    ///
    /// # Arguments
    /// * `model` - The predictor to persist.
    pub fn save(&self, model: &Predictor) -> Result<()> {
        let bytes = encode(model);
        let tmp = self.tmp_path();

        if let Err(e) = fs::write(&tmp, &bytes) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}
