use std::{error::Error, fmt};

use artifact::ArtifactErr;
use store::StoreErr;

/// The loader module's result type.
pub type Result<T> = std::result::Result<T, LoadErr>;

/// Everything that can sink a load attempt. Confined to the loader's
/// state; request handlers only ever see "not ready".
#[derive(Debug)]
pub enum LoadErr {
    Store(StoreErr),
    Artifact(ArtifactErr),
    /// The background decode task panicked or was cancelled.
    Background(String),
}

impl fmt::Display for LoadErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadErr::Store(e) => write!(f, "artifact fetch failed: {e}"),
            LoadErr::Artifact(e) => write!(f, "artifact rejected: {e}"),
            LoadErr::Background(detail) => write!(f, "background load task failed: {detail}"),
        }
    }
}

impl Error for LoadErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadErr::Store(e) => Some(e),
            LoadErr::Artifact(e) => Some(e),
            LoadErr::Background(_) => None,
        }
    }
}

impl From<StoreErr> for LoadErr {
    fn from(value: StoreErr) -> Self {
        Self::Store(value)
    }
}

impl From<ArtifactErr> for LoadErr {
    fn from(value: ArtifactErr) -> Self {
        Self::Artifact(value)
    }
}
