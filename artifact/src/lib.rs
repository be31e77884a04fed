mod cache;
mod codec;
mod error;

pub use cache::ArtifactCache;
pub use codec::{decode, encode};
pub use error::{ArtifactErr, Result};
