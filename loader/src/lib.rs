mod error;
mod loader;
mod state;

pub use error::{LoadErr, Result};
pub use loader::ModelLoader;
pub use state::{LoadState, StateKind};
