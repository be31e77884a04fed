mod client;
mod error;
mod retry;

pub use client::{HttpObjectStore, ObjectRef, ObjectStore, StoreConfig};
pub use error::{Result, StoreErr};
pub use retry::RetryPolicy;
