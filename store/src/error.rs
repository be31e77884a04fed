use std::{error::Error, fmt};

/// The store module's result type.
pub type Result<T> = std::result::Result<T, StoreErr>;

/// Remote object storage failures.
#[derive(Debug)]
pub enum StoreErr {
    /// The request itself failed: connect, read, or timeout.
    Request(reqwest::Error),
    /// The store answered with a non-success status.
    Status { status: u16 },
    /// The object does not exist at (bucket, key).
    NoSuchObject { bucket: String, key: String },
    /// The retry budget is exhausted; carries the final attempt's error.
    Unavailable {
        attempts: u32,
        source: Box<StoreErr>,
    },
}

impl fmt::Display for StoreErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreErr::Request(e) => write!(f, "request failed: {e}"),
            StoreErr::Status { status } => write!(f, "store answered with status {status}"),
            StoreErr::NoSuchObject { bucket, key } => {
                write!(f, "no such object: {bucket}/{key}")
            }
            StoreErr::Unavailable { attempts, source } => {
                write!(f, "store unavailable after {attempts} attempt(s): {source}")
            }
        }
    }
}

impl Error for StoreErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreErr::Request(e) => Some(e),
            StoreErr::Unavailable { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for StoreErr {
    fn from(value: reqwest::Error) -> Self {
        Self::Request(value)
    }
}
