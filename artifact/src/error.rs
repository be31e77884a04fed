use std::{error::Error, fmt, io};

/// The artifact module's result type.
pub type Result<T> = std::result::Result<T, ArtifactErr>;

/// Artifact encoding, decoding and cache persistence failures.
#[derive(Debug)]
pub enum ArtifactErr {
    Io(io::Error),
    BadMagic,
    Truncated {
        got: usize,
    },
    BadHeader(serde_json::Error),
    UnsupportedFormat {
        got: u32,
        expected: u32,
    },
    TransformVersionMismatch {
        got: u32,
        expected: u32,
    },
    UnknownKind {
        got: String,
    },
    WeightBlockMismatch {
        got: usize,
        expected: usize,
    },
}

impl ArtifactErr {
    /// True when the bytes themselves are bad, as opposed to the disk or
    /// network failing to deliver them. A corrupt cache file must be
    /// reported, never silently treated as a miss.
    pub fn is_corrupt(&self) -> bool {
        !matches!(self, ArtifactErr::Io(_))
    }
}

impl fmt::Display for ArtifactErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactErr::Io(e) => write!(f, "io error: {e}"),
            ArtifactErr::BadMagic => write!(f, "not a model artifact: bad magic bytes"),
            ArtifactErr::Truncated { got } => {
                write!(f, "artifact truncated at {got} bytes")
            }
            ArtifactErr::BadHeader(e) => write!(f, "malformed artifact header: {e}"),
            ArtifactErr::UnsupportedFormat { got, expected } => {
                write!(f, "unsupported artifact format {got}, expected {expected}")
            }
            ArtifactErr::TransformVersionMismatch { got, expected } => write!(
                f,
                "artifact was built for feature transform v{got}, this build expects v{expected}"
            ),
            ArtifactErr::UnknownKind { got } => write!(f, "unknown model kind '{got}'"),
            ArtifactErr::WeightBlockMismatch { got, expected } => write!(
                f,
                "weight block is {got} bytes, header declares {expected}"
            ),
        }
    }
}

impl Error for ArtifactErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ArtifactErr::Io(e) => Some(e),
            ArtifactErr::BadHeader(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ArtifactErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
