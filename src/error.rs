use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Everything that can go wrong while deriving feature files or checking
/// generated output against a reference.
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("not found: {path:?}")]
    NotFound { path: PathBuf },

    #[error("{path:?} has no usable line")]
    EmptyInput { path: PathBuf },

    #[error("intersection is empty as {path:?} has nothing in common with other files")]
    EmptyIntersection { path: PathBuf },

    #[error("common feature is missing from {path:?}: {line}")]
    MissingBaselineFeature { line: String, path: PathBuf },

    #[error("got {:?}, want {:?} at {offset}", shown(.actual), shown(.expected))]
    PositionMismatch {
        offset: u64,
        expected: u8,
        actual: u8,
    },

    #[error("got content is too long by {excess} bytes")]
    CandidateTooLong { excess: u64 },

    #[error("got content is too short, {missing} bytes are missing")]
    CandidateTooShort { missing: u64 },

    #[error("invalid glob pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FixtureError {
    /// Wraps an I/O error, promoting a missing file to `NotFound`.
    pub fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for the three outcomes of a completed comparison that found a difference.
    pub fn is_divergence(&self) -> bool {
        matches!(
            self,
            Self::PositionMismatch { .. }
                | Self::CandidateTooLong { .. }
                | Self::CandidateTooShort { .. }
        )
    }
}

fn shown(byte: &u8) -> char {
    char::from(*byte)
}

pub type Result<T> = std::result::Result<T, FixtureError>;
