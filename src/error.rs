use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a run that completed but extracted zero records.
pub const EXIT_NO_DATA: u8 = 4;

/// Everything that can end a conversion run early.
///
/// Each variant maps to a documented process exit code so calling scripts
/// can tell the failure modes apart: 2 missing input, 3 read/decode
/// failure, 5 output write failure (0 is success, 4 the no-data outcome).
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input path does not name an existing file.
    #[error("input file does not exist: {}", .0.display())]
    MissingInput(PathBuf),

    /// The input file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The top-level export is not a valid JSON record array.
    #[error("failed to decode export {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// One record's embedded value payload is not valid JSON.
    #[error("record {index}: value payload is not valid JSON: {source}")]
    RecordPayload {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The output table could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ConvertError {
    /// Documented process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::MissingInput(_) => 2,
            ConvertError::Read { .. }
            | ConvertError::Decode { .. }
            | ConvertError::RecordPayload { .. } => 3,
            ConvertError::Write { .. } => 5,
        }
    }
}
