//! # exportflat - flatten key/value export dumps into CSV
//!
//! A one-shot batch converter for semi-structured export files: a JSON
//! array of records, each pairing a `key`, a `timestamp`, and a
//! JSON-encoded `value` payload, is flattened into a single CSV table
//! written next to the input file.
//!
//! ## Modules
//!
//! - **types**: raw records, flattened rows, and the output `Profile`
//! - **extractor**: record flattening and the schema-width computation
//! - **writer**: header unification, row padding, CSV serialization
//! - **error**: the failure taxonomy with documented exit codes
//!
//! ## Quick Start
//!
//! ```rust
//! use exportflat::{Profile, RawRecord, RecordExtractor};
//! use serde_json::json;
//!
//! let records: Vec<RawRecord> = serde_json::from_value(json!([
//!     {"key": "A-100", "value": r#"{"type":"doc"}"#, "timestamp": 0}
//! ]))
//! .unwrap();
//!
//! let extraction = RecordExtractor::new(Profile::Standard)
//!     .extract(&records)
//!     .unwrap();
//!
//! assert_eq!(extraction.rows[0].full_name, "A-100");
//! assert_eq!(extraction.rows[0].doc_type, "doc");
//! ```

use std::fs;
use std::path::{Path, PathBuf};

pub mod error;
pub mod extractor;
pub mod types;
pub mod writer;

// Re-export commonly used types for convenience
pub use error::{ConvertError, EXIT_NO_DATA};
pub use extractor::{timestamp_to_display, RecordExtractor};
pub use types::{CharacteristicCols, Extraction, FlatRow, Profile, RawRecord, FIXED_COLUMNS};
pub use writer::{output_path_for, CsvTableWriter};

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The table was written to this path.
    Written(PathBuf),
    /// The input held no records; nothing was written.
    NoData,
}

/// Main entry point: read the export at `input`, flatten every record, and
/// write the CSV table next to it.
///
/// The whole input is decoded in one pass before anything is written; an
/// empty record array produces [`Outcome::NoData`] and no output file.
pub fn convert_file(input: &Path, profile: Profile) -> Result<Outcome, ConvertError> {
    if !input.is_file() {
        return Err(ConvertError::MissingInput(input.to_path_buf()));
    }

    let text = fs::read_to_string(input).map_err(|source| ConvertError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let records: Vec<RawRecord> =
        serde_json::from_str(&text).map_err(|source| ConvertError::Decode {
            path: input.to_path_buf(),
            source,
        })?;

    let extraction = RecordExtractor::new(profile).extract(&records)?;
    if extraction.rows.is_empty() {
        return Ok(Outcome::NoData);
    }

    let path = writer::write_table_file(input, &extraction)?;
    Ok(Outcome::Written(path))
}
