use serde::Deserialize;
use serde_json::Value;

/// One element of the top-level export array.
///
/// Every field is optional in the wild; absence turns into per-profile
/// defaults during extraction rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    /// Full object name of the exported entry.
    #[serde(default)]
    pub key: Option<String>,

    /// JSON-encoded value payload.
    #[serde(default)]
    pub value: Option<String>,

    /// UNIX timestamp; seen both as a number and as a string.
    #[serde(default)]
    pub timestamp: Option<Value>,
}

/// Output profile selecting the column set and the defaults for absent fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Fixed columns only; absent text becomes "N/A", absent corrections 0.
    Standard,
    /// Adds numbered characteristic column groups; absent fields become
    /// empty strings and embedded line breaks are scrubbed from every cell.
    Characteristics,
}

impl Profile {
    /// Default for a text field absent at any nesting level.
    pub fn missing_text(self) -> &'static str {
        match self {
            Profile::Standard => "N/A",
            Profile::Characteristics => "",
        }
    }

    /// Default for the correction column when absent or uncoercible.
    pub fn missing_correction(self) -> &'static str {
        match self {
            Profile::Standard => "0",
            Profile::Characteristics => "",
        }
    }

    /// Whether characteristic column groups are emitted.
    pub fn expands_characteristics(self) -> bool {
        matches!(self, Profile::Characteristics)
    }
}

/// Fixed output columns, in serialization order.
pub const FIXED_COLUMNS: [&str; 12] = [
    "date",
    "FullName",
    "Type",
    "name",
    "revision",
    "maturite",
    "projet",
    "ads",
    "libelle",
    "IND",
    "BIB_Correction",
    "BIB_Confidentiality",
];

/// One characteristic expanded into its three columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacteristicCols {
    pub id: String,
    pub identifier: String,
    pub category: String,
}

/// One fully flattened output record.
///
/// The fixed fields mirror `FIXED_COLUMNS` one-to-one; characteristic
/// groups are carried as extracted and padded to the schema width only at
/// write time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRow {
    pub date: String,
    pub full_name: String,
    pub doc_type: String,
    pub name: String,
    pub revision: String,
    pub maturity: String,
    pub project: String,
    pub ads_name: String,
    pub label: String,
    pub ind_name: String,
    pub correction: String,
    pub confidentiality: String,
    /// Characteristic column groups, in input order.
    pub characteristics: Vec<CharacteristicCols>,
}

impl FlatRow {
    /// The fixed column values, in `FIXED_COLUMNS` order.
    pub fn fixed_values(&self) -> [&str; 12] {
        [
            &self.date,
            &self.full_name,
            &self.doc_type,
            &self.name,
            &self.revision,
            &self.maturity,
            &self.project,
            &self.ads_name,
            &self.label,
            &self.ind_name,
            &self.correction,
            &self.confidentiality,
        ]
    }

    /// Mutable references to every text cell, fixed columns first.
    pub fn cells_mut(&mut self) -> Vec<&mut String> {
        let mut cells = vec![
            &mut self.date,
            &mut self.full_name,
            &mut self.doc_type,
            &mut self.name,
            &mut self.revision,
            &mut self.maturity,
            &mut self.project,
            &mut self.ads_name,
            &mut self.label,
            &mut self.ind_name,
            &mut self.correction,
            &mut self.confidentiality,
        ];
        for group in &mut self.characteristics {
            cells.push(&mut group.id);
            cells.push(&mut group.identifier);
            cells.push(&mut group.category);
        }
        cells
    }
}

/// Extractor output: the rows plus the widest characteristic list seen.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Flattened rows, in input order.
    pub rows: Vec<FlatRow>,
    /// Maximum characteristics length across all rows; sizes the header.
    pub width: usize,
}
