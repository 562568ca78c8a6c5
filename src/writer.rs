use crate::error::ConvertError;
use crate::types::{Extraction, FlatRow, FIXED_COLUMNS};
use csv::Writer;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes flattened rows as a CSV table with a width-sized header.
pub struct CsvTableWriter<W: Write> {
    inner: Writer<W>,
}

impl CsvTableWriter<std::fs::File> {
    /// Open (or truncate) the table file at `path`.
    pub fn from_path(path: &Path) -> csv::Result<Self> {
        Ok(CsvTableWriter {
            inner: Writer::from_path(path)?,
        })
    }
}

impl<W: Write> CsvTableWriter<W> {
    pub fn new(sink: W) -> Self {
        CsvTableWriter {
            inner: Writer::from_writer(sink),
        }
    }

    /// Write the header and every row.
    ///
    /// Characteristic groups a row is missing relative to the schema width
    /// are backfilled with empty cells, so every physical row matches the
    /// header exactly.
    pub fn write_table(&mut self, extraction: &Extraction) -> csv::Result<()> {
        self.inner.write_record(header(extraction.width))?;
        for row in &extraction.rows {
            self.inner.write_record(row_cells(row, extraction.width))?;
        }
        self.inner.flush()?;
        Ok(())
    }
}

/// Header columns: the fixed set, then `width` characteristic groups of
/// three, ascending.
pub fn header(width: usize) -> Vec<String> {
    let mut columns: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
    for i in 1..=width {
        columns.push(format!("characteristic_{i}_id"));
        columns.push(format!("characteristic_{i}_identifier"));
        columns.push(format!("characteristic_{i}_category"));
    }
    columns
}

fn row_cells(row: &FlatRow, width: usize) -> Vec<&str> {
    let mut cells: Vec<&str> = row.fixed_values().to_vec();
    for i in 0..width {
        match row.characteristics.get(i) {
            Some(group) => {
                cells.push(&group.id);
                cells.push(&group.identifier);
                cells.push(&group.category);
            }
            None => cells.extend(["", "", ""]),
        }
    }
    cells
}

/// Output lands next to the input, with the extension swapped for `csv`.
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension("csv")
}

/// Write the table next to `input`, overwriting any previous export there.
/// Returns the output path.
pub fn write_table_file(input: &Path, extraction: &Extraction) -> Result<PathBuf, ConvertError> {
    let path = output_path_for(input);
    let mut writer = CsvTableWriter::from_path(&path).map_err(|source| ConvertError::Write {
        path: path.clone(),
        source,
    })?;
    writer
        .write_table(extraction)
        .map_err(|source| ConvertError::Write {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CharacteristicCols;

    fn sample_row(name: &str, characteristics: Vec<CharacteristicCols>) -> FlatRow {
        FlatRow {
            date: "N/A".to_string(),
            full_name: name.to_string(),
            characteristics,
            ..FlatRow::default()
        }
    }

    fn written(extraction: &Extraction) -> String {
        let mut buffer = Vec::new();
        CsvTableWriter::new(&mut buffer)
            .write_table(extraction)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_sized_by_width() {
        assert_eq!(header(0).len(), FIXED_COLUMNS.len());

        let wide = header(2);
        assert_eq!(wide.len(), FIXED_COLUMNS.len() + 6);
        assert_eq!(wide[0], "date");
        assert_eq!(wide[FIXED_COLUMNS.len()], "characteristic_1_id");
        assert_eq!(wide[FIXED_COLUMNS.len() + 3], "characteristic_2_id");
        assert_eq!(*wide.last().unwrap(), "characteristic_2_category");
    }

    #[test]
    fn test_rows_padded_to_width() {
        let extraction = Extraction {
            rows: vec![
                sample_row(
                    "A",
                    vec![
                        CharacteristicCols {
                            id: "C1".to_string(),
                            identifier: "I1".to_string(),
                            category: "geom".to_string(),
                        },
                        CharacteristicCols {
                            id: "C2".to_string(),
                            identifier: "I2".to_string(),
                            category: "mass".to_string(),
                        },
                    ],
                ),
                sample_row("B", Vec::new()),
            ],
            width: 2,
        };

        let text = written(&extraction);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);

        let expected_cols = FIXED_COLUMNS.len() + 6;
        for line in &lines {
            assert_eq!(line.split(',').count(), expected_cols);
        }
        assert!(lines[1].ends_with("C1,I1,geom,C2,I2,mass"));
        assert!(lines[2].ends_with(",,,,,"));
    }

    #[test]
    fn test_cells_with_delimiters_are_quoted() {
        let extraction = Extraction {
            rows: vec![sample_row("a,b", Vec::new())],
            width: 0,
        };

        let text = written(&extraction);
        assert!(text.contains("\"a,b\""));
    }

    #[test]
    fn test_output_path_swaps_extension() {
        assert_eq!(
            output_path_for(Path::new("/tmp/dump.json")),
            PathBuf::from("/tmp/dump.csv")
        );
        assert_eq!(
            output_path_for(Path::new("dump")),
            PathBuf::from("dump.csv")
        );
    }
}
