use crate::error::ConvertError;
use crate::types::{CharacteristicCols, Extraction, FlatRow, Profile, RawRecord};
use chrono::{Local, LocalResult, TimeZone};
use serde_json::Value;

/// Sentinel for a timestamp that cannot be decoded.
const NOT_AVAILABLE: &str = "N/A";

/// Flattens raw export records into tabular rows.
pub struct RecordExtractor {
    profile: Profile,
}

impl RecordExtractor {
    pub fn new(profile: Profile) -> Self {
        RecordExtractor { profile }
    }

    /// Flatten every record, in input order.
    ///
    /// Produces exactly one row per record. A record whose `value` payload
    /// is not valid JSON fails the whole run; field-level oddities inside a
    /// well-formed payload only degrade that field to its default.
    pub fn extract(&self, records: &[RawRecord]) -> Result<Extraction, ConvertError> {
        let mut out = Extraction::default();
        for (index, record) in records.iter().enumerate() {
            let row = self
                .flatten(record)
                .map_err(|source| ConvertError::RecordPayload { index, source })?;
            out.width = out.width.max(row.characteristics.len());
            out.rows.push(row);
        }
        Ok(out)
    }

    fn flatten(&self, record: &RawRecord) -> Result<FlatRow, serde_json::Error> {
        // A missing payload reads as an empty document, not an error.
        let doc: Value = match record.value.as_deref() {
            Some(raw) => serde_json::from_str(raw)?,
            None => Value::Object(Default::default()),
        };

        let missing = self.profile.missing_text();
        let attributes = list_field(&doc, "attributes");

        let mut row = FlatRow {
            date: timestamp_to_display(record.timestamp.as_ref()),
            full_name: record
                .key
                .clone()
                .unwrap_or_else(|| missing.to_string()),
            doc_type: text_field(&doc, "type", missing),
            name: text_field(&doc, "name", missing),
            revision: text_field(&doc, "revision", missing),
            maturity: attribute_text(attributes, "current", missing),
            project: attribute_text(attributes, "project", missing),
            ads_name: nested_text(&doc, "ads", "name", missing),
            label: text_field(&doc, "label", missing),
            ind_name: nested_text(&doc, "ind", "name", missing),
            correction: attribute_int(
                attributes,
                "BIB_Correction",
                self.profile.missing_correction(),
            ),
            confidentiality: attribute_text(attributes, "BIB_Confidentiality", missing),
            characteristics: Vec::new(),
        };

        if self.profile.expands_characteristics() {
            for characteristic in list_field(&doc, "characteristics") {
                row.characteristics.push(CharacteristicCols {
                    id: text_field(characteristic, "characteristicId", ""),
                    identifier: text_field(characteristic, "identifier", ""),
                    category: text_field(characteristic, "characteristicCategory", ""),
                });
            }
            // Rows must never carry raw line breaks into the table.
            for cell in row.cells_mut() {
                scrub_newlines(cell);
            }
        }

        Ok(row)
    }
}

/// Format a UNIX timestamp (seconds, string or number) as a local date-time.
///
/// Cannot fail: anything that does not decode to a representable instant
/// yields the "N/A" sentinel instead.
pub fn timestamp_to_display(raw: Option<&Value>) -> String {
    let seconds = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let Some(seconds) = seconds.filter(|s| s.is_finite()) else {
        return NOT_AVAILABLE.to_string();
    };

    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9) as u32;
    match Local.timestamp_opt(whole as i64, nanos) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
            dt.format("%Y-%m-%d %H:%M:%S").to_string()
        }
        LocalResult::None => NOT_AVAILABLE.to_string(),
    }
}

/// Render a JSON scalar as cell text; null comes out empty, and the odd
/// non-scalar falls back to its compact JSON form.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Text at `key`, or `default` when the key is absent.
fn text_field(doc: &Value, key: &str, default: &str) -> String {
    match doc.get(key) {
        Some(value) => scalar_text(value),
        None => default.to_string(),
    }
}

/// Text at `outer.inner`, defaulting when either level is absent or not an
/// object.
fn nested_text(doc: &Value, outer: &str, inner: &str, default: &str) -> String {
    match doc.get(outer).and_then(|v| v.get(inner)) {
        Some(value) => scalar_text(value),
        None => default.to_string(),
    }
}

/// The array at `key`, or an empty slice when absent or not an array.
fn list_field<'a>(doc: &'a Value, key: &str) -> &'a [Value] {
    doc.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// First element of `Value` on the first attribute whose `name` matches.
///
/// Linear scan so an earlier duplicate wins over a later one; a match
/// without a usable first element is treated as absent.
fn attribute_value<'a>(attributes: &'a [Value], name: &str) -> Option<&'a Value> {
    attributes
        .iter()
        .find(|attr| attr.get("name").and_then(Value::as_str) == Some(name))
        .and_then(|attr| attr.get("Value"))
        .and_then(|values| values.get(0))
}

fn attribute_text(attributes: &[Value], name: &str, default: &str) -> String {
    match attribute_value(attributes, name) {
        Some(value) => scalar_text(value),
        None => default.to_string(),
    }
}

/// Integer-coerced attribute. A value that does not parse as an integer
/// degrades to `default` for this field only; it never fails the record.
fn attribute_int(attributes: &[Value], name: &str, default: &str) -> String {
    let Some(value) = attribute_value(attributes, name) else {
        return default.to_string();
    };
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) => n.to_string(),
        None => default.to_string(),
    }
}

/// Replace embedded line breaks with single spaces.
fn scrub_newlines(text: &mut String) {
    if text.contains(['\n', '\r']) {
        *text = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
    }
}
