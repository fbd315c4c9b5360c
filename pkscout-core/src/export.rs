//! Delimited-text export of classified records.
//!
//! The header row is a stable contract: presentation layers and
//! downstream spreadsheets rely on these exact field names. Quoting
//! follows the RFC 4180 conventions (quote fields containing the
//! delimiter, quotes, or newlines; double embedded quotes). A minimal
//! parser is included so exports can be read back for verification.

use crate::types::ArticleRecord;

/// Export field names, emitted verbatim as the header row.
pub const EXPORT_FIELDS: [&str; 11] = [
    "Title",
    "PublicationDate",
    "Link",
    "Journal",
    "Summary",
    "ModelType",
    "Population",
    "RelevanceScore",
    "HasPkModel",
    "HasEstimatedParameters",
    "HasDistributionVolume",
];

/// Render one record as export field values, in `EXPORT_FIELDS` order.
pub fn record_row(record: &ArticleRecord) -> Vec<String> {
    vec![
        record.title.clone(),
        record.pub_date.clone(),
        record.link.clone(),
        record.journal.clone(),
        record.summary.clone(),
        record.model_type.as_label().to_string(),
        record.population.as_label().to_string(),
        record.relevance_score.to_string(),
        record.has_pk_model.to_string(),
        record.has_estimated_parameters.to_string(),
        record.has_distribution_volume.to_string(),
    ]
}

fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Serialize records to CSV with the stable header row.
pub fn to_csv(records: &[ArticleRecord]) -> String {
    let mut out = String::new();
    out.push_str(&EXPORT_FIELDS.join(","));
    out.push('\n');
    for record in records {
        let row: Vec<String> = record_row(record).iter().map(|f| escape_field(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Parse CSV text back into rows of field values, header included.
///
/// Handles quoted fields with doubled quotes and embedded newlines. Not
/// a general CSV reader; it exists to verify round-trips of our own
/// exports.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => row.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                _ => field.push(c),
            }
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}
