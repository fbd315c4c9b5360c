//! Plain-text table rendering for the result set.
//!
//! Column widths are computed from display width, not byte length, so
//! titles with non-ASCII characters stay aligned.

use pkscout_core::types::ArticleRecord;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 7] = [
    "Score", "Model type", "Population", "Date", "Journal", "Title", "Link",
];
const MAX_TITLE_WIDTH: usize = 60;

fn row(record: &ArticleRecord) -> Vec<String> {
    vec![
        record.relevance_score.to_string(),
        record.model_type.as_label().to_string(),
        record.population.as_label().to_string(),
        record.pub_date.clone(),
        record.journal.clone(),
        truncate_to_width(&record.title, MAX_TITLE_WIDTH),
        record.link.clone(),
    ]
}

fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        if out.width() + c.to_string().width() >= max {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(padding))
}

/// Render records as an aligned plain-text table with a header row.
pub fn render_table(records: &[ArticleRecord]) -> String {
    let rows: Vec<Vec<String>> = records.iter().map(row).collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS
        .iter()
        .enumerate()
        .map(|(i, h)| pad(h, widths[i]))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    out.push('\n');
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| pad(cell, widths[i]))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}
