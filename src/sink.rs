//! Tabular persistence of feature records.
//!
//! Output is RFC 4180 CSV: a header row taken from the first record's
//! columns, then one row per record.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{FeatureError, Result};
use crate::types::{Cell, FEATURE_COLUMNS, FeatureRecord, TabularRecord};

/// Destination for a complete batch of records.
pub trait RecordSink {
    /// Write the whole batch; empty or mixed-shape batches are rejected
    /// before anything is written.
    fn write<R: TabularRecord>(&mut self, records: &[R]) -> Result<()>;
}

/// Writes records to a CSV file.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvSink {
    fn write<R: TabularRecord>(&mut self, records: &[R]) -> Result<()> {
        let (columns, rows) = layout(records)?;

        let file = std::fs::File::create(&self.path).map_err(|e| FeatureError::io(&self.path, e))?;
        let mut out = BufWriter::new(file);

        let header = columns
            .iter()
            .map(|c| csv_escape(c))
            .collect::<Vec<_>>()
            .join(",");
        let mut write_line = |line: &str| -> std::io::Result<()> {
            out.write_all(line.as_bytes())?;
            out.write_all(b"\r\n")
        };

        write_line(&header).map_err(|e| FeatureError::io(&self.path, e))?;
        for row in &rows {
            let line = row
                .iter()
                .map(|cell| csv_escape(&cell.to_string()))
                .collect::<Vec<_>>()
                .join(",");
            write_line(&line).map_err(|e| FeatureError::io(&self.path, e))?;
        }
        out.flush().map_err(|e| FeatureError::io(&self.path, e))?;

        info!(path = %self.path.display(), rows = rows.len(), "Wrote feature table");
        Ok(())
    }
}

/// Validate a batch and split it into a header and value rows.
fn layout<R: TabularRecord>(records: &[R]) -> Result<(Vec<&'static str>, Vec<Vec<Cell>>)> {
    let first = records.first().ok_or(FeatureError::EmptyBatch)?;
    let columns: Vec<&'static str> = first.row().iter().map(|(name, _)| *name).collect();

    let mut rows = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let (names, cells): (Vec<&'static str>, Vec<Cell>) = record.row().into_iter().unzip();
        if names != columns {
            return Err(FeatureError::HeterogeneousRecords {
                index,
                expected: columns,
                found: names,
            });
        }
        rows.push(cells);
    }

    Ok((columns, rows))
}

/// Escape a value for CSV (RFC 4180).
///
/// Wraps in double quotes if the value contains commas, quotes, or newlines.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Read a feature table written by [`CsvSink`].
pub fn read_csv(path: &Path) -> Result<Vec<FeatureRecord>> {
    let text = std::fs::read_to_string(path).map_err(|e| FeatureError::io(path, e))?;
    let mut rows = split_rows(&text)?.into_iter();

    let (_, header) = rows.next().ok_or(FeatureError::Csv {
        line: 1,
        reason: "missing header row".into(),
    })?;
    if header.iter().map(String::as_str).ne(FEATURE_COLUMNS) {
        return Err(FeatureError::Csv {
            line: 1,
            reason: format!("unexpected header {header:?}"),
        });
    }

    rows.map(|(line, fields)| parse_record(line, &fields))
        .collect()
}

fn parse_record(line: usize, fields: &[String]) -> Result<FeatureRecord> {
    let bad = |reason: String| FeatureError::Csv { line, reason };

    let [
        is_spam,
        percent_uppercase,
        num_words,
        num_chars,
        num_hyperlinks,
        num_suspicious_words,
        sent_time,
    ] = fields
    else {
        return Err(bad(format!("expected 7 fields, found {}", fields.len())));
    };

    let int = |name: &str, value: &str| {
        value
            .parse::<usize>()
            .map_err(|e| bad(format!("{name}: {e}")))
    };

    Ok(FeatureRecord {
        is_spam: is_spam
            .parse()
            .map_err(|e| bad(format!("is_spam: {e}")))?,
        percent_uppercase: percent_uppercase
            .parse()
            .map_err(|e| bad(format!("percent_uppercase: {e}")))?,
        num_words: int("num_words", num_words)?,
        num_chars: int("num_chars", num_chars)?,
        num_hyperlinks: int("num_hyperlinks", num_hyperlinks)?,
        num_suspicious_words: int("num_suspicious_words", num_suspicious_words)?,
        sent_time: (!sent_time.is_empty()).then(|| sent_time.clone()),
    })
}

/// Split CSV text into rows of unescaped fields.
///
/// Each row is paired with the physical line it starts on, which differs
/// from its index once a quoted field spans several lines.
fn split_rows(text: &str) -> Result<Vec<(usize, Vec<String>)>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_start = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => row.push(std::mem::take(&mut field)),
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                row.push(std::mem::take(&mut field));
                rows.push((row_start, std::mem::take(&mut row)));
                line += 1;
                row_start = line;
            }
            _ => {
                if c == '\n' {
                    line += 1;
                }
                field.push(c);
            }
        }
    }

    if in_quotes {
        return Err(FeatureError::Csv {
            line,
            reason: "unterminated quoted field".into(),
        });
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push((row_start, row));
    }

    Ok(rows)
}
