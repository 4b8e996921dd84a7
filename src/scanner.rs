//! Batch extraction over labeled corpora

use crate::error::{FeatureError, Result};
use crate::extractor::FeatureExtractor;
use crate::source::{EmailSource, RawEmail, decode_text};
use crate::types::{FeatureRecord, Label};
use serde::Serialize;
use std::ffi::OsStr;
use tracing::{info, warn};

/// An entry that could not be read and was left out of the batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Outcome of a scan
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Spam records first, then ham, each in listing order
    pub records: Vec<FeatureRecord>,
    pub skipped: Vec<SkippedFile>,
}

impl ScanReport {
    #[must_use]
    pub fn spam_count(&self) -> usize {
        self.count(Label::Spam)
    }

    #[must_use]
    pub fn ham_count(&self) -> usize {
        self.count(Label::Ham)
    }

    fn count(&self, label: Label) -> usize {
        self.records
            .iter()
            .filter(|r| r.label() == Some(label))
            .count()
    }
}

/// Walks a spam and a ham source and extracts one record per email
#[derive(Debug, Clone)]
pub struct CorpusScanner {
    extractor: FeatureExtractor,
}

impl CorpusScanner {
    #[must_use]
    pub const fn new(extractor: FeatureExtractor) -> Self {
        Self { extractor }
    }

    #[must_use]
    pub const fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// Scan spam first, then ham
    ///
    /// Unreadable entries are reported in [`ScanReport::skipped`]; only a
    /// source that cannot be listed at all fails the scan.
    pub fn scan(&self, spam: &dyn EmailSource, ham: &dyn EmailSource) -> Result<ScanReport> {
        let mut report = ScanReport::default();
        for source in [spam, ham] {
            self.scan_source(source, &mut report)?;
        }
        Ok(report)
    }

    fn scan_source(&self, source: &dyn EmailSource, report: &mut ScanReport) -> Result<()> {
        let entries = source.list()?;
        let listed = entries.len();
        let before = report.records.len();

        let records = entries
            .into_iter()
            .filter_map(|entry| {
                entry
                    .map_err(|e| unlisted(source, &e))
                    .and_then(|name| load(source, &name))
                    .map_err(|skipped| {
                        warn!(path = %skipped.path, reason = %skipped.reason, "Skipping unreadable email");
                        report.skipped.push(skipped);
                    })
                    .ok()
            })
            .map(|email| self.extractor.extract(&email.text, email.label))
            .collect::<Vec<_>>();
        report.records.extend(records);

        info!(
            source = %source.describe(),
            label = %source.label(),
            extracted = report.records.len() - before,
            listed,
            "Scanned corpus"
        );
        Ok(())
    }
}

/// Read and decode one entry of a source
fn load(source: &dyn EmailSource, name: &OsStr) -> std::result::Result<RawEmail, SkippedFile> {
    source
        .read(name)
        .map(|bytes| RawEmail {
            name: name.to_os_string(),
            text: decode_text(&bytes),
            label: source.label(),
        })
        .map_err(|e| SkippedFile {
            path: format!("{}/{}", source.describe(), name.to_string_lossy()),
            reason: e.to_string(),
        })
}

/// Report for an entry that failed during listing and has no usable name
fn unlisted(source: &dyn EmailSource, error: &FeatureError) -> SkippedFile {
    SkippedFile {
        path: source.describe(),
        reason: error.to_string(),
    }
}
