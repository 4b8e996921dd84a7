// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Spam Feature Extraction
//!
//! Turns raw email text into fixed, numeric feature records for spam
//! classification, and walks labeled spam/ham corpora to build a feature
//! table.
//!
//! # Features
//!
//! - Uppercase ratio, character count and hyperlink count on the raw text
//! - Stop-word filtered, stemmed word count
//! - Suspicious-word lexicon hits
//! - Time of day from the `Date` header, parsed leniently
//! - Corpus scanning that skips unreadable files instead of failing
//! - CSV output with strict batch validation
//!
//! # Example
//!
//! ```rust
//! use spam_features::{ExtractorConfig, FeatureExtractor, Label};
//!
//! let extractor = FeatureExtractor::new(&ExtractorConfig::default()).unwrap();
//! let raw = "Date: Tue, 1 Jan 2020 13:45:00 +0000\n\nClaim your FREE money at http://example.com";
//! let record = extractor.extract(raw, Label::Spam);
//!
//! assert_eq!(record.is_spam, 1);
//! assert_eq!(record.num_hyperlinks, 1);
//! assert_eq!(record.sent_time.as_deref(), Some("13:45"));
//! ```

mod config;
pub mod date;
mod error;
mod extractor;
pub mod nlp;
mod scanner;
mod sink;
mod source;
mod types;

pub use config::{CONFIG_ENV, Config, ExtractorConfig};
pub use error::{FeatureError, Result};
pub use extractor::FeatureExtractor;
pub use nlp::{Lexicon, PorterStemmer, Stemmer, StopWords, Tokenizer, TreebankTokenizer};
pub use scanner::{CorpusScanner, ScanReport, SkippedFile};
pub use sink::{CsvSink, RecordSink, read_csv};
pub use source::{DirectorySource, EmailSource, RawEmail, decode_text};
pub use types::*;
