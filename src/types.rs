//! Core types for extracted features

use serde::Serialize;
use std::fmt;

/// Ground-truth label of a corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Spam,
    Ham,
}

impl Label {
    /// Binary encoding used in the output table (spam = 1, ham = 0)
    #[must_use]
    pub const fn as_flag(self) -> u8 {
        match self {
            Self::Spam => 1,
            Self::Ham => 0,
        }
    }

    #[must_use]
    pub const fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            1 => Some(Self::Spam),
            0 => Some(Self::Ham),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spam => write!(f, "spam"),
            Self::Ham => write!(f, "ham"),
        }
    }
}

/// Features extracted from a single email
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    /// Ground-truth label, 1 for spam and 0 for ham
    pub is_spam: u8,

    /// Fraction of characters in the original text that are uppercase
    pub percent_uppercase: f64,

    /// Stemmed tokens remaining after stop-word removal
    pub num_words: usize,

    /// Length of the original text in characters
    pub num_chars: usize,

    /// Occurrences of the literal `http`
    pub num_hyperlinks: usize,

    /// Tokens found in the suspicious-word lexicon
    pub num_suspicious_words: usize,

    /// Time of day from the `Date` header, `HH:MM`
    pub sent_time: Option<String>,
}

impl FeatureRecord {
    #[must_use]
    pub const fn label(&self) -> Option<Label> {
        Label::from_flag(self.is_spam)
    }
}

/// One value in a tabular row
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Int(u64),
    Float(f64),
    Text(String),
    Null,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::Null => Ok(()),
        }
    }
}

/// A record that can be laid out as a row of named columns
pub trait TabularRecord {
    /// Column names and values, in column order
    fn row(&self) -> Vec<(&'static str, Cell)>;
}

/// Column order of the feature table
pub const FEATURE_COLUMNS: [&str; 7] = [
    "is_spam",
    "percent_uppercase",
    "num_words",
    "num_chars",
    "num_hyperlinks",
    "num_suspicious_words",
    "sent_time",
];

impl TabularRecord for FeatureRecord {
    fn row(&self) -> Vec<(&'static str, Cell)> {
        let [
            is_spam,
            percent_uppercase,
            num_words,
            num_chars,
            num_hyperlinks,
            num_suspicious_words,
            sent_time,
        ] = FEATURE_COLUMNS;

        vec![
            (is_spam, Cell::Int(u64::from(self.is_spam))),
            (percent_uppercase, Cell::Float(self.percent_uppercase)),
            (num_words, Cell::Int(self.num_words as u64)),
            (num_chars, Cell::Int(self.num_chars as u64)),
            (num_hyperlinks, Cell::Int(self.num_hyperlinks as u64)),
            (num_suspicious_words, Cell::Int(self.num_suspicious_words as u64)),
            (
                sent_time,
                self.sent_time.clone().map_or(Cell::Null, Cell::Text),
            ),
        ]
    }
}
