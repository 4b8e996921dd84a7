//! Per-email feature extraction

use crate::config::ExtractorConfig;
use crate::date;
use crate::error::Result;
use crate::nlp::{Lexicon, PorterStemmer, Stemmer, StopWords, Tokenizer, TreebankTokenizer};
use crate::types::{FeatureRecord, Label};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Turns raw email text into a [`FeatureRecord`]
///
/// Holds only read-only capabilities, so it can be shared across threads
/// and reused for any number of emails.
#[derive(Clone)]
pub struct FeatureExtractor {
    tokenizer: Arc<dyn Tokenizer>,
    stemmer: Arc<dyn Stemmer>,
    stop_words: Arc<StopWords>,
    lexicon: Arc<Lexicon>,
}

impl FeatureExtractor {
    /// Build the default capabilities from configuration
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let mut stop_words = StopWords::for_language(&config.stop_word_language)?;
        stop_words.extend(&config.extra_stop_words);

        Ok(Self::with_capabilities(
            Arc::new(TreebankTokenizer),
            Arc::new(PorterStemmer::new()),
            stop_words,
            Lexicon::new(&config.suspicious_words),
        ))
    }

    /// Inject custom capabilities
    pub fn with_capabilities(
        tokenizer: Arc<dyn Tokenizer>,
        stemmer: Arc<dyn Stemmer>,
        stop_words: StopWords,
        lexicon: Lexicon,
    ) -> Self {
        Self {
            tokenizer,
            stemmer,
            stop_words: Arc::new(stop_words),
            lexicon: Arc::new(lexicon),
        }
    }

    /// Extract all features of one email
    #[must_use]
    pub fn extract(&self, text: &str, label: Label) -> FeatureRecord {
        let (num_words, num_suspicious_words) = self.token_features(text);
        let raw = RawTextFeatures::measure(text);
        let sent_time = date::sent_time(text);

        debug!(
            %label,
            num_chars = raw.num_chars,
            num_words,
            sent_time = sent_time.as_deref().unwrap_or("-"),
            "Extracted features"
        );

        FeatureRecord {
            is_spam: label.as_flag(),
            percent_uppercase: raw.percent_uppercase(),
            num_words,
            num_chars: raw.num_chars,
            num_hyperlinks: raw.num_hyperlinks,
            num_suspicious_words,
            sent_time,
        }
    }

    /// Word count and lexicon hits over the normalized token stream
    fn token_features(&self, text: &str) -> (usize, usize) {
        let lowered = text.to_lowercase();
        let tokens: Vec<String> = self
            .tokenizer
            .tokenize(&lowered)
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect();

        // Lexicon matching runs before stemming, on surface forms
        let num_suspicious_words = self.lexicon.count_matches(&tokens);

        let stemmed: Vec<String> = tokens.iter().map(|t| self.stemmer.stem(t)).collect();

        (stemmed.len(), num_suspicious_words)
    }
}

impl fmt::Debug for FeatureExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureExtractor")
            .field("stop_words", &self.stop_words.len())
            .field("lexicon", &self.lexicon.len())
            .finish_non_exhaustive()
    }
}

/// Metrics computed on the original, unnormalized text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawTextFeatures {
    num_chars: usize,
    num_uppercase: usize,
    num_hyperlinks: usize,
}

impl RawTextFeatures {
    fn measure(text: &str) -> Self {
        let (num_chars, num_uppercase) = text.chars().fold((0, 0), |(all, upper), c| {
            (all + 1, upper + usize::from(c.is_uppercase()))
        });

        Self {
            num_chars,
            num_uppercase,
            num_hyperlinks: text.matches("http").count(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn percent_uppercase(self) -> f64 {
        if self.num_chars == 0 {
            0.0
        } else {
            self.num_uppercase as f64 / self.num_chars as f64
        }
    }
}
