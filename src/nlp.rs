//! Tokenization, stop words, stemming and the suspicious-word lexicon
//!
//! Every capability here is built once and then only read, so a single
//! instance can be shared by any number of extraction workers.

use crate::error::{FeatureError, Result};
use regex::Regex;
use rustc_hash::FxHashSet;
use std::fmt;
use stop_words::LANGUAGE;

/// Splits text into an ordered sequence of tokens
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Reduces a token to its root form
pub trait Stemmer: Send + Sync {
    fn stem(&self, token: &str) -> String;
}

// Contractions are split off their host word before tokenizing:
// "don't" -> "do n't", "it's" -> "it 's"
static CONTRACTION_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(\w)(n't|'(?:s|m|d|ll|re|ve))\b").unwrap()
});

static TOKEN_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"n't|'(?:s|m|d|ll|re|ve)\b|\w+(?:[-.']\w+)*|\.\.\.|[^\w\s]").unwrap()
});

/// Word-boundary tokenizer in the style of the Penn Treebank conventions
///
/// Words keep inner hyphens, periods and apostrophes (`e-mail`, `e.g`),
/// English contractions become two tokens, and each remaining punctuation
/// character is a token of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreebankTokenizer;

impl Tokenizer for TreebankTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let split = CONTRACTION_REGEX.replace_all(text, "$1 $2");
        TOKEN_REGEX
            .find_iter(&split)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Porter-family English stemmer backed by `rust-stemmers`
pub struct PorterStemmer {
    inner: rust_stemmers::Stemmer,
}

impl PorterStemmer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(rust_stemmers::Algorithm::English),
        }
    }
}

impl Default for PorterStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PorterStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PorterStemmer").finish_non_exhaustive()
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, token: &str) -> String {
        self.inner.stem(token).into_owned()
    }
}

/// The classic 179-word English stop-word list
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Set of lower-cased stop words
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: FxHashSet<String>,
}

impl StopWords {
    /// The default English set
    #[must_use]
    pub fn english() -> Self {
        Self::from_list(ENGLISH_STOP_WORDS)
    }

    /// Stop words for a language name or code
    ///
    /// `en`/`english` is the classic short list; `en-iso` and the other
    /// languages come from the `stop-words` collection.
    pub fn for_language(language: &str) -> Result<Self> {
        let lang = match language.to_lowercase().as_str() {
            "en" | "english" => return Ok(Self::english()),
            "en-iso" | "english-iso" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            "no" | "norwegian" => LANGUAGE::Norwegian,
            "da" | "danish" => LANGUAGE::Danish,
            "fi" | "finnish" => LANGUAGE::Finnish,
            other => {
                return Err(FeatureError::Config(format!(
                    "unsupported stop-word language: {other}"
                )));
            }
        };

        Ok(Self {
            words: stop_words::get(lang)
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
        })
    }

    #[must_use]
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Add more words to the set
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    /// Membership test; tokens are expected to be lower-cased already
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Spam-indicative words and phrases
pub const DEFAULT_SUSPICIOUS_WORDS: &[&str] = &[
    "money",
    "free",
    "ad",
    "advertisement",
    "investment",
    "invest",
    "urgent",
    "deal",
    "loan",
    "click",
    "subscribe",
    "unsubscribe",
    "bank",
    "account",
    "password",
    "credit",
    "card",
    "congratulations",
    "limited time",
    "act now",
    "exclusive",
    "guaranteed",
    "cash",
    "viagra",
    "discount",
    "secret",
    "weight loss",
];

/// Fixed lexicon matched token by token
///
/// Matching is exact and case-insensitive. Multi-word entries stay in the
/// lexicon but a single token never equals them.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: FxHashSet<String>,
}

impl Lexicon {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        if token.chars().any(char::is_uppercase) {
            self.entries.contains(&token.to_lowercase())
        } else {
            self.entries.contains(token)
        }
    }

    /// Count how many tokens match the lexicon
    #[must_use]
    pub fn count_matches<S: AsRef<str>>(&self, tokens: &[S]) -> usize {
        tokens.iter().filter(|t| self.matches(t.as_ref())).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(DEFAULT_SUSPICIOUS_WORDS)
    }
}
