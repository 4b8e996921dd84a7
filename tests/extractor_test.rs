use spam_features::*;
use std::sync::Arc;

fn extractor() -> FeatureExtractor {
    FeatureExtractor::new(&ExtractorConfig::default()).unwrap()
}

// --- Raw-text metrics ---

#[test]
fn test_empty_text() {
    let record = extractor().extract("", Label::Ham);

    assert_eq!(record.is_spam, 0);
    assert_eq!(record.num_chars, 0);
    assert_eq!(record.percent_uppercase, 0.0);
    assert_eq!(record.num_words, 0);
    assert_eq!(record.num_hyperlinks, 0);
    assert_eq!(record.num_suspicious_words, 0);
    assert!(record.sent_time.is_none());
}

#[test]
fn test_hyperlink_count() {
    let record = extractor().extract("http://a http://b", Label::Spam);
    assert_eq!(record.num_hyperlinks, 2);
}

#[test]
fn test_hyperlink_count_is_case_sensitive() {
    let record = extractor().extract("HTTP://a https://b", Label::Spam);
    assert_eq!(record.num_hyperlinks, 1);
}

#[test]
fn test_percent_uppercase_uses_original_case() {
    let record = extractor().extract("ABcd", Label::Spam);
    assert_eq!(record.num_chars, 4);
    assert!((record.percent_uppercase - 0.5).abs() < f64::EPSILON);

    let shouting = extractor().extract("HELLO", Label::Spam);
    assert!((shouting.percent_uppercase - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_num_chars_counts_characters_not_bytes() {
    let record = extractor().extract("café", Label::Ham);
    assert_eq!(record.num_chars, 4);
}

// --- Token metrics ---

#[test]
fn test_suspicious_words_case_invariant() {
    let a = extractor().extract("FREE money NOW", Label::Spam);
    let b = extractor().extract("free Money now", Label::Spam);

    assert_eq!(a.num_suspicious_words, 2);
    assert_eq!(a.num_suspicious_words, b.num_suspicious_words);
    assert_eq!(a.num_words, b.num_words);
}

#[test]
fn test_suspicious_words_are_whole_tokens() {
    let record = extractor().extract("moneymaker freedom", Label::Spam);
    assert_eq!(record.num_suspicious_words, 0);
}

#[test]
fn test_phrase_entries_never_match_single_tokens() {
    // "act" and "now" are separate tokens, and "now" is a stop word
    let record = extractor().extract("Act now for free cash", Label::Spam);
    assert_eq!(record.num_suspicious_words, 2);
    assert_eq!(record.num_words, 3);
}

#[test]
fn test_stop_words_removed_from_word_count() {
    let record = extractor().extract("the and of it", Label::Ham);
    assert_eq!(record.num_words, 0);
}

#[test]
fn test_punctuation_tokens_are_counted() {
    let record = extractor().extract("Hello, world!", Label::Ham);
    assert_eq!(record.num_words, 4);
}

#[test]
fn test_stemming_preserves_token_count() {
    let record = extractor().extract("running runs runner", Label::Ham);
    assert_eq!(record.num_words, 3);
}

#[test]
fn test_extraction_is_deterministic() {
    let text = "Subject: Offer\n\nCongratulations! You've won a FREE loan. Click http://x.y";
    let e = extractor();
    assert_eq!(e.extract(text, Label::Spam), e.extract(text, Label::Spam));
}

// --- Date header ---

#[test]
fn test_sent_time_from_date_header() {
    let raw = "From: a@example.com\nDate: Tue, 1 Jan 2020 13:45:00 +0000\nSubject: hi\n\nbody";
    let record = extractor().extract(raw, Label::Ham);
    assert_eq!(record.sent_time.as_deref(), Some("13:45"));
}

#[test]
fn test_sent_time_absent_header() {
    let raw = "From: a@example.com\nSubject: hi\n\nbody";
    let record = extractor().extract(raw, Label::Ham);
    assert!(record.sent_time.is_none());
}

#[test]
fn test_sent_time_unparseable_keeps_other_features() {
    let raw = "Date: not-a-date\n\nGet FREE cash at http://spam.example";
    let record = extractor().extract(raw, Label::Spam);

    assert!(record.sent_time.is_none());
    assert_eq!(record.is_spam, 1);
    assert_eq!(record.num_chars, raw.chars().count());
    assert_eq!(record.num_hyperlinks, 1);
    assert_eq!(record.num_suspicious_words, 2);
}

// --- Injected capabilities ---

struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(ToString::to_string).collect()
    }
}

struct IdentityStemmer;

impl Stemmer for IdentityStemmer {
    fn stem(&self, token: &str) -> String {
        token.to_string()
    }
}

#[test]
fn test_custom_capabilities() {
    let extractor = FeatureExtractor::with_capabilities(
        Arc::new(WhitespaceTokenizer),
        Arc::new(IdentityStemmer),
        StopWords::from_list(&["the"]),
        Lexicon::new(["prize"]),
    );

    let record = extractor.extract("The PRIZE, the prize", Label::Spam);

    // "prize," keeps its comma under whitespace tokenization
    assert_eq!(record.num_words, 2);
    assert_eq!(record.num_suspicious_words, 1);
    assert_eq!(record.num_chars, 20);
}

#[test]
fn test_extra_stop_words_from_config() {
    let config = ExtractorConfig {
        extra_stop_words: vec!["Hello".into()],
        ..ExtractorConfig::default()
    };
    let extractor = FeatureExtractor::new(&config).unwrap();

    assert_eq!(extractor.extract("hello world", Label::Ham).num_words, 1);
}

#[test]
fn test_unknown_stop_word_language_is_rejected() {
    let config = ExtractorConfig {
        stop_word_language: "klingon".into(),
        ..ExtractorConfig::default()
    };
    assert!(matches!(
        FeatureExtractor::new(&config),
        Err(FeatureError::Config(_))
    ));
}

#[test]
fn test_record_serializes_with_column_names() {
    let record = extractor().extract("Subject: hi\n\nGet FREE cash", Label::Spam);
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["is_spam"], 1);
    assert_eq!(json["num_suspicious_words"], record.num_suspicious_words);
    assert!(json["sent_time"].is_null());
    assert_eq!(json.as_object().unwrap().len(), FEATURE_COLUMNS.len());
}
