//! Rule-based sentence splitting and word tokenization.
//!
//! Sentence boundaries are found by a character scan with context checks for
//! German abbreviations, ordinals ("am 3. Mai"), decimals, URLs and
//! ellipses. Word tokenization splits on whitespace and peels punctuation
//! off into separate tokens, keeping abbreviation periods attached.

use regex::Regex;
use std::sync::LazyLock;

use crate::dictionaries::abbreviations::is_abbreviation;
use crate::error::ProviderError;
use crate::language::Language;

use super::{SentenceSplitter, WordTokenizer};

/// Regex for decimal numbers (3.14, 2,5, etc.).
static DECIMAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+[.,]\d+$").expect("valid regex"));

/// Regex for URLs.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:https?://|www\.)\S+$").expect("valid regex"));

/// Regex for initials (J.K., U.S.A., etc.).
static INITIALS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\p{Lu}\.)+$").expect("valid regex"));

/// Characters split off the front of a word.
const LEADING_PUNCTUATION: &[char] = &['(', '[', '{', '"', '\'', '„', '“', '‚', '«', '»', '‹', '›'];

/// Characters split off the end of a word.
const TRAILING_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', ')', ']', '}', '"', '\'', '“', '”', '‘', '«', '»', '‹', '›',
];

/// Default sentence splitter and word tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTokenizer;

impl RuleTokenizer {
    /// Create a new rule tokenizer.
    pub const fn new() -> Self {
        Self
    }
}

impl SentenceSplitter for RuleTokenizer {
    fn split_sentences(
        &self,
        paragraph: &str,
        _language: &Language,
    ) -> Result<Vec<String>, ProviderError> {
        Ok(split_sentences(paragraph))
    }
}

impl WordTokenizer for RuleTokenizer {
    fn tokenize(&self, sentence: &str, _language: &Language) -> Result<Vec<String>, ProviderError> {
        Ok(tokenize_words(sentence))
    }
}

/// Split text into sentences with abbreviation, ordinal and decimal awareness.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = text.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        current.push(ch);

        if is_sentence_terminator(ch) {
            // Let runs of terminators ("?!", "...") finish first
            if chars.get(i + 1).is_some_and(|&next| is_sentence_terminator(next)) {
                continue;
            }
            let context = extract_context(&chars, i);
            if is_sentence_boundary(&context, &current) {
                push_sentence(&mut sentences, &mut current);
            }
        }
    }

    push_sentence(&mut sentences, &mut current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let sentence = current.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
    current.clear();
}

/// Split one sentence into word and punctuation tokens.
pub fn tokenize_words(sentence: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for chunk in sentence.split_whitespace() {
        let mut word = chunk;
        while let Some(c) = word.chars().next().filter(|c| LEADING_PUNCTUATION.contains(c)) {
            tokens.push(c.to_string());
            word = &word[c.len_utf8()..];
        }

        let mut trailing = Vec::new();
        loop {
            if word.ends_with("...") && word.len() > 3 {
                trailing.push("...".to_string());
                word = &word[..word.len() - 3];
                continue;
            }
            let Some(c) = word.chars().next_back() else {
                break;
            };
            if !TRAILING_PUNCTUATION.contains(&c) {
                break;
            }
            if c == '.' && keeps_period(word) {
                break;
            }
            trailing.push(c.to_string());
            word = &word[..word.len() - c.len_utf8()];
        }

        if !word.is_empty() {
            tokens.push(word.to_string());
        }
        tokens.extend(trailing.into_iter().rev());
    }

    tokens
}

/// Whether a word ending in a period keeps it (abbreviations, initials).
fn keeps_period(word: &str) -> bool {
    let stem = &word[..word.len() - 1];
    if stem.is_empty() {
        return false;
    }
    is_abbreviation(stem) || INITIALS_PATTERN.is_match(word)
}

const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Context around a potential sentence boundary.
struct SentenceContext {
    punctuation: char,
    word_before: String,
    char_after: Option<char>,
    text_after: String,
    attached: bool,
    is_end_of_text: bool,
}

fn extract_context(chars: &[char], pos: usize) -> SentenceContext {
    let before = get_word_before(chars, pos);

    let mut after_start = pos + 1;
    while after_start < chars.len() && chars[after_start].is_whitespace() {
        after_start += 1;
    }

    SentenceContext {
        punctuation: chars[pos],
        word_before: before,
        char_after: chars.get(after_start).copied(),
        text_after: chars[after_start.min(chars.len())..].iter().take(20).collect(),
        attached: chars.get(pos + 1).is_some_and(|c| c.is_alphanumeric()),
        is_end_of_text: after_start >= chars.len(),
    }
}

fn get_word_before(chars: &[char], pos: usize) -> String {
    let mut word_chars = Vec::new();
    let mut i = pos;
    while i > 0 {
        i -= 1;
        let c = chars[i];
        if c.is_alphanumeric() || c == '.' {
            word_chars.push(c);
        } else {
            break;
        }
    }
    word_chars.reverse();
    word_chars.into_iter().collect()
}

fn is_sentence_boundary(context: &SentenceContext, current_sentence: &str) -> bool {
    if context.is_end_of_text {
        return true;
    }

    // ! and ? are almost always boundaries
    if context.punctuation != '.' {
        return check_next_char_capitalization(context);
    }

    // "z.B.", "3.14", "www.example.de"
    if context.attached {
        return false;
    }

    if current_sentence.ends_with("...") {
        return context.char_after.is_some_and(char::is_uppercase);
    }

    if is_abbreviation(&context.word_before) {
        return false;
    }

    if is_likely_initial(&context.word_before) {
        return false;
    }

    // "am 3. Mai", "im 19. Jahrhundert"
    if !context.word_before.is_empty() && context.word_before.chars().all(|c| c.is_ascii_digit())
    {
        return false;
    }

    if DECIMAL_PATTERN.is_match(current_sentence.trim_end_matches('.')) {
        return context.char_after.is_some_and(|c| !c.is_ascii_digit());
    }

    if URL_PATTERN.is_match(current_sentence.trim_end_matches('.')) {
        return false;
    }

    if context.char_after.is_some_and(char::is_lowercase) {
        return false;
    }

    true
}

fn check_next_char_capitalization(context: &SentenceContext) -> bool {
    if let Some(next_char) = context.char_after {
        if next_char.is_lowercase() {
            return false;
        }
        if LEADING_PUNCTUATION.contains(&next_char) {
            return context
                .text_after
                .chars()
                .nth(1)
                .is_none_or(|c| !c.is_lowercase());
        }
    }
    true
}

fn is_likely_initial(word: &str) -> bool {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(first), None) => first.is_uppercase(),
        _ => INITIALS_PATTERN.is_match(&format!("{word}.")),
    }
}
