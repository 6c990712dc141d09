//! Lexicon-backed STTS tagger.
//!
//! Lookup order for each word:
//!
//! 1. the user lexicon (exact surface, then lowercase)
//! 2. punctuation and numbers
//! 3. the built-in closed-class vocabulary, with a few context rules
//! 4. suffix and capitalization heuristics for open-class words
//!
//! Only German has a closed-class vocabulary. In any other language, words
//! outside the user lexicon are tagged `FM`.

use std::collections::HashMap;

use camino::Utf8Path;

use crate::dictionaries::closed_class;
use crate::error::ProviderError;
use crate::language::Language;
use crate::tags::PUNCTUATION_LEMMA;

use super::{TagLevel, TaggedToken, Tagger};

/// Suffixes removed when deriving a stem, longest first.
const STEM_SUFFIXES: &[&str] = &[
    "ungen", "ung", "heit", "keit", "lich", "en", "er", "es", "em", "e",
];

/// Adjective suffixes for predicative/adverbial use.
const ADJECTIVE_SUFFIXES: &[&str] = &["ig", "lich", "isch", "bar", "sam", "los", "haft", "voll"];

/// Inflection endings stripped from attributive adjectives.
const ADJECTIVE_ENDINGS: &[&str] = &["en", "er", "es", "em", "e"];

/// Default tagger: user lexicon plus built-in German rules.
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    entries: HashMap<String, (String, String)>,
}

impl LexiconTagger {
    /// Create a tagger with no user entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tagger from `(surface, lemma, tag)` triples.
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: Into<String>,
    {
        let mut tagger = Self::new();
        for (surface, lemma, tag) in entries {
            tagger.insert(surface, lemma, tag);
        }
        tagger
    }

    /// Add or replace a user entry.
    pub fn insert(
        &mut self,
        surface: impl Into<String>,
        lemma: impl Into<String>,
        tag: impl Into<String>,
    ) {
        self.entries
            .insert(surface.into(), (lemma.into(), tag.into()));
    }

    /// Number of user entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no user entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load user entries from a file with `surface lemma tag` per line.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn from_file(path: &Utf8Path) -> Result<Self, ProviderError> {
        let content =
            std::fs::read_to_string(path.as_std_path()).map_err(|source| ProviderError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let mut tagger = Self::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let [surface, lemma, tag] = fields.as_slice() else {
                return Err(ProviderError::Malformed {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    reason: format!("expected 3 fields, found {}", fields.len()),
                });
            };
            tagger.insert(*surface, *lemma, *tag);
        }
        tracing::debug!(entries = tagger.len(), "lexicon loaded");
        Ok(tagger)
    }

    fn lookup_user(&self, word: &str) -> Option<(String, String)> {
        self.entries
            .get(word)
            .or_else(|| self.entries.get(&word.to_lowercase()))
            .cloned()
    }

    fn tag_word(
        &self,
        words: &[String],
        i: usize,
        prev_tag: Option<&str>,
        german: bool,
    ) -> (String, String) {
        let word = words[i].as_str();

        if let Some(entry) = self.lookup_user(word) {
            return entry;
        }
        if let Some(tag) = punctuation_tag(word) {
            return (PUNCTUATION_LEMMA.to_string(), tag.to_string());
        }
        if is_number(word) {
            return (word.to_string(), "CARD".to_string());
        }
        if !word.chars().any(char::is_alphabetic) {
            return (word.to_string(), "XY".to_string());
        }
        if !german {
            return (word.to_lowercase(), "FM".to_string());
        }

        let next = words.get(i + 1).map(String::as_str);
        let next_is_noun = next.is_some_and(starts_uppercase);

        if let Some((lemma, tag)) = closed_class::lookup(word) {
            return (lemma.to_string(), closed_class_in_context(word, tag, prev_tag, next).to_string());
        }

        match word.to_lowercase().as_str() {
            "sein" if next_is_noun => return ("sein".to_string(), "PPOSAT".to_string()),
            "sein" => return ("sein".to_string(), "VAINF".to_string()),
            _ => {}
        }

        open_class(word, prev_tag, next_is_noun)
    }
}

impl Tagger for LexiconTagger {
    fn tag(
        &self,
        words: &[String],
        level: TagLevel,
        language: &Language,
    ) -> Result<Vec<TaggedToken>, ProviderError> {
        // Only German has a lexicon; other words are foreign material
        let german = *language == Language::German;

        let mut tokens: Vec<TaggedToken> = Vec::with_capacity(words.len());
        for i in 0..words.len() {
            let prev_tag = tokens.last().map(|t| t.tag.as_str());
            let (lemma, tag) = self.tag_word(words, i, prev_tag, german);
            let stem = level.has_stem().then(|| stem(&lemma));
            tokens.push(TaggedToken {
                surface: words[i].clone(),
                lemma,
                stem,
                tag,
            });
        }
        Ok(tokens)
    }
}

fn punctuation_tag(word: &str) -> Option<&'static str> {
    if word.is_empty() || word.chars().any(char::is_alphanumeric) {
        return None;
    }
    if !word.chars().all(|c| c.is_ascii_punctuation() || is_typographic_punctuation(c)) {
        return None;
    }
    Some(match word {
        "," => "$,",
        w if w.chars().all(|c| matches!(c, '.' | '!' | '?' | ';' | ':')) => "$.",
        _ => "$(",
    })
}

const fn is_typographic_punctuation(c: char) -> bool {
    matches!(
        c,
        '„' | '“' | '”' | '‚' | '‘' | '’' | '«' | '»' | '‹' | '›' | '–' | '—' | '…'
    )
}

fn is_number(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '%'))
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Resolve closed-class readings that depend on the neighbours.
fn closed_class_in_context<'a>(
    word: &str,
    tag: &'a str,
    prev_tag: Option<&str>,
    next: Option<&str>,
) -> &'a str {
    let next_is_noun = next.is_some_and(starts_uppercase);
    match tag {
        // "der Mann, der kam"
        "ART" if prev_tag == Some("$,") && word.to_lowercase().starts_with('d') && !next_is_noun => {
            "PRELS"
        }
        "PDS" if next_is_noun => "PDAT",
        "PIS" if next_is_noun => "PIAT",
        // "zu Hause" vs. "zu laufen"
        "PTKZU" if next_is_noun || next.is_none() => "APPR",
        _ => tag,
    }
}

/// Heuristic tag and lemma for a word missing from every lexicon.
fn open_class(word: &str, prev_tag: Option<&str>, next_is_noun: bool) -> (String, String) {
    // Sentence-initial capitals are mostly nouns too
    if starts_uppercase(word) {
        return (word.to_string(), "NN".to_string());
    }

    let lower = word.to_lowercase();
    let after_infinitive_marker = matches!(prev_tag, Some("PTKZU" | "VMFIN" | "VAFIN" | "VMINF"));

    if next_is_noun
        && let Some(base) = strip_any(&lower, ADJECTIVE_ENDINGS)
    {
        return (base.to_string(), "ADJA".to_string());
    }
    if lower.ends_with("weise") {
        return (lower, "ADV".to_string());
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return (lower, "ADJD".to_string());
    }
    if lower.len() > 5 && lower.starts_with("ge") && (lower.ends_with('t') || lower.ends_with("en")) {
        return (participle_lemma(&lower), "VVPP".to_string());
    }
    if lower.ends_with("en") || lower.ends_with("ern") || lower.ends_with("eln") {
        let tag = if after_infinitive_marker {
            "VVINF"
        } else {
            "VVFIN"
        };
        return (lower, tag.to_string());
    }
    if let Some(base) = strip_any(&lower, &["test", "ten", "te", "st", "t"])
        && base.len() >= 3
        && !base.ends_with(|c: char| "aeiouäöü".contains(c))
    {
        return (format!("{base}en"), "VVFIN".to_string());
    }

    (lower, "ADJD".to_string())
}

fn strip_any<'a>(word: &'a str, suffixes: &[&str]) -> Option<&'a str> {
    suffixes
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix))
        .filter(|base| base.chars().count() >= 2)
}

fn participle_lemma(participle: &str) -> String {
    let base = participle.strip_prefix("ge").unwrap_or(participle);
    if base.ends_with("en") {
        base.to_string()
    } else {
        let base = base.strip_suffix("et").or_else(|| base.strip_suffix('t')).unwrap_or(base);
        format!("{base}en")
    }
}

/// Lowercased, umlaut-folded, suffix-stripped stem of a lemma.
pub fn stem(lemma: &str) -> String {
    if lemma == PUNCTUATION_LEMMA || !lemma.chars().any(char::is_alphabetic) {
        return lemma.to_string();
    }
    let mut folded = String::with_capacity(lemma.len());
    for c in lemma.chars().flat_map(char::to_lowercase) {
        match c {
            'ä' => folded.push('a'),
            'ö' => folded.push('o'),
            'ü' => folded.push('u'),
            'ß' => folded.push_str("ss"),
            other => folded.push(other),
        }
    }
    for suffix in STEM_SUFFIXES {
        if let Some(base) = folded.strip_suffix(suffix)
            && base.chars().count() >= 3
        {
            return base.to_string();
        }
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    fn tags(tagger: &LexiconTagger, text: &str) -> Vec<String> {
        tagger
            .tag(&words(text), TagLevel::Lemma, &Language::German)
            .unwrap()
            .into_iter()
            .map(|t| t.tag)
            .collect()
    }

    #[test]
    fn simple_sentence() {
        let tagger = LexiconTagger::new();
        assert_eq!(
            tags(&tagger, "Der Hund lief schnell nach Hause ."),
            vec!["ART", "NN", "ADJD", "ADJD", "APPR", "NN", "$."]
        );
    }

    #[test]
    fn one_token_per_word() {
        let tagger = LexiconTagger::new();
        let input = words("„ Ja “ , sagte sie , 3,5 % @@ .");
        let tagged = tagger.tag(&input, TagLevel::Lemma, &Language::German).unwrap();
        assert_eq!(tagged.len(), input.len());
        for (token, word) in tagged.iter().zip(&input) {
            assert_eq!(&token.surface, word);
        }
    }

    #[test]
    fn punctuation_lemma_and_tags() {
        let tagger = LexiconTagger::new();
        let tagged = tagger
            .tag(&words(", . ( „"), TagLevel::Lemma, &Language::German)
            .unwrap();
        let tags: Vec<&str> = tagged.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["$,", "$.", "$(", "$("]);
        assert!(tagged.iter().all(|t| t.lemma == PUNCTUATION_LEMMA));
    }

    #[test]
    fn context_rules() {
        let tagger = LexiconTagger::new();
        assert_eq!(tags(&tagger, "diese Frau")[0], "PDAT");
        assert_eq!(tags(&tagger, "diese kam")[0], "PDS");
        assert_eq!(tags(&tagger, "Mann , der kam")[2], "PRELS");
        assert_eq!(tags(&tagger, "zu laufen")[0], "PTKZU");
        assert_eq!(tags(&tagger, "zu laufen")[1], "VVINF");
        assert_eq!(tags(&tagger, "zu Hause")[0], "APPR");
    }

    #[test]
    fn verb_and_adjective_heuristics() {
        let tagger = LexiconTagger::new();
        let tagged = tagger
            .tag(
                &words("sie spielte mit großen Hunden und hat gespielt"),
                TagLevel::Lemma,
                &Language::German,
            )
            .unwrap();
        assert_eq!(tagged[1].tag, "VVFIN");
        assert_eq!(tagged[1].lemma, "spielen");
        assert_eq!(tagged[3].tag, "ADJA");
        assert_eq!(tagged[3].lemma, "groß");
        assert_eq!(tagged[7].tag, "VVPP");
        assert_eq!(tagged[7].lemma, "spielen");
    }

    #[test]
    fn user_lexicon_wins() {
        let tagger = LexiconTagger::with_entries([("Häuser", "Haus", "NN"), ("lief", "laufen", "VVFIN")]);
        let tagged = tagger
            .tag(&words("Häuser lief"), TagLevel::Lemma, &Language::German)
            .unwrap();
        assert_eq!(tagged[0].lemma, "Haus");
        assert_eq!(tagged[1].tag, "VVFIN");
        assert!(tagged[0].stem.is_none());
    }

    #[test]
    fn stems_at_level_two() {
        let tagger = LexiconTagger::new();
        let tagged = tagger
            .tag(&words("Haus Häuser Hauses"), TagLevel::Stem, &Language::German)
            .unwrap();
        let stems: Vec<&str> = tagged.iter().map(TaggedToken::normalized).collect();
        assert_eq!(stems, vec!["haus", "haus", "haus"]);
    }

    #[test]
    fn stem_folds_and_strips() {
        assert_eq!(stem("Straße"), "strass");
        assert_eq!(stem("Wohnung"), "wohn");
        assert_eq!(stem("--"), "--");
        assert_eq!(stem("Ei"), "ei");
    }

    #[test]
    fn english_words_are_foreign_material() {
        let tagger = LexiconTagger::new();
        let tagged = tagger
            .tag(&words("The dog ran ."), TagLevel::Lemma, &Language::English)
            .unwrap();
        let tags: Vec<&str> = tagged.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["FM", "FM", "FM", "$."]);
    }

    #[test]
    fn other_languages_are_foreign_material() {
        let tagged = LexiconTagger::new()
            .tag(&words("Salve Marce ."), TagLevel::Stem, &Language::Other("latin".into()))
            .unwrap();
        let tags: Vec<&str> = tagged.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["FM", "FM", "$."]);
        assert_eq!(tagged[0].lemma, "salve");
        assert!(tagged[0].stem.is_some());
    }

    #[test]
    fn lexicon_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.tsv");
        std::fs::write(&path, "# surface lemma tag\nHäuser\tHaus\tNN\n").unwrap();
        let path = Utf8Path::from_path(&path).unwrap();
        let tagger = LexiconTagger::from_file(path).unwrap();
        assert_eq!(tagger.len(), 1);

        std::fs::write(path, "Häuser Haus\n").unwrap();
        let err = LexiconTagger::from_file(path).unwrap_err();
        assert_eq!(err.to_string(), format!("{path}:1: expected 3 fields, found 2"));
    }
}
