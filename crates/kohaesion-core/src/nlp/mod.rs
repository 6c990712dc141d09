//! Interfaces to the natural-language collaborators.
//!
//! Sentence splitting, word tokenization, part-of-speech tagging,
//! hyphenation and frequency lookup are consumed through the traits in this
//! module. Deterministic default implementations live in the submodules:
//!
//! - [`tokenizer::RuleTokenizer`]: sentence and word splitting
//! - [`tagger::LexiconTagger`]: STTS tagging with lemma and stem
//! - [`hyphenation::VowelGroupHyphenator`]: syllable boundaries
//! - [`frequency::FrequencyTable`]: word frequency lookup
//!
//! A [`Pipeline`] bundles one of each so documents built from it (including
//! the single-unit documents used for LSA comparisons) all share the same
//! collaborators.

pub mod frequency;
pub mod hyphenation;
pub mod tagger;
pub mod tokenizer;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::language::Language;

pub use frequency::{FrequencySource, FrequencyTable, WordFrequency};
pub use hyphenation::VowelGroupHyphenator;
pub use tagger::LexiconTagger;
pub use tokenizer::RuleTokenizer;

/// Detail level requested from the tagger.
///
/// Selects whether the normalized form of each token is a dictionary lemma
/// or a coarser stem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TagLevel {
    /// Dictionary lemma ("Häuser" → "Haus").
    #[default]
    Lemma = 1,
    /// Stem for looser matching ("Häuser" → "haus").
    Stem = 2,
    /// Stem plus whatever extra analysis the tagger provides.
    Detailed = 3,
}

impl TagLevel {
    /// Whether tokens at this level carry a stem.
    pub const fn has_stem(self) -> bool {
        !matches!(self, Self::Lemma)
    }
}

impl TryFrom<u8> for TagLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Lemma),
            2 => Ok(Self::Stem),
            3 => Ok(Self::Detailed),
            other => Err(format!("tag level must be 1, 2 or 3, got {other}")),
        }
    }
}

impl From<TagLevel> for u8 {
    fn from(value: TagLevel) -> Self {
        value as Self
    }
}

impl fmt::Display for TagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// One tagged token as returned by a [`Tagger`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TaggedToken {
    /// The word as it appears in the text.
    pub surface: String,
    /// Dictionary base form.
    pub lemma: String,
    /// Stem, present when tagged at [`TagLevel::Stem`] or above.
    pub stem: Option<String>,
    /// STTS part-of-speech tag.
    pub tag: String,
}

impl TaggedToken {
    /// The normalized form for the level the token was tagged at: the stem
    /// when present, the lemma otherwise.
    pub fn normalized(&self) -> &str {
        self.stem.as_deref().unwrap_or(&self.lemma)
    }
}

/// Splits a paragraph into sentences.
pub trait SentenceSplitter: Send + Sync {
    /// Split `paragraph` into sentence strings, in order.
    fn split_sentences(
        &self,
        paragraph: &str,
        language: &Language,
    ) -> Result<Vec<String>, ProviderError>;
}

/// Splits a sentence into word tokens (punctuation becomes its own token).
pub trait WordTokenizer: Send + Sync {
    /// Tokenize one sentence.
    fn tokenize(&self, sentence: &str, language: &Language) -> Result<Vec<String>, ProviderError>;
}

/// Part-of-speech tagger with lemmatization.
///
/// Must be deterministic for fixed inputs and return exactly one token per
/// input word.
pub trait Tagger: Send + Sync {
    /// Tag one tokenized sentence.
    fn tag(
        &self,
        words: &[String],
        level: TagLevel,
        language: &Language,
    ) -> Result<Vec<TaggedToken>, ProviderError>;
}

/// Hyphenation service used for syllable counting.
pub trait Hyphenator: Send + Sync {
    /// Byte offsets at which `word` may be hyphenated, in ascending order.
    fn positions(&self, word: &str, language: &Language) -> Result<Vec<usize>, ProviderError>;

    /// Number of syllables: hyphenation points plus one.
    fn syllables(&self, word: &str, language: &Language) -> Result<usize, ProviderError> {
        Ok(self.positions(word, language)?.len() + 1)
    }
}

/// The collaborators a document pulls its derived views from.
#[derive(Clone)]
pub struct Pipeline {
    language: Language,
    splitter: Arc<dyn SentenceSplitter>,
    tokenizer: Arc<dyn WordTokenizer>,
    tagger: Arc<dyn Tagger>,
    hyphenator: Arc<dyn Hyphenator>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Language::German)
    }
}

impl Pipeline {
    /// Create a pipeline with the built-in collaborators.
    pub fn new(language: Language) -> Self {
        let rules = Arc::new(RuleTokenizer::new());
        Self {
            language,
            splitter: rules.clone(),
            tokenizer: rules,
            tagger: Arc::new(LexiconTagger::new()),
            hyphenator: Arc::new(VowelGroupHyphenator),
        }
    }

    /// Replace the sentence splitter.
    pub fn with_splitter(mut self, splitter: Arc<dyn SentenceSplitter>) -> Self {
        self.splitter = splitter;
        self
    }

    /// Replace the word tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn WordTokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Replace the tagger.
    pub fn with_tagger(mut self, tagger: Arc<dyn Tagger>) -> Self {
        self.tagger = tagger;
        self
    }

    /// Replace the hyphenator.
    pub fn with_hyphenator(mut self, hyphenator: Arc<dyn Hyphenator>) -> Self {
        self.hyphenator = hyphenator;
        self
    }

    /// The document language.
    pub const fn language(&self) -> &Language {
        &self.language
    }

    /// The sentence splitter.
    pub fn splitter(&self) -> &dyn SentenceSplitter {
        self.splitter.as_ref()
    }

    /// The word tokenizer.
    pub fn tokenizer(&self) -> &dyn WordTokenizer {
        self.tokenizer.as_ref()
    }

    /// The tagger.
    pub fn tagger(&self) -> &dyn Tagger {
        self.tagger.as_ref()
    }

    /// The hyphenator.
    pub fn hyphenator(&self) -> &dyn Hyphenator {
        self.hyphenator.as_ref()
    }
}
