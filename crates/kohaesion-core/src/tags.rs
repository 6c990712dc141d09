//! STTS tag classification tables.
//!
//! Maps Stuttgart-Tübingen tagset (STTS) part-of-speech tags onto the word
//! classes used by the cohesion and word-information metrics. Membership is
//! decided by tag, never by lemma or surface form.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Attributive and predicative adjectives.
pub const ADJECTIVE_TAGS: &[&str] = &["ADJA", "ADJD"];
/// Adverbs.
pub const ADVERB_TAGS: &[&str] = &["ADV"];
/// Prepositions, postpositions and circumpositions.
pub const ADPOSITION_TAGS: &[&str] = &["APPR", "APPRART", "APPO", "APZR"];
/// Articles.
pub const ARTICLE_TAGS: &[&str] = &["ART"];
/// Cardinal numbers.
pub const CARDINAL_TAGS: &[&str] = &["CARD"];
/// Foreign material.
pub const FOREIGN_TAGS: &[&str] = &["FM"];
/// Interjections.
pub const INTERJECTION_TAGS: &[&str] = &["ITJ"];
/// Conjunctions and subjunctions.
pub const CONJUNCTION_TAGS: &[&str] = &["KOUI", "KOUS", "KON", "KOKOM"];
/// Common and proper nouns.
pub const NOUN_TAGS: &[&str] = &["NN", "NE"];
/// All pronoun tags, including attributive and adverbial forms.
pub const PRONOUN_TAGS: &[&str] = &[
    "PDS", "PDAT", "PIS", "PIAT", "PIDAT", "PPER", "PPOSS", "PPOSAT", "PRELS", "PRELAT", "PRF",
    "PWS", "PWAT", "PWAV", "PAV",
];
/// Particles.
pub const PARTICLE_TAGS: &[&str] = &["PTKZU", "PTKNEG", "PTKVZ", "PTKANT", "PTKA"];
/// Truncated first members of compounds ("Ein- und Ausgang").
pub const TRUNCATED_TAGS: &[&str] = &["TRUNC"];
/// Lexical (full) verbs.
pub const LEXICAL_VERB_TAGS: &[&str] = &["VVFIN", "VVIMP", "VVINF", "VVIZU", "VVPP"];
/// Auxiliary verbs.
pub const AUXILIARY_VERB_TAGS: &[&str] = &["VAFIN", "VAIMP", "VAINF", "VAPP"];
/// Modal verbs.
pub const MODAL_VERB_TAGS: &[&str] = &["VMFIN", "VMINF", "VMPP"];
/// Non-words.
pub const NONWORD_TAGS: &[&str] = &["XY"];
/// Sentence-final, comma and other punctuation.
pub const PUNCTUATION_TAGS: &[&str] = &["$.", "$,", "$("];
/// Substituting pronouns that count as arguments for argument overlap.
pub const ARGUMENT_PRONOUN_TAGS: &[&str] = &["PDS", "PIS", "PWS", "PPER"];

/// Lemma the tagger emits for punctuation tokens.
pub const PUNCTUATION_LEMMA: &str = "--";

/// Semantic word class of a tagged token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordClass {
    /// `ADJA`, `ADJD`.
    Adjective,
    /// `ADV`.
    Adverb,
    /// `APPR`, `APPRART`, `APPO`, `APZR`.
    Adposition,
    /// `ART`.
    Article,
    /// `CARD`.
    Cardinal,
    /// `FM`.
    Foreign,
    /// `ITJ`.
    Interjection,
    /// `KOUI`, `KOUS`, `KON`, `KOKOM`.
    Conjunction,
    /// `NN`, `NE`.
    Noun,
    /// Every `P*` pronoun tag.
    Pronoun,
    /// `PTK*`.
    Particle,
    /// `TRUNC`.
    Truncated,
    /// Lexical, auxiliary and modal verbs.
    Verb,
    /// `VV*`.
    LexicalVerb,
    /// `VA*`.
    AuxiliaryVerb,
    /// `VM*`.
    ModalVerb,
    /// `XY`.
    NonWord,
    /// `$.`, `$,`, `$(`.
    Punctuation,
    /// Personal, demonstrative, indefinite and interrogative substituting
    /// pronouns used by argument and stem overlap.
    ArgumentPronoun,
    /// Nouns, lexical verbs, adjectives, adverbs and foreign material.
    ContentWord,
    /// Content words without nouns.
    NonNounContentWord,
    /// Articles, conjunctions, particles, pronouns, adpositions, modal and
    /// auxiliary verbs.
    FunctionWord,
}

static VERB: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    [LEXICAL_VERB_TAGS, AUXILIARY_VERB_TAGS, MODAL_VERB_TAGS].concat()
});

static CONTENT_WORD: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    [
        NOUN_TAGS,
        LEXICAL_VERB_TAGS,
        ADJECTIVE_TAGS,
        ADVERB_TAGS,
        FOREIGN_TAGS,
    ]
    .concat()
});

static NON_NOUN_CONTENT_WORD: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    [LEXICAL_VERB_TAGS, ADJECTIVE_TAGS, ADVERB_TAGS, FOREIGN_TAGS].concat()
});

static FUNCTION_WORD: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    [
        ARTICLE_TAGS,
        CONJUNCTION_TAGS,
        PARTICLE_TAGS,
        PRONOUN_TAGS,
        ADPOSITION_TAGS,
        MODAL_VERB_TAGS,
        AUXILIARY_VERB_TAGS,
    ]
    .concat()
});

/// Tags that do not count as words: punctuation and non-words.
static NOT_A_WORD: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    NONWORD_TAGS
        .iter()
        .chain(PUNCTUATION_TAGS)
        .copied()
        .collect()
});

impl WordClass {
    /// The STTS tags belonging to this class.
    pub fn tags(self) -> &'static [&'static str] {
        match self {
            Self::Adjective => ADJECTIVE_TAGS,
            Self::Adverb => ADVERB_TAGS,
            Self::Adposition => ADPOSITION_TAGS,
            Self::Article => ARTICLE_TAGS,
            Self::Cardinal => CARDINAL_TAGS,
            Self::Foreign => FOREIGN_TAGS,
            Self::Interjection => INTERJECTION_TAGS,
            Self::Conjunction => CONJUNCTION_TAGS,
            Self::Noun => NOUN_TAGS,
            Self::Pronoun => PRONOUN_TAGS,
            Self::Particle => PARTICLE_TAGS,
            Self::Truncated => TRUNCATED_TAGS,
            Self::Verb => VERB.as_slice(),
            Self::LexicalVerb => LEXICAL_VERB_TAGS,
            Self::AuxiliaryVerb => AUXILIARY_VERB_TAGS,
            Self::ModalVerb => MODAL_VERB_TAGS,
            Self::NonWord => NONWORD_TAGS,
            Self::Punctuation => PUNCTUATION_TAGS,
            Self::ArgumentPronoun => ARGUMENT_PRONOUN_TAGS,
            Self::ContentWord => CONTENT_WORD.as_slice(),
            Self::NonNounContentWord => NON_NOUN_CONTENT_WORD.as_slice(),
            Self::FunctionWord => FUNCTION_WORD.as_slice(),
        }
    }

    /// Whether `tag` belongs to this class.
    pub fn contains(self, tag: &str) -> bool {
        self.tags().contains(&tag)
    }
}

/// Whether a token with this tag counts as a word (not punctuation, not `XY`).
pub fn is_word_tag(tag: &str) -> bool {
    !NOT_A_WORD.contains(tag)
}
