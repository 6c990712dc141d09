//! Text representation with cached derived views.
//!
//! A [`Document`] owns its paragraphs and derives sentences, tokenized words
//! and tagged tokens from them on demand through its [`Pipeline`]. Derived
//! views are memoized in a per-document cache keyed by view kind and tag
//! level. The cache sits behind a `Mutex`, so a document can be shared
//! between threads; collaborators are never called with the lock held.
//!
//! ```
//! use kohaesion_core::document::DocumentLoader;
//!
//! let doc = DocumentLoader::new()
//!     .with_text("Der Hund lief. Er war schnell.\nDie Katze schlief.")
//!     .load()
//!     .unwrap();
//! assert_eq!(doc.paragraphs().len(), 2);
//! assert_eq!(doc.sentences().unwrap().len(), 3);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, instrument};

use crate::error::{MetricError, MetricResult};
use crate::language::Language;
use crate::markdown;
use crate::nlp::{Pipeline, TagLevel, TaggedToken};
use crate::tags::PUNCTUATION_LEMMA;

/// Sentences of tagged tokens.
pub type TaggedSentences = Arc<Vec<Vec<TaggedToken>>>;

/// Memoized views of one document.
#[derive(Debug, Default)]
struct DocumentCache {
    sentences: Option<Arc<Vec<String>>>,
    words: Option<Arc<Vec<Vec<String>>>>,
    tagged: HashMap<TagLevel, TaggedSentences>,
}

/// A single text with lazily derived linguistic views.
#[derive(Debug)]
pub struct Document {
    paragraphs: Vec<String>,
    pipeline: Pipeline,
    title: Option<String>,
    author: Option<String>,
    source: Option<String>,
    caching: bool,
    cache: Mutex<DocumentCache>,
}

impl Document {
    /// Build a document from raw text: one paragraph per non-blank line.
    pub fn from_text(text: &str, pipeline: Pipeline) -> Self {
        Self::from_paragraphs(split_paragraphs(text), pipeline)
    }

    /// Build a document from already separated paragraphs.
    ///
    /// Each paragraph is trimmed and blank ones are dropped.
    pub fn from_paragraphs<I, S>(paragraphs: I, pipeline: Pipeline) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paragraphs = paragraphs
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        Self {
            paragraphs,
            pipeline,
            title: None,
            author: None,
            source: None,
            caching: true,
            cache: Mutex::new(DocumentCache::default()),
        }
    }

    /// The paragraphs, trimmed, blank lines removed.
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// Paragraphs joined by newlines.
    pub fn plaintext(&self) -> String {
        self.paragraphs.join("\n")
    }

    /// The document language.
    pub const fn language(&self) -> &Language {
        self.pipeline.language()
    }

    /// The collaborators this document derives its views with.
    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Optional title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Optional author.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Optional source description (file path, corpus id).
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Whether derived views are memoized.
    pub const fn caching(&self) -> bool {
        self.caching
    }

    /// Drop every memoized view.
    pub fn invalidate(&self) {
        *self.lock_cache() = DocumentCache::default();
        debug!("document cache invalidated");
    }

    fn lock_cache(&self) -> MutexGuard<'_, DocumentCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sentences of all paragraphs, in paragraph order.
    #[instrument(level = "debug", skip(self))]
    pub fn sentences(&self) -> MetricResult<Arc<Vec<String>>> {
        if self.caching
            && let Some(hit) = self.lock_cache().sentences.clone()
        {
            debug!("sentences cache hit");
            return Ok(hit);
        }

        let language = self.language();
        let mut sentences = Vec::new();
        for paragraph in &self.paragraphs {
            sentences.extend(
                self.pipeline
                    .splitter()
                    .split_sentences(paragraph, language)?,
            );
        }
        let sentences = Arc::new(sentences);
        debug!(count = sentences.len(), "sentences derived");

        if self.caching {
            self.lock_cache().sentences = Some(Arc::clone(&sentences));
        }
        Ok(sentences)
    }

    /// Word tokens, one sequence per sentence.
    #[instrument(level = "debug", skip(self))]
    pub fn words(&self) -> MetricResult<Arc<Vec<Vec<String>>>> {
        if self.caching
            && let Some(hit) = self.lock_cache().words.clone()
        {
            debug!("words cache hit");
            return Ok(hit);
        }

        let language = self.language();
        let words = self
            .sentences()?
            .iter()
            .map(|sentence| self.pipeline.tokenizer().tokenize(sentence, language))
            .collect::<Result<Vec<_>, _>>()?;
        let words = Arc::new(words);

        if self.caching {
            self.lock_cache().words = Some(Arc::clone(&words));
        }
        Ok(words)
    }

    /// All word tokens of the document, flattened.
    pub fn all_words(&self) -> MetricResult<Vec<String>> {
        Ok(self.words()?.iter().flatten().cloned().collect())
    }

    /// Tagged tokens, one sequence per sentence, at the given detail level.
    ///
    /// Each level is memoized separately, so asking for a different level
    /// never returns tokens tagged at another one.
    #[instrument(level = "debug", skip(self))]
    pub fn tagged_sentences(&self, level: TagLevel) -> MetricResult<TaggedSentences> {
        if self.caching
            && let Some(hit) = self.lock_cache().tagged.get(&level).cloned()
        {
            debug!(%level, "tagged sentences cache hit");
            return Ok(hit);
        }

        let language = self.language();
        let mut tagged = Vec::new();
        for words in self.words()?.iter() {
            let tokens = self.pipeline.tagger().tag(words, level, language)?;
            if tokens.len() != words.len() {
                return Err(crate::error::ProviderError::Contract {
                    provider: "tagger",
                    expected: words.len(),
                    got: tokens.len(),
                }
                .into());
            }
            tagged.push(tokens);
        }
        let tagged = Arc::new(tagged);
        debug!(%level, sentences = tagged.len(), "sentences tagged");

        if self.caching {
            self.lock_cache().tagged.insert(level, Arc::clone(&tagged));
        }
        Ok(tagged)
    }

    /// All tagged tokens, flattened.
    pub fn tagged_words(&self, level: TagLevel) -> MetricResult<Vec<TaggedToken>> {
        Ok(self
            .tagged_sentences(level)?
            .iter()
            .flatten()
            .cloned()
            .collect())
    }

    /// Lemmas per sentence (tag level 1).
    pub fn lemmatized_sentences(&self) -> MetricResult<Vec<Vec<String>>> {
        Ok(self
            .tagged_sentences(TagLevel::Lemma)?
            .iter()
            .map(|sentence| sentence.iter().map(|t| t.lemma.clone()).collect())
            .collect())
    }

    /// All lemmas, flattened (tag level 1).
    pub fn lemmatized_words(&self) -> MetricResult<Vec<String>> {
        Ok(self.lemmatized_sentences()?.into_iter().flatten().collect())
    }

    /// Lemmas with the punctuation placeholder removed, joined by spaces.
    pub fn lemmatized_text(&self) -> MetricResult<String> {
        let lemmas: Vec<String> = self
            .lemmatized_words()?
            .into_iter()
            .filter(|lemma| lemma != PUNCTUATION_LEMMA)
            .collect();
        Ok(lemmas.join(" "))
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first = self.paragraphs.first().map_or("", String::as_str);
        let preview: String = first.chars().take(70).collect();
        if let Some(title) = &self.title {
            write!(f, "{title}: ")?;
        }
        write!(f, "{preview}")?;
        if first.chars().count() > 70 {
            write!(f, "...")?;
        }
        Ok(())
    }
}

/// Split raw text into trimmed, non-blank lines.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Builder for [`Document`]s.
///
/// A file takes precedence over literal text. Markdown files (`.md`) are
/// reduced to prose first.
#[derive(Debug, Clone, Default)]
pub struct DocumentLoader {
    pipeline: Pipeline,
    file: Option<Utf8PathBuf>,
    text: Option<String>,
    title: Option<String>,
    author: Option<String>,
    source: Option<String>,
    caching: Option<bool>,
    max_bytes: Option<usize>,
}

impl DocumentLoader {
    /// Create a loader using the default German pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given collaborators.
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Read the text from a file.
    pub fn with_file(mut self, path: impl AsRef<Utf8Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use literal text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the source description. Defaults to the file path when loading
    /// from a file.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Enable or disable memoization of derived views (default: enabled).
    pub const fn with_caching(mut self, caching: bool) -> Self {
        self.caching = Some(caching);
        self
    }

    /// Reject files larger than `max_bytes`.
    pub const fn with_max_bytes(mut self, max_bytes: Option<usize>) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Build the document.
    ///
    /// # Errors
    ///
    /// [`MetricError::InvalidInput`] when neither a file nor text was given,
    /// when the text is empty, or when the file exceeds the size limit.
    /// [`MetricError::Io`] when the file cannot be read.
    #[instrument(skip(self), fields(file = ?self.file))]
    pub fn load(self) -> MetricResult<Document> {
        let (text, source) = match (&self.file, &self.text) {
            (Some(path), _) => (self.read_file(path)?, Some(path.to_string())),
            (None, Some(text)) => (text.clone(), None),
            (None, None) => {
                return Err(MetricError::InvalidInput(
                    "either a file or text must be provided".to_string(),
                ));
            }
        };

        if text.is_empty() {
            return Err(MetricError::InvalidInput("text is empty".to_string()));
        }

        let mut document = Document::from_text(&text, self.pipeline);
        document.title = self.title;
        document.author = self.author;
        document.source = self.source.or(source);
        document.caching = self.caching.unwrap_or(true);
        debug!(paragraphs = document.paragraphs.len(), "document loaded");
        Ok(document)
    }

    fn read_file(&self, path: &Utf8Path) -> MetricResult<String> {
        let io_error = |source| MetricError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(max) = self.max_bytes {
            let size = std::fs::metadata(path.as_std_path())
                .map_err(io_error)?
                .len() as usize;
            if size > max {
                return Err(MetricError::InvalidInput(format!(
                    "input too large: {path} is {size} bytes (limit: {max} bytes)"
                )));
            }
        }
        let content = std::fs::read_to_string(path.as_std_path()).map_err(io_error)?;
        if path.extension() == Some("md") {
            Ok(markdown::strip_to_paragraphs(&content))
        } else {
            Ok(content)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::ProviderError;
    use crate::nlp::{LexiconTagger, Tagger};

    fn doc(text: &str) -> Document {
        DocumentLoader::new().with_text(text).load().unwrap()
    }

    /// Counts calls, delegating to the default tagger.
    #[derive(Default)]
    struct CountingTagger {
        calls: AtomicUsize,
        inner: LexiconTagger,
    }

    impl Tagger for CountingTagger {
        fn tag(
            &self,
            words: &[String],
            level: TagLevel,
            language: &Language,
        ) -> Result<Vec<TaggedToken>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.tag(words, level, language)
        }
    }

    /// Drops the last token of every sentence.
    struct ShortTagger;

    impl Tagger for ShortTagger {
        fn tag(
            &self,
            words: &[String],
            level: TagLevel,
            language: &Language,
        ) -> Result<Vec<TaggedToken>, ProviderError> {
            let mut tokens = LexiconTagger::new().tag(words, level, language)?;
            tokens.pop();
            Ok(tokens)
        }
    }

    #[test]
    fn paragraphs_are_trimmed_lines() {
        let d = doc("  Erster Absatz.  \n\n   \nZweiter Absatz.\n");
        assert_eq!(d.paragraphs(), ["Erster Absatz.", "Zweiter Absatz."]);
        assert_eq!(d.plaintext(), "Erster Absatz.\nZweiter Absatz.");
    }

    #[test]
    fn sentences_flatten_paragraphs() {
        let d = doc("Der Hund lief. Er war schnell.\nDie Katze schlief.");
        let sentences = d.sentences().unwrap();
        assert_eq!(
            *sentences,
            vec!["Der Hund lief.", "Er war schnell.", "Die Katze schlief."]
        );
    }

    #[test]
    fn words_per_sentence() {
        let d = doc("Der Hund lief. Er kam.");
        let words = d.words().unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[1], vec!["Er", "kam", "."]);
        assert_eq!(d.all_words().unwrap().len(), 7);
    }

    #[test]
    fn tagged_sentences_match_sentence_count() {
        let d = doc("Der Hund lief. Er kam.\nDann schlief er.");
        for level in [TagLevel::Lemma, TagLevel::Stem, TagLevel::Detailed] {
            assert_eq!(
                d.tagged_sentences(level).unwrap().len(),
                d.sentences().unwrap().len()
            );
        }
    }

    #[test]
    fn lemmatized_views() {
        let d = doc("Die Hunde sind da.");
        let lemmas = d.lemmatized_words().unwrap();
        assert_eq!(lemmas[0], "der");
        assert_eq!(lemmas[2], "sein");
        assert_eq!(lemmas.last().map(String::as_str), Some(PUNCTUATION_LEMMA));
        assert!(!d.lemmatized_text().unwrap().contains("--"));
    }

    #[test]
    fn cache_is_keyed_by_tag_level() {
        let tagger = Arc::new(CountingTagger::default());
        let pipeline = Pipeline::default().with_tagger(tagger.clone());
        let d = Document::from_text("Die Häuser stehen. Das Haus steht.", pipeline);

        let lemma = d.tagged_sentences(TagLevel::Lemma).unwrap();
        assert!(lemma[0][1].stem.is_none());
        assert_eq!(tagger.calls.load(Ordering::SeqCst), 2);

        d.tagged_sentences(TagLevel::Lemma).unwrap();
        assert_eq!(tagger.calls.load(Ordering::SeqCst), 2);

        let stem = d.tagged_sentences(TagLevel::Stem).unwrap();
        assert!(stem[0][1].stem.is_some());
        assert_eq!(tagger.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn caching_disabled_recomputes() {
        let tagger = Arc::new(CountingTagger::default());
        let pipeline = Pipeline::default().with_tagger(tagger.clone());
        let d = DocumentLoader::new()
            .with_pipeline(pipeline)
            .with_text("Der Hund lief.")
            .with_caching(false)
            .load()
            .unwrap();
        d.tagged_sentences(TagLevel::Lemma).unwrap();
        d.tagged_sentences(TagLevel::Lemma).unwrap();
        assert_eq!(tagger.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn invalidate_forces_recompute() {
        let tagger = Arc::new(CountingTagger::default());
        let pipeline = Pipeline::default().with_tagger(tagger.clone());
        let d = Document::from_text("Der Hund lief.", pipeline);
        d.tagged_sentences(TagLevel::Lemma).unwrap();
        d.invalidate();
        d.tagged_sentences(TagLevel::Lemma).unwrap();
        assert_eq!(tagger.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn tagger_contract_is_checked() {
        let pipeline = Pipeline::default().with_tagger(Arc::new(ShortTagger));
        let d = Document::from_text("Der Hund lief.", pipeline);
        let err = d.tagged_sentences(TagLevel::Lemma).unwrap_err();
        assert!(matches!(
            err,
            MetricError::Provider(ProviderError::Contract { .. })
        ));
    }

    #[test]
    fn loader_requires_input() {
        let err = DocumentLoader::new().load().unwrap_err();
        assert!(matches!(err, MetricError::InvalidInput(_)));
        let err = DocumentLoader::new().with_text("").load().unwrap_err();
        assert!(matches!(err, MetricError::InvalidInput(_)));
    }

    #[test]
    fn whitespace_only_text_is_an_empty_document() {
        let d = doc("  \n \n");
        assert!(d.paragraphs().is_empty());
        assert!(d.sentences().unwrap().is_empty());
    }

    #[test]
    fn file_overrides_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("text.txt")).unwrap();
        std::fs::write(&path, "Aus der Datei.\n").unwrap();
        let d = DocumentLoader::new()
            .with_text("Aus dem Text.")
            .with_file(&path)
            .load()
            .unwrap();
        assert_eq!(d.paragraphs(), ["Aus der Datei."]);
        assert_eq!(d.source(), Some(path.as_str()));
    }

    #[test]
    fn text_input_keeps_metadata() {
        let d = DocumentLoader::new()
            .with_text("Ein Satz.\nNoch ein Absatz.")
            .with_title("Hausaufgabe")
            .with_author("Anna")
            .load()
            .unwrap();
        assert_eq!(d.paragraphs().len(), 2);
        assert_eq!(d.title(), Some("Hausaufgabe"));
        assert_eq!(d.author(), Some("Anna"));
        assert_eq!(d.source(), None);
    }

    #[test]
    fn markdown_files_are_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("text.md")).unwrap();
        std::fs::write(&path, "# Titel\n\nErster Absatz.\n\nZweiter Absatz.\n").unwrap();
        let d = DocumentLoader::new().with_file(&path).load().unwrap();
        assert_eq!(d.paragraphs(), ["Erster Absatz.", "Zweiter Absatz."]);
    }

    #[test]
    fn size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("big.txt")).unwrap();
        std::fs::write(&path, "Ein Satz.\n".repeat(10)).unwrap();
        let err = DocumentLoader::new()
            .with_file(&path)
            .with_max_bytes(Some(10))
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("input too large"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DocumentLoader::new()
            .with_file("/nonexistent/text.txt")
            .load()
            .unwrap_err();
        assert!(matches!(err, MetricError::Io { .. }));
    }

    #[test]
    fn display_shows_preview() {
        let long = "Wort ".repeat(30);
        let d = DocumentLoader::new()
            .with_text(long.clone())
            .with_title("Hausaufgabe")
            .load()
            .unwrap();
        let shown = d.to_string();
        assert!(shown.starts_with("Hausaufgabe: Wort"));
        assert!(shown.ends_with("..."));
        assert_eq!(doc("Kurz.").to_string(), "Kurz.");
    }
}
