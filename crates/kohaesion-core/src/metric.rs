//! Metric catalogue and full-document analysis.
//!
//! Every index is a [`Metric`]: a Coh-Metrix code, a readable name and a
//! function from a [`Document`] to a [`MetricValue`]. [`catalogue`] builds
//! all of them against a [`MetricContext`] holding the optional semantic
//! space and frequency source, and [`analyze`] runs a selection and collects
//! one [`MetricRow`] per metric.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::cohesion::lsa::{self, Unit};
use crate::cohesion::referential::{self, Overlap};
use crate::cohesion::{OverlapRatio, Scope, Statistic};
use crate::descriptives::{self, Distribution};
use crate::document::Document;
use crate::error::{MetricError, MetricResult};
use crate::nlp::{FrequencySource, TagLevel};
use crate::readability;
use crate::semantic::SemanticSpace;
use crate::tags::WordClass;
use crate::word_information::{self, Norm, Person};

/// Every metric code in catalogue order.
pub const ALL_CODES: &[&str] = &[
    "DESPC", "DESSC", "DESWC", "DESPL", "DESSL", "DESWLsy", "DESWLlt", "CRFNO1", "CRFNOa",
    "CRFAO1", "CRFAOa", "CRFSO1", "CRFSOa", "CRFCWO1", "CRFCWOa", "LSASS1", "LSASSp", "LSAPP1",
    "LSAPPa", "LSAGN", "RDLIX", "RDWSTF", "RDFRE", "WRDNOUN", "WRDVERB", "WRDADJ", "WRDADV",
    "WRDPRO", "WRDCONT", "WRDFUNC", "WRDPRP1s", "WRDPRP1p", "WRDPRP2", "WRDPRP3s", "WRDPRP3p",
    "WRDFRQc", "WRDFRQa", "WRDFRQmc", "WRDAOAc", "WRDFAMc", "WRDCNCc", "WRDIMGc", "WRDMEAc",
    "WRDPOLc", "WRDHYPnv",
];

/// Group a metric belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Category {
    /// Counts and lengths.
    Descriptive,
    /// Word overlap between sentences.
    Referential,
    /// Latent semantic similarity.
    Lsa,
    /// Readability formulas.
    Readability,
    /// Part-of-speech incidences and word frequencies.
    WordInformation,
}

impl Category {
    /// Name accepted when selecting metrics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Descriptive => "descriptive",
            Self::Referential => "referential",
            Self::Lsa => "lsa",
            Self::Readability => "readability",
            Self::WordInformation => "word_information",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// A plain count.
    Count(usize),
    /// Overlapping pairs out of compared pairs.
    Ratio(OverlapRatio),
    /// Mean, standard deviation and number of pair values.
    Statistic(Statistic),
    /// Mean, standard deviation and total of unit lengths.
    Distribution(Distribution),
    /// A single score.
    Score(f64),
}

impl MetricValue {
    /// The headline number: the count, ratio, mean or score.
    pub fn primary(&self) -> f64 {
        match self {
            Self::Count(n) => *n as f64,
            Self::Ratio(r) => r.ratio(),
            Self::Statistic(s) => s.mean,
            Self::Distribution(d) => d.mean,
            Self::Score(v) => *v,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Ratio(r) => write!(f, "{:.3} ({}/{})", r.ratio(), r.overlapping, r.compared),
            Self::Statistic(s) => write!(f, "{:.3} ± {:.3} (n={})", s.mean, s.stdev, s.n),
            Self::Distribution(d) => {
                write!(f, "{:.3} ± {:.3} (total {})", d.mean, d.stdev, d.total)
            }
            Self::Score(v) => write!(f, "{v:.3}"),
        }
    }
}

/// A single index computed over a document.
pub trait Metric: Send + Sync {
    /// Coh-Metrix style code, e.g. `CRFNO1`.
    fn code(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Group the metric belongs to.
    fn category(&self) -> Category;

    /// Compute the metric.
    fn compute(&self, document: &Document) -> MetricResult<MetricValue>;
}

type ComputeFn = Box<dyn Fn(&Document) -> MetricResult<MetricValue> + Send + Sync>;

/// A [`Metric`] backed by a closure.
pub struct FnMetric {
    code: &'static str,
    name: &'static str,
    category: Category,
    compute: ComputeFn,
}

impl FnMetric {
    /// Wrap `compute` as a metric.
    pub fn new<F>(code: &'static str, name: &'static str, category: Category, compute: F) -> Self
    where
        F: Fn(&Document) -> MetricResult<MetricValue> + Send + Sync + 'static,
    {
        Self {
            code,
            name,
            category,
            compute: Box::new(compute),
        }
    }
}

impl fmt::Debug for FnMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMetric")
            .field("code", &self.code)
            .field("name", &self.name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

impl Metric for FnMetric {
    fn code(&self) -> &'static str {
        self.code
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn category(&self) -> Category {
        self.category
    }

    fn compute(&self, document: &Document) -> MetricResult<MetricValue> {
        (self.compute)(document)
    }
}

/// Shared collaborators some metrics need.
#[derive(Clone)]
pub struct MetricContext {
    space: Option<Arc<SemanticSpace>>,
    frequencies: Option<Arc<dyn FrequencySource>>,
    stem_level: TagLevel,
}

impl Default for MetricContext {
    fn default() -> Self {
        Self {
            space: None,
            frequencies: None,
            stem_level: TagLevel::Stem,
        }
    }
}

impl fmt::Debug for MetricContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricContext")
            .field("space", &self.space.as_ref().map(|s| s.n_components()))
            .field("frequencies", &self.frequencies.is_some())
            .field("stem_level", &self.stem_level)
            .finish()
    }
}

impl MetricContext {
    /// Context without a semantic space or frequency source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `space` for the LSA metrics.
    pub fn with_space(mut self, space: Arc<SemanticSpace>) -> Self {
        self.space = Some(space);
        self
    }

    /// Use `frequencies` for the word frequency metrics.
    pub fn with_frequencies(mut self, frequencies: Arc<dyn FrequencySource>) -> Self {
        self.frequencies = Some(frequencies);
        self
    }

    /// Tag level stem overlap is computed at.
    pub const fn with_stem_level(mut self, level: TagLevel) -> Self {
        self.stem_level = level;
        self
    }
}

fn need_space<'a>(
    space: Option<&'a SemanticSpace>,
    metric: &str,
) -> MetricResult<&'a SemanticSpace> {
    space.ok_or_else(|| {
        MetricError::PreconditionViolation(format!(
            "{metric} needs a semantic space built from a reference corpus"
        ))
    })
}

fn need_frequencies<'a>(
    frequencies: Option<&'a dyn FrequencySource>,
    metric: &str,
) -> MetricResult<&'a dyn FrequencySource> {
    frequencies.ok_or_else(|| {
        MetricError::PreconditionViolation(format!("{metric} needs a word frequency table"))
    })
}

/// Build every metric against `context`, in [`ALL_CODES`] order.
pub fn catalogue(context: &MetricContext) -> Vec<Box<dyn Metric>> {
    let mut metrics: Vec<Box<dyn Metric>> = Vec::with_capacity(ALL_CODES.len());
    let mut push = |metric: FnMetric| metrics.push(Box::new(metric));

    // Descriptive
    use Category::Descriptive;
    push(FnMetric::new("DESPC", "paragraph count", Descriptive, |d| {
        Ok(MetricValue::Count(descriptives::paragraph_count(d)))
    }));
    push(FnMetric::new("DESSC", "sentence count", Descriptive, |d| {
        descriptives::sentence_count(d).map(MetricValue::Count)
    }));
    push(FnMetric::new("DESWC", "word count", Descriptive, |d| {
        descriptives::word_count(d).map(MetricValue::Count)
    }));
    push(FnMetric::new("DESPL", "paragraph length in sentences", Descriptive, |d| {
        descriptives::paragraph_length(d).map(MetricValue::Distribution)
    }));
    push(FnMetric::new("DESSL", "sentence length in words", Descriptive, |d| {
        descriptives::sentence_length(d).map(MetricValue::Distribution)
    }));
    push(FnMetric::new("DESWLsy", "word length in syllables", Descriptive, |d| {
        descriptives::word_length_syllables(d).map(MetricValue::Distribution)
    }));
    push(FnMetric::new("DESWLlt", "word length in characters", Descriptive, |d| {
        descriptives::word_length_characters(d).map(MetricValue::Distribution)
    }));

    // Referential cohesion
    let stem_level = context.stem_level;
    for (code, overlap, scope) in [
        ("CRFNO1", Overlap::Noun, Scope::Local),
        ("CRFNOa", Overlap::Noun, Scope::Global),
        ("CRFAO1", Overlap::Argument, Scope::Local),
        ("CRFAOa", Overlap::Argument, Scope::Global),
        ("CRFSO1", Overlap::Stem, Scope::Local),
        ("CRFSOa", Overlap::Stem, Scope::Global),
    ] {
        let level = if overlap == Overlap::Stem {
            stem_level
        } else {
            overlap.tag_level()
        };
        push(FnMetric::new(
            code,
            overlap.metric_name(scope),
            Category::Referential,
            move |d| {
                referential::binary_overlap_at(d, overlap, scope, level).map(MetricValue::Ratio)
            },
        ));
    }
    for (code, scope) in [("CRFCWO1", Scope::Local), ("CRFCWOa", Scope::Global)] {
        push(FnMetric::new(
            code,
            Overlap::ContentWord.metric_name(scope),
            Category::Referential,
            move |d| referential::content_word_overlap(d, scope).map(MetricValue::Statistic),
        ));
    }

    // LSA
    for (code, unit, scope) in [
        ("LSASS1", Unit::Sentence, Scope::Local),
        ("LSASSp", Unit::Sentence, Scope::Global),
        ("LSAPP1", Unit::Paragraph, Scope::Local),
        ("LSAPPa", Unit::Paragraph, Scope::Global),
    ] {
        let space = context.space.clone();
        let name = unit.metric_name(scope);
        push(FnMetric::new(code, name, Category::Lsa, move |d| {
            let space = need_space(space.as_deref(), name)?;
            lsa::lsa_overlap(d, space, unit, scope).map(MetricValue::Statistic)
        }));
    }
    let space = context.space.clone();
    push(FnMetric::new("LSAGN", "LSA given/new", Category::Lsa, move |d| {
        let space = need_space(space.as_deref(), "LSA given/new")?;
        lsa::given_new(d, space).map(MetricValue::Statistic)
    }));

    // Readability
    use Category::Readability;
    push(FnMetric::new("RDLIX", "LIX", Readability, |d| {
        readability::lix(d).map(MetricValue::Score)
    }));
    push(FnMetric::new("RDWSTF", "Wiener Sachtextformel", Readability, |d| {
        readability::wiener_sachtextformel(d).map(MetricValue::Score)
    }));
    push(FnMetric::new("RDFRE", "Flesch Reading Ease", Readability, |d| {
        readability::flesch_reading_ease(d).map(MetricValue::Score)
    }));

    // Word information
    use Category::WordInformation;
    for (code, name, class) in [
        ("WRDNOUN", "noun incidence", WordClass::Noun),
        ("WRDVERB", "verb incidence", WordClass::Verb),
        ("WRDADJ", "adjective incidence", WordClass::Adjective),
        ("WRDADV", "adverb incidence", WordClass::Adverb),
        ("WRDPRO", "pronoun incidence", WordClass::Pronoun),
        ("WRDCONT", "content word incidence", WordClass::ContentWord),
        ("WRDFUNC", "function word incidence", WordClass::FunctionWord),
    ] {
        push(FnMetric::new(code, name, WordInformation, move |d| {
            word_information::class_incidence(d, class).map(MetricValue::Score)
        }));
    }
    for (code, name, person) in [
        ("WRDPRP1s", "first person singular pronoun incidence", Person::FirstSingular),
        ("WRDPRP1p", "first person plural pronoun incidence", Person::FirstPlural),
        ("WRDPRP2", "second person pronoun incidence", Person::Second),
        ("WRDPRP3s", "third person singular pronoun incidence", Person::ThirdSingular),
        ("WRDPRP3p", "third person plural pronoun incidence", Person::ThirdPlural),
    ] {
        push(FnMetric::new(code, name, WordInformation, move |d| {
            word_information::pronoun_incidence(d, person).map(MetricValue::Score)
        }));
    }

    type FrequencyFn = fn(&Document, &dyn FrequencySource) -> MetricResult<f64>;
    let frequency_metrics: [(&'static str, &'static str, FrequencyFn); 3] = [
        (
            "WRDFRQc",
            "content word frequency",
            word_information::content_word_frequency,
        ),
        ("WRDFRQa", "log frequency of all words", word_information::log_frequency),
        (
            "WRDFRQmc",
            "minimum log frequency of content words",
            word_information::minimum_log_frequency,
        ),
    ];
    for (code, name, compute) in frequency_metrics {
        let frequencies = context.frequencies.clone();
        push(FnMetric::new(code, name, WordInformation, move |d| {
            let source = need_frequencies(frequencies.as_deref(), name)?;
            compute(d, source).map(MetricValue::Score)
        }));
    }

    for (code, norm) in [
        ("WRDAOAc", Norm::AgeOfAcquisition),
        ("WRDFAMc", Norm::Familiarity),
        ("WRDCNCc", Norm::Concreteness),
        ("WRDIMGc", Norm::Imageability),
        ("WRDMEAc", Norm::Meaningfulness),
        ("WRDPOLc", Norm::Polysemy),
        ("WRDHYPnv", Norm::Hypernymy),
    ] {
        push(FnMetric::new(code, norm.metric_name(), WordInformation, move |d| {
            word_information::norm_rating(d, norm).map(MetricValue::Score)
        }));
    }

    metrics
}

/// Why a metric produced no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricFailure {
    /// Failure kind, see [`MetricError::kind`].
    pub kind: &'static str,
    /// Full error message.
    pub message: String,
}

/// One line of an analysis report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    /// Metric code.
    pub code: &'static str,
    /// Metric name.
    pub name: &'static str,
    /// Metric group.
    pub category: Category,
    /// The computed value, if the metric succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<MetricValue>,
    /// The failure, if it did not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<MetricFailure>,
}

/// Results of running a set of metrics over one document.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Where the document came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Document title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// One row per metric, in catalogue order.
    pub metrics: Vec<MetricRow>,
}

impl AnalysisReport {
    /// Row for `code`, if it was run.
    pub fn get(&self, code: &str) -> Option<&MetricRow> {
        self.metrics.iter().find(|row| row.code == code)
    }

    /// Number of metrics that failed.
    pub fn failures(&self) -> usize {
        self.metrics.iter().filter(|row| row.error.is_some()).count()
    }
}

/// Pick metrics by code or category name (case-insensitive).
///
/// `None` selects everything. The result keeps catalogue order.
///
/// # Errors
///
/// [`MetricError::InvalidInput`] naming the first entry that matches
/// neither a code nor a category.
pub fn select<'a>(
    metrics: &'a [Box<dyn Metric>],
    selection: Option<&[String]>,
) -> MetricResult<Vec<&'a dyn Metric>> {
    let Some(selection) = selection else {
        return Ok(metrics.iter().map(AsRef::as_ref).collect());
    };
    let is_match = |metric: &dyn Metric, entry: &str| {
        metric.code().eq_ignore_ascii_case(entry)
            || metric.category().as_str().eq_ignore_ascii_case(entry)
    };
    for entry in selection {
        if !metrics.iter().any(|m| is_match(m.as_ref(), entry.as_str())) {
            return Err(MetricError::InvalidInput(format!(
                "unknown metric or category: {entry}"
            )));
        }
    }
    Ok(metrics
        .iter()
        .map(AsRef::as_ref)
        .filter(|m| selection.iter().any(|entry| is_match(*m, entry.as_str())))
        .collect())
}

/// Run the selected metrics over `document`.
///
/// Metric failures (too little text, unsupported language, missing space,
/// unimplemented norm) are recorded in the row. Collaborator and I/O
/// failures abort the analysis.
#[tracing::instrument(skip_all, fields(source = document.source()))]
pub fn analyze(
    document: &Document,
    metrics: &[Box<dyn Metric>],
    selection: Option<&[String]>,
) -> MetricResult<AnalysisReport> {
    let selected = select(metrics, selection)?;
    let mut rows = Vec::with_capacity(selected.len());
    for metric in selected {
        let (value, error) = match metric.compute(document) {
            Ok(value) => (Some(value), None),
            Err(err @ (MetricError::Provider(_) | MetricError::Io { .. })) => return Err(err),
            Err(err) => {
                tracing::debug!(code = metric.code(), error = %err, "metric failed");
                let failure = MetricFailure {
                    kind: err.kind(),
                    message: err.to_string(),
                };
                (None, Some(failure))
            }
        };
        rows.push(MetricRow {
            code: metric.code(),
            name: metric.name(),
            category: metric.category(),
            value,
            error,
        });
    }
    let report = AnalysisReport {
        source: document.source().map(String::from),
        title: document.title().map(String::from),
        metrics: rows,
    };
    tracing::info!(
        metrics = report.metrics.len(),
        failures = report.failures(),
        "analysis complete"
    );
    Ok(report)
}
