//! Documents in languages without readability coefficients.

use kohaesion_core::cohesion::referential;
use kohaesion_core::metric::Category;
use kohaesion_core::readability::TextCounts;
use kohaesion_core::{
    Document, DocumentLoader, Language, MetricContext, Pipeline, Scope, TagLevel, analyze,
    catalogue,
};

const FRENCH: &str = "Le chien aboie fort. Le chien chasse le chat.\nLe chat fuit dans le jardin.";

fn french() -> Document {
    DocumentLoader::new()
        .with_pipeline(Pipeline::new(Language::Other("french".to_string())))
        .with_text(FRENCH)
        .load()
        .unwrap()
}

#[test]
fn representation_does_not_depend_on_language() {
    let document = french();
    let sentences = document.sentences().unwrap();
    assert_eq!(sentences.len(), 3);
    for level in [TagLevel::Lemma, TagLevel::Stem, TagLevel::Detailed] {
        assert_eq!(document.tagged_sentences(level).unwrap().len(), 3);
    }
    let counts = TextCounts::from_document(&document).unwrap();
    assert_eq!(counts.sentences, 3);
    assert!(counts.syllables >= counts.words);
}

#[test]
fn cohesion_metrics_resolve() {
    let document = french();
    let content = referential::content_word_overlap(&document, Scope::Local).unwrap();
    assert_eq!(content.n, 2);
    // "le chien" repeats in the first pair, "le chat" in the second
    assert!(content.mean > 0.0);
    let nouns = referential::noun_overlap(&document, Scope::Global).unwrap();
    assert_eq!(nouns.compared, 3);
}

#[test]
fn only_readability_rows_report_the_language() {
    let document = french();
    let metrics = catalogue(&MetricContext::new());
    let report = analyze(&document, &metrics, None).unwrap();
    assert_eq!(report.metrics.len(), metrics.len());

    for row in &report.metrics {
        let kind = row.error.as_ref().map(|failure| failure.kind);
        if row.category == Category::Readability {
            assert_eq!(kind, Some("unsupported_language"), "{}", row.code);
        } else {
            assert_ne!(kind, Some("unsupported_language"), "{}", row.code);
        }
    }
    assert!(report.get("DESWC").and_then(|row| row.value.as_ref()).is_some());
    assert!(report.get("CRFCWO1").and_then(|row| row.value.as_ref()).is_some());
}
