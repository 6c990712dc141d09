//! Curated German word lists.
//!
//! Abbreviations guard the sentence splitter; the closed-class vocabulary
//! backs the default tagger.

pub mod abbreviations;
pub mod closed_class;
