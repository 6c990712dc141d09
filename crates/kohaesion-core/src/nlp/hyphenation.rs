//! Vowel-group hyphenation for syllable counting.
//!
//! Finds syllable nuclei (vowel groups, with German diphthongs counted as
//! one) and places a break before the last consonant unit between two
//! nuclei. `sch`, `ch`, `ck`, `ph` and `th` are kept together.

use crate::error::ProviderError;
use crate::language::Language;

use super::Hyphenator;

const DIPHTHONGS: &[&str] = &["ei", "ie", "ai", "au", "eu", "äu", "ey", "ay", "aa", "ee", "oo"];
const CONSONANT_UNITS: &[&str] = &["sch", "ch", "ck", "ph", "th"];

/// Default hyphenator: syllable boundaries between vowel groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct VowelGroupHyphenator;

impl Hyphenator for VowelGroupHyphenator {
    fn positions(&self, word: &str, language: &Language) -> Result<Vec<usize>, ProviderError> {
        tracing::trace!(word, %language, "hyphenating");
        Ok(hyphenation_points(word))
    }
}

const fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y' | 'ä' | 'ö' | 'ü')
}

/// Byte offsets at which `word` can be split into syllables.
pub fn hyphenation_points(word: &str) -> Vec<usize> {
    let chars: Vec<(usize, char)> = word
        .char_indices()
        .map(|(i, c)| (i, c.to_lowercase().next().unwrap_or(c)))
        .collect();

    // Mark consonantal u in "qu"
    let vowel: Vec<bool> = chars
        .iter()
        .enumerate()
        .map(|(i, &(_, c))| is_vowel(c) && !(c == 'u' && i > 0 && chars[i - 1].1 == 'q'))
        .collect();

    let nuclei = find_nuclei(&chars, &vowel);
    let mut points = Vec::new();

    for pair in nuclei.windows(2) {
        let (_, prev_end) = pair[0];
        let (next_start, _) = pair[1];
        let units = consonant_units(&chars[prev_end..next_start]);
        let split = match units.last() {
            Some(&offset) if units.len() > 1 => prev_end + offset,
            Some(_) => prev_end,
            None => next_start,
        };
        if split > 0 && split < chars.len() && chars[split].1.is_alphabetic() {
            points.push(chars[split].0);
        }
    }

    points
}

/// Vowel groups as `[start, end)` char index ranges.
fn find_nuclei(chars: &[(usize, char)], vowel: &[bool]) -> Vec<(usize, usize)> {
    let mut nuclei = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !vowel[i] {
            i += 1;
            continue;
        }
        let start = i;
        i += 1;
        if i < chars.len() && vowel[i] {
            let pair: String = [chars[start].1, chars[i].1].iter().collect();
            if DIPHTHONGS.contains(&pair.as_str()) {
                i += 1;
            }
        }
        nuclei.push((start, i));
    }
    nuclei
}

/// Start offsets (relative to `gap`) of the consonant units in a gap.
fn consonant_units(gap: &[(usize, char)]) -> Vec<usize> {
    let text: Vec<char> = gap.iter().map(|&(_, c)| c).collect();
    let mut units = Vec::new();
    let mut i = 0;
    while i < text.len() {
        units.push(i);
        let rest: String = text[i..].iter().collect();
        let width = CONSONANT_UNITS
            .iter()
            .find(|unit| rest.starts_with(*unit))
            .map_or(1, |unit| unit.chars().count());
        i += width;
    }
    units
}
