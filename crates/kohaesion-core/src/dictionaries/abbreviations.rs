//! Abbreviation dictionary for sentence boundary detection.
//!
//! German abbreviations that should not trigger sentence breaks when
//! followed by a period. Entries are stored lowercase, without the final
//! period.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Abbreviations that should not trigger sentence breaks.
pub static ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set = HashSet::new();

    // Titles and forms of address
    set.extend([
        "dr", "prof", "dipl", "ing", "hr", "fr", "frl", "med", "phil", "rer", "nat", "jur",
        "habil", "mag", "st",
    ]);

    // Multi-part abbreviations
    set.extend([
        "z.b", "d.h", "u.a", "u.ä", "o.ä", "z.t", "v.a", "i.d.r", "s.o", "s.u", "u.u", "z.z",
        "zz", "z.zt", "a.a.o", "i.a", "m.e", "o.g", "u.s.w", "bzw", "usw", "etc", "vgl", "ggf",
        "evtl", "sog", "bspw", "inkl", "exkl", "zzgl", "abzgl", "ca", "vs", "ebd", "ff",
    ]);

    // Dates and time
    set.extend([
        "jan", "feb", "mär", "apr", "jun", "jul", "aug", "sep", "sept", "okt", "nov", "dez",
        "mo", "di", "mi", "do", "fr", "sa", "so", "jh", "jhd", "chr", "v.chr", "n.chr",
    ]);

    // Addresses and organisations
    set.extend([
        "str", "nr", "tel", "abt", "gmbh", "e.v", "co", "kg", "bzgl", "abs", "art", "kap",
    ]);

    // References and publishing
    set.extend([
        "s", "bd", "hrsg", "aufl", "anm", "abb", "tab", "verf", "übers", "ders", "dies",
    ]);

    // Units and quantities
    set.extend(["mio", "mrd", "tsd", "std", "min", "sek", "max", "ggü", "allg"]);

    set
});

/// Check if a word is a known abbreviation.
pub fn is_abbreviation(word: &str) -> bool {
    let word_lower = word.to_lowercase();
    let trimmed = word_lower.trim_matches('.');
    ABBREVIATIONS.contains(trimmed)
}
