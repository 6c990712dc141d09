//! Document language selector.
//!
//! The language is passed through to the collaborators (tokenizer, tagger,
//! hyphenator) and gates the readability formulas. Only German has a full
//! set of coefficients.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    /// German (default).
    #[default]
    German,
    /// English. Only the Flesch formula carries English coefficients.
    English,
    /// Any other language name; accepted for representation, rejected by
    /// the readability formulas.
    Other(String),
}

impl Language {
    /// Returns the language as the lowercase name used in configuration.
    pub fn as_str(&self) -> &str {
        match self {
            Self::German => "german",
            Self::English => "english",
            Self::Other(name) => name,
        }
    }

    /// Returns the locale code used by hyphenation dictionaries.
    pub fn locale(&self) -> Option<&'static str> {
        match self {
            Self::German => Some("de_DE"),
            Self::English => Some("en_US"),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Ok(match lower.as_str() {
            "german" | "deutsch" | "de" | "de_de" | "de-de" => Self::German,
            "english" | "en" | "en_us" | "en-us" | "en_gb" | "en-gb" => Self::English,
            _ => Self::Other(lower),
        })
    }
}

impl TryFrom<String> for Language {
    type Error = std::convert::Infallible;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("Deutsch".parse::<Language>().unwrap(), Language::German);
        assert_eq!("de-DE".parse::<Language>().unwrap(), Language::German);
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!(
            "French".parse::<Language>().unwrap(),
            Language::Other("french".to_string())
        );
    }

    #[test]
    fn serde_round_trips_as_plain_string() {
        let json = serde_json::to_string(&Language::German).unwrap();
        assert_eq!(json, "\"german\"");
        let back: Language = serde_json::from_str("\"dutch\"").unwrap();
        assert_eq!(back, Language::Other("dutch".to_string()));
        assert_eq!(back.locale(), None);
    }
}
