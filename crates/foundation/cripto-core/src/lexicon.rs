//! Reference Word Lists
//!
//! Short, very frequent words used to score shift-cipher candidates. A
//! candidate earns `word.len()` points for every (overlapping) occurrence of
//! each word in its lowercased text, plus one point per space.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

const ENGLISH: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i",
    "it", "for", "not", "on", "with", "he", "as", "you", "do", "at",
    "this", "but", "his", "by", "from", "they", "we", "say", "her", "she",
    "or", "an", "will", "my", "one", "all", "would", "there", "their", "what",
    "so", "up", "out", "if", "about", "who", "get", "which", "go", "me",
    "when", "make", "can", "like", "time",
];

const SPANISH: &[&str] = &[
    "de", "la", "que", "el", "en", "y", "a", "los", "se", "del", "las",
    "un", "por", "con", "no", "una", "su", "para", "es", "al", "lo", "como",
    "mas", "o", "pero", "sus", "le", "ha", "me", "si", "sin", "sobre", "este",
    "ya", "entre", "cuando", "todo", "esta", "ser", "son", "dos", "tambien", "fue", "habia",
    "era", "muy", "anos", "hasta", "desde", "gran", "esto", "nos", "mi", "mucho", "usted",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lexicon {
    #[default]
    English,
    Spanish,
}

impl Lexicon {
    pub fn words(&self) -> &'static [&'static str] {
        match self {
            Lexicon::English => ENGLISH,
            Lexicon::Spanish => SPANISH,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Lexicon::English => "english",
            Lexicon::Spanish => "spanish",
        }
    }

    /// Local plausibility score of a decoded text.
    pub fn score(&self, text: &str) -> u32 {
        let lower = text.to_lowercase();
        let words: u32 = self.words()
            .iter()
            .map(|word| word.len() as u32 * occurrences(&lower, word))
            .sum();
        let spaces = text.chars().filter(|&c| c == ' ').count() as u32;
        words + spaces
    }
}

impl fmt::Display for Lexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Lexicon {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" | "en" => Ok(Lexicon::English),
            "spanish" | "es" | "espanol" => Ok(Lexicon::Spanish),
            _ => Err(Error::UnknownLexicon(s.to_string())),
        }
    }
}

/// Overlapping occurrence count of `needle` in `haystack`.
fn occurrences(haystack: &str, needle: &str) -> u32 {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || needle.len() > hay.len() {
        return 0;
    }
    hay.windows(needle.len()).filter(|w| *w == needle).count() as u32
}
