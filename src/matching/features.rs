//! Decomposition of section and row text into comparable features.
//!
//! A section such as `"Infield Reserve IFR7 Box"` is split around its first
//! digit-bearing word:
//!
//! | Feature            | Value               |
//! |--------------------|---------------------|
//! | preceding phrase   | `"infield reserve"` |
//! | prefix             | `"ifr"`             |
//! | digits             | `"7"`               |
//! | suffix             | `""`                |
//! | following phrase   | `"box"`             |

use serde::Serialize;

/// Features of a single whitespace-free token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WordFeatures {
    /// Characters before the first digit run
    pub prefix: String,
    /// The first contiguous run of ASCII digits
    pub digits: String,
    /// Everything after the first digit run
    pub suffix: String,
}

impl WordFeatures {
    /// Split a token into prefix, first digit run and suffix.
    ///
    /// A token without digits is all prefix.
    pub fn extract(word: &str) -> Self {
        match word.find(|c: char| c.is_ascii_digit()) {
            Some(start) => {
                let rest = &word[start..];
                let len = rest
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(rest.len());
                Self {
                    prefix: word[..start].to_string(),
                    digits: rest[..len].to_string(),
                    suffix: rest[len..].to_string(),
                }
            }
            None => Self {
                prefix: word.to_string(),
                ..Self::default()
            },
        }
    }
}

/// Features of a complete section string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionFeatures {
    /// Words before the first word containing a digit
    pub preceding_phrase: String,
    /// Non-digit characters leading the first digit-bearing word
    pub prefix: String,
    /// First digit run of the first digit-bearing word
    pub digits: String,
    /// Characters trailing that digit run
    pub suffix: String,
    /// Words after the first digit-bearing word
    pub following_phrase: String,
}

impl SectionFeatures {
    /// Extract features from a section string (case and surrounding whitespace ignored)
    pub fn extract(section: &str) -> Self {
        let lowered = section.trim().to_lowercase();
        let mut preceding: Vec<&str> = Vec::new();
        let mut following: Vec<&str> = Vec::new();
        let mut anchor: Option<WordFeatures> = None;

        for word in lowered.split_whitespace() {
            if anchor.is_some() {
                following.push(word);
            } else if has_digit(word) {
                anchor = Some(WordFeatures::extract(word));
            } else {
                preceding.push(word);
            }
        }

        let WordFeatures {
            prefix,
            digits,
            suffix,
        } = anchor.unwrap_or_default();

        Self {
            preceding_phrase: preceding.join(" "),
            prefix,
            digits,
            suffix,
            following_phrase: following.join(" "),
        }
    }

    /// True when nothing but the digit run was found
    pub fn is_bare_number(&self) -> bool {
        self.preceding_phrase.is_empty()
            && self.prefix.is_empty()
            && self.suffix.is_empty()
            && self.following_phrase.is_empty()
    }

    /// Preceding and following phrases
    pub fn phrases(&self) -> [&str; 2] {
        [&self.preceding_phrase, &self.following_phrase]
    }

    /// Prefix and suffix, the short codes glued to the digits
    pub fn abbreviations(&self) -> [&str; 2] {
        [&self.prefix, &self.suffix]
    }
}

/// Does the text contain an ASCII digit?
pub fn has_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

/// Canonical form of a digit run: leading zeros stripped.
///
/// An all-zero run keeps a single `"0"`; an empty run stays empty.
pub fn canonical_digits(digits: &str) -> &str {
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() && !digits.is_empty() {
        &digits[digits.len() - 1..]
    } else {
        stripped
    }
}
