//! Locale-aware integer formatting.
//!
//! # Invariants
//! - Digits are grouped by three from the right.
//! - Unknown or empty locale tags fall back to `,` grouping.

const NARROW_NO_BREAK_SPACE: char = '\u{202F}';

/// Thousands grouping style resolved from a locale tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    group_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            group_separator: ',',
        }
    }
}

impl NumberFormat {
    pub fn with_separator(group_separator: char) -> Self {
        Self { group_separator }
    }

    /// Resolves grouping from a POSIX or BCP 47 tag such as `es_ES.UTF-8`
    /// or `fr-CA`.
    pub fn from_locale_tag(tag: &str) -> Self {
        let language = tag
            .trim()
            .split(['_', '-', '.', '@'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let group_separator = match language.as_str() {
            "es" | "de" | "it" | "pt" | "nl" | "id" | "tr" | "da" => '.',
            "fr" | "ru" | "pl" | "sv" | "nb" | "fi" | "cs" | "uk" => NARROW_NO_BREAK_SPACE,
            _ => ',',
        };
        Self { group_separator }
    }

    pub fn group_separator(&self) -> char {
        self.group_separator
    }

    /// Formats `value` with grouped thousands, e.g. `12,345`.
    pub fn format_integer(&self, value: u64) -> String {
        let digits = value.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        let lead = digits.len() % 3;
        for (index, ch) in digits.chars().enumerate() {
            if index > 0 && (index + 3 - lead) % 3 == 0 {
                out.push(self.group_separator);
            }
            out.push(ch);
        }
        out
    }
}
