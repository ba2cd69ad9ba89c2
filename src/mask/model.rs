use std::collections::BTreeSet;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Digit,
    Lower,
    Upper,
    Any,
}

impl CharClass {
    pub fn accepts(self, ch: char, case_sensitive: bool) -> bool {
        if self.contains(ch) {
            return true;
        }
        if case_sensitive {
            return false;
        }

        let upper = fold_case(ch);
        if upper != ch && self.contains(upper) {
            return true;
        }
        match single_lower(upper) {
            Some(lower) if lower != ch && fold_case(lower) == upper => self.contains(lower),
            _ => false,
        }
    }

    fn contains(self, ch: char) -> bool {
        match self {
            CharClass::Digit => ch.is_ascii_digit(),
            CharClass::Lower => ch.is_ascii_lowercase() || ('\u{E0}'..='\u{FC}').contains(&ch),
            CharClass::Upper => ch.is_ascii_uppercase() || ('\u{C0}'..='\u{DC}').contains(&ch),
            CharClass::Any => !matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}'),
        }
    }
}

/// Simple uppercase fold. Characters whose uppercase is not a single char, or
/// non-ASCII characters that would fold into ASCII, stay as they are.
fn fold_case(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(folded), None) if ch.is_ascii() || !folded.is_ascii() => folded,
        _ => ch,
    }
}

fn single_lower(ch: char) -> Option<char> {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(lowered), None) => Some(lowered),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskToken {
    Separator(char),
    Placeholder(CharClass),
}

impl MaskToken {
    pub fn is_separator(&self) -> bool {
        matches!(self, MaskToken::Separator(_))
    }
}

#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub(super) tokens: Vec<MaskToken>,
    pub(super) separators: BTreeSet<char>,
    pub(super) stripper: Option<Regex>,
}

impl CompiledPattern {
    pub fn tokens(&self) -> &[MaskToken] {
        &self.tokens
    }

    /// Literal characters used by separator tokens anywhere in the pattern.
    pub fn separators(&self) -> &BTreeSet<char> {
        &self.separators
    }

    pub fn placeholder_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|token| !token.is_separator())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Removes every separator-alphabet character from `raw`, wherever it sits.
    pub fn strip_separators(&self, raw: &str) -> String {
        match &self.stripper {
            Some(stripper) => stripper.replace_all(raw, "").into_owned(),
            None => raw
                .chars()
                .filter(|ch| !self.separators.contains(ch))
                .collect(),
        }
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

impl Eq for CompiledPattern {}
