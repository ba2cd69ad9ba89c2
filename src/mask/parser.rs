use std::collections::BTreeSet;

use regex::Regex;

use super::model::{CharClass, CompiledPattern, MaskToken};

/// Recognized placeholders, tested in this order; the first match wins.
const PLACEHOLDERS: [(char, CharClass); 4] = [
    ('9', CharClass::Digit),
    ('a', CharClass::Lower),
    ('A', CharClass::Upper),
    ('*', CharClass::Any),
];

pub(super) fn parse_mask(mask: &str) -> CompiledPattern {
    let mut tokens = Vec::<MaskToken>::new();
    let mut separators = BTreeSet::<char>::new();

    for ch in mask.chars() {
        match placeholder_class(ch) {
            Some(class) => tokens.push(MaskToken::Placeholder(class)),
            None => {
                separators.insert(ch);
                tokens.push(MaskToken::Separator(ch));
            }
        }
    }

    let stripper = build_stripper(&separators);
    log::debug!(
        "compiled mask {:?}: {} tokens, {} separators",
        mask,
        tokens.len(),
        separators.len()
    );

    CompiledPattern {
        tokens,
        separators,
        stripper,
    }
}

fn placeholder_class(ch: char) -> Option<CharClass> {
    PLACEHOLDERS
        .iter()
        .find(|(symbol, _)| *symbol == ch)
        .map(|(_, class)| *class)
}

fn build_stripper(separators: &BTreeSet<char>) -> Option<Regex> {
    if separators.is_empty() {
        return None;
    }

    let mut class = String::from("[");
    for ch in separators {
        class.push_str(&regex::escape(ch.encode_utf8(&mut [0u8; 4])));
    }
    class.push(']');

    match Regex::new(&class) {
        Ok(regex) => Some(regex),
        Err(err) => {
            log::warn!("separator matcher {class:?} rejected, filtering by set: {err}");
            None
        }
    }
}
