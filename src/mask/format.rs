use super::model::{CompiledPattern, MaskToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskOutcome {
    /// The raw value equals the last masked value; nothing to write back.
    Unchanged,
    Reformatted { value: String, caret: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    pub value: String,
    /// Number of placeholders that received an input character.
    pub filled: usize,
}

/// Reformats `raw` against the pattern without the change guard or caret repair.
pub fn format(pattern: &CompiledPattern, raw: &str, case_sensitive: bool) -> Formatted {
    let stripped: Vec<char> = pattern.strip_separators(raw).chars().collect();
    let mut out = String::new();
    let mut filled = 0usize;
    let mut idx = 0usize;

    for token in pattern.tokens() {
        if idx >= stripped.len() {
            break;
        }
        match token {
            MaskToken::Separator(ch) => out.push(*ch),
            MaskToken::Placeholder(class) => {
                while let Some(&ch) = stripped.get(idx) {
                    idx += 1;
                    if class.accepts(ch, case_sensitive) {
                        out.push(ch);
                        filled += 1;
                        break;
                    }
                }
            }
        }
    }

    if filled == 0 {
        out.clear();
    }

    Formatted { value: out, filled }
}

/// Recomputes the masked value after an edit.
///
/// `caret_anchor` is the offset just before the character that was typed,
/// `None` when the live caret sits at the start of the field.
pub fn apply(
    pattern: &CompiledPattern,
    previous: &str,
    current: &str,
    caret_anchor: Option<usize>,
    case_sensitive: bool,
) -> MaskOutcome {
    if current == previous {
        return MaskOutcome::Unchanged;
    }

    let formatted = format(pattern, current, case_sensitive);
    let start = caret_anchor.map_or(0, |anchor| anchor.saturating_add(1));
    let caret = skip_separators(pattern.tokens(), start)
        .min(formatted.value.chars().count());

    MaskOutcome::Reformatted {
        value: formatted.value,
        caret,
    }
}

fn skip_separators(tokens: &[MaskToken], mut caret: usize) -> usize {
    while caret > 0
        && tokens
            .get(caret - 1)
            .is_some_and(MaskToken::is_separator)
    {
        caret += 1;
    }
    caret
}

#[cfg(test)]
mod tests {
    use super::{MaskOutcome, apply, format};
    use crate::mask::parser::parse_mask;
    use rstest::rstest;

    fn reformat(mask: &str, raw: &str, case_sensitive: bool) -> String {
        format(&parse_mask(mask), raw, case_sensitive).value
    }

    #[rstest]
    #[case("99-99", "-1-2-3-4-", "12-34")]
    #[case("99-99", "12", "12")]
    #[case("99-99", "123", "12-3")]
    #[case("99-99", "12345", "12-34")]
    #[case("A9", "!!", "")]
    #[case("(999) 999-9999", "5551234567", "(555) 123-4567")]
    #[case("(999) 999-9999", "(555) 123-4567", "(555) 123-4567")]
    #[case("(999) 999-9999", "5", "(5")]
    #[case("999.999.999-99", "123x456y789z09", "123.456.789-09")]
    #[case("aaa", "a1b2c3", "abc")]
    #[case("**-**", "ab-cd", "ab-cd")]
    #[case("", "anything", "")]
    fn formats_raw_input(#[case] mask: &str, #[case] raw: &str, #[case] expected: &str) {
        assert_eq!(reformat(mask, raw, false), expected);
    }

    #[test]
    fn trailing_separator_kept_when_input_remains_unmatched() {
        assert_eq!(reformat("9-9", "1x", false), "1-");
    }

    #[test]
    fn leading_separators_alone_are_wiped() {
        let formatted = format(&parse_mask("(99)"), "x", false);
        assert_eq!(formatted.value, "");
        assert_eq!(formatted.filled, 0);
    }

    #[test]
    fn case_sensitivity_controls_letter_classes() {
        assert_eq!(reformat("AA", "ab", false), "ab");
        assert_eq!(reformat("AA", "ab", true), "");
        assert_eq!(reformat("AA", "aB", true), "B");
    }

    #[test]
    fn separator_typed_as_data_is_discarded() {
        assert_eq!(reformat("**-**", "a-b-c", false), "ab-c");
    }

    #[test]
    fn unchanged_value_short_circuits() {
        let pattern = parse_mask("99-99");
        assert_eq!(
            apply(&pattern, "12-3", "12-3", Some(3), false),
            MaskOutcome::Unchanged
        );
    }

    #[rstest]
    #[case("99-99", "-1-2-3-4-")]
    #[case("A9", "!!")]
    #[case("(999) 999-9999", "55512")]
    #[case("", "xyz")]
    fn applying_to_own_output_is_a_no_op(#[case] mask: &str, #[case] raw: &str) {
        let pattern = parse_mask(mask);
        let MaskOutcome::Reformatted { value, .. } = apply(&pattern, "", raw, None, false) else {
            panic!("first pass must reformat");
        };
        assert_eq!(
            apply(&pattern, &value, &value, None, false),
            MaskOutcome::Unchanged
        );
    }

    #[test]
    fn caret_skips_auto_inserted_separator() {
        let pattern = parse_mask("99-99");
        // "12" then a third digit typed at offset 2.
        assert_eq!(
            apply(&pattern, "12", "123", Some(2), false),
            MaskOutcome::Reformatted {
                value: "12-3".to_string(),
                caret: 4,
            }
        );
    }

    #[test]
    fn caret_stays_on_placeholder_inside_group() {
        let pattern = parse_mask("99-99");
        assert_eq!(
            apply(&pattern, "1", "12", Some(1), false),
            MaskOutcome::Reformatted {
                value: "12".to_string(),
                caret: 2,
            }
        );
    }

    #[test]
    fn caret_skips_leading_separators() {
        let pattern = parse_mask("(999) 999");
        assert_eq!(
            apply(&pattern, "", "5", Some(0), false),
            MaskOutcome::Reformatted {
                value: "(5".to_string(),
                caret: 2,
            }
        );
    }

    #[test]
    fn caret_at_field_start_stays_at_zero() {
        let pattern = parse_mask("(999)");
        assert_eq!(
            apply(&pattern, "(12", "12", None, false),
            MaskOutcome::Reformatted {
                value: "(12".to_string(),
                caret: 0,
            }
        );
    }

    #[test]
    fn caret_is_clamped_to_new_value() {
        let pattern = parse_mask("99-99");
        assert_eq!(
            apply(&pattern, "12", "12x", Some(40), false),
            MaskOutcome::Reformatted {
                value: "12-".to_string(),
                caret: 3,
            }
        );
        assert_eq!(
            apply(&pattern, "1", "!", Some(0), false),
            MaskOutcome::Reformatted {
                value: String::new(),
                caret: 0,
            }
        );
        assert_eq!(
            apply(&pattern, "", "123", Some(usize::MAX), false),
            MaskOutcome::Reformatted {
                value: "12-3".to_string(),
                caret: 4,
            }
        );
    }
}
