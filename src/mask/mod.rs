mod format;
mod model;
mod parser;
mod session;

pub use format::{Formatted, MaskOutcome, apply, format};
pub use model::{CharClass, CompiledPattern, MaskToken};
pub use session::{MaskSession, SessionRegistry, TextField};

use crate::config::MaskOptions;

const PRESETS: [(&str, &str); 5] = [
    ("phone_us", "(999) 999-9999"),
    ("zip_us", "99999"),
    ("date_dd_mm_yyyy", "99/99/9999"),
    ("time_hh_mm", "99:99"),
    ("cpf", "999.999.999-99"),
];

/// A compiled mask together with the definition it was compiled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    definition: String,
    pattern: CompiledPattern,
}

impl Mask {
    pub fn new(definition: impl Into<String>) -> Self {
        let definition = definition.into();
        let pattern = parser::parse_mask(definition.as_str());
        Self {
            definition,
            pattern,
        }
    }

    pub fn phone_us() -> Self {
        Self::new("(999) 999-9999")
    }

    pub fn zip_us() -> Self {
        Self::new("99999")
    }

    pub fn date_dd_mm_yyyy() -> Self {
        Self::new("99/99/9999")
    }

    pub fn time_hh_mm() -> Self {
        Self::new("99:99")
    }

    pub fn cpf() -> Self {
        Self::new("999.999.999-99")
    }

    pub fn preset(name: &str) -> Option<Self> {
        PRESETS
            .iter()
            .find(|(preset, _)| *preset == name)
            .map(|(_, definition)| Self::new(*definition))
    }

    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|(name, _)| *name)
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn format(&self, raw: &str, options: MaskOptions) -> String {
        format::format(&self.pattern, raw, options.case_sensitive).value
    }

    /// True when `value` fills every placeholder of the mask.
    pub fn is_complete(&self, value: &str, options: MaskOptions) -> bool {
        let formatted = format::format(&self.pattern, value, options.case_sensitive);
        formatted.filled == self.pattern.placeholder_count() && formatted.value == value
    }
}

#[cfg(test)]
mod tests {
    use super::Mask;
    use crate::config::MaskOptions;

    #[test]
    fn presets_resolve_by_name() {
        let mask = Mask::preset("phone_us").expect("phone preset");
        assert_eq!(mask, Mask::phone_us());
        assert!(Mask::preset("iban").is_none());
        assert_eq!(Mask::preset_names().count(), 5);
    }

    #[test]
    fn completeness_requires_every_placeholder() {
        let mask = Mask::cpf();
        let options = MaskOptions::default();
        assert!(mask.is_complete("123.456.789-09", options));
        assert!(!mask.is_complete("123.456.789-0", options));
        assert!(!mask.is_complete("12345678909", options));
        assert!(!mask.is_complete("", options));
    }

    #[test]
    fn empty_mask_always_yields_empty_value() {
        let mask = Mask::new("");
        let options = MaskOptions::default();
        assert_eq!(mask.format("hello", options), "");
        assert_eq!(mask.format("", options), "");
        assert!(mask.is_complete("", options));
    }

    #[test]
    fn format_reflows_pasted_values() {
        let mask = Mask::date_dd_mm_yyyy();
        assert_eq!(
            mask.format("31-12-1999", MaskOptions::default()),
            "31/12/1999"
        );
    }
}
