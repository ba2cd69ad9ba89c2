use std::collections::HashMap;

use super::Mask;
use super::format::{MaskOutcome, apply};
use crate::config::MaskOptions;

/// Host capability a mask session reads from and writes back to.
pub trait TextField {
    fn value(&self) -> String;

    fn set_value(&mut self, value: &str);

    /// Live caret offset in characters. `None` means the host cannot report
    /// one, and the caret is taken to sit at the end of the text.
    fn caret_offset(&self) -> Option<usize> {
        None
    }

    fn set_caret_offset(&mut self, offset: usize);
}

/// Mask state for a single text field.
#[derive(Debug, Clone)]
pub struct MaskSession {
    mask: Mask,
    last_value: String,
    case_sensitive: bool,
}

impl MaskSession {
    pub fn new(mask: Mask, options: MaskOptions) -> Self {
        Self {
            mask,
            last_value: String::new(),
            case_sensitive: options.case_sensitive,
        }
    }

    /// Creates a session and seeds it with the field's current text.
    pub fn attach(field: &dyn TextField, mask: Mask, options: MaskOptions) -> Self {
        let mut session = Self::new(mask, options);
        session.last_value = field.value();
        session
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn last_value(&self) -> &str {
        &self.last_value
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn options(&self) -> MaskOptions {
        MaskOptions {
            case_sensitive: self.case_sensitive,
        }
    }

    /// Swaps the mask definition; the pattern is only recompiled when it differs.
    pub fn set_mask(&mut self, definition: &str) {
        if self.mask.definition() != definition {
            self.mask = Mask::new(definition);
        }
    }

    /// Handles a "content may have changed" notification from the field.
    /// Returns whether a new value and caret were written back.
    pub fn handle_change(&mut self, field: &mut dyn TextField) -> bool {
        let current = field.value();
        let caret = field
            .caret_offset()
            .unwrap_or_else(|| current.chars().count());

        let outcome = apply(
            self.mask.pattern(),
            self.last_value.as_str(),
            current.as_str(),
            caret.checked_sub(1),
            self.case_sensitive,
        );

        match outcome {
            MaskOutcome::Unchanged => {
                log::trace!("mask {:?}: value unchanged", self.mask.definition());
                false
            }
            MaskOutcome::Reformatted { value, caret } => {
                log::debug!(
                    "mask {:?}: {:?} -> {:?}, caret {}",
                    self.mask.definition(),
                    current,
                    value,
                    caret
                );
                field.set_value(value.as_str());
                field.set_caret_offset(caret);
                self.last_value = value;
                true
            }
        }
    }
}

/// Sessions keyed by field identity.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, MaskSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a mask to `id`. A field that already has a session keeps it.
    pub fn attach(
        &mut self,
        id: impl Into<String>,
        field: &dyn TextField,
        mask: Mask,
        options: MaskOptions,
    ) -> &mut MaskSession {
        self.sessions
            .entry(id.into())
            .or_insert_with(|| MaskSession::attach(field, mask, options))
    }

    pub fn detach(&mut self, id: &str) -> Option<MaskSession> {
        self.sessions.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&MaskSession> {
        self.sessions.get(id)
    }

    /// Forwards a change notification; fields without a session are ignored.
    pub fn notify(&mut self, id: &str, field: &mut dyn TextField) -> bool {
        match self.sessions.get_mut(id) {
            Some(session) => session.handle_change(field),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
