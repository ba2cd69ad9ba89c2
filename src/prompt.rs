use crossterm::style::Color;

use crate::config::MaskOptions;
use crate::mask::{Mask, MaskSession, MaskToken};
use crate::terminal::{KeyCode, KeyEvent, Span};
use crate::text_edit::{self, LineBuffer};

const INVALID_MASK_MESSAGE: &str = "Invalid or incomplete value";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptState {
    Editing,
    Submitted(String),
    Cancelled,
}

/// A single masked input line driven by key events.
#[derive(Debug, Clone)]
pub struct MaskedPrompt {
    id: String,
    label: String,
    buffer: LineBuffer,
    session: MaskSession,
    error: Option<String>,
}

impl MaskedPrompt {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        mask: Mask,
        options: MaskOptions,
    ) -> Self {
        let buffer = LineBuffer::default();
        let session = MaskSession::attach(&buffer, mask, options);
        Self {
            id: id.into(),
            label: label.into(),
            buffer,
            session,
            error: None,
        }
    }

    pub fn with_default(mut self, value: &str) -> Self {
        let formatted = self.session.mask().format(value, self.session.options());
        self.buffer = LineBuffer::new(formatted);
        self.session = MaskSession::attach(
            &self.buffer,
            self.session.mask().clone(),
            self.session.options(),
        );
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &str {
        self.buffer.value()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn on_key(&mut self, key: KeyEvent) -> PromptState {
        let ctrl = key.is_ctrl();
        let edited = match key.code {
            KeyCode::Char('c') if ctrl => return PromptState::Cancelled,
            KeyCode::Char('u') if ctrl => {
                self.buffer.clear();
                true
            }
            KeyCode::Char(ch) if !ctrl => {
                self.buffer.insert_char(ch);
                true
            }
            KeyCode::Backspace => self.buffer.backspace(),
            KeyCode::Delete => self.buffer.delete(),
            KeyCode::Left => {
                self.buffer.move_left();
                false
            }
            KeyCode::Right => {
                self.buffer.move_right();
                false
            }
            KeyCode::Home => {
                self.buffer.move_home();
                false
            }
            KeyCode::End => {
                self.buffer.move_end();
                false
            }
            KeyCode::Esc => return PromptState::Cancelled,
            KeyCode::Enter => return self.submit(),
            _ => false,
        };

        if edited {
            self.error = None;
        }
        // Every key counts as a change notification; unchanged text is a no-op.
        self.session.handle_change(&mut self.buffer);
        PromptState::Editing
    }

    fn submit(&mut self) -> PromptState {
        let value = self.buffer.value();
        let options = self.session.options();
        if value.is_empty() || self.session.mask().is_complete(value, options) {
            return PromptState::Submitted(value.to_string());
        }
        self.error = Some(INVALID_MASK_MESSAGE.to_string());
        PromptState::Editing
    }

    fn prefix(&self) -> String {
        format!("? {}: ", self.label)
    }

    pub fn render_spans(&self) -> Vec<Span> {
        let mut spans = vec![
            Span::styled(self.prefix(), Color::Cyan),
            Span::new(self.buffer.value()),
        ];

        let hint = remaining_hint(
            self.session.mask().pattern().tokens(),
            text_edit::char_count(self.buffer.value()),
        );
        if !hint.is_empty() {
            spans.push(Span::styled(hint, Color::DarkGrey));
        }
        if let Some(error) = &self.error {
            spans.push(Span::styled(format!("  {error}"), Color::Red));
        }
        spans
    }

    /// Display column of the caret, counted from the start of the line.
    pub fn cursor_col(&self) -> usize {
        let before: String = self.buffer.value().chars().take(self.buffer.cursor()).collect();
        Span::new(self.prefix()).width() + Span::new(before).width()
    }
}

/// The unfilled tail of the mask, placeholders drawn as `_`.
fn remaining_hint(tokens: &[MaskToken], filled_len: usize) -> String {
    tokens
        .iter()
        .skip(filled_len)
        .map(|token| match token {
            MaskToken::Separator(ch) => *ch,
            MaskToken::Placeholder(_) => '_',
        })
        .collect()
}
