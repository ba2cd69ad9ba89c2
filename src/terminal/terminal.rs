use crate::terminal::{KeyCode, KeyEvent, KeyModifiers, TerminalEvent};
use crossterm::event::{Event, KeyEventKind, read};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use std::io::{self, Stdout, Write};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub color: Option<Color>,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub fn styled(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }

    pub fn width(&self) -> usize {
        UnicodeWidthStr::width(self.text.as_str())
    }
}

pub struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter_raw_mode(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    pub fn exit_raw_mode(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()
    }

    pub fn read_event(&mut self) -> io::Result<TerminalEvent> {
        loop {
            match read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    return Ok(TerminalEvent::Key(map_key_event(key)));
                }
                Event::Resize(width, height) => {
                    return Ok(TerminalEvent::Resize { width, height });
                }
                _ => continue,
            }
        }
    }

    /// Redraws the current line and parks the cursor at `cursor_col`.
    pub fn render_line(&mut self, spans: &[Span], cursor_col: usize) -> io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveToColumn(0),
            terminal::Clear(terminal::ClearType::CurrentLine)
        )?;
        for span in spans {
            match span.color {
                Some(color) => queue!(
                    self.stdout,
                    SetForegroundColor(color),
                    Print(span.text.as_str()),
                    ResetColor
                )?,
                None => queue!(self.stdout, Print(span.text.as_str()))?,
            }
        }
        let col = u16::try_from(cursor_col).unwrap_or(u16::MAX);
        queue!(self.stdout, cursor::MoveToColumn(col))?;
        self.stdout.flush()
    }

    /// Leaves the prompt line as-is and moves to the start of the next one.
    pub fn finish_line(&mut self) -> io::Result<()> {
        execute!(self.stdout, Print("\r\n"))?;
        Ok(())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

fn map_key_event(event: crossterm::event::KeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(event.code),
        modifiers: map_key_modifiers(event.modifiers),
    }
}

fn map_key_code(code: crossterm::event::KeyCode) -> KeyCode {
    match code {
        crossterm::event::KeyCode::Char(ch) => KeyCode::Char(ch),
        crossterm::event::KeyCode::Backspace => KeyCode::Backspace,
        crossterm::event::KeyCode::Delete => KeyCode::Delete,
        crossterm::event::KeyCode::Enter => KeyCode::Enter,
        crossterm::event::KeyCode::Esc => KeyCode::Esc,
        crossterm::event::KeyCode::Left => KeyCode::Left,
        crossterm::event::KeyCode::Right => KeyCode::Right,
        crossterm::event::KeyCode::Home => KeyCode::Home,
        crossterm::event::KeyCode::End => KeyCode::End,
        _ => KeyCode::Other,
    }
}

fn map_key_modifiers(modifiers: crossterm::event::KeyModifiers) -> KeyModifiers {
    let mut mapped = KeyModifiers::NONE;
    if modifiers.contains(crossterm::event::KeyModifiers::SHIFT) {
        mapped.insert(KeyModifiers::SHIFT);
    }
    if modifiers.contains(crossterm::event::KeyModifiers::CONTROL) {
        mapped.insert(KeyModifiers::CONTROL);
    }
    if modifiers.contains(crossterm::event::KeyModifiers::ALT) {
        mapped.insert(KeyModifiers::ALT);
    }
    mapped
}

#[cfg(test)]
mod tests {
    use super::{Span, map_key_code, map_key_modifiers};
    use crate::terminal::{KeyCode, KeyModifiers};

    #[test]
    fn maps_crossterm_keys() {
        assert_eq!(
            map_key_code(crossterm::event::KeyCode::Char('x')),
            KeyCode::Char('x')
        );
        assert_eq!(map_key_code(crossterm::event::KeyCode::F(1)), KeyCode::Other);

        let modifiers = map_key_modifiers(
            crossterm::event::KeyModifiers::CONTROL | crossterm::event::KeyModifiers::SHIFT,
        );
        assert!(modifiers.contains(KeyModifiers::CONTROL));
        assert!(modifiers.contains(KeyModifiers::SHIFT));
        assert!(!modifiers.contains(KeyModifiers::ALT));
    }

    #[test]
    fn span_width_counts_display_columns() {
        assert_eq!(Span::new("(555) 1").width(), 7);
        assert_eq!(Span::new("日本").width(), 4);
    }
}
