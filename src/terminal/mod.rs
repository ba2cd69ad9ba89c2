pub mod event;
pub mod terminal;

pub use event::{KeyCode, KeyEvent, KeyModifiers, TerminalEvent};
pub use terminal::{Span, Terminal};
