pub mod config;
pub mod error;
pub mod mask;
pub mod prompt;
pub mod terminal;
pub mod text_edit;

pub use config::MaskOptions;
pub use mask::{Mask, MaskSession, SessionRegistry, TextField};
