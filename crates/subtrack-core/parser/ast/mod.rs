//! Data model produced by the parser
//!
//! Owned, immutable records: one [`StyleDefinition`] per track, one
//! [`DialogueEvent`] per retained dialogue line, and the header
//! [`ScriptMetadata`].

pub mod event;
pub mod script_info;
pub mod style;

pub use event::{DialogueEvent, EventRejection};
pub use script_info::ScriptMetadata;
pub use style::{StyleDefinition, DEFAULT_FONT_SIZE};
