//! Markup event source.
//!
//! Turns post HTML into a flat stream of [`MarkupEvent`]s. The rich-text
//! extractor only depends on the event type, so callers with their own
//! tokenizer can skip [`Tokenizer`] entirely.

mod entities;
mod event;
mod tokenizer;

pub use entities::decode_entities;
pub use event::{attribute_value, Attribute, MarkupEvent};
pub use tokenizer::{tokenize, Tokenizer};
