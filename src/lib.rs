//! hilite - live syntax annotator for mutable text buffers
//!
//! A [`TextBuffer`] owns document content and announces every edit to its
//! subscribers; a [`HighlightEngine`] listens, rescans the text with an
//! ordered set of regex [`PatternRule`]s, and hands the resulting
//! [`StyleSpan`]s to a host paint callback. Painting is suppressed from
//! re-triggering the engine, so styling writes can never feed back into an
//! update loop.
//!
//! ```
//! use std::rc::Rc;
//! use hilite::{HighlightEngine, TextBuffer};
//!
//! let buffer = Rc::new(TextBuffer::new());
//! let mut engine = HighlightEngine::new();
//! engine.attach(&buffer, |clear, spans| {
//!     // host renderer: reset `clear`, then apply `spans` in order
//!     let _ = (clear, spans);
//! });
//! buffer.set_text("int x = 1; // counter");
//! ```

pub mod buffer;
pub mod error;
pub mod io;
pub mod syntax;

pub use buffer::{EditEvent, EditKind, SubscriptionId, TextBuffer};
pub use error::{HiliteError, Result};
pub use syntax::{
    class_at, HighlightEngine, PatternRule, RuleSet, Style, StyleClass, StyleSpan,
};
