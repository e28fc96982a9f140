//! Syntax annotation module
//!
//! This module provides the regex-driven highlighting machinery:
//! - Style classes and spans delivered to the host renderer
//! - Ordered pattern rules and their validation
//! - The edit-driven highlight engine
//! - Rule definition file loading

mod engine;
mod loader;
mod rules;
mod style;

pub use engine::{HighlightEngine, PaintFn};
pub use loader::{load_rules, parse_rules};
pub use rules::{PatternRule, RuleSet};
pub use style::{class_at, Color, Style, StyleClass, StyleSpan};
