//! Style types for text presentation
//!
//! This module defines the visual vocabulary of the annotator: the style
//! classes a rule can assign, their default presentation attributes, and
//! the spans that carry a class over a byte range of the document.

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
}

impl Style {
    /// Create a style with just a foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Lexical style classes assignable by pattern rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleClass {
    /// Language keywords (if, else, class, etc.)
    Keyword,
    /// Double-quoted string literals
    String,
    /// Line comments
    Comment,
    /// Plain text (no special highlighting)
    Default,
}

impl StyleClass {
    /// Get the default presentation for this class
    pub fn default_style(&self) -> Style {
        match self {
            StyleClass::Keyword => Style::fg(Color::Blue).with_bold(),
            StyleClass::String => Style::fg(Color::Yellow),
            StyleClass::Comment => Style::fg(Color::BrightBlack).with_italic(),
            StyleClass::Default => Style::default(),
        }
    }

    /// Get a human-readable name for this class
    pub fn name(&self) -> &'static str {
        match self {
            StyleClass::Keyword => "Keyword",
            StyleClass::String => "String",
            StyleClass::Comment => "Comment",
            StyleClass::Default => "Default",
        }
    }

    /// Parse a class from a string name (for TOML rule files)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Keyword" => Some(StyleClass::Keyword),
            "String" => Some(StyleClass::String),
            "Comment" => Some(StyleClass::Comment),
            "Default" => Some(StyleClass::Default),
            _ => None,
        }
    }
}

/// A classified span of document text
///
/// Half-open byte range into the buffer's coordinate space. Spans are
/// ephemeral: each highlighting pass produces a fresh set that fully
/// replaces the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSpan {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Class to apply to this span
    pub class: StyleClass,
}

impl StyleSpan {
    /// Create a new span
    pub fn new(start: usize, end: usize, class: StyleClass) -> Self {
        Self { start, end, class }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Resolve the class at a byte position under paint semantics
///
/// Spans are painted in order over a default-styled document, each one
/// overwriting whatever was there, so the last span covering a position
/// wins. Positions no span covers are [`StyleClass::Default`].
pub fn class_at(spans: &[StyleSpan], pos: usize) -> StyleClass {
    spans
        .iter()
        .rev()
        .find(|span| span.contains(pos))
        .map(|span| span.class)
        .unwrap_or(StyleClass::Default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert_eq!(style.fg, Color::Default);
        assert!(!style.bold);
        assert!(!style.italic);
    }

    #[test]
    fn test_class_default_styles() {
        assert!(!StyleClass::Keyword.default_style().is_default());
        assert!(!StyleClass::String.default_style().is_default());
        assert!(!StyleClass::Comment.default_style().is_default());
        assert!(StyleClass::Default.default_style().is_default());
        assert!(StyleClass::Keyword.default_style().bold);
        assert!(StyleClass::Comment.default_style().italic);
    }

    #[test]
    fn test_from_name_round_trip() {
        let classes = [
            StyleClass::Keyword,
            StyleClass::String,
            StyleClass::Comment,
            StyleClass::Default,
        ];
        for class in classes {
            assert_eq!(StyleClass::from_name(class.name()), Some(class));
        }
        assert_eq!(StyleClass::from_name("Operator"), None);
        assert_eq!(StyleClass::from_name(""), None);
    }

    #[test]
    fn test_span_contains() {
        let span = StyleSpan::new(5, 10, StyleClass::Keyword);
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(span.contains(9));
        assert!(!span.contains(10));
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_class_at_last_span_wins() {
        let spans = [
            StyleSpan::new(0, 10, StyleClass::Keyword),
            StyleSpan::new(5, 10, StyleClass::String),
        ];
        assert_eq!(class_at(&spans, 2), StyleClass::Keyword);
        assert_eq!(class_at(&spans, 7), StyleClass::String);
        assert_eq!(class_at(&spans, 10), StyleClass::Default);
    }
}
