//! Pattern rules for syntax annotation
//!
//! A rule pairs a compiled regex with the style class its matches receive.
//! Rules are kept in a fixed order; a scan emits every rule's matches in
//! that order, and because spans paint over one another, later rules win
//! wherever ranges overlap.

use regex::Regex;

use super::style::{StyleClass, StyleSpan};
use crate::error::{HiliteError, Result};

/// Default keyword rule: a fixed list of language keywords as whole words
const KEYWORD_PATTERN: &str =
    r"\b(int|double|float|String|public|private|class|if|else|abstract)\b";

/// Default string rule: double-quoted spans, non-greedy, no escape handling
const STRING_PATTERN: &str = r#""(.*?)""#;

/// Default comment rule: from `//` to end of line
const COMMENT_PATTERN: &str = r"//[^\n]*";

/// A single pattern rule
///
/// Matches a regex pattern and assigns a style class to each match.
pub struct PatternRule {
    /// Name for diagnostics and rule files
    pub name: String,
    /// Compiled regex pattern
    pattern: Regex,
    /// Style class assigned to matches
    pub class: StyleClass,
}

impl PatternRule {
    /// Compile a new pattern rule
    ///
    /// A pattern that fails to compile is a configuration error.
    pub fn new(name: &str, pattern: &str, class: StyleClass) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| HiliteError::InvalidRule {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            name: name.to_string(),
            pattern,
            class,
        })
    }

    /// Check that this rule cannot produce degenerate zero-width matches
    fn validate(&self) -> Result<()> {
        if self.pattern.find("").is_some() {
            return Err(HiliteError::InvalidRule {
                name: self.name.clone(),
                reason: "pattern matches the empty string".to_string(),
            });
        }
        Ok(())
    }
}

/// An ordered, validated list of pattern rules
pub struct RuleSet {
    rules: Vec<PatternRule>,
}

impl RuleSet {
    /// Validate and assemble a rule set
    pub fn new(rules: Vec<PatternRule>) -> Result<Self> {
        for rule in &rules {
            rule.validate()?;
        }
        Ok(Self { rules })
    }

    /// The default rule set: keyword, string, comment, in that order
    pub fn default_set() -> Self {
        let mut rules = Vec::new();
        if let Ok(rule) = PatternRule::new("keyword", KEYWORD_PATTERN, StyleClass::Keyword) {
            rules.push(rule);
        }
        if let Ok(rule) = PatternRule::new("string", STRING_PATTERN, StyleClass::String) {
            rules.push(rule);
        }
        if let Ok(rule) = PatternRule::new("comment", COMMENT_PATTERN, StyleClass::Comment) {
            rules.push(rule);
        }
        Self { rules }
    }

    /// Number of rules in the set
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the set has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in application order
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }

    /// Scan the full text with every rule in order
    ///
    /// Each rule contributes its leftmost non-overlapping matches; matches
    /// of one rule never nest within that same rule. Span order in the
    /// result follows rule order, which is what gives later rules priority
    /// under paint semantics.
    pub fn scan(&self, text: &str) -> Vec<StyleSpan> {
        let mut spans = Vec::new();
        for rule in &self.rules {
            for m in rule.pattern.find_iter(text) {
                if m.start() < m.end() {
                    spans.push(StyleSpan::new(m.start(), m.end(), rule.class));
                }
            }
        }
        spans
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::default_set()
    }
}
