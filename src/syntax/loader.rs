//! Rule definition file support
//!
//! Loads alternative rule sets ("languages") from TOML documents, the
//! swappable-pattern-set extensibility axis of the annotator.
//!
//! Format: a document name plus one `[[rule]]` table per pattern, applied
//! in file order:
//!
//! ```text
//! name = "Java"
//!
//! [[rule]]
//! name = "keyword"
//! class = "Keyword"
//! pattern = '\b(if|else|class)\b'
//! ```

use std::fs;
use std::path::Path;

use toml::Value;

use super::rules::PatternRule;
use super::style::StyleClass;
use crate::error::{HiliteError, Result};

fn invalid(name: &str, reason: impl Into<String>) -> HiliteError {
    HiliteError::InvalidRule {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Parse a rule definition document
///
/// Returns the language name and the rules in file order. Any malformed
/// entry rejects the whole document; a partially applied language would be
/// worse than none.
pub fn parse_rules(source: &str) -> Result<(String, Vec<PatternRule>)> {
    let value: Value = source
        .parse()
        .map_err(|e: toml::de::Error| invalid("rules", e.to_string()))?;

    let language = value
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("rules", "missing top-level 'name'"))?
        .to_string();

    let entries = value
        .get("rule")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid(&language, "no [[rule]] tables"))?;

    let mut rules = Vec::new();
    for entry in entries {
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid(&language, "rule missing 'name'"))?;
        let class_name = entry
            .get("class")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid(name, "missing 'class'"))?;
        let class = StyleClass::from_name(class_name)
            .ok_or_else(|| invalid(name, format!("unknown class '{}'", class_name)))?;
        let pattern = entry
            .get("pattern")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid(name, "missing 'pattern'"))?;
        rules.push(PatternRule::new(name, pattern, class)?);
    }

    Ok((language, rules))
}

/// Load a rule definition file from disk
pub fn load_rules(path: &Path) -> Result<(String, Vec<PatternRule>)> {
    let source = fs::read_to_string(path)?;
    parse_rules(&source)
}
