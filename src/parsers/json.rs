//! Key-path parser for JSON sites.
//!
//! The `parent` extraction path is a slash-delimited sequence of keys walked
//! down from the response root to reach the list of entries; an empty
//! `parent` means the root itself is the list. The remaining paths are
//! direct keys looked up on each entry.

use super::ContentParser;
use crate::descriptor::ExtractionPaths;
use crate::error::{Result, SampleCmdError};
use crate::models::RawTuple;
use serde_json::Value;

/// Key-path based parser over a parsed JSON value.
#[derive(Debug, Default)]
pub struct JsonParser {
    root: Option<Value>,
}

impl JsonParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk a slash-delimited key path down from `root`. Empty segments
    /// (leading, trailing, doubled slashes) are skipped.
    fn descend<'a>(root: &'a Value, parent: &str) -> Result<&'a Value> {
        let mut current = root;
        for key in parent.split('/').filter(|segment| !segment.is_empty()) {
            current = current.get(key).ok_or_else(|| {
                SampleCmdError::parse(format!("parent key {key:?} not found in response"))
            })?;
        }
        Ok(current)
    }
}

impl ContentParser for JsonParser {
    fn parse(&mut self, content: &[u8]) -> bool {
        match serde_json::from_slice(content) {
            Ok(value) => {
                self.root = Some(value);
                true
            }
            Err(_) => false,
        }
    }

    fn find(&self, paths: &ExtractionPaths) -> Result<Vec<RawTuple>> {
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| SampleCmdError::parse("find called before parse"))?;

        let entries = Self::descend(root, &paths.parent)?
            .as_array()
            .ok_or_else(|| SampleCmdError::parse("entry list in response is not an array"))?;

        let mut result = Vec::new();
        for entry in entries {
            let title = lookup(entry, &paths.title).filter(|v| truthy(v));
            let command = lookup(entry, &paths.command).filter(|v| truthy(v));
            let (Some(title), Some(command)) = (title, command) else {
                continue;
            };

            result.push(RawTuple {
                title: display_text(title),
                command: display_text(command),
                description: lookup(entry, &paths.description)
                    .map(display_text)
                    .unwrap_or_default(),
            });
        }
        Ok(result)
    }
}

/// Direct key lookup on an entry; an empty path resolves to nothing.
fn lookup<'a>(entry: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    entry.get(path)
}

/// Truthiness matching dynamic-language semantics: null, false, zero, empty
/// strings, and empty containers are all falsy.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Display text for an extracted value. Strings are used verbatim; any
/// other value keeps its raw JSON text, with no deeper coercion.
fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
