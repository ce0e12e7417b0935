//! Structural-markup parser for HTML sites.
//!
//! Extraction paths are CSS selectors. The `parent` selector picks one
//! element per candidate result; the `title`, `command`, and `description`
//! selectors are then evaluated relative to each of those sections.

use super::{ContentParser, DESCRIPTION_JOIN};
use crate::descriptor::ExtractionPaths;
use crate::error::{Result, SampleCmdError};
use crate::models::RawTuple;
use scraper::{ElementRef, Html, Selector};

/// CSS-selector based parser over a parsed HTML tree.
#[derive(Debug, Default)]
pub struct HtmlParser {
    document: Option<Html>,
}

impl HtmlParser {
    pub fn new() -> Self {
        Self::default()
    }

    fn selector(path: &str) -> Result<Selector> {
        Selector::parse(path)
            .map_err(|e| SampleCmdError::config(format!("invalid selector {path:?}: {e}")))
    }

    /// Text of the first element matching `path` within `section`, or an
    /// empty string when the path is empty or nothing matches.
    fn first_text(section: ElementRef<'_>, path: &str) -> Result<String> {
        if path.is_empty() {
            return Ok(String::new());
        }
        let selector = Self::selector(path)?;
        Ok(section
            .select(&selector)
            .next()
            .map(element_text)
            .unwrap_or_default())
    }
}

impl ContentParser for HtmlParser {
    /// html5ever recovers from arbitrarily malformed markup, so the only
    /// unparseable input is a body that is not valid UTF-8.
    fn parse(&mut self, content: &[u8]) -> bool {
        match std::str::from_utf8(content) {
            Ok(text) => {
                self.document = Some(Html::parse_document(text));
                true
            }
            Err(_) => false,
        }
    }

    fn find(&self, paths: &ExtractionPaths) -> Result<Vec<RawTuple>> {
        let document = self
            .document
            .as_ref()
            .ok_or_else(|| SampleCmdError::parse("find called before parse"))?;

        if paths.parent.is_empty() {
            return Err(SampleCmdError::config(
                "html sites require a non-empty parent selector",
            ));
        }
        let parent = Self::selector(&paths.parent)?;

        let mut result = Vec::new();
        for section in document.select(&parent) {
            let title = Self::first_text(section, &paths.title)?;
            let command = Self::first_text(section, &paths.command)?;
            if title.is_empty() || command.is_empty() {
                continue;
            }

            let description = if paths.description.is_empty() {
                String::new()
            } else {
                let selector = Self::selector(&paths.description)?;
                section
                    .select(&selector)
                    .map(element_text)
                    .collect::<Vec<_>>()
                    .join(DESCRIPTION_JOIN)
            };

            result.push(RawTuple {
                title,
                command,
                description,
            });
        }
        Ok(result)
    }
}

/// Concatenated, whitespace-trimmed text content of one element.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
