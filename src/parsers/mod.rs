//! Content parsers: turn raw response bytes into extracted command tuples.
//!
//! Each site declares a content type, which selects one of two parsers
//! behind the shared [`ContentParser`] contract:
//!
//! | Content type | Parser | Extraction paths |
//! |--------------|--------|------------------|
//! | `html` | [`HtmlParser`] | CSS selectors, evaluated per section |
//! | `json` | [`JsonParser`] | slash-delimited key path + direct keys |
//!
//! The contract is two-phase: `parse` consumes the response body and reports
//! whether it was well-formed, then `find` evaluates the descriptor's
//! extraction paths against the parsed document. Both parsers apply the same
//! partial-match policy: a tuple is emitted only when its title and command
//! both resolved to something non-empty, and everything else is silently
//! dropped.

use crate::descriptor::{ContentType, ExtractionPaths};
use crate::error::Result;
use crate::models::RawTuple;

mod html;
mod json;

pub use html::HtmlParser;
pub use json::JsonParser;

/// Separator used when a site yields multiple description fragments.
pub(crate) const DESCRIPTION_JOIN: &str = "\n   ";

/// Shared capability of the two content parsers.
pub trait ContentParser {
    /// Parse the raw response body. Returns `false` when the body is
    /// malformed for this format; the caller treats that as a per-site
    /// skip, not a fatal error.
    fn parse(&mut self, content: &[u8]) -> bool;

    /// Extract command tuples using the descriptor's extraction paths.
    ///
    /// Must be called after a successful [`parse`](ContentParser::parse).
    ///
    /// # Errors
    ///
    /// Returns a config error when a path is not usable for this format
    /// (e.g. an invalid CSS selector).
    fn find(&self, paths: &ExtractionPaths) -> Result<Vec<RawTuple>>;
}

/// Select the parser matching a declared content type.
pub fn parser_for(content_type: ContentType) -> Box<dyn ContentParser> {
    match content_type {
        ContentType::Html => Box::new(HtmlParser::new()),
        ContentType::Json => Box::new(JsonParser::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_content_type() {
        let mut parser = parser_for(ContentType::Json);
        assert!(parser.parse(b"[]"));

        let mut parser = parser_for(ContentType::Html);
        assert!(parser.parse(b"<html><body></body></html>"));
    }
}
