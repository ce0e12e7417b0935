//! Data models for extracted commands.
//!
//! This module defines the two record shapes of the pipeline:
//! - [`RawTuple`]: the (title, command, description) triple a parser emits
//!   before the site identity is attached
//! - [`ResultRecord`]: the displayable record tagged with its source site

use std::cmp::Ordering;

/// An extracted (title, command, description) triple.
///
/// Produced by a content parser and consumed by the aggregator, which wraps
/// it into a [`ResultRecord`]. Not retained beyond one site's loop iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTuple {
    /// Short human-readable label for the command.
    pub title: String,
    /// The executable command line itself.
    pub command: String,
    /// Optional longer explanation; empty string when the site has none.
    pub description: String,
}

/// One command result ready for display.
///
/// Created by the aggregator after a successful parse of one site's
/// response; lives only until it has been rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    /// Name of the site the record came from.
    pub site_name: String,
    /// Base URL of the site, shown with `-r`.
    pub site_url: String,
    /// Short human-readable label for the command.
    pub title: String,
    /// The executable command line itself.
    pub command: String,
    /// Optional longer explanation, shown with `-d`.
    pub description: String,
}

impl ResultRecord {
    /// Attach a site identity to a parser-produced tuple.
    pub fn from_tuple(site_name: &str, site_url: &str, tuple: RawTuple) -> Self {
        Self {
            site_name: site_name.to_string(),
            site_url: site_url.to_string(),
            title: tuple.title,
            command: tuple.command,
            description: tuple.description,
        }
    }
}

// Records compare by site name only, for optional grouping by source.
impl Ord for ResultRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.site_name.cmp(&other.site_name)
    }
}

impl PartialOrd for ResultRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
