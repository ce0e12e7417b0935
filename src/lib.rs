//! # samplecmd
//!
//! Finds sample commands for a keyword by searching a set of configurable
//! command-snippet sites and merging the results into one random sample.
//!
//! ## Architecture
//!
//! One run is a straight pipeline:
//! 1. **Load**: read every site descriptor from the built-in `sites/`
//!    directory and `~/.samplecmd/sites` ([`descriptor`])
//! 2. **Fetch**: issue one search request per enabled, valid site
//!    ([`fetch`])
//! 3. **Extract**: parse each response (HTML or JSON) with the site's
//!    extraction paths ([`parsers`])
//! 4. **Sample**: shuffle per site, merge, shuffle the pool, cut to the
//!    requested limit ([`aggregate`])
//! 5. **Render**: print the numbered, color-coded list ([`output`])
//!
//! A failing site is skipped with a diagnostic; only an unreadable
//! descriptor store is fatal.

pub mod aggregate;
pub mod cli;
pub mod descriptor;
pub mod error;
pub mod fetch;
pub mod models;
pub mod output;
pub mod parsers;

pub use aggregate::Aggregator;
pub use descriptor::{DescriptorStore, SiteDescriptor};
pub use error::{Result, SampleCmdError};
pub use fetch::HttpFetcher;
pub use models::ResultRecord;
