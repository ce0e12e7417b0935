//! Site descriptors: declarative per-site search configuration.
//!
//! Each site is described by one YAML file with four required sections:
//!
//! ```yaml
//! general:
//!   enable: true
//! site:
//!   site_name: commandlinefu
//!   site_url: https://www.commandlinefu.com
//!   site_search_url: "https://www.commandlinefu.com/commands/matching/{}/json"
//! content:
//!   site_content_type: json   # html | json
//!   site_content_action: get  # get | post
//! pattern:
//!   parent: ""
//!   title: summary
//!   command: command
//!   description: ""
//! ```
//!
//! Descriptors are loaded once per run from a built-in `sites/` directory
//! next to the executable plus an optional `~/.samplecmd/sites` override
//! directory, and are immutable afterwards. A descriptor that fails to load
//! or validate is skipped with a diagnostic; it never aborts the run.

use crate::error::{Result, SampleCmdError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Sub-directory of the user's home holding override descriptors.
const USER_SITES_DIR: &str = ".samplecmd/sites";

/// Declared response format of a site, selecting the content parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Html,
    Json,
}

impl ContentType {
    /// The `Content-Type` request header value sent for this format.
    pub fn header_value(self) -> &'static str {
        match self {
            ContentType::Html => "text/html",
            ContentType::Json => "application/json",
        }
    }
}

/// HTTP method used for the search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestMethod {
    Get,
    Post,
}

/// `general` section: run-time enablement.
#[derive(Debug, Clone, Deserialize)]
pub struct General {
    /// Disabled sites are never fetched, regardless of reachability.
    pub enable: bool,
}

/// `site` section: identity and search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteInfo {
    pub site_name: String,
    pub site_url: String,
    /// Search URL template with one `{}` placeholder for the keyword.
    pub site_search_url: String,
}

/// `content` section: response format and request method.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentInfo {
    pub site_content_type: ContentType,
    pub site_content_action: RequestMethod,
}

/// `pattern` section: extraction paths for the matching parser.
///
/// For HTML sites each path is a CSS selector; for JSON sites `parent` is a
/// slash-delimited key path and the rest are direct keys. `parent` and
/// `description` may be empty, `title` and `command` may not.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionPaths {
    pub parent: String,
    pub title: String,
    pub command: String,
    pub description: String,
}

/// One site's complete configuration, as loaded from a descriptor file.
///
/// All four sections are required; a file missing any section or key fails
/// deserialization and is skipped as a whole, never partially applied.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteDescriptor {
    pub general: General,
    pub site: SiteInfo,
    pub content: ContentInfo,
    pub pattern: ExtractionPaths,
}

impl SiteDescriptor {
    /// Load a descriptor from one YAML file.
    ///
    /// # Errors
    ///
    /// Returns a config error when the file cannot be read or does not
    /// deserialize into the four-section structure (missing sections or
    /// keys, unknown content type or action).
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SampleCmdError::config(format!("unreadable file {}: {e}", path.display()))
        })?;
        serde_yaml::from_str(&raw).map_err(|e| {
            SampleCmdError::config(format!("invalid structure in {}: {e}", path.display()))
        })
    }

    /// Check the constraints deserialization cannot express.
    ///
    /// Requires non-empty site name, site URL, title pattern, and command
    /// pattern, and exactly one `{}` keyword placeholder in the search URL.
    ///
    /// # Errors
    ///
    /// Returns a config error naming the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        if self.site.site_name.is_empty() {
            return Err(SampleCmdError::config("empty site_name"));
        }
        if self.site.site_url.is_empty() {
            return Err(SampleCmdError::config("empty site_url"));
        }
        if self.site.site_search_url.matches("{}").count() != 1 {
            return Err(SampleCmdError::config(
                "site_search_url must contain exactly one {} placeholder",
            ));
        }
        if self.pattern.title.is_empty() {
            return Err(SampleCmdError::config("empty title pattern"));
        }
        if self.pattern.command.is_empty() {
            return Err(SampleCmdError::config("empty command pattern"));
        }
        Ok(())
    }
}

/// The loaded, ordered collection of site descriptors for one run.
///
/// Built-in descriptors come first, then user overrides; duplicate sites are
/// simply both queried. Owned by the caller and handed to the aggregator at
/// construction time, so there is no shared global site list.
#[derive(Debug)]
pub struct DescriptorStore {
    descriptors: Vec<SiteDescriptor>,
}

impl DescriptorStore {
    /// The descriptor directories searched by default: `sites/` next to the
    /// executable, then `~/.samplecmd/sites`.
    pub fn default_dirs() -> Vec<PathBuf> {
        let mut search_dirs = Vec::new();
        if let Ok(exe) = std::env::current_exe() {
            if let Some(parent) = exe.parent() {
                search_dirs.push(parent.join("sites"));
            }
        }
        if let Some(home) = dirs::home_dir() {
            search_dirs.push(home.join(USER_SITES_DIR));
        }
        search_dirs
    }

    /// Load every `*.yaml`/`*.yml` descriptor from the given directories,
    /// in order, with files sorted within each directory.
    ///
    /// Files that fail to load are skipped with a warning. Directories that
    /// do not exist are tolerated, but if none of them is readable the
    /// store itself is unreadable.
    ///
    /// # Errors
    ///
    /// Returns a store error when no directory could be read at all.
    pub fn load(search_dirs: &[PathBuf]) -> Result<Self> {
        let mut descriptors = Vec::new();
        let mut readable_dirs = 0usize;

        for dir in search_dirs {
            let entries = match std::fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(e) => {
                    debug!(dir = %dir.display(), error = %e, "Skipping unreadable site directory");
                    continue;
                }
            };
            readable_dirs += 1;

            let mut paths: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| {
                    matches!(
                        path.extension().and_then(|ext| ext.to_str()),
                        Some("yaml") | Some("yml")
                    )
                })
                .collect();
            paths.sort();

            for path in paths {
                match SiteDescriptor::load(&path) {
                    Ok(descriptor) => {
                        debug!(path = %path.display(), site = %descriptor.site.site_name, "Loaded site descriptor");
                        descriptors.push(descriptor);
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Invalid config file structure; skipping site");
                    }
                }
            }
        }

        if readable_dirs == 0 {
            let shown = search_dirs.first().cloned().unwrap_or_default();
            return Err(SampleCmdError::store(
                shown,
                "no readable site descriptor directory",
            ));
        }

        Ok(Self { descriptors })
    }

    /// All descriptors in store order.
    pub fn descriptors(&self) -> &[SiteDescriptor] {
        &self.descriptors
    }

    /// Number of loaded descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the store loaded no descriptors at all.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Build a store from already-constructed descriptors.
    pub fn from_descriptors(descriptors: Vec<SiteDescriptor>) -> Self {
        Self { descriptors }
    }
}
