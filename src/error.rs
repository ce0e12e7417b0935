//! Error types for samplecmd.
//!
//! Every error except [`SampleCmdError::Store`] is recoverable at the
//! per-site granularity: the aggregator logs it and moves on to the next
//! site. Only an unreadable descriptor store aborts the run. The site a
//! failure belongs to is carried in the tracing event, not the error value.

use std::path::PathBuf;

/// Top-level error type for all samplecmd operations.
#[derive(Debug, thiserror::Error)]
pub enum SampleCmdError {
    /// Malformed or incomplete site descriptor, or an unusable extraction
    /// pattern; the site is skipped.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network or HTTP-level failure while querying a site; the site is
    /// skipped.
    #[error("fetch error: {message}")]
    Fetch { message: String },

    /// Malformed response body; the site is skipped.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// The descriptor store could not be read at all. This is the only
    /// startup-fatal condition.
    #[error("descriptor store error at {path:?}: {message}")]
    Store { path: PathBuf, message: String },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SampleCmdError>;

impl SampleCmdError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a fetch error from any displayable message.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a store error for a path.
    pub fn store(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Store {
            path: path.into(),
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = SampleCmdError::config("missing {} placeholder");
        assert_eq!(err.to_string(), "config error: missing {} placeholder");

        let err = SampleCmdError::fetch("connection refused");
        assert!(err.to_string().contains("connection refused"));
    }
}
