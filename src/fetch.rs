//! HTTP fetcher: one request per site, as the descriptor dictates.

use crate::descriptor::{RequestMethod, SiteDescriptor};
use crate::error::{Result, SampleCmdError};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// User-Agent string sent with every search request.
const USER_AGENT: &str = concat!("samplecmd/", env!("CARGO_PKG_VERSION"));

/// Single-attempt request timeout; one hanging site must not stall the run.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Issues the HTTP request a [`SiteDescriptor`] describes.
///
/// The fetcher is stateless across sites: it holds one shared
/// [`reqwest::Client`] and nothing else, so no response state can leak from
/// one site's request into the next.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher with the crate's User-Agent and request timeout.
    ///
    /// # Errors
    ///
    /// Returns a fetch error when the underlying HTTP client cannot be
    /// constructed.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SampleCmdError::fetch(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Build the search URL by substituting the percent-encoded keyword
    /// into the descriptor's URL template.
    ///
    /// # Errors
    ///
    /// Returns a fetch error when the substituted URL is not a valid
    /// absolute URL (e.g. missing scheme).
    pub fn search_url(descriptor: &SiteDescriptor, keyword: &str) -> Result<Url> {
        let encoded = urlencoding::encode(keyword);
        let url = descriptor.site.site_search_url.replacen("{}", &encoded, 1);
        Url::parse(&url)
            .map_err(|e| SampleCmdError::fetch(format!("invalid search url {url:?}: {e}")))
    }

    /// Perform the single search request for one site.
    ///
    /// Dispatches GET or POST per the descriptor, sets the `Content-Type`
    /// header from the declared content type, and returns the response
    /// status with the raw body bytes. Status checking is left to the
    /// caller; any transport-level failure is a fetch error.
    pub async fn fetch(
        &self,
        descriptor: &SiteDescriptor,
        keyword: &str,
    ) -> Result<(StatusCode, Vec<u8>)> {
        let url = Self::search_url(descriptor, keyword)?;
        debug!(site = %descriptor.site.site_name, %url, method = ?descriptor.content.site_content_action, "Fetching");

        let request = match descriptor.content.site_content_action {
            RequestMethod::Get => self.client.get(url),
            RequestMethod::Post => self.client.post(url),
        };

        let response = request
            .header(
                CONTENT_TYPE,
                descriptor.content.site_content_type.header_value(),
            )
            .send()
            .await
            .map_err(|e| SampleCmdError::fetch(format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| SampleCmdError::fetch(format!("reading response body failed: {e}")))?;
        Ok((status, body.to_vec()))
    }
}
