//! Aggregator: the per-site pipeline and the cross-site sampling policy.
//!
//! For every descriptor in store order: validate → fetch → status check →
//! parse → find → wrap into [`ResultRecord`]s. Each site's records are
//! shuffled before joining the global pool (so no single site's internal
//! ordering dominates), then the pool is shuffled again and reduced to the
//! requested limit.
//!
//! Every per-site failure skips exactly that site with a tracing diagnostic;
//! the run itself never fails. An empty final pool is a normal outcome.
//!
//! Fetches for independent sites run concurrently, but results are
//! collected in store order and all randomness flows through the caller's
//! rng after collection, so completion order cannot change what gets
//! sampled.

use crate::descriptor::{DescriptorStore, SiteDescriptor};
use crate::error::{Result, SampleCmdError};
use crate::fetch::HttpFetcher;
use crate::models::ResultRecord;
use crate::parsers::parser_for;
use futures::stream::{self, StreamExt};
use rand::Rng;
use rand::seq::SliceRandom;
use reqwest::StatusCode;
use tracing::{debug, error, info, instrument, warn};

/// How many site fetches may be in flight at once.
const FETCH_CONCURRENCY: usize = 4;

/// Orchestrates one search run across all configured sites.
///
/// Owns its descriptor collection outright; there is no process-wide site
/// list.
pub struct Aggregator {
    store: DescriptorStore,
    fetcher: HttpFetcher,
}

impl Aggregator {
    /// Build an aggregator over an already-loaded descriptor store.
    pub fn new(store: DescriptorStore, fetcher: HttpFetcher) -> Self {
        Self { store, fetcher }
    }

    /// Search every enabled site for `keyword` and return at most `limit`
    /// uniformly sampled records.
    #[instrument(skip_all, fields(keyword = %keyword, limit))]
    pub async fn run<R: Rng>(
        &self,
        keyword: &str,
        limit: usize,
        rng: &mut R,
    ) -> Vec<ResultRecord> {
        let active: Vec<&SiteDescriptor> = self
            .store
            .descriptors()
            .iter()
            .filter(|descriptor| {
                if !descriptor.general.enable {
                    debug!(site = %descriptor.site.site_name, "Site disabled; skipping");
                    return false;
                }
                if let Err(e) = descriptor.validate() {
                    warn!(site = %descriptor.site.site_name, error = %e, "Inconsistency in config keys or sections; skipping site");
                    return false;
                }
                true
            })
            .collect();
        debug!(active = active.len(), total = self.store.len(), "Validated site descriptors");

        // Concurrent fetch, collected in store order.
        let fetched: Vec<(&SiteDescriptor, Result<(StatusCode, Vec<u8>)>)> =
            stream::iter(active)
                .map(|descriptor| {
                    let fetcher = &self.fetcher;
                    async move {
                        let outcome = fetcher.fetch(descriptor, keyword).await;
                        (descriptor, outcome)
                    }
                })
                .buffered(FETCH_CONCURRENCY)
                .collect()
                .await;

        let mut pool: Vec<ResultRecord> = Vec::new();
        for (descriptor, outcome) in fetched {
            let site = descriptor.site.site_name.as_str();
            let (status, body) = match outcome {
                Ok(response) => response,
                Err(e) => {
                    error!(site, error = %e, "Fetch failed; skipping site");
                    continue;
                }
            };

            match site_records(descriptor, status, &body) {
                Ok(mut records) => {
                    debug!(site, count = records.len(), "Extracted records");
                    records.shuffle(rng);
                    pool.extend(records);
                }
                Err(e) => {
                    warn!(site, error = %e, "Skipping site");
                }
            }
        }

        let sampled = sample(pool, limit, rng);
        info!(count = sampled.len(), "Search complete");
        sampled
    }
}

/// The post-fetch half of one site's pipeline: status check, parser
/// selection, parse, find, and wrapping tuples with the site identity.
///
/// # Errors
///
/// Any failure maps to the taxonomy: non-200 status is a fetch error,
/// malformed body a parse error, unusable extraction paths a config error.
pub(crate) fn site_records(
    descriptor: &SiteDescriptor,
    status: StatusCode,
    body: &[u8],
) -> Result<Vec<ResultRecord>> {
    if status != StatusCode::OK {
        return Err(SampleCmdError::fetch(format!(
            "site returned error code {}",
            status.as_u16()
        )));
    }

    let mut parser = parser_for(descriptor.content.site_content_type);
    if !parser.parse(body) {
        return Err(SampleCmdError::parse("invalid site content"));
    }

    let tuples = parser.find(&descriptor.pattern)?;
    Ok(tuples
        .into_iter()
        .map(|tuple| {
            ResultRecord::from_tuple(&descriptor.site.site_name, &descriptor.site.site_url, tuple)
        })
        .collect())
}

/// Reduce the pool to at most `limit` records, chosen uniformly without
/// replacement. A shuffle followed by truncation is exactly that, in one
/// rng pass.
pub(crate) fn sample<R: Rng>(
    mut pool: Vec<ResultRecord>,
    limit: usize,
    rng: &mut R,
) -> Vec<ResultRecord> {
    pool.shuffle(rng);
    pool.truncate(limit);
    pool
}
