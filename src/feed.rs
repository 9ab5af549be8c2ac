use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono_tz::Tz;
use reqwest::header::{ACCEPT, CONNECTION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

use crate::clock::{local_moment, minute_digit};
use crate::color::ColorClass;
use crate::config::FeedConfig;
use crate::patterns::catalog_patterns;
use crate::ranking::white_ranking_by_digit;
use crate::types::{AggregatedPayload, RawResult};

/// Source of recent roulette results, most-recent-first.
///
/// The seam between analytics and transport — tests swap in a mock.
#[async_trait]
pub trait ResultsFeed: Send + Sync {
    async fn recent_results(&self) -> Result<Vec<RawResult>>;
}

/// The feed body comes either as an object wrapping a `records` array or as a
/// bare array, depending on the endpoint revision.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedBody {
    Records { records: Vec<RawResult> },
    List(Vec<RawResult>),
}

impl FeedBody {
    fn into_results(self) -> Vec<RawResult> {
        match self {
            Self::Records { records } => records,
            Self::List(list) => list,
        }
    }
}

/// HTTP client for the Blaze recent-results endpoint.
pub struct BlazeFeed {
    client: reqwest::Client,
    url: String,
}

impl BlazeFeed {
    pub fn new(cfg: &FeedConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&cfg.user_agent).context("invalid user_agent header")?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("failed to build feed client")?;

        Ok(Self {
            client,
            url: cfg.url.clone(),
        })
    }
}

#[async_trait]
impl ResultsFeed for BlazeFeed {
    async fn recent_results(&self) -> Result<Vec<RawResult>> {
        let body: FeedBody = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("feed request failed")?
            .error_for_status()
            .context("feed returned error status")?
            .json()
            .await
            .context("feed returned malformed body")?;

        let results = body.into_results();
        debug!("Fetched {} raw results", results.len());
        Ok(results)
    }
}

/// One fetch-and-transform cycle over a [`ResultsFeed`].
///
/// Transport and decode failures surface as `Err`; the cache layer substitutes
/// the empty payload so a feed outage degrades to "no data".
pub struct FeedAggregator<F> {
    feed: F,
    tz: Tz,
    pattern_window: usize,
    max_records: usize,
}

impl<F: ResultsFeed> FeedAggregator<F> {
    pub fn new(feed: F, tz: Tz, pattern_window: usize, max_records: usize) -> Self {
        Self {
            feed,
            tz,
            pattern_window,
            max_records,
        }
    }

    /// Fetch the feed and derive all three analytic views.
    pub async fn snapshot(&self) -> Result<AggregatedPayload> {
        let mut results = self.feed.recent_results().await?;
        results.truncate(self.max_records);
        Ok(build_payload(&results, &self.tz, self.pattern_window))
    }
}

/// Derive the grade map, pattern catalog and white ranking from raw results.
///
/// Grid bucketing needs both a roll and a normalizable timestamp; records
/// missing either are skipped for the grid but still flow into the pattern
/// scan (classification needs no timestamp). Bucket order follows feed order.
pub fn build_payload(results: &[RawResult], tz: &Tz, pattern_window: usize) -> AggregatedPayload {
    let mut payload = AggregatedPayload::default();

    for item in results {
        let (Some(roll), Some(created_at)) = (item.roll, item.created_at.as_deref()) else {
            continue;
        };
        let Some(moment) = local_moment(created_at, tz) else {
            continue;
        };
        let token = format!("{roll}{}", ColorClass::of(Some(roll)).tag());
        payload
            .grade_map
            .entry(minute_digit(&moment))
            .or_default()
            .push(token);
    }

    payload.padroes = catalog_patterns(results, pattern_window);
    payload.ranking_brancos_digito = white_ranking_by_digit(results, tz);
    payload
}
