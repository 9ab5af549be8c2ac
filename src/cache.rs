use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::feed::{FeedAggregator, ResultsFeed};
use crate::types::AggregatedPayload;

struct Slot {
    fetched_at: Option<Instant>,
    payload: AggregatedPayload,
}

/// Single-slot TTL cache in front of the feed aggregator.
///
/// One instance lives for the whole process and is injected into the request
/// path. The async mutex stays held across the refresh, so concurrent requests
/// arriving at expiry trigger exactly one upstream fetch — the rest wait and
/// read the freshly stored slot.
pub struct FreshnessCache<F> {
    aggregator: FeedAggregator<F>,
    ttl: Duration,
    slot: Mutex<Slot>,
}

impl<F: ResultsFeed> FreshnessCache<F> {
    pub fn new(aggregator: FeedAggregator<F>, ttl: Duration) -> Self {
        Self {
            aggregator,
            ttl,
            slot: Mutex::new(Slot {
                fetched_at: None,
                payload: AggregatedPayload::default(),
            }),
        }
    }

    /// Return the cached payload, refreshing it first when stale.
    ///
    /// A failed refresh stores the empty payload and still resets the clock:
    /// during an outage the upstream is retried at most once per TTL, not on
    /// every request.
    pub async fn get(&self) -> AggregatedPayload {
        let mut slot = self.slot.lock().await;

        if let Some(fetched_at) = slot.fetched_at {
            if fetched_at.elapsed() <= self.ttl {
                debug!("Cache hit, serving stored payload");
                return slot.payload.clone();
            }
        }

        info!("Cache expired, fetching fresh feed data");
        let payload = match self.aggregator.snapshot().await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Feed refresh failed, serving empty payload: {e:#}");
                AggregatedPayload::default()
            }
        };

        slot.payload = payload.clone();
        slot.fetched_at = Some(Instant::now());
        payload
    }
}
