use std::collections::BTreeMap;

use chrono_tz::Tz;

use crate::clock::{local_moment, minute_digit};
use crate::types::RawResult;

/// Count white outcomes per minute digit over the full record list.
///
/// Records that are not white, lack a timestamp, or fail to normalize are
/// silently skipped. Only digits with at least one hit appear in the map.
pub fn white_ranking_by_digit(results: &[RawResult], tz: &Tz) -> BTreeMap<u8, u32> {
    let mut ranking = BTreeMap::new();

    for item in results {
        if item.roll != Some(0) {
            continue;
        }
        let Some(created_at) = item.created_at.as_deref() else {
            continue;
        };
        let Some(moment) = local_moment(created_at, tz) else {
            continue;
        };
        *ranking.entry(minute_digit(&moment)).or_insert(0) += 1;
    }

    ranking
}
