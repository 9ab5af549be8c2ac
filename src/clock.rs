use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;

/// Convert an upstream timestamp string into a civil date-time in `tz`.
///
/// Malformed input is a recoverable absence, never an error: the record is
/// simply left out of the time-keyed views.
pub fn local_moment(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    Some(parse_instant(raw)?.with_timezone(tz))
}

/// Parse an ISO-8601 timestamp into a UTC instant.
///
/// A full RFC 3339 parse is attempted first so explicit offsets survive even
/// when fractional seconds are present. The fallback reproduces the feed's
/// historical quirks: a trailing 'Z' is rewritten to "+00:00", then anything
/// from the first '.' on is cut and the remainder is parsed as a naive UTC
/// date-time.
fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    let rewritten = match raw.strip_suffix('Z') {
        Some(head) => format!("{head}+00:00"),
        None => raw.to_string(),
    };
    if let Some((head, _fraction)) = rewritten.split_once('.') {
        let naive = NaiveDateTime::parse_from_str(head, "%Y-%m-%dT%H:%M:%S").ok()?;
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(&rewritten)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Last decimal digit of the minute, the grid/ranking bucket key. Always 0-9.
pub fn minute_digit<T: Timelike>(moment: &T) -> u8 {
    (moment.minute() % 10) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAO_PAULO: Tz = chrono_tz::America::Sao_Paulo;

    // ── parsing ────────────────────────────────────────────────────

    #[test]
    fn z_suffix_equals_explicit_offset() {
        let a = local_moment("2024-01-01T12:03:05Z", &SAO_PAULO).expect("parses");
        let b = local_moment("2024-01-01T12:03:05+00:00", &SAO_PAULO).expect("parses");
        assert_eq!(a, b);
    }

    #[test]
    fn fractional_seconds_with_z() {
        let with_fraction = local_moment("2024-01-01T12:03:00.123Z", &SAO_PAULO).expect("parses");
        let without = local_moment("2024-01-01T12:03:00Z", &SAO_PAULO).expect("parses");
        assert_eq!(with_fraction.minute(), without.minute());
        assert_eq!(with_fraction.hour(), without.hour());
    }

    #[test]
    fn explicit_offset_with_fraction_keeps_offset() {
        // 12:03 at -03:00 is 15:03 UTC, i.e. 12:03 in São Paulo
        let moment =
            local_moment("2024-01-01T12:03:00.500-03:00", &SAO_PAULO).expect("parses");
        assert_eq!(moment.hour(), 12);
        assert_eq!(moment.minute(), 3);
    }

    #[test]
    fn converts_to_sao_paulo() {
        // São Paulo is UTC-3 year-round since DST was abolished
        let moment = local_moment("2024-01-01T12:03:05Z", &SAO_PAULO).expect("parses");
        assert_eq!(moment.hour(), 9);
        assert_eq!(moment.minute(), 3);
        assert_eq!(moment.second(), 5);
    }

    #[test]
    fn oversized_fraction_falls_back_to_truncation() {
        // Ten fractional digits exceed what RFC 3339 parsing accepts; the
        // legacy path cuts at the '.' and still resolves the instant.
        let moment =
            local_moment("2024-01-01T12:03:05.0123456789Z", &SAO_PAULO).expect("parses");
        assert_eq!(moment.hour(), 9);
        assert_eq!(moment.minute(), 3);
        assert_eq!(moment.second(), 5);
    }

    #[test]
    fn malformed_inputs_yield_none() {
        for raw in ["", "not-a-date", "2024-13-99T99:99:99Z", "2024-01-01", "12:03:05"] {
            assert!(local_moment(raw, &SAO_PAULO).is_none(), "{raw:?} should not parse");
        }
    }

    // ── minute digit ───────────────────────────────────────────────

    #[test]
    fn minute_digit_is_minute_mod_ten() {
        let m23 = local_moment("2024-01-01T12:23:00Z", &SAO_PAULO).expect("parses");
        assert_eq!(minute_digit(&m23), 3);
        let m50 = local_moment("2024-01-01T12:50:00Z", &SAO_PAULO).expect("parses");
        assert_eq!(minute_digit(&m50), 0);
        let m09 = local_moment("2024-01-01T12:09:00Z", &SAO_PAULO).expect("parses");
        assert_eq!(minute_digit(&m09), 9);
    }
}
