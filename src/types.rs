use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One raw outcome record as returned by the feed.
///
/// Upstream sends more fields (id, server seed, ...) — everything except the
/// roll and its creation timestamp is ignored. Both fields can be absent in
/// practice, so each downstream consumer checks only what it needs.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResult {
    #[serde(default)]
    pub roll: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The three analytic views derived from one fetch cycle.
///
/// Digit keys are `u8` internally; serde_json stringifies integer map keys, so
/// the wire format keeps the `"0"`..`"9"` keys the frontend expects.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedPayload {
    /// Minute digit → formatted result tokens ("10P", "5R", "0B"), feed order.
    pub grade_map: BTreeMap<u8, Vec<String>>,
    /// Motif name → occurrence count; only counted motifs appear.
    pub padroes: BTreeMap<String, u32>,
    /// Minute digit → count of white outcomes at that digit.
    pub ranking_brancos_digito: BTreeMap<u8, u32>,
}

/// Envelope returned by the query endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GradeResponse {
    /// Current local time, formatted HH:MM:SS.
    pub timestamp_br: String,
    /// Minute digit of the current local time, kept as an integer for the
    /// frontend's free-field logic.
    pub digito_minuto_atual: u8,
    pub data: AggregatedPayload,
}
