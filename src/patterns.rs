use std::collections::BTreeMap;

use crate::color::ColorClass;
use crate::types::RawResult;

/// Catalog color-sequence motifs over the most recent `window` results.
///
/// Results arrive most-recent-first. Whites and unknowns are dropped before
/// windowing, so a run is a run of consecutive *colored* outcomes. Every
/// 4-wide window is checked against all motifs independently: a 5-long red run
/// counts `R3+` twice. That overlap is intentional — the catalog is a
/// frequency signal, not a segmentation.
pub fn catalog_patterns(results: &[RawResult], window: usize) -> BTreeMap<String, u32> {
    use ColorClass::{Black as P, Red as R};

    let colors: Vec<ColorClass> = results
        .iter()
        .take(window)
        .map(|r| ColorClass::of(r.roll))
        .filter(|c| c.is_pattern_color())
        .collect();

    let mut counts = BTreeMap::new();
    if colors.len() < 4 {
        return counts;
    }

    for seq4 in colors.windows(4) {
        if seq4[..3] == [R, R, R] {
            bump(&mut counts, "R3+");
        }
        if seq4[..3] == [P, P, P] {
            bump(&mut counts, "P3+");
        }
        if seq4 == [R, R, R, R] {
            bump(&mut counts, "R4+");
        }
        if seq4 == [P, P, P, P] {
            bump(&mut counts, "P4+");
        }
        if seq4 == [R, P, R, P] {
            bump(&mut counts, "Tira (4) R");
        }
        if seq4 == [P, R, P, R] {
            bump(&mut counts, "Tira (4) P");
        }
        if seq4[..3] == [R, R, P] {
            bump(&mut counts, "2x1 R");
        }
        if seq4[..3] == [P, P, R] {
            bump(&mut counts, "2x1 P");
        }
    }

    counts
}

fn bump(counts: &mut BTreeMap<String, u32>, motif: &str) {
    *counts.entry(motif.to_string()).or_insert(0) += 1;
}
