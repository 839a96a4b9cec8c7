//! Canonical display labels for raw form answers.
//!
//! Free-text answers arrive in whatever casing and spelling students used.
//! Two flat tables clean them up: explicit brand overrides matched as
//! case-insensitive substrings, then an exact-match map for the broader
//! category names. Linear scans are fine at tens of labels.

use crate::client::RequestCount;

/// Brand overrides, checked first. Substring matches count, so the scan
/// order matters.
const OVERRIDES: &[(&str, &str)] = &[
    // Chips
    ("lays", "Lays"),
    ("lay's", "Lays"),
    ("kurkure", "Kurkure"),
    // Energy drinks
    ("red bull", "Red Bull"),
    ("redbull", "Red Bull"),
    ("hell", "Hell"),
    // Protein
    ("protein bar", "Protein Bar"),
    ("protein bars", "Protein Bar"),
];

/// Category synonyms, exact match only.
const FALLBACKS: &[(&str, &str)] = &[
    ("energy drink", "Energy Drinks"),
    ("energy drinks", "Energy Drinks"),
    ("healthy snack", "Healthy Snacks"),
    ("healthy snacks", "Healthy Snacks"),
    ("coffee and tea", "Coffee & Tea"),
    ("coffee & tea", "Coffee & Tea"),
];

const GLYPHS: &[(&str, &str)] = &[
    ("Lays", "🥔"),
    ("Kurkure", "🌶️"),
    ("Protein Bar", "💪"),
    ("Red Bull", "⚡"),
    ("Hell", "🔥"),
    ("Energy Drinks", "⚡"),
    ("Healthy Snacks", "🥗"),
    ("Coffee & Tea", "☕"),
    ("Chips & Crackers", "🥨"),
    ("Candy & Chocolate", "🍫"),
    ("Beverages", "🥤"),
    ("Organic Options", "🌿"),
];

const DEFAULT_GLYPH: &str = "🍽️";

const PLACEHOLDER_NAME: &str = "No Data";
const PLACEHOLDER_GLYPH: &str = "❓";

/// One row of the "Current Top Requests" display.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRequest {
    pub name: String,
    pub glyph: String,
    pub votes: u32,
    pub percentage: u32,
}

/// Maps a raw label to its canonical form; unknown labels pass through
/// unchanged, which makes this idempotent on already-canonical input.
pub fn standardize(raw: &str) -> String {
    let needle = raw.trim().to_lowercase();

    for (key, canonical) in OVERRIDES {
        if needle.contains(key) {
            return canonical.to_string();
        }
    }

    for (key, canonical) in FALLBACKS {
        if needle == *key {
            return canonical.to_string();
        }
    }

    raw.to_string()
}

/// Exact glyph match first, then case-insensitive substring.
pub fn glyph_for(request: &str) -> &'static str {
    if let Some((_, glyph)) = GLYPHS.iter().find(|(key, _)| *key == request) {
        return glyph;
    }

    let needle = request.to_lowercase();

    GLYPHS
        .iter()
        .find(|(key, _)| needle.contains(&key.to_lowercase()))
        .map(|(_, glyph)| *glyph)
        .unwrap_or(DEFAULT_GLYPH)
}

pub fn percentage(count: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }

    (count as f64 / total as f64 * 100.0).round() as u32
}

/// Canonicalizes the raw top requests and pads with zero-count
/// placeholders to exactly 3 slots for a stable layout.
pub fn display_requests(top: &[RequestCount], total_votes: u32) -> Vec<DisplayRequest> {
    let mut rows: Vec<DisplayRequest> = top
        .iter()
        .map(|item| DisplayRequest {
            name: standardize(&item.request),
            glyph: glyph_for(&item.request).to_string(),
            votes: item.count,
            percentage: percentage(item.count, total_votes),
        })
        .collect();

    rows.truncate(3);

    while rows.len() < 3 {
        rows.push(DisplayRequest {
            name: PLACEHOLDER_NAME.to_string(),
            glyph: PLACEHOLDER_GLYPH.to_string(),
            votes: 0,
            percentage: 0,
        });
    }

    rows
}
