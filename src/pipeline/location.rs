//! Free-text Korean address resolution: canonical region token, optional
//! district token, and an approximate region centroid.
//!
//! This is deliberately locale-specific string matching, kept behind
//! `resolve()` so the table can be swapped without touching ranking.

/// Canonical region + centroid for a free-text address.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub region: String,
    pub district: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// Top-level administrative regions with approximate centroids, ordered;
/// the first containment match wins. The first entry doubles as the
/// conservative default.
const REGION_TABLE: &[(&str, f64, f64)] = &[
    ("서울", 37.5665, 126.9780),
    ("부산", 35.1796, 129.0756),
    ("대구", 35.8714, 128.6014),
    ("인천", 37.4563, 126.7052),
    ("광주", 35.1595, 126.8526),
    ("대전", 36.3504, 127.3845),
    ("울산", 35.5384, 129.3114),
    ("세종", 36.4800, 127.2890),
    ("제주", 33.4996, 126.5312),
    ("경기", 37.4138, 127.5183),
    ("강원", 37.8228, 128.1555),
    ("충북", 36.6357, 127.4917),
    ("충남", 36.6588, 126.6728),
    ("전북", 35.7175, 127.1530),
    ("전남", 34.8161, 126.4629),
    ("경북", 36.4919, 128.8889),
    ("경남", 35.4606, 128.2132),
];

/// Administrative suffixes stripped in the fallback path, longest first.
const ADMIN_SUFFIXES: &[&str] = &["특별자치시", "특별자치도", "특별시", "광역시", "도", "시"];

/// District suffix marker ("-gu").
const DISTRICT_MARKER: char = '구';

/// Marker plus at most 5 preceding characters.
const MAX_DISTRICT_CHARS: usize = 6;

/// Resolve a free-text address. Never fails: unknown or empty input falls
/// back to the primary region and its centroid.
pub fn resolve(address: &str) -> ResolvedLocation {
    let trimmed = address.trim();
    let district = extract_district(trimmed);

    for (region, lat, lon) in REGION_TABLE {
        if trimmed.contains(region) {
            return ResolvedLocation {
                region: (*region).to_string(),
                district,
                lat: *lat,
                lon: *lon,
            };
        }
    }

    let (default_region, default_lat, default_lon) = REGION_TABLE[0];
    let mut stripped = trimmed.to_string();
    for suffix in ADMIN_SUFFIXES {
        stripped = stripped.replace(suffix, " ");
    }

    let region = stripped
        .split_whitespace()
        .next()
        .unwrap_or(default_region)
        .to_string();

    ResolvedLocation {
        region,
        district,
        lat: default_lat,
        lon: default_lon,
    }
}

/// District token: the whitespace-delimited token ending in the marker,
/// truncated to the marker plus at most 5 preceding characters.
fn extract_district(address: &str) -> Option<String> {
    for token in address.split_whitespace() {
        if token.ends_with(DISTRICT_MARKER) && token.chars().count() >= 2 {
            let chars: Vec<char> = token.chars().collect();
            let start = chars.len().saturating_sub(MAX_DISTRICT_CHARS);
            return Some(chars[start..].iter().collect());
        }
    }
    None
}

/// Raw district split: everything from the last word boundary up to and
/// including the first marker occurrence. Cruder than `extract_district`;
/// used as a secondary region-match rule during ranking.
pub fn split_district(address: &str) -> Option<String> {
    let idx = address.find(DISTRICT_MARKER)?;
    let head = &address[..idx];
    // Whitespace may be multi-byte (U+3000 in CJK text), so advance by the
    // matched char's width rather than assuming one byte.
    let start = head
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let token = &address[start..idx + DISTRICT_MARKER.len_utf8()];
    if token.chars().count() >= 2 {
        Some(token.to_string())
    } else {
        None
    }
}
