//! Region-aware hospital ranking: shortlist the catalog around the user's
//! region, annotate effective distances, and sort.

use std::cmp::Ordering;

use crate::models::Hospital;

use super::geo;
use super::location::{self, ResolvedLocation};

/// A hospital listing the recommended department counts as 20% closer.
/// Tunable heuristic, not a correctness property.
pub const DEPARTMENT_MATCH_FACTOR: f64 = 0.8;

/// Shortlist `catalog` around the user's region and sort by match tier,
/// then ascending effective distance. A district-level match always ranks
/// ahead of a mere region-level match, regardless of raw distance.
///
/// Records are cloned before the per-request `distance_km` annotation so a
/// shared catalog is never mutated. Never fails: with no regional match the
/// whole catalog is ranked by distance instead.
pub fn rank(catalog: &[Hospital], user_region: &str, department: &str) -> Vec<Hospital> {
    let resolved = location::resolve(user_region);
    let raw_district = location::split_district(user_region);

    let mut shortlist: Vec<(u8, Hospital)> = catalog
        .iter()
        .filter_map(|h| {
            match_tier(h, &resolved, raw_district.as_deref()).map(|tier| (tier, h.clone()))
        })
        .collect();

    if shortlist.is_empty() {
        tracing::warn!(
            user_region,
            region = %resolved.region,
            "no regional match in hospital catalog, ranking the full catalog"
        );
        shortlist = catalog.iter().map(|h| (0, h.clone())).collect();
    }

    sort_annotated(&mut shortlist, &resolved, department);
    shortlist.into_iter().map(|(_, h)| h).collect()
}

/// Rank the entire catalog without regional filtering. Used to top up the
/// recommendation quota when the regional shortlist alone is too small.
pub fn rank_all(catalog: &[Hospital], user_region: &str, department: &str) -> Vec<Hospital> {
    let resolved = location::resolve(user_region);
    let mut all: Vec<(u8, Hospital)> = catalog.iter().map(|h| (0, h.clone())).collect();
    sort_annotated(&mut all, &resolved, department);
    all.into_iter().map(|(_, h)| h).collect()
}

/// Region-match tier, best rule wins: (0) resolved district, (1) raw-split
/// district, (2) region containment, (3) reverse containment of the
/// hospital region's first token. `None` means no match at all.
fn match_tier(
    hospital: &Hospital,
    resolved: &ResolvedLocation,
    raw_district: Option<&str>,
) -> Option<u8> {
    if let Some(district) = resolved.district.as_deref() {
        if hospital.region.contains(district) {
            return Some(0);
        }
    }
    if let Some(district) = raw_district {
        if hospital.region.contains(district) {
            return Some(1);
        }
    }
    if hospital.region.contains(&resolved.region) {
        return Some(2);
    }
    let first = hospital.region.split_whitespace().next()?;
    resolved.region.contains(first).then_some(3)
}

fn sort_annotated(
    hospitals: &mut [(u8, Hospital)],
    from: &ResolvedLocation,
    department: &str,
) {
    for (_, hospital) in hospitals.iter_mut() {
        hospital.distance_km = match (hospital.latitude, hospital.longitude) {
            (Some(lat), Some(lon)) => {
                let mut d = geo::distance_km(from.lat, from.lon, lat, lon);
                if hospital.has_department(department) {
                    d *= DEPARTMENT_MATCH_FACTOR;
                }
                Some(d)
            }
            _ => None,
        };
    }
    // Stable: ties and unlocatable hospitals keep catalog order.
    hospitals.sort_by(|(tier_a, a), (tier_b, b)| {
        tier_a.cmp(tier_b).then(
            sort_key(a)
                .partial_cmp(&sort_key(b))
                .unwrap_or(Ordering::Equal),
        )
    });
}

fn sort_key(hospital: &Hospital) -> f64 {
    hospital.distance_km.unwrap_or(f64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hospital(
        id: &str,
        region: &str,
        coords: Option<(f64, f64)>,
        departments: &[&str],
    ) -> Hospital {
        Hospital {
            id: id.into(),
            name: format!("{id} 동물병원"),
            address: region.into(),
            region: region.into(),
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
            departments: departments.iter().map(|d| (*d).to_string()).collect(),
            operating_hours: "09:00~18:00".into(),
            phone: "02-0000-0000".into(),
            description: String::new(),
            distance_km: None,
        }
    }

    #[test]
    fn district_match_beats_raw_distance() {
        // Seocho sits right on the Seoul centroid used for distance, but the
        // user's own district is Gangnam: the district match must win.
        let catalog = vec![
            hospital("seocho", "서울특별시 서초구", Some((37.5665, 126.9780)), &[]),
            hospital("gangnam", "서울특별시 강남구", Some((37.5012, 127.0395)), &[]),
        ];

        let ranked = rank(&catalog, "서울특별시 강남구 테헤란로 1", "surgery");
        assert_eq!(ranked[0].id, "gangnam");
        assert_eq!(ranked[1].id, "seocho");
    }

    #[test]
    fn other_region_is_filtered_out() {
        let catalog = vec![
            hospital("daejeon", "대전광역시 유성구", Some((36.3628, 127.3566)), &[]),
            hospital("gangnam", "서울특별시 강남구", Some((37.5012, 127.0395)), &[]),
        ];

        let ranked = rank(&catalog, "서울특별시 강남구", "surgery");
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, "gangnam");
    }

    #[test]
    fn department_match_ranks_strictly_ahead_at_equal_distance() {
        let coords = Some((37.50, 127.04));
        let catalog = vec![
            hospital("plain", "서울특별시 강남구", coords, &["surgery"]),
            hospital("matching", "서울특별시 강남구", coords, &["internal medicine"]),
        ];

        let ranked = rank(&catalog, "서울특별시 강남구", "internal medicine");
        assert_eq!(ranked[0].id, "matching");
        assert!(ranked[0].distance_km.unwrap() < ranked[1].distance_km.unwrap());
    }

    #[test]
    fn hospitals_without_coordinates_sort_last() {
        let catalog = vec![
            hospital("nowhere", "서울특별시 강남구", None, &[]),
            hospital("located", "서울특별시 강남구", Some((37.5012, 127.0395)), &[]),
        ];

        let ranked = rank(&catalog, "서울특별시 강남구", "surgery");
        assert_eq!(ranked[0].id, "located");
        assert_eq!(ranked[1].id, "nowhere");
        assert!(ranked[1].distance_km.is_none());
    }

    #[test]
    fn empty_shortlist_falls_back_to_full_catalog() {
        let catalog = vec![hospital(
            "daejeon",
            "대전광역시 유성구",
            Some((36.3628, 127.3566)),
            &[],
        )];

        let ranked = rank(&catalog, "부산광역시 해운대구", "surgery");
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, "daejeon");
    }

    #[test]
    fn ties_keep_catalog_order() {
        let coords = Some((37.50, 127.04));
        let catalog = vec![
            hospital("first", "서울특별시 강남구", coords, &[]),
            hospital("second", "서울특별시 강남구", coords, &[]),
        ];

        let ranked = rank(&catalog, "서울특별시 강남구", "surgery");
        assert_eq!(ranked[0].id, "first");
        assert_eq!(ranked[1].id, "second");
    }

    #[test]
    fn input_catalog_is_never_mutated() {
        let catalog = vec![hospital(
            "gangnam",
            "서울특별시 강남구",
            Some((37.5012, 127.0395)),
            &[],
        )];

        let ranked = rank(&catalog, "서울특별시 강남구", "surgery");
        assert!(ranked[0].distance_km.is_some());
        assert!(catalog[0].distance_km.is_none());
    }

    #[test]
    fn rank_all_ignores_region_filtering() {
        let catalog = vec![
            hospital("daejeon", "대전광역시 유성구", Some((36.3628, 127.3566)), &[]),
            hospital("gangnam", "서울특별시 강남구", Some((37.5012, 127.0395)), &[]),
        ];

        let ranked = rank_all(&catalog, "서울특별시 강남구", "surgery");
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, "gangnam");
    }
}
