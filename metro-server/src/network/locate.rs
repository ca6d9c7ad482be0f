//! Station lookup by geographic position.

use crate::domain::{Coordinates, Station};

/// The station closest to `at`, with its distance in metres.
///
/// Ties go to the lower station id. Returns `None` for an empty slice.
pub fn nearest_station<'a>(stations: &'a [Station], at: &Coordinates) -> Option<(&'a Station, f64)> {
    stations
        .iter()
        .map(|s| (s, s.coordinates.distance_to(at)))
        .min_by(|(a, da), (b, db)| da.total_cmp(db).then(a.id.cmp(&b.id)))
}

/// All stations within `radius_km` of `at`, nearest first.
pub fn stations_within<'a>(
    stations: &'a [Station],
    at: &Coordinates,
    radius_km: f64,
) -> Vec<(&'a Station, f64)> {
    let radius_m = radius_km * 1000.0;
    let mut found: Vec<_> = stations
        .iter()
        .map(|s| (s, s.coordinates.distance_to(at)))
        .filter(|(_, d)| *d <= radius_m)
        .collect();
    found.sort_by(|(a, da), (b, db)| da.total_cmp(db).then(a.id.cmp(&b.id)));
    found
}
