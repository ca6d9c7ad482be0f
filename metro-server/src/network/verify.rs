//! Consistency checks over a network document.
//!
//! Reports per-line station counts and interchange stations, and flags data
//! problems that would make the route graph wrong or impossible to build.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::domain::{LineId, StationId};

use super::store::NetworkData;

/// A data problem found in a network document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NetworkIssue {
    #[error("line {line} has no stations")]
    EmptyLine { line: LineId },

    #[error("line id {line} is used more than once")]
    DuplicateLineId { line: LineId },

    #[error("line name {name:?} is used more than once")]
    DuplicateLineName { name: String },

    #[error("station id {station} is used more than once")]
    DuplicateStationId { station: StationId },

    #[error("line {line} has more than one stop with order {order}")]
    DuplicateOrder { line: LineId, order: u32 },

    #[error("station {station} appears more than once on line {line}")]
    RepeatedStop { line: LineId, station: StationId },

    #[error("line {line} references unknown station {station}")]
    UnknownStation { line: LineId, station: StationId },

    #[error("station {station} is not served by any line")]
    UnservedStation { station: StationId },
}

/// Station count for one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineSummary {
    pub id: LineId,
    pub name: String,
    pub station_count: usize,
}

/// A station served by two or more lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterchangeSummary {
    pub station: StationId,
    pub name: String,
    pub lines: Vec<LineId>,
}

/// Outcome of [`verify`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub lines: Vec<LineSummary>,
    pub interchanges: Vec<InterchangeSummary>,
    pub issues: Vec<NetworkIssue>,
}

impl VerificationReport {
    /// True when no issues were found.
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check a network document for consistency.
pub fn verify(data: &NetworkData) -> VerificationReport {
    let mut issues = Vec::new();

    let mut station_names: HashMap<StationId, &str> = HashMap::new();
    for station in &data.stations {
        if station_names
            .insert(station.id, station.name.as_str())
            .is_some()
        {
            issues.push(NetworkIssue::DuplicateStationId {
                station: station.id,
            });
        }
    }

    let mut seen_line_ids = HashSet::new();
    let mut seen_line_names = HashSet::new();
    let mut served: BTreeMap<StationId, BTreeSet<LineId>> = BTreeMap::new();
    let mut lines = Vec::with_capacity(data.lines.len());

    for record in &data.lines {
        let line = record.line.id;

        if !seen_line_ids.insert(line) {
            issues.push(NetworkIssue::DuplicateLineId { line });
        }
        if !seen_line_names.insert(record.line.name.as_str()) {
            issues.push(NetworkIssue::DuplicateLineName {
                name: record.line.name.clone(),
            });
        }
        if record.stops.is_empty() {
            issues.push(NetworkIssue::EmptyLine { line });
        }

        let mut orders = HashSet::new();
        let mut stations_on_line = HashSet::new();
        for stop in &record.stops {
            if !orders.insert(stop.order) {
                issues.push(NetworkIssue::DuplicateOrder {
                    line,
                    order: stop.order,
                });
            }
            if !stations_on_line.insert(stop.station) {
                issues.push(NetworkIssue::RepeatedStop {
                    line,
                    station: stop.station,
                });
            }
            if !station_names.contains_key(&stop.station) {
                issues.push(NetworkIssue::UnknownStation {
                    line,
                    station: stop.station,
                });
            }
            served.entry(stop.station).or_default().insert(line);
        }

        lines.push(LineSummary {
            id: line,
            name: record.line.name.clone(),
            station_count: stations_on_line.len(),
        });
    }

    let mut unserved: Vec<StationId> = station_names
        .keys()
        .filter(|id| !served.contains_key(id))
        .copied()
        .collect();
    unserved.sort();
    issues.extend(
        unserved
            .into_iter()
            .map(|station| NetworkIssue::UnservedStation { station }),
    );

    let interchanges = served
        .iter()
        .filter(|(_, lines)| lines.len() > 1)
        .filter_map(|(station, lines)| {
            station_names.get(station).map(|name| InterchangeSummary {
                station: *station,
                name: (*name).to_string(),
                lines: lines.iter().copied().collect(),
            })
        })
        .collect();

    VerificationReport {
        lines,
        interchanges,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, Line, LineStop, Station};
    use crate::network::LineRecord;

    fn sid(n: i64) -> StationId {
        StationId::new(n).unwrap()
    }

    fn lid(n: i64) -> LineId {
        LineId::new(n).unwrap()
    }

    fn station(n: i64, name: &str) -> Station {
        Station::new(sid(n), name, Coordinates::new(30.0, 31.0).unwrap())
    }

    fn line(n: i64, name: &str, stops: &[(i64, u32)]) -> LineRecord {
        LineRecord {
            line: Line::new(lid(n), name, None),
            stops: stops
                .iter()
                .map(|&(s, o)| LineStop::new(sid(s), o))
                .collect(),
        }
    }

    fn clean_network() -> NetworkData {
        NetworkData {
            stations: vec![
                station(1, "Helwan"),
                station(2, "Sadat"),
                station(3, "Nasser"),
                station(4, "Dokki"),
            ],
            lines: vec![
                line(1, "First Line", &[(1, 1), (2, 2), (3, 3)]),
                line(2, "Second Line", &[(4, 1), (2, 2)]),
            ],
        }
    }

    #[test]
    fn clean_network_has_no_issues() {
        let report = verify(&clean_network());
        assert!(report.is_ok(), "{:?}", report.issues);
        assert_eq!(report.lines.len(), 2);
        assert_eq!(report.lines[0].station_count, 3);
        assert_eq!(report.lines[1].station_count, 2);
    }

    #[test]
    fn finds_interchanges() {
        let report = verify(&clean_network());
        assert_eq!(
            report.interchanges,
            vec![InterchangeSummary {
                station: sid(2),
                name: "Sadat".into(),
                lines: vec![lid(1), lid(2)],
            }]
        );
    }

    #[test]
    fn flags_duplicate_order_and_repeated_stop() {
        let mut data = clean_network();
        data.lines[0] = line(1, "First Line", &[(1, 1), (2, 1), (1, 3)]);

        let report = verify(&data);
        assert!(report.issues.contains(&NetworkIssue::DuplicateOrder {
            line: lid(1),
            order: 1
        }));
        assert!(report.issues.contains(&NetworkIssue::RepeatedStop {
            line: lid(1),
            station: sid(1)
        }));
    }

    #[test]
    fn flags_unknown_and_unserved_stations() {
        let mut data = clean_network();
        data.lines[1] = line(2, "Second Line", &[(9, 1)]);

        let report = verify(&data);
        assert!(report.issues.contains(&NetworkIssue::UnknownStation {
            line: lid(2),
            station: sid(9)
        }));
        assert!(
            report
                .issues
                .contains(&NetworkIssue::UnservedStation { station: sid(4) })
        );
    }

    #[test]
    fn flags_empty_and_duplicate_lines() {
        let mut data = clean_network();
        data.lines.push(line(1, "First Line", &[]));

        let report = verify(&data);
        assert!(
            report
                .issues
                .contains(&NetworkIssue::DuplicateLineId { line: lid(1) })
        );
        assert!(report.issues.contains(&NetworkIssue::DuplicateLineName {
            name: "First Line".into()
        }));
        assert!(
            report
                .issues
                .contains(&NetworkIssue::EmptyLine { line: lid(1) })
        );
    }

    #[test]
    fn flags_duplicate_station_id() {
        let mut data = clean_network();
        data.stations.push(station(3, "Nasser again"));

        let report = verify(&data);
        assert!(
            report
                .issues
                .contains(&NetworkIssue::DuplicateStationId { station: sid(3) })
        );
    }

    #[test]
    fn issue_display() {
        let issue = NetworkIssue::DuplicateOrder {
            line: lid(1),
            order: 4,
        };
        assert_eq!(issue.to_string(), "line 1 has more than one stop with order 4");
    }

    #[test]
    fn issue_serializes_with_kind_tag() {
        let issue = NetworkIssue::EmptyLine { line: lid(3) };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["kind"], "empty_line");
        assert_eq!(json["line"], 3);
    }
}
