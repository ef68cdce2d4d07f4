use serde::Deserialize;

use super::error::TableError;

/// Default PRN numbering plan.
///
/// Several ranges overlap (the SBAS block in particular). The first entry
/// containing an identifier wins, so the order of this table is part of its
/// meaning: 127 resolves to EGNOS and never to GAGAN, 133 resolves to WAAS.
const DEFAULT_PLAN: &[(&str, u32, u32)] = &[
    ("GPS", 1, 32),
    ("GLONASS", 33, 65),
    ("Galileo", 301, 336),
    ("BeiDou", 201, 236),
    ("QZSS", 193, 197),
    ("IRNSS", 401, 407),
    ("WAAS", 133, 138),
    ("EGNOS", 120, 138),
    ("GAGAN", 127, 128),
    ("MSAS", 129, 137),
];

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConstellationRange {
    pub name: String,
    pub first: u32,
    pub last: u32,
}

impl ConstellationRange {
    pub fn contains(&self, id: u32) -> bool {
        (self.first..=self.last).contains(&id)
    }
}

/// Ordered list of inclusive identifier ranges, first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<ConstellationRange>")]
pub struct ConstellationTable {
    ranges: Vec<ConstellationRange>,
}

impl ConstellationTable {
    pub fn new(ranges: Vec<ConstellationRange>) -> Result<Self, TableError> {
        if let Some(bad) = ranges.iter().find(|r| r.first > r.last) {
            return Err(TableError::InvertedRange {
                name: bad.name.clone(),
                first: bad.first,
                last: bad.last,
            });
        }
        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[ConstellationRange] {
        &self.ranges
    }

    /// Name of the first range containing `id`.
    pub fn lookup(&self, id: u32) -> Option<&str> {
        self.ranges
            .iter()
            .find(|r| r.contains(id))
            .map(|r| r.name.as_str())
    }

    /// Tag such as `GPS_12`, or `Unknown_<id>` when no range matches.
    pub fn classify(&self, id: u32) -> String {
        tag(self.lookup(id), id)
    }
}

impl Default for ConstellationTable {
    fn default() -> Self {
        Self {
            ranges: DEFAULT_PLAN
                .iter()
                .map(|&(name, first, last)| ConstellationRange {
                    name: name.to_string(),
                    first,
                    last,
                })
                .collect(),
        }
    }
}

impl TryFrom<Vec<ConstellationRange>> for ConstellationTable {
    type Error = TableError;

    fn try_from(ranges: Vec<ConstellationRange>) -> Result<Self, Self::Error> {
        Self::new(ranges)
    }
}

/// Classify against the built-in plan.
pub fn classify(id: u32) -> String {
    let name = DEFAULT_PLAN
        .iter()
        .find(|(_, first, last)| (*first..=*last).contains(&id))
        .map(|(name, _, _)| *name);
    tag(name, id)
}

fn tag(name: Option<&str>, id: u32) -> String {
    format!("{}_{}", name.unwrap_or(UNKNOWN), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(name: &str, first: u32, last: u32) -> ConstellationRange {
        ConstellationRange {
            name: name.to_string(),
            first,
            last,
        }
    }

    #[test]
    fn default_plan_boundaries() {
        let cases = [
            (1, "GPS_1"),
            (32, "GPS_32"),
            (33, "GLONASS_33"),
            (65, "GLONASS_65"),
            (120, "EGNOS_120"),
            (132, "EGNOS_132"),
            (133, "WAAS_133"),
            (138, "WAAS_138"),
            (193, "QZSS_193"),
            (197, "QZSS_197"),
            (201, "BeiDou_201"),
            (236, "BeiDou_236"),
            (301, "Galileo_301"),
            (336, "Galileo_336"),
            (401, "IRNSS_401"),
            (407, "IRNSS_407"),
        ];
        let table = ConstellationTable::default();
        for (id, expected) in cases {
            assert_eq!(classify(id), expected, "static plan, id {}", id);
            assert_eq!(table.classify(id), expected, "table, id {}", id);
        }
    }

    #[test]
    fn gaps_are_unknown() {
        for id in [0, 66, 119, 139, 192, 198, 200, 237, 300, 337, 400, 408, 9999] {
            assert_eq!(classify(id), format!("Unknown_{}", id));
        }
    }

    #[test]
    fn shadowed_sbas_ranges_resolve_to_earlier_entry() {
        // GAGAN and MSAS lie entirely under WAAS/EGNOS in the default plan.
        assert_eq!(classify(127), "EGNOS_127");
        assert_eq!(classify(128), "EGNOS_128");
        assert_eq!(classify(129), "EGNOS_129");
        assert_eq!(classify(137), "WAAS_137");
    }

    #[test]
    fn first_declared_range_wins() {
        let table =
            ConstellationTable::new(vec![range("Alpha", 10, 20), range("Beta", 15, 30)]).unwrap();
        assert_eq!(table.classify(15), "Alpha_15");
        assert_eq!(table.classify(20), "Alpha_20");
        assert_eq!(table.classify(21), "Beta_21");

        let swapped =
            ConstellationTable::new(vec![range("Beta", 15, 30), range("Alpha", 10, 20)]).unwrap();
        assert_eq!(swapped.classify(15), "Beta_15");
        assert_eq!(swapped.classify(14), "Alpha_14");
    }

    #[test]
    fn inverted_range_rejected() {
        let err = ConstellationTable::new(vec![range("GPS", 32, 1)]).unwrap_err();
        assert_eq!(
            err,
            TableError::InvertedRange {
                name: "GPS".into(),
                first: 32,
                last: 1
            }
        );
    }

    #[test]
    fn empty_table_classifies_everything_unknown() {
        let table = ConstellationTable::new(Vec::new()).unwrap();
        assert_eq!(table.lookup(5), None);
        assert_eq!(table.classify(5), "Unknown_5");
    }
}
