//! Country × IDC latency table.

use super::subset::IdcSubset;

/// Dense two-level lookup `country → IDC → ping (ms)`.
///
/// A missing entry means the IDC is unreachable from that country; it is
/// never read as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PingTable {
    n_countries: usize,
    n_idcs: usize,
    pings: Vec<Option<f64>>,
}

impl PingTable {
    /// Creates a table with every entry missing.
    pub fn new(n_countries: usize, n_idcs: usize) -> Self {
        Self {
            n_countries,
            n_idcs,
            pings: vec![None; n_countries * n_idcs],
        }
    }

    /// Number of country rows.
    pub fn n_countries(&self) -> usize {
        self.n_countries
    }

    /// Number of IDC columns.
    pub fn n_idcs(&self) -> usize {
        self.n_idcs
    }

    /// Records the ping from `country` to `idc`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn set(&mut self, country: usize, idc: usize, ping: f64) {
        let slot = self.slot(country, idc);
        self.pings[slot] = Some(ping);
    }

    /// Lowest ping from `country` to any IDC of `subset` that has a
    /// measurement. `None` when no IDC of the subset is reachable.
    pub fn min_ping(&self, country: usize, subset: &IdcSubset) -> Option<f64> {
        let row = &self.pings[country * self.n_idcs..(country + 1) * self.n_idcs];
        subset
            .indices()
            .filter_map(|idc| row[idc])
            .min_by(|a, b| a.total_cmp(b))
    }

    fn slot(&self, country: usize, idc: usize) -> usize {
        assert!(
            country < self.n_countries && idc < self.n_idcs,
            "ping index ({country}, {idc}) out of range"
        );
        country * self.n_idcs + idc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subset(mask: &[bool]) -> IdcSubset {
        IdcSubset::from_mask(mask.to_vec())
    }

    #[test]
    fn test_missing_is_unreachable() {
        let mut table = PingTable::new(2, 3);
        table.set(0, 1, 0.0);
        assert_eq!(table.min_ping(0, &subset(&[false, true, false])), Some(0.0));
        assert_eq!(table.min_ping(0, &subset(&[true, false, false])), None);
        assert_eq!(table.min_ping(1, &subset(&[false, true, false])), None);
    }

    #[test]
    fn test_min_ping_over_subset() {
        let mut table = PingTable::new(1, 3);
        table.set(0, 0, 40.0);
        table.set(0, 1, 15.0);
        table.set(0, 2, 30.0);

        assert_eq!(table.min_ping(0, &subset(&[true, true, true])), Some(15.0));
        assert_eq!(table.min_ping(0, &subset(&[true, false, true])), Some(30.0));
        assert_eq!(table.min_ping(0, &subset(&[false, false, false])), None);
    }

    #[test]
    fn test_min_ping_skips_unmeasured() {
        let mut table = PingTable::new(1, 2);
        table.set(0, 1, 80.0);
        assert_eq!(table.min_ping(0, &subset(&[true, false])), None);
        assert_eq!(table.min_ping(0, &subset(&[true, true])), Some(80.0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_panics() {
        let mut table = PingTable::new(1, 1);
        table.set(0, 1, 5.0);
    }
}
