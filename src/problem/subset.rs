//! Decoded IDC selections.

/// A set of candidate IDCs, stored as one flag per candidate.
///
/// This is the key the search deduplicates on: two decision vectors that
/// decode to the same subset are the same solution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdcSubset {
    mask: Vec<bool>,
}

impl IdcSubset {
    /// Wraps a selection mask (one flag per candidate, in candidate order).
    pub fn from_mask(mask: Vec<bool>) -> Self {
        Self { mask }
    }

    /// Indices of the selected candidates, ascending.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(i, &on)| on.then_some(i))
    }

    /// Number of selected candidates.
    pub fn len(&self) -> usize {
        self.mask.iter().filter(|&&on| on).count()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        !self.mask.iter().any(|&on| on)
    }
}
