//! Compressed sparse row adjacency.
//!
//! One contiguous `offsets` buffer (length N+1) and one contiguous `targets`
//! buffer, with an optional `weights` buffer aligned to `targets`. Row `v`
//! lives at `targets[offsets[v]..offsets[v + 1]]`.
//!
//! Rows are filled with a stable counting sort, so neighbors appear in the
//! order their edges were supplied.

use std::ops::Range;

/// CSR adjacency over dense vertex indices `0..N`.
#[derive(Debug, Clone, PartialEq)]
pub struct Csr {
    offsets: Vec<usize>,
    targets: Vec<usize>,
    weights: Option<Vec<f64>>,
}

impl Csr {
    /// Build from `(row, target)` pairs over `num_vertices` rows.
    ///
    /// `weights`, when present, must be aligned with `entries`.
    ///
    /// # Panics
    ///
    /// Panics if a row or target index is `>= num_vertices` or if `weights`
    /// has a different length than `entries`. Callers pass renumbered
    /// indices, so either case is a bug.
    #[must_use]
    pub fn from_entries(
        num_vertices: usize,
        entries: &[(usize, usize)],
        weights: Option<&[f64]>,
    ) -> Self {
        if let Some(w) = weights {
            assert_eq!(w.len(), entries.len(), "weights must align with entries");
        }

        // Count per-row degree, shifted by one so the prefix sum lands in place.
        let mut offsets = vec![0usize; num_vertices + 1];
        for &(row, target) in entries {
            assert!(target < num_vertices, "target {target} out of range");
            offsets[row + 1] += 1;
        }
        for v in 0..num_vertices {
            offsets[v + 1] += offsets[v];
        }

        // Scatter into place; `cursor` tracks the next free slot per row.
        let mut cursor = offsets[..num_vertices].to_vec();
        let mut targets = vec![0usize; entries.len()];
        let mut scattered = weights.map(|_| vec![0.0_f64; entries.len()]);

        for (i, &(row, target)) in entries.iter().enumerate() {
            let slot = cursor[row];
            cursor[row] += 1;
            targets[slot] = target;
            if let (Some(out), Some(w)) = (scattered.as_mut(), weights) {
                out[slot] = w[i];
            }
        }

        Self {
            offsets,
            targets,
            weights: scattered,
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Total number of stored entries (`offsets[N]`).
    #[must_use]
    pub fn num_entries(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    #[must_use]
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    #[must_use]
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    /// Entry range for row `v`.
    #[must_use]
    pub fn row(&self, v: usize) -> Range<usize> {
        self.offsets[v]..self.offsets[v + 1]
    }

    /// Number of entries in row `v`.
    #[must_use]
    pub fn degree(&self, v: usize) -> usize {
        self.offsets[v + 1] - self.offsets[v]
    }

    /// Targets of row `v`.
    #[must_use]
    pub fn row_targets(&self, v: usize) -> &[usize] {
        &self.targets[self.row(v)]
    }

    /// Weights of row `v`, if the adjacency is weighted.
    #[must_use]
    pub fn row_weights(&self, v: usize) -> Option<&[f64]> {
        let range = self.row(v);
        self.weights.as_deref().map(|w| &w[range])
    }

    /// `(target, weight)` pairs of row `v`; weight is 1.0 when unweighted.
    pub fn row_entries(&self, v: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.row(v).map(move |e| (self.targets[e], self.weight_at(e)))
    }

    fn weight_at(&self, entry: usize) -> f64 {
        self.weights.as_ref().map_or(1.0, |w| w[entry])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_and_lookup() {
        // 0->1, 0->2, 1->3, 2->3
        let entries = [(0, 1), (0, 2), (1, 3), (2, 3)];
        let csr = Csr::from_entries(4, &entries, None);

        assert_eq!(csr.offsets(), &[0, 2, 3, 4, 4]);
        assert_eq!(csr.row_targets(0), &[1, 2]);
        assert_eq!(csr.row_targets(3), &[] as &[usize]);
        assert_eq!(csr.degree(0), 2);
        assert_eq!(csr.num_entries(), 4);
        assert_eq!(csr.num_rows(), 4);
        assert!(csr.weights().is_none());
    }

    #[test]
    fn scatter_is_stable_for_unsorted_input() {
        let entries = [(2, 0), (0, 1), (2, 1), (0, 2), (2, 2)];
        let weights = [5.0, 1.0, 6.0, 2.0, 7.0];
        let csr = Csr::from_entries(3, &entries, Some(&weights));

        assert_eq!(csr.row_targets(0), &[1, 2]);
        assert_eq!(csr.row_weights(0), Some(&[1.0, 2.0][..]));
        assert_eq!(csr.row_targets(2), &[0, 1, 2]);
        assert_eq!(csr.row_weights(2), Some(&[5.0, 6.0, 7.0][..]));
        assert_eq!(
            csr.row_entries(2).collect::<Vec<_>>(),
            vec![(0, 5.0), (1, 6.0), (2, 7.0)]
        );
    }

    #[test]
    fn unweighted_entries_report_unit_weight() {
        let csr = Csr::from_entries(2, &[(0, 1), (0, 1)], None);
        assert_eq!(csr.row_entries(0).collect::<Vec<_>>(), vec![(1, 1.0), (1, 1.0)]);
    }

    #[test]
    fn empty_rows_share_offsets() {
        let csr = Csr::from_entries(5, &[(4, 0)], None);
        assert_eq!(csr.offsets(), &[0, 0, 0, 0, 0, 1]);
    }
}
