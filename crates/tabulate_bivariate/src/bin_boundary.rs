//! Primary grid storage and bin-boundary location.
//!
//! A [`PrimaryGrid`] is a sorted vector of (primary value, distribution)
//! entries with unique keys. [`PrimaryGrid::locate`] brackets a primary
//! query value by binary search and returns the pair of entry indices.

use tabulate_core::types::DistributionError;

/// A primary grid point and the secondary distribution tabulated there.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryGridEntry<D> {
    /// Primary independent value
    pub primary_value: f64,
    /// Secondary distribution at `primary_value`
    pub distribution: D,
}

impl<D> PrimaryGridEntry<D> {
    /// Create an entry.
    pub fn new(primary_value: f64, distribution: D) -> Self {
        Self {
            primary_value,
            distribution,
        }
    }
}

/// Indices of the entries bracketing a primary query value.
///
/// `lower == upper` signals that a single distribution is used verbatim:
/// either the query matched a grid point exactly, or it fell outside the
/// grid with limits extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinBoundaries {
    /// Index of the lower bin boundary
    pub lower: usize,
    /// Index of the upper bin boundary
    pub upper: usize,
}

impl BinBoundaries {
    /// Returns true when both boundaries are the same entry.
    #[inline]
    pub fn is_single(&self) -> bool {
        self.lower == self.upper
    }
}

/// Primary-value ordered collection of secondary distributions.
///
/// # Invariants
///
/// - At least 2 entries
/// - Primary values finite, strictly ascending and unique
///
/// # Example
///
/// ```
/// use tabulate_bivariate::bin_boundary::{BinBoundaries, PrimaryGrid};
///
/// let grid = PrimaryGrid::new(vec![1.0, 2.0, 4.0], vec!["a", "b", "c"]).unwrap();
/// assert_eq!(grid.locate(3.0).unwrap(), BinBoundaries { lower: 1, upper: 2 });
/// assert_eq!(grid.locate(2.0).unwrap(), BinBoundaries { lower: 1, upper: 1 });
/// assert!(grid.locate(5.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryGrid<D> {
    entries: Vec<PrimaryGridEntry<D>>,
    limits_extended: bool,
}

impl<D> PrimaryGrid<D> {
    /// Build a grid from parallel vectors of primary values and distributions.
    ///
    /// The primary values must already be strictly ascending.
    pub fn new(primary_values: Vec<f64>, distributions: Vec<D>) -> Result<Self, DistributionError> {
        if primary_values.len() != distributions.len() {
            return Err(DistributionError::invalid_argument(format!(
                "primary values and distributions must have same length: got {} and {}",
                primary_values.len(),
                distributions.len()
            )));
        }

        let entries = primary_values
            .into_iter()
            .zip(distributions)
            .map(|(x, d)| PrimaryGridEntry::new(x, d))
            .collect();

        Self::from_sorted_entries(entries)
    }

    /// Build a grid from entries in any order.
    ///
    /// Entries are sorted by primary value; duplicate primary values are
    /// rejected.
    pub fn from_entries(mut entries: Vec<PrimaryGridEntry<D>>) -> Result<Self, DistributionError> {
        if entries.iter().any(|e| e.primary_value.is_nan()) {
            return Err(DistributionError::invalid_argument(
                "primary values must not be NaN",
            ));
        }
        entries.sort_by(|a, b| a.primary_value.total_cmp(&b.primary_value));
        Self::from_sorted_entries(entries)
    }

    fn from_sorted_entries(entries: Vec<PrimaryGridEntry<D>>) -> Result<Self, DistributionError> {
        if entries.len() < 2 {
            return Err(DistributionError::InsufficientData {
                got: entries.len(),
                need: 2,
            });
        }

        if let Some(e) = entries.iter().find(|e| !e.primary_value.is_finite()) {
            return Err(DistributionError::invalid_argument(format!(
                "primary values must be finite: found {}",
                e.primary_value
            )));
        }

        if let Some(w) = entries
            .windows(2)
            .find(|w| w[0].primary_value >= w[1].primary_value)
        {
            return Err(DistributionError::invalid_argument(format!(
                "primary values must be strictly ascending and unique: {} followed by {}",
                w[0].primary_value, w[1].primary_value
            )));
        }

        Ok(Self {
            entries,
            limits_extended: false,
        })
    }

    /// Reuse the boundary distributions for queries outside the grid.
    pub fn extend_beyond_limits(&mut self) {
        self.limits_extended = true;
    }

    /// Fail queries outside the grid (the default).
    pub fn limit_to_grid(&mut self) {
        self.limits_extended = false;
    }

    /// Returns true when out-of-range queries use the boundary distributions.
    #[inline]
    pub fn limits_extended(&self) -> bool {
        self.limits_extended
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in ascending primary order.
    #[inline]
    pub fn entries(&self) -> &[PrimaryGridEntry<D>] {
        &self.entries
    }

    /// Entry at `index`.
    #[inline]
    pub fn entry(&self, index: usize) -> Option<&PrimaryGridEntry<D>> {
        self.entries.get(index)
    }

    /// Iterator over the primary values.
    pub fn primary_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.primary_value)
    }

    /// Smallest primary value.
    #[inline]
    pub fn lower_limit(&self) -> f64 {
        self.entries[0].primary_value
    }

    /// Largest primary value.
    #[inline]
    pub fn upper_limit(&self) -> f64 {
        self.entries[self.entries.len() - 1].primary_value
    }

    /// Find the entries bracketing `primary_value`.
    ///
    /// # Returns
    ///
    /// * `Ok(BinBoundaries)` with `lower == upper` on an exact grid match or
    ///   an out-of-range query with limits extended
    /// * `Ok(BinBoundaries)` with `upper == lower + 1` for interior values
    /// * `Err(DistributionError::OutOfRange)` outside the grid with limits
    ///   not extended
    /// * `Err(DistributionError::InvalidArgument)` for a NaN query
    pub fn locate(&self, primary_value: f64) -> Result<BinBoundaries, DistributionError> {
        if primary_value.is_nan() {
            return Err(DistributionError::invalid_argument(
                "primary value must not be NaN",
            ));
        }

        let n = self.entries.len();
        let pos = self
            .entries
            .partition_point(|e| e.primary_value <= primary_value);

        if pos == 0 {
            return self.beyond_limit(primary_value, 0);
        }

        let lower = pos - 1;
        if self.entries[lower].primary_value == primary_value {
            return Ok(BinBoundaries { lower, upper: lower });
        }

        if pos == n {
            return self.beyond_limit(primary_value, n - 1);
        }

        Ok(BinBoundaries { lower, upper: pos })
    }

    fn beyond_limit(&self, primary_value: f64, boundary: usize) -> Result<BinBoundaries, DistributionError> {
        if self.limits_extended {
            Ok(BinBoundaries {
                lower: boundary,
                upper: boundary,
            })
        } else {
            Err(DistributionError::out_of_range(
                primary_value,
                self.lower_limit(),
                self.upper_limit(),
            ))
        }
    }
}
