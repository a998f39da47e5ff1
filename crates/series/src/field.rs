//! Spatial-point summary statistics.

/// Statistical summary of one grid point.
///
/// `correlation` is the correlation of this dataset's series with the
/// reference dataset at the same point (1.0 for the reference itself).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    pub lon: f64,
    pub lat: f64,
    pub mean: f64,
    pub sd: f64,
    pub correlation: f64,
}

/// Ordered collection of [`FieldSample`]s indexed by grid point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    samples: Vec<FieldSample>,
}

impl FieldSet {
    /// Wraps samples in grid-point order.
    pub fn new(samples: Vec<FieldSample>) -> Self {
        Self { samples }
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if there are no grid points.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at grid point `i`.
    pub fn get(&self, i: usize) -> Option<&FieldSample> {
        self.samples.get(i)
    }

    /// All samples.
    pub fn samples(&self) -> &[FieldSample] {
        &self.samples
    }

    /// Iterates over samples in grid-point order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSample> {
        self.samples.iter()
    }
}

impl FromIterator<FieldSample> for FieldSet {
    fn from_iter<I: IntoIterator<Item = FieldSample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(mean: f64) -> FieldSample {
        FieldSample {
            lon: 14.1,
            lat: 52.2,
            mean,
            sd: 1.0,
            correlation: 0.9,
        }
    }

    #[test]
    fn collect_and_index() {
        let set: FieldSet = [sample(1.0), sample(2.0)].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).unwrap().mean, 2.0);
        assert!(set.get(2).is_none());
    }

    #[test]
    fn default_is_empty() {
        assert!(FieldSet::default().is_empty());
    }
}
