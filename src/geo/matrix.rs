//! Dense pairwise distance table.

use super::{distance, Coordinate};

/// Symmetric `n × n` table of haversine distances, row-major.
///
/// Built once per optimization run so tour evaluation is `O(n)` lookups
/// instead of `O(n)` trigonometric evaluations.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes all pairwise distances of `coords`.
    pub fn from_coordinates<C: AsRef<Coordinate>>(coords: &[C]) -> Self {
        let n = coords.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            let a = *coords[i].as_ref();
            for j in i + 1..n {
                let d = distance(a, *coords[j].as_ref());
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { n, data }
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the matrix covers no locations.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between locations `i` and `j`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Closed-circuit length of a tour given as location indices.
    ///
    /// Same semantics as [`tour_distance`](super::tour_distance): the last
    /// location connects back to the first, and tours shorter than two stops
    /// have length 0.
    pub fn tour_distance(&self, order: &[usize]) -> f64 {
        if order.len() < 2 {
            return 0.0;
        }
        let open: f64 = order.windows(2).map(|w| self.get(w[0], w[1])).sum();
        open + self.get(order[order.len() - 1], order[0])
    }
}
