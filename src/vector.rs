use ndarray::{Array1, ArrayView1, ArrayView2, Zip};
use std::fmt;

/// A fixed-dimension point in Euclidean space.
///
/// Vectors are immutable once built; every operation that "changes" a vector
/// produces a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector(Array1<f64>);

impl Vector {
    /// Create a vector from its coordinates
    pub fn new(values: Vec<f64>) -> Self {
        Self(Array1::from_vec(values))
    }

    /// Number of coordinates
    #[inline]
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// Borrow the coordinates as an ndarray view
    #[inline]
    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.0.view()
    }

    /// Copy the coordinates into a `Vec`
    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }

    /// Euclidean distance to `other`.
    ///
    /// Returns `None` when the two vectors have different dimensions; the
    /// distance is undefined in that case and must not be compared.
    #[inline]
    pub fn distance(&self, other: &Vector) -> Option<f64> {
        self.squared_distance(other).map(f64::sqrt)
    }

    /// Squared Euclidean distance to `other`, `None` on dimension mismatch.
    #[inline]
    pub fn squared_distance(&self, other: &Vector) -> Option<f64> {
        if self.dim() != other.dim() {
            return None;
        }

        let sum = Zip::from(&self.0)
            .and(&other.0)
            .fold(0.0f64, |acc, &a, &b| {
                let d = a - b;
                acc + d * d
            });

        Some(sum)
    }

    /// Coordinate-wise median of a collection of equal-dimension vectors.
    ///
    /// The j-th coordinate of the result is the median of the j-th coordinates
    /// of all members. Returns `None` if `members` is empty or ragged.
    pub fn componentwise_median<'a, I>(members: I) -> Option<Vector>
    where
        I: IntoIterator<Item = &'a Vector>,
    {
        let members: Vec<&Vector> = members.into_iter().collect();
        let dim = members.first()?.dim();
        if members.iter().any(|m| m.dim() != dim) {
            return None;
        }

        let mut column = vec![0.0f64; members.len()];
        let mut centroid = Array1::zeros(dim);

        for j in 0..dim {
            for (slot, member) in column.iter_mut().zip(&members) {
                *slot = member.0[j];
            }
            centroid[j] = median(&column)?;
        }

        Some(Vector(centroid))
    }
}

impl From<Vec<f64>> for Vector {
    fn from(values: Vec<f64>) -> Self {
        Vector::new(values)
    }
}

impl From<Array1<f64>> for Vector {
    fn from(values: Array1<f64>) -> Self {
        Vector(values)
    }
}

impl From<ArrayView1<'_, f64>> for Vector {
    fn from(values: ArrayView1<'_, f64>) -> Self {
        Vector(values.to_owned())
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

/// Median of a sequence of numbers.
///
/// Sorts a copy of `values`; odd lengths yield the middle element, even
/// lengths the mean of the two central elements. Returns `None` when empty.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Build one vector per row of a 2D array of shape (n_samples, n_features)
pub fn points_from_array(data: &ArrayView2<f64>) -> Vec<Vector> {
    data.outer_iter().map(Vector::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_distance() {
        let x = Vector::new(vec![1.0, 2.0, 3.0, 4.0]);
        let y = Vector::new(vec![4.0, 3.0, 2.0, 1.0]);

        assert_relative_eq!(x.distance(&y).unwrap(), 20.0f64.sqrt(), epsilon = 1e-12);
        assert_eq!(x.distance(&y), y.distance(&x));
        assert_eq!(x.distance(&x), Some(0.0));
    }

    #[test]
    fn test_distance_dimension_mismatch() {
        let x = Vector::new(vec![1.0, 2.0, 3.0, 3.0]);
        let y = Vector::new(vec![1.0, 2.0, 3.0]);

        assert!(x.distance(&y).is_none());
        assert!(x.squared_distance(&y).is_none());
    }

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&[3.0, 2.0, 6.0, 5.2, 5.1]), Some(5.1));
    }

    #[test]
    fn test_median_even() {
        assert_eq!(median(&[3.0, 2.0, 6.0, 5.0]), Some(4.0));
    }

    #[test]
    fn test_median_does_not_mutate() {
        let values = [3.0, 2.0, 6.0];
        let _ = median(&values);
        assert_eq!(values, [3.0, 2.0, 6.0]);
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_componentwise_median() {
        let members = vec![
            Vector::new(vec![1.0, 10.0]),
            Vector::new(vec![2.0, 30.0]),
            Vector::new(vec![100.0, 20.0]),
        ];

        let centroid = Vector::componentwise_median(&members).unwrap();
        assert_eq!(centroid, Vector::new(vec![2.0, 20.0]));
    }

    #[test]
    fn test_componentwise_median_degenerate() {
        let empty: Vec<Vector> = Vec::new();
        assert!(Vector::componentwise_median(&empty).is_none());

        let ragged = vec![Vector::new(vec![1.0, 2.0]), Vector::new(vec![1.0])];
        assert!(Vector::componentwise_median(&ragged).is_none());
    }

    #[test]
    fn test_points_from_array() {
        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let points = points_from_array(&data.view());

        assert_eq!(points.len(), 3);
        assert_eq!(points[1].to_vec(), vec![3.0, 4.0]);
    }
}
