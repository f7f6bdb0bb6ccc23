use crate::error::{KMeansError, Result};
use crate::vector::Vector;
use rayon::prelude::*;

/// Point indices grouped by the centroid they were assigned to.
///
/// Group `i` belongs to centroid `i`; groups may be empty. Member indices
/// appear in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    groups: Vec<Vec<usize>>,
}

impl Partition {
    /// Build a partition of `k` groups from one label per point.
    ///
    /// Fails with `InvalidK` if any label is not below `k`.
    pub fn from_labels(labels: &[usize], k: usize) -> Result<Self> {
        let mut groups = vec![Vec::new(); k];
        for (point_idx, &label) in labels.iter().enumerate() {
            let group = groups.get_mut(label).ok_or_else(|| {
                KMeansError::InvalidK(format!(
                    "Label {} of point {} is out of range for {} clusters",
                    label, point_idx, k
                ))
            })?;
            group.push(point_idx);
        }
        Ok(Self { groups })
    }

    /// Number of groups (always equal to the number of centroids)
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Point indices assigned to centroid `i`, `None` if `i` is out of range
    pub fn group(&self, i: usize) -> Option<&[usize]> {
        self.groups.get(i).map(Vec::as_slice)
    }

    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }
}

fn mismatch(expected: usize, got: usize) -> KMeansError {
    KMeansError::InvalidDimensions(format!("Expected {} features, got {}", expected, got))
}

/// Index of the centroid closest to `point`.
///
/// Ties go to the earliest centroid.
pub fn nearest_centroid(point: &Vector, centroids: &[Vector]) -> Result<usize> {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;

    for (idx, centroid) in centroids.iter().enumerate() {
        let dist = point
            .squared_distance(centroid)
            .ok_or_else(|| mismatch(centroid.dim(), point.dim()))?;

        if dist < best_dist {
            best_dist = dist;
            best_idx = idx;
        }
    }

    Ok(best_idx)
}

/// Assign every point to its nearest centroid.
///
/// Points are processed in parallel against a shared read-only centroid
/// snapshot; labels are collected in input order so the result does not
/// depend on scheduling.
pub fn assign_labels(points: &[Vector], centroids: &[Vector]) -> Result<Vec<usize>> {
    points
        .par_iter()
        .map(|point| nearest_centroid(point, centroids))
        .collect()
}

/// Group points by nearest centroid
pub fn partition_points(points: &[Vector], centroids: &[Vector]) -> Result<Partition> {
    let labels = assign_labels(points, centroids)?;
    Partition::from_labels(&labels, centroids.len())
}

/// Compute the mean centroid shift (average L2 movement over all centroids)
pub fn mean_centroid_shift(old_centroids: &[Vector], new_centroids: &[Vector]) -> Result<f64> {
    let k = old_centroids.len();
    if k != new_centroids.len() {
        return Err(KMeansError::InvalidK(format!(
            "Centroid count changed from {} to {}",
            k,
            new_centroids.len()
        )));
    }
    if k == 0 {
        return Ok(0.0);
    }

    let shifts: Vec<f64> = old_centroids
        .par_iter()
        .zip(new_centroids.par_iter())
        .map(|(old_c, new_c)| {
            old_c
                .distance(new_c)
                .ok_or_else(|| mismatch(old_c.dim(), new_c.dim()))
        })
        .collect::<Result<_>>()?;

    Ok(shifts.iter().sum::<f64>() / k as f64)
}
