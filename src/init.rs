use crate::error::{KMeansError, Result};
use crate::vector::Vector;
use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;

/// Select `k` seed centroids with k-means++ weighting.
///
/// Returned centroids are copies of the chosen points.
pub fn initialize_centroids<R: Rng + ?Sized>(
    points: &[Vector],
    k: usize,
    rng: &mut R,
) -> Result<Vec<Vector>> {
    let indices = select_initial_indices(points, k, rng)?;
    Ok(indices.iter().map(|&i| points[i].clone()).collect())
}

/// Select `k` distinct point indices with k-means++ weighting.
///
/// The first index is uniform. Every following index is drawn with
/// probability proportional to the squared distance between the point and its
/// nearest already-selected point. When all remaining weight is zero (every
/// point coincides with a selected one) the next index is drawn uniformly from
/// the indices not yet selected, so no index is ever returned twice.
pub fn select_initial_indices<R: Rng + ?Sized>(
    points: &[Vector],
    k: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let n_points = points.len();
    if n_points == 0 {
        return Err(KMeansError::EmptyInput);
    }
    if k == 0 || k > n_points {
        return Err(KMeansError::InvalidK(format!(
            "k ({}) must be between 1 and the number of points ({})",
            k, n_points
        )));
    }

    let mut selected = Vec::with_capacity(k);
    let mut is_selected = vec![false; n_points];

    let first = rng.gen_range(0..n_points);
    selected.push(first);
    is_selected[first] = true;

    // Squared distance from each point to its nearest selected point
    let mut weights = vec![f64::INFINITY; n_points];

    while selected.len() < k {
        let latest = &points[selected[selected.len() - 1]];
        update_nearest_weights(points, latest, &mut weights)?;

        let total: f64 = weights
            .iter()
            .zip(&is_selected)
            .filter(|(_, &taken)| !taken)
            .map(|(&w, _)| w)
            .sum();

        let next = if total > 0.0 && total.is_finite() {
            let threshold = rng.gen::<f64>() * total;
            sample_by_weight(&weights, &is_selected, threshold)
        } else {
            None
        };

        let next = match next {
            Some(idx) => idx,
            None => uniform_unselected(&is_selected, rng)?,
        };

        selected.push(next);
        is_selected[next] = true;
    }

    Ok(selected)
}

/// Fold the distance to `latest` into each point's nearest squared distance
fn update_nearest_weights(points: &[Vector], latest: &Vector, weights: &mut [f64]) -> Result<()> {
    weights
        .par_iter_mut()
        .zip(points.par_iter())
        .try_for_each(|(weight, point)| -> Result<()> {
            let d = point.squared_distance(latest).ok_or_else(|| {
                KMeansError::InvalidDimensions(format!(
                    "Expected {} features, got {}",
                    latest.dim(),
                    point.dim()
                ))
            })?;
            if d < *weight {
                *weight = d;
            }
            Ok(())
        })
}

/// Inverse-CDF scan: first unselected index whose cumulative weight exceeds
/// `threshold`. The chosen index always carries positive weight.
fn sample_by_weight(weights: &[f64], is_selected: &[bool], threshold: f64) -> Option<usize> {
    let mut cumulative = 0.0f64;
    let mut last_positive = None;

    for (idx, (&w, &taken)) in weights.iter().zip(is_selected).enumerate() {
        if taken || w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = Some(idx);
        if cumulative > threshold {
            return Some(idx);
        }
    }

    // Rounding can leave the threshold just above the final cumulative sum
    last_positive
}

fn uniform_unselected<R: Rng + ?Sized>(is_selected: &[bool], rng: &mut R) -> Result<usize> {
    let remaining: Vec<usize> = is_selected
        .iter()
        .enumerate()
        .filter(|(_, &taken)| !taken)
        .map(|(idx, _)| idx)
        .collect();

    remaining.choose(rng).copied().ok_or_else(|| {
        KMeansError::InvalidK("k exceeds the number of available points".to_string())
    })
}
