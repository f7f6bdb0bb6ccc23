//! Post-hoc cluster validity indices.
//!
//! Both indices operate purely on assembled [`Cluster`]s and never reassign
//! points. Undefined results (zero denominators, mismatched dimensions,
//! missing clusters) are reported as `NaN`, never as a misleading finite
//! number.

use crate::cluster::Cluster;
use crate::vector::Vector;
use rayon::prelude::*;

/// A score over an already-assembled set of clusters
pub trait QualityIndex {
    /// Human-readable index name
    fn name(&self) -> &'static str;

    /// Score the clusters. The result depends only on `clusters`.
    fn score(&self, clusters: &[Cluster]) -> f64;
}

/// Dunn index: smallest centroid separation over the largest member distance
/// to its own centroid. Higher is better.
///
/// With at most one cluster the separation is 0. If the largest member
/// distance is also 0 the score is `NaN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DunnIndex;

/// Davies–Bouldin index: mean over clusters of the worst
/// `(scatter(X) + scatter(Y)) / d(c_X, c_Y)` ratio. Lower is better.
///
/// A lone cluster contributes 0. Coincident centroids or empty clusters make
/// the score `NaN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DaviesBouldinIndex;

impl QualityIndex for DunnIndex {
    fn name(&self) -> &'static str {
        "Dunn Index"
    }

    fn score(&self, clusters: &[Cluster]) -> f64 {
        let separation = min_centroid_separation(clusters);
        let diameter = max_member_distance(clusters);

        if separation.is_nan() || diameter.is_nan() {
            return f64::NAN;
        }
        if diameter == 0.0 && separation == 0.0 {
            return f64::NAN;
        }

        separation / diameter
    }
}

impl QualityIndex for DaviesBouldinIndex {
    fn name(&self) -> &'static str {
        "Davies-Bouldin Index"
    }

    fn score(&self, clusters: &[Cluster]) -> f64 {
        let n_clusters = clusters.len();
        if n_clusters == 0 {
            return f64::NAN;
        }
        if n_clusters == 1 {
            return if clusters[0].is_empty() { f64::NAN } else { 0.0 };
        }

        let scatters: Vec<f64> = clusters.par_iter().map(mean_member_distance).collect();

        let worst_ratios: Vec<f64> = (0..n_clusters)
            .into_par_iter()
            .map(|x| {
                let mut worst = 0.0f64;
                for y in (0..n_clusters).filter(|&y| y != x) {
                    let separation = centroid_distance(&clusters[x], &clusters[y]);
                    if separation.is_nan() || separation == 0.0 {
                        return f64::NAN;
                    }
                    let ratio = (scatters[x] + scatters[y]) / separation;
                    if ratio.is_nan() {
                        return f64::NAN;
                    }
                    if ratio > worst {
                        worst = ratio;
                    }
                }
                worst
            })
            .collect();

        worst_ratios.iter().sum::<f64>() / n_clusters as f64
    }
}

#[inline]
fn distance_or_nan(a: &Vector, b: &Vector) -> f64 {
    a.distance(b).unwrap_or(f64::NAN)
}

fn centroid_distance(x: &Cluster, y: &Cluster) -> f64 {
    distance_or_nan(&x.centroid, &y.centroid)
}

fn min_centroid_separation(clusters: &[Cluster]) -> f64 {
    if clusters.len() <= 1 {
        return 0.0;
    }

    let per_cluster: Vec<f64> = (0..clusters.len())
        .into_par_iter()
        .map(|i| {
            let mut min = f64::INFINITY;
            for j in (i + 1)..clusters.len() {
                let d = centroid_distance(&clusters[i], &clusters[j]);
                if d.is_nan() {
                    return f64::NAN;
                }
                min = min.min(d);
            }
            min
        })
        .collect();

    fold_propagating_nan(&per_cluster, f64::INFINITY, f64::min)
}

fn max_member_distance(clusters: &[Cluster]) -> f64 {
    let per_cluster: Vec<f64> = clusters
        .par_iter()
        .map(|cluster| {
            let mut max = 0.0f64;
            for member in &cluster.members {
                let d = distance_or_nan(member, &cluster.centroid);
                if d.is_nan() {
                    return f64::NAN;
                }
                max = max.max(d);
            }
            max
        })
        .collect();

    fold_propagating_nan(&per_cluster, 0.0, f64::max)
}

/// Average distance from members to the centroid; `NaN` for an empty cluster
fn mean_member_distance(cluster: &Cluster) -> f64 {
    if cluster.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = cluster
        .members
        .iter()
        .map(|member| distance_or_nan(member, &cluster.centroid))
        .sum();

    sum / cluster.len() as f64
}

fn fold_propagating_nan(values: &[f64], init: f64, f: fn(f64, f64) -> f64) -> f64 {
    let mut acc = init;
    for &v in values {
        if v.is_nan() {
            return f64::NAN;
        }
        acc = f(acc, v);
    }
    acc
}
