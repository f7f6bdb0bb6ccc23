use crate::cluster::Cluster;
use crate::config::KMeansConfig;
use crate::distance::{mean_centroid_shift, partition_points, Partition};
use crate::error::{KMeansError, Result};
use crate::init::initialize_centroids;
use crate::vector::Vector;
use log::Level;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Why the iteration loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Mean centroid displacement fell to or below the tolerance
    Converged,
    /// The iteration cap was reached
    MaxIterations,
    /// The wall-clock budget was exhausted
    TimeLimit,
}

/// Result of a median k-means run.
///
/// `clusters` only holds groups that ended up non-empty, renumbered from 0,
/// so it may contain fewer than `k` entries. `centroids` always holds all `k`
/// final centroids.
#[derive(Debug, Clone)]
pub struct KMeansResult {
    pub clusters: Vec<Cluster>,
    pub centroids: Vec<Vector>,
    pub n_iterations: usize,
    pub mean_deviation: f64,
    pub stop_reason: StopReason,
    /// Seed of the generator built by [`run`]; `None` for [`run_with_rng`]
    pub seed: Option<u64>,
}

/// Cluster `points` into at most `config.k` groups.
///
/// The generator is a `ChaCha8Rng` seeded from `config.seed`, or from the
/// system clock when no seed is configured.
pub fn run(points: &[Vector], config: &KMeansConfig) -> Result<KMeansResult> {
    let seed = config.seed.unwrap_or_else(time_seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut result = run_with_rng(points, config, &mut rng)?;
    result.seed = Some(seed);
    Ok(result)
}

/// Cluster `points` drawing seeding randomness from `rng`.
pub fn run_with_rng<R: Rng + ?Sized>(
    points: &[Vector],
    config: &KMeansConfig,
    rng: &mut R,
) -> Result<KMeansResult> {
    let n_features = validate_input(points, config.k)?;
    let k = config.k;
    let max_iters = config.effective_max_iters();
    let level = if config.verbose {
        Level::Info
    } else {
        Level::Debug
    };

    log::log!(
        level,
        "Training median k-means: {} samples, {} features, {} clusters",
        points.len(),
        n_features,
        k
    );

    let mut centroids = initialize_centroids(points, k, rng)?;

    let start = Instant::now();
    let mut n_iterations = 0;
    let (partition, mean_deviation, stop_reason) = loop {
        let iter_start = Instant::now();
        n_iterations += 1;

        let partition = partition_points(points, &centroids)?;
        let new_centroids = estimate_centroids(points, &centroids, &partition)?;
        let shift = mean_centroid_shift(&centroids, &new_centroids)?;
        centroids = new_centroids;

        log::log!(
            level,
            "  Iteration {}: mean shift = {:e}, time = {:.4}s",
            n_iterations,
            shift,
            iter_start.elapsed().as_secs_f64()
        );

        if shift <= config.tol {
            break (partition, shift, StopReason::Converged);
        }
        if n_iterations >= max_iters {
            break (partition, shift, StopReason::MaxIterations);
        }
        if let Some(budget) = config.max_duration {
            if start.elapsed() >= budget {
                break (partition, shift, StopReason::TimeLimit);
            }
        }
    };

    let clusters = assemble_clusters(points, &centroids, &partition)?;

    log::log!(
        level,
        "Stopped after {} iterations ({:?}), {} of {} clusters non-empty",
        n_iterations,
        stop_reason,
        clusters.len(),
        k
    );

    Ok(KMeansResult {
        clusters,
        centroids,
        n_iterations,
        mean_deviation,
        stop_reason,
        seed: None,
    })
}

/// Check the run parameters and return the shared dimension of the points
fn validate_input(points: &[Vector], k: usize) -> Result<usize> {
    let first = points.first().ok_or(KMeansError::EmptyInput)?;

    if k == 0 {
        return Err(KMeansError::InvalidK(
            "k must be greater than 0".to_string(),
        ));
    }
    if k > points.len() {
        return Err(KMeansError::InvalidK(format!(
            "k ({}) exceeds the number of points ({})",
            k,
            points.len()
        )));
    }

    let n_features = first.dim();
    if let Some((idx, point)) = points
        .iter()
        .enumerate()
        .find(|(_, p)| p.dim() != n_features)
    {
        return Err(KMeansError::InvalidDimensions(format!(
            "Point {} has {} features, expected {}",
            idx,
            point.dim(),
            n_features
        )));
    }

    Ok(n_features)
}

/// Check that `partition` has one group per centroid and only refers to
/// existing points
fn check_partition(points: &[Vector], centroids: &[Vector], partition: &Partition) -> Result<()> {
    if centroids.len() != partition.len() {
        return Err(KMeansError::InvalidK(format!(
            "Partition has {} groups for {} centroids",
            partition.len(),
            centroids.len()
        )));
    }

    let n_points = points.len();
    if let Some(&idx) = partition
        .groups()
        .iter()
        .flatten()
        .find(|&&idx| idx >= n_points)
    {
        return Err(KMeansError::InvalidK(format!(
            "Partition refers to point {} but only {} points were given",
            idx, n_points
        )));
    }

    Ok(())
}

/// Recompute every centroid as the coordinate-wise median of its group.
///
/// A centroid whose group is empty is carried forward unchanged. The
/// partition must have exactly one group per previous centroid.
pub fn estimate_centroids(
    points: &[Vector],
    previous: &[Vector],
    partition: &Partition,
) -> Result<Vec<Vector>> {
    check_partition(points, previous, partition)?;

    previous
        .par_iter()
        .zip(partition.groups().par_iter())
        .map(|(prev, group)| {
            if group.is_empty() {
                return Ok(prev.clone());
            }
            Vector::componentwise_median(group.iter().map(|&i| &points[i])).ok_or_else(|| {
                KMeansError::InvalidDimensions(
                    "Cluster members have differing dimensions".to_string(),
                )
            })
        })
        .collect()
}

/// Package the non-empty groups as clusters with sequential ids
pub fn assemble_clusters(
    points: &[Vector],
    centroids: &[Vector],
    partition: &Partition,
) -> Result<Vec<Cluster>> {
    check_partition(points, centroids, partition)?;

    let clusters = centroids
        .iter()
        .zip(partition.groups())
        .filter(|(_, group)| !group.is_empty())
        .enumerate()
        .map(|(id, (centroid, group))| {
            let members = group.iter().map(|&i| points[i].clone()).collect();
            Cluster::new(id, centroid.clone(), members)
        })
        .collect();

    Ok(clusters)
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(values: &[f64]) -> Vector {
        Vector::new(values.to_vec())
    }

    fn sample_points() -> Vec<Vector> {
        vec![
            v(&[1.0, 1.0]),
            v(&[5.0, 2.0]),
            v(&[1.0, 2.0]),
            v(&[6.0, 1.0]),
            v(&[6.0, 2.0]),
            v(&[1.0, 3.0]),
        ]
    }

    #[test]
    fn test_estimate_centroids_median() {
        let points = vec![v(&[0.0, 0.0]), v(&[1.0, 10.0]), v(&[100.0, 2.0])];
        let previous = vec![v(&[0.0, 0.0])];
        let partition = Partition::from_labels(&[0, 0, 0], 1).unwrap();

        let centroids = estimate_centroids(&points, &previous, &partition).unwrap();
        assert_eq!(centroids, vec![v(&[1.0, 2.0])]);
    }

    #[test]
    fn test_estimate_centroids_carries_empty_forward() {
        let points = vec![v(&[0.0, 0.0]), v(&[2.0, 2.0])];
        let previous = vec![v(&[1.0, 1.0]), v(&[7.5, -3.0])];
        let partition = Partition::from_labels(&[0, 0], 2).unwrap();

        let centroids = estimate_centroids(&points, &previous, &partition).unwrap();
        assert_eq!(centroids[0], v(&[1.0, 1.0]));
        assert_eq!(centroids[1], v(&[7.5, -3.0]));
    }

    #[test]
    fn test_assemble_clusters_drops_empty_groups() {
        let points = vec![v(&[0.0]), v(&[10.0]), v(&[11.0])];
        let centroids = vec![v(&[0.0]), v(&[50.0]), v(&[10.5])];
        let partition = Partition::from_labels(&[0, 2, 2], 3).unwrap();

        let clusters = assemble_clusters(&points, &centroids, &partition).unwrap();

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].id, 0);
        assert_eq!(clusters[0].centroid, v(&[0.0]));
        assert_eq!(clusters[1].id, 1);
        assert_eq!(clusters[1].centroid, v(&[10.5]));
        assert_eq!(clusters[1].members, vec![v(&[10.0]), v(&[11.0])]);
    }

    #[test]
    fn test_estimate_centroids_rejects_group_count_mismatch() {
        let points = vec![v(&[0.0]), v(&[1.0])];
        let previous = vec![v(&[0.0]), v(&[5.0]), v(&[9.0])];
        let partition = Partition::from_labels(&[0, 0], 2).unwrap();

        let result = estimate_centroids(&points, &previous, &partition);
        assert!(matches!(result, Err(KMeansError::InvalidK(_))));
    }

    #[test]
    fn test_estimate_centroids_rejects_unknown_point() {
        let points = vec![v(&[0.0])];
        let previous = vec![v(&[0.0])];
        let partition = Partition::from_labels(&[0, 0, 0], 1).unwrap();

        let result = estimate_centroids(&points, &previous, &partition);
        assert!(matches!(result, Err(KMeansError::InvalidK(_))));
    }

    #[test]
    fn test_assemble_clusters_rejects_group_count_mismatch() {
        let points = vec![v(&[0.0]), v(&[1.0])];
        let centroids = vec![v(&[0.0]), v(&[1.0]), v(&[2.0])];
        let partition = Partition::from_labels(&[0, 1], 2).unwrap();

        let result = assemble_clusters(&points, &centroids, &partition);
        assert!(matches!(result, Err(KMeansError::InvalidK(_))));
    }

    #[test]
    fn test_assemble_clusters_rejects_unknown_point() {
        let points = vec![v(&[0.0])];
        let centroids = vec![v(&[0.0]), v(&[1.0])];
        let partition = Partition::from_labels(&[0, 1], 2).unwrap();

        let result = assemble_clusters(&points, &centroids, &partition);
        assert!(matches!(result, Err(KMeansError::InvalidK(_))));
    }

    #[test]
    fn test_run_basic() {
        let points = sample_points();
        let config = KMeansConfig::new(3).with_seed(42).with_max_iters(100);

        let result = run(&points, &config).unwrap();

        assert!(!result.clusters.is_empty() && result.clusters.len() <= 3);
        assert_eq!(result.centroids.len(), 3);
        assert_eq!(result.seed, Some(42));
        assert!(result.n_iterations <= 100);

        let total: usize = result.clusters.iter().map(Cluster::len).sum();
        assert_eq!(total, points.len());
    }

    #[test]
    fn test_run_identical_points() {
        let points = vec![v(&[5.0, 2.0]); 6];
        let config = KMeansConfig::new(3).with_seed(1);

        let result = run(&points, &config).unwrap();

        assert_eq!(result.clusters.len(), 1);
        assert_eq!(result.clusters[0].len(), 6);
        assert_eq!(result.clusters[0].centroid, v(&[5.0, 2.0]));
        assert_eq!(result.n_iterations, 1);
        assert_eq!(result.stop_reason, StopReason::Converged);
    }

    #[test]
    fn test_run_iteration_cap() {
        let points = sample_points();
        let config = KMeansConfig::new(2).with_seed(3).with_max_iters(1).with_tol(-1.0);

        let result = run(&points, &config).unwrap();
        assert_eq!(result.n_iterations, 1);
        assert_eq!(result.stop_reason, StopReason::MaxIterations);
    }

    #[test]
    fn test_run_time_limit() {
        let points = sample_points();
        let config = KMeansConfig::new(2)
            .with_seed(3)
            .with_tol(-1.0)
            .with_max_duration(std::time::Duration::ZERO);

        let result = run(&points, &config).unwrap();
        assert_eq!(result.n_iterations, 1);
        assert_eq!(result.stop_reason, StopReason::TimeLimit);
    }

    #[test]
    fn test_validation() {
        let config = KMeansConfig::new(2);
        assert!(matches!(run(&[], &config), Err(KMeansError::EmptyInput)));

        let points = sample_points();
        assert!(matches!(
            run(&points, &KMeansConfig::new(0)),
            Err(KMeansError::InvalidK(_))
        ));
        assert!(matches!(
            run(&points, &KMeansConfig::new(7)),
            Err(KMeansError::InvalidK(_))
        ));

        let ragged = vec![v(&[1.0, 2.0]), v(&[1.0, 2.0, 3.0])];
        assert!(matches!(
            run(&ragged, &config),
            Err(KMeansError::InvalidDimensions(_))
        ));
    }
}
