use crate::algorithm::{run, KMeansResult};
use crate::cluster::Cluster;
use crate::config::KMeansConfig;
use crate::distance::assign_labels;
use crate::error::{KMeansError, Result};
use crate::vector::Vector;

/// Median k-means clustering model.
///
/// Seeds with k-means++ and then alternates nearest-centroid assignment with a
/// coordinate-wise median update until centroids stop moving. The API mirrors
/// the familiar `train()` / `fit()` / `predict()` shape.
///
/// # Example
///
/// ```
/// use medkmeans::{KMeansConfig, MedianKMeans, Vector};
///
/// let points: Vec<Vector> = vec![
///     vec![1.0, 1.0], vec![1.0, 2.0], vec![1.0, 3.0],
///     vec![5.0, 2.0], vec![6.0, 1.0], vec![6.0, 2.0],
/// ]
/// .into_iter()
/// .map(Vector::from)
/// .collect();
///
/// let mut kmeans = MedianKMeans::with_config(KMeansConfig::new(2).with_seed(7).with_max_iters(100));
/// kmeans.train(&points).unwrap();
///
/// let labels = kmeans.predict(&points).unwrap();
/// assert_eq!(labels.len(), 6);
/// ```
pub struct MedianKMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Number of features (dimensions), 0 until the first train call
    d: usize,

    /// Result of the last training run (None if not yet fitted)
    fitted: Option<KMeansResult>,
}

impl MedianKMeans {
    /// Create a new model with default configuration and `k` clusters.
    ///
    /// # Arguments
    ///
    /// * `k` - Number of clusters
    ///
    /// An invalid `k` is reported by [`MedianKMeans::train`].
    pub fn new(k: usize) -> Self {
        Self::with_config(KMeansConfig::new(k))
    }

    /// Create a new model with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Custom configuration for the k-means algorithm
    pub fn with_config(config: KMeansConfig) -> Self {
        Self {
            config,
            d: 0,
            fitted: None,
        }
    }

    /// Train the model on `points`.
    ///
    /// # Arguments
    ///
    /// * `points` - Training points, all of the same dimension
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `points` is empty
    /// - `k` is 0 or larger than the number of points
    /// - points have differing dimensions, or differ from a previous train call
    pub fn train(&mut self, points: &[Vector]) -> Result<()> {
        if let Some(first) = points.first() {
            let n_features = first.dim();
            if self.fitted.is_some() && n_features != self.d {
                return Err(KMeansError::InvalidDimensions(format!(
                    "Expected {} features, got {}",
                    self.d, n_features
                )));
            }
            self.d = n_features;
        }

        let result = run(points, &self.config)?;
        self.fitted = Some(result);
        Ok(())
    }

    /// Fit the model to `points`; equivalent to `train()`.
    ///
    /// # Arguments
    ///
    /// * `points` - Training points, all of the same dimension
    ///
    /// # Returns
    ///
    /// Returns `&mut Self` for method chaining.
    pub fn fit(&mut self, points: &[Vector]) -> Result<&mut Self> {
        self.train(points)?;
        Ok(self)
    }

    /// Assign each point to the id of its nearest cluster.
    ///
    /// Ids refer to [`MedianKMeans::clusters`], so they are always below the
    /// number of non-empty clusters.
    ///
    /// # Arguments
    ///
    /// * `points` - Points to label, with the training dimension
    ///
    /// # Returns
    ///
    /// One cluster id per input point, in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been fitted yet or a point's
    /// dimension differs from the training data.
    pub fn predict(&self, points: &[Vector]) -> Result<Vec<usize>> {
        let fitted = self.fitted.as_ref().ok_or(KMeansError::NotFitted)?;

        if let Some(point) = points.iter().find(|p| p.dim() != self.d) {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.d,
                point.dim()
            )));
        }

        let centroids: Vec<Vector> = fitted
            .clusters
            .iter()
            .map(|c| c.centroid.clone())
            .collect();

        assign_labels(points, &centroids)
    }

    /// Fit the model and predict cluster ids in one call.
    ///
    /// # Arguments
    ///
    /// * `points` - Training points, all of the same dimension
    ///
    /// # Returns
    ///
    /// One cluster id per training point.
    pub fn fit_predict(&mut self, points: &[Vector]) -> Result<Vec<usize>> {
        self.train(points)?;
        self.predict(points)
    }

    /// Non-empty clusters of the fitted model
    pub fn clusters(&self) -> Option<&[Cluster]> {
        self.fitted.as_ref().map(|r| r.clusters.as_slice())
    }

    /// All `k` final centroids, including those of empty groups
    pub fn centroids(&self) -> Option<&[Vector]> {
        self.fitted.as_ref().map(|r| r.centroids.as_slice())
    }

    /// Full result of the last training run
    pub fn result(&self) -> Option<&KMeansResult> {
        self.fitted.as_ref()
    }

    /// Get the number of clusters requested.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Get the number of features (dimensions).
    pub fn d(&self) -> usize {
        self.d
    }

    /// Get the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}
