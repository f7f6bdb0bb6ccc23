use std::time::Duration;

/// Smallest positive `f64` (a subnormal), i.e. "no detectable movement".
pub const MIN_POSITIVE_DEVIATION: f64 = 4.9406564584124654e-324;

/// Configuration for the median k-means algorithm
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Maximum number of iterations. `0` means unbounded.
    pub max_iters: usize,

    /// Convergence tolerance. The loop stops once the mean centroid
    /// displacement is at or below this value. Set to a negative value to
    /// disable early stopping.
    pub tol: f64,

    /// Random seed for centroid initialization.
    /// `None` seeds from the system clock.
    pub seed: Option<u64>,

    /// Wall-clock budget for the iteration loop. Checked after every iteration.
    pub max_duration: Option<Duration>,

    /// Log per-iteration progress at `info` instead of `debug`
    pub verbose: bool,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 8,
            max_iters: 0,
            tol: MIN_POSITIVE_DEVIATION,
            seed: None,
            max_duration: None,
            verbose: false,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the maximum number of iterations (`0` for unbounded)
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the wall-clock budget
    pub fn with_max_duration(mut self, max_duration: Duration) -> Self {
        self.max_duration = Some(max_duration);
        self
    }

    /// Set verbose mode
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Iteration cap with `0` normalized to unbounded
    pub fn effective_max_iters(&self) -> usize {
        if self.max_iters == 0 {
            usize::MAX
        } else {
            self.max_iters
        }
    }
}
