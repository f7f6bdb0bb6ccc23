//! # medkmeans
//!
//! Robust k-means clustering in Rust: k-means++ seeding followed by Lloyd
//! iterations that update each centroid with the coordinate-wise **median**
//! of its members instead of the mean.
//!
//! ## Features
//!
//! - **k-means++ seeding** with an injectable, seedable random generator
//! - **Median centroid update**: resistant to outliers
//! - **Strict convergence**: stops when centroids stop moving, with an
//!   iteration cap and an optional wall-clock budget
//! - **Quality indices**: Dunn and Davies–Bouldin scores over the result
//! - **Parallel computation**: assignment and scoring fan out with rayon while
//!   staying deterministic
//! - **Point sources**: load points from CSV or `.npy` files
//!
//! ## Example
//!
//! ```rust
//! use medkmeans::{run, DaviesBouldinIndex, DunnIndex, KMeansConfig, QualityIndex, Vector};
//!
//! let points: Vec<Vector> = [[1.0, 1.0], [5.0, 2.0], [1.0, 2.0], [6.0, 1.0], [6.0, 2.0], [1.0, 3.0]]
//!     .iter()
//!     .map(|p| Vector::new(p.to_vec()))
//!     .collect();
//!
//! let config = KMeansConfig::new(3).with_seed(42);
//! let result = run(&points, &config).unwrap();
//!
//! // Empty groups are dropped, so there may be fewer than k clusters
//! assert!((1..=3).contains(&result.clusters.len()));
//!
//! let dunn = DunnIndex.score(&result.clusters);
//! let db = DaviesBouldinIndex.score(&result.clusters);
//! println!("{}: {}, {}: {}", DunnIndex.name(), dunn, DaviesBouldinIndex.name(), db);
//! ```
//!
//! ## From ndarray
//!
//! ```rust
//! use medkmeans::{points_from_array, KMeansConfig, MedianKMeans};
//! use ndarray::Array2;
//! use ndarray_rand::RandomExt;
//! use ndarray_rand::rand_distr::Uniform;
//!
//! let data = Array2::random((500, 8), Uniform::new(-1.0f64, 1.0));
//! let points = points_from_array(&data.view());
//!
//! let config = KMeansConfig::new(5).with_max_iters(100);
//! let mut kmeans = MedianKMeans::with_config(config);
//! let labels = kmeans.fit_predict(&points).unwrap();
//! assert_eq!(labels.len(), 500);
//! ```

mod algorithm;
mod cluster;
mod config;
mod distance;
mod error;
mod init;
pub mod io;
mod kmeans;
mod quality;
mod vector;

pub use algorithm::{
    assemble_clusters, estimate_centroids, run, run_with_rng, KMeansResult, StopReason,
};
pub use cluster::Cluster;
pub use config::{KMeansConfig, MIN_POSITIVE_DEVIATION};
pub use distance::{
    assign_labels, mean_centroid_shift, nearest_centroid, partition_points, Partition,
};
pub use error::{KMeansError, Result};
pub use init::{initialize_centroids, select_initial_indices};
pub use kmeans::MedianKMeans;
pub use quality::{DaviesBouldinIndex, DunnIndex, QualityIndex};
pub use vector::{median, points_from_array, Vector};
