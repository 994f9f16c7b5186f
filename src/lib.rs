//! # lloyd-kmeans
//!
//! Lloyd's k-means clustering for points in the plane.
//!
//! ## Features
//!
//! - **Classic Lloyd iteration**: assign every point to its nearest centroid,
//!   move each centroid to the mean of its members, repeat until the centroids
//!   stop moving or the iteration budget runs out
//! - **Reproducible**: seed points are drawn from a seeded `ChaCha8Rng`;
//!   leave the seed unset for a fresh clustering on every run
//! - **Explicit empty-cluster policy**: keep the previous centroid, reseed it
//!   from a random point, or fail
//! - **Step-wise driving**: [`LloydState::step`] runs one iteration at a time
//!   so callers can report progress or stop early
//! - **scikit-learn style API**: `train()`, `fit()`, `predict()`
//!
//! Distances are squared Euclidean; the reported cost (inertia) is the sum of
//! squared distances from each point to its cluster's centroid.
//!
//! ## Example
//!
//! ```rust
//! use lloyd_kmeans::{run, KMeansConfig, Point};
//!
//! let points = vec![
//!     Point::new(1.0, 1.0),
//!     Point::new(2.0, 1.0),
//!     Point::new(12.0, 2.0),
//!     Point::new(14.0, 2.0),
//! ];
//!
//! let config = KMeansConfig::new(2).with_max_iters(10).with_seed(42);
//! let result = run(&points, &config).unwrap();
//!
//! assert_eq!(result.clusters.sizes(), vec![2, 2]);
//! assert!(result.n_iterations <= 10);
//! ```
//!
//! ## Restarts
//!
//! ```rust
//! use lloyd_kmeans::{best_of, KMeansConfig, Point};
//!
//! let points: Vec<Point> = (0..60)
//!     .map(|i| Point::new((i % 6) as f64 + (i / 20) as f64 * 10.0, (i / 6) as f64))
//!     .collect();
//!
//! let config = KMeansConfig::new(3).with_seed(7);
//! let best = best_of(&points, &config, 5).unwrap();
//! assert!(best.cost >= 0.0);
//! ```

mod algorithm;
mod config;
mod distance;
mod error;
mod kmeans;
mod point;
mod restart;

pub use algorithm::{
    assign, compute_cost, initialize_centroids, recompute_centroids, run, run_with_observer,
    Clusters, KMeansResult, LloydState, StepOutcome,
};
pub use config::{Convergence, EmptyClusterPolicy, KMeansConfig};
pub use distance::{converged, distance, nearest_centroid_index};
pub use error::{KMeansError, Result};
pub use kmeans::{points_from_array, KMeans};
pub use point::Point;
pub use restart::best_of;
