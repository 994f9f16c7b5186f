use crate::algorithm::{run, KMeansResult};
use crate::config::KMeansConfig;
use crate::distance::nearest_centroid_index;
use crate::error::{KMeansError, Result};
use crate::point::Point;
use ndarray::ArrayView2;

/// Lloyd's k-means model over 2-dimensional points.
///
/// Provides an API similar to scikit-learn: train once, then predict
/// cluster labels for any points.
///
/// # Example
///
/// ```
/// use lloyd_kmeans::{KMeans, KMeansConfig, Point};
///
/// let points = vec![
///     Point::new(1.0, 1.0),
///     Point::new(2.0, 1.0),
///     Point::new(12.0, 2.0),
///     Point::new(14.0, 2.0),
/// ];
///
/// let mut kmeans = KMeans::with_config(KMeansConfig::new(2).with_seed(42));
/// kmeans.train(&points).unwrap();
///
/// let labels = kmeans.predict(&points).unwrap();
/// assert_eq!(labels[0], labels[1]);
/// assert_ne!(labels[0], labels[2]);
/// ```
#[derive(Debug, Clone)]
pub struct KMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Result of the last training run (None if not yet fitted)
    fitted: Option<KMeansResult>,
}

impl KMeans {
    /// Create a new KMeans instance with default configuration.
    ///
    /// # Panics
    ///
    /// Panics if `k` is 0.
    pub fn new(k: usize) -> Self {
        assert!(k > 0, "k must be greater than 0");

        Self {
            config: KMeansConfig::new(k),
            fitted: None,
        }
    }

    /// Create a new KMeans instance with custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config.k` is 0.
    pub fn with_config(config: KMeansConfig) -> Self {
        assert!(config.k > 0, "k must be greater than 0");

        Self {
            config,
            fitted: None,
        }
    }

    /// Train the model on the given points.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `points` is empty or has fewer than k elements
    /// - the empty-cluster policy is `Fail` and a cluster empties
    pub fn train(&mut self, points: &[Point]) -> Result<()> {
        let result = run(points, &self.config)?;
        self.fitted = Some(result);
        Ok(())
    }

    /// Train on an `(n_samples, 2)` array, one point per row.
    pub fn train_array(&mut self, data: &ArrayView2<f64>) -> Result<()> {
        let points = points_from_array(data)?;
        self.train(&points)
    }

    /// Fit the model to the points. Equivalent to `train()`.
    ///
    /// Returns `&mut Self` for method chaining.
    pub fn fit(&mut self, points: &[Point]) -> Result<&mut Self> {
        self.train(points)?;
        Ok(self)
    }

    /// Predict the cluster index of every point.
    ///
    /// # Errors
    ///
    /// Returns [`KMeansError::NotFitted`] if the model has not been trained.
    pub fn predict(&self, points: &[Point]) -> Result<Vec<usize>> {
        let centroids = self.centroids().ok_or(KMeansError::NotFitted)?;

        points
            .iter()
            .map(|p| nearest_centroid_index(p, centroids))
            .collect()
    }

    /// Fit the model and predict cluster assignments in one call.
    pub fn fit_predict(&mut self, points: &[Point]) -> Result<Vec<usize>> {
        self.train(points)?;
        self.predict(points)
    }

    /// Centroids of the fitted model, `None` before training.
    pub fn centroids(&self) -> Option<&[Point]> {
        self.fitted.as_ref().map(|r| r.centroids.as_slice())
    }

    /// Within-cluster sum of squares of the training assignment.
    pub fn cost(&self) -> Option<f64> {
        self.fitted.as_ref().map(|r| r.cost)
    }

    /// Iterations used by the last training run.
    pub fn n_iterations(&self) -> Option<usize> {
        self.fitted.as_ref().map(|r| r.n_iterations)
    }

    /// Full result of the last training run.
    pub fn result(&self) -> Option<&KMeansResult> {
        self.fitted.as_ref()
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Get the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}

/// Convert an `(n_samples, 2)` array into points.
pub fn points_from_array(data: &ArrayView2<f64>) -> Result<Vec<Point>> {
    if data.ncols() != 2 {
        return Err(KMeansError::InvalidDimensions(format!(
            "Expected 2 features, got {}",
            data.ncols()
        )));
    }

    Ok(data
        .outer_iter()
        .map(|row| Point::new(row[0], row[1]))
        .collect())
}
