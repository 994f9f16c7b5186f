use crate::config::{EmptyClusterPolicy, KMeansConfig};
use crate::distance::{compute_centroid_shift, converged, distance, nearest_centroid_index};
use crate::error::{KMeansError, Result};
use crate::point::Point;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::Index;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Points grouped by cluster index.
///
/// Holds exactly `k` buckets; bucket `i` lists the members of cluster `i` in
/// input order. A bucket may be empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Clusters {
    buckets: Vec<Vec<Point>>,
}

impl Clusters {
    /// `k` empty buckets.
    pub fn with_k(k: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); k],
        }
    }

    /// Number of clusters, empty ones included.
    pub fn k(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of points across all clusters.
    pub fn n_points(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Members of cluster `idx`, or `None` if `idx >= k`.
    pub fn get(&self, idx: usize) -> Option<&[Point]> {
        self.buckets.get(idx).map(Vec::as_slice)
    }

    /// Iterate over the clusters in index order.
    pub fn iter(&self) -> impl Iterator<Item = &[Point]> {
        self.buckets.iter().map(Vec::as_slice)
    }

    /// Member count of every cluster.
    pub fn sizes(&self) -> Vec<usize> {
        self.buckets.iter().map(Vec::len).collect()
    }

    /// Consume into the underlying buckets.
    pub fn into_inner(self) -> Vec<Vec<Point>> {
        self.buckets
    }

    fn push(&mut self, idx: usize, point: Point) {
        self.buckets[idx].push(point);
    }

    /// The `n`-th point when the clusters are read back to back.
    fn nth_point(&self, mut n: usize) -> Option<Point> {
        for bucket in &self.buckets {
            if n < bucket.len() {
                return Some(bucket[n]);
            }
            n -= bucket.len();
        }
        None
    }
}

impl Index<usize> for Clusters {
    type Output = [Point];

    fn index(&self, idx: usize) -> &[Point] {
        &self.buckets[idx]
    }
}

impl From<Vec<Vec<Point>>> for Clusters {
    fn from(buckets: Vec<Vec<Point>>) -> Self {
        Self { buckets }
    }
}

/// Result of the k-means algorithm
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansResult {
    /// Assignment computed in the last iteration
    pub clusters: Clusters,
    /// Centroids recomputed from `clusters`
    pub centroids: Vec<Point>,
    /// Number of iterations actually run, at most `max_iters`
    pub n_iterations: usize,
    /// Whether the run stopped on convergence rather than on the iteration cap
    pub converged: bool,
    /// Within-cluster sum of squared distances of `clusters`
    pub cost: f64,
}

/// Outcome of a single assign/recompute/compare iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// 1-based number of the iteration just run
    pub iteration: usize,
    /// Assignment against the centroids the iteration started from
    pub clusters: Clusters,
    /// Whether the recomputed centroids matched the previous ones
    pub converged: bool,
}

/// Check the preconditions of a clustering run before any work is done.
fn validate_inputs(points: &[Point], k: usize, max_iters: usize) -> Result<()> {
    if points.is_empty() {
        return Err(KMeansError::InvalidInput(
            "cannot cluster an empty point set".to_string(),
        ));
    }

    if k == 0 {
        return Err(KMeansError::InvalidInput(
            "k must be greater than 0".to_string(),
        ));
    }

    if points.len() < k {
        return Err(KMeansError::InvalidInput(format!(
            "Number of points ({}) is less than k ({})",
            points.len(),
            k
        )));
    }

    if max_iters == 0 {
        return Err(KMeansError::InvalidInput(
            "max_iters must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// RNG for a run: seeded when a seed is given, from OS entropy otherwise.
pub(crate) fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Initialize centroids by randomly selecting k distinct data points
pub fn initialize_centroids<R: Rng + ?Sized>(
    points: &[Point],
    k: usize,
    rng: &mut R,
) -> Result<Vec<Point>> {
    if points.is_empty() || k == 0 || k > points.len() {
        return Err(KMeansError::InvalidInput(format!(
            "cannot pick {} seed points from {} points",
            k,
            points.len()
        )));
    }

    Ok(index::sample(rng, points.len(), k)
        .into_iter()
        .map(|idx| points[idx])
        .collect())
}

/// Assign every point to the cluster of its nearest centroid.
///
/// Returns one bucket per centroid; members keep their input order.
pub fn assign(points: &[Point], centroids: &[Point]) -> Result<Clusters> {
    if centroids.is_empty() {
        return Err(KMeansError::NoCentroids);
    }

    let mut clusters = Clusters::with_k(centroids.len());
    for point in points {
        let idx = nearest_centroid_index(point, centroids)?;
        clusters.push(idx, *point);
    }

    Ok(clusters)
}

/// Recompute one centroid per cluster as the mean of its members.
///
/// The output stays index-aligned with `clusters`. Empty clusters are
/// resolved by `policy`: keep `previous[idx]`, reseed from a random member
/// of the whole point set, or fail.
pub fn recompute_centroids<R: Rng + ?Sized>(
    clusters: &Clusters,
    previous: &[Point],
    policy: EmptyClusterPolicy,
    rng: &mut R,
) -> Result<Vec<Point>> {
    if previous.len() != clusters.k() {
        return Err(KMeansError::InvalidInput(format!(
            "expected {} previous centroids, got {}",
            clusters.k(),
            previous.len()
        )));
    }

    let mut centroids = Vec::with_capacity(clusters.k());
    let mut empty_clusters = Vec::new();

    for (cluster_idx, members) in clusters.iter().enumerate() {
        match Point::mean(members) {
            Some(mean) => centroids.push(mean),
            None => {
                if policy == EmptyClusterPolicy::Fail {
                    return Err(KMeansError::DegenerateCluster {
                        cluster: cluster_idx,
                    });
                }
                empty_clusters.push(cluster_idx);
                centroids.push(previous[cluster_idx]);
            }
        }
    }

    if !empty_clusters.is_empty() && policy == EmptyClusterPolicy::Reseed {
        let n_points = clusters.n_points();
        let amount = empty_clusters.len().min(n_points);
        let picks = index::sample(rng, n_points, amount);

        for (&cluster_idx, point_idx) in empty_clusters.iter().zip(picks) {
            if let Some(point) = clusters.nth_point(point_idx) {
                centroids[cluster_idx] = point;
            }
        }

        warn!("Reinitialized {} empty clusters", amount);
    } else if !empty_clusters.is_empty() {
        debug!(
            ?empty_clusters,
            "Kept previous centroids for empty clusters"
        );
    }

    Ok(centroids)
}

/// Total within-cluster sum of squared distances.
///
/// Each point is measured against the mean of its own cluster; empty
/// clusters contribute nothing.
pub fn compute_cost(clusters: &Clusters) -> f64 {
    clusters
        .iter()
        .filter_map(|members| Point::mean(members).map(|mean| (mean, members)))
        .map(|(mean, members)| members.iter().map(|p| distance(&mean, p)).sum::<f64>())
        .sum()
}

/// Iteration state of one Lloyd's run.
///
/// Drive it with [`LloydState::step`] to interleave cancellation or progress
/// reporting between iterations; [`run`] is the plain loop over it.
pub struct LloydState<'a> {
    points: &'a [Point],
    config: &'a KMeansConfig,
    centroids: Vec<Point>,
    iteration: usize,
    converged: bool,
    rng: ChaCha8Rng,
}

impl<'a> LloydState<'a> {
    /// Validate the inputs and pick the seed centroids.
    pub fn new(points: &'a [Point], config: &'a KMeansConfig) -> Result<Self> {
        validate_inputs(points, config.k, config.max_iters)?;

        let mut rng = make_rng(config.seed);
        let centroids = initialize_centroids(points, config.k, &mut rng)?;

        debug!(
            n_points = points.len(),
            k = config.k,
            max_iters = config.max_iters,
            "Training k-means"
        );

        Ok(Self {
            points,
            config,
            centroids,
            iteration: 0,
            converged: false,
            rng,
        })
    }

    /// Run one iteration: assign, recompute, compare.
    ///
    /// Fails with [`KMeansError::RunFinished`] once [`is_done`](Self::is_done)
    /// is true, so the iteration count never exceeds `max_iters`.
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.is_done() {
            return Err(KMeansError::RunFinished {
                iterations: self.iteration,
            });
        }

        let iter_start = Instant::now();

        let clusters = assign(self.points, &self.centroids)?;
        let new_centroids = recompute_centroids(
            &clusters,
            &self.centroids,
            self.config.empty_cluster,
            &mut self.rng,
        )?;

        let shift = compute_centroid_shift(&self.centroids, &new_centroids);
        self.converged = converged(&self.centroids, &new_centroids, self.config.convergence);
        self.centroids = new_centroids;
        self.iteration += 1;

        debug!(
            iteration = self.iteration,
            max_iters = self.config.max_iters,
            shift,
            elapsed_s = iter_start.elapsed().as_secs_f64(),
            "k-means iteration"
        );
        for (cluster_idx, centroid) in self.centroids.iter().enumerate() {
            debug!(
                iteration = self.iteration,
                cluster = cluster_idx + 1,
                centroid = %centroid,
                "centroid"
            );
        }

        Ok(StepOutcome {
            iteration: self.iteration,
            clusters,
            converged: self.converged,
        })
    }

    /// Centroids after the last step (the seeds before the first one).
    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }

    /// Number of steps run so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Whether the last step left the centroids unchanged.
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// True once the run has converged or used up its iteration budget.
    pub fn is_done(&self) -> bool {
        self.converged || self.iteration >= self.config.max_iters
    }
}

/// Run Lloyd's algorithm to convergence or until `max_iters` iterations.
pub fn run(points: &[Point], config: &KMeansConfig) -> Result<KMeansResult> {
    run_with_observer(points, config, |_, _| {})
}

/// Like [`run`], calling `observer(iteration, centroids)` after every
/// iteration.
pub fn run_with_observer<F>(
    points: &[Point],
    config: &KMeansConfig,
    mut observer: F,
) -> Result<KMeansResult>
where
    F: FnMut(usize, &[Point]),
{
    let mut state = LloydState::new(points, config)?;

    let mut outcome = state.step()?;
    observer(outcome.iteration, state.centroids());

    while !state.is_done() {
        outcome = state.step()?;
        observer(outcome.iteration, state.centroids());
    }

    if state.is_converged() {
        info!("Converged after {} iterations", state.iteration());
    } else {
        info!(
            "Stopped after {} iterations without converging",
            state.iteration()
        );
    }

    let cost = compute_cost(&outcome.clusters);

    Ok(KMeansResult {
        centroids: state.centroids().to_vec(),
        n_iterations: state.iteration(),
        converged: state.is_converged(),
        clusters: outcome.clusters,
        cost,
    })
}
