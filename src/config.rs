/// How successive centroid sets are compared to decide convergence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Convergence {
    /// Stop only when every recomputed centroid is bit-for-bit equal to the
    /// previous one.
    #[default]
    Exact,

    /// Stop when the total centroid shift (sum of Euclidean movements) is at
    /// most the given tolerance.
    Tolerance(f64),
}

/// What to do with a cluster that has no member points after assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyClusterPolicy {
    /// The cluster keeps the centroid it had in the previous iteration.
    #[default]
    KeepPrevious,

    /// The cluster is reseeded with a uniformly random input point.
    Reseed,

    /// Fail with [`KMeansError::DegenerateCluster`](crate::KMeansError::DegenerateCluster).
    Fail,
}

/// Configuration for the k-means algorithm
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Maximum number of iterations. At least one iteration always runs.
    pub max_iters: usize,

    /// Random seed for centroid initialization and reseeding.
    /// `None` draws a fresh seed from the OS on every run.
    pub seed: Option<u64>,

    /// Convergence test applied after every iteration
    pub convergence: Convergence,

    /// Policy for clusters that lose all their points
    pub empty_cluster: EmptyClusterPolicy,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 2,
            max_iters: 200,
            seed: None,
            convergence: Convergence::Exact,
            empty_cluster: EmptyClusterPolicy::KeepPrevious,
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

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the convergence test
    pub fn with_convergence(mut self, convergence: Convergence) -> Self {
        self.convergence = convergence;
        self
    }

    /// Switch to tolerance-based convergence
    pub fn with_tol(self, tol: f64) -> Self {
        self.with_convergence(Convergence::Tolerance(tol))
    }

    /// Set the empty-cluster policy
    pub fn with_empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster = policy;
        self
    }
}
