use lloyd_kmeans::{
    assign, best_of, compute_cost, distance, points_from_array, run, EmptyClusterPolicy, KMeans,
    KMeansConfig, KMeansError, LloydState, Point,
};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generate synthetic clustered points around known centers
fn generate_clustered_points(n_samples: usize, centers: &[Point], seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Array2::random_using((n_samples, 2), Uniform::new(-0.5, 0.5), &mut rng);

    (0..n_samples)
        .map(|i| {
            let center = centers[i % centers.len()];
            Point::new(center.x + noise[[i, 0]], center.y + noise[[i, 1]])
        })
        .collect()
}

fn random_points(n_samples: usize) -> Vec<Point> {
    let data = Array2::random((n_samples, 2), Uniform::new(-10.0f64, 10.0));
    points_from_array(&data.view()).unwrap()
}

fn sorted_coords(points: &[Point]) -> Vec<(f64, f64)> {
    let mut coords: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    coords.sort_by(|a, b| a.partial_cmp(b).unwrap());
    coords
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_partition_invariant() {
    let points = random_points(400);

    for k in [1, 2, 5, 17, 400] {
        let mut rng = ChaCha8Rng::seed_from_u64(k as u64);
        let centroids = lloyd_kmeans::initialize_centroids(&points, k, &mut rng).unwrap();
        let clusters = assign(&points, &centroids).unwrap();

        assert_eq!(clusters.k(), k);

        let members: Vec<Point> = clusters.iter().flatten().copied().collect();
        assert_eq!(members.len(), points.len(), "no duplicates, no omissions");
        assert_eq!(sorted_coords(&members), sorted_coords(&points));
    }
}

#[test]
fn test_termination_within_budget() {
    let points = random_points(1000);

    for max_iters in [1, 2, 5, 50] {
        let config = KMeansConfig::new(10).with_max_iters(max_iters).with_seed(3);
        let result = run(&points, &config).unwrap();

        assert!(result.n_iterations >= 1);
        assert!(result.n_iterations <= max_iters);
        assert!(result.cost >= 0.0);
        assert_eq!(result.clusters.n_points(), points.len());
    }
}

#[test]
fn test_distance_symmetry() {
    let points = random_points(50);
    for a in &points {
        for b in &points {
            assert_eq!(distance(a, b), distance(b, a));
            assert!(distance(a, b) >= 0.0);
        }
    }
}

#[test]
fn test_cost_idempotent() {
    let points = random_points(300);
    let result = run(&points, &KMeansConfig::new(4).with_seed(1)).unwrap();

    let first = compute_cost(&result.clusters);
    let second = compute_cost(&result.clusters);

    assert_eq!(first, second);
    assert_eq!(first, result.cost);
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_four_point_scenario() {
    let points = vec![
        Point::new(1.0, 1.0),
        Point::new(2.0, 1.0),
        Point::new(12.0, 2.0),
        Point::new(14.0, 2.0),
    ];

    // Unseeded runs: any seed pair must end with the same grouping
    for _ in 0..10 {
        let result = run(&points, &KMeansConfig::new(2).with_max_iters(10)).unwrap();

        assert_eq!(result.clusters.k(), 2);
        let groups: Vec<Vec<(f64, f64)>> = result.clusters.iter().map(sorted_coords).collect();
        assert!(groups.contains(&vec![(1.0, 1.0), (2.0, 1.0)]));
        assert!(groups.contains(&vec![(12.0, 2.0), (14.0, 2.0)]));
    }
}

#[test]
fn test_k_equals_one() {
    let points = random_points(100);
    let result = run(&points, &KMeansConfig::new(1).with_seed(0)).unwrap();

    assert_eq!(result.clusters.sizes(), vec![100]);

    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / 100.0;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / 100.0;
    assert!((result.centroids[0].x - mean_x).abs() < 1e-9);
    assert!((result.centroids[0].y - mean_y).abs() < 1e-9);
}

#[test]
fn test_k_equals_n_samples() {
    let points = random_points(10);
    let result = run(&points, &KMeansConfig::new(10).with_seed(5)).unwrap();

    assert!(result.clusters.iter().all(|c| c.len() == 1));
    assert_eq!(result.cost, 0.0);
}

#[test]
fn test_k_greater_than_n_samples() {
    let points = random_points(5);
    let result = run(&points, &KMeansConfig::new(6));
    assert!(matches!(result, Err(KMeansError::InvalidInput(_))));
}

#[test]
fn test_negative_coordinates_keep_k_centroids() {
    let centers = [Point::new(-20.0, -20.0), Point::new(-20.0, 20.0), Point::new(20.0, -20.0)];
    let points = generate_clustered_points(300, &centers, 42);

    let result = run(&points, &KMeansConfig::new(3).with_seed(42)).unwrap();

    assert_eq!(result.centroids.len(), 3);
    assert_eq!(result.clusters.k(), 3);
    assert_eq!(result.clusters.n_points(), 300);
}

// ============================================================================
// Reproducibility and restarts
// ============================================================================

#[test]
fn test_reproducibility_with_seed() {
    let points = random_points(500);
    let config = KMeansConfig::new(5).with_seed(12345);

    let first = run(&points, &config).unwrap();
    let second = run(&points, &config).unwrap();

    assert_eq!(first.centroids, second.centroids);
    assert_eq!(first.clusters, second.clusters);
    assert_eq!(first.n_iterations, second.n_iterations);
}

#[test]
fn test_different_seeds_pick_different_starts() {
    let points = random_points(500);
    let config_a = KMeansConfig::new(5).with_seed(1);
    let config_b = KMeansConfig::new(5).with_seed(99999);

    let mut state_a = LloydState::new(&points, &config_a).unwrap();
    let state_b = LloydState::new(&points, &config_b).unwrap();

    assert_ne!(state_a.centroids(), state_b.centroids());
    assert!(state_a.step().is_ok());
}

#[test]
fn test_restarts_recover_separated_clusters() {
    let centers = [
        Point::new(0.0, 0.0),
        Point::new(30.0, 0.0),
        Point::new(0.0, 30.0),
        Point::new(30.0, 30.0),
    ];
    let points = generate_clustered_points(400, &centers, 7);
    let config = KMeansConfig::new(4).with_seed(7);

    let best = best_of(&points, &config, 100).unwrap();

    // Each generated blob spans at most 1x1, so the optimum is tiny
    assert!(best.cost < points.len() as f64 * 0.5);
    assert_eq!(best.clusters.sizes(), vec![100; 4]);
}

// ============================================================================
// Empty-cluster policies
// ============================================================================

#[test]
fn test_duplicate_points_with_each_policy() {
    // Three identical seeds at k=3 leave two clusters empty after the first assignment
    let points = vec![Point::new(1.0, 1.0); 3];

    let keep = run(&points, &KMeansConfig::new(3).with_seed(0)).unwrap();
    assert_eq!(keep.clusters.sizes(), vec![3, 0, 0]);
    assert_eq!(keep.cost, 0.0);
    assert!(keep.converged);

    let reseed = run(
        &points,
        &KMeansConfig::new(3)
            .with_seed(0)
            .with_empty_cluster_policy(EmptyClusterPolicy::Reseed),
    )
    .unwrap();
    assert_eq!(reseed.clusters.n_points(), 3);
    assert_eq!(reseed.centroids, vec![Point::new(1.0, 1.0); 3]);

    let fail = run(
        &points,
        &KMeansConfig::new(3)
            .with_seed(0)
            .with_empty_cluster_policy(EmptyClusterPolicy::Fail),
    );
    assert_eq!(fail, Err(KMeansError::DegenerateCluster { cluster: 1 }));
}

// ============================================================================
// Model API
// ============================================================================

#[test]
fn test_model_fit_predict() {
    let centers = [Point::new(-5.0, -5.0), Point::new(0.0, 5.0), Point::new(5.0, -5.0)];
    let points = generate_clustered_points(300, &centers, 1);
    let mut kmeans = KMeans::with_config(KMeansConfig::new(3).with_seed(1));

    let labels = kmeans.fit_predict(&points).unwrap();

    assert_eq!(labels.len(), 300);
    assert!(labels.iter().all(|&l| l < 3));
    assert!(kmeans.cost().unwrap() >= 0.0);
}

#[test]
fn test_model_train_array() {
    let data = Array2::random((200, 2), Uniform::new(-1.0f64, 1.0));
    let mut kmeans = KMeans::new(4);

    kmeans.train_array(&data.view()).unwrap();
    assert_eq!(kmeans.centroids().unwrap().len(), 4);
}

#[test]
fn test_predict_before_fit_fails() {
    let kmeans = KMeans::new(3);
    match kmeans.predict(&random_points(10)) {
        Err(KMeansError::NotFitted) => {}
        other => panic!("Expected NotFitted error, got {:?}", other),
    }
}
