//! Basic example demonstrating lloyd-kmeans usage
//!
//! Run with: RUST_LOG=debug cargo run --example basic --release

use lloyd_kmeans::{run_with_observer, KMeans, KMeansConfig, Point};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== lloyd-kmeans example ===\n");

    let n_samples = 300;
    let n_clusters = 3;

    // Cluster centers
    let centers = [Point::new(-5.0, -5.0), Point::new(0.0, 5.0), Point::new(5.0, -5.0)];

    println!("Generating {} samples around {} centers...", n_samples, n_clusters);

    let noise = Array2::random((n_samples, 2), Uniform::new(-1.0f64, 1.0));
    let points: Vec<Point> = (0..n_samples)
        .map(|i| {
            let center = centers[i % n_clusters];
            Point::new(center.x + noise[[i, 0]], center.y + noise[[i, 1]])
        })
        .collect();

    println!("True cluster centers:");
    for (i, center) in centers.iter().enumerate() {
        println!("  Cluster {}: ({:.2}, {:.2})", i, center.x, center.y);
    }
    println!();

    let config = KMeansConfig::new(n_clusters).with_max_iters(100).with_seed(42);

    println!("Running k-means with k={}...\n", n_clusters);

    let result = run_with_observer(&points, &config, |iteration, centroids| {
        let formatted: Vec<String> = centroids
            .iter()
            .map(|c| format!("({:.3}, {:.3})", c.x, c.y))
            .collect();
        println!("  Iteration {}: {}", iteration, formatted.join(" "));
    })
    .expect("Clustering failed");

    println!(
        "\nFinished after {} iterations (converged: {}), cost = {:.4}",
        result.n_iterations, result.converged, result.cost
    );

    println!("\nLearned centroids:");
    for (i, centroid) in result.centroids.iter().enumerate() {
        println!("  Centroid {}: ({:.4}, {:.4})", i, centroid.x, centroid.y);
    }
    println!();

    // Same clustering through the model API
    let mut kmeans = KMeans::with_config(config);
    let labels = kmeans.fit_predict(&points).expect("Training failed");

    let mut cluster_counts = vec![0usize; n_clusters];
    for &label in &labels {
        cluster_counts[label] += 1;
    }

    println!("Cluster distribution:");
    for (i, count) in cluster_counts.iter().enumerate() {
        println!(
            "  Cluster {}: {} samples ({:.1}%)",
            i,
            count,
            (*count as f64 / n_samples as f64) * 100.0
        );
    }
    println!();

    println!("First 10 sample assignments:");
    for (i, point) in points.iter().take(10).enumerate() {
        println!(
            "  Sample {} at ({:.2}, {:.2}) -> Cluster {}",
            i, point.x, point.y, labels[i]
        );
    }

    println!("\n=== Done! ===");
}
