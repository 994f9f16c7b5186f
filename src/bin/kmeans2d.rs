//! Cluster 2D points read from a text file.
//!
//! The input holds one point per line as `x,y`, optionally wrapped in
//! parentheses. Blank lines and lines starting with `#` are skipped.
//!
//! Usage: `kmeans2d <K> <FILE> [MAX_ITERS] [--tries N] [--seed S]`
//!
//! The iteration budget may also be given as `--max-iters N`; it defaults to 200.
//!
//! Set `RUST_LOG=debug` to see the centroids after every iteration.

use anyhow::{bail, Context, Result};
use clap::Parser;
use lloyd_kmeans::{best_of, EmptyClusterPolicy, KMeansConfig, Point};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kmeans2d")]
#[command(about = "Lloyd's k-means clustering of 2D points")]
struct Args {
    /// Number of clusters.
    k: usize,

    /// File with one `x,y` point per line.
    file: PathBuf,

    /// Iteration budget per run.
    #[arg(value_name = "MAX_ITERS", conflicts_with = "max_iters")]
    iters: Option<usize>,

    /// Iteration budget per run, as a flag.
    #[arg(long)]
    max_iters: Option<usize>,

    /// Number of restarts; the lowest-cost clustering is kept.
    #[arg(long, default_value = "1")]
    tries: usize,

    /// Seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop once the total centroid shift is at most this value instead of
    /// waiting for an exact fixed point.
    #[arg(long)]
    tol: Option<f64>,

    /// Reseed empty clusters with a random point instead of keeping their
    /// previous centroid.
    #[arg(long)]
    reseed_empty: bool,
}

fn parse_point(line: &str) -> Result<Point> {
    let trimmed = line.trim().trim_start_matches('(').trim_end_matches(')');
    let Some((x, y)) = trimmed.split_once(',') else {
        bail!("expected `x,y`, got {:?}", line);
    };

    let x: f64 = x.trim().parse().with_context(|| format!("bad x coordinate {:?}", x))?;
    let y: f64 = y.trim().parse().with_context(|| format!("bad y coordinate {:?}", y))?;
    Ok(Point::new(x, y))
}

fn read_points<R: BufRead>(reader: R) -> Result<Vec<Point>> {
    let mut points = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }
        let point = parse_point(content).with_context(|| format!("line {}", idx + 1))?;
        points.push(point);
    }

    Ok(points)
}

fn read_points_file(path: &Path) -> Result<Vec<Point>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_points(BufReader::new(file)).with_context(|| format!("reading {}", path.display()))
}

const DEFAULT_MAX_ITERS: usize = 200;

impl Args {
    fn max_iters(&self) -> usize {
        self.iters.or(self.max_iters).unwrap_or(DEFAULT_MAX_ITERS)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let points = read_points_file(&args.file)?;
    info!("Loaded {} points from {}", points.len(), args.file.display());

    let mut config = KMeansConfig::new(args.k).with_max_iters(args.max_iters());
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(tol) = args.tol {
        config = config.with_tol(tol);
    }
    if args.reseed_empty {
        config = config.with_empty_cluster_policy(EmptyClusterPolicy::Reseed);
    }

    let result = best_of(&points, &config, args.tries).context("k-means failed")?;

    for (cluster_idx, members) in result.clusters.iter().enumerate() {
        for point in members {
            println!("{}===>  cluster_{}", point, cluster_idx + 1);
        }
    }
    println!(
        "cost: {} ({} iterations, {})",
        result.cost,
        result.n_iterations,
        if result.converged { "converged" } else { "iteration cap reached" }
    );

    Ok(())
}
