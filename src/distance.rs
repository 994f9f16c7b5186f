use crate::config::Convergence;
use crate::error::{KMeansError, Result};
use crate::point::Point;

/// Squared Euclidean distance between two points.
///
/// No square root is taken: the ordering is the same, and costs built from
/// it are reported in squared units.
#[inline]
pub fn distance(a: &Point, b: &Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Index of the centroid closest to `point`.
///
/// Ties go to the lowest index: a later centroid only wins when it is
/// strictly closer than the running minimum.
pub fn nearest_centroid_index(point: &Point, centroids: &[Point]) -> Result<usize> {
    if centroids.is_empty() {
        return Err(KMeansError::NoCentroids);
    }

    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;

    for (idx, centroid) in centroids.iter().enumerate() {
        let dist = distance(point, centroid);
        if dist < best_dist {
            best_dist = dist;
            best_idx = idx;
        }
    }

    Ok(best_idx)
}

/// Compute centroid shift (sum of L2 norms of centroid movements)
pub fn compute_centroid_shift(old_centroids: &[Point], new_centroids: &[Point]) -> f64 {
    old_centroids
        .iter()
        .zip(new_centroids)
        .map(|(old_c, new_c)| distance(old_c, new_c).sqrt())
        .sum()
}

/// Whether two successive centroid sets count as converged under `mode`.
///
/// Lists of different length never converge.
pub fn converged(previous: &[Point], new: &[Point], mode: Convergence) -> bool {
    if previous.len() != new.len() {
        return false;
    }

    match mode {
        // Exact float equality: stops only once the means stabilize bit-for-bit.
        Convergence::Exact => previous
            .iter()
            .zip(new)
            .all(|(a, b)| a.x == b.x && a.y == b.y),
        Convergence::Tolerance(tol) => compute_centroid_shift(previous, new) <= tol,
    }
}
