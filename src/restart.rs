//! Best-of-N restarts.
//!
//! Lloyd's algorithm only finds a local optimum that depends on the seed
//! points. Running it several times and keeping the cheapest clustering is
//! the usual remedy; it sits outside the engine and only calls [`run`].

use crate::algorithm::{run, KMeansResult};
use crate::config::KMeansConfig;
use crate::error::{KMeansError, Result};
use crate::point::Point;
use tracing::debug;

/// Run k-means `tries` times and keep the lowest-cost result.
///
/// With a fixed seed `s`, try `i` runs with seed `s + i` (wrapping), so the
/// whole search is reproducible. Without a seed every try draws fresh
/// entropy. On equal cost the earlier try wins.
pub fn best_of(points: &[Point], config: &KMeansConfig, tries: usize) -> Result<KMeansResult> {
    if tries == 0 {
        return Err(KMeansError::InvalidInput(
            "tries must be greater than 0".to_string(),
        ));
    }

    let mut best: Option<KMeansResult> = None;

    for attempt in 0..tries {
        let mut try_config = config.clone();
        try_config.seed = config.seed.map(|s| s.wrapping_add(attempt as u64));

        let result = run(points, &try_config)?;
        debug!(
            attempt = attempt + 1,
            tries,
            cost = result.cost,
            n_iterations = result.n_iterations,
            "k-means restart finished"
        );

        match &best {
            Some(current) if current.cost <= result.cost => {}
            _ => best = Some(result),
        }
    }

    best.ok_or_else(|| KMeansError::InvalidInput("no restart produced a result".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_points() -> Vec<Point> {
        (0..120)
            .map(|i| Point::new((i % 12) as f64 + (i / 40) as f64 * 20.0, (i / 12) as f64))
            .collect()
    }

    #[test]
    fn test_best_of_zero_tries() {
        let result = best_of(&grid_points(), &KMeansConfig::new(3), 0);
        assert!(matches!(result, Err(KMeansError::InvalidInput(_))));
    }

    #[test]
    fn test_best_of_single_try_matches_run() {
        let points = grid_points();
        let config = KMeansConfig::new(3).with_seed(21);

        let best = best_of(&points, &config, 1).unwrap();
        let single = run(&points, &config).unwrap();

        assert_eq!(best, single);
    }

    #[test]
    fn test_best_of_never_worse_than_any_try() {
        let points = grid_points();
        let config = KMeansConfig::new(4).with_seed(100);
        let tries = 6;

        let best = best_of(&points, &config, tries).unwrap();

        for attempt in 0..tries as u64 {
            let single = run(&points, &config.clone().with_seed(100 + attempt)).unwrap();
            assert!(best.cost <= single.cost);
        }
    }

    #[test]
    fn test_best_of_propagates_invalid_input() {
        let points = grid_points();
        let result = best_of(&points, &KMeansConfig::new(points.len() + 1), 3);
        assert!(matches!(result, Err(KMeansError::InvalidInput(_))));
    }
}
