//! Data generation utilities for testing.

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::geometry::{Aabb, Point};

/// Seeded random points in the given square.
pub fn random_points(car: usize, min: f32, max: f32, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..car)
        .map(|_| [rng.gen_range(min..=max), rng.gen_range(min..=max)])
        .collect()
}

/// Seeded random boxes with centers in the given square and modest extents.
pub fn random_boxes(count: usize, min: f32, max: f32, seed: u64) -> Vec<Aabb> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let center = [rng.gen_range(min..=max), rng.gen_range(min..=max)];
            let half = [
                rng.gen_range(0.0..=(max - min) / 4.0),
                rng.gen_range(0.0..=(max - min) / 4.0),
            ];
            Aabb::of(
                [center[0] - half[0], center[1] - half[1]],
                [center[0] + half[0], center[1] + half[1]],
            )
        })
        .collect()
}

/// The four-point set used by the scenario tests: three points near the origin and one outlier.
pub fn corner_points() -> Vec<Point> {
    vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [5.0, 5.0]]
}
