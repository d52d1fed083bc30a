use std::f32::consts::FRAC_PI_2;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::grid::HeightGrid;

/// Largest radius a raindrop can have, in grid cells
pub const MAX_DROP_RADIUS: f32 = 1.5;
/// Largest height a raindrop can add
pub const MAX_DROP_STRENGTH: f32 = 2.0;

/// Add a cosine-shaped bump centered on fractional grid coordinates.
///
/// Every cell with squared distance `< radius²` from the center gains
/// `strength * cos(dist / radius * π/2)`; all other cells are untouched.
/// A radius that is not strictly positive touches nothing.
///
/// # Returns
/// Number of cells that were modified
pub fn apply_ripple(
    grid: &mut HeightGrid,
    center_x: f32,
    center_y: f32,
    radius: f32,
    strength: f32,
) -> usize {
    if radius.is_nan() || radius <= 0.0 {
        return 0;
    }

    let width = grid.width();
    let height = grid.height();
    let radius_sq = radius * radius;
    let heights = grid.heights_mut();
    let mut touched = 0;

    for j in 0..height {
        let dy = j as f32 - center_y;
        for i in 0..width {
            let dx = i as f32 - center_x;
            let dist_sq = dx * dx + dy * dy;

            if dist_sq < radius_sq {
                heights[j * width + i] += strength * (dist_sq.sqrt() / radius * FRAC_PI_2).cos();
                touched += 1;
            }
        }
    }

    touched
}

/// One randomized raindrop impact
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Raindrop {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
    pub strength: f32,
}

/// Deterministic source of raindrops scattered over a grid.
#[derive(Clone, Debug)]
pub struct RainGenerator {
    rng: SmallRng,
}

impl RainGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// Next drop: center anywhere on the grid, radius in `(0, 1.5]`,
    /// strength in `(0, 2]`.
    pub fn next_drop(&mut self, width: usize, height: usize) -> Raindrop {
        let center_x = self.rng.gen_range(0.0..width as f32);
        let center_y = self.rng.gen_range(0.0..height as f32);
        // Flip half-open [0, max) ranges to (0, max]
        let radius = MAX_DROP_RADIUS - self.rng.gen_range(0.0..MAX_DROP_RADIUS);
        let strength = MAX_DROP_STRENGTH - self.rng.gen_range(0.0..MAX_DROP_STRENGTH);

        Raindrop {
            center_x,
            center_y,
            radius,
            strength,
        }
    }

    /// Drop `count` raindrops onto the grid.
    ///
    /// # Returns
    /// Total number of cell updates across all drops
    pub fn rain(&mut self, grid: &mut HeightGrid, count: u32) -> usize {
        let (width, height) = (grid.width(), grid.height());
        let mut touched = 0;

        for _ in 0..count {
            let drop = self.next_drop(width, height);
            touched += apply_ripple(
                grid,
                drop.center_x,
                drop.center_y,
                drop.radius,
                drop.strength,
            );
        }

        touched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ripple_locality() {
        let mut grid = HeightGrid::new(12, 9);
        let (cx, cy, radius, strength) = (4.3, 5.6, 2.7, 3.0);
        let touched = apply_ripple(&mut grid, cx, cy, radius, strength);

        let mut expected_touched = 0;
        for j in 0..9 {
            for i in 0..12 {
                let dx = i as f32 - cx;
                let dy = j as f32 - cy;
                let dist_sq = dx * dx + dy * dy;
                let h = grid.height_at(i, j).unwrap();

                if dist_sq < radius * radius {
                    expected_touched += 1;
                    let expected = strength * (dist_sq.sqrt() / radius * FRAC_PI_2).cos();
                    assert!(
                        (h - expected).abs() < 1e-6,
                        "cell ({}, {}) = {}, expected {}",
                        i,
                        j,
                        h,
                        expected
                    );
                } else {
                    assert_eq!(h, 0.0, "cell ({}, {}) outside radius changed", i, j);
                }
            }
        }
        assert_eq!(touched, expected_touched);
        assert!(touched > 0);
    }

    #[test]
    fn test_ripple_is_additive() {
        let mut grid = HeightGrid::new(10, 10);
        grid.set_height(5, 5, 1.5).unwrap();
        apply_ripple(&mut grid, 5.0, 5.0, 3.0, 2.0);
        // cos(0) at the center
        assert!((grid.height_at(5, 5).unwrap() - 3.5).abs() < 1e-6);

        apply_ripple(&mut grid, 5.0, 5.0, 3.0, 2.0);
        assert!((grid.height_at(5, 5).unwrap() - 5.5).abs() < 1e-6);
    }

    #[test]
    fn test_ripple_boundary_is_exclusive() {
        let mut grid = HeightGrid::new(10, 10);
        // (7, 5) sits exactly 2 cells away
        apply_ripple(&mut grid, 5.0, 5.0, 2.0, 1.0);
        assert_eq!(grid.height_at(7, 5).unwrap(), 0.0);
        assert!(grid.height_at(6, 5).unwrap() > 0.0);
    }

    #[test]
    fn test_degenerate_radius_is_noop() {
        for radius in [0.0, -0.0, -3.0, f32::NAN] {
            let mut grid = HeightGrid::new(8, 8);
            let touched = apply_ripple(&mut grid, 4.0, 4.0, radius, 5.0);
            assert_eq!(touched, 0);
            assert!(grid.heights().iter().all(|&h| h == 0.0));
        }
    }

    #[test]
    fn test_ripple_off_grid_center() {
        let mut grid = HeightGrid::new(10, 10);
        // Only the corner is within reach
        let touched = apply_ripple(&mut grid, -1.0, -1.0, 1.6, 1.0);
        assert_eq!(touched, 1);
        assert!(grid.height_at(0, 0).unwrap() > 0.0);
    }

    #[test]
    fn test_drops_within_bounds() {
        let mut rain = RainGenerator::new(7);
        for _ in 0..1000 {
            let drop = rain.next_drop(50, 30);
            assert!((0.0..50.0).contains(&drop.center_x));
            assert!((0.0..30.0).contains(&drop.center_y));
            assert!(drop.radius > 0.0 && drop.radius <= MAX_DROP_RADIUS);
            assert!(drop.strength > 0.0 && drop.strength <= MAX_DROP_STRENGTH);
        }
    }

    #[test]
    fn test_rain_is_reproducible() {
        let mut a = HeightGrid::new(20, 20);
        let mut b = HeightGrid::new(20, 20);
        let mut rain_a = RainGenerator::new(42);
        let mut rain_b = RainGenerator::new(1);
        rain_b.reseed(42);

        rain_a.rain(&mut a, 25);
        rain_b.rain(&mut b, 25);

        assert_eq!(a.heights(), b.heights());
        // Rain only ever adds positive bumps
        assert!(a.heights().iter().all(|&h| h >= 0.0));
    }
}
