use wasm_bindgen::prelude::*;

use crate::error::{SimError, SimResult};

/// Where the damping factor is applied during a step.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DampingOrder {
    /// Damp the neighbor force, integrate, then damp the velocity again.
    ForceAndVelocity = 0,
    /// Damp the neighbor force only. Velocity is never attenuated, so the
    /// surface keeps oscillating instead of settling.
    ForceOnly = 1,
}

/// Grid dimensions and physical parameters for one simulator instance.
///
/// Defaults match the 50x50 demo pond: a 50x50 world-unit plane, `k = 0.01`,
/// `damping = 0.99`, `dt = 0.7`.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Cells along x
    pub width: usize,
    /// Cells along y (world z)
    pub height: usize,
    /// World-space extent covered by the grid along x
    pub world_width: f32,
    /// World-space extent covered by the grid along z
    pub world_height: f32,
    /// Spring constant coupling each cell to its neighbors
    pub k: f32,
    /// Decay factor in (0, 1]
    pub damping: f32,
    /// Timestep per `step()`
    pub dt: f32,
    pub damping_order: DampingOrder,
    /// Seed for the rain generator
    pub rain_seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::with_size(50)
    }
}

#[wasm_bindgen]
impl SimulationConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// 50x50 pond
    #[wasm_bindgen]
    pub fn small() -> Self {
        Self::with_size(50)
    }

    /// 70x70 pond with stiffer springs
    #[wasm_bindgen]
    pub fn medium() -> Self {
        Self {
            k: 0.05,
            damping: 0.97,
            ..Self::with_size(70)
        }
    }

    /// 100x100 pond, heavily damped so rain settles quickly
    #[wasm_bindgen]
    pub fn large() -> Self {
        Self {
            k: 0.1,
            damping: 0.92,
            dt: 0.5,
            ..Self::with_size(100)
        }
    }

    /// Square grid of `size` cells spanning `size` world units.
    #[wasm_bindgen]
    pub fn with_size(size: usize) -> Self {
        Self {
            width: size,
            height: size,
            world_width: size as f32,
            world_height: size as f32,
            k: 0.01,
            damping: 0.99,
            dt: 0.7,
            damping_order: DampingOrder::ForceAndVelocity,
            rain_seed: 0x5EED,
        }
    }
}

impl SimulationConfig {
    /// Check every constraint a simulator relies on.
    pub fn validate(&self) -> SimResult<()> {
        if self.width < 2 {
            return Err(SimError::construction(format!(
                "width must be at least 2, got {}",
                self.width
            )));
        }
        if self.height < 2 {
            return Err(SimError::construction(format!(
                "height must be at least 2, got {}",
                self.height
            )));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(SimError::construction(format!(
                "{}x{} grid is too large",
                self.width, self.height
            )));
        }
        if !(self.world_width.is_finite() && self.world_width > 0.0) {
            return Err(SimError::construction(format!(
                "world_width must be positive, got {}",
                self.world_width
            )));
        }
        if !(self.world_height.is_finite() && self.world_height > 0.0) {
            return Err(SimError::construction(format!(
                "world_height must be positive, got {}",
                self.world_height
            )));
        }
        if !(self.k.is_finite() && self.k > 0.0) {
            return Err(SimError::construction(format!(
                "spring constant k must be positive, got {}",
                self.k
            )));
        }
        // NaN fails both comparisons
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(SimError::construction(format!(
                "damping must be in (0, 1], got {}",
                self.damping
            )));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::construction(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}
