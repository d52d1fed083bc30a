use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::config::{DampingOrder, SimulationConfig};
use crate::error::{SimError, SimResult};
use crate::grid::HeightGrid;
use crate::mapping::WorldMapping;
use crate::ripple::{apply_ripple, RainGenerator};

/// Spring/damping height-field water surface.
///
/// The host drives it once per frame: any number of ripple injections,
/// then `step()`, then a readback of `heights()` into its own mesh.
#[wasm_bindgen]
pub struct HeightFieldSimulator {
    grid: HeightGrid,
    /// Damped neighbor force per cell, computed before any cell moves
    forces: Vec<f32>,
    mapping: WorldMapping,
    rain: RainGenerator,
    k: f32,
    damping: f32,
    dt: f32,
    damping_order: DampingOrder,
    steps: u64,
}

#[wasm_bindgen]
impl HeightFieldSimulator {
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: usize,
        height: usize,
        world_width: f32,
        world_height: f32,
        k: f32,
        damping: f32,
        dt: f32,
    ) -> Result<HeightFieldSimulator, JsError> {
        let config = SimulationConfig {
            width,
            height,
            world_width,
            world_height,
            k,
            damping,
            dt,
            ..SimulationConfig::default()
        };
        Ok(Self::create(config)?)
    }

    #[wasm_bindgen]
    pub fn from_config(config: &SimulationConfig) -> Result<HeightFieldSimulator, JsError> {
        Ok(Self::create(*config)?)
    }

    /// Advance the surface by one `dt` (call once per frame)
    #[wasm_bindgen]
    pub fn step(&mut self) {
        let width = self.grid.width();
        let height = self.grid.height();
        let k = self.k;
        let damping = self.damping;
        let dt = self.dt;

        // Every force is read from the pre-step heights
        let heights = self.grid.heights();
        for j in 0..height {
            for i in 0..width {
                let idx = j * width + i;
                let own = heights[idx];
                let force: f32 = self
                    .grid
                    .neighbors(i, j)
                    .map(|n| k * (heights[n] - own))
                    .sum();
                self.forces[idx] = force * damping;
            }
        }

        let damp_velocity = self.damping_order == DampingOrder::ForceAndVelocity;
        let (heights, velocities) = self.grid.buffers_mut();
        for ((h, v), &force) in heights
            .iter_mut()
            .zip(velocities.iter_mut())
            .zip(&self.forces)
        {
            *v += force * dt;
            *h += *v * dt;
            if damp_velocity {
                *v *= damping;
            }
        }

        self.steps += 1;
    }

    /// Run `count` steps back to back (catch up after dropped frames)
    #[wasm_bindgen]
    pub fn step_n(&mut self, count: u32) {
        for _ in 0..count {
            self.step();
        }
    }

    /// Add a cosine bump centered on fractional grid coordinates.
    ///
    /// A non-positive radius leaves the grid untouched.
    ///
    /// # Returns
    /// Number of cells changed
    #[wasm_bindgen]
    pub fn inject_ripple(
        &mut self,
        center_x: f32,
        center_y: f32,
        radius: f32,
        strength: f32,
    ) -> usize {
        apply_ripple(&mut self.grid, center_x, center_y, radius, strength)
    }

    /// Ripple at a world-space impact point, e.g. a pointer pick on the
    /// host's water mesh. `radius` is still measured in grid cells.
    ///
    /// The mesh must be centered on the origin and span exactly
    /// `world_width x world_height` for picks to land where they were made.
    #[wasm_bindgen]
    pub fn inject_ripple_world(
        &mut self,
        world_x: f32,
        world_z: f32,
        radius: f32,
        strength: f32,
    ) -> usize {
        let center = self.mapping.world_to_grid(Vec2::new(world_x, world_z));
        self.inject_ripple(center.x, center.y, radius, strength)
    }

    /// Scatter `drops` random raindrops over the surface
    #[wasm_bindgen]
    pub fn rain(&mut self, drops: u32) -> usize {
        let touched = self.rain.rain(&mut self.grid, drops);
        log::trace!("rain: {} drops touched {} cells", drops, touched);
        touched
    }

    #[wasm_bindgen]
    pub fn reseed_rain(&mut self, seed: u64) {
        self.rain.reseed(seed);
    }

    /// Flatten the surface and stop all motion
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.grid.reset();
        self.steps = 0;
        log::debug!("simulator reset");
    }

    // --- Readback ---

    #[wasm_bindgen(js_name = read_height)]
    pub fn read_height_js(&self, i: usize, j: usize) -> Result<f32, JsError> {
        Ok(self.read_height(i, j)?)
    }

    #[wasm_bindgen(js_name = read_velocity)]
    pub fn read_velocity_js(&self, i: usize, j: usize) -> Result<f32, JsError> {
        Ok(self.read_velocity(i, j)?)
    }

    /// Copy of all heights, row-major
    #[wasm_bindgen(js_name = heights)]
    pub fn heights_vec(&self) -> Vec<f32> {
        self.grid.heights().to_vec()
    }

    #[wasm_bindgen(js_name = velocities)]
    pub fn velocities_vec(&self) -> Vec<f32> {
        self.grid.velocities().to_vec()
    }

    /// Copy of all heights as a JS typed array
    #[wasm_bindgen]
    pub fn heights_array(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(self.grid.heights())
    }

    /// Pointer to the height buffer (`width * height` floats) for zero-copy
    /// reads from wasm memory. Only valid until the next call that mutates
    /// the simulator.
    #[wasm_bindgen]
    pub fn heights_ptr(&self) -> *const f32 {
        self.grid.heights().as_ptr()
    }

    #[wasm_bindgen(js_name = copy_heights_into)]
    pub fn copy_heights_into_js(&self, out: &mut [f32]) -> Result<(), JsError> {
        Ok(self.copy_heights_into(out)?)
    }

    /// Write heights into an interleaved vertex buffer at
    /// `index * stride + offset`. For a plain `[x, y, z]` position buffer
    /// whose plane is later rotated upright, use `stride = 3, offset = 2`.
    #[wasm_bindgen(js_name = write_vertex_heights)]
    pub fn write_vertex_heights_js(
        &self,
        positions: &mut [f32],
        stride: usize,
        offset: usize,
    ) -> Result<(), JsError> {
        Ok(self.write_vertex_heights(positions, stride, offset)?)
    }

    /// Grid `(x, y)` for a world `(x, z)`
    #[wasm_bindgen(js_name = world_to_grid)]
    pub fn world_to_grid_js(&self, world_x: f32, world_z: f32) -> Vec<f32> {
        self.world_to_grid(Vec2::new(world_x, world_z)).to_array().to_vec()
    }

    /// World `(x, z)` for a grid `(x, y)`
    #[wasm_bindgen(js_name = grid_to_world)]
    pub fn grid_to_world_js(&self, grid_x: f32, grid_y: f32) -> Vec<f32> {
        self.grid_to_world(Vec2::new(grid_x, grid_y)).to_array().to_vec()
    }

    // --- Diagnostics ---

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[wasm_bindgen(getter)]
    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Sum of all heights. Neighbor forces cancel pairwise, so this only
    /// changes through ripple injection.
    #[wasm_bindgen]
    pub fn total_height(&self) -> f32 {
        self.grid.heights().iter().sum()
    }

    /// Sum of squared heights
    #[wasm_bindgen]
    pub fn energy(&self) -> f32 {
        self.grid.heights().iter().map(|h| h * h).sum()
    }

    /// Largest absolute height
    #[wasm_bindgen]
    pub fn max_amplitude(&self) -> f32 {
        self.grid
            .heights()
            .iter()
            .fold(0.0_f32, |max, h| max.max(h.abs()))
    }

    /// False once any height or velocity has become NaN or infinite
    #[wasm_bindgen]
    pub fn is_finite(&self) -> bool {
        self.grid.heights().iter().all(|h| h.is_finite())
            && self.grid.velocities().iter().all(|v| v.is_finite())
    }
}

// --- Rust API ---

impl HeightFieldSimulator {
    /// Validate `config` and allocate a flat, motionless surface.
    pub fn create(config: SimulationConfig) -> SimResult<Self> {
        if let Err(err) = config.validate() {
            log::warn!("rejected simulator config: {}", err);
            return Err(err);
        }

        log::info!(
            "height field {}x{} over {}x{} world units (k={}, damping={}, dt={}, {:?})",
            config.width,
            config.height,
            config.world_width,
            config.world_height,
            config.k,
            config.damping,
            config.dt,
            config.damping_order
        );

        Ok(Self {
            grid: HeightGrid::new(config.width, config.height),
            forces: vec![0.0; config.cell_count()],
            mapping: WorldMapping::new(
                config.width,
                config.height,
                config.world_width,
                config.world_height,
            ),
            rain: RainGenerator::new(config.rain_seed),
            k: config.k,
            damping: config.damping,
            dt: config.dt,
            damping_order: config.damping_order,
            steps: 0,
        })
    }

    pub fn read_height(&self, i: usize, j: usize) -> SimResult<f32> {
        self.grid.height_at(i, j)
    }

    pub fn read_velocity(&self, i: usize, j: usize) -> SimResult<f32> {
        self.grid.velocity_at(i, j)
    }

    pub fn heights(&self) -> &[f32] {
        self.grid.heights()
    }

    pub fn velocities(&self) -> &[f32] {
        self.grid.velocities()
    }

    /// Copy heights into `out`, which must hold exactly `width * height`
    /// floats.
    pub fn copy_heights_into(&self, out: &mut [f32]) -> SimResult<()> {
        let heights = self.grid.heights();
        if out.len() != heights.len() {
            return Err(SimError::BufferLength {
                expected: heights.len(),
                actual: out.len(),
            });
        }
        out.copy_from_slice(heights);
        Ok(())
    }

    pub fn write_vertex_heights(
        &self,
        positions: &mut [f32],
        stride: usize,
        offset: usize,
    ) -> SimResult<()> {
        if offset >= stride {
            return Err(SimError::VertexLayout { stride, offset });
        }

        let heights = self.grid.heights();
        // The last vertex may omit attributes after the height. A stride
        // too large to address is never satisfiable.
        let minimum = heights
            .len()
            .checked_mul(stride)
            .map(|required| required - (stride - offset - 1))
            .ok_or(SimError::BufferLength {
                expected: usize::MAX,
                actual: positions.len(),
            })?;
        if positions.len() < minimum {
            return Err(SimError::BufferLength {
                expected: minimum,
                actual: positions.len(),
            });
        }

        for (idx, &h) in heights.iter().enumerate() {
            positions[idx * stride + offset] = h;
        }
        Ok(())
    }

    pub fn world_to_grid(&self, world: Vec2) -> Vec2 {
        self.mapping.world_to_grid(world)
    }

    pub fn grid_to_world(&self, grid: Vec2) -> Vec2 {
        self.mapping.grid_to_world(grid)
    }

    pub fn config(&self) -> SimulationConfig {
        let world = self.mapping.world_size();
        SimulationConfig {
            width: self.grid.width(),
            height: self.grid.height(),
            world_width: world.x,
            world_height: world.y,
            k: self.k,
            damping: self.damping,
            dt: self.dt,
            damping_order: self.damping_order,
            ..SimulationConfig::default()
        }
    }
}
