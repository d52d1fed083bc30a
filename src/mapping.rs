use glam::Vec2;

/// Translates between world space and fractional grid coordinates.
///
/// The display plane is assumed to be centered on the world origin and to
/// span exactly `world_size`. A world point at `-world_size / 2` lands on
/// grid coordinate 0, and the origin lands on `grid_size / 2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldMapping {
    world_size: Vec2,
    /// Grid cells per world unit on each axis
    scale: Vec2,
}

impl WorldMapping {
    pub fn new(grid_width: usize, grid_height: usize, world_width: f32, world_height: f32) -> Self {
        let grid_size = Vec2::new(grid_width as f32, grid_height as f32);
        let world_size = Vec2::new(world_width, world_height);
        Self {
            world_size,
            scale: grid_size / world_size,
        }
    }

    /// World `(x, z)` to grid `(x, y)`
    #[inline]
    pub fn world_to_grid(&self, world: Vec2) -> Vec2 {
        self.scale * (world + self.world_size / 2.0)
    }

    /// Grid `(x, y)` to world `(x, z)`
    #[inline]
    pub fn grid_to_world(&self, grid: Vec2) -> Vec2 {
        grid / self.scale - self.world_size / 2.0
    }

    pub fn world_size(&self) -> Vec2 {
        self.world_size
    }
}
