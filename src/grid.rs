use crate::error::{SimError, SimResult};

/// Row-major height and velocity storage for the water surface.
///
/// Cell `(i, j)` lives at `j * width + i`: `i` runs along x, `j` along y.
/// Both buffers always hold `width * height` samples.
#[derive(Clone, Debug)]
pub struct HeightGrid {
    width: usize,
    height: usize,
    heights: Vec<f32>,
    velocities: Vec<f32>,
}

impl HeightGrid {
    /// Zero-filled grid. Callers validate dimensions beforehand.
    pub fn new(width: usize, height: usize) -> Self {
        let cell_count = width * height;
        Self {
            width,
            height,
            heights: vec![0.0; cell_count],
            velocities: vec![0.0; cell_count],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Flat index of `(i, j)`, or `OutOfRange`
    pub fn index(&self, i: usize, j: usize) -> SimResult<usize> {
        if i >= self.width || j >= self.height {
            return Err(SimError::OutOfRange {
                i,
                j,
                width: self.width,
                height: self.height,
            });
        }
        Ok(j * self.width + i)
    }

    pub fn height_at(&self, i: usize, j: usize) -> SimResult<f32> {
        self.index(i, j).map(|idx| self.heights[idx])
    }

    pub fn velocity_at(&self, i: usize, j: usize) -> SimResult<f32> {
        self.index(i, j).map(|idx| self.velocities[idx])
    }

    pub fn set_height(&mut self, i: usize, j: usize, value: f32) -> SimResult<()> {
        let idx = self.index(i, j)?;
        self.heights[idx] = value;
        Ok(())
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    /// Both buffers at once, for the integrator
    pub fn buffers_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.heights, &mut self.velocities)
    }

    pub fn heights_mut(&mut self) -> &mut [f32] {
        &mut self.heights
    }

    /// Flat indices of the axis-aligned neighbors of `(i, j)` that exist.
    ///
    /// Corners yield 2, edges 3, interior cells 4. Nothing wraps.
    pub fn neighbors(&self, i: usize, j: usize) -> impl Iterator<Item = usize> {
        let width = self.width;
        let left = (i > 0).then(|| j * width + i - 1);
        let right = (i + 1 < width).then(|| j * width + i + 1);
        let up = (j > 0).then(|| (j - 1) * width + i);
        let down = (j + 1 < self.height).then(|| (j + 1) * width + i);

        [left, right, up, down].into_iter().flatten()
    }

    pub fn reset(&mut self) {
        self.heights.fill(0.0);
        self.velocities.fill(0.0);
    }
}
