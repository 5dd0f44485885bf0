//! How many records fit on screen at once.

/// Reports the current batch size for the presenter.
pub trait CapacityProbe {
    /// Records that fill the visible area. Never 0.
    fn capacity(&self) -> usize;
}

/// Fixed-size batch, for tests and non-interactive output.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub usize);

impl CapacityProbe for FixedProbe {
    fn capacity(&self) -> usize {
        self.0.max(1)
    }
}

/// Grid of equally sized tiles in a viewport.
///
/// Columns are whole tiles that fit across; rows round up so a partly
/// visible row is filled too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridProbe {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl GridProbe {
    #[must_use]
    pub const fn columns(&self) -> u32 {
        let columns = self.viewport_width / nonzero(self.tile_width);
        if columns == 0 { 1 } else { columns }
    }

    #[must_use]
    pub const fn rows(&self) -> u32 {
        let rows = self.viewport_height.div_ceil(nonzero(self.tile_height));
        if rows == 0 { 1 } else { rows }
    }

    /// Same tiles, new viewport.
    #[must_use]
    pub const fn resized(self, viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            ..self
        }
    }
}

const fn nonzero(value: u32) -> u32 {
    if value == 0 { 1 } else { value }
}

impl CapacityProbe for GridProbe {
    fn capacity(&self) -> usize {
        (self.columns() as usize).saturating_mul(self.rows() as usize)
    }
}
