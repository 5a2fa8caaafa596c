use crate::grid::GridError;

/// Resolution and refinement settings for a [`crate::grid::UniformGrid`].
///
/// ```
/// # use raygrid::grid::GridConfig;
/// let config = GridConfig::default()
///     .with_resolution(8, 4)
///     .with_max_cell_objects(2)
///     .with_max_depth(1);
/// assert_eq!((config.nx, config.ny), (8, 4));
/// assert!(config.validate().is_ok());
/// assert!(config.with_resolution(0, 4).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    pub nx: usize,
    pub ny: usize,
    /// A cell holding more objects than this is split by `refine`.
    pub max_cell_objects: usize,
    pub sub_nx: usize,
    pub sub_ny: usize,
    /// How many levels of nested grids `refine` may create.
    pub max_depth: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            nx: 16,
            ny: 16,
            max_cell_objects: 8,
            sub_nx: 4,
            sub_ny: 4,
            max_depth: 2,
        }
    }
}

impl GridConfig {
    pub fn with_resolution(mut self, nx: usize, ny: usize) -> Self {
        self.nx = nx;
        self.ny = ny;
        self
    }

    pub fn with_max_cell_objects(mut self, max_cell_objects: usize) -> Self {
        self.max_cell_objects = max_cell_objects;
        self
    }

    pub fn with_subdivision(mut self, sub_nx: usize, sub_ny: usize) -> Self {
        self.sub_nx = sub_nx;
        self.sub_ny = sub_ny;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Settings for a grid nested one level below this one.
    pub fn child(&self) -> GridConfig {
        GridConfig {
            nx: self.sub_nx,
            ny: self.sub_ny,
            max_depth: self.max_depth.saturating_sub(1),
            ..*self
        }
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.nx == 0 || self.ny == 0 {
            return Err(GridError::ZeroResolution { nx: self.nx, ny: self.ny })
        }
        if self.max_depth > 0 && (self.sub_nx == 0 || self.sub_ny == 0) {
            return Err(GridError::ZeroResolution { nx: self.sub_nx, ny: self.sub_ny })
        }
        Ok(())
    }
}
