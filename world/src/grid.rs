//! Walkability grid and the world/grid coordinate transforms built on it.

use glam::Vec3;
use queen_of_shadows_core::CellCoord;

/// Number of cells along each axis of the square grid.
const GRID_SIZE: u32 = 11;

/// Side length of a single square tile expressed in world units.
const TILE_LENGTH: f32 = 1.0;

/// Cells blocked by the scripted obstacle layout.
const BLOCKED_CELLS: [CellCoord; 10] = [
    CellCoord::new(0, 0),
    CellCoord::new(0, 1),
    CellCoord::new(1, 0),
    CellCoord::new(4, 3),
    CellCoord::new(3, 4),
    CellCoord::new(7, 8),
    CellCoord::new(8, 8),
    CellCoord::new(8, 9),
    CellCoord::new(8, 10),
    CellCoord::new(10, 8),
];

/// Canonical description of the grid's coordinate frame.
///
/// Every transform in the world reads these values from one place so the
/// grid, the pathfinder, and the renderer can never disagree about where a
/// world position lands on the mask.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    size: u32,
    tile_length: f32,
    origin_offset: u32,
}

impl GridConfig {
    /// Creates a configuration with the offset anchored at the grid center.
    #[must_use]
    pub(crate) const fn centered(size: u32, tile_length: f32) -> Self {
        Self {
            size,
            tile_length,
            origin_offset: size / 2,
        }
    }

    /// Number of cells along each axis.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Side length of a single tile in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Index offset that maps the world origin to the grid's center cell.
    #[must_use]
    pub const fn origin_offset(&self) -> u32 {
        self.origin_offset
    }

    /// Maps a continuous ground-plane position to the nearest grid cell.
    ///
    /// Each horizontal axis is divided by the tile length and rounded half
    /// away from zero before the origin offset is added. Returns `None` when
    /// the result falls outside the grid on either axis.
    #[must_use]
    pub fn world_to_grid(&self, position: Vec3) -> Option<CellCoord> {
        let column = self.axis_to_index(position.x)?;
        let row = self.axis_to_index(position.z)?;
        Some(CellCoord::new(column, row))
    }

    /// Maps a grid cell back to the world-space center of that cell.
    ///
    /// The vertical axis is fixed at ground level.
    #[must_use]
    pub fn grid_to_world(&self, cell: CellCoord) -> Vec3 {
        let offset = self.origin_offset as f32;
        Vec3::new(
            (cell.column() as f32 - offset) * self.tile_length,
            0.0,
            (cell.row() as f32 - offset) * self.tile_length,
        )
    }

    fn axis_to_index(&self, value: f32) -> Option<u32> {
        // f32::round ties away from zero, matching the grid's frame.
        let index = (value / self.tile_length).round() as i64 + i64::from(self.origin_offset);
        if (0..i64::from(self.size)).contains(&index) {
            Some(index as u32)
        } else {
            None
        }
    }
}

/// Dense walkability mask covering the playable grid.
#[derive(Clone, Debug)]
pub(crate) struct WalkGrid {
    config: GridConfig,
    cells: Vec<bool>,
}

impl WalkGrid {
    /// Creates the standard grid with the scripted obstacle layout applied.
    pub(crate) fn with_scripted_obstacles() -> Self {
        Self::with_obstacles(&BLOCKED_CELLS)
    }

    /// Creates the standard grid with a caller-provided obstacle layout.
    pub(crate) fn with_obstacles(blocked: &[CellCoord]) -> Self {
        let mut grid = Self::open(GridConfig::centered(GRID_SIZE, TILE_LENGTH));
        for &cell in blocked {
            grid.block(cell);
        }
        grid
    }

    /// Creates a fully walkable grid for the provided configuration.
    pub(crate) fn open(config: GridConfig) -> Self {
        let side = usize::try_from(config.size()).unwrap_or(0);
        let capacity = side.checked_mul(side).unwrap_or(0);
        Self {
            config,
            cells: vec![true; capacity],
        }
    }

    pub(crate) fn block(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = false;
            }
        }
    }

    /// Reports whether the cell permits traversal.
    ///
    /// Out-of-bounds cells are never walkable, so the world behaves as if it
    /// were surrounded by impassable terrain.
    #[must_use]
    pub(crate) fn is_walkable(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .map_or(false, |index| self.cells.get(index).copied().unwrap_or(false))
    }

    #[must_use]
    pub(crate) const fn config(&self) -> GridConfig {
        self.config
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.config.size() && cell.row() < self.config.size() {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.config.size()).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_origin_maps_to_center_cell() {
        let config = GridConfig::centered(11, 1.0);
        assert_eq!(
            config.world_to_grid(Vec3::ZERO),
            Some(CellCoord::new(5, 5))
        );
    }

    #[test]
    fn negative_positions_map_to_valid_cells() {
        let config = GridConfig::centered(11, 1.0);
        assert_eq!(
            config.world_to_grid(Vec3::new(-5.0, 0.0, -5.0)),
            Some(CellCoord::new(0, 0))
        );
        assert_eq!(
            config.world_to_grid(Vec3::new(-0.4, 0.0, 0.4)),
            Some(CellCoord::new(5, 5))
        );
    }

    #[test]
    fn positions_outside_the_grid_map_to_none() {
        let config = GridConfig::centered(11, 1.0);
        assert_eq!(config.world_to_grid(Vec3::new(6.0, 0.0, 0.0)), None);
        assert_eq!(config.world_to_grid(Vec3::new(0.0, 0.0, -6.0)), None);
    }

    #[test]
    fn grid_round_trips_through_world_space() {
        let config = GridConfig::centered(11, 1.0);
        for column in 0..config.size() {
            for row in 0..config.size() {
                let cell = CellCoord::new(column, row);
                let world = config.grid_to_world(cell);
                assert_eq!(config.world_to_grid(world), Some(cell));
                assert_eq!(world.y, 0.0);
            }
        }
    }

    #[test]
    fn scripted_obstacles_are_blocked() {
        let grid = WalkGrid::with_scripted_obstacles();
        for cell in BLOCKED_CELLS {
            assert!(!grid.is_walkable(cell));
        }
        assert!(grid.is_walkable(CellCoord::new(5, 5)));
    }

    #[test]
    fn out_of_bounds_cells_are_not_walkable() {
        let grid = WalkGrid::with_scripted_obstacles();
        assert!(!grid.is_walkable(CellCoord::new(11, 0)));
        assert!(!grid.is_walkable(CellCoord::new(0, 11)));
        assert!(!grid.is_walkable(CellCoord::new(u32::MAX, 5)));
    }
}
