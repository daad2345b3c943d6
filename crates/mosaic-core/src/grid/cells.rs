//! The 32x32 cell grid and its flood fill.

use super::palette::Rgb;

/// Cells per side.
pub const GRID_SIZE: usize = 32;

/// A cell's content: `None` is empty (transparent).
pub type Cell = Option<Rgb>;

/// Fixed-size grid of cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    cells: [Cell; GRID_SIZE * GRID_SIZE],
}

impl Default for PixelGrid {
    fn default() -> Self {
        Self {
            cells: [None; GRID_SIZE * GRID_SIZE],
        }
    }
}

impl PixelGrid {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn index(col: usize, row: usize) -> Option<usize> {
        (col < GRID_SIZE && row < GRID_SIZE).then(|| row * GRID_SIZE + col)
    }

    /// `None` when out of range, `Some(cell)` otherwise.
    pub fn get(&self, col: usize, row: usize) -> Option<Cell> {
        Self::index(col, row).map(|i| self.cells[i])
    }

    /// Write one cell. Returns whether the grid changed; out-of-range
    /// coordinates change nothing.
    pub fn set(&mut self, col: usize, row: usize, value: Cell) -> bool {
        match Self::index(col, row) {
            Some(i) if self.cells[i] != value => {
                self.cells[i] = value;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.cells = [None; GRID_SIZE * GRID_SIZE];
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Every non-empty cell as `(col, row, color)`, row by row.
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize, Rgb)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|color| (i % GRID_SIZE, i / GRID_SIZE, color)))
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(GRID_SIZE)
    }

    /// Recolor the 4-connected region containing `(col, row)`.
    ///
    /// Every cell reachable from the seed through orthogonal neighbors holding
    /// the seed's original value becomes `replacement`. Returns the number of
    /// cells changed: zero when the seed is out of range or already holds
    /// `replacement`.
    pub fn flood_fill(&mut self, col: usize, row: usize, replacement: Cell) -> usize {
        let Some(seed) = Self::index(col, row) else {
            return 0;
        };
        let target = self.cells[seed];
        if target == replacement {
            return 0;
        }

        // Cells are recolored when pushed, so each is visited once.
        let mut stack: Vec<(usize, usize)> = Vec::with_capacity(GRID_SIZE * 4);
        self.cells[seed] = replacement;
        stack.push((col, row));
        let mut changed = 1;

        while let Some((x, y)) = stack.pop() {
            let neighbors = [
                x.checked_sub(1).map(|nx| (nx, y)),
                Some((x + 1, y)),
                y.checked_sub(1).map(|ny| (x, ny)),
                Some((x, y + 1)),
            ];
            for (nx, ny) in neighbors.into_iter().flatten() {
                if let Some(i) = Self::index(nx, ny) {
                    if self.cells[i] == target {
                        self.cells[i] = replacement;
                        stack.push((nx, ny));
                        changed += 1;
                    }
                }
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::palette::PALETTE;

    const A: Rgb = PALETTE[1];
    const B: Rgb = PALETTE[2];

    #[test]
    fn test_new_grid_is_blank() {
        let grid = PixelGrid::new();
        assert!(grid.is_blank());
        assert_eq!(grid.rows().count(), GRID_SIZE);
        assert!(grid.rows().all(|r| r.len() == GRID_SIZE));
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = PixelGrid::new();
        assert!(grid.set(3, 4, Some(A)));
        assert!(!grid.set(3, 4, Some(A)));
        assert_eq!(grid.get(3, 4), Some(Some(A)));
        assert_eq!(grid.get(4, 3), Some(None));
        assert_eq!(grid.get(32, 0), None);
    }

    #[test]
    fn test_set_out_of_range() {
        let mut grid = PixelGrid::new();
        assert!(!grid.set(GRID_SIZE, 0, Some(A)));
        assert!(!grid.set(0, usize::MAX, Some(A)));
        assert!(grid.is_blank());
    }

    #[test]
    fn test_fill_blank_grid() {
        let mut grid = PixelGrid::new();
        assert_eq!(grid.flood_fill(10, 10, Some(A)), GRID_SIZE * GRID_SIZE);
        assert_eq!(grid.filled_count(), GRID_SIZE * GRID_SIZE);
    }

    #[test]
    fn test_fill_stops_at_boundary() {
        let mut grid = PixelGrid::new();
        // Vertical wall at column 5 splits the grid.
        for row in 0..GRID_SIZE {
            grid.set(5, row, Some(B));
        }
        let changed = grid.flood_fill(0, 0, Some(A));
        assert_eq!(changed, 5 * GRID_SIZE);
        assert_eq!(grid.get(4, 31), Some(Some(A)));
        assert_eq!(grid.get(5, 0), Some(Some(B)));
        assert_eq!(grid.get(6, 0), Some(None));
    }

    #[test]
    fn test_fill_from_corners() {
        for (col, row) in [(0, 0), (GRID_SIZE - 1, 0), (0, GRID_SIZE - 1), (GRID_SIZE - 1, GRID_SIZE - 1)] {
            let mut grid = PixelGrid::new();
            assert_eq!(grid.flood_fill(col, row, Some(A)), GRID_SIZE * GRID_SIZE);
        }
    }

    #[test]
    fn test_fill_two_regions_on_edges() {
        let mut grid = PixelGrid::new();
        // Wall along row 1 separates row 0 from the rest.
        for col in 0..GRID_SIZE {
            grid.set(col, 1, Some(B));
        }
        assert_eq!(grid.flood_fill(0, 0, Some(A)), GRID_SIZE);
        assert_eq!(grid.get(GRID_SIZE - 1, 0), Some(Some(A)));
        assert_eq!(grid.get(0, 2), Some(None));
        assert_eq!(grid.flood_fill(0, GRID_SIZE - 1, Some(A)), GRID_SIZE * (GRID_SIZE - 2));
        assert_eq!(grid.get(0, 1), Some(Some(B)));
    }

    #[test]
    fn test_get_far_out_of_range() {
        let grid = PixelGrid::new();
        assert_eq!(grid.get(usize::MAX, 0), None);
        assert_eq!(grid.get(0, usize::MAX), None);
        assert_eq!(grid.get(usize::MAX, usize::MAX), None);
    }

    #[test]
    fn test_fill_is_four_connected() {
        let mut grid = PixelGrid::new();
        // Diagonal neighbors do not connect.
        grid.set(0, 0, Some(A));
        grid.set(1, 1, Some(A));
        assert_eq!(grid.flood_fill(0, 0, Some(B)), 1);
        assert_eq!(grid.get(1, 1), Some(Some(A)));
    }

    #[test]
    fn test_fill_same_color_is_noop() {
        let mut grid = PixelGrid::new();
        grid.set(2, 2, Some(A));
        let before = grid.clone();
        assert_eq!(grid.flood_fill(2, 2, Some(A)), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_fill_can_erase_region() {
        let mut grid = PixelGrid::new();
        grid.set(0, 0, Some(A));
        grid.set(1, 0, Some(A));
        assert_eq!(grid.flood_fill(0, 0, None), 2);
        assert!(grid.is_blank());
    }

    #[test]
    fn test_filled_iterator() {
        let mut grid = PixelGrid::new();
        grid.set(31, 0, Some(A));
        grid.set(0, 1, Some(B));
        let cells: Vec<_> = grid.filled().collect();
        assert_eq!(cells, vec![(31, 0, A), (0, 1, B)]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::grid::palette::PALETTE;
    use proptest::prelude::*;

    fn any_cell() -> impl Strategy<Value = Cell> {
        prop_oneof![Just(None), (0..PALETTE.len()).prop_map(|i| Some(PALETTE[i]))]
    }

    fn any_grid() -> impl Strategy<Value = PixelGrid> {
        // Few distinct colors so regions are non-trivial.
        prop::collection::vec(
            prop_oneof![Just(None), Just(Some(PALETTE[0])), Just(Some(PALETTE[1]))],
            GRID_SIZE * GRID_SIZE,
        )
        .prop_map(|cells| {
            let mut grid = PixelGrid::new();
            for (i, c) in cells.into_iter().enumerate() {
                grid.set(i % GRID_SIZE, i / GRID_SIZE, c);
            }
            grid
        })
    }

    proptest! {
        /// Property: a second identical fill changes nothing.
        #[test]
        fn prop_fill_idempotent(
            grid in any_grid(),
            col in 0..GRID_SIZE,
            row in 0..GRID_SIZE,
            color in any_cell(),
        ) {
            let mut grid = grid;
            grid.flood_fill(col, row, color);
            let once = grid.clone();
            prop_assert_eq!(grid.flood_fill(col, row, color), 0);
            prop_assert_eq!(grid, once);
        }

        /// Property: cells outside the seed's region are untouched.
        #[test]
        fn prop_fill_only_touches_seed_value(
            grid in any_grid(),
            col in 0..GRID_SIZE,
            row in 0..GRID_SIZE,
        ) {
            let before = grid.clone();
            let mut grid = grid;
            let target = before.get(col, row).flatten();
            let replacement = Some(PALETTE[5]);
            grid.flood_fill(col, row, replacement);

            for y in 0..GRID_SIZE {
                for x in 0..GRID_SIZE {
                    let old = before.get(x, y).flatten();
                    let new = grid.get(x, y).flatten();
                    if old != new {
                        prop_assert_eq!(old, target);
                        prop_assert_eq!(new, replacement);
                    }
                }
            }
        }

        /// Property: out-of-range writes never change the grid.
        #[test]
        fn prop_out_of_range_set_is_noop(
            grid in any_grid(),
            col in GRID_SIZE..1000,
            row in 0usize..1000,
            color in any_cell(),
        ) {
            let mut grid = grid;
            let before = grid.clone();
            prop_assert!(!grid.set(col, row, color));
            prop_assert!(!grid.set(row % GRID_SIZE, col, color));
            prop_assert_eq!(grid, before);
        }
    }
}
