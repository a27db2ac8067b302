//! Toroidal Life grid and the generation-advance rule.

use crate::schema::{Cell, Pattern, PatternError, sample_population};

/// Finite Life universe whose edges wrap around.
///
/// The leftmost column neighbors the rightmost and the top row neighbors the
/// bottom, so every cell has exactly eight neighbor positions. The rule is
/// deterministic: a fixed starting state always replays the same trajectory.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    generations: u64,
    living: Pattern,
    new_born: Pattern,
    new_dead: Pattern,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl Grid {
    /// Create an empty grid, flooring each dimension to 1.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            generations: 0,
            living: Pattern::new(),
            new_born: Pattern::new(),
            new_dead: Pattern::new(),
        }
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Generations counted since the last populate (0 before any populate,
    /// 1 right after one).
    #[inline]
    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// The current living cells.
    #[inline]
    pub fn living(&self) -> &Pattern {
        &self.living
    }

    /// Cells born in the most recent cycle.
    #[inline]
    pub fn new_born(&self) -> &Pattern {
        &self.new_born
    }

    /// Cells that died in the most recent cycle.
    #[inline]
    pub fn new_dead(&self) -> &Pattern {
        &self.new_dead
    }

    /// Number of living cells.
    #[inline]
    pub fn population(&self) -> usize {
        self.living.len()
    }

    /// Seed the grid with a copy of `population`.
    ///
    /// Dimensions grow to contain the pattern (they never shrink), the
    /// generation counter resets to 1 and the delta trackers clear. An empty
    /// population is rejected, matching [`Pattern::normalize`].
    pub fn populate(&mut self, population: &Pattern) -> Result<(), PatternError> {
        let (_, (max_x, max_y)) = population.bounds().ok_or(PatternError::Empty)?;
        self.width = self.width.max(max_x + 1);
        self.height = self.height.max(max_y + 1);
        self.generations = 1;
        self.living = population.clone();
        self.new_born = Pattern::new();
        self.new_dead = Pattern::new();
        Ok(())
    }

    /// Seed the grid with the built-in sample population.
    pub fn populate_sample(&mut self) {
        self.populate(&sample_population())
            .expect("sample population is non-empty");
    }

    /// The eight Moore neighbors of `cell`, wrapped around the torus.
    ///
    /// Fixed order: N, NE, E, SE, S, SW, W, NW, with north pointing at +y.
    /// On degenerate dimensions a cell can neighbor itself, once per
    /// direction that wraps back onto it.
    pub fn neighbors(&self, cell: Cell) -> [Cell; 8] {
        let (x, y) = cell;
        let xm = x.rem_euclid(self.width);
        let xl = (x - 1).rem_euclid(self.width);
        let xr = (x + 1).rem_euclid(self.width);
        let ym = y.rem_euclid(self.height);
        let yd = (y - 1).rem_euclid(self.height);
        let yu = (y + 1).rem_euclid(self.height);
        [
            (xm, yu), // north
            (xr, yu), // northeast
            (xr, ym), // east
            (xr, yd), // southeast
            (xm, yd), // south
            (xl, yd), // southwest
            (xl, ym), // west
            (xl, yu), // northwest
        ]
    }

    /// The neighbors of `cell` that are currently alive, in neighbor order.
    ///
    /// Degenerate wraps count with multiplicity: on a 1x1 grid a live cell
    /// yields itself eight times.
    pub fn live_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.neighbors(cell)
            .into_iter()
            .filter(|neighbor| self.living.contains(*neighbor))
    }

    /// Advance the universe by one generation.
    ///
    /// A cell is alive in the next generation iff exactly 3 of its neighbors
    /// are alive, or exactly 2 are and the cell itself is. No-op on an empty
    /// universe.
    pub fn cycle(&mut self) {
        if self.living.is_empty() {
            return;
        }
        self.generations += 1;

        // Only live cells and their neighbors can change state.
        let mut candidates = self.living.clone();
        for cell in self.living.iter() {
            candidates.extend(self.neighbors(cell));
        }

        let mut nextgen = Pattern::new();
        for cell in candidates.iter() {
            let count = self.live_neighbors(cell).count();
            if count == 3 || (count == 2 && self.living.contains(cell)) {
                nextgen.insert(cell);
            }
        }

        self.new_born = nextgen.difference(&self.living);
        self.new_dead = self.living.difference(&nextgen);
        self.living = nextgen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Preset;

    fn grid_with(cells: &[Cell], width: i32, height: i32) -> Grid {
        let mut grid = Grid::new(width, height);
        grid.populate(&cells.iter().copied().collect()).unwrap();
        grid
    }

    #[test]
    fn test_dimensions_floor_to_one() {
        let grid = Grid::new(0, -5);
        assert_eq!((grid.width(), grid.height()), (1, 1));
        assert_eq!(grid.generations(), 0);
        assert!(grid.living().is_empty());
    }

    #[test]
    fn test_populate_grows_dimensions() {
        let mut grid = Grid::new(1, 1);
        grid.populate_sample();
        assert_eq!((grid.width(), grid.height()), (13, 14));
        assert_eq!(grid.generations(), 1);
        assert_eq!(grid.population(), 14);
    }

    #[test]
    fn test_populate_never_shrinks() {
        let mut grid = grid_with(&[(0, 0)], 40, 40);
        assert_eq!((grid.width(), grid.height()), (40, 40));
        grid.populate(&[(2, 2)].into_iter().collect()).unwrap();
        assert_eq!((grid.width(), grid.height()), (40, 40));
    }

    #[test]
    fn test_populate_empty_fails() {
        let mut grid = Grid::new(5, 5);
        assert_eq!(grid.populate(&Pattern::new()), Err(PatternError::Empty));
    }

    #[test]
    fn test_populate_resets_counters() {
        let mut grid = grid_with(&[(0, 0), (1, 0), (2, 0)], 5, 5);
        grid.cycle();
        assert_eq!(grid.generations(), 2);
        assert!(!grid.new_born().is_empty());

        grid.populate(&[(1, 1)].into_iter().collect()).unwrap();
        assert_eq!(grid.generations(), 1);
        assert!(grid.new_born().is_empty());
        assert!(grid.new_dead().is_empty());
    }

    #[test]
    fn test_neighbors_order_on_open_grid() {
        let grid = Grid::new(5, 5);
        assert_eq!(
            grid.neighbors((2, 2)),
            [
                (2, 3), // N
                (3, 3), // NE
                (3, 2), // E
                (3, 1), // SE
                (2, 1), // S
                (1, 1), // SW
                (1, 2), // W
                (1, 3), // NW
            ]
        );
    }

    #[test]
    fn test_neighbors_wrap_at_origin() {
        let grid = Grid::new(5, 5);
        assert_eq!(
            grid.neighbors((0, 0)),
            [
                (0, 1),
                (1, 1),
                (1, 0),
                (1, 4),
                (0, 4),
                (4, 4),
                (4, 0),
                (4, 1),
            ]
        );
    }

    #[test]
    fn test_neighbors_degenerate_one_by_one() {
        let grid = Grid::new(1, 1);
        assert_eq!(grid.neighbors((0, 0)), [(0, 0); 8]);
    }

    #[test]
    fn test_live_neighbors_keeps_order_and_multiplicity() {
        let grid = grid_with(&[(2, 2), (2, 3), (3, 1)], 8, 8);
        let live: Vec<Cell> = grid.live_neighbors((2, 2)).collect();
        assert_eq!(live, vec![(2, 3), (3, 1)]);

        let tiny = grid_with(&[(0, 0)], 1, 1);
        assert_eq!(tiny.live_neighbors((0, 0)).count(), 8);
    }

    #[test]
    fn test_lone_cell_dies_in_one_cycle() {
        let mut grid = grid_with(&[(3, 3)], 8, 8);
        grid.cycle();
        assert!(grid.living().is_empty());
        assert_eq!(grid.new_dead().len(), 1);
        assert_eq!(grid.generations(), 2);
    }

    #[test]
    fn test_cycle_is_noop_when_empty() {
        let mut grid = Grid::new(4, 4);
        grid.cycle();
        assert_eq!(grid.generations(), 0);
        assert!(grid.living().is_empty());
    }

    #[test]
    fn test_block_is_stable() {
        let block: Pattern = [(1, 1), (1, 2), (2, 1), (2, 2)].into_iter().collect();
        let mut grid = Grid::new(6, 6);
        grid.populate(&block).unwrap();
        grid.cycle();
        assert_eq!(grid.living(), &block);
        assert!(grid.new_born().is_empty());
        assert!(grid.new_dead().is_empty());
    }

    #[test]
    fn test_blinker_oscillates_with_period_two() {
        let start = Preset::Blinker.cells().offset(1, 1);
        let mut grid = Grid::new(6, 6);
        grid.populate(&start).unwrap();

        grid.cycle();
        let vertical: Pattern = [(2, 0), (2, 1), (2, 2)].into_iter().collect();
        assert_eq!(grid.living(), &vertical);
        assert_eq!(grid.new_born().len(), 2);
        assert_eq!(grid.new_dead().len(), 2);

        grid.cycle();
        assert_eq!(grid.living(), &start);
    }

    #[test]
    fn test_blinker_wraps_across_the_edge() {
        // At the origin the vertical phase wraps to the far row.
        let mut grid = Grid::new(5, 5);
        grid.populate(&Preset::Blinker.cells()).unwrap();
        grid.cycle();
        let wrapped: Pattern = [(1, 0), (1, 1), (1, 4)].into_iter().collect();
        assert_eq!(grid.living(), &wrapped);
        grid.cycle();
        assert_eq!(grid.living(), &Preset::Blinker.cells());
    }

    #[test]
    fn test_glider_translates_every_four_cycles() {
        let start = Preset::Glider.cells().offset(5, 5);
        let mut grid = Grid::new(20, 20);
        grid.populate(&start).unwrap();
        for _ in 0..4 {
            grid.cycle();
        }
        assert_eq!(grid.living(), &start.offset(-1, -1));
        assert_eq!(grid.generations(), 5);
    }

    #[test]
    fn test_full_torus_dies_of_overcrowding() {
        let everything: Pattern = (0..3)
            .flat_map(|x| (0..3).map(move |y| (x, y)))
            .collect();
        let mut grid = Grid::new(3, 3);
        grid.populate(&everything).unwrap();
        grid.cycle();
        assert!(grid.living().is_empty());
        assert_eq!(grid.new_dead().len(), 9);
    }
}
