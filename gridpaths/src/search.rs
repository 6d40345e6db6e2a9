use crate::grid::{CellKind, Grid};
use crate::mask::VisitMask;
use crate::neighbors::Neighbors;
use crate::stats::{SearchStatsCollector, PROGRESS_INTERVAL};
use std::time::{Duration, Instant};

/// Outcome of a path enumeration.
#[derive(Clone, Copy, Debug)]
pub struct SearchResult {
    /// Number of counted source-to-sink paths covering every empty cell.
    pub paths: u64,
    /// Wall time the enumeration took.
    pub elapsed: Duration,
    /// False if a statistic collector cancelled the enumeration before it was exhausted,
    /// in which case `paths` only counts the part explored so far.
    pub complete: bool,
}

/// Depth-first enumeration of all Hamiltonian source-to-sink paths of a grid.
///
/// A partial path is tracked as a by-value [`VisitMask`], so backtracking is implicit
/// and sibling branches never observe each other's state. Before an empty cell is
/// entered, a flood-fill connectivity check rejects the move if it would split the
/// remaining unvisited region; this keeps the search tractable but never rejects a
/// branch that could still be completed.
pub struct HamiltonianSearch<'g> {
    grid: &'g Grid,
    neighbors: Neighbors,
    target: VisitMask,
}

impl<'g> HamiltonianSearch<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            neighbors: Neighbors::for_grid(grid),
            target: grid.target_mask(),
            grid,
        }
    }

    /// Runs the full enumeration and returns the number of paths found.
    /// Deterministic; running it again over the same grid gives the same result.
    #[inline] pub fn count_paths(&self) -> SearchResult {
        self.count_paths_stats(&mut ())
    }

    /// Runs the full enumeration, reporting progress and statistics to `stats`,
    /// which can also cancel the search early.
    pub fn count_paths_stats(&self, stats: &mut impl SearchStatsCollector) -> SearchResult {
        let start = Instant::now();
        let mut paths = 0;
        let mut complete = true;
        for neighbor in self.neighbors.of(self.grid.source_cell()) {
            if !self.extend(VisitMask::EMPTY, neighbor, &mut paths, start, stats) {
                complete = false;
                break;
            }
        }
        SearchResult { paths, elapsed: start.elapsed(), complete }
    }

    /// Tries to extend a partial path (visited cells given by `path`, source excluded)
    /// by stepping into `cell`, recursively exhausting everything reachable from there.
    /// Returns false if `stats` cancelled the enumeration.
    fn extend(&self, path: VisitMask, cell: u8, paths: &mut u64, start: Instant,
              stats: &mut impl SearchStatsCollector) -> bool {
        match self.grid.kind(cell) {
            // obstacles and the source end the branch; dead ends, not errors
            CellKind::Blocked | CellKind::Source => true,
            CellKind::Sink => {
                // the sink bit itself never enters the mask
                if path == self.target {
                    *paths += 1;
                    if *paths % PROGRESS_INTERVAL == 0 {
                        stats.progress(*paths, start.elapsed());
                    }
                }
                true
            }
            CellKind::Empty => {
                if path.contains(cell) { return true; }
                if !stats.expanded() { return false; }
                let entered = path.with(cell);
                if !self.is_completable(entered, cell) {
                    stats.pruned();
                    return true;
                }
                for neighbor in self.neighbors.of(cell) {
                    if !self.extend(entered, neighbor, paths, start, stats) { return false; }
                }
                true
            }
        }
    }

    /// Checks whether, with the cells of `entered` visited, all remaining empty cells
    /// are still mutually reachable from some neighbor of the just entered `cell`.
    /// A necessary condition for completing the path, not a sufficient one.
    fn is_completable(&self, entered: VisitMask, cell: u8) -> bool {
        for neighbor in self.neighbors.of(cell) {
            let mut flooded = entered;
            self.flood(&mut flooded, neighbor);
            if flooded == self.target {
                return true;
            }
        }
        false
    }

    /// Marks in `flooded` every empty cell reachable from `cell` through
    /// empty cells not contained in `flooded` yet.
    fn flood(&self, flooded: &mut VisitMask, cell: u8) {
        if self.grid.kind(cell) != CellKind::Empty { return; }
        if flooded.contains(cell) { return; }
        flooded.insert(cell);
        for neighbor in self.neighbors.of(cell) {
            self.flood(flooded, neighbor);
        }
    }
}

/// Counts all simple paths of `grid` that lead from its source to its sink
/// and visit every empty cell exactly once. Synchronous; returns when the
/// enumeration is exhausted.
#[inline] pub fn count_hamiltonian_paths(grid: &Grid) -> SearchResult {
    HamiltonianSearch::new(grid).count_paths()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{Limited, SearchAllStats};

    /// Brute-force reference: plain recursive enumeration over (row, col) coordinates
    /// with an explicit visited table and no connectivity pruning.
    fn oracle_count(grid: &Grid) -> u64 {
        fn extend(grid: &Grid, visited: &mut Vec<bool>, empties_left: u32, row: i32, col: i32) -> u64 {
            if row < 0 || col < 0 || row >= grid.height() as i32 || col >= grid.width() as i32 {
                return 0;
            }
            let cell = (row * grid.width() as i32 + col) as usize;
            match grid.kind(cell as u8) {
                CellKind::Blocked | CellKind::Source => 0,
                CellKind::Sink => (empties_left == 0) as u64,
                CellKind::Empty => {
                    if visited[cell] { return 0; }
                    visited[cell] = true;
                    let mut found = 0;
                    for (dr, dc) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                        found += extend(grid, visited, empties_left - 1, row + dr, col + dc);
                    }
                    visited[cell] = false;
                    found
                }
            }
        }
        let mut visited = vec![false; grid.len()];
        let empties = grid.target_mask().len();
        let source = grid.source_cell() as i32;
        let (row, col) = (source / grid.width() as i32, source % grid.width() as i32);
        let mut found = 0;
        for (dr, dc) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            found += extend(grid, &mut visited, empties, row + dr, col + dc);
        }
        found
    }

    fn count(rows: &str) -> u64 {
        count_hamiltonian_paths(&Grid::parse(rows).unwrap()).paths
    }

    #[test]
    fn test_adjacent_source_and_sink_no_empty_cells() {
        // target mask is 0 and the direct move is the single solution
        assert_eq!(count("SE"), 1);
        assert_eq!(count("S\nE"), 1);
    }

    #[test]
    fn test_unreachable_sink() {
        assert_eq!(count("S#\n#E"), 0);
        assert_eq!(count("S.#.E"), 0);
    }

    #[test]
    fn test_2x2_with_two_empty_cells() {
        // no path can cover both empty cells: each is only adjacent to source and sink
        assert_eq!(count("S.\n.E"), 0);
    }

    #[test]
    fn test_open_3x3() {
        // the two corner-to-corner Hamiltonian paths: along the two boustrophedon sweeps
        assert_eq!(count("S..\n...\n..E"), 2);
    }

    #[test]
    fn test_open_4x4_has_no_solution() {
        // cell coloring argument: a 16-cell path must end on the opposite color,
        // but both corners share one
        assert_eq!(count("S...\n....\n....\n...E"), 0);
    }

    #[test]
    fn test_open_5x5() {
        assert_eq!(count("S....\n.....\n.....\n.....\n....E"), 104);
    }

    #[test]
    fn test_blocked_cells() {
        assert_eq!(count("S..\n.#.\n..E"), 0);
        assert_eq!(count("S...\n....\n.#..\n...E"), 4);
        assert_eq!(count("S....\n.....\n..#..\n.....\n....E"), 0);
    }

    #[test]
    fn test_sink_inside_the_grid() {
        assert_eq!(count("S..\n.E.\n..."), 2);
        assert_eq!(count("S...\n....\n...E\n...."), 4);
    }

    #[test]
    fn test_matches_oracle() {
        for rows in [
            "SE",
            "S.\n.E",
            "S..\n..E",
            "S...\n...E",
            "S..\n...\n..E",
            "S..\n.#.\n..E",
            "S..\n.E.\n...",
            "S...\n....\n....\n...E",
            "S...\n.#..\n...E",
            "S...\n....\n.#..\n...E",
            "S....\n.....\n.....\n.....\n....E",
            "S....\n....#\n.....\n#....\n....E",
        ] {
            let grid = Grid::parse(rows).unwrap();
            assert_eq!(count_hamiltonian_paths(&grid).paths, oracle_count(&grid),
                       "grids disagree for:\n{}", grid);
        }
    }

    #[test]
    fn test_idempotence() {
        let grid = Grid::parse("S...\n....\n....\n...E").unwrap();
        let search = HamiltonianSearch::new(&grid);
        let first = search.count_paths();
        let second = search.count_paths();
        assert_eq!(first.paths, second.paths);
        assert!(first.complete && second.complete);
    }

    #[test]
    fn test_statistics() {
        // node counts are exact: the set of explored states does not depend on
        // the branch exploration order
        let grid = Grid::parse("S....\n.....\n.....\n.....\n....E").unwrap();
        let mut stats = SearchAllStats::default();
        let result = HamiltonianSearch::new(&grid).count_paths_stats(&mut stats);
        assert_eq!(result.paths, 104);
        assert!(result.complete);
        assert_eq!(stats.expanded, 6136);
        assert_eq!(stats.pruned, 1780);

        let mut expansions = 0u64;
        HamiltonianSearch::new(&grid).count_paths_stats(&mut expansions);
        assert_eq!(expansions, 6136);
    }

    #[test]
    fn test_progress_events() {
        struct RecordProgress(Vec<u64>);
        impl SearchStatsCollector for RecordProgress {
            fn progress(&mut self, paths: u64, _elapsed: Duration) { self.0.push(paths); }
        }
        // open 6x7 grid counts 10204 paths, crossing the progress interval once
        let grid = Grid::parse("S.....\n......\n......\n......\n......\n......\n.....E").unwrap();
        let mut record = RecordProgress(Vec::new());
        let result = HamiltonianSearch::new(&grid).count_paths_stats(&mut record);
        assert_eq!(result.paths, 10204);
        assert_eq!(record.0, vec![PROGRESS_INTERVAL]);
    }

    #[test]
    fn test_cancellation() {
        let grid = Grid::parse("S....\n.....\n.....\n.....\n....E").unwrap();
        let mut limited = Limited::with_limit(10);
        let result = HamiltonianSearch::new(&grid).count_paths_stats(&mut limited);
        assert!(!result.complete);
        assert_eq!(limited.expanded, 10);
        assert!(result.paths < 104);
    }
}
