//! Shape module - fixed 4x4 occupancy grids
//!
//! Grids are indexed `grid[y][x]` with row 0 at the top. A grid stays 4x4 through
//! rotation, so a shape may sit anywhere inside its box.

use arrayvec::ArrayVec;

use crate::types::GRID_SIZE;

/// Square occupancy grid; `true` marks a filled cell
pub type Grid = [[bool; GRID_SIZE]; GRID_SIZE];

/// Grid with no filled cells
pub const EMPTY_GRID: Grid = [[false; GRID_SIZE]; GRID_SIZE];

/// Cell coordinate inside a grid, `(x, y)`
pub type GridCell = (usize, usize);

/// Up to every cell of a grid, without allocating
pub type GridCells = ArrayVec<GridCell, { GRID_SIZE * GRID_SIZE }>;

/// 4-neighbourhood, in up/right/down/left order
const NEIGHBOURS: [(isize, isize); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Build a grid from four rows of text, `#` marking filled cells
///
/// ```
/// use poly_tetris_core::shape::{filled_count, grid_from_rows};
///
/// let grid = grid_from_rows(["#...", "#...", "##..", "...."]);
/// assert_eq!(filled_count(&grid), 4);
/// ```
pub fn grid_from_rows(rows: [&str; GRID_SIZE]) -> Grid {
    let mut grid = EMPTY_GRID;
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().take(GRID_SIZE).enumerate() {
            grid[y][x] = ch == '#';
        }
    }
    grid
}

/// Rotate a grid 90° clockwise: cell `(x, y)` moves to `(N-1-y, x)`
pub fn rotate_cw(grid: &Grid) -> Grid {
    let mut rotated = EMPTY_GRID;
    for (y, row) in grid.iter().enumerate() {
        for (x, &filled) in row.iter().enumerate() {
            rotated[x][GRID_SIZE - 1 - y] = filled;
        }
    }
    rotated
}

/// The grid followed by its 90°, 180° and 270° clockwise rotations
pub fn all_rotations(grid: &Grid) -> [Grid; 4] {
    let r1 = rotate_cw(grid);
    let r2 = rotate_cw(&r1);
    let r3 = rotate_cw(&r2);
    [*grid, r1, r2, r3]
}

pub fn filled_count(grid: &Grid) -> usize {
    grid.iter().flatten().filter(|&&filled| filled).count()
}

/// Filled cells in row-major order
pub fn filled_cells(grid: &Grid) -> GridCells {
    let mut cells = GridCells::new();
    for (y, row) in grid.iter().enumerate() {
        for (x, &filled) in row.iter().enumerate() {
            if filled {
                cells.push((x, y));
            }
        }
    }
    cells
}

fn neighbours(x: usize, y: usize) -> impl Iterator<Item = GridCell> {
    NEIGHBOURS.iter().filter_map(move |&(dx, dy)| {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < GRID_SIZE && ny < GRID_SIZE).then_some((nx, ny))
    })
}

/// Empty cells 4-adjacent to at least one filled cell
pub fn frontier(grid: &Grid) -> GridCells {
    let mut cells = GridCells::new();
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            if !grid[y][x] && neighbours(x, y).any(|(nx, ny)| grid[ny][nx]) {
                cells.push((x, y));
            }
        }
    }
    cells
}

/// True when the filled cells form exactly one 4-connected component.
///
/// An empty grid is not connected.
pub fn is_connected(grid: &Grid) -> bool {
    let cells = filled_cells(grid);
    let Some(&start) = cells.first() else {
        return false;
    };

    let mut visited = EMPTY_GRID;
    let mut stack = GridCells::new();
    visited[start.1][start.0] = true;
    stack.push(start);
    let mut reached = 1usize;

    while let Some((x, y)) = stack.pop() {
        for (nx, ny) in neighbours(x, y) {
            if grid[ny][nx] && !visited[ny][nx] {
                visited[ny][nx] = true;
                reached += 1;
                stack.push((nx, ny));
            }
        }
    }

    reached == cells.len()
}

/// Minimal `(width, height)` enclosing the filled cells; `(0, 0)` for an empty grid
pub fn bounding_size(grid: &Grid) -> (usize, usize) {
    let cells = filled_cells(grid);
    if cells.is_empty() {
        return (0, 0);
    }
    let min_x = cells.iter().map(|c| c.0).min().unwrap_or(0);
    let max_x = cells.iter().map(|c| c.0).max().unwrap_or(0);
    let min_y = cells.iter().map(|c| c.1).min().unwrap_or(0);
    let max_y = cells.iter().map(|c| c.1).max().unwrap_or(0);
    (max_x - min_x + 1, max_y - min_y + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_cw_moves_cells() {
        // Single cell in the top-left corner ends up top-right.
        let grid = grid_from_rows(["#...", "....", "....", "...."]);
        let rotated = rotate_cw(&grid);
        assert_eq!(rotated, grid_from_rows(["...#", "....", "....", "...."]));
    }

    #[test]
    fn test_rotate_vertical_bar() {
        let bar = grid_from_rows([".#..", ".#..", ".#..", ".#.."]);
        assert_eq!(rotate_cw(&bar), grid_from_rows(["....", "####", "....", "...."]));
    }

    #[test]
    fn test_four_rotations_return_original() {
        let grid = grid_from_rows(["##..", ".#..", ".##.", "...."]);
        let rotations = all_rotations(&grid);
        assert_eq!(rotate_cw(&rotations[3]), grid);
    }

    #[test]
    fn test_connectivity() {
        assert!(is_connected(&grid_from_rows(["#...", "#...", "##..", "...."])));
        // Diagonal contact only.
        assert!(!is_connected(&grid_from_rows(["#...", ".#..", "....", "...."])));
        assert!(!is_connected(&EMPTY_GRID));
    }

    #[test]
    fn test_frontier_of_single_corner_cell() {
        let grid = grid_from_rows(["#...", "....", "....", "...."]);
        let cells = frontier(&grid);
        assert_eq!(cells.len(), 2);
        assert!(cells.contains(&(1, 0)));
        assert!(cells.contains(&(0, 1)));
    }

    #[test]
    fn test_bounding_size() {
        let grid = grid_from_rows(["....", ".###", "...#", "...."]);
        assert_eq!(bounding_size(&grid), (3, 2));
        assert_eq!(bounding_size(&EMPTY_GRID), (0, 0));
    }
}
