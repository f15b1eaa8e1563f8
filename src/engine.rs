//! One synchronous Life generation on a torus.

use crate::board::Board;

/// Moore neighborhood offsets as `(d_row, d_col)`.
pub const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Live neighbors of `(row, col)`, wrapping both axes modulo the board size.
pub fn count_neighbors(board: &Board, row: usize, col: usize) -> u8 {
    let size = board.size() as i64;
    let mut count = 0u8;
    for (dr, dc) in NEIGHBOR_OFFSETS {
        let nr = (row as i64 + dr).rem_euclid(size) as usize;
        let nc = (col as i64 + dc).rem_euclid(size) as usize;
        if board.is_alive(nr, nc) {
            count += 1;
        }
    }
    count
}

/// Classic B3/S23 transition.
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Compute the next generation. Every cell reads only from `board`, never from
/// the partially built result, and `board` itself is left untouched.
pub fn evaluate(board: &Board) -> Board {
    let size = board.size();
    let mut next = board.copy();
    for row in 0..size {
        for col in 0..size {
            let neighbors = count_neighbors(board, row, col);
            let cell = next.get_mut(row, col);
            cell.neighbor_count = neighbors;
            cell.alive = next_state(board.is_alive(row, col), neighbors);
        }
    }
    next
}
