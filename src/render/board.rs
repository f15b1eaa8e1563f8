use toruslife::Board;

use super::canvas::{Canvas, Rgb};

/// Colors used to draw a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub alive: Rgb,
    pub dead: Rgb,
    pub outline: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            alive: (0, 255, 0),
            dead: (0, 0, 0),
            outline: (0, 0, 0),
        }
    }
}

/// Largest square cell size that fits the whole board on the canvas, at least 1.
pub fn fit_cell_px(board_size: usize, canvas: &Canvas) -> usize {
    let fit = (canvas.width / board_size).min(canvas.height / board_size);
    fit.max(1)
}

/// Draw every cell as a `cell_px` square at `(col * cell_px, row * cell_px)`.
/// Squares of 3 pixels or more get a one-pixel outline. Cells past the canvas edge are clipped.
pub fn draw_board(canvas: &mut Canvas, board: &Board, cell_px: usize, palette: &Palette) {
    let cell_px = cell_px.max(1);
    for cell in board.cells() {
        let x = cell.col() * cell_px;
        let y = cell.row() * cell_px;
        if x >= canvas.width || y >= canvas.height {
            continue;
        }
        let fill = if cell.alive { palette.alive } else { palette.dead };
        if cell_px >= 3 {
            canvas.fill_rect(x, y, cell_px, cell_px, palette.outline);
            canvas.fill_rect(x + 1, y + 1, cell_px - 2, cell_px - 2, fill);
        } else {
            canvas.fill_rect(x, y, cell_px, cell_px, fill);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ColorMode;

    const PALETTE: Palette = Palette {
        alive: (0, 255, 0),
        dead: (10, 10, 10),
        outline: (200, 0, 0),
    };

    #[test]
    fn test_cells_land_at_scaled_coordinates() {
        let mut board = Board::new(3).unwrap();
        board.set_alive(1, 2, true);
        let mut canvas = Canvas::new(6, 3, ColorMode::TrueColor);
        draw_board(&mut canvas, &board, 2, &PALETTE);

        // row 1, col 2 covers x 4..6, y 2..4
        for (x, y) in [(4, 2), (5, 2), (4, 3), (5, 3)] {
            assert_eq!(canvas.get(x, y), PALETTE.alive);
        }
        assert_eq!(canvas.get(3, 2), PALETTE.dead);
        assert_eq!(canvas.get(4, 1), PALETTE.dead);
    }

    #[test]
    fn test_outline_on_large_cells() {
        let mut board = Board::new(1).unwrap();
        board.set_alive(0, 0, true);
        let mut canvas = Canvas::new(4, 2, ColorMode::TrueColor);
        draw_board(&mut canvas, &board, 4, &PALETTE);

        for i in 0..4 {
            assert_eq!(canvas.get(i, 0), PALETTE.outline);
            assert_eq!(canvas.get(i, 3), PALETTE.outline);
            assert_eq!(canvas.get(0, i), PALETTE.outline);
            assert_eq!(canvas.get(3, i), PALETTE.outline);
        }
        assert_eq!(canvas.get(1, 1), PALETTE.alive);
        assert_eq!(canvas.get(2, 2), PALETTE.alive);
    }

    #[test]
    fn test_oversized_board_is_clipped() {
        let board = Board::new(50).unwrap();
        let mut canvas = Canvas::new(10, 5, ColorMode::Mono);
        draw_board(&mut canvas, &board, 1, &PALETTE);
        assert!(canvas.pixels.iter().all(|&p| p == PALETTE.dead));
    }

    #[test]
    fn test_fit_cell_px() {
        let canvas = Canvas::new(200, 60, ColorMode::Mono);
        assert_eq!(fit_cell_px(64, &canvas), 1);
        assert_eq!(fit_cell_px(32, &canvas), 3);
        assert_eq!(fit_cell_px(500, &canvas), 1);
    }
}
