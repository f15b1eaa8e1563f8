pub mod board;
pub mod canvas;
pub mod halfblock;

pub use board::{Palette, draw_board, fit_cell_px};
pub use canvas::{Canvas, ColorMode};
