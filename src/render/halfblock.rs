use super::canvas::{Canvas, ColorMode, color_to_bg, color_to_fg, luminance};

/// Luminance below which a pixel counts as background in mono mode.
const DARK_THRESHOLD: f64 = 0.1;

/// Render with `▀`: the foreground paints the top pixel, the background the bottom.
/// Each row ends with an absolute cursor move instead of a newline.
pub fn render(canvas: &Canvas) -> String {
    let term_cols = canvas.width;
    let term_rows = canvas.height / 2;
    let mut out = String::with_capacity(term_cols * term_rows * 10);

    for row in 0..term_rows {
        if canvas.color_mode == ColorMode::Mono {
            for col in 0..term_cols {
                let top = luminance(canvas.get(col, row * 2)) >= DARK_THRESHOLD;
                let bot = luminance(canvas.get(col, row * 2 + 1)) >= DARK_THRESHOLD;
                out.push(match (top, bot) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                });
            }
        } else {
            let mut last_fg = String::new();
            let mut last_bg = String::new();
            for col in 0..term_cols {
                let fg = color_to_fg(canvas.map_color(canvas.get(col, row * 2)));
                let bg = color_to_bg(canvas.map_color(canvas.get(col, row * 2 + 1)));

                match (fg != last_fg, bg != last_bg) {
                    (true, true) => {
                        out.push_str("\x1b[");
                        out.push_str(&fg);
                        out.push(';');
                        out.push_str(&bg);
                        out.push('m');
                    }
                    (true, false) => {
                        out.push_str("\x1b[");
                        out.push_str(&fg);
                        out.push('m');
                    }
                    (false, true) => {
                        out.push_str("\x1b[");
                        out.push_str(&bg);
                        out.push('m');
                    }
                    (false, false) => {}
                }
                last_fg = fg;
                last_bg = bg;
                out.push('▀');
            }
            out.push_str("\x1b[0m");
        }
        // move to next row (1-indexed)
        out.push_str("\x1b[");
        out.push_str(&(row + 2).to_string());
        out.push_str(";1H");
    }
    out
}
