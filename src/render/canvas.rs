use crossterm::style::Color;

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    /// No color, monochrome
    Mono,
    /// ANSI 16 colors
    Ansi16,
    /// 256-color palette
    Ansi256,
    /// 24-bit true color (RGB)
    TrueColor,
}

pub type Rgb = (u8, u8, u8);

/// A pixel grid rendered to the terminal two pixel rows per character row.
pub struct Canvas {
    /// Width in pixels (one per terminal column)
    pub width: usize,
    /// Height in pixels (two per terminal row)
    pub height: usize,
    pub pixels: Vec<Rgb>,
    pub color_mode: ColorMode,
}

impl Canvas {
    pub fn new(term_cols: usize, term_rows: usize, color_mode: ColorMode) -> Self {
        let (width, height) = (term_cols, term_rows * 2);
        Canvas {
            width,
            height,
            pixels: vec![(0, 0, 0); width * height],
            color_mode,
        }
    }

    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// Fill a `w`×`h` rectangle with its top-left at `(x, y)`, clipped to the canvas.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Rgb) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for py in y.min(y_end)..y_end {
            let row = py * self.width;
            self.pixels[row + x.min(x_end)..row + x_end].fill(color);
        }
    }

    pub fn render(&self) -> String {
        super::halfblock::render(self)
    }

    pub fn map_color(&self, (r, g, b): Rgb) -> Color {
        match self.color_mode {
            ColorMode::Mono => Color::White,
            ColorMode::TrueColor => Color::Rgb { r, g, b },
            ColorMode::Ansi256 => {
                // 6x6x6 cube
                let idx = 16 + (36 * (r as u16 / 51)) + (6 * (g as u16 / 51)) + (b as u16 / 51);
                Color::AnsiValue(idx as u8)
            }
            ColorMode::Ansi16 => {
                let peak = r.max(g).max(b);
                if peak < 64 {
                    Color::Black
                } else if r > g && r > b {
                    if peak > 180 { Color::Red } else { Color::DarkRed }
                } else if g > r && g > b {
                    if peak > 180 { Color::Green } else { Color::DarkGreen }
                } else if b > r && b > g {
                    if peak > 180 { Color::Blue } else { Color::DarkBlue }
                } else if peak > 180 {
                    Color::White
                } else {
                    Color::Grey
                }
            }
        }
    }
}

/// Perceived brightness, 0.0..=1.0
pub fn luminance((r, g, b): Rgb) -> f64 {
    (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0
}

pub fn color_to_fg(color: Color) -> String {
    match color {
        Color::Rgb { r, g, b } => format!("38;2;{};{};{}", r, g, b),
        Color::AnsiValue(v) => format!("38;5;{}", v),
        Color::Black => "30".into(),
        Color::DarkRed => "31".into(),
        Color::DarkGreen => "32".into(),
        Color::DarkBlue => "34".into(),
        Color::Grey => "37".into(),
        Color::Red => "91".into(),
        Color::Green => "92".into(),
        Color::Blue => "94".into(),
        Color::White => "97".into(),
        _ => "37".into(),
    }
}

pub fn color_to_bg(color: Color) -> String {
    match color {
        Color::Rgb { r, g, b } => format!("48;2;{};{};{}", r, g, b),
        Color::AnsiValue(v) => format!("48;5;{}", v),
        Color::Black => "40".into(),
        Color::DarkRed => "41".into(),
        Color::DarkGreen => "42".into(),
        Color::DarkBlue => "44".into(),
        Color::Grey => "47".into(),
        Color::Red => "101".into(),
        Color::Green => "102".into(),
        Color::Blue => "104".into(),
        Color::White => "107".into(),
        _ => "40".into(),
    }
}
