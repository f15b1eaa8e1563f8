//! `toruslife` binary: terminal UI and headless driver.

mod config;
mod render;
mod session;

use std::error::Error;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor, execute, terminal,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::{info, warn};
use rand::RngExt;

use config::Settings;
use render::{Canvas, ColorMode, draw_board, fit_cell_px};
use session::Session;

#[derive(Parser)]
#[command(name = "toruslife", version, about = "Conway's Game of Life on a torus, run after run")]
struct Cli {
    /// Board side length
    #[arg(short, long, allow_negative_numbers = true)]
    scale: Option<i64>,

    /// Pixels per cell side (omit to fit the terminal)
    #[arg(long)]
    cell_px: Option<usize>,

    /// Generations per second cap (0 = uncapped)
    #[arg(short, long)]
    fps: Option<u32>,

    /// Color mode
    #[arg(short, long, value_enum)]
    color: Option<ColorMode>,

    /// File that finished runs are appended to
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for the random boards
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many finished runs (0 = never)
    #[arg(short, long)]
    runs: Option<u64>,

    /// Run without the terminal UI, logging progress instead
    #[arg(long)]
    headless: bool,

    /// Print the config file path and exit
    #[arg(long)]
    show_config: bool,

    /// Write a commented default config file and exit
    #[arg(long)]
    init_config: bool,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(scale) = self.scale {
            settings.scale = scale;
        }
        if self.cell_px.is_some() {
            settings.cell_px = self.cell_px;
        }
        if let Some(fps) = self.fps {
            settings.fps = fps;
        }
        if let Some(color) = self.color {
            settings.color = color;
        }
        if let Some(ref output) = self.output {
            settings.output = output.clone();
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if let Some(runs) = self.runs {
            settings.runs = runs;
        }
        settings.headless |= self.headless;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.show_config {
        match config::config_path() {
            Some(path) => println!("{}", path.display()),
            None => println!("No config directory on this platform"),
        }
        return Ok(());
    }
    if cli.init_config {
        let path = config::config_path().ok_or("no config directory on this platform")?;
        if path.exists() {
            println!("Config already exists at {}", path.display());
        } else {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            std::fs::write(&path, config::default_config_string())?;
            println!("Wrote {}", path.display());
        }
        return Ok(());
    }

    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (config::Config::default(), Some(e)),
    };
    let mut settings = Settings::from_config(&file_config);
    cli.apply(&mut settings);

    // Log lines would tear the alternate screen, so the UI only shows warnings.
    let default_filter = if settings.headless { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    if let Some(e) = config_error {
        warn!("{}; using defaults", e);
    }

    let seed = settings.seed.unwrap_or_else(|| rand::rng().random::<u64>());
    let mut session = Session::new(&settings, seed)?;

    if settings.headless {
        return run_headless(&mut session, &settings);
    }

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let mut writer = BufWriter::with_capacity(256 * 1024, stdout);
    let result = run_loop(&mut writer, &mut session, &settings);

    // Cleanup
    execute!(writer, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    let t = &session.tally;
    println!(
        "{} runs: {} dead, {} period-2, {} runaway (seed {})",
        t.runs, t.dead, t.period2, t.runaway, seed
    );
    result
}

fn run_headless(session: &mut Session, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let frame_dur = frame_duration(settings.fps);
    while !session.done() {
        let mut run = session.new_run()?;
        loop {
            let started = Instant::now();
            if session.advance(&mut run)? {
                break;
            }
            pace(started, frame_dur);
        }
    }
    info!("finished {} runs", session.tally.runs);
    Ok(())
}

const COLOR_MODES: [ColorMode; 4] = [
    ColorMode::TrueColor,
    ColorMode::Ansi256,
    ColorMode::Ansi16,
    ColorMode::Mono,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Quit,
    TogglePause,
    NewRun,
    CycleColor,
}

/// Raw mode delivers Ctrl-C as a key press, so it is mapped to quit here.
fn key_action(code: KeyCode, modifiers: KeyModifiers) -> Option<KeyAction> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(KeyAction::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Quit),
        KeyCode::Char(' ') => Some(KeyAction::TogglePause),
        KeyCode::Char('n') => Some(KeyAction::NewRun),
        KeyCode::Char('c') => Some(KeyAction::CycleColor),
        _ => None,
    }
}

fn run_loop(
    stdout: &mut BufWriter<io::Stdout>,
    session: &mut Session,
    settings: &Settings,
) -> Result<(), Box<dyn Error>> {
    let (mut cols, mut rows) = terminal::size()?;
    let mut color_mode = settings.color;
    let frame_dur = frame_duration(settings.fps);

    // Reserve 1 row for status bar
    let mut canvas = Canvas::new(cols as usize, (rows as usize).saturating_sub(1), color_mode);
    let mut cell_px = settings
        .cell_px
        .unwrap_or_else(|| fit_cell_px(session.size(), &canvas));
    let mut rebuild_canvas = false;
    let mut paused = false;

    let mut run = session.new_run()?;

    loop {
        let frame_start = Instant::now();

        // Handle input (non-blocking)
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Resize(w, h) => {
                    cols = w;
                    rows = h;
                    rebuild_canvas = true;
                }
                Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind: KeyEventKind::Press,
                    ..
                }) => match key_action(code, modifiers) {
                    Some(KeyAction::Quit) => return Ok(()),
                    Some(KeyAction::TogglePause) => paused = !paused,
                    // Abandon the current run without recording it
                    Some(KeyAction::NewRun) => {
                        info!("abandoned run at generation {}", run.generation());
                        run = session.new_run()?;
                    }
                    Some(KeyAction::CycleColor) => {
                        let idx = COLOR_MODES.iter().position(|&m| m == color_mode).unwrap_or(0);
                        color_mode = COLOR_MODES[(idx + 1) % COLOR_MODES.len()];
                        rebuild_canvas = true;
                    }
                    None => {}
                },
                _ => {}
            }
        }

        if rebuild_canvas {
            canvas = Canvas::new(cols as usize, (rows as usize).saturating_sub(1), color_mode);
            if settings.cell_px.is_none() {
                cell_px = fit_cell_px(session.size(), &canvas);
            }
            write!(stdout, "\x1b[2J\x1b[H")?;
            rebuild_canvas = false;
        }

        if !paused && session.advance(&mut run)? {
            if session.done() {
                return Ok(());
            }
            run = session.new_run()?;
        }

        canvas.clear(settings.palette.dead);
        draw_board(&mut canvas, run.current(), cell_px, &settings.palette);
        stdout.write_all(b"\x1b[H")?;
        stdout.write_all(canvas.render().as_bytes())?;

        // Status bar
        let t = &session.tally;
        let status = format!(
            " gen {} | pop {} | {:.1} gen/s | runs {} (dead {}, p2 {}, runaway {}){} | [space] pause  [n] new  [c] color  [q] quit ",
            run.generation(),
            run.current().population(),
            session.meter.last_rate(),
            t.runs,
            t.dead,
            t.period2,
            t.runaway,
            if paused { " [PAUSED]" } else { "" },
        );
        let w = cols as usize;
        let truncated: String = status.chars().take(w).collect();
        write!(stdout, "\x1b[{};1H\x1b[7m{:<width$}\x1b[0m", rows, truncated, width = w)?;

        // Single flush per frame
        stdout.flush()?;
        pace(frame_start, frame_dur);
    }
}

fn frame_duration(fps: u32) -> Option<Duration> {
    (fps > 0).then(|| Duration::from_secs_f64(1.0 / fps.min(1000) as f64))
}

/// Sleep out the rest of the frame when a rate cap is set.
fn pace(started: Instant, frame_dur: Option<Duration>) {
    if let Some(frame_dur) = frame_dur {
        let elapsed = started.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_c_quits() {
        assert_eq!(
            key_action(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            key_action(KeyCode::Char('c'), KeyModifiers::CONTROL | KeyModifiers::SHIFT),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn test_plain_keys() {
        let none = KeyModifiers::NONE;
        assert_eq!(key_action(KeyCode::Char('c'), none), Some(KeyAction::CycleColor));
        assert_eq!(key_action(KeyCode::Char('q'), none), Some(KeyAction::Quit));
        assert_eq!(key_action(KeyCode::Esc, none), Some(KeyAction::Quit));
        assert_eq!(key_action(KeyCode::Char(' '), none), Some(KeyAction::TogglePause));
        assert_eq!(key_action(KeyCode::Char('n'), none), Some(KeyAction::NewRun));
        assert_eq!(key_action(KeyCode::Char('x'), none), None);
    }

    #[test]
    fn test_frame_duration() {
        assert_eq!(frame_duration(0), None);
        assert!(frame_duration(10).is_some_and(|d| d > Duration::from_millis(99)));
    }
}
