//! Conway's Game of Life on a toroidal grid, with generational history and
//! detection of dead, period-2 and runaway boards.

pub mod board;
pub mod cell;
pub mod detector;
pub mod engine;
pub mod error;
pub mod history;
pub mod rate;
pub mod record;
pub mod run;

pub use board::Board;
pub use cell::Cell;
pub use detector::{EndCondition, classify, is_dead, is_period2, is_runaway};
pub use engine::evaluate;
pub use error::{LifeError, Result};
pub use history::History;
pub use rate::RateMeter;
pub use record::{RecordReader, RecordWriter, RunRecord};
pub use run::{Run, Tally};
