//! One play-through from a starting board to its end condition, and the
//! totals kept across play-throughs.

use log::{debug, info};
use rand::RngExt;

use crate::board::Board;
use crate::detector::{EndCondition, classify};
use crate::engine::evaluate;
use crate::error::{LifeError, Result};
use crate::history::History;

/// One play-through: a starting board evolved until an end condition fires.
///
/// The run owns its boards and counters. The current board is the newest
/// history snapshot, so each generation is stored exactly once.
#[derive(Debug, Clone)]
pub struct Run {
    initial: Board,
    final_board: Option<Board>,
    history: History,
    generation: u64,
    end: EndCondition,
}

impl Run {
    /// Start from a copy of `board`.
    pub fn from_board(board: &Board) -> Self {
        Run::with_history(board, History::new())
    }

    /// Start from a copy of `board` using a custom history policy.
    pub fn with_history(board: &Board, mut history: History) -> Self {
        history.clear();
        history.append(board.copy());
        Run {
            initial: board.copy(),
            final_board: None,
            history,
            generation: 0,
            end: EndCondition::Running,
        }
    }

    /// Fresh `size`×`size` board with every cell randomized.
    pub fn random<R: RngExt + ?Sized>(size: usize, rng: &mut R) -> Result<Self> {
        let mut board = Board::new(size)?;
        board.randomize(rng);
        debug!(
            "new {}x{} run, initial population {}",
            size,
            size,
            board.population()
        );
        Ok(Run::from_board(&board))
    }

    /// Evaluate one generation, record it, and classify the result.
    ///
    /// History is pruned only after classification, so the check at a prune
    /// generation still sees the full window and the next one sees four snapshots.
    pub fn step(&mut self) -> Result<EndCondition> {
        if self.end.is_terminal() {
            return Err(LifeError::RunFinished);
        }
        let next = evaluate(self.current());
        self.generation += 1;
        self.history.append(next);

        let end = classify(self.current(), &self.history, self.generation);
        if end.is_terminal() {
            self.end = end;
            self.final_board = Some(self.current().copy());
            info!(
                "run ended after {} generations: {} (population {})",
                self.generation,
                end,
                self.current().population()
            );
        } else {
            self.history.prune(self.generation);
        }
        Ok(end)
    }

    /// Step until an end condition fires.
    pub fn run_to_end(&mut self) -> Result<EndCondition> {
        while !self.end.is_terminal() {
            self.step()?;
        }
        Ok(self.end)
    }

    pub fn initial(&self) -> &Board {
        &self.initial
    }

    pub fn current(&self) -> &Board {
        self.history.latest().unwrap_or(&self.initial)
    }

    /// Copy of the board at the generation the run ended; `None` while running.
    pub fn final_board(&self) -> Option<&Board> {
        self.final_board.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn end_condition(&self) -> EndCondition {
        self.end
    }

    pub fn is_finished(&self) -> bool {
        self.end.is_terminal()
    }

    pub fn size(&self) -> usize {
        self.initial.size()
    }
}

/// Outcome totals across many runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub runs: u64,
    pub generations: u64,
    pub dead: u64,
    pub period2: u64,
    pub runaway: u64,
}

impl Tally {
    /// Count a finished run. Unfinished runs are ignored.
    pub fn record(&mut self, run: &Run) {
        let slot = match run.end_condition() {
            EndCondition::Running => return,
            EndCondition::Dead => &mut self.dead,
            EndCondition::Period2 | EndCondition::Repeat => &mut self.period2,
            EndCondition::Runaway => &mut self.runaway,
        };
        *slot += 1;
        self.runs += 1;
        self.generations += run.generation();
    }

    /// Mean generations per finished run.
    pub fn mean_generations(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.generations as f64 / self.runs as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::RUNAWAY_GENERATION;
    use crate::history::KEEP_AFTER_PRUNE;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn board_with(size: usize, live: &[(usize, usize)]) -> Board {
        let mut board = Board::new(size).unwrap();
        for &(r, c) in live {
            board.set_alive(r, c, true);
        }
        board
    }

    #[test]
    fn test_lone_cell_run_dies_in_one() {
        let mut run = Run::from_board(&board_with(8, &[(3, 3)]));
        assert_eq!(run.step().unwrap(), EndCondition::Dead);
        assert_eq!(run.generation(), 1);
        assert!(run.is_finished());
        assert_eq!(run.final_board().unwrap().population(), 0);
        assert_eq!(run.initial().population(), 1);
    }

    #[test]
    fn test_step_after_end_is_error() {
        let mut run = Run::from_board(&board_with(4, &[(0, 0)]));
        run.run_to_end().unwrap();
        assert!(matches!(run.step(), Err(LifeError::RunFinished)));
        assert_eq!(run.generation(), 1);
    }

    #[test]
    fn test_blinker_run_is_period2() {
        let mut run = Run::from_board(&board_with(10, &[(5, 4), (5, 5), (5, 6)]));
        assert_eq!(run.step().unwrap(), EndCondition::Running);
        assert_eq!(run.step().unwrap(), EndCondition::Running);
        assert_eq!(run.step().unwrap(), EndCondition::Period2);
        assert_eq!(run.generation(), 3);
        assert_eq!(run.history().len(), 4);
    }

    #[test]
    fn test_generation_increments_by_one() {
        let glider = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
        let mut run = Run::from_board(&board_with(16, &glider));
        for expected in 1..=20 {
            assert_eq!(run.step().unwrap(), EndCondition::Running);
            assert_eq!(run.generation(), expected);
        }
        assert!(run.final_board().is_none());
    }

    #[test]
    fn test_initial_survives_evolution() {
        let start = board_with(10, &[(5, 4), (5, 5), (5, 6)]);
        let mut run = Run::from_board(&start);
        run.step().unwrap();
        assert_eq!(run.initial(), &start);
        assert_ne!(run.current(), &start);
    }

    #[test]
    fn test_period2_detected_under_constant_pruning() {
        let start = board_with(10, &[(5, 4), (5, 5), (5, 6)]);
        let mut run = Run::with_history(&start, History::with_policy(1, 1));
        assert_eq!(run.step().unwrap(), EndCondition::Running);
        assert_eq!(run.step().unwrap(), EndCondition::Running);
        assert_eq!(run.history().len(), KEEP_AFTER_PRUNE);
        assert_eq!(run.step().unwrap(), EndCondition::Period2);
        assert_eq!(run.generation(), 3);
    }

    #[test]
    fn test_glider_runs_away() {
        let glider = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
        let mut run = Run::from_board(&board_with(8, &glider));
        assert_eq!(run.run_to_end().unwrap(), EndCondition::Runaway);
        assert_eq!(run.generation(), RUNAWAY_GENERATION + 1);
        assert!(run.history().len() <= 500 + KEEP_AFTER_PRUNE);
    }

    #[test]
    fn test_random_run_is_reproducible() {
        let a = Run::random(24, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = Run::random(24, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a.initial(), b.initial());
        assert!(Run::random(0, &mut StdRng::seed_from_u64(3)).is_err());
    }

    #[test]
    fn test_tally() {
        let mut tally = Tally::default();
        let mut dies = Run::from_board(&board_with(6, &[(1, 1)]));
        tally.record(&dies);
        assert_eq!(tally.runs, 0);

        dies.run_to_end().unwrap();
        tally.record(&dies);
        let mut blinks = Run::from_board(&board_with(10, &[(5, 4), (5, 5), (5, 6)]));
        blinks.run_to_end().unwrap();
        tally.record(&blinks);

        assert_eq!(tally.runs, 2);
        assert_eq!(tally.dead, 1);
        assert_eq!(tally.period2, 1);
        assert_eq!(tally.generations, 4);
        assert!((tally.mean_generations() - 2.0).abs() < 1e-9);
    }
}
