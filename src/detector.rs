//! End-of-run classification.

use std::fmt;

use crate::board::Board;
use crate::history::History;

/// Generation count past which a run is treated as never terminating.
pub const RUNAWAY_GENERATION: u64 = 10_000;

/// How a run ended, or that it has not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndCondition {
    Running,
    /// Every cell dead.
    Dead,
    /// Exact repeat of an earlier generation. Reserved: never produced by [`classify`].
    Repeat,
    /// Current board equals the board two generations earlier.
    Period2,
    /// Generation cap exceeded.
    Runaway,
}

impl EndCondition {
    /// Integer code written to the run record. `Running` has none.
    pub fn code(self) -> Option<u8> {
        match self {
            EndCondition::Running => None,
            EndCondition::Dead => Some(0),
            EndCondition::Repeat => Some(1),
            EndCondition::Period2 => Some(2),
            EndCondition::Runaway => Some(3),
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(EndCondition::Dead),
            1 => Some(EndCondition::Repeat),
            2 => Some(EndCondition::Period2),
            3 => Some(EndCondition::Runaway),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != EndCondition::Running
    }
}

impl fmt::Display for EndCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EndCondition::Running => "running",
            EndCondition::Dead => "dead",
            EndCondition::Repeat => "repeat",
            EndCondition::Period2 => "period-2",
            EndCondition::Runaway => "runaway",
        };
        f.write_str(name)
    }
}

pub fn is_dead(board: &Board) -> bool {
    board.cells().iter().all(|c| !c.alive)
}

/// Needs four snapshots so the comparison spans three evaluations of history.
pub fn is_period2(history: &History) -> bool {
    if history.len() < 4 {
        return false;
    }
    match (history.back(0), history.back(2)) {
        (Some(current), Some(two_back)) => current == two_back,
        _ => false,
    }
}

pub fn is_runaway(generation: u64) -> bool {
    generation > RUNAWAY_GENERATION
}

/// First matching condition in the order dead, period-2, runaway.
pub fn classify(board: &Board, history: &History, generation: u64) -> EndCondition {
    if is_dead(board) {
        EndCondition::Dead
    } else if is_period2(history) {
        EndCondition::Period2
    } else if is_runaway(generation) {
        EndCondition::Runaway
    } else {
        EndCondition::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluate;

    fn blinker(size: usize) -> Board {
        let mut board = Board::new(size).unwrap();
        let mid = size / 2;
        for c in mid - 1..=mid + 1 {
            board.set_alive(mid, c, true);
        }
        board
    }

    #[test]
    fn test_is_dead_tracks_single_cell() {
        let mut board = Board::new(12).unwrap();
        assert!(is_dead(&board));
        board.set_alive(11, 0, true);
        assert!(!is_dead(&board));
        board.set_alive(11, 0, false);
        assert!(is_dead(&board));
    }

    #[test]
    fn test_period2_needs_four_entries() {
        let mut history = History::new();
        let gen0 = blinker(9);
        history.append(gen0.clone());
        let gen1 = evaluate(&gen0);
        history.append(gen1.clone());
        // generation 1 differs from generation 0
        assert!(!is_period2(&history));

        let gen2 = evaluate(&gen1);
        assert_eq!(gen2, gen0);
        history.append(gen2.clone());
        // gen2 == gen0, but only three snapshots are retained
        assert!(!is_period2(&history));

        history.append(evaluate(&gen2));
        assert!(is_period2(&history));
    }

    #[test]
    fn test_period2_false_for_changing_history() {
        let mut history = History::new();
        let mut board = Board::new(10).unwrap();
        for (r, c) in [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)] {
            board.set_alive(r, c, true);
        }
        history.append(board.clone());
        for _ in 0..6 {
            board = evaluate(&board);
            history.append(board.clone());
            assert!(!is_period2(&history));
        }
    }

    #[test]
    fn test_still_life_counts_as_period2() {
        let mut board = Board::new(6).unwrap();
        for (r, c) in [(2, 2), (2, 3), (3, 2), (3, 3)] {
            board.set_alive(r, c, true);
        }
        let mut history = History::new();
        for _ in 0..4 {
            history.append(board.clone());
            board = evaluate(&board);
        }
        assert!(is_period2(&history));
    }

    #[test]
    fn test_period2_one_generation_after_prune() {
        let mut board = blinker(9);
        let mut history = History::new();
        for _ in 0..10 {
            history.append(board.clone());
            board = evaluate(&board);
        }
        history.prune(500);
        assert_eq!(history.len(), 3);
        history.append(board);
        assert!(is_period2(&history));
    }

    #[test]
    fn test_runaway_threshold() {
        assert!(!is_runaway(0));
        assert!(!is_runaway(RUNAWAY_GENERATION));
        assert!(is_runaway(RUNAWAY_GENERATION + 1));
    }

    #[test]
    fn test_classify_order() {
        let dead = Board::new(5).unwrap();
        let mut history = History::new();
        for _ in 0..4 {
            history.append(dead.clone());
        }
        // dead wins over period-2 and runaway
        assert_eq!(classify(&dead, &history, 20_000), EndCondition::Dead);

        let live = blinker(9);
        let mut history = History::new();
        let mut board = live.clone();
        for _ in 0..4 {
            history.append(board.clone());
            board = evaluate(&board);
        }
        let current = history.latest().unwrap().clone();
        assert_eq!(classify(&current, &history, 20_000), EndCondition::Period2);

        let mut short = History::new();
        short.append(live.clone());
        assert_eq!(classify(&live, &short, 20_000), EndCondition::Runaway);
        assert_eq!(classify(&live, &short, 5), EndCondition::Running);
    }

    #[test]
    fn test_codes() {
        assert_eq!(EndCondition::Running.code(), None);
        for cond in [
            EndCondition::Dead,
            EndCondition::Repeat,
            EndCondition::Period2,
            EndCondition::Runaway,
        ] {
            let code = cond.code().unwrap();
            assert_eq!(EndCondition::from_code(code), Some(cond));
            assert!(cond.is_terminal());
        }
        assert_eq!(EndCondition::Dead.code(), Some(0));
        assert_eq!(EndCondition::Period2.code(), Some(2));
        assert_eq!(EndCondition::Runaway.code(), Some(3));
        assert_eq!(EndCondition::from_code(4), None);
        assert!(!EndCondition::Running.is_terminal());
    }
}
