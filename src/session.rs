//! Back-to-back runs with recording and rate logging.

use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use toruslife::board::checked_size;
use toruslife::{RateMeter, RecordWriter, Result, Run, RunRecord, Tally};

use crate::config::Settings;

/// Everything that outlives a single run: the board size, random source,
/// record file, outcome totals and rate meter.
pub struct Session {
    size: usize,
    run_limit: u64,
    rng: StdRng,
    writer: RecordWriter,
    pub tally: Tally,
    pub meter: RateMeter,
}

impl Session {
    pub fn new(settings: &Settings, seed: u64) -> Result<Self> {
        let size = checked_size(settings.scale)?;
        info!(
            "{}x{} board, seed {}, recording to {}",
            size,
            size,
            seed,
            settings.output.display()
        );
        Ok(Session {
            size,
            run_limit: settings.runs,
            rng: StdRng::seed_from_u64(seed),
            writer: RecordWriter::new(&settings.output),
            tally: Tally::default(),
            meter: RateMeter::default(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn new_run(&mut self) -> Result<Run> {
        self.meter.reset();
        Run::random(self.size, &mut self.rng)
    }

    /// Persist and count a finished run. A failed write loses only this
    /// run's record; the session carries on.
    pub fn finish(&mut self, run: &Run) {
        if let Some(record) = RunRecord::from_run(run)
            && let Err(e) = self.writer.append(&record)
        {
            error!(
                "could not record run to {}: {}",
                self.writer.path().display(),
                e
            );
        }
        self.tally.record(run);
        info!(
            "{} runs: {} dead, {} period-2, {} runaway, {:.1} generations on average",
            self.tally.runs,
            self.tally.dead,
            self.tally.period2,
            self.tally.runaway,
            self.tally.mean_generations()
        );
    }

    /// Step `run` once, reporting the rate every window. Returns true when the
    /// run just ended.
    pub fn advance(&mut self, run: &mut Run) -> Result<bool> {
        let end = run.step()?;
        if let Some(rate) = self.meter.tick() {
            info!("{} generations /sec (generation {})", rate, run.generation());
        }
        if end.is_terminal() {
            self.finish(run);
            return Ok(true);
        }
        Ok(false)
    }

    /// True once the configured number of runs has finished.
    pub fn done(&self) -> bool {
        self.run_limit > 0 && self.tally.runs >= self.run_limit
    }
}
