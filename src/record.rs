//! Run-record file: append finished runs, read them back.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::board::Board;
use crate::detector::EndCondition;
use crate::error::{LifeError, Result};
use crate::run::Run;

/// The persisted summary of one finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    pub initial: Board,
    pub final_board: Board,
    pub generations: u64,
    pub end: EndCondition,
}

impl RunRecord {
    /// Snapshot a finished run. Returns `None` while the run is still going.
    pub fn from_run(run: &Run) -> Option<Self> {
        let final_board = run.final_board()?;
        Some(RunRecord {
            initial: run.initial().copy(),
            final_board: final_board.copy(),
            generations: run.generation(),
            end: run.end_condition(),
        })
    }

    /// Write this record.
    ///
    /// Format:
    /// ```text
    /// <empty line>
    /// <initial board, one row per line>
    /// <empty line>
    /// <final board, one row per line>
    /// <generations> <end code>
    /// ```
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let code = self.end.code().ok_or(LifeError::RunInProgress)?;
        writeln!(writer)?;
        writeln!(writer, "{}", self.initial.serialize())?;
        writeln!(writer)?;
        writeln!(writer, "{}", self.final_board.serialize())?;
        writeln!(writer, "{} {}", self.generations, code)?;
        Ok(())
    }
}

/// Appends run records to a text file, creating it on first use.
pub struct RecordWriter {
    path: PathBuf,
    written: usize,
}

impl RecordWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        RecordWriter {
            path: path.as_ref().to_path_buf(),
            written: 0,
        }
    }

    /// Append one record and flush it before returning.
    pub fn append(&mut self, record: &RunRecord) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        record.write_to(&mut writer)?;
        writer.flush()?;
        self.written += 1;
        debug!(
            "appended record #{} ({} generations, {}) to {}",
            self.written,
            record.generations,
            record.end,
            self.path.display()
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records appended through this writer.
    pub fn written(&self) -> usize {
        self.written
    }
}

/// Reads a file of run records back into memory.
pub struct RecordReader {
    records: Vec<RunRecord>,
}

impl RecordReader {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        RecordReader::parse(BufReader::new(file))
    }

    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
        let is_blank = |i: usize| lines[i].trim().is_empty();

        let mut records = Vec::new();
        let mut i = 0;
        loop {
            while i < lines.len() && is_blank(i) {
                i += 1;
            }
            if i >= lines.len() {
                break;
            }

            let start = i;
            while i < lines.len() && !is_blank(i) {
                i += 1;
            }
            let initial = parse_block(&lines[start..i], start)?;
            let size = initial.size();

            while i < lines.len() && is_blank(i) {
                i += 1;
            }
            if i + size >= lines.len() {
                return Err(LifeError::parse(
                    lines.len(),
                    "record truncated before final board and summary",
                ));
            }
            let final_board = parse_block(&lines[i..i + size], i)?;
            i += size;

            let (generations, end) = parse_summary(&lines[i], i + 1)?;
            i += 1;

            records.push(RunRecord {
                initial,
                final_board,
                generations,
                end,
            });
        }
        Ok(RecordReader { records })
    }

    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<RunRecord> {
        self.records
    }
}

/// Parse board rows that start at zero-based line `offset` in the file.
fn parse_block(rows: &[String], offset: usize) -> Result<Board> {
    Board::deserialize(&rows.join("\n")).map_err(|e| match e {
        LifeError::Parse { line, message } => LifeError::Parse {
            line: line + offset,
            message,
        },
        other => other,
    })
}

fn parse_summary(line: &str, line_no: usize) -> Result<(u64, EndCondition)> {
    let mut parts = line.split_whitespace();
    let generations = parts
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .ok_or_else(|| {
            LifeError::parse(line_no, format!("invalid generation count in {:?}", line))
        })?;
    let end = parts
        .next()
        .and_then(|s| s.parse::<u8>().ok())
        .and_then(EndCondition::from_code)
        .ok_or_else(|| LifeError::parse(line_no, format!("invalid end code in {:?}", line)))?;
    if parts.next().is_some() {
        return Err(LifeError::parse(line_no, "trailing data after end code"));
    }
    Ok((generations, end))
}
