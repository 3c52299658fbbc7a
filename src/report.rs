//src/report.rs

use ahash::AHashMap;
use flate2::read::MultiGzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{ConsensusError, Result};
use crate::logspace::log_sum_exp;
use crate::types::{ReadKey, ScoreRecord};

/// Minimum number of tab-separated columns in a report data line.
pub const REPORT_MIN_FIELDS: usize = 8;

/// Per-read scores from one report, keyed by [`ReadKey`].
///
/// Iteration follows the order keys were first seen in the file. Re-inserting
/// a key replaces its record but keeps its original slot.
#[derive(Debug, Default, Clone)]
pub struct ScoreTable {
    index: AHashMap<ReadKey, usize>,
    entries: Vec<(ReadKey, ScoreRecord)>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ReadKey, record: ScoreRecord) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 = record,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, record));
            }
        }
    }

    pub fn get(&self, key: &ReadKey) -> Option<&ScoreRecord> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn contains_key(&self, key: &ReadKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ReadKey, &ScoreRecord)> {
        self.entries.iter().map(|(k, r)| (k, r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ReadKey, ScoreRecord)> for ScoreTable {
    fn from_iter<I: IntoIterator<Item = (ReadKey, ScoreRecord)>>(iter: I) -> Self {
        let mut table = ScoreTable::new();
        for (key, record) in iter {
            table.insert(key, record);
        }
        table
    }
}

/// Parses one data line of a report:
/// ```text
/// readName  -  refName  coord  logNumerator  logHyp2  logHyp3  discriminator
/// ```
/// Column 1 and anything past column 7 are ignored.
pub fn parse_report_line(line: &str) -> std::result::Result<(ReadKey, ScoreRecord), String> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < REPORT_MIN_FIELDS {
        return Err(format!(
            "expected at least {} tab-separated fields, found {}",
            REPORT_MIN_FIELDS,
            fields.len()
        ));
    }

    let parse_score = |col: usize| -> std::result::Result<f64, String> {
        fields[col]
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("field {} ({:?}) is not a number: {}", col + 1, fields[col], e))
    };
    let numerator = parse_score(4)?;
    let hyp2 = parse_score(5)?;
    let pout = parse_score(6)?;

    let key = ReadKey::new(fields[0], fields[7]);
    let record = ScoreRecord {
        position: format!("{}\t{}", fields[2], fields[3]),
        numerator,
        denominator: log_sum_exp(&[numerator, hyp2, pout]),
    };
    Ok((key, record))
}

fn open_report(path: &Path) -> Result<Box<dyn BufRead>> {
    let f = File::open(path).map_err(|source| ConsensusError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };
    Ok(reader)
}

/// Loads a whole report into memory. `.gz` files are decompressed on the fly.
///
/// Any unreadable or malformed line aborts the load; a partial table is never
/// returned.
pub fn load<P: AsRef<Path>>(path: P) -> Result<ScoreTable> {
    let path = path.as_ref();
    let reader = open_report(path)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg} {pos} lines")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Reading {}", path.display()));

    let mut table = ScoreTable::new();
    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|source| ConsensusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        spinner.inc(1);

        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, record) = parse_report_line(line).map_err(|reason| ConsensusError::Parse {
            path: path.to_path_buf(),
            line: idx + 1,
            reason,
        })?;
        table.insert(key, record);
    }
    spinner.finish_and_clear();

    log::info!("Read: {} ({} records)", path.display(), table.len());
    Ok(table)
}
