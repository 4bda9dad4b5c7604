//! A ledger kept as a JSON-lines file, one finished match per line.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::game::GameResult;

use super::{LedgerTotals, Receipt, Settlement, SettlementError, SettlementRecord};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Seconds since the Unix epoch.
    pub recorded_at: u64,
    pub result: u8,
    pub reason: u8,
    pub mode: String,
    pub time_control: String,
}

impl LedgerEntry {
    fn from_record(record: &SettlementRecord) -> Self {
        let recorded_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        Self {
            recorded_at,
            result: record.result.code(),
            reason: record.reason.code(),
            mode: record.mode.to_string(),
            time_control: record.time_control.to_string(),
        }
    }
}

pub struct FileLedger {
    path: PathBuf,
}

impl FileLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, entry: &LedgerEntry) -> Result<(), SettlementError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// Reads every entry back. Lines that don't parse are skipped.
    pub fn entries(&self) -> Result<Vec<LedgerEntry>, SettlementError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<LedgerEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(error) => warn!(
                    "skipping malformed ledger line {} in {}: {}",
                    index + 1,
                    self.path.display(),
                    error
                ),
            }
        }
        Ok(entries)
    }

    pub fn totals(&self) -> Result<LedgerTotals, SettlementError> {
        let mut totals = LedgerTotals::default();
        for entry in self.entries()? {
            totals.games_played += 1;
            match GameResult::from_code(entry.result) {
                Some(GameResult::Win) => totals.games_won += 1,
                Some(GameResult::Draw) => totals.games_drawn += 1,
                _ => {}
            }
        }
        Ok(totals)
    }
}

impl Settlement for FileLedger {
    fn submit_result(&mut self, record: &SettlementRecord) -> Result<Receipt, SettlementError> {
        self.append(&LedgerEntry::from_record(record))?;
        let totals = self.totals()?;
        info!(
            "recorded {} by {} ({}) in {}",
            record.result,
            record.reason,
            record.time_control,
            self.path.display()
        );
        Ok(Receipt::with_totals(totals))
    }
}
