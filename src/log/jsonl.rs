//! JSONL (JSON Lines) files
//!
//! Append-only history of computed plans in `plans.jsonl`, plus the
//! generic [`JsonlFile`] the record store is built on.

use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::cycle::{Phase, PlanResult};

/// A file of newline-separated JSON records of type `T`
#[derive(Debug, Clone)]
pub struct JsonlFile<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> JsonlFile<T> {
    /// Bind to `path`. The file is created on first write.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// Append one record
    pub fn append(&self, record: &T) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        let json = serde_json::to_string(record).context("Failed to serialize record to JSON")?;

        writeln!(file, "{json}")
            .with_context(|| format!("Failed to write to {}", self.path.display()))?;

        Ok(())
    }

    /// Read every record, in file order
    ///
    /// A missing file reads as empty. Blank lines are skipped.
    pub fn read_all(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let mut records = Vec::new();
        for (line_num, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: T = serde_json::from_str(line).with_context(|| {
                format!(
                    "Failed to parse line {} of {} as JSON",
                    line_num + 1,
                    self.path.display()
                )
            })?;
            records.push(record);
        }

        Ok(records)
    }

    /// Replace the whole file with `records` (write to temp, then rename)
    pub fn rewrite(&self, records: &[T]) -> Result<()> {
        let mut buf = String::new();
        for record in records {
            let json =
                serde_json::to_string(record).context("Failed to serialize record to JSON")?;
            buf.push_str(&json);
            buf.push('\n');
        }

        let tmp_path = self.path.with_extension("jsonl.tmp");
        fs::write(&tmp_path, buf.as_bytes())
            .with_context(|| format!("Failed to write temp file: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;
        Ok(())
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One computed plan, as recorded in `plans.jsonl`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanLogEntry {
    /// When the plan was computed
    pub timestamp: DateTime<Utc>,
    /// Customer name the plan was computed for
    pub name: String,
    /// Cycle day (A)
    pub cycle_day: u32,
    /// Cycle length used
    pub cycle_length: u32,
    /// Active phase
    pub phase: Phase,
    /// Days left in the phase (D)
    pub days_remaining: u32,
    /// Whether the pre-order bundle applied
    pub pre_order: bool,
    /// Billed quantity
    pub quantity: u32,
    /// Billed price in rupees
    pub total_price: u32,
}

impl PlanLogEntry {
    /// Summarize a plan computed for `name` at `timestamp`
    #[must_use]
    pub fn from_plan(name: &str, plan: &PlanResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            name: name.to_string(),
            cycle_day: plan.cycle_day,
            cycle_length: plan.average_cycle_length,
            phase: plan.phase,
            days_remaining: plan.days_remaining_in_phase,
            pre_order: plan.is_pre_order,
            quantity: plan.quantity,
            total_price: plan.total_price,
        }
    }
}

/// Append-only history of computed plans
pub struct PlanLog {
    file: JsonlFile<PlanLogEntry>,
}

impl PlanLog {
    /// Create a plan log in `log_dir`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(log_dir: P) -> Result<Self> {
        let log_dir = log_dir.as_ref();
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        Ok(Self {
            file: JsonlFile::new(log_dir.join("plans.jsonl")),
        })
    }

    /// Record a plan
    pub fn append(&self, entry: &PlanLogEntry) -> Result<()> {
        self.file.append(entry)
    }

    /// All recorded plans, oldest first
    pub fn read_all(&self) -> Result<Vec<PlanLogEntry>> {
        self.file.read_all()
    }

    /// Path of the log file
    #[must_use]
    pub fn log_path(&self) -> &Path {
        self.file.path()
    }
}
