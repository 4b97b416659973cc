use crate::clock::{Clock, SystemClock};
use crate::data_structures::Record;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawRecord {
    amount: f64,
    #[serde(default)]
    comment: String,
    date: Option<String>,
}

/// Reads records from JSON-lines files, one object per line.
///
/// ```json
/// {"amount": 300, "comment": "coffee"}
/// {"amount": 1000, "comment": "birthday bar", "date": "19.11.2023"}
/// ```
pub struct RecordLoader {
    clock: Box<dyn Clock>,
}

impl RecordLoader {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Record>> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;

        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let record = self
                .parse_line(&line)
                .with_context(|| format!("Invalid record on line {}", line_num + 1))?;
            records.push(record);
        }

        tracing::debug!(
            path = %path.as_ref().display(),
            count = records.len(),
            "loaded records"
        );

        Ok(records)
    }

    pub fn parse_line(&self, line: &str) -> Result<Record> {
        let raw: RawRecord = serde_json::from_str(line).context("Failed to parse JSON")?;

        let record = Record::with_clock(
            raw.amount,
            raw.comment,
            raw.date.as_deref(),
            self.clock.as_ref(),
        )?;

        Ok(record)
    }
}

impl Default for RecordLoader {
    fn default() -> Self {
        Self::new()
    }
}
