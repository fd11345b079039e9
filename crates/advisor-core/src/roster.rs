//! Student records and the roster they are looked up from.

use crate::error::IngestError;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Cumulative academic record for one student. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: String,
    pub regnum: String,
    pub cumulative_total_credit_load: f64,
    pub cumulative_grade_points: f64,
    /// 0.0–5.0 scale.
    pub cumulative_gpa: f64,
    /// `PASS`, `COMMENDATION`, or comma-separated outstanding course codes.
    pub remarks: String,
}

/// Lookup seam between the engine and wherever records are kept.
pub trait StudentSource: Send + Sync {
    /// Record for the registration number, if any.
    fn find(&self, regnum: &str) -> Option<StudentRecord>;
}

/// Column layout of the roster export.
#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "NAME")]
    name: String,
    #[serde(rename = "REG. NO.")]
    regnum: String,
    #[serde(rename = "CTCL")]
    ctcl: f64,
    #[serde(rename = "CGP")]
    cgp: f64,
    #[serde(rename = "CGPA")]
    cgpa: f64,
    #[serde(rename = "Remark", default)]
    remark: String,
}

impl From<RosterRow> for StudentRecord {
    fn from(row: RosterRow) -> Self {
        Self {
            name: row.name,
            regnum: row.regnum,
            cumulative_total_credit_load: row.ctcl,
            cumulative_grade_points: row.cgp,
            cumulative_gpa: row.cgpa,
            remarks: row.remark,
        }
    }
}

/// In-memory roster read from a delimited export.
#[derive(Debug, Clone, Default)]
pub struct StudentRoster {
    records: Vec<StudentRecord>,
}

impl StudentRoster {
    pub fn new(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    /// Parses a roster with `NAME, REG. NO., CTCL, CGP, CGPA, Remark` columns.
    /// Rows with non-numeric cumulative figures are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IngestError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        if !headers.iter().any(|h| h == "REG. NO.") {
            return Err(IngestError::MissingColumn("REG. NO."));
        }

        let mut records = Vec::new();
        for (idx, row) in rdr.deserialize::<RosterRow>().enumerate() {
            match row {
                Ok(row) => records.push(StudentRecord::from(row)),
                Err(e) => tracing::warn!(
                    target: "advisor::ingest",
                    row = idx + 2,
                    error = %e,
                    "Skipping unreadable roster row"
                ),
            }
        }
        tracing::debug!(target: "advisor::ingest", students = records.len(), "Roster loaded");
        Ok(Self { records })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl StudentSource for StudentRoster {
    /// First row whose registration number equals `regnum` (whitespace ignored).
    fn find(&self, regnum: &str) -> Option<StudentRecord> {
        let regnum = regnum.trim();
        self.records.iter().find(|r| r.regnum == regnum).cloned()
    }
}
