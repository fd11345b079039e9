//! Advisory knowledge base: the ordered rule table the engine consults.
//!
//! ## Rule categories
//!
//! | Label             | RuleType        | Range forms                                         |
//! |-------------------|-----------------|-----------------------------------------------------|
//! | `CGPA`            | Cgpa            | `"<a>-<b>"` inclusive band                           |
//! | `Course Duration` | CourseDuration  | `"<n> years"` plus `Total_Allowed_Years`            |
//! | `Credit Load`     | CreditLoad      | `"25 and above"`, `"15 and 24"`, `"Below 15"`       |
//! | `Spill-over`      | SpillOver       | `"Less than 6 credit units"`, `"6 and above credit units"` |
//!
//! Rows of any other type are kept (order matters for the file) but never consulted.

mod range;

pub use range::RangePredicate;

use crate::error::IngestError;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Rule category shared by knowledge base rows and advice queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleType {
    #[serde(rename = "CGPA")]
    Cgpa,
    #[serde(rename = "Course Duration")]
    CourseDuration,
    #[serde(rename = "Credit Load")]
    CreditLoad,
    #[serde(rename = "Spill-over")]
    SpillOver,
}

impl RuleType {
    /// The literal used in the knowledge base `Type` column and in queries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cgpa => "CGPA",
            Self::CourseDuration => "Course Duration",
            Self::CreditLoad => "Credit Load",
            Self::SpillOver => "Spill-over",
        }
    }

    /// Parses a label (surrounding whitespace ignored). Returns None for unknown categories.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "CGPA" => Some(Self::Cgpa),
            "Course Duration" => Some(Self::CourseDuration),
            "Credit Load" => Some(Self::CreditLoad),
            "Spill-over" => Some(Self::SpillOver),
            _ => None,
        }
    }

    pub fn all() -> [Self; 4] {
        [Self::Cgpa, Self::CourseDuration, Self::CreditLoad, Self::SpillOver]
    }
}

/// One row of the knowledge base file. Values arrive trimmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBaseEntry {
    #[serde(rename = "Type")]
    pub rule_type: String,
    #[serde(rename = "Range", default)]
    pub range: String,
    #[serde(rename = "Advice", default)]
    pub advice: String,
    /// Only meaningful for `Course Duration` rows, e.g. `"7 years"`.
    #[serde(rename = "Total_Allowed_Years", default)]
    pub total_allowed_years: Option<String>,
}

impl KnowledgeBaseEntry {
    pub fn new(rule_type: &str, range: &str, advice: &str) -> Self {
        Self {
            rule_type: rule_type.to_string(),
            range: range.to_string(),
            advice: advice.to_string(),
            total_allowed_years: None,
        }
    }

    pub fn with_total_allowed_years(mut self, years: impl Into<String>) -> Self {
        self.total_allowed_years = Some(years.into());
        self
    }

    /// Category of this row, if it is one the engine consults.
    pub fn kind(&self) -> Option<RuleType> {
        RuleType::from_label(&self.rule_type)
    }

    /// Predicate for this row's `Range` under its own category.
    /// None when the category is unknown or the range text is malformed.
    pub fn predicate(&self) -> Option<RangePredicate> {
        RangePredicate::parse(&self.range, self.kind()?)
    }

    /// Leading integer of `Total_Allowed_Years` (`"7 years"` -> 7).
    pub fn allowed_years(&self) -> Option<i64> {
        self.total_allowed_years
            .as_deref()?
            .split_whitespace()
            .next()?
            .parse()
            .ok()
    }
}

/// Ordered, read-only rule table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeBaseEntry>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<KnowledgeBaseEntry>) -> Self {
        Self { entries }
    }

    /// Parses delimited text with a `Type, Range, Advice[, Total_Allowed_Years]` header row.
    /// Columns are located by header name; a short row leaves its missing trailing fields
    /// empty. Rows that cannot be read at all are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IngestError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let column = |name: &str| headers.iter().position(|h| h == name);
        let type_col = column("Type").ok_or(IngestError::MissingColumn("Type"))?;
        let range_col = column("Range");
        let advice_col = column("Advice");
        let years_col = column("Total_Allowed_Years");

        let mut entries = Vec::new();
        for (idx, row) in rdr.records().enumerate() {
            let record = match row {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(
                        target: "advisor::ingest",
                        row = idx + 2,
                        error = %e,
                        "Skipping unreadable knowledge base row"
                    );
                    continue;
                }
            };
            let field = |col: Option<usize>| col.and_then(|i| record.get(i)).unwrap_or("");
            let years = field(years_col);
            entries.push(KnowledgeBaseEntry {
                rule_type: field(Some(type_col)).to_string(),
                range: field(range_col).to_string(),
                advice: field(advice_col).to_string(),
                total_allowed_years: (!years.is_empty()).then(|| years.to_string()),
            });
        }
        tracing::info!(
            target: "advisor::ingest",
            entries = entries.len(),
            "Knowledge base loaded"
        );
        Ok(Self { entries })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn entries(&self) -> &[KnowledgeBaseEntry] {
        &self.entries
    }

    /// Rows of the given category, in file order.
    pub fn of_type(&self, rule_type: RuleType) -> impl Iterator<Item = &KnowledgeBaseEntry> {
        self.entries
            .iter()
            .filter(move |e| e.kind() == Some(rule_type))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
