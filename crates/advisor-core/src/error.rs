use std::fmt;

/// Failure reading one of the tabular data sources (knowledge base or student roster).
#[derive(Debug)]
pub enum IngestError {
    /// The file could not be opened or read.
    Io { path: String, source: std::io::Error },
    /// The delimited content could not be parsed (bad header row, broken quoting, ...).
    Csv { source: csv::Error },
    /// A required column is absent from the header row.
    MissingColumn(&'static str),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::Io { path, source } => write!(f, "cannot read {}: {}", path, source),
            IngestError::Csv { source } => write!(f, "malformed delimited data: {}", source),
            IngestError::MissingColumn(name) => write!(f, "missing column: {}", name),
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IngestError::Io { source, .. } => Some(source),
            IngestError::Csv { source } => Some(source),
            IngestError::MissingColumn(_) => None,
        }
    }
}

impl From<csv::Error> for IngestError {
    fn from(source: csv::Error) -> Self {
        IngestError::Csv { source }
    }
}
