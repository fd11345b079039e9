use super::CourseCreditTable;

const COMMENDATION: &str = "COMMENDATION";
const PASS: &str = "PASS";

/// A student's remark column, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemarkStatus {
    /// Recommended by the University Senate.
    Commendation,
    /// Nothing outstanding. A blank remark reads the same way.
    Pass,
    /// Course codes still owed, trimmed, in the order written.
    Outstanding(Vec<String>),
}

impl RemarkStatus {
    pub fn parse(remarks: &str) -> Self {
        match remarks {
            COMMENDATION => Self::Commendation,
            PASS => Self::Pass,
            r if r.trim().is_empty() => Self::Pass,
            r => Self::Outstanding(
                r.split(',')
                    .map(str::trim)
                    .filter(|code| !code.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        }
    }

    /// Outstanding course codes (empty unless [`RemarkStatus::Outstanding`]).
    pub fn codes(&self) -> &[String] {
        match self {
            Self::Outstanding(codes) => codes,
            _ => &[],
        }
    }

    /// Sum of credit units over the outstanding codes; unknown codes count as zero.
    pub fn outstanding_units(&self, table: &CourseCreditTable) -> u32 {
        self.codes()
            .iter()
            .filter_map(|code| {
                let units = table.units(code);
                if units.is_none() {
                    tracing::debug!(target: "advisor::engine", code = %code, "Unrecognized course code");
                }
                units
            })
            .sum()
    }

    /// Status paragraph for the advice text.
    pub fn status_line(&self) -> String {
        match self {
            Self::Commendation => "\nCongratulations!!! You are being recommended by the University Senate, there is always a letter to this effect.\n".to_string(),
            Self::Pass => "\nAs of my cut-off date, you do not have any outstanding courses. Continue to put in more effort!\n".to_string(),
            Self::Outstanding(codes) => format!("\nYour outstanding courses are: {}.\n", codes.join(", ")),
        }
    }
}
