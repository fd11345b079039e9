//! Range text -> numeric predicate.
//!
//! The range column is a literal contract with whoever maintains the knowledge base file:
//! only the forms listed on [`RangePredicate::parse`] are recognized, anything else yields None.

use super::RuleType;

const CREDIT_LOAD_HEAVY: &str = "25 and above";
const CREDIT_LOAD_NORMAL: &str = "15 and 24";
const CREDIT_LOAD_LIGHT: &str = "Below 15";
const SPILL_OVER_LIGHT: &str = "Less than 6 credit units";
const SPILL_OVER_HEAVY: &str = "6 and above credit units";

/// Closed predicate over a query value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangePredicate {
    /// `min <= v <= max`
    Between { min: f64, max: f64 },
    /// `v >= bound`
    AtLeast(f64),
    /// `v < bound`
    Below(f64),
    /// Whole-year count: `trunc(v) == years`.
    Years(i64),
    /// Any value; a spill-over range naming both bands.
    Unbounded,
}

impl RangePredicate {
    /// Parses `range` according to the conventions of `rule_type`:
    ///
    /// - CGPA: `"<a>-<b>"`
    /// - Course Duration: `"<n> years"` (canonical integer spelling only)
    /// - Credit Load: exactly `"25 and above"`, `"15 and 24"` or `"Below 15"`
    /// - Spill-over: text containing `"Less than 6 credit units"` or `"6 and above credit units"`
    ///   (naming both accepts any value)
    pub fn parse(range: &str, rule_type: RuleType) -> Option<Self> {
        let range = range.trim();
        match rule_type {
            RuleType::Cgpa => parse_band(range),
            RuleType::CourseDuration => parse_years(range),
            RuleType::CreditLoad => match range {
                CREDIT_LOAD_HEAVY => Some(Self::AtLeast(25.0)),
                CREDIT_LOAD_NORMAL => Some(Self::Between { min: 15.0, max: 24.0 }),
                CREDIT_LOAD_LIGHT => Some(Self::Below(15.0)),
                _ => None,
            },
            RuleType::SpillOver => {
                match (range.contains(SPILL_OVER_LIGHT), range.contains(SPILL_OVER_HEAVY)) {
                    (true, true) => Some(Self::Unbounded),
                    (true, false) => Some(Self::Below(6.0)),
                    (false, true) => Some(Self::AtLeast(6.0)),
                    (false, false) => None,
                }
            }
        }
    }

    pub fn accepts(&self, value: f64) -> bool {
        match *self {
            Self::Between { min, max } => min <= value && value <= max,
            Self::AtLeast(bound) => value >= bound,
            Self::Below(bound) => value < bound,
            Self::Years(years) => value.trunc() as i64 == years,
            Self::Unbounded => true,
        }
    }
}

fn parse_band(range: &str) -> Option<RangePredicate> {
    let (lo, hi) = range.split_once('-')?;
    if hi.contains('-') {
        return None;
    }
    let min: f64 = lo.trim().parse().ok()?;
    let max: f64 = hi.trim().parse().ok()?;
    Some(RangePredicate::Between { min, max })
}

fn parse_years(range: &str) -> Option<RangePredicate> {
    let n = range.strip_suffix(" years")?;
    let years: i64 = n.parse().ok()?;
    // "05 years" never equals the rendered "5 years", so it never matches.
    (years.to_string() == n).then_some(RangePredicate::Years(years))
}
