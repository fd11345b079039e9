//! Advice composer: CGPA advice, credit load compliance and query-specific rules merged into one text.

use crate::knowledge::{KnowledgeBaseEntry, RangePredicate, RuleType};
use crate::policy::{allowed_load, semester_load_band, CourseCreditTable, CreditAllowance, RemarkStatus};
use crate::roster::StudentRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Returned instead of advice when no rule produced any text.
pub const NO_ADVICE: &str = "No advice available for this query.";

/// Outcomes that are reported to the caller as an advice message rather than a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisoryError {
    /// The query value is not a finite number.
    InvalidQueryValue,
    /// No roster row carries the registration number.
    StudentNotFound,
    /// The query type is not one of the four rule categories.
    UnsupportedQueryType(String),
}

impl AdvisoryError {
    /// Fixed text sent back in the `advice` field.
    pub fn advice_message(&self) -> &'static str {
        match self {
            Self::InvalidQueryValue => "Invalid value. Please enter a valid number.",
            Self::StudentNotFound => "No student found with this registration number.",
            Self::UnsupportedQueryType(_) => "Unsupported query type.",
        }
    }
}

impl fmt::Display for AdvisoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedQueryType(t) => write!(f, "unsupported query type: {}", t),
            other => f.write_str(other.advice_message()),
        }
    }
}

impl std::error::Error for AdvisoryError {}

/// What the student asked about, with the number they supplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdviceQuery {
    pub query_type: RuleType,
    /// Years, credit units or spill-over units depending on `query_type`.
    pub value: f64,
}

impl AdviceQuery {
    pub fn new(query_type: RuleType, value: f64) -> Self {
        Self { query_type, value }
    }

    /// Builds a query from transport values. The value is validated before the type,
    /// so a bad number always reports [`AdvisoryError::InvalidQueryValue`].
    pub fn from_raw(query_type: &str, value: &serde_json::Value) -> Result<Self, AdvisoryError> {
        let value = parse_query_value(value)?;
        let query_type = RuleType::from_label(query_type)
            .ok_or_else(|| AdvisoryError::UnsupportedQueryType(query_type.to_string()))?;
        Ok(Self { query_type, value })
    }
}

/// Accepts JSON numbers and numeric strings; anything non-finite is invalid.
pub fn parse_query_value(value: &serde_json::Value) -> Result<f64, AdvisoryError> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or(AdvisoryError::InvalidQueryValue)
}

/// Composed advice plus the raw cumulative figures it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceResult {
    #[serde(rename = "advice")]
    pub text: String,
    #[serde(rename = "cumulative_tcl")]
    pub cumulative_total_credit_load: f64,
    #[serde(rename = "cumulative_gp")]
    pub cumulative_grade_points: f64,
    #[serde(rename = "cumulative_gpa")]
    pub cumulative_gpa: f64,
}

/// Credit load figures for the coming semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditAssessment {
    pub allowance: CreditAllowance,
    pub semester_load: u32,
    pub outstanding_units: u32,
}

impl CreditAssessment {
    pub fn total_units(&self) -> u32 {
        self.outstanding_units + self.semester_load
    }

    /// Units above the allowed load, if any.
    pub fn excess(&self) -> Option<u32> {
        self.total_units()
            .checked_sub(self.allowance.allowed_load)
            .filter(|&e| e > 0)
    }

    fn compliance_line(&self) -> String {
        let allowed = self.allowance.allowed_load;
        match self.excess() {
            Some(excess) => format!(
                "Your credit load this semester (carry over inclusive) is {} which exceeds the allowable {} units. Please consider dropping {} credit units from current courses to comply with the limit.\n\n",
                self.total_units(),
                allowed,
                excess
            ),
            None => format!(
                "\nYour current credit load is within the allowable limit of {} units.\n",
                allowed
            ),
        }
    }
}

fn bonus_line(allowance: &CreditAllowance) -> String {
    if allowance.bonus_units == 0 {
        "\nYou do not qualify for additional units this semester, work harder to build your CGPA."
            .to_string()
    } else {
        format!(
            "\nYou qualify for {} additional units this semester, bringing the maximum allowable credit load to {} units.",
            allowance.bonus_units, allowance.allowed_load
        )
    }
}

/// Advice for `query` using the built-in course credit table.
pub fn compute_advice(
    query: &AdviceQuery,
    student: &StudentRecord,
    knowledge_base: &[KnowledgeBaseEntry],
) -> AdviceResult {
    compute_advice_with(query, student, knowledge_base, CourseCreditTable::builtin())
}

/// Advice for `query` against an explicit credit table.
pub fn compute_advice_with(
    query: &AdviceQuery,
    student: &StudentRecord,
    knowledge_base: &[KnowledgeBaseEntry],
    credits: &CourseCreditTable,
) -> AdviceResult {
    let cgpa = student.cumulative_gpa;
    let mut cgpa_advice: Vec<String> = Vec::new();
    let mut query_advice: Vec<String> = Vec::new();

    // Every matching band contributes; overlapping bands stack.
    cgpa_advice.extend(
        knowledge_base
            .iter()
            .filter(|e| e.kind() == Some(RuleType::Cgpa))
            .filter(|e| e.predicate().is_some_and(|p| p.accepts(cgpa)))
            .map(|e| e.advice.clone()),
    );

    let allowance = allowed_load(cgpa);
    cgpa_advice.push(bonus_line(&allowance));

    let remark = RemarkStatus::parse(&student.remarks);
    query_advice.push(remark.status_line());

    let assessment = CreditAssessment {
        allowance,
        semester_load: semester_load_band(student.cumulative_total_credit_load),
        outstanding_units: remark.outstanding_units(credits),
    };
    tracing::debug!(
        target: "advisor::engine",
        regnum = %student.regnum,
        bonus_units = allowance.bonus_units,
        allowed_load = allowance.allowed_load,
        semester_load = assessment.semester_load,
        outstanding_units = assessment.outstanding_units,
        total_units = assessment.total_units(),
        "Credit load assessed"
    );
    query_advice.push(assessment.compliance_line());

    for entry in knowledge_base.iter().filter(|e| e.kind() == Some(query.query_type)) {
        query_advice.extend(query_rule_advice(entry, query));
    }

    let combined = cgpa_advice
        .into_iter()
        .chain(query_advice)
        .collect::<Vec<_>>()
        .join("\n");
    let combined = combined.trim();
    let text = if combined.is_empty() {
        NO_ADVICE.to_string()
    } else {
        format!(
            "Dear {}, Your CGPA is {:.2}. {}",
            student.name, cgpa, combined
        )
    };

    AdviceResult {
        text,
        cumulative_total_credit_load: student.cumulative_total_credit_load,
        cumulative_grade_points: student.cumulative_grade_points,
        cumulative_gpa: student.cumulative_gpa,
    }
}

/// Paragraphs a single query-type rule contributes, empty when it does not match.
fn query_rule_advice(entry: &KnowledgeBaseEntry, query: &AdviceQuery) -> Vec<String> {
    // CGPA rules were already applied against the student's own CGPA.
    if query.query_type == RuleType::Cgpa {
        return Vec::new();
    }
    let Some(predicate) = RangePredicate::parse(&entry.range, query.query_type) else {
        return Vec::new();
    };
    if !predicate.accepts(query.value) {
        return Vec::new();
    }

    let mut out = vec![entry.advice.clone()];
    if query.query_type == RuleType::CourseDuration {
        match entry.allowed_years() {
            Some(allowed) if (query.value.trunc() as i64) <= allowed => out.push(format!(
                "You are within the allowed {} years. Keep progressing!",
                allowed
            )),
            Some(_) => {}
            None => tracing::debug!(
                target: "advisor::engine",
                range = %entry.range,
                "Course duration rule has no readable Total_Allowed_Years"
            ),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(cgpa: f64, ctcl: f64, remarks: &str) -> StudentRecord {
        StudentRecord {
            name: "Ada Obi".to_string(),
            regnum: "U2020/001".to_string(),
            cumulative_total_credit_load: ctcl,
            cumulative_grade_points: 94.5,
            cumulative_gpa: cgpa,
            remarks: remarks.to_string(),
        }
    }

    fn knowledge_base() -> Vec<KnowledgeBaseEntry> {
        vec![
            KnowledgeBaseEntry::new("CGPA", "4.5-5.0", "First class standing."),
            KnowledgeBaseEntry::new("CGPA", "3-3.5", "Keep it up"),
            KnowledgeBaseEntry::new("CGPA", "3.0-4.0", "Second class upper."),
            KnowledgeBaseEntry::new("CGPA", "not a band", "never shown"),
            KnowledgeBaseEntry::new("Credit Load", "25 and above", "Heavy load advice."),
            KnowledgeBaseEntry::new("Credit Load", "15 and 24", "Normal load advice."),
            KnowledgeBaseEntry::new("Credit Load", "Below 15", "Light load advice."),
            KnowledgeBaseEntry::new("Spill-over", "Less than 6 credit units", "Few spill-overs."),
            KnowledgeBaseEntry::new("Spill-over", "6 and above credit units", "Many spill-overs."),
            KnowledgeBaseEntry::new("Course Duration", "5 years", "Five-year track.")
                .with_total_allowed_years("7 years"),
            KnowledgeBaseEntry::new("Course Duration", "8 years", "Extended track.")
                .with_total_allowed_years("7 years"),
        ]
    }

    #[test]
    fn matching_cgpa_band_appears_verbatim() {
        let q = AdviceQuery::new(RuleType::CreditLoad, 18.0);
        let r = compute_advice(&q, &student(3.2, 21.0, "PASS"), &knowledge_base());
        assert!(r.text.contains("Keep it up"));
        assert!(r.text.contains("Second class upper."), "overlapping bands accumulate");
        assert!(!r.text.contains("First class standing."));
        assert!(!r.text.contains("never shown"));
        assert!(r.text.starts_with("Dear Ada Obi, Your CGPA is 3.20."));
    }

    #[test]
    fn credit_load_query_matches_only_its_band() {
        let kb = knowledge_base();
        let s = student(3.2, 21.0, "PASS");

        let r = compute_advice(&AdviceQuery::new(RuleType::CreditLoad, 18.0), &s, &kb);
        assert!(r.text.contains("Normal load advice."));
        assert!(!r.text.contains("Heavy load advice."));
        assert!(!r.text.contains("Light load advice."));

        let r = compute_advice(&AdviceQuery::new(RuleType::CreditLoad, 30.0), &s, &kb);
        assert!(r.text.contains("Heavy load advice."));

        let r = compute_advice(&AdviceQuery::new(RuleType::CreditLoad, 10.0), &s, &kb);
        assert!(r.text.contains("Light load advice."));
    }

    #[test]
    fn spill_over_scenario_within_limit() {
        let q = AdviceQuery::new(RuleType::SpillOver, 3.0);
        let r = compute_advice(&q, &student(4.5, 21.0, "PASS"), &knowledge_base());

        assert!(r.text.contains(
            "You qualify for 3 additional units this semester, bringing the maximum allowable credit load to 27 units."
        ));
        assert!(r.text.contains("within the allowable limit of 27 units"));
        assert!(r.text.contains("Few spill-overs."));
        assert!(!r.text.contains("Many spill-overs."));
        assert!(r.text.contains("do not have any outstanding courses"));
        assert_eq!(r.cumulative_total_credit_load, 21.0);
        assert_eq!(r.cumulative_grade_points, 94.5);
        assert_eq!(r.cumulative_gpa, 4.5);
    }

    #[test]
    fn excess_is_quoted_exactly() {
        // 63 -> band 21; MTH112 + CHM113 + CHM121 = 9 outstanding; total 30 vs allowed 25.
        let s = student(2.4, 63.0, "MTH112, CHM113,CHM121");
        let q = AdviceQuery::new(RuleType::SpillOver, 9.0);
        let r = compute_advice(&q, &s, &knowledge_base());
        assert!(r.text.contains(
            "Your credit load this semester (carry over inclusive) is 30 which exceeds the allowable 25 units. Please consider dropping 5 credit units"
        ));
        assert!(r.text.contains("Your outstanding courses are: MTH112, CHM113, CHM121."));
        assert!(r.text.contains("Many spill-overs."));
        assert!(!r.text.contains("within the allowable limit"));
    }

    #[test]
    fn total_equal_to_allowed_is_within_limit() {
        // band 22 + CSC112 (2) = 24 == allowed 24 for CGPA < 2.0
        let s = student(1.5, 85.0, "CSC112");
        let r = compute_advice(&AdviceQuery::new(RuleType::CreditLoad, 24.0), &s, &knowledge_base());
        assert!(r.text.contains("within the allowable limit of 24 units"));
        assert!(r.text.contains("You do not qualify for additional units"));
    }

    #[test]
    fn assessment_excess() {
        let a = CreditAssessment {
            allowance: allowed_load(3.1),
            semester_load: 22,
            outstanding_units: 7,
        };
        assert_eq!(a.total_units(), 29);
        assert_eq!(a.excess(), Some(3));

        let b = CreditAssessment { outstanding_units: 4, ..a };
        assert_eq!(b.excess(), None);
    }

    #[test]
    fn commendation_gets_congratulated() {
        let r = compute_advice(
            &AdviceQuery::new(RuleType::CreditLoad, 20.0),
            &student(4.8, 21.0, "COMMENDATION"),
            &knowledge_base(),
        );
        assert!(r.text.contains("Congratulations!!!"));
        assert!(r.text.contains("First class standing."));
    }

    #[test]
    fn course_duration_within_allowed_years_is_encouraged() {
        let r = compute_advice(
            &AdviceQuery::new(RuleType::CourseDuration, 5.0),
            &student(3.2, 21.0, "PASS"),
            &knowledge_base(),
        );
        assert!(r.text.contains("Five-year track."));
        assert!(r.text.contains("You are within the allowed 7 years. Keep progressing!"));
        assert!(!r.text.contains("Extended track."));
    }

    #[test]
    fn course_duration_beyond_allowed_years_keeps_base_advice() {
        let r = compute_advice(
            &AdviceQuery::new(RuleType::CourseDuration, 8.0),
            &student(3.2, 21.0, "PASS"),
            &knowledge_base(),
        );
        assert!(r.text.contains("Extended track."));
        assert!(!r.text.contains("You are within the allowed"));
    }

    #[test]
    fn course_duration_without_readable_allowance_keeps_base_advice() {
        let kb = vec![
            KnowledgeBaseEntry::new("Course Duration", "5 years", "Five-year track."),
            KnowledgeBaseEntry::new("Course Duration", "5 years", "Second reading.")
                .with_total_allowed_years("seven"),
        ];
        let r = compute_advice(
            &AdviceQuery::new(RuleType::CourseDuration, 5.0),
            &student(3.2, 21.0, "PASS"),
            &kb,
        );
        assert!(r.text.contains("Five-year track."));
        assert!(r.text.contains("Second reading."));
        assert!(!r.text.contains("You are within the allowed"));
    }

    #[test]
    fn cgpa_query_adds_no_query_rules() {
        let r = compute_advice(
            &AdviceQuery::new(RuleType::Cgpa, 3.2),
            &student(4.6, 21.0, "PASS"),
            &knowledge_base(),
        );
        assert!(r.text.contains("First class standing."));
        assert!(!r.text.contains("Keep it up"));
    }

    #[test]
    fn empty_knowledge_base_still_reports_policy() {
        let r = compute_advice(
            &AdviceQuery::new(RuleType::SpillOver, 2.0),
            &student(3.0, 50.0, "PASS"),
            &[],
        );
        assert!(r.text.starts_with("Dear Ada Obi, Your CGPA is 3.00. You qualify for 2 additional units"));
        assert!(r.text.contains("within the allowable limit of 26 units"));
    }

    #[test]
    fn custom_credit_table_is_used() {
        let table = CourseCreditTable::from_pairs(&[("CSC112", 30)]);
        let r = compute_advice_with(
            &AdviceQuery::new(RuleType::CreditLoad, 20.0),
            &student(3.2, 21.0, "CSC112"),
            &[],
            &table,
        );
        assert!(r.text.contains("is 51 which exceeds the allowable 26 units"));
    }

    #[test]
    fn query_value_parsing() {
        assert_eq!(parse_query_value(&serde_json::json!(3)), Ok(3.0));
        assert_eq!(parse_query_value(&serde_json::json!(" 4.5 ")), Ok(4.5));
        for bad in [
            serde_json::json!("abc"),
            serde_json::json!(""),
            serde_json::json!("NaN"),
            serde_json::json!(null),
            serde_json::json!(true),
        ] {
            assert_eq!(parse_query_value(&bad), Err(AdvisoryError::InvalidQueryValue));
        }
    }

    #[test]
    fn invalid_value_wins_over_unknown_type() {
        let err = AdviceQuery::from_raw("Attendance", &serde_json::json!("abc")).unwrap_err();
        assert_eq!(err.advice_message(), "Invalid value. Please enter a valid number.");

        let err = AdviceQuery::from_raw("Attendance", &serde_json::json!("3")).unwrap_err();
        assert_eq!(err, AdvisoryError::UnsupportedQueryType("Attendance".to_string()));

        let q = AdviceQuery::from_raw("Spill-over", &serde_json::json!("3")).unwrap();
        assert_eq!(q, AdviceQuery::new(RuleType::SpillOver, 3.0));
    }

    #[test]
    fn result_serializes_with_wire_keys() {
        let r = compute_advice(
            &AdviceQuery::new(RuleType::SpillOver, 2.0),
            &student(3.0, 21.0, "PASS"),
            &[],
        );
        let json = serde_json::to_value(&r).unwrap();
        assert!(json["advice"].as_str().unwrap().starts_with("Dear"));
        assert_eq!(json["cumulative_tcl"], 21.0);
        assert_eq!(json["cumulative_gp"], 94.5);
        assert_eq!(json["cumulative_gpa"], 3.0);
    }
}
