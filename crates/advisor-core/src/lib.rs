//! advisor-core: the advisory policy engine behind the course load advisor.
//!
//! The engine ([`compute_advice`]) is a pure function of a student record, a query and the
//! knowledge base rows; reading those inputs from disk is left to the caller
//! ([`KnowledgeBase::from_reader`], [`StudentRoster::from_reader`]).

mod advice;
mod error;
mod knowledge;
mod policy;
mod roster;
mod shared;

pub use shared::{CoreConfig, CONFIG_PATH_ENV};

pub use error::IngestError;

pub use knowledge::{KnowledgeBase, KnowledgeBaseEntry, RangePredicate, RuleType};

pub use policy::{
    allowed_load, semester_load_band, CourseCreditTable, CreditAllowance, RemarkStatus,
    BASE_CREDIT_LOAD,
};

pub use roster::{StudentRecord, StudentRoster, StudentSource};

pub use advice::{
    compute_advice, compute_advice_with, parse_query_value, AdviceQuery, AdviceResult,
    AdvisoryError, CreditAssessment, NO_ADVICE,
};
