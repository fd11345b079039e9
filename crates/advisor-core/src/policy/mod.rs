//! Course load policy: CGPA bonus, semester load bands, credit reference table and remark parsing.

mod courses;
mod credit_load;
mod remarks;

pub use courses::CourseCreditTable;
pub use credit_load::{allowed_load, semester_load_band, CreditAllowance, BASE_CREDIT_LOAD};
pub use remarks::RemarkStatus;
