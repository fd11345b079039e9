/// Units every student may register before any CGPA bonus.
pub const BASE_CREDIT_LOAD: u32 = 24;

/// Inclusive cumulative-TCL bands and the load expected this semester.
/// Values outside every band map to 0.
const SEMESTER_LOAD_BANDS: [(f64, f64, u32); 5] = [
    (20.0, 20.0, 20),
    (21.0, 41.0, 21),
    (62.0, 65.0, 21),
    (83.0, 89.0, 22),
    (105.0, 114.0, 22),
];

/// CGPA-derived registration ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditAllowance {
    pub bonus_units: u32,
    pub allowed_load: u32,
}

/// Maps CGPA to bonus units (3 / 2 / 1 / 0 at the 4.0, 3.0 and 2.0 thresholds).
pub fn allowed_load(cgpa: f64) -> CreditAllowance {
    let bonus_units = if cgpa >= 4.0 {
        3
    } else if cgpa >= 3.0 {
        2
    } else if cgpa >= 2.0 {
        1
    } else {
        0
    };
    CreditAllowance {
        bonus_units,
        allowed_load: BASE_CREDIT_LOAD + bonus_units,
    }
}

/// Banded load for this semester from the cumulative total credit load.
pub fn semester_load_band(cumulative_tcl: f64) -> u32 {
    SEMESTER_LOAD_BANDS
        .iter()
        .find(|(lo, hi, _)| *lo <= cumulative_tcl && cumulative_tcl <= *hi)
        .map(|&(_, _, load)| load)
        .unwrap_or(0)
}
