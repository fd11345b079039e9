use std::collections::HashMap;
use std::sync::OnceLock;

/// Credit weight per course code, as published in the departmental handbook.
const COURSE_CREDIT_UNITS: [(&str, u32); 48] = [
    ("MTH112", 3), ("PHY117", 1), ("CHM113", 3), ("CHM114", 1), ("BIO112", 2),
    ("GSS111", 1), ("GSS112", 2), ("GSS113", 1), ("UGC111", 1), ("CSC112", 2),
    ("GSS116", 1), ("PHY112", 2), ("MTH122", 3), ("PHY122", 2), ("PHY127", 1),
    ("CHM121", 3), ("CHM124", 1), ("GSS121", 2), ("GSS126", 1), ("UGC121", 2),
    ("CSC122", 2), ("CSC123", 2), ("MTH123", 3), ("MTH211", 3), ("STA212", 2),
    ("PHY212", 2), ("GSS212", 2), ("GSS217", 3), ("CSC211", 2), ("CSC212", 2),
    ("CSC213", 2), ("CSC218", 3), ("MTH221", 3), ("MTH222", 3), ("STA224", 3),
    ("PHY222", 2), ("GNT221", 3), ("CSC221", 3), ("CSC222", 2), ("CSC226", 2),
    ("CSC311", 3), ("CSC312", 2), ("CSC313", 3), ("CSC314", 3), ("CSC316", 3),
    ("CSC317", 3), ("CSC318", 3), ("GNT311", 2),
];

/// Immutable course code -> credit units mapping.
#[derive(Debug, Clone)]
pub struct CourseCreditTable {
    units: HashMap<&'static str, u32>,
}

impl CourseCreditTable {
    /// The built-in table, initialized on first use and shared for the process lifetime.
    pub fn builtin() -> &'static CourseCreditTable {
        static TABLE: OnceLock<CourseCreditTable> = OnceLock::new();
        TABLE.get_or_init(|| Self::from_pairs(&COURSE_CREDIT_UNITS))
    }

    pub fn from_pairs(pairs: &[(&'static str, u32)]) -> Self {
        Self {
            units: pairs.iter().copied().collect(),
        }
    }

    /// Credit weight for `code`; None for codes not in the table.
    pub fn units(&self, code: &str) -> Option<u32> {
        self.units.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_complete() {
        let table = CourseCreditTable::builtin();
        assert_eq!(table.len(), 48);
        assert!(COURSE_CREDIT_UNITS.iter().all(|&(_, u)| (1..=3).contains(&u)));
    }

    #[test]
    fn lookups() {
        let table = CourseCreditTable::builtin();
        assert_eq!(table.units("CSC112"), Some(2));
        assert_eq!(table.units("MTH112"), Some(3));
        assert_eq!(table.units("PHY117"), Some(1));
        assert_eq!(table.units("csc112"), None);
        assert_eq!(table.units("XYZ999"), None);
    }
}
