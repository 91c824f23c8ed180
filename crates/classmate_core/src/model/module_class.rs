//! Scheduled class record.
//!
//! # Responsibility
//! - Aggregate the module codes, weekday and start time of one class slot.
//!
//! # Invariants
//! - Every field has already passed its own constructor validation.
//! - Two classes are "the same" iff module-code set, day and time all match;
//!   the remark is descriptive only and excluded from identity.

use crate::model::field::{Day, ModuleCode, Remark, Time};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// One scheduled class slot in the address book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleClass {
    pub module_codes: BTreeSet<ModuleCode>,
    pub day: Day,
    pub time: Time,
    pub remark: Remark,
}

impl ModuleClass {
    pub fn new(module_codes: BTreeSet<ModuleCode>, day: Day, time: Time, remark: Remark) -> Self {
        Self {
            module_codes,
            day,
            time,
            remark,
        }
    }

    /// Duplicate-identity policy: same module-code set at the same slot.
    pub fn is_same_class(&self, other: &ModuleClass) -> bool {
        self.module_codes == other.module_codes && self.day == other.day && self.time == other.time
    }
}

impl Display for ModuleClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for code in &self.module_codes {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "[{code}]")?;
            first = false;
        }
        write!(f, " on {} at {}", self.day.weekday_name(), self.time)?;
        if !self.remark.is_empty() {
            write!(f, " ({})", self.remark)?;
        }
        Ok(())
    }
}
