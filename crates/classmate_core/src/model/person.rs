//! Contact record.
//!
//! # Responsibility
//! - Aggregate the validated fields that make up one contact.
//! - Define the duplicate-contact identity policy in one place.
//!
//! # Invariants
//! - Every field has already passed its own constructor validation.
//! - Two contacts are "the same" iff name (case-insensitive) and phone match.

use crate::model::field::{Email, ModuleCode, Name, Phone, Remark, TeleHandle};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// One contact in the address book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: Name,
    pub email: Email,
    pub module_codes: BTreeSet<ModuleCode>,
    pub phone: Phone,
    pub tele_handle: TeleHandle,
    pub remark: Remark,
}

impl Person {
    pub fn new(
        name: Name,
        email: Email,
        module_codes: BTreeSet<ModuleCode>,
        phone: Phone,
        tele_handle: TeleHandle,
        remark: Remark,
    ) -> Self {
        Self {
            name,
            email,
            module_codes,
            phone,
            tele_handle,
            remark,
        }
    }

    /// Duplicate-identity policy: same name ignoring case, same phone.
    ///
    /// Weaker than full value equality; used for uniqueness enforcement so
    /// that editing secondary fields never creates a second copy of a contact.
    pub fn is_same_person(&self, other: &Person) -> bool {
        self.name.eq_ignore_case(&other.name) && self.phone == other.phone
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}; phone: {}; email: {}; telegram: {}",
            self.name, self.phone, self.email, self.tele_handle
        )?;
        if !self.module_codes.is_empty() {
            write!(f, "; modules:")?;
            for code in &self.module_codes {
                write!(f, " [{code}]")?;
            }
        }
        if !self.remark.is_empty() {
            write!(f, "; remark: {}", self.remark)?;
        }
        Ok(())
    }
}
