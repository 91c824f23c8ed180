//! In-memory address book.
//!
//! # Responsibility
//! - Own the canonical contact and class lists.
//! - Enforce uniqueness under the entity identity policies.
//! - Expose predicate-filtered views for display and index resolution.
//!
//! # Invariants
//! - No two contacts satisfy `Person::is_same_person`; same for classes
//!   under `ModuleClass::is_same_class`.
//! - Every mutation marks the book dirty until `take_dirty` is called.
//! - Filters never mutate the canonical lists.

use crate::model::module_class::ModuleClass;
use crate::model::person::Person;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BookResult<T> = Result<T, BookError>;

/// Uniqueness and lookup failures at the model level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    DuplicatePerson,
    DuplicateClass,
    PersonNotFound,
    ClassNotFound,
}

impl Display for BookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicatePerson => {
                f.write_str("a contact with the same name and phone already exists")
            }
            Self::DuplicateClass => f.write_str("a class with the same modules and slot already exists"),
            Self::PersonNotFound => f.write_str("contact does not exist in the address book"),
            Self::ClassNotFound => f.write_str("class does not exist in the address book"),
        }
    }
}

impl Error for BookError {}

/// Display predicate over contacts.
///
/// Keyword matching is case-insensitive with any-keyword semantics; name
/// keywords match whole words of the name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PersonFilter {
    #[default]
    All,
    NameKeywords(Vec<String>),
    ModuleKeywords(Vec<String>),
    TagKeywords(Vec<String>),
}

impl PersonFilter {
    pub fn matches(&self, person: &Person) -> bool {
        match self {
            Self::All => true,
            Self::NameKeywords(keywords) => keywords.iter().any(|keyword| {
                person
                    .name
                    .as_str()
                    .split_whitespace()
                    .any(|word| word.eq_ignore_ascii_case(keyword))
            }),
            Self::ModuleKeywords(keywords) => keywords.iter().any(|keyword| {
                person
                    .module_codes
                    .iter()
                    .any(|code| code.matches_keyword(keyword))
            }),
            Self::TagKeywords(keywords) => keywords.iter().any(|keyword| {
                person
                    .module_codes
                    .iter()
                    .flat_map(|code| code.tags())
                    .any(|tag| tag.matches_keyword(keyword))
            }),
        }
    }
}

/// Display predicate over classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClassFilter {
    #[default]
    All,
    ModuleKeywords(Vec<String>),
}

impl ClassFilter {
    pub fn matches(&self, class: &ModuleClass) -> bool {
        match self {
            Self::All => true,
            Self::ModuleKeywords(keywords) => keywords.iter().any(|keyword| {
                class
                    .module_codes
                    .iter()
                    .any(|code| code.matches_keyword(keyword))
            }),
        }
    }
}

/// Mutable collection of unique contacts and unique classes.
#[derive(Debug, Default)]
pub struct AddressBook {
    persons: Vec<Person>,
    classes: Vec<ModuleClass>,
    person_filter: PersonFilter,
    class_filter: ClassFilter,
    dirty: bool,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn classes(&self) -> &[ModuleClass] {
        &self.classes
    }

    /// Contacts passing the active filter, in canonical list order.
    pub fn filtered_persons(&self) -> Vec<&Person> {
        self.persons
            .iter()
            .filter(|person| self.person_filter.matches(person))
            .collect()
    }

    /// Classes passing the active filter, in canonical list order.
    pub fn filtered_classes(&self) -> Vec<&ModuleClass> {
        self.classes
            .iter()
            .filter(|class| self.class_filter.matches(class))
            .collect()
    }

    pub fn set_person_filter(&mut self, filter: PersonFilter) {
        self.person_filter = filter;
    }

    pub fn set_class_filter(&mut self, filter: ClassFilter) {
        self.class_filter = filter;
    }

    /// Restores the unfiltered view of both lists.
    pub fn reset_filters(&mut self) {
        self.person_filter = PersonFilter::All;
        self.class_filter = ClassFilter::All;
    }

    pub fn add_person(&mut self, person: Person) -> BookResult<()> {
        if self.persons.iter().any(|p| p.is_same_person(&person)) {
            return Err(BookError::DuplicatePerson);
        }
        self.persons.push(person);
        self.dirty = true;
        Ok(())
    }

    pub fn remove_person(&mut self, target: &Person) -> BookResult<()> {
        let position = self
            .persons
            .iter()
            .position(|p| p == target)
            .ok_or(BookError::PersonNotFound)?;
        self.persons.remove(position);
        self.dirty = true;
        Ok(())
    }

    /// Replaces `target` with `edited` in place.
    ///
    /// Fails when `edited` collides with the identity of any other contact,
    /// leaving the book unchanged.
    pub fn replace_person(&mut self, target: &Person, edited: Person) -> BookResult<()> {
        let position = self
            .persons
            .iter()
            .position(|p| p == target)
            .ok_or(BookError::PersonNotFound)?;
        let collides = self
            .persons
            .iter()
            .enumerate()
            .any(|(i, p)| i != position && p.is_same_person(&edited));
        if collides {
            return Err(BookError::DuplicatePerson);
        }
        self.persons[position] = edited;
        self.dirty = true;
        Ok(())
    }

    pub fn add_class(&mut self, class: ModuleClass) -> BookResult<()> {
        if self.classes.iter().any(|c| c.is_same_class(&class)) {
            return Err(BookError::DuplicateClass);
        }
        self.classes.push(class);
        self.dirty = true;
        Ok(())
    }

    pub fn remove_class(&mut self, target: &ModuleClass) -> BookResult<()> {
        let position = self
            .classes
            .iter()
            .position(|c| c == target)
            .ok_or(BookError::ClassNotFound)?;
        self.classes.remove(position);
        self.dirty = true;
        Ok(())
    }

    /// Sorts contacts alphabetically by name, case-insensitive.
    ///
    /// The underlying sort is stable, so contacts whose names differ only in
    /// case keep their relative order.
    pub fn sort_persons(&mut self) {
        self.persons.sort_by_key(|person| person.name.sort_key());
        self.dirty = true;
    }

    /// Drops all contacts and classes and resets both filters.
    pub fn clear(&mut self) {
        self.persons.clear();
        self.classes.clear();
        self.reset_filters();
        self.dirty = true;
    }

    /// Returns the dirty flag and resets it.
    ///
    /// The persistence driver calls this after every dispatched command to
    /// decide whether a full-file rewrite is due.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
