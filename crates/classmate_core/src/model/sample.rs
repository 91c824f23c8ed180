//! Seed data for first launch.
//!
//! # Responsibility
//! - Build the starter address book used when no data file exists yet.
//!
//! # Invariants
//! - Seed literals must satisfy every field constraint; construction panics
//!   in debug and release alike if a literal stops validating.

use crate::model::book::AddressBook;
use crate::model::field::{Day, Email, ModuleCode, Name, Phone, Remark, TeleHandle, Time};
use crate::model::module_class::ModuleClass;
use crate::model::person::Person;
use std::collections::BTreeSet;

/// Returns a freshly built sample address book, persistence flag cleared.
pub fn sample_book() -> AddressBook {
    let mut book = AddressBook::new();
    for person in sample_persons() {
        book.add_person(person).expect("sample contacts are unique");
    }
    for class in sample_classes() {
        book.add_class(class).expect("sample classes are unique");
    }
    let _ = book.take_dirty();
    book
}

fn sample_persons() -> Vec<Person> {
    vec![
        person(
            "Alex Yeoh",
            "alexyeoh@example.com",
            &["CS1231 T12 L02"],
            "87438807",
            "@alexyeoh",
            "overseas",
        ),
        person(
            "Bernice Yu",
            "berniceyu@example.com",
            &["CS2030S T10"],
            "99272758",
            "@berniceyu",
            "",
        ),
        person(
            "Charlotte Oliveiro",
            "charlotte@example.com",
            &["CS1231 T12"],
            "93210283",
            "@charlotteO",
            "",
        ),
        person(
            "David Li",
            "lidavid@example.com",
            &["CS2030S T10", "CS2040 T05"],
            "91031282",
            "@davidli",
            "late",
        ),
        person(
            "Irfan Ibrahim",
            "irfan@example.com",
            &["CS2040 T05"],
            "92492021",
            "@irfan",
            "",
        ),
        person(
            "Roy Balakrishnan",
            "royb@example.com",
            &["CS2103T T09"],
            "92624417",
            "@royBala",
            "lab5 done",
        ),
    ]
}

fn sample_classes() -> Vec<ModuleClass> {
    vec![
        class(&["CS2040 T05"], "2", "10:00", "COM1-113"),
        class(&["CS2100 T21"], "2", "15:00", "COM2-0223"),
        class(&["CS2103 TG09"], "1", "14:00", "I3 Audi"),
        class(&["CS2106 TG01"], "5", "10:00", "COM1-120"),
    ]
}

fn person(
    name: &str,
    email: &str,
    modules: &[&str],
    phone: &str,
    handle: &str,
    remark: &str,
) -> Person {
    Person::new(
        Name::new(name).expect("sample name is valid"),
        Email::new(email).expect("sample email is valid"),
        module_codes(modules),
        Phone::new(phone).expect("sample phone is valid"),
        TeleHandle::new(handle).expect("sample handle is valid"),
        Remark::new(remark),
    )
}

fn class(modules: &[&str], day: &str, time: &str, venue: &str) -> ModuleClass {
    ModuleClass::new(
        module_codes(modules),
        Day::new(day).expect("sample day is valid"),
        Time::new(time).expect("sample time is valid"),
        Remark::new(venue),
    )
}

fn module_codes(entries: &[&str]) -> BTreeSet<ModuleCode> {
    entries
        .iter()
        .map(|entry| ModuleCode::parse(entry).expect("sample module code is valid"))
        .collect()
}
